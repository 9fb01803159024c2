use proptest::prelude::*;
use scopex::{Value, compile};

fn value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        "[a-z]{0,4}".prop_map(Value::from),
    ];

    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::hash_map("[a-c]", inner, 0..4).prop_map(Value::Map),
        ]
    })
}

const SOURCES: &[&str] = &[
    "a",
    "a.b.c.d",
    "a[b][c]",
    "a[0].length",
    "this.a[this.b]",
    "$locals.a.b",
    "a(b, c)",
    "a.b(c.d)",
    "[a, b.c, {x: c[a]}]",
];

proptest! {
    #[test]
    fn decimals_round_trip(n in 0u32..1_000_000, frac in 0u32..1000) {
        let src = format!("{n}.{frac:03}");
        let expected: f64 = src.parse().unwrap();
        prop_assert_eq!(compile(&src).unwrap().eval_constant(), Value::Number(expected));
    }

    #[test]
    fn scientific_round_trip(mantissa in 1u32..10_000, exp in -10i32..10) {
        let src = format!("{mantissa}e{exp}");
        let expected: f64 = src.parse().unwrap();
        prop_assert_eq!(compile(&src).unwrap().eval_constant(), Value::Number(expected));
    }

    #[test]
    fn evaluation_never_panics(context in value(), locals in prop::option::of(value())) {
        for src in SOURCES {
            let evaluator = compile(src).unwrap();
            let _ = evaluator.eval(&context, locals.as_ref());
        }
    }

    #[test]
    fn compiling_never_panics(src in "[a-z0-9.\\[\\]{}(),:'\" ]{0,16}") {
        let _ = compile(&src);
    }
}
