use scopex::{Value, compile};

fn context() -> Value {
    Value::map([
        ("aKey", Value::map([("anotherKey", 42)])),
        ("anArray", Value::list([1, 2, 3])),
        ("lock", Value::map([("theKey", 42)])),
        ("key", Value::from("theKey")),
        ("keys", Value::map([("aKey", "theKey")])),
    ])
}

#[test]
fn member_access() -> anyhow::Result<()> {
    let evaluator = compile("aKey.anotherKey")?;
    assert_eq!(evaluator.eval(&context(), None), Value::from(42));

    let context = Value::map([("aKey", Value::map(Vec::<(String, Value)>::new()))]);
    assert_eq!(evaluator.eval(&context, None), Value::Undefined);
    Ok(())
}

#[test]
fn missing_links_short_circuit() -> anyhow::Result<()> {
    let evaluator = compile("aKey.secondKey.thirdKey.fourthKey")?;

    let contexts = [
        Value::Undefined,
        Value::Null,
        Value::map([("aKey", Value::Null)]),
        Value::map([("aKey", Value::map([("secondKey", 0)]))]),
        Value::map([("aKey", Value::map([("secondKey", Value::map([("thirdKey", "")]))]))]),
    ];

    for context in contexts {
        assert_eq!(evaluator.eval(&context, None), Value::Undefined, "{context}");
    }

    Ok(())
}

#[test]
fn this() -> anyhow::Result<()> {
    let evaluator = compile("this")?;
    assert_eq!(evaluator.eval(&context(), None), context());
    assert_eq!(evaluator.eval_constant(), Value::Undefined);

    let evaluator = compile("this.aKey['anotherKey']")?;
    assert_eq!(evaluator.eval(&context(), None), Value::from(42));
    Ok(())
}

#[test]
fn computed_access() -> anyhow::Result<()> {
    let inputs = [
        (r#"aKey["anotherKey"]"#, Value::from(42)),
        ("anArray[1]", Value::from(2)),
        ("anArray[3]", Value::Undefined),
        ("anArray.length", Value::from(3)),
        ("lock[key]", Value::from(42)),
        (r#"lock[keys["aKey"]]"#, Value::from(42)),
        ("lock[nothing]", Value::Undefined),
        ("nothing[key]", Value::Undefined),
    ];

    for (src, expected) in inputs {
        assert_eq!(compile(src)?.eval(&context(), None), expected, "{src}");
    }

    Ok(())
}

#[test]
fn exponent_number_keys() -> anyhow::Result<()> {
    let context = Value::map([("m", Value::map([("1e+21", 7), ("1e-7", 8), ("100", 9)]))]);
    let inputs = [("m[1e21]", Value::from(7)), ("m[1e-7]", Value::from(8)), ("m[1e2]", Value::from(9))];

    for (src, expected) in inputs {
        assert_eq!(compile(src)?.eval(&context, None), expected, "{src}");
    }

    assert_eq!(compile("{1e21: 1}")?.eval_constant(), Value::map([("1e+21", 1)]));
    Ok(())
}

#[test]
fn keywords_as_property_names() -> anyhow::Result<()> {
    let context = Value::map([("a", Value::map([("null", 1), ("this", 2)]))]);
    assert_eq!(compile("a.null")?.eval(&context, None), Value::from(1));
    assert_eq!(compile("a.this")?.eval(&context, None), Value::from(2));
    assert_eq!(compile("{this: 1}")?.eval_constant(), Value::map([("this", 1)]));
    Ok(())
}
