use std::fmt::{Result, Write};

/// Anything that can write a human readable dump of itself,
/// such as a compiled program.
pub trait DebugWriter {
    fn write(&mut self, output: &mut impl Write) -> Result;
}

impl<T: DebugWriter> DebugWriter for &mut T {
    fn write(&mut self, output: &mut impl Write) -> Result {
        (**self).write(output)
    }
}

impl DebugWriter for &str {
    fn write(&mut self, output: &mut impl Write) -> Result {
        output.write_str(self)
    }
}

/// Builder for a debug report made up of titled sections.
///
/// ```
/// # use scopex_debug::{Debug, DebugWriter};
/// struct Hello;
///
/// impl DebugWriter for Hello {
///     fn write(&mut self, output: &mut impl std::fmt::Write) -> std::fmt::Result {
///         write!(output, "hello")
///     }
/// }
///
/// let report = Debug::new(String::new()).heading().section("greeting", Hello).footer().finish();
/// assert!(report.contains("--- greeting ---\nhello\n"));
/// ```
pub struct Debug<O>(pub O);

impl<O: Write> Debug<O> {
    pub fn new(output: O) -> Self {
        Self(output)
    }

    pub fn heading(mut self) -> Self {
        let _ = writeln!(&mut self.0, "=== scopex ===");
        self
    }

    pub fn section(mut self, title: &str, mut item: impl DebugWriter) -> Self {
        let _ = writeln!(&mut self.0, "--- {title} ---");
        let _ = item.write(&mut self.0);
        let _ = writeln!(&mut self.0);
        self
    }

    pub fn footer(mut self) -> Self {
        let _ = writeln!(&mut self.0, "--- end ---");
        self
    }

    pub fn finish(self) -> O {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Numbers(Vec<u32>);

    impl DebugWriter for Numbers {
        fn write(&mut self, output: &mut impl Write) -> Result {
            let s = self.0.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(",");
            write!(output, "{s}")
        }
    }

    #[test]
    fn sections_in_order() {
        let report = Debug::new(String::new())
            .heading()
            .section("first", Numbers(vec![1, 2]))
            .section("second", Numbers(vec![3]))
            .footer()
            .finish();

        let expected = "=== scopex ===\n--- first ---\n1,2\n--- second ---\n3\n--- end ---\n";
        assert_eq!(report, expected);
    }

    #[test]
    fn borrowed_writer() {
        let mut numbers = Numbers(vec![7]);
        let report = Debug::new(String::new()).section("n", &mut numbers).finish();
        assert_eq!(report, "--- n ---\n7\n");
    }

    #[test]
    fn plain_text() {
        let report = Debug::new(String::new()).section("text", "a.b").finish();
        assert_eq!(report, "--- text ---\na.b\n");
    }
}
