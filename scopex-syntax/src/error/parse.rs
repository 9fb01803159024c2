use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::ops::Range;

use unicode_width::UnicodeWidthStr;

// Line number and column starts at one, not zero,
// because actual humans might read this
pub(crate) fn src_line_no(end: usize, src: &str) -> (usize, usize) {
    let mut line_no = 1;
    let mut pos = 0;

    while let Some(p) = &src[pos..end].find('\n') {
        pos += p + 1;
        line_no += 1;
    }

    // Set the column to at least one, as zero makes no sense to the end user
    let col = 1 + end - pos;

    (line_no, col)
}

/// An error pointing at a location in the expression source.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError<K> {
    pub kind: K,
    pub line: usize,
    pub col: usize,
    pub src: String,
}

impl<K> SyntaxError<K> {
    pub(crate) fn new(range: Range<usize>, src: &str, kind: K) -> Self {
        let start = range.start.min(src.len());
        let (line, col) = src_line_no(start, src);
        Self {
            line,
            col,
            src: src.to_string(),
            kind,
        }
    }

    // Display width of everything on the error line before the column
    fn caret_offset(&self) -> usize {
        let Some(line) = self.src.lines().nth(self.line - 1) else { return 0 };
        let end = (self.col - 1).min(line.len());
        match line.get(..end) {
            Some(prefix) => prefix.width(),
            None => end,
        }
    }
}

impl<K: Debug + Display> StdError for SyntaxError<K> {}

impl<K: Display> Display for SyntaxError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let start_line = self.line;
        let lines = self.src.lines().enumerate().skip(start_line.saturating_sub(2)).take(3);

        writeln!(f, "error on line {start_line}: {}", self.kind)?;

        for (no, line) in lines {
            let no = no + 1;
            let mark = if self.line == no { "-> " } else { "   " };
            let mark_line = format!("{mark}{no}");
            writeln!(f, "{mark_line} {line}")?;

            if self.line == no {
                writeln!(f, "{:width$}^", "", width = mark_line.len() + 1 + self.caret_offset())?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken { expected: &'static str, found: String },
    UnexpectedEof { expected: &'static str },
    TrailingToken(String),
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "unexpected token `{found}`, expecting: {expected}")
            }
            ParseErrorKind::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input, expecting: {expected}")
            }
            ParseErrorKind::TrailingToken(token) => write!(f, "unexpected token `{token}` after expression"),
        }
    }
}
