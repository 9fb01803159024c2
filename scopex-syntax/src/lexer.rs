use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{LexError, LexErrorKind, Result};
use crate::literal::Literal;
use crate::token::Token;

/// Tokenize an expression in one pass.
pub fn lex(src: &str) -> Result<Vec<Token>> {
    let tokens = Lexer::new(src).collect::<Result<Vec<_>>>()?;

    #[cfg(feature = "logging")]
    log::trace!("lexed {} tokens from `{src}`", tokens.len());

    Ok(tokens)
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

pub struct Lexer<'src> {
    src: &'src str,
    chars: Peekable<CharIndices<'src>>,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            chars: src.char_indices().peekable(),
            src,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            let (index, c) = match self.chars.next() {
                None => return Ok(None),
                Some(c) => c,
            };

            let next = self.chars.peek().map(|(_, c)| *c);

            let token = match (c, next) {
                // -----------------------------------------------------------------------------
                //     - Number -
                // -----------------------------------------------------------------------------
                ('0'..='9', _) | ('.', Some('0'..='9')) => self.take_number(index)?,

                // -----------------------------------------------------------------------------
                //     - String -
                // -----------------------------------------------------------------------------
                ('"' | '\'', _) => self.take_string(c, index)?,

                // -----------------------------------------------------------------------------
                //     - Single tokens -
                // -----------------------------------------------------------------------------
                ('[' | ']' | '{' | '}' | ':' | '.' | ',' | '(' | ')', _) => Token::punct(c, index),

                // -----------------------------------------------------------------------------
                //     - Ident -
                // -----------------------------------------------------------------------------
                ('a'..='z' | 'A'..='Z' | '_' | '$', _) => self.take_ident(index),

                // -----------------------------------------------------------------------------
                //     - Whitespace -
                // -----------------------------------------------------------------------------
                (' ' | '\r' | '\t' | '\n' | '\u{0B}' | '\u{A0}', _) => continue,

                _ => return Err(self.error(index, LexErrorKind::UnexpectedChar(c))),
            };

            return Ok(Some(token));
        }
    }

    fn error(&self, index: usize, kind: LexErrorKind) -> crate::error::Error {
        LexError::new(index..index + 1, self.src, kind).into()
    }

    // The character after the one `peek` returns
    fn peek_second(&self) -> Option<char> {
        let mut chars = self.chars.clone();
        chars.next();
        chars.peek().map(|(_, c)| *c)
    }

    fn take_number(&mut self, start: usize) -> Result<Token> {
        let mut end = start + 1;

        while let Some(&(index, c)) = self.chars.peek() {
            let c = c.to_ascii_lowercase();
            let next = self.peek_second();
            let prev = self.src[start..index].chars().last().map(|c| c.to_ascii_lowercase());

            match c {
                '0'..='9' | '.' => {}
                'e' if is_exp_operator(next) => {}
                '+' | '-' if prev == Some('e') => match next {
                    Some('0'..='9') => {}
                    _ => return Err(self.error(index, LexErrorKind::InvalidExponent)),
                },
                _ => break,
            }

            self.chars.next();
            end = index + 1;
        }

        let text = &self.src[start..end];
        let number = text
            .parse::<f64>()
            .map_err(|_| LexError::new(start..end, self.src, LexErrorKind::InvalidNumber))?;

        Ok(Token::literal(text, Literal::Number(number), start))
    }

    fn take_string(&mut self, quote: char, start: usize) -> Result<Token> {
        let mut string = String::new();

        loop {
            let Some((index, c)) = self.chars.next() else {
                return Err(self.error(start, LexErrorKind::UnmatchedQuote));
            };

            match c {
                '\\' => {
                    let Some((_, escaped)) = self.chars.next() else {
                        return Err(self.error(start, LexErrorKind::UnmatchedQuote));
                    };

                    let c = match escaped {
                        'n' => '\n',
                        'f' => '\u{0C}',
                        'r' => '\r',
                        't' => '\t',
                        'v' => '\u{0B}',
                        'u' => self.take_unicode_escape(index)?,
                        // Quotes and unknown escapes are kept as is
                        c => c,
                    };
                    string.push(c);
                }
                c if c == quote => break,
                c => string.push(c),
            }
        }

        Ok(Token::literal(string.clone(), Literal::Str(string), start))
    }

    // The leading `\u` has already been consumed
    fn take_unicode_escape(&mut self, index: usize) -> Result<char> {
        let invalid = |lexer: &Self| lexer.error(index, LexErrorKind::InvalidUnicodeEscape);

        let Some(code) = self.take_hex4() else { return Err(invalid(self)) };

        match code {
            // High surrogate, only valid when followed by an escaped low surrogate
            0xD800..=0xDBFF => {
                let mut chars = self.chars.clone();
                let is_escape = matches!(chars.next(), Some((_, '\\'))) && matches!(chars.next(), Some((_, 'u')));
                if !is_escape {
                    return Err(invalid(self));
                }

                self.chars = chars;
                match self.take_hex4() {
                    Some(low @ 0xDC00..=0xDFFF) => {
                        let c = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                        char::from_u32(c).ok_or_else(|| invalid(self))
                    }
                    _ => Err(invalid(self)),
                }
            }
            code => char::from_u32(code).ok_or_else(|| invalid(self)),
        }
    }

    // Exactly four hex digits, nothing is consumed on failure
    fn take_hex4(&mut self) -> Option<u32> {
        let mut chars = self.chars.clone();
        let mut code = 0;
        for _ in 0..4 {
            let (_, c) = chars.next()?;
            code = code * 16 + c.to_digit(16)?;
        }
        self.chars = chars;
        Some(code)
    }

    fn take_ident(&mut self, start: usize) -> Token {
        let mut end = start + 1;
        while let Some((e, 'a'..='z' | 'A'..='Z' | '_' | '$' | '0'..='9')) = self.chars.peek() {
            end = *e + 1;
            self.chars.next();
        }

        Token::ident(&self.src[start..end], start)
    }
}

fn is_exp_operator(c: Option<char>) -> bool {
    matches!(c, Some('-' | '+' | '0'..='9'))
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::error::Error;

    fn token(input: &str) -> Token {
        Lexer::new(input).next().unwrap().unwrap()
    }

    fn texts(input: &str) -> Vec<String> {
        lex(input).unwrap().into_iter().map(|t| t.text).collect()
    }

    fn error_kind(input: &str) -> LexErrorKind {
        match lex(input).unwrap_err() {
            Error::Lex(err) => err.kind,
            Error::Parse(_) => panic!("invalid error"),
        }
    }

    #[test]
    fn single_char_token() {
        let inputs = ["[", "]", "{", "}", ":", ".", ",", "(", ")"];

        for input in inputs {
            let actual = token(input);
            assert!(actual.is_punctuation());
            assert_eq!(actual.text, input);
        }
    }

    #[test]
    fn ident() {
        let inputs = ["valid", "_valid", "$valid", "$locals", "a1_$b"];

        for input in inputs {
            let actual = token(input);
            assert!(actual.identifier);
            assert_eq!(actual.text, input);
            assert!(actual.value.is_none());
        }
    }

    #[test]
    fn keywords_are_identifiers() {
        for input in ["null", "true", "false", "this"] {
            assert!(token(input).identifier);
        }
    }

    #[test]
    fn numbers() {
        let inputs = [
            ("42", 42.0),
            ("4.2", 4.2),
            (".42", 0.42),
            ("42e3", 42000.0),
            (".42e2", 42.0),
            (".42e+2", 42.0),
            ("4200e-2", 42.0),
            (".42E2", 42.0),
            ("0001", 1.0),
        ];

        for (input, number) in inputs {
            let actual = token(input);
            assert_eq!(actual.text, input);
            assert_eq!(actual.value, Some(Literal::Number(number)));
        }
    }

    #[test]
    fn invalid_exponent() {
        for input in ["42e-", "42e-a", "42e+", "1E-x"] {
            assert_eq!(error_kind(input), LexErrorKind::InvalidExponent);
        }
    }

    #[test]
    fn exponent_marker_without_digits_ends_the_number() {
        assert_eq!(texts("42e"), vec!["42", "e"]);
        assert_eq!(texts("42ex"), vec!["42", "ex"]);
    }

    #[test]
    fn invalid_number() {
        assert_eq!(error_kind("1.2.3"), LexErrorKind::InvalidNumber);
    }

    #[test]
    fn strings() {
        let inputs = [
            ("'single quote string'", "single quote string"),
            ("\"double quote string\"", "double quote string"),
            ("\"double 'single inside'\"", "double 'single inside'"),
            ("'single \"double inside\"'", "single \"double inside\""),
            (r"'a\'b'", "a'b"),
            (r#""a\"b""#, "a\"b"),
            (r"'\n\f\r\t\v'", "\n\u{0C}\r\t\u{0B}"),
            (r"'\q\\'", "q\\"),
            (r#""\u00A0""#, "\u{A0}"),
            (r#""\uD83D\uDE00""#, "\u{1F600}"),
            ("''", ""),
        ];

        for (input, expected) in inputs {
            let actual = token(input);
            assert_eq!(actual.text, expected);
            assert_eq!(actual.value, Some(Literal::from(expected)));
        }
    }

    #[test]
    fn unmatched_quote() {
        let inputs = ["'unterminated string", "\"abc'", "'", "\"", r"'abc\"];

        for input in inputs {
            assert_eq!(error_kind(input), LexErrorKind::UnmatchedQuote);
        }
    }

    #[test]
    fn invalid_unicode_escape() {
        let inputs = [r#""\u00T0""#, r#""\u00""#, r#""\u""#, r#""\uD83D""#, r#""\uDE00""#];

        for input in inputs {
            assert_eq!(error_kind(input), LexErrorKind::InvalidUnicodeEscape);
        }
    }

    #[test]
    fn whitespace_is_skipped() {
        assert_eq!(texts(" \n42 "), vec!["42"]);
        assert_eq!(texts("\t\r\u{0B}\u{A0}a"), vec!["a"]);
        assert!(lex("   ").unwrap().is_empty());
    }

    #[test]
    fn unexpected_char() {
        assert_eq!(error_kind("a + b"), LexErrorKind::UnexpectedChar('+'));
        assert_eq!(error_kind("#"), LexErrorKind::UnexpectedChar('#'));
    }

    #[test]
    fn full_expression() {
        let actual = texts("lock[keys[\"aKey\"]].open(1, n)");
        let expected = [
            "lock", "[", "keys", "[", "aKey", "]", "]", ".", "open", "(", "1", ",", "n", ")",
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn positions() {
        let tokens = lex("ab  [12]").unwrap();
        let positions = tokens.iter().map(Token::pos).collect::<Vec<_>>();
        assert_eq!(positions, vec![0, 4, 5, 7]);
    }

    #[test]
    fn error_location() {
        let Error::Lex(err) = lex("abc\n  #").unwrap_err() else { panic!() };
        assert_eq!((err.line, err.col), (2, 3));
    }

    proptest! {
        #[test]
        fn decimal_round_trip(n in 0f64..1e15) {
            let text = n.to_string();
            prop_assert_eq!(token(&text).value, Some(Literal::Number(n)));
        }

        #[test]
        fn scientific_round_trip(mantissa in 0u32..100_000, exp in -12i32..12) {
            let text = format!("{mantissa}e{exp}");
            let expected = text.parse::<f64>().unwrap();
            prop_assert_eq!(token(&text).value, Some(Literal::Number(expected)));
        }

        #[test]
        fn lexing_never_panics(input in any::<String>()) {
            let _ = lex(&input);
        }
    }
}
