//! Character tokenizer
//!
//! A position-tracking lexer over a borrowed source string. The tokenizer
//! is the shared substrate for line-oriented text protocols: consumers
//! drive it by peeking, consuming, or asserting token shape and exact
//! value, and by scanning raw text up to an end marker.
//!
//! Every token and every error carries a [`Location`] (file, line, column,
//! byte position). Malformed input (lone carriage returns, unterminated
//! strings, malformed integers, unknown lead bytes) is reported as an
//! error variant rather than a panic so that a hostile peer cannot take
//! the process down.

use std::fmt;
use std::mem;

/// Result type for tokenizer operations
pub type Result<'a, T> = std::result::Result<T, Error<'a>>;

/// Longest source snippet attached to an unexpected-character error.
const SNIPPET_LEN: usize = 64;

/// A position in the source being tokenized.
///
/// `line` is 1-based, `column` is 0-based, `position` is the byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub file: &'a str,
    pub line: usize,
    pub column: usize,
    pub position: usize,
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One lexed token. Symbol and string variants borrow from the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    Eof,
    Newline,
    Tab,
    Space,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    LeftAngleBracket,
    RightAngleBracket,
    Caret,
    Colon,
    Comma,
    Dot,
    Underscore,
    Dash,
    Slash,
    /// Line-comment sentinel; the comment text is skipped, not carried.
    Comment,
    UpperSymbol(&'a str),
    LowerSymbol(&'a str),
    String(&'a str),
    SingleQuotedString(&'a str),
    Float(f64),
    Integer(i64),
    /// A byte preceded by `$`.
    Char(u8),
    Boolean(bool),
}

/// A token paired with the location it started at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceToken<'a> {
    pub token: Token<'a>,
    pub location: Location<'a>,
}

/// Tokenizer errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error<'a> {
    #[error("{location}: expected {expected:?}, found {actual:?}")]
    ExpectedToken {
        expected: Token<'a>,
        actual: Token<'a>,
        location: Location<'a>,
    },

    #[error("{location}: expected one of {expected:?}, found {actual:?}")]
    ExpectedOneOf {
        expected: Vec<Token<'a>>,
        actual: Token<'a>,
        location: Location<'a>,
    },

    #[error("{location}: expected {expected:?}, found {actual:?}")]
    ExpectedString {
        expected: &'a str,
        actual: &'a str,
        location: Location<'a>,
    },

    #[error("{location}: none of the end markers {markers:?} occur before end of input")]
    ExpectedEndMarker {
        markers: Vec<&'a str>,
        location: Location<'a>,
    },

    #[error("{location}: carriage return not followed by newline")]
    BareCarriageReturn { location: Location<'a> },

    #[error("{location}: string literal is missing its closing quote")]
    UnterminatedString { location: Location<'a> },

    #[error("{location}: malformed integer {text:?}")]
    MalformedInteger {
        text: &'a str,
        location: Location<'a>,
    },

    #[error("{location}: unexpected character at {snippet:?}")]
    UnexpectedCharacter {
        snippet: &'a str,
        location: Location<'a>,
    },
}

/// Terminator set for symbol runs: whitespace or `()[]{}<>,.:'"`.
fn is_symbol_terminator(b: u8) -> bool {
    matches!(
        b,
        b' ' | b'\t'
            | b'\n'
            | b'\r'
            | b'('
            | b')'
            | b'['
            | b']'
            | b'{'
            | b'}'
            | b'<'
            | b'>'
            | b','
            | b'.'
            | b':'
            | b'\''
            | b'"'
    )
}

/// Position-tracking tokenizer over a borrowed source string.
pub struct Tokenizer<'a> {
    source: &'a str,
    file: &'a str,
    position: usize,
    line: usize,
    column: usize,
    index: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `source` with a placeholder file name.
    pub fn new(source: &'a str) -> Self {
        Self::with_file(source, "<input>")
    }

    /// Create a tokenizer over `source`, attributing locations to `file`.
    pub fn with_file(source: &'a str, file: &'a str) -> Self {
        Tokenizer {
            source,
            file,
            position: 0,
            line: 1,
            column: 0,
            index: 0,
        }
    }

    /// The current location.
    pub fn location(&self) -> Location<'a> {
        Location {
            file: self.file,
            line: self.line,
            column: self.column,
            position: self.position,
        }
    }

    /// Current byte offset into the source.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The unconsumed tail of the source.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }

    /// Look at the next token without consuming it.
    ///
    /// Returns [`Token::Eof`] once the source is exhausted.
    pub fn peek(&self) -> Result<'a, Token<'a>> {
        if self.position >= self.source.len() {
            return Ok(Token::Eof);
        }
        self.lex().map(|(token, _)| token)
    }

    /// Consume and return the next token.
    ///
    /// The middle element is the token index before this call; the last is
    /// `false` iff the tokenizer was already at end of input, in which case
    /// an [`Token::Eof`] token is returned and no state changes.
    pub fn next(&mut self) -> Result<'a, (SourceToken<'a>, usize, bool)> {
        let location = self.location();
        if self.position >= self.source.len() {
            let token = SourceToken {
                token: Token::Eof,
                location,
            };
            return Ok((token, self.index, false));
        }
        let (token, len) = self.lex()?;
        let lexeme = &self.source[self.position..self.position + len];
        self.advance_lexeme(lexeme);
        let index = self.index;
        self.index += 1;
        Ok((SourceToken { token, location }, index, true))
    }

    /// Consume one token and require its variant to match `expected`,
    /// ignoring any carried value.
    ///
    /// On mismatch the token has still been consumed.
    pub fn expect(&mut self, expected: &Token<'a>) -> Result<'a, SourceToken<'a>> {
        let (consumed, _, _) = self.next()?;
        if mem::discriminant(&consumed.token) == mem::discriminant(expected) {
            Ok(consumed)
        } else {
            Err(Error::ExpectedToken {
                expected: *expected,
                actual: consumed.token,
                location: consumed.location,
            })
        }
    }

    /// Consume one token and require both variant and carried value to
    /// match `expected`.
    pub fn expect_exact(&mut self, expected: &Token<'a>) -> Result<'a, SourceToken<'a>> {
        let (consumed, _, _) = self.next()?;
        if consumed.token == *expected {
            Ok(consumed)
        } else {
            Err(Error::ExpectedToken {
                expected: *expected,
                actual: consumed.token,
                location: consumed.location,
            })
        }
    }

    /// Consume one token and require its variant to match any of `options`.
    pub fn expect_one_of(&mut self, options: &[Token<'a>]) -> Result<'a, SourceToken<'a>> {
        let (consumed, _, _) = self.next()?;
        let matched = options
            .iter()
            .any(|option| mem::discriminant(option) == mem::discriminant(&consumed.token));
        if matched {
            Ok(consumed)
        } else {
            Err(Error::ExpectedOneOf {
                expected: options.to_vec(),
                actual: consumed.token,
                location: consumed.location,
            })
        }
    }

    /// Scan forward for the first occurrence of any marker and return the
    /// prefix before it, leaving the position just before the marker.
    ///
    /// Fails if no marker occurs before end of input.
    pub fn read_string_until(&mut self, end_markers: &[&'a str]) -> Result<'a, &'a str> {
        let rest = self.remaining();
        let mut earliest: Option<usize> = None;
        for marker in end_markers {
            if let Some(at) = rest.find(marker) {
                earliest = Some(earliest.map_or(at, |found| found.min(at)));
            }
        }
        let Some(at) = earliest else {
            return Err(Error::ExpectedEndMarker {
                markers: end_markers.to_vec(),
                location: self.location(),
            });
        };
        let prefix = &rest[..at];
        self.advance_span(prefix);
        Ok(prefix)
    }

    /// Advance past `expected` if the source at the current position starts
    /// with it; otherwise report what was found instead.
    pub fn skip_string(&mut self, expected: &'a str) -> Result<'a, ()> {
        let rest = self.remaining();
        if rest.starts_with(expected) {
            self.advance_span(expected);
            Ok(())
        } else {
            let mut len = expected.len().min(rest.len());
            while !rest.is_char_boundary(len) {
                len -= 1;
            }
            Err(Error::ExpectedString {
                expected,
                actual: &rest[..len],
                location: self.location(),
            })
        }
    }

    /// Consume tokens for as long as the peeked token's variant matches any
    /// of `tokens`.
    pub fn skip_any_of(&mut self, tokens: &[Token<'a>]) -> Result<'a, ()> {
        loop {
            let peeked = self.peek()?;
            if peeked == Token::Eof {
                return Ok(());
            }
            let matched = tokens
                .iter()
                .any(|token| mem::discriminant(token) == mem::discriminant(&peeked));
            if !matched {
                return Ok(());
            }
            self.next()?;
        }
    }

    /// Lex one token at the current position. Does not mutate state.
    fn lex(&self) -> Result<'a, (Token<'a>, usize)> {
        let rest = self.remaining();
        let bytes = rest.as_bytes();
        match bytes[0] {
            b'#' => {
                // Comment runs to the newline; a CRLF terminator is left
                // whole so the Newline token can pick it up.
                let len = match bytes.iter().position(|&b| b == b'\n') {
                    Some(at) if at > 0 && bytes[at - 1] == b'\r' => at - 1,
                    Some(at) => at,
                    None => bytes.len(),
                };
                Ok((Token::Comment, len))
            }
            b' ' => Ok((Token::Space, 1)),
            b'\t' => Ok((Token::Tab, 1)),
            b'\n' => Ok((Token::Newline, 1)),
            b'\r' => {
                if bytes.get(1) == Some(&b'\n') {
                    Ok((Token::Newline, 2))
                } else {
                    Err(Error::BareCarriageReturn {
                        location: self.location(),
                    })
                }
            }
            b'(' => Ok((Token::LeftParen, 1)),
            b')' => Ok((Token::RightParen, 1)),
            b'[' => Ok((Token::LeftBracket, 1)),
            b']' => Ok((Token::RightBracket, 1)),
            b'{' => Ok((Token::LeftBrace, 1)),
            b'}' => Ok((Token::RightBrace, 1)),
            b'<' => Ok((Token::LeftAngleBracket, 1)),
            b'>' => Ok((Token::RightAngleBracket, 1)),
            b'^' => Ok((Token::Caret, 1)),
            b':' => Ok((Token::Colon, 1)),
            b',' => Ok((Token::Comma, 1)),
            b'.' => Ok((Token::Dot, 1)),
            b'_' => Ok((Token::Underscore, 1)),
            b'-' => Ok((Token::Dash, 1)),
            b'/' => Ok((Token::Slash, 1)),
            b'$' => match bytes.get(1) {
                Some(&value) => Ok((Token::Char(value), 2)),
                None => Err(Error::UnexpectedCharacter {
                    snippet: self.snippet(),
                    location: self.location(),
                }),
            },
            b'0'..=b'9' => self.lex_number(rest),
            b'"' => self.lex_quoted(rest, '"').map(|(s, len)| (Token::String(s), len)),
            b'\'' => self
                .lex_quoted(rest, '\'')
                .map(|(s, len)| (Token::SingleQuotedString(s), len)),
            _ if rest.starts_with("true") => Ok((Token::Boolean(true), 4)),
            _ if rest.starts_with("false") => Ok((Token::Boolean(false), 5)),
            b'a'..=b'z' => {
                let len = self.symbol_len(bytes);
                Ok((Token::LowerSymbol(&rest[..len]), len))
            }
            b'A'..=b'Z' => {
                let len = self.symbol_len(bytes);
                Ok((Token::UpperSymbol(&rest[..len]), len))
            }
            _ => Err(Error::UnexpectedCharacter {
                snippet: self.snippet(),
                location: self.location(),
            }),
        }
    }

    /// Numbers: a run of digits and dots. A run containing a dot is tried
    /// as a float first; anything else must parse as a decimal integer.
    fn lex_number(&self, rest: &'a str) -> Result<'a, (Token<'a>, usize)> {
        let bytes = rest.as_bytes();
        let mut len = 0;
        while len < bytes.len() && (bytes[len].is_ascii_digit() || bytes[len] == b'.') {
            len += 1;
        }
        let text = &rest[..len];
        if text.contains('.') {
            if let Ok(value) = text.parse::<f64>() {
                return Ok((Token::Float(value), len));
            }
        }
        match text.parse::<i64>() {
            Ok(value) => Ok((Token::Integer(value), len)),
            Err(_) => Err(Error::MalformedInteger {
                text,
                location: self.location(),
            }),
        }
    }

    /// Quoted string: everything up to the next matching quote.
    fn lex_quoted(&self, rest: &'a str, quote: char) -> Result<'a, (&'a str, usize)> {
        match rest[1..].find(quote) {
            Some(at) => Ok((&rest[1..1 + at], at + 2)),
            None => Err(Error::UnterminatedString {
                location: self.location(),
            }),
        }
    }

    fn symbol_len(&self, bytes: &[u8]) -> usize {
        let mut len = 1;
        while len < bytes.len() && !is_symbol_terminator(bytes[len]) {
            len += 1;
        }
        len
    }

    /// Up to 64 bytes of source at the current position, for diagnostics.
    fn snippet(&self) -> &'a str {
        let rest = self.remaining();
        let mut len = rest.len().min(SNIPPET_LEN);
        while !rest.is_char_boundary(len) {
            len -= 1;
        }
        &rest[..len]
    }

    /// Advance over one consumed token lexeme.
    fn advance_lexeme(&mut self, lexeme: &str) {
        self.position += lexeme.len();
        for &b in lexeme.as_bytes() {
            if b == b'\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }

    /// Advance over a raw span consumed by `read_string_until` or
    /// `skip_string`: newlines bump the line and reset the column to 1,
    /// otherwise the column moves by the span length.
    fn advance_span(&mut self, span: &str) {
        self.position += span.len();
        let newlines = span.bytes().filter(|&b| b == b'\n').count();
        if newlines > 0 {
            self.line += newlines;
            self.column = 1;
        } else {
            self.column += span.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tokens(source: &str) -> Vec<Token<'_>> {
        let mut tokenizer = Tokenizer::new(source);
        let mut tokens = Vec::new();
        loop {
            let (st, _, ok) = tokenizer.next().unwrap();
            if !ok {
                break;
            }
            tokens.push(st.token);
        }
        tokens
    }

    #[test]
    fn test_single_character_tokens() {
        assert_eq!(
            all_tokens("()[]{}<>^:,._-/"),
            vec![
                Token::LeftParen,
                Token::RightParen,
                Token::LeftBracket,
                Token::RightBracket,
                Token::LeftBrace,
                Token::RightBrace,
                Token::LeftAngleBracket,
                Token::RightAngleBracket,
                Token::Caret,
                Token::Colon,
                Token::Comma,
                Token::Dot,
                Token::Underscore,
                Token::Dash,
                Token::Slash,
            ]
        );
    }

    #[test]
    fn test_whitespace_and_newlines() {
        assert_eq!(
            all_tokens(" \t\n"),
            vec![Token::Space, Token::Tab, Token::Newline]
        );
        // CRLF collapses to a single Newline token
        assert_eq!(all_tokens("\r\n"), vec![Token::Newline]);
    }

    #[test]
    fn test_bare_carriage_return_is_an_error() {
        let mut tokenizer = Tokenizer::new("\rx");
        assert!(matches!(
            tokenizer.next(),
            Err(Error::BareCarriageReturn { .. })
        ));
    }

    #[test]
    fn test_comment_runs_to_newline() {
        assert_eq!(
            all_tokens("# a comment\nok"),
            vec![Token::Comment, Token::Newline, Token::LowerSymbol("ok")]
        );
        // CRLF after a comment still lexes as one Newline
        assert_eq!(all_tokens("# c\r\n"), vec![Token::Comment, Token::Newline]);
        assert_eq!(all_tokens("# trailing"), vec![Token::Comment]);
    }

    #[test]
    fn test_char_token() {
        assert_eq!(all_tokens("$A$b"), vec![Token::Char(b'A'), Token::Char(b'b')]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(all_tokens("42"), vec![Token::Integer(42)]);
        assert_eq!(all_tokens("3.25"), vec![Token::Float(3.25)]);
        let mut tokenizer = Tokenizer::new("1.2.3");
        assert!(matches!(
            tokenizer.next(),
            Err(Error::MalformedInteger { text: "1.2.3", .. })
        ));
        // Overflow also reports a malformed integer
        let mut tokenizer = Tokenizer::new("99999999999999999999");
        assert!(matches!(
            tokenizer.next(),
            Err(Error::MalformedInteger { .. })
        ));
    }

    #[test]
    fn test_strings() {
        assert_eq!(all_tokens("\"hi\""), vec![Token::String("hi")]);
        assert_eq!(
            all_tokens("'single'"),
            vec![Token::SingleQuotedString("single")]
        );
        let mut tokenizer = Tokenizer::new("\"open");
        assert!(matches!(
            tokenizer.next(),
            Err(Error::UnterminatedString { .. })
        ));
    }

    #[test]
    fn test_booleans() {
        assert_eq!(
            all_tokens("true false"),
            vec![Token::Boolean(true), Token::Space, Token::Boolean(false)]
        );
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            all_tokens("GET path"),
            vec![
                Token::UpperSymbol("GET"),
                Token::Space,
                Token::LowerSymbol("path"),
            ]
        );
        // Dashes and underscores are part of a symbol run
        assert_eq!(
            all_tokens("content-type:"),
            vec![Token::LowerSymbol("content-type"), Token::Colon]
        );
    }

    #[test]
    fn test_unexpected_character_snippet() {
        let source = "@".repeat(100);
        let mut tokenizer = Tokenizer::new(&source);
        match tokenizer.next() {
            Err(Error::UnexpectedCharacter { snippet, .. }) => {
                assert_eq!(snippet.len(), 64);
            }
            other => panic!("expected UnexpectedCharacter, got {:?}", other),
        }
    }

    #[test]
    fn test_next_returns_eof_after_exhaustion() {
        let mut tokenizer = Tokenizer::new(":");
        let (_, index, ok) = tokenizer.next().unwrap();
        assert_eq!(index, 0);
        assert!(ok);
        let (st, index, ok) = tokenizer.next().unwrap();
        assert_eq!(st.token, Token::Eof);
        assert_eq!(index, 1);
        assert!(!ok);
        // EOF is sticky
        let (st, _, ok) = tokenizer.next().unwrap();
        assert_eq!(st.token, Token::Eof);
        assert!(!ok);
    }

    #[test]
    fn test_peek_is_non_destructive() {
        let tokenizer = Tokenizer::new("abc");
        assert_eq!(tokenizer.peek().unwrap(), Token::LowerSymbol("abc"));
        assert_eq!(tokenizer.peek().unwrap(), Token::LowerSymbol("abc"));
        assert_eq!(Tokenizer::new("").peek().unwrap(), Token::Eof);
    }

    #[test]
    fn test_expect_consumes_on_mismatch() {
        let mut tokenizer = Tokenizer::new(": rest");
        let err = tokenizer.expect(&Token::Comma).unwrap_err();
        assert!(matches!(
            err,
            Error::ExpectedToken {
                expected: Token::Comma,
                actual: Token::Colon,
                ..
            }
        ));
        // The colon was consumed either way; the next token is the space.
        assert_eq!(tokenizer.peek().unwrap(), Token::Space);
    }

    #[test]
    fn test_expect_matches_variant_only() {
        let mut tokenizer = Tokenizer::new("POST");
        let st = tokenizer.expect(&Token::UpperSymbol("GET")).unwrap();
        assert_eq!(st.token, Token::UpperSymbol("POST"));
    }

    #[test]
    fn test_expect_exact_compares_value() {
        let mut tokenizer = Tokenizer::new("POST");
        let err = tokenizer.expect_exact(&Token::UpperSymbol("GET")).unwrap_err();
        assert!(matches!(
            err,
            Error::ExpectedToken {
                expected: Token::UpperSymbol("GET"),
                actual: Token::UpperSymbol("POST"),
                ..
            }
        ));

        let mut tokenizer = Tokenizer::new("GET");
        assert!(tokenizer.expect_exact(&Token::UpperSymbol("GET")).is_ok());
    }

    #[test]
    fn test_expect_one_of() {
        let mut tokenizer = Tokenizer::new("\tx");
        let st = tokenizer
            .expect_one_of(&[Token::Space, Token::Tab])
            .unwrap();
        assert_eq!(st.token, Token::Tab);

        let mut tokenizer = Tokenizer::new(":");
        assert!(matches!(
            tokenizer.expect_one_of(&[Token::Space, Token::Tab]),
            Err(Error::ExpectedOneOf { .. })
        ));
    }

    #[test]
    fn test_read_string_until() {
        let mut tokenizer = Tokenizer::new("Content-Type: text/html\r\n");
        let name = tokenizer.read_string_until(&[":"]).unwrap();
        assert_eq!(name, "Content-Type");
        tokenizer.skip_string(":").unwrap();
        tokenizer.skip_string(" ").unwrap();
        let value = tokenizer.read_string_until(&["\r\n"]).unwrap();
        assert_eq!(value, "text/html");
    }

    #[test]
    fn test_read_string_until_picks_first_marker() {
        let mut tokenizer = Tokenizer::new("a:b c");
        let prefix = tokenizer.read_string_until(&[" ", ":"]).unwrap();
        assert_eq!(prefix, "a");
    }

    #[test]
    fn test_read_string_until_missing_marker() {
        let mut tokenizer = Tokenizer::new("no terminator here");
        assert!(matches!(
            tokenizer.read_string_until(&["\r\n"]),
            Err(Error::ExpectedEndMarker { .. })
        ));
    }

    #[test]
    fn test_read_then_skip_advances_exactly() {
        let mut tokenizer = Tokenizer::new("value\r\nnext");
        let before = tokenizer.position();
        let prefix = tokenizer.read_string_until(&["\r\n"]).unwrap();
        tokenizer.skip_string("\r\n").unwrap();
        assert_eq!(tokenizer.position() - before, prefix.len() + "\r\n".len());
        assert_eq!(tokenizer.remaining(), "next");
    }

    #[test]
    fn test_skip_string_mismatch_reports_actual() {
        let mut tokenizer = Tokenizer::new("abcdef");
        let err = tokenizer.skip_string("xyz").unwrap_err();
        assert!(matches!(
            err,
            Error::ExpectedString {
                expected: "xyz",
                actual: "abc",
                ..
            }
        ));
        // Mismatch leaves the position untouched
        assert_eq!(tokenizer.position(), 0);
    }

    #[test]
    fn test_skip_any_of() {
        let mut tokenizer = Tokenizer::new("  \t value");
        tokenizer.skip_any_of(&[Token::Space, Token::Tab]).unwrap();
        assert_eq!(tokenizer.peek().unwrap(), Token::LowerSymbol("value"));
        // Terminates cleanly at end of input
        let mut tokenizer = Tokenizer::new("  ");
        tokenizer.skip_any_of(&[Token::Space, Token::Tab]).unwrap();
        assert_eq!(tokenizer.peek().unwrap(), Token::Eof);
    }

    #[test]
    fn test_location_tracking() {
        let mut tokenizer = Tokenizer::with_file("ab\ncd", "test.txt");
        let (st, _, _) = tokenizer.next().unwrap();
        assert_eq!(st.location.line, 1);
        assert_eq!(st.location.column, 0);
        assert_eq!(st.location.position, 0);
        tokenizer.next().unwrap(); // newline
        let (st, _, _) = tokenizer.next().unwrap();
        assert_eq!(st.token, Token::LowerSymbol("cd"));
        assert_eq!(st.location.line, 2);
        assert_eq!(st.location.column, 0);
        assert_eq!(st.location.position, 3);
        assert_eq!(st.location.file, "test.txt");
    }

    #[test]
    fn test_token_locations_slice_their_lexemes() {
        let source = "GET /index.html HTTP/1.1";
        let mut tokenizer = Tokenizer::new(source);
        let mut last_position = 0;
        loop {
            let before = tokenizer.position();
            let (st, _, ok) = tokenizer.next().unwrap();
            if !ok {
                break;
            }
            let consumed = tokenizer.position() - before;
            let lexeme = &source[st.location.position..st.location.position + consumed];
            match st.token {
                Token::UpperSymbol(s) | Token::LowerSymbol(s) => assert_eq!(s, lexeme),
                Token::Space => assert_eq!(lexeme, " "),
                _ => {}
            }
            assert!(st.location.position >= last_position);
            last_position = st.location.position;
        }
    }

    #[test]
    fn test_token_index_is_monotone() {
        let mut tokenizer = Tokenizer::new("a b c");
        for expected in 0..5 {
            let (_, index, ok) = tokenizer.next().unwrap();
            assert!(ok);
            assert_eq!(index, expected);
        }
    }
}
