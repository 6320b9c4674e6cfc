//! HTTP message parsing
//!
//! Request lines, status lines, and header blocks are consumed through
//! the [`Tokenizer`](crate::lexer::Tokenizer): start-line words are
//! expected as tokens, while names, values, and protocols are scanned
//! with end markers so arbitrary header bytes never reach the lexer's
//! fatal paths.
//!
//! The parsers are pure: no I/O, no logging, typed errors with source
//! locations where the tokenizer provides them.

use super::{Headers, Method, ParseError, ParseResult, Request, Response, MAX_HEADERS_LENGTH};
use crate::lexer::{Token, Tokenizer};
use std::borrow::Cow;

/// The UTF-8 prefix of `data`. The start line and header block must be
/// text; anything after the first invalid byte can only be body bytes,
/// which the parsers slice from the raw input instead.
fn text_prefix(data: &[u8]) -> &str {
    match std::str::from_utf8(data) {
        Ok(source) => source,
        Err(split) => std::str::from_utf8(&data[..split.valid_up_to()]).unwrap_or(""),
    }
}

/// Skip a run of spaces and tabs without tokenizing what follows.
fn skip_ows<'a>(tokenizer: &mut Tokenizer<'a>) -> ParseResult<'a, ()> {
    loop {
        if tokenizer.remaining().starts_with(' ') {
            tokenizer.skip_string(" ")?;
        } else if tokenizer.remaining().starts_with('\t') {
            tokenizer.skip_string("\t")?;
        } else {
            return Ok(());
        }
    }
}

/// Parse an HTTP request: `GET <path> <protocol>\r\n` followed by a
/// header block.
///
/// Only `GET` is accepted; any other method word is reported as an
/// `ExpectedToken` against `UpperSymbol("GET")`.
pub fn parse_request(data: &[u8]) -> ParseResult<'_, Request<'_>> {
    let source = text_prefix(data);
    let mut tokenizer = Tokenizer::with_file(source, "request");

    tokenizer.expect_exact(&Token::UpperSymbol("GET"))?;
    tokenizer.expect(&Token::Space)?;

    let path = tokenizer.read_string_until(&[" "])?;
    if path.is_empty() || !path.starts_with('/') {
        return Err(ParseError::InvalidPath { path });
    }
    tokenizer.skip_string(" ")?;

    let protocol = tokenizer.read_string_until(&["\r\n"])?;
    if !protocol.starts_with("HTTP/") {
        return Err(ParseError::InvalidProtocol { protocol });
    }
    tokenizer.skip_string("\r\n")?;

    let (headers, _) = parse_headers(&data[tokenizer.position()..])?;

    Ok(Request {
        method: Method::Get,
        path,
        protocol,
        headers,
    })
}

/// Parse an HTTP response: `<protocol> <status> <message>\r\n`, a header
/// block, and whatever follows as the body.
pub fn parse_response(data: &[u8]) -> ParseResult<'_, Response<'_>> {
    let source = text_prefix(data);
    let mut tokenizer = Tokenizer::with_file(source, "response");

    let protocol = tokenizer.read_string_until(&[" "])?;
    if !protocol.starts_with("HTTP/") {
        return Err(ParseError::InvalidProtocol { protocol });
    }
    tokenizer.skip_string(" ")?;

    let status_text = tokenizer.read_string_until(&[" "])?;
    let status = match status_text.parse::<u16>() {
        Ok(status) if (100..=599).contains(&status) => status,
        _ => return Err(ParseError::InvalidStatus { status: status_text }),
    };
    tokenizer.skip_string(" ")?;

    let message = tokenizer.read_string_until(&["\r\n"])?;
    tokenizer.skip_string("\r\n")?;

    let header_start = tokenizer.position();
    let (headers, consumed) = parse_headers(&data[header_start..])?;
    let body = &data[header_start + consumed..];

    Ok(Response {
        protocol,
        status,
        message,
        headers,
        body,
    })
}

/// Parse a header block terminated by a bare CRLF. Returns the headers
/// and the number of bytes consumed, including the terminator.
///
/// Names are read up to the colon, an optional whitespace run after the
/// colon is skipped, and values run to CRLF. A following line that starts
/// with space or tab is an obsolete fold: its leading whitespace collapses
/// to a single `\n` joined onto the value. Duplicate names: last wins.
pub fn parse_headers(data: &[u8]) -> ParseResult<'_, (Headers<'_>, usize)> {
    if data.len() > MAX_HEADERS_LENGTH {
        return Err(ParseError::HeadersTooLong { length: data.len() });
    }

    let source = text_prefix(data);
    let mut tokenizer = Tokenizer::with_file(source, "headers");
    let mut headers = Headers::new();

    loop {
        if tokenizer.remaining().is_empty() {
            return Err(ParseError::ExpectedHeaderEndMarker { data: source });
        }
        if tokenizer.remaining().starts_with("\r\n") {
            tokenizer.skip_string("\r\n")?;
            return Ok((headers, tokenizer.position()));
        }

        let line = tokenizer.remaining();
        let name = tokenizer
            .read_string_until(&[":"])
            .map_err(|_| ParseError::ExpectedHeaderNameEnd { data: line })?;
        tokenizer.skip_string(":")?;
        skip_ows(&mut tokenizer)?;

        let rest = tokenizer.remaining();
        let mut value: Cow<'_, str> = Cow::Borrowed(
            tokenizer
                .read_string_until(&["\r\n"])
                .map_err(|_| ParseError::ExpectedHeaderValueEnd { name, data: rest })?,
        );
        tokenizer.skip_string("\r\n")?;

        // Obsolete line folding: leading whitespace continues the value.
        while tokenizer.remaining().starts_with(' ') || tokenizer.remaining().starts_with('\t') {
            skip_ows(&mut tokenizer)?;
            let rest = tokenizer.remaining();
            let continuation = tokenizer
                .read_string_until(&["\r\n"])
                .map_err(|_| ParseError::ExpectedHeaderValueEnd { name, data: rest })?;
            tokenizer.skip_string("\r\n")?;
            let joined = value.to_mut();
            joined.push('\n');
            joined.push_str(continuation);
        }

        headers.insert(name, value);
    }
}
