//! HTTP header map
//!
//! Headers are stored in insertion order with names preserved exactly as
//! received. Lookups are case-sensitive; callers that need RFC 7230
//! case-insensitive semantics normalize before asking. Inserting a name
//! that is already present replaces its value (last wins).
//!
//! Values borrow from the parsed input until header folding forces a copy;
//! built messages may insert owned strings.

use super::CRLF;
use bytes::{BufMut, Bytes, BytesMut};
use std::borrow::Cow;
use std::fmt;

/// HTTP headers collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headers<'a> {
    entries: Vec<(Cow<'a, str>, Cow<'a, str>)>,
}

impl<'a> Headers<'a> {
    /// Create an empty headers collection
    pub fn new() -> Self {
        Headers {
            entries: Vec::new(),
        }
    }

    /// Insert a header. A header with the same name (exact case) is
    /// replaced in place; otherwise the entry is appended.
    pub fn insert(&mut self, name: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get the value for a header (exact case).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_ref())
    }

    /// Check whether a header exists (exact case).
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Remove a header (exact case). Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(n, _)| n != name);
        self.entries.len() != before
    }

    /// Number of headers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over headers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_ref(), v.as_ref()))
    }

    /// Serialize the header block, including the terminating blank line.
    pub fn to_wire(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.write_wire(&mut buf);
        buf.freeze()
    }

    /// Append `name: value\r\n` for every header, then the blank line.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        for (name, value) in self.iter() {
            buf.put_slice(name.as_bytes());
            buf.put_slice(b": ");
            buf.put_slice(value.as_bytes());
            buf.put_slice(CRLF.as_bytes());
        }
        buf.put_slice(CRLF.as_bytes());
    }
}

impl fmt::Display for Headers<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}

impl<'a> FromIterator<(Cow<'a, str>, Cow<'a, str>)> for Headers<'a> {
    fn from_iter<T: IntoIterator<Item = (Cow<'a, str>, Cow<'a, str>)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "text/html");
        headers.insert("Content-Length", "42");

        assert_eq!(headers.get("Content-Type"), Some("text/html"));
        assert_eq!(headers.get("Content-Length"), Some("42"));
        assert_eq!(headers.get("Missing"), None);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "text/html");

        assert_eq!(headers.get("Content-Type"), Some("text/html"));
        assert_eq!(headers.get("content-type"), None);
        assert_eq!(headers.get("CONTENT-TYPE"), None);
    }

    #[test]
    fn test_last_insert_wins() {
        let mut headers = Headers::new();
        headers.insert("X-Custom", "first");
        headers.insert("X-Custom", "second");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-Custom"), Some("second"));
    }

    #[test]
    fn test_remove() {
        let mut headers = Headers::new();
        headers.insert("X-Remove", "value");
        headers.insert("X-Keep", "value");

        assert!(headers.remove("X-Remove"));
        assert!(!headers.remove("X-Remove"));
        assert_eq!(headers.get("X-Remove"), None);
        assert_eq!(headers.get("X-Keep"), Some("value"));
    }

    #[test]
    fn test_iter_preserves_insertion_order() {
        let mut headers = Headers::new();
        headers.insert("A", "1");
        headers.insert("B", "2");
        headers.insert("C", "3");

        let collected: Vec<_> = headers.iter().collect();
        assert_eq!(collected, vec![("A", "1"), ("B", "2"), ("C", "3")]);
    }

    #[test]
    fn test_to_wire() {
        let mut headers = Headers::new();
        headers.insert("Host", "example.com");
        headers.insert("Connection", "close");

        let wire = headers.to_wire();
        assert_eq!(&wire[..], b"Host: example.com\r\nConnection: close\r\n\r\n".as_slice());
    }

    #[test]
    fn test_empty_to_wire_is_blank_line() {
        assert_eq!(&Headers::new().to_wire()[..], b"\r\n".as_slice());
    }
}
