//! Streaming scan over a JSON array file
//!
//! Reads one element at a time so a large single-file collection is never
//! materialized in memory, and a lookup can stop at the first match
//! without reading the rest of the file. Delimiters are consumed directly
//! from the buffered reader; each element body is handed to serde_json,
//! which stops exactly at the element's closing brace.

use std::io::BufRead;

use serde::de::DeserializeOwned;

use super::errors::{StoreError, StoreResult};

/// Outcome of reading the array header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArrayStart {
    /// The stream ended before any token: an absent-or-empty collection
    Empty,
    /// The opening `[` was consumed; elements may follow
    Array,
}

enum ScanState {
    Start,
    FirstElement,
    NextElement,
    Done,
}

/// Incremental reader over one collection's array file
pub(crate) struct ArrayScanner<R> {
    reader: R,
    collection: String,
    state: ScanState,
}

impl<R: BufRead> ArrayScanner<R> {
    pub fn new(reader: R, collection: &str) -> Self {
        Self {
            reader,
            collection: collection.to_string(),
            state: ScanState::Start,
        }
    }

    /// Consumes the array-open delimiter.
    ///
    /// An empty stream (EOF before any token) is not a format error; it is
    /// reported as [`ArrayStart::Empty`] so callers can treat it as an
    /// absent collection. Any first token other than `[` is malformed.
    pub fn begin(&mut self) -> StoreResult<ArrayStart> {
        match self.peek_token()? {
            None => {
                self.state = ScanState::Done;
                Ok(ArrayStart::Empty)
            }
            Some(b'[') => {
                self.reader.consume(1);
                self.state = ScanState::FirstElement;
                Ok(ArrayStart::Array)
            }
            Some(_) => Err(StoreError::ExpectedArray(self.collection.clone())),
        }
    }

    /// Decodes the next array element, or `None` when the array ends.
    pub fn next_element<D: DeserializeOwned>(&mut self) -> StoreResult<Option<D>> {
        let expect_comma = match self.state {
            ScanState::Start | ScanState::Done => return Ok(None),
            ScanState::FirstElement => false,
            ScanState::NextElement => true,
        };

        let token = match self.peek_token()? {
            Some(token) => token,
            None => {
                return Err(StoreError::Malformed(format!(
                    "unterminated array in single-file collection {}",
                    self.collection
                )))
            }
        };

        if token == b']' {
            self.reader.consume(1);
            self.state = ScanState::Done;
            return Ok(None);
        }

        if expect_comma {
            if token != b',' {
                return Err(StoreError::Malformed(format!(
                    "expected ',' or ']' in single-file collection {}, found '{}'",
                    self.collection, token as char
                )));
            }
            self.reader.consume(1);
        }

        let mut de = serde_json::Deserializer::from_reader(&mut self.reader);
        let element = D::deserialize(&mut de).map_err(|e| {
            StoreError::Malformed(format!(
                "bad entry in single-file collection {}: {}",
                self.collection, e
            ))
        })?;
        self.state = ScanState::NextElement;
        Ok(Some(element))
    }

    /// Skips JSON whitespace and peeks the next byte without consuming it.
    fn peek_token(&mut self) -> StoreResult<Option<u8>> {
        loop {
            let buf = self
                .reader
                .fill_buf()
                .map_err(|e| StoreError::Io(e.to_string()))?;
            if buf.is_empty() {
                return Ok(None);
            }
            match buf
                .iter()
                .position(|&b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
            {
                Some(i) => {
                    let token = buf[i];
                    self.reader.consume(i);
                    return Ok(Some(token));
                }
                None => {
                    let len = buf.len();
                    self.reader.consume(len);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::io::Cursor;

    fn scanner(input: &str) -> ArrayScanner<Cursor<Vec<u8>>> {
        ArrayScanner::new(Cursor::new(input.as_bytes().to_vec()), "users")
    }

    #[test]
    fn test_empty_stream_is_not_an_error() {
        let mut scan = scanner("");
        assert_eq!(scan.begin().unwrap(), ArrayStart::Empty);
        assert!(scan.next_element::<Value>().unwrap().is_none());
    }

    #[test]
    fn test_whitespace_only_stream_is_empty() {
        let mut scan = scanner("  \n\t ");
        assert_eq!(scan.begin().unwrap(), ArrayStart::Empty);
    }

    #[test]
    fn test_empty_array() {
        let mut scan = scanner("[]");
        assert_eq!(scan.begin().unwrap(), ArrayStart::Array);
        assert!(scan.next_element::<Value>().unwrap().is_none());
    }

    #[test]
    fn test_object_header_is_malformed() {
        let mut scan = scanner(r#"{"id": "1"}"#);
        let err = scan.begin().unwrap_err();
        assert_eq!(err, StoreError::ExpectedArray("users".into()));
    }

    #[test]
    fn test_elements_decoded_one_at_a_time() {
        let mut scan = scanner(r#"[{"a": 1}, {"a": 2}]"#);
        assert_eq!(scan.begin().unwrap(), ArrayStart::Array);

        let first: Value = scan.next_element().unwrap().unwrap();
        assert_eq!(first["a"], 1);
        let second: Value = scan.next_element().unwrap().unwrap();
        assert_eq!(second["a"], 2);
        assert!(scan.next_element::<Value>().unwrap().is_none());
    }

    #[test]
    fn test_early_exit_never_reads_past_a_match() {
        // The second element is not valid JSON; stopping after the first
        // element must not touch it.
        let mut scan = scanner(r#"[{"a": 1}, not-json"#);
        scan.begin().unwrap();
        let first: Value = scan.next_element().unwrap().unwrap();
        assert_eq!(first["a"], 1);
    }

    #[test]
    fn test_missing_separator_is_malformed() {
        let mut scan = scanner(r#"[{"a": 1} {"a": 2}]"#);
        scan.begin().unwrap();
        scan.next_element::<Value>().unwrap();
        let err = scan.next_element::<Value>().unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }

    #[test]
    fn test_unterminated_array_is_malformed() {
        let mut scan = scanner(r#"[{"a": 1}"#);
        scan.begin().unwrap();
        scan.next_element::<Value>().unwrap();
        let err = scan.next_element::<Value>().unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }

    #[test]
    fn test_trailing_comma_is_malformed() {
        let mut scan = scanner(r#"[{"a": 1},]"#);
        scan.begin().unwrap();
        scan.next_element::<Value>().unwrap();
        let err = scan.next_element::<Value>().unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }
}
