use crate::{EntrySource, SourceError};
use cardwright_types::Entry;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Entries from one JSON document: either `[{...}, ...]` or
/// `{"entries": [{...}, ...]}`.
///
/// The whole document is parsed up front; items are converted lazily.
#[derive(Debug)]
pub struct JsonArraySource {
    items: std::iter::Enumerate<std::vec::IntoIter<Value>>,
    len: usize,
}

impl JsonArraySource {
    pub fn from_value(document: Value) -> Result<Self, SourceError> {
        let items = match document {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("entries") {
                Some(Value::Array(items)) => items,
                _ => return Err(SourceError::UnexpectedShape),
            },
            _ => return Err(SourceError::UnexpectedShape),
        };
        let len = items.len();
        log::debug!("Loaded JSON document with {} entries", len);
        Ok(Self {
            items: items.into_iter().enumerate(),
            len,
        })
    }

    pub fn from_str(text: &str) -> Result<Self, SourceError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        Self::from_value(serde_json::from_reader(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }
}

impl EntrySource for JsonArraySource {
    fn next(&mut self) -> Option<Result<Entry, SourceError>> {
        let (index, value) = self.items.next()?;
        Some(Entry::from_json(value).map_err(|source| SourceError::Entry { index, source }))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len)
    }
}

/// Entries from newline-delimited JSON, read one line at a time.
///
/// Blank lines are skipped. Errors carry the 1-based line number.
pub struct JsonLinesSource {
    lines: std::io::Lines<Box<dyn BufRead + Send>>,
    line: usize,
    index: usize,
}

impl JsonLinesSource {
    pub fn new<R: BufRead + Send + 'static>(reader: R) -> Self {
        let boxed: Box<dyn BufRead + Send> = Box::new(reader);
        Self {
            lines: boxed.lines(),
            line: 0,
            index: 0,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl EntrySource for JsonLinesSource {
    fn next(&mut self) -> Option<Result<Entry, SourceError>> {
        loop {
            let raw = match self.lines.next()? {
                Ok(raw) => raw,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;
            if raw.trim().is_empty() {
                log::trace!("Skipping blank line {}", self.line);
                continue;
            }

            let index = self.index;
            self.index += 1;
            let line = self.line;
            let result = serde_json::from_str::<Value>(&raw)
                .map_err(|source| SourceError::JsonLine { line, source })
                .and_then(|value| {
                    Entry::from_json(value).map_err(|source| SourceError::Entry { index, source })
                });
            return Some(result);
        }
    }
}
