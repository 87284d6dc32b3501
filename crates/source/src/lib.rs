//! Entry sources for the card pipeline.
//!
//! An [`EntrySource`] yields one [`Entry`] per card. Malformed records are
//! reported per item so one bad row does not stop the rest of the batch.
//!
//! ## Available Sources
//!
//! - `VecEntrySource`: entries already in memory
//! - `IteratorEntrySource`: wraps any iterator of entries
//! - `JsonArraySource`: a JSON document holding an array of objects
//! - `JsonLinesSource`: one JSON object per line

mod error;
mod json;

pub use error::SourceError;
pub use json::{JsonArraySource, JsonLinesSource};

use cardwright_types::Entry;

pub trait EntrySource: Send {
    /// The next entry, `None` once the source is exhausted.
    fn next(&mut self) -> Option<Result<Entry, SourceError>>;

    /// Total number of items, if known up front.
    fn size_hint(&self) -> Option<usize> {
        None
    }

    /// Drains the source, stopping at the first error.
    fn collect_entries(&mut self) -> Result<Vec<Entry>, SourceError> {
        let mut entries = Vec::with_capacity(self.size_hint().unwrap_or(0));
        while let Some(item) = self.next() {
            entries.push(item?);
        }
        Ok(entries)
    }
}

impl EntrySource for Box<dyn EntrySource> {
    fn next(&mut self) -> Option<Result<Entry, SourceError>> {
        (**self).next()
    }

    fn size_hint(&self) -> Option<usize> {
        (**self).size_hint()
    }
}

/// Entries held in a vector.
#[derive(Debug, Default)]
pub struct VecEntrySource {
    entries: std::vec::IntoIter<Entry>,
    len: usize,
}

impl VecEntrySource {
    pub fn new(entries: Vec<Entry>) -> Self {
        let len = entries.len();
        Self {
            entries: entries.into_iter(),
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn remaining(&self) -> usize {
        self.entries.len()
    }
}

impl EntrySource for VecEntrySource {
    fn next(&mut self) -> Option<Result<Entry, SourceError>> {
        self.entries.next().map(Ok)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len)
    }
}

/// Wraps any iterator of entries.
pub struct IteratorEntrySource<I>
where
    I: Iterator<Item = Entry> + Send,
{
    inner: I,
    size_hint: Option<usize>,
}

impl<I> IteratorEntrySource<I>
where
    I: Iterator<Item = Entry> + Send,
{
    pub fn new(inner: I) -> Self {
        let (lower, upper) = inner.size_hint();
        let size_hint = (upper == Some(lower)).then_some(lower);
        Self { inner, size_hint }
    }
}

impl<I> EntrySource for IteratorEntrySource<I>
where
    I: Iterator<Item = Entry> + Send,
{
    fn next(&mut self) -> Option<Result<Entry, SourceError>> {
        self.inner.next().map(Ok)
    }

    fn size_hint(&self) -> Option<usize> {
        self.size_hint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> Entry {
        [("name", name)].into_iter().collect()
    }

    #[test]
    fn test_vec_entry_source() {
        let mut source = VecEntrySource::new(vec![entry("Imp"), entry("Ogre")]);
        assert_eq!(source.len(), 2);
        assert_eq!(source.size_hint(), Some(2));

        assert_eq!(source.next().unwrap().unwrap().get("name"), Some("Imp"));
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.next().unwrap().unwrap().get("name"), Some("Ogre"));
        assert!(source.next().is_none());
    }

    #[test]
    fn test_iterator_source_size_hint() {
        let source = IteratorEntrySource::new(vec![entry("a"), entry("b")].into_iter());
        assert_eq!(source.size_hint(), Some(2));

        let filtered = IteratorEntrySource::new(
            vec![entry("a"), entry("b")].into_iter().filter(|e| e.get("name") == Some("a")),
        );
        assert_eq!(filtered.size_hint(), None);
    }

    #[test]
    fn test_collect_entries_through_box() {
        let mut boxed: Box<dyn EntrySource> = Box::new(VecEntrySource::new(vec![entry("x")]));
        let entries = boxed.collect_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(VecEntrySource::default().is_empty());
    }
}
