use crate::arena::{Arena, Span};
use crate::{Error, Result};

// Upper bound on the up-front reservation; capacity itself is only a limit.
const PREALLOC_LIMIT: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Entry {
    pub key: Span,
    pub value: Span,
}

/// Ordered, capacity-bounded list of parsed entries.
///
/// Entries hold spans into an [`Arena`]; every accessor that yields text takes
/// the arena the file was parsed with.
///
/// # Examples
/// ```
/// use flatini::{Arena, File};
///
/// let mut arena = Arena::new();
/// let mut file = File::new(8);
/// flatini::parse(&mut arena, &mut file, "HOST=127.0.0.1\nPORT=8080\n").unwrap();
/// assert_eq!(file.find_by_key(&arena, "PORT"), Some("8080"));
/// assert_eq!(file.find_by_key(&arena, "POR"), None);
/// ```
#[derive(Debug, Clone)]
pub struct File {
    entries: Vec<Entry>,
    capacity: usize,
}

impl File {
    pub fn new(capacity: usize) -> Self {
        Self::with_storage(capacity, Vec::with_capacity(capacity.min(PREALLOC_LIMIT)))
    }

    /// Binds a file to caller-provided storage. Existing contents of
    /// `storage` are discarded; its allocation is reused.
    pub fn with_storage(capacity: usize, mut storage: Vec<Entry>) -> Self {
        storage.clear();
        Self {
            entries: storage,
            capacity,
        }
    }

    pub fn into_storage(self) -> Vec<Entry> {
        self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn push(&mut self, entry: Entry) -> Result<()> {
        if self.is_full() {
            return Err(Error::capacity_exceeded(self.capacity));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get<'a>(&self, arena: &'a Arena, index: usize) -> Option<(&'a str, &'a str)> {
        let entry = self.entries.get(index)?;
        Some((arena.get(entry.key)?, arena.get(entry.value)?))
    }

    /// Value of the first entry whose key equals `key` exactly.
    pub fn find_by_key<'a>(&self, arena: &'a Arena, key: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|entry| arena.get(entry.key) == Some(key))
            .and_then(|entry| arena.get(entry.value))
    }

    pub fn iter<'f, 'a>(&'f self, arena: &'a Arena) -> Iter<'f, 'a> {
        Iter {
            entries: self.entries.iter(),
            arena,
        }
    }
}

pub struct Iter<'f, 'a> {
    entries: std::slice::Iter<'f, Entry>,
    arena: &'a Arena,
}

impl<'a> Iterator for Iter<'_, 'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        let key = self.arena.get(entry.key).unwrap_or_default();
        let value = self.arena.get(entry.value).unwrap_or_default();
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_, '_> {}
