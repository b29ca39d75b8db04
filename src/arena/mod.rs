#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Append-only string storage.
///
/// Every allocation copies its bytes to the end of one buffer and hands back
/// a [`Span`]. Spans stay valid until [`Arena::clear`] or drop; there is no
/// per-string release.
#[derive(Debug, Default)]
pub struct Arena {
    buf: String,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: String::with_capacity(bytes),
        }
    }

    pub fn alloc(&mut self, value: &str) -> Span {
        let start = self.buf.len();
        self.buf.push_str(value);
        Span {
            start,
            end: self.buf.len(),
        }
    }

    pub fn get(&self, span: Span) -> Option<&str> {
        self.buf.get(span.start..span.end)
    }

    /// Bytes held by the arena.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}
