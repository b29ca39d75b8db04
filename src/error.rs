use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LineEnding,
    CapacityExceeded,
    TruncatedEntry,
    UnterminatedQuote,
    MissingKey,
    InvalidUtf8,
    Io,
    Deserialize,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::LineEnding => "line ending",
            ErrorKind::CapacityExceeded => "capacity exceeded",
            ErrorKind::TruncatedEntry => "truncated entry",
            ErrorKind::UnterminatedQuote => "unterminated quote",
            ErrorKind::MissingKey => "missing key",
            ErrorKind::InvalidUtf8 => "invalid utf-8",
            ErrorKind::Io => "io",
            ErrorKind::Deserialize => "deserialize",
        };
        f.write_str(name)
    }
}

/// Position of an error in the input. `line` and `column` are 1-based,
/// `column` counts bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn from_offset(input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let prefix = &input[..offset];
        let line = memchr::memchr_iter(b'\n', prefix).count() + 1;
        let line_start = memchr::memrchr(b'\n', prefix).map_or(0, |idx| idx + 1);
        Self {
            offset,
            line,
            column: offset - line_start + 1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}{}", DisplayLocation(.location))]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Option<Location>,
}

struct DisplayLocation<'a>(&'a Option<Location>);

impl fmt::Display for DisplayLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(location) => write!(f, " at {location}"),
            None => Ok(()),
        }
    }
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: None,
        }
    }

    pub fn line_ending(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LineEnding, message)
    }

    pub fn capacity_exceeded(capacity: usize) -> Self {
        Self::new(
            ErrorKind::CapacityExceeded,
            format!("entry capacity of {capacity} exceeded"),
        )
    }

    pub fn truncated_entry(key: &str) -> Self {
        Self::new(
            ErrorKind::TruncatedEntry,
            format!("key \"{key}\" has no value"),
        )
    }

    pub fn unterminated_quote(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnterminatedQuote, message)
    }

    pub fn missing_key(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingKey, message)
    }

    pub fn invalid_utf8(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidUtf8, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn deserialize(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Deserialize, message)
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Attaches the location of `offset` within `input`.
    pub fn at(self, input: &[u8], offset: usize) -> Self {
        self.with_location(Location::from_offset(input, offset))
    }

    pub fn offset(&self) -> Option<usize> {
        self.location.map(|location| location.offset)
    }
}
