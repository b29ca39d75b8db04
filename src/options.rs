use std::fmt;

pub const DEFAULT_CAPACITY: usize = 256;

/// Byte separating a key from its value.
///
/// # Examples
/// ```
/// use flatini::Delimiter;
///
/// assert_eq!(Delimiter::default().as_byte(), b'=');
/// assert_eq!(Delimiter::from_char(':'), Some(Delimiter::Colon));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Equals,
    Colon,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Equals => b'=',
            Delimiter::Colon => b':',
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(Delimiter::Equals),
            ':' => Some(Delimiter::Colon),
            _ => None,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub delimiter: Delimiter,
    /// Turns an unterminated quoted value into an error instead of a
    /// diagnostic.
    pub strict: bool,
    /// Entry capacity used by the convenience entry points that allocate
    /// their own `File`.
    pub capacity: usize,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            strict: false,
            capacity: DEFAULT_CAPACITY,
        }
    }
}
