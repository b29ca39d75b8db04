pub mod arena;
pub mod decode;
pub mod error;
pub mod file;
pub mod options;
pub mod text;

use std::io::Read;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use crate::arena::{Arena, Span};
pub use crate::decode::scan::{classify, Malformed, Token, TokenKind};
pub use crate::decode::ParseReport;
pub use crate::error::{Error, ErrorKind, Location};
pub use crate::file::{Entry, File, Iter};
pub use crate::options::{Delimiter, ParseOptions, DEFAULT_CAPACITY};
pub use crate::text::string::unquote;

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($tt:tt)*) => {};
}
// No-op stand-ins for the tracing macros, crate-visible only.
#[cfg(not(feature = "tracing"))]
#[allow(unused_imports)]
pub(crate) use {debug, trace};

pub type Result<T> = std::result::Result<T, Error>;

/// Parses `input` into `file`, appending after any existing entries.
///
/// Entry text is copied into `arena`. On error, entries committed before the
/// failing token stay in `file`.
///
/// # Examples
/// ```
/// use flatini::{Arena, File};
///
/// let mut arena = Arena::new();
/// let mut file = File::new(4);
/// let report = flatini::parse(&mut arena, &mut file, "k1=\"v1\"\nk2=v2").unwrap();
/// assert_eq!(report.committed, 2);
/// assert_eq!(file.find_by_key(&arena, "k1"), Some("\"v1\""));
/// ```
pub fn parse(arena: &mut Arena, file: &mut File, input: &str) -> Result<ParseReport> {
    parse_with_options(arena, file, input, &ParseOptions::default())
}

pub fn parse_with_options(
    arena: &mut Arena,
    file: &mut File,
    input: &str,
    options: &ParseOptions,
) -> Result<ParseReport> {
    decode::parse(arena, file, input, options)
}

pub fn parse_slice(arena: &mut Arena, file: &mut File, input: &[u8]) -> Result<ParseReport> {
    parse_slice_with_options(arena, file, input, &ParseOptions::default())
}

pub fn parse_slice_with_options(
    arena: &mut Arena,
    file: &mut File,
    input: &[u8],
    options: &ParseOptions,
) -> Result<ParseReport> {
    decode::parse_slice(arena, file, input, options)
}

/// Entries as a JSON object of strings, first occurrence of a key wins.
pub fn to_value(file: &File, arena: &Arena) -> Value {
    decode::value::to_value(file, arena, false)
}

/// Like [`to_value`], with unquoted booleans and numbers as JSON scalars.
pub fn to_typed_value(file: &File, arena: &Arena) -> Value {
    decode::value::to_value(file, arena, true)
}

/// Deserializes a configuration struct.
///
/// # Examples
/// ```
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// let server: Server = flatini::from_str("host=\"localhost\"\nport=8080\n").unwrap();
/// assert_eq!(server.host, "localhost");
/// assert_eq!(server.port, 8080);
/// ```
pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    from_str_with_options(input, &ParseOptions::default())
}

pub fn from_str_with_options<T: DeserializeOwned>(
    input: &str,
    options: &ParseOptions,
) -> Result<T> {
    decode::from_str(input, options)
}

pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T> {
    from_slice_with_options(input, &ParseOptions::default())
}

pub fn from_slice_with_options<T: DeserializeOwned>(
    input: &[u8],
    options: &ParseOptions,
) -> Result<T> {
    decode::from_slice(input, options)
}

pub fn from_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<T> {
    from_reader_with_options(reader, &ParseOptions::default())
}

pub fn from_reader_with_options<T: DeserializeOwned, R: Read>(
    reader: R,
    options: &ParseOptions,
) -> Result<T> {
    decode::from_reader(reader, options)
}

pub fn validate_str(input: &str) -> Result<()> {
    validate_str_with_options(input, &ParseOptions::default())
}

pub fn validate_str_with_options(input: &str, options: &ParseOptions) -> Result<()> {
    decode::validate_str(input, options)
}
