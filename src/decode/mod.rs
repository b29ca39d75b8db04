pub mod scan;
pub mod value;

use std::io::Read;

use serde::de::DeserializeOwned;
use smallvec::SmallVec;

use crate::arena::{Arena, Span};
use crate::decode::scan::{classify, Malformed, TokenKind};
use crate::file::{Entry, File};
use crate::{debug, trace, Error, ParseOptions, Result};

/// Outcome of a successful parse.
#[derive(Debug, Default)]
pub struct ParseReport {
    /// Entries appended by this call.
    pub committed: usize,
    /// Non-fatal conditions, currently only unterminated quotes.
    pub diagnostics: SmallVec<[Error; 2]>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub fn parse(
    arena: &mut Arena,
    file: &mut File,
    input: &str,
    options: &ParseOptions,
) -> Result<ParseReport> {
    Parser::new(arena, file, input, options).run()
}

pub fn parse_slice(
    arena: &mut Arena,
    file: &mut File,
    input: &[u8],
    options: &ParseOptions,
) -> Result<ParseReport> {
    let text = std::str::from_utf8(input).map_err(|err| {
        Error::invalid_utf8(format!("invalid utf-8: {err}")).at(input, err.valid_up_to())
    })?;
    parse(arena, file, text, options)
}

pub fn validate_str(input: &str, options: &ParseOptions) -> Result<()> {
    let mut arena = Arena::new();
    let mut file = File::new(options.capacity);
    parse(&mut arena, &mut file, input, options).map(|_| ())
}

pub fn from_str<T: DeserializeOwned>(input: &str, options: &ParseOptions) -> Result<T> {
    let mut arena = Arena::with_capacity(input.len());
    let mut file = File::new(options.capacity);
    parse(&mut arena, &mut file, input, options)?;
    let value = value::to_value(&file, &arena, true);
    serde_json::from_value(value)
        .map_err(|err| Error::deserialize(format!("deserialize failed: {err}")))
}

pub fn from_slice<T: DeserializeOwned>(input: &[u8], options: &ParseOptions) -> Result<T> {
    let text = std::str::from_utf8(input).map_err(|err| {
        Error::invalid_utf8(format!("invalid utf-8: {err}")).at(input, err.valid_up_to())
    })?;
    from_str(text, options)
}

pub fn from_reader<T: DeserializeOwned, R: Read>(
    mut reader: R,
    options: &ParseOptions,
) -> Result<T> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .map_err(|err| Error::io(format!("read failed: {err}")))?;
    from_str(&buf, options)
}

#[derive(Clone, Copy)]
struct PendingKey {
    span: Span,
    offset: usize,
}

struct Parser<'a> {
    arena: &'a mut Arena,
    file: &'a mut File,
    input: &'a str,
    delimiter: u8,
    strict: bool,
    offset: usize,
    expecting_value: bool,
    pending: Option<PendingKey>,
    report: ParseReport,
}

impl<'a> Parser<'a> {
    fn new(
        arena: &'a mut Arena,
        file: &'a mut File,
        input: &'a str,
        options: &ParseOptions,
    ) -> Self {
        Self {
            arena,
            file,
            input,
            delimiter: options.delimiter.as_byte(),
            strict: options.strict,
            offset: 0,
            expecting_value: false,
            pending: None,
            report: ParseReport::default(),
        }
    }

    fn run(mut self) -> Result<ParseReport> {
        let input = self.input;
        let bytes = input.as_bytes();
        loop {
            let token = classify(bytes, self.offset, self.delimiter, self.expecting_value);
            trace!(offset = self.offset, len = token.len, kind = ?token.kind, "token");
            match token.kind {
                TokenKind::EndOfInput => {
                    self.finish()?;
                    break;
                }
                TokenKind::Malformed(Malformed::LoneCarriageReturn) => {
                    return Err(Error::line_ending("carriage return not followed by line feed")
                        .at(bytes, self.offset));
                }
                // A pending key keeps waiting: its value may start on the next line.
                TokenKind::Separator | TokenKind::LineEnd => {}
                TokenKind::Key => self.begin_entry(token.len),
                TokenKind::QuotedValue { terminated } => self.commit(token.len, terminated)?,
                TokenKind::UnquotedValue => self.commit(token.len, true)?,
            }
            self.offset += token.len;
        }
        debug!(
            committed = self.report.committed,
            diagnostics = self.report.diagnostics.len(),
            total = self.file.len(),
            "parse finished"
        );
        Ok(self.report)
    }

    fn token_text(&self, len: usize) -> &'a str {
        let input = self.input;
        &input[self.offset..self.offset + len]
    }

    fn begin_entry(&mut self, len: usize) {
        let text = self.token_text(len);
        let span = self.arena.alloc(text);
        self.pending = Some(PendingKey {
            span,
            offset: self.offset,
        });
        self.expecting_value = true;
    }

    fn commit(&mut self, len: usize, terminated: bool) -> Result<()> {
        let input = self.input;
        let bytes = input.as_bytes();
        let Some(key) = self.pending.take() else {
            return Err(Error::missing_key("value has no preceding key").at(bytes, self.offset));
        };
        if self.file.is_full() {
            return Err(Error::capacity_exceeded(self.file.capacity()).at(bytes, key.offset));
        }
        let text = self.token_text(len);
        let value = self.arena.alloc(text);
        self.file.push(Entry {
            key: key.span,
            value,
        })?;
        self.expecting_value = false;
        self.report.committed += 1;

        if !terminated {
            let err = Error::unterminated_quote("quoted value is missing its closing quote")
                .at(bytes, self.offset);
            if self.strict {
                return Err(err);
            }
            debug!(offset = self.offset, "unterminated quote");
            self.report.diagnostics.push(err);
        }
        Ok(())
    }

    // A key still pending at the end of input never got a value.
    fn finish(&mut self) -> Result<()> {
        match self.pending.take() {
            Some(key) => {
                let name = self.arena.get(key.span).unwrap_or_default();
                Err(Error::truncated_entry(name).at(self.input.as_bytes(), key.offset))
            }
            None => Ok(()),
        }
    }
}
