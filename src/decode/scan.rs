use memchr::{memchr2, memchr3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// `\r` not followed by `\n`.
    LoneCarriageReturn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Key,
    /// `terminated` is false when the line or input ended before the closing
    /// quote.
    QuotedValue {
        terminated: bool,
    },
    UnquotedValue,
    Separator,
    LineEnd,
    EndOfInput,
    Malformed(Malformed),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub len: usize,
    pub kind: TokenKind,
}

impl Token {
    fn new(len: usize, kind: TokenKind) -> Self {
        Self { len, kind }
    }
}

/// Classifies the token starting at `offset`.
///
/// Every kind except `EndOfInput` and `Malformed` has a non-zero length.
pub fn classify(input: &[u8], offset: usize, delimiter: u8, expecting_value: bool) -> Token {
    let Some(&byte) = input.get(offset) else {
        return Token::new(0, TokenKind::EndOfInput);
    };
    if byte == delimiter {
        return Token::new(1, TokenKind::Separator);
    }
    let rest = &input[offset..];
    match byte {
        b'\n' => Token::new(1, TokenKind::LineEnd),
        b'\r' => match rest.get(1) {
            Some(b'\n') => Token::new(2, TokenKind::LineEnd),
            _ => Token::new(0, TokenKind::Malformed(Malformed::LoneCarriageReturn)),
        },
        b'"' => scan_quoted(rest),
        _ if expecting_value => Token::new(scan_unquoted(rest), TokenKind::UnquotedValue),
        _ => Token::new(scan_key(rest, delimiter), TokenKind::Key),
    }
}

fn scan_key(rest: &[u8], delimiter: u8) -> usize {
    memchr3(delimiter, b'\r', b'\n', rest).unwrap_or(rest.len())
}

fn scan_unquoted(rest: &[u8]) -> usize {
    memchr2(b'\r', b'\n', rest).unwrap_or(rest.len())
}

// `rest[0]` is the opening quote. A lone `\r` inside quotes is content; only
// `\n` and `\r\n` cut the value short.
fn scan_quoted(rest: &[u8]) -> Token {
    let mut idx = 1;
    while let Some(found) = memchr3(b'\\', b'"', b'\n', &rest[idx..]) {
        let pos = idx + found;
        match rest[pos] {
            b'"' => {
                return Token::new(pos + 1, TokenKind::QuotedValue { terminated: true });
            }
            b'\n' => {
                let end = if rest[pos - 1] == b'\r' { pos - 1 } else { pos };
                return Token::new(end, TokenKind::QuotedValue { terminated: false });
            }
            _ => {
                idx = if rest.get(pos + 1) == Some(&b'"') {
                    pos + 2
                } else {
                    pos + 1
                };
            }
        }
        if idx >= rest.len() {
            break;
        }
    }
    Token::new(rest.len(), TokenKind::QuotedValue { terminated: false })
}
