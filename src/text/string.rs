use std::borrow::Cow;

use memchr::memchr2;
use serde_json::{Number, Value};

/// Strips the surrounding quotes of a stored value and resolves `\"`.
///
/// Values that do not start with `"` are returned unchanged. A missing
/// closing quote is tolerated, anything after the first unescaped closing
/// quote is dropped.
///
/// # Examples
/// ```
/// use flatini::unquote;
///
/// assert_eq!(unquote(r#""say \"hi\"""#), r#"say "hi""#);
/// assert_eq!(unquote("plain"), "plain");
/// ```
pub fn unquote(raw: &str) -> Cow<'_, str> {
    let Some(inner) = raw.strip_prefix('"') else {
        return Cow::Borrowed(raw);
    };
    let bytes = inner.as_bytes();
    let mut out = String::new();
    let mut escaped = false;
    let mut start = 0;
    let mut idx = 0;
    let end = loop {
        let Some(found) = memchr2(b'\\', b'"', &bytes[idx..]) else {
            break bytes.len();
        };
        let pos = idx + found;
        if bytes[pos] == b'"' {
            break pos;
        }
        if bytes.get(pos + 1) == Some(&b'"') {
            out.push_str(&inner[start..pos]);
            escaped = true;
            start = pos + 1;
            idx = pos + 2;
        } else {
            idx = pos + 1;
        }
        if idx >= bytes.len() {
            break bytes.len();
        }
    };
    if !escaped {
        return Cow::Borrowed(&inner[..end]);
    }
    out.push_str(&inner[start..end]);
    Cow::Owned(out)
}

// Leading zeros (`05`) stay strings so they round-trip unchanged.
fn is_numeric_like(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    match digits.as_bytes() {
        [] => false,
        [b'0', b'0'..=b'9', ..] => false,
        [first, ..] if !first.is_ascii_digit() => false,
        bytes => bytes
            .iter()
            .all(|byte| byte.is_ascii_digit() || matches!(byte, b'.' | b'e' | b'E' | b'+' | b'-')),
    }
}

/// Interprets an unquoted value as a JSON boolean or number when it looks
/// like one.
pub fn parse_literal(value: &str) -> Option<Value> {
    match value {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        _ => {}
    }
    if !is_numeric_like(value) {
        return None;
    }
    if let Ok(number) = value.parse::<i64>() {
        return Some(Value::from(number));
    }
    if let Ok(number) = value.parse::<u64>() {
        return Some(Value::from(number));
    }
    let float = value.parse::<f64>().ok()?;
    Number::from_f64(float).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("plain", "plain")]
    #[case("\"v\"", "v")]
    #[case("\"\"", "")]
    #[case(r#""\"v""#, "\"v")]
    #[case(r#""a \"b\" c""#, "a \"b\" c")]
    #[case("\"open", "open")]
    #[case("\"v\" trailing", "v")]
    #[case(r#""back\slash""#, r"back\slash")]
    #[case("\"a\\", "a\\")]
    fn test_unquote(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(unquote(raw), expected);
    }

    #[rstest]
    fn test_unquote_borrows_without_escapes() {
        assert!(matches!(unquote("\"v\""), Cow::Borrowed("v")));
        assert!(matches!(unquote(r#""\"""#), Cow::Owned(_)));
    }

    #[rstest]
    #[case("true", Some(json!(true)))]
    #[case("false", Some(json!(false)))]
    #[case("8080", Some(json!(8080)))]
    #[case("-12", Some(json!(-12)))]
    #[case("0", Some(json!(0)))]
    #[case("0.5", Some(json!(0.5)))]
    #[case("18446744073709551615", Some(json!(18446744073709551615u64)))]
    #[case("05", None)]
    #[case("1.2.3", None)]
    #[case("+5", None)]
    #[case("127.0.0.1", None)]
    #[case("True", None)]
    #[case("", None)]
    fn test_parse_literal(#[case] raw: &str, #[case] expected: Option<Value>) {
        assert_eq!(parse_literal(raw), expected);
    }
}
