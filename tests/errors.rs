use flatini::{Arena, ErrorKind, File, ParseOptions};
use rstest::rstest;

fn parse_into(
    input: &str,
    capacity: usize,
    options: &ParseOptions,
) -> (Arena, File, flatini::Result<flatini::ParseReport>) {
    let mut arena = Arena::new();
    let mut file = File::new(capacity);
    let result = flatini::parse_with_options(&mut arena, &mut file, input, options);
    (arena, file, result)
}

#[rstest]
#[case("k", 0, 0)]
#[case("k\n", 0, 0)]
#[case("k=", 0, 0)]
#[case("k=\n", 0, 0)]
#[case("a=1\nb\n", 4, 1)]
#[case("a=1\r\nb=\r\n\r\n", 5, 1)]
#[case("=v", 1, 0)]
fn key_without_value_is_truncated(
    #[case] input: &str,
    #[case] offset: usize,
    #[case] committed: usize,
) {
    let (_, file, result) = parse_into(input, 8, &ParseOptions::default());
    let err = result.expect_err("truncated entry");
    assert_eq!(err.kind, ErrorKind::TruncatedEntry);
    assert_eq!(err.offset(), Some(offset));
    assert_eq!(file.len(), committed);
}

#[rstest]
#[case("k\nj=v", &[("k", "j=v")])]
#[case("k=\nj=v", &[("k", "j=v")])]
#[case("a=1\nb\nc=3", &[("a", "1"), ("b", "c=3")])]
#[case("k\n\n\"v\"", &[("k", "\"v\"")])]
fn value_may_follow_on_a_later_line(#[case] input: &str, #[case] expected: &[(&str, &str)]) {
    let (arena, file, result) = parse_into(input, 8, &ParseOptions::default());
    let report = result.unwrap_or_else(|err| panic!("parse failed: {err}"));
    assert!(report.is_clean());
    let actual: Vec<(&str, &str)> = file.iter(&arena).collect();
    assert_eq!(actual, expected);
}

#[rstest]
fn truncated_entry_names_the_key() {
    let (_, _, result) = parse_into("a=1\nname\n", 8, &ParseOptions::default());
    let err = result.expect_err("truncated entry");
    assert_eq!(err.to_string(), "key \"name\" has no value at line 2, column 1");
}

#[rstest]
#[case(0, "a=1", 0)]
#[case(1, "a=1\nb=2", 1)]
#[case(2, "a=1\nb=2\nc=3\nd=4", 2)]
fn capacity_is_checked_before_commit(
    #[case] capacity: usize,
    #[case] input: &str,
    #[case] kept: usize,
) {
    let (arena, file, result) = parse_into(input, capacity, &ParseOptions::default());
    let err = result.expect_err("capacity exceeded");
    assert_eq!(err.kind, ErrorKind::CapacityExceeded);
    assert_eq!(file.len(), kept);
    assert!(file.len() <= file.capacity());
    if kept > 0 {
        assert_eq!(file.find_by_key(&arena, "a"), Some("1"));
    }
}

#[rstest]
fn exact_capacity_is_accepted() {
    let (_, file, result) = parse_into("a=1\nb=2\n", 2, &ParseOptions::default());
    result.expect("parse");
    assert!(file.is_full());
}

#[rstest]
#[case("k=\"open\nj=v", "\"open")]
#[case("k=\"open\r\nj=v", "\"open")]
#[case("k=\"open", "\"open")]
#[case("k=\"a\\\"", "\"a\\\"")]
fn unterminated_quote_is_a_diagnostic(#[case] input: &str, #[case] stored: &str) {
    let (arena, file, result) = parse_into(input, 8, &ParseOptions::default());
    let report = result.expect("lenient parse");
    assert!(!report.is_clean());
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].kind, ErrorKind::UnterminatedQuote);
    assert_eq!(report.diagnostics[0].offset(), Some(2));
    assert_eq!(file.find_by_key(&arena, "k"), Some(stored));
}

#[rstest]
fn unterminated_quote_continues_with_next_line() {
    let (arena, file, result) = parse_into("k=\"open\nj=v", 8, &ParseOptions::default());
    result.expect("lenient parse");
    assert_eq!(file.find_by_key(&arena, "j"), Some("v"));
}

#[rstest]
fn strict_mode_rejects_unterminated_quote() {
    let options = ParseOptions::new().with_strict(true);
    let (_, file, result) = parse_into("a=1\nk=\"open\nj=v", 8, &options);
    let err = result.expect_err("strict");
    assert_eq!(err.kind, ErrorKind::UnterminatedQuote);
    assert_eq!(err.location.map(|location| location.line), Some(2));
    assert_eq!(file.len(), 2);
}

#[rstest]
#[case("\"k\"=v")]
#[case("a=\"1\"\"2\"")]
fn value_without_key(#[case] input: &str) {
    let (_, _, result) = parse_into(input, 8, &ParseOptions::default());
    assert_eq!(result.expect_err("missing key").kind, ErrorKind::MissingKey);
}

#[rstest]
#[case("a=1\nb=2", true)]
#[case("", true)]
#[case("a", false)]
#[case("a=1\rb=2", false)]
fn validate(#[case] input: &str, #[case] valid: bool) {
    assert_eq!(flatini::validate_str(input).is_ok(), valid);
}

#[rstest]
fn validate_respects_capacity_option() {
    let options = ParseOptions::new().with_capacity(1);
    let err = flatini::validate_str_with_options("a=1\nb=2", &options).expect_err("capacity");
    assert_eq!(err.kind, ErrorKind::CapacityExceeded);
}
