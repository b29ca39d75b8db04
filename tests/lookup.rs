use flatini::{Arena, Entry, File};
use rstest::rstest;

fn parsed(input: &str) -> (Arena, File) {
    let mut arena = Arena::new();
    let mut file = File::new(16);
    flatini::parse(&mut arena, &mut file, input).expect("parse");
    (arena, file)
}

#[rstest]
#[case("HOST", Some("127.0.0.1"))]
#[case("PORT", Some("8080"))]
#[case("HOS", None)]
#[case("HOST ", None)]
#[case("host", None)]
#[case("HOSTNAME", None)]
#[case("", None)]
fn find_by_key_matches_exactly(#[case] key: &str, #[case] expected: Option<&str>) {
    let (arena, file) = parsed("HOST=127.0.0.1\nPORT=8080\n");
    assert_eq!(file.find_by_key(&arena, key), expected);
}

#[rstest]
fn find_by_key_returns_first_duplicate() {
    let (arena, file) = parsed("mode=fast\nmode=slow\n");
    assert_eq!(file.len(), 2);
    assert_eq!(file.find_by_key(&arena, "mode"), Some("fast"));
}

#[rstest]
fn quoted_values_are_returned_verbatim() {
    let (arena, file) = parsed("greeting=\"hi \\\"you\\\"\"\n");
    let raw = file.find_by_key(&arena, "greeting").expect("greeting");
    assert_eq!(raw, "\"hi \\\"you\\\"\"");
    assert_eq!(flatini::unquote(raw), "hi \"you\"");
}

#[rstest]
fn storage_can_be_reused_across_files() {
    let mut arena = Arena::new();
    let mut file = File::with_storage(4, Vec::<Entry>::with_capacity(4));
    flatini::parse(&mut arena, &mut file, "a=1\n").expect("first parse");
    let storage = file.into_storage();

    arena.clear();
    let mut file = File::with_storage(4, storage);
    assert!(file.is_empty());
    flatini::parse(&mut arena, &mut file, "b=2\n").expect("second parse");
    assert_eq!(file.find_by_key(&arena, "a"), None);
    assert_eq!(file.find_by_key(&arena, "b"), Some("2"));
}

#[rstest]
fn iter_preserves_insertion_order() {
    let (arena, file) = parsed("z=1\ny=2\nx=3\n");
    let keys: Vec<&str> = file.iter(&arena).map(|(key, _)| key).collect();
    assert_eq!(keys, ["z", "y", "x"]);
    assert_eq!(file.iter(&arena).len(), 3);
}
