use serde_json::{Map, Value};

use crate::arena::Arena;
use crate::file::File;
use crate::text::string::{parse_literal, unquote};

/// Builds a JSON object from parsed entries.
///
/// The first occurrence of a key wins, matching [`File::find_by_key`]. Quoted
/// values are unquoted and always become strings; with `typed` set, unquoted
/// booleans and numbers become JSON scalars.
pub fn to_value(file: &File, arena: &Arena, typed: bool) -> Value {
    let mut map = Map::with_capacity(file.len());
    for (key, raw) in file.iter(arena) {
        if map.contains_key(key) {
            continue;
        }
        map.insert(key.to_string(), scalar(raw, typed));
    }
    Value::Object(map)
}

fn scalar(raw: &str, typed: bool) -> Value {
    if raw.starts_with('"') {
        return Value::String(unquote(raw).into_owned());
    }
    if typed {
        if let Some(value) = parse_literal(raw) {
            return value;
        }
    }
    Value::String(raw.to_string())
}
