use serde_json::Value as JsonValue;

/// Whether a submitted JSON value counts as provided.
///
/// Absent, `null`, `false`, numeric zero and the empty string are all treated
/// as not provided, so `experienceYears: 0` is reported as missing. Arrays and
/// objects are always considered provided, even when empty.
pub fn is_provided(value: Option<&JsonValue>) -> bool {
    match value {
        None | Some(JsonValue::Null) => false,
        Some(JsonValue::Bool(b)) => *b,
        Some(JsonValue::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(JsonValue::String(s)) => !s.is_empty(),
        Some(JsonValue::Array(_)) | Some(JsonValue::Object(_)) => true,
    }
}

/// Returns the first name in `fields` whose value is not provided.
pub fn first_missing<'f, 'v, F>(fields: &[&'f str], lookup: F) -> Option<&'f str>
where
    F: Fn(&str) -> Option<&'v JsonValue>,
{
    fields
        .iter()
        .copied()
        .find(|&name| !is_provided(lookup(name)))
}
