//! Canonical single-line rendering of structural values.
//!
//! The formatter is the left inverse of the delegated value parser:
//! re-parsing its output yields a structurally equal value, whatever the
//! original spelling in the document was.

use toml::Value;

/// Render a value in the engine's fixed single-line form.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Boolean(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => format_float(*f),
        Value::String(s) => quote_string(s),
        Value::Datetime(dt) => dt.to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Table(table) => {
            let parts: Vec<String> = table
                .iter()
                .map(|(key, item)| format!("{} = {}", format_key_segment(key), format_value(item)))
                .collect();
            format!("{{ {} }}", parts.join(", "))
        }
    }
}

/// Bare keys stay bare; anything else is emitted as a quoted string.
pub fn format_key_segment(segment: &str) -> String {
    let bare = !segment.is_empty()
        && segment
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if bare {
        segment.to_string()
    } else {
        quote_string(segment)
    }
}

/// Dotted key path for the left-hand side of a rewritten assignment.
pub fn format_key_path(segments: &[String]) -> String {
    segments
        .iter()
        .map(|segment| format_key_segment(segment))
        .collect::<Vec<_>>()
        .join(".")
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }
    let mut text = f.to_string();
    // A bare integral rendering like "2" would re-parse as an integer.
    if !text.contains('.') && !text.contains('e') && !text.contains('E') {
        text.push_str(".0");
    }
    text
}

fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\u{0008}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::parse_value_literal;

    #[test]
    fn scalars_render_canonically() {
        assert_eq!(format_value(&Value::Boolean(true)), "true");
        assert_eq!(format_value(&Value::Integer(-42)), "-42");
        assert_eq!(format_value(&Value::Float(2.0)), "2.0");
        assert_eq!(format_value(&Value::Float(0.25)), "0.25");
        assert_eq!(format_value(&Value::Float(f64::NAN)), "nan");
        assert_eq!(format_value(&Value::Float(f64::NEG_INFINITY)), "-inf");
    }

    #[test]
    fn strings_escape_the_fixed_set() {
        let value = Value::String("a\"b\\c\td\ne".to_string());
        assert_eq!(format_value(&value), "\"a\\\"b\\\\c\\td\\ne\"");
        // Non-ASCII passes through unescaped.
        assert_eq!(format_value(&Value::String("héllo".into())), "\"héllo\"");
    }

    #[test]
    fn collections_render_single_line() {
        let value = parse_value_literal("[1, \"two\", [true]]").unwrap();
        assert_eq!(format_value(&value), "[1, \"two\", [true]]");

        let table = parse_value_literal("{ b = 1, \"odd key\" = 2, a = 3 }").unwrap();
        // Insertion order is preserved, not sorted.
        assert_eq!(format_value(&table), "{ b = 1, \"odd key\" = 2, a = 3 }");
    }

    #[test]
    fn datetimes_render_iso_8601() {
        let value = parse_value_literal("1979-05-27T07:32:00Z").unwrap();
        assert_eq!(format_value(&value), "1979-05-27T07:32:00Z");
        let date = parse_value_literal("1979-05-27").unwrap();
        assert_eq!(format_value(&date), "1979-05-27");
        let time = parse_value_literal("07:32:00").unwrap();
        assert_eq!(format_value(&time), "07:32:00");
    }

    #[test]
    fn key_segments_quote_when_not_bare() {
        assert_eq!(format_key_segment("opt-level_2"), "opt-level_2");
        assert_eq!(format_key_segment("my.key"), "\"my.key\"");
        assert_eq!(format_key_path(&["a".into(), "b c".into()]), "a.\"b c\"");
    }
}
