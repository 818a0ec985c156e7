// Best-effort type inference for a single trimmed SQL literal.
// First matching rule wins: NULL, boolean, quoted text, JSON, number, bare text.
// Anything opening with '[' or '{' is a JSON candidate, closed or not; if it
// does not parse it is kept verbatim as RawFallback.

use crate::parser::TypedValue;

pub fn coerce_literal(literal: &str) -> TypedValue {
    let value = literal.trim();

    if value.eq_ignore_ascii_case("NULL") {
        return TypedValue::Null;
    }
    if value.eq_ignore_ascii_case("TRUE") {
        return TypedValue::Boolean(true);
    }
    if value.eq_ignore_ascii_case("FALSE") {
        return TypedValue::Boolean(false);
    }

    if let Some(inner) = strip_quotes(value) {
        return TypedValue::Text(unescape(inner));
    }

    if value.starts_with(['[', '{']) {
        return match serde_json::from_str::<serde_json::Value>(value) {
            Ok(json) => TypedValue::Json(json),
            Err(_) => TypedValue::RawFallback(value.to_string()),
        };
    }

    if let Some(number) = parse_number(value) {
        return number;
    }

    TypedValue::Text(value.to_string())
}

// Body of a '...' or "..." literal. A lone quote character is not a pair.
fn strip_quotes(value: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|q| {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            Some(&value[1..value.len() - 1])
        } else {
            None
        }
    })
}

// Order matters: later replacements must not re-trigger earlier ones.
fn unescape(inner: &str) -> String {
    inner
        .replace("''", "'")
        .replace("\\\"", "\"")
        .replace("\\n", "\n")
        .replace("\\t", "\t")
}

// A '.' forces float; otherwise the literal must fit an i64.
fn parse_number(value: &str) -> Option<TypedValue> {
    if value.contains('.') {
        value.parse::<f64>().ok().map(TypedValue::Float)
    } else {
        value.parse::<i64>().ok().map(TypedValue::Integer)
    }
}
