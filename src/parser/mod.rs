// Parser module: table blocks, INSERT statements, value tokenizing and typing.

pub mod blocks;
pub mod coerce;
pub mod statement;
pub mod tokenizer;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A literal after type inference.
///
/// Every literal maps to exactly one variant; inference never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Json(serde_json::Value),
    /// A bracket/brace literal that did not parse as JSON, kept verbatim.
    RawFallback(String),
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypedValue::Null => serializer.serialize_unit(),
            TypedValue::Boolean(b) => serializer.serialize_bool(*b),
            TypedValue::Integer(i) => serializer.serialize_i64(*i),
            // serde_json writes non-finite floats as null.
            TypedValue::Float(f) => serializer.serialize_f64(*f),
            TypedValue::Text(s) | TypedValue::RawFallback(s) => serializer.serialize_str(s),
            TypedValue::Json(v) => v.serialize(serializer),
        }
    }
}

/// One row: column name to value, in declared column order.
pub type Record = IndexMap<String, TypedValue>;

// A row whose literal count disagrees with the table's column count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDefect {
    pub table: String,
    // 1-based ordinal of the statement within its table block.
    pub row: usize,
    pub actual: usize,
    pub expected: usize,
}

impl fmt::Display for RowDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Row has {} values but {} columns",
            self.actual, self.expected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_values_serialize_as_plain_json() {
        let mut record = Record::new();
        record.insert("a".into(), TypedValue::Null);
        record.insert("b".into(), TypedValue::Boolean(true));
        record.insert("c".into(), TypedValue::Integer(-7));
        record.insert("d".into(), TypedValue::Float(2.5));
        record.insert("e".into(), TypedValue::Text("hi".into()));
        record.insert("f".into(), TypedValue::Json(serde_json::json!([1, {"k": "v"}])));
        record.insert("g".into(), TypedValue::RawFallback("[1,2,".into()));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"a":null,"b":true,"c":-7,"d":2.5,"e":"hi","f":[1,{"k":"v"}],"g":"[1,2,"}"#
        );
    }

    #[test]
    fn non_finite_float_serializes_as_null() {
        let json = serde_json::to_string(&TypedValue::Float(f64::INFINITY)).unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn row_defect_message_carries_both_counts() {
        let defect = RowDefect {
            table: "t".into(),
            row: 3,
            actual: 2,
            expected: 3,
        };
        assert_eq!(defect.to_string(), "Row has 2 values but 3 columns");
    }
}
