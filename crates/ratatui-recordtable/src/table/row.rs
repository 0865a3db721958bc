use serde_json::Map;
use serde_json::Value;
use std::fmt;

/// One record displayed as a table line. Rows have no fixed schema.
pub type Row = Map<String, Value>;

/// Converts any JSON value into a [`Row`].
///
/// Objects are used as-is. Anything else becomes an empty row, which renders as blank cells and
/// resolves to its positional id.
pub fn row_from_value(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// The derived identity of a [`Row`], used for selection membership and memo keys.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Number(n) => write!(f, "{n}"),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        RowId::Number(n)
    }
}

impl From<usize> for RowId {
    fn from(n: usize) -> Self {
        RowId::Number(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        RowId::Text(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        RowId::Text(s)
    }
}

/// Default cell text for a field value.
///
/// Only scalars are printed. Null, missing fields, arrays and objects render as an empty string
/// so a nested value never leaks its debug or JSON form into a cell.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) | None => String::new(),
    }
}
