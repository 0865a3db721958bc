//! Row identity: explicit accessor, then id-shaped fields, then position.
//!
//! Rows have no schema, so identity is a heuristic. The recognized fields are probed in a fixed,
//! documented order and the first field with an id-shaped value wins:
//!
//! 1. `record_id`, integers only (the domain's numeric key),
//! 2. `id`, integer or string.
//!
//! Integers beyond `i64` keep their digits as a text id, so they never collapse onto a position.
//!
//! Callers with a different shape either pass an explicit accessor or configure their own list.

use super::row::Row;
use super::row::RowId;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Explicit row id accessor. When supplied its result is authoritative.
pub type RowIdFn = Arc<dyn Fn(&Row) -> RowId + Send + Sync>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdFieldKind {
    /// Integer values only.
    Numeric,
    /// Integer or string values.
    #[default]
    Any,
}

/// One recognized id-shaped field.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct IdField {
    pub name: String,
    #[serde(default)]
    pub kind: IdFieldKind,
}

impl IdField {
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: IdFieldKind::Numeric,
        }
    }

    pub fn any(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: IdFieldKind::Any,
        }
    }

    fn probe(&self, row: &Row) -> Option<RowId> {
        match (row.get(&self.name)?, self.kind) {
            // Integers beyond i64 keep their digits as text; floats are not id-shaped.
            (Value::Number(n), _) => n
                .as_i64()
                .map(RowId::Number)
                .or_else(|| n.as_u64().map(|u| RowId::Text(u.to_string()))),
            (Value::String(s), IdFieldKind::Any) => Some(RowId::Text(s.clone())),
            _ => None,
        }
    }
}

pub fn default_id_fields() -> Vec<IdField> {
    vec![IdField::numeric("record_id"), IdField::any("id")]
}

/// Derives a [`RowId`] for rows of any shape.
#[derive(Clone)]
pub struct RowIdentityResolver {
    accessor: Option<RowIdFn>,
    fields: Arc<[IdField]>,
}

impl Default for RowIdentityResolver {
    fn default() -> Self {
        Self {
            accessor: None,
            fields: default_id_fields().into(),
        }
    }
}

impl std::fmt::Debug for RowIdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowIdentityResolver")
            .field("accessor", &self.accessor.as_ref().map(|_| "<fn>"))
            .field("fields", &self.fields)
            .finish()
    }
}

impl RowIdentityResolver {
    pub fn new(accessor: Option<RowIdFn>, fields: Arc<[IdField]>) -> Self {
        Self { accessor, fields }
    }

    pub fn with_accessor(accessor: RowIdFn) -> Self {
        Self {
            accessor: Some(accessor),
            ..Self::default()
        }
    }

    pub fn accessor(&self) -> Option<&RowIdFn> {
        self.accessor.as_ref()
    }

    pub fn fields(&self) -> &Arc<[IdField]> {
        &self.fields
    }

    pub fn resolve(&self, row: &Row, fallback_index: Option<usize>) -> RowId {
        if let Some(accessor) = &self.accessor {
            return accessor(row);
        }
        self.fields
            .iter()
            .find_map(|field| field.probe(row))
            .unwrap_or_else(|| RowId::from(fallback_index.unwrap_or(0)))
    }
}

/// Resolves a row id with the default field list.
pub fn resolve_row_id(row: &Row, accessor: Option<&RowIdFn>, fallback_index: Option<usize>) -> RowId {
    RowIdentityResolver::new(accessor.cloned(), default_id_fields().into())
        .resolve(row, fallback_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::row::row_from_value;
    use serde_json::json;

    #[test]
    fn accessor_wins_even_when_fields_exist() {
        let accessor: RowIdFn = Arc::new(|_| RowId::from(""));
        let row = row_from_value(json!({"record_id": 4, "id": "x"}));
        assert_eq!(resolve_row_id(&row, Some(&accessor), Some(9)), RowId::from(""));
    }

    #[test]
    fn numeric_domain_field_beats_generic_id() {
        let row = row_from_value(json!({"id": "abc", "record_id": 12}));
        assert_eq!(resolve_row_id(&row, None, None), RowId::Number(12));
    }

    #[test]
    fn numeric_field_ignores_strings() {
        let row = row_from_value(json!({"record_id": "12", "id": "abc"}));
        assert_eq!(resolve_row_id(&row, None, None), RowId::from("abc"));
    }

    #[test]
    fn generic_id_accepts_numbers_and_strings() {
        let row = row_from_value(json!({"id": 3}));
        assert_eq!(resolve_row_id(&row, None, None), RowId::Number(3));
        let row = row_from_value(json!({"id": "u-1"}));
        assert_eq!(resolve_row_id(&row, None, None), RowId::from("u-1"));
    }

    #[test]
    fn falls_back_to_position() {
        let row = row_from_value(json!({"id": 1.5, "name": "x"}));
        assert_eq!(resolve_row_id(&row, None, Some(7)), RowId::Number(7));
        assert_eq!(resolve_row_id(&row, None, None), RowId::Number(0));
    }

    #[test]
    fn huge_unsigned_ids_stay_distinct() {
        let row = row_from_value(json!({"record_id": u64::MAX, "id": "ignored"}));
        assert_eq!(
            resolve_row_id(&row, None, Some(1)),
            RowId::from(u64::MAX.to_string())
        );
    }

        #[test]
    fn custom_field_list() {
        let resolver = RowIdentityResolver::new(None, vec![IdField::any("uuid")].into());
        let row = row_from_value(json!({"uuid": "a-b", "id": 1}));
        assert_eq!(resolver.resolve(&row, None), RowId::from("a-b"));
    }
}
