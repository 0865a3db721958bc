//! Errors raised while loading a [`TableConfig`](crate::config::TableConfig).
//!
//! Rendering and event handling never fail; only configuration does.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid table config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("table config declares no columns")]
    NoColumns,

    #[error("page size must be at least 1")]
    ZeroPageSize,

    #[error("row height must be at least 1")]
    ZeroRowHeight,

    #[error("column '{column}' has zero width")]
    ZeroWidth { column: String },

    #[error("column '{column}' is declared more than once")]
    DuplicateColumn { column: String },

    /// An explicit, empty list. Omit the field to use the defaults.
    #[error("page size options must not be empty")]
    EmptyPageSizeOptions,
}
