//! Declarative table setup, loaded from JSON.
//!
//! ```json
//! {
//!   "page_size": 50,
//!   "selectable": true,
//!   "columns": [
//!     { "id": "record_id", "label": "ID", "width": 6, "align": "right" },
//!     { "id": "name", "label": "Name", "width": 24, "min_width": 8 }
//!   ]
//! }
//! ```

use crate::error::ConfigError;
use crate::table::column::Column;
use crate::table::column::ColumnSpec;
use crate::table::identity::IdField;
use crate::table::pagination::DEFAULT_PAGE_SIZE;
use crate::table::pagination::PaginationState;
use crate::table::props::DEFAULT_HEIGHT;
use crate::table::props::TableProps;
use crate::table::row::Row;
use crate::table::view::DEFAULT_EMPTY_MESSAGE;
use crate::table::view::DEFAULT_EMPTY_PAGE_MESSAGE;
use crate::table::view::DEFAULT_LOADING_MESSAGE;
use crate::table::view::RecordTableOptions;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub height: u16,
    pub page_size: usize,
    /// `None` keeps the built-in choices.
    pub page_size_options: Option<Vec<usize>>,
    pub row_height: u16,
    pub selectable: bool,
    pub show_scrollbar: bool,
    pub empty_message: String,
    pub empty_page_message: String,
    pub loading_message: String,
    /// `None` keeps the built-in id fields.
    pub id_fields: Option<Vec<IdField>>,
    pub columns: Vec<ColumnSpec>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: None,
            row_height: 1,
            selectable: false,
            show_scrollbar: true,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            empty_page_message: DEFAULT_EMPTY_PAGE_MESSAGE.to_string(),
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
            id_fields: None,
            columns: Vec::new(),
        }
    }
}

impl TableConfig {
    /// Parses and validates a config.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(input)?;
        config.validate()?;
        log::debug!("loaded table config with {} columns", config.columns.len());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns.is_empty() {
            return Err(ConfigError::NoColumns);
        }
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.row_height == 0 {
            return Err(ConfigError::ZeroRowHeight);
        }
        if let Some(options) = &self.page_size_options {
            if options.is_empty() {
                return Err(ConfigError::EmptyPageSizeOptions);
            }
            if options.contains(&0) {
                return Err(ConfigError::ZeroPageSize);
            }
        }

        let mut seen = HashSet::new();
        for spec in &self.columns {
            if spec.width == 0 {
                return Err(ConfigError::ZeroWidth {
                    column: spec.id.clone(),
                });
            }
            if !seen.insert(spec.id.as_str()) {
                return Err(ConfigError::DuplicateColumn {
                    column: spec.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn columns(&self) -> Vec<Column> {
        self.columns.iter().map(Column::from).collect()
    }

    /// First page at the configured page size.
    pub fn pagination(&self) -> PaginationState {
        PaginationState::new(self.page_size, 1)
    }

    /// Props for `rows` with the configured columns, height, selectability and first page.
    ///
    /// Handlers, selection and row predicates are left for the caller to attach.
    pub fn props(&self, rows: impl Into<Arc<[Row]>>) -> TableProps {
        TableProps::new(rows, self.columns())
            .height(self.height)
            .selectable(self.selectable)
            .pagination(self.pagination())
    }

    pub fn options(&self) -> RecordTableOptions {
        let mut options = RecordTableOptions {
            row_height: self.row_height,
            show_scrollbar: self.show_scrollbar,
            empty_message: self.empty_message.clone(),
            empty_page_message: self.empty_page_message.clone(),
            loading_message: self.loading_message.clone(),
            ..RecordTableOptions::default()
        };
        if let Some(sizes) = &self.page_size_options {
            options.page_size_options = sizes.clone();
        }
        if let Some(fields) = &self.id_fields {
            options.id_fields = fields.clone().into();
        }
        options
    }
}
