//! `ratatui-recordtable` renders pages of schemaless records as a selectable table.
//!
//! The table is controlled: the caller owns the rows, the selection and the paging state, hands
//! them over as [`TableProps`] on every frame, and applies whatever the table requests through the
//! props' handlers.
//!
//! - Rows are JSON objects. Each row gets a stable [`RowId`] from an explicit accessor, a known
//!   id-shaped field, or its position.
//! - Selection survives paging: ids that are not on the current page are kept on every toggle.
//! - Pagination is client-side (slice the rows) or server-side (rows are already one page and
//!   `total_count` is known).
//! - The table shrinks to fit a few rows and scrolls once they outgrow the requested height.
//!
//! ```no_run
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use ratatui_recordtable::{Column, RecordTable, TableProps, Theme, row_from_value};
//!
//! let rows = vec![row_from_value(serde_json::json!({"id": 1, "name": "Ada"}))];
//! let props = TableProps::new(rows, vec![Column::new("name", "Name", 12)]).selectable(true);
//! let mut table = RecordTable::new();
//! let area = Rect::new(0, 0, 40, 10);
//! let mut buf = Buffer::empty(area);
//! table.render(area, &mut buf, &Theme::default(), &props);
//! ```
//!
//! Logging goes through the `log` facade; install any logger to see status transitions and
//! emitted requests.

pub mod config;
pub mod error;
pub mod table;

pub use ratatui_recordtable_core::help;
pub use ratatui_recordtable_core::input;
pub use ratatui_recordtable_core::keymap;
pub use ratatui_recordtable_core::render;
pub use ratatui_recordtable_core::theme;
pub use ratatui_recordtable_core::viewport;

#[cfg(feature = "crossterm")]
pub use ratatui_recordtable_core::crossterm_input;

pub use config::TableConfig;
pub use error::ConfigError;
pub use table::column::Column;
pub use table::pagination::PaginationState;
pub use table::props::TableProps;
pub use table::props::TableStatus;
pub use table::row::Row;
pub use table::row::RowId;
pub use table::row::row_from_value;
pub use table::selection::SelectionSet;
pub use table::view::RecordTable;
pub use table::view::RecordTableOptions;
pub use table::view::TableAction;
pub use theme::Theme;
