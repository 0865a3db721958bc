use super::column::Column;
use super::identity::RowIdFn;
use super::pagination::PaginationState;
use super::row::Row;
use super::row::RowId;
use super::selection::RowPredicate;
use super::selection::SelectionSet;
use std::sync::Arc;

pub const DEFAULT_HEIGHT: u16 = 600;

/// Receives the requested selection: every selected id plus the loaded rows among them.
pub type SelectionHandler = Arc<dyn Fn(&[RowId], &[Row]) + Send + Sync>;

/// Receives a requested page (1-based) or page size.
pub type PageHandler = Arc<dyn Fn(usize) + Send + Sync>;

/// Everything the caller owns, handed to the table on every render and event.
///
/// Props are cheap to clone: rows, columns, selection and callbacks are all shared `Arc`s, and
/// the table's memoization compares them by identity. Build a new `Arc` when the data changes
/// and keep the old one when it does not.
#[derive(Clone)]
pub struct TableProps {
    pub rows: Arc<[Row]>,
    pub columns: Arc<[Column]>,
    /// Requested height in terminal rows. Clamped to the render area.
    pub height: u16,
    pub loading: bool,
    pub error: Option<String>,
    pub selectable: bool,
    pub selected_ids: Arc<SelectionSet>,
    pub on_selection_change: Option<SelectionHandler>,
    pub get_row_id: Option<RowIdFn>,
    pub is_row_disabled: Option<RowPredicate>,
    pub pagination: PaginationState,
    pub on_page_change: Option<PageHandler>,
    pub on_page_size_change: Option<PageHandler>,
    pub empty_message: Option<String>,
    /// Caller-owned animation tick for the loading spinner.
    pub spinner_tick: u64,
}

impl TableProps {
    pub fn new(rows: impl Into<Arc<[Row]>>, columns: impl Into<Arc<[Column]>>) -> Self {
        Self {
            rows: rows.into(),
            columns: columns.into(),
            height: DEFAULT_HEIGHT,
            loading: false,
            error: None,
            selectable: false,
            selected_ids: Arc::new(SelectionSet::new()),
            on_selection_change: None,
            get_row_id: None,
            is_row_disabled: None,
            pagination: PaginationState::default(),
            on_page_change: None,
            on_page_size_change: None,
            empty_message: None,
            spinner_tick: 0,
        }
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn selected_ids(mut self, selected: Arc<SelectionSet>) -> Self {
        self.selected_ids = selected;
        self
    }

    pub fn on_selection_change(
        mut self,
        f: impl Fn(&[RowId], &[Row]) + Send + Sync + 'static,
    ) -> Self {
        self.on_selection_change = Some(Arc::new(f));
        self
    }

    pub fn get_row_id(mut self, f: impl Fn(&Row) -> RowId + Send + Sync + 'static) -> Self {
        self.get_row_id = Some(Arc::new(f));
        self
    }

    pub fn is_row_disabled(mut self, f: impl Fn(&Row) -> bool + Send + Sync + 'static) -> Self {
        self.is_row_disabled = Some(Arc::new(f));
        self
    }

    pub fn pagination(mut self, pagination: PaginationState) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn on_page_change(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_page_change = Some(Arc::new(f));
        self
    }

    pub fn on_page_size_change(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_page_size_change = Some(Arc::new(f));
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self
    }

    pub fn spinner_tick(mut self, tick: u64) -> Self {
        self.spinner_tick = tick;
        self
    }

    pub fn is_row_disabled_at(&self, row: &Row) -> bool {
        self.is_row_disabled.as_ref().is_some_and(|f| f(row))
    }

    /// The dataset is empty: no loaded rows and no rows reported elsewhere.
    pub fn is_dataset_empty(&self) -> bool {
        self.rows.is_empty() && self.pagination.total_count.unwrap_or(0) == 0
    }
}

/// The four mutually exclusive things a table can show, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableStatus {
    Loading,
    Error,
    Empty,
    Populated,
}

impl TableStatus {
    pub fn of(props: &TableProps) -> Self {
        if props.loading {
            TableStatus::Loading
        } else if props.error.is_some() {
            TableStatus::Error
        } else if props.is_dataset_empty() {
            TableStatus::Empty
        } else {
            TableStatus::Populated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::row::row_from_value;
    use serde_json::json;

    fn one_row() -> Vec<Row> {
        vec![row_from_value(json!({"id": 1}))]
    }

    fn cols() -> Vec<Column> {
        vec![Column::new("id", "ID", 4)]
    }

    #[test]
    fn status_priority_is_loading_error_empty_populated() {
        let p = TableProps::new(one_row(), cols())
            .loading(true)
            .error(Some("boom".into()));
        assert_eq!(TableStatus::of(&p), TableStatus::Loading);
        let p = p.loading(false);
        assert_eq!(TableStatus::of(&p), TableStatus::Error);
        let p = TableProps::new(Vec::<Row>::new(), cols());
        assert_eq!(TableStatus::of(&p), TableStatus::Empty);
        let p = TableProps::new(one_row(), cols());
        assert_eq!(TableStatus::of(&p), TableStatus::Populated);
    }

    #[test]
    fn server_page_past_the_end_is_not_an_empty_dataset() {
        let p = TableProps::new(Vec::<Row>::new(), cols()).pagination(PaginationState::server(10, 9, 30));
        assert_eq!(TableStatus::of(&p), TableStatus::Populated);
    }
}
