use super::column::Column;
use super::header::CHECKBOX_WIDTH;
use super::header::join_cells;
use super::memo::ByPtr;
use super::memo::KeyedMemo;
use super::row::Row;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui_recordtable_core::theme::Theme;
use std::sync::Arc;

/// Inputs of one row render.
pub struct RowProps<'a> {
    pub row: &'a Row,
    /// Absolute index of the row in the full row set.
    pub index: usize,
    pub columns: &'a Arc<[Column]>,
    pub widths: &'a [u16],
    pub selectable: bool,
    pub selected: bool,
    pub disabled: bool,
    pub cursor: bool,
    pub theme: &'a Theme,
}

fn row_checkbox(selected: bool, disabled: bool, theme: &Theme) -> Span<'static> {
    match (disabled, selected) {
        (true, true) => Span::styled("[x]", theme.disabled),
        (true, false) => Span::styled("[·]", theme.disabled),
        (false, true) => Span::styled("[x]", theme.accent),
        (false, false) => Span::styled("[ ]", Style::default()),
    }
}

/// Builds one row line: optional checkbox, then one cell per column.
pub fn row_line(props: &RowProps<'_>) -> Line<'static> {
    let theme = props.theme;
    let leading = props
        .selectable
        .then(|| row_checkbox(props.selected, props.disabled, theme));
    let spans = join_cells(leading, props.columns, props.widths, |col| {
        col.cell(props.row, props.index)
    });

    let mut style = theme.text_primary;
    if props.disabled {
        style = style.patch(theme.disabled);
    }
    if props.selected {
        style = style.patch(theme.selected);
    }
    if props.cursor {
        style = style.patch(theme.cursor);
    }
    Line::from(spans).style(style)
}

/// Where a column of a row line starts, relative to the line's left edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSpan {
    pub column: usize,
    pub x: u16,
    pub width: u16,
}

/// Column positions within a line laid out by [`row_line`] or the header.
pub fn cell_spans(widths: &[u16], selectable: bool) -> Vec<CellSpan> {
    let mut x = if selectable { CHECKBOX_WIDTH } else { 0 };
    widths
        .iter()
        .enumerate()
        .map(|(column, width)| {
            let span = CellSpan {
                column,
                x,
                width: *width,
            };
            x = x.saturating_add(*width).saturating_add(1);
            span
        })
        .collect()
}

#[derive(PartialEq)]
struct RowKey {
    rows: ByPtr<[Row]>,
    index: usize,
    selectable: bool,
    selected: bool,
    disabled: bool,
    cursor: bool,
    columns: ByPtr<[Column]>,
    widths: Vec<u16>,
    theme: Theme,
}

/// Memoized row lines, one slot per displayed position.
#[derive(Default)]
pub struct RowViews {
    memo: KeyedMemo<usize, RowKey, Line<'static>>,
}

impl RowViews {
    /// The line for the row at `position`. `rows` is the row set `props.row` belongs to.
    pub fn line(&mut self, position: usize, rows: &Arc<[Row]>, props: RowProps<'_>) -> &Line<'static> {
        let key = RowKey {
            rows: ByPtr::from(rows),
            index: props.index,
            selectable: props.selectable,
            selected: props.selected,
            disabled: props.disabled,
            cursor: props.cursor,
            columns: ByPtr::from(props.columns),
            widths: props.widths.to_vec(),
            theme: props.theme.clone(),
        };
        self.memo.get_or_compute(position, key, || row_line(&props))
    }

    /// Forgets every position outside `visible`.
    pub fn retain_visible(&mut self, visible: std::ops::Range<usize>) {
        self.memo.retain(|p| visible.contains(p));
    }

    pub fn renders(&self) -> u64 {
        self.memo.computes()
    }

    pub fn clear(&mut self) {
        self.memo.clear();
    }
}
