use super::row::Row;
use super::row::cell_text;
use ratatui::layout::Alignment;
use ratatui::text::Line;
use ratatui::text::Span;
use serde::Deserialize;
use std::sync::Arc;

/// Custom cell content. Receives the row and its absolute index in the row set.
pub type CellRenderer = Arc<dyn Fn(&Row, usize) -> Line<'static> + Send + Sync>;

/// An ordered field/renderer pairing that produces one cell per row.
#[derive(Clone)]
pub struct Column {
    /// Field looked up in each row for the default cell text.
    pub id: String,
    pub label: String,
    /// Preferred width in terminal columns.
    pub width: u16,
    /// How far the column may shrink when the table is narrower than the preferred widths.
    /// `None` means the column never shrinks.
    pub min_width: Option<u16>,
    pub align: Alignment,
    pub render: Option<CellRenderer>,
    /// Cells of this column handle their own clicks: a click emits
    /// [`TableAction::CellClicked`](super::view::TableAction::CellClicked) and does not toggle
    /// the row.
    pub interactive: bool,
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("width", &self.width)
            .field("min_width", &self.min_width)
            .field("align", &self.align)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .field("interactive", &self.interactive)
            .finish()
    }
}

impl Column {
    pub fn new(id: impl Into<String>, label: impl Into<String>, width: u16) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            width,
            min_width: None,
            align: Alignment::Left,
            render: None,
            interactive: false,
        }
    }

    pub fn min_width(mut self, min_width: u16) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn render(mut self, f: impl Fn(&Row, usize) -> Line<'static> + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Cell content for `row`: the custom renderer when present, otherwise the row's field text.
    pub fn cell(&self, row: &Row, index: usize) -> Vec<Span<'static>> {
        match &self.render {
            Some(render) => render(row, index).spans,
            None => vec![Span::raw(cell_text(row.get(&self.id)))],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl From<ColumnAlign> for Alignment {
    fn from(value: ColumnAlign) -> Self {
        match value {
            ColumnAlign::Left => Alignment::Left,
            ColumnAlign::Center => Alignment::Center,
            ColumnAlign::Right => Alignment::Right,
        }
    }
}

/// Declarative column description, as found in a table config file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ColumnSpec {
    pub id: String,
    pub label: String,
    pub width: u16,
    #[serde(default)]
    pub min_width: Option<u16>,
    #[serde(default)]
    pub align: ColumnAlign,
    #[serde(default)]
    pub interactive: bool,
}

impl From<&ColumnSpec> for Column {
    fn from(spec: &ColumnSpec) -> Self {
        Self {
            id: spec.id.clone(),
            label: spec.label.clone(),
            width: spec.width,
            min_width: spec.min_width,
            align: spec.align.into(),
            render: None,
            interactive: spec.interactive,
        }
    }
}

/// Fits the preferred column widths into `available` columns, leaving one column of gap after
/// every column but the last.
///
/// Columns shrink from the right, each no further than its `min_width`. Whatever still does not
/// fit is clipped at render time.
pub fn column_widths(columns: &[Column], available: u16) -> Vec<u16> {
    let mut widths: Vec<u16> = columns.iter().map(|c| c.width).collect();
    let gaps = columns.len().saturating_sub(1);
    let wanted: usize = widths.iter().map(|w| *w as usize).sum::<usize>() + gaps;
    let mut overflow = wanted.saturating_sub(available as usize);

    for (i, col) in columns.iter().enumerate().rev() {
        if overflow == 0 {
            break;
        }
        let Some(min) = col.min_width else {
            continue;
        };
        let slack = widths[i].saturating_sub(min) as usize;
        let cut = slack.min(overflow);
        widths[i] -= cut as u16;
        overflow -= cut;
    }
    widths
}
