use super::column::Column;
use super::memo::ByPtr;
use super::memo::Memo;
use super::selection::CheckState;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui_recordtable_core::render;
use ratatui_recordtable_core::theme::Theme;
use std::sync::Arc;

/// Width of the leading selection cell: a three-column box and one column of gap.
pub const CHECKBOX_WIDTH: u16 = 4;

pub fn checkbox_symbol(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Checked => "[x]",
        CheckState::Indeterminate => "[-]",
    }
}

/// Lays `cells` out at `widths` with a one-column gap between cells.
pub(crate) fn join_cells(
    leading: Option<Span<'static>>,
    columns: &[Column],
    widths: &[u16],
    mut cell: impl FnMut(&Column) -> Vec<Span<'static>>,
) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if let Some(leading) = leading {
        spans.push(leading);
        spans.push(Span::raw(" "));
    }
    for (i, (col, width)) in columns.iter().zip(widths).enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.extend(render::align_spans(&cell(col), *width as usize, col.align));
    }
    spans
}

/// Builds the header line: optional select-all box, then one label per column.
pub fn header_line(
    columns: &[Column],
    widths: &[u16],
    selectable: bool,
    check: CheckState,
    theme: &Theme,
) -> Line<'static> {
    let leading = selectable.then(|| {
        let style = if check == CheckState::Unchecked {
            Style::default()
        } else {
            theme.accent
        };
        Span::styled(checkbox_symbol(check), style)
    });
    let spans = join_cells(leading, columns, widths, |col| vec![Span::raw(col.label.clone())]);
    Line::from(spans).style(theme.text_primary.patch(theme.header))
}

#[derive(PartialEq)]
struct HeaderKey {
    columns: ByPtr<[Column]>,
    widths: Vec<u16>,
    selectable: bool,
    check: CheckState,
    theme: Theme,
}

/// Inputs of one header render.
pub struct HeaderProps<'a> {
    pub columns: &'a Arc<[Column]>,
    pub widths: &'a [u16],
    pub selectable: bool,
    pub check: CheckState,
    pub theme: &'a Theme,
}

/// The header row, rebuilt only when its props change.
#[derive(Default)]
pub struct HeaderView {
    memo: Memo<HeaderKey, Line<'static>>,
}

impl HeaderView {
    pub fn line(&mut self, props: HeaderProps<'_>) -> &Line<'static> {
        let key = HeaderKey {
            columns: ByPtr::from(props.columns),
            widths: props.widths.to_vec(),
            selectable: props.selectable,
            check: props.check,
            theme: props.theme.clone(),
        };
        self.memo.get_or_compute(key, || {
            header_line(
                props.columns,
                props.widths,
                props.selectable,
                props.check,
                props.theme,
            )
        })
    }

    pub fn renders(&self) -> u64 {
        self.memo.computes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Alignment;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn columns() -> Arc<[Column]> {
        vec![
            Column::new("name", "Name", 6),
            Column::new("qty", "Qty", 5).align(Alignment::Right),
        ]
        .into()
    }

    #[test]
    fn header_lays_out_labels_with_checkbox() {
        let cols = columns();
        let line = header_line(&cols, &[6, 5], true, CheckState::Indeterminate, &Theme::default());
        assert_eq!(text(&line), "[-] Name     Qty");
    }

    #[test]
    fn header_without_selection_has_no_checkbox() {
        let cols = columns();
        let line = header_line(&cols, &[6, 5], false, CheckState::Unchecked, &Theme::default());
        assert_eq!(text(&line), "Name     Qty");
    }

    #[test]
    fn header_view_memoizes_on_props() {
        let cols = columns();
        let theme = Theme::default();
        let mut view = HeaderView::default();
        let props = |check| HeaderProps {
            columns: &cols,
            widths: &[6, 5],
            selectable: true,
            check,
            theme: &theme,
        };
        view.line(props(CheckState::Unchecked));
        view.line(props(CheckState::Unchecked));
        assert_eq!(view.renders(), 1);
        let line = view.line(props(CheckState::Checked));
        assert!(text(line).starts_with("[x]"));
        assert_eq!(view.renders(), 2);
    }
}
