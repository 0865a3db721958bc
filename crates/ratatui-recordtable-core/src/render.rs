use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;

use crate::viewport::ViewportState;

const TAB_COLS: usize = 4;
const ELLIPSIS: char = '…';

fn char_cols(ch: char) -> usize {
    if ch == '\t' {
        TAB_COLS
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(0)
    }
}

/// Display width of `input` in terminal columns. Tabs count as four columns.
pub fn str_width(input: &str) -> usize {
    input.chars().map(char_cols).sum()
}

pub fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|s| str_width(s.content.as_ref())).sum()
}

/// Draws `spans` starting at `(x, y)`, never writing more than `max_cols` columns.
///
/// Unstyled spans take `fallback_style`. A wide character that would straddle the limit is
/// dropped instead of half-drawn. Returns the number of columns written.
pub fn render_spans_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    spans: &[Span<'_>],
    fallback_style: Style,
) -> u16 {
    let max_cols = max_cols as usize;
    let mut out_cols = 0usize;
    let mut tmp = [0u8; 4];

    for span in spans {
        let style = if span.style == Style::default() {
            fallback_style
        } else {
            fallback_style.patch(span.style)
        };
        for ch in span.content.chars() {
            if ch == '\t' {
                for _ in 0..TAB_COLS {
                    if out_cols + 1 > max_cols {
                        return out_cols as u16;
                    }
                    if let Some(cell) = buf.cell_mut((x + out_cols as u16, y)) {
                        cell.set_style(style);
                        cell.set_symbol(" ");
                    }
                    out_cols += 1;
                }
                continue;
            }

            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if w == 0 {
                continue;
            }
            if out_cols + w > max_cols {
                return out_cols as u16;
            }

            let s = ch.encode_utf8(&mut tmp);
            if let Some(cell) = buf.cell_mut((x + out_cols as u16, y)) {
                cell.set_style(style);
                cell.set_symbol(s);
            }
            out_cols += 1;

            if w == 2 {
                if let Some(cell) = buf.cell_mut((x + out_cols as u16, y)) {
                    cell.set_style(style);
                    cell.set_symbol("");
                }
                out_cols += 1;
            }
        }
    }

    out_cols as u16
}

/// Cuts `spans` down to at most `max_cols` columns, ending in `…` when something was cut.
pub fn truncate_spans(spans: &[Span<'static>], max_cols: usize) -> Vec<Span<'static>> {
    if spans_width(spans) <= max_cols {
        return spans.to_vec();
    }
    if max_cols == 0 {
        return Vec::new();
    }

    let budget = max_cols - 1;
    let mut used = 0usize;
    let mut out: Vec<Span<'static>> = Vec::new();
    'outer: for span in spans {
        let mut kept = String::new();
        for ch in span.content.chars() {
            let w = char_cols(ch);
            if used + w > budget {
                if !kept.is_empty() {
                    out.push(Span::styled(kept, span.style));
                }
                out.push(Span::styled(ELLIPSIS.to_string(), span.style));
                break 'outer;
            }
            kept.push(ch);
            used += w;
        }
        if !kept.is_empty() {
            out.push(Span::styled(kept, span.style));
        }
    }
    out
}

/// Fits `spans` into exactly `width` columns: truncated when too long, padded according to
/// `alignment` when too short.
pub fn align_spans(
    spans: &[Span<'static>],
    width: usize,
    alignment: Alignment,
) -> Vec<Span<'static>> {
    let mut out = truncate_spans(spans, width);
    let used = spans_width(&out);
    let slack = width.saturating_sub(used);
    if slack == 0 {
        return out;
    }

    let (left, right) = match alignment {
        Alignment::Left => (0, slack),
        Alignment::Right => (slack, 0),
        Alignment::Center => (slack / 2, slack - slack / 2),
    };
    if left > 0 {
        out.insert(0, Span::raw(" ".repeat(left)));
    }
    if right > 0 {
        out.push(Span::raw(" ".repeat(right)));
    }
    out
}

/// Draws a one-column vertical scrollbar for `state` into `area`.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 || area.width == 0 {
        return;
    }
    if !state.is_scrollable() {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((state.viewport_h as f64 / state.content_h as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;

    let max_y = state.max_y().max(1) as f64;
    let thumb_top = ((state.y as f64 / max_y) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            "│"
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn text(spans: &[Span<'static>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn row_text(buf: &Buffer, y: u16, w: u16) -> String {
        (0..w)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn width_counts_wide_chars_and_tabs() {
        assert_eq!(str_width("abc"), 3);
        assert_eq!(str_width("你好"), 4);
        assert_eq!(str_width("\tx"), 5);
    }

    #[test]
    fn render_spans_clipped_stops_at_limit() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        let spans = vec![Span::raw("abc"), Span::raw("defgh")];
        let used = render_spans_clipped(0, 0, 4, &mut buf, &spans, Style::default());
        assert_eq!(used, 4);
        assert_eq!(row_text(&buf, 0, 6), "abcd  ");
    }

    #[test]
    fn render_spans_clipped_drops_straddling_wide_char() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        let spans = vec![Span::raw("a你好")];
        let used = render_spans_clipped(0, 0, 4, &mut buf, &spans, Style::default());
        assert_eq!(used, 3);
    }

    #[test]
    fn truncate_appends_ellipsis() {
        let spans = vec![Span::raw("hello world")];
        assert_eq!(text(&truncate_spans(&spans, 5)), "hell…");
        assert_eq!(text(&truncate_spans(&spans, 11)), "hello world");
        assert!(truncate_spans(&spans, 0).is_empty());
    }

    #[test]
    fn align_pads_to_exact_width() {
        let spans = vec![Span::raw("ab")];
        assert_eq!(text(&align_spans(&spans, 5, Alignment::Left)), "ab   ");
        assert_eq!(text(&align_spans(&spans, 5, Alignment::Right)), "   ab");
        assert_eq!(text(&align_spans(&spans, 5, Alignment::Center)), " ab  ");
    }

    #[test]
    fn render_scrollbar_does_not_panic() {
        let mut state = ViewportState::default();
        state.set_viewport(5);
        state.set_content(50);
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 5));
        render_scrollbar(Rect::new(0, 0, 1, 5), &mut buf, &state, Style::default());
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "█");
    }
}
