use super::bindings::TableBindings;
use super::bindings::TableCommand;
use super::column::column_widths;
use super::header::CHECKBOX_WIDTH;
use super::header::HeaderProps;
use super::header::HeaderView;
use super::identity::IdField;
use super::identity::RowIdentityResolver;
use super::identity::default_id_fields;
use super::layout;
use super::layout::LayoutInput;
use super::pagination::DEFAULT_PAGE_SIZE_OPTIONS;
use super::pagination::PagerModel;
use super::props::SelectionHandler;
use super::props::TableProps;
use super::props::TableStatus;
use super::row::Row;
use super::row::RowId;
use super::row_view::CellSpan;
use super::row_view::RowProps;
use super::row_view::RowViews;
use super::row_view::cell_spans;
use super::selection;
use super::selection::CheckState;
use super::selection::SelectionChange;
use super::selection::SelectionInput;
use super::selection::SelectionModel;
use super::selection::SelectionSet;
use super::selection::SelectionSummary;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui_recordtable_core::input::InputEvent;
use ratatui_recordtable_core::input::KeyEvent;
use ratatui_recordtable_core::input::MouseEvent;
use ratatui_recordtable_core::input::MouseEventKind;
use ratatui_recordtable_core::render;
use ratatui_recordtable_core::theme::Theme;
use ratatui_recordtable_core::viewport::ViewportState;
use std::ops::Range;
use std::sync::Arc;

pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";
pub const DEFAULT_EMPTY_PAGE_MESSAGE: &str = "No rows on this page";
pub const DEFAULT_LOADING_MESSAGE: &str = "Loading…";

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const WHEEL_STEP: i32 = 3;

/// What an input event asked for.
///
/// Requests have already been delivered to the matching handler in [`TableProps`] when this is
/// returned; the table itself never applies them.
#[derive(Clone, Debug, PartialEq)]
pub enum TableAction {
    None,
    Redraw,
    SelectionRequested(SelectionChange),
    PageRequested(usize),
    PageSizeRequested(usize),
    Activated { id: RowId, index: usize },
    CellClicked { id: RowId, index: usize, column: String },
}

/// Options for [`RecordTable`].
#[derive(Clone, Debug)]
pub struct RecordTableOptions {
    pub header_height: u16,
    pub footer_height: u16,
    pub row_height: u16,
    pub show_scrollbar: bool,
    /// Offered in the pager when a page-size handler is wired.
    pub page_size_options: Vec<usize>,
    pub empty_message: String,
    pub empty_page_message: String,
    pub loading_message: String,
    /// Id-shaped fields probed when no explicit row id accessor is given.
    pub id_fields: Arc<[IdField]>,
    pub bindings: TableBindings,
}

impl Default for RecordTableOptions {
    fn default() -> Self {
        Self {
            header_height: 1,
            footer_height: 1,
            row_height: 1,
            show_scrollbar: true,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            empty_page_message: DEFAULT_EMPTY_PAGE_MESSAGE.to_string(),
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
            id_fields: default_id_fields().into(),
            bindings: TableBindings::default(),
        }
    }
}

/// Screen regions from the last render, for mouse hit-testing.
#[derive(Clone, Debug, Default)]
struct HitMap {
    header_checkbox: Option<Rect>,
    rows_area: Option<Rect>,
    rows: Vec<(Rect, usize)>,
    cells: Vec<CellSpan>,
    selectable: bool,
    previous: Option<Rect>,
    next: Option<Rect>,
    page_sizes: Vec<(Rect, usize)>,
}

/// Where the current page sits in the row set.
struct PageFrame {
    window: Range<usize>,
    start_index: usize,
    /// Positional-id base of `props.rows[0]`.
    selection_base: usize,
    /// Absolute index of the first displayed row.
    index_base: usize,
}

impl PageFrame {
    fn of(props: &TableProps) -> Self {
        let pagination = &props.pagination;
        let window = pagination.window(props.rows.len());
        let start_index = pagination.start_index();
        let (selection_base, index_base) = if pagination.is_server_side() {
            (start_index, start_index)
        } else {
            (0, window.start)
        };
        Self {
            window,
            start_index,
            selection_base,
            index_base,
        }
    }

    fn len(&self) -> usize {
        self.window.len()
    }

    fn absolute(&self, position: usize) -> usize {
        self.index_base + position
    }

    fn row<'a>(&self, props: &'a TableProps, position: usize) -> Option<&'a Row> {
        if position >= self.len() {
            return None;
        }
        props.rows.get(self.window.start + position)
    }
}

/// A paginated, selectable record table.
///
/// The table is a controlled view: rows, columns, selection and paging all come from
/// [`TableProps`] on every call, and changes are only requested through the props' handlers.
/// What the table keeps between calls is view-local (cursor, scroll offset, the last frame's hit
/// regions) plus memoized derivations keyed on the identity of its inputs.
///
/// Drive it from your app loop: call [`render`](Self::render) each frame and feed input to
/// [`handle_event`](Self::handle_event) with the same props.
pub struct RecordTable {
    pub viewport: ViewportState,
    options: RecordTableOptions,
    cursor: Option<usize>,
    selection: SelectionModel,
    header: HeaderView,
    rows: RowViews,
    hits: HitMap,
    status: Option<TableStatus>,
    page_key: Option<(usize, usize, bool)>,
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::with_options(RecordTableOptions::default())
    }
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RecordTableOptions) -> Self {
        Self {
            viewport: ViewportState::default(),
            options,
            cursor: None,
            selection: SelectionModel::default(),
            header: HeaderView::default(),
            rows: RowViews::default(),
            hits: HitMap::default(),
            status: None,
            page_key: None,
        }
    }

    pub fn options(&self) -> &RecordTableOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RecordTableOptions) {
        self.options = options;
        self.selection = SelectionModel::default();
        self.header = HeaderView::default();
        self.rows.clear();
    }

    /// Cursor position within the current page.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = cursor;
        self.ensure_cursor_visible();
    }

    /// Status chosen by the last render.
    pub fn status(&self) -> Option<TableStatus> {
        self.status
    }

    pub fn selection_derivations(&self) -> u64 {
        self.selection.derivations()
    }

    pub fn header_renders(&self) -> u64 {
        self.header.renders()
    }

    pub fn row_renders(&self) -> u64 {
        self.rows.renders()
    }

    pub fn resolver(&self, props: &TableProps) -> RowIdentityResolver {
        RowIdentityResolver::new(props.get_row_id.clone(), self.options.id_fields.clone())
    }

    /// Selection counts over the rows select-all would cover.
    pub fn selection_summary(&mut self, props: &TableProps) -> SelectionSummary {
        let frame = PageFrame::of(props);
        self.summary(props, &frame).clone()
    }

    fn summary(&mut self, props: &TableProps, frame: &PageFrame) -> &SelectionSummary {
        let resolver = self.resolver(props);
        self.selection.summary(SelectionInput {
            rows: &props.rows,
            base_index: frame.selection_base,
            resolver: &resolver,
            disabled: props.is_row_disabled.as_ref(),
            selected: &props.selected_ids,
        })
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme, props: &TableProps) {
        self.hits = HitMap::default();
        let status = TableStatus::of(props);
        if self.status != Some(status) {
            log::debug!("record table status {:?} -> {:?}", self.status, status);
            self.status = Some(status);
        }
        if area.width == 0 || area.height == 0 {
            return;
        }

        match status {
            TableStatus::Loading => {
                let frame = SPINNER_FRAMES[(props.spinner_tick % SPINNER_FRAMES.len() as u64) as usize];
                let text = format!("{frame} {}", self.options.loading_message);
                render_message(area, buf, &text, theme.accent);
            }
            TableStatus::Error => {
                let text = format!("Error: {}", props.error.as_deref().unwrap_or_default());
                render_message(area, buf, &text, theme.danger);
            }
            TableStatus::Empty => {
                let text = props
                    .empty_message
                    .as_deref()
                    .unwrap_or(&self.options.empty_message);
                render_message(area, buf, text, theme.text_muted);
            }
            TableStatus::Populated => self.render_populated(area, buf, theme, props),
        }
        if status != TableStatus::Populated {
            self.rows.clear();
        }
    }

    fn render_populated(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme, props: &TableProps) {
        let frame = PageFrame::of(props);
        self.sync_page(&frame, props);
        let resolver = self.resolver(props);

        let row_h = self.options.row_height.max(1);
        let header_h = self.options.header_height.min(area.height);
        // An empty page still gets one line for its placeholder.
        let slots = frame.len().max(1);
        let alloc = layout::allocate(LayoutInput {
            container_height: props.height.min(area.height) as u32,
            header_height: header_h as u32,
            footer_height: self.options.footer_height as u32,
            row_height: row_h as u32,
            visible_row_count: slots,
        });

        let total_h = alloc.total_height.min(area.height as u32) as u16;
        let area = Rect::new(area.x, area.y, area.width, total_h);
        let header_area = Rect::new(area.x, area.y, area.width, header_h.min(total_h));
        let rows_h = (alloc.rows_region_height as u16).min(total_h - header_area.height);
        let rows_area = Rect::new(area.x, header_area.bottom(), area.width, rows_h);
        let footer_area = Rect::new(
            area.x,
            rows_area.bottom(),
            area.width,
            total_h - header_area.height - rows_h,
        );
        buf.set_style(area, theme.text_primary);

        let (content_w, scrollbar_x) =
            if alloc.should_scroll && self.options.show_scrollbar && area.width >= 2 {
                (area.width - 1, Some(area.right() - 1))
            } else {
                (area.width, None)
            };
        let leading = if props.selectable { CHECKBOX_WIDTH } else { 0 };
        let widths = column_widths(&props.columns, content_w.saturating_sub(leading));

        let check = if props.selectable {
            self.summary(props, &frame).check_state()
        } else {
            CheckState::Unchecked
        };

        if header_area.height > 0 {
            let line = self.header.line(HeaderProps {
                columns: &props.columns,
                widths: &widths,
                selectable: props.selectable,
                check,
                theme,
            });
            buf.set_style(header_area, line.style);
            render::render_spans_clipped(
                header_area.x,
                header_area.y,
                content_w,
                buf,
                &line.spans,
                line.style,
            );
            if props.selectable {
                self.hits.header_checkbox =
                    Some(Rect::new(header_area.x, header_area.y, 3.min(content_w), 1));
            }
        }

        self.viewport.set_viewport(rows_h);
        self.viewport
            .set_content((frame.len() as u32).saturating_mul(row_h as u32));
        self.cursor = clamp_cursor(self.cursor, frame.len());
        self.hits.rows_area = Some(rows_area);
        self.hits.cells = cell_spans(&widths, props.selectable);
        self.hits.selectable = props.selectable;

        if frame.len() == 0 {
            self.rows.clear();
            render_message(rows_area, buf, &self.options.empty_page_message, theme.text_muted);
        } else {
            let scroll_y = self.viewport.y;
            let first = (scroll_y / row_h as u32) as usize;
            let last = ((scroll_y + rows_h as u32).div_ceil(row_h as u32) as usize).min(frame.len());
            for position in first..last {
                let top = (position as u32 * row_h as u32) as i64 - scroll_y as i64;
                if top < 0 || top >= rows_h as i64 {
                    continue;
                }
                let Some(row) = frame.row(props, position) else {
                    continue;
                };
                let index = frame.absolute(position);
                let selected = props.selectable
                    && selection::is_row_selected(&resolver, row, index, &props.selected_ids);
                let y = rows_area.y + top as u16;
                let line = self.rows.line(
                    position,
                    &props.rows,
                    RowProps {
                        row,
                        index,
                        columns: &props.columns,
                        widths: &widths,
                        selectable: props.selectable,
                        selected,
                        disabled: props.is_row_disabled_at(row),
                        cursor: self.cursor == Some(position),
                        theme,
                    },
                );
                let row_rect = Rect::new(rows_area.x, y, content_w, row_h.min(rows_area.bottom() - y));
                buf.set_style(row_rect, line.style);
                render::render_spans_clipped(rows_area.x, y, content_w, buf, &line.spans, line.style);
                self.hits.rows.push((row_rect, position));
            }
            self.rows.retain_visible(first..last);
        }

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, rows_area.y, 1, rows_area.height),
                buf,
                &self.viewport,
                theme.scrollbar,
            );
        }

        if footer_area.height > 0 {
            self.render_pager(footer_area, buf, theme, props, &frame);
        }
    }

    fn render_pager(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        props: &TableProps,
        frame: &PageFrame,
    ) {
        let size_options = props
            .on_page_size_change
            .as_ref()
            .map(|_| self.options.page_size_options.as_slice());
        let model = PagerModel::new(&props.pagination, props.rows.len(), frame.len(), size_options);
        let nav_wired = props.on_page_change.is_some();
        let arrow = |enabled: bool| {
            if enabled && nav_wired {
                theme.accent
            } else {
                theme.text_muted
            }
        };

        let mut cursor = PagerCursor {
            x: area.x,
            y: area.y,
            right: area.right(),
        };
        buf.set_style(area, theme.text_muted);

        let prev = cursor.put(buf, "‹", arrow(model.has_previous));
        cursor.put(
            buf,
            &format!(" Page {} of {} ", model.page + 1, model.page_count),
            theme.text_primary,
        );
        let next = cursor.put(buf, "›", arrow(model.has_next));
        if model.has_previous && nav_wired {
            self.hits.previous = prev;
        }
        if model.has_next && nav_wired {
            self.hits.next = next;
        }

        let range = if model.last_row == 0 {
            format!("   0 of {}", model.total)
        } else {
            format!("   {}–{} of {}", model.first_row, model.last_row, model.total)
        };
        cursor.put(buf, &range, theme.text_muted);

        if !model.page_size_options.is_empty() {
            cursor.put(buf, "   Rows:", theme.text_muted);
            for size in &model.page_size_options {
                cursor.put(buf, " ", theme.text_muted);
                let (label, style) = if *size == model.page_size {
                    (format!("[{size}]"), theme.accent)
                } else {
                    (size.to_string(), theme.text_primary)
                };
                if let Some(rect) = cursor.put(buf, &label, style) {
                    self.hits.page_sizes.push((rect, *size));
                }
            }
        }
    }

    /// Handles one input event against the same props as the last render.
    pub fn handle_event(&mut self, event: InputEvent, props: &TableProps) -> TableAction {
        if TableStatus::of(props) != TableStatus::Populated {
            return TableAction::None;
        }
        let frame = PageFrame::of(props);
        self.sync_page(&frame, props);
        match event {
            InputEvent::Key(key) => self.handle_key(&key, props, &frame),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse, props, &frame),
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, props: &TableProps, frame: &PageFrame) -> TableAction {
        let Some(command) = self.options.bindings.command_for(key) else {
            return TableAction::None;
        };
        let len = frame.len();

        match command {
            TableCommand::Up => self.move_cursor(-1, len),
            TableCommand::Down => self.move_cursor(1, len),
            TableCommand::PageUp => self.page_cursor(false, len),
            TableCommand::PageDown => self.page_cursor(true, len),
            TableCommand::Top => self.edge_cursor(false, len),
            TableCommand::Bottom => self.edge_cursor(true, len),
            TableCommand::ToggleRow => match self.cursor {
                Some(position) => self.request_row_toggle(props, frame, position),
                None => TableAction::None,
            },
            TableCommand::ToggleAll => self.request_toggle_all(props, frame),
            TableCommand::NextPage => {
                request_page(props, props.pagination.next_page(props.rows.len()))
            }
            TableCommand::PreviousPage => {
                request_page(props, props.pagination.previous_page(props.rows.len()))
            }
            TableCommand::LargerPageSize => self.request_page_size_step(props, frame, 1),
            TableCommand::SmallerPageSize => self.request_page_size_step(props, frame, -1),
            TableCommand::Activate => {
                let Some(position) = self.cursor else {
                    return TableAction::None;
                };
                let Some(row) = frame.row(props, position) else {
                    return TableAction::None;
                };
                let index = frame.absolute(position);
                let id = self.resolver(props).resolve(row, Some(index));
                TableAction::Activated { id, index }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, props: &TableProps, frame: &PageFrame) -> TableAction {
        let pos = Position::new(mouse.x, mouse.y);
        match mouse.kind {
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if !self.hits.rows_area.is_some_and(|r| r.contains(pos)) {
                    return TableAction::None;
                }
                let before = self.viewport.y;
                let delta = if mouse.kind == MouseEventKind::ScrollUp {
                    -WHEEL_STEP
                } else {
                    WHEEL_STEP
                };
                self.viewport.scroll_y_by(delta);
                if self.viewport.y == before {
                    TableAction::None
                } else {
                    TableAction::Redraw
                }
            }
            _ if mouse.is_left_down() => self.handle_click(pos, props, frame),
            _ => TableAction::None,
        }
    }

    fn handle_click(&mut self, pos: Position, props: &TableProps, frame: &PageFrame) -> TableAction {
        if self.hits.header_checkbox.is_some_and(|r| r.contains(pos)) {
            return self.request_toggle_all(props, frame);
        }
        if self.hits.previous.is_some_and(|r| r.contains(pos)) {
            return request_page(props, props.pagination.previous_page(props.rows.len()));
        }
        if self.hits.next.is_some_and(|r| r.contains(pos)) {
            return request_page(props, props.pagination.next_page(props.rows.len()));
        }
        if let Some((_, size)) = self.hits.page_sizes.iter().find(|(r, _)| r.contains(pos)) {
            return request_page_size(props, *size);
        }

        let Some((rect, position)) = self.hits.rows.iter().find(|(r, _)| r.contains(pos)).copied()
        else {
            return TableAction::None;
        };
        self.cursor = Some(position);
        let rel_x = pos.x - rect.x;

        if !(self.hits.selectable && rel_x < CHECKBOX_WIDTH) {
            let clicked = self
                .hits
                .cells
                .iter()
                .find(|c| rel_x >= c.x && rel_x < c.x.saturating_add(c.width))
                .and_then(|c| props.columns.get(c.column));
            if let Some(column) = clicked.filter(|c| c.interactive) {
                let Some(row) = frame.row(props, position) else {
                    return TableAction::Redraw;
                };
                let index = frame.absolute(position);
                return TableAction::CellClicked {
                    id: self.resolver(props).resolve(row, Some(index)),
                    index,
                    column: column.id.clone(),
                };
            }
        }

        match self.request_row_toggle(props, frame, position) {
            TableAction::None => TableAction::Redraw,
            action => action,
        }
    }

    fn move_cursor(&mut self, delta: i64, len: usize) -> TableAction {
        if len == 0 {
            return TableAction::None;
        }
        let next = match self.cursor {
            None if delta < 0 => len - 1,
            None => 0,
            Some(c) => (c as i64 + delta).clamp(0, len as i64 - 1) as usize,
        };
        self.jump_cursor(next, len)
    }

    /// Scrolls one viewport page and moves the cursor by the same number of rows.
    fn page_cursor(&mut self, down: bool, len: usize) -> TableAction {
        if len == 0 {
            return TableAction::None;
        }
        let before = (self.viewport.y, self.cursor);
        if down {
            self.viewport.page_down();
        } else {
            self.viewport.page_up();
        }
        let row_h = self.options.row_height.max(1);
        let step = (self.viewport.viewport_h.saturating_sub(1) / row_h).max(1) as i64;
        let current = self.cursor.unwrap_or(0) as i64;
        let target = if down { current + step } else { current - step };
        self.cursor = Some(target.clamp(0, len as i64 - 1) as usize);
        self.ensure_cursor_visible();
        if (self.viewport.y, self.cursor) == before {
            TableAction::None
        } else {
            TableAction::Redraw
        }
    }

    fn edge_cursor(&mut self, bottom: bool, len: usize) -> TableAction {
        if len == 0 {
            return TableAction::None;
        }
        let before = (self.viewport.y, self.cursor);
        if bottom {
            self.viewport.to_bottom();
            self.cursor = Some(len - 1);
        } else {
            self.viewport.to_top();
            self.cursor = Some(0);
        }
        if (self.viewport.y, self.cursor) == before {
            TableAction::None
        } else {
            TableAction::Redraw
        }
    }

    fn jump_cursor(&mut self, position: usize, len: usize) -> TableAction {
        if len == 0 || self.cursor == Some(position) {
            return TableAction::None;
        }
        self.cursor = Some(position.min(len - 1));
        self.ensure_cursor_visible();
        TableAction::Redraw
    }

    fn ensure_cursor_visible(&mut self) {
        let Some(c) = self.cursor else {
            return;
        };
        let row_h = self.options.row_height.max(1) as u32;
        self.viewport.ensure_visible(c as u32 * row_h, row_h);
    }

    /// Resets cursor and scroll when the displayed page changes.
    fn sync_page(&mut self, frame: &PageFrame, props: &TableProps) {
        let key = (
            frame.start_index,
            props.pagination.page_size,
            props.pagination.is_server_side(),
        );
        if self.page_key != Some(key) {
            if self.page_key.is_some() {
                log::debug!("record table page changed: start index {}", frame.start_index);
            }
            self.page_key = Some(key);
            self.cursor = None;
            self.viewport.to_top();
            self.rows.clear();
        }
    }

    fn request_row_toggle(&self, props: &TableProps, frame: &PageFrame, position: usize) -> TableAction {
        if !props.selectable {
            return TableAction::None;
        }
        let Some(handler) = props.on_selection_change.as_ref() else {
            return TableAction::None;
        };
        let Some(row) = frame.row(props, position) else {
            return TableAction::None;
        };
        if props.is_row_disabled_at(row) {
            return TableAction::None;
        }
        let resolver = self.resolver(props);
        let id = resolver.resolve(row, Some(frame.absolute(position)));
        let on = !props.selected_ids.contains(&id);
        let next = selection::toggle_row(&props.selected_ids, id, on);
        emit_selection(handler, props, frame, &resolver, &next)
    }

    fn request_toggle_all(&mut self, props: &TableProps, frame: &PageFrame) -> TableAction {
        if !props.selectable {
            return TableAction::None;
        }
        let Some(handler) = props.on_selection_change.as_ref() else {
            return TableAction::None;
        };
        let resolver = self.resolver(props);
        let summary = self.summary(props, frame);
        let next = selection::toggle_all(summary, !summary.is_all_selected());
        emit_selection(handler, props, frame, &resolver, &next)
    }

    fn request_page_size_step(&self, props: &TableProps, frame: &PageFrame, step: isize) -> TableAction {
        let model = PagerModel::new(
            &props.pagination,
            props.rows.len(),
            frame.len(),
            Some(&self.options.page_size_options),
        );
        match model.cycle_page_size(step) {
            Some(size) => request_page_size(props, size),
            None => TableAction::None,
        }
    }
}

fn emit_selection(
    handler: &SelectionHandler,
    props: &TableProps,
    frame: &PageFrame,
    resolver: &RowIdentityResolver,
    next: &SelectionSet,
) -> TableAction {
    let change = selection::selection_change(&props.rows, frame.selection_base, resolver, next);
    log::debug!(
        "selection change requested: {} ids ({} loaded rows)",
        change.ids.len(),
        change.rows.len()
    );
    handler(&change.ids, &change.rows);
    TableAction::SelectionRequested(change)
}

fn request_page(props: &TableProps, page: Option<usize>) -> TableAction {
    let Some(handler) = props.on_page_change.as_ref() else {
        return TableAction::None;
    };
    let Some(page) = page else {
        return TableAction::None;
    };
    let count = props.pagination.page_count(props.rows.len());
    if page == 0 || page > count || page == props.pagination.current_page {
        return TableAction::None;
    }
    log::debug!("page change requested: {page} of {count}");
    handler(page);
    TableAction::PageRequested(page)
}

fn request_page_size(props: &TableProps, size: usize) -> TableAction {
    let Some(handler) = props.on_page_size_change.as_ref() else {
        return TableAction::None;
    };
    if size == 0 || size == props.pagination.page_size {
        return TableAction::None;
    }
    log::debug!("page size change requested: {size}");
    handler(size);
    TableAction::PageSizeRequested(size)
}

fn clamp_cursor(cursor: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    cursor.map(|c| c.min(len - 1))
}

/// Draws `text` line by line into `area`, truncating each line to the width.
fn render_message(area: Rect, buf: &mut Buffer, text: &str, style: Style) {
    for (dy, line) in text.lines().take(area.height as usize).enumerate() {
        let spans = render::truncate_spans(&[Span::raw(line.to_string())], area.width as usize);
        render::render_spans_clipped(area.x, area.y + dy as u16, area.width, buf, &spans, style);
    }
}

struct PagerCursor {
    x: u16,
    y: u16,
    right: u16,
}

impl PagerCursor {
    /// Draws `text` at the cursor and returns its rect, or `None` when nothing fit.
    fn put(&mut self, buf: &mut Buffer, text: &str, style: Style) -> Option<Rect> {
        let room = self.right.saturating_sub(self.x);
        if room == 0 {
            return None;
        }
        let w = render::render_spans_clipped(
            self.x,
            self.y,
            room,
            buf,
            &[Span::raw(text.to_string())],
            style,
        );
        if w == 0 {
            return None;
        }
        let rect = Rect::new(self.x, self.y, w, 1);
        self.x += w;
        Some(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::column::Column;
    use crate::table::pagination::PaginationState;
    use crate::table::row::row_from_value;
    use ratatui_recordtable_core::input::KeyCode;
    use serde_json::json;
    use std::sync::Mutex;

    fn rows(n: i64) -> Vec<Row> {
        (1..=n)
            .map(|i| row_from_value(json!({"id": i, "name": format!("item{i}")})))
            .collect()
    }

    fn columns() -> Vec<Column> {
        vec![Column::new("id", "ID", 3), Column::new("name", "Name", 8)]
    }

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn draw(table: &mut RecordTable, props: &TableProps, w: u16, h: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, w, h));
        table.render(Rect::new(0, 0, w, h), &mut buf, &Theme::default(), props);
        buf
    }

    #[test]
    fn few_rows_shrink_the_table() {
        let props = TableProps::new(rows(2), columns());
        let mut t = RecordTable::new();
        let buf = draw(&mut t, &props, 40, 20);
        assert_eq!(line(&buf, 0), "ID  Name");
        assert_eq!(line(&buf, 1), "1   item1");
        assert_eq!(line(&buf, 2), "2   item2");
        assert!(line(&buf, 3).starts_with("‹ Page 1 of 1 ›"));
        assert_eq!(line(&buf, 4), "");
        assert_eq!(t.status(), Some(TableStatus::Populated));
    }

    #[test]
    fn many_rows_scroll_with_scrollbar() {
        let props = TableProps::new(rows(20), columns()).height(6);
        let mut t = RecordTable::new();
        let buf = draw(&mut t, &props, 20, 10);
        assert_eq!(t.viewport.viewport_h, 4);
        assert_eq!(t.viewport.content_h, 20);
        assert_eq!(buf.cell((19, 1)).unwrap().symbol(), "█");
        assert!(line(&buf, 5).starts_with("‹ Page 1 of 1 ›"));

        for _ in 0..6 {
            t.handle_event(InputEvent::key(KeyCode::Down), &props);
        }
        assert_eq!(t.cursor(), Some(5));
        assert_eq!(t.viewport.y, 2);
        let buf = draw(&mut t, &props, 20, 10);
        assert_eq!(line(&buf, 1).trim_end_matches(['│', '█']).trim_end(), "3   item3");
    }

    #[test]
    fn page_keys_scroll_by_viewport_pages() {
        let props = TableProps::new(rows(20), columns()).height(6);
        let mut t = RecordTable::new();
        draw(&mut t, &props, 20, 10);

        let page_down = InputEvent::key(KeyCode::PageDown);
        assert_eq!(t.handle_event(page_down.clone(), &props), TableAction::Redraw);
        assert_eq!((t.viewport.y, t.cursor()), (3, Some(3)));
        t.handle_event(page_down, &props);
        assert_eq!((t.viewport.y, t.cursor()), (6, Some(6)));
        t.handle_event(InputEvent::key(KeyCode::PageUp), &props);
        assert_eq!((t.viewport.y, t.cursor()), (3, Some(3)));

        t.handle_event(InputEvent::key(KeyCode::End), &props);
        assert_eq!((t.viewport.y, t.cursor()), (16, Some(19)));
        assert_eq!(t.viewport.percent_y(), Some(100));
        assert_eq!(t.handle_event(InputEvent::key(KeyCode::End), &props), TableAction::None);
        t.handle_event(InputEvent::key(KeyCode::Home), &props);
        assert_eq!((t.viewport.y, t.cursor()), (0, Some(0)));
    }

    #[test]
    fn identical_props_reuse_memoized_work() {
        let props = TableProps::new(rows(3), columns()).selectable(true);
        let mut t = RecordTable::new();
        draw(&mut t, &props, 30, 10);
        draw(&mut t, &props, 30, 10);
        assert_eq!(t.selection_derivations(), 1);
        assert_eq!(t.header_renders(), 1);
        assert_eq!(t.row_renders(), 3);

        let selected = Arc::new([RowId::Number(2)].into_iter().collect::<SelectionSet>());
        let props = props.selected_ids(selected);
        draw(&mut t, &props, 30, 10);
        assert_eq!(t.selection_derivations(), 2);
        assert_eq!(t.header_renders(), 2);
        // only row 2 changed
        assert_eq!(t.row_renders(), 4);
    }

    #[test]
    fn space_toggles_cursor_row_through_handler() {
        let seen: Arc<Mutex<Vec<Vec<RowId>>>> = Arc::default();
        let sink = seen.clone();
        let props = TableProps::new(rows(3), columns())
            .selectable(true)
            .on_selection_change(move |ids, _| sink.lock().unwrap().push(ids.to_vec()));
        let mut t = RecordTable::new();
        draw(&mut t, &props, 30, 10);
        t.handle_event(InputEvent::key(KeyCode::Down), &props);
        let action = t.handle_event(InputEvent::key(KeyCode::Char(' ')), &props);
        assert!(matches!(action, TableAction::SelectionRequested(_)));
        assert_eq!(*seen.lock().unwrap(), vec![vec![RowId::Number(1)]]);
    }

    #[test]
    fn no_handler_means_no_toggle() {
        let props = TableProps::new(rows(3), columns()).selectable(true);
        let mut t = RecordTable::new();
        let _ = draw(&mut t, &props, 30, 10);
        assert_eq!(t.handle_event(InputEvent::click(6, 1), &props), TableAction::Redraw);
        assert_eq!(t.cursor(), Some(0));
    }

    #[test]
    fn interactive_cells_do_not_toggle() {
        let columns = vec![
            Column::new("id", "ID", 3),
            Column::new("name", "Name", 8).interactive(),
        ];
        let props = TableProps::new(rows(2), columns)
            .selectable(true)
            .on_selection_change(|_, _| panic!("cell click must not toggle"));
        let mut t = RecordTable::new();
        draw(&mut t, &props, 30, 10);
        // checkbox 0..4, id 4..7, gap, name 8..16
        let action = t.handle_event(InputEvent::click(9, 2), &props);
        assert_eq!(
            action,
            TableAction::CellClicked {
                id: RowId::Number(2),
                index: 1,
                column: "name".into(),
            }
        );
    }

    #[test]
    fn pager_arrows_request_pages() {
        let pages: Arc<Mutex<Vec<usize>>> = Arc::default();
        let sink = pages.clone();
        let props = TableProps::new(rows(5), columns())
            .pagination(PaginationState::new(2, 2))
            .on_page_change(move |p| sink.lock().unwrap().push(p));
        let mut t = RecordTable::new();
        let buf = draw(&mut t, &props, 40, 10);
        assert_eq!(line(&buf, 1), "3   item3");
        assert!(line(&buf, 3).starts_with("‹ Page 2 of 3 ›   3–4 of 5"));

        assert_eq!(t.handle_event(InputEvent::click(0, 3), &props), TableAction::PageRequested(1));
        assert_eq!(t.handle_event(InputEvent::click(14, 3), &props), TableAction::PageRequested(3));
        assert_eq!(
            t.handle_event(InputEvent::key(KeyCode::Char(']')), &props),
            TableAction::PageRequested(3)
        );
        assert_eq!(*pages.lock().unwrap(), vec![1, 3, 3]);
    }

    #[test]
    fn page_size_choices_need_a_handler() {
        let props = TableProps::new(rows(5), columns());
        let mut t = RecordTable::new();
        let buf = draw(&mut t, &props, 80, 10);
        assert!(!line(&buf, 6).contains("Rows:"));

        let sizes: Arc<Mutex<Vec<usize>>> = Arc::default();
        let sink = sizes.clone();
        let props = props.on_page_size_change(move |s| sink.lock().unwrap().push(s));
        let buf = draw(&mut t, &props, 80, 10);
        let pager = line(&buf, 6);
        assert!(pager.ends_with("Rows: 25 50 [100] 250"), "{pager}");
        let x = pager[..pager.find("50 [").unwrap()].chars().count() as u16;
        assert_eq!(t.handle_event(InputEvent::click(x, 6), &props), TableAction::PageSizeRequested(50));
        assert_eq!(
            t.handle_event(InputEvent::key(KeyCode::Char('+')), &props),
            TableAction::PageSizeRequested(250)
        );
        assert_eq!(*sizes.lock().unwrap(), vec![50, 250]);
    }

    #[test]
    fn empty_page_keeps_header_and_pager() {
        let props = TableProps::new(rows(3), columns()).pagination(PaginationState::new(2, 5));
        let mut t = RecordTable::new();
        let buf = draw(&mut t, &props, 40, 10);
        assert_eq!(line(&buf, 0), "ID  Name");
        assert_eq!(line(&buf, 1), DEFAULT_EMPTY_PAGE_MESSAGE);
        assert!(line(&buf, 2).starts_with("‹ Page 5 of 2 ›   0 of 3"));
    }

    #[test]
    fn page_past_the_end_navigates_back() {
        let pages: Arc<Mutex<Vec<usize>>> = Arc::default();
        let sink = pages.clone();
        let props = TableProps::new(rows(3), columns())
            .pagination(PaginationState::new(2, 5))
            .on_page_change(move |p| sink.lock().unwrap().push(p));
        let mut t = RecordTable::new();
        let buf = draw(&mut t, &props, 40, 10);
        assert!(line(&buf, 2).starts_with("‹ Page 5 of 2 ›"));
        assert_eq!(buf.cell((0, 2)).unwrap().style().fg, Theme::default().accent.fg);
        assert_eq!(buf.cell((14, 2)).unwrap().style().fg, Theme::default().text_muted.fg);

        assert_eq!(t.handle_event(InputEvent::click(0, 2), &props), TableAction::PageRequested(2));
        assert_eq!(
            t.handle_event(InputEvent::key(KeyCode::Char('[')), &props),
            TableAction::PageRequested(2)
        );
        assert_eq!(t.handle_event(InputEvent::click(14, 2), &props), TableAction::None);
        assert_eq!(
            t.handle_event(InputEvent::key(KeyCode::Char(']')), &props),
            TableAction::None
        );
        assert_eq!(*pages.lock().unwrap(), vec![2, 2]);
    }

    #[test]
    fn server_page_past_the_total_navigates_back() {
        let pages: Arc<Mutex<Vec<usize>>> = Arc::default();
        let sink = pages.clone();
        let props = TableProps::new(Vec::<Row>::new(), columns())
            .pagination(PaginationState::server(10, 7, 25))
            .on_page_change(move |p| sink.lock().unwrap().push(p));
        let mut t = RecordTable::new();
        draw(&mut t, &props, 40, 10);
        assert_eq!(
            t.handle_event(InputEvent::key(KeyCode::Char('p')), &props),
            TableAction::PageRequested(3)
        );
        assert_eq!(*pages.lock().unwrap(), vec![3]);
    }

    #[test]
    fn error_replaces_the_table() {
        let props = TableProps::new(rows(3), columns()).error(Some("request failed".into()));
        let mut t = RecordTable::new();
        let buf = draw(&mut t, &props, 40, 5);
        assert_eq!(line(&buf, 0), "Error: request failed");
        assert_eq!(line(&buf, 1), "");
        assert_eq!(t.handle_event(InputEvent::key(KeyCode::Down), &props), TableAction::None);
    }

    #[test]
    fn enter_activates_cursor_row() {
        let props = TableProps::new(rows(3), columns()).get_row_id(|row| {
            RowId::from(format!("k{}", row.get("id").and_then(|v| v.as_i64()).unwrap_or(0)))
        });
        let mut t = RecordTable::new();
        draw(&mut t, &props, 30, 10);
        t.handle_event(InputEvent::key(KeyCode::End), &props);
        assert_eq!(
            t.handle_event(InputEvent::key(KeyCode::Enter), &props),
            TableAction::Activated {
                id: RowId::from("k3"),
                index: 2,
            }
        );
    }
}
