use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_recordtable::Column;
use ratatui_recordtable::PaginationState;
use ratatui_recordtable::RecordTable;
use ratatui_recordtable::Row;
use ratatui_recordtable::RowId;
use ratatui_recordtable::SelectionSet;
use ratatui_recordtable::TableAction;
use ratatui_recordtable::TableProps;
use ratatui_recordtable::Theme;
use ratatui_recordtable::crossterm_input::input_event_from_crossterm;
use ratatui_recordtable::help::HelpBar;
use ratatui_recordtable::row_from_value;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;
use std::fs::File;
use std::io;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

enum Request {
    Select(Vec<RowId>),
    Page(usize),
    PageSize(usize),
}

struct App {
    rows: Arc<[Row]>,
    columns: Arc<[Column]>,
    selected: Arc<SelectionSet>,
    pagination: PaginationState,
    loading: bool,
    error: Option<String>,
    tick: u64,
    last_event: String,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl App {
    fn new() -> Self {
        let rows: Vec<Row> = (1..=240)
            .map(|i| {
                row_from_value(serde_json::json!({
                    "record_id": i,
                    "sku": format!("SKU-{i:04}"),
                    "name": format!("Part {i}"),
                    "qty": (i * 37) % 500,
                    "discontinued": i % 9 == 0,
                }))
            })
            .collect();
        let columns = vec![
            Column::new("sku", "SKU", 10).interactive(),
            Column::new("name", "Name", 20).min_width(8),
            Column::new("qty", "Qty", 6).align(ratatui::layout::Alignment::Right),
            Column::new("discontinued", "Status", 12).render(|row, _| {
                let gone = row
                    .get("discontinued")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false);
                Line::from(if gone { "discontinued" } else { "active" })
            }),
        ];
        Self {
            rows: rows.into(),
            columns: columns.into(),
            selected: Arc::new(SelectionSet::new()),
            pagination: PaginationState::new(25, 1),
            loading: false,
            error: None,
            tick: 0,
            last_event: "-".to_string(),
            requests: Arc::default(),
        }
    }

    fn props(&self) -> TableProps {
        let select = self.requests.clone();
        let page = self.requests.clone();
        let size = self.requests.clone();
        TableProps::new(self.rows.clone(), self.columns.clone())
            .loading(self.loading)
            .error(self.error.clone())
            .selectable(true)
            .selected_ids(self.selected.clone())
            .is_row_disabled(|row| {
                row.get("discontinued")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false)
            })
            .pagination(self.pagination)
            .on_selection_change(move |ids, _| {
                if let Ok(mut q) = select.lock() {
                    q.push(Request::Select(ids.to_vec()));
                }
            })
            .on_page_change(move |p| {
                if let Ok(mut q) = page.lock() {
                    q.push(Request::Page(p));
                }
            })
            .on_page_size_change(move |s| {
                if let Ok(mut q) = size.lock() {
                    q.push(Request::PageSize(s));
                }
            })
            .spinner_tick(self.tick)
    }

    fn apply_requests(&mut self) {
        let pending = match self.requests.lock() {
            Ok(mut q) => std::mem::take(&mut *q),
            Err(_) => return,
        };
        for request in pending {
            match request {
                Request::Select(ids) => self.selected = Arc::new(ids.into_iter().collect()),
                Request::Page(p) => self.pagination.current_page = p,
                Request::PageSize(s) => {
                    self.pagination.page_size = s;
                    self.pagination.current_page = 1;
                }
            }
        }
    }
}

fn main() -> io::Result<()> {
    let log_file = File::create("records.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let mut table = RecordTable::new();
    let mut app = App::new();

    let res = run(&mut terminal, &theme, &mut table, &mut app);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    table: &mut RecordTable,
    app: &mut App,
) -> io::Result<()> {
    let help = HelpBar::new(table.options().bindings.help());
    loop {
        let props = app.props();
        let summary = table.selection_summary(&props);
        terminal.draw(|f| {
            let area = f.area();
            let block = Block::default()
                .title("Records (l loading, e error, q quit)")
                .borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let buf = f.buffer_mut();
            let table_area = Rect::new(
                inner.x,
                inner.y,
                inner.width,
                inner.height.saturating_sub(2),
            );
            let status_area = Rect::new(inner.x, table_area.bottom(), inner.width, 1);
            let help_area = Rect::new(inner.x, status_area.bottom(), inner.width, 1);

            table.render(table_area, buf, theme, &props);

            let pct = table.viewport.percent_y().unwrap_or(0);
            let status = format!(
                "selected={} (page {}/{})  scroll={pct}%  last={}",
                app.selected.len(),
                summary.selected_count(),
                summary.selectable_count(),
                app.last_event
            );
            buf.set_span(
                status_area.x,
                status_area.y,
                &Span::styled(status, theme.text_muted),
                status_area.width,
            );
            help.render_ref(help_area, buf);
        })?;

        if !crossterm::event::poll(Duration::from_millis(80))? {
            app.tick = app.tick.wrapping_add(1);
            continue;
        }
        let event = crossterm::event::read()?;
        if let Event::Key(key) = &event
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('l') => {
                    app.loading = !app.loading;
                    continue;
                }
                KeyCode::Char('e') => {
                    app.error = match app.error {
                        Some(_) => None,
                        None => Some("inventory service unavailable".to_string()),
                    };
                    continue;
                }
                _ => {}
            }
        }

        let Some(ev) = input_event_from_crossterm(event) else {
            continue;
        };
        match table.handle_event(ev, &props) {
            TableAction::Activated { id, index } => {
                app.last_event = format!("open {id} (row {})", index + 1);
            }
            TableAction::CellClicked { id, column, .. } => {
                app.last_event = format!("clicked {column} of {id}");
            }
            TableAction::SelectionRequested(change) => {
                app.last_event = format!("{} selected", change.ids.len());
            }
            TableAction::PageRequested(p) => app.last_event = format!("page {p}"),
            TableAction::PageSizeRequested(s) => app.last_event = format!("{s} per page"),
            TableAction::Redraw | TableAction::None => {}
        }
        app.apply_requests();
    }
}
