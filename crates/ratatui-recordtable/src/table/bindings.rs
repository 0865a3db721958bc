use ratatui_recordtable_core::input::KeyCode;
use ratatui_recordtable_core::input::KeyEvent;
use ratatui_recordtable_core::keymap;
use ratatui_recordtable_core::keymap::Binding;

/// What a key asks the table to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableCommand {
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,
    ToggleRow,
    ToggleAll,
    NextPage,
    PreviousPage,
    LargerPageSize,
    SmallerPageSize,
    Activate,
}

/// Key bindings for [`RecordTable`](super::view::RecordTable).
///
/// Defaults are Vim-like for movement, `space` toggles the cursor row, `a` toggles select-all,
/// `[`/`]` (or `p`/`n`) change page and `-`/`+` cycle the page size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableBindings {
    pub up: Binding,
    pub down: Binding,
    pub top: Binding,
    pub bottom: Binding,
    pub page_up: Binding,
    pub page_down: Binding,
    pub toggle_row: Binding,
    pub toggle_all: Binding,
    pub next_page: Binding,
    pub previous_page: Binding,
    pub larger_page_size: Binding,
    pub smaller_page_size: Binding,
    pub activate: Binding,
}

impl Default for TableBindings {
    fn default() -> Self {
        Self {
            up: Binding::new(
                "↑/k",
                "up",
                vec![keymap::key(KeyCode::Up), keymap::key_char('k')],
            ),
            down: Binding::new(
                "↓/j",
                "down",
                vec![keymap::key(KeyCode::Down), keymap::key_char('j')],
            ),
            top: Binding::new(
                "g",
                "first row",
                vec![keymap::key(KeyCode::Home), keymap::key_char('g')],
            ),
            bottom: Binding::new(
                "G",
                "last row",
                vec![keymap::key(KeyCode::End), keymap::key_char('G')],
            ),
            page_up: Binding::new(
                "pgup",
                "scroll up",
                vec![keymap::key(KeyCode::PageUp), keymap::key_ctrl('u')],
            ),
            page_down: Binding::new(
                "pgdn",
                "scroll down",
                vec![keymap::key(KeyCode::PageDown), keymap::key_ctrl('d')],
            ),
            toggle_row: Binding::new("space", "toggle", vec![keymap::key_char(' ')]),
            toggle_all: Binding::new("a", "select all", vec![keymap::key_char('a')]),
            next_page: Binding::new(
                "]",
                "next page",
                vec![keymap::key_char(']'), keymap::key_char('n')],
            ),
            previous_page: Binding::new(
                "[",
                "prev page",
                vec![keymap::key_char('['), keymap::key_char('p')],
            ),
            larger_page_size: Binding::new("+", "more rows", vec![keymap::key_char('+')]),
            smaller_page_size: Binding::new("-", "fewer rows", vec![keymap::key_char('-')]),
            activate: Binding::new("enter", "open", vec![keymap::key(KeyCode::Enter)]),
        }
    }
}

impl TableBindings {
    pub fn command_for(&self, key: &KeyEvent) -> Option<TableCommand> {
        self.entries()
            .into_iter()
            .find(|(binding, _)| binding.matches(key))
            .map(|(_, command)| command)
    }

    /// Bindings worth showing in a help bar, most useful first.
    pub fn help(&self) -> Vec<Binding> {
        vec![
            self.toggle_row.clone(),
            self.toggle_all.clone(),
            self.previous_page.clone(),
            self.next_page.clone(),
            self.activate.clone(),
        ]
    }

    fn entries(&self) -> [(&Binding, TableCommand); 13] {
        [
            (&self.up, TableCommand::Up),
            (&self.down, TableCommand::Down),
            (&self.top, TableCommand::Top),
            (&self.bottom, TableCommand::Bottom),
            (&self.page_up, TableCommand::PageUp),
            (&self.page_down, TableCommand::PageDown),
            (&self.toggle_row, TableCommand::ToggleRow),
            (&self.toggle_all, TableCommand::ToggleAll),
            (&self.next_page, TableCommand::NextPage),
            (&self.previous_page, TableCommand::PreviousPage),
            (&self.larger_page_size, TableCommand::LargerPageSize),
            (&self.smaller_page_size, TableCommand::SmallerPageSize),
            (&self.activate, TableCommand::Activate),
        ]
    }
}
