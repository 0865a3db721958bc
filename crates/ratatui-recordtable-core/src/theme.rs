use ratatui::style::Modifier;
use ratatui::style::Style;

/// Styles shared by every part of the table.
///
/// Compared by value, so a changed theme invalidates memoized header and row lines.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub danger: Style,
    pub header: Style,
    pub cursor: Style,
    pub selected: Style,
    pub disabled: Style,
    pub scrollbar: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            danger: Style::default().red(),
            header: Style::default().add_modifier(Modifier::BOLD),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            selected: Style::default().cyan().add_modifier(Modifier::BOLD),
            disabled: Style::default().dark_gray().add_modifier(Modifier::DIM),
            scrollbar: Style::default().dark_gray(),
        }
    }
}
