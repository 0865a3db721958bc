use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// A set of keys that trigger one action, plus the text shown for it in a help bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| key_event_matches(k, event))
    }
}

/// Exact match on key code and all modifiers.
///
/// Shifted characters arrive as the shifted char (`G`, `+`) with `shift` set by some terminals
/// and not by others, so shift is ignored for `Char` codes.
pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    if pattern.code != event.code {
        return false;
    }
    let ignore_shift = matches!(pattern.code, KeyCode::Char(_));
    modifiers_match(pattern.modifiers, event.modifiers, ignore_shift)
}

fn modifiers_match(pattern: KeyModifiers, event: KeyModifiers, ignore_shift: bool) -> bool {
    (ignore_shift || pattern.shift == event.shift)
        && pattern.ctrl == event.ctrl
        && pattern.alt == event.alt
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::ctrl())
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}
