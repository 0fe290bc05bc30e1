//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings for moving across the card grid.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let plain = |c: char| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        let code = |c: KeyCode| KeyEvent::new(c, KeyModifiers::NONE);

        let mut bindings = HashMap::new();

        // Grid cursor (vim-style and arrows)
        bindings.insert(plain('h'), KeyAction::SelectLeft);
        bindings.insert(plain('l'), KeyAction::SelectRight);
        bindings.insert(plain('k'), KeyAction::SelectUp);
        bindings.insert(plain('j'), KeyAction::SelectDown);
        bindings.insert(code(KeyCode::Left), KeyAction::SelectLeft);
        bindings.insert(code(KeyCode::Right), KeyAction::SelectRight);
        bindings.insert(code(KeyCode::Up), KeyAction::SelectUp);
        bindings.insert(code(KeyCode::Down), KeyAction::SelectDown);
        bindings.insert(code(KeyCode::Enter), KeyAction::OpenSelected);
        bindings.insert(plain(' '), KeyAction::OpenSelected);

        // Pagination
        bindings.insert(plain('m'), KeyAction::LoadMore);

        // Query
        bindings.insert(plain('/'), KeyAction::StartSearch);
        bindings.insert(
            KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL),
            KeyAction::StartSearch,
        );
        bindings.insert(plain('o'), KeyAction::CycleSort);
        bindings.insert(
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
            KeyAction::ClearSearch,
        );

        // Viewer
        bindings.insert(code(KeyCode::Esc), KeyAction::CloseViewer);
        bindings.insert(plain('c'), KeyAction::CloseViewer);
        bindings.insert(plain('f'), KeyAction::ToggleFullscreen);
        bindings.insert(plain('b'), KeyAction::PopOut);
        bindings.insert(code(KeyCode::PageUp), KeyAction::ViewerScrollUp);
        bindings.insert(code(KeyCode::PageDown), KeyAction::ViewerScrollDown);

        // Persisted state
        bindings.insert(plain('e'), KeyAction::ExportState);
        bindings.insert(plain('i'), KeyAction::ImportState);

        // Application controls
        bindings.insert(plain('d'), KeyAction::ToggleDarkMode);
        bindings.insert(plain('r'), KeyAction::Reload);
        bindings.insert(plain('?'), KeyAction::Help);
        bindings.insert(plain('q'), KeyAction::Quit);

        Self { bindings }
    }
}
