//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::DraftField;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Focus navigation
    NextFocus,
    PrevFocus,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    /// Enter while editing: run the focused input's action
    Activate,

    // Car actions
    SubmitDraft,
    SearchByYear,
    SearchByPrice,
    ResetFilters,
    Refresh,

    // Popups
    ToggleHelp,
    CloseHelp,

    // Layout
    /// Cards per row in the grid at the current terminal width
    GridColumns(usize),

    // System
    Quit,
}

/// Focused widget (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    Form(DraftField),
    FilterYear,
    FilterPrice,
    Cars,
}

impl Focus {
    pub fn next(&self) -> Focus {
        match self {
            Focus::Form(DraftField::Brand) => Focus::Form(DraftField::Model),
            Focus::Form(DraftField::Model) => Focus::Form(DraftField::Year),
            Focus::Form(DraftField::Year) => Focus::Form(DraftField::Color),
            Focus::Form(DraftField::Color) => Focus::Form(DraftField::Price),
            Focus::Form(DraftField::Price) => Focus::FilterYear,
            Focus::FilterYear => Focus::FilterPrice,
            Focus::FilterPrice => Focus::Cars,
            Focus::Cars => Focus::Form(DraftField::Brand),
        }
    }

    pub fn prev(&self) -> Focus {
        match self {
            Focus::Form(DraftField::Brand) => Focus::Cars,
            Focus::Form(DraftField::Model) => Focus::Form(DraftField::Brand),
            Focus::Form(DraftField::Year) => Focus::Form(DraftField::Model),
            Focus::Form(DraftField::Color) => Focus::Form(DraftField::Year),
            Focus::Form(DraftField::Price) => Focus::Form(DraftField::Color),
            Focus::FilterYear => Focus::Form(DraftField::Price),
            Focus::FilterPrice => Focus::FilterYear,
            Focus::Cars => Focus::FilterPrice,
        }
    }

    /// Whether this focus target is a text input
    pub fn is_input(&self) -> bool {
        !matches!(self, Focus::Cars)
    }

    /// Whether the focused input accepts digits only
    pub fn is_numeric(&self) -> bool {
        match self {
            Focus::Form(field) => field.is_numeric(),
            Focus::FilterYear | Focus::FilterPrice => true,
            Focus::Cars => false,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    focus: Focus,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextFocus),
            KeyCode::BackTab => Some(UiEvent::PrevFocus),
            KeyCode::Char('e') | KeyCode::Enter if focus.is_input() => Some(UiEvent::StartEditing),
            KeyCode::Char('s') => Some(UiEvent::SubmitDraft),
            KeyCode::Char('y') => Some(UiEvent::SearchByYear),
            KeyCode::Char('p') => Some(UiEvent::SearchByPrice),
            KeyCode::Char('a') => Some(UiEvent::ResetFilters),
            KeyCode::Char('r') | KeyCode::F(5) => Some(UiEvent::Refresh),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ScrollDown),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Enter => Some(UiEvent::Activate),
            KeyCode::Tab => Some(UiEvent::NextFocus),
            KeyCode::BackTab => Some(UiEvent::PrevFocus),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}
