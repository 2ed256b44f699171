//! Key event handlers for each screen and modal

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, Screen};
use crate::text_buffer::TextEdit;

/// Convert key events to messages based on the current screen.
///
/// Modals take precedence over the screen underneath.
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if key.is_force_quit() {
        return Some(Message::Quit);
    }
    if state.key_prompt.is_some() {
        return handle_key_prompt(key);
    }
    if state.confirm_delete.is_some() {
        return handle_key_confirm_delete(key);
    }

    match state.screen {
        Screen::Landing => handle_key_landing(key),
        Screen::Home => handle_key_home(key),
        Screen::CreateNew => handle_key_form(key, Message::SubmitCreateForm),
        Screen::MatchStyle => handle_key_form(key, Message::SubmitMatchForm),
        Screen::Result => handle_key_result(state, key),
        Screen::MyLessons => handle_key_my_lessons(state, key),
    }
}

/// Map editing keys onto a text edit; `None` for anything else
fn text_edit_for(key: InputKey) -> Option<TextEdit> {
    match key {
        InputKey::Char(c) => Some(TextEdit::Insert(c)),
        InputKey::Backspace => Some(TextEdit::Backspace),
        InputKey::Delete => Some(TextEdit::Delete),
        InputKey::Left => Some(TextEdit::Left),
        InputKey::Right => Some(TextEdit::Right),
        InputKey::Home => Some(TextEdit::LineStart),
        InputKey::End => Some(TextEdit::LineEnd),
        InputKey::CharCtrl('u') => Some(TextEdit::Clear),
        _ => None,
    }
}

fn handle_key_prompt(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::SubmitApiKey),
        InputKey::Esc => Some(Message::CancelKeyPrompt),
        other => text_edit_for(other).map(Message::EditText),
    }
}

fn handle_key_confirm_delete(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y' | 'Y') | InputKey::Enter => Some(Message::ConfirmDelete),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::CancelDelete),
        _ => None,
    }
}

fn handle_key_landing(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Char(' ') => Some(Message::GetStarted),
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_home(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('1') => Some(Message::Navigate(Screen::CreateNew)),
        InputKey::Char('2') => Some(Message::Navigate(Screen::MatchStyle)),
        InputKey::Char('3') => Some(Message::Navigate(Screen::MyLessons)),
        InputKey::Char('q') => Some(Message::Quit),
        _ => None,
    }
}

/// Create New and Match Style share the same form keys
fn handle_key_form(key: InputKey, submit: Message) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::GoHome),
        InputKey::Tab | InputKey::Down => Some(Message::FocusNext),
        InputKey::BackTab | InputKey::Up => Some(Message::FocusPrev),
        InputKey::Enter => Some(submit),
        other => text_edit_for(other).map(Message::EditText),
    }
}

fn handle_key_result(state: &AppState, key: InputKey) -> Option<Message> {
    let result = state.result.as_ref()?;

    if result.is_editing() {
        return match key {
            InputKey::Esc => Some(Message::CancelEditing),
            InputKey::CharCtrl('s') => Some(Message::SaveEdit),
            InputKey::Enter => Some(Message::EditText(TextEdit::Newline)),
            InputKey::Up => Some(Message::EditText(TextEdit::Up)),
            InputKey::Down => Some(Message::EditText(TextEdit::Down)),
            other => text_edit_for(other).map(Message::EditText),
        };
    }

    if result.show_share_options {
        return match key {
            InputKey::Char('c') => Some(Message::CopyPlan),
            InputKey::Char('d') => Some(Message::DownloadPlan),
            InputKey::Char('p') | InputKey::Esc => Some(Message::ToggleShareOptions),
            _ => None,
        };
    }

    match key {
        InputKey::Esc | InputKey::Char('b') => Some(Message::GoHome),
        InputKey::Char('l') => Some(Message::Navigate(Screen::MyLessons)),
        InputKey::Char('e') => Some(Message::StartEditing),
        InputKey::Char('s') => Some(Message::SaveLesson),
        InputKey::Char('v') => Some(Message::GenerateVisualAid),
        InputKey::Char('r') => Some(Message::CycleResolution),
        InputKey::Char('x') => Some(Message::ClearVisualAid),
        InputKey::Char('p') => Some(Message::ToggleShareOptions),
        InputKey::Char('i') => Some(Message::ExportVisualAid),
        InputKey::Char('D') => match (&result.lesson.id, result.is_saved) {
            (Some(id), true) => Some(Message::RequestDelete { id: id.clone() }),
            _ => None,
        },
        InputKey::Up | InputKey::Char('k') => Some(Message::ScrollUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::ScrollDown),
        InputKey::PageUp => Some(Message::PageUp),
        InputKey::PageDown => Some(Message::PageDown),
        _ => None,
    }
}

fn handle_key_my_lessons(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Up | InputKey::Char('k') => Some(Message::SelectPrevLesson),
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectNextLesson),
        InputKey::Enter => Some(Message::OpenSelectedLesson),
        InputKey::Char('d') | InputKey::Delete => state
            .selected_saved_lesson()
            .map(|l| Message::RequestDelete { id: l.id.clone() }),
        InputKey::Char('n') => Some(Message::Navigate(Screen::CreateNew)),
        InputKey::Esc => Some(Message::GoHome),
        InputKey::Char('q') => Some(Message::Quit),
        _ => None,
    }
}
