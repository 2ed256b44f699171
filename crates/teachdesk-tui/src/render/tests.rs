//! Full-frame rendering tests

use super::view;
use crate::test_utils::{ready_state, TestTerminal};
use teachdesk_app::state::{ConfirmDeleteState, KeyPromptState, PendingRequest};
use teachdesk_app::{AppState, Screen};
use teachdesk_core::LessonResult;

fn draw(state: &AppState) -> TestTerminal {
    let mut term = TestTerminal::with_size(120, 32);
    term.draw_with(|frame| view(frame, state));
    term
}

#[test]
fn test_landing_without_key() {
    let state = AppState::new();
    let term = draw(&state);

    assert!(term.buffer_contains("Get Started"));
    assert!(!term.buffer_contains("AI Assistant Ready"));
}

#[test]
fn test_home_with_key_shows_ready_pill() {
    let term = draw(&ready_state(Screen::Home));

    assert!(term.buffer_contains("AI Assistant Ready"));
    assert!(term.buffer_contains("Create New Plan"));
}

#[test]
fn test_create_form_screen() {
    let term = draw(&ready_state(Screen::CreateNew));

    assert!(term.buffer_contains("Grade Level"));
    assert!(term.buffer_contains("Generate Plan"));
}

#[test]
fn test_result_screen_renders_active_plan() {
    let mut state = ready_state(Screen::Home);
    state.open_result(
        LessonResult::new_plan("7th Grade", "History", "Rome", "Aqueducts and roads", vec![]),
        false,
    );
    let term = draw(&state);

    assert!(term.buffer_contains("Aqueducts and roads"));
    assert!(term.buffer_contains("Start Over"));
}

#[test]
fn test_outstanding_visual_aid_shown_on_any_result() {
    let mut state = ready_state(Screen::Home);
    state.image_in_flight = Some(99);
    state.open_result(
        LessonResult::new_plan("7th Grade", "History", "Rome", "Body", vec![]),
        true,
    );
    let term = draw(&state);

    assert!(term.buffer_contains("Generating visual aid..."));
}

#[test]
fn test_share_menu_overlay() {
    let mut state = ready_state(Screen::Home);
    state.open_result(
        LessonResult::new_plan("7th Grade", "History", "Rome", "Body", vec![]),
        false,
    );
    if let Some(result) = state.result.as_mut() {
        result.show_share_options = true;
    }
    let term = draw(&state);

    assert!(term.buffer_contains("Copy to Clipboard"));
}

#[test]
fn test_confirm_dialog_overlay() {
    let mut state = ready_state(Screen::MyLessons);
    state.confirm_delete = Some(ConfirmDeleteState {
        id: "a".into(),
        topic: "Rome".into(),
    });
    let term = draw(&state);

    assert!(term.buffer_contains("Delete lesson"));
}

#[test]
fn test_key_prompt_overlay_on_landing() {
    let mut state = AppState::new();
    state.key_prompt = Some(KeyPromptState::new(Some(PendingRequest::EnterHome)));
    let term = draw(&state);

    assert!(term.buffer_contains("Connect to Gemini"));
}

#[test]
fn test_error_in_footer() {
    let mut state = ready_state(Screen::CreateNew);
    state.error = Some("Something went wrong while drafting the plan. Please try again.".into());
    let term = draw(&state);

    assert!(term.buffer_contains("Something went wrong while drafting the plan."));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let mut state = ready_state(Screen::Home);
    state.open_result(
        LessonResult::new_plan("7th Grade", "History", "Rome", "Body", vec![]),
        true,
    );
    let mut term = TestTerminal::with_size(10, 4);
    term.draw_with(|frame| view(frame, &state));
}
