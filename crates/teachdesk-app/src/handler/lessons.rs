//! My Lessons handlers and lesson store completions

use teachdesk_core::{LessonResult, SavedLesson};

use crate::state::{AppState, ConfirmDeleteState, Screen};

use super::{UpdateAction, UpdateResult};

pub(super) fn handle_select(state: &mut AppState, forward: bool) -> UpdateResult {
    let len = state.saved_lessons.len();
    if len == 0 {
        return UpdateResult::none();
    }
    state.selected_lesson = if forward {
        (state.selected_lesson + 1).min(len - 1)
    } else {
        state.selected_lesson.saturating_sub(1)
    };
    UpdateResult::none()
}

/// Show the selected saved lesson as the active (saved) result
pub(super) fn handle_open_selected(state: &mut AppState) -> UpdateResult {
    if state.screen != Screen::MyLessons {
        return UpdateResult::none();
    }
    let Some(lesson) = state.selected_saved_lesson() else {
        return UpdateResult::none();
    };
    let result = LessonResult::from(lesson);
    state.open_result(result, true);
    UpdateResult::none()
}

pub(super) fn handle_request_delete(state: &mut AppState, id: String) -> UpdateResult {
    let topic = state
        .saved_lessons
        .iter()
        .find(|l| l.id == id)
        .map(|l| l.topic.clone());

    match topic {
        Some(topic) => state.confirm_delete = Some(ConfirmDeleteState { id, topic }),
        None => tracing::debug!("Delete requested for unknown lesson {}", id),
    }
    UpdateResult::none()
}

pub(super) fn handle_confirm_delete(state: &mut AppState) -> UpdateResult {
    match state.confirm_delete.take() {
        Some(confirm) => UpdateResult::action(UpdateAction::RemoveLesson { id: confirm.id }),
        None => UpdateResult::none(),
    }
}

pub(super) fn handle_lesson_persisted(
    state: &mut AppState,
    token: u64,
    id: String,
    mark_saved: bool,
    lessons: Vec<SavedLesson>,
) -> UpdateResult {
    state.set_saved_lessons(lessons);

    if let Some(result) = state.result.as_mut().filter(|r| r.token == token) {
        result.lesson.id = Some(id);
        if mark_saved {
            result.is_saved = true;
        }
    }
    UpdateResult::none()
}

/// Update the list; deleting the displayed lesson returns to My Lessons
pub(super) fn handle_lesson_removed(
    state: &mut AppState,
    id: &str,
    lessons: Vec<SavedLesson>,
) -> UpdateResult {
    state.set_saved_lessons(lessons);

    let showing_deleted = state.screen == Screen::Result
        && state
            .result
            .as_ref()
            .is_some_and(|r| r.lesson.id.as_deref() == Some(id));

    if showing_deleted {
        state.navigate(Screen::MyLessons);
    }
    UpdateResult::none()
}
