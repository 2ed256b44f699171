//! Result screen handlers

use crate::state::{AppState, PendingRequest};
use crate::text_buffer::TextBuffer;

use super::credentials::require_credential;
use super::{UpdateAction, UpdateResult};

pub const VISUAL_AID_ERROR: &str = "Visual aid generation failed. Please try again.";

/// Lines moved by PageUp/PageDown
pub(super) const PAGE_LINES: i32 = 10;

pub(super) fn handle_start_editing(state: &mut AppState) -> UpdateResult {
    if let Some(result) = state.result.as_mut() {
        if !result.is_editing() {
            result.editor = Some(TextBuffer::with_text(result.lesson.content.clone()));
            result.show_share_options = false;
        }
    }
    UpdateResult::none()
}

/// Replace the plan text with the edited text; the result is no longer saved
pub(super) fn handle_save_edit(state: &mut AppState) -> UpdateResult {
    if let Some(result) = state.result.as_mut() {
        if let Some(editor) = result.editor.take() {
            result.lesson.content = editor.text().to_string();
            result.is_saved = false;
        }
    }
    UpdateResult::none()
}

pub(super) fn handle_cancel_editing(state: &mut AppState) -> UpdateResult {
    if let Some(result) = state.result.as_mut() {
        result.editor = None;
    }
    UpdateResult::none()
}

/// Persist the active result, minting an id on first save
pub(super) fn handle_save_lesson(state: &mut AppState) -> UpdateResult {
    let Some(result) = state.result.as_ref() else {
        return UpdateResult::none();
    };
    if result.is_editing() {
        return UpdateResult::none();
    }

    let id = result
        .lesson
        .id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    UpdateResult::action(UpdateAction::PersistLesson {
        token: result.token,
        lesson: result.lesson.to_saved(id),
        mark_saved: true,
    })
}

pub(super) fn handle_generate_visual_aid(state: &mut AppState) -> UpdateResult {
    if state.is_generating_image() {
        return UpdateResult::none();
    }
    match state.result.as_ref() {
        Some(result) if !result.is_editing() => {}
        _ => return UpdateResult::none(),
    }
    if let Some(blocked) = require_credential(state, PendingRequest::VisualAid) {
        return blocked;
    }

    state.error = None;
    let Some(result) = state.result.as_ref() else {
        return UpdateResult::none();
    };
    state.image_in_flight = Some(result.token);

    UpdateResult::action(UpdateAction::GenerateVisualAid {
        token: result.token,
        plan_text: result.lesson.content.clone(),
        resolution: result.resolution,
    })
}

pub(super) fn handle_cycle_resolution(state: &mut AppState) -> UpdateResult {
    if state.is_generating_image() {
        return UpdateResult::none();
    }
    if let Some(result) = state.result.as_mut() {
        result.resolution = result.resolution.next();
    }
    UpdateResult::none()
}

/// Drop the image from the active result only; the store is untouched
pub(super) fn handle_clear_visual_aid(state: &mut AppState) -> UpdateResult {
    if let Some(result) = state.result.as_mut() {
        result.lesson.generated_image_url = None;
    }
    UpdateResult::none()
}

pub(super) fn handle_toggle_share_options(state: &mut AppState) -> UpdateResult {
    if let Some(result) = state.result.as_mut() {
        if !result.is_editing() {
            result.show_share_options = !result.show_share_options;
        }
    }
    UpdateResult::none()
}

pub(super) fn handle_copy_plan(state: &mut AppState) -> UpdateResult {
    let Some(result) = state.result.as_mut() else {
        return UpdateResult::none();
    };
    result.show_share_options = false;
    if result.lesson.content.is_empty() {
        return UpdateResult::none();
    }
    UpdateResult::action(UpdateAction::CopyToClipboard {
        text: result.lesson.content.clone(),
    })
}

pub(super) fn handle_download_plan(state: &mut AppState) -> UpdateResult {
    let Some(result) = state.result.as_mut() else {
        return UpdateResult::none();
    };
    result.show_share_options = false;
    if result.lesson.content.is_empty() {
        return UpdateResult::none();
    }
    UpdateResult::action(UpdateAction::ExportPlanText {
        topic: result.lesson.topic.clone(),
        content: result.lesson.content.clone(),
    })
}

pub(super) fn handle_export_visual_aid(state: &mut AppState) -> UpdateResult {
    let Some(result) = state.result.as_ref() else {
        return UpdateResult::none();
    };
    match &result.lesson.generated_image_url {
        Some(data_uri) => UpdateResult::action(UpdateAction::ExportVisualAid {
            topic: result.lesson.topic.clone(),
            data_uri: data_uri.clone(),
        }),
        None => UpdateResult::none(),
    }
}

pub(super) fn handle_scroll(state: &mut AppState, delta: i32) -> UpdateResult {
    if let Some(result) = state.result.as_mut() {
        if !result.is_editing() {
            let scroll = (i32::from(result.scroll) + delta).clamp(0, i32::from(u16::MAX));
            result.scroll = scroll as u16;
        }
    }
    UpdateResult::none()
}

/// Attach the image if the result it was requested for is still active.
///
/// A saved result is written back to the store in place.
pub(super) fn handle_visual_aid_ready(
    state: &mut AppState,
    token: u64,
    image_url: String,
) -> UpdateResult {
    state.image_in_flight = None;

    let Some(result) = state.result.as_mut().filter(|r| r.token == token) else {
        tracing::debug!("Discarding visual aid for inactive result {}", token);
        return UpdateResult::none();
    };

    result.lesson.generated_image_url = Some(image_url);

    match (&result.lesson.id, result.is_saved) {
        (Some(id), true) => UpdateResult::action(UpdateAction::PersistLesson {
            token,
            lesson: result.lesson.to_saved(id.clone()),
            mark_saved: false,
        }),
        _ => UpdateResult::none(),
    }
}

pub(super) fn handle_visual_aid_failed(
    state: &mut AppState,
    token: u64,
    error: &str,
) -> UpdateResult {
    tracing::warn!("Visual aid request failed: {}", error);

    state.image_in_flight = None;

    if !state.result.as_ref().is_some_and(|r| r.token == token) {
        return UpdateResult::none();
    }
    state.error = Some(VISUAL_AID_ERROR.to_string());
    UpdateResult::none()
}
