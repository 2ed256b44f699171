//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use crate::message::Message;
use crate::state::{AppPhase, AppState, Screen};
use crate::text_buffer::TextEdit;

use super::{credentials, keys::handle_key, lessons, plan, result, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => {
            if state
                .notice
                .as_ref()
                .is_some_and(|n| n.is_expired(Instant::now()))
            {
                state.notice = None;
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::GetStarted => credentials::handle_get_started(state),

        Message::Navigate(screen) => {
            // Result is only entered with an active plan
            if screen != Screen::Result && screen != Screen::Landing {
                state.navigate(screen);
            }
            UpdateResult::none()
        }

        Message::GoHome => {
            state.reset_to_home();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Forms
        // ─────────────────────────────────────────────────────────
        Message::FocusNext => {
            match state.screen {
                Screen::CreateNew => state.create_form.focus_next(),
                Screen::MatchStyle => state.match_form.toggle_focus(),
                _ => {}
            }
            UpdateResult::none()
        }

        Message::FocusPrev => {
            match state.screen {
                Screen::CreateNew => state.create_form.focus_prev(),
                Screen::MatchStyle => state.match_form.toggle_focus(),
                _ => {}
            }
            UpdateResult::none()
        }

        Message::EditText(edit) => handle_edit_text(state, edit),

        Message::SubmitCreateForm => plan::handle_submit_create(state),
        Message::SubmitMatchForm => plan::handle_submit_match(state),

        Message::PlanReady { token, result } => plan::handle_plan_ready(state, token, *result),
        Message::PlanFailed { token, error } => plan::handle_plan_failed(state, token, &error),

        // ─────────────────────────────────────────────────────────
        // Result Screen
        // ─────────────────────────────────────────────────────────
        Message::StartEditing => result::handle_start_editing(state),
        Message::SaveEdit => result::handle_save_edit(state),
        Message::CancelEditing => result::handle_cancel_editing(state),
        Message::SaveLesson => result::handle_save_lesson(state),
        Message::GenerateVisualAid => result::handle_generate_visual_aid(state),
        Message::CycleResolution => result::handle_cycle_resolution(state),
        Message::ClearVisualAid => result::handle_clear_visual_aid(state),
        Message::ToggleShareOptions => result::handle_toggle_share_options(state),
        Message::CopyPlan => result::handle_copy_plan(state),
        Message::DownloadPlan => result::handle_download_plan(state),
        Message::ExportVisualAid => result::handle_export_visual_aid(state),
        Message::ScrollUp => result::handle_scroll(state, -1),
        Message::ScrollDown => result::handle_scroll(state, 1),
        Message::PageUp => result::handle_scroll(state, -result::PAGE_LINES),
        Message::PageDown => result::handle_scroll(state, result::PAGE_LINES),

        Message::VisualAidReady { token, image_url } => {
            result::handle_visual_aid_ready(state, token, image_url)
        }
        Message::VisualAidFailed { token, error } => {
            result::handle_visual_aid_failed(state, token, &error)
        }

        // ─────────────────────────────────────────────────────────
        // My Lessons
        // ─────────────────────────────────────────────────────────
        Message::SelectPrevLesson => lessons::handle_select(state, false),
        Message::SelectNextLesson => lessons::handle_select(state, true),
        Message::OpenSelectedLesson => lessons::handle_open_selected(state),
        Message::RequestDelete { id } => lessons::handle_request_delete(state, id),
        Message::ConfirmDelete => lessons::handle_confirm_delete(state),
        Message::CancelDelete => {
            state.confirm_delete = None;
            UpdateResult::none()
        }

        Message::LessonPersisted {
            token,
            id,
            mark_saved,
            lessons: saved,
        } => lessons::handle_lesson_persisted(state, token, id, mark_saved, saved),
        Message::LessonRemoved { id, lessons: saved } => {
            lessons::handle_lesson_removed(state, &id, saved)
        }
        Message::StoreFailed { error } => {
            tracing::warn!("Lesson store operation failed: {}", error);
            state.error = Some(format!("Could not update saved lessons: {}", error));
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Credentials
        // ─────────────────────────────────────────────────────────
        Message::SubmitApiKey => credentials::handle_submit_api_key(state),
        Message::CancelKeyPrompt => {
            state.key_prompt = None;
            UpdateResult::none()
        }
        Message::CredentialUpdated { status } => {
            credentials::handle_credential_updated(state, status)
        }
        Message::CredentialRejected { error } => {
            credentials::handle_credential_rejected(state, error)
        }

        // ─────────────────────────────────────────────────────────
        // Export
        // ─────────────────────────────────────────────────────────
        Message::Copied => {
            state.show_notice("Copied!");
            UpdateResult::none()
        }
        Message::Exported { path } => {
            state.show_notice(format!("Saved {}", path.display()));
            UpdateResult::none()
        }
        Message::ExportFailed { error } => {
            tracing::warn!("Export failed: {}", error);
            state.error = Some(error);
            UpdateResult::none()
        }
    }
}

/// Route a text edit to whichever buffer currently has focus
fn handle_edit_text(state: &mut AppState, edit: TextEdit) -> UpdateResult {
    if let Some(prompt) = state.key_prompt.as_mut() {
        prompt.input.apply(edit, false);
        prompt.error = None;
        return UpdateResult::none();
    }

    match state.screen {
        Screen::CreateNew => state.create_form.apply_edit(edit),
        Screen::MatchStyle => state.match_form.apply_edit(edit),
        Screen::Result => {
            if let Some(editor) = state.result.as_mut().and_then(|r| r.editor.as_mut()) {
                editor.apply(edit, true);
            }
        }
        _ => {}
    }
    UpdateResult::none()
}
