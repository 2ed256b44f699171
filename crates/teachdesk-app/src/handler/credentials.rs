//! Credential precondition and API key prompt handlers

use crate::credentials::CredentialStatus;
use crate::message::Message;
use crate::state::{AppState, KeyPromptState, PendingRequest, Screen};

use super::{UpdateAction, UpdateResult};

/// Shown when no key is configured and key entry is disabled
pub const CREDENTIAL_UNAVAILABLE_ERROR: &str =
    "No API key is configured. Set GEMINI_API_KEY and restart TeachDesk.";

/// Run the credential precondition for a privileged request.
///
/// Returns `None` when the request may proceed. Otherwise returns the result
/// to hand back from `update`: either the key prompt was opened (and the
/// request parked) or an error was set.
pub(super) fn require_credential(
    state: &mut AppState,
    pending: PendingRequest,
) -> Option<UpdateResult> {
    match state.credential_status {
        CredentialStatus::Ready => None,
        CredentialStatus::NeedsCredential => {
            tracing::debug!("No API key yet, parking {:?}", pending);
            state.key_prompt = Some(KeyPromptState::new(Some(pending)));
            Some(UpdateResult::none())
        }
        CredentialStatus::Unavailable => {
            state.error = Some(CREDENTIAL_UNAVAILABLE_ERROR.to_string());
            Some(UpdateResult::none())
        }
    }
}

pub(super) fn handle_get_started(state: &mut AppState) -> UpdateResult {
    if state.screen != Screen::Landing {
        return UpdateResult::none();
    }
    if let Some(blocked) = require_credential(state, PendingRequest::EnterHome) {
        return blocked;
    }
    state.navigate(Screen::Home);
    UpdateResult::none()
}

pub(super) fn handle_submit_api_key(state: &mut AppState) -> UpdateResult {
    let Some(prompt) = state.key_prompt.as_mut() else {
        return UpdateResult::none();
    };
    if prompt.submitting {
        return UpdateResult::none();
    }
    if prompt.input.is_blank() {
        prompt.error = Some("Please enter an API key.".to_string());
        return UpdateResult::none();
    }

    prompt.submitting = true;
    UpdateResult::action(UpdateAction::SaveApiKey {
        key: prompt.input.value().to_string(),
    })
}

pub(super) fn handle_credential_updated(
    state: &mut AppState,
    status: CredentialStatus,
) -> UpdateResult {
    state.credential_status = status;

    if status != CredentialStatus::Ready {
        if let Some(prompt) = state.key_prompt.as_mut() {
            prompt.submitting = false;
            prompt.error = Some("The key could not be used. Please try again.".to_string());
        }
        return UpdateResult::none();
    }

    let pending = state.key_prompt.take().and_then(|p| p.pending);
    tracing::info!("API key ready, resuming {:?}", pending);

    match pending {
        Some(PendingRequest::EnterHome) => UpdateResult::message(Message::GetStarted),
        Some(PendingRequest::NewPlan) => UpdateResult::message(Message::SubmitCreateForm),
        Some(PendingRequest::StyleMatch) => UpdateResult::message(Message::SubmitMatchForm),
        Some(PendingRequest::VisualAid) => UpdateResult::message(Message::GenerateVisualAid),
        None => UpdateResult::none(),
    }
}

pub(super) fn handle_credential_rejected(state: &mut AppState, error: String) -> UpdateResult {
    tracing::warn!("API key rejected: {}", error);
    if let Some(prompt) = state.key_prompt.as_mut() {
        prompt.submitting = false;
        prompt.error = Some(error);
    } else {
        state.error = Some(error);
    }
    UpdateResult::none()
}
