//! Plan submission and completion handlers
//!
//! Completions are matched against the in-flight [`RequestTicket`]; a plan
//! is only shown if the user is still on the screen it was requested from.
//!
//! [`RequestTicket`]: crate::state::RequestTicket

use teachdesk_core::LessonResult;

use crate::state::{AppState, PendingRequest, RequestTicket, Screen};

use super::credentials::require_credential;
use super::{UpdateAction, UpdateResult};

pub const NEW_PLAN_ERROR: &str = "Something went wrong while drafting the plan. Please try again.";

pub const STYLE_MATCH_ERROR: &str =
    "Failed to analyze the file or generate the plan. Please ensure the file is readable.";

pub(super) fn handle_submit_create(state: &mut AppState) -> UpdateResult {
    if state.screen != Screen::CreateNew
        || state.in_flight.is_some()
        || !state.create_form.can_submit()
    {
        return UpdateResult::none();
    }
    if let Some(blocked) = require_credential(state, PendingRequest::NewPlan) {
        return blocked;
    }

    let token = begin_request(state, Screen::CreateNew);
    let form = &state.create_form;
    UpdateResult::action(UpdateAction::GenerateNewPlan {
        token,
        grade: form.grade().to_string(),
        subject: form.subject.value().to_string(),
        topic: form.topic.value().to_string(),
    })
}

pub(super) fn handle_submit_match(state: &mut AppState) -> UpdateResult {
    if state.screen != Screen::MatchStyle
        || state.in_flight.is_some()
        || !state.match_form.can_submit()
    {
        return UpdateResult::none();
    }
    let Some(source_file) = state.match_form.source_file() else {
        return UpdateResult::none();
    };
    if let Some(blocked) = require_credential(state, PendingRequest::StyleMatch) {
        return blocked;
    }

    let token = begin_request(state, Screen::MatchStyle);
    UpdateResult::action(UpdateAction::GenerateStyleMatch {
        token,
        source_file,
        topic: state.match_form.topic.value().to_string(),
    })
}

fn begin_request(state: &mut AppState, origin: Screen) -> u64 {
    let token = state.next_token();
    state.in_flight = Some(RequestTicket { token, origin });
    state.error = None;
    token
}

/// Clear the in-flight ticket for `token`, returning it if it matched
fn finish_request(state: &mut AppState, token: u64) -> Option<RequestTicket> {
    match state.in_flight {
        Some(ticket) if ticket.token == token => state.in_flight.take(),
        _ => {
            tracing::debug!("Ignoring completion for unknown request {}", token);
            None
        }
    }
}

pub(super) fn handle_plan_ready(
    state: &mut AppState,
    token: u64,
    lesson: LessonResult,
) -> UpdateResult {
    let Some(ticket) = finish_request(state, token) else {
        return UpdateResult::none();
    };

    if state.screen != ticket.origin {
        tracing::debug!(
            "Discarding plan for {:?}: user is now on {:?}",
            ticket.origin,
            state.screen
        );
        return UpdateResult::none();
    }

    state.open_result(lesson, false);
    UpdateResult::none()
}

pub(super) fn handle_plan_failed(state: &mut AppState, token: u64, error: &str) -> UpdateResult {
    let Some(ticket) = finish_request(state, token) else {
        return UpdateResult::none();
    };

    tracing::warn!("Plan request from {:?} failed: {}", ticket.origin, error);

    if state.screen == ticket.origin {
        let message = match ticket.origin {
            Screen::MatchStyle => STYLE_MATCH_ERROR,
            _ => NEW_PLAN_ERROR,
        };
        state.error = Some(message.to_string());
    }
    UpdateResult::none()
}
