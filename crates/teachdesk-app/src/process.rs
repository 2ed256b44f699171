//! Message processing
//!
//! Runs TEA updates and dispatches the resulting actions. Local actions
//! complete immediately and their messages join the same processing pass.

use std::collections::VecDeque;

use tokio::sync::mpsc;

use teachdesk_genai::GenerativeBackend;

use crate::actions::{handle_action, Services};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<B>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    services: &mut Services<B>,
) where
    B: GenerativeBackend + Send + Sync + 'static,
{
    let mut queue = VecDeque::from([message]);

    while let Some(msg) = queue.pop_front() {
        let result = handler::update(state, msg);

        if let Some(action) = result.action {
            if let Some(completion) = handle_action(action, msg_tx, services) {
                queue.push_back(completion);
            }
        }

        // Continue with follow-up message
        if let Some(follow_up) = result.message {
            queue.push_back(follow_up);
        }
    }
}
