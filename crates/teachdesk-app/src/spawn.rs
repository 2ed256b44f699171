//! Background generation tasks
//!
//! Each task runs one generation flow and reports back over the message
//! channel with the token it was started with.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{info, warn};

use teachdesk_core::{ImageResolution, LessonResult};
use teachdesk_genai::{GenerativeBackend, LessonGenerator};

use crate::message::Message;

/// Draft a new plan and report `PlanReady` or `PlanFailed`
pub fn spawn_new_plan<B>(
    generator: LessonGenerator<B>,
    api_key: String,
    msg_tx: mpsc::Sender<Message>,
    token: u64,
    grade: String,
    subject: String,
    topic: String,
) where
    B: GenerativeBackend + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let msg = match generator
            .request_new_plan(&api_key, &grade, &subject, &topic)
            .await
        {
            Ok(draft) => {
                info!("Plan {} ready ({} chars)", token, draft.content.len());
                Message::PlanReady {
                    token,
                    result: Box::new(LessonResult::new_plan(
                        grade,
                        subject,
                        topic,
                        draft.content,
                        draft.grounding_refs,
                    )),
                }
            }
            Err(e) => Message::PlanFailed {
                token,
                error: e.to_string(),
            },
        };
        if msg_tx.send(msg).await.is_err() {
            warn!("Plan {} finished after the event loop closed", token);
        }
    });
}

/// Draft a plan in the style of `source_file`
pub fn spawn_style_match<B>(
    generator: LessonGenerator<B>,
    api_key: String,
    msg_tx: mpsc::Sender<Message>,
    token: u64,
    source_file: PathBuf,
    topic: String,
) where
    B: GenerativeBackend + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let msg = match generator
            .request_style_match(&api_key, &source_file, &topic)
            .await
        {
            Ok(draft) => Message::PlanReady {
                token,
                result: Box::new(LessonResult::style_matched(
                    source_file,
                    topic,
                    draft.content,
                    draft.grounding_refs,
                )),
            },
            Err(e) => Message::PlanFailed {
                token,
                error: e.to_string(),
            },
        };
        if msg_tx.send(msg).await.is_err() {
            warn!("Style match {} finished after the event loop closed", token);
        }
    });
}

/// Generate a visual aid for the result identified by `token`
pub fn spawn_visual_aid<B>(
    generator: LessonGenerator<B>,
    api_key: String,
    msg_tx: mpsc::Sender<Message>,
    token: u64,
    plan_text: String,
    resolution: ImageResolution,
) where
    B: GenerativeBackend + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let msg = match generator
            .request_visual_aid(&api_key, &plan_text, resolution)
            .await
        {
            Ok(image_url) => Message::VisualAidReady { token, image_url },
            Err(e) => Message::VisualAidFailed {
                token,
                error: e.to_string(),
            },
        };
        if msg_tx.send(msg).await.is_err() {
            warn!("Visual aid {} finished after the event loop closed", token);
        }
    });
}
