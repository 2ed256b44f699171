//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Generation runs on spawned tasks and reports back over the message
//! channel. Store, credential and export actions are local and complete
//! immediately; their outcome is returned as a follow-up message.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use teachdesk_genai::{GenerativeBackend, LessonGenerator};

use crate::credentials::CredentialManager;
use crate::export;
use crate::message::Message;
use crate::store::{KeyValueStore, LessonStore};
use crate::UpdateAction;

use super::spawn;

/// Boxed store used by the engine
pub type DynLessonStore = LessonStore<Box<dyn KeyValueStore + Send>>;

/// Everything actions run against
pub struct Services<B> {
    pub generator: LessonGenerator<B>,
    pub lessons: DynLessonStore,
    pub credentials: CredentialManager,
    /// Directory for exported plan text and images
    pub export_dir: PathBuf,
}

const MISSING_KEY_ERROR: &str = "no API key available";

/// Execute an action.
///
/// Returns the completion message for actions that finish synchronously.
pub fn handle_action<B>(
    action: UpdateAction,
    msg_tx: &mpsc::Sender<Message>,
    services: &mut Services<B>,
) -> Option<Message>
where
    B: GenerativeBackend + Send + Sync + 'static,
{
    match action {
        UpdateAction::GenerateNewPlan {
            token,
            grade,
            subject,
            topic,
        } => {
            let Some(api_key) = services.credentials.api_key() else {
                return Some(Message::PlanFailed {
                    token,
                    error: MISSING_KEY_ERROR.to_string(),
                });
            };
            spawn::spawn_new_plan(
                services.generator.clone(),
                api_key,
                msg_tx.clone(),
                token,
                grade,
                subject,
                topic,
            );
            None
        }

        UpdateAction::GenerateStyleMatch {
            token,
            source_file,
            topic,
        } => {
            let Some(api_key) = services.credentials.api_key() else {
                return Some(Message::PlanFailed {
                    token,
                    error: MISSING_KEY_ERROR.to_string(),
                });
            };
            spawn::spawn_style_match(
                services.generator.clone(),
                api_key,
                msg_tx.clone(),
                token,
                source_file,
                topic,
            );
            None
        }

        UpdateAction::GenerateVisualAid {
            token,
            plan_text,
            resolution,
        } => {
            let Some(api_key) = services.credentials.api_key() else {
                return Some(Message::VisualAidFailed {
                    token,
                    error: MISSING_KEY_ERROR.to_string(),
                });
            };
            spawn::spawn_visual_aid(
                services.generator.clone(),
                api_key,
                msg_tx.clone(),
                token,
                plan_text,
                resolution,
            );
            None
        }

        UpdateAction::PersistLesson {
            token,
            lesson,
            mark_saved,
        } => {
            let id = lesson.id.clone();
            Some(match services.lessons.upsert(lesson) {
                Ok(lessons) => Message::LessonPersisted {
                    token,
                    id,
                    mark_saved,
                    lessons,
                },
                Err(e) => Message::StoreFailed {
                    error: e.to_string(),
                },
            })
        }

        UpdateAction::RemoveLesson { id } => Some(match services.lessons.remove(&id) {
            Ok(lessons) => Message::LessonRemoved { id, lessons },
            Err(e) => Message::StoreFailed {
                error: e.to_string(),
            },
        }),

        UpdateAction::SaveApiKey { key } => Some(match services.credentials.submit_key(&key) {
            Ok(status) => Message::CredentialUpdated { status },
            Err(e) => Message::CredentialRejected {
                error: e.to_string(),
            },
        }),

        UpdateAction::CopyToClipboard { text } => Some(match export::copy_to_clipboard(&text) {
            Ok(()) => Message::Copied,
            Err(e) => Message::ExportFailed {
                error: e.to_string(),
            },
        }),

        UpdateAction::ExportPlanText { topic, content } => {
            debug!("Exporting plan text for {:?}", topic);
            Some(
                match export::export_plan_text(&services.export_dir, &topic, &content) {
                    Ok(path) => Message::Exported { path },
                    Err(e) => Message::ExportFailed {
                        error: e.to_string(),
                    },
                },
            )
        }

        UpdateAction::ExportVisualAid { topic, data_uri } => Some(
            match export::export_visual_aid(&services.export_dir, &topic, &data_uri) {
                Ok(path) => Message::Exported { path },
                Err(e) => {
                    warn!("Visual aid export failed: {}", e);
                    Message::ExportFailed {
                        error: e.to_string(),
                    }
                }
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CredentialSettings;
    use crate::store::MemoryKeyValueStore;
    use std::sync::Arc;
    use teachdesk_core::LessonResult;
    use teachdesk_genai::test_utils::FakeBackend;
    use teachdesk_genai::GeneratorConfig;

    fn services(dir: &std::path::Path) -> Services<FakeBackend> {
        Services {
            generator: LessonGenerator::new(
                Arc::new(FakeBackend::default()),
                GeneratorConfig::default(),
            ),
            lessons: LessonStore::new(Box::new(MemoryKeyValueStore::new())),
            credentials: CredentialManager::new(None, CredentialSettings::default()),
            export_dir: dir.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn test_persist_then_remove_lesson() {
        let dir = tempfile::tempdir().unwrap();
        let mut services = services(dir.path());
        let (tx, _rx) = mpsc::channel(8);
        let lesson =
            LessonResult::new_plan("7th Grade", "Math", "Angles", "c", vec![]).to_saved("a");

        let msg = handle_action(
            UpdateAction::PersistLesson {
                token: 3,
                lesson,
                mark_saved: true,
            },
            &tx,
            &mut services,
        );
        match msg {
            Some(Message::LessonPersisted {
                token, id, lessons, ..
            }) => {
                assert_eq!(token, 3);
                assert_eq!(id, "a");
                assert_eq!(lessons.len(), 1);
            }
            other => panic!("unexpected message {:?}", other),
        }

        let msg = handle_action(
            UpdateAction::RemoveLesson { id: "a".into() },
            &tx,
            &mut services,
        );
        assert!(matches!(msg, Some(Message::LessonRemoved { lessons, .. }) if lessons.is_empty()));
    }

    #[tokio::test]
    async fn test_export_plan_text_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut services = services(dir.path());
        let (tx, _rx) = mpsc::channel(8);

        let msg = handle_action(
            UpdateAction::ExportPlanText {
                topic: "Water Cycle".into(),
                content: "Plan".into(),
            },
            &tx,
            &mut services,
        );

        match msg {
            Some(Message::Exported { path }) => {
                assert_eq!(std::fs::read_to_string(path).unwrap(), "Plan");
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_export_bad_image_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut services = services(dir.path());
        let (tx, _rx) = mpsc::channel(8);

        let msg = handle_action(
            UpdateAction::ExportVisualAid {
                topic: "Water Cycle".into(),
                data_uri: "not a data uri".into(),
            },
            &tx,
            &mut services,
        );

        assert!(matches!(msg, Some(Message::ExportFailed { .. })));
    }
}
