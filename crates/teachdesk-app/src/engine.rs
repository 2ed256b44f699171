//! Engine - orchestration state shared by the event loop
//!
//! Owns the TEA state, the message channel and the services actions run
//! against. The TUI runner feeds input into it and renders its state.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use teachdesk_genai::{GenerativeBackend, LessonGenerator};

use crate::actions::Services;
use crate::config::Settings;
use crate::credentials::CredentialManager;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::AppState;
use crate::store::{KeyValueStore, LessonStore};

/// Capacity of the unified message channel
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// Orchestration engine for TeachDesk.
pub struct Engine<B> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, generation tasks).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    services: Services<B>,

    /// Loaded settings
    pub settings: Settings,
}

impl<B> Engine<B>
where
    B: GenerativeBackend + Send + Sync + 'static,
{
    /// Create an engine.
    ///
    /// Loads the saved lessons and resolves the credential status so the
    /// first frame shows the right screen.
    pub fn new(
        settings: Settings,
        backend: Arc<B>,
        store: Box<dyn KeyValueStore + Send>,
        credentials: CredentialManager,
    ) -> Self {
        let lessons = LessonStore::new(store);
        let saved = lessons.list_saved();
        let status = credentials.status();
        info!(
            "Starting with {} saved lesson(s), credential status {:?}",
            saved.len(),
            status
        );

        let state = AppState::with_settings(&settings, status, saved);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);

        let services = Services {
            generator: LessonGenerator::new(backend, settings.generation.generator_config()),
            lessons,
            credentials,
            export_dir: settings.export.output_dir(),
        };

        Self {
            state,
            msg_tx,
            msg_rx,
            services,
            settings,
        }
    }

    /// Listen for SIGINT/SIGTERM and quit when one arrives
    pub fn start_signal_handler(&self) {
        signals::spawn_signal_handler(self.msg_tx.clone());
    }

    /// Process a single message through the TEA update cycle
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.msg_tx, &mut self.services);
    }

    /// Process every message already waiting on the channel.
    ///
    /// Returns how many were processed.
    pub fn drain_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next background message and process it
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CredentialSettings;
    use crate::credentials::API_KEY_ENV_VARS;
    use crate::handler::plan::NEW_PLAN_ERROR;
    use crate::state::Screen;
    use crate::store::MemoryKeyValueStore;
    use crate::text_buffer::TextBuffer;
    use serial_test::serial;
    use teachdesk_core::LessonResult;
    use teachdesk_genai::test_utils::{image_response, text_response, FakeBackend};

    fn keyed_credentials() -> CredentialManager {
        let mut credentials = CredentialManager::new(None, CredentialSettings::default());
        credentials.submit_key("test-key").unwrap();
        credentials
    }

    fn engine_with(backend: FakeBackend, credentials: CredentialManager) -> Engine<FakeBackend> {
        Engine::new(
            Settings::default(),
            Arc::new(backend),
            Box::new(MemoryKeyValueStore::new()),
            credentials,
        )
    }

    fn fill_create_form(engine: &mut Engine<FakeBackend>) {
        engine.process_message(Message::Navigate(Screen::CreateNew));
        engine.state.create_form.subject = TextBuffer::with_text("Science");
        engine.state.create_form.topic = TextBuffer::with_text("Photosynthesis");
    }

    #[tokio::test]
    async fn test_engine_starts_home_with_key_and_loads_lessons() {
        let store = MemoryKeyValueStore::new();
        let lesson =
            LessonResult::new_plan("7th Grade", "Math", "Angles", "c", vec![]).to_saved("a");
        store
            .set(
                crate::store::SAVED_LESSONS_KEY,
                &serde_json::to_string(&vec![lesson]).unwrap(),
            )
            .unwrap();

        let engine = Engine::new(
            Settings::default(),
            Arc::new(FakeBackend::default()),
            Box::new(store),
            keyed_credentials(),
        );

        assert_eq!(engine.state.screen, Screen::Home);
        assert_eq!(engine.state.saved_lessons.len(), 1);
    }

    #[tokio::test]
    async fn test_new_plan_round_trip_through_backend() {
        let backend = FakeBackend::with_responses(vec![Ok(text_response("# Plan\nDo things"))]);
        let mut engine = engine_with(backend, keyed_credentials());
        fill_create_form(&mut engine);

        engine.process_message(Message::SubmitCreateForm);
        assert!(engine.state.is_loading());

        assert!(engine.process_next().await);

        assert_eq!(engine.state.screen, Screen::Result);
        let result = engine.state.result.as_ref().unwrap();
        assert_eq!(result.lesson.content, "# Plan\nDo things");
        assert_eq!(result.lesson.subject.as_deref(), Some("Science"));
        assert!(!engine.state.is_loading());
    }

    #[tokio::test]
    async fn test_failed_generation_shows_error() {
        let mut engine = engine_with(FakeBackend::default(), keyed_credentials());
        fill_create_form(&mut engine);

        engine.process_message(Message::SubmitCreateForm);
        engine.process_next().await;

        assert_eq!(engine.state.screen, Screen::CreateNew);
        assert_eq!(engine.state.error.as_deref(), Some(NEW_PLAN_ERROR));
    }

    #[tokio::test]
    async fn test_save_then_visual_aid_updates_store() {
        let backend = FakeBackend::with_responses(vec![
            Ok(text_response("Plan")),
            Ok(image_response("image/png", "AAAA")),
        ]);
        let mut engine = engine_with(backend, keyed_credentials());
        fill_create_form(&mut engine);
        engine.process_message(Message::SubmitCreateForm);
        engine.process_next().await;

        engine.process_message(Message::SaveLesson);
        assert!(engine.state.result.as_ref().unwrap().is_saved);
        assert_eq!(engine.state.saved_lessons.len(), 1);

        engine.process_message(Message::GenerateVisualAid);
        engine.process_next().await;

        let saved = &engine.state.saved_lessons[0];
        assert_eq!(
            saved.generated_image_url.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
        assert!(engine.state.result.as_ref().unwrap().is_saved);
    }

    #[tokio::test]
    #[serial]
    async fn test_key_prompt_flow_resumes_request() {
        for var in API_KEY_ENV_VARS {
            std::env::remove_var(var);
        }
        let backend = FakeBackend::with_responses(vec![Ok(text_response("Plan"))]);
        let credentials = CredentialManager::new(None, CredentialSettings::default());
        let mut engine = engine_with(backend, credentials);
        assert_eq!(engine.state.screen, Screen::Landing);

        engine.process_message(Message::GetStarted);
        assert!(engine.state.key_prompt.is_some());

        engine.state.key_prompt.as_mut().unwrap().input = TextBuffer::with_text("typed-key");
        engine.process_message(Message::SubmitApiKey);

        assert!(engine.state.key_prompt.is_none());
        assert!(engine.state.has_api_key());
        assert_eq!(engine.state.screen, Screen::Home);
    }

    #[tokio::test]
    async fn test_drain_pending_processes_queued_messages() {
        let mut engine = engine_with(FakeBackend::default(), keyed_credentials());
        engine.msg_tx.send(Message::Quit).await.unwrap();

        assert_eq!(engine.drain_pending(), 1);
        assert!(engine.should_quit());
    }
}
