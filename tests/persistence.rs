//! Integration tests: lessons written through one engine are visible to the next

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use teachdesk_app::config::{CredentialSettings, Settings};
use teachdesk_app::text_buffer::TextBuffer;
use teachdesk_app::{open_store, CredentialManager, Engine, Message, Screen};
use teachdesk_genai::test_utils::{grounded_text_response, text_response, FakeBackend};

fn keyed_credentials() -> CredentialManager {
    let mut credentials = CredentialManager::new(None, CredentialSettings::default());
    credentials.submit_key("test-key").unwrap();
    credentials
}

fn engine(dir: &TempDir, backend: FakeBackend) -> Engine<FakeBackend> {
    Engine::new(
        Settings::default(),
        Arc::new(backend),
        open_store(Some(dir.path().to_path_buf())),
        keyed_credentials(),
    )
}

#[tokio::test]
async fn test_saved_lesson_survives_restart() {
    let dir = TempDir::new().unwrap();
    let backend = FakeBackend::with_responses(vec![Ok(grounded_text_response(
        "# Volcanoes\nBuild a model",
        &[(Some("USGS"), Some("https://usgs.example"))],
    ))]);

    let mut first = engine(&dir, backend);
    first.process_message(Message::Navigate(Screen::CreateNew));
    first.state.create_form.subject = TextBuffer::with_text("Earth Science");
    first.state.create_form.topic = TextBuffer::with_text("Volcanoes");
    first.process_message(Message::SubmitCreateForm);
    assert!(first.process_next().await);
    first.process_message(Message::SaveLesson);

    let id = first.state.result.as_ref().unwrap().lesson.id.clone().unwrap();
    assert!(dir.path().join("saved_lessons.json").exists());

    let mut second = engine(&dir, FakeBackend::default());
    assert_eq!(second.state.saved_lessons.len(), 1);
    let saved = &second.state.saved_lessons[0];
    assert_eq!(saved.id, id);
    assert_eq!(saved.topic, "Volcanoes");
    assert_eq!(saved.grounding_refs[0].title, "USGS");

    second.process_message(Message::Navigate(Screen::MyLessons));
    second.process_message(Message::OpenSelectedLesson);
    assert_eq!(second.state.screen, Screen::Result);
    let result = second.state.result.as_ref().unwrap();
    assert!(result.is_saved);
    assert_eq!(result.lesson.content, "# Volcanoes\nBuild a model");
}

#[tokio::test]
async fn test_delete_removes_record_from_disk() {
    let dir = TempDir::new().unwrap();
    let backend = FakeBackend::with_responses(vec![Ok(text_response("Plan"))]);

    let mut first = engine(&dir, backend);
    first.process_message(Message::Navigate(Screen::CreateNew));
    first.state.create_form.subject = TextBuffer::with_text("Math");
    first.state.create_form.topic = TextBuffer::with_text("Ratios");
    first.process_message(Message::SubmitCreateForm);
    first.process_next().await;
    first.process_message(Message::SaveLesson);
    let id = first.state.result.as_ref().unwrap().lesson.id.clone().unwrap();

    first.process_message(Message::RequestDelete { id });
    first.process_message(Message::ConfirmDelete);
    assert_eq!(first.state.screen, Screen::MyLessons);

    let second = engine(&dir, FakeBackend::default());
    assert!(second.state.saved_lessons.is_empty());
}

#[tokio::test]
async fn test_style_match_reads_source_file() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("example-plan.txt");
    fs::write(&source, "Objective:\nWarm-up:\nExit ticket:").unwrap();

    let backend = Arc::new(FakeBackend::with_responses(vec![Ok(text_response(
        "Objective: tides",
    ))]));
    let mut engine = Engine::new(
        Settings::default(),
        Arc::clone(&backend),
        open_store(Some(dir.path().to_path_buf())),
        keyed_credentials(),
    );
    engine.process_message(Message::Navigate(Screen::MatchStyle));
    engine.state.match_form.file_path = TextBuffer::with_text(source.display().to_string());
    engine.state.match_form.topic = TextBuffer::with_text("Tides");
    engine.process_message(Message::SubmitMatchForm);
    assert!(engine.process_next().await);

    assert_eq!(engine.state.screen, Screen::Result);
    let result = engine.state.result.as_ref().unwrap();
    assert_eq!(result.lesson.source_file.as_deref(), Some(source.as_path()));
    assert_eq!(backend.calls().len(), 1);
}
