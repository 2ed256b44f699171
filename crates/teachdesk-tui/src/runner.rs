//! Main TUI runner - entry point and event loop

use std::path::PathBuf;
use std::sync::Arc;

use teachdesk_app::config::{self, Settings};
use teachdesk_app::{open_store, CredentialManager, Engine, KeyValueStore, MemoryKeyValueStore};
use teachdesk_core::prelude::*;
use teachdesk_genai::{GeminiClient, GenerativeBackend};

use super::{event, render, terminal};

/// Command-line overrides for a run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Config file; defaults to `<config_dir>/teachdesk/config.toml`
    pub config_path: Option<PathBuf>,
    /// Lesson store directory, overriding `[storage] data_dir`
    pub data_dir: Option<PathBuf>,
    /// Keep saved lessons in memory only
    pub ephemeral: bool,
}

fn load_settings(options: &RunOptions) -> Settings {
    match options
        .config_path
        .clone()
        .or_else(config::default_config_path)
    {
        Some(path) => config::load_settings(&path),
        None => {
            warn!("No config directory available, using default settings");
            Settings::default()
        }
    }
}

fn open_lesson_store(options: &RunOptions, settings: &Settings) -> Box<dyn KeyValueStore + Send> {
    if options.ephemeral {
        info!("Ephemeral mode: saved lessons are kept in memory");
        return Box::new(MemoryKeyValueStore::new());
    }
    open_store(
        options
            .data_dir
            .clone()
            .or_else(|| settings.storage.data_dir())
            .or_else(config::default_data_dir),
    )
}

/// Run the TUI until the user quits
pub async fn run(options: RunOptions) -> Result<()> {
    let settings = load_settings(&options);
    info!(
        "Loaded settings: text_model={}, image_model={}",
        settings.generation.text_model, settings.generation.image_model
    );

    let backend = Arc::new(GeminiClient::new(&settings.generation.api_base_url)?);
    let store = open_lesson_store(&options, &settings);
    let credentials = CredentialManager::with_config_dir(
        config::config_dir().as_deref(),
        settings.credentials.clone(),
    );

    let mut engine = Engine::new(settings, backend, store, credentials);
    engine.start_signal_handler();

    // Install panic hook for terminal restoration
    terminal::install_panic_hook();
    let mut term = ratatui::init();

    let result = run_loop(&mut term, &mut engine);

    ratatui::restore();
    result
}

/// Main event loop
fn run_loop<B>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<B>) -> Result<()>
where
    B: GenerativeBackend + Send + Sync + 'static,
{
    while !engine.should_quit() {
        // Completions from generation tasks and the signal handler
        engine.drain_pending();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
