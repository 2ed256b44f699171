//! teachdesk-app - Application state and orchestration for TeachDesk
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! view state machine, the Engine that drives it, configuration loading,
//! credential resolution, lesson persistence and plan export.

pub mod actions;
pub mod config;
pub mod credentials;
pub mod engine;
pub mod export;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod signals;
pub mod spawn;
pub mod state;
pub mod store;
pub mod text_buffer;

// Re-export primary types
pub use credentials::{CredentialManager, CredentialStatus};
pub use engine::Engine;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use state::{AppState, Screen};
pub use store::{open_store, FileKeyValueStore, KeyValueStore, LessonStore, MemoryKeyValueStore};
