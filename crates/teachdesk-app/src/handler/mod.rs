//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers per screen and modal
//! - `plan`: Plan submission and completion
//! - `result`: Result screen handlers (edit, save, visual aid, share)
//! - `lessons`: My Lessons selection, delete and store completions
//! - `credentials`: Credential precondition and key prompt

pub(crate) mod credentials;
pub(crate) mod keys;
pub(crate) mod lessons;
pub(crate) mod plan;
pub(crate) mod result;
pub(crate) mod update;


use std::path::PathBuf;

use teachdesk_core::{ImageResolution, SavedLesson};

use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Draft a plan from the Create New form
    GenerateNewPlan {
        token: u64,
        grade: String,
        subject: String,
        topic: String,
    },

    /// Draft a plan that mimics an example document
    GenerateStyleMatch {
        token: u64,
        source_file: PathBuf,
        topic: String,
    },

    /// Generate an infographic for the active result
    GenerateVisualAid {
        /// Token of the active result
        token: u64,
        plan_text: String,
        resolution: ImageResolution,
    },

    /// Upsert a lesson into the store
    PersistLesson {
        token: u64,
        lesson: SavedLesson,
        mark_saved: bool,
    },

    /// Delete a lesson from the store
    RemoveLesson { id: String },

    /// Hand a typed key to the credential manager
    SaveApiKey { key: String },

    /// Copy text to the terminal clipboard
    CopyToClipboard { text: String },

    /// Write the plan text file
    ExportPlanText { topic: String, content: String },

    /// Write the visual aid image file
    ExportVisualAid { topic: String, data_uri: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
