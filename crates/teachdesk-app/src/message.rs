//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use teachdesk_core::{LessonResult, SavedLesson};

use crate::credentials::CredentialStatus;
use crate::input_key::InputKey;
use crate::state::Screen;
use crate::text_buffer::TextEdit;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Periodic tick (expires notices)
    Tick,

    /// Quit immediately (Ctrl+C, `q`, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    /// Leave the Landing screen (runs the credential check)
    GetStarted,
    /// Switch to a screen
    Navigate(Screen),
    /// Back to Home, clearing forms and the active result
    GoHome,

    // ─────────────────────────────────────────────────────────
    // Forms
    // ─────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    /// Edit the focused text (form field, key prompt or plan editor)
    EditText(TextEdit),
    SubmitCreateForm,
    SubmitMatchForm,

    // ─────────────────────────────────────────────────────────
    // Plan Requests
    // ─────────────────────────────────────────────────────────
    PlanReady {
        token: u64,
        result: Box<LessonResult>,
    },
    PlanFailed {
        token: u64,
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // Result Screen
    // ─────────────────────────────────────────────────────────
    StartEditing,
    SaveEdit,
    CancelEditing,
    SaveLesson,
    GenerateVisualAid,
    CycleResolution,
    ClearVisualAid,
    ToggleShareOptions,
    CopyPlan,
    DownloadPlan,
    ExportVisualAid,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    VisualAidReady {
        token: u64,
        image_url: String,
    },
    VisualAidFailed {
        token: u64,
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // My Lessons
    // ─────────────────────────────────────────────────────────
    SelectPrevLesson,
    SelectNextLesson,
    OpenSelectedLesson,
    /// Ask to delete a lesson (opens the confirmation dialog)
    RequestDelete {
        id: String,
    },
    ConfirmDelete,
    CancelDelete,

    // ─────────────────────────────────────────────────────────
    // Store Results
    // ─────────────────────────────────────────────────────────
    LessonPersisted {
        /// Token of the result that was saved
        token: u64,
        id: String,
        /// Explicit saves mark the result saved; implicit image updates do not
        mark_saved: bool,
        lessons: Vec<SavedLesson>,
    },
    LessonRemoved {
        id: String,
        lessons: Vec<SavedLesson>,
    },
    StoreFailed {
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // Credentials
    // ─────────────────────────────────────────────────────────
    SubmitApiKey,
    CancelKeyPrompt,
    CredentialUpdated {
        status: CredentialStatus,
    },
    CredentialRejected {
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────
    Copied,
    Exported {
        path: PathBuf,
    },
    ExportFailed {
        error: String,
    },
}
