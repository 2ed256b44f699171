//! # teachdesk-core - Core Domain Types
//!
//! Foundation crate for TeachDesk. Provides lesson domain types, error
//! handling, logging setup and export filename helpers.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`LessonResult`] - The active generated or viewed plan
//! - [`SavedLesson`] - A plan persisted in the local store
//! - [`GroundingReference`] - A citation returned alongside a generated plan
//! - [`ImageResolution`] - Requested size of a visual aid
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum with one variant per failure domain
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use teachdesk_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod prelude;
pub mod slug;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result};
pub use slug::{plan_text_filename, slugify, visual_aid_filename};
pub use types::{
    timestamp_now, GroundingReference, ImageResolution, LessonResult, SavedLesson,
    DEFAULT_GRADE, DEFAULT_SOURCE_TITLE, GRADE_LEVELS,
};
