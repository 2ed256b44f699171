//! # teachdesk-genai - Generative AI Adapter
//!
//! Turns lesson-planning requests into Gemini `generateContent` calls and
//! normalizes the responses into domain values.
//!
//! Depends on [`teachdesk_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Generation Flows
//! - [`LessonGenerator`] - `request_new_plan`, `request_style_match`, `request_visual_aid`
//! - [`PlanDraft`] - Normalized plan text with grounding references
//! - [`GeneratorConfig`] - Model names and request parameters
//!
//! ### Backend
//! - [`GenerativeBackend`] - Async seam for a single `generateContent` call
//! - [`GeminiClient`] - reqwest implementation against the public REST API
//!
//! ### Normalization
//! - [`extract_text()`], [`extract_grounding_refs()`], [`extract_image_data_uri()`]

pub mod attachment;
pub mod backend;
pub mod generator;
pub mod prompts;
pub mod protocol;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use attachment::{SourceAttachment, SourceKind};
pub use backend::{GeminiClient, GenerativeBackend, LocalGenerativeBackend, DEFAULT_API_BASE_URL};
pub use generator::{
    extract_grounding_refs, extract_image_data_uri, extract_text, GeneratorConfig,
    LessonGenerator, PlanDraft, DEFAULT_IMAGE_MIME, FALLBACK_PLAN_TEXT,
};
pub use protocol::{GenerateContentRequest, GenerateContentResponse};
