//! Lesson generation flows on top of a [`GenerativeBackend`]
//!
//! Each `request_*` method builds one request, makes exactly one backend call
//! and normalizes the response into domain values. Normalization lives in the
//! pure `extract_*` functions so it can be tested without a backend.

use std::path::Path;
use std::sync::Arc;

use teachdesk_core::prelude::*;
use teachdesk_core::{GroundingReference, ImageResolution};

use crate::attachment::SourceAttachment;
use crate::backend::GenerativeBackend;
use crate::prompts;
use crate::protocol::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig, Part,
};

/// Text shown in place of a plan when the backend returns no text
pub const FALLBACK_PLAN_TEXT: &str = "I couldn't generate a plan right now. Please try again.";

/// MIME type assumed for image parts that do not declare one
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Models and request parameters used by [`LessonGenerator`]
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub text_model: String,
    pub image_model: String,
    pub temperature: f32,
    pub aspect_ratio: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-3-pro-image-preview".to_string(),
            temperature: 0.7,
            aspect_ratio: "16:9".to_string(),
        }
    }
}

/// Normalized text plan with its citations
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDraft {
    pub content: String,
    pub grounding_refs: Vec<GroundingReference>,
}

impl PlanDraft {
    fn from_response(response: &GenerateContentResponse) -> Self {
        Self {
            content: extract_text(response),
            grounding_refs: extract_grounding_refs(response),
        }
    }
}

/// Runs the three generation flows against a backend
pub struct LessonGenerator<B> {
    backend: Arc<B>,
    config: GeneratorConfig,
}

impl<B> Clone for LessonGenerator<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            config: self.config.clone(),
        }
    }
}

impl<B: GenerativeBackend + Sync> LessonGenerator<B> {
    pub fn new(backend: Arc<B>, config: GeneratorConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Draft a plan from grade, subject and topic with web grounding enabled
    pub async fn request_new_plan(
        &self,
        api_key: &str,
        grade: &str,
        subject: &str,
        topic: &str,
    ) -> Result<PlanDraft> {
        require_non_empty("subject", subject)?;
        require_non_empty("topic", topic)?;

        let request = GenerateContentRequest::user(vec![Part::text(prompts::new_plan_prompt(
            grade, subject, topic,
        ))])
        .with_web_grounding()
        .with_generation_config(GenerationConfig {
            temperature: Some(self.config.temperature),
            image_config: None,
        });

        info!("Requesting new plan: grade={}, subject={}, topic={}", grade, subject, topic);
        let response = self
            .backend
            .generate_content(&self.config.text_model, api_key, &request)
            .await?;

        Ok(PlanDraft::from_response(&response))
    }

    /// Draft a plan for `topic` that mimics the structure of an example document
    pub async fn request_style_match(
        &self,
        api_key: &str,
        source_file: &Path,
        topic: &str,
    ) -> Result<PlanDraft> {
        require_non_empty("topic", topic)?;

        let attachment = SourceAttachment::read(source_file).await?;
        let request = GenerateContentRequest::user(vec![
            attachment.to_part(),
            Part::text(prompts::style_match_prompt(topic)),
        ])
        .with_web_grounding();

        info!(
            "Requesting style match: file={:?} ({} bytes), topic={}",
            attachment.path, attachment.byte_len, topic
        );
        let response = self
            .backend
            .generate_content(&self.config.text_model, api_key, &request)
            .await?;

        Ok(PlanDraft::from_response(&response))
    }

    /// Generate an infographic for a plan, returned as a `data:` URI
    pub async fn request_visual_aid(
        &self,
        api_key: &str,
        plan_text: &str,
        resolution: ImageResolution,
    ) -> Result<String> {
        let request =
            GenerateContentRequest::user(vec![Part::text(prompts::visual_aid_prompt(plan_text))])
                .with_generation_config(GenerationConfig {
                    temperature: None,
                    image_config: Some(ImageConfig {
                        image_size: resolution.as_image_size().to_string(),
                        aspect_ratio: self.config.aspect_ratio.clone(),
                    }),
                });

        info!("Requesting visual aid at {}", resolution);
        let response = self
            .backend
            .generate_content(&self.config.image_model, api_key, &request)
            .await?;

        extract_image_data_uri(&response)
            .ok_or_else(|| Error::generation("No image data received"))
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Response normalization
// ─────────────────────────────────────────────────────────────────────────────

/// Answer text of the first candidate, or [`FALLBACK_PLAN_TEXT`] when empty.
///
/// Reasoning parts (`thought: true`) are skipped.
pub fn extract_text(response: &GenerateContentResponse) -> String {
    let text: String = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter(|p| p.thought != Some(true))
                .filter_map(|p| p.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        FALLBACK_PLAN_TEXT.to_string()
    } else {
        text
    }
}

/// Web citations of the first candidate, dropping entries without a URI
pub fn extract_grounding_refs(response: &GenerateContentResponse) -> Vec<GroundingReference> {
    response
        .candidates
        .first()
        .and_then(|c| c.grounding_metadata.as_ref())
        .map(|metadata| {
            metadata
                .grounding_chunks
                .iter()
                .filter_map(|chunk| chunk.web.as_ref())
                .filter_map(|web| {
                    GroundingReference::from_parts(web.title.as_deref(), web.uri.as_deref())
                })
                .collect()
        })
        .unwrap_or_default()
}

/// First inline image of the first candidate as `data:<mime>;base64,<data>`
pub fn extract_image_data_uri(response: &GenerateContentResponse) -> Option<String> {
    let inline = response
        .candidates
        .first()?
        .content
        .as_ref()?
        .parts
        .iter()
        .filter_map(|p| p.inline_data.as_ref())
        .find(|d| !d.data.is_empty())?;

    let mime = if inline.mime_type.is_empty() {
        DEFAULT_IMAGE_MIME
    } else {
        inline.mime_type.as_str()
    };
    Some(format!("data:{};base64,{}", mime, inline.data))
}
