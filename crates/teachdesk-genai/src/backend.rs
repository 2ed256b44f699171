//! Generative AI backend seam and the Gemini REST client
//!
//! The [`GenerativeBackend`] trait is the only place TeachDesk touches the
//! network for generation. Every call is one request/response with no retry.

use teachdesk_core::prelude::*;
use url::Url;

use crate::protocol::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

/// Default public endpoint for the Gemini API
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// A backend able to run a single `generateContent` call.
///
/// The API key is resolved by the caller for every call rather than cached here.
#[trait_variant::make(GenerativeBackend: Send)]
pub trait LocalGenerativeBackend {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

/// Gemini REST client built on reqwest
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GeminiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| Error::config(format!("Invalid API base URL '{}': {}", base_url, e)))?;

        // Url::join replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("teachdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::generation(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// `generateContent` URL for a model
    pub fn endpoint(&self, model: &str) -> Result<Url> {
        self.base_url
            .join(&format!("v1beta/models/{}:generateContent", model))
            .map_err(|e| Error::config(format!("Invalid model name '{}': {}", model, e)))
    }
}

impl GenerativeBackend for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model)?;
        debug!("POST {} (model={})", url, model);

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::generation(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = describe_error_body(&body);
            warn!("Gemini API returned {}: {}", status, message);
            return Err(Error::generation(format!("{} ({})", message, status)));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| Error::generation(format!("Malformed response: {}", e)))
    }
}

/// Human-readable message from an error response body
fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ if body.trim().is_empty() => "empty error response".to_string(),
        _ => body.trim().chars().take(200).collect(),
    }
}
