//! Test utilities for generation flows
//!
//! [`FakeBackend`] stands in for the Gemini API: it replays canned responses in
//! order and records every request it receives.

use std::collections::VecDeque;
use std::sync::Mutex;

use teachdesk_core::prelude::*;

use crate::backend::GenerativeBackend;
use crate::protocol::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GroundingChunk,
    GroundingMetadata, Part, WebChunk,
};

/// One recorded `generate_content` call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub api_key: String,
    pub request: GenerateContentRequest,
}

/// Scripted backend for tests
#[derive(Debug, Default)]
pub struct FakeBackend {
    responses: Mutex<VecDeque<Result<GenerateContentResponse>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeBackend {
    /// Backend that answers calls with `responses`, in order.
    ///
    /// Calls beyond the scripted responses fail with a generation error.
    pub fn with_responses(responses: Vec<Result<GenerateContentResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue another response
    pub fn push_response(&self, response: Result<GenerateContentResponse>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
    }

    /// Snapshot of the calls received so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl GenerativeBackend for FakeBackend {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                model: model.to_string(),
                api_key: api_key.to_string(),
                request: request.clone(),
            });
        }

        self.responses
            .lock()
            .ok()
            .and_then(|mut r| r.pop_front())
            .unwrap_or_else(|| Err(Error::generation("no scripted response")))
    }
}

/// Response whose first candidate carries `text`
pub fn text_response(text: &str) -> GenerateContentResponse {
    grounded_text_response(text, &[])
}

/// Text response with web grounding chunks given as `(title, uri)` pairs
pub fn grounded_text_response(
    text: &str,
    chunks: &[(Option<&str>, Option<&str>)],
) -> GenerateContentResponse {
    let grounding_metadata = (!chunks.is_empty()).then(|| GroundingMetadata {
        grounding_chunks: chunks
            .iter()
            .map(|(title, uri)| GroundingChunk {
                web: Some(WebChunk {
                    title: title.map(str::to_string),
                    uri: uri.map(str::to_string),
                }),
            })
            .collect(),
    });

    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts: vec![Part::text(text)],
            }),
            grounding_metadata,
            finish_reason: Some("STOP".to_string()),
        }],
    }
}

/// Response carrying one inline image
pub fn image_response(mime_type: &str, data: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts: vec![Part::inline(mime_type, data)],
            }),
            grounding_metadata: None,
            finish_reason: Some("STOP".to_string()),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_backend_replays_in_order_then_errors() {
        let backend = FakeBackend::with_responses(vec![Ok(text_response("one"))]);
        backend.push_response(Ok(text_response("two")));
        let request = GenerateContentRequest::user(vec![Part::text("hi")]);

        let first = tokio_test::block_on(backend.generate_content("m", "k", &request)).unwrap();
        let second = tokio_test::block_on(backend.generate_content("m", "k", &request)).unwrap();
        let third = tokio_test::block_on(backend.generate_content("m", "k", &request));

        assert_eq!(first, text_response("one"));
        assert_eq!(second, text_response("two"));
        assert!(third.is_err());
        assert_eq!(backend.calls().len(), 3);
    }
}
