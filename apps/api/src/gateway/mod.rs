//! Content-Generation Gateway — formats narrow projections of the portfolio
//! into prompts, calls the generative service, and parses typed results.
//!
//! Every operation is stateless and independent, and all of them share one
//! failure contract: transport errors, bad statuses, empty content, and
//! shape mismatches collapse into `GenerationError`, and nothing is written
//! to the store before a call succeeds.

pub mod drafts;
pub mod evaluate;
pub mod handlers;
pub mod prompts;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::llm_client::{strip_json_fences, GeminiClient, GenerationError};

/// The generative backend seam. `AppState` carries `Arc<dyn
/// GenerativeService>`, so tests can swap in a canned or failing backend
/// without touching any handler.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    async fn generate_text(&self, system: &str, prompt: &str)
        -> Result<String, GenerationError>;

    /// Returns an image reference (data URI or URL). Fails explicitly when
    /// the backend produces no image payload.
    async fn generate_image(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[async_trait]
impl GenerativeService for GeminiClient {
    async fn generate_text(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        GeminiClient::generate_text(self, system, prompt).await
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, GenerationError> {
        GeminiClient::generate_image(self, prompt).await
    }
}

/// Parses a model text response as JSON after stripping code fences.
/// A shape mismatch is a generation failure, never a partial result.
pub fn parse_json_payload<T: DeserializeOwned>(text: &str) -> Result<T, GenerationError> {
    serde_json::from_str(strip_json_fences(text)).map_err(GenerationError::Parse)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Backend that always answers with the same canned text/image.
    pub struct CannedService {
        pub text: String,
        pub image: String,
    }

    impl CannedService {
        pub fn text(text: &str) -> Self {
            CannedService {
                text: text.to_string(),
                image: "data:image/png;base64,aGVsbG8=".to_string(),
            }
        }
    }

    #[async_trait]
    impl GenerativeService for CannedService {
        async fn generate_text(
            &self,
            _system: &str,
            _prompt: &str,
        ) -> Result<String, GenerationError> {
            Ok(self.text.clone())
        }

        async fn generate_image(&self, _prompt: &str) -> Result<String, GenerationError> {
            Ok(self.image.clone())
        }
    }

    /// Backend that fails every call, as if the service were unreachable.
    pub struct UnreachableService;

    #[async_trait]
    impl GenerativeService for UnreachableService {
        async fn generate_text(
            &self,
            _system: &str,
            _prompt: &str,
        ) -> Result<String, GenerationError> {
            Err(GenerationError::Api {
                status: 503,
                message: "connection refused".to_string(),
            })
        }

        async fn generate_image(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Api {
                status: 503,
                message: "connection refused".to_string(),
            })
        }
    }
}
