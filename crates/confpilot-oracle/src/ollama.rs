//! Ollama `/api/generate` client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use confpilot_core::OracleConfig;

use crate::{Oracle, OracleError};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_ctx: u32,
    num_predict: i32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Single-shot, non-streaming completions from an Ollama server.
#[derive(Clone)]
pub struct OllamaOracle {
    client: reqwest::Client,
    config: OracleConfig,
}

impl OllamaOracle {
    pub fn new(client: reqwest::Client, config: OracleConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }
}

#[async_trait]
impl Oracle for OllamaOracle {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                num_ctx: self.config.num_ctx,
                num_predict: self.config.num_predict,
            },
        };

        debug!(
            url = %self.config.url,
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "requesting completion"
        );

        let resp = self
            .client
            .post(&self.config.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(OracleError::Status(status.as_u16()));
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| OracleError::Decode(e.to_string()))?;

        Ok(parsed.response.trim().to_string())
    }
}
