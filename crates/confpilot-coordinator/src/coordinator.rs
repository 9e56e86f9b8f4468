//! The request pipeline.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use confpilot_core::prompt::{classification_prompt, clean_reply, patch_prompt};
use confpilot_core::{AppName, CoordinatorConfig, PatchInstruction, SourceConfig, validate_document};
use confpilot_oracle::{OllamaOracle, Oracle};
use confpilot_store::{DocumentKind, DocumentSource, DocumentStore, FetchError, HttpSource};

use crate::error::{CoordinatorError, CoordinatorResult};

/// Routes a request to an application and applies the change the oracle
/// proposes. Holds no per-request state and can be shared across tasks.
#[derive(Clone)]
pub struct Coordinator {
    oracle: Arc<dyn Oracle>,
    schemas: Arc<dyn DocumentSource>,
    values: Arc<dyn DocumentSource>,
}

impl Coordinator {
    pub fn new(
        oracle: Arc<dyn Oracle>,
        schemas: Arc<dyn DocumentSource>,
        values: Arc<dyn DocumentSource>,
    ) -> Self {
        Self {
            oracle,
            schemas,
            values,
        }
    }

    /// Wire up the Ollama oracle and the configured document sources.
    pub fn from_config(config: &CoordinatorConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let oracle = Arc::new(OllamaOracle::new(client.clone(), config.oracle.clone()));
        let schemas = source_for(&config.schemas, DocumentKind::Schema, &client)?;
        let values = source_for(&config.values, DocumentKind::Values, &client)?;
        Ok(Self::new(oracle, schemas, values))
    }

    /// Run the full pipeline for one user request.
    ///
    /// Returns the patched, schema-valid configuration document.
    ///
    /// Whitespace-only input fails with [`CoordinatorError::MissingInput`]
    /// before any upstream call, since it carries no request for the oracle
    /// to classify.
    pub async fn handle_message(&self, user_input: &str) -> CoordinatorResult<Value> {
        if user_input.trim().is_empty() {
            return Err(CoordinatorError::MissingInput);
        }

        let app = self.classify(user_input).await?;
        let (schema, mut current) = self.fetch(&app).await?;
        let patch = self.propose(user_input, &current).await?;

        patch.apply(&mut current)?;
        validate_document(&schema, &current)?;

        info!(%app, path = %patch.path, "configuration change validated");
        Ok(current)
    }

    /// Stage 1: ask the oracle which application the request targets.
    pub async fn classify(&self, user_input: &str) -> CoordinatorResult<AppName> {
        let reply = self.oracle.complete(&classification_prompt(user_input)).await?;
        let app = AppName::from_reply(&reply);
        info!(reply = %reply, %app, known = app.is_known(), "classified request");
        Ok(app)
    }

    /// Stage 2: fetch the schema and current values for `app`.
    ///
    /// A transport fault on either side wins over a missing document.
    pub async fn fetch(&self, app: &AppName) -> CoordinatorResult<(Value, Value)> {
        let (schema, values) = tokio::join!(self.schemas.fetch(app), self.values.fetch(app));

        match (schema, values) {
            (Ok(schema), Ok(values)) => {
                debug!(%app, "schema and values fetched");
                Ok((schema, values))
            }
            (Err(FetchError::Upstream(msg)), _) | (_, Err(FetchError::Upstream(msg))) => {
                warn!(%app, error = %msg, "store unreachable");
                Err(CoordinatorError::Upstream(msg))
            }
            (schema, values) => {
                debug!(
                    %app,
                    schema_ok = schema.is_ok(),
                    values_ok = values.is_ok(),
                    "no data for app"
                );
                Err(CoordinatorError::NotFound(app.clone()))
            }
        }
    }

    /// Stage 3: ask the oracle for a single-field patch and parse it.
    pub async fn propose(
        &self,
        user_input: &str,
        current: &Value,
    ) -> CoordinatorResult<PatchInstruction> {
        let reply = self.oracle.complete(&patch_prompt(user_input, current)).await?;
        let cleaned = clean_reply(&reply);
        info!(reply = %cleaned, "patch proposed");

        PatchInstruction::parse(&cleaned).map_err(|e| {
            warn!(error = %e, "unusable patch reply");
            CoordinatorError::from(e)
        })
    }
}

fn source_for(
    config: &SourceConfig,
    kind: DocumentKind,
    client: &reqwest::Client,
) -> anyhow::Result<Arc<dyn DocumentSource>> {
    Ok(match config {
        SourceConfig::Url { url } => Arc::new(HttpSource::new(client.clone(), url)?),
        SourceConfig::Dir { dir } => Arc::new(DocumentStore::new(dir.clone(), kind)),
    })
}
