//! Document sources as seen by the coordinator.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use confpilot_core::AppName;

use crate::error::{FetchError, StoreError, StoreResult};
use crate::store::DocumentStore;

/// Fetch one application's document (schema or current values).
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, app: &AppName) -> Result<Value, FetchError>;
}

/// Reads straight from a store directory.
///
/// Any store failure counts as "not available", matching what a caller of
/// the HTTP store sees for a non-200 answer.
#[async_trait]
impl DocumentSource for DocumentStore {
    async fn fetch(&self, app: &AppName) -> Result<Value, FetchError> {
        self.get(app.as_str()).await.map_err(|e| {
            if !matches!(e, StoreError::NotFound(_)) {
                warn!(%app, kind = %self.kind(), error = %e, "store lookup failed");
            }
            FetchError::NotFound(e.to_string())
        })
    }
}

/// A store service reached over HTTP at `GET {base_url}/{app}`.
#[derive(Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(client: reqwest::Client, base_url: &str) -> StoreResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| StoreError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl {
                url: base_url.to_string(),
                message: "not usable as a base url".to_string(),
            });
        }
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// URL of the document for `app`, with the name percent-encoded as a
    /// single path segment.
    pub fn document_url(&self, app: &AppName) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(app.as_str());
        }
        url
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, app: &AppName) -> Result<Value, FetchError> {
        let url = self.document_url(app);
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Upstream(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            debug!(%url, %status, "store answered without document");
            return Err(FetchError::NotFound(format!("{url} returned {status}")));
        }

        resp.json()
            .await
            .map_err(|e| FetchError::Upstream(format!("{url}: {e}")))
    }
}
