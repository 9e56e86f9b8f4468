//! HTTP handlers.
//!
//! Errors are returned as `{"error": ..., "details": ...}` with the status
//! the failing stage maps to.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tracing::{debug, warn};

use confpilot_coordinator::CoordinatorError;
use confpilot_store::{DocumentKind, StoreError};

use crate::{CoordinatorState, StoreState};

/// Error body shared by every service.
#[derive(Debug, serde::Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

fn error_response(status: StatusCode, error: impl Into<String>, details: Option<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.into(),
            details,
        }),
    )
        .into_response()
}

/// Map a pipeline failure to its HTTP response.
fn coordinator_error_response(err: CoordinatorError) -> Response {
    match err {
        CoordinatorError::MissingInput => {
            error_response(StatusCode::BAD_REQUEST, "No input provided", None)
        }
        CoordinatorError::NotFound(app) => error_response(
            StatusCode::NOT_FOUND,
            format!("Could not find data for app: {app}"),
            None,
        ),
        CoordinatorError::Upstream(msg) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal service error: {msg}"),
            None,
        ),
        CoordinatorError::Oracle(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Oracle request failed",
            Some(e.to_string()),
        ),
        CoordinatorError::MalformedPatch(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to parse or apply LLM response",
            Some(e.to_string()),
        ),
        CoordinatorError::SchemaViolation(msg) => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Modified config failed schema validation",
            Some(msg),
        ),
        CoordinatorError::Internal(msg) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error", Some(msg))
        }
    }
}

// ── Coordinator ────────────────────────────────────────────────

/// POST /message
///
/// A body that is not JSON, or has no string `input`, is treated as missing
/// input. A non-string `input` has no request text to classify, so it gets
/// the same 400 as an absent one instead of reaching the oracle.
pub async fn handle_message(
    State(state): State<CoordinatorState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let input = match &body {
        Ok(Json(body)) => body.get("input").and_then(Value::as_str).unwrap_or_default(),
        Err(rejection) => {
            debug!(error = %rejection, "unreadable message body");
            ""
        }
    };

    match state.coordinator.handle_message(input).await {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(e) => {
            warn!(error = %e, "message failed");
            coordinator_error_response(e)
        }
    }
}

// ── Stores ─────────────────────────────────────────────────────

/// GET /{app_name}
pub async fn get_document(
    State(state): State<StoreState>,
    Path(app_name): Path<String>,
) -> Response {
    match state.store.get(&app_name).await {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(StoreError::NotFound(_)) => {
            let error = match state.store.kind() {
                DocumentKind::Schema => "Schema file not found",
                DocumentKind::Values => "Values file not found",
            };
            error_response(StatusCode::NOT_FOUND, error, None)
        }
        Err(e @ StoreError::CorruptData { .. }) => {
            warn!(%app_name, error = %e, "corrupt document");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error parsing JSON file", None)
        }
        Err(e) => {
            warn!(%app_name, error = %e, "document read failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error reading file",
                Some(e.to_string()),
            )
        }
    }
}

// ── Health ─────────────────────────────────────────────────────

/// GET /healthz
pub async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use confpilot_coordinator::Coordinator;
    use confpilot_oracle::ScriptedOracle;
    use confpilot_store::DocumentStore;
    use serde_json::json;

    use super::*;

    async fn body_json(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn fixture_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("matchmaking.schema.json"),
            r#"{"type": "object", "properties": {"maxSkillGap": {"type": "integer", "maximum": 500}}}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("matchmaking.values.json"),
            r#"{"maxSkillGap": 200}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("chat.schema.json"), "{ nope").unwrap();
        dir
    }

    fn coordinator_state(dir: &tempfile::TempDir, replies: &[&str]) -> (CoordinatorState, Arc<ScriptedOracle>) {
        let oracle = Arc::new(ScriptedOracle::new(replies.iter().copied()));
        let coordinator = Coordinator::new(
            oracle.clone(),
            Arc::new(DocumentStore::schemas(dir.path())),
            Arc::new(DocumentStore::values(dir.path())),
        );
        (
            CoordinatorState {
                coordinator: Arc::new(coordinator),
            },
            oracle,
        )
    }

    fn message(input: Value) -> Result<Json<Value>, JsonRejection> {
        Ok(Json(json!({ "input": input })))
    }

    #[tokio::test]
    async fn message_returns_patched_document() {
        let dir = fixture_dir();
        let (state, _) = coordinator_state(
            &dir,
            &["matchmaking", r#"{"path": "maxSkillGap", "value": "300"}"#],
        );

        let resp = handle_message(State(state), message(json!("widen the skill gap to 300"))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!({"maxSkillGap": 300}));
    }

    #[tokio::test]
    async fn missing_input_is_bad_request() {
        let dir = fixture_dir();
        let (state, oracle) = coordinator_state(&dir, &["matchmaking"]);

        let resp = handle_message(State(state.clone()), Ok(Json(json!({})))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, json!({"error": "No input provided"}));

        let resp = handle_message(State(state.clone()), message(json!(""))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = handle_message(State(state.clone()), message(json!("  \n\t"))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = handle_message(State(state), message(json!(42))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(oracle.prompts().is_empty());
    }

    #[tokio::test]
    async fn schema_violation_is_unprocessable() {
        let dir = fixture_dir();
        let (state, _) = coordinator_state(
            &dir,
            &["matchmaking", r#"{"path": "maxSkillGap", "value": 9000}"#],
        );

        let resp = handle_message(State(state), message(json!("skill gap 9000"))).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "Modified config failed schema validation");
        assert!(body["details"].is_string());
        assert!(body.get("maxSkillGap").is_none());
    }

    #[tokio::test]
    async fn unknown_app_is_not_found() {
        let dir = fixture_dir();
        let (state, _) = coordinator_state(&dir, &["weather"]);

        let resp = handle_message(State(state), message(json!("make it sunny"))).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(resp).await,
            json!({"error": "Could not find data for app: weather"})
        );
    }

    #[tokio::test]
    async fn garbage_patch_is_internal_error() {
        let dir = fixture_dir();
        let (state, _) = coordinator_state(&dir, &["matchmaking", "I cannot help with that."]);

        let resp = handle_message(State(state), message(json!("skill gap"))).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "Failed to parse or apply LLM response");
    }

    #[tokio::test]
    async fn store_serves_document() {
        let dir = fixture_dir();
        let state = StoreState {
            store: DocumentStore::values(dir.path()),
        };
        let resp = get_document(State(state), Path("matchmaking".to_string())).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!({"maxSkillGap": 200}));
    }

    #[tokio::test]
    async fn store_missing_is_not_found() {
        let dir = fixture_dir();
        let state = StoreState {
            store: DocumentStore::schemas(dir.path()),
        };
        let resp = get_document(State(state), Path("tournament".to_string())).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await, json!({"error": "Schema file not found"}));
    }

    #[tokio::test]
    async fn store_corrupt_is_internal_error() {
        let dir = fixture_dir();
        let state = StoreState {
            store: DocumentStore::schemas(dir.path()),
        };
        let resp = get_document(State(state), Path("chat".to_string())).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await, json!({"error": "Error parsing JSON file"}));
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        let resp = healthz().await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!({"status": "ok"}));
    }
}
