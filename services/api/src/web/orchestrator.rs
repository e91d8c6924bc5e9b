//! services/api/src/web/orchestrator.rs
//!
//! The per-request orchestration path: session folder, debug artifact,
//! external call, configuration record, response envelope. Steps run in
//! order and the first failure aborts the request; nothing already done
//! is rolled back.

use crate::web::state::AppState;
use relay_core::ports::{PortError, PortResult};
use relay_core::response::{build_response, ResponseEnvelope};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;
use utoipa::ToSchema;

pub const DEFAULT_SESSION_NAME: &str = "default_session";
pub const SESSION_ARTIFACT: &str = "data.txt";
pub const RESPONSE_MESSAGE: &str = "Request received";

/// The `data` part of a successful reply.
#[derive(Debug, Serialize, ToSchema)]
pub struct RequestOutcome {
    /// The request body as it was written to the session folder.
    pub file_content: String,
    #[schema(value_type = Object)]
    pub api_response: Value,
    /// Settings of the configuration record, `null` if none was found.
    #[schema(value_type = Object)]
    pub user_config: Value,
}

/// Reads `session_name` from the body, falling back to the default session.
fn session_name(body: &Value) -> PortResult<&str> {
    let object = body
        .as_object()
        .ok_or_else(|| PortError::InvalidInput("Request body must be a JSON object".to_string()))?;

    match object.get("session_name") {
        None => Ok(DEFAULT_SESSION_NAME),
        Some(Value::String(name)) => Ok(name.as_str()),
        Some(_) => Err(PortError::InvalidInput(
            "session_name must be a string".to_string(),
        )),
    }
}

pub async fn process_request(state: &AppState, body: Value) -> PortResult<ResponseEnvelope> {
    let config = &state.config;
    let session = session_name(&body)?;

    state.sessions.ensure_session_folder(session).await?;
    let artifact = state.sessions.resolve_session_folder(session)?.join(SESSION_ARTIFACT);
    debug!("Session {} resolved to {}", session, artifact.display());

    state.files.write_text(&artifact, &body.to_string()).await?;
    let file_content = state.files.read_text(&artifact).await?;

    let headers = HashMap::from([(
        "Authorization".to_string(),
        format!("Bearer {}", config.external_api_token),
    )]);
    let api_response = state
        .external_api
        .post_json(&config.external_api_url, &body, &headers)
        .await?;

    // Plain insert: a repeated request collides on the unique key.
    state
        .db
        .save_user_configuration(&config.config_api_key, &config.config_settings)
        .await?;
    let user_config = state
        .db
        .find_user_configuration(&config.config_api_key)
        .await?
        .map(|found| found.settings)
        .unwrap_or(Value::Null);

    let outcome = RequestOutcome {
        file_content,
        api_response,
        user_config,
    };
    let data = serde_json::to_value(outcome).map_err(|e| PortError::Unexpected(e.to_string()))?;
    Ok(build_response(RESPONSE_MESSAGE, Some(data)))
}
