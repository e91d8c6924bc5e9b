//! services/api/src/web/rest.rs
//!
//! Contains the Axum handler for the REST API endpoint and the master
//! definition for the OpenAPI specification.

use crate::error::ApiError;
use crate::web::orchestrator::{process_request, RequestOutcome};
use crate::web::state::AppState;
use axum::{extract::State, response::Json};
use relay_core::response::ResponseEnvelope;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        handle_request,
    ),
    components(
        schemas(RelayRequest, RequestReceivedResponse, RequestOutcome)
    ),
    tags(
        (name = "Session Relay API", description = "Records a request in its session folder and relays it to the external API.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Request and Response Structs
//=========================================================================================

/// Any JSON object. Only `session_name` is interpreted; every field is relayed.
#[derive(ToSchema)]
pub struct RelayRequest {
    /// Defaults to `default_session`.
    pub session_name: Option<String>,
}

/// Schema of the envelope sent after a request went through every step.
/// The handler itself returns a `ResponseEnvelope`.
#[derive(ToSchema)]
pub struct RequestReceivedResponse {
    pub message: String,
    pub data: RequestOutcome,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Run the orchestration path for one JSON body.
///
/// The optional `session_name` field selects the session folder; every other
/// field is passed through to the external API untouched.
#[utoipa::path(
    post,
    path = "/api/request",
    request_body = RelayRequest,
    responses(
        (status = 200, description = "Request processed", body = RequestReceivedResponse),
        (status = 400, description = "Body is not a JSON object or `session_name` is invalid"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn handle_request(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let envelope = process_request(&app_state, body).await?;
    info!("Request processed");
    Ok(Json(envelope))
}
