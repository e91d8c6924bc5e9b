//! services/api/src/adapters/http_api.rs
//!
//! This module contains the adapter for the external JSON API.
//! It implements the `ExternalApiService` port from the `core` crate using `reqwest`.

use async_trait::async_trait;
use relay_core::ports::{ExternalApiService, PortError, PortResult};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `ExternalApiService` port with a shared `reqwest` client.
#[derive(Clone)]
pub struct ReqwestApiAdapter {
    client: Client,
}

impl ReqwestApiAdapter {
    /// Creates a new `ReqwestApiAdapter` whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

//=========================================================================================
// `ExternalApiService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ExternalApiService for ReqwestApiAdapter {
    async fn post_json(
        &self,
        endpoint: &str,
        payload: &Value,
        headers: &HashMap<String, String>,
    ) -> PortResult<Value> {
        let mut request = self.client.post(endpoint).json(payload);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        info!("Calling external API at {}", endpoint);
        let response = request
            .send()
            .await
            .map_err(|e| PortError::RemoteCall(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PortError::RemoteCall(format!(
                "External API returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: Value = response
            .json()
            .await
            .map_err(|e| PortError::RemoteCall(format!("Failed to parse response: {}", e)))?;

        debug!("Received response from external API: {}", parsed);
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/endpoint", addr)
    }

    fn adapter() -> ReqwestApiAdapter {
        ReqwestApiAdapter::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn posts_payload_with_headers_and_returns_parsed_body() {
        let url = spawn(Router::new().route(
            "/endpoint",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({"echo": body, "auth": auth}))
            }),
        ))
        .await;

        let headers = HashMap::from([("Authorization".to_string(), "Bearer t0k3n".to_string())]);
        let reply = adapter()
            .post_json(&url, &json!({"x": 1}), &headers)
            .await
            .unwrap();

        assert_eq!(reply, json!({"echo": {"x": 1}, "auth": "Bearer t0k3n"}));
    }

    #[tokio::test]
    async fn non_success_status_is_a_remote_call_error() {
        let url = spawn(Router::new().route(
            "/endpoint",
            post(|| async { (StatusCode::BAD_GATEWAY, Json(json!({"error": "upstream"}))) }),
        ))
        .await;

        let err = adapter()
            .post_json(&url, &json!({}), &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::RemoteCall(_)));
    }

    #[tokio::test]
    async fn non_json_body_is_a_remote_call_error() {
        let url = spawn(Router::new().route("/endpoint", post(|| async { "plain text" }))).await;

        let err = adapter()
            .post_json(&url, &json!({}), &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::RemoteCall(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_remote_call_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = adapter()
            .post_json(&format!("http://{}/endpoint", addr), &json!({}), &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::RemoteCall(_)));
    }
}
