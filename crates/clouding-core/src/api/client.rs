//! HTTP client for the Clouding REST API.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use tracing::debug;

use super::response::ApiResponse;
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::models::{Server, ServerAction, ServerList};

/// Header carrying the account's API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// The calls the target resolver and bulk driver make against the API.
///
/// Every method performs exactly one HTTP request and never retries; retry
/// policy belongs to [`crate::driver::BulkActionDriver`].
#[async_trait]
pub trait ServerApi: Send + Sync {
    /// `GET /servers`
    async fn list_servers(&self) -> Result<Vec<Server>, CoreError>;

    /// `GET /servers/{id}`
    async fn get_server(&self, id: &str) -> Result<Server, CoreError>;

    /// `POST /servers/{id}/{archive|unarchive}`
    ///
    /// Returns the response whatever its status; only transport and decode
    /// failures are errors here.
    async fn request_action(&self, id: &str, action: ServerAction)
        -> Result<ApiResponse, CoreError>;
}

/// reqwest-backed [`ServerApi`] implementation.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut key = HeaderValue::from_str(config.api_key.trim())
            .map_err(|_| CoreError::Config("API key contains invalid characters".to_string()))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let http = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| CoreError::Config(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, method: Method, path: &str) -> Result<ApiResponse, CoreError> {
        let url = self.url(path);
        debug!(%method, %url, "sending request");

        let mut request = self.http.request(method.clone(), &url);
        if method == Method::POST {
            request = request.body("");
        }

        let response = request.send().await.map_err(|source| CoreError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|source| CoreError::Transport {
                url: url.clone(),
                source,
            })?;

        debug!(%url, status, bytes = text.len(), "received response");
        ApiResponse::from_parts(&url, status, &text)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, CoreError> {
        let response = self.send(Method::GET, path).await?;
        let url = response.url.clone();
        let body = response.into_body()?.ok_or_else(|| CoreError::Decode {
            url: url.clone(),
            message: "empty response body".to_string(),
        })?;

        serde_json::from_value(body).map_err(|e| CoreError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ServerApi for ApiClient {
    async fn list_servers(&self) -> Result<Vec<Server>, CoreError> {
        let list: ServerList = self.get_json("/servers").await?;
        Ok(list.servers)
    }

    async fn get_server(&self, id: &str) -> Result<Server, CoreError> {
        self.get_json(&format!("/servers/{}", id)).await
    }

    async fn request_action(
        &self,
        id: &str,
        action: ServerAction,
    ) -> Result<ApiResponse, CoreError> {
        self.send(
            Method::POST,
            &format!("/servers/{}/{}", id, action.path_segment()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ClientConfig::new("test-key").with_base_url(server.base_url())).unwrap()
    }

    #[tokio::test]
    async fn test_list_servers_sends_api_key_and_parses_ids() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/servers")
                .header("x-api-key", "test-key")
                .header("content-type", "application/json");
            then.status(200).json_body(json!({
                "servers": [
                    {"id": "srv-1", "name": "web", "status": "Active"},
                    {"id": "srv-2", "name": "db", "status": "Archived"}
                ]
            }));
        });

        let servers = client_for(&server).list_servers().await.unwrap();

        mock.assert();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].id, "srv-1");
        assert_eq!(servers[1].status(), Some("Archived"));
    }

    #[tokio::test]
    async fn test_get_server_not_found_is_api_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/servers/missing");
            then.status(404)
                .json_body(json!({"title": "Not Found", "status": 404}));
        });

        let err = client_for(&server).get_server("missing").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("Not Found"));
    }

    #[tokio::test]
    async fn test_list_servers_malformed_body_is_decode_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/servers");
            then.status(200).body("not json");
        });

        let err = client_for(&server).list_servers().await.unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_list_servers_wrong_shape_is_decode_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/servers");
            then.status(200).json_body(json!({"items": []}));
        });

        let err = client_for(&server).list_servers().await.unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_request_action_posts_to_action_path() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/servers/srv-1/unarchive")
                .header("x-api-key", "test-key");
            then.status(200)
                .json_body(json!({"id": "act-9", "status": "pending"}));
        });

        let response = client_for(&server)
            .request_action("srv-1", ServerAction::Unarchive)
            .await
            .unwrap();

        mock.assert();
        assert!(response.is_ok());
        assert_eq!(response.body.unwrap()["status"], "pending");
    }

    #[tokio::test]
    async fn test_request_action_returns_error_responses_unclassified() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/servers/srv-1/archive");
            then.status(400)
                .json_body(json!({"detail": "Server is already archived"}));
        });

        let response = client_for(&server)
            .request_action("srv-1", ServerAction::Archive)
            .await
            .unwrap();

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.error_message.as_deref(),
            Some("Server is already archived")
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Nothing listens on port 9 (discard) in the test environment.
        let client = ApiClient::new(
            ClientConfig::new("key")
                .with_base_url("http://127.0.0.1:9")
                .with_request_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        let err = client.list_servers().await.unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_invalid_api_key_characters_rejected() {
        let err = ApiClient::new(ClientConfig::new("bad\nkey")).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
