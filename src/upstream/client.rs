//! reqwest-backed implementation of [`UserApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use super::{UpstreamReply, UserApi};
use crate::config::Config;
use crate::error::UpstreamError;
use crate::models::{UserId, UserRecord};

const USER_AGENT_VALUE: &str = concat!("user-cache/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the upstream user API.
#[derive(Debug, Clone)]
pub struct HttpUserApi {
    client: Client,
    base_url: String,
}

impl HttpUserApi {
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        Self::new(
            &config.upstream_base_url,
            Duration::from_secs(config.upstream_timeout),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/api/users", self.base_url)
    }

    fn user_url(&self, id: UserId) -> String {
        format!("{}/api/users/{}", self.base_url, id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<UpstreamReply, UpstreamError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, bytes = body.len(), "upstream responded");
        Ok(UpstreamReply { status, body })
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list_users(&self, page: Option<u32>) -> Result<UpstreamReply, UpstreamError> {
        // An absent page is sent as an empty value, leaving the default to upstream
        let page = page.map(|p| p.to_string()).unwrap_or_default();
        let url = format!("{}?page={}", self.users_url(), page);
        debug!(url = %url, "listing users");
        self.send(self.client.get(url)).await
    }

    async fn get_user(&self, id: UserId) -> Result<UpstreamReply, UpstreamError> {
        let url = self.user_url(id);
        debug!(url = %url, "fetching user");
        self.send(self.client.get(url)).await
    }

    async fn create_user(&self, user: &UserRecord) -> Result<UpstreamReply, UpstreamError> {
        let url = self.users_url();
        debug!(url = %url, "creating user");
        self.send(self.client.post(url).json(user)).await
    }

    async fn update_user(
        &self,
        id: UserId,
        user: &UserRecord,
    ) -> Result<UpstreamReply, UpstreamError> {
        let url = self.user_url(id);
        debug!(url = %url, "updating user");
        self.send(self.client.put(url).json(user)).await
    }

    async fn delete_user(&self, id: UserId) -> Result<UpstreamReply, UpstreamError> {
        let url = self.user_url(id);
        debug!(url = %url, "deleting user");
        self.send(self.client.delete(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api(server: &MockServer) -> HttpUserApi {
        HttpUserApi::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpUserApi::new("https://reqres.in/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.base_url(), "https://reqres.in");
        assert_eq!(api.user_url(3), "https://reqres.in/api/users/3");
    }

    #[tokio::test]
    async fn test_list_users_passes_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"page":2}"#))
            .expect(1)
            .mount(&server)
            .await;

        let reply = api(&server).list_users(Some(2)).await.unwrap();
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, r#"{"page":2}"#);
    }

    #[tokio::test]
    async fn test_get_user_relays_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/23"))
            .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
            .mount(&server)
            .await;

        let reply = api(&server).get_user(23).await.unwrap();
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert!(!reply.is_success());
    }

    #[tokio::test]
    async fn test_create_user_sends_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .and(body_json(json!({"name": "morpheus"})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"name": "morpheus", "id": "7"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let user: UserRecord = serde_json::from_value(json!({"name": "morpheus"})).unwrap();
        let reply = api(&server).create_user(&user).await.unwrap();
        assert_eq!(reply.status, StatusCode::CREATED);
        assert!(reply.body.contains("morpheus"));
    }

    #[tokio::test]
    async fn test_update_and_delete_paths() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/users/5"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/users/5"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let api = api(&server);
        let user: UserRecord = serde_json::from_value(json!({"id": 5})).unwrap();
        assert!(api.update_user(5, &user).await.unwrap().is_success());
        assert_eq!(
            api.delete_user(5).await.unwrap().status,
            StatusCode::NO_CONTENT
        );
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Nothing listens on the discard port
        let api = HttpUserApi::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let result = api.get_user(1).await;
        assert!(matches!(result, Err(UpstreamError::Transport(_))));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/1"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let api = HttpUserApi::new(&server.uri(), Duration::from_millis(100)).unwrap();
        let result = api.get_user(1).await;
        assert!(matches!(result, Err(UpstreamError::Transport(_))));
    }
}
