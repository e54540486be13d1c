//! HTTP client for the wuzapi-style messaging backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use uuid::Uuid;

use crate::api::MessagingApi;
use crate::api::types::{Account, AccountsResponse, GeoPoint, MessageKind};
use crate::error::ApiError;

/// Path of the account discovery endpoint.
const DISCOVERY_ENDPOINT: &str = "/admin/users";

/// HTTP implementation of [`MessagingApi`].
///
/// Discovery authenticates with the admin credential; send calls carry
/// the per-account token instead.
pub struct WuzapiClient {
    http: Client,
    base_url: Url,
    admin_token: String,
}

impl WuzapiClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: &str, admin_token: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|source| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            http,
            base_url,
            admin_token: admin_token.into(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), endpoint)
    }

    /// POST one send body to `endpoint`, authenticated with the account token.
    async fn post_send(
        &self,
        endpoint: &str,
        token: &str,
        body: serde_json::Value,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(endpoint))
            .header("token", token)
            .json(&body)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

/// Unique message id attached to every outbound send.
fn message_id() -> String {
    format!("MSG_{}", Uuid::new_v4().simple())
}

#[async_trait]
impl MessagingApi for WuzapiClient {
    async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        let response = self
            .http
            .get(self.url(DISCOVERY_ENDPOINT))
            .header("Authorization", &self.admin_token)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: DISCOVERY_ENDPOINT.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: DISCOVERY_ENDPOINT.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope: AccountsResponse =
            response
                .json()
                .await
                .map_err(|source| ApiError::Transport {
                    endpoint: DISCOVERY_ENDPOINT.to_string(),
                    source,
                })?;

        if !envelope.success {
            return Err(ApiError::Rejected);
        }

        Ok(envelope.data)
    }

    async fn send_text(&self, token: &str, to: &str, body: &str) -> Result<(), ApiError> {
        let payload = serde_json::json!({
            "Phone": to,
            "Body": body,
            "Id": message_id(),
        });
        self.post_send(MessageKind::Text.endpoint(), token, payload)
            .await
    }

    async fn send_media(
        &self,
        token: &str,
        to: &str,
        kind: MessageKind,
        payload: &str,
        annotation: Option<&str>,
    ) -> Result<(), ApiError> {
        let Some(field) = kind.payload_field() else {
            // Location goes through send_location; text through send_text.
            return Ok(());
        };

        let content = match kind.data_uri_prefix() {
            Some(prefix) => format!("{prefix}{payload}"),
            None => payload.to_string(),
        };

        let mut body = serde_json::json!({
            "Phone": to,
            "Id": message_id(),
        });
        body[field] = serde_json::Value::String(content);

        if let Some(annotation) = annotation {
            let annotation_field = match kind {
                MessageKind::Document => "FileName",
                _ => "Caption",
            };
            body[annotation_field] = serde_json::Value::String(annotation.to_string());
        }

        self.post_send(kind.endpoint(), token, body).await
    }

    async fn send_location(
        &self,
        token: &str,
        to: &str,
        point: &GeoPoint,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "Phone": to,
            "Id": message_id(),
            "Latitude": point.latitude,
            "Longitude": point.longitude,
            "Name": point.name,
        });
        self.post_send(MessageKind::Location.endpoint(), token, body)
            .await
    }
}
