//! Messaging backend interface.
//!
//! The engine talks to the backend through the [`MessagingApi`] trait:
//! one discovery call plus one send call per message kind. The default
//! implementation is the HTTP [`WuzapiClient`]; tests substitute mocks.

mod client;
mod types;

pub use client::WuzapiClient;
pub use types::{Account, AccountsResponse, GeoPoint, MessageKind};

use async_trait::async_trait;

use crate::error::ApiError;

/// Request/response capability against the messaging backend.
///
/// Implementations must map any non-success HTTP status to an error;
/// callers treat every error as "this cycle produced nothing" and never
/// crash on one.
#[async_trait]
pub trait MessagingApi: Send + Sync {
    /// Fetch all account snapshots known to the backend.
    async fn list_accounts(&self) -> Result<Vec<Account>, ApiError>;

    /// Send one text line from the account owning `token` to `to`.
    async fn send_text(&self, token: &str, to: &str, body: &str) -> Result<(), ApiError>;

    /// Send one media payload. `annotation` is a caption (image, video)
    /// or file name (document) where the kind carries one.
    async fn send_media(
        &self,
        token: &str,
        to: &str,
        kind: MessageKind,
        payload: &str,
        annotation: Option<&str>,
    ) -> Result<(), ApiError>;

    /// Send one location record.
    async fn send_location(&self, token: &str, to: &str, point: &GeoPoint)
    -> Result<(), ApiError>;
}
