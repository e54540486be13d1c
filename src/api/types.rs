//! Wire types for the messaging backend.

use std::fmt;

use serde::Deserialize;

/// Snapshot of one managed chat account, as returned by the discovery
/// endpoint. Produced fresh on every discovery call; never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Backend identifier for the account.
    pub id: String,
    /// Compound connection identifier, e.g. `5511987654321:12@s.whatsapp.net`.
    pub jid: String,
    /// Display name.
    pub name: String,
    /// Per-account auth token used on send calls.
    pub token: String,
    /// Whether the account holds an open connection.
    #[serde(default)]
    pub connected: bool,
    /// Whether the account completed login.
    #[serde(rename = "loggedIn", default)]
    pub logged_in: bool,
    /// Event subscription list (passthrough, unused here).
    #[serde(default)]
    pub events: String,
    /// Session expiration (passthrough, unused here).
    #[serde(default)]
    pub expiration: i64,
    /// Webhook URL (passthrough, unused here).
    #[serde(default)]
    pub webhook: String,
}

impl Account {
    /// Routing address: the phone-equivalent part of the jid, up to the
    /// first `:`.
    pub fn route(&self) -> &str {
        self.jid.split(':').next().unwrap_or(&self.jid)
    }

    /// Whether this account should be driven by the engine: connected,
    /// logged in, and named with the given case-insensitive prefix.
    pub fn is_live(&self, prefix: &str) -> bool {
        self.connected
            && self.logged_in
            && self.name.to_lowercase().starts_with(&prefix.to_lowercase())
    }
}

/// Envelope of the discovery endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountsResponse {
    /// Backend status code.
    #[serde(default)]
    pub code: i32,
    /// Account snapshots.
    #[serde(default)]
    pub data: Vec<Account>,
    /// Whether the backend considers the call successful.
    pub success: bool,
}

/// Coordinate record for a location message.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180].
    pub longitude: f64,
    /// Human-readable label.
    pub name: String,
}

/// Closed enumeration of message kinds.
///
/// Each kind carries its send endpoint, payload field, and data-URI
/// prefix as static data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Text,
    Audio,
    Image,
    Video,
    Document,
    Sticker,
    Location,
}

impl MessageKind {
    /// Every kind, in canonical order. Weighted draws walk this order so
    /// results do not depend on hash-map iteration.
    pub const ALL: [MessageKind; 7] = [
        MessageKind::Text,
        MessageKind::Audio,
        MessageKind::Image,
        MessageKind::Video,
        MessageKind::Document,
        MessageKind::Sticker,
        MessageKind::Location,
    ];

    /// The non-text kinds.
    pub const MEDIA: [MessageKind; 6] = [
        MessageKind::Audio,
        MessageKind::Image,
        MessageKind::Video,
        MessageKind::Document,
        MessageKind::Sticker,
        MessageKind::Location,
    ];

    /// Send endpoint path on the backend.
    pub fn endpoint(self) -> &'static str {
        match self {
            MessageKind::Text => "/chat/send/text",
            MessageKind::Audio => "/chat/send/audio",
            MessageKind::Image => "/chat/send/image",
            MessageKind::Video => "/chat/send/video",
            MessageKind::Document => "/chat/send/document",
            MessageKind::Sticker => "/chat/send/sticker",
            MessageKind::Location => "/chat/send/location",
        }
    }

    /// Name of the kind-specific payload field in the send body.
    /// Location does not carry a single payload field.
    pub fn payload_field(self) -> Option<&'static str> {
        match self {
            MessageKind::Text => Some("Body"),
            MessageKind::Audio => Some("Audio"),
            MessageKind::Image => Some("Image"),
            MessageKind::Video => Some("Video"),
            MessageKind::Document => Some("Document"),
            MessageKind::Sticker => Some("Sticker"),
            MessageKind::Location => None,
        }
    }

    /// Data-URI prefix prepended to base64 media payloads.
    pub fn data_uri_prefix(self) -> Option<&'static str> {
        match self {
            MessageKind::Audio => Some("data:audio/ogg;base64,"),
            MessageKind::Image => Some("data:image/jpeg;base64,"),
            MessageKind::Video => Some("data:video/mp4;base64,"),
            MessageKind::Document => Some("data:application/octet-stream;base64,"),
            MessageKind::Sticker => Some("data:image/webp;base64,"),
            MessageKind::Text | MessageKind::Location => None,
        }
    }

    /// Lowercase key used for preference lookups and payload file stems.
    pub fn key(self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Audio => "audio",
            MessageKind::Image => "image",
            MessageKind::Video => "video",
            MessageKind::Document => "document",
            MessageKind::Sticker => "sticker",
            MessageKind::Location => "location",
        }
    }

    /// Uppercase label for journal entries.
    pub fn label(self) -> &'static str {
        match self {
            MessageKind::Text => "TEXT",
            MessageKind::Audio => "AUDIO",
            MessageKind::Image => "IMAGE",
            MessageKind::Video => "VIDEO",
            MessageKind::Document => "DOCUMENT",
            MessageKind::Sticker => "STICKER",
            MessageKind::Location => "LOCATION",
        }
    }

    /// Whether this kind is a media (non-text) kind.
    pub fn is_media(self) -> bool {
        !matches!(self, MessageKind::Text)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn account(name: &str, connected: bool, logged_in: bool) -> Account {
        Account {
            id: "abc".to_string(),
            jid: "5511987654321:12@s.whatsapp.net".to_string(),
            name: name.to_string(),
            token: "tok".to_string(),
            connected,
            logged_in,
            events: String::new(),
            expiration: 0,
            webhook: String::new(),
        }
    }

    #[test]
    fn test_route_extraction() {
        let acc = account("warm-01", true, true);
        assert_eq!(acc.route(), "5511987654321");
    }

    #[test]
    fn test_route_without_separator() {
        let mut acc = account("warm-01", true, true);
        acc.jid = "5511987654321".to_string();
        assert_eq!(acc.route(), "5511987654321");
    }

    #[test]
    fn test_is_live_requires_all_flags_and_prefix() {
        assert!(account("Warm-01", true, true).is_live("warm"));
        assert!(!account("Warm-01", false, true).is_live("warm"));
        assert!(!account("Warm-01", true, false).is_live("warm"));
        assert!(!account("other", true, true).is_live("warm"));
    }

    #[test]
    fn test_accounts_response_deserialization() {
        let raw = r#"{
            "code": 200,
            "success": true,
            "data": [{
                "id": "a1",
                "jid": "551100:7@s.whatsapp.net",
                "name": "warm-a",
                "token": "t1",
                "connected": true,
                "loggedIn": true
            }]
        }"#;
        let response: AccountsResponse = serde_json::from_str(raw).unwrap();
        assert!(response.success);
        assert_eq!(response.data.len(), 1);
        assert!(response.data[0].logged_in);
        assert_eq!(response.data[0].route(), "551100");
    }

    #[test]
    fn test_every_media_kind_has_endpoint_and_payload_field() {
        for kind in MessageKind::MEDIA {
            assert!(kind.endpoint().starts_with("/chat/send/"));
            assert!(kind.is_media());
            if kind != MessageKind::Location {
                assert!(kind.payload_field().is_some());
                assert!(kind.data_uri_prefix().is_some());
            }
        }
        assert_eq!(MessageKind::Text.payload_field(), Some("Body"));
        assert!(!MessageKind::Text.is_media());
    }
}
