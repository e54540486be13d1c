//! Message composition state machine.
//!
//! One composition is either a single media item or a two-item sequence
//! (media then text, or text then media). The sequence is drawn
//! uniformly per composition, independent of personality; the media
//! kind and text line are personality-driven where one is assigned.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use crate::api::{Account, MessageKind, MessagingApi};
use crate::content::{ContentSource, location, phrases};
use crate::journal::MessageJournal;
use crate::personality::{PersonalityProfile, non_text_media_kind};

/// Shortest pause between the two items of a mixed sequence.
const PAUSE_MIN_MS: u64 = 5_000;
/// Longest pause between the two items of a mixed sequence.
const PAUSE_MAX_MS: u64 = 15_000;

/// Ordered plan for one fire's outbound activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    /// One media item, nothing else.
    MediaOnly,
    /// Media first; a text line follows only if the media send succeeds.
    MediaThenText,
    /// Text first; a media item follows only if the text send succeeds.
    TextThenMedia,
}

impl Sequence {
    /// Every sequence, for uniform draws.
    pub const ALL: [Sequence; 3] = [
        Sequence::MediaOnly,
        Sequence::MediaThenText,
        Sequence::TextThenMedia,
    ];

    /// Journal label.
    pub fn label(self) -> &'static str {
        match self {
            Sequence::MediaOnly => "media_only",
            Sequence::MediaThenText => "media_then_text",
            Sequence::TextThenMedia => "text_then_media",
        }
    }
}

/// One uniform sequence draw.
pub fn random_sequence<R: Rng>(rng: &mut R) -> Sequence {
    Sequence::ALL[rng.gen_range(0..Sequence::ALL.len())]
}

/// Builds and sends one outbound exchange per fire.
pub struct MessageComposer {
    api: Arc<dyn MessagingApi>,
    content: Arc<dyn ContentSource>,
    journal: Arc<MessageJournal>,
}

impl MessageComposer {
    /// Create a composer over the given collaborators.
    pub fn new(
        api: Arc<dyn MessagingApi>,
        content: Arc<dyn ContentSource>,
        journal: Arc<MessageJournal>,
    ) -> Self {
        Self {
            api,
            content,
            journal,
        }
    }

    /// Compose and send one exchange with a randomly drawn sequence.
    ///
    /// Returns whether the sequence succeeded overall: the outcome of
    /// its first (mandatory) item. The follow-up item of a mixed
    /// sequence cannot retroactively fail the exchange.
    pub async fn compose(
        &self,
        from: &Account,
        to_route: &str,
        profile: Option<&PersonalityProfile>,
        default_line: &str,
    ) -> bool {
        let sequence = random_sequence(&mut rand::thread_rng());
        self.compose_with(sequence, from, to_route, profile, default_line)
            .await
    }

    /// Compose and send one exchange with an explicit sequence.
    pub async fn compose_with(
        &self,
        sequence: Sequence,
        from: &Account,
        to_route: &str,
        profile: Option<&PersonalityProfile>,
        default_line: &str,
    ) -> bool {
        self.journal
            .sequence(from.route(), to_route, sequence.label());
        debug!(
            from = %from.name,
            to = to_route,
            sequence = sequence.label(),
            "composing exchange"
        );

        let kind = non_text_media_kind(
            &mut rand::thread_rng(),
            profile.map(|p| &p.media_preferences),
        );

        match sequence {
            Sequence::MediaOnly => self.send_media_item(from, to_route, kind).await,
            Sequence::MediaThenText => {
                let sent = self.send_media_item(from, to_route, kind).await;
                if sent {
                    self.pause().await;
                    let line = text_line(profile, default_line);
                    self.send_text_item(from, to_route, &line).await;
                }
                sent
            }
            Sequence::TextThenMedia => {
                let line = text_line(profile, default_line);
                let sent = self.send_text_item(from, to_route, &line).await;
                if sent {
                    self.pause().await;
                    self.send_media_item(from, to_route, kind).await;
                }
                sent
            }
        }
    }

    /// Randomized 5-15 s pause between the items of a mixed sequence.
    async fn pause(&self) {
        let wait = {
            let mut rng = rand::thread_rng();
            Duration::from_millis(rng.gen_range(PAUSE_MIN_MS..=PAUSE_MAX_MS))
        };
        tokio::time::sleep(wait).await;
    }

    async fn send_text_item(&self, from: &Account, to_route: &str, line: &str) -> bool {
        let sent = match self.api.send_text(&from.token, to_route, line).await {
            Ok(()) => true,
            Err(e) => {
                warn!(from = %from.name, to = to_route, "text send failed: {e}");
                false
            }
        };
        self.journal.text(from.route(), to_route, line, sent);
        sent
    }

    async fn send_media_item(&self, from: &Account, to_route: &str, kind: MessageKind) -> bool {
        if kind == MessageKind::Location {
            return self.send_location_item(from, to_route).await;
        }

        let payload = match self.content.random_payload(kind).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                warn!(%kind, "no payload available");
                self.journal
                    .media(from.route(), to_route, kind, false, "no payload available");
                return false;
            }
            Err(e) => {
                warn!(%kind, "payload lookup failed: {e}");
                self.journal
                    .media(from.route(), to_route, kind, false, &e.to_string());
                return false;
            }
        };

        let annotation = {
            let mut rng = rand::thread_rng();
            match kind {
                MessageKind::Image | MessageKind::Video => Some(phrases::random_caption(&mut rng)),
                MessageKind::Document => Some(phrases::random_file_name(&mut rng)),
                _ => None,
            }
        };

        let sent = match self
            .api
            .send_media(&from.token, to_route, kind, &payload, annotation.as_deref())
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(from = %from.name, to = to_route, %kind, "media send failed: {e}");
                false
            }
        };

        let detail = match (kind, &annotation) {
            (MessageKind::Document, Some(name)) => format!("file: {name}"),
            (_, Some(caption)) => format!("caption: {caption}"),
            (_, None) => String::new(),
        };
        self.journal
            .media(from.route(), to_route, kind, sent, &detail);
        sent
    }

    async fn send_location_item(&self, from: &Account, to_route: &str) -> bool {
        let point = location::random_location(&mut rand::thread_rng());

        let sent = match self.api.send_location(&from.token, to_route, &point).await {
            Ok(()) => true,
            Err(e) => {
                warn!(from = %from.name, to = to_route, "location send failed: {e}");
                false
            }
        };

        let detail = format!(
            "name: {}, lat: {}, lon: {}",
            point.name, point.latitude, point.longitude
        );
        self.journal
            .media(from.route(), to_route, MessageKind::Location, sent, &detail);
        sent
    }
}

/// Personality-generated line where available, else the caller-supplied
/// default.
fn text_line(profile: Option<&PersonalityProfile>, default_line: &str) -> String {
    if let Some(profile) = profile {
        if !profile.vocabulary.is_empty() {
            let index = rand::thread_rng().gen_range(0..profile.vocabulary.len());
            return profile.vocabulary[index].clone();
        }
    }
    default_line.to_string()
}
