//! Behavioral profile types.

use std::collections::HashMap;
use std::time::Duration;

use crate::api::MessageKind;

/// Duration bounds and mode for the time between an account's fires.
///
/// Invariant: `min <= peak <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageFrequency {
    pub min: Duration,
    pub max: Duration,
    /// Most probable interval; interval draws concentrate around it.
    pub peak: Duration,
}

/// Per-fire probabilities, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorTraits {
    /// Chance of responding to a message.
    pub response_chance: f64,
    /// Chance of initiating a conversation.
    pub initiate_chance: f64,
    /// Chance of sending several messages in a row.
    pub multi_message: f64,
    /// Chance of using emojis.
    pub emoji: f64,
    /// Chance of sending voice messages.
    pub voice: f64,
}

/// Daily activity window, hours in [0, 23].
///
/// `start > end` denotes a window that wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveHours {
    pub start: u32,
    pub end: u32,
}

impl ActiveHours {
    /// Whether `hour` falls inside the window, bounds inclusive.
    pub fn contains(&self, hour: u32) -> bool {
        if self.start <= self.end {
            (self.start..=self.end).contains(&hour)
        } else {
            hour >= self.start || hour <= self.end
        }
    }
}

/// One behavioral personality: timing, tone, and media choices for a
/// single account. Immutable once defined.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalityProfile {
    /// Stable identifier used by the assignment weight table.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description of the behavior.
    pub description: String,
    /// Fire interval distribution parameters.
    pub frequency: MessageFrequency,
    /// Unnormalized non-negative weight per message kind.
    pub media_preferences: HashMap<MessageKind, f64>,
    /// Candidate utterances for generated text lines.
    pub vocabulary: Vec<String>,
    /// Per-fire behavior probabilities.
    pub traits: BehaviorTraits,
    /// Daily activity window.
    pub active_hours: ActiveHours,
}
