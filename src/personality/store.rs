//! Personality assignment and the stochastic decision policies.
//!
//! The store maps live account ids to catalog entries and answers the
//! per-fire questions: when next, whether to send at all, which media
//! kind, which line. Draw logic lives in free functions that take an
//! explicit RNG so tests can exercise them directly.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{Local, Timelike};
use rand::Rng;
use tracing::debug;

use crate::api::MessageKind;
use crate::personality::catalog;
use crate::personality::profile::{MessageFrequency, PersonalityProfile};

/// Pick a catalog index by cumulative weight walk over `r in [0, 1)`.
///
/// Weights need not sum to 1; they are treated as cumulative shares of
/// their own sum. Rounding gaps fall back to the first entry, so the
/// draw never fails on a non-empty catalog.
pub fn select_by_weight<R: Rng>(
    rng: &mut R,
    profiles: &[PersonalityProfile],
    weights: &[(String, f64)],
) -> usize {
    let total: f64 = weights.iter().map(|(_, weight)| weight.max(0.0)).sum();
    if total <= 0.0 {
        return 0;
    }

    let r: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (index, profile) in profiles.iter().enumerate() {
        let weight = weights
            .iter()
            .find(|(id, _)| *id == profile.id)
            .map(|(_, weight)| weight.max(0.0))
            .unwrap_or(0.0);
        cumulative += weight / total;
        if r <= cumulative {
            return index;
        }
    }
    0
}

/// Draw the next fire interval from a profile's frequency parameters.
///
/// 70% of draws concentrate near `peak` (normalized peak plus a spread
/// of 0.3, clamped to [0, 1]); the rest are uniform. The result is
/// always within `[min, max]`.
pub fn draw_interval<R: Rng>(rng: &mut R, frequency: &MessageFrequency) -> Duration {
    let min = frequency.min.as_millis() as f64;
    let max = frequency.max.as_millis() as f64;
    let range = max - min;
    if range <= 0.0 {
        return frequency.min;
    }

    let normalized_peak = (frequency.peak.as_millis() as f64 - min) / range;
    let x = if rng.gen::<f64>() < 0.7 {
        (normalized_peak + (rng.gen::<f64>() - 0.5) * 0.3).clamp(0.0, 1.0)
    } else {
        rng.gen::<f64>()
    };

    Duration::from_millis((min + x * range) as u64)
}

/// Uniform fallback draw for accounts without an assigned personality.
pub fn uniform_interval<R: Rng>(rng: &mut R, min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Draw a message kind from a normalized preference table.
///
/// Walks kinds in canonical order so results do not depend on map
/// iteration. A zero (or negative) weight total falls back to text.
pub fn weighted_media_kind<R: Rng>(rng: &mut R, preferences: &HashMap<MessageKind, f64>) -> MessageKind {
    let total: f64 = preferences.values().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return MessageKind::Text;
    }

    let r: f64 = rng.gen();
    let mut cumulative = 0.0;
    for kind in MessageKind::ALL {
        let Some(weight) = preferences.get(&kind) else {
            continue;
        };
        if *weight <= 0.0 {
            continue;
        }
        cumulative += weight / total;
        if r <= cumulative {
            return kind;
        }
    }
    MessageKind::Text
}

/// Draw a media kind that is guaranteed not to be text.
///
/// With a preference table, draws according to the table and redraws
/// uniformly among the non-text kinds whenever text comes up. Without
/// one, draws uniformly among the non-text kinds directly.
pub fn non_text_media_kind<R: Rng>(
    rng: &mut R,
    preferences: Option<&HashMap<MessageKind, f64>>,
) -> MessageKind {
    if let Some(preferences) = preferences {
        let kind = weighted_media_kind(rng, preferences);
        if kind.is_media() {
            return kind;
        }
    }
    MessageKind::MEDIA[rng.gen_range(0..MessageKind::MEDIA.len())]
}

/// Maps live account ids to personality profiles.
///
/// An assignment is made with a weighted draw when an account is first
/// seen, stays stable while the account remains live, and is dropped
/// when the account departs.
pub struct PersonalityStore {
    profiles: Vec<PersonalityProfile>,
    weights: Vec<(String, f64)>,
    assignments: HashMap<String, usize>,
}

impl PersonalityStore {
    /// Store over the built-in catalog and weight table.
    pub fn with_builtin() -> Self {
        Self::new(catalog::builtin_profiles(), catalog::builtin_weights())
    }

    /// Store over a custom catalog. The catalog must be non-empty.
    pub fn new(profiles: Vec<PersonalityProfile>, weights: Vec<(String, f64)>) -> Self {
        assert!(!profiles.is_empty(), "personality catalog must be non-empty");
        Self {
            profiles,
            weights,
            assignments: HashMap::new(),
        }
    }

    /// Assign a freshly drawn profile, overwriting any prior assignment.
    pub fn assign(&mut self, account_id: &str) -> &PersonalityProfile {
        let index = select_by_weight(&mut rand::thread_rng(), &self.profiles, &self.weights);
        self.assignments.insert(account_id.to_string(), index);
        let profile = &self.profiles[index];
        debug!(account = account_id, personality = %profile.name, "personality assigned");
        profile
    }

    /// Assign only if the account has no profile yet. Idempotent.
    pub fn ensure_assigned(&mut self, account_id: &str) -> &PersonalityProfile {
        match self.assignments.get(account_id) {
            Some(&index) => &self.profiles[index],
            None => self.assign(account_id),
        }
    }

    /// Drop the account's assignment, if any.
    pub fn remove(&mut self, account_id: &str) {
        self.assignments.remove(account_id);
    }

    /// Current profile of an account, if assigned.
    pub fn get(&self, account_id: &str) -> Option<&PersonalityProfile> {
        self.assignments
            .get(account_id)
            .map(|&index| &self.profiles[index])
    }

    /// Next fire interval for the account. Unassigned accounts draw
    /// uniformly over the global fallback bounds.
    pub fn next_interval(
        &self,
        account_id: &str,
        global_min: Duration,
        global_max: Duration,
    ) -> Duration {
        let mut rng = rand::thread_rng();
        match self.get(account_id) {
            Some(profile) => draw_interval(&mut rng, &profile.frequency),
            None => uniform_interval(&mut rng, global_min, global_max),
        }
    }

    /// Willingness gate: proceed iff a uniform draw beats the average of
    /// the response and initiate chances. Unassigned accounts always
    /// pass.
    pub fn should_send(&self, account_id: &str) -> bool {
        match self.get(account_id) {
            Some(profile) => {
                let combined =
                    (profile.traits.response_chance + profile.traits.initiate_chance) / 2.0;
                rand::thread_rng().gen::<f64>() < combined
            }
            None => true,
        }
    }

    /// Active-hours gate at a given hour. Unassigned accounts are always
    /// active.
    pub fn is_active_at(&self, account_id: &str, hour: u32) -> bool {
        match self.get(account_id) {
            Some(profile) => profile.active_hours.contains(hour),
            None => true,
        }
    }

    /// Active-hours gate against the current local hour.
    pub fn is_active_now(&self, account_id: &str) -> bool {
        self.is_active_at(account_id, Local::now().hour())
    }

    /// Non-text media kind for the account's next media send.
    pub fn non_text_kind(&self, account_id: &str) -> MessageKind {
        non_text_media_kind(
            &mut rand::thread_rng(),
            self.get(account_id).map(|p| &p.media_preferences),
        )
    }

    /// One vocabulary line, or `None` if unassigned or the vocabulary is
    /// empty.
    pub fn line(&self, account_id: &str) -> Option<String> {
        let profile = self.get(account_id)?;
        if profile.vocabulary.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..profile.vocabulary.len());
        Some(profile.vocabulary[index].clone())
    }

    /// Number of assigned accounts per profile, in catalog order.
    pub fn assignment_counts(&self) -> Vec<(String, usize)> {
        let mut counts = vec![0usize; self.profiles.len()];
        for &index in self.assignments.values() {
            counts[index] += 1;
        }
        self.profiles
            .iter()
            .zip(counts)
            .map(|(profile, count)| (profile.name.clone(), count))
            .collect()
    }
}
