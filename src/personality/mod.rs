//! Personality catalog, assignment, and behavior policies.
//!
//! A personality bundles the probability parameters that drive one
//! account: fire-interval distribution, media preferences, vocabulary,
//! willingness traits, and the daily activity window.

pub mod catalog;
mod profile;
mod store;

pub use profile::{ActiveHours, BehaviorTraits, MessageFrequency, PersonalityProfile};
pub use store::{
    PersonalityStore, draw_interval, non_text_media_kind, select_by_weight, uniform_interval,
    weighted_media_kind,
};
