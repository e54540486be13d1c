//! Built-in personality catalog.
//!
//! Five profiles covering the spread from compulsive texter to
//! once-an-hour minimalist. The catalog is fixed at startup; the weight
//! table governs how often each profile is drawn at assignment time.

use std::collections::HashMap;
use std::time::Duration;

use crate::api::MessageKind;
use crate::personality::profile::{
    ActiveHours, BehaviorTraits, MessageFrequency, PersonalityProfile,
};

/// Assignment weights per profile id, in catalog order. Authored to sum
/// to 1.0, but the weighted draw normalizes over whatever it is given.
pub fn builtin_weights() -> Vec<(String, f64)> {
    [
        ("chatterbox", 0.3),
        ("professional", 0.2),
        ("night_owl", 0.2),
        ("minimalist", 0.15),
        ("social_butterfly", 0.15),
    ]
    .into_iter()
    .map(|(id, weight)| (id.to_string(), weight))
    .collect()
}

/// The built-in profiles, in catalog order.
pub fn builtin_profiles() -> Vec<PersonalityProfile> {
    vec![
        chatterbox(),
        professional(),
        night_owl(),
        minimalist(),
        social_butterfly(),
    ]
}

fn preferences(weights: [(MessageKind, f64); 7]) -> HashMap<MessageKind, f64> {
    weights.into_iter().collect()
}

fn vocabulary(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

fn chatterbox() -> PersonalityProfile {
    PersonalityProfile {
        id: "chatterbox".to_string(),
        name: "Chatterbox".to_string(),
        description: "Loves to talk and messages often".to_string(),
        frequency: MessageFrequency {
            min: Duration::from_secs(30),
            max: Duration::from_secs(120),
            peak: Duration::from_secs(60),
        },
        media_preferences: preferences([
            (MessageKind::Text, 0.4),
            (MessageKind::Audio, 0.15),
            (MessageKind::Image, 0.2),
            (MessageKind::Video, 0.1),
            (MessageKind::Document, 0.05),
            (MessageKind::Sticker, 0.1),
            (MessageKind::Location, 0.0),
        ]),
        vocabulary: vocabulary(&[
            "Hey!",
            "Hello!",
            "What's up?",
            "How's it going?",
            "That's awesome!",
            "Interesting!",
            "So true!",
            "Agreed!",
            "Haha",
            "lol",
            "Nice!",
            "Thanks!",
            "No worries!",
            "Catch you later!",
            "Bye!",
            "Cheers!",
        ]),
        traits: BehaviorTraits {
            response_chance: 0.8,
            initiate_chance: 0.6,
            multi_message: 0.4,
            emoji: 0.7,
            voice: 0.3,
        },
        active_hours: ActiveHours { start: 7, end: 23 },
    }
}

fn professional() -> PersonalityProfile {
    PersonalityProfile {
        id: "professional".to_string(),
        name: "Professional".to_string(),
        description: "Formal and to the point".to_string(),
        frequency: MessageFrequency {
            min: Duration::from_secs(5 * 60),
            max: Duration::from_secs(30 * 60),
            peak: Duration::from_secs(15 * 60),
        },
        media_preferences: preferences([
            (MessageKind::Text, 0.6),
            (MessageKind::Audio, 0.05),
            (MessageKind::Image, 0.1),
            (MessageKind::Video, 0.05),
            (MessageKind::Document, 0.2),
            (MessageKind::Sticker, 0.0),
            (MessageKind::Location, 0.0),
        ]),
        vocabulary: vocabulary(&[
            "Good morning!",
            "Good afternoon!",
            "Good evening!",
            "Thank you for the information",
            "Understood",
            "I will check and get back to you",
            "Confirmed",
            "Perfect",
            "Best regards",
            "Kind regards",
        ]),
        traits: BehaviorTraits {
            response_chance: 0.9,
            initiate_chance: 0.3,
            multi_message: 0.1,
            emoji: 0.1,
            voice: 0.1,
        },
        active_hours: ActiveHours { start: 8, end: 18 },
    }
}

fn night_owl() -> PersonalityProfile {
    PersonalityProfile {
        id: "night_owl".to_string(),
        name: "Night Owl".to_string(),
        description: "Most active after dark".to_string(),
        frequency: MessageFrequency {
            min: Duration::from_secs(2 * 60),
            max: Duration::from_secs(10 * 60),
            peak: Duration::from_secs(5 * 60),
        },
        media_preferences: preferences([
            (MessageKind::Text, 0.3),
            (MessageKind::Audio, 0.2),
            (MessageKind::Image, 0.25),
            (MessageKind::Video, 0.15),
            (MessageKind::Document, 0.0),
            (MessageKind::Sticker, 0.1),
            (MessageKind::Location, 0.0),
        ]),
        vocabulary: vocabulary(&[
            "Yo!",
            "Sup?",
            "All good?",
            "Chill",
            "Easy",
            "No stress",
            "Cool cool",
            "Sick!",
            "Dope!",
            "Later",
        ]),
        traits: BehaviorTraits {
            response_chance: 0.7,
            initiate_chance: 0.5,
            multi_message: 0.6,
            emoji: 0.8,
            voice: 0.4,
        },
        // Wraps midnight: 20:00 through 06:00.
        active_hours: ActiveHours { start: 20, end: 6 },
    }
}

fn minimalist() -> PersonalityProfile {
    PersonalityProfile {
        id: "minimalist".to_string(),
        name: "Minimalist".to_string(),
        description: "Short, direct, infrequent".to_string(),
        frequency: MessageFrequency {
            min: Duration::from_secs(10 * 60),
            max: Duration::from_secs(60 * 60),
            peak: Duration::from_secs(30 * 60),
        },
        media_preferences: preferences([
            (MessageKind::Text, 0.8),
            (MessageKind::Audio, 0.05),
            (MessageKind::Image, 0.1),
            (MessageKind::Video, 0.0),
            (MessageKind::Document, 0.05),
            (MessageKind::Sticker, 0.0),
            (MessageKind::Location, 0.0),
        ]),
        vocabulary: vocabulary(&[
            "Ok", "Yes", "No", "Sure", "Got it", "Thx", "Np", "Hi", "Bye", "Later",
        ]),
        traits: BehaviorTraits {
            response_chance: 0.6,
            initiate_chance: 0.2,
            multi_message: 0.1,
            emoji: 0.2,
            voice: 0.1,
        },
        active_hours: ActiveHours { start: 9, end: 22 },
    }
}

fn social_butterfly() -> PersonalityProfile {
    PersonalityProfile {
        id: "social_butterfly".to_string(),
        name: "Social Butterfly".to_string(),
        description: "Very sociable, shares everything".to_string(),
        frequency: MessageFrequency {
            min: Duration::from_secs(60),
            max: Duration::from_secs(5 * 60),
            peak: Duration::from_secs(3 * 60),
        },
        media_preferences: preferences([
            (MessageKind::Text, 0.2),
            (MessageKind::Audio, 0.2),
            (MessageKind::Image, 0.3),
            (MessageKind::Video, 0.2),
            (MessageKind::Document, 0.0),
            (MessageKind::Sticker, 0.1),
            (MessageKind::Location, 0.0),
        ]),
        vocabulary: vocabulary(&[
            "Guys!",
            "Everyone!",
            "That's amazing!",
            "Love it!",
            "Wonderful!",
            "Sharing this here",
            "Look at this!",
            "Check it out!",
            "Kisses!",
            "Love you all!",
            "See you soon!",
            "Xoxo",
        ]),
        traits: BehaviorTraits {
            response_chance: 0.9,
            initiate_chance: 0.8,
            multi_message: 0.7,
            emoji: 0.9,
            voice: 0.5,
        },
        active_hours: ActiveHours { start: 6, end: 23 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_and_weights_align() {
        let profiles = builtin_profiles();
        let weights = builtin_weights();
        assert_eq!(profiles.len(), weights.len());
        for (profile, (id, weight)) in profiles.iter().zip(&weights) {
            assert_eq!(&profile.id, id);
            assert!(*weight > 0.0);
        }
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_frequency_bounds_are_ordered() {
        for profile in builtin_profiles() {
            let freq = profile.frequency;
            assert!(freq.min <= freq.peak, "{}", profile.id);
            assert!(freq.peak <= freq.max, "{}", profile.id);
        }
    }

    #[test]
    fn test_media_weights_are_non_negative() {
        for profile in builtin_profiles() {
            for (kind, weight) in &profile.media_preferences {
                assert!(*weight >= 0.0, "{} {kind}", profile.id);
            }
        }
    }

    #[test]
    fn test_profiles_with_text_have_vocabulary() {
        for profile in builtin_profiles() {
            assert!(!profile.vocabulary.is_empty(), "{}", profile.id);
        }
    }

    #[test]
    fn test_hours_within_day_range() {
        for profile in builtin_profiles() {
            assert!(profile.active_hours.start <= 23, "{}", profile.id);
            assert!(profile.active_hours.end <= 23, "{}", profile.id);
        }
    }
}
