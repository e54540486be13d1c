//! Filler phrases, captions, and file names.
//!
//! The filler dictionary supplies the default text line a fire uses when
//! the sender has no personality vocabulary. Captions and file names mix
//! a fixed phrase with a time-based uniqueness token.

use chrono::{Local, Utc};
use rand::Rng;

/// Default text lines, one drawn uniformly per fire.
pub const FILLER_LINES: &[&str] = &[
    "Just chilling over here 😌",
    "Waiting for the next step...",
    "Good to go, trust me 👍",
    "Another day, another round!",
    "Almost there, hang on! ⏳",
    "I need a coffee ☕",
    "Oops, something's off here 😳",
    "The line moved, we're through!",
    "Woke up inspired today 😃",
    "Just waiting for a little help",
    "Waiting for the green light! 🟢",
    "Slow day, but it's moving",
    "Keeping an eye on everything 👀",
    "Could be home sleeping, honestly 😴",
    "Is it over yet? No, not yet...",
    "I can smell victory! 🏆",
    "Let's warm up a little more!",
    "Running smooth, no stress",
    "I need a vacation already! 🏖️",
    "I think I saw a bug go by 🐛",
    "Putting in overtime here",
    "I'm ready, call me!",
    "I just want peace 😇",
    "Busy day today!",
    "Tell me everything's fine 👌",
    "Expected less work today 😅",
    "Now what?",
    "Could be better, but it's ok",
    "Only with good music 🎶",
    "It's cold in here 🥶",
    "Warming up the engines...",
    "Break time?",
    "Wasn't me if it goes wrong!",
    "Hold on, here we go!",
    "Rooting for everything to work 🫡",
    "Look who's back!",
    "Waking up slowly...",
    "Today looks promising!",
    "Almost there, I swear!",
    "Still waiting... and waiting...",
    "Peace and love, good vibes only ✌️",
    "Call me and I'm there!",
    "Still going strong 💪",
    "Life runs in cycles, this is one more",
    "Turn up the music DJ! 🎵",
    "Let's move, people behind us!",
];

/// Caption phrases for image and video sends.
const CAPTION_PHRASES: &[&str] = &[
    "Check this out",
    "Look what I found",
    "Sharing this",
    "Thought of you",
    "From today",
];

/// File-name prefixes for document sends.
const FILE_PREFIXES: &[&str] = &["notes", "report", "draft", "doc"];

/// One uniform draw from the filler dictionary.
pub fn random_line<R: Rng>(rng: &mut R) -> &'static str {
    FILLER_LINES[rng.gen_range(0..FILLER_LINES.len())]
}

/// A caption with the current time as uniqueness token.
pub fn random_caption<R: Rng>(rng: &mut R) -> String {
    let phrase = CAPTION_PHRASES[rng.gen_range(0..CAPTION_PHRASES.len())];
    format!("{phrase} · {}", Local::now().format("%H:%M"))
}

/// A file name with the current timestamp as uniqueness token.
pub fn random_file_name<R: Rng>(rng: &mut R) -> String {
    let prefix = FILE_PREFIXES[rng.gen_range(0..FILE_PREFIXES.len())];
    format!("{prefix}_{}.txt", Utc::now().timestamp())
}

#[cfg(test)]
mod tests {
    use rand::thread_rng;

    use super::*;

    #[test]
    fn test_random_line_comes_from_dictionary() {
        let mut rng = thread_rng();
        for _ in 0..100 {
            assert!(FILLER_LINES.contains(&random_line(&mut rng)));
        }
    }

    #[test]
    fn test_caption_carries_a_phrase_and_token() {
        let mut rng = thread_rng();
        let caption = random_caption(&mut rng);
        assert!(CAPTION_PHRASES.iter().any(|p| caption.starts_with(p)));
        assert!(caption.contains('·'));
    }

    #[test]
    fn test_file_name_shape() {
        let mut rng = thread_rng();
        let name = random_file_name(&mut rng);
        assert!(name.ends_with(".txt"));
        assert!(FILE_PREFIXES.iter().any(|p| name.starts_with(p)));
    }
}
