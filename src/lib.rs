//! Warmline keeps a pool of chat accounts looking organically active by
//! exchanging randomized text and media traffic between them.
//!
//! The engine:
//! - discovers live accounts from the messaging backend
//! - assigns each a behavioral personality by weighted draw
//! - times every account independently from its personality's interval
//!   distribution
//! - gates each fire on willingness and active hours
//! - composes a single-media or mixed media/text exchange to a random
//!   peer
//! - reconciles the scheduler set as accounts connect and disconnect

pub mod api;
pub mod composer;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod journal;
pub mod personality;

pub use config::Config;
pub use engine::Engine;
