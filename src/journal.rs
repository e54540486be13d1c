//! Append-only journal of outbound message activity.
//!
//! One line per event, written to `messages-YYYY-MM-DD.log` in the
//! configured directory. Diagnostics go through `tracing`; this sink
//! records the domain-level facts only: who sent what to whom, and
//! whether it went through. Write failures are traced, never propagated.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use tracing::warn;

use crate::api::MessageKind;
use crate::error::JournalError;

/// File-backed structured message log.
pub struct MessageJournal {
    path: PathBuf,
    file: Mutex<File>,
}

impl MessageJournal {
    /// Open (creating directories as needed) today's journal file under
    /// `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, JournalError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|source| JournalError::Open {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(format!("messages-{}.log", Local::now().format("%Y-%m-%d")));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| JournalError::Open {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Path of the current journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a text send.
    pub fn text(&self, from: &str, to: &str, line: &str, sent: bool) {
        self.append(&format!(
            "[TEXT] [{}] from={from} to={to} | {line}",
            status(sent)
        ));
    }

    /// Record a media send, with a caption/filename/coordinates detail
    /// where the kind carries one.
    pub fn media(&self, from: &str, to: &str, kind: MessageKind, sent: bool, detail: &str) {
        if detail.is_empty() {
            self.append(&format!(
                "[{}] [{}] from={from} to={to}",
                kind.label(),
                status(sent)
            ));
        } else {
            self.append(&format!(
                "[{}] [{}] from={from} to={to} | {detail}",
                kind.label(),
                status(sent)
            ));
        }
    }

    /// Record the start of a composition sequence.
    pub fn sequence(&self, from: &str, to: &str, label: &str) {
        self.append(&format!("[SEQUENCE] starting {label} from={from} to={to}"));
    }

    /// Record a recovered error.
    pub fn error(&self, context: &str, message: &str) {
        self.append(&format!("[ERROR] [{context}] {message}"));
    }

    fn append(&self, entry: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        match self.file.lock() {
            Ok(mut file) => {
                if let Err(e) = writeln!(file, "[{timestamp}] {entry}") {
                    warn!("failed to write journal entry: {e}");
                }
            }
            Err(_) => warn!("journal lock poisoned, dropping entry"),
        }
    }
}

fn status(sent: bool) -> &'static str {
    if sent { "SENT" } else { "FAILED" }
}
