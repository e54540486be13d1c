//! Engine coordinator.
//!
//! Owns all mutable state — the personality assignments and the
//! account→timer map — and drives:
//! - one scheduler task per live account (see [`scheduler`])
//! - the periodic reconciliation pass over the live account set
//! - cooperative shutdown, cancelling every pending timer

mod scheduler;

pub use scheduler::pick_recipient;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{Account, MessagingApi};
use crate::composer::MessageComposer;
use crate::config::Config;
use crate::content::ContentSource;
use crate::error::ApiError;
use crate::journal::MessageJournal;
use crate::personality::PersonalityStore;

/// Scheduling coordinator for the whole account pool.
pub struct Engine {
    config: Config,
    api: Arc<dyn MessagingApi>,
    composer: MessageComposer,
    journal: Arc<MessageJournal>,
    store: Mutex<PersonalityStore>,
    timers: Mutex<HashMap<String, JoinHandle<()>>>,
    stop_signal: Notify,
}

impl Engine {
    /// Create an engine over the given collaborators.
    pub fn new(
        config: Config,
        api: Arc<dyn MessagingApi>,
        content: Arc<dyn ContentSource>,
        journal: Arc<MessageJournal>,
    ) -> Self {
        let composer = MessageComposer::new(Arc::clone(&api), content, Arc::clone(&journal));
        Self {
            config,
            api,
            composer,
            journal,
            store: Mutex::new(PersonalityStore::with_builtin()),
            timers: Mutex::new(HashMap::new()),
            stop_signal: Notify::new(),
        }
    }

    /// Run until [`Engine::shutdown`] is called: reconcile immediately,
    /// then on every tick of the configured period. Reconciliation
    /// failures are logged and the loop continues.
    pub async fn run(self: Arc<Self>) {
        info!(
            period_secs = self.config.reconcile_secs,
            prefix = %self.config.account_prefix,
            "engine starting"
        );

        let mut tick = tokio::time::interval(self.config.reconcile_interval());
        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) = Arc::clone(&self).reconcile().await {
                        warn!("reconciliation failed: {e}");
                        self.journal.error("reconcile", &e.to_string());
                    }
                }
                _ = self.stop_signal.notified() => break,
            }
        }

        self.stop_all().await;
        info!("engine stopped");
    }

    /// Request cooperative shutdown. Safe to call from any task, any
    /// number of times, including before `run` starts listening.
    pub fn shutdown(&self) {
        self.stop_signal.notify_one();
    }

    /// One reconciliation pass: stop schedulers for departed accounts,
    /// start (and assign a personality to) schedulers for new ones,
    /// leave survivors untouched.
    pub async fn reconcile(self: Arc<Self>) -> Result<(), ApiError> {
        let live = self.live_accounts().await?;
        let live_ids: HashSet<&str> = live.iter().map(|a| a.id.as_str()).collect();

        let departed: Vec<String> = {
            let timers = self.timers.lock().await;
            timers
                .keys()
                .filter(|id| !live_ids.contains(id.as_str()))
                .cloned()
                .collect()
        };
        for id in &departed {
            self.stop_account(id).await;
            self.store.lock().await.remove(id);
            info!(account = %id, "account departed, scheduler discarded");
        }

        let mut started = 0usize;
        for account in &live {
            let known = self.timers.lock().await.contains_key(&account.id);
            if !known {
                Arc::clone(&self).start_account(account.clone()).await;
                started += 1;
            }
        }

        let timer_count = self.timers.lock().await.len();
        info!(
            live = live.len(),
            started,
            stopped = departed.len(),
            timers = timer_count,
            "reconciliation pass complete"
        );
        for (personality, count) in self.store.lock().await.assignment_counts() {
            if count > 0 {
                debug!(%personality, count, "assignment tally");
            }
        }

        Ok(())
    }

    /// Fetch accounts and keep only the ones the engine should drive.
    pub(crate) async fn live_accounts(&self) -> Result<Vec<Account>, ApiError> {
        let accounts = self.api.list_accounts().await?;
        Ok(accounts
            .into_iter()
            .filter(|account| account.is_live(&self.config.account_prefix))
            .collect())
    }

    /// Assign a personality (idempotently) and spawn the scheduler task.
    async fn start_account(self: Arc<Self>, account: Account) {
        {
            let mut store = self.store.lock().await;
            let profile = store.ensure_assigned(&account.id);
            info!(account = %account.name, personality = %profile.name, "scheduler starting");
        }

        let id = account.id.clone();
        let engine = Arc::clone(&self);
        let handle = tokio::spawn(async move {
            scheduler::drive(engine, account).await;
        });

        // At most one live timer per account: replacing cancels the old one.
        if let Some(previous) = self.timers.lock().await.insert(id, handle) {
            previous.abort();
        }
    }

    /// Stop the account's scheduler, cancelling its pending timer.
    /// Idempotent: an absent entry is a no-op.
    pub async fn stop_account(&self, account_id: &str) {
        if let Some(handle) = self.timers.lock().await.remove(account_id) {
            handle.abort();
            debug!(account = %account_id, "timer cancelled");
        }
    }

    /// Cancel every pending timer.
    async fn stop_all(&self) {
        let mut timers = self.timers.lock().await;
        let count = timers.len();
        for (_, handle) in timers.drain() {
            handle.abort();
        }
        if count > 0 {
            info!(count, "all timers cancelled");
        }
    }

    /// Ids of accounts that currently have a scheduler, sorted.
    pub async fn scheduled_accounts(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.timers.lock().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Id of the personality assigned to the account, if any.
    pub async fn assigned_profile(&self, account_id: &str) -> Option<String> {
        self.store
            .lock()
            .await
            .get(account_id)
            .map(|profile| profile.id.clone())
    }
}
