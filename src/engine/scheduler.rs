//! Per-account timer loop.
//!
//! Each live account runs one task cycling armed → firing → armed until
//! its handle is aborted. Aborting during the sleep invalidates the
//! pending timer; a fire and its composition run strictly sequentially,
//! so one account never has two compositions in flight.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::api::Account;
use crate::content::phrases;
use crate::engine::Engine;

/// Drive one account's scheduler until the task is aborted.
pub(crate) async fn drive(engine: Arc<Engine>, account: Account) {
    loop {
        let interval = engine.store.lock().await.next_interval(
            &account.id,
            engine.config.min_interval(),
            engine.config.max_interval(),
        );
        debug!(account = %account.name, secs = interval.as_secs(), "timer armed");

        tokio::time::sleep(interval).await;
        fire(&engine, &account).await;
    }
}

/// One decision cycle: re-fetch the live set, pick a recipient, run the
/// gates, compose. Every failure path just ends the cycle; the caller
/// re-arms regardless.
async fn fire(engine: &Arc<Engine>, account: &Account) {
    debug!(account = %account.name, "timer fired");

    let live = match engine.live_accounts().await {
        Ok(live) => live,
        Err(e) => {
            warn!(account = %account.name, "discovery failed during fire: {e}");
            engine.journal.error("fire", &e.to_string());
            return;
        }
    };

    if live.len() < 2 {
        debug!(live = live.len(), "fewer than two live accounts, skipping cycle");
        return;
    }

    let target = {
        let mut rng = rand::thread_rng();
        pick_recipient(&mut rng, &live, &account.id).cloned()
    };
    let Some(target) = target else {
        return;
    };

    let (willing, active, profile) = {
        let store = engine.store.lock().await;
        (
            store.should_send(&account.id),
            store.is_active_now(&account.id),
            store.get(&account.id).cloned(),
        )
    };
    if !willing {
        debug!(account = %account.name, "suppressed by willingness gate");
        return;
    }
    if !active {
        debug!(account = %account.name, "outside active hours");
        return;
    }

    let line = phrases::random_line(&mut rand::thread_rng());
    let sent = engine
        .composer
        .compose(account, target.route(), profile.as_ref(), line)
        .await;

    if sent {
        info!(from = %account.route(), to = %target.route(), "exchange delivered");
    } else {
        info!(from = %account.route(), to = %target.route(), "exchange produced nothing");
    }
}

/// Uniformly pick a live account other than the sender, rejecting self
/// by redrawing. `None` iff no other live account exists.
pub fn pick_recipient<'a, R: Rng>(
    rng: &mut R,
    live: &'a [Account],
    self_id: &str,
) -> Option<&'a Account> {
    if !live.iter().any(|account| account.id != self_id) {
        return None;
    }
    loop {
        let candidate = &live[rng.gen_range(0..live.len())];
        if candidate.id != self_id {
            return Some(candidate);
        }
    }
}
