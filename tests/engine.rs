//! Engine and composer behavior against a mocked messaging backend.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use warmline::api::{Account, GeoPoint, MessageKind, MessagingApi};
use warmline::composer::{MessageComposer, Sequence};
use warmline::content::ContentSource;
use warmline::error::{ApiError, ContentError};
use warmline::journal::MessageJournal;
use warmline::{Config, Engine};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Text,
    Media(MessageKind),
    Location,
}

/// Scriptable in-memory backend. The account list can be swapped between
/// reconciliation passes; send calls are recorded in order.
#[derive(Default)]
struct MockApi {
    accounts: Mutex<Vec<Account>>,
    calls: Mutex<Vec<Call>>,
    fail_media: bool,
    fail_text: bool,
}

impl MockApi {
    fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
            ..Self::default()
        }
    }

    fn failing_media(mut self) -> Self {
        self.fail_media = true;
        self
    }

    fn failing_text(mut self) -> Self {
        self.fail_text = true;
        self
    }

    fn set_accounts(&self, accounts: Vec<Account>) {
        *self.accounts.lock().unwrap() = accounts;
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn send_failure(endpoint: &str) -> ApiError {
    ApiError::Status {
        endpoint: endpoint.to_string(),
        status: 500,
    }
}

#[async_trait]
impl MessagingApi for MockApi {
    async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn send_text(&self, _token: &str, _to: &str, _body: &str) -> Result<(), ApiError> {
        self.record(Call::Text);
        if self.fail_text {
            return Err(send_failure("/chat/send/text"));
        }
        Ok(())
    }

    async fn send_media(
        &self,
        _token: &str,
        _to: &str,
        kind: MessageKind,
        _payload: &str,
        _annotation: Option<&str>,
    ) -> Result<(), ApiError> {
        self.record(Call::Media(kind));
        if self.fail_media {
            return Err(send_failure(kind.endpoint()));
        }
        Ok(())
    }

    async fn send_location(
        &self,
        _token: &str,
        _to: &str,
        _point: &GeoPoint,
    ) -> Result<(), ApiError> {
        self.record(Call::Location);
        if self.fail_media {
            return Err(send_failure(MessageKind::Location.endpoint()));
        }
        Ok(())
    }
}

/// Content source that always has a payload.
struct StaticContent;

#[async_trait]
impl ContentSource for StaticContent {
    async fn random_payload(&self, _kind: MessageKind) -> Result<Option<String>, ContentError> {
        Ok(Some("cGF5bG9hZA==".to_string()))
    }
}

fn account(id: &str) -> Account {
    Account {
        id: id.to_string(),
        jid: format!("55119999{id}:1@s.whatsapp.net"),
        name: format!("warm-{id}"),
        token: format!("token-{id}"),
        connected: true,
        logged_in: true,
        events: String::new(),
        expiration: 0,
        webhook: String::new(),
    }
}

fn test_config() -> Config {
    Config {
        base_url: "http://localhost:8080".to_string(),
        admin_token: "admin".to_string(),
        min_interval_ms: 40_000,
        max_interval_ms: 250_000,
        media_dir: PathBuf::from("./media"),
        log_dir: PathBuf::from("./logs"),
        account_prefix: "warm".to_string(),
        reconcile_secs: 300,
    }
}

fn journal() -> (tempfile::TempDir, Arc<MessageJournal>) {
    let dir = tempfile::tempdir().unwrap();
    let journal = Arc::new(MessageJournal::new(dir.path()).unwrap());
    (dir, journal)
}

fn engine_with(api: Arc<MockApi>) -> (tempfile::TempDir, Arc<Engine>) {
    let (dir, journal) = journal();
    let engine = Arc::new(Engine::new(
        test_config(),
        api,
        Arc::new(StaticContent),
        journal,
    ));
    (dir, engine)
}

fn composer_with(api: Arc<MockApi>) -> (tempfile::TempDir, MessageComposer) {
    let (dir, journal) = journal();
    let composer = MessageComposer::new(api, Arc::new(StaticContent), journal);
    (dir, composer)
}

#[tokio::test]
async fn reconcile_starts_new_and_stops_departed_schedulers() {
    let api = Arc::new(MockApi::with_accounts(vec![account("a"), account("b")]));
    let (_dir, engine) = engine_with(Arc::clone(&api));

    engine.clone().reconcile().await.unwrap();
    assert_eq!(engine.scheduled_accounts().await, ["a", "b"]);
    let b_profile = engine.assigned_profile("b").await.unwrap();

    api.set_accounts(vec![account("b"), account("c")]);
    engine.clone().reconcile().await.unwrap();

    assert_eq!(engine.scheduled_accounts().await, ["b", "c"]);
    assert!(engine.assigned_profile("a").await.is_none());
    assert!(engine.assigned_profile("c").await.is_some());
    // Survivor keeps its personality.
    assert_eq!(engine.assigned_profile("b").await.unwrap(), b_profile);
}

#[tokio::test]
async fn reconcile_ignores_accounts_outside_the_convention() {
    let mut disconnected = account("d");
    disconnected.connected = false;
    let mut logged_out = account("e");
    logged_out.logged_in = false;
    let mut wrong_name = account("f");
    wrong_name.name = "other-f".to_string();

    let api = Arc::new(MockApi::with_accounts(vec![
        account("a"),
        disconnected,
        logged_out,
        wrong_name,
    ]));
    let (_dir, engine) = engine_with(api);

    engine.clone().reconcile().await.unwrap();
    assert_eq!(engine.scheduled_accounts().await, ["a"]);
}

#[tokio::test]
async fn stopping_twice_is_a_no_op() {
    let api = Arc::new(MockApi::with_accounts(vec![account("a"), account("b")]));
    let (_dir, engine) = engine_with(api);

    engine.clone().reconcile().await.unwrap();
    engine.stop_account("a").await;
    engine.stop_account("a").await;
    assert_eq!(engine.scheduled_accounts().await, ["b"]);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_every_timer() {
    let api = Arc::new(MockApi::with_accounts(vec![account("a"), account("b")]));
    let (_dir, engine) = engine_with(api);

    let runner = tokio::spawn(Arc::clone(&engine).run());
    // Let the initial reconciliation pass run.
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    assert_eq!(engine.scheduled_accounts().await, ["a", "b"]);

    engine.shutdown();
    runner.await.unwrap();
    assert!(engine.scheduled_accounts().await.is_empty());
}

#[tokio::test]
async fn media_then_text_skips_text_when_media_fails() {
    let api = Arc::new(MockApi::default().failing_media());
    let (_dir, composer) = composer_with(Arc::clone(&api));

    let sent = composer
        .compose_with(Sequence::MediaThenText, &account("a"), "5511", None, "hi")
        .await;

    assert!(!sent);
    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert!(!calls.contains(&Call::Text));
}

#[tokio::test(start_paused = true)]
async fn media_then_text_sends_text_after_successful_media() {
    let api = Arc::new(MockApi::default());
    let (_dir, composer) = composer_with(Arc::clone(&api));

    let sent = composer
        .compose_with(Sequence::MediaThenText, &account("a"), "5511", None, "hi")
        .await;

    assert!(sent);
    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1], Call::Text);
}

#[tokio::test(start_paused = true)]
async fn text_failure_after_media_does_not_fail_the_sequence() {
    let api = Arc::new(MockApi::default().failing_text());
    let (_dir, composer) = composer_with(Arc::clone(&api));

    let sent = composer
        .compose_with(Sequence::MediaThenText, &account("a"), "5511", None, "hi")
        .await;

    // Overall success follows the mandatory first item.
    assert!(sent);
    assert_eq!(api.calls().last(), Some(&Call::Text));
}

#[tokio::test]
async fn text_then_media_stops_when_text_fails() {
    let api = Arc::new(MockApi::default().failing_text());
    let (_dir, composer) = composer_with(Arc::clone(&api));

    let sent = composer
        .compose_with(Sequence::TextThenMedia, &account("a"), "5511", None, "hi")
        .await;

    assert!(!sent);
    assert_eq!(api.calls(), vec![Call::Text]);
}

#[tokio::test]
async fn media_only_sends_exactly_one_item() {
    let api = Arc::new(MockApi::default());
    let (_dir, composer) = composer_with(Arc::clone(&api));

    let sent = composer
        .compose_with(Sequence::MediaOnly, &account("a"), "5511", None, "hi")
        .await;

    assert!(sent);
    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert!(!calls.contains(&Call::Text));
}

#[tokio::test(start_paused = true)]
async fn composition_uses_personality_vocabulary() {
    let api = Arc::new(MockApi::default());
    let (_dir, journal) = journal();
    let composer = MessageComposer::new(
        Arc::clone(&api) as Arc<dyn MessagingApi>,
        Arc::new(StaticContent),
        Arc::clone(&journal),
    );

    let profiles = warmline::personality::catalog::builtin_profiles();
    let minimalist = profiles
        .iter()
        .find(|p| p.id == "minimalist")
        .unwrap();

    let sent = composer
        .compose_with(
            Sequence::TextThenMedia,
            &account("a"),
            "5511",
            Some(minimalist),
            "default line",
        )
        .await;
    assert!(sent);

    let content = std::fs::read_to_string(journal.path()).unwrap();
    let text_entry = content
        .lines()
        .find(|line| line.contains("[TEXT]"))
        .unwrap();
    assert!(
        minimalist
            .vocabulary
            .iter()
            .any(|word| text_entry.contains(word.as_str())),
        "journal entry should carry a vocabulary line: {text_entry}"
    );
}
