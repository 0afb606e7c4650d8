//! Shared fakes for the form builder integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use audience_core::types::RemoteEntity;
use audience_core::{AudienceError, AudienceResult, HubConfig};
use audience_crypto::PayloadCipher;
use audience_forms::{AdAccountLister, AudienceFormBuilder, AudienceLister};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

// ─── Ad Platform ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakePlatform {
    pub accounts: Vec<RemoteEntity>,
    pub audiences: Vec<RemoteEntity>,
    pub fail_audiences: bool,
    pub account_calls: AtomicUsize,
    pub audience_calls: AtomicUsize,
    pub audience_account_ids: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub fn with_accounts(accounts: Vec<RemoteEntity>) -> Self {
        Self {
            accounts,
            ..Default::default()
        }
    }

    pub fn audience_calls(&self) -> usize {
        self.audience_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdAccountLister for FakePlatform {
    async fn ad_accounts(&self) -> anyhow::Result<Vec<RemoteEntity>> {
        self.account_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.clone())
    }
}

#[async_trait]
impl AudienceLister for FakePlatform {
    async fn custom_audiences(&self, ad_account_id: &str) -> anyhow::Result<Vec<RemoteEntity>> {
        self.audience_calls.fetch_add(1, Ordering::SeqCst);
        self.audience_account_ids
            .lock()
            .unwrap()
            .push(ad_account_id.to_string());
        if self.fail_audiences {
            anyhow::bail!("audience lookup rate limited");
        }
        Ok(self.audiences.clone())
    }
}

// ─── Cipher ─────────────────────────────────────────────────────────────────

/// Returns a fixed ciphertext and records every plaintext it was given.
pub struct RecordingCipher {
    pub ciphertext: String,
    pub fail: bool,
    pub plaintexts: Mutex<Vec<String>>,
}

impl RecordingCipher {
    pub fn returning(ciphertext: &str) -> Self {
        Self {
            ciphertext: ciphertext.to_string(),
            fail: false,
            plaintexts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::returning("")
        }
    }
}

#[async_trait]
impl PayloadCipher for RecordingCipher {
    async fn encrypt(&self, plaintext: &str) -> AudienceResult<String> {
        self.plaintexts.lock().unwrap().push(plaintext.to_string());
        if self.fail {
            return Err(AudienceError::Encryption("key unavailable".into()));
        }
        Ok(self.ciphertext.clone())
    }

    async fn decrypt(&self, _token: &str) -> AudienceResult<String> {
        Err(AudienceError::Decryption("not supported".into()))
    }
}

pub fn builder_with(base_url: &str, cipher: Arc<dyn PayloadCipher>) -> AudienceFormBuilder {
    let config = HubConfig {
        base_url: base_url.to_string(),
        cipher_master: None,
    };
    AudienceFormBuilder::new(config, cipher)
}

pub fn builder() -> AudienceFormBuilder {
    builder_with(
        "https://hub.example.com",
        Arc::new(RecordingCipher::returning("unused")),
    )
}

// ─── Log Capture ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub webhook_id: Option<String>,
}

/// Collects events emitted while its guard is installed.
#[derive(Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::set_default(subscriber)
    }

    pub fn errors(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.level == Level::ERROR)
            .cloned()
            .collect()
    }
}

struct WebhookVisitor(Option<String>);

impl Visit for WebhookVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "webhook_id" {
            self.0 = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "webhook_id" {
            self.0 = Some(value.to_string());
        }
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = WebhookVisitor(None);
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            webhook_id: visitor.0,
        });
    }
}
