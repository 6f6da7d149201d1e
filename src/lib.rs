pub mod error;
pub mod event;
pub mod handlers;
pub mod message;
pub mod notify;

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::time::Instant;

use crate::error::{NotifyError, Result};
use crate::notify::Notifier;

/// Where cards get delivered. Resolved once at startup and handed to the
/// Notifier, never read from the environment mid-invocation.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub webhook_url: String,
}

impl NotifierConfig {
    pub fn from_env() -> Result<Self> {
        let webhook_url = std::env::var("TEAMS_WEBHOOK_URL").map_err(|_| {
            NotifyError::Config("TEAMS_WEBHOOK_URL is not set".to_string())
        })?;
        if webhook_url.trim().is_empty() {
            return Err(NotifyError::Config("TEAMS_WEBHOOK_URL is empty".to_string()));
        }
        Ok(Self { webhook_url })
    }
}

pub struct AppState {
    pub notifier: Notifier,
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
    pub received: AtomicU64,
    pub delivered: AtomicU64,
    pub failed: AtomicU64,
}

impl AppState {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            notifier,
            start_time: Instant::now(),
            started_at: Utc::now(),
            received: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }
}

pub type SharedState = Arc<AppState>;
