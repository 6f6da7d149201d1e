//! Webhook delivery and per-invocation orchestration

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::NotifierConfig;
use crate::error::Result;
use crate::event::extract;
use crate::message::{MessageCard, render};

/// What one invocation did, returned to the caller of the intake route.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationResult {
    pub invocation_id: String,
    pub delivered: bool,
    pub project: String,
    pub outcome: String,
}

/// Posts rendered cards to the configured webhook. The endpoint is fixed
/// at construction; nothing is read from the environment per invocation.
pub struct Notifier {
    client: reqwest::Client,
    config: NotifierConfig,
}

impl Notifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Single POST, no retry. A non-2xx response counts as a delivery
    /// failure the same as a transport error.
    pub async fn send(&self, card: &MessageCard) -> Result<()> {
        self.client
            .post(&self.config.webhook_url)
            .json(card)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Runs one invocation end to end: extract, render, send.
    /// A malformed envelope propagates and fails the invocation; a
    /// delivery failure is logged and reported in the result instead.
    pub async fn handle(&self, event: &Value) -> Result<InvocationResult> {
        let invocation_id = Uuid::now_v7().to_string();
        let outcome = extract(event)?;
        let word = if outcome.succeeded { "succeeded" } else { "failed" };

        info!(
            "Invocation {} - project '{}' build '{}' reported {}",
            invocation_id, outcome.project_name, outcome.build_id, word
        );

        let card = render(&outcome);
        let delivered = match self.send(&card).await {
            Ok(()) => {
                info!("Invocation {} - card delivered to webhook", invocation_id);
                true
            }
            Err(e) => {
                error!("Invocation {} - webhook delivery failed: {}", invocation_id, e);
                false
            }
        };

        Ok(InvocationResult {
            invocation_id,
            delivered,
            project: outcome.project_name,
            outcome: word.to_string(),
        })
    }
}
