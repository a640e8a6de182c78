//! Shared test infrastructure.
//!
//! - `RecordingNotifier` - a fake outbound `Notifier` that records every message
//! - `configured_relay()` / `unconfigured_relay()` - relays wired to a recorder
//! - `valid_booking()` - raw form values that pass validation

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use support_review::booking::RawBooking;
use support_review::relay::Relay;
use support_review::relay::telegram::{BotCredentials, Notifier, NotifyError};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const BOT_TOKEN: &str = "123456:TEST-TOKEN";
pub const CHAT_ID: &str = "-1001234567890";
pub const FULL_NAME: &str = "Jane O'Neil-Smith";
pub const EMAIL: &str = "jane@acme.io";

// ============================================================================
// FAKE NOTIFIER
// ============================================================================

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub chat_id: String,
    pub text: String,
}

/// Records messages instead of sending them; answers with a canned outcome.
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentMessage>>,
    outcome: Result<(), NotifyError>,
}

impl RecordingNotifier {
    pub fn ok() -> Arc<Self> {
        Self::with_outcome(Ok(()))
    }

    pub fn failing(err: NotifyError) -> Arc<Self> {
        Self::with_outcome(Err(err))
    }

    fn with_outcome(outcome: Result<(), NotifyError>) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            outcome,
        })
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().expect("recorder lock").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_message(&self, credentials: &BotCredentials, text: &str) -> Result<(), NotifyError> {
        self.sent.lock().expect("recorder lock").push(SentMessage {
            chat_id: credentials.chat_id.clone(),
            text: text.to_string(),
        });
        self.outcome.clone()
    }
}

// ============================================================================
// RELAY SETUP
// ============================================================================

pub fn configured_relay(notifier: Arc<RecordingNotifier>) -> Relay {
    Relay::new(Some(BOT_TOKEN.to_string()), Some(CHAT_ID.to_string()), notifier)
}

pub fn unconfigured_relay(notifier: Arc<RecordingNotifier>) -> Relay {
    Relay::new(None, None, notifier)
}

// ============================================================================
// FORM VALUES
// ============================================================================

/// Values that pass every rule, booked over Zoom.
pub fn valid_booking() -> RawBooking {
    RawBooking {
        full_name: FULL_NAME.to_string(),
        email: EMAIL.to_string(),
        company_name: "Acme Inc.".to_string(),
        ..RawBooking::default()
    }
}
