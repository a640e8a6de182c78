use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Bot token and destination chat, held by the server.
#[derive(Clone)]
pub struct BotCredentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl fmt::Debug for BotCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotCredentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The Bot API answered `ok: false`.
    Rejected { description: Option<String> },
    /// The call never produced a readable answer.
    Transport(String),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::Rejected { description: Some(d) } => write!(f, "Telegram rejected message: {d}"),
            NotifyError::Rejected { description: None } => write!(f, "Telegram rejected message"),
            NotifyError::Transport(e) => write!(f, "Telegram transport error: {e}"),
        }
    }
}

impl std::error::Error for NotifyError {}

/// Outbound side of the relay: deliver one text message to one chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, credentials: &BotCredentials, text: &str) -> Result<(), NotifyError>;
}

pub type DynNotifier = Arc<dyn Notifier>;

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Bot API client for `sendMessage`.
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    api_base: String,
}

impl TelegramClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_base)
    }

    pub fn with_client(http: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
        }
    }

    fn send_message_url(&self, bot_token: &str) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            bot_token
        )
    }
}

// The bot token is part of the request URL, so reqwest errors are stripped of it
// before they can reach a log line or a response body.
fn transport(e: reqwest::Error) -> NotifyError {
    NotifyError::Transport(e.without_url().to_string())
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn send_message(&self, credentials: &BotCredentials, text: &str) -> Result<(), NotifyError> {
        let body = SendMessage {
            chat_id: &credentials.chat_id,
            text,
        };

        // Error replies are JSON too (with a non-2xx status), so read the body either way.
        let reply: ApiReply = self
            .http
            .post(self.send_message_url(&credentials.bot_token))
            .json(&body)
            .send()
            .await
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;

        if !reply.ok {
            return Err(NotifyError::Rejected {
                description: reply.description,
            });
        }
        Ok(())
    }
}
