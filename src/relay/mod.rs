pub mod telegram;

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::booking::BookingPayload;
use telegram::{BotCredentials, DynNotifier, NotifyError};

pub use telegram::{Notifier, TelegramClient};

const PLACEHOLDER: &str = "—";
const HEADLINE: &str = "📅 New Book a Free Support Review";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Bot token or chat id missing. Names the missing variables for the log only.
    NotConfigured { missing: Vec<&'static str> },
    /// Telegram refused the message.
    Upstream(String),
    /// The outbound call failed before Telegram answered.
    Internal(String),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::NotConfigured { .. } => write!(f, "Server not configured"),
            RelayError::Upstream(d) => write!(f, "{d}"),
            RelayError::Internal(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RelayError {}

impl From<NotifyError> for RelayError {
    fn from(e: NotifyError) -> Self {
        match e {
            NotifyError::Rejected { description } => {
                RelayError::Upstream(description.unwrap_or_else(|| "Telegram error".to_string()))
            }
            NotifyError::Transport(msg) => RelayError::Internal(msg),
        }
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "ok": false,
            "error": self.to_string(),
        }))
    }
}

/// Forwards booking submissions to a Telegram chat. One delivery attempt per call.
pub struct Relay {
    bot_token: Option<String>,
    chat_id: Option<String>,
    notifier: DynNotifier,
}

impl Relay {
    /// Blank values count as missing.
    pub fn new(bot_token: Option<String>, chat_id: Option<String>, notifier: DynNotifier) -> Self {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            bot_token: present(bot_token),
            chat_id: present(chat_id),
            notifier,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }

    fn credentials(&self) -> Result<BotCredentials, RelayError> {
        match (&self.bot_token, &self.chat_id) {
            (Some(token), Some(chat)) => Ok(BotCredentials {
                bot_token: token.clone(),
                chat_id: chat.clone(),
            }),
            _ => {
                let mut missing = Vec::new();
                if self.bot_token.is_none() {
                    missing.push("TELEGRAM_BOT_TOKEN");
                }
                if self.chat_id.is_none() {
                    missing.push("TELEGRAM_CHAT_ID");
                }
                Err(RelayError::NotConfigured { missing })
            }
        }
    }

    /// Render the booking and send it. Fails before any network call when unconfigured.
    pub async fn relay(&self, payload: &BookingPayload) -> Result<(), RelayError> {
        let credentials = self.credentials().inspect_err(|e| {
            if let RelayError::NotConfigured { missing } = e {
                log::error!("Missing {}", missing.join(" and "));
            }
        })?;

        let text = render_message(payload);
        match self.notifier.send_message(&credentials, &text).await {
            Ok(()) => {
                log::info!(
                    "Booking request relayed (method: {})",
                    payload.meeting_method.as_deref().unwrap_or(PLACEHOLDER)
                );
                Ok(())
            }
            Err(e) => {
                match &e {
                    NotifyError::Rejected { .. } => log::error!("Telegram API error: {e}"),
                    NotifyError::Transport(_) => log::error!("Booking notify error: {e}"),
                }
                Err(e.into())
            }
        }
    }
}

fn or_placeholder(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(PLACEHOLDER)
}

/// Multi-line summary of a booking as posted to the chat.
pub fn render_message(payload: &BookingPayload) -> String {
    let mut lines = vec![
        HEADLINE.to_string(),
        String::new(),
        format!("Name: {}", or_placeholder(&payload.full_name)),
        format!("Email: {}", or_placeholder(&payload.email)),
        format!("Company: {}", or_placeholder(&payload.company_name)),
        format!("Meeting method: {}", or_placeholder(&payload.meeting_method)),
    ];
    if let Some(phone) = payload.phone.as_deref().filter(|v| !v.trim().is_empty()) {
        lines.push(format!("Phone: {phone}"));
    }
    if let Some(tg) = payload.telegram.as_deref().filter(|v| !v.trim().is_empty()) {
        lines.push(format!("Telegram: {tg}"));
    }
    lines.join("\n")
}
