//! Notification relay tests: message rendering, configuration checks and
//! mapping of notifier failures.

mod common;

use support_review::booking::form::BookingForm;
use support_review::booking::{BookingPayload, MeetingMethod};
use support_review::relay::telegram::NotifyError;
use support_review::relay::{render_message, RelayError};
use common::*;

fn payload() -> BookingPayload {
    BookingPayload {
        full_name: Some(FULL_NAME.to_string()),
        email: Some(EMAIL.to_string()),
        meeting_method: Some("zoom".to_string()),
        ..BookingPayload::default()
    }
}

#[test]
fn test_render_message_uses_placeholders() {
    let text = render_message(&BookingPayload::default());
    assert_eq!(
        text,
        "📅 New Book a Free Support Review\n\nName: —\nEmail: —\nCompany: —\nMeeting method: —"
    );
}

#[test]
fn test_render_message_appends_contact_lines_when_present() {
    let text = render_message(&BookingPayload {
        company_name: Some("Acme Inc.".to_string()),
        meeting_method: Some("telegram".to_string()),
        telegram: Some("@validuser1".to_string()),
        phone: Some(String::new()),
        ..payload()
    });
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[2], format!("Name: {FULL_NAME}"));
    assert_eq!(lines[4], "Company: Acme Inc.");
    assert_eq!(lines[5], "Meeting method: telegram");
    assert_eq!(lines.last(), Some(&"Telegram: @validuser1"));
    assert!(!text.contains("Phone:"));
}

#[tokio::test]
async fn test_relay_sends_exactly_one_message() {
    let notifier = RecordingNotifier::ok();
    let relay = configured_relay(notifier.clone());

    relay.relay(&payload()).await.expect("relay succeeds");

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, CHAT_ID);
    assert!(sent[0].text.contains(FULL_NAME));
    assert!(sent[0].text.contains(EMAIL));
}

#[tokio::test]
async fn test_unconfigured_relay_makes_no_call() {
    let notifier = RecordingNotifier::ok();
    let relay = unconfigured_relay(notifier.clone());
    assert!(!relay.is_configured());

    let err = relay.relay(&payload()).await.unwrap_err();
    assert_eq!(
        err,
        RelayError::NotConfigured {
            missing: vec!["TELEGRAM_BOT_TOKEN", "TELEGRAM_CHAT_ID"]
        }
    );
    assert_eq!(err.to_string(), "Server not configured");
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_blank_secret_counts_as_missing() {
    let notifier = RecordingNotifier::ok();
    let relay = support_review::relay::Relay::new(
        Some(BOT_TOKEN.to_string()),
        Some("   ".to_string()),
        notifier.clone(),
    );
    let err = relay.relay(&payload()).await.unwrap_err();
    assert_eq!(err, RelayError::NotConfigured { missing: vec!["TELEGRAM_CHAT_ID"] });
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_upstream_rejection_maps_to_upstream_error() {
    let notifier = RecordingNotifier::failing(NotifyError::Rejected {
        description: Some("Bad Request: chat not found".to_string()),
    });
    let relay = configured_relay(notifier.clone());

    let err = relay.relay(&payload()).await.unwrap_err();
    assert_eq!(err, RelayError::Upstream("Bad Request: chat not found".to_string()));
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_upstream_rejection_without_description() {
    let relay = configured_relay(RecordingNotifier::failing(NotifyError::Rejected {
        description: None,
    }));
    let err = relay.relay(&payload()).await.unwrap_err();
    assert_eq!(err.to_string(), "Telegram error");
}

#[tokio::test]
async fn test_transport_failure_maps_to_internal_error() {
    let relay = configured_relay(RecordingNotifier::failing(NotifyError::Transport(
        "connection refused".to_string(),
    )));
    let err = relay.relay(&payload()).await.unwrap_err();
    assert_eq!(err, RelayError::Internal("connection refused".to_string()));
}

#[tokio::test]
async fn test_validated_form_relays_normalized_contact() {
    let notifier = RecordingNotifier::ok();
    let relay = configured_relay(notifier.clone());

    let mut form = BookingForm::restore(valid_booking(), []);
    form.set_meeting_method(MeetingMethod::Telegram);
    form.input(support_review::booking::Field::Telegram, "https://t.me/validuser1");
    let request = form.submit().expect("valid");

    relay.relay(&BookingPayload::from(&request)).await.expect("relayed");
    let text = &notifier.sent()[0].text;
    assert!(text.contains("Meeting method: telegram"));
    assert!(text.contains("Telegram: @validuser1"));
    assert!(text.contains("Company: Acme Inc."));
}
