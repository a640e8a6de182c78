//! Booking form state machine tests: touched fields, inline validation,
//! meeting-method switching and the submit lifecycle.

mod common;

use url::Url;

use support_review::booking::form::{
    BookingForm, Completion, FormPhase, SubmitError, CONFIRMATION, FAILURE_TITLE, scheduler_link,
};
use support_review::booking::{Field, MeetingMethod, RawBooking};
use common::*;

fn scheduler() -> Url {
    Url::parse("https://calendly.com/consultant").expect("scheduler url")
}

fn filled_form() -> BookingForm {
    BookingForm::restore(valid_booking(), [])
}

#[test]
fn test_untouched_field_is_not_validated_while_typing() {
    let mut form = BookingForm::new();
    form.input(Field::FullName, "J");
    assert!(form.errors().is_empty());

    form.blur(Field::FullName);
    assert_eq!(
        form.errors().get(Field::FullName),
        Some("Full Name must be at least 2 characters")
    );

    // Touched now, so each keystroke re-validates
    form.input(Field::FullName, "Jo");
    assert!(form.errors().get(Field::FullName).is_none());
}

#[test]
fn test_clearing_touched_company_drops_its_error() {
    let mut form = BookingForm::new();
    form.input(Field::CompanyName, "X");
    form.blur(Field::CompanyName);
    assert!(form.errors().contains(Field::CompanyName));

    form.input(Field::CompanyName, "");
    assert!(!form.errors().contains(Field::CompanyName));
}

#[test]
fn test_phone_input_is_cleaned() {
    let mut form = BookingForm::new();
    form.set_meeting_method(MeetingMethod::Phone);
    form.input(Field::Phone, "202-555-12x34");
    assert_eq!(form.values().phone, "202-555-1234");
}

#[test]
fn test_switching_from_phone_to_zoom_clears_phone_and_error() {
    let mut form = BookingForm::new();
    form.set_meeting_method(MeetingMethod::Phone);
    form.set_country_code("44");
    form.input(Field::Phone, "12345");
    form.blur(Field::Phone);
    assert!(form.errors().contains(Field::Phone));
    assert!(form.needs_phone());

    form.set_meeting_method(MeetingMethod::Zoom);
    assert_eq!(form.values().phone, "");
    assert_eq!(form.values().phone_country_code, "1");
    assert!(!form.errors().contains(Field::Phone));
    assert!(!form.needs_phone());
}

#[test]
fn test_switching_between_phone_methods_keeps_number() {
    let mut form = BookingForm::new();
    form.set_meeting_method(MeetingMethod::Phone);
    form.input(Field::Phone, "2025551234");
    form.set_meeting_method(MeetingMethod::WhatsApp);
    assert_eq!(form.values().phone, "2025551234");
}

#[test]
fn test_switching_away_from_telegram_clears_handle() {
    let mut form = BookingForm::new();
    form.input(Field::MeetingMethod, "telegram");
    form.input(Field::Telegram, "@ab");
    form.blur(Field::Telegram);
    assert!(form.errors().contains(Field::Telegram));

    form.input(Field::MeetingMethod, "google-meet");
    assert_eq!(form.values().telegram, "");
    assert!(!form.errors().contains(Field::Telegram));
    assert_eq!(form.method(), MeetingMethod::GoogleMeet);
}

#[test]
fn test_submit_blocks_and_reports_all_errors() {
    let mut form = BookingForm::new();
    form.set_meeting_method(MeetingMethod::Phone);

    let err = form.submit().unwrap_err();
    let SubmitError::Invalid(errors) = err else {
        panic!("expected validation failure");
    };
    assert!(errors.contains(Field::FullName));
    assert!(errors.contains(Field::Email));
    assert_eq!(errors.get(Field::Phone), Some("Phone number is required"));
    assert_eq!(form.phase(), FormPhase::Idle);
    assert_eq!(form.errors(), &errors);
    for field in Field::ALL {
        assert!(form.is_touched(field));
    }
}

#[test]
fn test_submit_digit_count_error() {
    let mut form = filled_form();
    form.set_meeting_method(MeetingMethod::Phone);
    form.input(Field::Phone, "12345");
    let Err(SubmitError::Invalid(errors)) = form.submit() else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.get(Field::Phone), Some("Phone number must be 6–20 digits"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_double_submit_is_rejected() {
    let mut form = filled_form();
    assert!(form.submit().is_ok());
    assert_eq!(form.phase(), FormPhase::Submitting);
    assert_eq!(form.submit().unwrap_err(), SubmitError::InFlight);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "complete() outside Submitting")]
fn test_complete_requires_submitting_phase() {
    let mut form = filled_form();
    form.complete(Ok(()), &scheduler());
}

#[test]
fn test_success_on_zoom_opens_scheduler_and_clears_form() {
    let mut form = filled_form();
    form.submit().expect("valid");

    let completion = form.complete(Ok(()), &scheduler());
    let Completion::OpenScheduler(url) = completion else {
        panic!("zoom bookings continue to the scheduler");
    };
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("name".to_string(), FULL_NAME.to_string()),
            ("email".to_string(), EMAIL.to_string()),
            ("a1".to_string(), "Acme Inc.".to_string()),
        ]
    );

    assert_eq!(form.phase(), FormPhase::Success);
    assert_eq!(form.values(), &RawBooking::default());
    assert!(form.errors().is_empty());
    assert_eq!(form.touched().count(), 0);
}

#[test]
fn test_success_on_phone_confirms() {
    let mut form = filled_form();
    form.set_meeting_method(MeetingMethod::Phone);
    form.input(Field::Phone, "2025551234");
    let request = form.submit().expect("valid");
    assert_eq!(request.contact.phone().map(|p| p.to_string()).as_deref(), Some("+1 2025551234"));
    assert_eq!(form.submit_label(), "Sending...");

    assert_eq!(form.complete(Ok(()), &scheduler()), Completion::Confirmed(CONFIRMATION));
    assert_eq!(form.method(), MeetingMethod::Zoom);
}

#[test]
fn test_failure_keeps_values_and_allows_resubmit() {
    let mut form = filled_form();
    form.submit().expect("valid");

    let completion = form.complete(Err("Bad Request: chat not found (502)".to_string()), &scheduler());
    assert_eq!(
        completion,
        Completion::Failed {
            title: FAILURE_TITLE,
            description: "Bad Request: chat not found (502)".to_string(),
        }
    );
    assert_eq!(form.phase(), FormPhase::Failed);
    assert_eq!(form.values().full_name, FULL_NAME);

    form.input(Field::Email, "jane@acme.io");
    assert_eq!(form.phase(), FormPhase::Idle);
    assert!(form.submit().is_ok());
}

#[test]
fn test_scheduler_link_skips_empty_values() {
    let values = RawBooking {
        full_name: "Jane Smith".to_string(),
        ..RawBooking::default()
    };
    let url = scheduler_link(&scheduler(), &values);
    assert_eq!(url.as_str(), "https://calendly.com/consultant?name=Jane+Smith");

    let url = scheduler_link(&scheduler(), &RawBooking::default());
    assert_eq!(url.as_str(), "https://calendly.com/consultant");
}

#[test]
fn test_submit_label_follows_method() {
    let mut form = BookingForm::new();
    assert_eq!(form.submit_label(), "Continue to Calendar");
    form.set_meeting_method(MeetingMethod::Telegram);
    assert_eq!(form.submit_label(), "Book Free Support Review");
}

#[test]
fn test_revalidate_touched_only_checks_touched_fields() {
    let values = RawBooking {
        full_name: "J".to_string(),
        email: "bad".to_string(),
        ..RawBooking::default()
    };
    let mut form = BookingForm::restore(values, [Field::Email]);
    form.revalidate_touched();
    assert!(form.errors().contains(Field::Email));
    assert!(!form.errors().contains(Field::FullName));
}
