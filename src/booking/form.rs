//! Booking form state: values, touched fields, inline errors and the submit lifecycle.
//!
//! `Idle -> Validating -> Submitting -> {Success, Failed}`. A failed validation
//! lands back in `Idle` with every error shown; a failed relay keeps the values
//! so the visitor can resubmit.
//!
//! `input`, `blur` and `set_country_code` follow an interactive client field by
//! field. The server-rendered `/book` page only takes the submit path, starting
//! from `restore`.

use std::collections::BTreeSet;

use url::Url;

use super::validate::{clean_phone_input, validate_all, validate_field};
use super::{countries, BookingRequest, Field, FieldErrors, MeetingMethod, RawBooking};

pub const CONFIRMATION: &str = "Request sent! I'll be in touch within 24 hours.";
pub const FAILURE_TITLE: &str = "Could not send request";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// A submission is already in flight.
    InFlight,
}

/// What the page does after the relay answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Send the visitor on to the scheduler with their details pre-filled.
    OpenScheduler(Url),
    /// Show a confirmation message.
    Confirmed(&'static str),
    /// Show a toast; the form keeps its values.
    Failed { title: &'static str, description: String },
}

#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    values: RawBooking,
    touched: BTreeSet<Field>,
    errors: FieldErrors,
    phase: FormPhase,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a form from submitted values and the fields the visitor had already touched.
    pub fn restore(values: RawBooking, touched: impl IntoIterator<Item = Field>) -> Self {
        Self {
            values,
            touched: touched.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn values(&self) -> &RawBooking {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn method(&self) -> MeetingMethod {
        self.values.method()
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn touched(&self) -> impl Iterator<Item = Field> + '_ {
        self.touched.iter().copied()
    }

    pub fn needs_phone(&self) -> bool {
        self.method().needs_phone()
    }

    pub fn needs_telegram(&self) -> bool {
        self.method().needs_telegram()
    }

    /// Record a keystroke. Touched fields are re-validated immediately.
    pub fn input(&mut self, field: Field, value: &str) {
        if field == Field::MeetingMethod {
            match value.parse() {
                Ok(method) => self.set_meeting_method(method),
                Err(_) => self.values.meeting_method = value.to_string(),
            }
            return;
        }

        let value = match field {
            Field::Phone => clean_phone_input(value),
            _ => value.to_string(),
        };
        *self.values.value_mut(field) = value;

        if self.phase == FormPhase::Failed {
            self.phase = FormPhase::Idle;
        }
        if !self.is_touched(field) {
            return;
        }
        if field == Field::CompanyName && self.values.company_name.trim().is_empty() {
            self.errors.remove(field);
            return;
        }
        self.errors.set(field, validate_field(field, &self.values));
    }

    /// The field lost focus: mark it touched and validate it.
    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
        self.errors.set(field, validate_field(field, &self.values));
    }

    pub fn set_country_code(&mut self, code: &str) {
        if let Some(cc) = countries::find(code) {
            self.values.phone_country_code = cc.code.to_string();
            if self.is_touched(Field::Phone) {
                self.errors
                    .set(Field::Phone, validate_field(Field::Phone, &self.values));
            }
        }
    }

    /// Switch the meeting method, clearing contact details the new method does not use.
    pub fn set_meeting_method(&mut self, method: MeetingMethod) {
        self.values.meeting_method = method.as_str().to_string();
        self.errors.remove(Field::MeetingMethod);
        if !method.needs_phone() {
            self.values.phone_country_code = countries::DEFAULT_CALLING_CODE.to_string();
            self.values.phone.clear();
            self.errors.remove(Field::Phone);
        }
        if !method.needs_telegram() {
            self.values.telegram.clear();
            self.errors.remove(Field::Telegram);
        }
    }

    /// Re-run inline validation over every touched field.
    pub fn revalidate_touched(&mut self) {
        let touched: Vec<Field> = self.touched().collect();
        for field in touched {
            let message = match field {
                Field::CompanyName if self.values.company_name.trim().is_empty() => None,
                _ => validate_field(field, &self.values),
            };
            self.errors.set(field, message);
        }
    }

    /// Validate everything. On success the form moves to `Submitting` and hands out
    /// the request to relay; on failure it returns to `Idle` with all errors set.
    pub fn submit(&mut self) -> Result<BookingRequest, SubmitError> {
        if self.phase == FormPhase::Submitting {
            return Err(SubmitError::InFlight);
        }
        self.phase = FormPhase::Validating;
        self.touched.extend(Field::ALL);
        self.errors.clear();

        match validate_all(&self.values) {
            Ok(request) => {
                self.phase = FormPhase::Submitting;
                Ok(request)
            }
            Err(errors) => {
                self.errors = errors.clone();
                self.phase = FormPhase::Idle;
                Err(SubmitError::Invalid(errors))
            }
        }
    }

    /// Apply the relay outcome. Only valid after `submit` succeeded, while the form is
    /// `Submitting`.
    pub fn complete(&mut self, outcome: Result<(), String>, scheduler: &Url) -> Completion {
        debug_assert_eq!(self.phase, FormPhase::Submitting, "complete() outside Submitting");
        match outcome {
            Ok(()) => {
                let method = self.method();
                let completion = if method.opens_scheduler() {
                    Completion::OpenScheduler(scheduler_link(scheduler, &self.values))
                } else {
                    Completion::Confirmed(CONFIRMATION)
                };
                self.values = RawBooking::default();
                self.touched.clear();
                self.errors.clear();
                self.phase = FormPhase::Success;
                completion
            }
            Err(description) => {
                self.phase = FormPhase::Failed;
                Completion::Failed {
                    title: FAILURE_TITLE,
                    description,
                }
            }
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.method().opens_scheduler() {
            "Continue to Calendar"
        } else if self.phase == FormPhase::Submitting {
            "Sending..."
        } else {
            "Book Free Support Review"
        }
    }
}

/// Scheduler URL with name, email and company (`a1`) pre-filled when present.
pub fn scheduler_link(base: &Url, values: &RawBooking) -> Url {
    let mut url = base.clone();
    let params = [
        ("name", &values.full_name),
        ("email", &values.email),
        ("a1", &values.company_name),
    ];
    let present: Vec<_> = params
        .into_iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .collect();
    if !present.is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in present {
            query.append_pair(key, value.trim());
        }
    }
    url
}
