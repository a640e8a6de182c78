use std::sync::LazyLock;

use regex::Regex;

use super::countries;
use super::{
    BookingRequest, Field, FieldErrors, MeetingContact, MeetingMethod, PhoneNumber, RawBooking,
    TelegramHandle,
};

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;
pub const COMPANY_MIN: usize = 2;
pub const COMPANY_MAX: usize = 50;
pub const PHONE_DIGITS_MIN: usize = 6;
pub const PHONE_DIGITS_MAX: usize = 20;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("valid name regex"));

// Local part must not end in '.' or '\''; leading dots and ".." are checked separately.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
        .expect("valid email regex")
});

static TELEGRAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{5,32}$").expect("valid telegram regex"));

const PHONE_CHARSET_MSG: &str = "Use only digits, spaces, dots, dashes, parentheses, and a leading +";
const TELEGRAM_MSG: &str = "Please enter a valid Telegram link (e.g., https://t.me/username) or username (e.g., @username)";

/// Validate a full name: 2-50 chars of letters, spaces, hyphens and apostrophes.
pub fn validate_full_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Some("Full Name is required".to_string());
    }
    let len = trimmed.chars().count();
    if len < NAME_MIN {
        return Some(format!("Full Name must be at least {NAME_MIN} characters"));
    }
    if len > NAME_MAX {
        return Some(format!("Full Name must be less than {NAME_MAX} characters"));
    }
    if !NAME_RE.is_match(trimmed) {
        return Some(
            "Full Name can only contain letters, spaces, hyphens, and apostrophes".to_string(),
        );
    }
    None
}

/// Validate a work email address.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Work Email is required".to_string());
    }
    if !is_email(trimmed) {
        return Some("Please enter a valid email address".to_string());
    }
    None
}

fn is_email(s: &str) -> bool {
    !s.starts_with('.') && !s.contains("..") && EMAIL_RE.is_match(s)
}

/// Validate the optional company name (empty is OK).
pub fn validate_company(company: &str) -> Option<String> {
    let trimmed = company.trim();
    if trimmed.is_empty() {
        return None;
    }
    let len = trimmed.chars().count();
    if !(COMPANY_MIN..=COMPANY_MAX).contains(&len) {
        return Some(format!(
            "Company Name must be between {COMPANY_MIN} and {COMPANY_MAX} characters"
        ));
    }
    None
}

/// Empty selects the default method.
pub fn parse_meeting_method(value: &str) -> Result<MeetingMethod, String> {
    if value.trim().is_empty() {
        return Ok(MeetingMethod::default());
    }
    value
        .parse()
        .map_err(|_| "Please choose a supported meeting method".to_string())
}

/// Drop characters that can never be part of a phone number. Applied while typing.
pub fn clean_phone_input(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_digit() || c.is_whitespace() || "().+-".contains(*c))
        .collect()
}

/// Parse a phone number. A leading `+` carries its own calling code, otherwise
/// `selected_code` (the form's country picker) applies.
pub fn parse_phone(value: &str, selected_code: &str) -> Result<PhoneNumber, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Phone number is required".to_string());
    }

    let (international, rest) = match trimmed.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let charset_ok = rest
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || "().-".contains(c));
    if !charset_ok {
        return Err(PHONE_CHARSET_MSG.to_string());
    }

    let digits: String = rest.chars().filter(char::is_ascii_digit).collect();
    let (country_code, national, national_digits) = if international {
        let code = countries::match_prefix(&digits)
            .ok_or_else(|| "Unsupported country code".to_string())?;
        let national_digits = digits[code.code.len()..].to_string();
        (code.code, national_digits.clone(), national_digits)
    } else {
        let code = countries::find(selected_code)
            .ok_or_else(|| "Unsupported country code".to_string())?;
        (code.code, trimmed.to_string(), digits)
    };

    let count = national_digits.len();
    if !(PHONE_DIGITS_MIN..=PHONE_DIGITS_MAX).contains(&count) {
        return Err(format!(
            "Phone number must be {PHONE_DIGITS_MIN}–{PHONE_DIGITS_MAX} digits"
        ));
    }

    Ok(PhoneNumber {
        country_code: country_code.to_string(),
        national,
    })
}

/// Strip a `https://`, `t.me/` or `@` prefix, leaving the bare handle.
pub fn normalize_telegram(value: &str) -> &str {
    let mut s = value.trim();
    for scheme in ["https://", "http://"] {
        if let Some(rest) = s.strip_prefix(scheme) {
            s = rest;
            break;
        }
    }
    s = s.strip_prefix("t.me/").unwrap_or(s);
    s.strip_prefix('@').unwrap_or(s)
}

pub fn parse_telegram(value: &str) -> Result<TelegramHandle, String> {
    if value.trim().is_empty() {
        return Err("Telegram link or username is required".to_string());
    }
    let handle = normalize_telegram(value);
    if !TELEGRAM_RE.is_match(handle) {
        return Err(TELEGRAM_MSG.to_string());
    }
    Ok(TelegramHandle::new_unchecked(handle.to_string()))
}

/// Validate one field in the context of the other values. Phone and Telegram
/// only count when the selected meeting method asks for them.
pub fn validate_field(field: Field, values: &RawBooking) -> Option<String> {
    let method = values.method();
    match field {
        Field::FullName => validate_full_name(&values.full_name),
        Field::Email => validate_email(&values.email),
        Field::CompanyName => validate_company(&values.company_name),
        Field::MeetingMethod => parse_meeting_method(&values.meeting_method).err(),
        Field::Phone if method.needs_phone() => {
            parse_phone(&values.phone, &values.phone_country_code).err()
        }
        Field::Telegram if method.needs_telegram() => parse_telegram(&values.telegram).err(),
        Field::Phone | Field::Telegram => None,
    }
}

/// Validate every field, collecting all errors rather than stopping at the first.
pub fn validate_all(values: &RawBooking) -> Result<BookingRequest, FieldErrors> {
    let mut errors = FieldErrors::new();
    for field in [Field::FullName, Field::Email, Field::CompanyName] {
        if let Some(msg) = validate_field(field, values) {
            errors.insert(field, msg);
        }
    }

    let contact = match parse_meeting_method(&values.meeting_method) {
        Ok(method) => match contact_for(method, values) {
            Ok(contact) => Some(contact),
            Err((field, msg)) => {
                errors.insert(field, msg);
                None
            }
        },
        Err(msg) => {
            errors.insert(Field::MeetingMethod, msg);
            None
        }
    };

    match contact {
        Some(contact) if errors.is_empty() => {
            let company = values.company_name.trim();
            Ok(BookingRequest {
                full_name: values.full_name.trim().to_string(),
                email: values.email.trim().to_string(),
                company_name: (!company.is_empty()).then(|| company.to_string()),
                contact,
            })
        }
        _ => Err(errors),
    }
}

fn contact_for(
    method: MeetingMethod,
    values: &RawBooking,
) -> Result<MeetingContact, (Field, String)> {
    let phone = || {
        parse_phone(&values.phone, &values.phone_country_code).map_err(|e| (Field::Phone, e))
    };
    Ok(match method {
        MeetingMethod::Zoom => MeetingContact::Zoom,
        MeetingMethod::GoogleMeet => MeetingContact::GoogleMeet,
        MeetingMethod::Phone => MeetingContact::Phone(phone()?),
        MeetingMethod::WhatsApp => MeetingContact::WhatsApp(phone()?),
        MeetingMethod::Telegram => MeetingContact::Telegram(
            parse_telegram(&values.telegram).map_err(|e| (Field::Telegram, e))?,
        ),
    })
}
