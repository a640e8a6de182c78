pub mod countries;
pub mod form;
pub mod validate;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Channel the visitor wants to be reached on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeetingMethod {
    #[default]
    Zoom,
    GoogleMeet,
    Phone,
    #[serde(rename = "whatsapp")]
    WhatsApp,
    Telegram,
}

impl MeetingMethod {
    pub const ALL: [MeetingMethod; 5] = [
        MeetingMethod::Zoom,
        MeetingMethod::GoogleMeet,
        MeetingMethod::Phone,
        MeetingMethod::WhatsApp,
        MeetingMethod::Telegram,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingMethod::Zoom => "zoom",
            MeetingMethod::GoogleMeet => "google-meet",
            MeetingMethod::Phone => "phone",
            MeetingMethod::WhatsApp => "whatsapp",
            MeetingMethod::Telegram => "telegram",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MeetingMethod::Zoom => "Zoom",
            MeetingMethod::GoogleMeet => "Google Meet",
            MeetingMethod::Phone => "Phone",
            MeetingMethod::WhatsApp => "WhatsApp",
            MeetingMethod::Telegram => "Telegram",
        }
    }

    pub fn needs_phone(&self) -> bool {
        matches!(self, MeetingMethod::Phone | MeetingMethod::WhatsApp)
    }

    pub fn needs_telegram(&self) -> bool {
        matches!(self, MeetingMethod::Telegram)
    }

    /// Video-call methods are booked through the external scheduler after the relay succeeds.
    pub fn opens_scheduler(&self) -> bool {
        matches!(self, MeetingMethod::Zoom | MeetingMethod::GoogleMeet)
    }
}

impl fmt::Display for MeetingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeetingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MeetingMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown meeting method '{s}'"))
    }
}

/// Form fields, named the way the booking form and the JSON payload name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    CompanyName,
    MeetingMethod,
    Phone,
    Telegram,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::FullName,
        Field::Email,
        Field::CompanyName,
        Field::MeetingMethod,
        Field::Phone,
        Field::Telegram,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::CompanyName => "companyName",
            Field::MeetingMethod => "meetingMethod",
            Field::Phone => "phone",
            Field::Telegram => "telegram",
        }
    }

    /// Parse a comma-separated list of field names, skipping anything unknown.
    pub fn parse_list(csv: &str) -> Vec<Field> {
        csv.split(',')
            .filter_map(|name| name.trim().parse().ok())
            .collect()
    }
}

impl FromStr for Field {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL.into_iter().find(|f| f.as_str() == s).ok_or(())
    }
}

/// Per-field error messages. At most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    /// Store `Some(message)` or clear the field's error on `None`.
    pub fn set(&mut self, field: Field, message: Option<String>) {
        match message {
            Some(m) => self.insert(field, m),
            None => self.remove(field),
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Raw booking-form values exactly as the visitor typed them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawBooking {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub meeting_method: String,
    pub phone_country_code: String,
    pub phone: String,
    pub telegram: String,
}

impl Default for RawBooking {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            company_name: String::new(),
            meeting_method: MeetingMethod::default().as_str().to_string(),
            phone_country_code: countries::DEFAULT_CALLING_CODE.to_string(),
            phone: String::new(),
            telegram: String::new(),
        }
    }
}

impl RawBooking {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::CompanyName => &self.company_name,
            Field::MeetingMethod => &self.meeting_method,
            Field::Phone => &self.phone,
            Field::Telegram => &self.telegram,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::CompanyName => &mut self.company_name,
            Field::MeetingMethod => &mut self.meeting_method,
            Field::Phone => &mut self.phone,
            Field::Telegram => &mut self.telegram,
        }
    }

    /// The selected method; unknown or empty selections fall back to the default.
    pub fn method(&self) -> MeetingMethod {
        self.meeting_method.parse().unwrap_or_default()
    }
}

/// A phone number split into its calling code and the national part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    pub country_code: String,
    pub national: String,
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} {}", self.country_code, self.national)
    }
}

/// A Telegram username with any link prefix or `@` stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramHandle(String);

impl TelegramHandle {
    pub(crate) fn new_unchecked(handle: String) -> Self {
        Self(handle)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TelegramHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// How the visitor is to be contacted. Each variant carries only the detail its method needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingContact {
    Zoom,
    GoogleMeet,
    Phone(PhoneNumber),
    WhatsApp(PhoneNumber),
    Telegram(TelegramHandle),
}

impl MeetingContact {
    pub fn method(&self) -> MeetingMethod {
        match self {
            MeetingContact::Zoom => MeetingMethod::Zoom,
            MeetingContact::GoogleMeet => MeetingMethod::GoogleMeet,
            MeetingContact::Phone(_) => MeetingMethod::Phone,
            MeetingContact::WhatsApp(_) => MeetingMethod::WhatsApp,
            MeetingContact::Telegram(_) => MeetingMethod::Telegram,
        }
    }

    pub fn phone(&self) -> Option<&PhoneNumber> {
        match self {
            MeetingContact::Phone(p) | MeetingContact::WhatsApp(p) => Some(p),
            _ => None,
        }
    }

    pub fn telegram(&self) -> Option<&TelegramHandle> {
        match self {
            MeetingContact::Telegram(t) => Some(t),
            _ => None,
        }
    }
}

/// A validated booking submission. Lives for one submission only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub full_name: String,
    pub email: String,
    pub company_name: Option<String>,
    pub contact: MeetingContact,
}

impl BookingRequest {
    pub fn meeting_method(&self) -> MeetingMethod {
        self.contact.method()
    }
}

/// JSON body of `POST /api/booking`. Every field is optional on input; the relay
/// renders whatever it is given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
}

impl From<&BookingRequest> for BookingPayload {
    fn from(req: &BookingRequest) -> Self {
        Self {
            full_name: Some(req.full_name.clone()),
            email: Some(req.email.clone()),
            company_name: req.company_name.clone(),
            meeting_method: Some(req.meeting_method().as_str().to_string()),
            phone: req.contact.phone().map(|p| p.to_string()),
            telegram: req.contact.telegram().map(|t| t.to_string()),
        }
    }
}
