use askama::Template;

use crate::booking::countries;
use crate::booking::form::BookingForm;
use crate::booking::{Field, MeetingMethod};

#[derive(Template)]
#[template(path = "book.html")]
pub struct BookPageTemplate {
    pub form: BookingFormView,
    pub flash: Option<String>,
    pub toast: Option<Toast>,
    pub csrf_token: String,
}

pub struct Toast {
    pub title: String,
    pub description: String,
}

pub struct MethodOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub struct CountryOption {
    pub code: &'static str,
    pub flag: &'static str,
    pub name: &'static str,
    pub selected: bool,
}

/// Inline error slots, one per field.
#[derive(Default)]
pub struct FieldErrorsView {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
    pub meeting_method: Option<String>,
    pub phone: Option<String>,
    pub telegram: Option<String>,
}

/// Everything `book.html` needs to draw the form.
pub struct BookingFormView {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub phone: String,
    pub telegram: String,
    pub methods: Vec<MethodOption>,
    pub countries: Vec<CountryOption>,
    pub needs_phone: bool,
    pub needs_telegram: bool,
    pub touched: String,
    pub errors: FieldErrorsView,
    pub submit_label: &'static str,
}

impl From<&BookingForm> for BookingFormView {
    fn from(form: &BookingForm) -> Self {
        let values = form.values();
        let method = form.method();
        let err = |f: Field| form.errors().get(f).map(str::to_string);

        Self {
            full_name: values.full_name.clone(),
            email: values.email.clone(),
            company_name: values.company_name.clone(),
            phone: values.phone.clone(),
            telegram: values.telegram.clone(),
            methods: MeetingMethod::ALL
                .into_iter()
                .map(|m| MethodOption {
                    value: m.as_str(),
                    label: m.label(),
                    selected: m == method,
                })
                .collect(),
            countries: countries::SUPPORTED
                .iter()
                .map(|c| CountryOption {
                    code: c.code,
                    flag: c.flag,
                    name: c.name,
                    selected: c.code == values.phone_country_code,
                })
                .collect(),
            needs_phone: form.needs_phone(),
            needs_telegram: form.needs_telegram(),
            touched: form.touched().map(|f| f.as_str()).collect::<Vec<_>>().join(","),
            errors: FieldErrorsView {
                full_name: err(Field::FullName),
                email: err(Field::Email),
                company_name: err(Field::CompanyName),
                meeting_method: err(Field::MeetingMethod),
                phone: err(Field::Phone),
                telegram: err(Field::Telegram),
            },
            submit_label: form.submit_label(),
        }
    }
}
