use actix_session::Session;
use actix_web::{web, HttpResponse, ResponseError};
use serde::Deserialize;

use crate::booking::form::{BookingForm, Completion, SubmitError};
use crate::booking::{BookingPayload, Field, RawBooking};
use crate::config::SiteSettings;
use crate::errors::{render, AppError};
use crate::relay::Relay;
use crate::session::{csrf, set_flash, take_flash};
use crate::templates_structs::{BookPageTemplate, BookingFormView, Toast};

#[derive(Deserialize)]
pub struct BookSubmission {
    pub csrf_token: String,
    /// "switch" re-renders the form for a new meeting method; anything else submits.
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub touched: String,
    #[serde(flatten)]
    pub values: RawBooking,
}

fn render_form(
    session: &Session,
    form: &BookingForm,
    flash: Option<String>,
    toast: Option<Toast>,
) -> Result<HttpResponse, AppError> {
    let tmpl = BookPageTemplate {
        form: BookingFormView::from(form),
        flash,
        toast,
        csrf_token: csrf::get_or_create_token(session)?,
    };
    render(tmpl)
}

/// GET /book
pub async fn page(session: Session) -> Result<HttpResponse, AppError> {
    let flash = take_flash(&session);
    render_form(&session, &BookingForm::new(), flash, None)
}

/// POST /book
pub async fn submit(
    session: Session,
    settings: web::Data<SiteSettings>,
    relay: web::Data<Relay>,
    form: web::Form<BookSubmission>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let BookSubmission { intent, touched, values, .. } = form.into_inner();
    let mut booking = BookingForm::restore(values, Field::parse_list(&touched));

    if intent == "switch" {
        let method = booking.method();
        booking.set_meeting_method(method);
        booking.revalidate_touched();
        return render_form(&session, &booking, None, None);
    }

    let request = match booking.submit() {
        Ok(request) => request,
        Err(err) => {
            if let SubmitError::Invalid(errors) = &err {
                log::debug!("Booking form rejected with {} field error(s)", errors.len());
            }
            return render_form(&session, &booking, None, None);
        }
    };

    let payload = BookingPayload::from(&request);
    let outcome = relay
        .relay(&payload)
        .await
        .map_err(|e| format!("{} ({})", e, e.status_code().as_u16()));

    match booking.complete(outcome, &settings.scheduler_url) {
        Completion::OpenScheduler(url) => Ok(HttpResponse::SeeOther()
            .insert_header(("Location", url.as_str()))
            .finish()),
        Completion::Confirmed(message) => {
            set_flash(&session, message)?;
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/book"))
                .finish())
        }
        Completion::Failed { title, description } => {
            let toast = Toast {
                title: title.to_string(),
                description,
            };
            render_form(&session, &booking, None, Some(toast))
        }
    }
}
