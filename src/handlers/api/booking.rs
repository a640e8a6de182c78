use actix_web::{web, HttpResponse};

use crate::booking::BookingPayload;
use crate::relay::{Relay, RelayError};

/// POST /api/booking - forward a booking to the Telegram chat.
///
/// The body is trusted as-is; the browser form validated it. Failures are mapped
/// by `RelayError`: 500 when unconfigured or the call failed, 502 when Telegram
/// refused the message.
pub async fn create(
    relay: web::Data<Relay>,
    body: web::Json<BookingPayload>,
) -> Result<HttpResponse, RelayError> {
    relay.relay(&body).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true })))
}
