pub mod booking;

use actix_web::{
    web, Error, HttpRequest, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    error::{InternalError, JsonPayloadError},
    http::{header, Method},
    middleware::Next,
};

const MAX_BODY_BYTES: usize = 16 * 1024;

/// Open the API to the separately deployed front end.
///
/// Every response gets `Access-Control-Allow-Origin: *`; preflight `OPTIONS`
/// requests are answered here without reaching a route.
async fn allow_cross_origin(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if req.method() == Method::OPTIONS {
        let response = HttpResponse::NoContent()
            .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
            .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"))
            .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    let mut res = next.call(req).await?;
    res.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        header::HeaderValue::from_static("*"),
    );
    Ok(res.map_into_left_body())
}

/// Malformed bodies get the same `{ok, error}` shape as every other API answer.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let body = serde_json::json!({ "ok": false, "error": err.to_string() });
    let response = HttpResponse::BadRequest().json(body);
    InternalError::from_response(err, response).into()
}

/// Configure the `/api` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .wrap(actix_web::middleware::from_fn(allow_cross_origin))
            .app_data(
                web::JsonConfig::default()
                    .limit(MAX_BODY_BYTES)
                    .error_handler(json_error),
            )
            .route("/booking", web::post().to(booking::create)),
    );
}
