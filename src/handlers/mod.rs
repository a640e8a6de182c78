pub mod api;
pub mod booking_handlers;
pub mod site;

use actix_web::web;

/// Register the API scope and the booking page. The static site goes last, in `main`,
/// because its fallback swallows every unmatched path.
pub fn configure(cfg: &mut web::ServiceConfig) {
    api::configure(cfg);
    cfg.route("/book", web::get().to(booking_handlers::page))
        .route("/book", web::post().to(booking_handlers::submit));
}
