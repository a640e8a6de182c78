use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use support_review::config::Config;
use support_review::handlers;
use support_review::relay::{Relay, TelegramClient};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {e}");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    log::debug!("{config:?}");

    let notifier = Arc::new(TelegramClient::new(config.telegram_api_base.clone()));
    let relay = web::Data::new(Relay::new(
        config.telegram_bot_token.clone(),
        config.telegram_chat_id.clone(),
        notifier,
    ));
    if !relay.is_configured() {
        log::warn!("TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not set; bookings will be refused");
    }
    let settings = web::Data::new(config.site_settings());

    // Session key: load from SESSION_KEY for sessions that survive restarts
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    if !config.dist_dir.is_dir() {
        log::warn!("Site bundle {} not found; only the API and /book will answer", config.dist_dir.display());
    }
    let dist_dir = config.dist_dir.clone();

    log::info!("Server listening on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(relay.clone())
            .app_data(settings.clone())
            .configure(handlers::configure)
            // Static bundle with SPA fallback (must be registered last)
            .service(handlers::site::static_site(&dist_dir))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
