pub mod csrf;

use actix_session::Session;

use crate::errors::AppError;

const FLASH_KEY: &str = "flash";

pub fn set_flash(session: &Session, message: &str) -> Result<(), AppError> {
    session.insert(FLASH_KEY, message)?;
    Ok(())
}

/// Read and clear the one-shot flash message.
pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}
