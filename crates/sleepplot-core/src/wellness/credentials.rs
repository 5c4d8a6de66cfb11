//! Thin wrapper around the OS keyring for the wellness session token.

use crate::error::ServiceError;

const SERVICE: &str = "sleepplot";
const TOKEN_KEY: &str = "wellness_session_token";

/// Environment variable that overrides the stored token.
pub const TOKEN_ENV: &str = "SLEEPPLOT_TOKEN";

fn entry(key: &str) -> Result<keyring::Entry, ServiceError> {
    keyring::Entry::new(SERVICE, key).map_err(|e| ServiceError::Credentials(e.to_string()))
}

pub fn get(key: &str) -> Result<Option<String>, ServiceError> {
    match entry(key)?.get_password() {
        Ok(pw) => Ok(Some(pw)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(ServiceError::Credentials(e.to_string())),
    }
}

pub fn set(key: &str, value: &str) -> Result<(), ServiceError> {
    entry(key)?
        .set_password(value)
        .map_err(|e| ServiceError::Credentials(e.to_string()))
}

pub fn delete(key: &str) -> Result<(), ServiceError> {
    match entry(key)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(ServiceError::Credentials(e.to_string())),
    }
}

/// Session token from `SLEEPPLOT_TOKEN`, falling back to the keyring.
pub fn session_token() -> Result<Option<String>, ServiceError> {
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.is_empty() {
            return Ok(Some(token));
        }
    }
    get(TOKEN_KEY)
}

pub fn store_session_token(token: &str) -> Result<(), ServiceError> {
    set(TOKEN_KEY, token)
}

pub fn clear_session_token() -> Result<(), ServiceError> {
    delete(TOKEN_KEY)
}
