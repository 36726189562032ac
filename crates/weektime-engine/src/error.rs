//! Error types for weektime-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeektimeError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid grid slot: {0}")]
    InvalidSlot(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WeektimeError>;
