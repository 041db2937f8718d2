use thiserror::Error;

use crate::github::CommentError;
use crate::holidays::HolidayError;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("Invalid timezone: {0}. Please provide a valid timezone.")]
    InvalidTimezone(String),

    #[error("{message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid GitHub ref: {0}")]
    InvalidReference(String),

    #[error(transparent)]
    Holiday(#[from] HolidayError),

    #[error(transparent)]
    Comment(#[from] CommentError),
}

impl GateError {
    pub fn configuration(message: impl Into<String>) -> Self {
        GateError::Configuration {
            message: message.into(),
            source: None,
        }
    }

    pub fn configuration_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        GateError::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

pub type GateResult<T> = Result<T, GateError>;
