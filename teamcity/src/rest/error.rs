use domain::InvalidConfiguration;
use reqwest::{Error as ReqwestError, Method, StatusCode};
use serde_json::Error as JsonError;
use thiserror::Error;

use crate::ConfigError;

#[derive(Debug, Error)]
pub enum TeamCityError {
    /// The id or name is already taken.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error(transparent)]
    Reqwest(#[from] ReqwestError),
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error(transparent)]
    Invalid(#[from] InvalidConfiguration),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Generic(String),
}

pub type Result<T> = core::result::Result<T, TeamCityError>;

impl TeamCityError {
    /// Classifies a non-success response.
    ///
    /// The server reports duplicate ids and names as bad requests or internal errors
    /// depending on its version, so the message decides whether it is a conflict.
    pub(crate) fn from_response(status: StatusCode, message: String) -> Self {
        let lowercase = message.to_lowercase();
        let duplicate = lowercase.contains("already exists")
            || lowercase.contains("already used")
            || lowercase.contains("duplicateexternalidexception")
            || lowercase.contains("duplicateidexception");

        match status {
            StatusCode::CONFLICT => TeamCityError::Conflict(message),
            StatusCode::NOT_FOUND => TeamCityError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::INTERNAL_SERVER_ERROR if duplicate => {
                TeamCityError::Conflict(message)
            }
            status => TeamCityError::Status { status, message },
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, TeamCityError::Conflict(_))
    }

    /// A POST that failed in transport may still have been applied, so only the
    /// other methods retry transport errors.
    pub(crate) fn is_retryable(&self, method: &Method) -> bool {
        match self {
            TeamCityError::Conflict(_) => true,
            TeamCityError::Reqwest(_) => *method != Method::POST,
            TeamCityError::Status { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}
