//! Errors returned by this crate

use thiserror::Error;

use crate::task::TaskId;

/// Everything that can go wrong while talking to the backend or validating user input
#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status code {status} for {url}")]
    Status { status: reqwest::StatusCode, url: String },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Unable to decode the response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Not allowed for this role: {0}")]
    Forbidden(&'static str),

    #[error("There is no pending deletion to confirm")]
    NothingToConfirm,

    #[error("No task with id {0}")]
    UnknownTask(TaskId),

    #[error("Task {0} is already completed")]
    AlreadyCompleted(TaskId),

    /// Returned by the mocked backend when its [`MockBehaviour`](crate::mock_behaviour::MockBehaviour) asks for a failure
    #[error("Mocked failure: {0}")]
    Mocked(String),
}

impl Error {
    /// Whether this error was raised client-side, before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingFields(_)
                | Error::Forbidden(_)
                | Error::NothingToConfirm
                | Error::UnknownTask(_)
                | Error::AlreadyCompleted(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message() {
        let err = Error::MissingFields(vec!["title", "assignee"]);
        assert_eq!(err.to_string(), "Missing required fields: title, assignee");
        assert!(err.is_validation());
    }

    #[test]
    fn transport_errors_are_not_validation() {
        let err = Error::Status { status: reqwest::StatusCode::NOT_FOUND, url: "http://x/api/tasks".into() };
        assert!(!err.is_validation());
        assert!(!Error::Mocked("boom".into()).is_validation());
    }
}
