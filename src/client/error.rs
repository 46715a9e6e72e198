//! Error types for the HR REST client.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Message shown when the server gives no usable error text.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors raised by [`HrmsClient`](super::HrmsClient) calls.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server rejected the payload (HTTP 422).
    ///
    /// `message` holds every field message joined by newlines.
    #[error("{message}")]
    Validation {
        /// Concatenated field messages.
        message: String,
        /// Field name to messages, as returned by the server.
        fields: BTreeMap<String, Vec<String>>,
    },

    /// Any other non-success status.
    #[error("Request failed with status {status}: {message}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// Server message, or the generic fallback.
        message: String,
    },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request was superseded or its scope was dropped.
    #[error("Request was cancelled")]
    Cancelled,

    /// An upload was refused before sending.
    #[error("Invalid attachment {file_name}: {message}")]
    InvalidAttachment {
        /// The file that was refused.
        file_name: String,
        /// Why it was refused.
        message: String,
    },

    /// The client could not be constructed.
    #[error("Invalid client configuration: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err)
    }
}

/// Result type alias for client calls.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ClientError {
    /// Classifies a non-success response from its status and raw body.
    ///
    /// # Example
    ///
    /// ```
    /// use hrms_engine::client::ClientError;
    /// use reqwest::StatusCode;
    ///
    /// let body = r#"{"message":"The given data was invalid.","errors":{
    ///     "start_date":["The start date is required."],
    ///     "reason":["The reason is required."]}}"#;
    /// let err = ClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, body);
    /// assert_eq!(err.to_string(), "The reason is required.\nThe start date is required.");
    /// ```
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let fields = parsed.errors.unwrap_or_default();
            let joined = fields
                .values()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("\n");
            let message = if joined.is_empty() {
                parsed
                    .message
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
            } else {
                joined
            };
            return ClientError::Validation { message, fields };
        }

        let message = parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());

        ClientError::Http {
            status: status.as_u16(),
            message,
        }
    }

    /// The text to put in front of the user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation { message, .. } | ClientError::Http { message, .. } => {
                message.clone()
            }
            ClientError::InvalidAttachment { message, .. } => message.clone(),
            ClientError::Cancelled => String::new(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Returns true for [`ClientError::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }
}
