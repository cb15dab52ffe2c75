use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout).
    Request(String),
    /// The backend answered with a non-success status. `message` carries the
    /// `message` or `error` field of the body when one was present.
    Status { status: u16, message: Option<String> },
    /// The response body could not be decoded into the expected shape.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::Request(err) => write!(f, "Request failed: {}", err),
            ApiError::Status {
                status,
                message: Some(msg),
            } => write!(f, "Server returned {}: {}", status, msg),
            ApiError::Status {
                status,
                message: None,
            } => write!(f, "Server returned {}", status),
            ApiError::Decode(err) => write!(f, "Failed to decode response: {}", err),
        }
    }
}

impl Error for ApiError {}

impl ApiError {
    /// Message supplied by the backend, if it sent one alongside an error
    /// status. Used to surface server-side validation text to the user.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(msg), ..
            } => Some(msg.as_str()),
            _ => None,
        }
    }
}
