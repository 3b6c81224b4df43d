use std::{fmt, io, time::Duration};

use reqwest::StatusCode;

/// Every way a single sync run can fail.
///
/// Nothing in the crate retries; each variant ends the run and is reported
/// once at the top level (and, once the callback connection is open, to the
/// waiting browser tab).
#[derive(Debug)]
pub enum Error {
    /// Required credentials are missing or the environment cannot be loaded.
    Configuration(String),
    /// The `state` round-tripped through the redirect is not ours.
    StateMismatch { expected: String, received: String },
    /// The user declined the consent screen.
    AuthorizationDenied(String),
    /// The token endpoint answered with an error or without `access_token`.
    TokenExchange(String),
    /// The Web API answered with a non-success status.
    RemoteApi {
        status: StatusCode,
        url: String,
        body: String,
    },
    /// Malformed callback query or unexpected response shape.
    Validation(String),
    /// No callback arrived within the configured timeout.
    CallbackTimeout(Duration),
    Io(io::Error),
    Http(reqwest::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(msg) => write!(f, "configuration error: {}", msg),
            Error::StateMismatch { expected, received } => write!(
                f,
                "state mismatch.\nGot:      {}\nExpected: {}",
                received, expected
            ),
            Error::AuthorizationDenied(reason) => {
                write!(f, "authorization was denied: {}", reason)
            }
            Error::TokenExchange(msg) => write!(f, "token exchange failed: {}", msg),
            Error::RemoteApi { status, url, body } => {
                write!(f, "Spotify API returned {} for {}: {}", status, url, body)
            }
            Error::Validation(msg) => write!(f, "invalid data: {}", msg),
            Error::CallbackTimeout(after) => write!(
                f,
                "no authorization callback received within {} seconds",
                after.as_secs()
            ),
            Error::Io(err) => write!(f, "i/o error: {}", err),
            Error::Http(err) => write!(f, "http error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(err.to_string())
    }
}
