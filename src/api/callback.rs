use reqwest::Url;

use crate::{Res, errors::Error};

/// Path Spotify redirects to after the consent screen.
pub const CALLBACK_PATH: &str = "/callback";

/// Request target of an inbound loopback request.
#[derive(Debug, Clone)]
pub struct CallbackRequest {
    url: Url,
}

impl CallbackRequest {
    /// Parses the request line (`GET /callback?code=...&state=... HTTP/1.1`)
    /// out of the first chunk read from the socket.
    pub fn parse(raw: &str) -> Res<Self> {
        let request_line = raw.lines().next().unwrap_or_default();
        let mut parts = request_line.split_whitespace();
        let (Some(_method), Some(target)) = (parts.next(), parts.next()) else {
            return Err(Error::Validation(format!(
                "malformed callback request line: {:?}",
                request_line
            )));
        };

        let url = Url::parse("http://localhost")
            .and_then(|base| base.join(target))
            .map_err(|e| Error::Validation(format!("bad request target {}: {}", target, e)))?;

        Ok(CallbackRequest { url })
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn is_callback(&self) -> bool {
        self.path() == CALLBACK_PATH
    }

    fn param(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Validates the round-tripped state and returns the authorization code.
    ///
    /// The state is checked before anything else: a foreign redirect never
    /// yields a code, even if it carries one.
    pub fn authorization_code(&self, expected_state: &str) -> Res<String> {
        let received = self
            .param("state")
            .ok_or_else(|| Error::Validation("callback is missing the state parameter".to_string()))?;

        if received != expected_state {
            return Err(Error::StateMismatch {
                expected: expected_state.to_string(),
                received,
            });
        }

        if let Some(reason) = self.param("error") {
            return Err(Error::AuthorizationDenied(reason));
        }

        self.param("code")
            .filter(|c| !c.is_empty())
            .ok_or_else(|| Error::Validation("callback is missing the code parameter".to_string()))
    }
}

/// Minimal HTTP/1.0 answer written back to the browser tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackResponse {
    pub status: u16,
    pub body: String,
}

impl CallbackResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        CallbackResponse {
            status: 200,
            body: body.into(),
        }
    }

    pub fn bad_request(body: impl Into<String>) -> Self {
        CallbackResponse {
            status: 400,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        CallbackResponse {
            status: 404,
            body: "Not found.\n".to_string(),
        }
    }

    pub fn internal_error() -> Self {
        CallbackResponse {
            status: 500,
            body: "Something went wrong. Sorry.\n".to_string(),
        }
    }

    /// Response for a failure before or during the work behind the callback.
    pub fn for_error(err: &Error) -> Self {
        match err {
            Error::StateMismatch { .. } => {
                Self::bad_request("State mismatch. Start the sync again from your terminal.\n")
            }
            Error::AuthorizationDenied(reason) => {
                Self::bad_request(format!("Authorization was denied ({}).\n", reason))
            }
            Error::Validation(_) => Self::bad_request("Malformed callback request.\n"),
            _ => Self::internal_error(),
        }
    }

    fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            _ => "Internal Server Error",
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!("HTTP/1.0 {} {}\r\n\r\n{}", self.status, self.reason(), self.body).into_bytes()
    }
}
