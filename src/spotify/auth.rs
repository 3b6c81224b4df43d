use reqwest::{Client, StatusCode, Url, header::AUTHORIZATION};

use crate::{
    Res,
    errors::Error,
    types::{AccessToken, Credentials, TokenResponse},
    utils,
};

/// Everything the authorization round trip needs to remember.
///
/// Created once at start-up. The state token is compared against the
/// callback exactly once; the redirect URI is sent again, unchanged, with the
/// code exchange.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub state_token: String,
    pub redirect_uri: String,
    pub scope: Vec<String>,
    pub credentials: Credentials,
}

impl AuthSession {
    /// Starts a new session with a fresh random state token.
    pub fn new(credentials: Credentials, redirect_uri: String, scope: Vec<String>) -> Self {
        AuthSession {
            state_token: utils::generate_state_token(),
            redirect_uri,
            scope,
            credentials,
        }
    }

    /// Builds the URL the user opens to grant access.
    ///
    /// # Example
    ///
    /// ```
    /// let url = session.authorize_url("https://accounts.spotify.com/authorize")?;
    /// info!("Authenticate here: {}", url);
    /// ```
    pub fn authorize_url(&self, auth_url: &str) -> Res<String> {
        let scope = self.scope.join(" ");
        let url = Url::parse_with_params(
            auth_url,
            &[
                ("response_type", "code"),
                ("client_id", self.credentials.client_id.as_str()),
                ("scope", scope.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("state", self.state_token.as_str()),
            ],
        )
        .map_err(|e| Error::Configuration(format!("invalid authorize url {}: {}", auth_url, e)))?;

        Ok(url.into())
    }
}

/// Exchanges an authorization code for an access token.
///
/// Performs a single form-encoded POST authenticated with the client
/// credentials as HTTP Basic. Any non-success status or a body without
/// `access_token` is a [`Error::TokenExchange`]; nothing is retried.
///
/// # Example
///
/// ```
/// let token = exchange_code(&session, &endpoints.token_url, &code).await?;
/// ```
pub async fn exchange_code(session: &AuthSession, token_url: &str, code: &str) -> Res<AccessToken> {
    let client = Client::new();
    let res = client
        .post(token_url)
        .header(AUTHORIZATION, utils::basic_credentials(&session.credentials))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", session.redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(|e| Error::TokenExchange(e.to_string()))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| Error::TokenExchange(e.to_string()))?;

    if status != StatusCode::OK {
        return Err(Error::TokenExchange(format!("{}: {}", status, body)));
    }

    let json: TokenResponse = serde_json::from_str(&body)
        .map_err(|e| Error::TokenExchange(format!("malformed token response: {}", e)))?;

    match json.access_token {
        Some(token) if !token.is_empty() => Ok(AccessToken::new(token)),
        _ => Err(Error::TokenExchange(
            "response did not contain an access_token".to_string(),
        )),
    }
}
