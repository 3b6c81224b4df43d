use reqwest::{Client, Method, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{Res, errors::Error, types::AccessToken};

/// Decoded body of a Web API response.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Text(String),
}

/// Authenticated wrapper around the Spotify Web API.
///
/// Holds the bearer token for the whole run; there is no refresh, an expired
/// token surfaces as a 401 [`Error::RemoteApi`] like any other failure.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: AccessToken,
}

impl ApiClient {
    pub fn new(base_url: &str, token: AccessToken) -> Self {
        ApiClient {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Resolves `target` against the API base. Absolute URLs, such as the
    /// `next` links of a page, are passed through untouched.
    pub fn url(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else {
            format!("{}/{}", self.base_url, target.trim_start_matches('/'))
        }
    }

    /// Sends one authenticated request.
    ///
    /// The body is decoded as JSON when the response declares
    /// `application/json`, otherwise it is returned as text. Any non-success
    /// status becomes [`Error::RemoteApi`] carrying the response body.
    pub async fn request<P>(&self, method: Method, target: &str, payload: Option<&P>) -> Res<ApiResponse>
    where
        P: Serialize + ?Sized,
    {
        let url = self.url(target);
        let mut req = self
            .http
            .request(method, &url)
            .bearer_auth(self.token.bearer());
        if let Some(body) = payload {
            req = req.json(body);
        }

        let res = req.send().await?;
        let status = res.status();
        let is_json = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));
        let text = res.text().await?;

        if !status.is_success() {
            return Err(Error::RemoteApi {
                status,
                url,
                body: text,
            });
        }

        if is_json && !text.trim().is_empty() {
            Ok(ApiResponse::Json(serde_json::from_str(&text)?))
        } else {
            Ok(ApiResponse::Text(text))
        }
    }

    /// Sends a request and deserializes the JSON answer into `T`.
    pub async fn request_json<T, P>(&self, method: Method, target: &str, payload: Option<&P>) -> Res<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        match self.request(method, target, payload).await? {
            ApiResponse::Json(value) => serde_json::from_value(value).map_err(|e| {
                Error::Validation(format!("unexpected response from {}: {}", target, e))
            }),
            ApiResponse::Text(text) => Err(Error::Validation(format!(
                "expected JSON from {}, got: {}",
                target, text
            ))),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, target: &str) -> Res<T> {
        self.request_json::<T, ()>(Method::GET, target, None).await
    }
}
