//! Configuration management for topsync.
//!
//! This module loads `.env` files and exposes the values the sync run needs:
//! the Spotify client credentials, the remote endpoints, and the defaults for
//! the loopback callback. Lookups follow a simple order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`topsync/.env`)
//! 4. Application defaults (endpoints, port, scope)
//!
//! Only the client id and secret are required; their absence is a
//! [`Error::Configuration`] raised before any network activity.

use std::{env, path::PathBuf};

use crate::{
    Res,
    errors::Error,
    types::{Credentials, Endpoints},
};

/// Local port the OAuth redirect is delivered to.
pub const DEFAULT_PORT: u16 = 4242;

/// Size of the short-term top tracks window.
pub const DEFAULT_TOP_TRACKS: u32 = 25;

/// Scopes needed to read top tracks and edit a public playlist.
pub const DEFAULT_SCOPE: [&str; 2] = ["user-top-read", "playlist-modify-public"];

pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

const CLIENT_ID_KEYS: [&str; 2] = ["CLIENT_ID", "SPOTIFY_API_AUTH_CLIENT_ID"];
const CLIENT_SECRET_KEYS: [&str; 2] = ["CLIENT_SECRET", "SPOTIFY_API_AUTH_CLIENT_SECRET"];

/// Loads environment variables from `.env` files.
///
/// The working directory is tried first, then the platform-specific local
/// data directory:
/// - Linux: `~/.local/share/topsync/.env`
/// - macOS: `~/Library/Application Support/topsync/.env`
/// - Windows: `%LOCALAPPDATA%/topsync/.env`
///
/// The data directory is created when missing so the user has an obvious
/// place to drop the file. A missing `.env` is not an error; a present but
/// unparsable one is.
///
/// # Example
///
/// ```
/// use topsync::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Res<()> {
    dotenv::dotenv().ok();

    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Configuration(e.to_string()))?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| {
            Error::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
    }

    Ok(())
}

/// Path of the `.env` in the local data directory.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("topsync/.env");
    path
}

/// Reads the client credentials from the process environment.
///
/// `CLIENT_ID`/`CLIENT_SECRET` are preferred; the longer
/// `SPOTIFY_API_AUTH_CLIENT_ID`/`SPOTIFY_API_AUTH_CLIENT_SECRET` names are
/// accepted as well.
///
/// # Example
///
/// ```
/// let creds = config::credentials()?;
/// println!("client id: {}", creds.client_id);
/// ```
pub fn credentials() -> Res<Credentials> {
    credentials_from(|key| env::var(key).ok())
}

/// Builds [`Credentials`] from an arbitrary key lookup.
///
/// Empty values count as missing.
pub fn credentials_from<F>(lookup: F) -> Res<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let first = |keys: &[&str]| {
        keys.iter()
            .filter_map(|key| lookup(key))
            .find(|value| !value.trim().is_empty())
    };

    match (first(&CLIENT_ID_KEYS), first(&CLIENT_SECRET_KEYS)) {
        (Some(client_id), Some(client_secret)) => Ok(Credentials {
            client_id,
            client_secret,
        }),
        (None, _) => Err(Error::Configuration(format!(
            "{} must be set",
            CLIENT_ID_KEYS[0]
        ))),
        (_, None) => Err(Error::Configuration(format!(
            "{} must be set",
            CLIENT_SECRET_KEYS[0]
        ))),
    }
}

/// Returns the Spotify endpoints, honouring overrides from the environment.
///
/// - `SPOTIFY_API_AUTH_URL` (default `https://accounts.spotify.com/authorize`)
/// - `SPOTIFY_API_TOKEN_URL` (default `https://accounts.spotify.com/api/token`)
/// - `SPOTIFY_API_URL` (default `https://api.spotify.com/v1`)
pub fn endpoints() -> Endpoints {
    endpoints_from(|key| env::var(key).ok())
}

pub fn endpoints_from<F>(lookup: F) -> Endpoints
where
    F: Fn(&str) -> Option<String>,
{
    let or_default = |key: &str, default: &str| {
        lookup(key)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    Endpoints {
        auth_url: or_default("SPOTIFY_API_AUTH_URL", SPOTIFY_AUTH_URL),
        token_url: or_default("SPOTIFY_API_TOKEN_URL", SPOTIFY_TOKEN_URL),
        api_url: or_default("SPOTIFY_API_URL", SPOTIFY_API_URL)
            .trim_end_matches('/')
            .to_string(),
    }
}

/// Redirect URI registered for the loopback callback on `port`.
///
/// Must match the URI configured in the Spotify developer dashboard
/// character for character.
pub fn redirect_uri(port: u16) -> String {
    format!("http://localhost:{}/callback", port)
}

/// Default scope as owned strings.
pub fn default_scope() -> Vec<String> {
    DEFAULT_SCOPE.iter().map(|s| s.to_string()).collect()
}
