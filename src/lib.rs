//! Spotify Recent Top Tracks Sync Library
//!
//! This library keeps a single auto-generated Spotify playlist in agreement
//! with the authenticated user's short-term top tracks. It covers the one-shot
//! OAuth authorization-code handshake over a loopback callback, a thin
//! authenticated client for the Spotify Web API, and the reconciliation that
//! turns the difference between the playlist and the top tracks into add and
//! remove calls.
//!
//! # Modules
//!
//! - `api` - Parsing and validation of the local OAuth callback request
//! - `cli` - Command-line interface implementations
//! - `config` - Credentials, endpoints and `.env` loading
//! - `errors` - Error type shared by every layer
//! - `management` - The authenticated session and the playlist reconciler
//! - `server` - One-shot loopback listener for the OAuth redirect
//! - `spotify` - Spotify Web API client, pagination and accessors
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use topsync::{config, cli};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> topsync::Res<()> {
//!     config::load_env().await?;
//!     cli::sync(cli::SyncArgs::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Result alias used throughout the crate.
///
/// Every fallible operation returns [`errors::Error`], so a failure anywhere
/// between the callback and the reconciler carries its category up to the
/// top level unchanged.
pub type Res<T> = std::result::Result<T, errors::Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching top tracks...");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist updated");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// This macro terminates the process with exit code 1 after printing. Only
/// the binary's top level uses it; library code returns [`Res`] instead.
///
/// # Example
///
/// ```
/// error!("Sync failed: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues the user should notice, such as a stray
/// request hitting the callback port or a missing `.env` file.
///
/// # Example
///
/// ```
/// warning!("Ignoring request for {}", path);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
