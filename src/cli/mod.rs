//! # CLI Module
//!
//! User-facing commands of topsync.
//!
//! - [`sync`] - Authorize, reconcile the Recent Top Tracks playlist and print
//!   the added and removed tracks
//! - [`auth_url`] - Print an authorization URL and exit
//!
//! ## Usage Patterns
//!
//! ```bash
//! topsync sync                    # Sync the 25 most played recent tracks
//! topsync sync --limit 50         # Use a bigger window
//! topsync sync --dry-run          # Show what would change
//! topsync sync --timeout 120      # Give up if no callback within 2 minutes
//! topsync auth-url                # Check the authorization URL
//! ```

mod auth;
mod sync;

pub use auth::auth_url;
pub use sync::SyncArgs;
pub use sync::sync;
