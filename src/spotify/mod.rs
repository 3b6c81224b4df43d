//! # Spotify Integration Module
//!
//! Thin layer over the Spotify Web API covering exactly what a top-tracks
//! sync needs.
//!
//! ```text
//! management (Session, reconcile)
//!          ↓
//! tracks / playlist / user accessors
//!          ↓
//! pagination (Pages<T>)
//!          ↓
//! client (ApiClient, bearer auth, JSON/text decoding)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - Authorization URL with anti-CSRF state, code-for-token exchange
//! - [`client`] - Authenticated GET/POST/PUT/DELETE primitive
//! - [`pagination`] - Lazy walk over `items`/`next` pages
//! - [`tracks`] - Short-term top tracks and playlist tracks
//! - [`playlist`] - Listing, creating and editing playlists
//! - [`user`] - Current user profile
//!
//! ## API Coverage
//!
//! - `GET /me`
//! - `GET /me/top/tracks?time_range=short_term`
//! - `GET /me/playlists`
//! - `POST /users/{user_id}/playlists`
//! - `PUT /playlists/{playlist_id}`
//! - `GET|POST|DELETE /playlists/{playlist_id}/tracks`
//! - `POST /api/token` on the accounts service
//!
//! ## Error Types
//!
//! Every function returns [`crate::Res`]. Non-success responses surface as
//! [`crate::errors::Error::RemoteApi`]; nothing is retried and there is no
//! rate-limit backoff.

pub mod auth;
pub mod client;
pub mod pagination;
pub mod playlist;
pub mod tracks;
pub mod user;
