//! # API Module
//!
//! The HTTP surface of the local loopback callback: parsing of the redirect
//! Spotify sends to `http://localhost:{port}/callback`, validation of its
//! anti-CSRF `state`, and the minimal HTTP/1.0 responses written back to the
//! browser tab.
//!
//! The socket handling itself lives in [`crate::server`].

mod callback;

pub use callback::CALLBACK_PATH;
pub use callback::CallbackRequest;
pub use callback::CallbackResponse;
