use std::{collections::HashSet, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};

use crate::types::{Credentials, Track};

/// Length of the anti-CSRF state token. 32 alphanumerics carry ~190 bits.
pub const STATE_TOKEN_LEN: usize = 32;

pub fn generate_state_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// `Basic` authorization value for the token endpoint.
pub fn basic_credentials(creds: &Credentials) -> String {
    let raw = format!("{}:{}", creds.client_id, creds.client_secret);
    format!("Basic {}", STANDARD.encode(raw))
}

pub fn playlist_name_for(display_name: &str) -> String {
    format!("{}'s Recent Top Tracks", display_name)
}

/// Description written on every run, e.g. `Auto-generated. Updated March 7, 2024.`
pub fn playlist_description(date: NaiveDate) -> String {
    format!("Auto-generated. Updated {}.", date.format("%B %-d, %Y"))
}

/// Keeps the first track for each URI, preserving order.
pub fn dedup_by_uri(tracks: Vec<Track>) -> Vec<Track> {
    let mut seen = HashSet::new();
    tracks
        .into_iter()
        .filter(|t| seen.insert(t.uri.clone()))
        .collect()
}

pub fn uri_set(tracks: &[Track]) -> HashSet<&str> {
    tracks.iter().map(|t| t.uri.as_str()).collect()
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
