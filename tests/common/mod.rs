#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};
use topsync::types::{Credentials, Endpoints};

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const GOOD_CODE: &str = "good-code";
pub const ACCESS_TOKEN: &str = "test-token";
pub const USER_ID: &str = "sam";
pub const PLAYLIST_NAME: &str = "Sam's Recent Top Tracks";

#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Value,
}

/// In-memory Spotify account. Writes mutate it, so consecutive syncs see
/// each other's effects.
#[derive(Debug)]
pub struct MockState {
    pub base_url: String,
    pub playlists: Vec<Value>,
    pub playlist_tracks: HashMap<String, Vec<Value>>,
    pub top_tracks: Vec<Value>,
    /// Upper bound on the page size served, whatever the client asks for.
    pub max_page: usize,
    pub fail_add: bool,
    pub token_requests: usize,
    pub calls: Vec<Call>,
}

impl Default for MockState {
    fn default() -> Self {
        MockState {
            base_url: String::new(),
            playlists: Vec::new(),
            playlist_tracks: HashMap::new(),
            top_tracks: Vec::new(),
            max_page: 50,
            fail_add: false,
            token_requests: 0,
            calls: Vec::new(),
        }
    }
}

impl MockState {
    /// Adds a playlist with the given tracks to the library.
    pub fn with_playlist(mut self, id: &str, name: &str, owner: &str, track_ids: &[&str]) -> Self {
        self.playlists.push(json!({
            "id": id,
            "name": name,
            "owner": { "id": owner, "display_name": owner },
            "public": true,
            "snapshot_id": "s0",
        }));
        self.playlist_tracks.insert(
            id.to_string(),
            track_ids.iter().map(|t| raw_track(t)).collect(),
        );
        self
    }

    pub fn with_top_tracks(mut self, track_ids: &[&str]) -> Self {
        self.top_tracks = track_ids.iter().map(|t| raw_track(t)).collect();
        self
    }

    pub fn writes(&self) -> Vec<&Call> {
        self.calls.iter().filter(|c| c.method != "GET").collect()
    }

    pub fn track_uris(&self, playlist_id: &str) -> Vec<String> {
        self.playlist_tracks
            .get(playlist_id)
            .map(|tracks| {
                tracks
                    .iter()
                    .map(|t| t["uri"].as_str().unwrap_or_default().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub type Shared = Arc<Mutex<MockState>>;

/// Track object shaped like the Web API's, including fields that must not
/// survive projection.
pub fn raw_track(id: &str) -> Value {
    json!({
        "id": id,
        "uri": format!("spotify:track:{}", id),
        "name": format!("Song {}", id),
        "popularity": 42,
        "preview_url": null,
        "explicit": false,
        "artists": [{ "id": format!("artist-{}", id), "name": format!("Artist {}", id), "type": "artist" }],
        "album": { "id": format!("album-{}", id), "name": format!("Album {}", id), "release_date": "2024-01-01" },
    })
}

pub fn uri(id: &str) -> String {
    format!("spotify:track:{}", id)
}

pub fn credentials() -> Credentials {
    Credentials {
        client_id: CLIENT_ID.to_string(),
        client_secret: CLIENT_SECRET.to_string(),
    }
}

pub struct MockSpotify {
    pub state: Shared,
    pub base_url: String,
}

impl MockSpotify {
    pub async fn start(mut state: MockState) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        state.base_url = base_url.clone();
        let shared = Arc::new(Mutex::new(state));

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me", get(me))
            .route("/v1/me/playlists", get(user_playlists))
            .route("/v1/me/top/tracks", get(top_tracks))
            .route("/v1/users/{user_id}/playlists", post(create_playlist))
            .route("/v1/playlists/{id}", put(update_playlist))
            .route(
                "/v1/playlists/{id}/tracks",
                get(playlist_tracks).post(add_tracks).delete(remove_tracks),
            )
            .route("/v1/plain", get(plain))
            .with_state(Arc::clone(&shared));

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockSpotify {
            state: shared,
            base_url,
        }
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            auth_url: format!("{}/authorize", self.base_url),
            token_url: format!("{}/api/token", self.base_url),
            api_url: format!("{}/v1", self.base_url),
        }
    }

    pub fn api_url(&self) -> String {
        format!("{}/v1", self.base_url)
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }
}

/// Plays the browser: sends one GET to the loopback listener and returns the
/// raw response.
pub async fn browser_get(port: u16, target: &str) -> String {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: localhost:{}\r\nAccept: text/html\r\n\r\n",
        target, port
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8(buf).unwrap()
}

#[derive(Debug, serde::Deserialize)]
pub struct PageQuery {
    offset: Option<usize>,
    limit: Option<usize>,
}

fn page(items: &[Value], query: &PageQuery, max_page: usize, next_base: &str) -> Value {
    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.unwrap_or(20).min(max_page);
    let end = (offset + limit).min(items.len());
    let slice = if offset < items.len() {
        items[offset..end].to_vec()
    } else {
        Vec::new()
    };
    let sep = if next_base.contains('?') { '&' } else { '?' };
    let next = if end < items.len() {
        json!(format!("{}{}offset={}&limit={}", next_base, sep, end, limit))
    } else {
        Value::Null
    };

    json!({
        "href": next_base,
        "items": slice,
        "limit": limit,
        "offset": offset,
        "total": items.len(),
        "next": next,
        "previous": null,
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", ACCESS_TOKEN))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": { "status": 401, "message": "Invalid access token" } })),
    )
        .into_response()
}

fn record(state: &mut MockState, method: &'static str, path: String, body: Value) {
    state.calls.push(Call { method, path, body });
}

async fn token(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.token_requests += 1;

    let expected = format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", CLIENT_ID, CLIENT_SECRET))
    );
    let basic_ok = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    let form_ok = form.get("grant_type").map(String::as_str) == Some("authorization_code")
        && form.get("code").map(String::as_str) == Some(GOOD_CODE)
        && form
            .get("redirect_uri")
            .is_some_and(|r| r.starts_with("http://localhost:") && r.ends_with("/callback"));

    if basic_ok && form_ok {
        Json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "Bearer",
            "scope": "user-top-read playlist-modify-public",
            "expires_in": 3600,
            "refresh_token": "unused",
        }))
        .into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant", "error_description": "Invalid authorization code" })),
        )
            .into_response()
    }
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    record(&mut state, "GET", "/me".to_string(), Value::Null);
    Json(json!({ "id": USER_ID, "display_name": "Sam", "type": "user" })).into_response()
}

async fn user_playlists(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    record(&mut state, "GET", "/me/playlists".to_string(), Value::Null);
    let next_base = format!("{}/v1/me/playlists", state.base_url);
    Json(page(&state.playlists, &query, state.max_page, &next_base)).into_response()
}

async fn top_tracks(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    record(&mut state, "GET", "/me/top/tracks".to_string(), json!(query));
    if query.get("time_range").map(String::as_str) != Some("short_term") {
        return (StatusCode::BAD_REQUEST, "time_range must be short_term").into_response();
    }

    let page_query = PageQuery {
        offset: query.get("offset").and_then(|o| o.parse().ok()),
        limit: query.get("limit").and_then(|l| l.parse().ok()),
    };
    let next_base = format!("{}/v1/me/top/tracks?time_range=short_term", state.base_url);
    Json(page(&state.top_tracks, &page_query, state.max_page, &next_base)).into_response()
}

async fn create_playlist(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    record(&mut state, "POST", format!("/users/{}/playlists", user_id), body.clone());

    let id = format!("created-{}", state.playlists.len());
    let playlist = json!({
        "id": id,
        "name": body["name"],
        "description": body["description"],
        "owner": { "id": user_id },
        "public": body["public"],
        "snapshot_id": "s0",
    });
    state.playlists.push(playlist.clone());
    state.playlist_tracks.insert(id, Vec::new());
    (StatusCode::CREATED, Json(playlist)).into_response()
}

async fn update_playlist(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    record(&mut state, "PUT", format!("/playlists/{}", id), body.clone());
    if let Some(p) = state.playlists.iter_mut().find(|p| p["id"] == id.as_str()) {
        p["description"] = body["description"].clone();
    }
    StatusCode::OK.into_response()
}

async fn playlist_tracks(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    record(&mut state, "GET", format!("/playlists/{}/tracks", id), Value::Null);
    let Some(tracks) = state.playlist_tracks.get(&id) else {
        return (StatusCode::NOT_FOUND, "no such playlist").into_response();
    };

    let items: Vec<Value> = tracks
        .iter()
        .map(|t| json!({ "added_at": "2024-01-01T00:00:00Z", "is_local": false, "track": t }))
        .collect();
    let next_base = format!("{}/v1/playlists/{}/tracks", state.base_url, id);
    Json(page(&items, &query, state.max_page, &next_base)).into_response()
}

async fn add_tracks(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    record(&mut state, "POST", format!("/playlists/{}/tracks", id), body.clone());
    if state.fail_add {
        return (StatusCode::BAD_GATEWAY, "upstream exploded").into_response();
    }

    let added: Vec<Value> = body["uris"]
        .as_array()
        .map(|uris| {
            uris.iter()
                .filter_map(|u| u.as_str())
                .map(|u| raw_track(u.trim_start_matches("spotify:track:")))
                .collect()
        })
        .unwrap_or_default();
    state.playlist_tracks.entry(id).or_default().extend(added);
    (StatusCode::CREATED, Json(json!({ "snapshot_id": "s1" }))).into_response()
}

async fn remove_tracks(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    record(&mut state, "DELETE", format!("/playlists/{}/tracks", id), body.clone());

    let gone: Vec<String> = body["tracks"]
        .as_array()
        .map(|tracks| {
            tracks
                .iter()
                .filter_map(|t| t["uri"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    if let Some(tracks) = state.playlist_tracks.get_mut(&id) {
        tracks.retain(|t| !gone.iter().any(|g| t["uri"] == g.as_str()));
    }
    Json(json!({ "snapshot_id": "s2" })).into_response()
}

async fn plain(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    "just text".into_response()
}
