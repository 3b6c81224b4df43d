use reqwest::Method;

use crate::{
    Res,
    spotify::{client::ApiClient, pagination::Pages},
    types::{
        AddTracksRequest, CreatePlaylistRequest, Playlist, RawPlaylist, RemoveTracksRequest,
        TrackUri, UpdatePlaylistRequest,
    },
};

/// Most URIs the playlist track endpoints accept per request.
pub const TRACK_BATCH_MAX: usize = 100;

const PLAYLISTS_PAGE: u32 = 50;

/// Retrieves every playlist in the user's library, owned or followed.
pub async fn get_user_playlists(client: &ApiClient) -> Res<Vec<Playlist>> {
    let url = format!("me/playlists?limit={}", PLAYLISTS_PAGE);
    let raw = Pages::<RawPlaylist>::new(client, &url).collect().await?;
    Ok(raw.into_iter().map(Playlist::from).collect())
}

/// Finds the playlist called `name` among those owned by `owner_id`.
///
/// Followed playlists with a colliding name are never returned.
pub fn find_owned<'a>(playlists: &'a [Playlist], owner_id: &str, name: &str) -> Option<&'a Playlist> {
    playlists
        .iter()
        .find(|p| p.owner_id == owner_id && p.name == name)
}

/// Creates a public playlist for `user_id`.
///
/// # Example
///
/// ```
/// let playlist = create(session.api(), &user.id, "Sam's Recent Top Tracks").await?;
/// ```
pub async fn create(client: &ApiClient, user_id: &str, name: &str) -> Res<Playlist> {
    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: "Auto-generated.".to_string(),
        public: true,
    };
    let url = format!("users/{}/playlists", user_id);
    let raw: RawPlaylist = client
        .request_json(Method::POST, &url, Some(&body))
        .await?;
    Ok(raw.into())
}

pub async fn update_description(client: &ApiClient, playlist_id: &str, description: &str) -> Res<()> {
    let body = UpdatePlaylistRequest {
        description: description.to_string(),
    };
    client
        .request(Method::PUT, &format!("playlists/{}", playlist_id), Some(&body))
        .await?;
    Ok(())
}

/// Appends tracks in the given order.
pub async fn add_tracks(client: &ApiClient, playlist_id: &str, uris: &[String]) -> Res<()> {
    let url = format!("playlists/{}/tracks", playlist_id);
    for chunk in uris.chunks(TRACK_BATCH_MAX) {
        let body = AddTracksRequest {
            uris: chunk.to_vec(),
        };
        client.request(Method::POST, &url, Some(&body)).await?;
    }
    Ok(())
}

/// Removes every occurrence of the given tracks.
pub async fn remove_tracks(client: &ApiClient, playlist_id: &str, uris: &[String]) -> Res<()> {
    let url = format!("playlists/{}/tracks", playlist_id);
    for chunk in uris.chunks(TRACK_BATCH_MAX) {
        let body = RemoveTracksRequest {
            tracks: chunk
                .iter()
                .map(|uri| TrackUri { uri: uri.clone() })
                .collect(),
        };
        client.request(Method::DELETE, &url, Some(&body)).await?;
    }
    Ok(())
}
