use crate::{
    Res,
    errors::Error,
    spotify::{client::ApiClient, pagination::Pages},
    types::{PlaylistItem, RawTrack, Track},
};

/// Largest page the top-items endpoint serves.
const TOP_TRACKS_PAGE_MAX: u32 = 50;

const PLAYLIST_TRACKS_PAGE: u32 = 100;

/// Retrieves the user's short-term top tracks, highest ranked first.
///
/// Asks for `limit` tracks in one page when the endpoint allows it and
/// otherwise follows `next` links until `limit` tracks have been gathered.
/// Every track is projected down to [`Track`].
///
/// # Example
///
/// ```
/// let top = get_top_tracks(session.api(), 25).await?;
/// ```
pub async fn get_top_tracks(client: &ApiClient, limit: u32) -> Res<Vec<Track>> {
    if limit == 0 {
        return Err(Error::Validation(
            "top track limit must be at least 1".to_string(),
        ));
    }

    let url = format!(
        "me/top/tracks?time_range=short_term&limit={limit}",
        limit = limit.min(TOP_TRACKS_PAGE_MAX)
    );
    let raw = Pages::<RawTrack>::new(client, &url)
        .collect_up_to(limit as usize)
        .await?;

    Ok(raw.into_iter().map(Track::from).collect())
}

/// Retrieves every track of a playlist, in playlist order.
///
/// Entries whose track is gone (`"track": null`) are skipped.
pub async fn get_playlist_tracks(client: &ApiClient, playlist_id: &str) -> Res<Vec<Track>> {
    let url = format!(
        "playlists/{id}/tracks?limit={limit}",
        id = playlist_id,
        limit = PLAYLIST_TRACKS_PAGE
    );
    let items = Pages::<PlaylistItem>::new(client, &url).collect().await?;

    Ok(items
        .into_iter()
        .filter_map(|item| item.track)
        .map(Track::from)
        .collect())
}
