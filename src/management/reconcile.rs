use chrono::{Local, NaiveDate};

use crate::{
    Res, config, info,
    management::Session,
    server::CallbackBody,
    spotify::{playlist, tracks},
    types::{Playlist, Track},
    utils,
};

/// Membership changes that bring a playlist in line with the top tracks.
///
/// Computed fresh on every run from live data, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Top tracks missing from the playlist, in top-tracks order.
    pub to_add: Vec<Track>,
    /// Playlist tracks that dropped out of the top tracks, in playlist order.
    pub to_remove: Vec<Track>,
}

impl SyncPlan {
    /// Diffs the two lists by URI.
    ///
    /// Order is irrelevant for membership: a track that only moved within the
    /// window produces no change. Repeated URIs collapse to their first
    /// occurrence.
    pub fn compute(playlist_tracks: &[Track], top_tracks: &[Track]) -> Self {
        let in_playlist = utils::uri_set(playlist_tracks);
        let in_top = utils::uri_set(top_tracks);

        let to_add = top_tracks
            .iter()
            .filter(|t| !in_playlist.contains(t.uri.as_str()))
            .cloned()
            .collect();
        let to_remove = playlist_tracks
            .iter()
            .filter(|t| !in_top.contains(t.uri.as_str()))
            .cloned()
            .collect();

        SyncPlan {
            to_add: utils::dedup_by_uri(to_add),
            to_remove: utils::dedup_by_uri(to_remove),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    pub fn uris_to_add(&self) -> Vec<String> {
        self.to_add.iter().map(|t| t.uri.clone()).collect()
    }

    pub fn uris_to_remove(&self) -> Vec<String> {
        self.to_remove.iter().map(|t| t.uri.clone()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Size of the top tracks window.
    pub limit: u32,
    /// Compute and report the plan without touching the playlist.
    pub dry_run: bool,
    /// Date written into the playlist description.
    pub date: NaiveDate,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            limit: config::DEFAULT_TOP_TRACKS,
            dry_run: false,
            date: Local::now().date_naive(),
        }
    }
}

/// What a sync run did.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub playlist: Playlist,
    pub created: bool,
    pub added: Vec<Track>,
    pub removed: Vec<Track>,
    /// Description written to the playlist; `None` on a dry run.
    pub description: Option<String>,
    pub dry_run: bool,
}

impl SyncReport {
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }

    /// Plain-text listing of the changes.
    pub fn summary(&self) -> String {
        if !self.has_changes() {
            return "No changes to playlist.\n".to_string();
        }

        let mut out = String::new();
        for (title, list) in [("Added:", &self.added), ("Removed:", &self.removed)] {
            out.push_str(title);
            out.push('\n');
            for t in list {
                out.push_str(&format!(
                    "    {} - {} ({})\n",
                    t.name,
                    t.artist_names(),
                    t.album_name
                ));
            }
        }
        out
    }
}

impl CallbackBody for SyncReport {
    fn callback_body(&self) -> String {
        self.summary()
    }
}

/// Finds the user's own sync playlist, creating it when there is none.
///
/// Returns the playlist and whether it was just created.
pub async fn resolve_playlist(session: &Session) -> Res<(Playlist, bool)> {
    let name = session.playlist_name();
    let playlists = playlist::get_user_playlists(session.api()).await?;

    if let Some(existing) = playlist::find_owned(&playlists, &session.user().id, &name) {
        info!("Using existing playlist {}", existing.name);
        return Ok((existing.clone(), false));
    }

    info!("Creating playlist {}", name);
    let created = playlist::create(session.api(), &session.user().id, &name).await?;
    Ok((created, true))
}

/// Brings the sync playlist in line with the current top tracks.
///
/// Removals are sent before additions, each as one batched call, and only
/// when there is something to send. The description is rewritten on every
/// run, changes or not, so the user can see that a sync happened. There is
/// no rollback: if the addition fails after the removal succeeded, the
/// playlist stays half-updated until the next run.
pub async fn reconcile(session: &Session, options: &SyncOptions) -> Res<SyncReport> {
    let (target, created) = resolve_playlist(session).await?;

    let pb = utils::spinner("Fetching playlist and top tracks...");
    let fetched = async {
        let playlist_tracks = tracks::get_playlist_tracks(session.api(), &target.id).await?;
        let top_tracks = tracks::get_top_tracks(session.api(), options.limit).await?;
        Res::Ok((playlist_tracks, top_tracks))
    }
    .await;
    pb.finish_and_clear();
    let (playlist_tracks, top_tracks) = fetched?;

    info!(
        "{} tracks in playlist, {} top tracks",
        playlist_tracks.len(),
        top_tracks.len()
    );

    let plan = SyncPlan::compute(&playlist_tracks, &top_tracks);
    info!(
        "Removing {} tracks, adding {} tracks",
        plan.to_remove.len(),
        plan.to_add.len()
    );

    let description = if options.dry_run {
        None
    } else {
        if !plan.to_remove.is_empty() {
            playlist::remove_tracks(session.api(), &target.id, &plan.uris_to_remove()).await?;
        }
        if !plan.to_add.is_empty() {
            playlist::add_tracks(session.api(), &target.id, &plan.uris_to_add()).await?;
        }

        let description = utils::playlist_description(options.date);
        playlist::update_description(session.api(), &target.id, &description).await?;
        Some(description)
    };

    Ok(SyncReport {
        playlist: target,
        created,
        added: plan.to_add,
        removed: plan.to_remove,
        description,
        dry_run: options.dry_run,
    })
}
