use crate::{
    Res,
    spotify::{client::ApiClient, user},
    types::CurrentUser,
    utils,
};

/// Authenticated context for one run.
///
/// Only obtainable from an [`ApiClient`], which in turn needs an access
/// token, so nothing can talk to the Web API before authentication is done.
#[derive(Debug, Clone)]
pub struct Session {
    api: ApiClient,
    user: CurrentUser,
}

impl Session {
    /// Looks up the token's owner and opens the session.
    pub async fn start(api: ApiClient) -> Res<Self> {
        let user = user::get_current_user(&api).await?;
        Ok(Session { api, user })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    /// Name of the playlist this user's top tracks are synced into.
    pub fn playlist_name(&self) -> String {
        utils::playlist_name_for(self.user.name())
    }
}
