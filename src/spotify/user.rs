use crate::{Res, spotify::client::ApiClient, types::CurrentUser};

/// Fetches the profile of the user the token belongs to.
pub async fn get_current_user(client: &ApiClient) -> Res<CurrentUser> {
    client.get("me").await
}
