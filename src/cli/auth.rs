use crate::{Res, config, management::SyncFlow};

/// Prints an authorization URL for the configured client without waiting
/// for the callback. Useful for checking the redirect URI registration.
pub async fn auth_url(port: u16) -> Res<String> {
    let credentials = config::credentials()?;
    let flow = SyncFlow::prepare(config::endpoints(), credentials, port, None).await?;
    let url = flow.authorize_url()?;
    println!("{}", url);
    Ok(url)
}
