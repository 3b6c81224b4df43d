use std::time::Duration;

use crate::{
    Res, config,
    management::{Session, SyncOptions, SyncReport, reconcile},
    server::CallbackListener,
    spotify::{
        auth::{self, AuthSession},
        client::ApiClient,
    },
    success,
    types::{Credentials, Endpoints},
};

/// A sync run from authorization URL to finished reconciliation.
///
/// [`SyncFlow::prepare`] binds the loopback listener first and derives the
/// redirect URI from the port it actually got, so the URL handed to the
/// user always points at a socket that is already listening.
pub struct SyncFlow {
    auth: AuthSession,
    listener: CallbackListener,
    endpoints: Endpoints,
}

impl SyncFlow {
    pub async fn prepare(
        endpoints: Endpoints,
        credentials: Credentials,
        port: u16,
        timeout: Option<Duration>,
    ) -> Res<Self> {
        let listener = CallbackListener::bind(port, timeout).await?;
        let redirect_uri = config::redirect_uri(listener.local_addr()?.port());
        let auth = AuthSession::new(credentials, redirect_uri, config::default_scope());

        Ok(SyncFlow {
            auth,
            listener,
            endpoints,
        })
    }

    pub fn authorize_url(&self) -> Res<String> {
        self.auth.authorize_url(&self.endpoints.auth_url)
    }

    /// Waits for the redirect, exchanges the code and reconciles.
    ///
    /// The browser tab that delivered the redirect receives the change
    /// summary on success and a 500 if anything after the state check fails.
    pub async fn run(self, options: &SyncOptions) -> Res<SyncReport> {
        let SyncFlow {
            auth: session_auth,
            listener,
            endpoints,
        } = self;
        let (session_auth, endpoints) = (&session_auth, &endpoints);

        listener
            .serve_once(&session_auth.state_token, move |code| async move {
                let token = auth::exchange_code(session_auth, &endpoints.token_url, &code).await?;
                let session = Session::start(ApiClient::new(&endpoints.api_url, token)).await?;
                success!("Authenticated as {}", session.user().name());

                reconcile(&session, options).await
            })
            .await
    }
}
