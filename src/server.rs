use std::{
    future::Future,
    net::{Ipv4Addr, SocketAddr},
    time::Duration,
};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpSocket, TcpStream},
};

use crate::{
    Res,
    api::{CallbackRequest, CallbackResponse},
    errors::Error,
    warning,
};

/// Only the request line and headers of a GET are needed.
const REQUEST_CHUNK: usize = 1024;

/// How long an accepted connection may stay silent before it is dropped.
/// Browsers open speculative connections that never carry a request.
pub const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(2);

/// Text written to the browser tab when the work behind the callback succeeds.
pub trait CallbackBody {
    fn callback_body(&self) -> String;
}

impl CallbackBody for String {
    fn callback_body(&self) -> String {
        self.clone()
    }
}

/// One-shot loopback listener for the OAuth redirect.
pub struct CallbackListener {
    listener: TcpListener,
    timeout: Option<Duration>,
}

impl CallbackListener {
    /// Binds `127.0.0.1:{port}` with address reuse, so a rerun right after an
    /// aborted one does not fail with "address in use". Port `0` picks a free
    /// port.
    ///
    /// Only IPv4 is bound. The redirect URI names `localhost`; a browser that
    /// resolves it to `::1` first reaches the listener through its IPv4
    /// fallback.
    pub async fn bind(port: u16, timeout: Option<Duration>) -> Res<Self> {
        let socket = TcpSocket::new_v4()?;
        socket.set_reuseaddr(true)?;
        socket.bind(SocketAddr::from((Ipv4Addr::LOCALHOST, port)))?;
        let listener = socket.listen(16)?;

        Ok(CallbackListener { listener, timeout })
    }

    pub fn local_addr(&self) -> Res<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Waits for the callback, hands its code to `work` and answers the
    /// browser with the outcome.
    ///
    /// Requests for any other path (favicon, prefetch) get a 404 and do not
    /// consume the callback. Once the callback arrives the listener is
    /// closed. The state is validated before `work` runs, so a foreign
    /// redirect never gets as far as the token exchange. Whatever happens,
    /// the browser gets a response (200, 400 or 500) before the result is
    /// returned.
    pub async fn serve_once<F, Fut, T>(self, expected_state: &str, work: F) -> Res<T>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Res<T>>,
        T: CallbackBody,
    {
        let CallbackListener { listener, timeout } = self;

        let (mut stream, request) = match timeout {
            Some(limit) => tokio::time::timeout(limit, accept_callback(&listener))
                .await
                .map_err(|_| Error::CallbackTimeout(limit))??,
            None => accept_callback(&listener).await?,
        };
        drop(listener);

        let code = match request.authorization_code(expected_state) {
            Ok(code) => code,
            Err(e) => {
                respond(&mut stream, &CallbackResponse::for_error(&e)).await;
                return Err(e);
            }
        };

        let result = work(code).await;
        let response = match &result {
            Ok(outcome) => CallbackResponse::ok(outcome.callback_body()),
            Err(_) => CallbackResponse::internal_error(),
        };
        respond(&mut stream, &response).await;

        result
    }
}

async fn accept_callback(listener: &TcpListener) -> Res<(TcpStream, CallbackRequest)> {
    loop {
        let (mut stream, peer) = listener.accept().await?;

        let mut buf = [0u8; REQUEST_CHUNK];
        let n = match tokio::time::timeout(REQUEST_READ_TIMEOUT, stream.read(&mut buf)).await {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => {
                warning!("Failed to read request from {}: {}", peer, e);
                continue;
            }
            Err(_) => {
                warning!("Dropping idle connection from {}", peer);
                continue;
            }
        };
        let raw = String::from_utf8_lossy(&buf[..n]);

        match CallbackRequest::parse(&raw) {
            Ok(request) if request.is_callback() => return Ok((stream, request)),
            Ok(request) => {
                warning!("Ignoring request for {}", request.path());
                respond(&mut stream, &CallbackResponse::not_found()).await;
            }
            Err(e) => {
                warning!("Ignoring unreadable request from {}: {}", peer, e);
                respond(&mut stream, &CallbackResponse::bad_request("Bad request.\n")).await;
            }
        }
    }
}

async fn respond(stream: &mut TcpStream, response: &CallbackResponse) {
    let written = async {
        stream.write_all(&response.to_bytes()).await?;
        stream.flush().await?;
        stream.shutdown().await
    }
    .await;

    if let Err(e) = written {
        warning!("Failed to answer the browser: {}", e);
    }
}
