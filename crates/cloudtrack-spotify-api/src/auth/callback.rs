use eyre::OptionExt;
use eyre::Result;
use eyre::eyre;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tracing::debug;
use tracing::warn;
use url::Url;

const MAX_REQUEST_BYTES: usize = 8 * 1024;

/// How long one connection may take to send its request line and headers.
pub const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// What one request to the local listener amounts to.
#[derive(Debug, PartialEq)]
pub enum CallbackOutcome {
    /// Authorization code with a matching state.
    Code(String),
    /// Not the callback path; keep waiting.
    NotFound,
    /// The callback was hit but the login cannot continue.
    Rejected(String),
}

/// Classify a request target such as `/callback?code=..&state=..`.
pub fn parse_callback(target: &str, callback_path: &str, expected_state: &str) -> CallbackOutcome {
    let Ok(url) = Url::parse(&format!("http://localhost{}", target)) else {
        return CallbackOutcome::NotFound;
    };
    if url.path() != callback_path {
        return CallbackOutcome::NotFound;
    }
    let param = |name: &str| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.to_string())
    };
    match param("state") {
        Some(x) if x == expected_state => {}
        Some(x) => {
            return CallbackOutcome::Rejected(format!(
                "State mismatch: {} != {}",
                x, expected_state
            ));
        }
        None => return CallbackOutcome::Rejected("Callback has no state".to_string()),
    }
    if let Some(error) = param("error") {
        return CallbackOutcome::Rejected(format!("Authorization denied: {}", error));
    }
    match param("code") {
        Some(code) => CallbackOutcome::Code(code),
        None => CallbackOutcome::Rejected("Failed to extract code from request".to_string()),
    }
}

/// Local endpoint that receives exactly one authorization callback.
pub struct CallbackListener {
    listener: TcpListener,
    path: String,
    state: String,
    read_timeout: Duration,
}

impl CallbackListener {
    pub async fn bind(redirect_uri: &Url, state: String) -> Result<Self> {
        let host = redirect_uri
            .host_str()
            .ok_or_eyre("Redirect URI has no host")?;
        let port = redirect_uri
            .port_or_known_default()
            .ok_or_eyre("Redirect URI has no port")?;
        let listener = TcpListener::bind((host, port)).await?;
        debug!("Listening for code on {}", redirect_uri);
        Ok(Self {
            listener,
            path: redirect_uri.path().to_string(),
            state,
            read_timeout: REQUEST_READ_TIMEOUT,
        })
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve in the background; the receiver yields the single outcome.
    pub fn spawn(self) -> oneshot::Receiver<Result<String>> {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = self.serve().await;
            let _ = tx.send(result);
        });
        rx
    }

    async fn serve(self) -> Result<String> {
        loop {
            let (mut socket, peer) = self.listener.accept().await?;
            let target =
                match tokio::time::timeout(self.read_timeout, read_request_target(&mut socket))
                    .await
                {
                    Ok(Ok(x)) => x,
                    Ok(Err(e)) => {
                        warn!("Ignoring unreadable request from {}: {:?}", peer, e);
                        continue;
                    }
                    Err(_) => {
                        warn!("Dropping {} after {:?} without a request", peer, self.read_timeout);
                        continue;
                    }
                };
            match parse_callback(&target, &self.path, &self.state) {
                CallbackOutcome::NotFound => {
                    if let Err(e) = respond(&mut socket, "404 Not Found", "Not Found").await {
                        warn!("Could not answer {}: {:?}", peer, e);
                    }
                }
                CallbackOutcome::Rejected(reason) => {
                    if let Err(e) = respond(&mut socket, "403 Forbidden", "Couldn't get token").await
                    {
                        warn!("Could not answer {}: {:?}", peer, e);
                    }
                    return Err(eyre!(reason));
                }
                CallbackOutcome::Code(code) => {
                    if let Err(e) = respond(&mut socket, "200 OK", "Login Completed!").await {
                        warn!("Could not answer {}: {:?}", peer, e);
                    }
                    return Ok(code);
                }
            }
        }
    }
}

/// Wait for the listener's handoff, giving up after `timeout`.
pub async fn await_code(rx: oneshot::Receiver<Result<String>>, timeout: Duration) -> Result<String> {
    match tokio::time::timeout(timeout, rx).await {
        Ok(Ok(result)) => result,
        Ok(Err(_)) => Err(eyre!("Callback listener stopped without a result")),
        Err(_) => Err(eyre!("Timed out after {:?} waiting for login", timeout)),
    }
}

async fn read_request_target(socket: &mut TcpStream) -> Result<String> {
    let mut request = Vec::new();
    let mut buffer = [0; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buffer[..n]);
        if request.len() > MAX_REQUEST_BYTES {
            return Err(eyre!("Request too large"));
        }
    }
    let request = String::from_utf8_lossy(&request);
    request
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
        .ok_or_eyre("Malformed request line")
}

async fn respond(socket: &mut TcpStream, status: &str, message: &str) -> Result<()> {
    let body = format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head><meta charset="UTF-8"><title>Spotify Auth</title></head>
  <body style="font-family:sans-serif;text-align:center;padding-top:3em">
    <h1>{}</h1>
  </body>
</html>
"#,
        message
    );
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await?;
    Ok(())
}
