//! HTTP adapter over `reqwest`'s blocking client.

use std::time::Duration;

use sprout_core::{
    application::ports::{HttpClient, HttpResponse, TransportError},
    error::{Context, SproutResult},
};
use tracing::debug;

/// Default `User-Agent`; the GitHub API rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("sprout/", env!("CARGO_PKG_VERSION"));

/// Production HTTP client. Follows redirects (archive downloads redirect to
/// `codeload.github.com`).
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new(user_agent: &str) -> SproutResult<Self> {
        // No overall deadline; reqwest's blocking default is 30s.
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(None::<Duration>)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| TransportError(e.to_string()))?;

        debug!(%url, status, bytes = body.len(), "GET");
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn builds_with_default_user_agent() {
        assert!(ReqwestClient::new(DEFAULT_USER_AGENT).is_ok());
        assert!(DEFAULT_USER_AGENT.starts_with("sprout/"));
    }

    /// Sends the headers at once and the body only after `delay`.
    fn slow_server(delay: Duration, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
            }
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .unwrap();
            stream.flush().unwrap();
            thread::sleep(delay);
            stream.write_all(body.as_bytes()).unwrap();
        });
        format!("http://{addr}/owner/repo/archive/master.zip")
    }

    #[test]
    fn slow_download_is_not_cut_off() {
        // reqwest's blocking client gives up after 30s unless told otherwise.
        let url = slow_server(Duration::from_secs(32), "PK\x03\x04");
        let client = ReqwestClient::new(DEFAULT_USER_AGENT).unwrap();

        let response = client.get(&url).unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"PK\x03\x04");
    }

    #[test]
    fn unreachable_host_is_transport_error() {
        let client = ReqwestClient::new(DEFAULT_USER_AGENT).unwrap();
        // Port 9 (discard) is closed on any sane test host.
        let err = client.get("http://127.0.0.1:9/repos/o/r/tags").unwrap_err();
        assert!(!err.0.is_empty());
    }
}
