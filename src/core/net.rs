// src/core/net.rs
//
// Where text comes from: `http(s)://` locations go over the network,
// everything else is a file under the site root.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::SiteConfig;
use crate::config::consts::USER_AGENT;
use crate::error::{SourceError, SourceResult};

/// Fetch a whole resource as text.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch_text(&self, location: &str) -> SourceResult<String>;
}

pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Production transport: reqwest for URLs, tokio::fs for site files.
#[derive(Clone, Debug)]
pub struct SiteTransport {
    client: reqwest::Client,
    site_root: PathBuf,
}

impl SiteTransport {
    /// `timeout` bounds every HTTP request (connect + body).
    pub fn new(site_root: impl Into<PathBuf>, timeout: Duration) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, site_root: site_root.into() })
    }

    pub fn from_config(config: &SiteConfig) -> SourceResult<Self> {
        Self::new(config.site_root.clone(), config.remote_timeout())
    }

    async fn http_get(&self, url: &str) -> SourceResult<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                location: s!(url),
                status: status.as_u16(),
            });
        }
        resp.text().await.map_err(|e| classify(url, e))
    }

    async fn read_file(&self, location: &str) -> SourceResult<String> {
        let path = self.site_root.join(location);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::Io {
                location: path.display().to_string(),
                source,
            })
    }
}

#[async_trait]
impl Transport for SiteTransport {
    async fn fetch_text(&self, location: &str) -> SourceResult<String> {
        if is_remote(location) {
            logd!("GET {location}");
            self.http_get(location.trim()).await
        } else {
            logd!("read {location} under {}", self.site_root.display());
            self.read_file(location).await
        }
    }
}

fn classify(url: &str, err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        SourceError::Timeout(s!(url))
    } else {
        SourceError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_detection() {
        assert!(is_remote("https://docs.google.com/spreadsheets/d/x/pub?output=csv"));
        assert!(is_remote("HTTP://example.org/a.csv"));
        assert!(!is_remote("data/site-data.json"));
        assert!(!is_remote("/srv/site/data/site-data.json"));
    }

    #[tokio::test]
    async fn reads_site_files_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/site-data.json"), "{}").unwrap();

        let t = SiteTransport::new(dir.path(), Duration::from_secs(1)).unwrap();
        assert_eq!(t.fetch_text("data/site-data.json").await.unwrap(), "{}");

        let missing = t.fetch_text("data/nope.json").await.unwrap_err();
        assert!(matches!(missing, SourceError::Io { .. }));
    }

    /// Tiny HTTP/1.1 responder: `/jobs.csv` → 200, `/slow.csv` answers after
    /// two seconds, anything else → 404.
    async fn serve_loopback() -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut sock, _)) = listener.accept().await else { return };
                tokio::spawn(async move {
                    let mut buf: Vec<u8> = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match sock.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let head = String::from_utf8_lossy(&buf);
                    let path = head.split_whitespace().nth(1).unwrap_or("/").to_owned();

                    let (status, body) = match path.as_str() {
                        "/jobs.csv" => ("200 OK", "title\nA\n"),
                        "/slow.csv" => {
                            tokio::time::sleep(Duration::from_secs(2)).await;
                            ("200 OK", "title\nLate\n")
                        }
                        _ => ("404 Not Found", "missing"),
                    };
                    let reply = format!(
                        "HTTP/1.1 {status}\r\ncontent-type: text/csv\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = sock.write_all(reply.as_bytes()).await;
                    let _ = sock.shutdown().await;
                });
            }
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn http_status_and_timeout_map_to_source_errors() {
        let base = serve_loopback().await;
        let t = SiteTransport::new(".", Duration::from_millis(300)).unwrap();

        let body = t.fetch_text(&format!("{base}/jobs.csv")).await.unwrap();
        assert_eq!(body, "title\nA\n");

        let missing = t.fetch_text(&format!("{base}/gone.csv")).await;
        assert!(matches!(missing, Err(SourceError::Status { status: 404, .. })));

        let slow = t.fetch_text(&format!("{base}/slow.csv")).await;
        assert!(matches!(slow, Err(SourceError::Timeout(_))), "{slow:?}");
    }
}
