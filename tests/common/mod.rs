// tests/common/mod.rs
//
// In-memory transport with canned replies; records every location asked for.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use changfu_site::config::SiteConfig;
use changfu_site::core::Transport;
use changfu_site::core::net::is_remote;
use changfu_site::error::{SourceError, SourceResult};

pub const DATA_URL: &str = "data/site-data.json";
pub const JOBS_URL: &str = "https://sheets.example/jobs.csv";
pub const NEWS_URL: &str = "https://sheets.example/news.csv";
pub const COURSES_URL: &str = "https://sheets.example/courses.csv";

pub const SITE_DATA: &str = r#"{
    "organization": { "name": "宜蘭縣長期照護及社會福祉推廣協會" },
    "serviceTypes": [ { "id": "elder-care" } ],
    "serviceLocations": [ { "id": "babao", "locationType": "長照機構" } ],
    "news": [ { "id": "local-news-1", "title": "Open day" } ],
    "jobs": [ { "title": "Cook", "location": "Luodong" } ],
    "courses": []
}"#;

enum Reply {
    Text(String),
    Status(u16),
}

#[derive(Default)]
pub struct ScriptedTransport {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport that serves SITE_DATA at DATA_URL.
    pub fn with_site_data() -> Self {
        Self::new().text(DATA_URL, SITE_DATA)
    }

    pub fn text(mut self, location: &str, body: &str) -> Self {
        self.replies.insert(location.to_string(), Reply::Text(body.to_string()));
        self
    }

    pub fn status(mut self, location: &str, code: u16) -> Self {
        self.replies.insert(location.to_string(), Reply::Status(code));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn remote_calls(&self) -> usize {
        self.calls().iter().filter(|c| is_remote(c)).count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch_text(&self, location: &str) -> SourceResult<String> {
        self.calls.lock().unwrap().push(location.to_string());
        match self.replies.get(location) {
            Some(Reply::Text(body)) => Ok(body.clone()),
            Some(Reply::Status(code)) => Err(SourceError::Status {
                location: location.to_string(),
                status: *code,
            }),
            None => Err(SourceError::Io {
                location: location.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such resource"),
            }),
        }
    }
}

/// Config with the given remote switch and endpoints; everything else default.
pub fn config(use_remote_data: bool, endpoints: &[(&str, &str)]) -> SiteConfig {
    let mut cfg = SiteConfig::default();
    cfg.use_remote_data = use_remote_data;
    for (category, url) in endpoints {
        cfg.endpoints.insert(category.to_string(), url.to_string());
    }
    cfg
}
