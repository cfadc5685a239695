// src/config/options.rs
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::error::ConfigError;

/// External services the site talks to. Read once at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Master switch for spreadsheet endpoints.
    pub use_remote_data: bool,
    /// Category → published CSV link. Blank means "not configured".
    pub endpoints: BTreeMap<String, String>,
    pub forms: FormLinks,
    /// Location of the bundled site document (path under `site_root`, or a URL).
    pub data_url: String,
    pub site_root: PathBuf,
    pub remote_timeout_secs: u64,
    /// Categories the startup flow tries to patch from their endpoints.
    pub dynamic_categories: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            use_remote_data: true,
            endpoints: REMOTE_CATEGORIES
                .iter()
                .map(|c| (s!(*c), s!()))
                .collect(),
            forms: FormLinks::default(),
            data_url: s!(DATA_URL),
            site_root: PathBuf::from(DEFAULT_SITE_ROOT),
            remote_timeout_secs: DEFAULT_TIMEOUT_SECS,
            dynamic_categories: DYNAMIC_CATEGORIES.iter().map(|c| s!(*c)).collect(),
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Configured endpoint for `category`, if any.
    pub fn endpoint(&self, category: &str) -> Option<&str> {
        self.endpoints
            .get(category)
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs)
    }
}

/// Google Form links used by the contact, job and course pages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormLinks {
    pub contact: String,
    pub job_apply: String,
    pub course_register: String,
}

impl Default for FormLinks {
    fn default() -> Self {
        Self {
            contact: s!("https://docs.google.com/forms/d/e/.../viewform"),
            job_apply: s!("https://docs.google.com/forms/d/e/.../viewform"),
            course_register: s!("https://docs.google.com/forms/d/e/.../viewform"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_every_endpoint_unconfigured() {
        let cfg = SiteConfig::default();
        assert!(cfg.use_remote_data);
        for cat in REMOTE_CATEGORIES {
            assert_eq!(cfg.endpoints.get(cat).map(String::as_str), Some(""));
            assert_eq!(cfg.endpoint(cat), None);
        }
        assert_eq!(cfg.dynamic_categories, vec!["news", "jobs", "courses"]);
        assert_eq!(cfg.data_url, "data/site-data.json");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = SiteConfig::from_toml(
            r#"
            use_remote_data = false

            [endpoints]
            jobs = "https://example.org/jobs.csv"
            news = "   "
            "#,
        )
        .unwrap();

        assert!(!cfg.use_remote_data);
        assert_eq!(cfg.endpoint("jobs"), Some("https://example.org/jobs.csv"));
        assert_eq!(cfg.endpoint("news"), None);
        assert_eq!(cfg.remote_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(cfg.forms, FormLinks::default());
    }

    #[test]
    fn form_links_and_timeout_parse() {
        let cfg = SiteConfig::from_toml(
            r#"
            remote_timeout_secs = 3
            dynamic_categories = ["jobs"]

            [forms]
            contact = "https://forms.example/contact"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.remote_timeout(), Duration::from_secs(3));
        assert_eq!(cfg.dynamic_categories, vec!["jobs"]);
        assert_eq!(cfg.forms.contact, "https://forms.example/contact");
        assert_eq!(cfg.forms.job_apply, FormLinks::default().job_apply);
    }

    #[test]
    fn example_config_matches_defaults() {
        let cfg = SiteConfig::from_toml(include_str!("../../site.example.toml")).unwrap();
        assert_eq!(cfg, SiteConfig::default());
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(matches!(
            SiteConfig::from_toml("use_remote_data = \"yes\""),
            Err(ConfigError::Toml(_))
        ));
    }
}
