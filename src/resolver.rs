// src/resolver.rs
//! Per-category content resolution.
//!
//! A category is looked up through an ordered list of sources; the first one
//! that produces something wins:
//!
//! ```text
//! Remote  (spreadsheet CSV endpoint, if enabled + configured)
//!   ↓ skipped / failed
//! Cached  (entry already in SiteState)
//!   ↓ miss
//! Local   (site-data.json, cached into SiteState if nothing is yet)
//!   ↓ failed
//! Empty   (empty sequence)
//! ```
//!
//! Nothing here returns an error to the caller. Remote failures are logged as
//! warnings, a broken local document as an error.

use crate::config::SiteConfig;
use crate::core::{Transport, parse_records};
use crate::document::{CategoryDocument, SiteDocument, SiteState, is_truthy};
use crate::error::{SourceError, SourceResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Remote,
    Cached,
    Local,
}

/// Order in which sources are tried.
pub const STRATEGIES: [Strategy; 3] = [Strategy::Remote, Strategy::Cached, Strategy::Local];

/// Which source a resolution ended at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedVia {
    Remote,
    Cached,
    Local,
    Empty,
}

impl From<Strategy> for ResolvedVia {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Remote => ResolvedVia::Remote,
            Strategy::Cached => ResolvedVia::Cached,
            Strategy::Local => ResolvedVia::Local,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub document: CategoryDocument,
    pub via: ResolvedVia,
}

pub struct Resolver<T: Transport> {
    config: SiteConfig,
    transport: T,
}

impl<T: Transport> Resolver<T> {
    pub fn new(config: SiteConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Content for `category`. Always succeeds; worst case is an empty sequence.
    pub async fn fetch_category(&self, state: &mut SiteState, category: &str) -> CategoryDocument {
        self.resolve(state, category).await.document
    }

    /// Same as `fetch_category`, but also reports which source answered.
    pub async fn resolve(&self, state: &mut SiteState, category: &str) -> Resolution {
        for strategy in STRATEGIES {
            match self.attempt(strategy, state, category).await {
                Ok(document) => {
                    return Resolution { document, via: strategy.into() };
                }
                Err(e) => report(strategy, category, &e),
            }
        }
        Resolution {
            document: CategoryDocument::empty(),
            via: ResolvedVia::Empty,
        }
    }

    /// Run a single source in isolation.
    pub async fn attempt(
        &self,
        strategy: Strategy,
        state: &mut SiteState,
        category: &str,
    ) -> SourceResult<CategoryDocument> {
        match strategy {
            Strategy::Remote => self.from_remote(category).await,
            Strategy::Cached => from_cache(state, category),
            Strategy::Local => self.from_local(state, category).await,
        }
    }

    /// Fetch and parse site-data.json.
    pub async fn load_local_document(&self) -> SourceResult<SiteDocument> {
        let text = self.transport.fetch_text(&self.config.data_url).await?;
        SiteDocument::from_json(&text)
    }

    async fn from_remote(&self, category: &str) -> SourceResult<CategoryDocument> {
        if !self.config.use_remote_data {
            return Err(SourceError::RemoteDisabled);
        }
        let endpoint = self
            .config
            .endpoint(category)
            .ok_or_else(|| SourceError::NotConfigured(s!(category)))?;

        let text = self.transport.fetch_text(endpoint).await?;
        let records = parse_records(&text);
        logf!("Loaded {} {category} rows from spreadsheet", records.len());

        // Returned even when empty; the startup merge decides whether it sticks.
        Ok(CategoryDocument::Records(records))
    }

    async fn from_local(&self, state: &mut SiteState, category: &str) -> SourceResult<CategoryDocument> {
        let doc = self.load_local_document().await?;
        let field = doc.category(category).filter(|v| is_truthy(v)).cloned();

        if state.populate_if_empty(doc) {
            logd!("cached site data from {}", self.config.data_url);
        }
        Ok(field.map_or_else(CategoryDocument::empty, CategoryDocument::Value))
    }
}

fn from_cache(state: &SiteState, category: &str) -> SourceResult<CategoryDocument> {
    state
        .cached_category(category)
        .cloned()
        .map(CategoryDocument::Value)
        .ok_or_else(|| SourceError::CacheMiss(s!(category)))
}

fn report(strategy: Strategy, category: &str, err: &SourceError) {
    if err.is_skip() {
        logd!("{category}: {err}");
        return;
    }
    match strategy {
        Strategy::Remote => logw!("Error loading remote {category}, falling back to local: {err}"),
        Strategy::Local => loge!("Critical: failed to load local site data for {category}: {err}"),
        Strategy::Cached => logd!("{category}: {err}"),
    }
}
