// src/startup.rs
use crate::core::Transport;
use crate::document::SiteState;
use crate::resolver::{Resolution, ResolvedVia, Resolver};

/// Where the baseline document came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
    Local,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryOutcome {
    pub category: String,
    pub via: ResolvedVia,
    pub patched: bool,
}

/// What `load_site_data` did, for logs and the CLI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartupReport {
    pub baseline: Baseline,
    pub categories: Vec<CategoryOutcome>,
}

impl StartupReport {
    pub fn patched(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .filter(|c| c.patched)
            .map(|c| c.category.as_str())
    }
}

/// Page-load sequence.
///
/// 1. Load site-data.json as the baseline (built-in fallback if that fails;
///    no remote patching happens in that case).
/// 2. With remote data enabled, resolve each dynamic category in order and
///    overwrite it only when the result is a non-empty sequence.
pub async fn load_site_data<T: Transport>(resolver: &Resolver<T>, state: &mut SiteState) -> StartupReport {
    let config = resolver.config();

    match resolver.load_local_document().await {
        Ok(doc) => {
            logf!("Loaded site data from {}", config.data_url);
            state.populate(doc);
        }
        Err(e) => {
            loge!("Error loading site data, using built-in fallback: {e}");
            state.install_fallback();
            return StartupReport { baseline: Baseline::Fallback, categories: Vec::new() };
        }
    }

    let mut categories = Vec::with_capacity(config.dynamic_categories.len());
    if config.use_remote_data {
        for category in &config.dynamic_categories {
            let Resolution { document, via } = resolver.resolve(state, category).await;
            let patched = match via {
                // Already what the state holds.
                ResolvedVia::Cached => false,
                _ => state.merge_category(category, document),
            };
            if patched {
                logf!("Updated {category} from {via:?} source");
            }
            categories.push(CategoryOutcome { category: category.clone(), via, patched });
        }
    }

    StartupReport { baseline: Baseline::Local, categories }
}
