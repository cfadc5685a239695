// src/lib.rs
#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod document;
pub mod error;
pub mod query;
pub mod resolver;
pub mod startup;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::SiteConfig;
pub use document::{CategoryDocument, SiteDocument, SiteState};
pub use resolver::{Resolution, ResolvedVia, Resolver};
pub use startup::{StartupReport, load_site_data};
