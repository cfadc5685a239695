// src/config/consts.rs

// Local document
pub const DATA_URL: &str = "data/site-data.json";
pub const DEFAULT_SITE_ROOT: &str = ".";

// Config file looked up in the working directory when --config is absent
pub const DEFAULT_CONFIG_FILE: &str = "site.toml";

// Net config
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const USER_AGENT: &str = concat!("changfu_site/", env!("CARGO_PKG_VERSION"));

// Categories with a spreadsheet endpoint slot
pub const REMOTE_CATEGORIES: [&str; 4] = ["news", "jobs", "courses", "serviceLocations"];

// Categories patched from remote sources at startup
pub const DYNAMIC_CATEGORIES: [&str; 3] = ["news", "jobs", "courses"];

// Read-side defaults used by the home page
pub const HOME_NEWS_COUNT: usize = 3;
pub const HOME_LOCATION_LIMIT: usize = 8;
pub const SUMMARY_MAX_CHARS: usize = 100;
