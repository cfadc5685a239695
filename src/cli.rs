// src/cli.rs
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use serde_json::Value;

use crate::config::SiteConfig;
use crate::config::consts::{DEFAULT_CONFIG_FILE, HOME_LOCATION_LIMIT, HOME_NEWS_COUNT, SUMMARY_MAX_CHARS};
use crate::core::{SiteTransport, parse_records};
use crate::document::SiteState;
use crate::query;
use crate::resolver::Resolver;
use crate::startup::{Baseline, load_site_data};

#[derive(Parser, Debug)]
#[command(name = "changfu_site", version, about = "Load and inspect the association's site content")]
pub struct Cli {
    /// TOML config (defaults to ./site.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory that contains data/site-data.json
    #[arg(long, global = true)]
    pub site_root: Option<PathBuf>,

    /// Never contact spreadsheet endpoints
    #[arg(long, global = true)]
    pub offline: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the merged site document as JSON
    Load,
    /// Resolve one category and print it as JSON
    Fetch { category: String },
    /// Parse a CSV export and print the records as JSON
    Parse { file: PathBuf },
    /// Home-page view: stats, latest news, locations
    Summary,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose);

    let config = load_config(&cli)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("could not start async runtime")?;
    runtime.block_on(run_async(cli.command, config))
}

fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let mut config = match &cli.config {
        Some(path) => SiteConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => SiteConfig::load(Path::new(DEFAULT_CONFIG_FILE))?,
        None => SiteConfig::default(),
    };
    if let Some(root) = &cli.site_root {
        config.site_root = root.clone();
    }
    if cli.offline {
        config.use_remote_data = false;
    }
    Ok(config)
}

fn parse_file(file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .wrap_err_with(|| format!("could not read {}", file.display()))?;
    let records = parse_records(&text);
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

async fn run_async(command: Command, config: SiteConfig) -> Result<()> {
    if let Command::Parse { file } = &command {
        return parse_file(file);
    }

    let transport = SiteTransport::from_config(&config)?;
    let resolver = Resolver::new(config, transport);
    let mut state = SiteState::new();

    let report = load_site_data(&resolver, &mut state).await;
    if report.baseline == Baseline::Fallback {
        eprintln!("Warning: site data unavailable, showing built-in content");
    }

    match command {
        Command::Load => {
            let doc = state.document_or_fallback();
            println!("{}", doc.to_json_pretty()?);
        }
        Command::Fetch { category } => {
            let resolution = resolver.resolve(&mut state, &category).await;
            eprintln!("{category}: {:?}", resolution.via);
            println!("{}", serde_json::to_string_pretty(&resolution.document)?);
        }
        Command::Summary => print_summary(&mut state),
        Command::Parse { .. } => {} // handled above
    }
    Ok(())
}

fn print_summary(state: &mut SiteState) {
    let doc = state.document_or_fallback();

    let stats = query::hero_stats(doc);
    println!("served {}  years {}  locations {}", stats.served, stats.years, stats.locations);

    println!("\nLatest news");
    for item in query::latest_news(doc, HOME_NEWS_COUNT) {
        println!(
            "  {}  {}  {}",
            query::format_date(text(item, "publishDate")),
            text(item, "title"),
            query::truncate(text(item, "summary"), SUMMARY_MAX_CHARS)
        );
    }

    println!("\nLocations");
    for loc in query::locations_by_type(doc, query::ALL, HOME_LOCATION_LIMIT) {
        println!("  [{}] {}  {}", text(loc, "locationType"), text(loc, "name"), text(loc, "address"));
    }
}

fn text<'a>(item: &'a Value, key: &str) -> &'a str {
    item.get(key).and_then(Value::as_str).unwrap_or_default()
}
