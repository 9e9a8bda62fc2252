//! Runs one catalog query against the directory API and prints the page.
//!
//! The local JSON collection is used when the API fails or has no items.

use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;

use teleindex_catalog::domain::criteria::{FilterCriteria, Metric};
use teleindex_catalog::engine::{EngineSettings, QueryEngine, SourceMode};
use teleindex_catalog::pagination::DEFAULT_ITEMS_PER_PAGE;
use teleindex_catalog::query::range::parse_metric_range;
use teleindex_catalog::query::sort::SortMode;
use teleindex_catalog::source::http::HttpCatalog;
use teleindex_catalog::source::memory::MemoryCatalog;

/// Query the channel catalog
#[derive(Parser, Debug)]
#[command(name = "catalog_query")]
#[command(version)]
struct Args {
    /// Base URL of the catalog API
    #[arg(long, env = "CATALOG_API_URL", default_value = "http://127.0.0.1:8080/api")]
    base_url: String,

    /// JSON file served when the API is unavailable
    #[arg(long, env = "CATALOG_FALLBACK", default_value = "data/channels.json")]
    fallback: String,

    /// Free-text search over name, description and tags
    #[arg(short, long)]
    query: Option<String>,

    #[arg(short, long)]
    category: Option<String>,

    /// Sort order (popular, new, name, price, er)
    #[arg(short, long, default_value_t = SortMode::default())]
    sort: SortMode,

    #[arg(long)]
    min_subscribers: Option<String>,

    #[arg(long)]
    max_subscribers: Option<String>,

    #[arg(long)]
    min_price: Option<String>,

    #[arg(long)]
    max_price: Option<String>,

    #[arg(long)]
    min_er: Option<String>,

    #[arg(long)]
    max_er: Option<String>,

    /// Only featured channels
    #[arg(long, default_value_t = false)]
    featured: bool,

    /// Only channels with a live link
    #[arg(long, default_value_t = false)]
    alive: bool,

    #[arg(short, long, default_value_t = 1)]
    page: usize,

    #[arg(long, default_value_t = DEFAULT_ITEMS_PER_PAGE)]
    page_size: usize,
}

impl Args {
    fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::channels()
            .only_featured(self.featured)
            .only_alive(self.alive);
        if let Some(query) = &self.query {
            criteria = criteria.search(query);
        }
        if let Some(category) = &self.category {
            criteria = criteria.category(category);
        }

        let bounds = [
            (Metric::Subscribers, &self.min_subscribers, &self.max_subscribers),
            (Metric::Price, &self.min_price, &self.max_price),
            (Metric::EngagementRate, &self.min_er, &self.max_er),
        ];
        for (metric, min, max) in bounds {
            let range = parse_metric_range(metric, min.as_deref(), max.as_deref());
            criteria = criteria.with_range(metric, range);
        }
        criteria
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = Args::parse();

    let remote = match HttpCatalog::new(&args.base_url) {
        Ok(remote) => remote,
        Err(err) => {
            log::error!("Invalid catalog API URL: {err}");
            return ExitCode::FAILURE;
        }
    };
    let local = match MemoryCatalog::from_path(&args.fallback) {
        Ok(local) => local,
        Err(err) => {
            log::warn!("Fallback collection unavailable: {err}");
            MemoryCatalog::default()
        }
    };

    let settings = EngineSettings {
        page_size: args.page_size.max(1),
        ..EngineSettings::default()
    };
    let mut engine = QueryEngine::new(remote, local, settings);
    engine.set_criteria(args.criteria());
    engine.set_sort(args.sort);
    engine.set_page(args.page);

    let encoded = match engine.refresh().await {
        Ok(page) => serde_json::to_string_pretty(page),
        Err(err) => {
            log::error!("Catalog query failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    if engine.mode() == SourceMode::Fallback {
        log::warn!("Results served from the local collection");
    }

    match encoded {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Failed to encode results: {err}");
            ExitCode::FAILURE
        }
    }
}
