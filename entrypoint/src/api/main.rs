use std::{sync::Arc, time::Duration};

use clap::Parser;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;

use common::constants::{LEGACY_DATA_FILE, SNAPSHOT_FILE};
use crawler::{
    browser::{BrowserFetcher, BrowserOptions},
    remote::RenderingProxy,
    traits::PageFetcher,
};
use snapshot_store::{legacy::LegacyStore, store::SnapshotStore};
use utils::{
    catalog::CatalogSource,
    logger::configure_logger,
    runner::ScrapeRunner,
    server::{ServerState, build_router, scheduler::spawn_scheduler},
    state::RunCoordinator,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(about = "Bestsellers snapshot API")]
struct Args {
    /// Address to bind the HTTP server on
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: String,
    /// Snapshot file produced by scrape runs
    #[arg(long, default_value = SNAPSHOT_FILE)]
    snapshot_file: String,
    /// Flat product list served by /items
    #[arg(long, default_value = LEGACY_DATA_FILE)]
    legacy_file: String,
    /// Hours between scheduled scrape runs
    #[arg(long, default_value_t = 24)]
    interval_hours: u64,
    /// Fetch pages with a local browser instead of the rendering proxy
    #[arg(long)]
    use_browser: bool,
    /// WebDriver endpoint for browser mode
    #[arg(long, default_value = "http://localhost:9515")]
    webdriver_url: String,
    /// Discover categories from the landing page instead of the fixed table
    #[arg(long)]
    discover_categories: bool,
}

#[tokio::main]
async fn main() {
    configure_logger();

    let args = Args::parse();

    let fetcher: Box<dyn PageFetcher> = if args.use_browser {
        Box::new(BrowserFetcher::new(BrowserOptions {
            webdriver_url: args.webdriver_url.clone(),
            ..BrowserOptions::default()
        }))
    } else {
        Box::new(RenderingProxy::new())
    };

    let catalog = if args.discover_categories {
        CatalogSource::Discovered
    } else {
        CatalogSource::Fixed
    };

    let store = SnapshotStore::new(&args.snapshot_file);
    let runner = ScrapeRunner::new(fetcher, catalog, store.clone());

    let state = Arc::new(ServerState {
        coordinator: RunCoordinator::new(),
        store,
        legacy_store: LegacyStore::new(&args.legacy_file),
        runner,
    });

    spawn_scheduler(
        state.clone(),
        Duration::from_secs(args.interval_hours * 60 * 60),
    );

    let app = build_router(state);

    let listener = TcpListener::bind(&args.bind)
        .await
        .expect("Failed to bind API address");

    info!("Serving API on {}", args.bind);

    axum::serve(listener, app).await.expect("API server crashed");
}
