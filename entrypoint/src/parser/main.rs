use clap::{Parser, Subcommand};
use tracing::{error, info};

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
    runner::{ScrapeRunner, run_product_crawl},
};

#[derive(Parser, Debug)]
#[command(about = "One-shot bestsellers scraper")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape every category listing and write the snapshot file
    Listing {
        /// Fetch pages with a local browser instead of the rendering proxy
        #[arg(long)]
        use_browser: bool,
        /// Discover categories from the landing page instead of the fixed table
        #[arg(long)]
        discover_categories: bool,
        #[arg(long, default_value = "http://localhost:9515")]
        webdriver_url: String,
        /// Run the browser with a visible window
        #[arg(long)]
        headed: bool,
        #[arg(long, default_value = SNAPSHOT_FILE)]
        output: String,
    },
    /// Crawl each product page of one category into the legacy flat list
    Product {
        /// Category listing URL to start from
        url: String,
        #[arg(long, default_value = "http://localhost:9515")]
        webdriver_url: String,
        /// Run the browser with a visible window
        #[arg(long)]
        headed: bool,
        #[arg(long, default_value = LEGACY_DATA_FILE)]
        output: String,
    },
}

#[tokio::main]
async fn main() {
    configure_logger();

    match Args::parse().command {
        Command::Listing {
            use_browser,
            discover_categories,
            webdriver_url,
            headed,
            output,
        } => {
            let fetcher: Box<dyn PageFetcher> = if use_browser {
                Box::new(BrowserFetcher::new(BrowserOptions {
                    webdriver_url,
                    headless: !headed,
                    proxy: None,
                }))
            } else {
                Box::new(RenderingProxy::new())
            };

            let catalog = if discover_categories {
                CatalogSource::Discovered
            } else {
                CatalogSource::Fixed
            };

            let runner = ScrapeRunner::new(fetcher, catalog, SnapshotStore::new(&output));

            match runner.run().await {
                Ok(summary) => info!(
                    "Done: {} categories, {} products written to {}",
                    summary.categories, summary.products, output
                ),
                Err(err) => {
                    error!("Scrape run failed: {}", err);
                    std::process::exit(1);
                }
            }
        }
        Command::Product {
            url,
            webdriver_url,
            headed,
            output,
        } => {
            let options = BrowserOptions {
                webdriver_url,
                headless: !headed,
                proxy: None,
            };

            match run_product_crawl(&options, &url, &LegacyStore::new(&output)).await {
                Ok(count) => info!("Done: {} products written to {}", count, output),
                Err(err) => {
                    error!("Product crawl failed: {}", err);
                    std::process::exit(1);
                }
            }
        }
    }
}
