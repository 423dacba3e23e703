use thiserror::Error;
use tracing::{error, info, warn};

use common::{
    constants::MAX_ITEMS_PER_CATEGORY,
    record::ProductRecord,
    snapshot::{Category, Snapshot},
};
use crawler::{
    browser::{BrowserOptions, BrowserSession},
    errors::CrawlerError,
    traits::{FetchOptions, PageFetcher},
};
use extractor::{
    discovery::discover_categories,
    listing::extract_listing,
    product::{extract_product, extract_product_links},
    rules::ListingRules,
};
use snapshot_store::{errors::SnapshotError, legacy::LegacyStore, store::SnapshotStore};

use crate::catalog::{BESTSELLERS_LANDING_URL, CatalogSource, fixed_categories};

/// Either of these appearing means the category listing rendered.
const LISTING_MARKER: &str = "ol.a-ordered-list, div.p13n-desktop-grid";
const PRODUCT_GRID_MARKER: &str = "div.p13n-desktop-grid";
const PRODUCT_PAGE_MARKER: &str = "#productTitle, #centerCol";

#[derive(Error, Debug)]
pub enum RunError {
    #[error("No category produced any products")]
    NoData,
    #[error("Failed to fetch page")]
    Fetch(#[from] CrawlerError),
    #[error("Failed to persist results")]
    Persist(#[from] SnapshotError),
}

#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub categories: usize,
    pub products: usize,
}

/// Drives one full scrape run: resolve the category catalog, fetch and
/// extract each category in order, persist the aggregate.
pub struct ScrapeRunner {
    fetcher: Box<dyn PageFetcher>,
    catalog: CatalogSource,
    rules: ListingRules,
    store: SnapshotStore,
}

impl ScrapeRunner {
    pub fn new(fetcher: Box<dyn PageFetcher>, catalog: CatalogSource, store: SnapshotStore) -> Self {
        Self {
            fetcher,
            catalog,
            rules: ListingRules::default(),
            store,
        }
    }

    pub fn with_rules(mut self, rules: ListingRules) -> Self {
        self.rules = rules;

        self
    }

    /// A failed category contributes zero products and the run moves
    /// on; only a run where every category came up empty is a failure,
    /// and that failure leaves any previous snapshot file untouched.
    pub async fn run(&self) -> Result<RunSummary, RunError> {
        let categories = self.resolve_catalog().await?;

        info!("Scraping {} categories", categories.len());

        let mut snapshot = Snapshot::new();

        for category in categories {
            let records = match self.scrape_category(&category).await {
                Ok(records) => records,
                Err(err) => {
                    error!("Category '{}' failed: {}", category.name, err);
                    Vec::new()
                }
            };

            if records.is_empty() {
                warn!("No products collected for '{}'", category.name);
                continue;
            }

            info!(
                "Collected {} products for '{}'",
                records.len(),
                category.name
            );
            snapshot.insert(category.name, records);
        }

        if snapshot.is_empty() {
            return Err(RunError::NoData);
        }

        let summary = RunSummary {
            categories: snapshot.category_count(),
            products: snapshot.product_count(),
        };

        self.store.write(&snapshot)?;

        info!(
            "Snapshot written to {:?} ({} categories, {} products)",
            self.store.path(),
            summary.categories,
            summary.products
        );

        Ok(summary)
    }

    async fn resolve_catalog(&self) -> Result<Vec<Category>, RunError> {
        match self.catalog {
            CatalogSource::Fixed => Ok(fixed_categories()),
            CatalogSource::Discovered => {
                let html = self
                    .fetcher
                    .fetch_page(
                        BESTSELLERS_LANDING_URL,
                        FetchOptions::default().with_deep_scroll(),
                    )
                    .await?;

                Ok(discover_categories(&html))
            }
        }
    }

    async fn scrape_category(&self, category: &Category) -> Result<Vec<ProductRecord>, RunError> {
        let html = self
            .fetcher
            .fetch_page(&category.url, FetchOptions::wait_for(LISTING_MARKER))
            .await?;

        Ok(extract_listing(&html, &self.rules))
    }
}

/// Browser-only variant that follows each product link of one category
/// and writes the flat legacy list. A single session serves the whole
/// crawl and is closed on every exit path.
pub async fn run_product_crawl(
    options: &BrowserOptions,
    category_url: &str,
    store: &LegacyStore,
) -> Result<usize, RunError> {
    let session = BrowserSession::launch(options).await?;

    let crawled = crawl_products(&session, category_url).await;

    if let Err(err) = session.close().await {
        warn!("Failed to shut down browser session: {}", err);
    }

    let items = crawled?;

    if items.is_empty() {
        return Err(RunError::NoData);
    }

    store.write_items(&items)?;

    info!("Wrote {} items to {:?}", items.len(), store.path());

    Ok(items.len())
}

async fn crawl_products(
    session: &BrowserSession,
    category_url: &str,
) -> Result<Vec<ProductRecord>, CrawlerError> {
    session.warm_up().await?;

    let listing_html = session
        .fetch(category_url, Some(PRODUCT_GRID_MARKER))
        .await?;
    let links = extract_product_links(&listing_html, MAX_ITEMS_PER_CATEGORY);

    if links.is_empty() {
        error!("Could not find product links on the category page");
        return Ok(Vec::new());
    }

    let mut items: Vec<ProductRecord> = Vec::new();

    for (index, link) in links.iter().enumerate() {
        match session.fetch(link, Some(PRODUCT_PAGE_MARKER)).await {
            Ok(html) => items.push(extract_product(&html, link, (index + 1) as u32)),
            // one broken product page never sinks its siblings
            Err(err) => error!("Failed to crawl product {}: {}", link, err),
        }
    }

    Ok(items)
}
