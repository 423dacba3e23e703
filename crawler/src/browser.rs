use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use thirtyfour::{
    By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver,
    extensions::query::ElementQueryable,
};
use tokio::time::sleep;
use tracing::{info, warn};

use common::constants::STORE_ORIGIN;

use crate::{
    errors::CrawlerError,
    traits::{FetchOptions, PageFetcher},
};

const PAGE_MARKER_TIMEOUT_SECONDS: u64 = 20;
const PAGE_MARKER_POLL_MILLIS: u64 = 500;

const WINDOW_SIZE: &str = "--window-size=1920,1080";

/// Real desktop browser strings, one picked at random per session.
const USER_AGENTS: [&str; 6] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Edge/123.0.0.0 Safari/537.36",
];

#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub webdriver_url: String,
    pub headless: bool,
    pub proxy: Option<String>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".into(),
            headless: true,
            proxy: None,
        }
    }
}

/// One locally driven browser. A session is scoped to a single
/// category fetch (or one run in the single-session variant) and must
/// be closed on every exit path so chrome memory doesn't pile up.
pub struct BrowserSession {
    driver: WebDriver,
}

impl BrowserSession {
    pub async fn launch(options: &BrowserOptions) -> Result<Self, CrawlerError> {
        let mut caps = DesiredCapabilities::chrome();

        let user_agent = random_user_agent();
        info!("Using user agent: {}", user_agent);
        caps.add_arg(&format!("--user-agent={user_agent}"))?;

        if options.headless {
            // the old headless mode renders differently enough to
            // trip the storefront's bot checks
            caps.add_arg("--headless=new")?;
        }

        caps.set_no_sandbox()?;
        caps.set_disable_dev_shm_usage()?;
        caps.add_arg("--disable-blink-features=AutomationControlled")?;
        caps.add_arg(WINDOW_SIZE)?;

        if let Some(proxy) = &options.proxy {
            caps.add_arg(&format!("--proxy-server={proxy}"))?;
        }

        let driver = WebDriver::new(&options.webdriver_url, caps).await?;

        Ok(Self { driver })
    }

    /// Visit the store's home page first to pick up baseline cookies,
    /// then idle a human-looking amount of time.
    pub async fn warm_up(&self) -> Result<(), CrawlerError> {
        info!("Warming up session against {}", STORE_ORIGIN);

        self.driver.goto(STORE_ORIGIN).await?;
        human_wait(2.0, 4.0).await;

        Ok(())
    }

    /// Navigate to `url` and return the rendered page source. When a
    /// marker selector is given we wait for it to appear; otherwise we
    /// fall back to a randomized sleep.
    pub async fn fetch(&self, url: &str, wait_marker: Option<&str>) -> Result<String, CrawlerError> {
        info!("Navigating to {}", url);

        self.driver.goto(url).await?;

        match wait_marker {
            Some(marker) => self.wait_for_marker(marker).await?,
            None => human_wait(3.0, 6.0).await,
        }

        // nudge lazy-loaded content into view
        self.scroll_by(500).await?;
        human_wait(0.5, 1.5).await;

        Ok(self.driver.source().await?)
    }

    pub async fn scroll_by(&self, pixels: i64) -> Result<(), CrawlerError> {
        self.driver
            .execute(
                "window.scrollBy(0, arguments[0]);",
                vec![serde_json::json!(pixels)],
            )
            .await?;

        Ok(())
    }

    /// Scroll the full page height in steps, pausing between steps, to
    /// force every lazy carousel on the page to load.
    pub async fn scroll_to_bottom(&self) -> Result<(), CrawlerError> {
        for _ in 0..8 {
            self.scroll_by(1000).await?;
            human_wait(0.4, 1.0).await;
        }

        Ok(())
    }

    async fn wait_for_marker(&self, marker: &str) -> Result<(), CrawlerError> {
        let found = self
            .driver
            .query(By::Css(marker))
            .wait(
                Duration::from_secs(PAGE_MARKER_TIMEOUT_SECONDS),
                Duration::from_millis(PAGE_MARKER_POLL_MILLIS),
            )
            .first()
            .await;

        match found {
            Ok(_) => Ok(()),
            Err(err) => {
                warn!("Marker '{}' never appeared: {}", marker, err);
                Err(CrawlerError::PageMarkerTimeout(marker.into()))
            }
        }
    }

    /// Re-read the page source without navigating, e.g. after extra
    /// scrolling loaded more content.
    pub async fn source(&self) -> Result<String, CrawlerError> {
        Ok(self.driver.source().await?)
    }

    /// Tear the browser down. Consumes the session so nothing can use
    /// the driver after quit.
    pub async fn close(self) -> Result<(), CrawlerError> {
        self.driver.quit().await?;

        Ok(())
    }
}

/// Fetches each page with a fresh browser session and tears it down on
/// every exit path, bounding chrome's memory across a full run.
pub struct BrowserFetcher {
    options: BrowserOptions,
}

impl BrowserFetcher {
    pub fn new(options: BrowserOptions) -> Self {
        Self { options }
    }

    async fn drive(
        session: &BrowserSession,
        url: &str,
        options: FetchOptions<'_>,
    ) -> Result<String, CrawlerError> {
        session.warm_up().await?;

        let mut html = session.fetch(url, options.wait_marker).await?;

        if options.deep_scroll {
            session.scroll_to_bottom().await?;
            html = session.source().await?;
        }

        Ok(html)
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch_page(
        &self,
        url: &str,
        options: FetchOptions<'_>,
    ) -> Result<String, CrawlerError> {
        let session = BrowserSession::launch(&self.options).await?;

        let driven = Self::drive(&session, url, options).await;

        if let Err(err) = session.close().await {
            warn!("Failed to shut down browser session: {}", err);
        }

        driven
    }
}

pub async fn human_wait(min_secs: f64, max_secs: f64) {
    let pause = rand::thread_rng().gen_range(min_secs..max_secs);
    sleep(Duration::from_secs_f64(pause)).await;
}

fn random_user_agent() -> &'static str {
    USER_AGENTS[rand::thread_rng().gen_range(0..USER_AGENTS.len())]
}
