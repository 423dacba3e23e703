use std::{env, sync::OnceLock, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, info};

use crate::{
    errors::CrawlerError,
    request::Request,
    traits::{FetchOptions, PageFetcher},
};

const PROXY_ENDPOINT: &str = "https://app.scrapingbee.com/api/v1/";
const API_KEY_ENV: &str = "SCRAPER_API_KEY";

// the proxy executes javascript on our behalf, renders can take a while
const RENDER_TIMEOUT_SECONDS: u64 = 120;

/// Selectors the proxy waits for before handing the page back. Either
/// a grid item or the ordered bestseller list means the page rendered.
const RENDER_WAIT_FOR: &str = "#gridItemRoot, ol.a-ordered-list";

const USER_AGENT: &str = "bestsellers-backend/1.0";

static REQWEST_CLIENT: OnceLock<Client> = OnceLock::new();

/// Client for a third-party rendering proxy: the proxy fetches the
/// target URL, executes its javascript, and returns the resulting HTML.
#[derive(Copy, Clone)]
pub struct RenderingProxy {}

impl Default for RenderingProxy {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderingProxy {
    pub fn new() -> Self {
        Self {}
    }

    fn create_client() -> &'static Client {
        REQWEST_CLIENT.get_or_init(|| {
            ClientBuilder::new()
                .gzip(true)
                .timeout(Duration::from_secs(RENDER_TIMEOUT_SECONDS))
                .user_agent(USER_AGENT)
                .https_only(true)
                .build()
                .expect("Valid base reqwest to be built")
        })
    }

    /// Fetch the fully rendered HTML for `target_url`. Non-200 proxy
    /// responses are errors carrying the remote status and body; there
    /// are no retries at this layer.
    pub async fn fetch_rendered(
        &self,
        target_url: &str,
        wait_for: Option<&str>,
    ) -> Result<String, CrawlerError> {
        let api_key = env::var(API_KEY_ENV)
            .map_err(|_| CrawlerError::MissingApiKey(API_KEY_ENV.into()))?;

        info!("Requesting render of {}", target_url);

        let request = Request::builder()
            .set_url(PROXY_ENDPOINT)
            .set_param("api_key", api_key)
            .set_param("url", target_url)
            .set_param("render_js", "true")
            .set_param("wait_for", wait_for.unwrap_or(RENDER_WAIT_FOR))
            .build();

        self.make_web_request(request).await
    }

    async fn make_web_request(&self, request: Request) -> Result<String, CrawlerError> {
        let client = Self::create_client();

        let response = client
            .get(&request.url)
            .query(&request.params)
            .send()
            .await?;

        debug!("{response:?}");

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CrawlerError::RemoteRenderFailed {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl PageFetcher for RenderingProxy {
    async fn fetch_page(
        &self,
        url: &str,
        options: FetchOptions<'_>,
    ) -> Result<String, CrawlerError> {
        // the proxy renders the whole page server-side, so deep_scroll
        // has nothing left to do here
        self.fetch_rendered(url, options.wait_marker).await
    }
}
