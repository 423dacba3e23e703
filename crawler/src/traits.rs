use async_trait::async_trait;

use crate::errors::CrawlerError;

/// Per-fetch tuning: an optional DOM marker to wait for and whether to
/// scroll the whole page so lazy carousels load.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions<'a> {
    pub wait_marker: Option<&'a str>,
    pub deep_scroll: bool,
}

impl<'a> FetchOptions<'a> {
    pub fn wait_for(marker: &'a str) -> Self {
        Self {
            wait_marker: Some(marker),
            deep_scroll: false,
        }
    }

    pub fn with_deep_scroll(mut self) -> Self {
        self.deep_scroll = true;

        self
    }
}

/// Anything that can turn a URL into rendered HTML: the remote
/// rendering proxy or a locally driven browser.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(
        &self,
        url: &str,
        options: FetchOptions<'_>,
    ) -> Result<String, CrawlerError>;
}
