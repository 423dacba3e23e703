use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlerError {
    #[error("Rendering proxy refused the request ({status}): {body}")]
    RemoteRenderFailed { status: u16, body: String },
    #[error("Rendering proxy transport error")]
    TransportError(#[from] reqwest::Error),
    #[error("Rendering proxy API key is not set ({0})")]
    MissingApiKey(String),
    #[error("Browser session error")]
    BrowserError(#[from] thirtyfour::error::WebDriverError),
    #[error("Timed out waiting for page marker '{0}'")]
    PageMarkerTimeout(String),
}
