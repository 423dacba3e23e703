use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Missing element {0} from HTML")]
    HtmlMissingElement(String),
    #[error("Missing attribute {0} from element {1}")]
    HtmlElementMissingAttribute(String, String),
    #[error("No selector in rule matched: {0}")]
    NoRuleMatch(String),
}
