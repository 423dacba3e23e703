use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::errors::ExtractorError;

pub(crate) fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub(crate) fn attr_of(element: ElementRef, attr_name: &str) -> Result<String, ExtractorError> {
    let Some(attr_value) = element.attr(attr_name) else {
        debug!(
            "Failed to find attribute {} in element {:?}",
            attr_name, element
        );
        return Err(ExtractorError::HtmlElementMissingAttribute(
            attr_name.into(),
            element.html(),
        ));
    };

    Ok(attr_value.trim().to_string())
}

pub(crate) fn select_first<'a>(
    scope: ElementRef<'a>,
    query_string: &str,
) -> Result<ElementRef<'a>, ExtractorError> {
    // rule selectors are caller-supplied, so an unparsable one counts
    // as a non-match rather than panicking
    let Ok(selector) = Selector::parse(query_string) else {
        debug!("Selector '{}' is not valid CSS", query_string);
        return Err(ExtractorError::HtmlMissingElement(query_string.into()));
    };

    let Some(query_element) = scope.select(&selector).next() else {
        return Err(ExtractorError::HtmlMissingElement(query_string.into()));
    };

    Ok(query_element)
}
