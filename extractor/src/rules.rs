use scraper::ElementRef;

use crate::{
    errors::ExtractorError,
    utils::html::{attr_of, select_first, text_of},
};

/// An ordered list of CSS selectors for one field. Selectors are tried
/// in order against a scope element and the first match wins, so a
/// markup change on the site usually means editing a rule, not logic.
#[derive(Debug, Clone)]
pub struct FieldRule {
    selectors: Vec<String>,
}

impl FieldRule {
    pub fn new(selectors: &[&str]) -> Self {
        Self {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn single(selector: &str) -> Self {
        Self::new(&[selector])
    }

    pub fn resolve<'a>(&self, scope: ElementRef<'a>) -> Result<ElementRef<'a>, ExtractorError> {
        for selector in &self.selectors {
            if let Ok(element) = select_first(scope, selector) {
                return Ok(element);
            }
        }

        Err(ExtractorError::NoRuleMatch(self.selectors.join(", ")))
    }

    pub fn text_of(&self, scope: ElementRef) -> Result<String, ExtractorError> {
        Ok(text_of(self.resolve(scope)?))
    }

    pub fn attr_of(&self, scope: ElementRef, attr_name: &str) -> Result<String, ExtractorError> {
        attr_of(self.resolve(scope)?, attr_name)
    }
}

/// Field rule set for a bestseller category listing page.
///
/// The title selector matches on a class-name prefix because the
/// storefront generates the suffix and rotates it between deploys.
#[derive(Debug, Clone)]
pub struct ListingRules {
    pub(crate) container: FieldRule,
    pub(crate) card: String,
    pub(crate) rank: FieldRule,
    pub(crate) title: FieldRule,
    pub(crate) image: FieldRule,
    pub(crate) rating: FieldRule,
    pub(crate) reviews: FieldRule,
    pub(crate) link: FieldRule,
    pub(crate) price: FieldRule,
}

impl Default for ListingRules {
    fn default() -> Self {
        ListingRulesBuilder::default().build()
    }
}

pub struct ListingRulesBuilder {
    rules: ListingRules,
}

impl Default for ListingRulesBuilder {
    fn default() -> Self {
        Self {
            rules: ListingRules {
                container: FieldRule::single("ol.a-ordered-list"),
                card: "li.zg-no-numbers".into(),
                rank: FieldRule::single("span.zg-bdg-text"),
                title: FieldRule::single("div[class*=\"_cDEzb_p13n-sc-css-line-clamp-\"]"),
                image: FieldRule::single("img"),
                rating: FieldRule::single("span.a-icon-alt"),
                reviews: FieldRule::single("span.a-size-small"),
                link: FieldRule::single("a.a-link-normal"),
                price: FieldRule::new(&["span._cDEzb_p13n-sc-price_3mJ9Z", "span.p13n-sc-price"]),
            },
        }
    }
}

impl ListingRulesBuilder {
    pub fn with_container(mut self, rule: FieldRule) -> Self {
        self.rules.container = rule;

        self
    }

    pub fn with_card_selector(mut self, selector: impl Into<String>) -> Self {
        self.rules.card = selector.into();

        self
    }

    pub fn with_title(mut self, rule: FieldRule) -> Self {
        self.rules.title = rule;

        self
    }

    pub fn with_price(mut self, rule: FieldRule) -> Self {
        self.rules.price = rule;

        self
    }

    pub fn build(self) -> ListingRules {
        self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn invalid_selector_in_rule_falls_through_to_next() {
        let document = Html::parse_document(
            r#"<html><body><span class="ok">found</span></body></html>"#,
        );
        let rule = FieldRule::new(&["span..broken[", "span.ok"]);

        assert_eq!(rule.text_of(document.root_element()).unwrap(), "found");
    }

    #[test]
    fn rule_with_only_invalid_selectors_reports_no_match() {
        let document = Html::parse_document("<html><body></body></html>");
        let rule = FieldRule::single("span..broken[");

        assert!(rule.resolve(document.root_element()).is_err());
    }
}
