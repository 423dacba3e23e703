use scraper::{Html, Selector};
use tracing::{debug, warn};

use common::snapshot::Category;

use crate::{rules::FieldRule, utils::absolutize};

const CAROUSEL_SELECTOR: &str = "div.a-carousel-container";

/// Discover categories from the bestsellers landing page: each lazy
/// carousel carries a heading and a "see more" link pointing at the
/// category's own listing page.
pub fn discover_categories(html: &str) -> Vec<Category> {
    let document = Html::parse_document(html);
    let carousel_selector = Selector::parse(CAROUSEL_SELECTOR).unwrap();

    let heading_rule = FieldRule::new(&["div.a-carousel-header-row h2", "h2.a-carousel-heading"]);
    let see_more_rule = FieldRule::new(&[
        "div.a-carousel-header-row a",
        "a[href*=\"/gp/bestsellers\"]",
    ]);

    let mut categories: Vec<Category> = Vec::new();

    for carousel in document.select(&carousel_selector) {
        let Ok(name) = heading_rule.text_of(carousel) else {
            debug!("Carousel without a heading, skipping");
            continue;
        };

        let Ok(href) = see_more_rule.attr_of(carousel, "href") else {
            debug!("Carousel '{}' has no see-more link, skipping", name);
            continue;
        };

        if name.is_empty() || categories.iter().any(|known| known.name == name) {
            continue;
        }

        categories.push(Category::new(name, absolutize(&href)));
    }

    if categories.is_empty() {
        warn!("No carousels found on the bestsellers landing page");
    }

    categories
}
