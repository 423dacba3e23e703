use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use common::{
    constants::{FIELD_UNAVAILABLE, MAX_ITEMS_PER_CATEGORY},
    record::ProductRecord,
};

use crate::{
    errors::ExtractorError,
    rules::ListingRules,
    utils::absolutize,
};

/// Pull up to the per-category cap of product records out of a rendered
/// listing page. Never fails: a missing container or an unreadable card
/// narrows the result instead of erroring.
pub fn extract_listing(html: &str, rules: &ListingRules) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);

    let Ok(list) = rules.container.resolve(document.root_element()) else {
        warn!("Product list container not found on page");
        return Vec::new();
    };

    // the card selector is caller-supplied, so a bad string degrades
    // instead of panicking
    let Ok(card_selector) = Selector::parse(&rules.card) else {
        warn!("Card selector '{}' is not valid CSS", rules.card);
        return Vec::new();
    };
    let cards: Vec<ElementRef> = list.select(&card_selector).collect();

    if cards.is_empty() {
        warn!("No product cards found inside the listing container");
        return Vec::new();
    }

    debug!(
        "Found {} cards, keeping the first {}",
        cards.len(),
        MAX_ITEMS_PER_CATEGORY
    );

    let mut records: Vec<ProductRecord> = Vec::new();

    for card in cards.into_iter().take(MAX_ITEMS_PER_CATEGORY) {
        match extract_card(card, rules) {
            Ok(record) => records.push(record),
            // partial cards are dropped whole, not half-filled
            Err(err) => debug!("Skipping card: {err}"),
        }
    }

    records
}

fn extract_card(card: ElementRef, rules: &ListingRules) -> Result<ProductRecord, ExtractorError> {
    let rank = rules.rank.text_of(card)?;
    let title = rules.title.text_of(card)?;
    let image_url = rules.image.attr_of(card, "src")?;
    let rating = rules.rating.text_of(card)?;
    let reviews_count = rules.reviews.text_of(card)?;

    let mut record = ProductRecord::new(rank, title)
        .with_image_url(image_url)
        .with_rating(rating)
        .with_reviews_count(reviews_count);

    if let Ok(href) = rules.link.attr_of(card, "href") {
        record = record.with_url(absolutize(&href));
    }

    record.price = rules
        .price
        .text_of(card)
        .unwrap_or_else(|_| FIELD_UNAVAILABLE.into());

    Ok(record)
}
