use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use common::{
    constants::{FIELD_UNAVAILABLE, MAX_BULLET_POINTS},
    record::ProductRecord,
};

use crate::{
    price::discount_percent,
    rules::FieldRule,
    utils::{
        absolutize,
        html::{attr_of, select_first, text_of},
    },
};

// fallback when the hidden ASIN input isn't in the page
static ASIN_FROM_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/dp/([A-Z0-9]{10})").unwrap());

/// Build a full record from a rendered product detail page. Infallible
/// by design: every field that fails to extract keeps its documented
/// default instead of sinking the whole product.
pub fn extract_product(html: &str, url: &str, rank: u32) -> ProductRecord {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let title = select_first(root, "#productTitle")
        .map(text_of)
        .unwrap_or_else(|_| FIELD_UNAVAILABLE.into());

    let mut record = ProductRecord::new(rank.to_string(), title).with_url(url);
    record.reviews_count = "0".into();

    record.asin = extract_asin(root, url);

    if let Ok(rating) = select_first(root, "#acrPopover").and_then(|el| attr_of(el, "title")) {
        record.rating = rating;
    }

    if let Ok(reviews) = select_first(root, "#acrCustomerReviewText").map(text_of) {
        record.reviews_count = reviews;
    }

    if let Ok(image) = select_first(root, "#landingImage").and_then(|el| attr_of(el, "src")) {
        record.image_url = Some(image);
    }

    record.bullet_points = extract_bullets(root);

    extract_prices(root, &mut record);

    record.is_prime = select_first(root, "i.a-icon-prime").is_ok();
    record.best_sellers_rank = extract_best_sellers_rank(root);

    record
}

/// Collect up to `cap` distinct product links from a category grid
/// page, in page order.
pub fn extract_product_links(html: &str, cap: usize) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(grid) = select_first(document.root_element(), "div.p13n-desktop-grid") else {
        warn!("Product grid not found on category page");
        return Vec::new();
    };

    let link_selector = Selector::parse("a.a-link-normal").unwrap();
    let mut links: Vec<String> = Vec::new();

    for anchor in grid.select(&link_selector) {
        let Some(href) = anchor.attr("href") else {
            continue;
        };

        if !href.starts_with('/') {
            continue;
        }

        let full_url = absolutize(href);

        if links.contains(&full_url) {
            continue;
        }

        links.push(full_url);

        if links.len() >= cap {
            break;
        }
    }

    links
}

fn extract_asin(root: ElementRef, url: &str) -> Option<String> {
    if let Ok(value) = select_first(root, "input#ASIN").and_then(|el| attr_of(el, "value"))
        && !value.is_empty()
    {
        return Some(value);
    }

    ASIN_FROM_URL
        .captures(url)
        .map(|captures| captures[1].to_string())
}

fn extract_bullets(root: ElementRef) -> Vec<String> {
    let bullet_selector = Selector::parse("#feature-bullets ul li").unwrap();

    root.select(&bullet_selector)
        .take(MAX_BULLET_POINTS)
        .map(text_of)
        .filter(|bullet| !bullet.is_empty())
        .collect()
}

fn extract_prices(root: ElementRef, record: &mut ProductRecord) {
    let block_rule = FieldRule::new(&["#corePrice_feature_div", "#tmmSwatches"]);

    let Ok(block) = block_rule.resolve(root) else {
        return;
    };

    if let Ok(price) = select_first(block, "span.a-offscreen").map(text_of) {
        record.price = price;
    }

    if let Ok(list_price) =
        select_first(block, "span[data-a-strike='true'] span.a-offscreen").map(text_of)
    {
        record.list_price = Some(list_price);
    }

    if let Some(list_price) = &record.list_price {
        record.discount_percent = discount_percent(&record.price, list_price);
    }
}

fn extract_best_sellers_rank(root: ElementRef) -> Option<String> {
    let detail_rule = FieldRule::new(&[
        "#detailBullets_feature_div",
        "#productDetails_detailBullets_sections1",
    ]);

    let detail = detail_rule.resolve(root).ok()?;
    let item_selector = Selector::parse("li").unwrap();

    for item in detail.select(&item_selector) {
        let text = text_of(item);

        if !text.contains("Best Sellers Rank") {
            continue;
        }

        // the raw node text is littered with layout whitespace
        let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let stripped = flattened.replace("Best Sellers Rank: ", "");

        let rank_text = match stripped.split_once(" (") {
            Some((head, _)) => head.to_string(),
            None => stripped,
        };

        return Some(rank_text);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_URL: &str = "https://www.amazon.com/dp/B0ABCD1234/ref=zg_bs";

    fn detail_page(price_block: &str, detail_section: &str) -> String {
        format!(
            r#"<html><body>
              <span id="productTitle"> Cordless Drill Kit </span>
              <input id="ASIN" type="hidden" value="B0ABCD1234" />
              <span id="acrPopover" title="4.7 out of 5 stars"></span>
              <span id="acrCustomerReviewText">8,912 ratings</span>
              <img id="landingImage" src="https://img.example.com/drill.jpg" />
              <div id="feature-bullets"><ul>
                <li>Brushless motor</li>
                <li>Two batteries included</li>
                <li>Charger included</li>
                <li>Carry case</li>
                <li>Belt clip</li>
                <li>Extra bit set</li>
              </ul></div>
              {price_block}
              <i class="a-icon-prime"></i>
              {detail_section}
            </body></html>"#
        )
    }

    fn discounted_price_block() -> &'static str {
        r#"<div id="corePrice_feature_div">
             <span class="a-offscreen">$99.00</span>
             <span data-a-strike="true"><span class="a-offscreen">$198.00</span></span>
           </div>"#
    }

    #[test]
    fn reads_all_detail_fields() {
        let html = detail_page(
            discounted_price_block(),
            r#"<div id="detailBullets_feature_div"><ul>
                 <li>Package Dimensions: 10 x 8 x 4 inches</li>
                 <li>Best Sellers Rank: #3 in Power Tools (See Top 100)</li>
               </ul></div>"#,
        );

        let record = extract_product(&html, PRODUCT_URL, 1);

        assert_eq!(record.rank, "1");
        assert_eq!(record.title, "Cordless Drill Kit");
        assert_eq!(record.asin.as_deref(), Some("B0ABCD1234"));
        assert_eq!(record.rating, "4.7 out of 5 stars");
        assert_eq!(record.reviews_count, "8,912 ratings");
        assert_eq!(record.price, "$99.00");
        assert_eq!(record.list_price.as_deref(), Some("$198.00"));
        assert_eq!(record.discount_percent.as_deref(), Some("50%"));
        assert!(record.is_prime);
        assert_eq!(
            record.best_sellers_rank.as_deref(),
            Some("#3 in Power Tools")
        );
    }

    #[test]
    fn bullets_are_capped_at_five() {
        let html = detail_page(discounted_price_block(), "");
        let record = extract_product(&html, PRODUCT_URL, 2);

        assert_eq!(record.bullet_points.len(), 5);
        assert_eq!(record.bullet_points[0], "Brushless motor");
    }

    #[test]
    fn asin_falls_back_to_url() {
        let html = r#"<html><body><span id="productTitle">Thing</span></body></html>"#;
        let record = extract_product(html, PRODUCT_URL, 1);

        assert_eq!(record.asin.as_deref(), Some("B0ABCD1234"));
    }

    #[test]
    fn missing_everything_keeps_defaults() {
        let record = extract_product("<html><body></body></html>", "https://example.com/x", 4);

        assert_eq!(record.title, "N/A");
        assert_eq!(record.price, "N/A");
        assert_eq!(record.rating, "N/A");
        assert_eq!(record.reviews_count, "0");
        assert_eq!(record.asin, None);
        assert_eq!(record.discount_percent, None);
        assert!(!record.is_prime);
        assert_eq!(record.best_sellers_rank, None);
    }

    #[test]
    fn no_discount_without_struck_list_price() {
        let block = r#"<div id="corePrice_feature_div">
             <span class="a-offscreen">$99.00</span>
           </div>"#;
        let html = detail_page(block, "");
        let record = extract_product(&html, PRODUCT_URL, 1);

        assert_eq!(record.price, "$99.00");
        assert_eq!(record.list_price, None);
        assert_eq!(record.discount_percent, None);
    }

    #[test]
    fn best_sellers_rank_found_in_alternate_container() {
        let html = detail_page(
            discounted_price_block(),
            r#"<div id="productDetails_detailBullets_sections1"><ul>
                 <li>Best Sellers Rank: #17 in Tools</li>
               </ul></div>"#,
        );
        let record = extract_product(&html, PRODUCT_URL, 1);

        assert_eq!(record.best_sellers_rank.as_deref(), Some("#17 in Tools"));
    }

    #[test]
    fn product_links_are_deduped_and_capped() {
        let html = r#"<html><body><div class="p13n-desktop-grid">
            <a class="a-link-normal" href="/dp/B000000001"></a>
            <a class="a-link-normal" href="/dp/B000000001"></a>
            <a class="a-link-normal" href="/dp/B000000002"></a>
            <a class="a-link-normal" href="https://elsewhere.example.com/dp/B000000009"></a>
            <a class="a-link-normal" href="/dp/B000000003"></a>
            <a class="a-link-normal" href="/dp/B000000004"></a>
          </div></body></html>"#;

        let links = extract_product_links(html, 3);

        assert_eq!(
            links,
            [
                "https://www.amazon.com/dp/B000000001",
                "https://www.amazon.com/dp/B000000002",
                "https://www.amazon.com/dp/B000000003",
            ]
        );
    }

    #[test]
    fn missing_grid_yields_no_links() {
        assert!(extract_product_links("<html><body></body></html>", 5).is_empty());
    }
}
