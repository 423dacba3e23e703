use serde::{Deserialize, Serialize};

use crate::constants::FIELD_UNAVAILABLE;

/// One product entry, either from a category listing card or from a
/// product detail page. Listing cards only fill the base fields; the
/// detail crawl adds the optional ones.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub rank: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub rating: String,
    pub reviews_count: String,
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<String>,
    #[serde(default)]
    pub is_prime: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_sellers_rank: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullet_points: Vec<String>,
}

impl ProductRecord {
    pub fn new(rank: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            rank: rank.into(),
            title: title.into(),
            url: None,
            image_url: None,
            rating: FIELD_UNAVAILABLE.into(),
            reviews_count: FIELD_UNAVAILABLE.into(),
            price: FIELD_UNAVAILABLE.into(),
            asin: None,
            list_price: None,
            discount_percent: None,
            is_prime: false,
            best_sellers_rank: None,
            bullet_points: Vec::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = rating.into();
        self
    }

    pub fn with_reviews_count(mut self, reviews_count: impl Into<String>) -> Self {
        self.reviews_count = reviews_count.into();
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }
}
