use common::snapshot::Category;

/// Landing page rendered for the dynamic discovery variant.
pub const BESTSELLERS_LANDING_URL: &str = "https://www.amazon.com/gp/bestsellers/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// The hardcoded category table below.
    Fixed,
    /// Carousel headings scraped off the bestsellers landing page.
    Discovered,
}

pub fn fixed_categories() -> Vec<Category> {
    Vec::from_iter([
        Category::new(
            "Best Sellers in Automotive",
            "https://www.amazon.com/gp/bestsellers/automotive/",
        ),
        Category::new(
            "Best Sellers in Electronics",
            "https://www.amazon.com/gp/bestsellers/electronics/",
        ),
        Category::new(
            "Best Sellers in Clothing, Shoes & Jewelry",
            "https://www.amazon.com/gp/bestsellers/fashion/",
        ),
        Category::new(
            "Best Sellers in Kitchen & Dining",
            "https://www.amazon.com/gp/bestsellers/kitchen/",
        ),
        Category::new(
            "Best Sellers in Beauty & Personal Care",
            "https://www.amazon.com/gp/bestsellers/beauty/",
        ),
        Category::new(
            "Best Sellers in Tools & Home Improvement",
            "https://www.amazon.com/gp/bestsellers/hi/",
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_table_has_six_unique_categories() {
        let categories = fixed_categories();

        assert_eq!(categories.len(), 6);

        for category in &categories {
            assert!(category.url.starts_with("https://www.amazon.com/gp/bestsellers/"));
            assert_eq!(
                categories.iter().filter(|c| c.name == category.name).count(),
                1
            );
        }
    }
}
