use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::record::ProductRecord;

/// A named product grouping with its listing page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub url: String,
}

impl Category {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The full result of one scrape run: category display name mapped to
/// its top products, in scrape order. This is the only persisted
/// artifact and is replaced wholesale on every successful run.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(transparent)]
pub struct Snapshot {
    categories: IndexMap<String, Vec<ProductRecord>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, records: Vec<ProductRecord>) {
        self.categories.insert(category.into(), records);
    }

    pub fn get(&self, category: &str) -> Option<&Vec<ProductRecord>> {
        self.categories.get(category)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn product_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<ProductRecord>)> {
        self.categories.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_preserves_category_insertion_order() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("Electronics", vec![ProductRecord::new("#1", "Cable")]);
        snapshot.insert("Automotive", vec![ProductRecord::new("#1", "Wax")]);
        snapshot.insert("Beauty", vec![ProductRecord::new("#1", "Soap")]);

        let names: Vec<&String> = snapshot.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Electronics", "Automotive", "Beauty"]);
    }

    #[test]
    fn snapshot_serializes_as_plain_object() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("Electronics", vec![ProductRecord::new("#1", "Cable")]);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.is_object());
        assert_eq!(json["Electronics"][0]["title"], "Cable");
    }

    #[test]
    fn optional_detail_fields_are_omitted_from_json() {
        let record = ProductRecord::new("#1", "Cable");
        let json = serde_json::to_value(&record).unwrap();

        assert!(json.get("asin").is_none());
        assert!(json.get("discount_percent").is_none());
        assert!(json.get("bullet_points").is_none());
        assert_eq!(json["price"], "N/A");
    }

    #[test]
    fn is_prime_is_always_emitted() {
        // downstream readers of the flat list expect the key on every
        // record, false included
        let json = serde_json::to_value(ProductRecord::new("#1", "Cable")).unwrap();
        assert_eq!(json["is_prime"], false);
    }
}
