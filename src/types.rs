//! Catalog data model: wine rows, categories, and grouping

/// One catalog entry. Field names mirror the page contract keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Wine {
    pub wine_name: String,
    pub grape: String,
    pub price: String,
    pub img_url: String,
    pub category: String,
    pub special_offer: bool,
}

/// A loaded catalog: rows in source order plus the distinct categories
/// in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub categories: Vec<String>,
    pub wines: Vec<Wine>,
}

/// One bucket of the grouped catalog.
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub category: String,
    pub wines: Vec<Wine>,
}

impl Catalog {
    /// Partition the wines into per-category buckets, preserving source
    /// order within each bucket. Exact string equality on the category
    /// field; nested scan over categories x rows, catalogs are small.
    pub fn by_category(&self) -> Vec<CategoryGroup> {
        self.categories
            .iter()
            .map(|category| CategoryGroup {
                category: category.clone(),
                wines: self
                    .wines
                    .iter()
                    .filter(|wine| wine.category == *category)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.wines.is_empty()
    }
}
