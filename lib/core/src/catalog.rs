use crate::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A product as seen at the moment a recommendation request is served
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Category name, not the category id
    #[serde(default)]
    pub category: Option<String>,
}

impl CatalogItem {
    #[inline]
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            category: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Text the vectorizer sees for this item.
    /// Missing description or category contribute an empty string.
    #[must_use]
    pub fn document(&self) -> String {
        format!(
            "{} {} {}",
            self.name,
            self.description.as_deref().unwrap_or(""),
            self.category.as_deref().unwrap_or("")
        )
    }
}

/// Read interface to the persistence layer.
/// The recommender never queries storage on its own.
pub trait CatalogSource: Send + Sync {
    fn fetch_catalog(&self) -> Result<Vec<CatalogItem>>;
}

/// Catalog held in memory, in retrieval order
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: Vec<CatalogItem>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogSource for InMemoryCatalog {
    fn fetch_catalog(&self) -> Result<Vec<CatalogItem>> {
        Ok(self.items.clone())
    }
}

impl From<Vec<CatalogItem>> for InMemoryCatalog {
    fn from(items: Vec<CatalogItem>) -> Self {
        Self::new(items)
    }
}

/// One document per item, index-aligned with the input
pub fn build_corpus(items: &[CatalogItem]) -> Vec<String> {
    items.iter().map(CatalogItem::document).collect()
}

/// Maps product ids to their position in the aligned corpus arrays
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    positions: AHashMap<i64, usize>,
}

impl CatalogIndex {
    /// Fails on duplicate ids, which would make the mapping ambiguous
    pub fn build(items: &[CatalogItem]) -> Result<Self> {
        let mut positions = AHashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if positions.insert(item.id, idx).is_some() {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate product id {}",
                    item.id
                )));
            }
        }
        Ok(Self { positions })
    }

    #[inline]
    pub fn position(&self, id: i64) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
