//! Optional memoization of recommendation results.
//!
//! Entries are keyed by a fingerprint of the whole catalog snapshot, so any
//! edit to any product produces new keys and stale results are never served.

use crate::catalog::{CatalogItem, CatalogSource};
use crate::recommender::{absorb, Recommendation, Recommender};
use ahash::{AHashMap, RandomState};
use parking_lot::RwLock;
use std::hash::{BuildHasher, Hash, Hasher};
use tracing::debug;

pub const DEFAULT_MAX_ENTRIES: usize = 1024;

/// Content fingerprint of a catalog snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogVersion(u64);

impl CatalogVersion {
    pub fn of(catalog: &[CatalogItem]) -> Self {
        // fixed seeds: equal snapshots must map to equal versions
        let state = RandomState::with_seeds(
            0x5bd1_e995,
            0x27d4_eb2f,
            0x1656_67b1,
            0x9e37_79b9,
        );
        let mut hasher = state.build_hasher();
        catalog.len().hash(&mut hasher);
        for item in catalog {
            item.hash(&mut hasher);
        }
        Self(hasher.finish())
    }

    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

type CacheKey = (CatalogVersion, i64, usize);

/// A [`Recommender`] that remembers results per snapshot, product and `top_n`
pub struct CachedRecommender {
    inner: Recommender,
    entries: RwLock<AHashMap<CacheKey, Vec<Recommendation>>>,
    max_entries: usize,
}

impl CachedRecommender {
    pub fn new(inner: Recommender) -> Self {
        Self::with_capacity(inner, DEFAULT_MAX_ENTRIES)
    }

    /// The cache is cleared whenever it would grow past `max_entries`
    pub fn with_capacity(inner: Recommender, max_entries: usize) -> Self {
        Self {
            inner,
            entries: RwLock::new(AHashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    pub fn inner(&self) -> &Recommender {
        &self.inner
    }

    pub fn recommend_scored(
        &self,
        catalog: &[CatalogItem],
        product_id: i64,
        top_n: usize,
    ) -> Vec<Recommendation> {
        let key = (CatalogVersion::of(catalog), product_id, top_n);
        if let Some(hit) = self.entries.read().get(&key) {
            return hit.clone();
        }

        match self.inner.try_recommend(catalog, product_id, top_n) {
            Ok(results) => {
                let mut entries = self.entries.write();
                if entries.len() >= self.max_entries {
                    debug!("Recommendation cache full ({} entries), clearing", entries.len());
                    entries.clear();
                }
                entries.insert(key, results.clone());
                results
            }
            Err(e) => absorb(product_id, e),
        }
    }

    pub fn recommend(
        &self,
        catalog: &[CatalogItem],
        product_id: i64,
        top_n: usize,
    ) -> Vec<CatalogItem> {
        self.recommend_scored(catalog, product_id, top_n)
            .into_iter()
            .map(|r| r.item)
            .collect()
    }

    pub fn recommend_from(
        &self,
        source: &dyn CatalogSource,
        product_id: i64,
        top_n: usize,
    ) -> Vec<CatalogItem> {
        match source.fetch_catalog() {
            Ok(catalog) => self.recommend(&catalog, product_id, top_n),
            Err(e) => absorb(product_id, e),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new(1, "Red Running Shoe").with_category("Footwear"),
            CatalogItem::new(2, "Blue Running Shoe").with_category("Footwear"),
            CatalogItem::new(3, "Office Chair").with_category("Furniture"),
        ]
    }

    #[test]
    fn test_version_tracks_content() {
        let a = catalog();
        let mut b = catalog();
        assert_eq!(CatalogVersion::of(&a), CatalogVersion::of(&b));

        b[2].description = Some("Ergonomic".to_string());
        assert_ne!(CatalogVersion::of(&a), CatalogVersion::of(&b));
        assert_ne!(CatalogVersion::of(&a), CatalogVersion::of(&a[..2]));
    }

    #[test]
    fn test_cached_matches_uncached() {
        let cached = CachedRecommender::new(Recommender::default());
        let first = cached.recommend_scored(&catalog(), 1, 5);
        assert_eq!(cached.len(), 1);
        let second = cached.recommend_scored(&catalog(), 1, 5);
        assert_eq!(first, second);
        assert_eq!(first, Recommender::default().recommend_scored(&catalog(), 1, 5));
        assert_eq!(cached.len(), 1);
    }

    #[test]
    fn test_failures_not_cached() {
        let cached = CachedRecommender::new(Recommender::default());
        assert!(cached.recommend(&catalog(), 42, 5).is_empty());
        assert!(cached.recommend(&[], 1, 5).is_empty());
        assert!(cached.is_empty());
    }

    #[test]
    fn test_capacity_bound() {
        let cached = CachedRecommender::with_capacity(Recommender::default(), 2);
        cached.recommend(&catalog(), 1, 5);
        cached.recommend(&catalog(), 2, 5);
        assert_eq!(cached.len(), 2);
        cached.recommend(&catalog(), 3, 5);
        assert_eq!(cached.len(), 1);
        cached.clear();
        assert!(cached.is_empty());
    }
}
