//! Content-based recommendations
//!
//! The pipeline runs fresh on every call over the snapshot it is given:
//!
//! ```text
//! catalog ──> corpus ──> TF-IDF rows ──> query similarity row ──> ranking
//! ```
//!
//! [`Recommender::try_recommend`] reports every outcome as a typed result.
//! [`Recommender::recommend`] is the never-fail entry point: unknown
//! products and empty catalogs give an empty list, and faults are logged and
//! also give an empty list.

use crate::catalog::{build_corpus, CatalogIndex, CatalogItem, CatalogSource};
use crate::config::RecommenderConfig;
use crate::ranker::rank;
use crate::similarity::similarity_row;
use crate::stopwords::{load_stopwords, StopwordSet, StopwordSource};
use crate::vectorizer::TfidfVectorizer;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A recommended item with its similarity to the query product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item: CatalogItem,
    pub score: f32,
}

/// Stateless recommender; safe to share across threads
#[derive(Debug, Clone)]
pub struct Recommender {
    config: RecommenderConfig,
    stopwords: StopwordSet,
}

impl Recommender {
    /// Recommender using the built-in stopword list
    pub fn new(config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stopwords: StopwordSet::fallback(),
        })
    }

    /// Recommender whose stopwords come from `source`, degrading to the
    /// built-in list if the source is unavailable
    pub fn with_stopword_source(
        config: RecommenderConfig,
        source: &dyn StopwordSource,
    ) -> Result<Self> {
        config.validate()?;
        let stopwords = load_stopwords(source, &config.language);
        Ok(Self { config, stopwords })
    }

    #[must_use]
    pub fn with_stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Rank every other product of `catalog` by similarity to `product_id`
    pub fn try_recommend(
        &self,
        catalog: &[CatalogItem],
        product_id: i64,
        top_n: usize,
    ) -> Result<Vec<Recommendation>> {
        if catalog.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        let index = CatalogIndex::build(catalog)?;
        let query = index
            .position(product_id)
            .ok_or(Error::UnknownProduct(product_id))?;

        if top_n == 0 {
            return Ok(Vec::new());
        }

        let corpus = build_corpus(catalog);
        let vectorizer = TfidfVectorizer::from_config(&self.config, self.stopwords.clone());
        let matrix = vectorizer.fit_transform(&corpus)?;

        let scores = similarity_row(&matrix, query).ok_or_else(|| {
            Error::Vectorization(format!(
                "term matrix has {} rows, query at {}",
                matrix.n_rows(),
                query
            ))
        })?;

        let results = rank(&scores, Some(query), top_n)
            .into_iter()
            .map(|(idx, score)| Recommendation {
                item: catalog[idx].clone(),
                score,
            })
            .collect::<Vec<_>>();

        debug!(
            "Product {}: {} recommendations from {} items",
            product_id,
            results.len(),
            catalog.len()
        );
        Ok(results)
    }

    /// Scored recommendations; never fails
    pub fn recommend_scored(
        &self,
        catalog: &[CatalogItem],
        product_id: i64,
        top_n: usize,
    ) -> Vec<Recommendation> {
        match self.try_recommend(catalog, product_id, top_n) {
            Ok(results) => results,
            Err(e) => absorb(product_id, e),
        }
    }

    /// Recommended products, most similar first; never fails
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

    /// `recommend` with the configured default `top_n`
    pub fn recommend_default(&self, catalog: &[CatalogItem], product_id: i64) -> Vec<CatalogItem> {
        self.recommend(catalog, product_id, self.config.default_top_n)
    }

    /// Fetch the snapshot through `source`, then recommend; never fails
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
}

impl Default for Recommender {
    fn default() -> Self {
        Self {
            config: RecommenderConfig::default(),
            stopwords: StopwordSet::fallback(),
        }
    }
}

/// Log an error at the pipeline boundary and turn it into an empty result
pub(crate) fn absorb<T>(product_id: i64, err: Error) -> Vec<T> {
    if err.is_expected() {
        debug!("No recommendations for product {}: {}", product_id, err);
    } else {
        warn!("Recommendation failed for product {}: {}", product_id, err);
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    fn shoes_catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new(1, "Red Running Shoe")
                .with_description("Lightweight running shoe")
                .with_category("Footwear"),
            CatalogItem::new(2, "Blue Running Shoe")
                .with_description("Lightweight running shoe")
                .with_category("Footwear"),
            CatalogItem::new(3, "Office Chair")
                .with_description("Ergonomic chair")
                .with_category("Furniture"),
        ]
    }

    fn ids(items: &[CatalogItem]) -> Vec<i64> {
        items.iter().map(|i| i.id).collect()
    }

    struct BrokenSource;

    impl CatalogSource for BrokenSource {
        fn fetch_catalog(&self) -> Result<Vec<CatalogItem>> {
            Err(Error::Storage("database unreachable".to_string()))
        }
    }

    #[test]
    fn test_running_shoe_scenario() {
        let recommender = Recommender::default();
        let results = recommender.recommend_scored(&shoes_catalog(), 1, 5);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].item.id, 2);
        assert_eq!(results[1].item.id, 3);
        assert!(results[0].score > results[1].score);
        assert_eq!(results[1].score, 0.0);
    }

    #[test]
    fn test_unknown_product() {
        let recommender = Recommender::default();
        assert!(recommender.recommend(&shoes_catalog(), 99, 5).is_empty());
        assert!(matches!(
            recommender.try_recommend(&shoes_catalog(), 99, 5),
            Err(Error::UnknownProduct(99))
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let recommender = Recommender::default();
        assert!(recommender.recommend(&[], 1, 5).is_empty());
        assert!(matches!(
            recommender.try_recommend(&[], 1, 5),
            Err(Error::EmptyCatalog)
        ));
    }

    #[test]
    fn test_zero_top_n() {
        let recommender = Recommender::default();
        assert!(recommender.recommend(&shoes_catalog(), 1, 0).is_empty());
    }

    #[test]
    fn test_single_item_catalog() {
        let recommender = Recommender::default();
        let catalog = vec![CatalogItem::new(5, "Solo item")];
        assert!(recommender.recommend(&catalog, 5, 5).is_empty());
    }

    #[test]
    fn test_top_n_truncates() {
        let recommender = Recommender::default();
        assert_eq!(ids(&recommender.recommend(&shoes_catalog(), 3, 1)).len(), 1);
    }

    #[test]
    fn test_default_top_n() {
        let recommender = Recommender::default();
        let catalog: Vec<CatalogItem> = (0..10)
            .map(|i| CatalogItem::new(i, format!("Mesa modelo {}", i)))
            .collect();
        assert_eq!(recommender.recommend_default(&catalog, 0).len(), 5);
    }

    #[test]
    fn test_all_empty_except_query_keeps_catalog_order() {
        let recommender = Recommender::default();
        let catalog = vec![
            CatalogItem::new(10, ""),
            CatalogItem::new(20, "Lámpara de escritorio"),
            CatalogItem::new(30, ""),
            CatalogItem::new(40, ""),
        ];
        let results = recommender.recommend_scored(&catalog, 20, 2);
        assert_eq!(
            results.iter().map(|r| r.item.id).collect::<Vec<_>>(),
            vec![10, 30]
        );
        assert!(results.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_duplicate_ids_are_a_fault() {
        let recommender = Recommender::default();
        let catalog = vec![CatalogItem::new(1, "a b"), CatalogItem::new(1, "c d")];
        assert!(recommender.recommend(&catalog, 1, 5).is_empty());
        assert!(matches!(
            recommender.try_recommend(&catalog, 1, 5),
            Err(Error::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_stopwords_do_not_create_similarity() {
        let recommender = Recommender::default();
        let catalog = vec![
            CatalogItem::new(1, "Silla de madera"),
            CatalogItem::new(2, "Taza de cerámica"),
            CatalogItem::new(3, "Mesa de madera"),
        ];
        let results = recommender.recommend_scored(&catalog, 1, 5);
        assert_eq!(results[0].item.id, 3);
        assert_eq!(results[1].score, 0.0);
    }

    #[test]
    fn test_common_adjectives_are_filtered() {
        let recommender = Recommender::default();
        let catalog = vec![
            CatalogItem::new(1, "Mesa grande"),
            CatalogItem::new(2, "Lampara"),
            CatalogItem::new(3, "Silla grande"),
        ];
        let results = recommender.recommend_scored(&catalog, 1, 5);
        assert_eq!(results.iter().map(|r| r.item.id).collect::<Vec<_>>(), vec![2, 3]);
        assert!(results.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_recommend_from_source() {
        let recommender = Recommender::default();
        let source = InMemoryCatalog::new(shoes_catalog());
        assert_eq!(ids(&recommender.recommend_from(&source, 2, 5)), vec![1, 3]);
        assert!(recommender.recommend_from(&BrokenSource, 2, 5).is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RecommenderConfig {
            min_df: 0,
            ..Default::default()
        };
        assert!(Recommender::new(config).is_err());
    }
}
