//! # shoprec Core
//!
//! Core library for shoprec, content-based product recommendations.
//!
//! This crate provides the recommendation pipeline:
//!
//! - [`CatalogItem`] - Read-only product snapshot and the corpus builder
//! - [`TfidfVectorizer`] - Unigram/bigram TF-IDF rows with stopword filtering
//! - [`similarity_row`] - Linear-kernel scores of one product against all
//! - [`rank`] - Stable descending ranking that excludes the query
//! - [`Recommender`] - The never-fail entry point wiring it together
//!
//! ## Example
//!
//! ```rust
//! use shoprec_core::{CatalogItem, Recommender};
//!
//! let catalog = vec![
//!     CatalogItem::new(1, "Red Running Shoe").with_category("Footwear"),
//!     CatalogItem::new(2, "Blue Running Shoe").with_category("Footwear"),
//!     CatalogItem::new(3, "Office Chair").with_category("Furniture"),
//! ];
//!
//! let recommender = Recommender::default();
//! let related = recommender.recommend(&catalog, 1, 5);
//! assert_eq!(related[0].id, 2);
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ranker;
pub mod recommender;
pub mod similarity;
pub mod stopwords;
pub mod vector;
pub mod vectorizer;

pub use cache::{CachedRecommender, CatalogVersion};
pub use catalog::{build_corpus, CatalogIndex, CatalogItem, CatalogSource, InMemoryCatalog};
pub use config::RecommenderConfig;
pub use error::{Error, Result};
pub use ranker::rank;
pub use recommender::{Recommendation, Recommender};
pub use similarity::{similarity_matrix, similarity_row};
pub use stopwords::{load_stopwords, BuiltinStopwords, StopwordSet, StopwordSource, FALLBACK_STOPWORDS};
pub use vector::Vector;
pub use vectorizer::{tokenize, TermMatrix, TfidfVectorizer};
