//! # shoprec
//!
//! Content-based product recommendations for storefront catalogs.
//!
//! Given a product, shoprec ranks every other product of a catalog snapshot
//! by textual similarity (TF-IDF over name, description and category, cosine
//! scoring) and returns the top N. Lookups never fail: unknown products,
//! empty catalogs and internal faults all produce an empty list.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! shoprec --catalog products.json --product 42 --top-n 5
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use shoprec::prelude::*;
//!
//! let catalog = InMemoryCatalog::new(vec![
//!     CatalogItem::new(1, "Red Running Shoe").with_description("Lightweight running shoe"),
//!     CatalogItem::new(2, "Blue Running Shoe").with_description("Lightweight running shoe"),
//!     CatalogItem::new(3, "Office Chair").with_description("Ergonomic chair"),
//! ]);
//!
//! let recommender = Recommender::default();
//! let related = recommender.recommend_from(&catalog, 1, 5);
//! assert_eq!(related.len(), 2);
//! assert_eq!(related[0].id, 2);
//! ```
//!
//! ## Crate Structure
//!
//! - `shoprec-core` - Data model, TF-IDF pipeline, ranking, optional cache
//! - `shoprec-storage` - JSON catalog files, NLTK stopword corpora, config files

// Re-export core types
pub use shoprec_core::{
    CatalogItem, CatalogSource, InMemoryCatalog,
    Recommender, RecommenderConfig, Recommendation,
    CachedRecommender, CatalogVersion,
    StopwordSet, StopwordSource, BuiltinStopwords, load_stopwords,
    TfidfVectorizer, TermMatrix, Vector,
    Error, Result,
};

// Re-export storage
pub use shoprec_storage::{JsonCatalogFile, NltkStopwords, load_config};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CatalogItem, CatalogSource, InMemoryCatalog,
        Recommender, RecommenderConfig, Recommendation,
        CachedRecommender,
        StopwordSet, StopwordSource, BuiltinStopwords,
        JsonCatalogFile, NltkStopwords,
        Error, Result,
    };
}

/// Pipeline stages, for callers that want the intermediate results
pub mod pipeline {
    pub use shoprec_core::{build_corpus, rank, similarity_matrix, similarity_row, tokenize};
}
