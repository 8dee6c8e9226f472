pub mod config_file;
pub mod json_catalog;
pub mod nltk;

pub use config_file::load_config;
pub use json_catalog::{parse_catalog, JsonCatalogFile};
pub use nltk::{NltkStopwords, NLTK_DATA_ENV};
