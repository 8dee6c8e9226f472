// Catalog snapshots exported as JSON by the storefront API
use serde::Deserialize;
use shoprec_core::{CatalogItem, CatalogSource, Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Product record as serialized by the storefront.
/// Fields the recommender does not read (price, stock, images...) are ignored.
#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: i64,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<CategoryField>,
}

/// Category either inlined as its name or nested as an object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryField {
    Name(String),
    Nested { name: String },
}

/// Either a bare array or a paginated page with `results`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<ProductRecord>),
    Page { results: Vec<ProductRecord> },
}

impl From<ProductRecord> for CatalogItem {
    fn from(record: ProductRecord) -> Self {
        CatalogItem {
            id: record.id,
            name: record.name,
            description: record.description,
            category: record.category.map(|c| match c {
                CategoryField::Name(name) => name,
                CategoryField::Nested { name } => name,
            }),
        }
    }
}

/// Parse a catalog snapshot from JSON text, keeping record order
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogItem>> {
    let document: CatalogDocument = serde_json::from_str(json)?;
    let records = match document {
        CatalogDocument::List(records) => records,
        CatalogDocument::Page { results } => results,
    };
    Ok(records.into_iter().map(CatalogItem::from).collect())
}

/// Catalog source backed by a JSON export on disk.
/// The file is re-read on every fetch so each request sees the current snapshot.
#[derive(Debug, Clone)]
pub struct JsonCatalogFile {
    path: PathBuf,
}

impl JsonCatalogFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonCatalogFile {
    fn fetch_catalog(&self) -> Result<Vec<CatalogItem>> {
        let data = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::Storage(format!("cannot read catalog {}: {}", self.path.display(), e))
        })?;
        let items = parse_catalog(&data)?;
        debug!("Loaded {} products from {}", items.len(), self.path.display());
        Ok(items)
    }
}
