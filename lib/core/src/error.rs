use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog is empty")]
    EmptyCatalog,

    #[error("Product not found in catalog: {0}")]
    UnknownProduct(i64),

    #[error("Invalid catalog snapshot: {0}")]
    InvalidCatalog(String),

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Vectorization failed: {0}")]
    Vectorization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Outcomes that legitimately produce an empty recommendation list,
    /// as opposed to faults inside the pipeline.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Error::EmptyCatalog | Error::UnknownProduct(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
