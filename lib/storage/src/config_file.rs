// Recommender configuration stored as JSON
use shoprec_core::{Error, RecommenderConfig, Result};
use std::path::Path;

/// Load and validate a config file; absent keys keep their defaults
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RecommenderConfig> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path).map_err(|e| {
        Error::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
    })?;
    let config: RecommenderConfig = serde_json::from_str(&data)
        .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))?;
    config.validate()?;
    Ok(config)
}
