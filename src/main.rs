use clap::Parser;
use shoprec_core::{CatalogItem, CatalogSource, Recommender, RecommenderConfig};
use shoprec_storage::{load_config, JsonCatalogFile, NltkStopwords};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Related-product recommendations for a catalog snapshot
#[derive(Parser, Debug)]
#[command(name = "shoprec")]
#[command(about = "Content-based product recommendations", long_about = None)]
struct Args {
    /// Catalog snapshot (JSON array of products, or a page with `results`)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Product to find related items for
    #[arg(short, long)]
    product: i64,

    /// Number of recommendations (defaults to the configured value)
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// NLTK data directory holding corpora/stopwords
    #[arg(long)]
    stopwords_dir: Option<PathBuf>,

    /// Stopword language, overrides the config file
    #[arg(long)]
    language: Option<String>,

    /// Vocabulary cap, overrides the config file
    #[arg(long)]
    max_features: Option<usize>,

    /// Print similarity scores alongside the products
    #[arg(long)]
    scores: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Config file plus flag overrides. Anything unusable falls back to the
/// defaults with a warning, so the command still answers.
fn resolve_config(args: &Args) -> RecommenderConfig {
    let mut config = match &args.config {
        Some(path) => load_config(path).unwrap_or_else(|e| {
            warn!("Ignoring config {:?}: {}", path, e);
            RecommenderConfig::default()
        }),
        None => RecommenderConfig::default(),
    };
    if let Some(language) = &args.language {
        config.language = language.clone();
    }
    if let Some(max_features) = args.max_features {
        config.max_features = max_features;
    }

    if let Err(e) = config.validate() {
        warn!("Invalid settings ({}), using defaults", e);
        return RecommenderConfig::default();
    }
    config
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the JSON result
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = resolve_config(&args);
    let top_n = args.top_n.unwrap_or(config.default_top_n);

    let stopwords = args
        .stopwords_dir
        .clone()
        .map(NltkStopwords::new)
        .or_else(NltkStopwords::discover);
    let recommender = match &stopwords {
        Some(source) => {
            info!("Stopword corpus: {}", source.root().display());
            Recommender::with_stopword_source(config, source)?
        }
        None => Recommender::new(config)?,
    };

    let source = JsonCatalogFile::new(&args.catalog);
    let catalog: Vec<CatalogItem> = match source.fetch_catalog() {
        Ok(items) => items,
        Err(e) => {
            warn!("Catalog unavailable: {}", e);
            Vec::new()
        }
    };
    info!("Catalog: {} products from {:?}", catalog.len(), args.catalog);

    let output = if args.scores {
        serde_json::to_string_pretty(&recommender.recommend_scored(&catalog, args.product, top_n))?
    } else {
        serde_json::to_string_pretty(&recommender.recommend(&catalog, args.product, top_n))?
    };
    println!("{}", output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["shoprec", "--catalog", "products.json", "--product", "1"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_flags_override_config() {
        let config = resolve_config(&args(&["--language", "english", "--max-features", "20"]));
        assert_eq!(config.language, "english");
        assert_eq!(config.max_features, 20);
    }

    #[test]
    fn test_zero_max_features_falls_back() {
        let config = resolve_config(&args(&["--max-features", "0"]));
        assert_eq!(config, RecommenderConfig::default());
    }

    #[test]
    fn test_unusable_config_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        let invalid = dir.path().join("invalid.json");
        std::fs::write(&invalid, r#"{"min_df": 0}"#).unwrap();
        let missing = dir.path().join("missing.json");

        for path in [&broken, &invalid, &missing] {
            let path = path.to_str().unwrap();
            assert_eq!(resolve_config(&args(&["--config", path])), RecommenderConfig::default());
        }
    }

    #[test]
    fn test_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shoprec.json");
        std::fs::write(&path, r#"{"default_top_n": 3}"#).unwrap();
        let config = resolve_config(&args(&["--config", path.to_str().unwrap()]));
        assert_eq!(config.default_top_n, 3);
    }
}
