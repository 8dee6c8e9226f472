// Stopword lists from an installed NLTK data directory
use shoprec_core::{Error, Result, StopwordSet, StopwordSource};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const NLTK_DATA_ENV: &str = "NLTK_DATA";

/// Reads `<root>/corpora/stopwords/<language>`, one word per line
#[derive(Debug, Clone)]
pub struct NltkStopwords {
    root: PathBuf,
}

impl NltkStopwords {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Locate the data directory: `NLTK_DATA` (first entry) first, then
    /// `~/nltk_data`. Returns `None` when neither can be determined.
    pub fn discover() -> Option<Self> {
        if let Some(paths) = std::env::var_os(NLTK_DATA_ENV) {
            if let Some(first) = std::env::split_paths(&paths).next() {
                if !first.as_os_str().is_empty() {
                    return Some(Self::new(first));
                }
            }
        }
        std::env::var_os("HOME").map(|home| Self::new(PathBuf::from(home).join("nltk_data")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn list_path(&self, language: &str) -> PathBuf {
        self.root.join("corpora").join("stopwords").join(language)
    }
}

impl StopwordSource for NltkStopwords {
    fn load(&self, language: &str) -> Result<StopwordSet> {
        if language.contains(['/', '\\']) || language.starts_with('.') {
            return Err(Error::ResourceUnavailable(format!(
                "invalid stopword language {:?}",
                language
            )));
        }

        let path = self.list_path(language);
        let data = std::fs::read_to_string(&path).map_err(|e| {
            Error::ResourceUnavailable(format!("{}: {}", path.display(), e))
        })?;
        let set = StopwordSet::new(data.lines());
        debug!("Read {} stopwords from {}", set.len(), path.display());
        Ok(set)
    }
}
