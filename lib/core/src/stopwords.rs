//! Stopword filtering
//!
//! Stopwords are high-frequency function words dropped before the vocabulary
//! is built. Lists come from a [`StopwordSource`]; whenever a source cannot
//! deliver, [`load_stopwords`] falls back to the built-in Spanish list so the
//! recommender always has a filter.

use crate::Result;
use ahash::AHashSet;
use tracing::{debug, warn};

/// Built-in Spanish list: function words plus the most frequent lemmas
/// (verbs like `tener` or `usar`, nouns like `casa` or `tiempo`) that carry
/// little signal in product text.
pub const FALLBACK_STOPWORDS: &[&str] = &[
    "el", "la", "de", "que", "y", "a", "en", "un", "ser", "se", "no", "haber",
    "por", "con", "su", "para", "como", "estar", "tener", "le", "lo", "todo",
    "pero", "más", "hacer", "o", "poder", "decir", "este", "ir", "otro", "ese",
    "si", "me", "ya", "ver", "porque", "dar", "cuando", "él", "muy", "sin",
    "vez", "mucho", "saber", "qué", "sobre", "mi", "alguno", "mismo", "yo",
    "también", "hasta", "año", "dos", "querer", "entre", "así", "primero",
    "desde", "grande", "eso", "ni", "nos", "llegar", "pasar", "tiempo", "ella",
    "sí", "día", "uno", "bien", "poco", "deber", "entonces", "poner", "cosa",
    "tanto", "hombre", "parecer", "nuestro", "tan", "donde", "ahora", "parte",
    "después", "vida", "quedar", "siempre", "creer", "hablar", "llevar",
    "dejar", "nada", "cada", "seguir", "menos", "nuevo", "encontrar", "algo",
    "solo", "casa", "usar", "tal", "allí", "sólo", "escribir", "madre",
    "padre", "trabajar", "mes", "pedir", "hora", "gente", "los", "las", "del",
    "al", "una", "unos", "unas", "estos", "estas", "esos", "esas", "aquel",
    "aquella", "aquellos", "aquellas",
];

/// Case-insensitive set of words excluded from vectorization
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: AHashSet<String>,
}

impl StopwordSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// The built-in list
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(FALLBACK_STOPWORDS)
    }

    /// No filtering at all
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Expects an already-lowercased token
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Provider of stopword lists, e.g. an installed linguistic corpus
pub trait StopwordSource: Send + Sync {
    fn load(&self, language: &str) -> Result<StopwordSet>;
}

/// Source that always serves the built-in list
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStopwords;

impl StopwordSource for BuiltinStopwords {
    fn load(&self, _language: &str) -> Result<StopwordSet> {
        Ok(StopwordSet::fallback())
    }
}

/// Load stopwords for `language`, degrading to the built-in list when the
/// source fails or returns nothing. Never fails.
pub fn load_stopwords(source: &dyn StopwordSource, language: &str) -> StopwordSet {
    match source.load(language) {
        Ok(set) if !set.is_empty() => {
            debug!("Loaded {} stopwords for {}", set.len(), language);
            set
        }
        Ok(_) => {
            warn!("Stopword list for {} is empty, using built-in list", language);
            StopwordSet::fallback()
        }
        Err(e) => {
            warn!("Stopwords for {} unavailable ({}), using built-in list", language, e);
            StopwordSet::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct Unreachable;

    impl StopwordSource for Unreachable {
        fn load(&self, language: &str) -> Result<StopwordSet> {
            Err(Error::ResourceUnavailable(format!("no corpus for {}", language)))
        }
    }

    struct Fixed(Vec<&'static str>);

    impl StopwordSource for Fixed {
        fn load(&self, _language: &str) -> Result<StopwordSet> {
            Ok(StopwordSet::new(self.0.iter()))
        }
    }

    #[test]
    fn test_fallback_list_contents() {
        let set = StopwordSet::fallback();
        assert_eq!(set.len(), FALLBACK_STOPWORDS.len());
        assert_eq!(set.len(), 129);
        for word in ["de", "también", "grande", "nuevo", "casa", "tiempo", "año", "día"] {
            assert!(set.contains(word), "missing {}", word);
        }
        for word in ["vida", "cosa", "usar", "trabajar"] {
            assert!(set.contains(word), "missing {}", word);
        }
        assert!(!set.contains("zapato"));
    }

    #[test]
    fn test_case_insensitive_construction() {
        let set = StopwordSet::new(["The", " AND "]);
        assert!(set.contains("the"));
        assert!(set.contains("and"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_unreachable_source_degrades() {
        let set = load_stopwords(&Unreachable, "spanish");
        assert_eq!(set.len(), StopwordSet::fallback().len());
    }

    #[test]
    fn test_empty_source_degrades() {
        let set = load_stopwords(&Fixed(vec![]), "spanish");
        assert!(set.contains("el"));
    }

    #[test]
    fn test_working_source_is_used() {
        let set = load_stopwords(&Fixed(vec!["the", "of"]), "english");
        assert_eq!(set.len(), 2);
        assert!(set.contains("of"));
        assert!(!set.contains("el"));
    }

    #[test]
    fn test_builtin_source() {
        let set = BuiltinStopwords.load("anything").unwrap();
        assert!(set.contains("para"));
    }
}
