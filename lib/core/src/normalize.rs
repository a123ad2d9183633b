//! Category label normalization
//!
//! Turns free-text genre labels into canonical [`Category`] tokens:
//! case folding, accent stripping, synonym and paronym resolution, and a
//! Spanish Snowball stem fallback for everything else.

use crate::lexicon;
use crate::Category;
use ahash::{AHashMap, AHashSet};
use rust_stemmers::{Algorithm, Stemmer};
use std::fmt;
use tracing::trace;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Tokens shorter than this (in characters) are treated as noise
pub const MIN_TOKEN_LEN: usize = 3;

/// Clean a raw label into a canonical-looking token
///
/// Lower-cases, strips diacritics, transliterates letters that have no
/// decomposition (`ß`, `æ`, `ø`, ...), drops everything outside
/// `[a-z0-9_ ]` and collapses runs of whitespace. Idempotent.
pub fn clean(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    let letters = raw
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase);

    for c in letters {
        if let Some(ascii) = transliterate(c) {
            folded.push_str(ascii);
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c.is_whitespace() {
            folded.push(c);
        }
    }

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// ASCII spelling of lower-case letters that NFD leaves intact
fn transliterate(c: char) -> Option<&'static str> {
    let ascii = match c {
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'ø' => "o",
        'ł' => "l",
        'đ' | 'ð' => "d",
        'þ' => "th",
        'ħ' => "h",
        'ı' => "i",
        'ŀ' => "l",
        'ŧ' => "t",
        _ => return None,
    };
    Some(ascii)
}

/// How a label was mapped to its category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Already a canonical category
    Canonical,
    /// Listed as a synonym of a canonical category
    Synonym,
    /// Listed as a known misspelling or variant
    Paronym,
    /// Stem matched a canonical category or one of its synonyms
    Stem,
    /// No table knows it; the cleaned token is passed through
    Unknown,
}

struct SynonymGroup {
    canonical: Category,
    members: AHashSet<String>,
    stems: AHashSet<String>,
}

/// Canonicalizes raw category labels against immutable lookup tables
pub struct TextNormalizer {
    groups: Vec<SynonymGroup>,
    canonical: AHashSet<Category>,
    paronyms: AHashMap<String, Category>,
    stop_words: AHashSet<String>,
    stemmer: Stemmer,
}

impl TextNormalizer {
    /// Normalizer over the built-in Spanish genre tables
    pub fn spanish() -> Self {
        Self::with_tables(lexicon::SYNONYMS, lexicon::PARONYMS, lexicon::STOP_WORDS)
    }

    /// Build a normalizer from explicit tables
    ///
    /// Table entries are cleaned on the way in. Group order matters: when a
    /// token belongs to several groups the first one wins.
    pub fn with_tables(
        synonyms: &[(&str, &[&str])],
        paronyms: &[(&str, &[&str])],
        stop_words: &[&str],
    ) -> Self {
        let stemmer = Stemmer::create(Algorithm::Spanish);

        let groups: Vec<SynonymGroup> = synonyms
            .iter()
            .map(|(canonical, words)| {
                let canonical = clean(canonical);
                let members: AHashSet<String> = words.iter().map(|w| clean(w)).collect();
                let stems = std::iter::once(&canonical)
                    .chain(members.iter())
                    .map(|w| stemmer.stem(w).into_owned())
                    .collect();
                SynonymGroup {
                    canonical,
                    members,
                    stems,
                }
            })
            .collect();

        let canonical = groups.iter().map(|g| g.canonical.clone()).collect();

        // Keep the first canonical listed for a variant
        let mut paronym_index = AHashMap::new();
        for (target, variants) in paronyms {
            let target = clean(target);
            for variant in variants.iter() {
                paronym_index
                    .entry(clean(variant))
                    .or_insert_with(|| target.clone());
            }
        }

        Self {
            groups,
            canonical,
            paronyms: paronym_index,
            stop_words: stop_words.iter().map(|w| clean(w)).collect(),
            stemmer,
        }
    }

    /// Normalize a raw label into a category
    pub fn normalize(&self, raw: &str) -> Category {
        self.resolve(raw).0
    }

    /// Normalize a raw label and report which table resolved it
    ///
    /// Canonical forms are matched before synonym groups so that every
    /// returned category is a fixed point of normalization.
    pub fn resolve(&self, raw: &str) -> (Category, Resolution) {
        let token = clean(raw);
        if token.is_empty() {
            return (token, Resolution::Unknown);
        }

        if self.canonical.contains(&token) {
            return (token, Resolution::Canonical);
        }

        if let Some(group) = self.groups.iter().find(|g| g.members.contains(&token)) {
            return (group.canonical.clone(), Resolution::Synonym);
        }

        if let Some(target) = self.paronyms.get(&token) {
            return (target.clone(), Resolution::Paronym);
        }

        let stem = self.stem(&token);
        if let Some(group) = self.groups.iter().find(|g| g.stems.contains(&stem)) {
            trace!(token = %token, stem = %stem, category = %group.canonical, "stem match");
            return (group.canonical.clone(), Resolution::Stem);
        }

        (token, Resolution::Unknown)
    }

    /// Spanish Snowball stem of an already-cleaned token
    pub fn stem(&self, token: &str) -> String {
        self.stemmer.stem(token).into_owned()
    }

    /// True for stop words and tokens shorter than [`MIN_TOKEN_LEN`]
    pub fn is_stop_word(&self, token: &str) -> bool {
        token.chars().count() < MIN_TOKEN_LEN || self.stop_words.contains(token)
    }

    /// True if the token is one of the canonical categories
    pub fn is_canonical(&self, token: &str) -> bool {
        self.canonical.contains(token)
    }

    /// Canonical categories in table order
    pub fn canonical_categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.canonical.as_str())
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::spanish()
    }
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("groups", &self.groups.len())
            .field("paronyms", &self.paronyms.len())
            .field("stop_words", &self.stop_words.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_folds_case_and_accents() {
        assert_eq!(clean("Ciencia Ficción"), "ciencia ficcion");
        assert_eq!(clean("  ANIMACIÓN   adulta "), "animacion adulta");
        assert_eq!(clean("sci-fi!"), "scifi");
        assert_eq!(clean("Niño\tpequeño"), "nino pequeno");
    }

    #[test]
    fn test_clean_transliterates_letters() {
        assert_eq!(clean("Straße"), "strasse");
        assert_eq!(clean("Øyvind noir"), "oyvind noir");
        assert_eq!(clean("æther"), "aether");
        assert_eq!(clean("ŒUVRE Łódź"), "oeuvre lodz");
    }

    #[test]
    fn test_clean_is_idempotent() {
        for raw in ["Ciencia Ficción", "road movie", "¿Terror?", "", "  a  b  ", "Straße"] {
            let once = clean(raw);
            assert_eq!(clean(&once), once);
        }
    }

    #[test]
    fn test_synonym_group_converges() {
        let normalizer = TextNormalizer::spanish();
        let a = normalizer.normalize("Ciencia Ficción");
        let b = normalizer.normalize("ciencia_ficcion");
        let c = normalizer.normalize("SCIFI");
        assert_eq!(a, "ciencia_ficcion");
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_resolution_kinds() {
        let normalizer = TextNormalizer::spanish();
        assert_eq!(
            normalizer.resolve("terror"),
            ("terror".to_string(), Resolution::Canonical)
        );
        assert_eq!(
            normalizer.resolve("Horror"),
            ("terror".to_string(), Resolution::Synonym)
        );
        assert_eq!(
            normalizer.resolve("komedia"),
            ("comedia".to_string(), Resolution::Paronym)
        );
        assert_eq!(
            normalizer.resolve("Sci-Fi"),
            ("ciencia_ficcion".to_string(), Resolution::Synonym)
        );
        assert_eq!(
            normalizer.resolve("cyberpunk"),
            ("cyberpunk".to_string(), Resolution::Unknown)
        );
    }

    #[test]
    fn test_stem_fallback() {
        let normalizer = TextNormalizer::spanish();
        // Plural forms are not listed anywhere but share the stem
        assert_eq!(normalizer.resolve("comedias").0, "comedia");
        assert_eq!(normalizer.resolve("documentales").0, "documental");
        assert_eq!(normalizer.resolve("comedias").1, Resolution::Stem);
    }

    #[test]
    fn test_canonical_beats_earlier_synonym_group() {
        let normalizer = TextNormalizer::spanish();
        // "aventura" is also listed as a synonym of "accion"
        assert_eq!(normalizer.normalize("aventura"), "aventura");
        assert_eq!(normalizer.normalize("Exploración"), "aventura");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = TextNormalizer::spanish();
        let labels = [
            "Ciencia Ficción",
            "SCIFI",
            "miedo",
            "aventura",
            "comedias",
            "road movie",
            "buddy movie",
            "superheroes oscuro",
            "Biografía",
            "teror",
        ];
        for raw in labels {
            let once = normalizer.normalize(raw);
            assert_eq!(normalizer.normalize(&once), once, "label {raw:?}");
        }
    }

    #[test]
    fn test_unknown_label_passes_through_cleaned() {
        let normalizer = TextNormalizer::spanish();
        assert_eq!(normalizer.normalize("Road  Movie"), "road movie");
        assert_eq!(normalizer.normalize("!!!"), "");
    }

    #[test]
    fn test_stop_words() {
        let normalizer = TextNormalizer::spanish();
        assert!(normalizer.is_stop_word("de"));
        assert!(normalizer.is_stop_word("para"));
        assert!(normalizer.is_stop_word("ab"));
        assert!(normalizer.is_stop_word(""));
        assert!(!normalizer.is_stop_word("drama"));
        assert!(!normalizer.is_stop_word("gore"));
    }

    #[test]
    fn test_custom_tables() {
        let normalizer = TextNormalizer::with_tables(
            &[("jazz", &["bebop", "swing"])],
            &[("jazz", &["jaz"])],
            &["the"],
        );
        assert_eq!(normalizer.normalize("Bebop"), "jazz");
        assert_eq!(normalizer.normalize("jaz"), "jazz");
        assert!(normalizer.is_stop_word("the"));
        assert!(normalizer.is_canonical("jazz"));
        assert_eq!(normalizer.canonical_categories().collect::<Vec<_>>(), vec!["jazz"]);
    }
}
