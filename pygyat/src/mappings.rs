//! Keyword mapping table
//!
//! The table pairs every PyGyat phrase with the Python keyword or operator it
//! stands for. Entries are kept in a fixed order: a phrase that contains a
//! shorter key as a whole word (`sigma twin` and `sigma`, `pause no diddy` and
//! `pause`) is listed before that shorter key, so it is replaced first.
//!
//! Tables are immutable once built. The reference table is built lazily, once
//! per process, and shared by reference.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{GyatError, GyatResult};

/// File extension of PyGyat sources, including the dot
pub const DIALECT_EXTENSION: &str = ".gyat";

/// File extension of generated Python sources, including the dot
pub const TARGET_EXTENSION: &str = ".py";

const REFERENCE_MAPPINGS: &[(&str, &str)] = &[
    ("hawk", "try"),
    ("tuah", "except"),
    ("spit on that thang", "finally"),
    ("its giving", "return"),
    ("tax", "-="),
    ("rizz", "+="),
    ("yap", "print"),
    ("Aura", "True"),
    ("Cooked", "False"),
    ("bop", "def"),
    ("gooning", "while"),
    ("glaze", "import"),
    ("lock in", "from"),
    ("skibidi", "class"),
    ("chat is this real", "if"),
    ("yo chat", "elif"),
    ("only in ohio", "else"),
    ("mewing", "for"),
    ("just put the fries in the bag bro", "break"),
    ("edge", "continue"),
    ("mog", "assert"),
    ("crashout", "raise"),
    ("pookie", "with"),
    ("ahh", "as"),
    ("GOAT", "global"),
    ("motion", "nonlocal"),
    ("delulu", "del"),
    ("pause no diddy", "yield from"),
    ("pause", "yield"),
    ("NPC", "None"),
    ("unc", "self"),
    ("huzz", "range"),
    ("sigma twin", ">="),
    ("beta twin", "<="),
    ("twin", "=="),
    ("sigma", ">"),
    ("beta", "<"),
];

static DEFAULT_TABLE: Lazy<MappingTable> = Lazy::new(|| {
    MappingTable::new(
        REFERENCE_MAPPINGS
            .iter()
            .map(|(token, replacement)| (token.to_string(), replacement.to_string())),
    )
    .expect("reference mapping table")
});

/// Which way a file is translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// PyGyat source to Python source
    #[default]
    GyatToPython,
    /// Python source back to PyGyat source
    PythonToGyat,
}

impl Direction {
    pub fn source_extension(&self) -> &'static str {
        match self {
            Direction::GyatToPython => DIALECT_EXTENSION,
            Direction::PythonToGyat => TARGET_EXTENSION,
        }
    }

    pub fn target_extension(&self) -> &'static str {
        match self {
            Direction::GyatToPython => TARGET_EXTENSION,
            Direction::PythonToGyat => DIALECT_EXTENSION,
        }
    }
}

/// Characters that form Python operators. An operator token never matches
/// when glued to another operator character (`>` inside `->` or `>>`).
pub(crate) fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '<' | '>' | '=' | '!' | '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' | '~'
    )
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A single token and its replacement, with the matcher compiled for it
#[derive(Debug, Clone)]
pub struct Mapping {
    token: String,
    replacement: String,
    matcher: Regex,
}

impl Mapping {
    pub fn new(token: &str, replacement: &str) -> GyatResult<Self> {
        if token.trim().is_empty() {
            return Err(GyatError::Config(
                "mapping tokens cannot be empty".to_string(),
            ));
        }

        let mut pattern = String::new();
        if token.starts_with(is_word_char) {
            pattern.push_str(r"\b");
        }
        pattern.push_str(&regex::escape(token));
        if token.ends_with(is_word_char) {
            pattern.push_str(r"\b");
        }

        let matcher = Regex::new(&pattern).map_err(|e| {
            GyatError::Config(format!("cannot compile matcher for '{}': {}", token, e))
        })?;

        Ok(Mapping {
            token: token.to_string(),
            replacement: replacement.to_string(),
            matcher,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Finds literal occurrences of the token, word-bounded on word edges
    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }
}

/// Ordered, immutable token table
#[derive(Debug, Clone)]
pub struct MappingTable {
    entries: Vec<Mapping>,
}

impl MappingTable {
    /// Build a table from `(token, replacement)` pairs, keeping their order
    ///
    /// # Errors
    /// - A token is empty or whitespace only
    /// - The same token appears twice
    pub fn new(pairs: impl IntoIterator<Item = (String, String)>) -> GyatResult<Self> {
        let mut entries: Vec<Mapping> = Vec::new();
        for (token, replacement) in pairs {
            if entries.iter().any(|m| m.token == token) {
                return Err(GyatError::Config(format!(
                    "duplicate mapping token '{}'",
                    token
                )));
            }
            entries.push(Mapping::new(&token, &replacement)?);
        }
        Ok(MappingTable { entries })
    }

    /// The built-in PyGyat → Python table
    pub fn default_table() -> &'static MappingTable {
        &DEFAULT_TABLE
    }

    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|m| m.token == token)
            .map(|m| m.replacement.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mapping> {
        self.entries.iter()
    }

    /// Extend the table with user-supplied keywords
    ///
    /// A pair whose token already exists replaces that entry's replacement in
    /// place, so it keeps its position. A new token goes right before the
    /// first entry whose token it contains as a whole word (`sigma male`
    /// before `sigma`), otherwise at the end.
    pub fn with_extensions(
        &self,
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> GyatResult<MappingTable> {
        let mut entries = self.entries.clone();
        for (token, replacement) in pairs {
            let mapping = Mapping::new(&token, &replacement)?;
            if let Some(existing) = entries.iter_mut().find(|m| m.token == token) {
                *existing = mapping;
                continue;
            }
            match entries.iter().position(|m| m.matcher.is_match(&token)) {
                Some(index) => entries.insert(index, mapping),
                None => entries.push(mapping),
            }
        }
        Ok(MappingTable { entries })
    }

    /// Invert the table for Python → PyGyat translation
    ///
    /// Tokens are ordered longest first so `yield from` is replaced before
    /// `yield` and `>=` before `>`. When several phrases share a replacement,
    /// the first one listed wins.
    pub fn reversed(&self) -> GyatResult<MappingTable> {
        let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(self.entries.len());
        for mapping in &self.entries {
            if pairs.iter().any(|(token, _)| *token == mapping.replacement) {
                continue;
            }
            pairs.push((mapping.replacement.as_str(), mapping.token.as_str()));
        }
        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let entries = pairs
            .into_iter()
            .map(|(token, replacement)| Mapping::new(token, replacement))
            .collect::<GyatResult<Vec<_>>>()?;
        Ok(MappingTable { entries })
    }
}

impl Default for MappingTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_lookup() {
        let table = MappingTable::default_table();
        assert_eq!(table.lookup("yap"), Some("print"));
        assert_eq!(table.lookup("chat is this real"), Some("if"));
        assert_eq!(table.lookup("pause no diddy"), Some("yield from"));
        assert_eq!(table.lookup("sigma twin"), Some(">="));
        assert_eq!(table.lookup("print"), None);
        assert_eq!(table.lookup("skibidi toilet"), None);
    }

    #[test]
    fn test_default_table_size_and_order() {
        let table = MappingTable::default_table();
        assert_eq!(table.len(), REFERENCE_MAPPINGS.len());
        let tokens: Vec<&str> = table.iter().map(|m| m.token()).collect();
        assert_eq!(tokens.first(), Some(&"hawk"));
        assert_eq!(tokens.last(), Some(&"beta"));
    }

    #[test]
    fn test_longer_phrases_precede_their_words() {
        let table = MappingTable::default_table();
        let position = |token: &str| table.iter().position(|m| m.token() == token).unwrap();
        assert!(position("sigma twin") < position("sigma"));
        assert!(position("sigma twin") < position("twin"));
        assert!(position("beta twin") < position("beta"));
        assert!(position("pause no diddy") < position("pause"));
    }

    #[test]
    fn test_no_canonical_token_is_a_dialect_key() {
        let table = MappingTable::default_table();
        for mapping in table.iter() {
            assert!(
                table.lookup(mapping.replacement()).is_none(),
                "'{}' is both a replacement and a key",
                mapping.replacement()
            );
        }
    }

    #[test]
    fn test_duplicate_tokens_rejected() {
        let result = MappingTable::new(vec![
            ("yap".to_string(), "print".to_string()),
            ("yap".to_string(), "input".to_string()),
        ]);
        assert!(matches!(result, Err(GyatError::Config(_))));
    }

    #[test]
    fn test_empty_token_rejected() {
        let result = MappingTable::new(vec![("  ".to_string(), "pass".to_string())]);
        assert!(matches!(result, Err(GyatError::Config(_))));
    }

    #[test]
    fn test_word_tokens_are_bounded() {
        let mapping = Mapping::new("yap", "print").unwrap();
        assert!(mapping.matcher().is_match("yap(1)"));
        assert!(!mapping.matcher().is_match("yapper(1)"));
        assert!(!mapping.matcher().is_match("_yap(1)"));
    }

    #[test]
    fn test_with_extensions_appends_and_overrides() {
        let table = MappingTable::default_table()
            .with_extensions(vec![
                ("pluh".to_string(), "pass".to_string()),
                ("mog".to_string(), "open".to_string()),
            ])
            .unwrap();
        assert_eq!(table.len(), REFERENCE_MAPPINGS.len() + 1);
        assert_eq!(table.lookup("pluh"), Some("pass"));
        assert_eq!(table.lookup("mog"), Some("open"));
        assert_eq!(table.iter().last().map(|m| m.token()), Some("pluh"));
        // the shared table is untouched
        assert_eq!(MappingTable::default_table().lookup("mog"), Some("assert"));
    }

    #[test]
    fn test_extension_phrases_precede_the_words_they_contain() {
        let table = MappingTable::default_table()
            .with_extensions(vec![
                ("zz".to_string(), "b".to_string()),
                ("sigma male".to_string(), "boss".to_string()),
                ("zz top".to_string(), "a".to_string()),
            ])
            .unwrap();
        let position = |token: &str| table.iter().position(|m| m.token() == token).unwrap();
        assert!(position("sigma male") < position("sigma"));
        assert!(position("sigma twin") < position("sigma male"));
        assert!(position("zz top") < position("zz"));
        assert_eq!(table.len(), REFERENCE_MAPPINGS.len() + 3);
    }

    #[test]
    fn test_reversed_table() {
        let reversed = MappingTable::default_table().reversed().unwrap();
        assert_eq!(reversed.len(), REFERENCE_MAPPINGS.len());
        assert_eq!(reversed.lookup("print"), Some("yap"));
        assert_eq!(reversed.lookup(">="), Some("sigma twin"));

        let position = |token: &str| reversed.iter().position(|m| m.token() == token).unwrap();
        assert!(position("yield from") < position("yield"));
        assert!(position("yield from") < position("from"));
        assert!(position(">=") < position(">"));
    }

    #[test]
    fn test_direction_extensions() {
        assert_eq!(Direction::default(), Direction::GyatToPython);
        assert_eq!(Direction::GyatToPython.source_extension(), ".gyat");
        assert_eq!(Direction::GyatToPython.target_extension(), ".py");
        assert_eq!(Direction::PythonToGyat.source_extension(), ".py");
        assert_eq!(Direction::PythonToGyat.target_extension(), ".gyat");
    }
}
