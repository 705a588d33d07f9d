//! Known trash categories

use crate::error::ConfigError;

/// Labels the original YOLOv3-based camera screen recognised as trash
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "bottle",
    "wine glass",
    "cup",
    "can",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "wrapper",
    "plastic bag",
    "paper",
    "straw",
    "aluminum foil",
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
];

/// Immutable ordered list of category substrings, stored lowercase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    entries: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary, rejecting empty lists and blank entries
    pub fn new<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                return Err(ConfigError::BlankVocabularyEntry { index });
            }
            let entry = entry.to_lowercase();
            if !out.contains(&entry) {
                out.push(entry);
            }
        }

        if out.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }
        Ok(Self { entries: out })
    }

    /// Entries in declaration order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry contained in an already-lowercased label
    pub fn matches<'a>(&'a self, lowercase_label: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(move |entry| lowercase_label.contains(entry))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            entries: DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Capitalize each word for display: "plastic bag" → "Plastic Bag"
pub fn display_name(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_original_labels() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.len(), 23);
        assert_eq!(vocab.entries()[0], "bottle");
        assert_eq!(vocab.entries()[22], "cake");
    }

    #[test]
    fn test_rejects_empty() {
        let empty: [&str; 0] = [];
        assert!(matches!(Vocabulary::new(empty), Err(ConfigError::EmptyVocabulary)));
    }

    #[test]
    fn test_rejects_blank_entry() {
        let err = Vocabulary::new(["cup", "  "]).unwrap_err();
        assert!(matches!(err, ConfigError::BlankVocabularyEntry { index: 1 }));
    }

    #[test]
    fn test_entries_are_lowercased_and_deduplicated() {
        let vocab = Vocabulary::new(["Cup", "CAN", "cup"]).unwrap();
        assert_eq!(vocab.entries(), &["cup".to_string(), "can".to_string()]);
    }

    #[test]
    fn test_matches_multiple_entries() {
        let vocab = Vocabulary::new(["wine glass", "glass", "wine"]).unwrap();
        let hits: Vec<&str> = vocab.matches("wine glass").collect();
        assert_eq!(hits, vec!["wine glass", "glass", "wine"]);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("plastic bag"), "Plastic Bag");
        assert_eq!(display_name("PLASTIC BOTTLE"), "Plastic Bottle");
        assert_eq!(display_name("cup"), "Cup");
        assert_eq!(display_name(""), "");
    }
}
