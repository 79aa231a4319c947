//! English pluralization for the `pluralize` template filter.
//!
//! Covers the handful of rules that actually show up in generated identifiers
//! (field/collection names): irregulars, sibilant endings, consonant+y, and the
//! regular `+s` case. Not a general-purpose English inflector.

const IRREGULARS: &[(&str, &str)] = &[
    ("child", "children"),
    ("person", "people"),
    ("datum", "data"),
    ("criterion", "criteria"),
];

/// Pluralizes a single word, case-insensitively matching irregulars but otherwise
/// preserving the input's case pattern only insofar as it keeps the original prefix.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return word.to_string();
    }

    let lower = word.to_lowercase();
    for (singular, plural) in IRREGULARS {
        if lower == *singular {
            return plural.to_string();
        }
    }

    if let Some(stem) = lower.strip_suffix('y') {
        let penultimate = stem.chars().last();
        let is_vowel = matches!(penultimate, Some('a' | 'e' | 'i' | 'o' | 'u'));
        if !is_vowel {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }

    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{word}es");
    }

    format!("{word}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_plurals_add_s() {
        assert_eq!(pluralize("node"), "nodes");
        assert_eq!(pluralize("field"), "fields");
    }

    #[test]
    fn sibilant_endings_add_es() {
        assert_eq!(pluralize("class"), "classes");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("branch"), "branches");
    }

    #[test]
    fn consonant_y_becomes_ies() {
        assert_eq!(pluralize("query"), "queries");
        assert_eq!(pluralize("category"), "categories");
    }

    #[test]
    fn vowel_y_stays_regular() {
        assert_eq!(pluralize("key"), "keys");
    }

    #[test]
    fn irregulars_are_special_cased() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("child"), "children");
    }
}
