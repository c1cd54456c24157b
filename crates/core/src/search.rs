//! In-memory text search over resource fields.
//!
//! Matching is a case-insensitive substring test performed with Unicode
//! lowercasing, so accented titles match regardless of case. The query is
//! matched as typed: surrounding whitespace is part of the needle. Only the
//! empty query matches everything.

/// Normalize a raw query for repeated matching.
pub fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}

/// Whether any of `fields` contains the already-normalized `needle`.
pub fn matches_normalized(needle: &str, fields: &[&str]) -> bool {
    needle.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(needle))
}

/// Whether any of `fields` contains `query`, ignoring case.
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    matches_normalized(&normalize_query(query), fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_substring() {
        assert!(matches_query("REACT", &["React Documentation"]));
        assert!(matches_query("doc", &["Nope", "Official docs"]));
        assert!(!matches_query("vue", &["React Documentation", "Official docs"]));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(matches_query("", &["anything"]));
        assert!(matches_query("", &[]));
    }

    #[test]
    fn whitespace_is_part_of_the_query() {
        assert!(!matches_query(" doc", &["docs"]));
        assert!(matches_query(" doc", &["Official docs"]));
        assert!(!matches_query("   ", &["anything"]));
    }

    #[test]
    fn unicode_lowercasing() {
        assert!(matches_query("DISEÑO", &["Sistema de diseño"]));
    }
}
