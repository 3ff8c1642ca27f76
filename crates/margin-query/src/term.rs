//! Query term model.
//!
//! Represents a parsed query as an ordered sequence of terms. The sequence
//! preserves exactly what the user typed; the only normalization applied on
//! serialization is facet-value quoting.

use std::fmt;

use crate::lexer::parse_terms;

/// Facet keys recognized by the tokenizer.
///
/// A `key:value` token is only treated as a facet when the key appears here
/// (case-sensitive). Anything else stays opaque free text, so incidental
/// colons in search terms are never misparsed.
pub const FACET_KEYS: &[&str] = &["group", "tag", "uri", "user"];

/// A single term in a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// An opaque free-text token, emitted verbatim on serialization.
    Text(String),

    /// A structured `key:value` filter.
    Facet {
        /// Facet key (one of [`FACET_KEYS`]).
        key: String,
        /// Facet value, with any surrounding quotes stripped.
        value: String,
    },
}

impl Term {
    /// Creates a free-text term.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a facet term.
    pub fn facet(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Facet {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns true when this term is a facet with exactly this key and
    /// value. Comparison is case-sensitive and on the unquoted value.
    pub fn is_facet(&self, key: &str, value: &str) -> bool {
        match self {
            Self::Text(_) => false,
            Self::Facet { key: k, value: v } => k == key && v == value,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Facet { key, value } => {
                if value.chars().any(char::is_whitespace) {
                    write!(f, "{key}:\"{value}\"")
                } else {
                    // Includes the empty value, which serializes as `key:`.
                    write!(f, "{key}:{value}")
                }
            }
        }
    }
}

/// An ordered sequence of query terms.
///
/// Order is significant: serialization joins terms in sequence, and the
/// facet toggle removes the first matching term only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString(Vec<Term>);

impl QueryString {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string into terms.
    ///
    /// Parsing is total: any input yields a term sequence. Tokens split on
    /// whitespace outside double-quoted spans; see [`crate::FACET_KEYS`]
    /// for facet recognition.
    pub fn parse(input: &str) -> Self {
        parse_terms(input)
    }

    /// The terms in order.
    pub fn terms(&self) -> &[Term] {
        &self.0
    }

    /// Returns true when the query has no terms.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a term at the end.
    pub fn push(&mut self, term: Term) {
        self.0.push(term);
    }

    /// Removes and returns the term at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Term {
        self.0.remove(index)
    }
}

impl From<Vec<Term>> for QueryString {
    fn from(terms: Vec<Term>) -> Self {
        Self(terms)
    }
}

impl fmt::Display for QueryString {
    /// Serializes to canonical text: terms joined by single spaces, facet
    /// values quoted iff they contain whitespace. The empty query
    /// serializes to the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_serializes_to_empty_string() {
        assert_eq!(QueryString::new().to_string(), "");
    }

    #[test]
    fn text_terms_are_verbatim() {
        let query = QueryString::from(vec![Term::text("foo"), Term::text("bar")]);
        assert_eq!(query.to_string(), "foo bar");
    }

    #[test]
    fn facet_without_whitespace_is_unquoted() {
        let query = QueryString::from(vec![Term::facet("user", "fred")]);
        assert_eq!(query.to_string(), "user:fred");
    }

    #[test]
    fn facet_with_whitespace_is_quoted() {
        let query = QueryString::from(vec![Term::facet("tag", "road map")]);
        assert_eq!(query.to_string(), "tag:\"road map\"");
    }

    #[test]
    fn empty_facet_value_serializes_bare() {
        let query = QueryString::from(vec![Term::facet("user", "")]);
        assert_eq!(query.to_string(), "user:");
    }

    #[test]
    fn mixed_terms_keep_order() {
        let query = QueryString::from(vec![
            Term::text("foo"),
            Term::facet("user", "fred"),
            Term::text("bar"),
        ]);
        assert_eq!(query.to_string(), "foo user:fred bar");
    }

    #[test]
    fn is_facet_matches_exactly() {
        let term = Term::facet("user", "fred");
        assert!(term.is_facet("user", "fred"));
        assert!(!term.is_facet("user", "Fred"));
        assert!(!term.is_facet("tag", "fred"));
        assert!(!Term::text("user:fred").is_facet("user", "fred"));
    }

    #[test]
    fn round_trip_preserves_terms() {
        let query = QueryString::from(vec![
            Term::facet("user", "carol"),
            Term::text("foo"),
            Term::facet("tag", "road map"),
            Term::facet("uri", ""),
        ]);

        assert_eq!(QueryString::parse(&query.to_string()), query);
    }
}
