//! Facet toggling.
//!
//! The mechanism behind clickable facet links on activity pages: the same
//! link adds a facet when absent and removes it when present, leaving every
//! other term untouched and in place.

use crate::term::{QueryString, Term};

/// Toggles the facet `key:value` in a query string.
///
/// When the query already contains a facet with exactly this key and value
/// (first occurrence only), it is removed; otherwise the facet is appended
/// as a new trailing term. Other facets sharing the key keep their place.
///
/// Returns the canonical serialization of the result, so toggling twice
/// with the same key and value returns `text` in canonical form.
pub fn toggle_facet(text: &str, key: &str, value: &str) -> String {
    let mut query = QueryString::parse(text);

    match query.terms().iter().position(|t| t.is_facet(key, value)) {
        Some(index) => {
            query.remove(index);
        }
        None => query.push(Term::facet(key, value)),
    }

    query.to_string()
}
