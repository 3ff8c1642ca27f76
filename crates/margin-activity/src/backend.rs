//! Search collaborator contract.
//!
//! The full-text engine lives behind [`SearchBackend`]; this layer builds
//! the [`SearchQuery`] it consumes and shapes the [`SearchResults`] it
//! returns. Rows and aggregation buckets stay opaque JSON values - their
//! schema belongs to the engine and the presentation layer, not here.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use margin_query::QueryString;

use crate::context::RequestContext;

/// A structured search request.
///
/// Built once per request from the raw parameters and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Parsed query terms.
    pub terms: QueryString,
    /// Effective page size, after fallback resolution.
    pub page_size: usize,
    /// Public id of the group the search is scoped to, when scoped.
    pub group_scope: Option<String>,
}

/// Raw results returned by the search collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// Annotation summaries for one page, opaque to this layer.
    pub rows: Vec<Value>,
    /// Aggregation name to bucket objects.
    pub aggregations: BTreeMap<String, Vec<Value>>,
    /// Total number of matching annotations across all pages.
    pub total: u64,
}

/// The search collaborator failed (backend unavailable, bad index, ...).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("search backend failure: {0}")]
pub struct BackendError(pub String);

/// Full-text search collaborator.
pub trait SearchBackend {
    /// Executes a search, returning at most `page_size` rows plus totals
    /// and aggregations.
    fn execute(&self, query: &SearchQuery, page_size: usize)
    -> Result<SearchResults, BackendError>;

    /// URL canonicalization hook, called before execution.
    ///
    /// A returned location short-circuits the search with a redirect. The
    /// default implementation is a pass-through.
    fn check_url(&self, ctx: &RequestContext<'_>, query: &SearchQuery) -> Option<String> {
        let _ = (ctx, query);
        None
    }
}
