//! Query string parsing and facet toggling for margin activity pages.
//!
//! Activity page URLs carry search state in a single free-text `q`
//! parameter. This crate gives that string structure:
//!
//! - **Free text**: `road map` - opaque terms, kept verbatim
//! - **Facets**: `user:fred`, `tag:"road map"` - structured `key:value`
//!   filters, with the value quoted when it contains whitespace
//!
//! Parsing and serialization round-trip: term order is preserved, and the
//! only normalization is quoting (a facet value is quoted on output iff it
//! contains whitespace). Toggling a facet on and off returns the query to
//! its canonical form.
//!
//! # Example
//!
//! ```
//! use margin_query::{QueryString, Term, toggle_facet};
//!
//! let query = QueryString::parse("user:\"carol\" foo bar");
//! assert_eq!(query.terms()[0], Term::facet("user", "carol"));
//!
//! // Clicking carol's facet link removes the filter, leaving the rest.
//! assert_eq!(toggle_facet("user:\"carol\" foo bar", "user", "carol"), "foo bar");
//! ```

#![warn(missing_docs)]

mod lexer;
mod term;
mod toggle;

pub use term::{FACET_KEYS, QueryString, Term};
pub use toggle::toggle_facet;
