//! Query string tokenizer.
//!
//! Splits a raw query string into tokens on whitespace outside double-quoted
//! spans, then classifies each token as a facet or opaque text.
//!
//! Tokenization is total. A stray or unclosed quote never fails a parse; the
//! token it sits in simply stays opaque free text and round-trips verbatim.

use std::{iter::Peekable, str::Chars};

use crate::term::{FACET_KEYS, QueryString, Term};

/// Tokenizes a query string.
struct Lexer<'a> {
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    /// Consumes the input, producing the term sequence.
    fn parse(mut self) -> QueryString {
        let mut terms = Vec::new();

        while let Some(raw) = self.next_token() {
            terms.push(classify(raw));
        }

        QueryString::from(terms)
    }

    /// Reads the next raw token, or None at end of input.
    ///
    /// A token runs until whitespace encountered outside a quoted span.
    /// Quote characters are kept in the raw text; classification decides
    /// whether they carry meaning.
    fn next_token(&mut self) -> Option<String> {
        self.skip_whitespace();
        self.chars.peek()?;

        let mut raw = String::new();
        let mut in_quotes = false;

        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() && !in_quotes {
                break;
            }
            if ch == '"' {
                in_quotes = !in_quotes;
            }
            raw.push(ch);
            self.chars.next();
        }

        Some(raw)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
    }
}

/// Classifies a raw token as a facet or opaque text.
///
/// A token becomes a facet only when it splits at a colon into a known key
/// and a cleanly bare or cleanly quoted value. Everything else - unknown
/// keys, stray quotes, bare words - stays opaque.
fn classify(raw: String) -> Term {
    if let Some((key, value)) = raw.split_once(':')
        && FACET_KEYS.contains(&key)
        && let Some(value) = unquote(value)
    {
        return Term::facet(key, value);
    }

    Term::Text(raw)
}

/// Strips one pair of surrounding double quotes from a facet value.
///
/// Returns None when quotes are used any other way (unclosed, embedded);
/// such tokens are not treated as facets.
fn unquote(value: &str) -> Option<&str> {
    match value.strip_prefix('"') {
        Some(inner) => {
            let inner = inner.strip_suffix('"')?;
            if inner.contains('"') {
                return None;
            }
            Some(inner)
        }
        None => {
            if value.contains('"') {
                return None;
            }
            Some(value)
        }
    }
}

/// Parses a raw query string into terms.
pub(crate) fn parse_terms(input: &str) -> QueryString {
    Lexer::new(input).parse()
}
