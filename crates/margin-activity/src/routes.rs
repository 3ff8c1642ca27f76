//! Redirect target construction.
//!
//! Builds the canonical GET URLs that post/redirect/get transitions land
//! on. Callers pass exactly the parameters a transition is defined to
//! carry; nothing else can leak into the result, so control parameters
//! like `group_leave` or `toggle_user_facet` never appear in a built URL.

use url::Url;

use crate::config::ConfigError;

/// Route table for the activity pages.
///
/// Routes are fixed shapes under a configured absolute base URL:
/// `/search`, `/groups/{pubid}/search`, and `/groups/{pubid}/edit`.
#[derive(Debug, Clone)]
pub struct Routes {
    /// Base URL all routes are resolved against.
    base: Url,
}

impl Routes {
    /// Creates a route table from an absolute base URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base = Url::parse(base_url).map_err(|e| ConfigError::BaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        if base.cannot_be_a_base() {
            return Err(ConfigError::BaseUrl {
                url: base_url.to_string(),
                message: "not a base URL".to_string(),
            });
        }

        Ok(Self { base })
    }

    /// URL of the global search page.
    pub fn search(&self, params: &[(&str, &str)]) -> String {
        self.build(&["search"], params)
    }

    /// URL of a group's search page.
    pub fn group_search(&self, pubid: &str, params: &[(&str, &str)]) -> String {
        self.build(&["groups", pubid, "search"], params)
    }

    /// URL of a group's edit page.
    pub fn group_edit(&self, pubid: &str) -> String {
        self.build(&["groups", pubid, "edit"], &[])
    }

    /// Resolves path segments against the base and appends query pairs.
    ///
    /// Pairs are form-urlencoded (spaces as `+`), in the order given. An
    /// empty pair list produces a URL with no `?`.
    fn build(&self, segments: &[&str], params: &[(&str, &str)]) -> String {
        let mut url = self.base.clone();

        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        url.to_string()
    }
}
