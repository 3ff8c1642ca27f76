//! Activity page operations.
//!
//! One public method per page action: the global search, the group-scoped
//! search, and the four post/redirect/get transitions (more info, back,
//! leave, facet toggle). Each takes the request context by reference and
//! returns a page value or a redirect; errors are reserved for the feature
//! gate, missing trigger parameters, and collaborator failures.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use margin_query::{QueryString, toggle_facet};

use crate::{
    aggregate::reshape_users,
    backend::{SearchBackend, SearchQuery},
    config::{ActivityConfig, ConfigError},
    context::RequestContext,
    error::ActivityError,
    group::{Group, GroupService},
    page::{PageMeta, paginate},
    routes::Routes,
    userid::username,
};

/// Feature flag gating every activity page action.
pub const SEARCH_PAGE_FLAG: &str = "search_page";

/// Render format for a group's creation date, e.g. `August, 2016`.
const CREATED_FORMAT: &str = "%B, %Y";

/// A see-other redirect to a canonical GET URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Absolute target URL.
    pub location: String,
}

/// Group metadata shown on a member's group search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupInfo {
    /// Public identifier.
    pub pubid: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Creation date rendered as full month name and year.
    pub created: String,
}

/// A rendered search page, ready for the presentation layer.
#[derive(Debug, PartialEq, Serialize)]
pub struct SearchPage {
    /// Render status; always `ok` for a page that reached the view layer.
    pub status: &'static str,
    /// Annotation summaries for the current page.
    pub rows: Vec<Value>,
    /// Aggregations, with `users` buckets reshaped for display.
    pub aggregations: BTreeMap<String, Vec<Value>>,
    /// Total matching annotations.
    pub total: u64,
    /// Pager state.
    pub page_meta: PageMeta,
    /// Group metadata, present only on a member's group-scoped page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupInfo>,
    /// Group edit URL, present only with `admin` permission on the group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_edit_url: Option<String>,
    /// Whether the expanded group info panel is shown.
    pub more_info: bool,
}

/// Outcome of a search operation.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Render the page.
    Page(SearchPage),
    /// Redirect instead (URL canonicalization from the collaborator hook).
    Redirect(Redirect),
}

/// The activity page pipeline.
///
/// Holds the injected collaborators and configuration; all per-request
/// state arrives through [`RequestContext`].
pub struct ActivityService<'a> {
    /// Search collaborator.
    backend: &'a dyn SearchBackend,
    /// Group lookup and membership delegate.
    groups: &'a dyn GroupService,
    /// Route table for redirect targets.
    routes: Routes,
    /// Page size used when the request carries no usable `page_size`.
    default_page_size: usize,
}

impl<'a> ActivityService<'a> {
    /// Creates a service from its collaborators and configuration.
    pub fn new(
        backend: &'a dyn SearchBackend,
        groups: &'a dyn GroupService,
        config: &ActivityConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            backend,
            groups,
            routes: Routes::new(&config.routes.base_url)?,
            default_page_size: config.search.page_size,
        })
    }

    /// The global activity search page.
    pub fn search(&self, ctx: &RequestContext<'_>) -> Result<SearchOutcome, ActivityError> {
        self.require_feature(ctx)?;
        self.run_search(ctx, None)
    }

    /// The group-scoped activity search page.
    ///
    /// Falls back silently to the global search when the group cannot be
    /// resolved or the user is not a member: stale group links degrade to
    /// browsing rather than erroring. Only a member or the creator gets
    /// the scoped search plus group metadata.
    pub fn group_search(
        &self,
        ctx: &RequestContext<'_>,
        pubid: &str,
    ) -> Result<SearchOutcome, ActivityError> {
        self.require_feature(ctx)?;

        let Some(group) = self.groups.get_by_pubid(pubid) else {
            debug!(pubid, "group not found, falling back to global search");
            return self.run_search(ctx, None);
        };

        let Some(user) = ctx.authenticated_user.as_deref() else {
            return self.run_search(ctx, None);
        };

        if !group.has_member(user) {
            debug!(pubid, "user is not a group member, falling back to global search");
            return self.run_search(ctx, None);
        }

        let outcome = self.run_search(ctx, Some(group.pubid.clone()))?;
        let SearchOutcome::Page(mut page) = outcome else {
            return Ok(outcome);
        };

        if ctx.permissions.has_permission("admin", &group) {
            page.group_edit_url = Some(self.routes.group_edit(&group.pubid));
        }
        page.more_info = ctx.params.contains_key("more_info");
        page.group = Some(group_info(group));

        Ok(SearchOutcome::Page(page))
    }

    /// Redirects a POSTed "more info" action to the canonical group search
    /// GET URL, carrying `q` and the `more_info` flag only.
    pub fn group_search_more_info(&self, ctx: &RequestContext<'_>, pubid: &str) -> Redirect {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(q) = ctx.form_field("q") {
            params.push(("q", q));
        }
        params.push(("more_info", ""));

        Redirect {
            location: self.routes.group_search(pubid, &params),
        }
    }

    /// Redirects a POSTed "back" action to the canonical group search GET
    /// URL, carrying `q` only.
    pub fn group_search_back(&self, ctx: &RequestContext<'_>, pubid: &str) -> Redirect {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(q) = ctx.form_field("q") {
            params.push(("q", q));
        }

        Redirect {
            location: self.routes.group_search(pubid, &params),
        }
    }

    /// Leaves the group named by the `group_leave` parameter, then
    /// redirects to the global search page carrying `q` only.
    ///
    /// Unlike the search fallback, a bad pubid here is not-found: the user
    /// asked to mutate a membership that does not exist.
    pub fn group_leave(&self, ctx: &RequestContext<'_>) -> Result<Redirect, ActivityError> {
        self.require_feature(ctx)?;

        let pubid = ctx
            .param("group_leave")
            .ok_or(ActivityError::MissingParameter("group_leave"))?;
        let group = self
            .groups
            .get_by_pubid(pubid)
            .ok_or_else(|| ActivityError::GroupNotFound(pubid.to_string()))?;
        let user = ctx
            .authenticated_user
            .as_deref()
            .ok_or(ActivityError::Unauthenticated)?;

        self.groups.member_leave(&group, user)?;

        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(q) = ctx.form_field("q") {
            params.push(("q", q));
        }

        Ok(Redirect {
            location: self.routes.search(&params),
        })
    }

    /// Toggles the author facet for the userid in the `toggle_user_facet`
    /// parameter and redirects to the group search page with the rewritten
    /// query.
    ///
    /// The facet value is the userid's username part, so the same link
    /// adds `user:fred` when absent and removes it when present. The
    /// rewritten `q` is always carried, even when empty.
    pub fn toggle_user_facet(
        &self,
        ctx: &RequestContext<'_>,
        pubid: &str,
    ) -> Result<Redirect, ActivityError> {
        self.require_feature(ctx)?;

        let userid = ctx
            .param("toggle_user_facet")
            .ok_or(ActivityError::MissingParameter("toggle_user_facet"))?;
        let q = ctx.param("q").unwrap_or("");
        let toggled = toggle_facet(q, "user", username(userid));

        Ok(Redirect {
            location: self.routes.group_search(pubid, &[("q", toggled.as_str())]),
        })
    }

    /// Fails with [`ActivityError::FeatureDisabled`] when the search page
    /// flag is off. Checked before any other work in every operation.
    fn require_feature(&self, ctx: &RequestContext<'_>) -> Result<(), ActivityError> {
        if ctx.features.enabled(SEARCH_PAGE_FLAG) {
            Ok(())
        } else {
            Err(ActivityError::FeatureDisabled)
        }
    }

    /// Builds the structured query for this request.
    fn extract(&self, ctx: &RequestContext<'_>, group_scope: Option<String>) -> SearchQuery {
        SearchQuery {
            terms: QueryString::parse(ctx.param("q").unwrap_or("")),
            page_size: resolve_page_size(ctx.param("page_size"), self.default_page_size),
            group_scope,
        }
    }

    /// Extracts, canonicalizes, executes, paginates, and reshapes.
    fn run_search(
        &self,
        ctx: &RequestContext<'_>,
        group_scope: Option<String>,
    ) -> Result<SearchOutcome, ActivityError> {
        let query = self.extract(ctx, group_scope);

        if let Some(location) = self.backend.check_url(ctx, &query) {
            return Ok(SearchOutcome::Redirect(Redirect { location }));
        }

        let results = self.backend.execute(&query, query.page_size)?;
        let page_meta = paginate(resolve_page(ctx.param("page")), results.total, query.page_size);

        Ok(SearchOutcome::Page(SearchPage {
            status: "ok",
            rows: results.rows,
            aggregations: reshape_users(results.aggregations),
            total: results.total,
            page_meta,
            group: None,
            group_edit_url: None,
            more_info: false,
        }))
    }
}

/// Renders group metadata for the scoped page.
fn group_info(group: Group) -> GroupInfo {
    GroupInfo {
        created: group.created.format(CREATED_FORMAT).to_string(),
        pubid: group.pubid,
        name: group.name,
        description: group.description,
    }
}

/// Resolves the effective page size from the raw parameter.
///
/// Anything that is not a positive integer falls back to the default;
/// a malformed parameter never fails the request.
fn resolve_page_size(raw: Option<&str>, default: usize) -> usize {
    match raw.map(str::parse::<usize>) {
        Some(Ok(size)) if size > 0 => size,
        Some(_) => {
            debug!(raw = raw.unwrap_or(""), "unusable page_size, using default");
            default
        }
        None => default,
    }
}

/// Resolves the requested page number, defaulting to the first page.
fn resolve_page(raw: Option<&str>) -> usize {
    match raw.map(str::parse::<usize>) {
        Some(Ok(page)) if page > 0 => page,
        _ => 1,
    }
}
