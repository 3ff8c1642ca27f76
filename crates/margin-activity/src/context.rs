//! Request context.
//!
//! An explicit bundle of per-request state passed by reference into every
//! activity operation: request parameters, the POSTed form, feature flags,
//! the authenticated user, and the permission predicate. Operations have no
//! other channel to request state, so their inputs are exactly what their
//! signatures say.

use std::collections::{HashMap, HashSet};

use crate::group::Group;

/// Request parameters as a name to value map.
///
/// Repeated parameters are not meaningful to any activity operation, so the
/// last value wins and a flat map suffices.
pub type Params = HashMap<String, String>;

/// Feature flags in effect for a request.
#[derive(Debug, Clone, Default)]
pub struct FeatureFlags(HashSet<String>);

impl FeatureFlags {
    /// Creates an empty flag set (every feature off).
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns a flag on, builder style.
    pub fn with_enabled(mut self, name: impl Into<String>) -> Self {
        self.0.insert(name.into());
        self
    }

    /// Turns a flag off, builder style.
    pub fn with_disabled(mut self, name: &str) -> Self {
        self.0.remove(name);
        self
    }

    /// Returns true when the named flag is on.
    pub fn enabled(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

/// Permission predicate evaluated against an external policy.
///
/// The policy itself (roles, ACLs) is out of scope; the pipeline only asks
/// yes-or-no questions about the current user.
pub trait PermissionCheck {
    /// Returns true when the current user may perform `action` on `group`.
    fn has_permission(&self, action: &str, group: &Group) -> bool;
}

/// Denies every permission. The right default for anonymous requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl PermissionCheck for DenyAll {
    fn has_permission(&self, _action: &str, _group: &Group) -> bool {
        false
    }
}

/// Per-request state for activity operations.
///
/// Constructed by the caller's routing layer at the start of a request and
/// discarded at its end.
pub struct RequestContext<'a> {
    /// Query string and matched path parameters, combined.
    pub params: Params,

    /// POSTed form fields, kept separate from `params` so redirect
    /// transitions can carry forward `q` and nothing else.
    pub form: Params,

    /// Feature flags in effect.
    pub features: FeatureFlags,

    /// The authenticated user's userid, if any.
    pub authenticated_user: Option<String>,

    /// Permission predicate for the current user.
    pub permissions: &'a dyn PermissionCheck,
}

impl<'a> RequestContext<'a> {
    /// Creates a context with no parameters, no form, no flags, and no
    /// authenticated user.
    pub fn new(permissions: &'a dyn PermissionCheck) -> Self {
        Self {
            params: Params::new(),
            form: Params::new(),
            features: FeatureFlags::new(),
            authenticated_user: None,
            permissions,
        }
    }

    /// Looks up a request parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Looks up a POSTed form field.
    pub fn form_field(&self, name: &str) -> Option<&str> {
        self.form.get(name).map(String::as_str)
    }
}
