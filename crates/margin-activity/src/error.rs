//! Error types for the activity pipeline.

use thiserror::Error;

use crate::{backend::BackendError, group::MembershipError};

/// Errors surfaced by activity page operations.
///
/// The not-found family exists for the feature gate and bad control
/// parameters only. Degradable conditions - an unknown `page_size`, a stale
/// group link, a non-member viewing a group page - never reach this type;
/// they fall back silently inside the pipeline.
#[derive(Debug, Error)]
pub enum ActivityError {
    /// The search page feature flag is off. Renders as not-found.
    #[error("the search page is not enabled")]
    FeatureDisabled,

    /// A leave action named a group that does not exist. Renders as
    /// not-found.
    #[error("no group with pubid {0:?}")]
    GroupNotFound(String),

    /// A control action arrived without its triggering parameter. Renders
    /// as not-found.
    #[error("missing request parameter {0:?}")]
    MissingParameter(&'static str),

    /// A leave action arrived without an authenticated user. Renders as
    /// not-found; the membership service is never called with an empty
    /// identity.
    #[error("not authenticated")]
    Unauthenticated,

    /// The search collaborator failed. Propagated untranslated to the
    /// caller's error boundary.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The membership service failed. Propagated untranslated to the
    /// caller's error boundary.
    #[error(transparent)]
    Membership(#[from] MembershipError),
}

impl ActivityError {
    /// Returns true when the error renders as a not-found response rather
    /// than a server error.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FeatureDisabled
                | Self::GroupNotFound(_)
                | Self::MissingParameter(_)
                | Self::Unauthenticated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_and_parameter_errors_are_not_found() {
        assert!(ActivityError::FeatureDisabled.is_not_found());
        assert!(ActivityError::GroupNotFound("abc123".into()).is_not_found());
        assert!(ActivityError::MissingParameter("group_leave").is_not_found());
        assert!(ActivityError::Unauthenticated.is_not_found());
    }

    #[test]
    fn collaborator_errors_are_not_not_found() {
        let backend = ActivityError::from(BackendError("backend unavailable".into()));
        assert!(!backend.is_not_found());

        let membership = ActivityError::from(MembershipError("constraint violation".into()));
        assert!(!membership.is_not_found());
    }

    #[test]
    fn collaborator_errors_keep_their_message() {
        let err = ActivityError::from(BackendError("backend unavailable".into()));
        assert_eq!(err.to_string(), "search backend failure: backend unavailable");
    }
}
