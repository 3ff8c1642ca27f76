//! Group collaborators.
//!
//! Groups are owned by an external membership service; this layer reads
//! them and delegates exactly one mutation, the leave action.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A collaboration group, read-only to this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Public identifier, immutable and safe to expose in URLs.
    pub pubid: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Userid of the group's creator.
    pub creator: String,
    /// Userids of the group's members. The creator counts as a member
    /// whether or not listed here.
    pub members: Vec<String>,
    /// Creation time.
    pub created: DateTime<Utc>,
}

impl Group {
    /// Returns true when `userid` is the creator or a listed member.
    pub fn has_member(&self, userid: &str) -> bool {
        self.creator == userid || self.members.iter().any(|m| m == userid)
    }
}

/// The membership service failed while mutating a membership.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("membership service failure: {0}")]
pub struct MembershipError(pub String);

/// Group lookup and membership delegate.
pub trait GroupService {
    /// Resolves a group by its public identifier.
    fn get_by_pubid(&self, pubid: &str) -> Option<Group>;

    /// Removes `userid` from `group`.
    ///
    /// Non-idempotent: the pipeline calls this at most once per request and
    /// never retries. Failure propagates to the caller's error boundary.
    fn member_leave(&self, group: &Group, userid: &str) -> Result<(), MembershipError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Group {
        Group {
            pubid: "abc123".into(),
            name: "Road Map".into(),
            description: "Planning notes".into(),
            creator: "acct:carol@example.com".into(),
            members: vec!["acct:fred@example.com".into()],
            created: DateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn listed_member_is_member() {
        assert!(group().has_member("acct:fred@example.com"));
    }

    #[test]
    fn creator_is_implicit_member() {
        assert!(group().has_member("acct:carol@example.com"));
    }

    #[test]
    fn stranger_is_not_member() {
        assert!(!group().has_member("acct:mallory@example.com"));
    }
}
