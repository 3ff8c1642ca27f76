//! Account identifier helpers.
//!
//! Userids have the form `acct:<username>@<authority>`. Display code wants
//! the bare username; the full userid stays the stable key.

/// Extracts the username (local part) from an `acct:name@domain` userid.
///
/// A malformed identifier degrades to the full input string; a display
/// lookup never fails a request over a bad userid.
pub fn username(userid: &str) -> &str {
    let local = userid.strip_prefix("acct:").unwrap_or(userid);
    match local.split_once('@') {
        Some((name, _)) => name,
        None => local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_local_part() {
        assert_eq!(username("acct:fred@example.com"), "fred");
    }

    #[test]
    fn missing_prefix_degrades() {
        assert_eq!(username("fred@example.com"), "fred");
    }

    #[test]
    fn missing_domain_degrades() {
        assert_eq!(username("acct:fred"), "fred");
    }

    #[test]
    fn opaque_string_passes_through() {
        assert_eq!(username("fred"), "fred");
    }

    #[test]
    fn empty_string_passes_through() {
        assert_eq!(username(""), "");
    }
}
