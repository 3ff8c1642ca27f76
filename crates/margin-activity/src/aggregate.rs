//! Aggregation bucket reshaping.
//!
//! The search collaborator's `users` aggregation keys each bucket by raw
//! userid under `user`. The presentation layer wants both the stable
//! `userid` and a display `username`, so the pipeline reshapes those
//! buckets before handing results over.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::userid::username;

/// Reshapes the `users` aggregation for presentation.
///
/// In each `users` bucket, the `user` key is replaced by `userid` (the
/// unchanged identifier) and `username` (its local part). Other bucket
/// fields (counts, ...) and other aggregations pass through untouched. An
/// absent `users` aggregation stays absent - no empty list is synthesized.
pub fn reshape_users(
    mut aggregations: BTreeMap<String, Vec<Value>>,
) -> BTreeMap<String, Vec<Value>> {
    if let Some(buckets) = aggregations.remove("users") {
        let reshaped = buckets.into_iter().map(reshape_bucket).collect();
        aggregations.insert("users".to_string(), reshaped);
    }

    aggregations
}

/// Rewrites one `users` bucket.
///
/// Buckets that are not objects, or that lack a string `user` field, pass
/// through unchanged rather than failing the page.
fn reshape_bucket(bucket: Value) -> Value {
    let Value::Object(mut fields) = bucket else {
        return bucket;
    };

    match fields.remove("user") {
        Some(Value::String(userid)) => {
            fields.insert(
                "username".to_string(),
                Value::String(username(&userid).to_string()),
            );
            fields.insert("userid".to_string(), Value::String(userid));
        }
        Some(other) => {
            fields.insert("user".to_string(), other);
        }
        None => {}
    }

    Value::Object(fields)
}
