//! [`Model`] support for plain JSON records.
//!
//! A `serde_json::Value` object behaves like a record with optional `id` and
//! `cid` keys. Merging copies every field of the incoming object over the
//! stored one. Records have no natural ordering, so sorting a collection of
//! records needs an explicit comparator.

use serde_json::Value;

use crate::model::{Identity, Model};

fn key(value: &Value, field: &str) -> Option<Identity> {
    match value.get(field)? {
        Value::Number(n) => n.as_i64().map(Identity::Int),
        Value::String(s) => Some(Identity::Str(s.clone())),
        _ => None,
    }
}

impl Model for Value {
    fn identity(&self) -> Option<Identity> {
        key(self, "id")
    }

    fn client_identity(&self) -> Option<Identity> {
        key(self, "cid")
    }

    fn merge(&mut self, other: &Self) -> bool {
        match (self.as_object_mut(), other.as_object()) {
            (Some(target), Some(source)) => {
                for (field, value) in source {
                    target.insert(field.clone(), value.clone());
                }
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_keys() {
        let record = json!({"id": 3, "cid": "c3", "name": "pg"});
        assert_eq!(record.identity(), Some(Identity::Int(3)));
        assert_eq!(record.client_identity(), Some(Identity::from("c3")));

        let keyless = json!({"name": "anonymous"});
        assert_eq!(keyless.identity(), None);
        assert_eq!(json!("pg").identity(), None);
        assert_eq!(json!({"id": true}).identity(), None);
    }

    #[test]
    fn test_record_merge() {
        let mut record = json!({"id": 3, "name": "pg", "age": 30});
        assert!(record.merge(&json!({"id": 3, "name": "Pierre-Guillaume"})));
        assert_eq!(record, json!({"id": 3, "name": "Pierre-Guillaume", "age": 30}));

        let mut scalar = json!(3);
        assert!(!scalar.merge(&json!(4)));
        assert_eq!(scalar, json!(3));
    }
}
