//! StateEngine data types

use serde::{Deserialize, Serialize};

/// State record held per namespace
///
/// The namespace is stored redundantly with the record so it stays
/// self-describing once detached from its map key. For every entry resident
/// in the store, `record.namespace` equals the key it is stored under; the
/// engine enforces this on every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Message content; absent content on inbound payloads is an empty string
    #[serde(default)]
    pub content: String,
    /// Namespace identifier; inbound values are overwritten with the
    /// authoritative path/topic parameter
    #[serde(default)]
    pub namespace: String,
}

impl StateRecord {
    /// Create a new record
    pub fn new(content: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            namespace: namespace.into(),
        }
    }

    /// Synthesized state for a namespace that has never been written
    pub fn default_for(namespace: &str) -> Self {
        Self {
            content: format!("Default state for {}", namespace),
            namespace: namespace.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_for_includes_namespace() {
        let record = StateRecord::default_for("chat");
        assert_eq!(record.content, "Default state for chat");
        assert_eq!(record.namespace, "chat");
    }

    #[test]
    fn test_missing_fields_deserialize_to_empty() {
        let record: StateRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.content, "");
        assert_eq!(record.namespace, "");
    }

    #[test]
    fn test_round_trip() {
        let record = StateRecord::new("hello", "chat");
        let json = serde_json::to_string(&record).unwrap();
        let back: StateRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
