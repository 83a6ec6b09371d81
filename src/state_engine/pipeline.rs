//! StatePipeline - Processing Policy
//!
//! Transformation applied to an incoming record before it is committed.
//! Implementations must be pure and deterministic: the HTTP response and the
//! WebSocket broadcast for a write are both derived from the returned value,
//! and the two must be byte-identical.

use super::types::StateRecord;

/// Processing policy applied once per submitted update, before storage
pub trait StatePipeline: Send + Sync {
    /// Transform an incoming record
    ///
    /// The returned namespace field does not matter: the engine overwrites it
    /// with the authoritative key after processing.
    fn process(&self, namespace: &str, record: StateRecord) -> StateRecord;
}

/// Default policy: reverse the character sequence of the content
pub struct ReversePipeline;

impl StatePipeline for ReversePipeline {
    fn process(&self, _namespace: &str, record: StateRecord) -> StateRecord {
        StateRecord {
            content: record.content.chars().rev().collect(),
            namespace: record.namespace,
        }
    }
}
