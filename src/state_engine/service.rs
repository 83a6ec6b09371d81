//! StateEngine service
//!
//! Orchestrates the processing pipeline and the namespace store. The engine
//! holds no state of its own between calls; everything durable lives in the
//! repository.

use super::pipeline::{ReversePipeline, StatePipeline};
use super::repository::StateRepository;
use super::types::StateRecord;
use std::sync::Arc;

/// Namespace state engine
pub struct StateEngine {
    repository: StateRepository,
    pipeline: Arc<dyn StatePipeline>,
}

impl StateEngine {
    /// Create an engine with the default reverse pipeline
    pub fn new(repository: StateRepository) -> Self {
        Self::with_pipeline(repository, Arc::new(ReversePipeline))
    }

    /// Create an engine with a custom processing pipeline
    pub fn with_pipeline(repository: StateRepository, pipeline: Arc<dyn StatePipeline>) -> Self {
        Self {
            repository,
            pipeline,
        }
    }

    /// Current state for a namespace
    ///
    /// A namespace that has never been written yields a synthesized default,
    /// generated fresh on every call and never stored.
    pub async fn get_state(&self, namespace: &str) -> StateRecord {
        self.repository
            .get_or_default(namespace, StateRecord::default_for(namespace))
            .await
    }

    /// Process and commit a state update, returning the processed record
    ///
    /// The path/topic namespace is authoritative: whatever namespace the
    /// payload carried is overwritten before the commit. The returned record
    /// is the single source of truth for this write; the caller hands it to
    /// the RealtimeHub verbatim.
    pub async fn submit_state(&self, namespace: &str, input: StateRecord) -> StateRecord {
        let mut processed = self.pipeline.process(namespace, input);
        processed.namespace = namespace.to_string();

        self.repository.put(namespace, processed.clone()).await;

        tracing::debug!(namespace = %namespace, "State committed");

        processed
    }
}
