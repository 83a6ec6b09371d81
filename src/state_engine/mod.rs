//! StateEngine - Namespace State Management
//!
//! ## Responsibilities
//!
//! - Concurrent per-namespace state storage (SSoT)
//! - Processing pipeline applied to updates before storage
//! - Default state synthesis for namespaces never written
//!
//! A namespace is an opaque string key. It needs no registration: the first
//! successful submit creates its entry, and every later submit replaces that
//! entry wholesale.

mod pipeline;
mod repository;
mod service;
mod types;

pub use pipeline::{ReversePipeline, StatePipeline};
pub use repository::StateRepository;
pub use service::StateEngine;
pub use types::StateRecord;
