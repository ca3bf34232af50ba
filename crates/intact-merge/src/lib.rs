//! IntAct merge engine
//!
//! Reconciles a freshly supplied source record with its persisted target,
//! kind by kind, under one of three policies.
//!
//! # Core Concepts
//!
//! - [`Merger`]: Entry point; one per policy, built with [`MergerBuilder`]
//! - [`Policy`]: Enrich-Only (fill gaps), Override (source wins), Keep-Target
//! - [`IdentityComparator`]: Value-based "same fact" decision
//! - [`reconcile`]: Two-list collection diff/merge
//! - [`reconcile_audit`]: Creation metadata is never lost
//! - [`MergeListener`]: Observer of every add, remove and field change
//! - [`ScalarEnricher`]: Per-kind replacement of the scalar step
//!
//! # Example
//!
//! ```rust,ignore
//! use intact_merge::{MergeConfig, Merger, RecordingListener};
//! use std::sync::Arc;
//!
//! let config = MergeConfig::from_toml_str(r#"policy = "enrich-only""#)?;
//! let recorder = Arc::new(RecordingListener::new());
//! let merger = Merger::builder()
//!     .config(config)
//!     .listener(recorder.clone())
//!     .build()?;
//!
//! merger.merge_pair(&mut graph, candidate, persisted)?;
//! for event in recorder.take() {
//!     println!("{}", serde_json::to_string(&event)?);
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod audit;
mod backref;
mod collection;
mod config;
mod context;
mod enricher;
mod error;
mod identity;
mod kinds;
mod listener;
mod merger;
mod policy;

// Re-exports
pub use audit::reconcile_audit;
pub use backref::fixup_back_reference;
pub use collection::{reconcile, CollectionDiff};
pub use config::{EnrichmentConfig, MergeConfig};
pub use enricher::{EnrichmentError, ScalarEnricher};
pub use error::{ConfigError, MergeError};
pub use identity::{ByEntityKey, ByValue, IdentityComparator};
pub use listener::{
    ChangeEvent, ElementValue, FieldChange, FieldValue, MergeListener, NoopListener,
    RecordingListener, TracingListener,
};
pub use merger::{Merger, MergerBuilder};
pub use policy::{Policy, UnknownPolicy};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
