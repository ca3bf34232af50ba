//! IntAct synchronization layer
//!
//! Builds merge pairs: for each candidate record, find its persisted
//! counterpart and merge into it, or keep the candidate as a new record.
//!
//! # Core Concepts
//!
//! - [`RecordLocator`]: Contract for finding a candidate's persisted counterpart
//! - [`KeyIndexLocator`]: In-memory locator keyed by record identity
//! - [`Synchronizer`]: Locate-then-merge driver
//!
//! # Example
//!
//! ```rust,ignore
//! use intact_merge::{Merger, Policy};
//! use intact_sync::{KeyIndexLocator, Synchronizer};
//!
//! let locator = KeyIndexLocator::from_graph(&graph);
//! let synchronizer = Synchronizer::new(Merger::with_policy(Policy::EnrichOnly), locator);
//! for outcome in synchronizer.synchronize_all(&mut graph, candidates)? {
//!     save(&graph, outcome.record())?;
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod locator;
mod synchronizer;

pub use error::{LookupError, SyncError};
pub use locator::{KeyIndexLocator, RecordLocator};
pub use synchronizer::{SyncOutcome, Synchronizer};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
