//! IntAct record model
//!
//! Curated records of a molecular-interaction database, stored in an
//! id-keyed arena.
//!
//! # Core Concepts
//!
//! - [`Graph`]: Arena of records addressed by [`EntityId`]
//! - [`Entity`]: Closed enum over every record kind ([`EntityKind`])
//! - [`Audit`]: Creation/update metadata carried by every record
//! - [`ValueIdentity`]: Value-based identity of collection elements
//! - [`EntityKey`]: Value-based identity of records
//!
//! # Example
//!
//! ```rust,ignore
//! use intact_model::{Experiment, Graph, Publication};
//!
//! let mut graph = Graph::new();
//! let publication = graph.insert(Publication::new("15199141")?);
//! let experiment = graph.insert(Experiment::new("gavin-2004-1")?);
//! graph.attach(publication, experiment)?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod audit;
mod element;
mod entity;
mod error;
mod graph;
mod id;
mod key;

pub use audit::Audit;
pub use element::{
    Alias, Annotation, Checksum, LifecycleEvent, LifecycleEventKind, Preference, Range,
    ValueIdentity, Xref,
};
pub use entity::{
    Complex, CurationStatus, CvTerm, Entity, EntityVariant, Experiment, Feature,
    InteractionEvidence, Interactor, InteractorFields, Organism, Participant, Publication, Role,
    Source, User,
};
pub use error::ModelError;
pub use graph::Graph;
pub use id::{EntityId, EntityKind};
pub use key::{EntityKey, TermKey};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
