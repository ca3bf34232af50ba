//! Per-kind mergers
//!
//! Each kind implements [`KindMerger`]; the shared steps (back-reference,
//! audit, enricher dispatch, default institution) live in
//! [`Merger`](crate::Merger).

mod complex;
mod cv_term;
mod experiment;
mod feature;
mod interaction;
mod interactor;
mod organism;
mod participant;
mod publication;
mod role;
mod source;
mod user;

pub(crate) use complex::ComplexMerger;
pub(crate) use cv_term::CvTermMerger;
pub(crate) use experiment::ExperimentMerger;
pub(crate) use feature::FeatureMerger;
pub(crate) use interaction::InteractionEvidenceMerger;
pub(crate) use interactor::InteractorMerger;
pub(crate) use organism::OrganismMerger;
pub(crate) use participant::ParticipantMerger;
pub(crate) use publication::PublicationMerger;
pub(crate) use role::RoleMerger;
pub(crate) use source::SourceMerger;
pub(crate) use user::UserMerger;

use crate::context::MergeContext;
use crate::error::MergeError;
use intact_model::{EntityId, EntityVariant, Graph};

/// Kind-specific reconciliation steps
pub(crate) trait KindMerger {
    /// Record type handled
    type Record: EntityVariant;

    /// Reconcile the record's own scalar fields
    ///
    /// Skipped when a scalar enricher is registered for the kind.
    fn reconcile_scalars(
        target: &mut Self::Record,
        source: &Self::Record,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError>;

    /// Reconcile every collection of the target, element and handle alike
    fn reconcile_collections(
        graph: &mut Graph,
        source: &Self::Record,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError>;

    /// Slot holding the owning institution, for kinds that have one
    fn institution(_record: &mut Self::Record) -> Option<&mut Option<EntityId>> {
        None
    }
}
