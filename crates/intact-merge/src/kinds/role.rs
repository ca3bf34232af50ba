use super::KindMerger;
use crate::context::MergeContext;
use crate::error::MergeError;
use crate::listener::FieldChange;
use intact_model::{Graph, Role};

pub(crate) struct RoleMerger;

impl KindMerger for RoleMerger {
    type Record = Role;

    fn reconcile_scalars(
        target: &mut Role,
        source: &Role,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        if ctx.policy().overwrites() && target.name() != source.name() {
            let old = target.name().to_owned();
            target.rename(source.name())?;
            ctx.field_changed(&FieldChange::new("name", old, source.name()));
        }
        Ok(())
    }

    fn reconcile_collections(
        _graph: &mut Graph,
        _source: &Role,
        _ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        Ok(())
    }
}
