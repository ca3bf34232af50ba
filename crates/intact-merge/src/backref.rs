//! Back-reference fixup
//!
//! Runs first in every merge of a child kind (experiment, interaction
//! evidence, participant, feature). The target's owning-parent handle is set
//! to the source's under every mutating policy; later steps never touch it.

use crate::listener::FieldChange;
use intact_model::Entity;

/// Point `target`'s parent slot at `source`'s parent
///
/// Returns the change when the handle moved, `None` for kinds without a
/// parent slot or when both already agree.
pub fn fixup_back_reference(target: &mut Entity, source: &Entity) -> Option<FieldChange> {
    let field = target.kind().parent_field()?;
    let previous = target.parent();
    let parent = source.parent();
    if previous == parent {
        return None;
    }
    target.set_parent(parent);
    Some(FieldChange::new(field, previous, parent))
}
