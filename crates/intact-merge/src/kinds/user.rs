use super::KindMerger;
use crate::context::{MergeContext, Ownership};
use crate::error::MergeError;
use crate::listener::{ElementValue, FieldChange};
use crate::policy::Policy;
use intact_model::{Graph, Preference, User, ValueIdentity};

pub(crate) struct UserMerger;

impl KindMerger for UserMerger {
    type Record = User;

    fn reconcile_scalars(
        target: &mut User,
        source: &User,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        ctx.required("login", &mut target.login, &source.login);
        ctx.optional("first_name", &mut target.first_name, &source.first_name);
        ctx.optional("last_name", &mut target.last_name, &source.last_name);
        ctx.optional("email", &mut target.email, &source.email);
        ctx.required("disabled", &mut target.disabled, &source.disabled);
        ctx.optional("last_login", &mut target.last_login, &source.last_login);
        Ok(())
    }

    fn reconcile_collections(
        graph: &mut Graph,
        source: &User,
        ctx: &MergeContext<'_>,
    ) -> Result<(), MergeError> {
        let target = graph.record_mut::<User>(ctx.target())?;
        reconcile_preferences(&mut target.preferences, &source.preferences, ctx);
        ctx.members::<User>(graph, "roles", |u| &mut u.roles, &source.roles, Ownership::Shared)?;
        Ok(())
    }
}

/// Preferences match by key; a matched key whose value differs is a field
/// change, not an add/remove pair
fn reconcile_preferences(
    target: &mut Vec<Preference>,
    source: &[Preference],
    ctx: &MergeContext<'_>,
) {
    ctx.elements("preferences", target, source);

    for incoming in source {
        let Some(current) = target.iter_mut().find(|p| p.same_value(incoming)) else {
            continue;
        };
        let replace = match ctx.policy() {
            Policy::Override => current.value != incoming.value,
            Policy::EnrichOnly => current.value.is_none() && incoming.value.is_some(),
            Policy::KeepTarget => false,
        };
        if replace {
            let old = current.clone();
            current.value.clone_from(&incoming.value);
            ctx.field_changed(&FieldChange::new(
                "preferences",
                ElementValue::Preference(old),
                ElementValue::Preference(current.clone()),
            ));
        }
    }
}
