use std::collections::BTreeSet;

use crate::role::Role;

/// Picks the role a player displays from the roles they hold.
///
/// Held roles are ordered by ascending priority and the first one carrying a
/// display name wins. The sort is stable, so roles sharing a priority keep the
/// order of `all_roles` (the order the store returned them).
#[must_use]
pub fn resolve_active_display_role<'a>(
    role_ids: &BTreeSet<String>,
    all_roles: &'a [Role],
) -> Option<&'a Role> {
    let mut held: Vec<&Role> = all_roles
        .iter()
        .filter(|role| role_ids.contains(role.id()))
        .collect();
    held.sort_by_key(|role| role.priority());

    held.into_iter().find(|role| role.display_name().is_some())
}
