//! API-side authorization guard for facade actions.
//!
//! Authorization is enforced at the action boundary (before the store is
//! touched), keeping the catalog and infra crates auth-agnostic.

use materials_auth::{ActionAuthorization, AuthzError, Permission, Principal, RolePolicy, authorize};

use crate::context::PrincipalContext;

pub const MATERIALS_READ: &str = "materials.read";
pub const MATERIALS_WRITE: &str = "materials.write";
pub const PARTIES_READ: &str = "parties.read";

/// Built-in role mapping: `admin` gets everything, `user` may read and
/// write materials and read suppliers.
pub fn default_policy() -> RolePolicy {
    RolePolicy::new()
        .grant("admin", [Permission::new(Permission::WILDCARD)])
        .grant(
            "user",
            [
                Permission::new(MATERIALS_READ),
                Permission::new(MATERIALS_WRITE),
                Permission::new(PARTIES_READ),
            ],
        )
}

/// Check every permission `action` requires for the current caller.
pub fn authorize_action<A: ActionAuthorization>(
    policy: &RolePolicy,
    principal: &PrincipalContext,
    action: &A,
) -> Result<(), AuthzError> {
    let principal = Principal {
        principal_id: principal.principal_id(),
        roles: principal.roles().to_vec(),
        permissions: policy.permissions_for(principal.roles()),
    };

    for perm in action.required_permissions() {
        authorize(&principal, perm)?;
    }

    Ok(())
}
