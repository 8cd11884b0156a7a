//! Role hierarchy evaluation.
//!
//! Roles form a fixed total order (see [`UserRole::rank`]). "Or higher" means
//! same-or-more privileged, which is a lower-or-equal rank.

use nagari_adapters::UserRole;

/// `true` iff `actual` is at least as privileged as `required`.
pub fn has_role_or_higher(actual: UserRole, required: UserRole) -> bool {
    actual.rank() <= required.rank()
}

pub fn has_role(actual: UserRole, target: UserRole) -> bool {
    actual == target
}

pub fn has_any_role(actual: UserRole, targets: &[UserRole]) -> bool {
    targets.contains(&actual)
}

pub fn is_admin(role: UserRole) -> bool {
    has_any_role(role, &[UserRole::SuperAdmin, UserRole::Admin])
}

pub fn is_moderator(role: UserRole) -> bool {
    has_role_or_higher(role, UserRole::Moderator)
}

pub fn is_staff(role: UserRole) -> bool {
    has_role_or_higher(role, UserRole::Staff)
}

pub fn is_resident(role: UserRole) -> bool {
    has_role(role, UserRole::Resident)
}

pub fn is_business_owner(role: UserRole) -> bool {
    has_role(role, UserRole::BusinessOwner)
}
