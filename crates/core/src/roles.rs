//! Well-known role name constants.
//!
//! These must match the `ck_profiles_role` check constraint in
//! `20260301000003_create_identities_and_profiles.sql`.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_EMPLOYEE: &str = "employee";
pub const ROLE_DRIVER: &str = "driver";

/// Every role a profile may carry.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MANAGER, ROLE_EMPLOYEE, ROLE_DRIVER];

/// Validate that `role` is one of [`VALID_ROLES`].
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {VALID_ROLES:?}"
        )))
    }
}

/// Whether the role may administer users and devices of a showroom.
pub fn can_manage_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_MANAGER
}
