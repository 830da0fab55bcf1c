//! Well-known role name constants.
//!
//! These must match the CHECK constraint in `20260301000001_create_users.sql`.
//! Roles are flat: `admin` does not imply `moderator` anywhere except where a
//! permission check enumerates both explicitly.

pub const ROLE_USER: &str = "user";
pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_ADMIN: &str = "admin";

/// All assignable role names, used to validate role updates.
pub const ALL_ROLES: &[&str] = &[ROLE_USER, ROLE_MODERATOR, ROLE_ADMIN];
