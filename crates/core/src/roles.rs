//! Well-known role name constants.
//!
//! The privilege order is total: decideur < editeur < admin, each tier
//! including the read capability of the tiers below it.

/// Full access, including user management.
pub const ROLE_ADMIN: &str = "admin";

/// May create, update, and delete programmes and projets.
pub const ROLE_EDITEUR: &str = "editeur";

/// Read-only access to programmes, projets, and stats.
pub const ROLE_DECIDEUR: &str = "decideur";

/// All valid role names, highest privilege first.
pub const ROLES: [&str; 3] = [ROLE_ADMIN, ROLE_EDITEUR, ROLE_DECIDEUR];

/// Whether `role` is one of the three known role names.
pub fn is_role(role: &str) -> bool {
    ROLES.contains(&role)
}
