use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Role in the fixed access hierarchy.
///
/// Total order: `viewer(1) < user(2) < admin(3)`. The set is closed; a role
/// string outside it never grants anything (see [`at_least`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    User,
    Admin,
}

impl Role {
    /// Rank in the hierarchy. Higher rank dominates lower.
    pub const fn rank(self) -> u8 {
        match self {
            Role::Viewer => 1,
            Role::User => 2,
            Role::Admin => 3,
        }
    }

    /// "At least this role" comparison.
    pub fn satisfies(self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for role strings outside the closed set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(Role::Viewer),
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

/// Rank comparison over raw role strings, failing closed on both sides.
///
/// A user role outside the hierarchy (corrupted data) ranks below every
/// defined role and never passes. A required role outside the hierarchy is
/// unsatisfiable, so the check fails rather than silently granting.
pub fn at_least(user_role: &str, required_role: &str) -> bool {
    let user_rank = user_role.parse::<Role>().map_or(0, Role::rank);

    match required_role.parse::<Role>() {
        Ok(required) => user_rank >= required.rank(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Admin.satisfies(Role::User));
        assert!(Role::Admin.satisfies(Role::Viewer));
        assert!(Role::User.satisfies(Role::Viewer));

        assert!(!Role::User.satisfies(Role::Admin));
        assert!(!Role::Viewer.satisfies(Role::User));
    }

    #[test]
    fn test_role_reflexive() {
        assert!(Role::Viewer.satisfies(Role::Viewer));
        assert!(Role::User.satisfies(Role::User));
        assert!(Role::Admin.satisfies(Role::Admin));
    }

    #[test]
    fn test_at_least_known_roles() {
        assert!(at_least("admin", "user"));
        assert!(!at_least("user", "admin"));
        assert!(at_least("viewer", "viewer"));
    }

    #[test]
    fn test_at_least_unknown_user_role_fails() {
        assert!(!at_least("superadmin", "viewer"));
        assert!(!at_least("", "viewer"));
        // Case-sensitive closed set
        assert!(!at_least("Admin", "viewer"));
    }

    #[test]
    fn test_at_least_unknown_required_role_never_grants() {
        assert!(!at_least("admin", "root"));
        assert!(!at_least("admin", ""));
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        for role in [Role::Viewer, Role::User, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"viewer\"").unwrap(),
            Role::Viewer
        );
    }
}
