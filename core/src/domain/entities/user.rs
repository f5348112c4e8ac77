//! User entity representing a registered account in the SkillUp system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use su_shared::utils::phone::last_four_digits;

/// Role assigned to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Platform operator, exempt from permission checks
    SuperAdmin,
    /// School administrator
    Admin,
    /// Course teacher
    Teacher,
    /// Learner account, the default for self-registration
    Student,
}

impl UserRole {
    /// Database/string representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "super_admin",
            UserRole::Admin => "admin",
            UserRole::Teacher => "teacher",
            UserRole::Student => "student",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(UserRole::SuperAdmin),
            "admin" => Ok(UserRole::Admin),
            "teacher" => Ok(UserRole::Teacher),
            "student" => Ok(UserRole::Student),
            _ => Err(format!("Unknown user role: {}", s)),
        }
    }
}

/// Lifecycle status of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Account may log in
    Active,
    /// Administrative flag, does not block login
    Inactive,
    /// Account is rejected at login and token verification
    Suspended,
    /// Soft-deleted, treated everywhere as nonexistent
    Deleted,
}

impl UserStatus {
    /// Database/string representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Suspended => "suspended",
            UserStatus::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            "deleted" => Ok(UserStatus::Deleted),
            _ => Err(format!("Unknown user status: {}", s)),
        }
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database-assigned identifier
    pub id: i64,

    /// Unique phone number used as the login identifier
    pub phone: String,

    /// Bcrypt hash of the password; None for SMS-only accounts
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// Display name
    pub name: String,

    /// Role assigned to the account
    pub role: UserRole,

    /// Lifecycle status
    pub status: UserStatus,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Checks if the account may authenticate at all
    pub fn is_suspended(&self) -> bool {
        matches!(self.status, UserStatus::Suspended)
    }

    /// Checks if the account has a password credential
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Data for inserting a new user; the id and timestamps are assigned by
/// the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub phone: String,
    pub password_hash: Option<String>,
    pub name: String,
    pub role: UserRole,
    pub status: UserStatus,
}

impl NewUser {
    /// Account auto-provisioned on first SMS login: an active student with
    /// no password and a display name derived from the phone number.
    pub fn provisioned_student(phone: impl Into<String>) -> Self {
        let phone = phone.into();
        let name = format!("User{}", last_four_digits(&phone));
        Self {
            phone,
            password_hash: None,
            name,
            role: UserRole::Student,
            status: UserStatus::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(status: UserStatus) -> User {
        let now = Utc::now();
        User {
            id: 7,
            phone: "13812345678".to_string(),
            password_hash: Some("$2b$12$abcdefghijklmnopqrstuv".to_string()),
            name: "Zhang Wei".to_string(),
            role: UserRole::Student,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_role_round_trip() {
        for role in [
            UserRole::SuperAdmin,
            UserRole::Admin,
            UserRole::Teacher,
            UserRole::Student,
        ] {
            let parsed: UserRole = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("principal".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&UserRole::SuperAdmin).unwrap();
        assert_eq!(json, "\"super_admin\"");
        let json = serde_json::to_string(&UserRole::Student).unwrap();
        assert_eq!(json, "\"student\"");
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            UserStatus::Active,
            UserStatus::Inactive,
            UserStatus::Suspended,
            UserStatus::Deleted,
        ] {
            let parsed: UserStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_suspension_check() {
        assert!(sample_user(UserStatus::Suspended).is_suspended());
        assert!(!sample_user(UserStatus::Active).is_suspended());
        assert!(!sample_user(UserStatus::Inactive).is_suspended());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = sample_user(UserStatus::Active);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["phone"], "13812345678");
    }

    #[test]
    fn test_provisioned_student_defaults() {
        let new_user = NewUser::provisioned_student("13812345678");
        assert_eq!(new_user.name, "User5678");
        assert_eq!(new_user.role, UserRole::Student);
        assert_eq!(new_user.status, UserStatus::Active);
        assert!(new_user.password_hash.is_none());
    }
}
