//! JWT claims and user roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// The two kinds of account.
///
/// Teachers manage their own weekly schedule. Coordinators additionally
/// maintain the subject and room registries and can see every schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Coordinator,
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coordinator => "coordinator",
            Self::Teacher => "teacher",
        }
    }

    pub fn is_coordinator(&self) -> bool {
        matches!(self, Self::Coordinator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coordinator" => Ok(Self::Coordinator),
            "teacher" => Ok(Self::Teacher),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// JWT claims for access tokens.
///
/// - `sub`: User ID (subject)
/// - `email`: User's email address
/// - `role`: Account role
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Account role
    pub role: Role,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialize() {
        assert_eq!(
            serde_json::to_string(&Role::Coordinator).unwrap(),
            r#""coordinator""#
        );
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), r#""teacher""#);
    }

    #[test]
    fn test_role_deserialize_rejects_unknown() {
        assert!(serde_json::from_str::<Role>(r#""admin""#).is_err());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("Coordinator".parse::<Role>(), Ok(Role::Coordinator));
        assert_eq!(" teacher ".parse::<Role>(), Ok(Role::Teacher));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_claims_roundtrip_fields() {
        let json = r#"{"sub":"user-1","email":"ana@escola.br","role":"teacher","exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, Role::Teacher);
        assert!(!claims.role.is_coordinator());
    }
}
