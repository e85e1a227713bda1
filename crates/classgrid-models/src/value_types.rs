//! Strongly-typed value types with validation for domain primitives.
//!
//! [`Email`] and [`Cpf`] can only be constructed from valid input, and both
//! validate again on deserialization, so a record loaded from the store or a
//! request body never carries a malformed value.
//!
//! # Example
//!
//! ```ignore
//! use classgrid_models::value_types::{Cpf, Email};
//!
//! let email: Email = "ana@escola.br".parse().unwrap();
//! let cpf: Cpf = "529.982.247-25".parse().unwrap();
//!
//! assert_eq!(cpf.as_str(), "52998224725");
//! assert_eq!(cpf.to_string(), "529.982.247-25");
//! ```

use classgrid_core::cpf;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::ValidateEmail;

/// Error type for value type parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTypeError {
    /// The email address is invalid.
    InvalidEmail(String),
    /// The CPF is malformed or fails its checksum.
    InvalidCpf(String),
}

impl std::error::Error for ValueTypeError {}

impl fmt::Display for ValueTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {}", msg),
            Self::InvalidCpf(msg) => write!(f, "Invalid CPF: {}", msg),
        }
    }
}

// ============================================================================
// Email
// ============================================================================

/// A validated email address, stored lowercased and trimmed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[schema(value_type = String, format = "email", example = "ana@escola.br")]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> Result<Self, ValueTypeError> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(ValueTypeError::InvalidEmail("email cannot be empty".into()));
        }

        if !is_email(&email) {
            return Err(ValueTypeError::InvalidEmail(format!(
                "'{}' is not a valid email address",
                email
            )));
        }

        Ok(Self(email))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_email(candidate: &str) -> bool {
    candidate.validate_email()
}

impl fmt::Debug for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Email({})", self.0)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Email {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Email {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Cpf
// ============================================================================

/// A valid CPF, held in canonical (digits only) form.
///
/// Serializes as the 11 canonical digits; [`Display`](fmt::Display) renders
/// the `DDD.DDD.DDD-DD` form.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[schema(value_type = String, example = "52998224725")]
pub struct Cpf(String);

impl Cpf {
    /// Accepts punctuated or bare input; rejects anything [`cpf::is_valid`] rejects.
    pub fn new(input: impl AsRef<str>) -> Result<Self, ValueTypeError> {
        let input = input.as_ref().trim();

        if !cpf::is_well_formed(input) {
            return Err(ValueTypeError::InvalidCpf(
                "must contain exactly 11 digits".into(),
            ));
        }

        if !cpf::is_valid(input) {
            return Err(ValueTypeError::InvalidCpf(
                "not a valid CPF number".into(),
            ));
        }

        Ok(Self(cpf::canonicalize(input)))
    }

    /// The canonical 11 digits.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `DDD.DDD.DDD-DD` display form.
    pub fn formatted(&self) -> String {
        cpf::display(&self.0)
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cpf({})", self.formatted())
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Cpf {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Cpf {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Cpf {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod email_tests {
        use super::*;

        #[test]
        fn test_valid_email() {
            assert!(Email::new("ana@escola.br").is_ok());
            assert!(Email::new("coord.silva@escola.edu.br").is_ok());
        }

        #[test]
        fn test_invalid_email() {
            assert!(Email::new("").is_err());
            assert!(Email::new("   ").is_err());
            assert!(Email::new("not-an-email").is_err());
            assert!(Email::new("@escola.br").is_err());
        }

        #[test]
        fn test_email_is_normalized() {
            let email = Email::new("  Ana@Escola.BR ").unwrap();
            assert_eq!(email.as_str(), "ana@escola.br");
        }

        #[test]
        fn test_email_deserialize_invalid() {
            let result: Result<Email, _> = serde_json::from_str(r#""not-an-email""#);
            assert!(result.is_err());
        }
    }

    mod cpf_tests {
        use super::*;

        #[test]
        fn test_cpf_stores_canonical_form() {
            let cpf = Cpf::new("529.982.247-25").unwrap();
            assert_eq!(cpf.as_str(), "52998224725");
            assert_eq!(cpf.formatted(), "529.982.247-25");
            assert_eq!(cpf.to_string(), "529.982.247-25");
        }

        #[test]
        fn test_cpf_trims_whitespace() {
            assert!(Cpf::new(" 52998224725 ").is_ok());
        }

        #[test]
        fn test_cpf_rejects_malformed() {
            let err = Cpf::new("5299822472a").unwrap_err();
            assert_eq!(
                err,
                ValueTypeError::InvalidCpf("must contain exactly 11 digits".into())
            );
        }

        #[test]
        fn test_cpf_rejects_bad_checksum() {
            let err = Cpf::new("52998224724").unwrap_err();
            assert_eq!(
                err,
                ValueTypeError::InvalidCpf("not a valid CPF number".into())
            );
            assert!(Cpf::new("000.000.000-00").is_err());
        }

        #[test]
        fn test_cpf_serialize_canonical() {
            let cpf: Cpf = "390.533.447-05".parse().unwrap();
            assert_eq!(serde_json::to_string(&cpf).unwrap(), r#""39053344705""#);
        }

        #[test]
        fn test_cpf_deserialize_validates() {
            let cpf: Cpf = serde_json::from_str(r#""529.982.247-25""#).unwrap();
            assert_eq!(cpf.as_str(), "52998224725");
            assert!(serde_json::from_str::<Cpf>(r#""11111111111""#).is_err());
        }

        #[test]
        fn test_cpf_debug() {
            let cpf = Cpf::new("52998224725").unwrap();
            assert_eq!(format!("{:?}", cpf), "Cpf(529.982.247-25)");
        }
    }
}
