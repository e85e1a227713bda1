//! Pieces shared by the subject and room registries.

use classgrid_core::PaginationParams;
use serde::Deserialize;
use utoipa::ToSchema;

/// Comparison key for registry names: trimmed and lowercased.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Query parameters for listing a registry.
#[derive(Debug, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RegistryFilterParams {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl RegistryFilterParams {
    pub fn matches(&self, name: &str) -> bool {
        match self.name.as_deref().map(name_key) {
            Some(needle) if !needle.is_empty() => name_key(name).contains(&needle),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_key() {
        assert_eq!(name_key("  Sala 101 "), "sala 101");
        assert_eq!(name_key("MATEMÁTICA"), name_key("matemática"));
    }

    #[test]
    fn test_filter_matches() {
        let params = RegistryFilterParams {
            name: Some(" lab".into()),
            ..Default::default()
        };
        assert!(params.matches("Laboratório"));
        assert!(!params.matches("Sala 1"));
        assert!(RegistryFilterParams::default().matches("anything"));
    }
}
