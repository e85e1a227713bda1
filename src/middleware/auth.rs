use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use classgrid_auth::{Claims, Role, verify_token};
use classgrid_core::AppError;
use classgrid_models::UserId;

use crate::state::AppState;

/// Extractor that validates the bearer token and provides the caller's claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }

    pub fn role(&self) -> Role {
        self.0.role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Helper macro to create role check extractors.
#[macro_export]
macro_rules! require_role {
    ($name:ident, $role:path) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = classgrid_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                if auth_user.role() != $role {
                    return Err(classgrid_core::AppError::forbidden(format!(
                        "Access denied. Requires the {} role",
                        $role
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireCoordinator, classgrid_auth::Role::Coordinator);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use classgrid_auth::create_access_token;
    use classgrid_config::{CorsConfig, JwtConfig};
    use classgrid_db::MemoryStore;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::new(
            Arc::new(MemoryStore::new()),
            JwtConfig {
                secret: "test-secret".into(),
                access_token_expiry: 3600,
            },
            CorsConfig::default(),
        )
    }

    fn parts_with(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn bearer(state: &AppState, role: Role) -> (UserId, String) {
        let id = UserId::new();
        let token =
            create_access_token(id.into_inner(), "ana@escola.br", role, &state.jwt_config).unwrap();
        (id, format!("Bearer {}", token))
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let state = state();
        let err = AuthUser::from_request_parts(&mut parts_with(None), &state)
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_header_is_unauthorized() {
        let state = state();
        let err = AuthUser::from_request_parts(&mut parts_with(Some("Basic abc")), &state)
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_yields_claims() {
        let state = state();
        let (id, header) = bearer(&state, Role::Teacher);
        let user = AuthUser::from_request_parts(&mut parts_with(Some(&header)), &state)
            .await
            .unwrap();
        assert_eq!(user.user_id().unwrap(), id);
        assert_eq!(user.0.email, "ana@escola.br");
        assert_eq!(user.role(), Role::Teacher);
    }

    #[tokio::test]
    async fn test_require_coordinator() {
        let state = state();

        let (_, teacher) = bearer(&state, Role::Teacher);
        let err = RequireCoordinator::from_request_parts(&mut parts_with(Some(&teacher)), &state)
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);

        let (_, coordinator) = bearer(&state, Role::Coordinator);
        assert!(
            RequireCoordinator::from_request_parts(&mut parts_with(Some(&coordinator)), &state)
                .await
                .is_ok()
        );
    }
}
