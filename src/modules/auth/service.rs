use anyhow::anyhow;
use chrono::Utc;
use classgrid_auth::create_access_token;
use classgrid_config::JwtConfig;
use classgrid_core::{AppError, hash_password, verify_password};
use classgrid_db::collections::USERS;
use classgrid_db::{DocumentStore, Query};
use classgrid_models::{
    Cpf, Email, LoginRequest, LoginResponse, RegisterDto, Role, User, UserId, UserRecord,
};
use tracing::instrument;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Creates a teacher account. Email and CPF must not belong to another user.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn register_user(store: &dyn DocumentStore, dto: RegisterDto) -> Result<User, AppError> {
        let email = Email::new(&dto.email).map_err(AppError::unprocessable)?;
        let cpf = Cpf::new(&dto.cpf).map_err(AppError::unprocessable)?;

        Self::ensure_unique_identity(store, &email, &cpf).await?;

        let now = Utc::now();
        let record = UserRecord {
            user: User {
                id: UserId::new(),
                name: dto.name.trim().to_string(),
                email,
                cpf,
                role: Role::Teacher,
                created_at: now,
                updated_at: now,
            },
            password_hash: hash_password(&dto.password)?,
        };

        USERS.put(store, &record.user.id.key(), &record).await?;
        tracing::info!(user_id = %record.user.id, "Teacher registered");

        Ok(record.user)
    }

    #[instrument(skip(store, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login_user(
        store: &dyn DocumentStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let email = Email::new(&dto.email).map_err(|_| AppError::unauthorized(INVALID_CREDENTIALS))?;

        let record = USERS
            .find_one(store, &Query::new().eq("email", email.as_str()))
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !verify_password(&dto.password, &record.password_hash)? {
            tracing::warn!(user_id = %record.user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let user = record.user;
        let access_token =
            create_access_token(user.id.into_inner(), user.email.as_str(), user.role, jwt_config)?;

        Ok(LoginResponse { access_token, user })
    }

    /// Fails with 409 when the email or CPF is already registered.
    pub async fn ensure_unique_identity(
        store: &dyn DocumentStore,
        email: &Email,
        cpf: &Cpf,
    ) -> Result<(), AppError> {
        if Self::email_taken(store, email, None).await? {
            return Err(AppError::conflict(anyhow!("Email is already registered")));
        }

        let cpf_owner = USERS
            .find_one(store, &Query::new().eq("cpf", cpf.as_str()))
            .await?;
        if cpf_owner.is_some() {
            return Err(AppError::conflict(anyhow!("CPF is already registered")));
        }

        Ok(())
    }

    /// Whether `email` belongs to a user other than `except`.
    pub async fn email_taken(
        store: &dyn DocumentStore,
        email: &Email,
        except: Option<UserId>,
    ) -> Result<bool, AppError> {
        let owner = USERS
            .find_one(store, &Query::new().eq("email", email.as_str()))
            .await?;

        Ok(owner.is_some_and(|record| Some(record.user.id) != except))
    }
}
