use anyhow::anyhow;
use chrono::Utc;
use classgrid_core::{AppError, Paginated, hash_password, verify_password};
use classgrid_db::DocumentStore;
use classgrid_db::collections::USERS;
use classgrid_models::{
    ChangeEmailDto, ChangePasswordDto, Email, PaginatedUsersResponse, UpdateProfileDto, User,
    UserFilterParams, UserId, UserRecord,
};
use tracing::instrument;

use crate::modules::auth::service::AuthService;

pub struct UserService;

impl UserService {
    async fn load(store: &dyn DocumentStore, id: UserId) -> Result<UserRecord, AppError> {
        USERS
            .get(store, &id.key())
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(store))]
    pub async fn get_user(store: &dyn DocumentStore, id: UserId) -> Result<User, AppError> {
        Ok(Self::load(store, id).await?.user)
    }

    #[instrument(skip(store))]
    pub async fn get_users(
        store: &dyn DocumentStore,
        filters: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let mut users: Vec<User> = USERS
            .all(store)
            .await?
            .into_iter()
            .map(User::from)
            .filter(|user| filters.matches(user))
            .collect();
        users.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        Ok(Paginated::from_vec(users, &filters.pagination).into())
    }

    #[instrument(skip(store))]
    pub async fn update_profile(
        store: &dyn DocumentStore,
        id: UserId,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        let mut record = Self::load(store, id).await?;

        if let Some(name) = dto.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::unprocessable(anyhow!("name cannot be blank")));
            }
            record.user.name = name.to_string();
        }
        record.user.updated_at = Utc::now();

        USERS.put(store, &id.key(), &record).await?;
        Ok(record.user)
    }

    #[instrument(skip(store, dto))]
    pub async fn change_password(
        store: &dyn DocumentStore,
        id: UserId,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        let mut record = Self::load(store, id).await?;

        if !verify_password(&dto.current_password, &record.password_hash)? {
            return Err(AppError::bad_request(anyhow!("Current password is incorrect")));
        }
        if dto.current_password == dto.new_password {
            return Err(AppError::bad_request(anyhow!(
                "New password must be different from the current password"
            )));
        }

        record.password_hash = hash_password(&dto.new_password)?;
        record.user.updated_at = Utc::now();
        USERS.put(store, &id.key(), &record).await?;

        tracing::info!(user_id = %id, "Password changed");
        Ok(())
    }

    #[instrument(skip(store, dto))]
    pub async fn change_email(
        store: &dyn DocumentStore,
        id: UserId,
        dto: ChangeEmailDto,
    ) -> Result<User, AppError> {
        let mut record = Self::load(store, id).await?;

        if !verify_password(&dto.password, &record.password_hash)? {
            return Err(AppError::bad_request(anyhow!("Password is incorrect")));
        }

        let email = Email::new(&dto.new_email).map_err(AppError::unprocessable)?;
        if AuthService::email_taken(store, &email, Some(id)).await? {
            return Err(AppError::conflict(anyhow!("Email is already registered")));
        }

        record.user.email = email;
        record.user.updated_at = Utc::now();
        USERS.put(store, &id.key(), &record).await?;

        Ok(record.user)
    }
}
