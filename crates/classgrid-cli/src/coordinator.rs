use chrono::Utc;
use classgrid_core::hash_password;
use classgrid_db::collections::USERS;
use classgrid_db::{DocumentStore, Query};
use classgrid_models::{Cpf, Email, Role, User, UserId, UserRecord};

use crate::CliResult;

/// Creates a coordinator account.
///
/// Coordinators cannot be registered through the API. Email and CPF must not
/// belong to another user.
pub async fn create_coordinator(
    store: &dyn DocumentStore,
    name: &str,
    email: &str,
    cpf: &str,
    password: &str,
) -> CliResult<User> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name cannot be blank".into());
    }
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".into());
    }

    let email = Email::new(email)?;
    let cpf = Cpf::new(cpf)?;

    if USERS
        .find_one(store, &Query::new().eq("email", email.as_str()))
        .await?
        .is_some()
    {
        return Err("User with this email already exists".into());
    }
    if USERS
        .find_one(store, &Query::new().eq("cpf", cpf.as_str()))
        .await?
        .is_some()
    {
        return Err("User with this CPF already exists".into());
    }

    let password_hash =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let now = Utc::now();
    let record = UserRecord {
        user: User {
            id: UserId::new(),
            name: name.to_string(),
            email,
            cpf,
            role: Role::Coordinator,
            created_at: now,
            updated_at: now,
        },
        password_hash,
    };
    USERS.put(store, &record.user.id.key(), &record).await?;

    Ok(record.user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use classgrid_db::MemoryStore;

    #[tokio::test]
    async fn test_create_coordinator() {
        let store = MemoryStore::new();
        let user = create_coordinator(
            &store,
            "Coordenação",
            "coord@escola.br",
            "529.982.247-25",
            "password123",
        )
        .await
        .unwrap();

        assert_eq!(user.role, Role::Coordinator);
        assert_eq!(user.cpf.as_str(), "52998224725");
    }

    #[tokio::test]
    async fn test_create_coordinator_rejects_bad_input() {
        let store = MemoryStore::new();
        assert!(
            create_coordinator(&store, "Ana", "ana@escola.br", "123.456.789-00", "password123")
                .await
                .is_err()
        );
        assert!(
            create_coordinator(&store, "Ana", "ana@escola.br", "52998224725", "short")
                .await
                .is_err()
        );

        create_coordinator(&store, "Ana", "ana@escola.br", "52998224725", "password123")
            .await
            .unwrap();
        let duplicate =
            create_coordinator(&store, "Bia", "ANA@escola.br", "11144477735", "password123")
                .await
                .unwrap_err();
        assert!(duplicate.to_string().contains("email"));
    }
}
