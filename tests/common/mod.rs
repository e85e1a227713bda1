use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use classgrid::router::init_router;
use classgrid::state::AppState;
use classgrid_auth::create_access_token;
use classgrid_config::{CorsConfig, JwtConfig};
use classgrid_core::hash_password;
use classgrid_db::MemoryStore;
use classgrid_db::collections::{ROOMS, SUBJECTS, USERS};
use classgrid_models::{Cpf, Email, Role, Room, RoomId, Subject, SubjectId, User, UserId, UserRecord};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "testpass123";

/// Valid CPFs for fixtures.
#[allow(dead_code)]
pub const CPFS: [&str; 4] = ["52998224725", "11144477735", "39053344705", "12345678909"];

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub jwt_config: JwtConfig,
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: UserId,
    pub email: String,
    pub token: String,
}

pub fn setup_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let jwt_config = JwtConfig {
        secret: "test-secret".to_string(),
        access_token_expiry: 3600,
    };
    let state = AppState::new(store.clone(), jwt_config.clone(), CorsConfig::default());

    TestApp {
        router: init_router(state),
        store,
        jwt_config,
    }
}

impl TestApp {
    /// Stores a user directly and issues a token for it.
    pub async fn create_user(&self, name: &str, email: &str, cpf: &str, role: Role) -> TestUser {
        let now = Utc::now();
        let record = UserRecord {
            user: User {
                id: UserId::new(),
                name: name.to_string(),
                email: Email::new(email).unwrap(),
                cpf: Cpf::new(cpf).unwrap(),
                role,
                created_at: now,
                updated_at: now,
            },
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
        };
        USERS
            .put(self.store.as_ref(), &record.user.id.key(), &record)
            .await
            .unwrap();

        let token = create_access_token(
            record.user.id.into_inner(),
            record.user.email.as_str(),
            role,
            &self.jwt_config,
        )
        .unwrap();

        TestUser {
            id: record.user.id,
            email: record.user.email.into_inner(),
            token,
        }
    }

    #[allow(dead_code)]
    pub async fn create_subject(&self, name: &str) {
        let now = Utc::now();
        let subject = Subject {
            id: SubjectId::new(),
            name: name.to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        };
        SUBJECTS
            .put(self.store.as_ref(), &subject.id.key(), &subject)
            .await
            .unwrap();
    }

    #[allow(dead_code)]
    pub async fn create_room(&self, name: &str) {
        let now = Utc::now();
        let room = Room {
            id: RoomId::new(),
            name: name.to_string(),
            capacity: None,
            created_at: now,
            updated_at: now,
        };
        ROOMS
            .put(self.store.as_ref(), &room.id.key(), &room)
            .await
            .unwrap();
    }

    /// Sends one request through the router and decodes the JSON response.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body)
    }
}
