mod common;

use axum::http::StatusCode;
use classgrid_models::Role;
use common::{CPFS, setup_test_app};
use serde_json::json;

#[tokio::test]
async fn test_registry_writes_need_coordinator() {
    let app = setup_test_app();
    let teacher = app
        .create_user("Ana", "ana@escola.br", CPFS[0], Role::Teacher)
        .await;

    for uri in ["/api/subjects", "/api/rooms"] {
        let (status, body) = app
            .send("POST", uri, Some(&teacher.token), Some(json!({ "name": "Artes" })))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert!(body["error"].as_str().unwrap().contains("coordinator"));

        // reads are open to any authenticated user
        let (status, _) = app.send("GET", uri, Some(&teacher.token), None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn test_subject_crud() {
    let app = setup_test_app();
    let coordinator = app
        .create_user("Carla", "carla@escola.br", CPFS[1], Role::Coordinator)
        .await;
    let token = Some(coordinator.token.as_str());

    let (status, created) = app
        .send(
            "POST",
            "/api/subjects",
            token,
            Some(json!({ "name": " Matemática ", "description": "Álgebra e geometria" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Matemática");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .send(
            "POST",
            "/api/subjects",
            token,
            Some(json!({ "name": "matemática" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, updated) = app
        .send(
            "PUT",
            &format!("/api/subjects/{id}"),
            token,
            Some(json!({ "name": "Matemática I" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Matemática I");

    let (status, list) = app.send("GET", "/api/subjects", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["meta"]["total"], 1);

    let (status, _) = app
        .send("DELETE", &format!("/api/subjects/{id}"), token, None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .send("GET", &format!("/api/subjects/{id}"), token, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_room_in_use_cannot_be_deleted() {
    let app = setup_test_app();
    let coordinator = app
        .create_user("Carla", "carla@escola.br", CPFS[1], Role::Coordinator)
        .await;
    let teacher = app
        .create_user("Ana", "ana@escola.br", CPFS[0], Role::Teacher)
        .await;
    app.create_subject("Artes").await;

    let (status, room) = app
        .send(
            "POST",
            "/api/rooms",
            Some(&coordinator.token),
            Some(json!({ "name": "Sala 101", "capacity": 30 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(room["capacity"], 30);
    let room_uri = format!("/api/rooms/{}", room["id"].as_str().unwrap());

    let (status, _) = app
        .send(
            "POST",
            "/api/schedules",
            Some(&teacher.token),
            Some(json!({ "day": "monday", "time": "08:00-09:00", "subject": "Artes", "room": "Sala 101" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .send("DELETE", &room_uri, Some(&coordinator.token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            "PUT",
            &room_uri,
            Some(&coordinator.token),
            Some(json!({ "name": "Sala 102" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_room_capacity_validation() {
    let app = setup_test_app();
    let coordinator = app
        .create_user("Carla", "carla@escola.br", CPFS[1], Role::Coordinator)
        .await;

    let (status, _) = app
        .send(
            "POST",
            "/api/rooms",
            Some(&coordinator.token),
            Some(json!({ "name": "Sala 101", "capacity": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = setup_test_app();
    let teacher = app
        .create_user("Ana", "ana@escola.br", CPFS[0], Role::Teacher)
        .await;

    let (status, _) = app
        .send(
            "GET",
            "/api/rooms/00000000-0000-0000-0000-000000000000",
            Some(&teacher.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
