//! Integration tests for the Projet CRUD endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::*;

/// Seed an editeur, return their token plus a programme id to attach
/// projets to.
async fn editor_with_programme(
    app: &axum::Router,
    store: &dyn tanmia_db::storage::Storage,
) -> (String, i64) {
    let editeur = seed_user(store, "nadia", "motdepasse1", "editeur").await;
    let token = token_for(&editeur);

    let created = post_json(
        app,
        "/api/programmes",
        Some(&token),
        json!({ "nom": "Programme cadre", "secteur": "Agriculture" }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["id"].as_i64().unwrap();
    (token, id)
}

#[tokio::test]
async fn create_and_read_a_projet() {
    let (app, store) = build_test_app();
    let (token, programme_id) = editor_with_programme(&app, store.as_ref()).await;

    let response = post_json(
        &app,
        "/api/projets",
        Some(&token),
        json!({
            "nom": "Extension du périmètre irrigué",
            "programmeId": programme_id,
            "etatAvancement": "En cours",
            "maitreOuvrage": "ORMVA",
            "provinces": ["Province de Taroudannt", "Province de Tiznit"],
            "montantGlobal": "250000",
            "participationRegion": "100000"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["programmeId"], programme_id);
    assert_eq!(created["etatAvancement"], "En cours");

    let response = get(&app, &format!("/api/projets/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["nom"], "Extension du périmètre irrigué");
    assert_eq!(
        fetched["provinces"],
        json!(["Province de Taroudannt", "Province de Tiznit"])
    );
}

#[tokio::test]
async fn projet_must_reference_an_existing_programme() {
    let (app, store) = build_test_app();
    let editeur = seed_user(store.as_ref(), "nadia", "motdepasse1", "editeur").await;
    let token = token_for(&editeur);

    let response = post_json(
        &app,
        "/api/projets",
        Some(&token),
        json!({ "nom": "Orphelin", "programmeId": 42, "etatAvancement": "Planifié" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["details"][0]["field"], "programmeId");
}

#[tokio::test]
async fn invalid_etat_and_unknown_province_are_rejected_together() {
    let (app, store) = build_test_app();
    let (token, programme_id) = editor_with_programme(&app, store.as_ref()).await;

    let response = post_json(
        &app,
        "/api/projets",
        Some(&token),
        json!({
            "nom": "P",
            "programmeId": programme_id,
            "etatAvancement": "Abandonné",
            "provinces": ["Province de Casablanca"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let fields: Vec<_> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap().to_string())
        .collect();
    assert!(fields.contains(&"etatAvancement".to_string()));
    assert!(fields.contains(&"provinces".to_string()));
}

#[tokio::test]
async fn listing_filters_by_programme() {
    let (app, store) = build_test_app();
    let (token, first_programme) = editor_with_programme(&app, store.as_ref()).await;

    let created = post_json(
        &app,
        "/api/programmes",
        Some(&token),
        json!({ "nom": "Autre programme", "secteur": "Tourisme" }),
    )
    .await;
    let second_programme = body_json(created).await["id"].as_i64().unwrap();

    for (nom, programme_id) in [
        ("A", first_programme),
        ("B", first_programme),
        ("C", second_programme),
    ] {
        let response = post_json(
            &app,
            "/api/projets",
            Some(&token),
            json!({ "nom": nom, "programmeId": programme_id, "etatAvancement": "Planifié" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(
        &app,
        &format!("/api/projets?programmeId={first_programme}"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let filtered = body_json(response).await;
    assert_eq!(filtered.as_array().unwrap().len(), 2);

    let response = get(&app, "/api/projets", Some(&token)).await;
    let all = body_json(response).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn update_merges_and_checks_the_target_programme() {
    let (app, store) = build_test_app();
    let (token, programme_id) = editor_with_programme(&app, store.as_ref()).await;

    let created = post_json(
        &app,
        "/api/projets",
        Some(&token),
        json!({ "nom": "P", "programmeId": programme_id, "etatAvancement": "Planifié" }),
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();

    // Partial update keeps everything else.
    let response = put_json(
        &app,
        &format!("/api/projets/{id}"),
        Some(&token),
        json!({ "etatAvancement": "En cours" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["etatAvancement"], "En cours");
    assert_eq!(body["nom"], "P");

    // Moving to a non-existent programme is a validation failure.
    let response = put_json(
        &app,
        &format!("/api/projets/{id}"),
        Some(&token),
        json!({ "programmeId": 999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_ordering_uses_stored_amounts() {
    let (app, store) = build_test_app();
    let (token, programme_id) = editor_with_programme(&app, store.as_ref()).await;

    let created = post_json(
        &app,
        "/api/projets",
        Some(&token),
        json!({
            "nom": "P",
            "programmeId": programme_id,
            "etatAvancement": "Planifié",
            "montantGlobal": "100"
        }),
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();

    let response = put_json(
        &app,
        &format!("/api/projets/{id}"),
        Some(&token),
        json!({ "participationRegion": "200" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_then_missing() {
    let (app, store) = build_test_app();
    let (token, programme_id) = editor_with_programme(&app, store.as_ref()).await;

    let created = post_json(
        &app,
        "/api/projets",
        Some(&token),
        json!({ "nom": "P", "programmeId": programme_id, "etatAvancement": "Terminé" }),
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();

    let response = delete(&app, &format!("/api/projets/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(&app, &format!("/api/projets/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn decideur_cannot_mutate_projets() {
    let (app, store) = build_test_app();
    let (editor_token, programme_id) = editor_with_programme(&app, store.as_ref()).await;
    let decideur = seed_user(store.as_ref(), "karim", "motdepasse1", "decideur").await;
    let token = token_for(&decideur);

    let created = post_json(
        &app,
        "/api/projets",
        Some(&editor_token),
        json!({ "nom": "P", "programmeId": programme_id, "etatAvancement": "Planifié" }),
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();

    let response = put_json(
        &app,
        &format!("/api/projets/{id}"),
        Some(&token),
        json!({ "nom": "Renommé" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete(&app, &format!("/api/projets/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
