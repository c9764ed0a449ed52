//! Integration tests for login, logout, and identity resolution.

mod common;

use axum::http::{header, StatusCode};
use serde_json::json;
use tanmia_db::storage::Storage;

use common::*;

#[tokio::test]
async fn login_returns_token_cookie_and_user() {
    let (app, store) = build_test_app();
    seed_user(store.as_ref(), "fatima", "motdepasse1", "editeur").await;

    let response = post_json(
        &app,
        "/api/auth/login",
        None,
        json!({ "username": "fatima", "password": "motdepasse1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set the auth cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["expiresIn"], 24 * 3600);
    assert_eq!(body["user"]["username"], "fatima");
    assert_eq!(body["user"]["role"], "editeur");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable() {
    let (app, store) = build_test_app();
    seed_user(store.as_ref(), "fatima", "motdepasse1", "editeur").await;

    let wrong_password = post_json(
        &app,
        "/api/auth/login",
        None,
        json!({ "username": "fatima", "password": "mauvais-mdp" }),
    )
    .await;
    let unknown_user = post_json(
        &app,
        "/api/auth/login",
        None,
        json!({ "username": "personne", "password": "motdepasse1" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    // Identical bodies: no account-enumeration signal.
    assert_eq!(
        body_json(wrong_password).await,
        body_json(unknown_user).await
    );
}

#[tokio::test]
async fn me_resolves_the_caller() {
    let (app, store) = build_test_app();
    let user = seed_user(store.as_ref(), "karim", "motdepasse1", "decideur").await;
    let token = token_for(&user);

    let response = get(&app, "/api/auth/me", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user"]["id"], user.id);
    assert_eq!(body["user"]["username"], "karim");
    assert_eq!(body["user"]["role"], "decideur");
}

#[tokio::test]
async fn me_accepts_the_cookie_transport() {
    let (app, store) = build_test_app();
    let user = seed_user(store.as_ref(), "karim", "motdepasse1", "decideur").await;
    let token = token_for(&user);

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header("cookie", format!("other=1; auth_token={token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["username"], "karim");
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let (app, _store) = build_test_app();
    let response = get(&app, "/api/auth/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_fails_when_the_account_was_deleted() {
    let (app, store) = build_test_app();
    let user = seed_user(store.as_ref(), "karim", "motdepasse1", "decideur").await;
    let token = token_for(&user);

    store.delete_user(user.id).await.unwrap();

    let response = get(&app, "/api/auth/me", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let (app, store) = build_test_app();
    let user = seed_user(store.as_ref(), "karim", "motdepasse1", "admin").await;
    let mut token = token_for(&user);

    // Corrupt the signature segment.
    token.pop();
    token.push('x');

    let response = get(&app, "/api/auth/me", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let (app, store) = build_test_app();
    let user = seed_user(store.as_ref(), "karim", "motdepasse1", "editeur").await;
    let token = token_for(&user);

    let response = post_json(&app, "/api/auth/logout", Some(&token), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("logout must clear the cookie")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("auth_token=;"));
    assert!(cookie.contains("Max-Age=0"));
}
