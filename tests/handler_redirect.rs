mod common;

use common::TestApp;
use url_redirector::domain::repositories::TokenRepository;

#[tokio::test]
async fn test_public_redirect_resolves_anonymously() {
    let app = TestApp::new();
    let (owner, _) = app.create_user("alice", false).await;
    app.create_rule(owner.id, "pubrule1", "https://example.com/target", false)
        .await;

    let response = app.server.get("/public/pubrule1").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_public_redirect_unknown_identifier_is_not_found() {
    let app = TestApp::new();

    let response = app.server.get("/public/missing1").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_public_redirect_never_serves_private_rule() {
    let app = TestApp::new();
    let (owner, _) = app.create_user("alice", false).await;
    app.create_rule(owner.id, "hidden12", "https://example.com/secret", true)
        .await;

    // Identical 404 to a nonexistent identifier.
    let hidden = app.server.get("/public/hidden12").await;
    let missing = app.server.get("/public/missing1").await;

    hidden.assert_status_not_found();
    missing.assert_status_not_found();

    let hidden_body: serde_json::Value = hidden.json();
    let missing_body: serde_json::Value = missing.json();
    assert_eq!(
        hidden_body["error"]["message"],
        missing_body["error"]["message"]
    );
}

#[tokio::test]
async fn test_private_redirect_requires_authentication() {
    let app = TestApp::new();
    let (owner, _) = app.create_user("alice", false).await;
    app.create_rule(owner.id, "priv1234", "https://example.com/secret", true)
        .await;

    let response = app.server.get("/private/priv1234").await;

    response.assert_status_unauthorized();
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[tokio::test]
async fn test_private_redirect_resolves_for_owner() {
    let app = TestApp::new();
    let (owner, token) = app.create_user("alice", false).await;
    app.create_rule(owner.id, "priv1234", "https://example.com/secret", true)
        .await;

    let response = app
        .server
        .get("/private/priv1234")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/secret");
}

#[tokio::test]
async fn test_private_redirect_hidden_from_other_users() {
    let app = TestApp::new();
    let (owner, _) = app.create_user("alice", false).await;
    let (_, other_token) = app.create_user("bob", false).await;
    app.create_rule(owner.id, "priv1234", "https://example.com/secret", true)
        .await;

    let response = app
        .server
        .get("/private/priv1234")
        .authorization_bearer(&other_token)
        .await;

    // Same 404 as a nonexistent identifier, never 403.
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_private_path_never_serves_public_rule() {
    let app = TestApp::new();
    let (owner, token) = app.create_user("alice", false).await;
    app.create_rule(owner.id, "pubrule1", "https://example.com/target", false)
        .await;

    let response = app
        .server
        .get("/private/pubrule1")
        .authorization_bearer(&token)
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let app = TestApp::new();
    let (owner, _) = app.create_user("alice", false).await;
    app.create_rule(owner.id, "priv1234", "https://example.com/secret", true)
        .await;

    let response = app
        .server
        .get("/private/priv1234")
        .authorization_bearer("no-such-token")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_revoked_token_is_unauthorized() {
    let app = TestApp::new();
    let (owner, token) = app.create_user("alice", false).await;
    app.create_rule(owner.id, "priv1234", "https://example.com/secret", true)
        .await;

    let issued = app.tokens.list_tokens().await.unwrap();
    app.tokens.revoke_token(issued[0].id).await.unwrap();

    let response = app
        .server
        .get("/private/priv1234")
        .authorization_bearer(&token)
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_visibility_flip_moves_rule_between_paths() {
    let app = TestApp::new();
    let (owner, token) = app.create_user("alice", false).await;
    let rule = app
        .create_rule(owner.id, "flipme12", "https://example.com/page", true)
        .await;

    // Private first: owner-only.
    let private = app
        .server
        .get("/private/flipme12")
        .authorization_bearer(&token)
        .await;
    assert_eq!(private.status_code(), 307);

    // Flip to public via the management API.
    let response = app
        .server
        .patch(&format!("/api/rules/{}", rule.id))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "is_private": false }))
        .await;
    response.assert_status_ok();

    // Now anonymous resolution works and the private path no longer matches.
    let public = app.server.get("/public/flipme12").await;
    assert_eq!(public.status_code(), 307);

    app.server
        .get("/private/flipme12")
        .authorization_bearer(&token)
        .await
        .assert_status_not_found();
}
