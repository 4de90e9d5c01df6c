mod common;

use common::TestApp;
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_rule_returns_created() {
    let app = TestApp::new();
    let (_, token) = app.create_user("alice", false).await;

    let response = app
        .server
        .post("/api/rules")
        .authorization_bearer(&token)
        .json(&json!({ "redirect_url": "https://example.com/target" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    assert_eq!(body["redirect_url"], "https://example.com/target");
    assert_eq!(body["is_private"], false);
    assert_eq!(body["redirect_identifier"].as_str().unwrap().len(), 8);
    assert!(body.get("owner").is_none());
    assert!(body.get("owner_id").is_none());
}

#[tokio::test]
async fn test_create_rule_requires_authentication() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/rules")
        .json(&json!({ "redirect_url": "https://example.com" }))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_create_rule_invalid_url_persists_nothing() {
    let app = TestApp::new();
    let (owner, token) = app.create_user("alice", false).await;

    let response = app
        .server
        .post("/api/rules")
        .authorization_bearer(&token)
        .json(&json!({ "redirect_url": "not-a-url" }))
        .await;

    response.assert_status_bad_request();

    use url_redirector::domain::repositories::RuleRepository;
    let rules = app.rules.list_by_owner(owner.id).await.unwrap();
    assert!(rules.is_empty());
}

#[tokio::test]
async fn test_create_rule_rejects_non_http_scheme() {
    let app = TestApp::new();
    let (_, token) = app.create_user("alice", false).await;

    let response = app
        .server
        .post("/api/rules")
        .authorization_bearer(&token)
        .json(&json!({ "redirect_url": "ftp://example.com/file" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_created_identifiers_are_unique_per_rule() {
    let app = TestApp::new();
    let (_, token) = app.create_user("alice", false).await;

    let mut identifiers = std::collections::HashSet::new();
    for i in 0..5 {
        let response = app
            .server
            .post("/api/rules")
            .authorization_bearer(&token)
            .json(&json!({ "redirect_url": format!("https://example.com/{i}") }))
            .await;
        assert_eq!(response.status_code(), 201);

        let body: Value = response.json();
        identifiers.insert(body["redirect_identifier"].as_str().unwrap().to_string());
    }

    assert_eq!(identifiers.len(), 5);
}

#[tokio::test]
async fn test_list_rules_scoped_to_caller() {
    let app = TestApp::new();
    let (alice, alice_token) = app.create_user("alice", false).await;
    let (bob, _) = app.create_user("bob", false).await;

    app.create_rule(alice.id, "alicerul", "https://example.com/a", false)
        .await;
    app.create_rule(bob.id, "bobrule1", "https://example.com/b", false)
        .await;

    let response = app
        .server
        .get("/api/rules")
        .authorization_bearer(&alice_token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let rules = body.as_array().unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0]["redirect_identifier"], "alicerul");
}

#[tokio::test]
async fn test_get_rule_as_owner() {
    let app = TestApp::new();
    let (owner, token) = app.create_user("alice", false).await;
    let rule = app
        .create_rule(owner.id, "mine1234", "https://example.com/mine", true)
        .await;

    let response = app
        .server
        .get(&format!("/api/rules/{}", rule.id))
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], rule.id.to_string());
    assert_eq!(body["is_private"], true);
}

#[tokio::test]
async fn test_get_rule_as_non_owner_is_forbidden() {
    let app = TestApp::new();
    let (owner, _) = app.create_user("alice", false).await;
    let (_, other_token) = app.create_user("bob", false).await;
    let rule = app
        .create_rule(owner.id, "mine1234", "https://example.com/mine", false)
        .await;

    let response = app
        .server
        .get(&format!("/api/rules/{}", rule.id))
        .authorization_bearer(&other_token)
        .await;

    response.assert_status_forbidden();
}

#[tokio::test]
async fn test_patch_flips_visibility_and_keeps_identity() {
    let app = TestApp::new();
    let (owner, token) = app.create_user("alice", false).await;
    let rule = app
        .create_rule(owner.id, "stable12", "https://example.com/page", false)
        .await;

    let response = app
        .server
        .patch(&format!("/api/rules/{}", rule.id))
        .authorization_bearer(&token)
        .json(&json!({ "is_private": true }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["is_private"], true);
    assert_eq!(body["redirect_identifier"], "stable12");
    assert_eq!(body["redirect_url"], "https://example.com/page");
    assert_eq!(body["created"], serde_json::to_value(rule.created).unwrap());

    // modified advances past the original value
    let modified: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(body["modified"].clone()).unwrap();
    assert!(modified >= rule.modified);
}

#[tokio::test]
async fn test_put_replaces_mutable_fields() {
    let app = TestApp::new();
    let (owner, token) = app.create_user("alice", false).await;
    let rule = app
        .create_rule(owner.id, "stable12", "https://example.com/old", false)
        .await;

    let response = app
        .server
        .put(&format!("/api/rules/{}", rule.id))
        .authorization_bearer(&token)
        .json(&json!({
            "redirect_url": "https://example.com/new",
            "is_private": true
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["redirect_url"], "https://example.com/new");
    assert_eq!(body["is_private"], true);
    assert_eq!(body["redirect_identifier"], "stable12");
}

#[tokio::test]
async fn test_update_by_non_owner_leaves_rule_unmodified() {
    let app = TestApp::new();
    let (owner, _) = app.create_user("alice", false).await;
    let (_, other_token) = app.create_user("bob", false).await;
    let rule = app
        .create_rule(owner.id, "mine1234", "https://example.com/mine", false)
        .await;

    let response = app
        .server
        .patch(&format!("/api/rules/{}", rule.id))
        .authorization_bearer(&other_token)
        .json(&json!({ "redirect_url": "https://evil.example.com" }))
        .await;

    response.assert_status_forbidden();

    use url_redirector::domain::repositories::RuleRepository;
    let stored = app.rules.find_by_id(rule.id).await.unwrap().unwrap();
    assert_eq!(stored.redirect_url, "https://example.com/mine");
    assert_eq!(stored.modified, rule.modified);
}

#[tokio::test]
async fn test_patch_with_invalid_url_is_rejected() {
    let app = TestApp::new();
    let (owner, token) = app.create_user("alice", false).await;
    let rule = app
        .create_rule(owner.id, "mine1234", "https://example.com/mine", false)
        .await;

    let response = app
        .server
        .patch(&format!("/api/rules/{}", rule.id))
        .authorization_bearer(&token)
        .json(&json!({ "redirect_url": "not-a-url" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_update_missing_rule_is_not_found() {
    let app = TestApp::new();
    let (_, token) = app.create_user("alice", false).await;

    let response = app
        .server
        .patch(&format!("/api/rules/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&token)
        .json(&json!({ "is_private": true }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_rule_stops_resolution() {
    let app = TestApp::new();
    let (owner, token) = app.create_user("alice", false).await;
    let rule = app
        .create_rule(owner.id, "gone1234", "https://example.com/gone", false)
        .await;

    let response = app
        .server
        .delete(&format!("/api/rules/{}", rule.id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 204);

    app.server.get("/public/gone1234").await.assert_status_not_found();

    app.server
        .get(&format!("/api/rules/{}", rule.id))
        .authorization_bearer(&token)
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_by_non_owner_is_forbidden() {
    let app = TestApp::new();
    let (owner, _) = app.create_user("alice", false).await;
    let (_, other_token) = app.create_user("bob", false).await;
    let rule = app
        .create_rule(owner.id, "mine1234", "https://example.com/mine", false)
        .await;

    let response = app
        .server
        .delete(&format!("/api/rules/{}", rule.id))
        .authorization_bearer(&other_token)
        .await;

    response.assert_status_forbidden();

    // Still resolvable.
    let public = app.server.get("/public/mine1234").await;
    assert_eq!(public.status_code(), 307);
}

#[tokio::test]
async fn test_admin_flag_grants_no_rule_access() {
    let app = TestApp::new();
    let (owner, _) = app.create_user("alice", false).await;
    let (_, admin_token) = app.create_user("root", true).await;
    let rule = app
        .create_rule(owner.id, "mine1234", "https://example.com/mine", false)
        .await;

    let response = app
        .server
        .delete(&format!("/api/rules/{}", rule.id))
        .authorization_bearer(&admin_token)
        .await;

    response.assert_status_forbidden();
}
