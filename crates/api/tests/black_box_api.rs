use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use ledgerbridge_api::app::services::{self, AppServices};
use ledgerbridge_auth::TokenService;
use ledgerbridge_engine::MemoryEngine;
use ledgerbridge_store::MemoryUserStore;

const ADMIN_EMAIL: &str = "super@test.com";
const ADMIN_PASSWORD: &str = "password";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Build the production router over in-memory engine/store twins, bind
    /// to an ephemeral port, and seed the bootstrap superuser.
    async fn spawn() -> Self {
        let app_services = Arc::new(AppServices::new(
            Arc::new(MemoryEngine::new()),
            Arc::new(MemoryUserStore::new()),
            TokenService::new(b"test-secret", 30),
        ));
        services::ensure_bootstrap_admin(app_services.users.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .expect("bootstrap admin");

        let app = ledgerbridge_api::app::build_app(app_services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn login(client: &reqwest::Client, base_url: &str, email: &str, password: &str) -> String {
    let res = client
        .post(format!("{base_url}/v1/auth/token"))
        .form(&[("username", email), ("password", password)])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK, "login failed for {email}");
    let body: Value = res.json().await.unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

async fn register(client: &reqwest::Client, base_url: &str, email: &str, password: &str) -> Value {
    client
        .post(format!("{base_url}/v1/auth/register"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

/// Register a user and activate it through the admin surface; returns a
/// bearer token for the now-active user.
async fn active_user_token(client: &reqwest::Client, base_url: &str, email: &str) -> String {
    let registered = register(client, base_url, email, "password").await;
    let user_id = registered["data"]["id"].as_i64().unwrap();

    let admin_token = login(client, base_url, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let res = client
        .post(format!("{base_url}/v1/admin/users/{user_id}/activate"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    login(client, base_url, email, "password").await
}

fn account_payload(id: &str) -> Value {
    json!({
        "id": id,
        "debits_pending": "0",
        "debits_posted": "0",
        "credits_pending": "0",
        "credits_posted": "0",
        "ledger": 1,
        "code": 718,
        "flags": 8,
        "timestamp": "0"
    })
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn registration_is_idempotent_with_logical_error_envelope() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let first = register(&client, &srv.base_url, "new@test.com", "password").await;
    assert_eq!(first["status"], "success");
    assert_eq!(first["data"]["email"], "new@test.com");
    assert_eq!(first["data"]["is_active"], false);

    // Second call: transport stays 200, the envelope carries the logical 400.
    let res = client
        .post(format!("{}/v1/auth/register", srv.base_url))
        .json(&json!({ "email": "new@test.com", "password": "password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let second: Value = res.json().await.unwrap();
    assert_eq!(second["status"], "error");
    assert_eq!(second["code"], 400);
    assert_eq!(second["message"], "Email already registered");

    // No duplicate row: the admin listing still shows one row per email.
    let admin_token = login(&client, &srv.base_url, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let listing: Value = client
        .get(format!("{}/v1/admin/users", srv.base_url))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let emails: Vec<&str> = listing["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert_eq!(
        emails.iter().filter(|e| **e == "new@test.com").count(),
        1
    );
}

#[tokio::test]
async fn inactive_login_is_distinct_from_bad_credentials() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    register(&client, &srv.base_url, "inactive@test.com", "password").await;

    // Wrong password: 401.
    let res = client
        .post(format!("{}/v1/auth/token", srv.base_url))
        .form(&[("username", "inactive@test.com"), ("password", "wrong")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Incorrect email or password");

    // Right password, not yet activated: 403 with the inactive message.
    let res = client
        .post(format!("{}/v1/auth/token", srv.base_url))
        .form(&[("username", "inactive@test.com"), ("password", "password")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("inactive"));
}

#[tokio::test]
async fn admin_activation_flow_unlocks_login() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let admin_token = login(&client, &srv.base_url, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let registered = register(&client, &srv.base_url, "target@test.com", "password").await;
    let user_id = registered["data"]["id"].as_i64().unwrap();

    let listing: Value = client
        .get(format!("{}/v1/admin/users", srv.base_url))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listing["data"].as_array().unwrap().len() >= 2);

    let activated: Value = client
        .post(format!("{}/v1/admin/users/{user_id}/activate", srv.base_url))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(activated["data"]["is_active"], true);

    // The fresh token works against a protected route.
    let token = login(&client, &srv.base_url, "target@test.com", "password").await;
    let res = client
        .post(format!("{}/v1/accounts/lookup", srv.base_url))
        .bearer_auth(&token)
        .json(&json!(["1"]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Activating a missing id is a logical 404 in the envelope.
    let missing: Value = client
        .post(format!("{}/v1/admin/users/99999/activate", srv.base_url))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(missing["status"], "error");
    assert_eq!(missing["code"], 404);
}

#[tokio::test]
async fn authorization_ladder_is_enforced() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Anonymous: 401.
    let res = client
        .post(format!("{}/v1/accounts", srv.base_url))
        .json(&json!([account_payload("1")]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Garbage token: 401.
    let res = client
        .post(format!("{}/v1/accounts", srv.base_url))
        .bearer_auth("garbage")
        .json(&json!([account_payload("1")]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Active-but-not-superuser on an admin route: 403, privilege message.
    let token = active_user_token(&client, &srv.base_url, "plain@test.com").await;
    let res = client
        .get(format!("{}/v1/admin/users", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("Superuser"));
}

#[tokio::test]
async fn deactivated_user_hits_the_inactive_forbidden_not_401() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let token = active_user_token(&client, &srv.base_url, "revoked@test.com").await;

    // Admin pulls the rug while the token is still valid.
    let admin_token = login(&client, &srv.base_url, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let listing: Value = client
        .get(format!("{}/v1/admin/users", srv.base_url))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let user_id = listing["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["email"] == "revoked@test.com")
        .unwrap()["id"]
        .as_i64()
        .unwrap();
    client
        .post(format!("{}/v1/admin/users/{user_id}/deactivate", srv.base_url))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();

    // Authenticated-but-inactive: the inactive-specific 403, never a 401.
    let res = client
        .post(format!("{}/v1/accounts", srv.base_url))
        .bearer_auth(&token)
        .json(&json!([account_payload("1")]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Inactive user. Contact administrator.");
}

#[tokio::test]
async fn batch_create_success_then_exists_translation() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = active_user_token(&client, &srv.base_url, "ledger@test.com").await;

    // First submission: empty failure list from the engine means success.
    let res = client
        .post(format!("{}/v1/accounts", srv.base_url))
        .bearer_auth(&token)
        .json(&json!([account_payload("1")]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"], json!([]));
    assert!(body["errors"].is_null());

    // Resubmission: same id, translated to a partial_error with EXISTS at
    // index 0.
    let res = client
        .post(format!("{}/v1/accounts", srv.base_url))
        .bearer_auth(&token)
        .json(&json!([account_payload("1")]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "partial_error");
    assert_eq!(body["code"], 400);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["index"], 0);
    assert_eq!(errors[0]["error"], "EXISTS");
    assert!(errors[0]["error_code"].is_u64());
}

#[tokio::test]
async fn nonzero_opening_balance_fails_at_the_right_index() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = active_user_token(&client, &srv.base_url, "balances@test.com").await;

    let mut bad = account_payload("11");
    bad["debits_posted"] = json!("5");

    let body: Value = client
        .post(format!("{}/v1/accounts", srv.base_url))
        .bearer_auth(&token)
        .json(&json!([account_payload("10"), bad]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "partial_error");
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["index"], 1);
    assert_eq!(errors[0]["error"], "DEBITS_POSTED_MUST_BE_ZERO");
}

#[tokio::test]
async fn malformed_wide_field_is_a_422_validation_envelope() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = active_user_token(&client, &srv.base_url, "invalid@test.com").await;

    let res = client
        .post(format!("{}/v1/accounts", srv.base_url))
        .bearer_auth(&token)
        .json(&json!([account_payload("12x")]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], 422);
}

#[tokio::test]
async fn lookup_returns_the_existing_subset_as_strings() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = active_user_token(&client, &srv.base_url, "lookup@test.com").await;

    client
        .post(format!("{}/v1/accounts", srv.base_url))
        .bearer_auth(&token)
        .json(&json!([account_payload("1"), account_payload("3")]))
        .send()
        .await
        .unwrap();

    // Mixed int and string forms on input; strings on output.
    let body: Value = client
        .post(format!("{}/v1/accounts/lookup", srv.base_url))
        .bearer_auth(&token)
        .json(&json!([1, "2", "3", 4]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "success");
    let data = body["data"].as_array().unwrap();
    let ids: Vec<&str> = data.iter().map(|a| a["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert!(data[0]["debits_posted"].is_string());
    assert!(data[0]["ledger"].is_u64());
}

#[tokio::test]
async fn transfer_flow_moves_balances_and_reads_back() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = active_user_token(&client, &srv.base_url, "transfers@test.com").await;

    client
        .post(format!("{}/v1/accounts", srv.base_url))
        .bearer_auth(&token)
        .json(&json!([account_payload("1"), account_payload("2")]))
        .send()
        .await
        .unwrap();

    let body: Value = client
        .post(format!("{}/v1/transfers", srv.base_url))
        .bearer_auth(&token)
        .json(&json!([{
            "id": "101",
            "debit_account_id": "1",
            "credit_account_id": "2",
            "amount": "5000",
            "ledger": 1,
            "code": 1,
            "flags": 0
        }]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "success");

    let looked_up: Value = client
        .post(format!("{}/v1/transfers/lookup", srv.base_url))
        .bearer_auth(&token)
        .json(&json!(["101"]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(looked_up["data"][0]["amount"], "5000");

    let accounts: Value = client
        .post(format!("{}/v1/accounts/lookup", srv.base_url))
        .bearer_auth(&token)
        .json(&json!(["1", "2"]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(accounts["data"][0]["debits_posted"], "5000");
    assert_eq!(accounts["data"][1]["credits_posted"], "5000");

    // Account-scoped history with an explicit window sees the transfer.
    let history: Value = client
        .post(format!("{}/v1/accounts/transfers", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "account_id": "1", "timestamp_max": u64::MAX }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history["data"].as_array().unwrap().len(), 1);

    // Generic queries see it too.
    let queried: Value = client
        .post(format!("{}/v1/transfers/query", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "ledger": 1, "timestamp_max": u64::MAX }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(queried["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn default_valued_balance_filter_returns_an_empty_success() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = active_user_token(&client, &srv.base_url, "history@test.com").await;

    // flags: 8 sets history tracking on both accounts.
    client
        .post(format!("{}/v1/accounts", srv.base_url))
        .bearer_auth(&token)
        .json(&json!([account_payload("1"), account_payload("2")]))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{}/v1/transfers", srv.base_url))
        .bearer_auth(&token)
        .json(&json!([{
            "id": "101",
            "debit_account_id": "1",
            "credit_account_id": "2",
            "amount": "5000",
            "ledger": 1,
            "code": 1
        }]))
        .send()
        .await
        .unwrap();

    // Only account_id set: timestamp_max stays 0 and bounds everything out.
    let body: Value = client
        .post(format!("{}/v1/accounts/balances", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "account_id": "1" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"], json!([]));

    // The explicit window shows the snapshot, rendered as strings.
    let body: Value = client
        .post(format!("{}/v1/accounts/balances", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "account_id": "1", "timestamp_max": u64::MAX }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["debits_posted"], "5000");
    assert!(data[0]["timestamp"].is_string());
}

#[tokio::test]
async fn wide_ids_round_trip_without_precision_loss() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = active_user_token(&client, &srv.base_url, "wide@test.com").await;

    // 2^127 + 5: far past anything a JSON number can carry.
    let wide_id = "170141183460469231731687303715884105733";
    client
        .post(format!("{}/v1/accounts", srv.base_url))
        .bearer_auth(&token)
        .json(&json!([account_payload(wide_id)]))
        .send()
        .await
        .unwrap();

    let body: Value = client
        .post(format!("{}/v1/accounts/lookup", srv.base_url))
        .bearer_auth(&token)
        .json(&json!([wide_id]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"][0]["id"], wide_id);
}
