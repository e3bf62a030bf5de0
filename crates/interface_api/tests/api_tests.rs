//! End-to-end API tests
//!
//! Each test spins up the full router against a fresh in-memory database
//! and drives it over HTTP, covering the registration/login flow, the
//! plan catalog, policy purchase and cancellation, claim intake and
//! adjudication, and customer service reports.

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use chrono::{Months, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use interface_api::auth::Claims;
use interface_api::config::ApiConfig;
use interface_api::create_router;
use test_utils::{test_pool, IdentityFixtures};

const PASSWORD: &str = "s3cret-passphrase";

async fn spawn_server(adjusters: &str) -> TestServer {
    let pool = test_pool().await;
    let upload_dir = std::env::temp_dir()
        .join(format!("securebank-test-{}", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();
    let config = ApiConfig {
        jwt_secret: "integration-test-secret".to_string(),
        upload_dir,
        adjusters: adjusters.to_string(),
        ..ApiConfig::default()
    };
    TestServer::new(create_router(pool, config)).expect("router should build")
}

/// Date of birth for a thirty-year-old, whatever today is
fn dob_age_30() -> String {
    let dob = Utc::now().date_naive() - Months::new(12 * 30 + 3);
    dob.to_string()
}

async fn register(server: &TestServer, username: &str) -> Value {
    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "username": username,
            "password": PASSWORD,
            "full_name": "Asha Verma",
            "email": format!("{username}@example.com"),
            "phone": "9876543210",
            "date_of_birth": dob_age_30(),
            "gender": "female",
            "address": "14 MG Road, Pune",
            "pan": IdentityFixtures::pan(),
            "face_capture": "simulated-face-capture",
            "retina_capture": "simulated-retina-capture",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn login(server: &TestServer, username: &str, digital_token: &str) -> String {
    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({
            "username": username,
            "password": PASSWORD,
            "digital_token": digital_token,
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["access_token"].as_str().expect("token").to_string()
}

/// Registers and logs in, returning the bearer token
async fn authenticate(server: &TestServer, username: &str) -> String {
    let registered = register(server, username).await;
    let digital_token = registered["digital_token"].as_str().expect("digital token");
    login(server, username, digital_token).await
}

async fn purchase_policy(server: &TestServer, bearer: &str, cover: i64) -> Value {
    let response = server
        .post("/api/v1/policies")
        .authorization_bearer(bearer)
        .json(&json!({
            "plan_code": "TERM-10",
            "cover": cover,
            "nominee": { "name": "Ravi Verma", "relationship": "spouse" },
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

fn decimal(value: &Value) -> Decimal {
    value
        .as_str()
        .expect("decimal fields serialize as strings")
        .parse()
        .expect("parseable decimal")
}

#[tokio::test]
async fn test_health_endpoints() {
    let server = spawn_server("").await;
    server.get("/health").await.assert_status_ok();
    server.get("/health/ready").await.assert_status_ok();
}

#[tokio::test]
async fn test_register_issues_token_and_runs_verification() {
    let server = spawn_server("").await;
    let body = register(&server, "asha.verma").await;

    assert_eq!(body["digital_token"].as_str().expect("token").len(), 8);
    assert_eq!(body["customer"]["username"], "asha.verma");
    assert_eq!(body["customer"]["status"], "active");
    assert_eq!(body["customer"]["face_verified"], true);
    assert_eq!(body["customer"]["retina_verified"], true);
    assert_eq!(body["customer"]["age"], 30);
}

#[tokio::test]
async fn test_register_rejects_duplicate_username() {
    let server = spawn_server("").await;
    register(&server, "first.mover").await;

    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "username": "first.mover",
            "password": PASSWORD,
            "full_name": "Someone Else",
            "email": "someone.else@example.com",
            "phone": "9123456780",
            "date_of_birth": dob_age_30(),
            "gender": "male",
            "address": "7 Lake View, Chennai",
            "pan": IdentityFixtures::pan(),
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_malformed_pan() {
    let server = spawn_server("").await;
    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "username": "bad.pan",
            "password": PASSWORD,
            "full_name": "Bad Pan",
            "email": "bad.pan@example.com",
            "phone": "9123456780",
            "date_of_birth": dob_age_30(),
            "gender": "other",
            "address": "7 Lake View, Chennai",
            "pan": "NOT-A-PAN",
        }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_requires_matching_digital_token() {
    let server = spawn_server("").await;
    let registered = register(&server, "token.check").await;

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({
            "username": "token.check",
            "password": PASSWORD,
            "digital_token": "WRONGTOK",
        }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let digital_token = registered["digital_token"].as_str().expect("token");
    login(&server, "token.check", digital_token).await;
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let server = spawn_server("").await;
    let registered = register(&server, "pass.check").await;

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({
            "username": "pass.check",
            "password": "not-the-password",
            "digital_token": registered["digital_token"],
        }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_bearer_token() {
    let server = spawn_server("").await;
    server
        .get("/api/v1/schemes")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/api/v1/policies")
        .authorization_bearer("not-a-jwt")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let server = spawn_server("").await;

    // Signed with the right secret but already past its expiry,
    // comfortably beyond the verifier's clock-skew leeway.
    let now = Utc::now().timestamp();
    let stale_claims = Claims {
        sub: "CUS-00000000-0000-0000-0000-000000000000".to_string(),
        username: "stale.session".to_string(),
        roles: vec!["customer".to_string()],
        exp: now - 120,
        iat: now - 3_600,
    };
    let stale = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &stale_claims,
        &jsonwebtoken::EncodingKey::from_secret("integration-test-secret".as_bytes()),
    )
    .expect("encoding a stale token should succeed");

    server
        .get("/api/v1/policies")
        .authorization_bearer(&stale)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_scheme_catalog() {
    let server = spawn_server("").await;
    let bearer = authenticate(&server, "shelf.browser").await;

    let response = server
        .get("/api/v1/schemes")
        .authorization_bearer(&bearer)
        .await;
    response.assert_status_ok();
    let schemes: Vec<Value> = response.json();
    assert_eq!(schemes.len(), 10);
    assert!(schemes.iter().any(|s| s["code"] == "TERM-10"));

    // Plan lookup is case-insensitive
    let response = server
        .get("/api/v1/schemes/term-10")
        .authorization_bearer(&bearer)
        .await;
    response.assert_status_ok();
    let scheme: Value = response.json();
    assert_eq!(scheme["code"], "TERM-10");

    server
        .get("/api/v1/schemes/NO-SUCH-PLAN")
        .authorization_bearer(&bearer)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quote_matches_published_rates() {
    let server = spawn_server("").await;
    let bearer = authenticate(&server, "quote.seeker").await;

    let response = server
        .get("/api/v1/schemes/TERM-10/quote")
        .add_query_param("age", 30)
        .add_query_param("cover", 500_000)
        .authorization_bearer(&bearer)
        .await;
    response.assert_status_ok();
    let quote: Value = response.json();
    assert_eq!(decimal(&quote["annual_premium"]), dec!(700));
    assert_eq!(decimal(&quote["monthly_premium"]), dec!(58));
    assert_eq!(quote["currency"], "INR");
}

#[tokio::test]
async fn test_purchase_brings_policy_into_force() {
    let server = spawn_server("").await;
    let bearer = authenticate(&server, "policy.buyer").await;

    let policy = purchase_policy(&server, &bearer, 500_000).await;
    assert_eq!(policy["status"], "active");
    assert!(policy["activated_at"].is_string());
    assert!(policy["policy_number"]
        .as_str()
        .expect("policy number")
        .starts_with("POL"));
    assert_eq!(decimal(&policy["annual_premium"]), dec!(700));
    assert_eq!(policy["nominee"]["name"], "Ravi Verma");

    let response = server
        .get("/api/v1/policies")
        .authorization_bearer(&bearer)
        .await;
    response.assert_status_ok();
    let policies: Vec<Value> = response.json();
    assert_eq!(policies.len(), 1);
    assert_eq!(policies[0]["id"], policy["id"]);
}

#[tokio::test]
async fn test_purchase_rejects_cover_below_plan_minimum() {
    let server = spawn_server("").await;
    let bearer = authenticate(&server, "small.cover").await;

    let response = server
        .post("/api/v1/policies")
        .authorization_bearer(&bearer)
        .json(&json!({ "plan_code": "TERM-10", "cover": 10_000 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_inside_window_is_free() {
    let server = spawn_server("").await;
    let bearer = authenticate(&server, "quick.cancel").await;
    let policy = purchase_policy(&server, &bearer, 500_000).await;

    let response = server
        .post(&format!(
            "/api/v1/policies/{}/cancel",
            policy["id"].as_str().expect("id")
        ))
        .authorization_bearer(&bearer)
        .json(&json!({ "reason": "changed my mind" }))
        .await;
    response.assert_status_ok();
    let cancelled: Value = response.json();
    assert_eq!(cancelled["status"], "cancelled");
    assert!(cancelled["activated_at"].is_null());
}

#[tokio::test]
async fn test_foreign_policy_reads_as_missing() {
    let server = spawn_server("").await;
    let owner = authenticate(&server, "policy.owner").await;
    let policy = purchase_policy(&server, &owner, 500_000).await;

    let stranger = authenticate(&server, "policy.stranger").await;
    let policy_path = format!("/api/v1/policies/{}", policy["id"].as_str().expect("id"));

    server
        .get(&policy_path)
        .authorization_bearer(&stranger)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .post(&format!("{policy_path}/cancel"))
        .authorization_bearer(&stranger)
        .json(&json!({ "reason": null }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

fn claim_form(policy_id: &str, amount: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("policy_id", policy_id.to_string())
        .add_text("claim_type", "hospitalization")
        .add_text("loss_date", Utc::now().date_naive().to_string())
        .add_text("amount", amount.to_string())
        .add_text("description", "Three-day hospital admission")
}

fn document_part() -> Part {
    Part::bytes(b"%PDF-1.4 discharge summary".to_vec())
        .file_name("discharge-summary.pdf")
        .mime_type("application/pdf")
}

#[tokio::test]
async fn test_claim_intake_stores_documents() {
    let server = spawn_server("").await;
    let bearer = authenticate(&server, "claim.filer").await;
    let policy = purchase_policy(&server, &bearer, 500_000).await;
    let policy_id = policy["id"].as_str().expect("id");

    let form = claim_form(policy_id, "80000")
        .add_part("document", document_part())
        .add_part(
            "document",
            Part::bytes(b"itemized bill".to_vec()).file_name("bill.pdf"),
        );
    let response = server
        .post("/api/v1/claims")
        .authorization_bearer(&bearer)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::CREATED);
    let claim: Value = response.json();

    assert_eq!(claim["status"], "submitted");
    assert_eq!(claim["claim_type"], "hospitalization");
    assert_eq!(decimal(&claim["claimed_amount"]), dec!(80000));
    assert!(claim["claim_number"]
        .as_str()
        .expect("claim number")
        .starts_with("CLM"));
    let documents = claim["documents"].as_array().expect("documents");
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["file_name"], "discharge-summary.pdf");
}

#[tokio::test]
async fn test_claim_requires_a_document() {
    let server = spawn_server("").await;
    let bearer = authenticate(&server, "no.papers").await;
    let policy = purchase_policy(&server, &bearer, 500_000).await;

    let response = server
        .post("/api/v1/claims")
        .authorization_bearer(&bearer)
        .multipart(claim_form(policy["id"].as_str().expect("id"), "80000"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_claim_cannot_exceed_cover() {
    let server = spawn_server("").await;
    let bearer = authenticate(&server, "over.claimer").await;
    let policy = purchase_policy(&server, &bearer, 500_000).await;

    let form = claim_form(policy["id"].as_str().expect("id"), "600000")
        .add_part("document", document_part());
    let response = server
        .post("/api/v1/claims")
        .authorization_bearer(&bearer)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_claim_on_cancelled_policy_conflicts() {
    let server = spawn_server("").await;
    let bearer = authenticate(&server, "late.claimer").await;
    let policy = purchase_policy(&server, &bearer, 500_000).await;
    let policy_id = policy["id"].as_str().expect("id").to_string();

    server
        .post(&format!("/api/v1/policies/{policy_id}/cancel"))
        .authorization_bearer(&bearer)
        .json(&json!({ "reason": "cooling off" }))
        .await
        .assert_status_ok();

    let form = claim_form(&policy_id, "80000").add_part("document", document_part());
    let response = server
        .post("/api/v1/claims")
        .authorization_bearer(&bearer)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_adjudication_requires_adjuster_role() {
    let server = spawn_server("").await;
    let bearer = authenticate(&server, "plain.customer").await;
    let policy = purchase_policy(&server, &bearer, 500_000).await;

    let form = claim_form(policy["id"].as_str().expect("id"), "80000")
        .add_part("document", document_part());
    let claim: Value = server
        .post("/api/v1/claims")
        .authorization_bearer(&bearer)
        .multipart(form)
        .await
        .json();

    server
        .put(&format!(
            "/api/v1/claims/{}/status",
            claim["id"].as_str().expect("id")
        ))
        .authorization_bearer(&bearer)
        .json(&json!({ "status": "under_review" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    // The cross-customer queue is also off limits
    server
        .get("/api/v1/claims")
        .add_query_param("status", "submitted")
        .authorization_bearer(&bearer)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_adjuster_reviews_and_approves_claim() {
    let server = spawn_server("claims.desk").await;
    let customer = authenticate(&server, "claim.holder").await;
    let adjuster = authenticate(&server, "claims.desk").await;

    let policy = purchase_policy(&server, &customer, 500_000).await;
    let form = claim_form(policy["id"].as_str().expect("id"), "80000")
        .add_part("document", document_part());
    let claim: Value = server
        .post("/api/v1/claims")
        .authorization_bearer(&customer)
        .multipart(form)
        .await
        .json();
    let claim_id = claim["id"].as_str().expect("id").to_string();

    // The submitted queue shows the new claim
    let queue: Vec<Value> = server
        .get("/api/v1/claims")
        .add_query_param("status", "submitted")
        .authorization_bearer(&adjuster)
        .await
        .json();
    assert!(queue.iter().any(|c| c["id"] == claim["id"]));

    let status_path = format!("/api/v1/claims/{claim_id}/status");
    let reviewed: Value = server
        .put(&status_path)
        .authorization_bearer(&adjuster)
        .json(&json!({ "status": "under_review" }))
        .await
        .json();
    assert_eq!(reviewed["status"], "under_review");

    let approved_response = server
        .put(&status_path)
        .authorization_bearer(&adjuster)
        .json(&json!({ "status": "approved", "note": "documents verified" }))
        .await;
    approved_response.assert_status_ok();
    let approved: Value = approved_response.json();
    assert_eq!(approved["status"], "approved");
    assert_eq!(approved["decision_note"], "documents verified");

    // Approval is terminal
    server
        .put(&status_path)
        .authorization_bearer(&adjuster)
        .json(&json!({ "status": "rejected" }))
        .await
        .assert_status(StatusCode::CONFLICT);

    // The customer sees the decision
    let mine: Vec<Value> = server
        .get("/api/v1/claims")
        .authorization_bearer(&customer)
        .await
        .json();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["status"], "approved");
}

#[tokio::test]
async fn test_support_report_lifecycle() {
    let server = spawn_server("claims.desk").await;
    let customer = authenticate(&server, "unhappy.customer").await;
    let adjuster = authenticate(&server, "claims.desk").await;

    let response = server
        .post("/api/v1/support/reports")
        .authorization_bearer(&customer)
        .json(&json!({
            "category": "unauthorized_transaction",
            "subject": "Premium debited twice",
            "description": "Two debits of the same premium on the same day",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let report: Value = response.json();
    assert_eq!(report["status"], "submitted");
    assert_eq!(report["category"], "unauthorized_transaction");

    let mine: Vec<Value> = server
        .get("/api/v1/support/reports")
        .authorization_bearer(&customer)
        .await
        .json();
    assert_eq!(mine.len(), 1);

    let status_path = format!(
        "/api/v1/support/reports/{}/status",
        report["id"].as_str().expect("id")
    );
    let in_progress: Value = server
        .put(&status_path)
        .authorization_bearer(&adjuster)
        .json(&json!({ "status": "in_progress" }))
        .await
        .json();
    assert_eq!(in_progress["status"], "in_progress");

    // Resolving needs a note
    server
        .put(&status_path)
        .authorization_bearer(&adjuster)
        .json(&json!({ "status": "resolved" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let resolved: Value = server
        .put(&status_path)
        .authorization_bearer(&adjuster)
        .json(&json!({ "status": "resolved", "resolution_note": "duplicate debit reversed" }))
        .await
        .json();
    assert_eq!(resolved["status"], "resolved");
    assert_eq!(resolved["resolution_note"], "duplicate debit reversed");
}

#[tokio::test]
async fn test_profile_and_photo_upload() {
    let server = spawn_server("").await;
    let bearer = authenticate(&server, "selfie.customer").await;

    let me: Value = server
        .get("/api/v1/customers/me")
        .authorization_bearer(&bearer)
        .await
        .json();
    assert_eq!(me["username"], "selfie.customer");
    assert!(me["profile_photo"].is_null());
    assert!(me["last_login"].is_string());

    let form = MultipartForm::new().add_part(
        "photo",
        Part::bytes(b"\x89PNG fake image bytes".to_vec())
            .file_name("portrait.png")
            .mime_type("image/png"),
    );
    let updated_response = server
        .post("/api/v1/customers/me/photo")
        .authorization_bearer(&bearer)
        .multipart(form)
        .await;
    updated_response.assert_status_ok();
    let updated: Value = updated_response.json();
    let stored = updated["profile_photo"].as_str().expect("photo path");
    assert!(stored.contains("profile_photos/"));
    assert!(stored.ends_with(".png"));
}
