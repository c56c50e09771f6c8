use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::router;
use crate::auth::TokenIssuer;
use crate::entities::user::Role;
use crate::state::AppState;
use crate::testing::{memory_database, seed_category};
use crate::users;

const SECRET: &str = "router-test-secret-0123456789";

struct Harness {
    app: axum::Router,
    admin_token: String,
    category_id: i32,
}

async fn harness() -> Harness {
    let db = memory_database().await;
    let category = seed_category(&db, "General Trade").await;
    let admin = users::find_or_create_admin(&db, "root", "9000000001")
        .await
        .unwrap();
    let tokens = Arc::new(TokenIssuer::new(SECRET, 1));
    let admin_token = tokens.issue(admin.id, Role::Admin).unwrap();
    let state = AppState::new(db, tokens, "1111");
    Harness {
        app: router(state, &[]),
        admin_token,
        category_id: category.id,
    }
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn acme_body(category_id: i32) -> Value {
    json!({
        "user": {"username": "acme1", "email": "a@x.com", "phone": "9990001111"},
        "wholesaler": {
            "businessName": "Acme Traders",
            "businessCategoryId": category_id,
            "ownerName": "Raj",
            "businessAddress": "123 Street"
        }
    })
}

#[tokio::test]
async fn health_endpoints_respond() {
    let h = harness().await;
    let (status, body) = send(&h.app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "live");

    let (status, body) = send(&h.app, "GET", "/health/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn admin_routes_require_admin_token() {
    let h = harness().await;
    let (status, body) = send(&h.app, "GET", "/api/admin/wholesalers", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &h.app,
        "GET",
        "/api/admin/wholesalers",
        Some("garbage"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let retailer = TokenIssuer::new(SECRET, 1).issue(99, Role::Retailer).unwrap();
    let (status, body) = send(&h.app, "GET", "/api/admin/wholesalers", Some(retailer.as_str()), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn onboarding_flow_over_http() {
    let h = harness().await;
    let token = Some(h.admin_token.as_str());

    let (status, body) = send(
        &h.app,
        "POST",
        "/api/admin/wholesalers",
        token,
        Some(acme_body(h.category_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "pending");
    let id = body["data"]["wholesalerId"].as_i64().unwrap();

    let (status, body) = send(
        &h.app,
        "POST",
        "/api/admin/wholesalers",
        token,
        Some(acme_body(h.category_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let documents_uri = format!("/api/admin/wholesalers/{id}/documents");
    let docs = json!({"gstCertificateUrl": "https://cdn.example.com/gst.pdf"});
    let (status, body) = send(&h.app, "POST", &documents_uri, token, Some(docs.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["documentsCreated"], true);
    let (status, body) = send(&h.app, "POST", &documents_uri, token, Some(docs)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Documents have already been submitted");

    let (status, body) = send(
        &h.app,
        "PATCH",
        &format!("/api/admin/wholesalers/{id}/documents/status"),
        token,
        Some(json!({"pan_card_status": "under_review"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["updatedFields"], json!(["pan_card_status"]));

    let (status, body) = send(
        &h.app,
        "PATCH",
        &format!("/api/admin/wholesalers/{id}/status"),
        token,
        Some(json!({"status": "under_review"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userVerified"], false);

    let (status, body) = send(
        &h.app,
        "PATCH",
        &format!("/api/admin/wholesalers/{id}/verify"),
        token,
        Some(json!({"status": "verified", "initialCreditLimit": 25000, "adminNote": "ok"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "verified");
    assert_eq!(body["data"]["userVerified"], true);
    assert_eq!(body["data"]["documentsStatus"]["cancelledChequeStatus"], "verified");

    let (status, body) = send(
        &h.app,
        "GET",
        &format!("/api/admin/wholesalers/{id}"),
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["creditLimit"], 25000.0);
    assert_eq!(body["data"]["documents"]["panCard"]["status"], "verified");
}

#[tokio::test]
async fn invalid_payloads_are_bad_requests() {
    let h = harness().await;
    let token = Some(h.admin_token.as_str());

    let mut body = acme_body(h.category_id);
    body["user"]["phone"] = json!("12345");
    let (status, response) =
        send(&h.app, "POST", "/api/admin/wholesalers", token, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);

    let (status, response) = send(
        &h.app,
        "POST",
        "/api/admin/wholesalers",
        token,
        Some(acme_body(h.category_id + 10)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Invalid reference to a related record");

    let (status, response) = send(
        &h.app,
        "PATCH",
        "/api/admin/wholesalers/1/documents/status",
        token,
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response["message"],
        "At least one document status must be provided"
    );

    let (status, _) = send(
        &h.app,
        "PATCH",
        "/api/admin/wholesalers/404/status",
        token,
        Some(json!({"status": "verified"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn self_signup_flow_over_http() {
    let h = harness().await;

    let (status, body) = send(
        &h.app,
        "POST",
        "/api/auth/wholesaler/signup",
        None,
        Some(json!({"phone": "8880001111", "otp": "1111", "businessCategoryId": h.category_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &h.app,
        "POST",
        "/api/wholesaler/profile",
        Some(token.as_str()),
        Some(json!({"businessName": "Sharma Wholesale", "email": "owner@sharma.in"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "profile_pending");

    let (status, body) = send(
        &h.app,
        "POST",
        "/api/wholesaler/profile/documents",
        Some(token.as_str()),
        Some(json!({"panCardUrl": "https://cdn.example.com/pan.png"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");

    let (status, body) = send(&h.app, "GET", "/api/wholesaler/profile", Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phoneNumber"], "8880001111");

    let (status, _) = send(
        &h.app,
        "GET",
        "/api/wholesaler/profile",
        Some(h.admin_token.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &h.app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"phone": "8880001111", "otp": "2222"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid OTP");
}

#[tokio::test]
async fn business_category_routes() {
    let h = harness().await;
    let token = Some(h.admin_token.as_str());

    let (status, body) = send(
        &h.app,
        "POST",
        "/api/admin/business-categories",
        token,
        Some(json!({"name": "Electronics"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &h.app,
        "PATCH",
        &format!("/api/admin/business-categories/{id}/status"),
        token,
        Some(json!({"status": "inactive"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "inactive");

    let (status, body) = send(
        &h.app,
        "GET",
        "/api/admin/business-categories?search=elec&status=inactive",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);

    let (status, _) = send(
        &h.app,
        "DELETE",
        &format!("/api/admin/business-categories/{id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &h.app,
        "DELETE",
        &format!("/api/admin/business-categories/{id}"),
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_requests_use_the_envelope() {
    let h = harness().await;
    let token = Some(h.admin_token.as_str());

    let (status, body) = send(
        &h.app,
        "POST",
        "/api/admin/wholesalers",
        token,
        Some(acme_body(h.category_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["wholesalerId"].as_i64().unwrap();
    let verify_uri = format!("/api/admin/wholesalers/{id}/verify");

    let (status, body) = send(
        &h.app,
        "PATCH",
        &verify_uri,
        token,
        Some(json!({"status": "approved"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Request body has missing or invalid fields");
    assert_eq!(body["data"], Value::Null);

    let request = Request::builder()
        .method("PATCH")
        .uri(&verify_uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", h.admin_token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"status\": "))
        .unwrap();
    let response = h.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Request body is not valid JSON");

    let (status, body) = send(
        &h.app,
        "GET",
        "/api/admin/wholesalers/acme",
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid path parameter");

    let (status, body) = send(
        &h.app,
        "GET",
        "/api/admin/wholesalers?limit=many",
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid query parameters");

    let (status, body) = send(&h.app, "GET", &format!("/api/admin/wholesalers/{id}"), token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "pending");
}

#[tokio::test]
async fn register_refuses_admin_role() {
    let h = harness().await;

    let (status, body) = send(
        &h.app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"username": "mallory", "phone": "7770001111", "role": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &h.app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"phone": "7770001111", "otp": "1111"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &h.app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"username": "corner-shop", "phone": "7770002222", "role": "retailer"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "retailer");
}
