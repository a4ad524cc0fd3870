#![allow(dead_code)]

use axum::Router;
use chrono::Utc;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use axum_test::TestServer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gym_portal::application::services::{
    AuthService, MemberService, MetaService, PaymentService, PlanService, TrainerService,
    UserService,
};
use gym_portal::application::session::MemoryTokenStore;
use gym_portal::infrastructure::backend::{
    BackendClient, HttpAuthGateway, HttpMemberGateway, HttpMetaGateway, HttpPaymentGateway,
    HttpPlanGateway, HttpTrainerGateway, HttpUserGateway,
};
use gym_portal::routes::unlimited_router;
use gym_portal::state::AppState;

pub const ACCESS_TOKEN: &str = "tok-access";
pub const REFRESH_TOKEN: &str = "tok-refresh";

/// Builds an `AppState` whose gateways point at the given stub backend.
pub fn create_test_state(backend_url: &str) -> AppState {
    let client = Arc::new(BackendClient::new(backend_url, Duration::from_secs(5)).unwrap());
    let store = Arc::new(MemoryTokenStore::new());

    let auth_gateway = Arc::new(HttpAuthGateway::new(
        client.clone(),
        Duration::from_secs(900),
        Duration::from_secs(604_800),
    ));
    let auth_service = Arc::new(AuthService::new(
        auth_gateway,
        store.clone(),
        "test-signing-secret".to_string(),
        Duration::from_secs(60),
    ));

    // No background worker in tests; the initial tick keeps /health happy.
    let (_tick_tx, tick_rx) = watch::channel(Utc::now());

    AppState {
        auth_service,
        member_service: Arc::new(MemberService::new(Arc::new(HttpMemberGateway::new(
            client.clone(),
        )))),
        trainer_service: Arc::new(TrainerService::new(Arc::new(HttpTrainerGateway::new(
            client.clone(),
        )))),
        plan_service: Arc::new(PlanService::new(Arc::new(HttpPlanGateway::new(
            client.clone(),
        )))),
        payment_service: Arc::new(PaymentService::new(Arc::new(HttpPaymentGateway::new(
            client.clone(),
        )))),
        user_service: Arc::new(UserService::new(Arc::new(HttpUserGateway::new(
            client.clone(),
        )))),
        meta_service: Arc::new(MetaService::new(Arc::new(HttpMetaGateway::new(client)))),
        store,
        refresh_ticks: tick_rx,
        refresh_interval: Duration::from_secs(840),
        cookie_secure: false,
    }
}

/// Test server over the full router, minus rate limiting.
pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(app(state)).unwrap()
}

pub fn app(state: AppState) -> Router {
    unlimited_router(state)
}

/// Wraps a payload in the backend's response envelope.
pub fn envelope(data: Value) -> Value {
    json!({
        "success": true,
        "message": "ok",
        "data": data,
        "timestamp": "2026-08-07T00:00:00Z"
    })
}

/// Envelope with a pagination descriptor.
pub fn envelope_page(data: Value, page: u32, limit: u32, total: u64) -> Value {
    let total_pages = (total as f64 / limit as f64).ceil() as u32;
    json!({
        "success": true,
        "message": "ok",
        "data": data,
        "meta": {
            "page": page,
            "limit": limit,
            "total": total,
            "totalPages": total_pages,
            "hasNext": page < total_pages,
            "hasPrev": page > 1
        },
        "timestamp": "2026-08-07T00:00:00Z"
    })
}

pub fn rejection(message: &str) -> Value {
    json!({
        "success": false,
        "message": message,
        "data": null,
        "timestamp": "2026-08-07T00:00:00Z"
    })
}

pub fn user_json(id: &str, name: &str, role: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{id}@gym.test"),
        "role": role,
        "isActive": true,
        "createdAt": "2026-01-05T10:00:00Z"
    })
}

pub fn member_json(id: &str, name: &str, email: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "phone": "+1 555 0100",
        "status": "active",
        "planId": "p1",
        "planName": "Gold",
        "joinedAt": "2026-02-01T09:00:00Z"
    })
}

pub fn plan_json(id: &str, name: &str, price: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "All access",
        "price": price,
        "durationMonths": 12,
        "features": ["Sauna", "Pool"],
        "isActive": true
    })
}

/// Stubs `POST /auth/login` to succeed as the given role, delivering the
/// token pair as `Set-Cookie` headers the way the backend does.
pub async fn mock_login(backend: &MockServer, role: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header(
                    "Set-Cookie",
                    format!("accessToken={ACCESS_TOKEN}; Max-Age=900; Path=/; HttpOnly"),
                )
                .append_header(
                    "Set-Cookie",
                    format!("refreshToken={REFRESH_TOKEN}; Max-Age=604800; Path=/; HttpOnly"),
                )
                .set_body_json(envelope(user_json("u1", "Dana Cole", role))),
        )
        .mount(backend)
        .await;
}

/// Logs in through the web form and returns the session cookie value.
pub async fn login_session(server: &TestServer, backend: &MockServer, role: &str) -> String {
    mock_login(backend, role).await;

    let response = server
        .post("/login")
        .form(&json!({ "email": "dana@gym.test", "password": "hunter2" }))
        .await;

    response.assert_status(axum::http::StatusCode::SEE_OTHER);
    response.cookie(gym_portal::application::session::SESSION_COOKIE)
        .value()
        .to_string()
}

/// Cookie header value for an authenticated request.
pub fn session_header(cookie_value: &str) -> String {
    format!(
        "{}={}",
        gym_portal::application::session::SESSION_COOKIE,
        cookie_value
    )
}
