//! End-to-end page tests: login flow, role gating, table rendering.

mod common;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ─── Auth flow ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthenticated_dashboard_redirects_to_login() {
    let backend = MockServer::start().await;
    let server = common::test_server(common::create_test_state(&backend.uri()));

    for route in ["/dashboard", "/dashboard/members", "/dashboard/profile"] {
        let response = server.get(route).await;
        response.assert_status(axum::http::StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/login");
    }
}

#[tokio::test]
async fn test_garbage_session_cookie_redirects_to_login() {
    let backend = MockServer::start().await;
    let server = common::test_server(common::create_test_state(&backend.uri()));

    let response = server
        .get("/dashboard")
        .add_header("Cookie", common::session_header("not-a-signed-cookie"))
        .await;
    response.assert_status(axum::http::StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login");
}

#[tokio::test]
async fn test_login_failure_rerenders_form_with_message() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(common::rejection("Invalid credentials")),
        )
        .mount(&backend)
        .await;

    let server = common::test_server(common::create_test_state(&backend.uri()));
    let response = server
        .post("/login")
        .form(&json!({ "email": "dana@gym.test", "password": "wrong" }))
        .await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("Invalid credentials"));
    assert!(text.contains("dana@gym.test"));
}

#[tokio::test]
async fn test_login_opens_session_and_dashboard_renders() {
    let backend = MockServer::start().await;
    let server = common::test_server(common::create_test_state(&backend.uri()));

    let cookie = common::login_session(&server, &backend, "admin").await;

    // Unstubbed /meta endpoints fail and every overview section degrades;
    // the page still renders.
    let response = server
        .get("/dashboard")
        .add_header("Cookie", common::session_header(&cookie))
        .await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("Overview"));
    assert!(text.contains("Dana Cole"));
    assert!(text.contains("No recent members"));
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "message": "ok", "data": null,
            "timestamp": "2026-08-07T00:00:00Z"
        })))
        .mount(&backend)
        .await;

    let server = common::test_server(common::create_test_state(&backend.uri()));
    let cookie = common::login_session(&server, &backend, "admin").await;

    let response = server
        .post("/logout")
        .add_header("Cookie", common::session_header(&cookie))
        .await;
    response.assert_status(axum::http::StatusCode::SEE_OTHER);

    // The old cookie no longer maps to a session.
    let response = server
        .get("/dashboard")
        .add_header("Cookie", common::session_header(&cookie))
        .await;
    response.assert_status(axum::http::StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login");
}

// ─── Role gating ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_member_role_cannot_open_admin_pages() {
    let backend = MockServer::start().await;
    let server = common::test_server(common::create_test_state(&backend.uri()));
    let cookie = common::login_session(&server, &backend, "member").await;

    for route in ["/dashboard/members", "/dashboard/payments", "/dashboard/plans"] {
        let response = server
            .get(route)
            .add_header("Cookie", common::session_header(&cookie))
            .await;
        response.assert_status(axum::http::StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_admin_cannot_open_user_administration() {
    let backend = MockServer::start().await;
    let server = common::test_server(common::create_test_state(&backend.uri()));
    let cookie = common::login_session(&server, &backend, "admin").await;

    let response = server
        .get("/dashboard/users")
        .add_header("Cookie", common::session_header(&cookie))
        .await;
    response.assert_status(axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_member_dashboard_redirects_to_profile() {
    let backend = MockServer::start().await;
    let server = common::test_server(common::create_test_state(&backend.uri()));
    let cookie = common::login_session(&server, &backend, "member").await;

    let response = server
        .get("/dashboard")
        .add_header("Cookie", common::session_header(&cookie))
        .await;
    response.assert_status(axum::http::StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/dashboard/profile");
}

// ─── Server-side table rendering ─────────────────────────────────────────────

#[tokio::test]
async fn test_members_page_renders_backend_rows_and_page_links() {
    let backend = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/member"))
        .and(query_param("search", "ann"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope_page(
            json!([
                common::member_json("m1", "Ann Ruiz", "ann@example.com"),
                common::member_json("m2", "Annika Berg", "annika@example.com"),
            ]),
            1,
            10,
            25,
        )))
        .mount(&backend)
        .await;

    // The plan filter select degrades to empty when /plan is unstubbed.
    let server = common::test_server(common::create_test_state(&backend.uri()));
    let cookie = common::login_session(&server, &backend, "admin").await;

    let response = server
        .get("/dashboard/members")
        .add_query_param("search", "ann")
        .add_header("Cookie", common::session_header(&cookie))
        .await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("Ann Ruiz"));
    assert!(text.contains("Annika Berg"));

    // Page 1 of 3: previous disabled, next keeps the search term.
    assert!(text.contains("/dashboard/members?search=ann&amp;page=2"));
    assert!(text.contains("Page 1 of 3 (25 total)"));
}

#[tokio::test]
async fn test_members_page_renders_placeholder_when_empty() {
    let backend = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/member"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::envelope_page(json!([]), 1, 10, 0)),
        )
        .mount(&backend)
        .await;

    let server = common::test_server(common::create_test_state(&backend.uri()));
    let cookie = common::login_session(&server, &backend, "admin").await;

    let response = server
        .get("/dashboard/members")
        .add_header("Cookie", common::session_header(&cookie))
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("No members found"));
}

// ─── Public pages ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_home_page_renders_public_plans() {
    let backend = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plan"))
        .and(query_param("isActive", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!([
            common::plan_json("p1", "Gold", 49.5)
        ]))))
        .mount(&backend)
        .await;

    let server = common::test_server(common::create_test_state(&backend.uri()));
    let response = server.get("/").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("Gold"));
    assert!(text.contains("$49.50"));
}

#[tokio::test]
async fn test_home_page_degrades_when_backend_is_down() {
    let backend = MockServer::start().await;
    // No /plan stub: the fetch fails and the section renders empty.

    let server = common::test_server(common::create_test_state(&backend.uri()));
    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("temporarily unavailable"));
}
