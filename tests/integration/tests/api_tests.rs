//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance reachable through
//! `DATABASE_URL`. Migrations are applied on startup and an admin account
//! is seeded from `ADMIN_EMAIL`/`ADMIN_PASSWORD` (test defaults apply).
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    admin_booking, assert_error, assert_json, assert_status, attorney_body, check_test_env, create_attorney,
    create_lab_test, create_user, day_offset, id_at, insert_google_user, png_icon, register_attorney,
    register_client, service_form, token_of, unique_suffix, RegisterRequest, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login_client() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = register_client(&server).await.unwrap();

    let response = server
        .post("/api/users/login", &client.registration.login())
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["user"]["id"], client.id.as_str());
    assert_eq!(body["user"]["role"], "Client");
    assert!(!token_of(&body).unwrap().is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let first = server.post("/api/users/register", &request).await.unwrap();
    assert_status(first, StatusCode::CREATED).await.unwrap();

    let second = server.post("/api/users/register", &request).await.unwrap();
    let error = assert_error(second, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["message"], "User already exists");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = register_client(&server).await.unwrap();

    let response = server
        .post(
            "/api/users/login",
            &json!({ "email": client.registration.email, "password": "wrong-password" }),
        )
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_profile_round_trip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = register_client(&server).await.unwrap();

    let response = server
        .put_auth("/api/users/profile", &client.token, &json!({ "phone": "555-0100" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/users/profile", &client.token).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["user"]["phone"], "555-0100");
    assert_eq!(body["user"]["name"], client.registration.name.as_str());
}

#[tokio::test]
async fn test_deactivated_client_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let client = register_client(&server).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/admin/users/{}", client.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // A wrong password must not reveal the account state
    let response = server
        .post(
            "/api/users/login",
            &json!({ "email": client.registration.email, "password": "wrong-password" }),
        )
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["message"], "Invalid credentials");

    let response = server
        .post("/api/users/login", &client.registration.login())
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error["message"], "Account has been deactivated");
}

#[tokio::test]
async fn test_unknown_gmail_login_suggests_google() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let email = format!("nobody{}@gmail.com", unique_suffix());

    let response = server
        .post("/api/users/login", &json!({ "email": email, "password": "whatever123" }))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["details"]["isGmailAddress"], true);
    assert_eq!(error["details"]["suggestGoogleLogin"], true);
}

#[tokio::test]
async fn test_google_account_sets_password_then_logs_in() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let email = format!("google{}@gmail.com", unique_suffix());
    insert_google_user(&server, &email).await.unwrap();

    let response = server
        .post("/api/users/login", &json!({ "email": email, "password": "guess-123" }))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["details"]["requiresPasswordSetup"], true);
    assert_eq!(error["details"]["isGoogleUser"], true);

    let response = server
        .post(
            "/api/users/set-password",
            &json!({ "email": email, "newPassword": "NewPass123!" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post("/api/users/login", &json!({ "email": email, "password": "NewPass123!" }))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(token_of(&body).is_ok());
}

#[tokio::test]
async fn test_set_password_refuses_password_accounts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = register_client(&server).await.unwrap();

    let response = server
        .post(
            "/api/users/set-password",
            &json!({ "email": client.registration.email, "newPassword": "NewPass123!" }),
        )
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["message"], "This feature is only for Google users");
}

#[tokio::test]
async fn test_attorney_forgot_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let attorney = register_attorney(&server).await.unwrap();

    let response = server
        .post(
            "/api/users/attorney-forgot-password",
            &json!({ "email": attorney.email, "newPassword": "short" }),
        )
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["message"], "Password must be at least 6 characters long");

    let response = server
        .post(
            "/api/users/attorney-forgot-password",
            &json!({ "email": format!("ghost{}@example.com", unique_suffix()), "newPassword": "Longer123!" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post(
            "/api/users/attorney-forgot-password",
            &json!({ "email": attorney.email, "newPassword": "Longer123!" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post(
            "/api/users/login",
            &json!({ "email": attorney.email, "password": "Longer123!", "role": "Attorney" }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["attorney"]["id"], attorney.id.as_str());
}

// ============================================================================
// Admin Access Tests
// ============================================================================

#[tokio::test]
async fn test_admin_routes_reject_missing_and_non_admin_tokens() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/admin/users").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let client = register_client(&server).await.unwrap();
    let response = server.get_auth("/api/admin/users", &client.token).await.unwrap();
    let error = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error["message"], "Only admins can access this endpoint");
}

#[tokio::test]
async fn test_admin_login_rejects_client_accounts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = register_client(&server).await.unwrap();

    let response = server
        .post("/api/admin/login", &client.registration.login())
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_admin_login_is_recorded_in_history() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();

    let response = server.get_auth("/api/admin/login-history", &token).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    let admins = body["admins"].as_array().unwrap();
    let seeded = admins
        .iter()
        .find(|a| a["email"] == integration_tests::TEST_ADMIN_EMAIL)
        .expect("seeded admin missing from history");
    assert!(seeded["loginCount"].as_i64().unwrap() >= 1);
    assert!(!seeded["recentLogins"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_default_grant_differs_from_full_grant() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();

    let plain_user = create_user(&server, &token).await.unwrap();
    let response = server
        .post_auth("/api/admin/create", &token, &json!({ "userId": plain_user }))
        .await
        .unwrap();
    let created: Value = assert_json(response, StatusCode::OK).await.unwrap();

    let promoted_client = register_client(&server).await.unwrap();
    let response = server
        .post_auth(
            "/api/admin/promote-to-admin",
            &token,
            &json!({ "email": promoted_client.registration.email }),
        )
        .await
        .unwrap();
    let promoted: Value = assert_json(response, StatusCode::OK).await.unwrap();

    let default_grant = created["admin"]["permissions"].as_array().unwrap();
    let full_grant = promoted["admin"]["permissions"].as_array().unwrap();
    assert_ne!(default_grant, full_grant);
    assert_eq!(full_grant.len(), 10);
    assert!(default_grant.len() < full_grant.len());
}

#[tokio::test]
async fn test_creating_admin_twice_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let user_id = create_user(&server, &token).await.unwrap();

    let first = server
        .post_auth("/api/admin/create", &token, &json!({ "userId": user_id }))
        .await
        .unwrap();
    assert_status(first, StatusCode::OK).await.unwrap();

    let second = server
        .post_auth("/api/admin/create", &token, &json!({ "userId": user_id }))
        .await
        .unwrap();
    let error = assert_error(second, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["message"], "User is already an admin");
}

#[tokio::test]
async fn test_removing_admin_demotes_user_to_client() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let user_id = create_user(&server, &token).await.unwrap();

    let response = server
        .post_auth("/api/admin/create", &token, &json!({ "userId": user_id }))
        .await
        .unwrap();
    let created: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let admin_id = id_at(&created, "/admin/id").unwrap();

    let response = server
        .delete_auth(&format!("/api/admin/{admin_id}"), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/admin/list", &token).await.unwrap();
    let list: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(list["admins"]
        .as_array()
        .unwrap()
        .iter()
        .all(|a| a["id"] != admin_id.as_str()));

    let response = server.get_auth("/api/admin/all-users", &token).await.unwrap();
    let all: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let user = all["users"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["id"] == user_id.as_str())
        .expect("demoted user missing");
    assert_eq!(user["role"], "Client");
}

// ============================================================================
// User Management Tests
// ============================================================================

#[tokio::test]
async fn test_soft_deleted_users_only_appear_in_all_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let user_id = create_user(&server, &token).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/admin/users/{user_id}"), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/admin/users", &token).await.unwrap();
    let active: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(active["users"]
        .as_array()
        .unwrap()
        .iter()
        .all(|u| u["id"] != user_id.as_str()));

    let response = server.get_auth("/api/admin/all-users", &token).await.unwrap();
    let all: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let deleted = all["users"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["id"] == user_id.as_str())
        .expect("soft-deleted user missing from all-users");
    assert_eq!(deleted["status"], "inactive");
    assert_eq!(deleted["deletionReason"], "Admin soft delete");

    let response = server
        .put_auth(&format!("/api/admin/users/{user_id}/restore"), &token, &json!({}))
        .await
        .unwrap();
    let restored: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(restored["user"]["status"], "active");
}

// ============================================================================
// Attorney Tests
// ============================================================================

#[tokio::test]
async fn test_create_attorney_persists_record() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let user_id = create_user(&server, &token).await.unwrap();

    let response = server
        .post_auth("/api/admin/doctors", &token, &attorney_body(&user_id))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let attorney_id = id_at(&body, "/attorney/id").unwrap();
    assert_eq!(body["attorney"]["specialization"], "Family Law");

    let response = server.get_auth("/api/admin/doctors", &token).await.unwrap();
    let list: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(list["attorneys"]
        .as_array()
        .unwrap()
        .iter()
        .any(|a| a["id"] == attorney_id.as_str()));
}

#[tokio::test]
async fn test_create_attorney_requires_core_fields() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();

    let response = server
        .post_auth("/api/admin/doctors", &token, &json!({ "specialization": "Tax" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Appointment Tests
// ============================================================================

#[tokio::test]
async fn test_booking_same_slot_twice_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let attorney_id = create_attorney(&server, &token).await.unwrap();
    let client = register_client(&server).await.unwrap();

    let booking = json!({
        "attorneyId": attorney_id,
        "date": day_offset(7),
        "time": "10:30",
        "symptoms": "Lease dispute",
    });

    let first = server
        .post_auth("/api/appointments", &client.token, &booking)
        .await
        .unwrap();
    let body: Value = assert_json(first, StatusCode::CREATED).await.unwrap();
    assert_eq!(body["appointment"]["status"], "Pending");

    let second = server
        .post_auth("/api/appointments", &client.token, &booking)
        .await
        .unwrap();
    let error = assert_error(second, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["message"], "This time slot is already booked");

    // The admin path honours the same rule
    let third = server
        .post_auth(
            "/api/admin/appointments",
            &token,
            &admin_booking(&client.id, &attorney_id, day_offset(7), "10:30", None),
        )
        .await
        .unwrap();
    assert_status(third, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_admin_booking_defaults_to_confirmed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let attorney_id = create_attorney(&server, &token).await.unwrap();
    let client = register_client(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/admin/appointments",
            &token,
            &admin_booking(&client.id, &attorney_id, day_offset(3), "09:00", None),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(body["appointment"]["status"], "Confirmed");

    let response = server.get_auth("/api/users/dashboard", &client.token).await.unwrap();
    let dashboard: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(dashboard["stats"]["totalAppointments"], 1);
    assert_eq!(dashboard["stats"]["upcomingAppointments"], 1);
}

#[tokio::test]
async fn test_invalid_appointment_status_lists_valid_values() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let attorney_id = create_attorney(&server, &token).await.unwrap();
    let client = register_client(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/admin/appointments",
            &token,
            &admin_booking(&client.id, &attorney_id, day_offset(2), "14:00", None),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let appointment_id = id_at(&body, "/appointment/id").unwrap();

    let response = server
        .put_auth(
            &format!("/api/admin/appointments/{appointment_id}/status"),
            &token,
            &json!({ "status": "Postponed" }),
        )
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(error["message"].as_str().unwrap().contains("Completed"));
}

#[tokio::test]
async fn test_expiry_sweep_skips_finished_appointments() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let attorney_id = create_attorney(&server, &token).await.unwrap();
    let client = register_client(&server).await.unwrap();

    let mut ids = Vec::new();
    for (time, status) in [("08:00", "Pending"), ("09:00", "Completed"), ("10:00", "Cancelled")] {
        let response = server
            .post_auth(
                "/api/admin/appointments",
                &token,
                &admin_booking(&client.id, &attorney_id, day_offset(-2), time, Some(status)),
            )
            .await
            .unwrap();
        let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
        ids.push((id_at(&body, "/appointment/id").unwrap(), status));
    }

    let response = server
        .post_auth("/api/admin/mark-expired", &token, &json!({}))
        .await
        .unwrap();
    let sweep: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(sweep["modifiedCount"].as_u64().unwrap() >= 1);

    let response = server.get_auth("/api/admin/appointments", &token).await.unwrap();
    let list: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let appointments = list["appointments"].as_array().unwrap();

    for (id, original) in ids {
        let found = appointments
            .iter()
            .find(|a| a["id"] == id.as_str())
            .expect("appointment missing from list");
        let expected = if original == "Pending" { "Expired" } else { original };
        assert_eq!(found["status"], expected, "appointment booked as {original}");
    }
}

// ============================================================================
// Feedback Tests
// ============================================================================

#[tokio::test]
async fn test_feedback_respond_defaults_to_reviewed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let client = register_client(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/feedback",
            &client.token,
            &json!({ "subject": "Slow reply", "message": "Took a week to hear back", "rating": 2 }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let feedback_id = id_at(&body, "/feedback/id").unwrap();
    assert_eq!(body["feedback"]["status"], "Pending");

    let response = server
        .put_auth(
            &format!("/api/admin/feedback/{feedback_id}/respond"),
            &token,
            &json!({ "admin_response": "Sorry about that, we have added staff." }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["feedback"]["status"], "Reviewed");
    assert!(body["feedback"]["responded_at"].is_string());

    let response = server
        .get_auth("/api/admin/feedback?status=Reviewed", &token)
        .await
        .unwrap();
    let list: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(list["feedbacks"]
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f["id"] == feedback_id.as_str()));
}

#[tokio::test]
async fn test_feedback_rating_out_of_range() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = register_client(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/feedback",
            &client.token,
            &json!({ "subject": "Great", "message": "Great", "rating": 9 }),
        )
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["message"], "Rating must be between 1 and 5");
}

#[tokio::test]
async fn test_attorney_token_cannot_submit_feedback() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let attorney = register_attorney(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/feedback",
            &attorney.token,
            &json!({ "subject": "Portal", "message": "Works well", "rating": 4 }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_deactivated_client_token_cannot_submit_feedback() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let client = register_client(&server).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/admin/users/{}", client.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth(
            "/api/feedback",
            &client.token,
            &json!({ "subject": "Billing", "message": "Invoice was late", "rating": 2 }),
        )
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error["message"], "Account has been deactivated");
}

// ============================================================================
// Lab Test Tests
// ============================================================================

#[tokio::test]
async fn test_lab_test_with_bookings_cannot_be_deleted() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let test_id = create_lab_test(&server, &token).await.unwrap();
    let client = register_client(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/lab-tests/bookings",
            &client.token,
            &json!({ "testId": test_id, "date": day_offset(5), "time": "11:00" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/admin/lab-tests/{test_id}"), &token)
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(
        error["message"],
        "Cannot delete lab test. There are 1 booking(s) associated with this test."
    );
}

#[tokio::test]
async fn test_lab_test_names_are_unique() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let name = format!("Deed check {}", integration_tests::unique_suffix());

    let body = json!({ "test_name": name, "price": 40.0 });
    let first = server.post_auth("/api/admin/lab-tests", &token, &body).await.unwrap();
    assert_status(first, StatusCode::CREATED).await.unwrap();

    let padded = json!({ "test_name": format!("  {name}  "), "price": 45.0 });
    let second = server.post_auth("/api/admin/lab-tests", &token, &padded).await.unwrap();
    assert_status(second, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Consultation Tests
// ============================================================================

#[tokio::test]
async fn test_admin_reply_is_prefixed_and_sent_as_attorney() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let attorney_id = create_attorney(&server, &token).await.unwrap();
    let client = register_client(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/consultations",
            &client.token,
            &json!({ "attorneyId": attorney_id, "subject": "Custody schedule" }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let consultation_id = id_at(&body, "/consultation/id").unwrap();

    let response = server
        .post_auth(
            &format!("/api/consultations/{consultation_id}/messages"),
            &client.token,
            &json!({ "message": "Can we move the weekend handover?" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/admin/consultations/{consultation_id}/reply"),
            &token,
            &json!({ "message": "An attorney will confirm by Friday." }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(&format!("/api/admin/consultations/{consultation_id}/messages"), &token)
        .await
        .unwrap();
    let thread: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let messages = thread["messages"].as_array().unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["sender_role"], "Client");
    assert_eq!(messages[1]["sender_role"], "Attorney");
    assert_eq!(messages[1]["message"], "[Admin Reply] An attorney will confirm by Friday.");
}

#[tokio::test]
async fn test_consultation_is_private_to_participants() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let attorney_id = create_attorney(&server, &token).await.unwrap();
    let owner = register_client(&server).await.unwrap();
    let stranger = register_client(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/consultations",
            &owner.token,
            &json!({ "attorneyId": attorney_id, "subject": "Contract review" }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let consultation_id = id_at(&body, "/consultation/id").unwrap();

    let response = server
        .get_auth(&format!("/api/consultations/{consultation_id}/messages"), &stranger.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Catalogue Tests
// ============================================================================

#[tokio::test]
async fn test_public_service_list_is_open() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/services").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body["services"].is_array());
}

#[tokio::test]
async fn test_service_create_requires_image_icon() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let name = format!("Notary {}", unique_suffix());

    let response = server
        .post_multipart_auth("/api/admin/services", &token, service_form(&name, None).unwrap())
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["message"], "Service icon file is required");

    let svg = Some(("icon.svg", "image/svg+xml", b"<svg xmlns='http://www.w3.org/2000/svg'/>".to_vec()));
    let response = server
        .post_multipart_auth("/api/admin/services", &token, service_form(&name, svg).unwrap())
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["code"], "INVALID_FILE_TYPE");
}

#[tokio::test]
async fn test_deleted_service_leaves_list_and_frees_its_name() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let name = format!("Probate {}", unique_suffix());

    let response = server
        .post_multipart_auth("/api/admin/services", &token, service_form(&name, png_icon()).unwrap())
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let service_id = id_at(&body, "/service/id").unwrap();
    assert!(body["service"]["icon_file"]
        .as_str()
        .unwrap()
        .starts_with("/uploads/service-icons/"));

    let response = server
        .post_multipart_auth("/api/admin/services", &token, service_form(&name, png_icon()).unwrap())
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["message"], "Service name already exists");

    let response = server
        .delete_auth(&format!("/api/admin/services/{service_id}"), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/api/services").await.unwrap();
    let list: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(list["services"]
        .as_array()
        .unwrap()
        .iter()
        .all(|svc| svc["id"] != service_id.as_str()));

    let response = server
        .post_multipart_auth("/api/admin/services", &token, service_form(&name, png_icon()).unwrap())
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_ne!(id_at(&body, "/service/id").unwrap(), service_id);
}
