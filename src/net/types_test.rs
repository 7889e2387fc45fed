use super::*;

// =============================================================================
// ApiError classification
// =============================================================================

#[test]
fn unauthorized_statuses_map_to_auth_failure() {
    for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
        let err = ApiError::from_status(status, None);
        assert!(matches!(err, ApiError::Unauthorized { .. }), "{status}");
        assert!(err.is_auth_failure());
    }
}

#[test]
fn validation_statuses_keep_code_and_message() {
    let err = ApiError::from_status(StatusCode::CONFLICT, Some("User already exists".into()));
    assert_eq!(
        err,
        ApiError::Validation { status: 409, message: Some("User already exists".into()) }
    );
    assert!(!err.is_auth_failure());
}

#[test]
fn not_found_status_maps_to_not_found() {
    let err = ApiError::from_status(StatusCode::NOT_FOUND, Some("User not found".into()));
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[test]
fn other_statuses_map_to_server() {
    let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, None);
    assert_eq!(err, ApiError::Server { status: 500, message: None });
}

#[test]
fn user_message_prefers_backend_message() {
    let err = ApiError::Unauthorized { message: Some("Invalid credentials".into()) };
    assert_eq!(err.user_message("Login failed"), "Invalid credentials");
}

#[test]
fn user_message_falls_back_when_missing_or_blank() {
    let missing = ApiError::Server { status: 502, message: None };
    assert_eq!(missing.user_message("Login failed"), "Login failed");

    let blank = ApiError::Validation { status: 400, message: Some("  ".into()) };
    assert_eq!(blank.user_message("Registration failed"), "Registration failed");

    let network = ApiError::Network("connection refused".into());
    assert_eq!(network.user_message("Failed to load the menu"), "Failed to load the menu");
}

#[test]
fn display_is_readable() {
    let err = ApiError::Unauthorized { message: None };
    assert_eq!(err.to_string(), "authentication failed: unauthorized");
    assert_eq!(ApiError::NotAuthenticated.to_string(), "not logged in");
}

// =============================================================================
// Wire formats
// =============================================================================

#[test]
fn food_parses_backend_shape() {
    let json = serde_json::json!({
        "_id": "64f0c1",
        "name": "Paneer Tikka",
        "price": 249.5,
        "description": "Smoky cottage cheese",
        "category": "Spicy",
        "image": "/uploads/paneer.png",
        "__v": 0
    });
    let food: Food = serde_json::from_value(json).unwrap();
    assert_eq!(food.id, "64f0c1");
    assert_eq!(food.price, Decimal::new(2495, 1));
    assert_eq!(food.category.as_deref(), Some("Spicy"));
    assert_eq!(food.image.as_deref(), Some("/uploads/paneer.png"));
}

#[test]
fn food_optional_fields_default_to_none() {
    let json = serde_json::json!({ "_id": "1", "name": "Water", "price": 10 });
    let food: Food = serde_json::from_value(json).unwrap();
    assert_eq!(food.price, Decimal::from(10));
    assert!(food.description.is_none());
    assert!(food.category.is_none());
    assert!(food.image.is_none());
}

#[test]
fn profile_parses_created_at() {
    let json = serde_json::json!({
        "username": "asha",
        "email": "asha@example.com",
        "createdAt": "2024-01-15T10:30:00.000Z"
    });
    let profile: UserProfile = serde_json::from_value(json).unwrap();
    assert_eq!(profile.username, "asha");
    assert_eq!(profile.member_since().as_deref(), Some("2024-01-15"));
}

#[test]
fn profile_tolerates_missing_email_and_date() {
    let json = serde_json::json!({ "username": "asha" });
    let profile: UserProfile = serde_json::from_value(json).unwrap();
    assert!(profile.email.is_none());
    assert!(profile.member_since().is_none());
}

#[test]
fn password_change_uses_camel_case() {
    let body = PasswordChange { old_password: "a", new_password: "b" };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "oldPassword": "a", "newPassword": "b" }));
}

#[test]
fn message_response_allows_empty_object() {
    let body: MessageResponse = serde_json::from_str("{}").unwrap();
    assert!(body.message.is_none());
}
