//! Registration and login handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use auth_service_lib::token::IssuedToken;
use common::AppResult;
use domain::Registration;

use crate::extractors::ValidatedJson;
use crate::state::AppState;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Collaborator registration request
#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Login code
    #[validate(custom(function = "not_blank", message = "Collaborator code is required"))]
    #[schema(example = "E1")]
    pub code: String,
    /// Display name
    #[validate(custom(function = "not_blank", message = "Display name is required"))]
    #[schema(example = "Alice Martin")]
    pub display_name: String,
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "Password is required"))]
    #[schema(example = "Secret1")]
    pub password: String,
    /// Must repeat `password` exactly
    #[validate(custom(function = "not_blank", message = "Password confirmation is required"))]
    #[schema(example = "Secret1")]
    pub password_confirmation: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            code: request.code.trim().to_string(),
            display_name: request.display_name.trim().to_string(),
            email: request.email.trim().to_string(),
            password: request.password,
            password_confirmation: request.password_confirmation,
        }
    }
}

/// Collaborator login request
#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(custom(function = "not_blank", message = "Collaborator code is required"))]
    #[schema(example = "E1")]
    pub code: String,
    #[validate(custom(function = "not_blank", message = "Password is required"))]
    #[schema(example = "Secret1")]
    pub password: String,
}

/// Token payload returned by register and login
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Seconds until the token expires
    #[schema(example = 86400)]
    pub expires_in: i64,
}

impl AuthResponse {
    fn new(message: &str, token: IssuedToken) -> Self {
        Self {
            message: message.to_string(),
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
        }
    }
}

/// Create registration and login routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new collaborator
#[utoipa::path(
    post,
    path = "/api/collaborators/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Collaborator registered, token issued", body = AuthResponse),
        (status = 400, description = "Validation error or passwords do not match"),
        (status = 409, description = "Email address or code already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let token = state.auth.register(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new("Collaborator registered successfully", token)),
    ))
}

/// Log in with code and password
#[utoipa::path(
    post,
    path = "/api/collaborators/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Incorrect password"),
        (status = 404, description = "Unknown collaborator code")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token = state.auth.login(payload.code.trim(), &payload.password).await?;

    Ok(Json(AuthResponse::new("Login successful", token)))
}
