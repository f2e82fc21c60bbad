//! User account and login handlers

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::models::{
    normalize_email, CreateUserRequest, LoginRequest, LoginResponse, MessageResponse, NewUser,
    UpdateUserRequest, UserChanges, UserResponse,
};
use super::services::UsersService;
use crate::auth::AuthedUser;
use crate::common::{safe_email_log, ApiError, AppState, JsonBody, Validator};

/// POST /api/users - Register a new account
///
/// # Request Body
/// ```json
/// { "name": "Ana", "email": "a@x.com", "password": "secret1" }
/// ```
pub async fn register(
    Extension(state): Extension<Arc<AppState>>,
    JsonBody(request): JsonBody<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate(&request).into_result()?;

    // Validation guarantees all three are present.
    let (Some(name), Some(email), Some(password)) =
        (request.name, request.email, request.password)
    else {
        return Err(ApiError::ValidationError("Missing required fields".to_string()));
    };
    let email = normalize_email(&email);

    let users = UsersService::new(state.db.clone());
    if users.find_by_email(&email).await?.is_some() {
        warn!(email = %safe_email_log(&email), "Registration rejected: email already registered");
        return Err(ApiError::Conflict("Email is already registered".to_string()));
    }

    let password_hash = state.credentials.hash_password(&password).await?;

    let user_id = users
        .insert(NewUser {
            name: name.trim().to_string(),
            email,
            password_hash,
        })
        .await?;

    let user = users.find_by_id(&user_id).await?.ok_or_else(|| {
        ApiError::InternalServer("created user could not be read back".to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: "User created successfully!".to_string(),
            user,
        }),
    ))
}

/// POST /api/users/login - Exchange email and password for a token
///
/// # Response
/// ```json
/// { "message": "Login successful", "token": "<jwt>" }
/// ```
pub async fn login(
    Extension(state): Extension<Arc<AppState>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate(&request).into_result()?;

    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(ApiError::ValidationError("Missing required fields".to_string()));
    };
    let email = normalize_email(&email);

    let users = UsersService::new(state.db.clone());
    let user = match users.find_by_email(&email).await? {
        Some(user) => user,
        None => {
            // Same cost as a real check so response time does not reveal the account.
            state.credentials.verify_dummy_password(&password).await?;
            warn!(email = %safe_email_log(&email), "Login failed: unknown email");
            return Err(ApiError::CredentialMismatch);
        }
    };

    let matches = state
        .credentials
        .verify_password(&password, &user.password_hash)
        .await
        .map_err(|e| {
            error!(user_id = %user.id, error = %e, "Password verification failed");
            ApiError::from(e)
        })?;

    if !matches {
        warn!(user_id = %user.id, "Login failed: wrong password");
        return Err(ApiError::CredentialMismatch);
    }

    let token = state
        .tokens
        .issue(&user.id, &user.email)
        .map_err(|e| ApiError::InternalServer(format!("token signing failed: {}", e)))?;

    info!(user_id = %user.id, email = %safe_email_log(&user.email), "User logged in");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

/// GET /api/users/me - Claims of the authenticated caller
pub async fn me(user: AuthedUser) -> impl IntoResponse {
    Json(user.claims)
}

/// GET /api/users - List all accounts
pub async fn list_users(
    Extension(state): Extension<Arc<AppState>>,
    _user: AuthedUser,
) -> Result<impl IntoResponse, ApiError> {
    let users = UsersService::new(state.db.clone()).list().await?;
    Ok(Json(users))
}

/// GET /api/users/:id - Get one account
pub async fn get_user(
    Extension(state): Extension<Arc<AppState>>,
    _user: AuthedUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = UsersService::new(state.db.clone())
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// PUT /api/users/:id - Update name or email of the caller's own account
pub async fn update_user(
    Extension(state): Extension<Arc<AppState>>,
    user: AuthedUser,
    Path(user_id): Path<String>,
    JsonBody(request): JsonBody<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if user.id != user_id {
        return Err(ApiError::Forbidden(
            "You can only modify your own account".to_string(),
        ));
    }
    request.validate(&request).into_result()?;

    let changes = UserChanges {
        name: request.name.map(|n| n.trim().to_string()),
        email: request.email.as_deref().map(normalize_email),
    };

    let updated = UsersService::new(state.db.clone())
        .update(&user_id, changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        message: "User updated successfully!".to_string(),
        user: updated,
    }))
}

/// DELETE /api/users/:id - Delete the caller's own account
pub async fn delete_user(
    Extension(state): Extension<Arc<AppState>>,
    user: AuthedUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if user.id != user_id {
        return Err(ApiError::Forbidden(
            "You can only delete your own account".to_string(),
        ));
    }

    if !UsersService::new(state.db.clone()).delete(&user_id).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "User deleted successfully!".to_string(),
    }))
}
