use crate::api::{ApiError, AppState};
use crate::auth::{generate_token, UserId};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/auth/login", post(login))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    identifier: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    message: String,
    user: UserSummary,
    token: String,
}

/// Public view of a user; the password hash never leaves storage
#[derive(Debug, Serialize)]
struct UserSummary {
    id: UserId,
    email: String,
    username: String,
}

/// POST /api/auth/login - verify credentials and issue a token
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (identifier, password) = match (req.identifier, req.password) {
        (Some(identifier), Some(password)) if !identifier.is_empty() && !password.is_empty() => {
            (identifier, password)
        }
        _ => {
            return Err(ApiError::BadRequest(
                "Email/username and password are required".to_string(),
            ))
        }
    };

    let user = state
        .storage
        .find_user(&identifier)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "Login error");
            ApiError::Internal("Internal server error".to_string())
        })?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    if !user.verify_password(&password) {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = generate_token(&state.auth, &user, Utc::now()).map_err(|err| {
        tracing::error!(error = %err, "Login error");
        ApiError::Internal("Internal server error".to_string())
    })?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: UserSummary {
            id: user.id,
            email: user.email,
            username: user.username,
        },
        token,
    }))
}
