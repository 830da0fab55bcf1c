//! Handlers for the signup and token-exchange flow.
//!
//! Registration is passwordless: a signup yields a confirmation code
//! delivered by email, and the token endpoint exchanges a valid code for a
//! JWT access token. Repeating a signup for the same (username, email) pair
//! simply re-delivers the code.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use revue_core::error::CoreError;
use revue_core::validators::validate_username;
use revue_db::models::user::CreateUser;
use revue_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::auth::confirmation::{generate_code, verify_code};
use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /api/v1/auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(
        length(min = 1, max = 150),
        custom(function = validate_username)
    )]
    pub username: String,
    #[validate(email, length(max = 254))]
    pub email: String,
}

/// Response body for a successful signup: the submitted identity, echoed.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub username: String,
    pub email: String,
}

/// Request body for `POST /api/v1/auth/token`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub confirmation_code: String,
}

/// POST /api/v1/auth/signup
///
/// Register a new user, or re-trigger code delivery for an existing one.
/// A (username, email) pair that half-matches an existing account (same
/// username with a different email, or vice versa) is rejected with 400.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let by_username = UserRepo::find_by_username(&state.pool, &input.username).await?;
    let by_email = UserRepo::find_by_email(&state.pool, &input.email).await?;

    let user = match (by_username, by_email) {
        (Some(u), Some(e)) if u.id == e.id => u,
        (Some(_), _) => {
            return Err(AppError::Core(CoreError::Validation(
                "A user with this username already exists".into(),
            )));
        }
        (None, Some(_)) => {
            return Err(AppError::Core(CoreError::Validation(
                "A user with this email already exists".into(),
            )));
        }
        (None, None) => {
            let created = UserRepo::create(
                &state.pool,
                &CreateUser::from_signup(&input.username, &input.email),
            )
            .await?;
            tracing::info!(user_id = created.id, username = %created.username, "User registered");
            created
        }
    };

    let code = generate_code(user.id, &user.username, &user.email, &state.config.jwt.secret);
    state
        .mailer
        .send_confirmation_code(&user.email, &user.username, &code)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to send confirmation code: {e}")))?;

    Ok(Json(SignupResponse {
        username: user.username,
        email: user.email,
    }))
}

/// POST /api/v1/auth/token
///
/// Exchange a confirmation code for a JWT access token. An unknown username
/// yields 404; a wrong code for a known user yields 400.
pub async fn token(
    State(state): State<AppState>,
    Json(input): Json<TokenRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            key: input.username.clone(),
        }))?;

    if !verify_code(
        user.id,
        &user.username,
        &user.email,
        &state.config.jwt.secret,
        &input.confirmation_code,
    ) {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid confirmation code".into(),
        )));
    }

    let token = generate_access_token(user.id, &user.role, user.is_superuser, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to issue token: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, "Access token issued");

    Ok(Json(json!({ "token": token })))
}
