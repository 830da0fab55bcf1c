//! Handlers for the current-user profile and the admin user surface.
//!
//! `/users/me` is available to any authenticated user; the role field is
//! read-only there. The collection and `/users/{username}` routes are
//! admin-only and may set roles.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use revue_core::error::CoreError;
use revue_core::roles::ALL_ROLES;
use revue_core::validators::validate_username;
use revue_db::models::user::{CreateUser, UpdateUser, UserResponse};
use revue_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Body for `PATCH /users/me`. No role field: users cannot change their own role.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMeRequest {
    #[validate(
        length(min = 1, max = 150),
        custom(function = validate_username)
    )]
    pub username: Option<String>,
    #[validate(email, length(max = 254))]
    pub email: Option<String>,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

/// Body for `POST /users` (admin).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        length(min = 1, max = 150),
        custom(function = validate_username)
    )]
    pub username: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
}

/// Body for `PATCH /users/{username}` (admin).
#[derive(Debug, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    #[validate(
        length(min = 1, max = 150),
        custom(function = validate_username)
    )]
    pub username: Option<String>,
    #[validate(email, length(max = 254))]
    pub email: Option<String>,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
}

/// Reject role values outside the known set.
fn validate_role(role: &Option<String>) -> AppResult<()> {
    if let Some(role) = role {
        if !ALL_ROLES.contains(&role.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Invalid role '{}'. Must be one of: {}",
                role,
                ALL_ROLES.join(", ")
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Current user
// ---------------------------------------------------------------------------

/// GET /api/v1/users/me
///
/// The authenticated user's own profile.
pub async fn get_me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            key: auth.user_id.to_string(),
        }))?;

    Ok(Json(UserResponse::from(user)))
}

/// PATCH /api/v1/users/me
///
/// Update the authenticated user's own profile. Role is read-only here.
pub async fn patch_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateMeRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let update = UpdateUser {
        username: input.username,
        email: input.email,
        first_name: input.first_name,
        last_name: input.last_name,
        bio: input.bio,
        role: None,
    };

    let user = UserRepo::update_by_id(&state.pool, auth.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            key: auth.user_id.to_string(),
        }))?;

    tracing::info!(user_id = user.id, "Profile updated");

    Ok(Json(UserResponse::from(user)))
}

// ---------------------------------------------------------------------------
// Admin surface
// ---------------------------------------------------------------------------

/// GET /api/v1/users
///
/// List all users in username order. Admin only.
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(users))
}

/// POST /api/v1/users
///
/// Create a user with an optional explicit role. Admin only.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_role(&input.role)?;

    let create = CreateUser {
        username: input.username,
        email: input.email,
        first_name: input.first_name.unwrap_or_default(),
        last_name: input.last_name.unwrap_or_default(),
        bio: input.bio.unwrap_or_default(),
        role: input
            .role
            .unwrap_or_else(|| revue_core::roles::ROLE_USER.to_string()),
    };

    let user = UserRepo::create(&state.pool, &create).await?;

    tracing::info!(user_id = user.id, username = %user.username, admin_id = admin.user_id, "User created by admin");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/v1/users/{username}
///
/// A single user's profile. Admin only.
pub async fn get_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            key: username,
        }))?;

    Ok(Json(UserResponse::from(user)))
}

/// PATCH /api/v1/users/{username}
///
/// Update any field of a user, including role. Admin only.
pub async fn patch_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(input): Json<AdminUpdateUserRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_role(&input.role)?;

    let update = UpdateUser {
        username: input.username,
        email: input.email,
        first_name: input.first_name,
        last_name: input.last_name,
        bio: input.bio,
        role: input.role,
    };

    let user = UserRepo::update_by_username(&state.pool, &username, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            key: username,
        }))?;

    tracing::info!(user_id = user.id, admin_id = admin.user_id, "User updated by admin");

    Ok(Json(UserResponse::from(user)))
}

/// DELETE /api/v1/users/{username}
///
/// Delete a user. Admin only.
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = UserRepo::delete_by_username(&state.pool, &username).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            key: username,
        }));
    }

    tracing::info!(username = %username, admin_id = admin.user_id, "User deleted by admin");

    Ok(StatusCode::NO_CONTENT)
}
