//! Session authentication middleware.
//!
//! The admin check runs after authentication and reads the flag from
//! the freshly loaded user row, never from the token. Revoking admin
//! in storage takes effect on the next request.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;
use crate::services::CurrentUser;

/// Session authentication middleware.
///
/// Extracts the bearer token from the Authorization header, resolves
/// it to a user record, and injects the CurrentUser into the request
/// extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let current_user = state.identity.authenticate(token).await?;

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require the admin flag, returns Forbidden error if not admin.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Admin gate middleware, layered after `auth_middleware`.
pub async fn require_admin_middleware(
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;

    require_admin(user)?;

    Ok(next.run(request).await)
}
