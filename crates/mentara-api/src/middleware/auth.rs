use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use mentara_auth::jwt::{TokenKeys, bearer_token, validate_token};

use crate::error::ApiError;

/// JWT validation middleware.
///
/// Extracts the `Authorization: Bearer <token>` header and validates the
/// JWT. On success, inserts [`AuthUser`] into request extensions for
/// handlers to use.
pub async fn require_auth(
    State(keys): State<TokenKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let token = bearer_token(header)?;
    let claims = validate_token(token, keys.decoding_key())?;

    req.extensions_mut().insert(AuthUser {
        sub: claims.sub,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

/// Authenticated user extracted from JWT claims.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub sub: String,
    pub email: Option<String>,
}
