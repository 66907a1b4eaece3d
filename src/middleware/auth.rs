use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Principal, Role};
use crate::error::ApiError;

/// Session middleware: validates the bearer token, builds a typed
/// [`Principal`] and injects it into request extensions. Every protected
/// route short-circuits here with 401 before any handler or query runs.
pub async fn require_session(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let principal = resolve_principal(request.headers())?;
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Like [`require_session`] but additionally rejects non-admin principals.
pub async fn require_admin(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let principal = resolve_principal(request.headers())?;
    if principal.role != Role::Admin {
        return Err(ApiError::forbidden("Admin access required"));
    }
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

fn resolve_principal(headers: &HeaderMap) -> Result<Principal, ApiError> {
    let token = extract_bearer_token(headers)?;

    auth::validate_token(&token).map_err(|e| {
        tracing::debug!("session rejected: {}", e);
        ApiError::unauthorized("Invalid or expired session")
    })
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        Some(_) => Err(ApiError::unauthorized("Empty bearer token")),
        None => Err(ApiError::unauthorized(
            "Authorization header must use Bearer token format",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let err = extract_bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let err = extract_bearer_token(&headers_with("Basic dXNlcjpwYXNz")).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn empty_bearer_token_is_rejected() {
        let err = extract_bearer_token(&headers_with("Bearer   ")).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn bearer_token_is_extracted() {
        let token = extract_bearer_token(&headers_with("Bearer abc.def.ghi")).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn garbage_token_never_yields_a_principal() {
        let err = resolve_principal(&headers_with("Bearer not-a-jwt")).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
