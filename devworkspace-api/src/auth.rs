use crate::{error::ApiError, state::AppState};
use axum::{
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};
use devworkspace_client::{Credentials, DevWorkspaceClient};
use std::sync::Arc;

/// Header set by oauth2-proxy when it forwards the caller's access token.
const FORWARDED_ACCESS_TOKEN: &str = "x-forwarded-access-token";

/// Auth middleware - extracts the caller's cluster token
///
/// The token is taken from `Authorization: Bearer <token>`, falling back to
/// the `X-Forwarded-Access-Token` header set by oauth2-proxy. The gateway
/// never validates the token itself; it is handed to the client factory,
/// and the cluster decides what the caller may do.
pub async fn auth_middleware(mut req: Request, next: Next) -> Result<Response, StatusCode> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .or_else(|| {
            req.headers()
                .get(FORWARDED_ACCESS_TOKEN)
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|t| !t.is_empty())
        })
        .map(|t| t.to_string());

    // If no token, return 401
    let token = token.ok_or(StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(Credentials::bearer(token));

    Ok(next.run(req).await)
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// DevWorkspace client built for the caller of the current request.
pub struct DevWorkspaceApi(pub Arc<dyn DevWorkspaceClient>);

impl FromRequestParts<AppState> for DevWorkspaceApi {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials = parts
            .extensions
            .get::<Credentials>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("missing credentials".to_string()))?;

        let client = state.clients.client_for(&credentials).await?;
        Ok(DevWorkspaceApi(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer  abc "), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
    }
}
