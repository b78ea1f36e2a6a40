//! Session boundary: resolves the caller's role from the request

use crate::contract::AuthContext;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::convert::Infallible;
use std::sync::Arc;

/// Shared token list the extractor checks bearer tokens against.
/// Tokens come from the config file or environment; an empty list means the
/// service runs read-only.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    admin_tokens: Vec<String>,
}

impl AuthState {
    pub fn new(admin_tokens: Vec<String>) -> Self {
        Self { admin_tokens }
    }

    fn context_for_token(&self, token: &str) -> AuthContext {
        if self.admin_tokens.iter().any(|t| t == token) {
            AuthContext::admin(Some("admin-token".to_string()))
        } else {
            AuthContext::viewer()
        }
    }
}

/// Every request resolves to a context; unknown or absent credentials fall
/// back to the viewer role rather than rejecting the request. Reads stay
/// open, writes fail later with 403.
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(auth_state) = parts.extensions.get::<Arc<AuthState>>() else {
            return Ok(AuthContext::viewer());
        };
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        Ok(match token {
            Some(token) => auth_state.context_for_token(token),
            None => AuthContext::viewer(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_token_grants_admin() {
        let state = AuthState::new(vec!["secret".to_string()]);
        assert!(state.context_for_token("secret").is_admin);
    }

    #[test]
    fn unknown_token_stays_viewer() {
        let state = AuthState::new(vec!["secret".to_string()]);
        assert!(!state.context_for_token("wrong").is_admin);
    }

    #[test]
    fn empty_token_list_never_grants_admin() {
        let state = AuthState::default();
        assert!(!state.context_for_token("anything").is_admin);
    }
}
