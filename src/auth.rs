/// Authentication extractors
use crate::{
    account::SessionUser,
    api::middleware::extract_bearer_token,
    context::AppContext,
    error::HermitError,
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

/// Authenticated context - extracts and validates the session token from
/// the request. An invalid or expired token is deactivated server-side by
/// the validation call before the request is rejected.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: SessionUser,
}

#[async_trait]
impl FromRequestParts<AppContext> for AuthContext {
    type Rejection = HermitError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers).ok_or(HermitError::Unauthenticated)?;

        let user = state
            .account_manager
            .validate_session(&token)
            .await?
            .ok_or(HermitError::Unauthenticated)?;

        Ok(AuthContext { user })
    }
}

/// Optional authenticated context - does not fail if no auth provided
#[derive(Debug, Clone)]
pub struct OptionalAuthContext {
    pub user: Option<SessionUser>,
}

#[async_trait]
impl FromRequestParts<AppContext> for OptionalAuthContext {
    type Rejection = HermitError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let user = match extract_bearer_token(&parts.headers) {
            Some(token) => state
                .account_manager
                .validate_session(&token)
                .await
                .unwrap_or(None),
            None => None,
        };

        Ok(OptionalAuthContext { user })
    }
}
