/// Signup intake endpoint
use crate::{
    context::AppContext,
    error::HermitResult,
    intake::{BasicSignup, EnhancedSignup, SignupOutcome},
};
use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

/// Build signup routes
pub fn routes() -> Router<AppContext> {
    Router::new().route("/api/signup", post(signup))
}

/// Incoming signup payload, dispatched on the `form_type` field
#[derive(Debug, Deserialize)]
#[serde(tag = "form_type", rename_all = "lowercase")]
enum SignupRequest {
    Basic(BasicSignup),
    Enhanced(EnhancedSignup),
}

#[derive(Debug, serde::Serialize)]
struct SignupResponse {
    success: bool,
    data: SignupOutcome,
}

/// Accept a signup submission of either shape
async fn signup(
    State(ctx): State<AppContext>,
    Json(req): Json<SignupRequest>,
) -> HermitResult<Json<SignupResponse>> {
    let outcome = match req {
        SignupRequest::Basic(form) => ctx.intake.submit_basic(form).await?,
        SignupRequest::Enhanced(form) => ctx.intake.submit_enhanced(form).await?,
    };

    tracing::info!(id = outcome.id, signup_type = %outcome.signup_type, "signup accepted");

    Ok(Json(SignupResponse {
        success: true,
        data: outcome,
    }))
}
