/// Authentication endpoints
use crate::{
    account::{LoginRequest, RegisterRequest, RegisterResponse},
    api::middleware::extract_client_info,
    auth::{AuthContext, OptionalAuthContext},
    context::AppContext,
    db::account::AccountShape,
    error::HermitResult,
};
use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};

/// Build authentication routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/check", get(check))
}

/// Register a new account. The account starts pending and cannot log in
/// until a moderator approves it.
async fn register(
    State(ctx): State<AppContext>,
    Json(req): Json<RegisterRequest>,
) -> HermitResult<Json<RegisterResponse>> {
    let shape = match req.shape.as_deref() {
        Some(s) => AccountShape::parse(s)?,
        None => AccountShape::Basic,
    };

    let user_id = ctx
        .account_manager
        .register(&req.email, &req.password, &req.name, shape)
        .await?;

    tracing::info!(user_id, "account registered");

    Ok(Json(RegisterResponse {
        success: true,
        user_id,
    }))
}

/// Log in and open a session. The session id doubles as the bearer token.
async fn login(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> HermitResult<Json<serde_json::Value>> {
    let client = extract_client_info(&headers);
    let user = ctx
        .account_manager
        .login(&req.email, &req.password, &client)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "token": user.session_id,
        "user": {
            "id": user.id,
            "email": user.email,
            "name": user.name,
            "type": user.shape,
        }
    })))
}

/// Close the current session
async fn logout(
    State(ctx): State<AppContext>,
    auth: AuthContext,
) -> HermitResult<Json<serde_json::Value>> {
    ctx.account_manager.logout(&auth.user.session_id).await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Report whether the caller holds a valid session. Never fails; an
/// invalid or absent token yields `logged_in: false`.
async fn check(auth: OptionalAuthContext) -> Json<serde_json::Value> {
    match auth.user {
        Some(user) => Json(serde_json::json!({
            "logged_in": true,
            "user": {
                "id": user.id,
                "email": user.email,
                "name": user.name,
                "type": user.shape,
            }
        })),
        None => Json(serde_json::json!({ "logged_in": false })),
    }
}
