/// Moderation dashboard endpoints. Every route requires a valid session.
use crate::{
    auth::AuthContext,
    context::AppContext,
    error::HermitResult,
    moderation::{ModerationStats, SignupView},
};
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Build admin routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/admin/signups", get(list_signups))
        .route("/api/admin/signups/status", post(update_status))
        .route("/api/admin/stats", get(stats))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
    #[serde(default)]
    search: String,
    #[serde(default)]
    status: String,
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Serialize)]
struct ListResponse {
    success: bool,
    data: Vec<SignupView>,
}

/// Browse signups with optional search and status filter
async fn list_signups(
    State(ctx): State<AppContext>,
    _auth: AuthContext,
    Query(query): Query<ListQuery>,
) -> HermitResult<Json<ListResponse>> {
    let limit = query.limit.clamp(1, 200);
    let offset = query.offset.max(0);

    let rows = ctx
        .moderation
        .list_signups(limit, offset, &query.search, &query.status)
        .await?;

    Ok(Json(ListResponse {
        success: true,
        data: rows,
    }))
}

#[derive(Debug, Deserialize)]
struct UpdateStatusRequest {
    user_id: i64,
    status: String,
}

/// Set an account's moderation status
async fn update_status(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Json(req): Json<UpdateStatusRequest>,
) -> HermitResult<Json<serde_json::Value>> {
    let affected = ctx.moderation.update_status(req.user_id, &req.status).await?;

    tracing::info!(
        moderator = auth.user.id,
        target = req.user_id,
        status = %req.status,
        "moderation decision"
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "updated": affected
    })))
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    success: bool,
    data: ModerationStats,
}

/// Aggregate dashboard counts
async fn stats(
    State(ctx): State<AppContext>,
    _auth: AuthContext,
) -> HermitResult<Json<StatsResponse>> {
    let data = ctx.moderation.stats().await?;

    Ok(Json(StatsResponse {
        success: true,
        data,
    }))
}
