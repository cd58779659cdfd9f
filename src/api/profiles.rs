/// Public profile browsing endpoints
use crate::{
    context::AppContext,
    error::{HermitError, HermitResult},
    profiles::{InterestCount, ProfileView},
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Build profile routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/profiles", get(list_profiles))
        .route("/api/profiles/:id", get(get_profile))
        .route("/api/interests", get(list_interests))
}

#[derive(Debug, Deserialize)]
struct BrowseQuery {
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
    #[serde(default)]
    search: String,
    #[serde(default)]
    interest: String,
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize)]
struct ProfileListResponse {
    success: bool,
    profiles: Vec<ProfileView>,
}

/// Browse approved profiles
async fn list_profiles(
    State(ctx): State<AppContext>,
    Query(query): Query<BrowseQuery>,
) -> HermitResult<Json<ProfileListResponse>> {
    let limit = query.limit.clamp(1, 100);
    let offset = query.offset.max(0);

    let rows = ctx
        .profiles
        .list_profiles(limit, offset, &query.search, &query.interest)
        .await?;

    Ok(Json(ProfileListResponse {
        success: true,
        profiles: rows,
    }))
}

#[derive(Debug, Serialize)]
struct ProfileResponse {
    success: bool,
    profile: ProfileView,
}

/// Fetch a single approved profile
async fn get_profile(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> HermitResult<Json<ProfileResponse>> {
    let profile = ctx
        .profiles
        .get_profile_by_id(id)
        .await?
        .ok_or_else(|| HermitError::NotFound(format!("profile {}", id)))?;

    Ok(Json(ProfileResponse {
        success: true,
        profile,
    }))
}

#[derive(Debug, Serialize)]
struct InterestListResponse {
    success: bool,
    data: Vec<InterestCount>,
}

/// Interest values in use across approved profiles, with counts
async fn list_interests(
    State(ctx): State<AppContext>,
) -> HermitResult<Json<InterestListResponse>> {
    let rows = ctx.profiles.list_interests().await?;

    Ok(Json(InterestListResponse {
        success: true,
        data: rows,
    }))
}
