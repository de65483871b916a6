//! Recommendation listing endpoint.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use mentor_core::ranker::LISTING_LIMIT;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{RecommendationsQuery, RecommendationsResponse};

/// Parse the optional `limit` query value.
fn parse_limit(raw: Option<&str>) -> AppResult<usize> {
    match raw.map(str::trim) {
        None | Some("") => Ok(LISTING_LIMIT),
        Some(v) => v
            .parse::<usize>()
            .map_err(|_| AppError::Validation(format!("Invalid limit: {v}"))),
    }
}

/// `GET /api/recommendations`: filter the catalog by tag and difficulty.
pub async fn list_handler(
    State(state): State<AppState>,
    query: Result<Query<RecommendationsQuery>, QueryRejection>,
) -> AppResult<Json<RecommendationsResponse>> {
    let Query(params) = query?;
    let limit = parse_limit(params.limit.as_deref())?;
    let category = params.category.as_deref().filter(|c| !c.is_empty());
    let difficulty = params.difficulty.as_deref().filter(|d| !d.is_empty());

    let matches = state.relay.ranker().catalog().filter(category, difficulty);
    let total = matches.len();
    let recommendations = matches.into_iter().take(limit).cloned().collect();

    Ok(Json(RecommendationsResponse {
        recommendations,
        total,
    }))
}
