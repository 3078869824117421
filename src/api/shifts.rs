//! Shift API endpoints.

use axum::extract::{Query, State};

use super::{success, ApiResult};
use crate::models::{Page, PageQuery, Shift};
use crate::AppState;

/// GET /api/shifts - List shifts, paged.
pub async fn list_shifts(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> ApiResult<Page<Shift>> {
    let page = state.repo.list_shifts(params.page, params.size).await?;
    success(page)
}
