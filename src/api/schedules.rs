//! Work-schedule API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{BulkUpdateRequest, ScheduleDetail, UpdateDetailRequest};
use crate::AppState;

/// GET /api/work-schedule/staff/:staff_id - List a staff member's schedule details.
pub async fn list_staff_schedule(
    State(state): State<AppState>,
    Path(staff_id): Path<String>,
) -> ApiResult<Vec<ScheduleDetail>> {
    let details = state.repo.list_details_by_staff(&staff_id).await?;
    success(details)
}

/// PUT /api/work-schedules/bulk-update/:staff_id - Delete and insert details atomically.
pub async fn bulk_update_schedule(
    State(state): State<AppState>,
    Path(staff_id): Path<String>,
    Json(request): Json<BulkUpdateRequest>,
) -> ApiResult<Vec<ScheduleDetail>> {
    if staff_id.trim().is_empty() {
        return Err(AppError::BadRequest("Staff id is required".to_string()));
    }
    if let Some(entry) = request
        .new_schedules
        .iter()
        .find(|entry| entry.shift_id.trim().is_empty())
    {
        return Err(AppError::Validation(format!(
            "Shift is required for {}",
            entry.shift_date
        )));
    }

    let inserted = state.repo.bulk_update(&staff_id, &request).await?;
    tracing::info!(
        staff_id = %staff_id,
        deleted = request.ids_to_delete.len(),
        inserted = inserted.len(),
        "Work schedule bulk update"
    );
    success(inserted)
}

/// DELETE /api/work-schedule/:id - Delete a single detail.
pub async fn delete_schedule_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_detail(&id).await?;
    success(())
}

/// PUT /api/work-schedule/update-detail/:id - Update a detail in place.
pub async fn update_schedule_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateDetailRequest>,
) -> ApiResult<ScheduleDetail> {
    if request.shift.trim().is_empty() {
        return Err(AppError::Validation("Shift is required".to_string()));
    }

    let detail = state.repo.update_detail(&id, &request).await?;
    success(detail)
}
