//! Database repository for shifts and schedule details.
//!
//! Uses prepared statements and transactions for data integrity.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    BulkUpdateRequest, Page, ScheduleDetail, ScheduleStatus, Shift, ShiftKind,
    UpdateDetailRequest,
};

/// Largest page the shift listing will return.
pub const MAX_PAGE_SIZE: u32 = 100;

const DETAIL_COLUMNS: &str = "id, staff_id, shift_id, shift_date, status, note";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== SHIFT OPERATIONS ====================

    /// List one page of shifts, ordered by start time.
    pub async fn list_shifts(&self, page: u32, size: u32) -> Result<Page<Shift>, AppError> {
        let size = size.clamp(1, MAX_PAGE_SIZE);
        let offset = i64::from(page) * i64::from(size);

        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM shifts")
            .fetch_one(&self.pool)
            .await?
            .try_get("total")?;

        let rows = sqlx::query(
            "SELECT id, name, kind, start_time, end_time FROM shifts ORDER BY start_time, end_time, id LIMIT ? OFFSET ?",
        )
        .bind(i64::from(size))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let content = rows
            .iter()
            .map(shift_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            content,
            page,
            size,
            total_elements: u64::try_from(total).unwrap_or(0),
        })
    }

    // ==================== SCHEDULE DETAIL OPERATIONS ====================

    /// List all schedule details of one staff member.
    pub async fn list_details_by_staff(
        &self,
        staff_id: &str,
    ) -> Result<Vec<ScheduleDetail>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {DETAIL_COLUMNS} FROM schedule_details WHERE staff_id = ? ORDER BY shift_date, created_at, id"
        ))
        .bind(staff_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(detail_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Get a schedule detail by ID.
    pub async fn get_detail(&self, id: &str) -> Result<Option<ScheduleDetail>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {DETAIL_COLUMNS} FROM schedule_details WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(detail_from_row).transpose()?)
    }

    /// Delete and insert schedule details for one staff member in a single transaction.
    ///
    /// Ids to delete must belong to `staff_id`; repeated ids count once. Any
    /// unknown id or unresolvable shift rolls the whole batch back. Returns the
    /// inserted details.
    pub async fn bulk_update(
        &self,
        staff_id: &str,
        request: &BulkUpdateRequest,
    ) -> Result<Vec<ScheduleDetail>, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut seen = HashSet::new();
        for id in request
            .ids_to_delete
            .iter()
            .filter(|id| seen.insert(*id))
        {
            let result =
                sqlx::query("DELETE FROM schedule_details WHERE id = ? AND staff_id = ?")
                    .bind(id)
                    .bind(staff_id)
                    .execute(&mut *tx)
                    .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::NotFound(format!(
                    "Schedule detail {} not found for staff {}",
                    id, staff_id
                )));
            }
        }

        let mut inserted = Vec::with_capacity(request.new_schedules.len());
        for entry in &request.new_schedules {
            let shift_id = resolve_shift_id(&mut *tx, &entry.shift_id).await?;
            let id = uuid::Uuid::new_v4().to_string();
            let now = Utc::now().to_rfc3339();

            sqlx::query(
                "INSERT INTO schedule_details (id, staff_id, shift_id, shift_date, status, note, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&id)
            .bind(staff_id)
            .bind(&shift_id)
            .bind(entry.shift_date)
            .bind(entry.status.as_str())
            .bind(&entry.note)
            .bind(&now)
            .bind(&now)
            .execute(&mut *tx)
            .await?;

            inserted.push(ScheduleDetail {
                id,
                staff_id: staff_id.to_string(),
                shift: shift_id,
                shift_date: entry.shift_date,
                status: entry.status,
                note: entry.note.clone(),
            });
        }

        tx.commit().await?;

        tracing::debug!(
            staff_id,
            deleted = seen.len(),
            inserted = inserted.len(),
            "Bulk schedule update committed"
        );

        Ok(inserted)
    }

    /// Delete a schedule detail.
    pub async fn delete_detail(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schedule_details WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Schedule detail {} not found",
                id
            )));
        }

        Ok(())
    }

    /// Update date, shift and note of a schedule detail in place.
    pub async fn update_detail(
        &self,
        id: &str,
        request: &UpdateDetailRequest,
    ) -> Result<ScheduleDetail, AppError> {
        let mut conn = self.pool.acquire().await?;
        let shift_id = resolve_shift_id(&mut *conn, &request.shift).await?;
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE schedule_details SET shift_id = ?, shift_date = ?, note = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&shift_id)
        .bind(request.shift_date)
        .bind(&request.note)
        .bind(&now)
        .bind(id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Schedule detail {} not found",
                id
            )));
        }
        drop(conn);

        self.get_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Schedule detail {} not found", id)))
    }
}

/// Map a shift id or kind value to the stored shift id.
async fn resolve_shift_id(
    conn: &mut SqliteConnection,
    reference: &str,
) -> Result<String, AppError> {
    let row = sqlx::query(
        "SELECT id FROM shifts WHERE id = ? OR kind = ? ORDER BY CASE WHEN id = ? THEN 0 ELSE 1 END LIMIT 1",
    )
    .bind(reference)
    .bind(reference)
    .bind(reference)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(row) => Ok(row.try_get("id")?),
        None => Err(AppError::Validation(format!("Unknown shift: {}", reference))),
    }
}

fn shift_from_row(row: &SqliteRow) -> Result<Shift, sqlx::Error> {
    let kind: String = row.try_get("kind")?;
    let kind = ShiftKind::parse(&kind)
        .ok_or_else(|| decode_error(format!("Unknown shift kind: {}", kind)))?;

    Ok(Shift {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        kind,
        start_time: row.try_get::<NaiveTime, _>("start_time")?,
        end_time: row.try_get::<NaiveTime, _>("end_time")?,
    })
}

fn detail_from_row(row: &SqliteRow) -> Result<ScheduleDetail, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let status = ScheduleStatus::parse(&status)
        .ok_or_else(|| decode_error(format!("Unknown schedule status: {}", status)))?;

    Ok(ScheduleDetail {
        id: row.try_get("id")?,
        staff_id: row.try_get("staff_id")?,
        shift: row.try_get("shift_id")?,
        shift_date: row.try_get::<NaiveDate, _>("shift_date")?,
        status,
        note: row.try_get("note")?,
    })
}

fn decode_error(message: String) -> sqlx::Error {
    sqlx::Error::Decode(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use crate::models::NewScheduleInput;
    use tempfile::TempDir;

    async fn repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("repo.sqlite"))
            .await
            .expect("Failed to init DB");
        (Repository::new(pool), temp_dir)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[tokio::test]
    async fn test_seeded_shifts() {
        let (repo, _dir) = repo().await;

        let page = repo.list_shifts(0, 20).await.unwrap();
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.content.len(), 4);
        let morning = page.content.iter().find(|s| s.id == "MORNING").unwrap();
        assert_eq!(morning.name, "Ca sáng");
        assert_eq!(morning.start_time, NaiveTime::from_hms_opt(7, 0, 0).unwrap());

        let second = repo.list_shifts(1, 3).await.unwrap();
        assert_eq!(second.content.len(), 1);
        assert!(!second.has_next());
    }

    #[tokio::test]
    async fn test_bulk_update_replaces_in_one_batch() {
        let (repo, _dir) = repo().await;

        let created = repo
            .bulk_update(
                "s1",
                &BulkUpdateRequest {
                    ids_to_delete: vec![],
                    new_schedules: vec![NewScheduleInput::scheduled("MORNING", date(1), None)],
                },
            )
            .await
            .unwrap();
        let old_id = created[0].id.clone();

        let replaced = repo
            .bulk_update(
                "s1",
                &BulkUpdateRequest {
                    ids_to_delete: vec![old_id.clone()],
                    new_schedules: vec![NewScheduleInput::scheduled(
                        "NIGHT",
                        date(1),
                        Some("swap".to_string()),
                    )],
                },
            )
            .await
            .unwrap();

        let details = repo.list_details_by_staff("s1").await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].id, replaced[0].id);
        assert_eq!(details[0].shift, "NIGHT");
        assert_eq!(details[0].note.as_deref(), Some("swap"));
        assert!(repo.get_detail(&old_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bulk_update_rolls_back_on_unknown_shift() {
        let (repo, _dir) = repo().await;

        let created = repo
            .bulk_update(
                "s1",
                &BulkUpdateRequest {
                    ids_to_delete: vec![],
                    new_schedules: vec![NewScheduleInput::scheduled("AFTERNOON", date(2), None)],
                },
            )
            .await
            .unwrap();

        let err = repo
            .bulk_update(
                "s1",
                &BulkUpdateRequest {
                    ids_to_delete: vec![created[0].id.clone()],
                    new_schedules: vec![NewScheduleInput::scheduled("EVENING", date(2), None)],
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        // The delete half was rolled back too.
        assert_eq!(repo.list_details_by_staff("s1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_bulk_delete_ignores_repeated_ids() {
        let (repo, _dir) = repo().await;

        let created = repo
            .bulk_update(
                "s1",
                &BulkUpdateRequest {
                    ids_to_delete: vec![],
                    new_schedules: vec![NewScheduleInput::scheduled("NIGHT", date(6), None)],
                },
            )
            .await
            .unwrap();
        let id = created[0].id.clone();

        let replaced = repo
            .bulk_update(
                "s1",
                &BulkUpdateRequest {
                    ids_to_delete: vec![id.clone(), id.clone()],
                    new_schedules: vec![NewScheduleInput::scheduled("MORNING", date(6), None)],
                },
            )
            .await
            .unwrap();

        let details = repo.list_details_by_staff("s1").await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].id, replaced[0].id);
        assert!(repo.get_detail(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bulk_delete_is_scoped_to_staff() {
        let (repo, _dir) = repo().await;

        let created = repo
            .bulk_update(
                "s1",
                &BulkUpdateRequest {
                    ids_to_delete: vec![],
                    new_schedules: vec![NewScheduleInput::scheduled("MORNING", date(3), None)],
                },
            )
            .await
            .unwrap();

        let err = repo
            .bulk_update("s2", &BulkUpdateRequest::delete(created[0].id.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(repo.get_detail(&created[0].id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_detail_resolves_kind() {
        let (repo, _dir) = repo().await;

        let created = repo
            .bulk_update(
                "s1",
                &BulkUpdateRequest {
                    ids_to_delete: vec![],
                    new_schedules: vec![NewScheduleInput::scheduled("MORNING", date(4), None)],
                },
            )
            .await
            .unwrap();

        let updated = repo
            .update_detail(
                &created[0].id,
                &UpdateDetailRequest {
                    shift_date: date(5),
                    shift: "FULL_DAY".to_string(),
                    note: Some("cover".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.shift, "FULL_DAY");
        assert_eq!(updated.shift_date, date(5));
        assert_eq!(updated.status, ScheduleStatus::Scheduled);

        let missing = repo
            .update_detail(
                "nope",
                &UpdateDetailRequest {
                    shift_date: date(5),
                    shift: "MORNING".to_string(),
                    note: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(missing.error_code(), "NOT_FOUND");
    }
}
