//! Schedule detail records and the payloads that mutate them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Attendance status of a schedule detail.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    #[default]
    Scheduled,
    Attended,
    Absent,
    OnLeave,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Scheduled => "SCHEDULED",
            ScheduleStatus::Attended => "ATTENDED",
            ScheduleStatus::Absent => "ABSENT",
            ScheduleStatus::OnLeave => "ON_LEAVE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SCHEDULED" => Some(ScheduleStatus::Scheduled),
            "ATTENDED" => Some(ScheduleStatus::Attended),
            "ABSENT" => Some(ScheduleStatus::Absent),
            "ON_LEAVE" => Some(ScheduleStatus::OnLeave),
            _ => None,
        }
    }
}

/// One assignment of a staff member to a shift on a date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDetail {
    pub id: String,
    pub staff_id: String,
    /// Shift id or shift kind value.
    pub shift: String,
    pub shift_date: NaiveDate,
    #[serde(default)]
    pub status: ScheduleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A schedule entry to insert; it has no id until the backend stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleInput {
    pub shift_id: String,
    pub shift_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub status: ScheduleStatus,
}

impl NewScheduleInput {
    /// Entry with `SCHEDULED` status, the only status the edit form writes.
    pub fn scheduled(shift_id: impl Into<String>, shift_date: NaiveDate, note: Option<String>) -> Self {
        Self {
            shift_id: shift_id.into(),
            shift_date,
            note,
            status: ScheduleStatus::Scheduled,
        }
    }
}

/// Request body for `PUT /work-schedules/bulk-update/{staffId}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateRequest {
    #[serde(default)]
    pub ids_to_delete: Vec<String>,
    #[serde(default)]
    pub new_schedules: Vec<NewScheduleInput>,
}

impl BulkUpdateRequest {
    pub fn delete(id: impl Into<String>) -> Self {
        Self {
            ids_to_delete: vec![id.into()],
            new_schedules: Vec::new(),
        }
    }
}

/// Request body for `PUT /work-schedule/update-detail/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDetailRequest {
    pub shift_date: NaiveDate,
    pub shift: String,
    #[serde(default)]
    pub note: Option<String>,
}
