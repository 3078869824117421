//! Localized notification strings and status labels.

use crate::models::ScheduleStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Vi,
    En,
}

impl Locale {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vi" | "vi-vn" => Some(Locale::Vi),
            "en" | "en-us" | "en-gb" => Some(Locale::En),
            _ => None,
        }
    }
}

/// Keys for every user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    FetchFailed,
    ShiftsFetchFailed,
    SaveSucceeded,
    SaveFailed,
    DeleteSucceeded,
    DeleteFailed,
    UpdateSucceeded,
    UpdateFailed,
    ShiftRequired,
    DateRequired,
    NothingToDelete,
    GenericError,
}

pub fn message(locale: Locale, key: MessageKey) -> &'static str {
    match locale {
        Locale::Vi => match key {
            MessageKey::FetchFailed => "Không thể tải lịch làm việc",
            MessageKey::ShiftsFetchFailed => "Không thể tải danh sách ca làm việc",
            MessageKey::SaveSucceeded => "Cập nhật lịch làm việc thành công",
            MessageKey::SaveFailed => "Cập nhật lịch làm việc thất bại",
            MessageKey::DeleteSucceeded => "Xóa lịch làm việc thành công",
            MessageKey::DeleteFailed => "Xóa lịch làm việc thất bại",
            MessageKey::UpdateSucceeded => "Cập nhật chi tiết lịch thành công",
            MessageKey::UpdateFailed => "Cập nhật chi tiết lịch thất bại",
            MessageKey::ShiftRequired => "Vui lòng chọn ca làm việc",
            MessageKey::DateRequired => "Vui lòng chọn ngày",
            MessageKey::NothingToDelete => "Không có lịch làm việc để xóa",
            MessageKey::GenericError => "Đã có lỗi xảy ra",
        },
        Locale::En => match key {
            MessageKey::FetchFailed => "Could not load the work schedule",
            MessageKey::ShiftsFetchFailed => "Could not load shifts",
            MessageKey::SaveSucceeded => "Work schedule updated",
            MessageKey::SaveFailed => "Could not update the work schedule",
            MessageKey::DeleteSucceeded => "Work schedule deleted",
            MessageKey::DeleteFailed => "Could not delete the work schedule",
            MessageKey::UpdateSucceeded => "Schedule detail updated",
            MessageKey::UpdateFailed => "Could not update the schedule detail",
            MessageKey::ShiftRequired => "Please select a shift",
            MessageKey::DateRequired => "Please select a date",
            MessageKey::NothingToDelete => "There is no schedule to delete",
            MessageKey::GenericError => "Something went wrong",
        },
    }
}

pub fn status_label(locale: Locale, status: ScheduleStatus) -> &'static str {
    match (locale, status) {
        (Locale::Vi, ScheduleStatus::Scheduled) => "Đã lên lịch",
        (Locale::Vi, ScheduleStatus::Attended) => "Đã đi làm",
        (Locale::Vi, ScheduleStatus::Absent) => "Vắng mặt",
        (Locale::Vi, ScheduleStatus::OnLeave) => "Nghỉ phép",
        (Locale::En, ScheduleStatus::Scheduled) => "Scheduled",
        (Locale::En, ScheduleStatus::Attended) => "Attended",
        (Locale::En, ScheduleStatus::Absent) => "Absent",
        (Locale::En, ScheduleStatus::OnLeave) => "On leave",
    }
}
