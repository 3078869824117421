//! In-memory [`ScheduleApi`] for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use super::{ClientError, ScheduleApi};
use crate::models::{
    BulkUpdateRequest, Page, ScheduleDetail, ScheduleStatus, Shift, ShiftKind,
    UpdateDetailRequest,
};

pub fn detail(id: &str, staff_id: &str, shift: &str, date: &str) -> ScheduleDetail {
    ScheduleDetail {
        id: id.to_string(),
        staff_id: staff_id.to_string(),
        shift: shift.to_string(),
        shift_date: date.parse().unwrap(),
        status: ScheduleStatus::Scheduled,
        note: None,
    }
}

pub fn shift(id: &str, kind: ShiftKind, name: &str, start: (u32, u32), end: (u32, u32)) -> Shift {
    Shift {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
    }
}

pub fn default_shifts() -> Vec<Shift> {
    vec![
        shift("MORNING", ShiftKind::Morning, "Ca sáng", (7, 0), (11, 0)),
        shift("AFTERNOON", ShiftKind::Afternoon, "Ca chiều", (13, 0), (17, 0)),
        shift("NIGHT", ShiftKind::Night, "Ca tối", (17, 0), (21, 0)),
        shift("FULL_DAY", ShiftKind::FullDay, "Cả ngày", (7, 0), (17, 0)),
    ]
}

#[derive(Default)]
pub struct FakeScheduleApi {
    details: Mutex<Vec<ScheduleDetail>>,
    failure: Mutex<Option<ClientError>>,
    bulk_calls: Mutex<Vec<(String, BulkUpdateRequest)>>,
    fetch_delays: Mutex<VecDeque<Duration>>,
    shift_page_size: Mutex<Option<u32>>,
    leak_other_staff: AtomicBool,
    ignore_shift_page: AtomicBool,
    shift_calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl FakeScheduleApi {
    pub fn with_details(details: Vec<ScheduleDetail>) -> Self {
        let api = Self::default();
        api.next_id.store(details.len() + 100, Ordering::SeqCst);
        *api.details.lock().unwrap() = details;
        api
    }

    /// Every following call fails with `err`.
    pub fn fail_with(&self, err: ClientError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn set_leak_other_staff(&self, leak: bool) {
        self.leak_other_staff.store(leak, Ordering::SeqCst);
    }

    pub fn set_shift_page_size(&self, size: u32) {
        *self.shift_page_size.lock().unwrap() = Some(size);
    }

    /// Always serve the first page of shifts, echoing page 0.
    pub fn set_ignore_shift_page(&self, ignore: bool) {
        self.ignore_shift_page.store(ignore, Ordering::SeqCst);
    }

    pub fn shift_calls(&self) -> usize {
        self.shift_calls.load(Ordering::SeqCst)
    }

    /// Delay applied to the next fetch calls, one entry per call.
    pub fn push_fetch_delay(&self, delay: Duration) {
        self.fetch_delays.lock().unwrap().push_back(delay);
    }

    pub fn replace_details(&self, details: Vec<ScheduleDetail>) {
        *self.details.lock().unwrap() = details;
    }

    pub fn bulk_calls(&self) -> Vec<(String, BulkUpdateRequest)> {
        self.bulk_calls.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ClientError> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ScheduleApi for FakeScheduleApi {
    async fn fetch_details_by_staff(
        &self,
        staff_id: &str,
    ) -> Result<Vec<ScheduleDetail>, ClientError> {
        self.check()?;
        let snapshot: Vec<ScheduleDetail> = {
            let details = self.details.lock().unwrap();
            if self.leak_other_staff.load(Ordering::SeqCst) {
                details.clone()
            } else {
                details
                    .iter()
                    .filter(|d| d.staff_id == staff_id)
                    .cloned()
                    .collect()
            }
        };
        let delay = self.fetch_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(snapshot)
    }

    async fn bulk_update(
        &self,
        staff_id: &str,
        request: &BulkUpdateRequest,
    ) -> Result<(), ClientError> {
        self.bulk_calls
            .lock()
            .unwrap()
            .push((staff_id.to_string(), request.clone()));
        self.check()?;

        let mut details = self.details.lock().unwrap();
        details.retain(|d| !(d.staff_id == staff_id && request.ids_to_delete.contains(&d.id)));
        for entry in &request.new_schedules {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            details.push(ScheduleDetail {
                id: id.to_string(),
                staff_id: staff_id.to_string(),
                shift: entry.shift_id.clone(),
                shift_date: entry.shift_date,
                status: entry.status,
                note: entry.note.clone(),
            });
        }
        Ok(())
    }

    async fn delete_detail(&self, id: &str) -> Result<(), ClientError> {
        self.check()?;
        self.details.lock().unwrap().retain(|d| d.id != id);
        Ok(())
    }

    async fn update_detail(
        &self,
        id: &str,
        request: &UpdateDetailRequest,
    ) -> Result<(), ClientError> {
        self.check()?;
        let mut details = self.details.lock().unwrap();
        let detail = details
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ClientError::Api {
                status: 404,
                code: Some("NOT_FOUND".to_string()),
                message: Some(format!("Schedule detail {} not found", id)),
            })?;
        detail.shift = request.shift.clone();
        detail.shift_date = request.shift_date;
        detail.note = request.note.clone();
        Ok(())
    }

    async fn list_shifts(&self, page: u32, size: u32) -> Result<Page<Shift>, ClientError> {
        self.check()?;
        self.shift_calls.fetch_add(1, Ordering::SeqCst);
        let page = if self.ignore_shift_page.load(Ordering::SeqCst) {
            0
        } else {
            page
        };
        let size = self.shift_page_size.lock().unwrap().unwrap_or(size);
        let all = default_shifts();
        let content = all
            .iter()
            .skip((page * size) as usize)
            .take(size as usize)
            .cloned()
            .collect();
        Ok(Page {
            content,
            page,
            size,
            total_elements: all.len() as u64,
        })
    }
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}
