//! Notification-aware schedule gateway.

use std::sync::Arc;

use super::{ClientError, HttpScheduleApi, Notification, Notifier, ScheduleApi};
use crate::config::Config;
use crate::i18n::{message, Locale, MessageKey};
use crate::models::{BulkUpdateRequest, ScheduleDetail, ShiftCatalog, UpdateDetailRequest};

/// Page size used when loading the shift catalog.
const SHIFT_PAGE_SIZE: u32 = 100;

/// Schedule operations as the calendar sees them.
///
/// Fetches fail soft: errors are logged, notified, and turned into empty
/// results. Mutations notify exactly once, success or error, and hand the
/// error back so the caller can keep its form open.
#[derive(Clone)]
pub struct ScheduleGateway {
    api: Arc<dyn ScheduleApi>,
    notifier: Arc<dyn Notifier>,
    locale: Locale,
}

impl ScheduleGateway {
    pub fn new(api: Arc<dyn ScheduleApi>, notifier: Arc<dyn Notifier>, locale: Locale) -> Self {
        Self {
            api,
            notifier,
            locale,
        }
    }

    /// HTTP gateway against `config.api_base_url`.
    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(
            Arc::new(HttpScheduleApi::new(config.api_base_url.clone())),
            notifier,
            config.locale,
        )
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// All schedule details of one staff member, or empty on failure.
    pub async fn fetch_details_by_staff(&self, staff_id: &str) -> Vec<ScheduleDetail> {
        match self.api.fetch_details_by_staff(staff_id).await {
            Ok(mut details) => {
                let before = details.len();
                details.retain(|d| d.staff_id == staff_id);
                if details.len() != before {
                    tracing::warn!(
                        staff_id,
                        dropped = before - details.len(),
                        "Backend returned details of another staff member"
                    );
                }
                details
            }
            Err(err) => {
                tracing::warn!(staff_id, error = %err, "Failed to fetch work schedule");
                self.notify_error(&err, MessageKey::FetchFailed);
                Vec::new()
            }
        }
    }

    /// Every shift across all pages, or an empty catalog on failure.
    ///
    /// Stops once `totalElements` shifts have arrived, even if the backend
    /// keeps reporting further pages.
    pub async fn fetch_shifts(&self) -> ShiftCatalog {
        let mut shifts = Vec::new();
        let mut page = 0;

        loop {
            match self.api.list_shifts(page, SHIFT_PAGE_SIZE).await {
                Ok(result) => {
                    let has_next = result.has_next() && !result.content.is_empty();
                    let total = result.total_elements;
                    shifts.extend(result.content);
                    if !has_next || shifts.len() as u64 >= total {
                        break;
                    }
                    page += 1;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to fetch shifts");
                    self.notify_error(&err, MessageKey::ShiftsFetchFailed);
                    return ShiftCatalog::default();
                }
            }
        }

        ShiftCatalog::new(shifts)
    }

    /// Delete `ids_to_delete` and insert `new_schedules` for one staff member.
    pub async fn bulk_update(
        &self,
        staff_id: &str,
        request: &BulkUpdateRequest,
    ) -> Result<(), ClientError> {
        self.send_bulk(
            staff_id,
            request,
            MessageKey::SaveSucceeded,
            MessageKey::SaveFailed,
        )
        .await
    }

    /// Delete one detail through the bulk endpoint.
    pub async fn delete_by_id(&self, staff_id: &str, id: &str) -> Result<(), ClientError> {
        self.send_bulk(
            staff_id,
            &BulkUpdateRequest::delete(id),
            MessageKey::DeleteSucceeded,
            MessageKey::DeleteFailed,
        )
        .await
    }

    /// In-place update through `update-detail/{id}`, used by list views.
    pub async fn update_detail_direct(
        &self,
        id: &str,
        request: &UpdateDetailRequest,
    ) -> Result<(), ClientError> {
        match self.api.update_detail(id, request).await {
            Ok(()) => {
                self.notify_success(MessageKey::UpdateSucceeded);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "Schedule detail update failed");
                self.notify_error(&err, MessageKey::UpdateFailed);
                Err(err)
            }
        }
    }

    /// Report a local precondition failure the same way as a backend error.
    pub fn reject(&self, key: MessageKey) -> ClientError {
        let err = ClientError::Precondition(message(self.locale, key).to_string());
        self.notify_error(&err, MessageKey::GenericError);
        err
    }

    async fn send_bulk(
        &self,
        staff_id: &str,
        request: &BulkUpdateRequest,
        success_key: MessageKey,
        failure_key: MessageKey,
    ) -> Result<(), ClientError> {
        match self.api.bulk_update(staff_id, request).await {
            Ok(()) => {
                tracing::info!(
                    staff_id,
                    deleted = request.ids_to_delete.len(),
                    inserted = request.new_schedules.len(),
                    "Work schedule saved"
                );
                self.notify_success(success_key);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(staff_id, error = %err, "Work schedule bulk update failed");
                self.notify_error(&err, failure_key);
                Err(err)
            }
        }
    }

    fn notify_success(&self, key: MessageKey) {
        self.notifier
            .notify(Notification::success(message(self.locale, key)));
    }

    fn notify_error(&self, err: &ClientError, fallback: MessageKey) {
        let text = err
            .user_message()
            .unwrap_or_else(|| message(self.locale, fallback));
        self.notifier.notify(Notification::error(text));
    }
}
