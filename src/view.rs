//! Calendar view of one staff member's work schedule.
//!
//! Owns the detail store and the edit form for the lifetime of the open
//! view and refreshes the store after every successful form action.

use chrono::NaiveDate;

use crate::calendar::{resolve, resolve_event, CalendarEvent};
use crate::client::{ClientError, ScheduleGateway};
use crate::form::{FormOutcome, ScheduleEditForm};
use crate::models::ShiftCatalog;
use crate::store::ScheduleDetailStore;

pub struct ScheduleCalendarView {
    gateway: ScheduleGateway,
    catalog: ShiftCatalog,
    store: ScheduleDetailStore,
    form: ScheduleEditForm,
}

impl ScheduleCalendarView {
    /// Open the view and load the staff member's details.
    pub async fn open(
        gateway: ScheduleGateway,
        catalog: ShiftCatalog,
        staff_id: impl Into<String>,
    ) -> Self {
        let staff_id = staff_id.into();
        let view = Self {
            store: ScheduleDetailStore::new(gateway.clone(), staff_id.clone()),
            form: ScheduleEditForm::new(staff_id),
            gateway,
            catalog,
        };
        view.store.refresh().await;
        view
    }

    pub fn store(&self) -> &ScheduleDetailStore {
        &self.store
    }

    pub fn form(&self) -> &ScheduleEditForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ScheduleEditForm {
        &mut self.form
    }

    pub fn catalog(&self) -> &ShiftCatalog {
        &self.catalog
    }

    pub async fn events(&self) -> Vec<CalendarEvent> {
        self.store.events(&self.catalog).await
    }

    pub fn date_click(&mut self, date: NaiveDate) {
        self.form.open_add(date);
    }

    /// Open the editor on the clicked event's detail.
    ///
    /// Falls back to matching by title and date when the carried id is no
    /// longer in the list. Returns `false` and leaves the form untouched when
    /// nothing matches.
    pub async fn event_click(&mut self, event: &CalendarEvent) -> bool {
        let details = self.store.details().await;
        let found = resolve_event(event, &details)
            .or_else(|| resolve(&event.title, event.start, &details, &self.catalog));

        match found {
            Some(detail) => {
                self.form.open_edit(detail, &self.catalog);
                true
            }
            None => {
                tracing::debug!(event_id = %event.id, "Clicked event has no backing detail");
                false
            }
        }
    }

    pub async fn submit(&mut self) -> Result<FormOutcome, ClientError> {
        let outcome = self.form.submit(&self.gateway).await?;
        self.store.refresh().await;
        Ok(outcome)
    }

    pub async fn delete(&mut self) -> Result<FormOutcome, ClientError> {
        let outcome = self.form.delete(&self.gateway).await?;
        self.store.refresh().await;
        Ok(outcome)
    }

    pub fn cancel(&mut self) {
        self.form.cancel();
    }

    /// Discard the view. Reopening fetches again.
    pub fn close(self) {
        tracing::debug!(staff_id = %self.store.staff_id(), "Closing schedule view");
    }
}
