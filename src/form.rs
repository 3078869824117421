//! Add/edit form for a single day's schedule entry.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::client::{ClientError, ScheduleGateway};
use crate::i18n::{message, Locale, MessageKey};
use crate::models::{BulkUpdateRequest, NewScheduleInput, ScheduleDetail, ShiftCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Date,
    Shift,
}

/// Editable values of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFormFields {
    pub shift_id: Option<String>,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    /// Creating an entry on an empty date
    Add { date: NaiveDate },
    /// Replacing an existing entry
    Edit { detail_id: String, date: NaiveDate },
}

/// What a successful form action did; the caller refreshes its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Submitted,
    Deleted,
}

pub struct ScheduleEditForm {
    staff_id: String,
    mode: FormMode,
    fields: ScheduleFormFields,
    errors: BTreeMap<FormField, String>,
}

impl ScheduleEditForm {
    pub fn new(staff_id: impl Into<String>) -> Self {
        Self {
            staff_id: staff_id.into(),
            mode: FormMode::Closed,
            fields: ScheduleFormFields::default(),
            errors: BTreeMap::new(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    pub fn fields(&self) -> &ScheduleFormFields {
        &self.fields
    }

    /// Errors from the last rejected submit.
    pub fn errors(&self) -> &BTreeMap<FormField, String> {
        &self.errors
    }

    pub fn open_add(&mut self, date: NaiveDate) {
        self.mode = FormMode::Add { date };
        self.fields = ScheduleFormFields::default();
        self.errors.clear();
    }

    /// Open on an existing detail, normalizing its shift reference to a shift id.
    pub fn open_edit(&mut self, detail: &ScheduleDetail, catalog: &ShiftCatalog) {
        let shift_id = catalog
            .resolve(&detail.shift)
            .map(|s| s.id.clone())
            .unwrap_or_else(|| detail.shift.clone());

        self.mode = FormMode::Edit {
            detail_id: detail.id.clone(),
            date: detail.shift_date,
        };
        self.fields = ScheduleFormFields {
            shift_id: Some(shift_id),
            note: detail.note.clone().unwrap_or_default(),
        };
        self.errors.clear();
    }

    pub fn set_shift(&mut self, shift_id: impl Into<String>) {
        self.fields.shift_id = Some(shift_id.into());
        self.errors.remove(&FormField::Shift);
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.fields.note = note.into();
    }

    pub fn cancel(&mut self) {
        self.close();
    }

    /// Field errors for the current values; empty when the form can be submitted.
    pub fn validate(&self, locale: Locale) -> BTreeMap<FormField, String> {
        let mut errors = BTreeMap::new();
        if self.date().is_none() {
            errors.insert(
                FormField::Date,
                message(locale, MessageKey::DateRequired).to_string(),
            );
        }
        let has_shift = self
            .fields
            .shift_id
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty());
        if !has_shift {
            errors.insert(
                FormField::Shift,
                message(locale, MessageKey::ShiftRequired).to_string(),
            );
        }
        errors
    }

    /// Bulk-update payload for the current mode, if the form is valid.
    ///
    /// Editing never updates in place: the old id is deleted and a fresh
    /// entry inserted.
    pub fn payload(&self) -> Option<BulkUpdateRequest> {
        let shift_id = self.fields.shift_id.as_deref()?.trim();
        if shift_id.is_empty() {
            return None;
        }
        let note = Some(self.fields.note.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        match &self.mode {
            FormMode::Closed => None,
            FormMode::Add { date } => Some(BulkUpdateRequest {
                ids_to_delete: Vec::new(),
                new_schedules: vec![NewScheduleInput::scheduled(shift_id, *date, note)],
            }),
            FormMode::Edit { detail_id, date } => Some(BulkUpdateRequest {
                ids_to_delete: vec![detail_id.clone()],
                new_schedules: vec![NewScheduleInput::scheduled(shift_id, *date, note)],
            }),
        }
    }

    /// Save the form. Closes on success; stays open on any failure.
    pub async fn submit(&mut self, gateway: &ScheduleGateway) -> Result<FormOutcome, ClientError> {
        let errors = self.validate(gateway.locale());
        if let Some(first) = errors.keys().next().copied() {
            self.errors = errors;
            let key = match first {
                FormField::Date => MessageKey::DateRequired,
                FormField::Shift => MessageKey::ShiftRequired,
            };
            return Err(gateway.reject(key));
        }

        let payload = match self.payload() {
            Some(payload) => payload,
            None => return Err(gateway.reject(MessageKey::ShiftRequired)),
        };

        gateway.bulk_update(&self.staff_id, &payload).await?;
        self.close();
        Ok(FormOutcome::Submitted)
    }

    /// Delete the entry being edited. Closes on success; stays open on failure.
    pub async fn delete(&mut self, gateway: &ScheduleGateway) -> Result<FormOutcome, ClientError> {
        let detail_id = match &self.mode {
            FormMode::Edit { detail_id, .. } => detail_id.clone(),
            _ => return Err(gateway.reject(MessageKey::NothingToDelete)),
        };

        gateway.delete_by_id(&self.staff_id, &detail_id).await?;
        self.close();
        Ok(FormOutcome::Deleted)
    }

    fn date(&self) -> Option<NaiveDate> {
        match &self.mode {
            FormMode::Closed => None,
            FormMode::Add { date } | FormMode::Edit { date, .. } => Some(*date),
        }
    }

    fn close(&mut self) {
        self.mode = FormMode::Closed;
        self.fields = ScheduleFormFields::default();
        self.errors.clear();
    }
}
