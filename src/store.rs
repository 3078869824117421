//! In-memory schedule details of one open calendar view.

use tokio::sync::RwLock;

use crate::calendar::{to_events, CalendarEvent};
use crate::client::ScheduleGateway;
use crate::models::{ScheduleDetail, ShiftCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
}

struct StoreState {
    load_state: LoadState,
    details: Vec<ScheduleDetail>,
}

/// Cached result of `fetch_details_by_staff` for one staff member.
///
/// Refreshes are not de-duplicated. When two overlap, the one that finishes
/// last overwrites the other.
pub struct ScheduleDetailStore {
    staff_id: String,
    gateway: ScheduleGateway,
    state: RwLock<StoreState>,
}

impl ScheduleDetailStore {
    pub fn new(gateway: ScheduleGateway, staff_id: impl Into<String>) -> Self {
        Self {
            staff_id: staff_id.into(),
            gateway,
            state: RwLock::new(StoreState {
                load_state: LoadState::Idle,
                details: Vec::new(),
            }),
        }
    }

    pub fn staff_id(&self) -> &str {
        &self.staff_id
    }

    /// Re-run the fetch and replace the cached list.
    pub async fn refresh(&self) {
        self.state.write().await.load_state = LoadState::Loading;

        let details = self.gateway.fetch_details_by_staff(&self.staff_id).await;
        tracing::debug!(staff_id = %self.staff_id, count = details.len(), "Schedule details loaded");

        let mut state = self.state.write().await;
        state.details = details;
        state.load_state = LoadState::Ready;
    }

    pub async fn load_state(&self) -> LoadState {
        self.state.read().await.load_state
    }

    pub async fn details(&self) -> Vec<ScheduleDetail> {
        self.state.read().await.details.clone()
    }

    pub async fn find(&self, id: &str) -> Option<ScheduleDetail> {
        self.state
            .read()
            .await
            .details
            .iter()
            .find(|d| d.id == id)
            .cloned()
    }

    /// Calendar events for the cached list.
    pub async fn events(&self, catalog: &ShiftCatalog) -> Vec<CalendarEvent> {
        to_events(&self.state.read().await.details, catalog)
    }
}
