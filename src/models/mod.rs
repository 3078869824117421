//! Data models for the work-schedule calendar.
//!
//! Field names serialize in camelCase to match the dashboard's REST contract.

mod page;
mod schedule;
mod shift;

pub use page::*;
pub use schedule::*;
pub use shift::*;
