//! Client side of the schedule workflow.
//!
//! [`ScheduleApi`] is pure request/response data access. [`ScheduleGateway`]
//! sits on top of it and turns every outcome into exactly one user
//! notification.

mod error;
mod gateway;
mod http;
mod notify;
#[cfg(test)]
pub(crate) mod testing;

pub use error::*;
pub use gateway::*;
pub use http::*;
pub use notify::*;
