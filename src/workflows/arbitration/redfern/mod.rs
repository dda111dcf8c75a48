//! Document-production (Redfern schedule) workflow: requests, objections,
//! replies, and tribunal rulings, with a monotonic status state machine.

pub mod domain;
pub mod schedule;

pub use domain::{DocumentRequest, RequestStatus, Ruling};
pub use schedule::{RedfernError, RedfernScheduleView, ScheduleColumnView};
