//! Placement engine: window resolution, first-fit search and the sequential
//! allocator that threads a cursor through them.

mod allocator;
mod search;
mod state;
mod windows;

pub use allocator::{
    schedule, schedule_with_report, AllocationResult, PlacementDecision, PlacementOutcome,
    SchedulerError,
};
pub use search::{find_next_available, Slot};
pub use state::Cursor;
pub use windows::resolve_windows;
