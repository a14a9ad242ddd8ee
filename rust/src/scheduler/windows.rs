//! Resolution of a weekly schedule into the windows open on one calendar day.

use chrono::NaiveDate;

use crate::models::{day_of_week, Schedule, ScheduleWindow};

use super::state::Cursor;

/// Windows of `schedule` active on `date`, ordered by start time.
///
/// When the cursor falls on `date`, windows that close at or before it are
/// dropped. A window the cursor sits inside is kept with its declared bounds;
/// the search applies the cursor as the effective start. Overlapping windows
/// are returned as separate entries, never merged.
pub fn resolve_windows(
    date: NaiveDate,
    schedule: &Schedule,
    cursor: Cursor,
) -> Vec<ScheduleWindow> {
    let weekday = day_of_week(date);
    let last_end = cursor.minute_on(date).unwrap_or(0);

    let mut windows: Vec<ScheduleWindow> = schedule
        .windows
        .iter()
        .filter(|w| w.day_of_week == weekday)
        .filter(|w| w.time_range.end_minutes > last_end)
        .copied()
        .collect();

    // Stable: equal starts keep declaration order
    windows.sort_by_key(|w| w.time_range.start_minutes);
    windows
}
