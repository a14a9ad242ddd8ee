//! Placement of fixed-duration tasks onto recurring weekly availability windows.
//!
//! Given tasks, named weekly schedules and a planning horizon, the scheduler
//! walks the tasks in input order and gives each the earliest window slot
//! at or after the end of the previously placed task. The crate is usable
//! from Rust directly and is built as a Python extension module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::{NaiveDate, NaiveDateTime};
use pyo3::prelude::*;

mod config;
pub mod logging;
mod models;
pub mod scheduler;
pub mod validation;

pub use config::{SchedulerOptions, DEFAULT_SEARCH_LIMIT_MONTHS};
pub use models::{
    day_of_week, minute_of_day, Schedule, ScheduleWindow, Task, TaskStatus, TimeRange,
    MINUTES_PER_DAY,
};
pub use scheduler::{
    find_next_available, resolve_windows, schedule, schedule_with_report, AllocationResult,
    Cursor, PlacementDecision, PlacementOutcome, SchedulerError, Slot,
};
pub use validation::{validate_duration, validate_input, ValidationError};

/// Task id reported when `find_next_slot` rejects its duration.
const SLOT_QUERY_ID: &str = "find_next_slot";

fn to_py_err(err: SchedulerError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

fn validation_to_py_err(err: ValidationError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Place tasks on their schedules and return the updated tasks.
///
/// # Arguments
/// * `tasks` - Tasks in the order they must be placed
/// * `schedules` - Weekly availability patterns, keyed by `id`
/// * `options` - Horizon and search settings
///
/// # Returns
/// * New task list, same length and order as `tasks`
///
/// # Raises
/// * ValueError if any schedule, task or option is malformed
#[pyfunction]
fn schedule_tasks(
    tasks: Vec<Task>,
    schedules: Vec<Schedule>,
    options: SchedulerOptions,
) -> PyResult<Vec<Task>> {
    schedule(&tasks, &schedules, &options).map_err(to_py_err)
}

/// Like `schedule_tasks`, also returning the per-task placement decisions.
#[pyfunction]
fn schedule_tasks_with_report(
    tasks: Vec<Task>,
    schedules: Vec<Schedule>,
    options: SchedulerOptions,
) -> PyResult<AllocationResult> {
    schedule_with_report(&tasks, &schedules, &options).map_err(to_py_err)
}

/// Windows of `schedule` open on `date`, minus those consumed by `cursor`.
#[pyfunction]
#[pyo3(signature = (date, schedule, cursor=None))]
fn resolve_day_windows(
    date: NaiveDate,
    schedule: Schedule,
    cursor: Option<NaiveDateTime>,
) -> Vec<ScheduleWindow> {
    let cursor = cursor.map_or_else(Cursor::start, Cursor::at);
    resolve_windows(date, &schedule, cursor)
}

/// First slot of `duration_minutes` at or after `origin` (or `cursor`).
///
/// # Returns
/// * `(start, end)` or None if nothing fits within the search limit
///
/// # Raises
/// * ValueError if the duration or the search limit is not positive
#[pyfunction]
#[pyo3(signature = (origin, schedule, duration_minutes, cursor=None, search_limit_months=DEFAULT_SEARCH_LIMIT_MONTHS))]
fn find_next_slot(
    origin: NaiveDateTime,
    schedule: Schedule,
    duration_minutes: i64,
    cursor: Option<NaiveDateTime>,
    search_limit_months: u32,
) -> PyResult<Option<(NaiveDateTime, NaiveDateTime)>> {
    validate_duration(SLOT_QUERY_ID, duration_minutes).map_err(validation_to_py_err)?;
    if search_limit_months == 0 {
        return Err(validation_to_py_err(ValidationError::ZeroSearchLimit));
    }

    let cursor = cursor.map_or_else(Cursor::start, Cursor::at);
    Ok(
        find_next_available(origin, &schedule, duration_minutes, cursor, search_limit_months, 0)
            .map(|slot| (slot.start, slot.end)),
    )
}

/// The timebox.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<TimeRange>()?;
    m.add_class::<ScheduleWindow>()?;
    m.add_class::<Schedule>()?;
    m.add_class::<TaskStatus>()?;
    m.add_class::<Task>()?;

    // Config and results
    m.add_class::<SchedulerOptions>()?;
    m.add_class::<PlacementOutcome>()?;
    m.add_class::<PlacementDecision>()?;
    m.add_class::<AllocationResult>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(schedule_tasks, m)?)?;
    m.add_function(wrap_pyfunction!(schedule_tasks_with_report, m)?)?;
    m.add_function(wrap_pyfunction!(resolve_day_windows, m)?)?;
    m.add_function(wrap_pyfunction!(find_next_slot, m)?)?;

    Ok(())
}
