//! Sequential allocator: greedy, in-order placement of tasks on their schedules.

use chrono::NaiveDateTime;
use pyo3::prelude::*;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::SchedulerOptions;
use crate::models::{Schedule, Task};
use crate::validation::{validate_input, ValidationError};
use crate::{log_changes, log_checks};

use super::search::{find_next_available, Slot};
use super::state::Cursor;

/// Errors that can occur during scheduling.
///
/// Only malformed input is an error; a task that cannot be placed is
/// reported through its `PlacementOutcome` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Invalid scheduling input: {0:?}")]
    InvalidInput(Vec<ValidationError>),
}

/// Why a task ended up where it did.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementOutcome {
    /// Placed; the cursor moved to its end
    Scheduled,
    /// Completed tasks pass through untouched
    Completed,
    /// `schedule_id` matches no schedule
    UnknownSchedule,
    /// Duration is longer than every window of the schedule
    ExceedsEveryWindow,
    /// No window had room before the search limit
    NoFitWithinSearchLimit,
    /// A fit was found but ends after the horizon
    PastHorizonEnd,
}

/// Record of the decision taken for one task.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementDecision {
    #[pyo3(get)]
    pub task_id: String,
    #[pyo3(get)]
    pub outcome: PlacementOutcome,
    /// Slot that was found, also set for `PastHorizonEnd`
    #[pyo3(get)]
    pub start: Option<NaiveDateTime>,
    #[pyo3(get)]
    pub end: Option<NaiveDateTime>,
}

impl PlacementDecision {
    fn new(task_id: &str, outcome: PlacementOutcome, slot: Option<Slot>) -> Self {
        Self {
            task_id: task_id.to_string(),
            outcome,
            start: slot.map(|s| s.start),
            end: slot.map(|s| s.end),
        }
    }
}

#[pymethods]
impl PlacementDecision {
    fn __repr__(&self) -> String {
        format!(
            "PlacementDecision(task_id={:?}, outcome={:?}, start={:?}, end={:?})",
            self.task_id, self.outcome, self.start, self.end
        )
    }
}

/// Output of a scheduling run: new task records plus one decision per task.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AllocationResult {
    /// Same length and order as the input tasks
    #[pyo3(get)]
    pub tasks: Vec<Task>,
    #[pyo3(get)]
    pub decisions: Vec<PlacementDecision>,
}

#[pymethods]
impl AllocationResult {
    /// Number of tasks placed in this run.
    pub fn scheduled_count(&self) -> usize {
        self.decisions
            .iter()
            .filter(|d| d.outcome == PlacementOutcome::Scheduled)
            .count()
    }

    /// IDs of non-completed tasks this run could not place, in input order.
    pub fn unscheduled_ids(&self) -> Vec<String> {
        self.decisions
            .iter()
            .filter(|d| {
                !matches!(
                    d.outcome,
                    PlacementOutcome::Scheduled | PlacementOutcome::Completed
                )
            })
            .map(|d| d.task_id.clone())
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "AllocationResult(tasks={}, scheduled={})",
            self.tasks.len(),
            self.scheduled_count()
        )
    }
}

/// Place `tasks` in input order and return the updated task records.
///
/// See [`schedule_with_report`] for the placement rules.
pub fn schedule(
    tasks: &[Task],
    schedules: &[Schedule],
    options: &SchedulerOptions,
) -> Result<Vec<Task>, SchedulerError> {
    schedule_with_report(tasks, schedules, options).map(|result| result.tasks)
}

/// Place `tasks` in input order, recording a decision for each.
///
/// Single greedy pass. For each task:
/// 1. Completed tasks are passed through untouched.
/// 2. Unknown schedules and durations longer than every window are skipped
///    without searching.
/// 3. Otherwise the first fit at or after the cursor is searched from
///    `options.start_date`; it is committed only if it ends by
///    `options.end_date`, and the cursor then moves to its end.
///
/// Failed tasks never move the cursor and keep whatever scheduled dates they
/// came in with, unless `options.clear_stale_on_failure` is set.
///
/// # Errors
/// `SchedulerError::InvalidInput` with every validation problem found.
pub fn schedule_with_report(
    tasks: &[Task],
    schedules: &[Schedule],
    options: &SchedulerOptions,
) -> Result<AllocationResult, SchedulerError> {
    validate_input(tasks, schedules, options).map_err(SchedulerError::InvalidInput)?;

    let by_id: FxHashMap<&str, &Schedule> =
        schedules.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut result = AllocationResult {
        tasks: Vec::with_capacity(tasks.len()),
        decisions: Vec::with_capacity(tasks.len()),
    };
    let mut cursor = Cursor::start();

    for task in tasks {
        let (updated, decision, next) = place_task(task, &by_id, options, cursor);
        cursor = next;
        result.tasks.push(updated);
        result.decisions.push(decision);
    }

    log_changes!(
        options.verbosity,
        "Scheduled {}/{} tasks, cursor at {:?}",
        result.scheduled_count(),
        tasks.len(),
        cursor.instant()
    );

    Ok(result)
}

/// One allocation step: returns the new task record, its decision and the
/// cursor for the next step.
fn place_task(
    task: &Task,
    schedules: &FxHashMap<&str, &Schedule>,
    options: &SchedulerOptions,
    cursor: Cursor,
) -> (Task, PlacementDecision, Cursor) {
    let verbosity = options.verbosity;

    if task.is_completed() {
        log_checks!(verbosity, "  Skip {}: completed", task.id);
        return (
            task.clone(),
            PlacementDecision::new(&task.id, PlacementOutcome::Completed, None),
            cursor,
        );
    }

    let Some(schedule) = schedules.get(task.schedule_id.as_str()) else {
        log_checks!(
            verbosity,
            "  Skip {}: unknown schedule '{}'",
            task.id,
            task.schedule_id
        );
        return unplaced(task, PlacementOutcome::UnknownSchedule, None, options, cursor);
    };

    if !schedule.can_ever_fit(task.duration_minutes) {
        log_checks!(
            verbosity,
            "  Skip {}: {} min exceeds every window of '{}' (max {:?})",
            task.id,
            task.duration_minutes,
            schedule.id,
            schedule.max_span()
        );
        return unplaced(task, PlacementOutcome::ExceedsEveryWindow, None, options, cursor);
    }

    let found = find_next_available(
        options.start_date,
        schedule,
        task.duration_minutes,
        cursor,
        options.search_limit_months,
        verbosity,
    );

    match found {
        Some(slot) if slot.end <= options.end_date => {
            log_changes!(
                verbosity,
                "  Schedule {}: {} -> {}",
                task.id,
                slot.start,
                slot.end
            );
            (
                task.placed(slot.start, slot.end),
                PlacementDecision::new(&task.id, PlacementOutcome::Scheduled, Some(slot)),
                cursor.advance(slot.end),
            )
        }
        Some(slot) => {
            log_checks!(
                verbosity,
                "  Skip {}: fit ends {} after horizon end {}",
                task.id,
                slot.end,
                options.end_date
            );
            unplaced(task, PlacementOutcome::PastHorizonEnd, Some(slot), options, cursor)
        }
        None => {
            log_checks!(
                verbosity,
                "  Skip {}: no fit within {} months",
                task.id,
                options.search_limit_months
            );
            unplaced(task, PlacementOutcome::NoFitWithinSearchLimit, None, options, cursor)
        }
    }
}

fn unplaced(
    task: &Task,
    outcome: PlacementOutcome,
    slot: Option<Slot>,
    options: &SchedulerOptions,
    cursor: Cursor,
) -> (Task, PlacementDecision, Cursor) {
    let updated = if options.clear_stale_on_failure {
        task.unplaced()
    } else {
        task.clone()
    };
    (updated, PlacementDecision::new(&task.id, outcome, slot), cursor)
}
