//! Input validation for a scheduling run.
//!
//! Placement failures are never errors (the task just stays unscheduled), but
//! malformed input is: it is rejected before any task is considered. Every
//! problem found is reported, not only the first.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::config::SchedulerOptions;
use crate::models::{Schedule, Task, MINUTES_PER_DAY};

/// A single malformed-input problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Schedule '{schedule_id}' window {index}: day_of_week {day_of_week} is outside 0..=6")]
    InvalidDayOfWeek {
        schedule_id: String,
        index: usize,
        day_of_week: u8,
    },
    #[error(
        "Schedule '{schedule_id}' window {index}: time range {start_minutes}..{end_minutes} \
         must satisfy start < end < {max}",
        max = MINUTES_PER_DAY
    )]
    InvalidTimeRange {
        schedule_id: String,
        index: usize,
        start_minutes: u16,
        end_minutes: u16,
    },
    #[error("Duplicate schedule ID: {0}")]
    DuplicateScheduleId(String),
    #[error("Task '{task_id}': duration must be positive, got {duration_minutes}")]
    NonPositiveDuration {
        task_id: String,
        duration_minutes: i64,
    },
    #[error("Horizon start {start} is after horizon end {end}")]
    InvertedHorizon { start: String, end: String },
    #[error("Search limit must be at least one month")]
    ZeroSearchLimit,
}

/// Validate schedules, tasks and options together.
///
/// # Returns
/// `Ok(())` if everything is well-formed, `Err(errors)` with all detected issues.
pub fn validate_input(
    tasks: &[Task],
    schedules: &[Schedule],
    options: &SchedulerOptions,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = validate_schedules(schedules);
    errors.extend(validate_tasks(tasks));
    errors.extend(validate_options(options));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_schedules(schedules: &[Schedule]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    for schedule in schedules {
        if !seen.insert(schedule.id.as_str()) {
            errors.push(ValidationError::DuplicateScheduleId(schedule.id.clone()));
        }

        for (index, window) in schedule.windows.iter().enumerate() {
            if window.day_of_week > 6 {
                errors.push(ValidationError::InvalidDayOfWeek {
                    schedule_id: schedule.id.clone(),
                    index,
                    day_of_week: window.day_of_week,
                });
            }
            if !window.time_range.is_well_formed() {
                errors.push(ValidationError::InvalidTimeRange {
                    schedule_id: schedule.id.clone(),
                    index,
                    start_minutes: window.time_range.start_minutes,
                    end_minutes: window.time_range.end_minutes,
                });
            }
        }
    }

    errors
}

/// Check that a duration is a positive number of minutes.
pub fn validate_duration(task_id: &str, duration_minutes: i64) -> Result<(), ValidationError> {
    if duration_minutes > 0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveDuration {
            task_id: task_id.to_string(),
            duration_minutes,
        })
    }
}

fn validate_tasks(tasks: &[Task]) -> Vec<ValidationError> {
    tasks
        .iter()
        .filter_map(|t| validate_duration(&t.id, t.duration_minutes).err())
        .collect()
}

fn validate_options(options: &SchedulerOptions) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if options.start_date > options.end_date {
        errors.push(ValidationError::InvertedHorizon {
            start: options.start_date.to_string(),
            end: options.end_date.to_string(),
        });
    }
    if options.search_limit_months == 0 {
        errors.push(ValidationError::ZeroSearchLimit);
    }
    errors
}
