//! Core data types: weekly availability windows, schedules and tasks.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use pyo3::prelude::*;

/// Minutes in one day; every `TimeRange` bound is strictly below this.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Day of week for a calendar date, 0 = Sunday .. 6 = Saturday.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Minutes past midnight of a wall-clock instant (seconds are dropped).
pub fn minute_of_day(instant: NaiveDateTime) -> u16 {
    (instant.hour() * 60 + instant.minute()) as u16
}

/// A span of the day, in minutes past local midnight.
///
/// Well-formed ranges satisfy `start_minutes < end_minutes < 1440`; this is
/// checked by `validation::validate_input`, not on construction, so that
/// Python callers get every problem reported at once.
#[pyclass]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeRange {
    #[pyo3(get, set)]
    pub start_minutes: u16,
    #[pyo3(get, set)]
    pub end_minutes: u16,
}

#[pymethods]
impl TimeRange {
    #[new]
    pub fn new(start_minutes: u16, end_minutes: u16) -> Self {
        Self {
            start_minutes,
            end_minutes,
        }
    }

    /// Length of the range in minutes (0 for malformed ranges).
    pub fn span(&self) -> u16 {
        self.end_minutes.saturating_sub(self.start_minutes)
    }

    pub fn is_well_formed(&self) -> bool {
        self.start_minutes < self.end_minutes && self.end_minutes < MINUTES_PER_DAY
    }

    fn __repr__(&self) -> String {
        format!(
            "TimeRange({:02}:{:02}-{:02}:{:02})",
            self.start_minutes / 60,
            self.start_minutes % 60,
            self.end_minutes / 60,
            self.end_minutes % 60
        )
    }
}

impl TimeRange {
    /// Build a range from hour/minute pairs, e.g. `from_hm(9, 0, 17, 0)`.
    ///
    /// Out-of-range parts saturate instead of overflowing; the resulting
    /// range is rejected by validation rather than wrapping into the day.
    pub fn from_hm(start_hour: u16, start_minute: u16, end_hour: u16, end_minute: u16) -> Self {
        let minutes = |hour: u16, minute: u16| hour.saturating_mul(60).saturating_add(minute);
        Self::new(minutes(start_hour, start_minute), minutes(end_hour, end_minute))
    }
}

/// One recurring availability window: a time range on a given day of week.
#[pyclass]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScheduleWindow {
    /// 0 = Sunday .. 6 = Saturday
    #[pyo3(get, set)]
    pub day_of_week: u8,
    #[pyo3(get, set)]
    pub time_range: TimeRange,
}

#[pymethods]
impl ScheduleWindow {
    #[new]
    pub fn new(day_of_week: u8, time_range: TimeRange) -> Self {
        Self {
            day_of_week,
            time_range,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleWindow(day_of_week={}, time_range={})",
            self.day_of_week,
            self.time_range.__repr__()
        )
    }
}

/// A named weekly availability pattern.
///
/// Windows are kept exactly as declared: entries sharing a day may overlap
/// and are never merged.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub windows: Vec<ScheduleWindow>,
}

#[pymethods]
impl Schedule {
    #[new]
    #[pyo3(signature = (id, name, windows=None))]
    pub fn new(id: String, name: String, windows: Option<Vec<ScheduleWindow>>) -> Self {
        Self {
            id,
            name,
            windows: windows.unwrap_or_default(),
        }
    }

    /// Longest single window span, or `None` if the schedule has no windows.
    pub fn max_span(&self) -> Option<u16> {
        self.windows.iter().map(|w| w.time_range.span()).max()
    }

    /// Whether at least one window is long enough to hold `duration_minutes`.
    pub fn can_ever_fit(&self, duration_minutes: i64) -> bool {
        self.windows
            .iter()
            .any(|w| i64::from(w.time_range.span()) >= duration_minutes)
    }

    fn __repr__(&self) -> String {
        format!(
            "Schedule(id={:?}, name={:?}, windows={})",
            self.id,
            self.name,
            self.windows.len()
        )
    }
}

impl Schedule {
    /// Add a window (builder style).
    pub fn with_window(mut self, day_of_week: u8, time_range: TimeRange) -> Self {
        self.windows.push(ScheduleWindow::new(day_of_week, time_range));
        self
    }
}

/// Lifecycle state of a task.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    #[default]
    #[pyo3(name = "NOT_STARTED")]
    NotStarted,
    #[pyo3(name = "IN_PROGRESS")]
    InProgress,
    #[pyo3(name = "COMPLETED")]
    Completed,
}

/// A task to place on its schedule.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration_minutes: i64,
    #[pyo3(get, set)]
    pub schedule_id: String,
    #[pyo3(get, set)]
    pub status: TaskStatus,
    #[pyo3(get, set)]
    pub completed_at: Option<NaiveDateTime>,
    #[pyo3(get, set)]
    pub scheduled_start_date: Option<NaiveDateTime>,
    #[pyo3(get, set)]
    pub scheduled_end_date: Option<NaiveDateTime>,
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (
        id,
        name,
        duration_minutes,
        schedule_id,
        status=TaskStatus::NotStarted,
        completed_at=None,
        scheduled_start_date=None,
        scheduled_end_date=None
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        name: String,
        duration_minutes: i64,
        schedule_id: String,
        status: TaskStatus,
        completed_at: Option<NaiveDateTime>,
        scheduled_start_date: Option<NaiveDateTime>,
        scheduled_end_date: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id,
            name,
            duration_minutes,
            schedule_id,
            status,
            completed_at,
            scheduled_start_date,
            scheduled_end_date,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled_start_date.is_some() && self.scheduled_end_date.is_some()
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, duration_minutes={}, schedule_id={:?}, status={:?}, start={:?}, end={:?})",
            self.id,
            self.duration_minutes,
            self.schedule_id,
            self.status,
            self.scheduled_start_date,
            self.scheduled_end_date
        )
    }
}

impl Task {
    /// Copy of this task with both scheduling fields set.
    pub fn placed(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            scheduled_start_date: Some(start),
            scheduled_end_date: Some(end),
            ..self.clone()
        }
    }

    /// Copy of this task with both scheduling fields cleared.
    pub fn unplaced(&self) -> Self {
        Self {
            scheduled_start_date: None,
            scheduled_end_date: None,
            ..self.clone()
        }
    }
}
