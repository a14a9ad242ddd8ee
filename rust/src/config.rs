//! Configuration for a scheduling run.

use chrono::NaiveDateTime;
use pyo3::prelude::*;

/// How far past the origin the next-fit search may look, in calendar months.
pub const DEFAULT_SEARCH_LIMIT_MONTHS: u32 = 12;

/// Horizon and tuning knobs for one call to `schedule`.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct SchedulerOptions {
    /// Horizon start; also the search origin for every task
    #[pyo3(get, set)]
    pub start_date: NaiveDateTime,
    /// Horizon end; a placement must end at or before this instant
    #[pyo3(get, set)]
    pub end_date: NaiveDateTime,
    /// Search bound per task, in months past `start_date`
    #[pyo3(get, set)]
    pub search_limit_months: u32,
    /// Clear stale scheduled dates on tasks that fail to place
    #[pyo3(get, set)]
    pub clear_stale_on_failure: bool,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl SchedulerOptions {
    /// Options for the horizon `[start_date, end_date]` with default tuning.
    pub fn new(start_date: NaiveDateTime, end_date: NaiveDateTime) -> Self {
        Self {
            start_date,
            end_date,
            search_limit_months: DEFAULT_SEARCH_LIMIT_MONTHS,
            clear_stale_on_failure: false,
            verbosity: 0,
        }
    }

    pub fn with_search_limit_months(mut self, months: u32) -> Self {
        self.search_limit_months = months;
        self
    }

    pub fn with_clear_stale_on_failure(mut self, clear: bool) -> Self {
        self.clear_stale_on_failure = clear;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }
}

#[pymethods]
impl SchedulerOptions {
    #[new]
    #[pyo3(signature = (
        start_date,
        end_date,
        search_limit_months=DEFAULT_SEARCH_LIMIT_MONTHS,
        clear_stale_on_failure=false,
        verbosity=0
    ))]
    fn py_new(
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        search_limit_months: u32,
        clear_stale_on_failure: bool,
        verbosity: u8,
    ) -> Self {
        Self::new(start_date, end_date)
            .with_search_limit_months(search_limit_months)
            .with_clear_stale_on_failure(clear_stale_on_failure)
            .with_verbosity(verbosity)
    }

    fn __repr__(&self) -> String {
        format!(
            "SchedulerOptions(start_date={}, end_date={}, search_limit_months={})",
            self.start_date, self.end_date, self.search_limit_months
        )
    }
}
