//! Cursor threaded through the sequential allocator.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::models::minute_of_day;

/// End instant of the most recently committed task.
///
/// A plain value: each allocation step takes the current cursor and yields
/// the next one, so a run never shares mutable state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor(Option<NaiveDateTime>);

impl Cursor {
    /// Cursor before anything has been committed.
    pub fn start() -> Self {
        Self(None)
    }

    pub fn at(instant: NaiveDateTime) -> Self {
        Self(Some(instant))
    }

    pub fn instant(&self) -> Option<NaiveDateTime> {
        self.0
    }

    /// Cursor after committing a placement ending at `end`.
    ///
    /// Placements are searched from the current cursor, so `end` never lies
    /// before it; the max keeps the cursor monotonic regardless.
    pub fn advance(self, end: NaiveDateTime) -> Self {
        match self.0 {
            Some(current) if current > end => self,
            _ => Self(Some(end)),
        }
    }

    /// Minute-of-day of the cursor if it falls on `date`, rounded up to the
    /// next whole minute so a slot starting there never precedes the cursor.
    ///
    /// A cursor after 23:59 rounds to 1440, which closes every window of
    /// the day.
    pub fn minute_on(&self, date: NaiveDate) -> Option<u16> {
        self.0
            .filter(|instant| instant.date() == date)
            .map(|instant| {
                let partial = instant.second() > 0 || instant.nanosecond() > 0;
                minute_of_day(instant) + u16::from(partial)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_start_is_empty() {
        assert_eq!(Cursor::start().instant(), None);
        assert_eq!(Cursor::start(), Cursor::default());
        assert_eq!(Cursor::start().minute_on(dt(1, 0, 0).date()), None);
    }

    #[test]
    fn test_advance_is_monotonic() {
        let cursor = Cursor::start().advance(dt(1, 10, 0));
        assert_eq!(cursor.instant(), Some(dt(1, 10, 0)));
        assert_eq!(cursor.advance(dt(1, 9, 0)).instant(), Some(dt(1, 10, 0)));
        assert_eq!(cursor.advance(dt(2, 9, 0)).instant(), Some(dt(2, 9, 0)));
    }

    #[test]
    fn test_minute_on_same_day_only() {
        let cursor = Cursor::at(dt(1, 11, 30));
        assert_eq!(cursor.minute_on(dt(1, 0, 0).date()), Some(690));
        assert_eq!(cursor.minute_on(dt(2, 0, 0).date()), None);
    }

    #[test]
    fn test_minute_on_rounds_partial_minutes_up() {
        let day = dt(1, 0, 0).date();
        let half = Cursor::at(day.and_hms_opt(10, 0, 30).unwrap());
        assert_eq!(half.minute_on(day), Some(601));

        let nanos = Cursor::at(day.and_hms_nano_opt(10, 0, 0, 1).unwrap());
        assert_eq!(nanos.minute_on(day), Some(601));

        let late = Cursor::at(day.and_hms_opt(23, 59, 1).unwrap());
        assert_eq!(late.minute_on(day), Some(1440));
    }
}
