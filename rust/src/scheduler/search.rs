//! First-fit search for the next window with room for a task.

use chrono::{Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::log_debug;
use crate::models::Schedule;

use super::state::Cursor;
use super::windows::resolve_windows;

/// A concrete placement: `[start, end)` on one day inside one window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Find the earliest window instance that can hold `duration_minutes`.
///
/// The scan starts on the cursor's day if the cursor is past `origin`,
/// otherwise on `origin`'s day, and runs day by day through
/// `origin + search_limit_months` inclusive. Only the day of the starting
/// instant matters: within a day a window opens at its own start, or at the
/// cursor when the cursor sits inside it. The first window the task fits in
/// wins; a task never crosses a window's close (and so never crosses
/// midnight).
///
/// Returns `None` when nothing fits before the bound, and without scanning
/// when `duration_minutes` is not positive or longer than every window.
pub fn find_next_available(
    origin: NaiveDateTime,
    schedule: &Schedule,
    duration_minutes: i64,
    cursor: Cursor,
    search_limit_months: u32,
    verbosity: u8,
) -> Option<Slot> {
    if duration_minutes <= 0 || !schedule.can_ever_fit(duration_minutes) {
        log_debug!(
            verbosity,
            "    {} min can never fit schedule '{}'",
            duration_minutes,
            schedule.id
        );
        return None;
    }

    let search_start = match cursor.instant() {
        Some(instant) if instant > origin => instant,
        _ => origin,
    };
    let last_day = origin
        .date()
        .checked_add_months(Months::new(search_limit_months))?;

    let mut day = search_start.date();
    while day <= last_day {
        if let Some(slot) = fit_on_day(day, schedule, duration_minutes, cursor, verbosity) {
            return Some(slot);
        }
        day = day.succ_opt()?;
    }

    log_debug!(
        verbosity,
        "    No window in schedule '{}' fits {} min through {}",
        schedule.id,
        duration_minutes,
        last_day
    );
    None
}

fn fit_on_day(
    day: NaiveDate,
    schedule: &Schedule,
    duration_minutes: i64,
    cursor: Cursor,
    verbosity: u8,
) -> Option<Slot> {
    let cursor_minute = cursor.minute_on(day);

    for window in resolve_windows(day, schedule, cursor) {
        let range = window.time_range;
        let start_minutes = match cursor_minute {
            Some(minute) if range.start_minutes < minute => minute,
            _ => range.start_minutes,
        };

        let fits = i64::from(start_minutes)
            .checked_add(duration_minutes)
            .is_some_and(|end_minutes| end_minutes <= i64::from(range.end_minutes));
        if !fits {
            log_debug!(
                verbosity,
                "    {} window {}..{}: {} min from {} does not fit",
                day,
                range.start_minutes,
                range.end_minutes,
                duration_minutes,
                start_minutes
            );
            continue;
        }

        let time = NaiveTime::from_hms_opt(
            u32::from(start_minutes / 60),
            u32::from(start_minutes % 60),
            0,
        )?;
        let start = day.and_time(time);
        let end = start.checked_add_signed(Duration::minutes(duration_minutes))?;
        return Some(Slot { start, end });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SEARCH_LIMIT_MONTHS;
    use crate::models::TimeRange;

    fn dt(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn weekdays_nine_to_five() -> Schedule {
        (1..=5).fold(
            Schedule::new("work".to_string(), "Work".to_string(), None),
            |s, day| s.with_window(day, TimeRange::from_hm(9, 0, 17, 0)),
        )
    }

    fn find(schedule: &Schedule, duration: i64, cursor: Cursor) -> Option<Slot> {
        find_next_available(
            dt(2024, 1, 1, 0, 0),
            schedule,
            duration,
            cursor,
            DEFAULT_SEARCH_LIMIT_MONTHS,
            0,
        )
    }

    #[test]
    fn test_first_window_from_origin() {
        let slot = find(&weekdays_nine_to_five(), 60, Cursor::start()).unwrap();
        assert_eq!(slot.start, dt(2024, 1, 1, 9, 0));
        assert_eq!(slot.end, dt(2024, 1, 1, 10, 0));
    }

    #[test]
    fn test_origin_time_of_day_is_not_applied() {
        // Origin Monday 13:00 still opens at the window start on that day
        let slot = find_next_available(
            dt(2024, 1, 1, 13, 0),
            &weekdays_nine_to_five(),
            60,
            Cursor::start(),
            DEFAULT_SEARCH_LIMIT_MONTHS,
            0,
        )
        .unwrap();
        assert_eq!(slot.start, dt(2024, 1, 1, 9, 0));
    }

    #[test]
    fn test_continues_from_cursor_inside_window() {
        let slot = find(&weekdays_nine_to_five(), 60, Cursor::at(dt(2024, 1, 1, 11, 0))).unwrap();
        assert_eq!(slot.start, dt(2024, 1, 1, 11, 0));
        assert_eq!(slot.end, dt(2024, 1, 1, 12, 0));
    }

    #[test]
    fn test_cursor_before_window_uses_window_start() {
        let schedule = Schedule::new("s".to_string(), "S".to_string(), None)
            .with_window(1, TimeRange::from_hm(8, 0, 10, 0))
            .with_window(1, TimeRange::from_hm(13, 0, 17, 0));
        // 90 minutes no longer fit 09:30-10:00, so the afternoon window opens at 13:00
        let slot = find(&schedule, 90, Cursor::at(dt(2024, 1, 1, 9, 30))).unwrap();
        assert_eq!(slot.start, dt(2024, 1, 1, 13, 0));
    }

    #[test]
    fn test_rolls_to_next_day_when_remainder_too_short() {
        let slot = find(&weekdays_nine_to_five(), 120, Cursor::at(dt(2024, 1, 1, 16, 0))).unwrap();
        assert_eq!(slot.start, dt(2024, 1, 2, 9, 0));
        assert_eq!(slot.end, dt(2024, 1, 2, 11, 0));
    }

    #[test]
    fn test_exact_fit_to_window_close() {
        let slot = find(&weekdays_nine_to_five(), 60, Cursor::at(dt(2024, 1, 1, 16, 0))).unwrap();
        assert_eq!(slot.end, dt(2024, 1, 1, 17, 0));
    }

    #[test]
    fn test_skips_weekend() {
        // Friday 17:00 cursor: next opening is Monday
        let slot = find(&weekdays_nine_to_five(), 30, Cursor::at(dt(2024, 1, 5, 17, 0))).unwrap();
        assert_eq!(slot.start, dt(2024, 1, 8, 9, 0));
    }

    #[test]
    fn test_cursor_before_origin_is_ignored() {
        let slot = find_next_available(
            dt(2024, 1, 2, 0, 0),
            &weekdays_nine_to_five(),
            60,
            Cursor::at(dt(2024, 1, 1, 12, 0)),
            DEFAULT_SEARCH_LIMIT_MONTHS,
            0,
        )
        .unwrap();
        assert_eq!(slot.start, dt(2024, 1, 2, 9, 0));
    }

    #[test]
    fn test_overlapping_windows_tried_independently() {
        let schedule = Schedule::new("s".to_string(), "S".to_string(), None)
            .with_window(1, TimeRange::from_hm(9, 0, 12, 0))
            .with_window(1, TimeRange::from_hm(10, 0, 14, 0));
        // From 10:00, 180 min overflow 09-12 but fit the overlapping 10-14 entry
        let slot = find(&schedule, 180, Cursor::at(dt(2024, 1, 1, 10, 0))).unwrap();
        assert_eq!(slot.start, dt(2024, 1, 1, 10, 0));
        assert_eq!(slot.end, dt(2024, 1, 1, 13, 0));
    }

    #[test]
    fn test_oversized_duration_is_no_fit() {
        assert_eq!(find(&weekdays_nine_to_five(), i64::MAX, Cursor::start()), None);
        assert_eq!(
            find(&weekdays_nine_to_five(), i64::MAX, Cursor::at(dt(2024, 1, 1, 10, 0))),
            None
        );
        assert_eq!(find(&weekdays_nine_to_five(), 481, Cursor::start()), None);
    }

    #[test]
    fn test_non_positive_duration_is_no_fit() {
        assert_eq!(find(&weekdays_nine_to_five(), 0, Cursor::start()), None);
        assert_eq!(find(&weekdays_nine_to_five(), -30, Cursor::start()), None);
    }

    #[test]
    fn test_sub_minute_cursor_rounds_up() {
        let cursor = Cursor::at(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 30)
                .unwrap(),
        );
        let slot = find(&weekdays_nine_to_five(), 60, cursor).unwrap();
        assert_eq!(slot.start, dt(2024, 1, 1, 10, 1));
        assert_eq!(slot.end, dt(2024, 1, 1, 11, 1));
        assert!(slot.start >= cursor.instant().unwrap());
    }

    #[test]
    fn test_empty_schedule_terminates() {
        let schedule = Schedule::new("none".to_string(), "None".to_string(), None);
        assert_eq!(find(&schedule, 30, Cursor::start()), None);
    }

    #[test]
    fn test_search_limit_is_inclusive() {
        // Only Sundays are open; 2024-01-01 is a Monday
        let sundays = Schedule::new("sun".to_string(), "Sun".to_string(), None)
            .with_window(0, TimeRange::from_hm(9, 0, 10, 0));
        // 2024-02-01 + 1 month = 2024-03-01 (Friday); next Sunday is 2024-03-03
        let origin = dt(2024, 2, 1, 0, 0);
        let cursor = Cursor::at(dt(2024, 2, 25, 10, 0));
        assert_eq!(find_next_available(origin, &sundays, 60, cursor, 1, 0), None);

        let slot = find_next_available(origin, &sundays, 60, cursor, 2, 0).unwrap();
        assert_eq!(slot.start, dt(2024, 3, 3, 9, 0));
    }
}
