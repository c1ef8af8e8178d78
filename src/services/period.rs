//! Period resolver
//!
//! Maps a budget's period configuration and an instant to the concrete
//! `[start, end)` window its spending is measured over.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::models::{Budget, PeriodType, PeriodWindow};

/// Resolve the window a budget is currently measured over
pub fn resolve_period(budget: &Budget, now: NaiveDateTime) -> PeriodWindow {
    match budget.period_type {
        PeriodType::Weekly => current_week(now),
        PeriodType::Monthly => current_month(now),
        PeriodType::Custom => match (budget.custom_start_date, budget.custom_end_date) {
            (Some(start), Some(end)) => custom_cycle(start, end, now),
            _ => {
                log::debug!(
                    "budget '{}' is custom without dates, using the calendar month",
                    budget.name
                );
                current_month(now)
            }
        },
    }
}

/// The calendar month containing `now`
pub fn current_month(now: NaiveDateTime) -> PeriodWindow {
    let date = now.date();
    let start = first_of_month(date.year(), date.month());
    let end = if date.month() == 12 {
        first_of_month(date.year() + 1, 1)
    } else {
        first_of_month(date.year(), date.month() + 1)
    };
    PeriodWindow::from_dates(start, end)
}

/// Monday 00:00 of the week containing `now` through the following Monday
pub fn current_week(now: NaiveDateTime) -> PeriodWindow {
    let date = now.date();
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    PeriodWindow::from_dates(monday, monday + Duration::days(7))
}

/// The cycle of a recurring custom period that contains `now`
///
/// The original `[start, end)` fixes both the anchor and the cycle length in
/// whole days; cycles repeat back to back from the anchor in both directions.
/// A range of zero or negative length is returned unchanged.
pub fn custom_cycle(start: NaiveDate, end: NaiveDate, now: NaiveDateTime) -> PeriodWindow {
    let original = PeriodWindow::from_dates(start, end);
    let period_days = (end - start).num_days();
    if period_days <= 0 {
        return original;
    }

    let cycle_len = Duration::days(period_days);
    let elapsed_ms = (now - original.start).num_milliseconds();
    let mut cycle = elapsed_ms.div_euclid(cycle_len.num_milliseconds());

    let mut cycle_start = original.start + Duration::days(cycle * period_days);
    // num_milliseconds truncates, which can land one cycle late just before the anchor
    if now < cycle_start {
        cycle -= 1;
        cycle_start = original.start + Duration::days(cycle * period_days);
    }

    PeriodWindow::new(cycle_start, cycle_start + cycle_len)
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}
