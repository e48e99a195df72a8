//! Next-payment-date arithmetic for recurring subscriptions.
//!
//! Pure calendar-date computation: no I/O, no shared state, safe to call from
//! any context. Dates are `chrono::NaiveDate` values (serialized `YYYY-MM-DD`,
//! no time component, no timezone).
//!
//! Month and year steps clamp to the last valid day of the target month, so
//! advancing Jan 31 by one month lands on Feb 28 (or Feb 29 in a leap year)
//! rather than overflowing into March. For monthly cycles an optional
//! `payment_day` (1..=31) re-anchors the day-of-month after each step, again
//! clamped to the month length.

use crate::subscriptions::BillingCycle;
use chrono::{Datelike, Days, Local, Months, NaiveDate};

/// Compute the initial next-payment-date when a cadence is first chosen.
///
/// Starting from the current calendar date, advances by exactly one unit of
/// the cadence (+1 day / +7 days / +1 month / +1 year). `payment_day` is only
/// meaningful for monthly cycles; out-of-range values (outside 1..=31) are
/// ignored.
///
/// Returns `None` when `cycle` is absent: no cadence means no schedule.
pub fn initialize_next_payment_date(
    cycle: Option<BillingCycle>,
    payment_day: Option<u32>,
) -> Option<NaiveDate> {
    initialize_from(cycle, payment_day, today())
}

/// Roll a possibly lapsed next-payment-date forward past the current date.
///
/// A `current` date that is still strictly in the future is returned
/// unchanged. Otherwise the existing date (or today, if none) is advanced one
/// cadence unit at a time until the result is strictly after today; a date
/// equal to today is not sufficient and is advanced again.
///
/// Returns `None` when `cycle` is absent.
pub fn calculate_next_payment_date(
    cycle: Option<BillingCycle>,
    payment_day: Option<u32>,
    current: Option<NaiveDate>,
) -> Option<NaiveDate> {
    calculate_from(cycle, payment_day, current, today())
}

/// Deterministic form of [`initialize_next_payment_date`] with an explicit
/// "today". This is what the wall-clock entry point delegates to.
pub fn initialize_from(
    cycle: Option<BillingCycle>,
    payment_day: Option<u32>,
    today: NaiveDate,
) -> Option<NaiveDate> {
    advance(today, cycle?, valid_payment_day(payment_day))
}

/// Deterministic form of [`calculate_next_payment_date`] with an explicit
/// "today".
pub fn calculate_from(
    cycle: Option<BillingCycle>,
    payment_day: Option<u32>,
    current: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let cycle = cycle?;
    let payment_day = valid_payment_day(payment_day);

    // A still-valid future date is kept as-is.
    if let Some(current) = current {
        if current > today {
            return Some(current);
        }
    }

    let mut date = current.unwrap_or(today);
    while date <= today {
        date = advance(date, cycle, payment_day)?;
    }
    Some(date)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Advance a date by one cadence unit.
///
/// `advance` strictly increases the date, which is what makes the roll-forward
/// loop in [`calculate_from`] terminate. Returns `None` only when the result
/// would fall outside chrono's representable range.
fn advance(date: NaiveDate, cycle: BillingCycle, payment_day: Option<u32>) -> Option<NaiveDate> {
    match cycle {
        BillingCycle::Daily => date.checked_add_days(Days::new(1)),
        BillingCycle::Weekly => date.checked_add_days(Days::new(7)),
        BillingCycle::Monthly => {
            // checked_add_months clamps to the last valid day of the month
            let next = date.checked_add_months(Months::new(1))?;
            match payment_day {
                Some(day) => anchor_day(next, day),
                None => Some(next),
            }
        }
        BillingCycle::Yearly => date.checked_add_months(Months::new(12)),
    }
}

/// Set the day-of-month to `min(day, last day of that month)`.
fn anchor_day(date: NaiveDate, day: u32) -> Option<NaiveDate> {
    let clamped = day.min(last_day_of_month(date.year(), date.month()));
    date.with_day(clamped)
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|&d| NaiveDate::from_ymd_opt(year, month, d).is_some())
        .unwrap_or(28)
}

/// A payment day outside 1..=31 means "no specific day".
fn valid_payment_day(day: Option<u32>) -> Option<u32> {
    day.filter(|d| (1..=31).contains(d))
}
