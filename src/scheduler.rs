/// Time-slot generation for a clinic day.
///
/// Each `Period` is walked in fixed 15-minute steps to produce the labels a
/// patient can pick from, and a table of periods is assembled into a
/// `DailySchedule` keyed by period name.

use tracing::debug;

use crate::error::Result;
use crate::models::{ClockTime, DailySchedule, Period, TimeSlotLabel};

/// Spacing between consecutive slots.
pub const SLOT_MINUTES: u32 = 15;

/// Generate the ordered slot labels covering one period.
///
/// The first label is the period start and the last label is always the
/// period end. A period that does not start strictly before it ends on the
/// same day is rejected instead of producing an unbounded sequence.
pub fn generate_slots(period: &Period) -> Result<Vec<TimeSlotLabel>> {
    period.validate()?;

    let start = period.start.minutes_from_midnight();
    let end = period.end.minutes_from_midnight();

    let mut slots = Vec::with_capacity((period.duration_minutes() / SLOT_MINUTES + 1) as usize);
    let mut cursor = start;
    while cursor < end {
        slots.push(ClockTime::from_minutes(cursor).label());
        cursor += SLOT_MINUTES;
    }
    slots.push(period.end.label());

    debug!(
        "Generated {} slots for period '{}' ({} - {})",
        slots.len(),
        period.name,
        period.start,
        period.end
    );

    Ok(slots)
}

/// Generate slots for every period, keeping the input order.
///
/// Overlapping periods are not detected; each one emits its own labels.
/// A repeated period name replaces the earlier entry in its original position.
pub fn build_daily_schedule(periods: &[Period]) -> Result<DailySchedule> {
    let mut schedule = DailySchedule::new();

    for period in periods {
        let slots = generate_slots(period)?;
        schedule.insert(period.name.clone(), slots);
    }

    debug!(
        "Built daily schedule with {} periods and {} slots",
        schedule.len(),
        schedule.total_slots()
    );

    Ok(schedule)
}
