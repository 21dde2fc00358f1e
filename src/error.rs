/// Errors raised while building week windows, time slots and slot requests.
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Meridiem;

pub type Result<T> = std::result::Result<T, SlotError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("invalid clock time {hour:02}:{minute:02} {meridiem}: hour must be 1-12 and minute 0-59")]
    InvalidClockTime {
        hour: u32,
        minute: u32,
        meridiem: Meridiem,
    },

    #[error("invalid bounds for period '{name}' ({start} - {end}): {reason}")]
    InvalidPeriodBounds {
        name: String,
        start: String,
        end: String,
        reason: String,
    },

    #[error("week offset {offset} is out of range")]
    InvalidWeekOffset { offset: i64 },

    #[error("{date} is outside the {horizon_weeks}-week booking horizon")]
    DateOutsideHorizon { date: NaiveDate, horizon_weeks: u32 },

    #[error("{date} cannot be booked: {reason}")]
    DateNotBookable { date: NaiveDate, reason: &'static str },

    #[error("slot '{slot}' is not offered in the daily schedule")]
    UnknownSlot { slot: String },

    #[error("no {missing} selected")]
    IncompleteSelection { missing: &'static str },
}
