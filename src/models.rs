/// Data models for week-window and time-slot generation.
///
/// This module defines the core data structures used throughout the crate:
/// - Meridiem: AM/PM half of a 12-hour clock
/// - ClockTime: A validated 12-hour time of day
/// - Period: A named band of the day (morning, afternoon, ...)
/// - TimeSlotLabel: A bookable `HH:MM AM` label
/// - DateCell: One selectable day in a visible week window
/// - DailySchedule: Slot labels grouped by period, in period order

use std::fmt;

use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Half of the day on a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meridiem {
    #[serde(rename = "AM", alias = "am")]
    Am,
    #[serde(rename = "PM", alias = "pm")]
    Pm,
}

impl Meridiem {
    /// Convert a string to a Meridiem value.
    pub fn from_string(value: &str) -> std::result::Result<Self, String> {
        match value.trim().to_uppercase().as_str() {
            "AM" => Ok(Meridiem::Am),
            "PM" => Ok(Meridiem::Pm),
            _ => Err(format!("Invalid meridiem: '{}'. Must be AM or PM", value)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A time of day on the 12-hour clock.
///
/// Hour 12 is the top of the scale: `12:00 AM` is midnight and
/// `12:00 PM` is noon. It is never represented as hour 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Meridiem,
}

impl ClockTime {
    /// Create a new clock time with validation.
    pub fn new(hour: u32, minute: u32, meridiem: Meridiem) -> Result<Self> {
        let time = ClockTime {
            hour,
            minute,
            meridiem,
        };
        time.validate()?;
        Ok(time)
    }

    /// Check the hour and minute ranges. Deserialized values bypass `new`,
    /// so callers loading tables from configuration run this explicitly.
    pub fn validate(&self) -> Result<()> {
        if !(1..=12).contains(&self.hour) || self.minute >= 60 {
            return Err(SlotError::InvalidClockTime {
                hour: self.hour,
                minute: self.minute,
                meridiem: self.meridiem,
            });
        }
        Ok(())
    }

    /// Parse typed input such as `9:15 pm` or `09:15 PM`.
    pub fn parse(value: &str) -> std::result::Result<Self, String> {
        let invalid = || format!("Invalid time: '{}'. Expected HH:MM AM or HH:MM PM", value.trim());

        let mut parts = value.split_whitespace();
        let (Some(time), Some(meridiem), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let (hour, minute) = time.split_once(':').ok_or_else(invalid)?;
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        let meridiem = Meridiem::from_string(meridiem)?;

        ClockTime::new(hour, minute, meridiem).map_err(|e| e.to_string())
    }

    /// Minutes elapsed since local midnight.
    pub fn minutes_from_midnight(&self) -> u32 {
        let hour_24 = match (self.hour, self.meridiem) {
            (12, Meridiem::Am) => 0,
            (12, Meridiem::Pm) => 12,
            (hour, Meridiem::Am) => hour,
            (hour, Meridiem::Pm) => hour + 12,
        };
        hour_24 * 60 + self.minute
    }

    /// Build a clock time from minutes since local midnight, wrapping at 24h.
    pub fn from_minutes(minutes: u32) -> Self {
        let minutes = minutes % MINUTES_PER_DAY;
        let hour_24 = minutes / 60;
        let meridiem = if hour_24 < 12 { Meridiem::Am } else { Meridiem::Pm };
        let hour = match hour_24 % 12 {
            0 => 12,
            hour => hour,
        };
        ClockTime {
            hour,
            minute: minutes % 60,
            meridiem,
        }
    }

    pub fn label(&self) -> TimeSlotLabel {
        TimeSlotLabel(self.to_string())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} {}", self.hour, self.minute, self.meridiem)
    }
}

/// A named band of the day bounded by a start and end clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub name: String,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl Period {
    /// Create a new period with validation.
    pub fn new(name: impl Into<String>, start: ClockTime, end: ClockTime) -> Result<Self> {
        let period = Period {
            name: name.into(),
            start,
            end,
        };
        period.validate()?;
        Ok(period)
    }

    /// Both boundaries must be valid clock times and the start must fall
    /// strictly before the end within the same day. Every failure is
    /// reported as `InvalidPeriodBounds`.
    pub fn validate(&self) -> Result<()> {
        if let Err(e) = self.start.validate().and_then(|_| self.end.validate()) {
            return Err(self.bounds_error(e.to_string()));
        }

        if self.start.minutes_from_midnight() >= self.end.minutes_from_midnight() {
            return Err(self.bounds_error("start must be before end".to_string()));
        }
        Ok(())
    }

    fn bounds_error(&self, reason: String) -> SlotError {
        SlotError::InvalidPeriodBounds {
            name: self.name.clone(),
            start: self.start.to_string(),
            end: self.end.to_string(),
            reason,
        }
    }

    /// Length of the period in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.end
            .minutes_from_midnight()
            .saturating_sub(self.start.minutes_from_midnight())
    }
}

/// A bookable time-of-day label such as `09:15 AM`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlotLabel(String);

impl TimeSlotLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeSlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ClockTime> for TimeSlotLabel {
    fn from(time: ClockTime) -> Self {
        time.label()
    }
}

/// One selectable day in a visible week window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateCell {
    pub iso_date: NaiveDate,
    pub weekday: String,
    pub day_of_month: u32,
    pub month: String,
    pub is_today: bool,
    pub is_past: bool,
    pub is_disabled: bool,
}

impl DateCell {
    /// Classify `date` against a single `today` reference.
    ///
    /// A date is disabled once it lies more than `horizon_weeks * 7` days
    /// after today; the boundary day itself is still bookable.
    pub fn for_date(date: NaiveDate, today: NaiveDate, horizon_weeks: u32) -> Self {
        let days_ahead = (date - today).num_days();
        let horizon_days = i64::from(horizon_weeks) * 7;

        DateCell {
            iso_date: date,
            weekday: date.format("%a").to_string(),
            day_of_month: date.day(),
            month: date.format("%b").to_string(),
            is_today: days_ahead == 0,
            is_past: days_ahead < 0,
            is_disabled: days_ahead > horizon_days,
        }
    }

    /// The `YYYY-MM-DD` form used in booking requests.
    pub fn iso_string(&self) -> String {
        self.iso_date.format("%Y-%m-%d").to_string()
    }

    pub fn is_selectable(&self) -> bool {
        !self.is_past && !self.is_disabled
    }
}

/// Slot labels grouped by period name, iterated in period order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DailySchedule {
    periods: IndexMap<String, Vec<TimeSlotLabel>>,
}

impl DailySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the slots for a period. A replaced period keeps
    /// its original position.
    pub fn insert(&mut self, name: impl Into<String>, slots: Vec<TimeSlotLabel>) {
        self.periods.insert(name.into(), slots);
    }

    pub fn get(&self, name: &str) -> Option<&[TimeSlotLabel]> {
        self.periods.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TimeSlotLabel])> {
        self.periods
            .iter()
            .map(|(name, slots)| (name.as_str(), slots.as_slice()))
    }

    pub fn period_names(&self) -> Vec<&str> {
        self.periods.keys().map(String::as_str).collect()
    }

    /// Look up a label by its text across all periods.
    pub fn find_slot(&self, label: &str) -> Option<&TimeSlotLabel> {
        self.periods
            .values()
            .flatten()
            .find(|slot| slot.as_str() == label)
    }

    pub fn contains_slot(&self, label: &str) -> bool {
        self.find_slot(label).is_some()
    }

    pub fn total_slots(&self) -> usize {
        self.periods.values().map(Vec::len).sum()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

fn clock(hour: u32, minute: u32, meridiem: Meridiem) -> ClockTime {
    ClockTime {
        hour,
        minute,
        meridiem,
    }
}

/// The clinic's standard day: morning, afternoon, evening and night.
pub fn default_periods() -> Vec<Period> {
    vec![
        Period {
            name: "morning".to_string(),
            start: clock(9, 0, Meridiem::Am),
            end: clock(12, 0, Meridiem::Pm),
        },
        Period {
            name: "afternoon".to_string(),
            start: clock(12, 0, Meridiem::Pm),
            end: clock(4, 0, Meridiem::Pm),
        },
        Period {
            name: "evening".to_string(),
            start: clock(4, 0, Meridiem::Pm),
            end: clock(7, 0, Meridiem::Pm),
        },
        Period {
            name: "night".to_string(),
            start: clock(7, 0, Meridiem::Pm),
            end: clock(9, 0, Meridiem::Pm),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn noon_and_midnight_use_hour_twelve() {
        let noon = ClockTime::new(12, 0, Meridiem::Pm).unwrap();
        let midnight = ClockTime::new(12, 0, Meridiem::Am).unwrap();

        assert_eq!(noon.minutes_from_midnight(), 720);
        assert_eq!(midnight.minutes_from_midnight(), 0);
        assert_eq!(ClockTime::from_minutes(720), noon);
        assert_eq!(ClockTime::from_minutes(0), midnight);
        assert_eq!(ClockTime::from_minutes(13 * 60 + 15).to_string(), "01:15 PM");
    }

    #[test]
    fn clock_time_rejects_out_of_range_values() {
        assert!(ClockTime::new(0, 0, Meridiem::Am).is_err());
        assert!(ClockTime::new(13, 0, Meridiem::Pm).is_err());
        assert!(ClockTime::new(9, 60, Meridiem::Am).is_err());
    }

    #[test]
    fn period_requires_start_before_end() {
        let nine = ClockTime::new(9, 0, Meridiem::Pm).unwrap();
        let seven = ClockTime::new(7, 0, Meridiem::Pm).unwrap();

        assert!(Period::new("night", seven, nine).is_ok());
        assert!(matches!(
            Period::new("backwards", nine, seven),
            Err(SlotError::InvalidPeriodBounds { .. })
        ));
        assert!(Period::new("empty", nine, nine).is_err());
    }

    #[test]
    fn default_periods_are_valid_and_adjacent() {
        let periods = default_periods();
        for period in &periods {
            period.validate().unwrap();
        }
        for pair in periods.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn meridiem_parses_case_insensitively() {
        assert_eq!(Meridiem::from_string(" pm "), Ok(Meridiem::Pm));
        assert!(Meridiem::from_string("noon").is_err());
    }

    #[test]
    fn typed_time_normalizes_to_slot_label() {
        let time = ClockTime::parse(" 9:15 pm ").unwrap();
        assert_eq!(TimeSlotLabel::from(time).as_str(), "09:15 PM");

        assert!(ClockTime::parse("09:15").is_err());
        assert!(ClockTime::parse("0915 PM").is_err());
        assert!(ClockTime::parse("13:00 PM").is_err());
        assert!(ClockTime::parse("09:15 PM extra").is_err());
    }

    #[test]
    fn date_cell_labels_and_flags() {
        let today = date(2024, 6, 10);
        let cell = DateCell::for_date(today, today, 4);

        assert_eq!(cell.weekday, "Mon");
        assert_eq!(cell.month, "Jun");
        assert_eq!(cell.day_of_month, 10);
        assert_eq!(cell.iso_string(), "2024-06-10");
        assert!(cell.is_today && !cell.is_past && !cell.is_disabled);

        let yesterday = DateCell::for_date(date(2024, 6, 9), today, 4);
        assert!(yesterday.is_past && !yesterday.is_today);
        assert!(!yesterday.is_selectable());
    }

    #[test]
    fn date_cell_serializes_camel_case() {
        let today = date(2024, 6, 10);
        let json = serde_json::to_value(DateCell::for_date(today, today, 4)).unwrap();

        assert_eq!(json["isoDate"], "2024-06-10");
        assert_eq!(json["dayOfMonth"], 10);
        assert_eq!(json["isDisabled"], false);
    }
}
