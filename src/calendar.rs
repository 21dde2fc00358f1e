/// Week-window management for the booking date picker.
///
/// This module builds the seven visible `DateCell`s for a week offset and
/// provides `WeekNavigator`, which tracks the offset a user is looking at
/// and keeps it inside the booking horizon.

use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

use crate::error::{Result, SlotError};
use crate::models::DateCell;

pub const DAYS_PER_WEEK: usize = 7;

/// The last bookable date: `today + horizon_weeks * 7` days.
pub fn max_bookable_date(today: NaiveDate, horizon_weeks: u32) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(u64::from(horizon_weeks) * 7))
}

/// Generate the seven consecutive days starting at `today + week_offset * 7`.
///
/// The offset is not clamped here. Offsets beyond the horizon are valid and
/// produce cells that are all disabled.
pub fn generate_week(
    today: NaiveDate,
    week_offset: i64,
    horizon_weeks: u32,
) -> Result<[DateCell; DAYS_PER_WEEK]> {
    let out_of_range = SlotError::InvalidWeekOffset {
        offset: week_offset,
    };

    let start_days = u64::try_from(week_offset)
        .ok()
        .and_then(|offset| offset.checked_mul(DAYS_PER_WEEK as u64))
        .ok_or_else(|| out_of_range.clone())?;
    let window_start = today
        .checked_add_days(Days::new(start_days))
        .ok_or_else(|| out_of_range.clone())?;
    // The whole window has to be representable, not only its first day.
    window_start
        .checked_add_days(Days::new(DAYS_PER_WEEK as u64 - 1))
        .ok_or(out_of_range)?;

    debug!(
        "Generating week window starting {} (offset {}, horizon {} weeks)",
        window_start, week_offset, horizon_weeks
    );

    Ok(std::array::from_fn(|i| {
        DateCell::for_date(window_start + Days::new(i as u64), today, horizon_weeks)
    }))
}

/// The week offset whose window contains `date`.
///
/// Dates before today, or whose week starts past the horizon, are rejected.
pub fn week_for_date(date: NaiveDate, today: NaiveDate, horizon_weeks: u32) -> Result<u32> {
    let days_ahead = (date - today).num_days();
    let offset = days_ahead.div_euclid(DAYS_PER_WEEK as i64);

    if days_ahead < 0 || offset > i64::from(horizon_weeks) {
        return Err(SlotError::DateOutsideHorizon {
            date,
            horizon_weeks,
        });
    }

    Ok(offset as u32)
}

/// Tracks the visible week for one date picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekNavigator {
    today: NaiveDate,
    horizon_weeks: u32,
    week_offset: u32,
}

impl WeekNavigator {
    /// Start at the current week.
    pub fn new(today: NaiveDate, horizon_weeks: u32) -> Self {
        WeekNavigator {
            today,
            horizon_weeks,
            week_offset: 0,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn horizon_weeks(&self) -> u32 {
        self.horizon_weeks
    }

    pub fn week_offset(&self) -> u32 {
        self.week_offset
    }

    pub fn can_go_back(&self) -> bool {
        self.week_offset > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.week_offset < self.horizon_weeks
    }

    /// Move one week forward, stopping at the horizon.
    pub fn next(&mut self) -> u32 {
        self.week_offset = self.week_offset.saturating_add(1).min(self.horizon_weeks);
        self.week_offset
    }

    /// Move one week back, stopping at the current week.
    pub fn previous(&mut self) -> u32 {
        self.week_offset = self.week_offset.saturating_sub(1);
        self.week_offset
    }

    /// Show the week containing `date`. The offset is left unchanged when the
    /// date is outside the horizon.
    pub fn jump_to(&mut self, date: NaiveDate) -> Result<u32> {
        match week_for_date(date, self.today, self.horizon_weeks) {
            Ok(offset) => {
                self.week_offset = offset;
                Ok(offset)
            }
            Err(e) => {
                warn!("Ignoring jump to {}: {}", date, e);
                Err(e)
            }
        }
    }

    /// The seven cells of the visible week.
    pub fn window(&self) -> Result<[DateCell; DAYS_PER_WEEK]> {
        generate_week(self.today, i64::from(self.week_offset), self.horizon_weeks)
    }

    /// Classify any date against this navigator's today and horizon.
    pub fn cell(&self, date: NaiveDate) -> DateCell {
        DateCell::for_date(date, self.today, self.horizon_weeks)
    }

    pub fn max_bookable_date(&self) -> Option<NaiveDate> {
        max_bookable_date(self.today, self.horizon_weeks)
    }
}

impl std::fmt::Display for WeekNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Week {} of {} (today {})",
            u64::from(self.week_offset) + 1,
            u64::from(self.horizon_weeks) + 1,
            self.today
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn current_week_starts_today() {
        let today = date(2024, 6, 10);
        let week = generate_week(today, 0, 4).unwrap();

        assert_eq!(week[0].iso_date, today);
        assert!(week[0].is_today);
        assert!(week[1..].iter().all(|cell| !cell.is_today));
        assert_eq!(week[6].iso_date, date(2024, 6, 16));
    }

    #[test]
    fn window_crosses_month_and_year_boundaries() {
        let today = date(2024, 12, 28);
        let week = generate_week(today, 0, 4).unwrap();

        assert_eq!(week[3].iso_date, date(2024, 12, 31));
        assert_eq!(week[4].iso_date, date(2025, 1, 1));
        assert_eq!(week[4].month, "Jan");
    }

    #[test]
    fn horizon_boundary_is_inclusive() {
        let today = date(2024, 6, 10);
        // Offset 4 starts exactly on today + 28 days.
        let week = generate_week(today, 4, 4).unwrap();

        assert_eq!(week[0].iso_date, date(2024, 7, 8));
        assert!(!week[0].is_disabled);
        assert!(week[1..].iter().all(|cell| cell.is_disabled));
    }

    #[test]
    fn offset_past_horizon_disables_whole_week() {
        let week = generate_week(date(2024, 6, 10), 6, 4).unwrap();
        assert!(week.iter().all(|cell| cell.is_disabled && !cell.is_past));
    }

    #[test]
    fn negative_offset_is_rejected() {
        assert_eq!(
            generate_week(date(2024, 6, 10), -1, 4),
            Err(SlotError::InvalidWeekOffset { offset: -1 })
        );
    }

    #[test]
    fn offset_beyond_calendar_is_rejected() {
        assert!(generate_week(date(2024, 6, 10), i64::MAX, 4).is_err());
        assert!(generate_week(NaiveDate::MAX, 0, 4).is_err());
    }

    #[test]
    fn navigator_clamps_to_horizon() {
        let mut nav = WeekNavigator::new(date(2024, 6, 10), 2);
        assert!(!nav.can_go_back());

        assert_eq!(nav.previous(), 0);
        assert_eq!(nav.next(), 1);
        assert_eq!(nav.next(), 2);
        assert_eq!(nav.next(), 2);
        assert!(!nav.can_go_forward());
        assert_eq!(nav.to_string(), "Week 3 of 3 (today 2024-06-10)");
    }

    #[test]
    fn display_handles_largest_horizon() {
        let mut nav = WeekNavigator::new(date(2024, 6, 10), u32::MAX);
        assert_eq!(nav.to_string(), "Week 1 of 4294967296 (today 2024-06-10)");
        assert_eq!(nav.max_bookable_date(), None);

        nav.week_offset = u32::MAX;
        assert_eq!(nav.next(), u32::MAX);
        assert_eq!(
            nav.to_string(),
            "Week 4294967296 of 4294967296 (today 2024-06-10)"
        );
    }

    #[test]
    fn jump_uses_whole_weeks_from_today() {
        let today = date(2024, 6, 10);
        let mut nav = WeekNavigator::new(today, 8);

        assert_eq!(nav.jump_to(date(2024, 6, 16)), Ok(0));
        assert_eq!(nav.jump_to(date(2024, 6, 17)), Ok(1));
        assert_eq!(nav.jump_to(date(2024, 8, 5)), Ok(8));
        assert_eq!(nav.window().unwrap()[0].iso_date, date(2024, 8, 5));
    }

    #[test]
    fn jump_outside_horizon_keeps_offset() {
        let today = date(2024, 6, 10);
        let mut nav = WeekNavigator::new(today, 4);
        nav.next();

        assert!(nav.jump_to(date(2024, 6, 9)).is_err());
        assert!(nav.jump_to(date(2024, 7, 15)).is_err());
        assert_eq!(nav.week_offset(), 1);
    }

    #[test]
    fn max_bookable_date_matches_horizon() {
        let today = date(2024, 6, 10);
        assert_eq!(max_bookable_date(today, 4), Some(date(2024, 7, 8)));
        assert_eq!(max_bookable_date(today, 0), Some(today));
    }
}
