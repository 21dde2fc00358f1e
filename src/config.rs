/// Runtime configuration for the slot picker.
///
/// Values come from the environment (optionally seeded from a `.env` file)
/// and fall back to the clinic defaults when missing or malformed.

use std::env;

use tracing::warn;

use crate::booking::BookingMode;
use crate::models::{default_periods, Period};

pub const BOOKING_HORIZON_VAR: &str = "CLINICSLOTS_BOOKING_HORIZON_WEEKS";
pub const RESCHEDULE_HORIZON_VAR: &str = "CLINICSLOTS_RESCHEDULE_HORIZON_WEEKS";
pub const PERIODS_VAR: &str = "CLINICSLOTS_PERIODS";

/// Longest accepted booking horizon, two years of weeks.
pub const MAX_HORIZON_WEEKS: u32 = 104;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotConfig {
    pub booking_horizon_weeks: u32,
    pub reschedule_horizon_weeks: u32,
    pub periods: Vec<Period>,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            booking_horizon_weeks: BookingMode::Book.default_horizon_weeks(),
            reschedule_horizon_weeks: BookingMode::Reschedule.default_horizon_weeks(),
            periods: default_periods(),
        }
    }
}

impl SlotConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Missing or malformed values fall
    /// back to the defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            booking_horizon_weeks: parse_weeks(
                &lookup,
                BOOKING_HORIZON_VAR,
                defaults.booking_horizon_weeks,
            ),
            reschedule_horizon_weeks: parse_weeks(
                &lookup,
                RESCHEDULE_HORIZON_VAR,
                defaults.reschedule_horizon_weeks,
            ),
            periods: parse_periods(&lookup).unwrap_or(defaults.periods),
        }
    }

    pub fn horizon_weeks(&self, mode: BookingMode) -> u32 {
        match mode {
            BookingMode::Book => self.booking_horizon_weeks,
            BookingMode::Reschedule => self.reschedule_horizon_weeks,
        }
    }
}

fn parse_weeks<F>(lookup: &F, key: &str, default: u32) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<u32>() {
        Ok(weeks) if weeks <= MAX_HORIZON_WEEKS => weeks,
        Ok(weeks) => {
            warn!(
                "{} of {} weeks exceeds the maximum of {}, using {}",
                key, weeks, MAX_HORIZON_WEEKS, default
            );
            default
        }
        Err(_) => {
            warn!("{} is not a number of weeks ('{}'), using {}", key, raw, default);
            default
        }
    }
}

fn parse_periods<F>(lookup: &F) -> Option<Vec<Period>>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(PERIODS_VAR)?;

    let periods: Vec<Period> = match serde_json::from_str(&raw) {
        Ok(periods) => periods,
        Err(e) => {
            warn!("{} is not a valid period table ({}), using defaults", PERIODS_VAR, e);
            return None;
        }
    };

    if let Some(err) = periods.iter().find_map(|p| p.validate().err()) {
        warn!("{} contains an invalid period ({}), using defaults", PERIODS_VAR, err);
        return None;
    }

    if periods.is_empty() {
        warn!("{} is empty, using defaults", PERIODS_VAR);
        return None;
    }

    Some(periods)
}
