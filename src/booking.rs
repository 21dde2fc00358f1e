/// Turning a picked day and time slot into an appointment request.
///
/// The request body is the `{appointmentDate, selectedSlot}` pair sent when
/// booking a new appointment or rescheduling an existing one. Sending it is
/// left to the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SlotError};
use crate::models::{DailySchedule, DateCell, TimeSlotLabel};

/// Which picker the selection belongs to. Each has its own horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingMode {
    Book,
    Reschedule,
}

impl BookingMode {
    pub fn default_horizon_weeks(&self) -> u32 {
        match self {
            BookingMode::Book => 8,
            BookingMode::Reschedule => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BookingMode::Book => "BOOK",
            BookingMode::Reschedule => "RESCHEDULE",
        }
    }
}

/// Body of a booking or reschedule request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSlotRequest {
    pub appointment_date: NaiveDate,
    pub selected_slot: TimeSlotLabel,
}

impl AppointmentSlotRequest {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The day and slot a patient has picked so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotSelection {
    date: Option<DateCell>,
    slot: Option<TimeSlotLabel>,
}

impl SlotSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(&self) -> Option<&DateCell> {
        self.date.as_ref()
    }

    pub fn slot(&self) -> Option<&TimeSlotLabel> {
        self.slot.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.date.is_some() && self.slot.is_some()
    }

    /// Pick a day. Past and out-of-horizon days are refused and leave the
    /// previous choice in place.
    pub fn select_date(&mut self, cell: DateCell) -> Result<()> {
        let reason = if cell.is_past {
            Some("date is in the past")
        } else if cell.is_disabled {
            Some("date is beyond the booking horizon")
        } else {
            None
        };

        if let Some(reason) = reason {
            warn!("Rejected date {}: {}", cell.iso_date, reason);
            return Err(SlotError::DateNotBookable {
                date: cell.iso_date,
                reason,
            });
        }

        debug!("Selected date {}", cell.iso_date);
        self.date = Some(cell);
        Ok(())
    }

    /// Pick a slot by its label. Only labels offered by `schedule` are accepted.
    pub fn select_slot(&mut self, schedule: &DailySchedule, label: &str) -> Result<()> {
        let slot = schedule
            .find_slot(label.trim())
            .cloned()
            .ok_or_else(|| SlotError::UnknownSlot {
                slot: label.trim().to_string(),
            })?;

        debug!("Selected slot {}", slot);
        self.slot = Some(slot);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.date = None;
        self.slot = None;
    }

    /// Build the request body once both a day and a slot are picked.
    pub fn to_request(&self) -> Result<AppointmentSlotRequest> {
        let date = self.date.as_ref().ok_or(SlotError::IncompleteSelection {
            missing: "appointment date",
        })?;
        let slot = self.slot.as_ref().ok_or(SlotError::IncompleteSelection {
            missing: "time slot",
        })?;

        Ok(AppointmentSlotRequest {
            appointment_date: date.iso_date,
            selected_slot: slot.clone(),
        })
    }
}
