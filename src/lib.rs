/// Week-window and time-slot generation for a dental appointment picker.
///
/// All functions take `today` explicitly and never read the wall clock.

pub mod booking;
pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;

pub use booking::{AppointmentSlotRequest, BookingMode, SlotSelection};
pub use calendar::{generate_week, max_bookable_date, week_for_date, WeekNavigator};
pub use config::SlotConfig;
pub use error::{Result, SlotError};
pub use models::{default_periods, ClockTime, DailySchedule, DateCell, Meridiem, Period, TimeSlotLabel};
pub use scheduler::{build_daily_schedule, generate_slots, SLOT_MINUTES};
