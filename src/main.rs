/// Command-line interface for picking an appointment day and time slot.
///
/// This binary provides an interactive menu for browsing the bookable week
/// windows, viewing the clinic's daily time slots, and building the request
/// body for a new or rescheduled appointment.

use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clinicslots::{
    build_daily_schedule, BookingMode, ClockTime, DailySchedule, SlotConfig, SlotSelection,
    TimeSlotLabel, WeekNavigator,
};

struct SlotPickerCLI {
    config: SlotConfig,
    mode: BookingMode,
    navigator: WeekNavigator,
    schedule: DailySchedule,
    selection: SlotSelection,
    running: bool,
}

impl SlotPickerCLI {
    fn new(config: SlotConfig, schedule: DailySchedule, today: NaiveDate) -> Self {
        let mode = BookingMode::Book;
        SlotPickerCLI {
            navigator: WeekNavigator::new(today, config.horizon_weeks(mode)),
            config,
            mode,
            schedule,
            selection: SlotSelection::new(),
            running: true,
        }
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       APPOINTMENT SLOT PICKER");
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        println!("\n--- Main Menu ({}) ---", self.mode.name());
        self.print_selection();
        println!("1. Show current week");
        println!("2. Next week");
        println!("3. Previous week");
        println!("4. Jump to date");
        println!("5. View time slots");
        println!("6. Select date");
        println!("7. Select time slot");
        println!("8. Switch booking / reschedule");
        println!("9. Show request");
        println!("0. Exit");
        println!("{}", "-".repeat(20));
    }

    fn print_selection(&self) {
        let date = self
            .selection
            .date()
            .map(|d| d.iso_string())
            .unwrap_or_else(|| "-".to_string());
        let slot = self
            .selection
            .slot()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let status = if self.selection.is_complete() {
            "ready"
        } else {
            "incomplete"
        };
        println!("Selection: {} at {} ({})", date, slot, status);
    }

    /// Read one line. Returns `None` once stdin is closed.
    fn get_input(&self, prompt: &str, default: Option<&str>) -> Option<String> {
        match default {
            Some(def) => print!("{} [{}]: ", prompt, def),
            None => print!("{}: ", prompt),
        }
        if let Err(e) = io::stdout().flush() {
            error!("Failed to flush stdout: {}", e);
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => {
                let input = input.trim();
                if input.is_empty() {
                    Some(default.unwrap_or("").to_string())
                } else {
                    Some(input.to_string())
                }
            }
            Err(e) => {
                error!("Failed to read input: {}", e);
                None
            }
        }
    }

    fn get_int_input(&self, prompt: &str, default: Option<i64>) -> Option<i64> {
        loop {
            let default_str = default.map(|d| d.to_string());
            let input = self.get_input(prompt, default_str.as_deref())?;

            if let Ok(value) = input.parse::<i64>() {
                return Some(value);
            }
            println!("Please enter a valid number");
        }
    }

    fn show_week(&self) {
        let window = match self.navigator.window() {
            Ok(window) => window,
            Err(e) => {
                println!("\nCannot show week: {}", e);
                return;
            }
        };

        println!("\n--- {} ---", self.navigator);
        if let Some(max) = self.navigator.max_bookable_date() {
            println!("Bookable until {}", max.format("%a, %d %b %Y"));
        }

        for (i, cell) in window.iter().enumerate() {
            let marker = if cell.is_today {
                "today"
            } else if cell.is_past {
                "past"
            } else if cell.is_disabled {
                "unavailable"
            } else {
                ""
            };
            let selected = self
                .selection
                .date()
                .is_some_and(|d| d.iso_date == cell.iso_date);

            println!(
                "  {}. {} {:2} {} {}{}",
                i + 1,
                cell.weekday,
                cell.day_of_month,
                cell.month,
                marker,
                if selected { " *" } else { "" }
            );
        }

        println!(
            "\n  [{}] previous    next [{}]",
            if self.navigator.can_go_back() { "<" } else { " " },
            if self.navigator.can_go_forward() { ">" } else { " " }
        );
    }

    fn next_week(&mut self) {
        if !self.navigator.can_go_forward() {
            println!("\nAlready at the last bookable week");
            return;
        }
        self.navigator.next();
        self.show_week();
    }

    fn previous_week(&mut self) {
        if !self.navigator.can_go_back() {
            println!("\nAlready at the current week");
            return;
        }
        self.navigator.previous();
        self.show_week();
    }

    fn jump_to_date(&mut self) {
        let today = self.navigator.today().format("%Y-%m-%d").to_string();
        let Some(input) = self.get_input("Date (YYYY-MM-DD)", Some(&today)) else {
            return;
        };

        let date = match NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                println!("\nPlease enter a date as YYYY-MM-DD");
                return;
            }
        };

        match self.navigator.jump_to(date) {
            Ok(_) => {
                if let Err(e) = self.selection.select_date(self.navigator.cell(date)) {
                    println!("\n{}", e);
                }
                self.show_week();
            }
            Err(e) => println!("\n{}", e),
        }
    }

    fn view_slots(&self) {
        if self.schedule.is_empty() {
            println!("\nNo time slots configured");
            return;
        }

        println!(
            "\n--- Time Slots ({} total) ---",
            self.schedule.total_slots()
        );
        for (period, slots) in self.schedule.iter() {
            println!("\n{}:", period);
            let row: Vec<&str> = slots.iter().map(|s| s.as_str()).collect();
            for chunk in row.chunks(6) {
                println!("  {}", chunk.join("  "));
            }
        }
    }

    fn select_date(&mut self) {
        let window = match self.navigator.window() {
            Ok(window) => window,
            Err(e) => {
                println!("\nCannot show week: {}", e);
                return;
            }
        };

        self.show_week();
        let Some(choice) = self.get_int_input("Select day (0 to go back)", Some(0)) else {
            return;
        };
        if choice == 0 {
            return;
        }

        match usize::try_from(choice).ok().and_then(|i| window.get(i.wrapping_sub(1))) {
            Some(cell) => match self.selection.select_date(cell.clone()) {
                Ok(()) => println!("\nSelected {}", cell.iso_string()),
                Err(e) => println!("\n{}", e),
            },
            None => println!("Invalid choice"),
        }
    }

    fn select_slot(&mut self) {
        self.view_slots();
        let Some(label) = self.get_input("\nTime slot (e.g. 09:15 AM)", None) else {
            return;
        };

        let label = match ClockTime::parse(&label) {
            Ok(time) => TimeSlotLabel::from(time),
            Err(e) => {
                println!("\n{}", e);
                return;
            }
        };

        match self.selection.select_slot(&self.schedule, label.as_str()) {
            Ok(()) => println!("\nSelected slot: {}", label),
            Err(e) => println!("\n{}", e),
        }
    }

    fn switch_mode(&mut self) {
        self.mode = match self.mode {
            BookingMode::Book => BookingMode::Reschedule,
            BookingMode::Reschedule => BookingMode::Book,
        };
        self.navigator = WeekNavigator::new(
            self.navigator.today(),
            self.config.horizon_weeks(self.mode),
        );
        self.selection.clear();

        let horizon = self.navigator.horizon_weeks();
        info!("Switched to {} mode ({} week horizon)", self.mode.name(), horizon);
        println!(
            "\nNow in {} mode, bookable {} weeks ahead",
            self.mode.name(),
            horizon
        );
    }

    fn show_request(&self) {
        let request = match self.selection.to_request() {
            Ok(request) => request,
            Err(e) => {
                println!("\nPlease select a date and time slot first ({})", e);
                return;
            }
        };

        match request.to_json() {
            Ok(json) => {
                println!("\n--- {} request ---", self.mode.name());
                println!("{}", json);
            }
            Err(e) => error!("Failed to encode request: {}", e),
        }
    }

    fn run(&mut self) {
        self.print_header();
        self.show_week();

        while self.running {
            self.print_menu();

            let Some(choice) = self.get_int_input("Enter choice", Some(1)) else {
                break;
            };

            match choice {
                1 => self.show_week(),
                2 => self.next_week(),
                3 => self.previous_week(),
                4 => self.jump_to_date(),
                5 => self.view_slots(),
                6 => self.select_date(),
                7 => self.select_slot(),
                8 => self.switch_mode(),
                9 => self.show_request(),
                0 => {
                    self.running = false;
                    println!("\nGoodbye!");
                }
                _ => println!("Invalid choice"),
            }
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("clinicslots=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SlotConfig::from_env();
    let schedule = match build_daily_schedule(&config.periods) {
        Ok(schedule) => schedule,
        Err(e) => {
            error!("Invalid period table: {}", e);
            std::process::exit(1);
        }
    };

    let today = Local::now().date_naive();
    info!(
        "Starting slot picker for {} with {} periods",
        today,
        schedule.len()
    );

    let mut cli = SlotPickerCLI::new(config, schedule, today);
    cli.run();
}
