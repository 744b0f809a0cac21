//! Calendar expansion
//!
//! Turns a start date and a week count into the ordered day slots of a
//! placement. Rows are week-major, day-minor, and dates advance by exactly
//! one day per row regardless of week boundaries:
//!
//! ```text
//! | Week   | Day | Date       |
//! |--------|-----|------------|
//! | Week 1 | M   | 01/01/2024 |
//! | Week 1 | T   | 02/01/2024 |
//! | ...    | ... | ...        |
//! | Week 2 | M   | 08/01/2024 |
//! ```

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::RosterError;

/// Day codes for one week, Monday first
pub const DAY_LABELS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

/// Display format for dates, shared by screen output and export
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One day slot of the placement
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CalendarRow {
    /// e.g. "Week 1"
    pub week_label: String,
    /// Single-letter day code
    pub day_label: String,
    pub date: NaiveDate,
}

impl CalendarRow {
    /// Date as DD/MM/YYYY
    pub fn display_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Selection prompt for this day, e.g. `Student Role for 01/01/2024 (Week 1 M)`
    pub fn prompt(&self, party: &str) -> String {
        format!(
            "{} Role for {} ({} {})",
            party,
            self.display_date(),
            self.week_label,
            self.day_label
        )
    }
}

/// Expand `weeks` weeks starting at `start` into `weeks × 7` consecutive days
pub fn expand(start: NaiveDate, weeks: u32) -> Result<Vec<CalendarRow>, RosterError> {
    if weeks < 1 {
        return Err(RosterError::InvalidInput(format!(
            "week count must be at least 1, got {weeks}"
        )));
    }

    let mut rows = Vec::with_capacity(weeks as usize * DAY_LABELS.len());
    let mut current = start;

    for week in 0..weeks {
        let week_label = format!("Week {}", week + 1);
        for (day_index, day) in DAY_LABELS.iter().enumerate() {
            rows.push(CalendarRow {
                week_label: week_label.clone(),
                day_label: (*day).to_string(),
                date: current,
            });

            let is_last = week + 1 == weeks && day_index + 1 == DAY_LABELS.len();
            if !is_last {
                current = current.checked_add_days(Days::new(1)).ok_or_else(|| {
                    RosterError::InvalidInput(format!(
                        "placement starting {start} runs past the supported date range"
                    ))
                })?;
            }
        }
    }

    tracing::debug!(%start, weeks, rows = rows.len(), "expanded calendar");
    Ok(rows)
}

/// Parse a start date given as `YYYY-MM-DD` or `DD/MM/YYYY`
pub fn parse_start_date(input: &str) -> Result<NaiveDate, RosterError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RosterError::InvalidInput("start date is missing".into()));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, DATE_FORMAT))
        .map_err(|_| {
            RosterError::InvalidInput(format!(
                "malformed start date '{trimmed}': expected YYYY-MM-DD or DD/MM/YYYY"
            ))
        })
}
