//! Command-line input handling
//!
//! Turns flags and files into the values the core consumes: the start date,
//! the role configuration, the selections snapshot and the identity fields.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use roster_core::{
    parse_start_date, CalendarRow, PlacementDetails, RoleLabel, RolePair, RoleSelections,
    RosterConfig,
};

/// Clap value parser for `--start`
pub fn start_date(input: &str) -> Result<NaiveDate, String> {
    parse_start_date(input).map_err(|e| e.to_string())
}

/// Clap value parser for `--select ROW=STUDENT[|SUPERVISOR]`
pub fn selection(input: &str) -> Result<(usize, RolePair), String> {
    let (row, roles) = input
        .split_once('=')
        .ok_or_else(|| format!("expected ROW=STUDENT|SUPERVISOR, got '{input}'"))?;
    let row: usize = row
        .trim()
        .parse()
        .map_err(|_| format!("row must be a non-negative integer, got '{}'", row.trim()))?;

    let (student, supervisor) = roles.split_once('|').unwrap_or((roles, ""));
    Ok((row, RolePair::new(student.trim(), supervisor.trim())))
}

/// Load the role configuration, or the built-in one
pub fn load_config(path: Option<&Path>) -> Result<RosterConfig> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            RosterConfig::from_toml_str(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => RosterConfig::default(),
    };

    for role in config.validate() {
        tracing::warn!(role = %role, "role has no color entry; using default color");
    }
    Ok(config)
}

/// Merge the selections file with `--select` overrides
pub fn load_selections(
    path: Option<&Path>,
    overrides: &[(usize, RolePair)],
    config: &RosterConfig,
) -> Result<RoleSelections> {
    let mut selections = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read selections {}", path.display()))?;
            RoleSelections::from_toml_str(&text)
                .with_context(|| format!("Invalid selections {}", path.display()))?
        }
        None => RoleSelections::new(),
    };

    for (row, pair) in overrides {
        selections.insert(*row, pair.clone());
    }

    for (row, pair) in selections.iter() {
        for role in [&pair.student, &pair.supervisor] {
            if !config.is_known_role(role) {
                tracing::warn!(row, role = %role, "role is not in the configured vocabulary");
            }
        }
    }

    tracing::info!(selected = selections.len(), "loaded role selections");
    Ok(selections)
}

/// Identity fields, with at most three supervisors
pub fn placement_details(
    student_name: &str,
    year_group: &str,
    student_number: &str,
    email: &str,
    educator: &str,
    supervisors: &[String],
) -> Result<PlacementDetails> {
    if supervisors.len() > 3 {
        bail!("at most 3 practice supervisors, got {}", supervisors.len());
    }

    Ok(supervisors.iter().enumerate().fold(
        PlacementDetails::new(student_name)
            .year_group(year_group)
            .student_number(student_number)
            .email(email)
            .educator(educator),
        |details, (slot, name)| details.supervisor(slot, name.as_str()),
    ))
}

/// Selections skeleton listing every day of the calendar with empty roles
pub fn selections_template(calendar: &[CalendarRow], roles: &[RoleLabel]) -> String {
    let quoted: Vec<String> = roles
        .iter()
        .map(|r| toml::Value::String(r.to_string()).to_string())
        .collect();

    let mut out = String::new();
    if let (Some(first), Some(last)) = (calendar.first(), calendar.last()) {
        out.push_str(&format!(
            "# Role selections for {} to {} ({} weeks)\n",
            first.display_date(),
            last.display_date(),
            calendar.len() / 7
        ));
    }
    out.push_str(&format!("# Roles: {}\n", quoted.join(", ")));

    for (row, day) in calendar.iter().enumerate() {
        out.push_str(&format!(
            "\n# {} {} {}\n[[selection]]\nrow = {}\nstudent = \"\"\nsupervisor = \"\"\n",
            day.week_label,
            day.day_label,
            day.display_date(),
            row
        ));
    }
    out
}
