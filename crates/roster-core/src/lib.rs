//! # roster-core
//!
//! Core domain model for the placement roster generator.
//!
//! This crate provides:
//! - Domain types: `RoleLabel`, `CalendarRow`, `RosterRow`, `RosterTable`, `PlacementDetails`
//! - The calendar expander (`calendar::expand`) and roster assembler (`roster::assemble`)
//! - Color resolution shared by every renderer (`ColorMap`, `RosterTable::colored_cells`)
//! - The `Renderer` trait and error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use roster_core::{calendar, roster, RolePair, RoleSelections, RosterConfig};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let days = calendar::expand(start, 1).unwrap();
//!
//! let mut selections = RoleSelections::new();
//! selections.insert(0, RolePair::new("E - 8-6", "E - 8-6"));
//!
//! let table = roster::assemble(&days, &selections);
//! let config = RosterConfig::default();
//!
//! assert_eq!(table.len(), 7);
//! assert_eq!(table.rows[0].match_indicator().label(), "MATCH");
//! assert_eq!(config.colors.color_of("MATCH").to_string(), "#90EE90");
//! ```

pub mod calendar;
pub mod config;
pub mod roster;

pub use calendar::{expand, parse_start_date, CalendarRow, DATE_FORMAT, DAY_LABELS};
pub use config::{Color, ColorMap, RosterConfig};
pub use roster::{
    assemble, ColoredCell, MatchIndicator, RoleColumn, RolePair, RoleSelections, RosterRow,
    RosterSummary, RosterTable, COLUMN_HEADERS,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Role Labels
// ============================================================================

/// Reserved label used by the match column when both roles coincide
pub const MATCH_LABEL: &str = "MATCH";

/// A shift/duty label drawn from the configured vocabulary
///
/// The empty label means "no role assigned". Labels outside the vocabulary
/// are accepted as-is so custom roles never break rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleLabel(String);

impl RoleLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The unassigned label
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for RoleLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for RoleLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

// ============================================================================
// Placement Details
// ============================================================================

/// Identity fields entered alongside the roster
///
/// These are passed through verbatim to the renderers; no roster
/// computation depends on them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementDetails {
    pub student_name: String,
    pub year_group: String,
    pub student_number: String,
    pub email: String,
    /// Practice educator / assessor
    pub educator_name: String,
    /// Up to three practice supervisors
    pub supervisors: [String; 3],
}

impl PlacementDetails {
    pub fn new(student_name: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            ..Self::default()
        }
    }

    pub fn year_group(mut self, year_group: impl Into<String>) -> Self {
        self.year_group = year_group.into();
        self
    }

    pub fn student_number(mut self, number: impl Into<String>) -> Self {
        self.student_number = number.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn educator(mut self, name: impl Into<String>) -> Self {
        self.educator_name = name.into();
        self
    }

    /// Set supervisor `slot` (0, 1 or 2); other slots are ignored
    pub fn supervisor(mut self, slot: usize, name: impl Into<String>) -> Self {
        if let Some(entry) = self.supervisors.get_mut(slot) {
            *entry = name.into();
        }
        self
    }

    /// All three supervisor slots joined with ", " (blank slots included)
    pub fn supervisor_list(&self) -> String {
        self.supervisors.join(", ")
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render an assembled roster to the output format
    fn render(
        &self,
        details: &PlacementDetails,
        roster: &RosterTable,
    ) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Roster input and configuration error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    /// Rejected user input (week count, start date)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
