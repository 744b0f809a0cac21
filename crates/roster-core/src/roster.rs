//! Roster assembly and color resolution
//!
//! Pairs each calendar row with the role selections captured for it and
//! derives the match column. The assembled table is rebuilt from scratch on
//! every input change; nothing here is incremental.
//!
//! # Match rule
//!
//! | Student  | Supervisor | Match column |
//! |----------|------------|--------------|
//! | `E`      | `E`        | `MATCH`      |
//! | `E`      | `LD`       | `E`          |
//! | `""`     | any        | `""`         |
//!
//! When roles differ the match column repeats the student role, so its
//! color follows the student role rather than flagging the mismatch.

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::{CalendarRow, Color, ColorMap, RoleLabel, RosterError, MATCH_LABEL};

/// Column headers of the roster table, in order
pub const COLUMN_HEADERS: [&str; 6] = [
    "Week",
    "Day",
    "Date",
    "Student Role",
    "Supervisor Role",
    "Match Color",
];

// ============================================================================
// Selections
// ============================================================================

/// Student and supervisor role picked for one day
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePair {
    #[serde(default)]
    pub student: RoleLabel,
    #[serde(default)]
    pub supervisor: RoleLabel,
}

impl RolePair {
    pub fn new(student: impl Into<RoleLabel>, supervisor: impl Into<RoleLabel>) -> Self {
        Self {
            student: student.into(),
            supervisor: supervisor.into(),
        }
    }
}

/// Snapshot of role selections keyed by calendar row index
///
/// Owned by the caller and handed to [`assemble`] whole. Rows without an
/// entry count as unassigned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleSelections {
    by_row: BTreeMap<usize, RolePair>,
}

#[derive(Deserialize)]
struct SelectionsFile {
    #[serde(default)]
    selection: Vec<SelectionEntry>,
}

#[derive(Deserialize)]
struct SelectionEntry {
    row: usize,
    #[serde(flatten)]
    pair: RolePair,
}

impl RoleSelections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pair for `row`, replacing any previous entry
    pub fn insert(&mut self, row: usize, pair: RolePair) -> Option<RolePair> {
        self.by_row.insert(row, pair)
    }

    pub fn get(&self, row: usize) -> Option<&RolePair> {
        self.by_row.get(&row)
    }

    pub fn len(&self) -> usize {
        self.by_row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_row.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &RolePair)> {
        self.by_row.iter().map(|(row, pair)| (*row, pair))
    }

    /// Parse a selections document
    ///
    /// ```toml
    /// [[selection]]
    /// row = 0
    /// student = "E - 8-6"
    /// supervisor = "E - 8-6"
    /// ```
    pub fn from_toml_str(input: &str) -> Result<Self, RosterError> {
        let file: SelectionsFile =
            toml::from_str(input).map_err(|e| RosterError::Config(e.message().to_string()))?;

        let mut selections = Self::new();
        for entry in file.selection {
            if selections.insert(entry.row, entry.pair).is_some() {
                return Err(RosterError::Config(format!(
                    "duplicate selection for row {}",
                    entry.row
                )));
            }
        }
        Ok(selections)
    }
}

impl FromIterator<(usize, RolePair)> for RoleSelections {
    fn from_iter<I: IntoIterator<Item = (usize, RolePair)>>(iter: I) -> Self {
        Self {
            by_row: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Roster Rows
// ============================================================================

/// Derived value of the match column
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchIndicator<'a> {
    /// Student and supervisor hold the same non-empty role
    Match,
    /// Anything else: the student role, possibly empty
    Role(&'a RoleLabel),
}

impl<'a> MatchIndicator<'a> {
    /// Text shown in the match column
    pub fn label(&self) -> &'a str {
        match *self {
            MatchIndicator::Match => MATCH_LABEL,
            MatchIndicator::Role(role) => role.as_str(),
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchIndicator::Match)
    }
}

/// One finalized day of the roster
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterRow {
    pub calendar: CalendarRow,
    pub student_role: RoleLabel,
    pub supervisor_role: RoleLabel,
}

impl RosterRow {
    pub fn new(calendar: CalendarRow, pair: RolePair) -> Self {
        Self {
            calendar,
            student_role: pair.student,
            supervisor_role: pair.supervisor,
        }
    }

    /// Recomputed from the two roles on every call
    pub fn match_indicator(&self) -> MatchIndicator<'_> {
        if !self.student_role.is_empty() && self.student_role == self.supervisor_role {
            MatchIndicator::Match
        } else {
            MatchIndicator::Role(&self.student_role)
        }
    }

    /// Text of a colored column
    pub fn label(&self, column: RoleColumn) -> &str {
        match column {
            RoleColumn::StudentRole => self.student_role.as_str(),
            RoleColumn::SupervisorRole => self.supervisor_role.as_str(),
            RoleColumn::MatchColor => self.match_indicator().label(),
        }
    }

    /// All six cells as display strings, in [`COLUMN_HEADERS`] order
    pub fn cells(&self) -> [String; 6] {
        [
            self.calendar.week_label.clone(),
            self.calendar.day_label.clone(),
            self.calendar.display_date(),
            self.student_role.to_string(),
            self.supervisor_role.to_string(),
            self.match_indicator().label().to_string(),
        ]
    }
}

impl Serialize for RosterRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("RosterRow", 6)?;
        row.serialize_field("week", &self.calendar.week_label)?;
        row.serialize_field("day", &self.calendar.day_label)?;
        row.serialize_field("date", &self.calendar.display_date())?;
        row.serialize_field("student_role", &self.student_role)?;
        row.serialize_field("supervisor_role", &self.supervisor_role)?;
        row.serialize_field("match", self.match_indicator().label())?;
        row.end()
    }
}

// ============================================================================
// Color Resolution
// ============================================================================

/// The three role-bearing columns that receive a background color
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoleColumn {
    StudentRole,
    SupervisorRole,
    MatchColor,
}

impl RoleColumn {
    pub const ALL: [RoleColumn; 3] = [
        RoleColumn::StudentRole,
        RoleColumn::SupervisorRole,
        RoleColumn::MatchColor,
    ];

    /// Zero-based position within [`COLUMN_HEADERS`]
    pub const fn index(self) -> usize {
        match self {
            RoleColumn::StudentRole => 3,
            RoleColumn::SupervisorRole => 4,
            RoleColumn::MatchColor => 5,
        }
    }

    pub const fn header(self) -> &'static str {
        COLUMN_HEADERS[self.index()]
    }
}

/// A colored cell: row index, column, the text shown and its background
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColoredCell<'a> {
    pub row: usize,
    pub column: RoleColumn,
    pub label: &'a str,
    pub color: Color,
}

// ============================================================================
// Roster Table
// ============================================================================

/// Assignment counts over a roster
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RosterSummary {
    pub days: usize,
    pub student_days: usize,
    pub supervisor_days: usize,
    pub matched_days: usize,
}

/// The assembled roster, one row per calendar day
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RosterTable {
    pub rows: Vec<RosterRow>,
}

impl RosterTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RosterRow> {
        self.rows.iter()
    }

    /// Background colors for the student, supervisor and match columns
    ///
    /// Row-major, columns in [`RoleColumn::ALL`] order. Every renderer
    /// colorizes from this list so screen and export agree cell for cell.
    pub fn colored_cells<'a>(&'a self, colors: &ColorMap) -> Vec<ColoredCell<'a>> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, roster_row)| {
                RoleColumn::ALL.into_iter().map(move |column| {
                    let label = roster_row.label(column);
                    ColoredCell {
                        row,
                        column,
                        label,
                        color: colors.color_of(label),
                    }
                })
            })
            .collect()
    }

    pub fn summary(&self) -> RosterSummary {
        RosterSummary {
            days: self.rows.len(),
            student_days: self.rows.iter().filter(|r| !r.student_role.is_empty()).count(),
            supervisor_days: self
                .rows
                .iter()
                .filter(|r| !r.supervisor_role.is_empty())
                .count(),
            matched_days: self
                .rows
                .iter()
                .filter(|r| r.match_indicator().is_match())
                .count(),
        }
    }
}

impl<'a> IntoIterator for &'a RosterTable {
    type Item = &'a RosterRow;
    type IntoIter = std::slice::Iter<'a, RosterRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Pair every calendar row with its selected roles
///
/// Rows without a selection get empty roles. Selections pointing past the
/// end of the calendar are ignored.
pub fn assemble(calendar: &[CalendarRow], selections: &RoleSelections) -> RosterTable {
    let rows: Vec<RosterRow> = calendar
        .iter()
        .enumerate()
        .map(|(index, day)| {
            let pair = selections.get(index).cloned().unwrap_or_default();
            RosterRow::new(day.clone(), pair)
        })
        .collect();

    let stray = selections.iter().filter(|(row, _)| *row >= calendar.len()).count();
    if stray > 0 {
        tracing::debug!(stray, days = calendar.len(), "ignoring selections beyond the calendar");
    }

    RosterTable { rows }
}
