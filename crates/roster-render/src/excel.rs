//! Excel roster export
//!
//! Writes the roster as a single worksheet named `Placement Roster`:
//!
//! ```text
//! | Week   | Day | Date       | Student Role | Supervisor Role | Match Color |
//! |--------|-----|------------|--------------|-----------------|-------------|
//! | Week 1 | M   | 01/01/2024 | E - 8-6      | E - 8-6         | MATCH       |
//! | Week 1 | T   | 02/01/2024 |              |                 |             |
//! ```
//!
//! Dates are written as the same DD/MM/YYYY text shown on screen, not as
//! Excel dates. The last three columns get a solid background from the
//! color map, with one cell format per distinct color.
//!
//! The sheet is described first as a [`SheetPlan`] and then written cell by
//! cell from it, so the plan is exactly what ends up in the file.

use std::collections::{BTreeMap, BTreeSet};

use roster_core::{
    Color, ColorMap, PlacementDetails, RenderError, Renderer, RosterTable, COLUMN_HEADERS,
};
use rust_xlsxwriter::{DocProperties, Format, FormatBorder, Workbook, Worksheet};

/// File name offered for the exported roster
pub const EXPORT_FILE_NAME: &str = "student_placement_roster.xlsx";

/// Worksheet name
pub const SHEET_NAME: &str = "Placement Roster";

/// One data cell of the worksheet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedCell {
    /// Worksheet row (row 0 is the header)
    pub row: u32,
    pub col: u16,
    pub value: String,
    /// Background color, set only on the three role columns
    pub color: Option<Color>,
}

/// Every data cell of the worksheet, row-major
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetPlan {
    pub cells: Vec<PlannedCell>,
}

impl SheetPlan {
    /// Distinct background colors; one cell format is created per entry
    pub fn distinct_colors(&self) -> BTreeSet<Color> {
        self.cells.iter().filter_map(|c| c.color).collect()
    }

    /// Colored cells as (worksheet row, column, color)
    pub fn colored(&self) -> impl Iterator<Item = (u32, u16, Color)> + '_ {
        self.cells
            .iter()
            .filter_map(|c| c.color.map(|color| (c.row, c.col, color)))
    }

    /// Widest value per column, headers included
    fn column_widths(&self) -> [usize; 6] {
        let mut widths = COLUMN_HEADERS.map(str::len);
        for cell in &self.cells {
            if let Some(width) = widths.get_mut(cell.col as usize) {
                *width = (*width).max(cell.value.chars().count());
            }
        }
        widths
    }
}

/// Excel roster renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Role → background color mapping
    pub colors: ColorMap,
    /// Worksheet name
    pub sheet_name: String,
    /// Keep the header row visible while scrolling
    pub freeze_header: bool,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            colors: ColorMap::default(),
            sheet_name: SHEET_NAME.into(),
            freeze_header: true,
        }
    }
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color mapping
    pub fn colors(mut self, colors: ColorMap) -> Self {
        self.colors = colors;
        self
    }

    /// Set the worksheet name
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Leave the header row unfrozen
    pub fn no_freeze(mut self) -> Self {
        self.freeze_header = false;
        self
    }

    /// Lay out the data cells for `roster`
    pub fn plan(&self, roster: &RosterTable) -> SheetPlan {
        let colored: BTreeMap<(usize, usize), Color> = roster
            .colored_cells(&self.colors)
            .into_iter()
            .map(|c| ((c.row, c.column.index()), c.color))
            .collect();
        let mut cells = Vec::with_capacity(roster.len() * COLUMN_HEADERS.len());

        for (index, row) in roster.iter().enumerate() {
            let sheet_row = index as u32 + 1;
            let values = row.cells();
            for (col, value) in values.into_iter().enumerate() {
                let color = colored.get(&(index, col)).copied();
                cells.push(PlannedCell {
                    row: sheet_row,
                    col: col as u16,
                    value,
                    color,
                });
            }
        }

        SheetPlan { cells }
    }

    /// Generate Excel workbook bytes
    pub fn render_to_bytes(
        &self,
        details: &PlacementDetails,
        roster: &RosterTable,
    ) -> Result<Vec<u8>, RenderError> {
        let plan = self.plan(roster);
        let mut workbook = Workbook::new();
        workbook.set_properties(&Self::properties(details));

        let sheet = workbook.add_worksheet();
        sheet
            .set_name(&self.sheet_name)
            .map_err(|e| RenderError::Format(e.to_string()))?;

        self.write_sheet(sheet, &plan)?;

        let buffer = workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))?;

        tracing::debug!(
            rows = roster.len(),
            formats = plan.distinct_colors().len(),
            bytes = buffer.len(),
            "rendered roster workbook"
        );
        Ok(buffer)
    }

    fn write_sheet(&self, sheet: &mut Worksheet, plan: &SheetPlan) -> Result<(), RenderError> {
        let header = Format::new().set_bold().set_border(FormatBorder::Thin);

        for (col, title) in COLUMN_HEADERS.iter().enumerate() {
            sheet
                .write_string_with_format(0, col as u16, *title, &header)
                .map_err(|e| RenderError::Format(e.to_string()))?;
        }

        // One format per distinct color
        let fills: BTreeMap<Color, Format> = plan
            .distinct_colors()
            .into_iter()
            .map(|color| (color, Format::new().set_background_color(color.rgb())))
            .collect();

        for cell in &plan.cells {
            let written = match cell.color.and_then(|color| fills.get(&color)) {
                Some(format) if cell.value.is_empty() => {
                    sheet.write_blank(cell.row, cell.col, format)
                }
                Some(format) => {
                    sheet.write_string_with_format(cell.row, cell.col, &cell.value, format)
                }
                None => sheet.write_string(cell.row, cell.col, &cell.value),
            };
            written.map_err(|e| RenderError::Format(e.to_string()))?;
        }

        for (col, width) in plan.column_widths().iter().enumerate() {
            sheet.set_column_width(col as u16, (*width + 2) as f64).ok();
        }

        if self.freeze_header {
            sheet.set_freeze_panes(1, 0).ok();
        }

        Ok(())
    }

    fn properties(details: &PlacementDetails) -> DocProperties {
        let mut properties = DocProperties::new().set_title("Student Placement Roster");
        if !details.student_name.is_empty() {
            properties = properties.set_subject(&details.student_name);
        }
        if !details.educator_name.is_empty() {
            properties = properties.set_author(&details.educator_name);
        }
        properties
    }
}

impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(
        &self,
        details: &PlacementDetails,
        roster: &RosterTable,
    ) -> Result<Vec<u8>, RenderError> {
        if roster.is_empty() {
            return Err(RenderError::InvalidData("No roster rows to export".into()));
        }
        self.render_to_bytes(details, roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use roster_core::{assemble, expand, RolePair, RoleSelections};

    fn create_test_roster() -> RosterTable {
        let calendar = expand(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 1).unwrap();
        let selections: RoleSelections = [
            (0, RolePair::new("E - 8-6", "E - 8-6")),
            (1, RolePair::new("LD - 8-7", "E - 8-6")),
        ]
        .into_iter()
        .collect();
        assemble(&calendar, &selections)
    }

    #[test]
    fn excel_renderer_creation() {
        let renderer = ExcelRenderer::new();
        assert_eq!(renderer.sheet_name, "Placement Roster");
        assert!(renderer.freeze_header);
    }

    #[test]
    fn excel_renderer_with_options() {
        let renderer = ExcelRenderer::new()
            .sheet_name("Roster")
            .no_freeze()
            .colors(ColorMap::new());
        assert_eq!(renderer.sheet_name, "Roster");
        assert!(!renderer.freeze_header);
        assert_eq!(renderer.colors, ColorMap::new());
    }

    #[test]
    fn excel_produces_valid_output() {
        let roster = create_test_roster();
        let xlsx = ExcelRenderer::new()
            .render(&PlacementDetails::new("Sam"), &roster)
            .unwrap();

        assert!(xlsx.len() > 100);
        assert_eq!(&xlsx[0..2], b"PK");
    }

    #[test]
    fn excel_empty_roster_fails() {
        let result = ExcelRenderer::new().render(&PlacementDetails::default(), &RosterTable::default());
        assert!(matches!(result, Err(RenderError::InvalidData(_))));
    }

    #[test]
    fn invalid_sheet_name_is_a_format_error() {
        let roster = create_test_roster();
        let result = ExcelRenderer::new()
            .sheet_name("bad[name]")
            .render(&PlacementDetails::default(), &roster);
        assert!(matches!(result, Err(RenderError::Format(_))));
    }

    #[test]
    fn plan_writes_dates_as_display_text() {
        let plan = ExcelRenderer::new().plan(&create_test_roster());

        let dates: Vec<&str> = plan
            .cells
            .iter()
            .filter(|c| c.col == 2)
            .map(|c| c.value.as_str())
            .collect();
        assert_eq!(dates[0], "01/01/2024");
        assert_eq!(dates[6], "07/01/2024");
        assert_eq!(plan.cells.len(), 7 * 6);
    }

    #[test]
    fn plan_colors_only_role_columns() {
        let plan = ExcelRenderer::new().plan(&create_test_roster());

        for cell in &plan.cells {
            assert_eq!(cell.color.is_some(), cell.col >= 3, "col {}", cell.col);
        }

        let first_row: Vec<String> = plan
            .colored()
            .filter(|(row, _, _)| *row == 1)
            .map(|(_, _, color)| color.to_string())
            .collect();
        assert_eq!(first_row, vec!["#FFDDC1", "#FFDDC1", "#90EE90"]);

        // Mismatch: match column repeats the student role color
        let second_row: Vec<String> = plan
            .colored()
            .filter(|(row, _, _)| *row == 2)
            .map(|(_, _, color)| color.to_string())
            .collect();
        assert_eq!(second_row, vec!["#FFABAB", "#FFDDC1", "#FFABAB"]);
    }

    #[test]
    fn one_format_per_distinct_color() {
        let plan = ExcelRenderer::new().plan(&create_test_roster());
        let colors: Vec<String> = plan.distinct_colors().iter().map(|c| c.to_string()).collect();
        assert_eq!(colors, vec!["#90EE90", "#FFABAB", "#FFDDC1", "#FFFFFF"]);
    }

    #[test]
    fn column_widths_fit_values() {
        let plan = ExcelRenderer::new().plan(&create_test_roster());
        let widths = plan.column_widths();
        assert_eq!(widths[0], "Week 1".len());
        assert_eq!(widths[2], "01/01/2024".len());
        assert_eq!(widths[4], "Supervisor Role".len());
    }
}
