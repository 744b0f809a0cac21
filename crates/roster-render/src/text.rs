//! Plain-text roster rendering for terminals
//!
//! ```text
//! Week   | Day | Date       | Student Role | Supervisor Role | Match Color
//! -------+-----+------------+--------------+-----------------+------------
//! Week 1 | M   | 01/01/2024 | E - 8-6      | E - 8-6         | MATCH
//! ```
//!
//! With `ansi` enabled the three role columns get a 24-bit background.

use std::fmt::Write as _;

use roster_core::{
    Color, ColorMap, PlacementDetails, RenderError, Renderer, RosterTable, COLUMN_HEADERS,
};

/// Text roster renderer
#[derive(Clone, Debug)]
pub struct TextRenderer {
    /// Role → background color mapping
    pub colors: ColorMap,
    /// Emit ANSI truecolor backgrounds on role cells
    pub ansi: bool,
    /// Include the color legend
    pub show_legend: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            colors: ColorMap::default(),
            ansi: false,
            show_legend: true,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color mapping
    pub fn colors(mut self, colors: ColorMap) -> Self {
        self.colors = colors;
        self
    }

    /// Enable ANSI background colors
    pub fn ansi(mut self, enabled: bool) -> Self {
        self.ansi = enabled;
        self
    }

    pub fn no_legend(mut self) -> Self {
        self.show_legend = false;
        self
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if !self.ansi {
            return text.to_string();
        }
        let (r, g, b) = color.channels();
        format!("\x1b[48;2;{r};{g};{b}m\x1b[30m{text}\x1b[0m")
    }

    fn render_table(&self, roster: &RosterTable, out: &mut String) {
        let rows: Vec<[String; 6]> = roster.iter().map(|r| r.cells()).collect();

        let mut widths = COLUMN_HEADERS.map(|h| h.chars().count());
        for cells in &rows {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = COLUMN_HEADERS
            .iter()
            .zip(widths)
            .map(|(h, w)| format!("{h:<w$}"))
            .collect();
        let _ = writeln!(out, "{}", header.join(" | ").trim_end());

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(out, "{}", rule.join("-+-"));

        let colored = roster.colored_cells(&self.colors);
        for (index, cells) in rows.iter().enumerate() {
            let mut line: Vec<String> = cells
                .iter()
                .zip(widths)
                .map(|(cell, w)| format!("{cell:<w$}"))
                .collect();
            for cell in colored.iter().filter(|c| c.row == index) {
                let col = cell.column.index();
                line[col] = self.paint(&line[col], cell.color);
            }
            let _ = writeln!(out, "{}", line.join(" | ").trim_end());
        }
    }

    fn render_legend(&self, out: &mut String) {
        out.push_str("\nColors:\n");
        for (label, color) in self.colors.iter() {
            let name = if label.is_empty() { "(none)" } else { label };
            let swatch = self.paint("    ", color);
            let _ = writeln!(out, "  {swatch} {color}  {name}");
        }
        let fallback = self.colors.fallback();
        let _ = writeln!(out, "  {} {fallback}  (other)", self.paint("    ", fallback));
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(
        &self,
        details: &PlacementDetails,
        roster: &RosterTable,
    ) -> Result<String, RenderError> {
        if roster.is_empty() {
            return Err(RenderError::InvalidData("No roster rows to render".into()));
        }

        let mut out = String::from("Generated Placement Roster\n\n");
        self.render_table(roster, &mut out);

        let s = roster.summary();
        let _ = writeln!(
            out,
            "\nSummary: {} days, {} student shifts, {} supervisor shifts, {} matched",
            s.days, s.student_days, s.supervisor_days, s.matched_days
        );

        if self.show_legend {
            self.render_legend(&mut out);
        }

        out.push_str("\nStudent Details\n");
        let _ = writeln!(out, "  Name: {}", details.student_name);
        let _ = writeln!(out, "  Year Group: {}", details.year_group);
        let _ = writeln!(out, "  Student Number: {}", details.student_number);
        let _ = writeln!(out, "  Email: {}", details.email);
        let _ = writeln!(out, "  Practice Educator/Assessor: {}", details.educator_name);
        let _ = writeln!(out, "  Practice Supervisors: {}", details.supervisor_list());

        Ok(out)
    }
}
