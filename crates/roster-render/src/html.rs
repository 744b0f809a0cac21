//! HTML roster rendering
//!
//! Produces a standalone page with the roster table, per-cell background
//! colors on the three role columns, and the student details block.

use std::fmt::Write as _;

use roster_core::{
    ColorMap, PlacementDetails, RenderError, Renderer, RoleColumn, RosterTable, COLUMN_HEADERS,
};

use crate::html_escape;

/// HTML roster renderer
#[derive(Clone, Debug)]
pub struct HtmlRenderer {
    /// Page heading
    pub title: String,
    /// Line under the heading
    pub subtitle: String,
    /// Role → background color mapping
    pub colors: ColorMap,
    /// Whether to include the assignment counts
    pub show_summary: bool,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            title: "DVH Theatre Student Placement Allocation".into(),
            subtitle: "Automatically generate placement allocation forms".into(),
            colors: ColorMap::default(),
            show_summary: true,
        }
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Set the color mapping
    pub fn colors(mut self, colors: ColorMap) -> Self {
        self.colors = colors;
        self
    }

    /// Omit the assignment counts
    pub fn no_summary(mut self) -> Self {
        self.show_summary = false;
        self
    }

    fn render_table(&self, roster: &RosterTable) -> String {
        let mut out = String::new();
        out.push_str("<table class=\"roster\">\n<thead><tr>");
        for header in COLUMN_HEADERS {
            let _ = write!(out, "<th>{}</th>", html_escape(header));
        }
        out.push_str("</tr></thead>\n<tbody>\n");

        let colored = roster.colored_cells(&self.colors);
        for (index, row) in roster.iter().enumerate() {
            let cells = row.cells();
            out.push_str("<tr>");
            for value in &cells[..RoleColumn::StudentRole.index()] {
                let _ = write!(out, "<td>{}</td>", html_escape(value));
            }
            for cell in colored.iter().filter(|c| c.row == index) {
                let _ = write!(
                    out,
                    "<td data-row=\"{}\" data-col=\"{}\" style=\"background-color: {}; color: black;\">{}</td>",
                    index,
                    cell.column.header(),
                    cell.color,
                    html_escape(cell.label)
                );
            }
            out.push_str("</tr>\n");
        }

        out.push_str("</tbody>\n</table>");
        out
    }

    fn render_details(details: &PlacementDetails) -> String {
        let fields = [
            ("Name", details.student_name.clone()),
            ("Year Group", details.year_group.clone()),
            ("Student Number", details.student_number.clone()),
            ("Email", details.email.clone()),
            ("Practice Educator/Assessor", details.educator_name.clone()),
            ("Practice Supervisors", details.supervisor_list()),
        ];

        let mut out = String::from("<ul class=\"details\">\n");
        for (label, value) in fields {
            let _ = writeln!(out, "<li><strong>{label}:</strong> {}</li>", html_escape(&value));
        }
        out.push_str("</ul>");
        out
    }
}

impl Renderer for HtmlRenderer {
    type Output = String;

    fn render(
        &self,
        details: &PlacementDetails,
        roster: &RosterTable,
    ) -> Result<String, RenderError> {
        if roster.is_empty() {
            return Err(RenderError::InvalidData("No roster rows to render".into()));
        }

        let summary = if self.show_summary {
            let s = roster.summary();
            format!(
                "<p class=\"summary\">{} days, {} student shifts, {} supervisor shifts, {} matched</p>\n",
                s.days, s.student_days, s.supervisor_days, s.matched_days
            )
        } else {
            String::new()
        };

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        table.roster {{ border-collapse: collapse; font-family: system-ui, sans-serif; }}
        table.roster th, table.roster td {{ border: 1px solid #ccc; padding: 4px 8px; }}
    </style>
</head>
<body>
<h1>{title}</h1>
<h3>{subtitle}</h3>
<h2>Generated Placement Roster</h2>
{table}
{summary}<h2>Student Details</h2>
{details}
</body>
</html>
"#,
            title = html_escape(&self.title),
            subtitle = html_escape(&self.subtitle),
            table = self.render_table(roster),
            summary = summary,
            details = Self::render_details(details),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_core::{assemble, expand, RolePair, RoleSelections};

    fn create_test_roster() -> RosterTable {
        let calendar = expand(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 1).unwrap();
        let mut selections = RoleSelections::new();
        selections.insert(0, RolePair::new("E - 8-6", "E - 8-6"));
        assemble(&calendar, &selections)
    }

    #[test]
    fn html_produces_valid_document() {
        let html = HtmlRenderer::new()
            .render(&PlacementDetails::new("Sam Jones"), &create_test_roster())
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("</html>"));
        assert!(html.contains("<h1>DVH Theatre Student Placement Allocation</h1>"));
        assert!(html.contains("<strong>Name:</strong> Sam Jones"));
        assert!(html.contains("<th>Match Color</th>"));
    }

    #[test]
    fn html_colors_role_cells() {
        let html = HtmlRenderer::new()
            .render(&PlacementDetails::default(), &create_test_roster())
            .unwrap();

        assert!(html.contains(
            "data-row=\"0\" data-col=\"Match Color\" style=\"background-color: #90EE90; color: black;\">MATCH</td>"
        ));
        assert!(html.contains(
            "data-row=\"3\" data-col=\"Student Role\" style=\"background-color: #FFFFFF; color: black;\"></td>"
        ));
        assert_eq!(html.matches("background-color:").count(), 21);
    }

    #[test]
    fn html_escapes_details() {
        let details = PlacementDetails::new("<script>").email("a&b@example.org");
        let html = HtmlRenderer::new()
            .render(&details, &create_test_roster())
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a&amp;b@example.org"));
    }

    #[test]
    fn html_summary_toggle() {
        let roster = create_test_roster();
        let with = HtmlRenderer::new().render(&PlacementDetails::default(), &roster).unwrap();
        assert!(with.contains("7 days, 1 student shifts, 1 supervisor shifts, 1 matched"));

        let without = HtmlRenderer::new()
            .no_summary()
            .render(&PlacementDetails::default(), &roster)
            .unwrap();
        assert!(!without.contains("class=\"summary\""));
    }

    #[test]
    fn html_empty_roster_fails() {
        let result = HtmlRenderer::new().render(&PlacementDetails::default(), &RosterTable::default());
        assert!(matches!(result, Err(RenderError::InvalidData(_))));
    }
}
