//! # roster-render
//!
//! Rendering backends for assembled placement rosters.
//!
//! This crate provides:
//! - Excel export (`ExcelRenderer`), the downloadable `.xlsx` roster
//! - HTML table rendering (`HtmlRenderer`) for on-screen display
//! - Text rendering (`TextRenderer`) for terminals, optionally ANSI-colored
//!
//! All three color the Student Role, Supervisor Role and Match Color
//! columns from `RosterTable::colored_cells`, so a given roster and color
//! map produce the same colored cells everywhere.
//!
//! ## Example
//!
//! ```rust,ignore
//! use roster_core::{PlacementDetails, Renderer, RosterConfig};
//! use roster_render::{ExcelRenderer, HtmlRenderer, EXPORT_FILE_NAME};
//!
//! let config = RosterConfig::default();
//!
//! let html = HtmlRenderer::new().colors(config.colors.clone()).render(&details, &table)?;
//!
//! let xlsx_bytes = ExcelRenderer::new().colors(config.colors).render(&details, &table)?;
//! std::fs::write(EXPORT_FILE_NAME, xlsx_bytes)?;
//! ```

pub mod excel;
pub mod html;
pub mod text;

pub use excel::{ExcelRenderer, PlannedCell, SheetPlan, EXPORT_FILE_NAME, SHEET_NAME};
pub use html::HtmlRenderer;
pub use text::TextRenderer;

/// HTML-escape a string
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
