use std::fmt::Write;

use crate::error::RenderError;
use crate::report::VersionReport;

use super::ReportRenderer;

pub struct TextRenderer;

impl ReportRenderer for TextRenderer {
    fn render(&self, report: &VersionReport) -> Result<String, RenderError> {
        let mut out = String::new();
        writeln!(out, "{}", report.title)?;
        writeln!(
            out,
            "{} to {}, {} issues, estimates in {}",
            report.window.start(),
            report.window.end(),
            report.issue_count,
            report.estimate_label
        )?;
        writeln!(out)?;
        writeln!(
            out,
            "{:<10}  {:>10}  {:>10}  {:>6}  {:>11}  {:>13}",
            "Date", "Scope", "Completed", "Issues", "Unestimated", "Unestimated %"
        )?;
        for total in &report.totals {
            writeln!(
                out,
                "{:<10}  {:>10.1}  {:>10.1}  {:>6}  {:>11}  {:>12.1}%",
                total.day.format("%Y-%m-%d"),
                total.scope,
                total.completed,
                total.existing,
                total.unestimated,
                total.unestimated_percent
            )?;
        }

        if !report.warnings.is_empty() {
            writeln!(out)?;
            writeln!(out, "Warnings ({}):", report.warnings.len())?;
            for warning in &report.warnings {
                writeln!(out, "  - {}", warning)?;
            }
        }
        Ok(out)
    }
}
