//! Burn-up chart as a standalone SVG document.
//!
//! Scope and completed work share the left axis, the unestimated share of
//! existing issues runs on a right axis fixed at 0-100%.

use std::fmt::Write;

use crate::error::RenderError;
use crate::model::DailyTotal;
use crate::report::VersionReport;

use super::ReportRenderer;

const SCOPE_COLOR: &str = "#a9a9a9";
const COMPLETED_COLOR: &str = "#1f4fd6";
const UNESTIMATED_COLOR: &str = "#d62728";
const GRID_COLOR: &str = "#e5e5e5";
const MAX_DATE_LABELS: usize = 10;
const Y_TICKS: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer {
    pub width: f64,
    pub height: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

/// Pixel mapping for the plot area.
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    days: usize,
    scope_max: f64,
}

impl Frame {
    fn new(renderer: &SvgRenderer, totals: &[DailyTotal]) -> Self {
        let peak = totals.iter().map(|total| total.scope).fold(0.0, f64::max);
        Self {
            left: 90.0,
            top: 70.0,
            width: renderer.width - 90.0 - 90.0,
            height: renderer.height - 70.0 - 100.0,
            days: totals.len(),
            scope_max: if peak > 0.0 { peak * 1.1 } else { 1.0 },
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn x(&self, index: usize) -> f64 {
        if self.days <= 1 {
            self.left + self.width / 2.0
        } else {
            self.left + self.width * index as f64 / (self.days - 1) as f64
        }
    }

    fn y_estimate(&self, value: f64) -> f64 {
        self.bottom() - self.height * (value / self.scope_max).clamp(0.0, 1.0)
    }

    fn y_percent(&self, percent: f64) -> f64 {
        self.bottom() - self.height * (percent / 100.0).clamp(0.0, 1.0)
    }

    fn points(&self, values: impl Iterator<Item = f64>, y: impl Fn(&Self, f64) -> f64) -> String {
        values
            .enumerate()
            .map(|(index, value)| format!("{:.1},{:.1}", self.x(index), y(self, value)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Line points closed down to the baseline.
    fn area(&self, line: &str) -> String {
        format!(
            "{:.1},{:.1} {} {:.1},{:.1}",
            self.x(0),
            self.bottom(),
            line,
            self.x(self.days.saturating_sub(1)),
            self.bottom()
        )
    }
}

impl ReportRenderer for SvgRenderer {
    fn render(&self, report: &VersionReport) -> Result<String, RenderError> {
        let frame = Frame::new(self, &report.totals);
        let mut svg = String::new();

        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="13">"#,
            w = self.width,
            h = self.height
        )?;
        writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="40" text-anchor="middle" font-size="20">{}</text>"#,
            self.width / 2.0,
            escape(&report.title)
        )?;

        self.write_axes(&mut svg, &frame, report)?;

        if !report.totals.is_empty() {
            let scope = frame.points(report.totals.iter().map(|t| t.scope), Frame::y_estimate);
            let completed =
                frame.points(report.totals.iter().map(|t| t.completed), Frame::y_estimate);
            let unestimated = frame.points(
                report.totals.iter().map(|t| t.unestimated_percent),
                Frame::y_percent,
            );
            writeln!(
                svg,
                r#"<polygon class="scope-area" points="{}" fill="{SCOPE_COLOR}" fill-opacity="0.2"/>"#,
                frame.area(&scope)
            )?;
            writeln!(
                svg,
                r#"<polygon class="completed-area" points="{}" fill="{COMPLETED_COLOR}" fill-opacity="0.2"/>"#,
                frame.area(&completed)
            )?;
            writeln!(
                svg,
                r#"<polyline class="scope" points="{scope}" fill="none" stroke="{SCOPE_COLOR}" stroke-width="2"/>"#
            )?;
            writeln!(
                svg,
                r#"<polyline class="completed" points="{completed}" fill="none" stroke="{COMPLETED_COLOR}" stroke-width="2"/>"#
            )?;
            writeln!(
                svg,
                r#"<polyline class="unestimated" points="{unestimated}" fill="none" stroke="{UNESTIMATED_COLOR}" stroke-width="2" stroke-dasharray="8 5"/>"#
            )?;
        }

        self.write_legend(&mut svg, &frame, &report.estimate_label)?;
        writeln!(svg, "</svg>")?;
        Ok(svg)
    }
}

impl SvgRenderer {
    fn write_axes(
        &self,
        svg: &mut String,
        frame: &Frame,
        report: &VersionReport,
    ) -> Result<(), RenderError> {
        for tick in 0..=Y_TICKS {
            let fraction = tick as f64 / Y_TICKS as f64;
            let y = frame.bottom() - frame.height * fraction;
            writeln!(
                svg,
                r#"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{GRID_COLOR}"/>"#,
                frame.left,
                frame.right()
            )?;
            writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"#,
                frame.left - 8.0,
                y + 4.0,
                format_value(frame.scope_max * fraction)
            )?;
            writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="start">{:.0}%</text>"#,
                frame.right() + 8.0,
                y + 4.0,
                fraction * 100.0
            )?;
        }

        writeln!(
            svg,
            r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="#333"/>"##,
            frame.left, frame.top, frame.width, frame.height
        )?;

        let step = report.totals.len().div_ceil(MAX_DATE_LABELS).max(1);
        for (index, total) in report.totals.iter().enumerate().step_by(step) {
            let x = frame.x(index);
            writeln!(
                svg,
                r#"<line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="{GRID_COLOR}"/>"#,
                frame.top,
                frame.bottom()
            )?;
            writeln!(
                svg,
                r#"<text x="{x:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
                frame.bottom() + 22.0,
                total.day.format("%Y-%m-%d")
            )?;
        }

        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">Date</text>"#,
            frame.left + frame.width / 2.0,
            frame.bottom() + 55.0
        )?;
        let middle = frame.top + frame.height / 2.0;
        writeln!(
            svg,
            r#"<text x="30" y="{middle:.1}" text-anchor="middle" transform="rotate(-90 30 {middle:.1})">{}</text>"#,
            escape(&report.estimate_label)
        )?;
        let right_label_x = self.width - 30.0;
        writeln!(
            svg,
            r#"<text x="{right_label_x:.1}" y="{middle:.1}" text-anchor="middle" transform="rotate(90 {right_label_x:.1} {middle:.1})">Percentage of Issues Unestimated</text>"#
        )?;
        Ok(())
    }

    fn write_legend(
        &self,
        svg: &mut String,
        frame: &Frame,
        estimate_label: &str,
    ) -> Result<(), RenderError> {
        let label = escape(estimate_label);
        let entries = [
            (SCOPE_COLOR, "", format!("Cumulative Estimated {}", label)),
            (COMPLETED_COLOR, "", format!("Cumulative {} Completed", label)),
            (
                UNESTIMATED_COLOR,
                r#" stroke-dasharray="8 5""#,
                "Percentage of Issues Unestimated".to_string(),
            ),
        ];
        let x = frame.left + 15.0;
        writeln!(
            svg,
            r##"<rect x="{:.1}" y="{:.1}" width="320" height="{:.1}" fill="white" fill-opacity="0.85" stroke="#ccc"/>"##,
            frame.left + 5.0,
            frame.top + 5.0,
            entries.len() as f64 * 22.0 + 10.0
        )?;
        for (index, (color, dash, text)) in entries.iter().enumerate() {
            let y = frame.top + 25.0 + index as f64 * 22.0;
            writeln!(
                svg,
                r#"<line x1="{x:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{color}" stroke-width="2"{dash}/>"#,
                y - 4.0,
                x + 30.0,
                y - 4.0
            )?;
            writeln!(svg, r#"<text x="{:.1}" y="{y:.1}">{text}</text>"#, x + 40.0)?;
        }
        Ok(())
    }
}

fn format_value(value: f64) -> String {
    if (value - value.round()).abs() < 0.05 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
