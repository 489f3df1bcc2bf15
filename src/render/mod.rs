//! Report output formats.

mod json;
mod svg;
mod text;

use clap::ValueEnum;

use crate::error::RenderError;
use crate::report::VersionReport;

pub use json::JsonRenderer;
pub use svg::SvgRenderer;
pub use text::TextRenderer;

pub trait ReportRenderer {
    fn render(&self, report: &VersionReport) -> Result<String, RenderError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Burn-up chart with a secondary unestimated axis.
    #[default]
    Svg,
    Json,
    /// Daily table for the terminal.
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }

    pub fn renderer(self) -> Box<dyn ReportRenderer> {
        match self {
            OutputFormat::Svg => Box::new(SvgRenderer::default()),
            OutputFormat::Json => Box::new(JsonRenderer),
            OutputFormat::Text => Box::new(TextRenderer),
        }
    }
}
