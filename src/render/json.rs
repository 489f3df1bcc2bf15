use crate::error::RenderError;
use crate::report::VersionReport;

use super::ReportRenderer;

pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &VersionReport) -> Result<String, RenderError> {
        let mut json = serde_json::to_string_pretty(report)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::JsonRenderer;
    use crate::render::fixtures;
    use crate::render::ReportRenderer;
    use serde_json::Value;

    #[test]
    fn serializes_totals_window_and_warnings() {
        let output = JsonRenderer.render(&fixtures::report()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["project"], "APP");
        assert_eq!(value["window"]["start"], "2024-06-03");
        assert_eq!(value["totals"].as_array().unwrap().len(), 3);
        assert_eq!(value["totals"][1]["day"], "2024-06-04");
        assert_eq!(value["totals"][1]["completed"], 3.0);
        assert_eq!(value["warnings"][0]["issue"], "APP-7");
        assert_eq!(value["warnings"][0]["kind"], "unparseable_estimate");
        assert_eq!(value["warnings"][0]["value"], "big");
    }
}
