//! Inclusive day range a report covers, and how it is derived.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ConfigError> {
        if start > end {
            return Err(ConfigError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days, both ends included.
    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

/// Explicit dates win. Otherwise the start comes from the version or sprint and
/// is never guessed; the end falls back to the planned end capped at today.
pub fn resolve_window(
    explicit_start: Option<NaiveDate>,
    explicit_end: Option<NaiveDate>,
    scope_start: Option<NaiveDate>,
    scope_end: Option<NaiveDate>,
    today: NaiveDate,
    scope_label: &str,
) -> Result<ReportWindow, ConfigError> {
    let start = explicit_start
        .or(scope_start)
        .ok_or_else(|| ConfigError::MissingStart {
            scope: scope_label.to_string(),
        })?;
    let end = explicit_end.unwrap_or_else(|| scope_end.map_or(today, |end| end.min(today)));
    ReportWindow::new(start, end)
}
