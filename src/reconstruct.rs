//! Changelog replay: the estimate and completion of an issue at the end of every day.
//!
//! The state before the first recorded change of a field is the old value of
//! that change; a field that never changed holds its current value throughout.
//! Entries before the window are folded into the starting state, then each
//! day applies its own entries in timestamp order so the last one wins.

use chrono::NaiveDate;

use crate::model::{ChangelogEntry, DailySnapshot, FieldChange, Issue, IssueState, StatusCategory};
use crate::window::ReportWindow;

#[derive(Debug, Clone, Copy)]
struct Replay {
    estimate: Option<f64>,
    status: StatusCategory,
}

impl Replay {
    fn initial(issue: &Issue, entries: &[&ChangelogEntry]) -> Self {
        let estimate = entries
            .iter()
            .find_map(|entry| match entry.change {
                FieldChange::Estimate { from, .. } => Some(from),
                FieldChange::Status { .. } => None,
            })
            .unwrap_or(issue.estimate);
        let status = entries
            .iter()
            .find_map(|entry| match entry.change {
                FieldChange::Status { from, .. } => Some(from),
                FieldChange::Estimate { .. } => None,
            })
            .unwrap_or(issue.status);
        Self { estimate, status }
    }

    fn apply(&mut self, entry: &ChangelogEntry) {
        match entry.change {
            FieldChange::Estimate { to, .. } => self.estimate = to,
            FieldChange::Status { to, .. } => self.status = to,
        }
    }

    fn state(&self) -> IssueState {
        IssueState {
            estimate: self.estimate,
            completed: self.status.is_done(),
        }
    }
}

/// One snapshot per window day; pure, so repeated calls give identical output.
pub fn reconstruct(issue: &Issue, window: &ReportWindow) -> Vec<DailySnapshot> {
    let mut entries: Vec<&ChangelogEntry> = issue.changelog.iter().collect();
    entries.sort_by_key(|entry| entry.timestamp);

    let mut replay = Replay::initial(issue, &entries);
    let mut pending = entries.into_iter().peekable();
    while let Some(entry) = pending.next_if(|entry| entry.day() < window.start()) {
        replay.apply(entry);
    }

    let created = issue.created_day();
    window
        .days()
        .map(|day| {
            while let Some(entry) = pending.next_if(|entry| entry.day() <= day) {
                replay.apply(entry);
            }
            DailySnapshot {
                day,
                state: exists_on(created, day).then(|| replay.state()),
            }
        })
        .collect()
}

fn exists_on(created: Option<NaiveDate>, day: NaiveDate) -> bool {
    created.map_or(true, |created| created <= day)
}
