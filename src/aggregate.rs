//! Daily totals across all issue timelines.

use log::debug;

use crate::error::{ReconstructionWarning, WarningKind};
use crate::model::{DailySnapshot, DailyTotal};
use crate::window::ReportWindow;

/// Reconstructed snapshots of one issue, aligned to the report window.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueTimeline {
    pub key: String,
    pub snapshots: Vec<DailySnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub totals: Vec<DailyTotal>,
    pub warnings: Vec<ReconstructionWarning>,
}

pub fn aggregate(window: &ReportWindow, timelines: &[IssueTimeline]) -> Aggregation {
    let mut warnings = Vec::new();
    let included: Vec<&IssueTimeline> = timelines
        .iter()
        .filter(|timeline| match exclusion(window, timeline) {
            Some(kind) => {
                let warning = ReconstructionWarning::new(timeline.key.clone(), kind);
                debug!("{}", warning);
                warnings.push(warning);
                false
            }
            None => true,
        })
        .collect();

    let totals = window
        .days()
        .enumerate()
        .map(|(index, day)| {
            let mut total = DailyTotal {
                day,
                scope: 0.0,
                completed: 0.0,
                unestimated: 0,
                existing: 0,
                unestimated_percent: 0.0,
            };
            for state in included
                .iter()
                .filter_map(|timeline| timeline.snapshots[index].state)
            {
                total.existing += 1;
                match state.estimate {
                    Some(estimate) => {
                        total.scope += estimate;
                        if state.completed {
                            total.completed += estimate;
                        }
                    }
                    None => total.unestimated += 1,
                }
            }
            if total.existing > 0 {
                total.unestimated_percent =
                    total.unestimated as f64 / total.existing as f64 * 100.0;
            }
            total
        })
        .collect();

    Aggregation { totals, warnings }
}

fn exclusion(window: &ReportWindow, timeline: &IssueTimeline) -> Option<WarningKind> {
    let snapshots = &timeline.snapshots;
    if snapshots.is_empty() {
        return Some(WarningKind::NoSnapshots);
    }
    let aligned = snapshots.len() == window.len()
        && snapshots
            .iter()
            .zip(window.days())
            .all(|(snapshot, day)| snapshot.day == day);
    if !aligned {
        return Some(WarningKind::MisalignedSnapshots {
            expected: window.len(),
            received: snapshots.len(),
        });
    }
    if snapshots.iter().all(|snapshot| snapshot.state.is_none()) {
        return Some(WarningKind::NoSnapshots);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{aggregate, IssueTimeline};
    use crate::error::WarningKind;
    use crate::model::{DailySnapshot, IssueState};
    use crate::window::ReportWindow;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn window(days: u32) -> ReportWindow {
        ReportWindow::new(day(1), day(days)).unwrap()
    }

    /// One entry per day: `None` = not created, `Some((estimate, done))`.
    fn timeline(key: &str, states: &[Option<(Option<f64>, bool)>]) -> IssueTimeline {
        IssueTimeline {
            key: key.to_string(),
            snapshots: states
                .iter()
                .enumerate()
                .map(|(index, state)| DailySnapshot {
                    day: day(index as u32 + 1),
                    state: state.map(|(estimate, completed)| IssueState {
                        estimate,
                        completed,
                    }),
                })
                .collect(),
        }
    }

    #[test]
    fn sums_scope_completed_and_unestimated() {
        let timelines = vec![
            timeline("A-1", &[Some((Some(5.0), false)), Some((Some(5.0), true))]),
            timeline("A-2", &[Some((Some(3.0), true)), Some((None, false))]),
            timeline("A-3", &[None, Some((Some(2.0), false))]),
        ];
        let result = aggregate(&window(2), &timelines);

        assert!(result.warnings.is_empty());
        let first = &result.totals[0];
        assert_eq!((first.scope, first.completed), (8.0, 3.0));
        assert_eq!((first.existing, first.unestimated), (2, 0));
        assert_eq!(first.unestimated_percent, 0.0);

        let second = &result.totals[1];
        assert_eq!((second.scope, second.completed), (7.0, 5.0));
        assert_eq!((second.existing, second.unestimated), (3, 1));
        assert!((second.unestimated_percent - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn no_existing_issues_means_zero_percent() {
        let timelines = vec![timeline("A-1", &[None, Some((None, false))])];
        let result = aggregate(&window(2), &timelines);
        assert_eq!(result.totals[0].existing, 0);
        assert_eq!(result.totals[0].unestimated_percent, 0.0);
        assert_eq!(result.totals[1].unestimated_percent, 100.0);
    }

    #[test]
    fn timelines_without_data_are_excluded_with_a_warning() {
        let timelines = vec![
            timeline("A-1", &[Some((Some(1.0), false)), Some((Some(1.0), false))]),
            timeline("A-2", &[None, None]),
            IssueTimeline {
                key: "A-3".to_string(),
                snapshots: vec![],
            },
            timeline("A-4", &[Some((Some(9.0), true))]),
        ];
        let result = aggregate(&window(2), &timelines);

        assert_eq!(result.totals[1].scope, 1.0);
        let kinds: Vec<_> = result
            .warnings
            .iter()
            .map(|w| (w.issue.as_str(), w.kind.clone()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("A-2", WarningKind::NoSnapshots),
                ("A-3", WarningKind::NoSnapshots),
                (
                    "A-4",
                    WarningKind::MisalignedSnapshots {
                        expected: 2,
                        received: 1
                    }
                ),
            ]
        );
    }

    #[test]
    fn empty_input_still_yields_one_total_per_day() {
        let result = aggregate(&window(3), &[]);
        assert_eq!(result.totals.len(), 3);
        assert!(result.totals.iter().all(|t| t.scope == 0.0 && t.existing == 0));
    }
}
