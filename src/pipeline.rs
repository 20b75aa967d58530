use tracing::info;

use crate::aggregate::{aggregate, summarize};
use crate::chart::{distribution, engagement, region_series};
use crate::models::{Field, Record, Snapshot};
use crate::parser::{parse_records, parse_records_by_header};

/// How record columns are located in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnMode {
    #[default]
    Positional,
    Header,
}

pub fn run(raw: &str, mode: ColumnMode) -> Snapshot {
    let records = match mode {
        ColumnMode::Positional => parse_records(raw),
        ColumnMode::Header => parse_records_by_header(raw),
    };
    build_snapshot(records)
}

pub fn build_snapshot(records: Vec<Record>) -> Snapshot {
    let aggregates = aggregate(&records);
    let summary = summarize(&aggregates);

    info!(
        "Aggregated registrations - total={}, with_state={}, states={}, study_fields={}, interests={}",
        summary.total,
        aggregates.state.total(),
        aggregates.state.len(),
        aggregates.study.len(),
        aggregates.interests.len()
    );

    Snapshot {
        summary,
        region_series: region_series(&aggregates),
        study_series: distribution(&aggregates, Field::Study),
        interest_series: distribution(&aggregates, Field::Interests),
        engagement: engagement(&records),
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChartEntry, EngagementEntry, SummaryStats};
    use pretty_assertions::assert_eq;

    const SHEET: &str = "Name,Email,Phone,State,Study,Interest,Last Reminder,Follow Up\n\
        Asha,asha@gmail.com,9876543210,tn,Engineering,Technology,2024-05-01,sent\n\
        Ravi,ravi@gmail.com,9123456780,TN,Medical,Healthcare,,\n\
        Meera,meera@gmail.com,9000000000,Kerala,Engineering,Technology,,called\n\
        \n\
        Dev,dev@gmail.com\n";

    #[test]
    fn builds_all_outputs_from_one_batch() {
        let snapshot = run(SHEET, ColumnMode::Positional);

        assert_eq!(snapshot.records.len(), 4);
        assert_eq!(
            snapshot.summary,
            SummaryStats {
                total: 4,
                top_state: "Tamil Nadu".to_string(),
                top_interest: "Technology".to_string(),
                top_study: "Engineering".to_string(),
            }
        );
        assert_eq!(
            snapshot.region_series,
            vec![
                ChartEntry {
                    label: "Tamil Nadu".to_string(),
                    count: 2
                },
                ChartEntry {
                    label: "Kerala".to_string(),
                    count: 1
                },
            ]
        );
        assert_eq!(
            snapshot.engagement,
            EngagementEntry {
                total: 4,
                with_follow_up: 2
            }
        );
        assert_eq!(snapshot.study_series[0].label, "Engineering");
        assert_eq!(snapshot.interest_series[0].count, 2);
    }

    #[test]
    fn records_keep_raw_state_values() {
        let snapshot = run(SHEET, ColumnMode::Positional);
        assert_eq!(snapshot.records[0].state, "tn");
    }

    #[test]
    fn header_mode_reads_reordered_columns() {
        let raw = "Email,State,Name\nasha@gmail.com,ka,Asha";
        let snapshot = run(raw, ColumnMode::Header);
        assert_eq!(snapshot.records[0].name, "Asha");
        assert_eq!(snapshot.summary.top_state, "Karnataka");
    }

    #[test]
    fn empty_text_gives_default_snapshot() {
        let snapshot = run("", ColumnMode::Positional);
        assert_eq!(snapshot, Snapshot::default());
    }
}
