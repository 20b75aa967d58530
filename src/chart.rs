use crate::aggregate::Aggregates;
use crate::models::{ChartEntry, EngagementEntry, Field, FrequencyTable, Record};

/// Descending by count; equal counts stay in first-seen order.
pub fn series(table: &FrequencyTable) -> Vec<ChartEntry> {
    table
        .sorted_desc()
        .into_iter()
        .map(|(label, count)| ChartEntry {
            label: label.to_string(),
            count,
        })
        .collect()
}

pub fn distribution(aggregates: &Aggregates, field: Field) -> Vec<ChartEntry> {
    series(aggregates.table(field))
}

pub fn region_series(aggregates: &Aggregates) -> Vec<ChartEntry> {
    distribution(aggregates, Field::State)
}

/// Any non-empty follow-up value counts, whatever it says.
pub fn engagement(records: &[Record]) -> EngagementEntry {
    EngagementEntry {
        total: records.len(),
        with_follow_up: records.iter().filter(|r| r.has_follow_up()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::parser::parse_records;
    use pretty_assertions::assert_eq;

    fn entry(label: &str, count: usize) -> ChartEntry {
        ChartEntry {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn region_series_is_sorted_and_normalized() {
        let records = parse_records("h\na,,,kl\nb,,,ka\nc,,,KA\nd,,,\ne,,,Goa\nf,,,Kerala\ng,,,ka");
        let aggregates = aggregate(&records);

        assert_eq!(
            region_series(&aggregates),
            vec![entry("Karnataka", 3), entry("Kerala", 2), entry("Goa", 1)]
        );
    }

    #[test]
    fn study_series_passes_values_through() {
        let records = parse_records("h\na,,,,ap\nb,,,,Law\nc,,,,Law");
        assert_eq!(
            distribution(&aggregate(&records), Field::Study),
            vec![entry("Law", 2), entry("ap", 1)]
        );
    }

    #[test]
    fn engagement_counts_any_follow_up_text() {
        let records = parse_records("h\na,,,,,,,yes\nb,,,,,,,no\nc,,,,,,,\nd");
        assert_eq!(
            engagement(&records),
            EngagementEntry {
                total: 4,
                with_follow_up: 2
            }
        );
    }

    #[test]
    fn empty_input_gives_empty_series() {
        let aggregates = aggregate(&[]);
        assert!(region_series(&aggregates).is_empty());
        assert_eq!(engagement(&[]), EngagementEntry::default());
    }
}
