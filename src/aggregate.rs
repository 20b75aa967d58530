use crate::models::{Field, FrequencyTable, Record, SummaryStats, NOT_AVAILABLE};
use crate::normalize::normalize_field;

/// Per-field frequency tables for one batch of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    pub total: usize,
    pub state: FrequencyTable,
    pub study: FrequencyTable,
    pub interests: FrequencyTable,
}

impl Aggregates {
    pub fn table(&self, field: Field) -> &FrequencyTable {
        match field {
            Field::State => &self.state,
            Field::Study => &self.study,
            Field::Interests => &self.interests,
        }
    }
}

/// Counts normalized, non-empty values of `field`.
pub fn frequency_table(records: &[Record], field: Field) -> FrequencyTable {
    let mut table = FrequencyTable::default();

    for record in records {
        let value = normalize_field(field, field.value(record));
        if value.is_empty() {
            continue;
        }
        table.increment(value);
    }

    table
}

pub fn aggregate(records: &[Record]) -> Aggregates {
    Aggregates {
        total: records.len(),
        state: frequency_table(records, Field::State),
        study: frequency_table(records, Field::Study),
        interests: frequency_table(records, Field::Interests),
    }
}

pub fn top_value(table: &FrequencyTable) -> String {
    table.top().unwrap_or(NOT_AVAILABLE).to_string()
}

pub fn summarize(aggregates: &Aggregates) -> SummaryStats {
    SummaryStats {
        total: aggregates.total,
        top_state: top_value(&aggregates.state),
        top_interest: top_value(&aggregates.interests),
        top_study: top_value(&aggregates.study),
    }
}
