use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const NOT_AVAILABLE: &str = "N/A";

/// One registration row. Every text field is an empty string when the
/// source row did not carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub state: String,
    pub study: String,
    pub interests: String,
    pub last_reminder: String,
    pub follow_up: String,
    pub timestamp: DateTime<Utc>,
}

impl Record {
    pub fn has_follow_up(&self) -> bool {
        !self.follow_up.is_empty()
    }
}

/// Categorical fields that get a frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    State,
    Study,
    Interests,
}

impl Field {
    pub fn value(self, record: &Record) -> &str {
        match self {
            Field::State => &record.state,
            Field::Study => &record.study,
            Field::Interests => &record.interests,
        }
    }
}

/// Label counts for a single field, remembering the order labels were
/// first seen so equal counts sort deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn increment(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), 1));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
    }

    /// Entries by descending count; ties keep first-seen order.
    pub fn sorted_desc(&self) -> Vec<(&str, usize)> {
        let mut sorted: Vec<(&str, usize)> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    pub fn top(&self) -> Option<&str> {
        if self.is_empty() {
            return None;
        }
        self.sorted_desc().first().map(|(label, _)| *label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total: usize,
    pub top_state: String,
    pub top_interest: String,
    pub top_study: String,
}

impl Default for SummaryStats {
    fn default() -> Self {
        Self {
            total: 0,
            top_state: NOT_AVAILABLE.to_string(),
            top_interest: NOT_AVAILABLE.to_string(),
            top_study: NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementEntry {
    pub total: usize,
    pub with_follow_up: usize,
}

impl EngagementEntry {
    pub fn follow_up_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.with_follow_up as f64 / self.total as f64
        }
    }
}

/// Everything the dashboard shows for one fetch cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub records: Vec<Record>,
    pub summary: SummaryStats,
    pub region_series: Vec<ChartEntry>,
    pub study_series: Vec<ChartEntry>,
    pub interest_series: Vec<ChartEntry>,
    pub engagement: EngagementEntry,
}
