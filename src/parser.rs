use chrono::Utc;
use tracing::debug;

use crate::models::Record;

/// Source column for each record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: usize,
    pub email: usize,
    pub phone: usize,
    pub state: usize,
    pub study: usize,
    pub interests: usize,
    pub last_reminder: usize,
    pub follow_up: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            name: 0,
            email: 1,
            phone: 2,
            state: 3,
            study: 4,
            interests: 5,
            last_reminder: 6,
            follow_up: 7,
        }
    }
}

impl ColumnLayout {
    const ABSENT: usize = usize::MAX;

    /// Locates columns by header name. Fields missing from a recognised
    /// header read as empty; a header with no known names falls back to
    /// the positional default.
    pub fn from_header(header: &str) -> Self {
        let mut layout = Self {
            name: Self::ABSENT,
            email: Self::ABSENT,
            phone: Self::ABSENT,
            state: Self::ABSENT,
            study: Self::ABSENT,
            interests: Self::ABSENT,
            last_reminder: Self::ABSENT,
            follow_up: Self::ABSENT,
        };
        let mut matched = false;

        for (position, raw) in split_fields(header).into_iter().enumerate() {
            let key = raw.to_lowercase().replace(['-', '_'], " ");
            let slot = match key.as_str() {
                "name" | "full name" => &mut layout.name,
                "email" | "gmail address" | "email address" => &mut layout.email,
                "phone" | "phone number" => &mut layout.phone,
                "state" => &mut layout.state,
                "study" | "field of study" => &mut layout.study,
                "interest" | "interests" => &mut layout.interests,
                "last reminder" | "lastreminder" => &mut layout.last_reminder,
                "follow up" | "followup" => &mut layout.follow_up,
                _ => continue,
            };
            *slot = position;
            matched = true;
        }

        if matched {
            layout
        } else {
            Self::default()
        }
    }
}

/// Parses with the positional layout; the header line is skipped unread.
pub fn parse_records(raw: &str) -> Vec<Record> {
    parse_records_with(raw, &ColumnLayout::default())
}

pub fn parse_records_with(raw: &str, layout: &ColumnLayout) -> Vec<Record> {
    let records: Vec<Record> = raw
        .split('\n')
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| build_record(&split_fields(line), layout))
        .collect();

    debug!("Parsed {} registration records", records.len());
    records
}

/// Parses using a layout read from the input's own header line.
pub fn parse_records_by_header(raw: &str) -> Vec<Record> {
    let header = raw.split('\n').next().unwrap_or_default();
    parse_records_with(raw, &ColumnLayout::from_header(header))
}

/// Plain comma split. Quoted values containing commas are not rejoined.
fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(clean_value).collect()
}

fn clean_value(value: &str) -> String {
    let value = value.trim();
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    value.to_string()
}

fn build_record(values: &[String], layout: &ColumnLayout) -> Record {
    let at = |position: usize| values.get(position).cloned().unwrap_or_default();

    Record {
        name: at(layout.name),
        email: at(layout.email),
        phone: at(layout.phone),
        state: at(layout.state),
        study: at(layout.study),
        interests: at(layout.interests),
        last_reminder: at(layout.last_reminder),
        follow_up: at(layout.follow_up),
        timestamp: Utc::now(),
    }
}
