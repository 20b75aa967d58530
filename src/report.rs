use std::fmt::Write;

use crate::models::{ChartEntry, Record, Snapshot};

pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Bar width for the largest count in a series.
const BAR_WIDTH: usize = 30;

pub fn build_report(source: &str, snapshot: &Snapshot, recent_limit: usize) -> String {
    let summary = &snapshot.summary;
    let mut output = String::new();

    let _ = writeln!(output, "# Registration Analytics");
    let _ = writeln!(output, "Generated from {}", source);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    let _ = writeln!(output, "- Total registrations: {}", summary.total);
    let _ = writeln!(output, "- Top state: {}", summary.top_state);
    let _ = writeln!(output, "- Top interest: {}", summary.top_interest);
    let _ = writeln!(output, "- Top field of study: {}", summary.top_study);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Registrations by State");
    write_series(&mut output, &snapshot.region_series);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Fields of Study");
    write_series(&mut output, &snapshot.study_series);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Interests");
    write_series(&mut output, &snapshot.interest_series);

    let engagement = &snapshot.engagement;
    let _ = writeln!(output);
    let _ = writeln!(output, "## Engagement");
    let _ = writeln!(
        output,
        "- {} of {} registrations followed up ({:.0}%)",
        engagement.with_follow_up,
        engagement.total,
        engagement.follow_up_rate() * 100.0
    );

    if recent_limit > 0 {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Recent Registrations");
        output.push_str(&recent_table(&snapshot.records, recent_limit));
    }

    output
}

fn write_series(output: &mut String, series: &[ChartEntry]) {
    let Some(max) = series.iter().map(|entry| entry.count).max() else {
        let _ = writeln!(output, "No registrations recorded.");
        return;
    };

    for entry in series {
        let width = (entry.count * BAR_WIDTH).div_ceil(max);
        let _ = writeln!(
            output,
            "- {:<20} {:>4} {}",
            entry.label,
            entry.count,
            "#".repeat(width)
        );
    }
}

/// First `limit` records in source order. State is shown as entered.
pub fn recent_table(records: &[Record], limit: usize) -> String {
    let mut output = String::new();

    if records.is_empty() {
        let _ = writeln!(output, "No registrations recorded.");
        return output;
    }

    let _ = writeln!(output, "| Name | Email | State | Field of Study | Interest |");
    let _ = writeln!(output, "| --- | --- | --- | --- | --- |");
    for record in records.iter().take(limit) {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {} |",
            record.name, record.email, record.state, record.study, record.interests
        );
    }

    output
}

pub fn to_json(snapshot: &Snapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

pub fn write_series_csv<W: std::io::Write>(writer: W, series: &[ChartEntry]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["label", "count"])?;
    for entry in series {
        writer.serialize((&entry.label, entry.count))?;
    }
    writer.flush()?;
    Ok(())
}
