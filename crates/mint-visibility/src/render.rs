//! Markdown rendering of the monthly summary
//!
//! A pure function from the aggregated report to a fixed-layout pipe table;
//! nothing here touches the underlying rows.

use crate::summary::{StatPoint, SummaryReport};

/// Render a summary report as a markdown table
///
/// One table row per summary row, in report order. The brand cell is
/// blanked when it is exactly equal to the previous row's brand; this is a
/// presentation affordance only, the rows keep their brand values. Failed
/// rows render `-` for score and samples with the `unknown` status.
pub fn render_summary(report: &SummaryReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Monthly visibility summary: {} to {} ({} topics)\n\n",
        report.start_date,
        report.end_date,
        report.rows.len()
    ));

    output.push_str("| Brand | Topic | Avg score | Status | Samples |\n");
    output.push_str("| --- | --- | --- | --- | --- |\n");

    let mut previous_brand: Option<&str> = None;
    for row in &report.rows {
        let brand = if previous_brand == Some(row.brand.as_str()) {
            ""
        } else {
            row.brand.as_str()
        };
        previous_brand = Some(row.brand.as_str());

        let (score, samples) = match row.average_score {
            Some(score) => (format!("{score:.2}"), row.sample_count.to_string()),
            None => ("-".to_string(), "-".to_string()),
        };

        output.push_str(&format!(
            "| {brand} | {} | {score} | {} | {samples} |\n",
            row.topic,
            row.status.as_str()
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "Mean score: {} | Best: {} | Worst: {}\n",
        report
            .mean_score
            .map_or_else(|| "-".to_string(), |mean| format!("{mean:.2}")),
        stat_label(report.best.as_ref()),
        stat_label(report.worst.as_ref()),
    ));

    output
}

fn stat_label(stat: Option<&StatPoint>) -> String {
    match stat {
        Some(point) => format!(
            "{} > {} ({:.2})",
            point.brand, point.topic, point.average_score
        ),
        None => "-".to_string(),
    }
}
