use crate::churn::ordinal;
use crate::model::{Aggregates, ChurnStat, RankingReport, RelstatOutput, ReleaseRecord, StatField, StatRow};
use anyhow::Result;
use console::style;

pub fn header_line() -> String {
    format!(
        "{:>22} {:>10} {:>10} {:>10} {:>10}",
        style("version").bold(),
        style("files").bold(),
        style("deletions").bold(),
        style("insertions").bold(),
        style("diff").bold()
    )
}

/// One table row; the label is `release(date)`, or just the date with `dateonly`.
pub fn row_line(record: &ReleaseRecord, stat: &ChurnStat, dateonly: bool) -> String {
    let date = record.committed_at.date_naive();
    let label = if dateonly {
        date.to_string()
    } else {
        format!("{}({})", record.release, date)
    };
    format!(
        "{:>22} {:>10} {:>10} {:>10} {:>10}",
        label,
        stat.changed_files,
        stat.deletions,
        stat.insertions,
        stat.diff()
    )
}

/// The `# avg`, `# min`, `# max` and `# total` rows.
pub fn aggregate_lines(aggregates: &Aggregates) -> Vec<String> {
    let order = [StatField::Files, StatField::Deletions, StatField::Insertions, StatField::Diff];
    let line = |label: &str, value: &dyn Fn(StatField) -> String| {
        let cols: Vec<String> = order.iter().map(|&f| format!("{:>10}", value(f))).collect();
        format!("{:>22} {}", label, cols.join(" "))
    };

    vec![
        line("# avg", &|f: StatField| format!("{:.0}", aggregates.field(f).average.round_ties_even())),
        line("# min", &|f: StatField| aggregates.field(f).min.to_string()),
        line("# max", &|f: StatField| aggregates.field(f).max.to_string()),
        line("# total", &|f: StatField| aggregates.field(f).total.to_string()),
    ]
}

pub fn report_lines(report: &RankingReport) -> Vec<String> {
    let mut lines = vec![format!(
        "# Among the {} releases, {} has",
        report.releases, report.release
    )];
    for ranking in &report.rankings {
        lines.push(format!(
            "#    {} smallest {}",
            ordinal(ranking.position),
            ranking.field.report_label()
        ));
    }
    lines
}

pub fn output_json(output: &RelstatOutput) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

pub fn output_ndjson(rows: &[StatRow]) -> Result<()> {
    for row in rows {
        println!("{}", serde_json::to_string(row)?);
    }
    Ok(())
}
