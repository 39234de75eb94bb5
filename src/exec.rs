use crate::churn::{aggregate, rank, ChurnAggregator};
use crate::cli::Cli;
use crate::git::{GitBinding, GitRepo};
use crate::model::{ChurnStat, RelstatOutput, ReleaseRecord, StatRow, SCHEMA_VERSION};
use crate::output::{aggregate_lines, header_line, output_json, output_ndjson, report_lines, row_line};
use crate::select::VersionSelector;
use anyhow::Context;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

pub fn exec(cli: Cli) -> anyhow::Result<()> {
    let now = Utc::now();
    let options = cli.select_options(now).context("Failed to read configuration")?;

    let binding = GitBinding::new(&cli.gitdir).with_program(cli.git_program.as_str());
    let repo = GitRepo::open(binding).context("Failed to open git repository")?;

    let records = VersionSelector::new(&repo)
        .select(&options)
        .context("Failed to select releases")?;
    info!(releases = records.len(), "selected releases");

    let table = !cli.json && !cli.ndjson;
    if table {
        println!("{}", header_line());
    }

    let pb = if table && !records.is_empty() {
        let pb = ProgressBar::new(records.len() as u64);
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{pos}/{len}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Computing diffs...");
        pb
    } else {
        ProgressBar::hidden()
    };

    // Rows held back for --sortby; printed immediately otherwise.
    let mut printed: Vec<(ReleaseRecord, ChurnStat)> = Vec::new();
    let aggregator = ChurnAggregator::new(&repo, cli.files_to_stat.clone());
    let stats = aggregator
        .collect(&records, |record, stat| {
            pb.inc(1);
            let stat = match stat {
                Some(stat) => *stat,
                None if cli.show_base => ChurnStat::default(),
                None => return Ok(()),
            };
            if !table {
                return Ok(());
            }
            if cli.sortby.is_some() {
                printed.push((record.clone(), stat));
            } else {
                pb.suspend(|| println!("{}", row_line(record, &stat, cli.dateonly)));
            }
            Ok(())
        })
        .context("Failed to compute release statistics")?;
    pb.finish_and_clear();

    let aggregates = aggregate(&stats);
    let report = cli.report_for.as_deref().and_then(|release| rank(&stats, release));

    if cli.json {
        let output = RelstatOutput {
            version: SCHEMA_VERSION,
            generated_at: now,
            repository_path: repo.path().to_string_lossy().to_string(),
            since: cli.since.clone(),
            before: cli.before.clone(),
            rows: stats.entries().iter().map(StatRow::from).collect(),
            aggregates,
            report,
        };
        return output_json(&output);
    }
    if cli.ndjson {
        let rows: Vec<StatRow> = stats.entries().iter().map(StatRow::from).collect();
        return output_ndjson(&rows);
    }

    if let Some(field) = cli.sortby {
        printed.sort_by_key(|(_, stat)| stat.field(field));
        for (record, stat) in &printed {
            println!("{}", row_line(record, stat, cli.dateonly));
        }
    }

    // Nothing was diffed: no summary to print.
    let Some(aggregates) = aggregates else {
        return Ok(());
    };
    for line in aggregate_lines(&aggregates) {
        println!("{line}");
    }
    if let Some(report) = report {
        for line in report_lines(&report) {
            println!("{line}");
        }
    }

    Ok(())
}
