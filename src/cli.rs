use crate::model::{DateRange, StatField};
use crate::select::{read_id_list, SelectOptions, VersionSource};
use crate::util::parse_date;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use std::path::PathBuf;

/// Discovery window used when `--since` is not given.
pub const DEFAULT_WINDOW_DAYS: i64 = 30 * 6;

#[derive(Parser, Debug, Clone)]
#[command(name = "relstat")]
#[command(about = "Code churn statistics between releases of a git repository")]
#[command(version)]
pub struct Cli {
    #[arg(long, value_name = "DIR", default_value = "./.git", help = "Git directory of the project")]
    pub gitdir: PathBuf,

    #[arg(long, value_name = "PROGRAM", default_value = "git", help = "git executable to run diffs with")]
    pub git_program: String,

    #[arg(long, value_name = "VERSION", num_args = 1.., help = "Versions to make stat for")]
    pub versions: Vec<String>,

    #[arg(long, alias = "versions_file", value_name = "FILE", help = "File containing the versions to make stat for")]
    pub versions_file: Option<PathBuf>,

    #[arg(long, alias = "base_versions", value_name = "VERSION", num_args = 1.., help = "Versions to use as baseline of the releases")]
    pub base_versions: Vec<String>,

    #[arg(long, alias = "base_versions_file", value_name = "FILE", help = "File containing the versions to use as the baselines")]
    pub base_versions_file: Option<PathBuf>,

    #[arg(long, value_name = "DATE", help = "Show stat of releases since this date (YYYY-MM-DD, RFC3339, or '<n> days ago')")]
    pub since: Option<String>,

    #[arg(long, value_name = "DATE", help = "Show stat of releases before this date (YYYY-MM-DD, RFC3339, or '<n> days ago')")]
    pub before: Option<String>,

    #[arg(long, alias = "extra_version", value_name = "NAME", help = "Show stat for specific extra versions only")]
    pub extra_version: Option<String>,

    #[arg(long, value_name = "MAJOR", help = "Show stat for stable releases of specific major version")]
    pub stables: Option<String>,

    #[arg(long, value_name = "BRANCH", default_value = "master", help = "Development head included in tag discovery")]
    pub head: String,

    #[arg(long, alias = "files_to_stat", value_name = "PATH", num_args = 1.., help = "Files and/or directories to make stat for")]
    pub files_to_stat: Vec<String>,

    #[arg(long, help = "Show release date only")]
    pub dateonly: bool,

    #[arg(long, alias = "report_for", value_name = "VERSION", help = "Print brief report for the version")]
    pub report_for: Option<String>,

    #[arg(long, value_enum, conflicts_with_all = ["json", "ndjson"], help = "Sort stat with the given key")]
    pub sortby: Option<StatField>,

    #[arg(long, conflicts_with_all = ["json", "ndjson"], help = "Print the first, self-baselined release as a zero row")]
    pub show_base: bool,

    #[arg(long, help = "Output as JSON", conflicts_with = "ndjson")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON")]
    pub ndjson: bool,

    #[arg(short, long, help = "Log diagnostics to stderr")]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::exec::exec(self)
    }

    /// Resolve the discovery window against `now`.
    pub fn date_range(&self, now: DateTime<Utc>) -> Result<DateRange> {
        let since = match &self.since {
            Some(s) => parse_date(s, now).context("Invalid --since")?,
            None => now - Duration::days(DEFAULT_WINDOW_DAYS),
        };
        let before = match &self.before {
            Some(b) => parse_date(b, now).context("Invalid --before")?,
            None => now,
        };
        if since > before {
            anyhow::bail!("Invalid range: since ({since}) is after before ({before})");
        }
        Ok(DateRange::new(since, before))
    }

    /// Read list files and assemble the selector configuration.
    pub fn select_options(&self, now: DateTime<Utc>) -> Result<SelectOptions> {
        let source = if !self.versions.is_empty() {
            VersionSource::Explicit(self.versions.clone())
        } else if let Some(path) = &self.versions_file {
            VersionSource::Explicit(read_id_list(path, "versions")?)
        } else {
            VersionSource::Discover {
                range: self.date_range(now)?,
                stables: self.stables.clone(),
                head: Some(self.head.clone()),
            }
        };

        let baselines = if !self.base_versions.is_empty() {
            Some(self.base_versions.clone())
        } else if let Some(path) = &self.base_versions_file {
            Some(read_id_list(path, "base versions")?)
        } else {
            None
        };

        Ok(SelectOptions {
            source,
            baselines,
            extra_version: self.extra_version.clone(),
        })
    }
}
