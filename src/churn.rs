use crate::error::Result;
use crate::git::RepoQuery;
use crate::model::{
    Aggregates, ChurnStat, FieldSummary, Ranking, RankingReport, ReleaseRecord, StatCollection,
    StatField,
};
use crate::shortstat;
use tracing::debug;

/// Computes per-release churn against each release's baseline.
pub struct ChurnAggregator<Q> {
    repo: Q,
    paths: Vec<String>,
}

impl<Q: RepoQuery> ChurnAggregator<Q> {
    /// `paths` limits every diff to those files and directories; empty means the whole tree.
    pub fn new(repo: Q, paths: Vec<String>) -> Self {
        Self { repo, paths }
    }

    pub fn stat(&self, record: &ReleaseRecord) -> Result<ChurnStat> {
        let summary = self
            .repo
            .shortstat(&record.baseline, &record.release, &self.paths)?;
        let stat = shortstat::parse(&summary)?;
        debug!(release = %record.release, baseline = %record.baseline, ?stat, "computed churn");
        Ok(stat)
    }

    /// `on_row` sees each record as soon as it is diffed, with `None` for a skipped
    /// self-baselined record. The first failing diff aborts the run.
    pub fn collect<F>(&self, records: &[ReleaseRecord], mut on_row: F) -> Result<StatCollection>
    where
        F: FnMut(&ReleaseRecord, Option<&ChurnStat>) -> Result<()>,
    {
        let mut stats = StatCollection::new();
        for record in records {
            if record.is_self_baselined() {
                on_row(record, None)?;
                continue;
            }
            let stat = self.stat(record)?;
            on_row(record, Some(&stat))?;
            stats.insert(record.clone(), stat);
        }
        Ok(stats)
    }
}

pub fn aggregate(stats: &StatCollection) -> Option<Aggregates> {
    if stats.is_empty() {
        return None;
    }
    let summary = |field: StatField| {
        let values = stats.entries().iter().map(|e| e.stat.field(field));
        let total: u64 = values.clone().sum();
        FieldSummary {
            average: total as f64 / stats.len() as f64,
            min: values.clone().min().unwrap_or(0),
            max: values.max().unwrap_or(0),
            total,
        }
    };

    Some(Aggregates {
        files: summary(StatField::Files),
        insertions: summary(StatField::Insertions),
        deletions: summary(StatField::Deletions),
        diff: summary(StatField::Diff),
    })
}

/// Where `release` places, smallest first, for each field. Equal values keep insertion order.
pub fn rank(stats: &StatCollection, release: &str) -> Option<RankingReport> {
    let target = stats.position(release)?;
    let rankings = StatField::ALL
        .iter()
        .map(|&field| {
            let order = sorted_positions(stats, field);
            let position = order.iter().position(|&i| i == target).unwrap_or(target) + 1;
            Ranking { field, position }
        })
        .collect();

    Some(RankingReport {
        release: release.to_string(),
        releases: stats.len(),
        rankings,
    })
}

pub fn sorted_positions(stats: &StatCollection, field: StatField) -> Vec<usize> {
    let entries = stats.entries();
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by_key(|&i| entries[i].stat.field(field));
    order
}

pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
