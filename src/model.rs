use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SCHEMA_VERSION: u32 = 1;

/// A tag or branch name resolvable to a single commit.
pub type ReleaseId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub release: ReleaseId,
    pub baseline: ReleaseId,
    pub committed_at: DateTime<Utc>,
}

impl ReleaseRecord {
    pub fn is_self_baselined(&self) -> bool {
        self.release == self.baseline
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnStat {
    pub changed_files: u64,
    pub insertions: u64,
    pub deletions: u64,
}

impl ChurnStat {
    pub fn new(changed_files: u64, insertions: u64, deletions: u64) -> Self {
        Self {
            changed_files,
            insertions,
            deletions,
        }
    }

    pub fn diff(&self) -> u64 {
        self.insertions + self.deletions
    }

    pub fn field(&self, key: StatField) -> u64 {
        match key {
            StatField::Files => self.changed_files,
            StatField::Insertions => self.insertions,
            StatField::Deletions => self.deletions,
            StatField::Diff => self.diff(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatField {
    Files,
    Insertions,
    Deletions,
    Diff,
}

impl StatField {
    pub const ALL: [StatField; 4] = [
        StatField::Files,
        StatField::Insertions,
        StatField::Deletions,
        StatField::Diff,
    ];

    pub fn report_label(self) -> &'static str {
        match self {
            StatField::Files => "file changes",
            StatField::Insertions => "insertions",
            StatField::Deletions => "deletions",
            StatField::Diff => "diffs",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatEntry {
    pub record: ReleaseRecord,
    pub stat: ChurnStat,
}

/// Churn statistics keyed by release, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct StatCollection {
    entries: Vec<StatEntry>,
    index: HashMap<ReleaseId, usize>,
}

impl StatCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: ReleaseRecord, stat: ChurnStat) {
        match self.index.get(&record.release) {
            Some(&i) => self.entries[i] = StatEntry { record, stat },
            None => {
                self.index.insert(record.release.clone(), self.entries.len());
                self.entries.push(StatEntry { record, stat });
            }
        }
    }

    pub fn position(&self, release: &str) -> Option<usize> {
        self.index.get(release).copied()
    }

    pub fn entries(&self) -> &[StatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    pub average: f64,
    pub min: u64,
    pub max: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    pub files: FieldSummary,
    pub insertions: FieldSummary,
    pub deletions: FieldSummary,
    pub diff: FieldSummary,
}

impl Aggregates {
    pub fn field(&self, key: StatField) -> &FieldSummary {
        match key {
            StatField::Files => &self.files,
            StatField::Insertions => &self.insertions,
            StatField::Deletions => &self.deletions,
            StatField::Diff => &self.diff,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub field: StatField,
    /// 1-based position when sorted ascending.
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingReport {
    pub release: ReleaseId,
    pub releases: usize,
    pub rankings: Vec<Ranking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatRow {
    pub release: ReleaseId,
    pub baseline: ReleaseId,
    pub committed_at: DateTime<Utc>,
    pub changed_files: u64,
    pub insertions: u64,
    pub deletions: u64,
    pub diff: u64,
}

impl From<&StatEntry> for StatRow {
    fn from(entry: &StatEntry) -> Self {
        Self {
            release: entry.record.release.clone(),
            baseline: entry.record.baseline.clone(),
            committed_at: entry.record.committed_at,
            changed_files: entry.stat.changed_files,
            insertions: entry.stat.insertions,
            deletions: entry.stat.deletions,
            diff: entry.stat.diff(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelstatOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: Option<String>,
    pub before: Option<String>,
    pub rows: Vec<StatRow>,
    pub aggregates: Option<Aggregates>,
    pub report: Option<RankingReport>,
}

/// Discovery window; both bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub since: DateTime<Utc>,
    pub before: DateTime<Utc>,
}

impl DateRange {
    pub fn new(since: DateTime<Utc>, before: DateTime<Utc>) -> Self {
        Self { since, before }
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        timestamp > &self.since && timestamp < &self.before
    }
}
