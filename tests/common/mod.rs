#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use relstat::error::{RelstatError, Result};
use relstat::git::RepoQuery;
use relstat::model::{ChurnStat, ReleaseRecord};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory repository history.
#[derive(Default)]
pub struct MockRepo {
    tags: Vec<String>,
    times: HashMap<String, DateTime<Utc>>,
    summaries: HashMap<(String, String), String>,
    pub time_calls: Cell<usize>,
    pub shortstat_calls: Cell<usize>,
    pub last_paths: RefCell<Vec<String>>,
}

impl MockRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, name: &str, day: u32) -> Self {
        self.tags.push(name.to_string());
        self.times.insert(name.to_string(), day_of_2020(day));
        self
    }

    pub fn branch(mut self, name: &str, day: u32) -> Self {
        self.times.insert(name.to_string(), day_of_2020(day));
        self
    }

    pub fn summary(mut self, baseline: &str, release: &str, text: &str) -> Self {
        self.summaries
            .insert((baseline.to_string(), release.to_string()), text.to_string());
        self
    }
}

impl RepoQuery for MockRepo {
    fn tag_names(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn commit_time(&self, id: &str) -> Result<Option<DateTime<Utc>>> {
        self.time_calls.set(self.time_calls.get() + 1);
        Ok(self.times.get(id).copied())
    }

    fn shortstat(&self, baseline: &str, release: &str, paths: &[String]) -> Result<String> {
        self.shortstat_calls.set(self.shortstat_calls.get() + 1);
        *self.last_paths.borrow_mut() = paths.to_vec();
        self.summaries
            .get(&(baseline.to_string(), release.to_string()))
            .cloned()
            .ok_or_else(|| RelstatError::GitCommand(format!("unknown range {baseline}..{release}")))
    }
}

/// Midnight UTC on the given day of January 2020.
pub fn day_of_2020(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, day, 0, 0, 0).unwrap()
}

pub fn record(release: &str, baseline: &str, day: u32) -> ReleaseRecord {
    ReleaseRecord {
        release: release.to_string(),
        baseline: baseline.to_string(),
        committed_at: day_of_2020(day),
    }
}

pub fn diff_only(diff: u64) -> ChurnStat {
    ChurnStat::new(1, diff, 0)
}
