use crate::error::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

/// Read access to the repository history needed to build release statistics.
pub trait RepoQuery {
    /// Short names of every tag in the repository.
    fn tag_names(&self) -> Result<Vec<String>>;

    /// Commit time of the commit `id` points at, or `None` if it names no commit.
    fn commit_time(&self, id: &str) -> Result<Option<DateTime<Utc>>>;

    /// `git diff --shortstat` text for `baseline..release`, limited to `paths` if non-empty.
    fn shortstat(&self, baseline: &str, release: &str, paths: &[String]) -> Result<String>;
}

impl<Q: RepoQuery + ?Sized> RepoQuery for &Q {
    fn tag_names(&self) -> Result<Vec<String>> {
        (**self).tag_names()
    }

    fn commit_time(&self, id: &str) -> Result<Option<DateTime<Utc>>> {
        (**self).commit_time(id)
    }

    fn shortstat(&self, baseline: &str, release: &str, paths: &[String]) -> Result<String> {
        (**self).shortstat(baseline, release, paths)
    }
}

/// Resolves each identifier at most once per run.
#[derive(Debug, Default)]
pub struct TimestampCache {
    times: HashMap<String, Option<DateTime<Utc>>>,
}

impl TimestampCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<Q: RepoQuery>(&mut self, repo: &Q, id: &str) -> Result<Option<DateTime<Utc>>> {
        if let Some(time) = self.times.get(id) {
            return Ok(*time);
        }
        let time = repo.commit_time(id)?;
        debug!(id, ?time, "resolved commit time");
        self.times.insert(id.to_string(), time);
        Ok(time)
    }
}
