use crate::error::{RelstatError, Result};
use crate::git::{RepoQuery, TimestampCache};
use crate::model::{DateRange, ReleaseId, ReleaseRecord};
use crate::version::{self, ParsedVersion};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum VersionSource {
    Explicit(Vec<ReleaseId>),
    /// Tags committed inside `range`.
    Discover {
        range: DateRange,
        /// Major version whose `<major>.<n>` stable tags are wanted.
        stables: Option<String>,
        head: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct SelectOptions {
    pub source: VersionSource,
    /// One baseline per selected release, in chronological release order.
    pub baselines: Option<Vec<ReleaseId>>,
    pub extra_version: Option<String>,
}

pub struct VersionSelector<Q> {
    repo: Q,
    times: TimestampCache,
}

impl<Q: RepoQuery> VersionSelector<Q> {
    pub fn new(repo: Q) -> Self {
        Self {
            repo,
            times: TimestampCache::new(),
        }
    }

    /// Build the ordered release records to analyze.
    pub fn select(&mut self, opts: &SelectOptions) -> Result<Vec<ReleaseRecord>> {
        let candidates = match &opts.source {
            VersionSource::Explicit(ids) => ids.clone(),
            VersionSource::Discover { range, stables, head } => {
                self.discover(range, stables.as_deref(), head.as_deref())?
            }
        };

        let mut releases = self.resolve(candidates)?;
        releases.sort_by(|(a, a_time), (b, b_time)| {
            a_time.cmp(b_time).then_with(|| version_order(a, b))
        });
        if releases.is_empty() {
            info!("no releases to analyze");
            return Ok(Vec::new());
        }

        let baselines = match &opts.baselines {
            Some(baselines) => {
                if baselines.len() != releases.len() {
                    return Err(RelstatError::BaselineCount {
                        baselines: baselines.len(),
                        releases: releases.len(),
                    });
                }
                baselines.clone()
            }
            None => default_baselines(&releases),
        };

        let records = releases
            .into_iter()
            .zip(baselines)
            .map(|((release, committed_at), baseline)| ReleaseRecord {
                release,
                baseline,
                committed_at,
            })
            .filter(|record| match &opts.extra_version {
                Some(extra) => version::extra_version(&record.release) == Some(extra.as_str()),
                None => true,
            })
            .collect();
        Ok(records)
    }

    /// Tags matching the release grammar and committed strictly inside `range`.
    pub fn discover(
        &mut self,
        range: &DateRange,
        stables: Option<&str>,
        head: Option<&str>,
    ) -> Result<Vec<ReleaseId>> {
        let mut found = Vec::new();
        for tag in self.repo.tag_names()? {
            let well_formed = match stables {
                Some(major) => version::parse_stable(&tag, major).is_some(),
                None => ParsedVersion::parse(&tag).is_some(),
            };
            if !well_formed {
                debug!(tag = %tag, "skipping tag outside the release grammar");
                continue;
            }
            if self.committed_within(&tag, range)? {
                found.push(tag);
            }
        }

        if stables.is_none() {
            if let Some(head) = head {
                if self.committed_within(head, range)? {
                    found.push(head.to_string());
                }
            }
        }

        debug!(count = found.len(), "discovered releases");
        Ok(found)
    }

    fn committed_within(&mut self, id: &str, range: &DateRange) -> Result<bool> {
        Ok(self
            .times
            .get(&self.repo, id)?
            .map(|time| range.contains(&time))
            .unwrap_or(false))
    }

    // Drops identifiers that do not name a commit.
    fn resolve(&mut self, ids: Vec<ReleaseId>) -> Result<Vec<(ReleaseId, DateTime<Utc>)>> {
        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            match self.times.get(&self.repo, &id)? {
                Some(time) => resolved.push((id, time)),
                None => debug!(id = %id, "dropping unresolvable release"),
            }
        }
        Ok(resolved)
    }
}

// Same-commit tie-break: release tags in version order, then everything else in input order.
fn version_order(a: &str, b: &str) -> Ordering {
    match (ParsedVersion::parse(a), ParsedVersion::parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Each release is measured from its predecessor; the first one from itself.
fn default_baselines(releases: &[(ReleaseId, DateTime<Utc>)]) -> Vec<ReleaseId> {
    releases
        .iter()
        .enumerate()
        .map(|(i, _)| releases[i.saturating_sub(1)].0.clone())
        .collect()
}

/// Read identifiers from a file, one per line. Blank lines are ignored.
pub fn read_id_list<P: AsRef<Path>>(path: P, kind: &'static str) -> Result<Vec<ReleaseId>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| RelstatError::VersionsFile {
        kind,
        path: path.display().to_string(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
