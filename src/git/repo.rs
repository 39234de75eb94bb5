use crate::error::{RelstatError, Result};
use crate::git::RepoQuery;
use chrono::{DateTime, Utc};
use gix::Repository;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// How to invoke the git executable against one repository.
#[derive(Debug, Clone)]
pub struct GitBinding {
    pub program: OsString,
    pub git_dir: PathBuf,
}

impl GitBinding {
    pub fn new<P: AsRef<Path>>(git_dir: P) -> Self {
        Self {
            program: OsString::from("git"),
            git_dir: git_dir.as_ref().to_path_buf(),
        }
    }

    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        let mut git_dir = OsString::from("--git-dir=");
        git_dir.push(&self.git_dir);
        cmd.arg(git_dir);
        cmd
    }
}

pub struct GitRepo {
    repo: Repository,
    binding: GitBinding,
}

impl GitRepo {
    /// Open exactly the git directory the binding points at; parents are not searched.
    pub fn open(binding: GitBinding) -> Result<Self> {
        if !binding.git_dir.is_dir() {
            return Err(RelstatError::GitRepo(format!(
                "Wrong git directory '{}'",
                binding.git_dir.display()
            )));
        }
        let repo = gix::open(binding.git_dir.clone())?;
        let binding = GitBinding {
            git_dir: repo.path().to_path_buf(),
            ..binding
        };

        Ok(Self { repo, binding })
    }

    pub fn path(&self) -> &Path {
        &self.binding.git_dir
    }
}

impl RepoQuery for GitRepo {
    fn tag_names(&self) -> Result<Vec<String>> {
        let platform = self
            .repo
            .references()
            .map_err(|e| RelstatError::GitRepo(format!("Failed to read references: {e}")))?;
        let tags = platform
            .tags()
            .map_err(|e| RelstatError::GitRepo(format!("Failed to list tags: {e}")))?;

        let mut names = Vec::new();
        for tag in tags {
            let tag = tag.map_err(|e| RelstatError::GitRepo(format!("Failed to read tag: {e}")))?;
            names.push(tag.name().shorten().to_string());
        }
        Ok(names)
    }

    fn commit_time(&self, id: &str) -> Result<Option<DateTime<Utc>>> {
        let spec = format!("{id}^{{commit}}");
        let oid = match self.repo.rev_parse_single(spec.as_str()) {
            Ok(oid) => oid,
            Err(e) => {
                debug!(id, error = %e, "identifier does not resolve to a commit");
                return Ok(None);
            }
        };

        let commit = oid
            .object()
            .map_err(|e| RelstatError::GitRepo(format!("Failed to load '{id}': {e}")))?
            .try_into_commit()
            .map_err(|_| RelstatError::Parse(format!("Not a commit: {id}")))?;

        let secs = commit
            .time()
            .map_err(|e| RelstatError::GitRepo(format!("Failed to read commit time of '{id}': {e}")))?
            .seconds;
        DateTime::<Utc>::from_timestamp(secs, 0)
            .map(Some)
            .ok_or_else(|| RelstatError::InvalidDate(format!("Invalid timestamp: {secs}")))
    }

    fn shortstat(&self, baseline: &str, release: &str, paths: &[String]) -> Result<String> {
        let range = format!("{baseline}..{release}");
        let mut cmd = self.binding.command();
        cmd.args(["diff", "--shortstat", range.as_str()]);
        if !paths.is_empty() {
            cmd.arg("--").args(paths);
        }
        debug!(?cmd, "running shortstat");

        let output = cmd.output()?;
        if !output.status.success() {
            return Err(RelstatError::GitCommand(format!(
                "git diff --shortstat {range}: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
