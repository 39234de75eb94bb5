use thiserror::Error;

pub type Result<T> = std::result::Result<T, RelstatError>;

#[derive(Error, Debug)]
pub enum RelstatError {
    #[error("Git error: {0}")]
    Git(#[from] Box<gix::open::Error>),
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("Git command failed: {0}")]
    GitCommand(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Wrong {kind} file '{path}': {source}")]
    VersionsFile {
        kind: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("len(base_versions) != len(versions): {baselines} != {releases}")]
    BaselineCount { baselines: usize, releases: usize },
}

// Manual From implementation for unboxed to boxed conversion
impl From<gix::open::Error> for RelstatError {
    fn from(err: gix::open::Error) -> Self {
        RelstatError::Git(Box::new(err))
    }
}
