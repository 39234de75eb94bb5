pub mod query;
pub mod repo;

pub use query::{RepoQuery, TimestampCache};
pub use repo::{GitBinding, GitRepo};
