pub mod churn;
pub mod cli;
pub mod error;
pub mod exec;
pub mod git;
pub mod model;
pub mod output;
pub mod select;
pub mod shortstat;
pub mod util;
pub mod version;
