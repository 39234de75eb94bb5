// e.g. "127 files changed, 7926 insertions(+), 3954 deletions(-)"; git omits zero-count clauses.

use crate::error::{RelstatError, Result};
use crate::model::ChurnStat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clause {
    Files,
    Insertions,
    Deletions,
    Done,
}

impl Clause {
    fn matches(self, keyword: &str) -> bool {
        match self {
            Clause::Files => keyword == "file changed" || keyword == "files changed",
            Clause::Insertions => keyword.starts_with("insertion"),
            Clause::Deletions => keyword.starts_with("deletion"),
            Clause::Done => false,
        }
    }

    fn next(self) -> Clause {
        match self {
            Clause::Files => Clause::Insertions,
            Clause::Insertions => Clause::Deletions,
            Clause::Deletions | Clause::Done => Clause::Done,
        }
    }
}

pub fn parse(summary: &str) -> Result<ChurnStat> {
    let mut stat = ChurnStat::default();
    let mut state = Clause::Files;

    for clause in summary.trim().split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let (count, keyword) = clause
            .split_once(' ')
            .ok_or_else(|| RelstatError::Parse(format!("Malformed shortstat clause '{clause}'")))?;
        let count: u64 = count
            .parse()
            .map_err(|e| RelstatError::Parse(format!("Bad count in '{clause}': {e}")))?;
        let keyword = keyword.trim();

        // Skip forward over omitted clauses until one expects this keyword.
        while state != Clause::Done && !state.matches(keyword) {
            state = state.next();
        }
        match state {
            Clause::Files => stat.changed_files = count,
            Clause::Insertions => stat.insertions = count,
            Clause::Deletions => stat.deletions = count,
            Clause::Done => {
                return Err(RelstatError::Parse(format!(
                    "Unexpected shortstat clause '{clause}' in '{summary}'"
                )))
            }
        }
        state = state.next();
    }

    Ok(stat)
}
