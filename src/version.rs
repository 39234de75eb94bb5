use std::cmp::Ordering;

/// Release candidate numbers at or above this are treated as malformed tags.
pub const MAX_RC: u64 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Candidate(u64),
    Final,
}

impl Ord for Stage {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Stage::Candidate(a), Stage::Candidate(b)) => a.cmp(b),
            (Stage::Candidate(_), Stage::Final) => Ordering::Less,
            (Stage::Final, Stage::Candidate(_)) => Ordering::Greater,
            (Stage::Final, Stage::Final) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Stage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A tag of the form `v<major>.<minor>[-rc<n>]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParsedVersion {
    pub major: u64,
    pub minor: u64,
    pub stage: Stage,
}

impl ParsedVersion {
    pub fn parse(tag: &str) -> Option<Self> {
        let rest = tag.strip_prefix('v')?;
        let (major, rest) = rest.split_once('.')?;
        let (minor, stage) = match rest.split_once("-rc") {
            Some((minor, rc)) => {
                let rc = parse_number(rc)?;
                if rc >= MAX_RC {
                    return None;
                }
                (minor, Stage::Candidate(rc))
            }
            None => (rest, Stage::Final),
        };

        Some(Self {
            major: parse_number(major)?,
            minor: parse_number(minor)?,
            stage,
        })
    }
}

/// Parse a stable release tag `<major>.<n>` belonging to `major`, returning `n`.
pub fn parse_stable(tag: &str, major: &str) -> Option<u64> {
    let rest = tag.strip_prefix(major)?.strip_prefix('.')?;
    parse_number(rest)
}

pub fn extra_version(id: &str) -> Option<&str> {
    id.split('-').nth(1)
}

fn parse_number(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
