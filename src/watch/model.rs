use serde::{Deserialize, Serialize};

/// One judged run as listed on the contest's "my submissions" page.
///
/// Every field is the cell's display text. The page layout is not a stable
/// format, so parsing times, memory or verdicts is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub submitted_at: String,
    pub problem_name: String,
    pub language: String,
    /// Raw `waiting` attribute of the verdict cell: `"true"`, `"false"` or `""`.
    pub is_pending: String,
    pub verdict: String,
    pub exec_time: String,
    pub memory_used: String,
}

impl Submission {
    /// Whether the judge is still working on this run.
    pub fn is_waiting(&self) -> bool {
        self.is_pending == "true"
    }
}

/// Solve status of one problem on the contest dashboard, as seen by the
/// session that fetched it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub name: String,
    /// The row's `class` attribute, e.g. `"accepted-problem"`, or `""`.
    pub status: String,
    pub solved_count: String,
}

impl Problem {
    pub fn is_accepted(&self) -> bool {
        self.status
            .split_whitespace()
            .any(|class| class.starts_with("accepted"))
    }
}
