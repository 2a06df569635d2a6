//! Drift report: ordered change records plus per-severity summary counts

use serde::{Deserialize, Serialize};
use std::fmt;

use tokensmith_core::{TokenPath, TokenValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Removed => write!(f, "removed"),
            Self::Modified => write!(f, "modified"),
        }
    }
}

/// Release-gating severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeSeverity {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for ChangeSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub path: TokenPath,
    pub change_kind: ChangeKind,
    pub old_value: Option<TokenValue>,
    pub new_value: Option<TokenValue>,
    pub severity: ChangeSeverity,
    pub reason: String,
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.severity, self.change_kind, self.path, self.reason
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftSummary {
    pub major: usize,
    pub minor: usize,
    pub patch: usize,
}

/// The full diff between two resolved token sets, ordered by path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriftReport {
    pub changes: Vec<ChangeRecord>,
    pub summary: DriftSummary,
}

impl DriftReport {
    pub fn new(changes: Vec<ChangeRecord>) -> Self {
        let mut summary = DriftSummary::default();
        for change in &changes {
            match change.severity {
                ChangeSeverity::Major => summary.major += 1,
                ChangeSeverity::Minor => summary.minor += 1,
                ChangeSeverity::Patch => summary.patch += 1,
            }
        }
        Self { changes, summary }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Most severe change present, if any.
    pub fn max_severity(&self) -> Option<ChangeSeverity> {
        self.changes.iter().map(|c| c.severity).min()
    }
}

impl fmt::Display for DriftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.changes.is_empty() {
            return write!(f, "drift: no changes");
        }
        writeln!(
            f,
            "drift: {} major, {} minor, {} patch",
            self.summary.major, self.summary.minor, self.summary.patch
        )?;
        for change in &self.changes {
            writeln!(f, "  {change}")?;
        }
        Ok(())
    }
}
