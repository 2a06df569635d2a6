use thiserror::Error;

use crate::report::GovernanceReport;

/// Aggregate failure carrying the complete report: individual violations
/// never abort the run, only the final error-severity tally does.
#[derive(Error, Debug)]
pub enum GovernanceError {
    #[error("governance failed: {} blocking violation(s)", report.error_count())]
    Blocked { report: GovernanceReport },
}

impl GovernanceError {
    pub fn report(&self) -> &GovernanceReport {
        match self {
            Self::Blocked { report } => report,
        }
    }
}
