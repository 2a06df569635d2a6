//! Governance report: accumulated violations plus summary counts
//!
//! Machine-readable via serde; human-readable via Display. The caller
//! decides whether warning-only reports may proceed, but any error-severity
//! violation blocks emission.

use serde::{Deserialize, Serialize};
use std::fmt;

use tokensmith_core::TokenPath;

/// Stable rule identifiers, surfaced verbatim in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    InvalidKebabCase,
    DoubledPrefix,
    MissingType,
    UnitMismatch,
    IdentifierCollision,
    DeprecatedWithoutReason,
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            Self::InvalidKebabCase => "invalid-kebab-case",
            Self::DoubledPrefix => "doubled-prefix",
            Self::MissingType => "missing-type",
            Self::UnitMismatch => "unit-mismatch",
            Self::IdentifierCollision => "identifier-collision",
            Self::DeprecatedWithoutReason => "deprecated-without-reason",
        };
        write!(f, "{id}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub path: TokenPath,
    pub rule_id: RuleId,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "[{tag}] {} ({}): {}", self.path, self.rule_id, self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GovernanceReport {
    pub violations: Vec<Violation>,
}

impl GovernanceReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn error(
        &mut self,
        path: TokenPath,
        rule_id: RuleId,
        message: impl Into<String>,
    ) {
        self.push(Violation {
            path,
            rule_id,
            severity: Severity::Error,
            message: message.into(),
        });
    }

    pub fn warning(
        &mut self,
        path: TokenPath,
        rule_id: RuleId,
        message: impl Into<String>,
    ) {
        self.push(Violation {
            path,
            rule_id,
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    pub fn error_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count()
    }

    /// True when emission must not proceed.
    pub fn has_blocking(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for GovernanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return write!(f, "governance: clean");
        }
        writeln!(
            f,
            "governance: {} error(s), {} warning(s)",
            self.error_count(),
            self.warning_count()
        )?;
        for violation in &self.violations {
            writeln!(f, "  {violation}")?;
        }
        Ok(())
    }
}
