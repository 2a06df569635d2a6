//! Drift detection between two resolved token sets
//!
//! Computes the symmetric difference of the path sets, classifies each
//! modified value with type-aware heuristics, and returns an ordered
//! report with per-severity counts. Read-only: neither input graph is
//! touched, and the report is built fresh per run.

pub mod classify;
pub mod report;

use tracing::info;

use tokensmith_core::ResolvedGraph;

pub use classify::SeverityPolicy;
pub use report::{ChangeKind, ChangeRecord, ChangeSeverity, DriftReport, DriftSummary};

/// Diff `before` against `after` under the given severity policy.
pub fn diff(before: &ResolvedGraph, after: &ResolvedGraph, policy: &SeverityPolicy) -> DriftReport {
    let mut changes = Vec::new();

    // Both graphs iterate path-sorted, so a single ordered merge visits the
    // union of paths deterministically.
    for token in before.iter() {
        match after.get(&token.path) {
            None => {
                let (severity, reason) = match &token.deprecated {
                    Some(d) => (
                        ChangeSeverity::Major,
                        match &d.reason {
                            Some(reason) => format!("deprecated token removed ({reason})"),
                            None => "deprecated token removed".to_string(),
                        },
                    ),
                    None => (
                        ChangeSeverity::Major,
                        "token removed without prior deprecation".to_string(),
                    ),
                };
                changes.push(ChangeRecord {
                    path: token.path.clone(),
                    change_kind: ChangeKind::Removed,
                    old_value: Some(token.value.clone()),
                    new_value: None,
                    severity,
                    reason,
                });
            }
            Some(new_token) if new_token.value != token.value || new_token.ty != token.ty => {
                let (severity, mut reason) = policy.classify(token, new_token);
                // Aliases carry their chain so the report names the token
                // that actually moved.
                if new_token.chain.len() > 1 {
                    let via: Vec<String> = new_token.chain[1..]
                        .iter()
                        .map(ToString::to_string)
                        .collect();
                    reason.push_str(&format!(", resolved via {}", via.join(" -> ")));
                }
                changes.push(ChangeRecord {
                    path: token.path.clone(),
                    change_kind: ChangeKind::Modified,
                    old_value: Some(token.value.clone()),
                    new_value: Some(new_token.value.clone()),
                    severity,
                    reason,
                });
            }
            Some(_) => {}
        }
    }

    for token in after.iter() {
        if before.get(&token.path).is_none() {
            changes.push(ChangeRecord {
                path: token.path.clone(),
                change_kind: ChangeKind::Added,
                old_value: None,
                new_value: Some(token.value.clone()),
                severity: ChangeSeverity::Minor,
                reason: "new token".to_string(),
            });
        }
    }

    changes.sort_by(|a, b| a.path.cmp(&b.path));
    let report = DriftReport::new(changes);
    info!(
        major = report.summary.major,
        minor = report.summary.minor,
        patch = report.summary.patch,
        "drift computed"
    );
    report
}
