//! The governance rule set
//!
//! Rules are independent, pure predicates over one resolved token plus
//! read-only access to the whole graph and the configured target set.
//! Violations accumulate; nothing short-circuits, so one run reports
//! everything that is wrong.

use std::collections::BTreeMap;

use tokensmith_core::naming::is_kebab_segment;
use tokensmith_core::{PlatformTarget, ResolvedGraph, ResolvedToken, TokenType, TokenValue};

use crate::report::{GovernanceReport, RuleId};

/// Naming: every path segment follows the lowercase-kebab convention.
pub fn check_naming(token: &ResolvedToken, report: &mut GovernanceReport) {
    for segment in token.path.segments() {
        if !is_kebab_segment(segment) {
            report.error(
                token.path.clone(),
                RuleId::InvalidKebabCase,
                format!("segment {segment:?} is not lowercase-kebab"),
            );
        }
    }
}

/// Typing: every leaf must carry a resolved type.
pub fn check_typing(token: &ResolvedToken, report: &mut GovernanceReport) {
    if token.ty == TokenType::Untyped {
        report.error(
            token.path.clone(),
            RuleId::MissingType,
            "leaf has a $value but no $type, and none could be inferred",
        );
    }
}

/// Namespacing: the reserved prefix is prepended during emission, so a raw
/// root group that already spells it would come out doubled (`ds-ds-color`).
/// Checked by simulating each target's transform on the root segment.
pub fn check_namespacing(
    token: &ResolvedToken,
    targets: &[PlatformTarget],
    report: &mut GovernanceReport,
) {
    let root = token.path.root_group();
    for target in targets {
        if target.identifier_case.apply(&[root]) == target.cased_prefix() {
            report.error(
                token.path.clone(),
                RuleId::DoubledPrefix,
                format!(
                    "root group {root:?} repeats the {:?} namespace for target {:?}; the emitted identifier would be {:?}",
                    target.prefix,
                    target.name,
                    target.identifier(&token.path)
                ),
            );
        }
    }
}

/// Unit coverage: every dimension unit in the graph must be mapped by every
/// target's conversion table, otherwise emission would hard-fail later.
pub fn check_units(
    token: &ResolvedToken,
    targets: &[PlatformTarget],
    report: &mut GovernanceReport,
) {
    let unit = match &token.value {
        TokenValue::Dimension(d) => &d.unit,
        _ => return,
    };
    for target in targets {
        if !target.unit_policy.supports(unit) {
            report.error(
                token.path.clone(),
                RuleId::UnitMismatch,
                format!(
                    "unit {unit:?} has no conversion mapping for target {:?}",
                    target.name
                ),
            );
        }
    }
}

/// Deprecation hygiene: a deprecation without a reason is accepted but
/// flagged so the report can prompt for one.
pub fn check_deprecation(token: &ResolvedToken, report: &mut GovernanceReport) {
    if let Some(deprecation) = &token.deprecated {
        if deprecation.reason.is_none() {
            report.warning(
                token.path.clone(),
                RuleId::DeprecatedWithoutReason,
                "deprecated without a reason",
            );
        }
    }
}

/// Collision: no two distinct paths may produce the same emitted identifier
/// under any single target's transform.
pub fn check_collisions(
    graph: &ResolvedGraph,
    targets: &[PlatformTarget],
    report: &mut GovernanceReport,
) {
    for target in targets {
        let mut by_identifier: BTreeMap<String, Vec<&ResolvedToken>> = BTreeMap::new();
        for token in graph.iter() {
            by_identifier
                .entry(target.identifier(&token.path))
                .or_default()
                .push(token);
        }
        for (identifier, tokens) in by_identifier {
            if tokens.len() < 2 {
                continue;
            }
            let paths: Vec<String> = tokens.iter().map(|t| t.path.to_string()).collect();
            for token in tokens {
                report.error(
                    token.path.clone(),
                    RuleId::IdentifierCollision,
                    format!(
                        "identifier {identifier:?} for target {:?} is also produced by: {}",
                        target.name,
                        paths
                            .iter()
                            .filter(|p| **p != token.path.to_string())
                            .cloned()
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                );
            }
        }
    }
}
