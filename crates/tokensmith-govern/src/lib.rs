//! Governance validation for tokensmith
//!
//! Checks a fully resolved token graph against the naming, typing,
//! namespacing, and collision rules before anything is emitted. Violations
//! accumulate into one [`GovernanceReport`]; the default policy is
//! all-or-nothing across targets: any error-severity violation blocks
//! emission for every target.

pub mod error;
pub mod report;
pub mod rules;

use tracing::info;

use tokensmith_core::{PlatformTarget, ResolvedGraph};

pub use error::GovernanceError;
pub use report::{GovernanceReport, RuleId, Severity, Violation};

/// Governance validator over a fixed target set.
pub struct Validator<'t> {
    targets: &'t [PlatformTarget],
}

impl<'t> Validator<'t> {
    pub fn new(targets: &'t [PlatformTarget]) -> Self {
        Self { targets }
    }

    /// Run every rule over every token and return the accumulated report.
    pub fn validate(&self, graph: &ResolvedGraph) -> GovernanceReport {
        let mut report = GovernanceReport::new();

        for token in graph.iter() {
            rules::check_naming(token, &mut report);
            rules::check_typing(token, &mut report);
            rules::check_namespacing(token, self.targets, &mut report);
            rules::check_units(token, self.targets, &mut report);
            rules::check_deprecation(token, &mut report);
        }
        rules::check_collisions(graph, self.targets, &mut report);

        info!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            "governance pass complete"
        );
        report
    }

    /// Validate and convert a blocking report into an error.
    pub fn enforce(&self, graph: &ResolvedGraph) -> Result<GovernanceReport, GovernanceError> {
        let report = self.validate(graph);
        if report.has_blocking() {
            return Err(GovernanceError::Blocked { report });
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tokensmith_core::graph::{Deprecation, ResolvedToken};
    use tokensmith_core::types::DimensionValue;
    use tokensmith_core::{
        IdentifierCase, OutputFormat, TokenPath, TokenType, TokenValue, UnitPolicy,
    };
    use tokensmith_core::target::UnitMapping;

    fn target(case: IdentifierCase) -> PlatformTarget {
        let mut unit_policy = UnitPolicy::default();
        unit_policy.units.insert(
            "px".to_string(),
            UnitMapping {
                factor: 1.0,
                to: "px".to_string(),
            },
        );
        PlatformTarget {
            name: format!("{case:?}").to_lowercase(),
            identifier_case: case,
            prefix: "ds".to_string(),
            output_format: OutputFormat::CustomProperties,
            unit_policy,
            output_location: PathBuf::from(format!("dist/{case:?}")),
        }
    }

    fn token(path: &str, value: TokenValue, ty: TokenType) -> ResolvedToken {
        ResolvedToken {
            path: TokenPath::parse(path).unwrap(),
            value,
            ty,
            chain: vec![TokenPath::parse(path).unwrap()],
            description: None,
            deprecated: None,
        }
    }

    fn px(path: &str, value: f64) -> ResolvedToken {
        token(
            path,
            TokenValue::Dimension(DimensionValue {
                value,
                unit: "px".to_string(),
            }),
            TokenType::Dimension,
        )
    }

    #[test]
    fn clean_graph_passes() {
        let mut graph = ResolvedGraph::new();
        graph.insert(px("spacing.md", 16.0));
        let targets = vec![target(IdentifierCase::Kebab)];
        let report = Validator::new(&targets).validate(&graph);
        assert!(report.is_clean(), "{report}");
    }

    #[test]
    fn bad_casing_is_flagged() {
        let mut graph = ResolvedGraph::new();
        graph.insert(px("Spacing.MD", 16.0));
        let targets = vec![target(IdentifierCase::Kebab)];
        let report = Validator::new(&targets).validate(&graph);
        let casing: Vec<_> = report
            .violations
            .iter()
            .filter(|v| v.rule_id == RuleId::InvalidKebabCase)
            .collect();
        assert_eq!(casing.len(), 2);
    }

    #[test]
    fn untyped_leaf_is_an_error() {
        let mut graph = ResolvedGraph::new();
        graph.insert(token(
            "legacy.value",
            TokenValue::Untyped("whatever".to_string()),
            TokenType::Untyped,
        ));
        let targets = vec![target(IdentifierCase::Kebab)];
        let report = Validator::new(&targets).validate(&graph);
        assert!(report
            .violations
            .iter()
            .any(|v| v.rule_id == RuleId::MissingType));
        assert!(report.has_blocking());
    }

    #[test]
    fn root_group_spelling_the_prefix_is_flagged() {
        let mut graph = ResolvedGraph::new();
        graph.insert(px("ds.spacing", 16.0));
        let targets = vec![target(IdentifierCase::Kebab)];
        let report = Validator::new(&targets).validate(&graph);

        let doubled: Vec<_> = report
            .violations
            .iter()
            .filter(|v| v.rule_id == RuleId::DoubledPrefix)
            .collect();
        assert_eq!(doubled.len(), 1);
        assert!(doubled[0].message.contains("ds-ds-spacing"));
        assert!(report.has_blocking());
    }

    #[test]
    fn unmapped_unit_is_an_error() {
        let mut graph = ResolvedGraph::new();
        graph.insert(token(
            "spacing.odd",
            TokenValue::Dimension(DimensionValue {
                value: 10.0,
                unit: "vh".to_string(),
            }),
            TokenType::Dimension,
        ));
        let targets = vec![target(IdentifierCase::Kebab)];
        let report = Validator::new(&targets).validate(&graph);
        assert!(report
            .violations
            .iter()
            .any(|v| v.rule_id == RuleId::UnitMismatch));
    }

    #[test]
    fn distinct_paths_colliding_after_transform_are_rejected() {
        // `color.primary-500` and `color.primary.500` both kebab-join to
        // ds-color-primary-500.
        let mut graph = ResolvedGraph::new();
        graph.insert(px("color.primary-500", 1.0));
        graph.insert(px("color.primary.500", 2.0));
        let targets = vec![target(IdentifierCase::Kebab)];
        let report = Validator::new(&targets).validate(&graph);

        let collisions: Vec<_> = report
            .violations
            .iter()
            .filter(|v| v.rule_id == RuleId::IdentifierCollision)
            .collect();
        assert_eq!(collisions.len(), 2);
        assert!(report.has_blocking());
    }

    #[test]
    fn deprecated_without_reason_is_a_warning_only() {
        let mut graph = ResolvedGraph::new();
        let mut t = px("spacing.old", 4.0);
        t.deprecated = Some(Deprecation { reason: None });
        graph.insert(t);
        let targets = vec![target(IdentifierCase::Kebab)];
        let report = Validator::new(&targets).validate(&graph);
        assert_eq!(report.warning_count(), 1);
        assert!(!report.has_blocking());
        assert!(Validator::new(&targets).enforce(&graph).is_ok());
    }

    #[test]
    fn enforce_returns_report_inside_error() {
        let mut graph = ResolvedGraph::new();
        graph.insert(token(
            "legacy.value",
            TokenValue::Untyped("x".to_string()),
            TokenType::Untyped,
        ));
        let targets = vec![target(IdentifierCase::Kebab)];
        match Validator::new(&targets).enforce(&graph) {
            Err(err) => assert!(err.report().has_blocking()),
            Ok(_) => panic!("expected governance to block"),
        }
    }
}
