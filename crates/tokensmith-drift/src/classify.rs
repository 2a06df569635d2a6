//! Type-aware severity classification for modified tokens
//!
//! The numeric cutoffs are policy, not contract: they ship with defaults
//! but are configurable, since different teams gate releases differently.

use serde::{Deserialize, Serialize};

use tokensmith_core::graph::ResolvedToken;
use tokensmith_core::types::format_number;
use tokensmith_core::TokenValue;

use crate::report::ChangeSeverity;

/// Configurable thresholds for the classification heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeverityPolicy {
    /// Circular hue delta (degrees) above which a color change is major.
    pub color_hue_major: f64,
    /// Lightness delta (0..1) above which a color change is major.
    pub color_lightness_major: f64,
    /// Relative dimension change (percent) at or above which: major.
    pub dimension_major_pct: f64,
    /// Relative dimension change (percent) at or above which: minor.
    pub dimension_minor_pct: f64,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self {
            color_hue_major: 30.0,
            color_lightness_major: 0.25,
            dimension_major_pct: 25.0,
            dimension_minor_pct: 5.0,
        }
    }
}

impl SeverityPolicy {
    /// Classify a modified token. The declared-type check runs first: a
    /// type change is always major, regardless of the values.
    pub fn classify(
        &self,
        before: &ResolvedToken,
        after: &ResolvedToken,
    ) -> (ChangeSeverity, String) {
        if before.ty != after.ty {
            return (
                ChangeSeverity::Major,
                format!("type changed from {} to {}", before.ty, after.ty),
            );
        }

        match (&before.value, &after.value) {
            (TokenValue::Color(old), TokenValue::Color(new)) => {
                let (h1, _, l1) = old.to_hsl();
                let (h2, _, l2) = new.to_hsl();
                let hue_delta = circular_delta(h1, h2);
                let lightness_delta = (l1 - l2).abs();
                if hue_delta > self.color_hue_major || lightness_delta > self.color_lightness_major
                {
                    (
                        ChangeSeverity::Major,
                        format!(
                            "color shifted by {}deg hue / {} lightness",
                            format_number(round2(hue_delta)),
                            format_number(round2(lightness_delta))
                        ),
                    )
                } else {
                    (
                        ChangeSeverity::Minor,
                        format!("color adjusted ({} -> {})", old.to_hex(), new.to_hex()),
                    )
                }
            }

            (TokenValue::Dimension(old), TokenValue::Dimension(new)) => {
                if old.unit != new.unit {
                    return (
                        ChangeSeverity::Major,
                        format!("unit changed from {} to {}", old.unit, new.unit),
                    );
                }
                if old.value == 0.0 {
                    return (
                        ChangeSeverity::Major,
                        format!("dimension changed from 0 to {}", new),
                    );
                }
                let pct = ((new.value - old.value) / old.value * 100.0).abs();
                let severity = if pct >= self.dimension_major_pct {
                    ChangeSeverity::Major
                } else if pct >= self.dimension_minor_pct {
                    ChangeSeverity::Minor
                } else {
                    ChangeSeverity::Patch
                };
                (
                    severity,
                    format!(
                        "{} -> {} ({}% relative change)",
                        old,
                        new,
                        format_number(round2(pct))
                    ),
                )
            }

            (old, new) => (
                ChangeSeverity::Minor,
                format!("value changed from {old} to {new}"),
            ),
        }
    }
}

/// Shortest angular distance between two hues, in degrees.
fn circular_delta(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokensmith_core::types::{ColorValue, DimensionValue};
    use tokensmith_core::{TokenPath, TokenType};

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

    fn dim(path: &str, raw: &str) -> ResolvedToken {
        token(
            path,
            TokenValue::Dimension(DimensionValue::parse(raw).unwrap()),
            TokenType::Dimension,
        )
    }

    fn color(path: &str, hex: &str) -> ResolvedToken {
        token(
            path,
            TokenValue::Color(ColorValue::parse(hex).unwrap()),
            TokenType::Color,
        )
    }

    #[test]
    fn type_change_is_always_major() {
        let before = color("x", "#3b82f6");
        let after = dim("x", "16px");
        let (severity, reason) = SeverityPolicy::default().classify(&before, &after);
        assert_eq!(severity, ChangeSeverity::Major);
        assert!(reason.contains("type changed"));
    }

    #[test]
    fn fifty_percent_dimension_change_is_major() {
        let (severity, reason) =
            SeverityPolicy::default().classify(&dim("spacing.md", "16px"), &dim("spacing.md", "24px"));
        assert_eq!(severity, ChangeSeverity::Major);
        assert!(reason.contains("50% relative change"));
    }

    #[test]
    fn small_dimension_change_is_patch() {
        let (severity, _) =
            SeverityPolicy::default().classify(&dim("spacing.md", "16px"), &dim("spacing.md", "16.2px"));
        assert_eq!(severity, ChangeSeverity::Patch);
    }

    #[test]
    fn mid_band_dimension_change_is_minor() {
        let (severity, _) =
            SeverityPolicy::default().classify(&dim("spacing.md", "16px"), &dim("spacing.md", "18px"));
        assert_eq!(severity, ChangeSeverity::Minor);
    }

    #[test]
    fn unit_change_is_major() {
        let (severity, reason) =
            SeverityPolicy::default().classify(&dim("spacing.md", "16px"), &dim("spacing.md", "1rem"));
        assert_eq!(severity, ChangeSeverity::Major);
        assert!(reason.contains("unit changed"));
    }

    #[test]
    fn hue_shift_beyond_threshold_is_major() {
        // Red to green: 120 degrees of hue.
        let (severity, _) =
            SeverityPolicy::default().classify(&color("c", "#ff0000"), &color("c", "#00ff00"));
        assert_eq!(severity, ChangeSeverity::Major);

        // A small nudge within the same hue family stays minor.
        let (severity, _) =
            SeverityPolicy::default().classify(&color("c", "#3b82f6"), &color("c", "#3a80f0"));
        assert_eq!(severity, ChangeSeverity::Minor);
    }

    #[test]
    fn hue_wraparound_uses_shortest_arc() {
        assert!((circular_delta(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((circular_delta(10.0, 350.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn other_types_default_to_minor() {
        let before = token("w", TokenValue::FontWeight(400), TokenType::FontWeight);
        let after = token("w", TokenValue::FontWeight(700), TokenType::FontWeight);
        let (severity, _) = SeverityPolicy::default().classify(&before, &after);
        assert_eq!(severity, ChangeSeverity::Minor);
    }

    #[test]
    fn thresholds_are_policy_not_constants() {
        let strict = SeverityPolicy {
            dimension_major_pct: 10.0,
            ..Default::default()
        };
        let (severity, _) = strict.classify(&dim("s", "16px"), &dim("s", "18px"));
        assert_eq!(severity, ChangeSeverity::Major);
    }
}
