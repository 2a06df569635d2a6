//! Platform target configuration
//!
//! One `PlatformTarget` per emission target, owned by configuration and
//! immutable for the run. Validation happens once at load time so a bad
//! configuration never reaches the emitter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::error::ConfigError;
use crate::naming;
use crate::path::TokenPath;
use crate::types::DimensionValue;

/// Identifier casing applied to emitted names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierCase {
    Kebab,
    Camel,
    Pascal,
    Snake,
}

impl IdentifierCase {
    pub fn apply(self, segments: &[impl AsRef<str>]) -> String {
        match self {
            Self::Kebab => naming::to_kebab_case(segments),
            Self::Camel => naming::to_camel_case(segments),
            Self::Pascal => naming::to_pascal_case(segments),
            Self::Snake => naming::to_snake_case(segments),
        }
    }
}

/// Closed set of output serializations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// CSS custom properties inside one `:root` block.
    CustomProperties,
    /// Swift-style typed static constants.
    TypedConstants,
    /// TypeScript nested const objects mirroring the group tree.
    ObjectNamespace,
    /// Kotlin objects with nested const vals.
    ClassConstants,
}

/// One entry of a target's unit conversion table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitMapping {
    pub factor: f64,
    pub to: String,
}

/// Explicit source-unit conversion table. An unmapped unit is a hard
/// failure at emission, never a silent pass-through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitPolicy {
    pub units: BTreeMap<String, UnitMapping>,
}

impl UnitPolicy {
    pub fn supports(&self, unit: &str) -> bool {
        self.units.contains_key(unit)
    }

    /// Convert a dimension according to the table; `None` when the source
    /// unit has no mapping.
    pub fn convert(&self, dim: &DimensionValue) -> Option<DimensionValue> {
        let mapping = self.units.get(&dim.unit)?;
        Some(DimensionValue {
            value: dim.value * mapping.factor,
            unit: mapping.to.clone(),
        })
    }
}

/// Configuration for one emission target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformTarget {
    pub name: String,
    pub identifier_case: IdentifierCase,
    /// Reserved namespace prefix, prepended before casing.
    pub prefix: String,
    pub output_format: OutputFormat,
    #[serde(default)]
    pub unit_policy: UnitPolicy,
    pub output_location: PathBuf,
}

impl PlatformTarget {
    /// Emitted identifier for a token path: prefix prepended, then the
    /// target's casing applied across all segments.
    pub fn identifier(&self, path: &TokenPath) -> String {
        let mut segments: Vec<&str> = vec![self.prefix.as_str()];
        segments.extend(path.segments().iter().map(String::as_str));
        self.identifier_case.apply(&segments)
    }

    /// The cased form of the bare prefix, for namespacing checks.
    pub fn cased_prefix(&self) -> String {
        self.identifier_case.apply(&[self.prefix.as_str()])
    }
}

/// Validate the full target set once at startup: names unique, prefixes
/// non-empty, output locations disjoint (no location equal to or nested
/// inside another).
pub fn validate_targets(targets: &[PlatformTarget]) -> Result<(), ConfigError> {
    if targets.is_empty() {
        return Err(ConfigError::NoTargets);
    }

    let mut names = std::collections::BTreeSet::new();
    for target in targets {
        if !names.insert(target.name.as_str()) {
            return Err(ConfigError::DuplicateTarget(target.name.clone()));
        }
        if target.prefix.trim().is_empty() {
            return Err(ConfigError::EmptyPrefix(target.name.clone()));
        }
        // Hyphenated names are only legal in CSS custom properties; the
        // constant-emitting formats would produce unparseable source.
        if target.identifier_case == IdentifierCase::Kebab
            && target.output_format != OutputFormat::CustomProperties
        {
            return Err(ConfigError::KebabConstants {
                target: target.name.clone(),
                format: format!("{:?}", target.output_format),
            });
        }
        for (unit, mapping) in &target.unit_policy.units {
            // A self-mapping with a non-unit factor silently rescales
            // values; that is a config bug, not a conversion.
            if unit == &mapping.to && mapping.factor != 1.0 {
                return Err(ConfigError::DegenerateUnitMapping {
                    target: target.name.clone(),
                    unit: unit.clone(),
                    factor: mapping.factor,
                });
            }
        }
    }

    for (i, a) in targets.iter().enumerate() {
        for b in &targets[i + 1..] {
            if locations_overlap(&a.output_location, &b.output_location) {
                return Err(ConfigError::OverlappingOutputs {
                    a: a.name.clone(),
                    b: b.name.clone(),
                    location: a.output_location.display().to_string(),
                });
            }
        }
    }
    Ok(())
}

fn locations_overlap(a: &Path, b: &Path) -> bool {
    let norm = |p: &Path| -> Vec<String> {
        p.components()
            .filter_map(|c| match c {
                Component::Normal(seg) => Some(seg.to_string_lossy().into_owned()),
                Component::CurDir => None,
                other => Some(other.as_os_str().to_string_lossy().into_owned()),
            })
            .collect()
    };
    let a = norm(a);
    let b = norm(b);
    a.starts_with(&b) || b.starts_with(&a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn target(name: &str, case: IdentifierCase, out: &str) -> PlatformTarget {
        PlatformTarget {
            name: name.to_string(),
            identifier_case: case,
            prefix: "ds".to_string(),
            output_format: OutputFormat::CustomProperties,
            unit_policy: UnitPolicy::default(),
            output_location: PathBuf::from(out),
        }
    }

    #[test]
    fn identifier_casing_per_target() {
        let path = TokenPath::parse("color.primary.500").unwrap();
        assert_eq!(
            target("web", IdentifierCase::Kebab, "dist/web").identifier(&path),
            "ds-color-primary-500"
        );
        assert_eq!(
            target("ts", IdentifierCase::Camel, "dist/ts").identifier(&path),
            "dsColorPrimary500"
        );
        assert_eq!(
            target("ios", IdentifierCase::Pascal, "dist/ios").identifier(&path),
            "DsColorPrimary500"
        );
        assert_eq!(
            target("android", IdentifierCase::Snake, "dist/android").identifier(&path),
            "ds_color_primary_500"
        );
    }

    #[test]
    fn unit_policy_conversion() {
        let mut policy = UnitPolicy::default();
        policy.units.insert(
            "rem".to_string(),
            UnitMapping {
                factor: 16.0,
                to: "dp".to_string(),
            },
        );
        policy.units.insert(
            "px".to_string(),
            UnitMapping {
                factor: 1.0,
                to: "px".to_string(),
            },
        );

        let rem = DimensionValue {
            value: 1.5,
            unit: "rem".to_string(),
        };
        let converted = policy.convert(&rem).unwrap();
        assert_eq!(converted.value, 24.0);
        assert_eq!(converted.unit, "dp");

        let vh = DimensionValue {
            value: 10.0,
            unit: "vh".to_string(),
        };
        assert!(policy.convert(&vh).is_none());
    }

    #[test]
    fn overlapping_outputs_rejected() {
        let targets = vec![
            target("web", IdentifierCase::Kebab, "dist/web"),
            target("web-nested", IdentifierCase::Camel, "dist/web/tokens"),
        ];
        assert!(matches!(
            validate_targets(&targets),
            Err(ConfigError::OverlappingOutputs { .. })
        ));

        let disjoint = vec![
            target("web", IdentifierCase::Kebab, "dist/web"),
            target("ios", IdentifierCase::Pascal, "dist/ios"),
        ];
        assert!(validate_targets(&disjoint).is_ok());
    }

    #[test]
    fn empty_prefix_rejected() {
        let mut t = target("web", IdentifierCase::Kebab, "dist/web");
        t.prefix = "  ".to_string();
        assert!(matches!(
            validate_targets(&[t]),
            Err(ConfigError::EmptyPrefix(_))
        ));
    }

    #[test]
    fn duplicate_names_rejected() {
        let targets = vec![
            target("web", IdentifierCase::Kebab, "dist/a"),
            target("web", IdentifierCase::Camel, "dist/b"),
        ];
        assert!(matches!(
            validate_targets(&targets),
            Err(ConfigError::DuplicateTarget(_))
        ));
    }

    #[test]
    fn kebab_case_limited_to_custom_properties() {
        let mut t = target("android", IdentifierCase::Kebab, "dist/android");
        t.output_format = OutputFormat::ClassConstants;
        assert!(matches!(
            validate_targets(&[t]),
            Err(ConfigError::KebabConstants { .. })
        ));

        let css = target("web", IdentifierCase::Kebab, "dist/web");
        assert!(validate_targets(&[css]).is_ok());
    }

    #[test]
    fn no_targets_rejected() {
        assert!(matches!(validate_targets(&[]), Err(ConfigError::NoTargets)));
    }
}
