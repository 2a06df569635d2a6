//! Engine configuration loaded from `tokensmith.toml`
//!
//! One file declares the whole pipeline: which documents to load, in
//! which order, and the set of platform targets to emit. Target-level
//! invariants are checked here, at load time, so a bad config fails
//! before any document is touched.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::debug;

use tokensmith_core::target::validate_targets;
use tokensmith_core::PlatformTarget;
use tokensmith_drift::SeverityPolicy;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Token documents, in merge order. Later documents override earlier
    /// ones. Relative paths are resolved against the config file.
    pub documents: Vec<PathBuf>,

    #[serde(rename = "target")]
    pub targets: Vec<PlatformTarget>,

    /// Drift classification thresholds. Optional; missing fields fall
    /// back to the built-in defaults.
    #[serde(default)]
    pub drift: SeverityPolicy,
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: EngineConfig = toml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;

        if config.documents.is_empty() {
            bail!("config {} declares no documents", path.display());
        }
        validate_targets(&config.targets)
            .with_context(|| format!("invalid target configuration in {}", path.display()))?;

        if let Some(base) = path.parent() {
            for doc in &mut config.documents {
                if doc.is_relative() {
                    *doc = base.join(doc.as_path());
                }
            }
            for target in &mut config.targets {
                if target.output_location.is_relative() {
                    target.output_location = base.join(&target.output_location);
                }
            }
        }

        debug!(
            documents = config.documents.len(),
            targets = config.targets.len(),
            "config loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tokensmith_core::{IdentifierCase, OutputFormat};

    const CONFIG: &str = r#"
documents = ["base.json", "brand.json"]

[[target]]
name = "web"
identifier_case = "kebab"
prefix = "ds"
output_format = "custom-properties"
output_location = "dist/css"

[target.unit_policy]
px = { factor = 1.0, to = "px" }

[[target]]
name = "ios"
identifier_case = "camel"
prefix = "ds"
output_format = "typed-constants"
output_location = "dist/swift"

[target.unit_policy]
px = { factor = 0.5, to = "pt" }

[drift]
dimension_major_pct = 30.0
"#;

    fn write_config(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("tokensmith.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(text.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), CONFIG);
        let config = EngineConfig::load(&path).unwrap();

        assert_eq!(config.documents.len(), 2);
        assert_eq!(config.documents[0], dir.path().join("base.json"));
        assert_eq!(config.targets.len(), 2);
        assert_eq!(config.targets[0].identifier_case, IdentifierCase::Kebab);
        assert_eq!(config.targets[1].output_format, OutputFormat::TypedConstants);
        assert_eq!(config.targets[0].output_location, dir.path().join("dist/css"));
    }

    #[test]
    fn partial_drift_section_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), CONFIG);
        let config = EngineConfig::load(&path).unwrap();

        assert_eq!(config.drift.dimension_major_pct, 30.0);
        assert_eq!(config.drift.dimension_minor_pct, 5.0);
        assert_eq!(config.drift.color_hue_major, 30.0);
    }

    #[test]
    fn empty_document_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let text = CONFIG.replace(
            "documents = [\"base.json\", \"brand.json\"]",
            "documents = []",
        );
        let path = write_config(dir.path(), &text);
        let err = EngineConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("no documents"));
    }

    #[test]
    fn duplicate_target_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let text = CONFIG.replace("name = \"ios\"", "name = \"web\"");
        let path = write_config(dir.path(), &text);
        assert!(EngineConfig::load(&path).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let text = format!("{CONFIG}\nextra = true\n");
        let path = write_config(dir.path(), &text);
        assert!(EngineConfig::load(&path).is_err());
    }
}
