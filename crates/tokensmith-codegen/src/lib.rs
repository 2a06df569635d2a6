//! Platform artifact emitters
//!
//! One emitter per output format, all behind the [`Emitter`] trait. Every
//! emitter walks the same immutable resolved graph, applies the target's
//! identifier transform and unit policy, and returns a deterministic
//! artifact set: leaves are always serialized in path order, so identical
//! input produces byte-identical output.

pub mod css;
pub mod error;
pub mod kotlin;
pub mod swift;
pub mod typescript;

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use tokensmith_core::types::DimensionValue;
use tokensmith_core::{OutputFormat, PlatformTarget, ResolvedGraph, ResolvedToken};

pub use error::EmitError;

/// Emitted files for one target, keyed by path relative to the target's
/// `output_location`.
pub type ArtifactSet = BTreeMap<PathBuf, String>;

/// Common contract for all emitters.
pub trait Emitter {
    fn emit(
        &self,
        graph: &ResolvedGraph,
        target: &PlatformTarget,
    ) -> Result<ArtifactSet, EmitError>;
}

/// Emit one target, dispatching on its configured output format. Artifact
/// paths are joined onto the target's output location.
pub fn emit_target(
    graph: &ResolvedGraph,
    target: &PlatformTarget,
) -> Result<ArtifactSet, EmitError> {
    let artifacts = match target.output_format {
        OutputFormat::CustomProperties => css::CssEmitter.emit(graph, target)?,
        OutputFormat::TypedConstants => swift::SwiftEmitter.emit(graph, target)?,
        OutputFormat::ObjectNamespace => typescript::TypeScriptEmitter.emit(graph, target)?,
        OutputFormat::ClassConstants => kotlin::KotlinEmitter.emit(graph, target)?,
    };
    debug!(target = %target.name, artifacts = artifacts.len(), "target emitted");
    Ok(artifacts
        .into_iter()
        .map(|(path, content)| (target.output_location.join(path), content))
        .collect())
}

/// Apply the target's unit policy to a dimension. An unmapped unit is a
/// hard failure, never a silent pass-through.
pub(crate) fn convert_dimension(
    token: &ResolvedToken,
    dim: &DimensionValue,
    target: &PlatformTarget,
) -> Result<DimensionValue, EmitError> {
    target
        .unit_policy
        .convert(dim)
        .ok_or_else(|| EmitError::UnmappedUnit {
            target: target.name.clone(),
            path: token.path.clone(),
            unit: dim.unit.clone(),
        })
}

pub(crate) fn unsupported(
    token: &ResolvedToken,
    target: &PlatformTarget,
    format: &str,
) -> EmitError {
    EmitError::UnsupportedType {
        target: target.name.clone(),
        path: token.path.clone(),
        ty: token.ty,
        format: format.to_string(),
    }
}
