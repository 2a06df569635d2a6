use thiserror::Error;

use tokensmith_core::{TokenPath, TokenType};

/// Emission failures, scoped to one target. By default a failing target
/// does not prevent sibling targets from emitting.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error(
        "target {target:?}: token {path} has unit {unit:?} with no conversion mapping"
    )]
    UnmappedUnit {
        target: String,
        path: TokenPath,
        unit: String,
    },

    #[error("target {target:?}: token {path} has type {ty}, unsupported by {format:?}")]
    UnsupportedType {
        target: String,
        path: TokenPath,
        ty: TokenType,
        format: String,
    },

    #[error("target {target:?}: token {path} maps to an object slot already occupied by another token")]
    NestingConflict { target: String, path: TokenPath },

    #[error("format error: {0}")]
    Fmt(#[from] std::fmt::Error),
}
