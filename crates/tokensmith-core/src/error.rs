use thiserror::Error;

use crate::path::TokenPath;
use crate::types::TokenType;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("token path has no segments")]
    EmptyPath,

    #[error("token path contains an empty segment")]
    EmptyPathSegment,

    #[error("invalid path segment: {0:?}")]
    InvalidPathSegment(String),

    #[error("unknown token type: {0:?}")]
    UnknownType(String),

    #[error("value does not match declared type {expected}: {detail}")]
    ValueShape { expected: TokenType, detail: String },
}

/// Failures while turning the unresolved graph into concrete values.
///
/// Loader and resolver errors are fatal to the whole run; there is no
/// meaningful partial result once the graph itself is broken.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("dangling reference: {referrer} points at {target}, which does not exist")]
    DanglingReference {
        referrer: TokenPath,
        target: TokenPath,
    },

    #[error("reference cycle: {}", format_chain(.chain))]
    Cycle { chain: Vec<TokenPath> },

    #[error("{path}: declared type {declared} but resolves to {resolved}")]
    TypeClash {
        path: TokenPath,
        declared: TokenType,
        resolved: TokenType,
    },

    #[error("{path}: composite field {field:?} failed to resolve: {source}")]
    CompositeField {
        path: TokenPath,
        field: String,
        #[source]
        source: Box<ResolutionError>,
    },

    #[error("{path}: {detail}")]
    InvalidComposite { path: TokenPath, detail: String },
}

fn format_chain(chain: &[TokenPath]) -> String {
    chain
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Configuration problems detected at startup, before any document loads.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no platform targets configured")]
    NoTargets,

    #[error("duplicate target name: {0:?}")]
    DuplicateTarget(String),

    #[error("target {0:?} has an empty namespace prefix")]
    EmptyPrefix(String),

    #[error("targets {a:?} and {b:?} have overlapping output locations ({location})")]
    OverlappingOutputs {
        a: String,
        b: String,
        location: String,
    },

    #[error("target {target:?} maps unit {unit:?} to itself with factor {factor}")]
    DegenerateUnitMapping {
        target: String,
        unit: String,
        factor: f64,
    },

    #[error("target {target:?}: kebab-case identifiers cannot name constants in format {format:?}")]
    KebabConstants { target: String, format: String },
}
