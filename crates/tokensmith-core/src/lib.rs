//! Core token graph and reference resolution for tokensmith
//!
//! This crate holds the strongly typed token model shared by every stage of
//! the pipeline: loader output (`TokenGraph`), resolver output
//! (`ResolvedGraph`), the platform target configuration, and the case
//! conversion utilities used both for emission and for governance's
//! transform simulation.

pub mod error;
pub mod graph;
pub mod naming;
pub mod path;
pub mod resolver;
pub mod target;
pub mod types;

pub use error::{ConfigError, CoreError, ResolutionError};
pub use graph::{ResolvedGraph, ResolvedToken, TokenGraph, TokenNode};
pub use path::TokenPath;
pub use resolver::resolve;
pub use target::{IdentifierCase, OutputFormat, PlatformTarget, UnitPolicy};
pub use types::{RawValue, TokenType, TokenValue};
