use std::path::PathBuf;
use thiserror::Error;

use tokensmith_core::{CoreError, TokenPath, TokenType};

/// Failures while loading or merging raw token documents. All of these are
/// fatal to the run; a broken document must never reach the resolver.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document {document:?} is not valid JSON: {source}")]
    Json {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("document {document:?}: {detail}")]
    Malformed { document: String, detail: String },

    #[error("document {document:?}, token {path}: unknown $type {keyword:?}")]
    UnknownType {
        document: String,
        path: TokenPath,
        keyword: String,
    },

    #[error("document {document:?}, token {path}: {source}")]
    InvalidValue {
        document: String,
        path: TokenPath,
        #[source]
        source: CoreError,
    },

    #[error("document {document:?}: invalid token path: {source}")]
    InvalidPath {
        document: String,
        #[source]
        source: CoreError,
    },

    #[error(
        "document {document:?} overrides {path} with type {incoming}, \
         but it was declared as {existing}"
    )]
    TypeMismatchOnOverride {
        document: String,
        path: TokenPath,
        existing: TokenType,
        incoming: TokenType,
    },
}
