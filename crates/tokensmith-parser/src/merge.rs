//! Multi-document merge
//!
//! Documents arrive in precedence order (base, semantic, component,
//! platform overrides); later documents override earlier entries at the
//! same path. An override that changes the declared type is a hard error,
//! never a silent overwrite.

use tracing::{debug, warn};

use tokensmith_core::{TokenGraph, TokenType};

use crate::document::RawDocument;
use crate::error::LoadError;

/// Merge an ordered document list into one token graph.
pub fn merge_documents(documents: &[RawDocument]) -> Result<TokenGraph, LoadError> {
    let mut graph = TokenGraph::new();

    for document in documents {
        let nodes = document.flatten()?;
        debug!(document = %document.name, tokens = nodes.len(), "merging document");

        for node in nodes {
            if let Some(existing) = graph.get(&node.path) {
                let compatible = existing.declared_type == node.declared_type
                    || existing.declared_type == TokenType::Untyped
                    || node.declared_type == TokenType::Untyped;
                if !compatible {
                    return Err(LoadError::TypeMismatchOnOverride {
                        document: document.name.clone(),
                        path: node.path.clone(),
                        existing: existing.declared_type,
                        incoming: node.declared_type,
                    });
                }
                warn!(path = %node.path, document = %document.name, "token overridden");
            }
            graph.insert(node);
        }
    }

    Ok(graph)
}
