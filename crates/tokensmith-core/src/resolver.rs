//! Reference resolution over the token graph
//!
//! Depth-first with a three-color marker per path: unvisited, in-progress,
//! resolved. Hitting an in-progress node is a cycle and fails immediately
//! with the full chain of paths. Nodes are visited in declaration order, so
//! identical input always produces identical diagnostics and output.

use std::collections::HashMap;

use tracing::debug;

use crate::error::ResolutionError;
use crate::graph::{ResolvedGraph, ResolvedToken, TokenGraph, TokenNode};
use crate::path::TokenPath;
use crate::types::{RawValue, TokenType, TokenValue};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mark {
    InProgress,
    Resolved,
}

/// Resolve every node of the graph into a concrete value.
///
/// Fails on the first dangling reference, cycle, or type clash; loader and
/// resolver failures are fatal to the run, so there is no partial output.
pub fn resolve(graph: &TokenGraph) -> Result<ResolvedGraph, ResolutionError> {
    let mut resolver = Resolver {
        graph,
        marks: HashMap::new(),
        stack: Vec::new(),
        out: ResolvedGraph::new(),
    };
    for node in graph.iter() {
        resolver.resolve_node(node)?;
    }
    debug!(tokens = resolver.out.len(), "graph resolved");
    Ok(resolver.out)
}

struct Resolver<'g> {
    graph: &'g TokenGraph,
    marks: HashMap<TokenPath, Mark>,
    /// Paths currently being resolved, outermost first. The suffix starting
    /// at a revisited path is the cycle.
    stack: Vec<TokenPath>,
    out: ResolvedGraph,
}

impl Resolver<'_> {
    fn resolve_node(&mut self, node: &TokenNode) -> Result<ResolvedToken, ResolutionError> {
        match self.marks.get(&node.path) {
            Some(Mark::Resolved) => {
                // Already done on an earlier walk; the clone is cheap relative
                // to re-resolving and keeps the arena immutable.
                return Ok(self.out.get(&node.path).cloned().expect("marked resolved"));
            }
            Some(Mark::InProgress) => {
                let start = self
                    .stack
                    .iter()
                    .position(|p| p == &node.path)
                    .unwrap_or(0);
                let mut chain: Vec<TokenPath> = self.stack[start..].to_vec();
                chain.push(node.path.clone());
                return Err(ResolutionError::Cycle { chain });
            }
            None => {}
        }

        self.marks.insert(node.path.clone(), Mark::InProgress);
        self.stack.push(node.path.clone());

        let result = self.resolve_value(node);

        self.stack.pop();
        match &result {
            Ok(token) => {
                self.marks.insert(node.path.clone(), Mark::Resolved);
                self.out.insert(token.clone());
            }
            Err(_) => {
                // Leave the failing path marked in-progress; resolution is
                // aborting anyway and the marks map is discarded with it.
            }
        }
        result
    }

    fn resolve_value(&mut self, node: &TokenNode) -> Result<ResolvedToken, ResolutionError> {
        match &node.raw_value {
            RawValue::Literal(value) => Ok(ResolvedToken {
                path: node.path.clone(),
                value: value.clone(),
                ty: effective_type(node.declared_type, value.token_type()),
                chain: vec![node.path.clone()],
                description: node.description.clone(),
                deprecated: node.deprecated.clone(),
            }),

            RawValue::Reference(target) => {
                let resolved = self.follow(&node.path, target)?;
                if !node.declared_type.compatible_with(resolved.ty) {
                    return Err(ResolutionError::TypeClash {
                        path: node.path.clone(),
                        declared: node.declared_type,
                        resolved: resolved.ty,
                    });
                }
                let mut chain = vec![node.path.clone()];
                chain.extend(resolved.chain.iter().cloned());
                Ok(ResolvedToken {
                    path: node.path.clone(),
                    value: resolved.value,
                    ty: effective_type(node.declared_type, resolved.ty),
                    chain,
                    description: node.description.clone(),
                    deprecated: node.deprecated.clone(),
                })
            }

            RawValue::Composite(fields) => {
                if !node.declared_type.is_composite() {
                    return Err(ResolutionError::InvalidComposite {
                        path: node.path.clone(),
                        detail: format!(
                            "declared type {} does not take component fields",
                            node.declared_type
                        ),
                    });
                }
                let mut chain = vec![node.path.clone()];
                let mut resolved_fields = std::collections::BTreeMap::new();
                for (field, raw) in fields {
                    let value = match raw {
                        RawValue::Literal(v) => v.clone(),
                        RawValue::Reference(target) => {
                            let resolved =
                                self.follow(&node.path, target).map_err(|source| {
                                    ResolutionError::CompositeField {
                                        path: node.path.clone(),
                                        field: field.clone(),
                                        source: Box::new(source),
                                    }
                                })?;
                            chain.extend(resolved.chain.iter().cloned());
                            resolved.value
                        }
                        RawValue::Composite(_) => {
                            return Err(ResolutionError::InvalidComposite {
                                path: node.path.clone(),
                                detail: format!("field {field:?} nests another composite"),
                            })
                        }
                    };
                    resolved_fields.insert(field.clone(), value);
                }
                let value =
                    TokenValue::from_composite(node.declared_type, &node.path, &resolved_fields)
                        .map_err(|e| ResolutionError::InvalidComposite {
                            path: node.path.clone(),
                            detail: e.to_string(),
                        })?;
                Ok(ResolvedToken {
                    path: node.path.clone(),
                    value,
                    ty: node.declared_type,
                    chain,
                    description: node.description.clone(),
                    deprecated: node.deprecated.clone(),
                })
            }
        }
    }

    /// Follow a reference edge, failing with the referrer named if the
    /// target does not exist.
    fn follow(
        &mut self,
        referrer: &TokenPath,
        target: &TokenPath,
    ) -> Result<ResolvedToken, ResolutionError> {
        let node = self
            .graph
            .get(target)
            .ok_or_else(|| ResolutionError::DanglingReference {
                referrer: referrer.clone(),
                target: target.clone(),
            })?;
        self.resolve_node(node)
    }
}

/// A declared type wins over the resolved one; untyped adopts the target's.
fn effective_type(declared: TokenType, resolved: TokenType) -> TokenType {
    if declared == TokenType::Untyped {
        resolved
    } else {
        declared
    }
}
