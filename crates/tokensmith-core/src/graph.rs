//! Token graph: the merged, unresolved document set and its resolved form

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::path::TokenPath;
use crate::types::{RawValue, TokenType, TokenValue};

/// Deprecation marker carried through from `$deprecated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deprecation {
    pub reason: Option<String>,
}

/// The atomic unit: one named token as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenNode {
    pub path: TokenPath,
    pub raw_value: RawValue,
    pub declared_type: TokenType,
    pub description: Option<String>,
    pub deprecated: Option<Deprecation>,
}

/// All token nodes of a merged document set, indexed by path.
///
/// Declaration order is kept separately from the index: the resolver walks
/// nodes in the order they were authored so the same input always resolves
/// the same way, never in hash- or tree-iteration order of a later insert.
#[derive(Debug, Clone, Default)]
pub struct TokenGraph {
    nodes: BTreeMap<TokenPath, TokenNode>,
    order: Vec<TokenPath>,
}

impl TokenGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Returns the node previously stored at the same path,
    /// if any; the merge layer decides whether an override is legal.
    pub fn insert(&mut self, node: TokenNode) -> Option<TokenNode> {
        let path = node.path.clone();
        let previous = self.nodes.insert(path.clone(), node);
        if previous.is_none() {
            self.order.push(path);
        }
        previous
    }

    pub fn get(&self, path: &TokenPath) -> Option<&TokenNode> {
        self.nodes.get(path)
    }

    pub fn contains(&self, path: &TokenPath) -> bool {
        self.nodes.contains_key(path)
    }

    /// Nodes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &TokenNode> {
        self.order.iter().filter_map(|p| self.nodes.get(p))
    }

    /// Nodes sorted by path, for places that key output off the path.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &TokenNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Output of resolution for one node: concrete value, effective type, and
/// the chain of paths it was resolved through. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedToken {
    pub path: TokenPath,
    pub value: TokenValue,
    pub ty: TokenType,
    /// Paths traversed while resolving, starting with this token's own path.
    pub chain: Vec<TokenPath>,
    pub description: Option<String>,
    pub deprecated: Option<Deprecation>,
}

/// The fully resolved token set. Iteration is always path-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGraph {
    tokens: BTreeMap<TokenPath, ResolvedToken>,
}

impl ResolvedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: ResolvedToken) {
        self.tokens.insert(token.path.clone(), token);
    }

    pub fn get(&self, path: &TokenPath) -> Option<&ResolvedToken> {
        self.tokens.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedToken> {
        self.tokens.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &TokenPath> {
        self.tokens.keys()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Distinct root groups (first path segments), sorted. Emitters write
    /// one artifact per group.
    pub fn root_groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = Vec::new();
        for path in self.tokens.keys() {
            let group = path.root_group();
            if groups.last().map(String::as_str) != Some(group) {
                groups.push(group.to_string());
            }
        }
        groups.dedup();
        groups
    }

    /// Tokens of one root group, path-sorted.
    pub fn group<'a>(&'a self, root: &'a str) -> impl Iterator<Item = &'a ResolvedToken> + 'a {
        self.tokens
            .values()
            .filter(move |t| t.path.root_group() == root)
    }
}
