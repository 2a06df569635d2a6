//! Kotlin class-constants emitter
//!
//! One `<Group>.kt` artifact per root group: a top-level object per group
//! with nested objects mirroring intermediate path segments and one
//! `const val` per leaf.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::PathBuf;

use tokensmith_core::naming::to_pascal_case;
use tokensmith_core::types::format_number;
use tokensmith_core::{PlatformTarget, ResolvedGraph, ResolvedToken, TokenValue};

use crate::{convert_dimension, ArtifactSet, EmitError, Emitter};

pub struct KotlinEmitter;

enum Node {
    Leaf { ty: &'static str, literal: String },
    Group(BTreeMap<String, Node>),
}

impl Emitter for KotlinEmitter {
    fn emit(
        &self,
        graph: &ResolvedGraph,
        target: &PlatformTarget,
    ) -> Result<ArtifactSet, EmitError> {
        let mut artifacts = ArtifactSet::new();
        for group in graph.root_groups() {
            let object_name = to_pascal_case(&[target.prefix.as_str(), group.as_str()]);

            let mut root: BTreeMap<String, Node> = BTreeMap::new();
            for token in graph.group(&group) {
                let (ty, literal) = kotlin_constant(token, target)?;
                insert_leaf(&mut root, &token.path.segments()[1..], ty, literal, token, target)?;
            }

            let mut out = String::new();
            writeln!(out, "object {object_name} {{")?;
            render_group(&mut out, &root, 1)?;
            writeln!(out, "}}")?;
            artifacts.insert(PathBuf::from(format!("{object_name}.kt")), out);
        }
        Ok(artifacts)
    }
}

/// A token whose path is a prefix of another token's path wants the same
/// tree slot as the nested object; dropping either one would lose tokens,
/// so the whole target fails.
fn insert_leaf(
    tree: &mut BTreeMap<String, Node>,
    segments: &[String],
    ty: &'static str,
    literal: String,
    token: &ResolvedToken,
    target: &PlatformTarget,
) -> Result<(), EmitError> {
    let conflict = || EmitError::NestingConflict {
        target: target.name.clone(),
        path: token.path.clone(),
    };
    if segments.len() == 1 {
        let cased = target.identifier_case.apply(&[segments[0].as_str()]);
        // Kotlin identifiers cannot start with a digit; backticks escape them.
        let key = if cased.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            format!("`{cased}`")
        } else {
            cased
        };
        if tree.insert(key, Node::Leaf { ty, literal }).is_some() {
            return Err(conflict());
        }
        return Ok(());
    }
    let key = to_pascal_case(&[segments[0].as_str()]);
    match tree
        .entry(key)
        .or_insert_with(|| Node::Group(BTreeMap::new()))
    {
        Node::Group(children) => insert_leaf(children, &segments[1..], ty, literal, token, target),
        Node::Leaf { .. } => Err(conflict()),
    }
}

fn render_group(
    out: &mut String,
    tree: &BTreeMap<String, Node>,
    depth: usize,
) -> Result<(), EmitError> {
    let indent = "    ".repeat(depth);
    for (key, node) in tree {
        match node {
            Node::Leaf { ty, literal } => {
                // Kotlin allows const only for primitives and String.
                let keyword = if matches!(*ty, "String" | "Double" | "Int") {
                    "const val"
                } else {
                    "val"
                };
                writeln!(out, "{indent}{keyword} {key}: {ty} = {literal}")?;
            }
            Node::Group(children) => {
                writeln!(out, "{indent}object {key} {{")?;
                render_group(out, children, depth + 1)?;
                writeln!(out, "{indent}}}")?;
            }
        }
    }
    Ok(())
}

/// Kotlin type and literal for one token. Composites flatten to their
/// canonical string spelling; Kotlin consumers parse them at the edge.
fn kotlin_constant(
    token: &ResolvedToken,
    target: &PlatformTarget,
) -> Result<(&'static str, String), EmitError> {
    Ok(match &token.value {
        TokenValue::Color(color) => ("String", format!("\"{}\"", color.to_hex())),
        TokenValue::Dimension(dim) => {
            let converted = convert_dimension(token, dim, target)?;
            ("Double", kotlin_double(converted.value))
        }
        TokenValue::FontFamily(families) => {
            let quoted: Vec<String> = families.iter().map(|f| format!("\"{f}\"")).collect();
            ("List<String>", format!("listOf({})", quoted.join(", ")))
        }
        TokenValue::FontWeight(weight) => ("Int", weight.to_string()),
        TokenValue::Duration(duration) => ("Double", kotlin_double(duration.as_millis())),
        TokenValue::CubicBezier(curve) => (
            "List<Double>",
            format!(
                "listOf({})",
                curve
                    .iter()
                    .map(|v| kotlin_double(*v))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ),
        TokenValue::Number(n) => ("Double", kotlin_double(*n)),
        TokenValue::StrokeStyle(style) => ("String", format!("\"{style}\"")),
        other => ("String", format!("\"{other}\"")),
    })
}

/// Kotlin requires a decimal point on Double literals.
fn kotlin_double(value: f64) -> String {
    let rendered = format_number(value);
    if rendered.contains('.') {
        rendered
    } else {
        format!("{rendered}.0")
    }
}
