//! TypeScript object-namespace emitter
//!
//! One `<group>.ts` artifact per root group exporting a nested `as const`
//! object that mirrors the token group structure, plus an `index.ts`
//! re-exporting every group.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::PathBuf;

use tokensmith_core::types::format_number;
use tokensmith_core::{PlatformTarget, ResolvedGraph, ResolvedToken, TokenValue};

use crate::{convert_dimension, ArtifactSet, EmitError, Emitter};

pub struct TypeScriptEmitter;

enum Node {
    Leaf(String),
    Group(BTreeMap<String, Node>),
}

impl Emitter for TypeScriptEmitter {
    fn emit(
        &self,
        graph: &ResolvedGraph,
        target: &PlatformTarget,
    ) -> Result<ArtifactSet, EmitError> {
        let mut artifacts = ArtifactSet::new();
        let mut index = String::new();

        for group in graph.root_groups() {
            let export_name = target
                .identifier_case
                .apply(&[target.prefix.as_str(), group.as_str()]);

            let mut root: BTreeMap<String, Node> = BTreeMap::new();
            for token in graph.group(&group) {
                let literal = ts_value(token, target)?;
                insert_leaf(&mut root, &token.path.segments()[1..], literal, token, target)?;
            }

            let mut out = String::new();
            writeln!(out, "export const {export_name} = {{")?;
            render_group(&mut out, &root, 1)?;
            writeln!(out, "}} as const;")?;
            artifacts.insert(PathBuf::from(format!("{group}.ts")), out);

            writeln!(index, "export {{ {export_name} }} from \"./{group}\";")?;
        }

        artifacts.insert(PathBuf::from("index.ts"), index);
        Ok(artifacts)
    }
}

/// A token whose path is a prefix of another token's path wants the same
/// tree slot as the nested group; dropping either one would lose tokens,
/// so the whole target fails.
fn insert_leaf(
    tree: &mut BTreeMap<String, Node>,
    segments: &[String],
    literal: String,
    token: &ResolvedToken,
    target: &PlatformTarget,
) -> Result<(), EmitError> {
    let conflict = || EmitError::NestingConflict {
        target: target.name.clone(),
        path: token.path.clone(),
    };
    let key = key_for(&segments[0], target);
    if segments.len() == 1 {
        if tree.insert(key, Node::Leaf(literal)).is_some() {
            return Err(conflict());
        }
        return Ok(());
    }
    match tree
        .entry(key)
        .or_insert_with(|| Node::Group(BTreeMap::new()))
    {
        Node::Group(children) => insert_leaf(children, &segments[1..], literal, token, target),
        Node::Leaf(_) => Err(conflict()),
    }
}

/// Segment key, cased per target and quoted when not a valid identifier.
fn key_for(segment: &str, target: &PlatformTarget) -> String {
    let cased = target.identifier_case.apply(&[segment]);
    let valid = cased
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false)
        && cased.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        cased
    } else {
        format!("\"{cased}\"")
    }
}

fn render_group(
    out: &mut String,
    tree: &BTreeMap<String, Node>,
    depth: usize,
) -> Result<(), EmitError> {
    let indent = "  ".repeat(depth);
    for (key, node) in tree {
        match node {
            Node::Leaf(literal) => writeln!(out, "{indent}{key}: {literal},")?,
            Node::Group(children) => {
                writeln!(out, "{indent}{key}: {{")?;
                render_group(out, children, depth + 1)?;
                writeln!(out, "{indent}}},")?;
            }
        }
    }
    Ok(())
}

fn ts_value(token: &ResolvedToken, target: &PlatformTarget) -> Result<String, EmitError> {
    Ok(match &token.value {
        TokenValue::Color(color) => format!("\"{}\"", color.to_hex()),
        TokenValue::Dimension(dim) => {
            format!("\"{}\"", convert_dimension(token, dim, target)?)
        }
        TokenValue::FontFamily(families) => {
            let quoted: Vec<String> = families.iter().map(|f| format!("\"{f}\"")).collect();
            format!("[{}]", quoted.join(", "))
        }
        TokenValue::FontWeight(weight) => weight.to_string(),
        TokenValue::Duration(duration) => format!("\"{duration}\""),
        TokenValue::CubicBezier(curve) => format!(
            "[{}]",
            curve
                .iter()
                .map(|v| format_number(*v))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        TokenValue::Number(n) => format_number(*n),
        TokenValue::StrokeStyle(style) => format!("\"{style}\""),
        TokenValue::Shadow(shadow) => {
            let mut fields = vec![
                format!("color: \"{}\"", shadow.color.to_hex()),
                format!(
                    "offsetX: \"{}\"",
                    convert_dimension(token, &shadow.offset_x, target)?
                ),
                format!(
                    "offsetY: \"{}\"",
                    convert_dimension(token, &shadow.offset_y, target)?
                ),
                format!(
                    "blur: \"{}\"",
                    convert_dimension(token, &shadow.blur, target)?
                ),
            ];
            if let Some(spread) = &shadow.spread {
                fields.push(format!(
                    "spread: \"{}\"",
                    convert_dimension(token, spread, target)?
                ));
            }
            format!("{{ {} }}", fields.join(", "))
        }
        TokenValue::Gradient(stops) => {
            let rendered: Vec<String> = stops
                .iter()
                .map(|s| {
                    format!(
                        "{{ color: \"{}\", position: {} }}",
                        s.color.to_hex(),
                        format_number(s.position)
                    )
                })
                .collect();
            format!("[{}]", rendered.join(", "))
        }
        TokenValue::Typography(t) => {
            let families: Vec<String> =
                t.font_family.iter().map(|f| format!("\"{f}\"")).collect();
            let mut fields = vec![
                format!("fontFamily: [{}]", families.join(", ")),
                format!(
                    "fontSize: \"{}\"",
                    convert_dimension(token, &t.font_size, target)?
                ),
                format!("fontWeight: {}", t.font_weight),
                format!("lineHeight: {}", format_number(t.line_height)),
            ];
            if let Some(spacing) = &t.letter_spacing {
                fields.push(format!(
                    "letterSpacing: \"{}\"",
                    convert_dimension(token, spacing, target)?
                ));
            }
            format!("{{ {} }}", fields.join(", "))
        }
        TokenValue::Untyped(raw) => format!("\"{raw}\""),
    })
}
