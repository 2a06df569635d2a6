//! CSS custom-properties emitter
//!
//! One `<group>.css` artifact per root group, each holding a single
//! `:root` block with one declaration per leaf.

use std::fmt::Write;
use std::path::PathBuf;

use tokensmith_core::types::format_number;
use tokensmith_core::{PlatformTarget, ResolvedGraph, ResolvedToken, TokenValue};

use crate::{convert_dimension, ArtifactSet, EmitError, Emitter};

pub struct CssEmitter;

impl Emitter for CssEmitter {
    fn emit(
        &self,
        graph: &ResolvedGraph,
        target: &PlatformTarget,
    ) -> Result<ArtifactSet, EmitError> {
        let mut artifacts = ArtifactSet::new();
        for group in graph.root_groups() {
            let mut out = String::new();
            writeln!(out, ":root {{")?;
            for token in graph.group(&group) {
                if let Some(description) = &token.description {
                    writeln!(out, "  /* {description} */")?;
                }
                if let Some(deprecation) = &token.deprecated {
                    match &deprecation.reason {
                        Some(reason) => writeln!(out, "  /* @deprecated {reason} */")?,
                        None => writeln!(out, "  /* @deprecated */")?,
                    }
                }
                writeln!(
                    out,
                    "  --{}: {};",
                    target.identifier(&token.path),
                    css_value(token, target)?
                )?;
            }
            writeln!(out, "}}")?;
            artifacts.insert(PathBuf::from(format!("{group}.css")), out);
        }
        Ok(artifacts)
    }
}

fn css_value(token: &ResolvedToken, target: &PlatformTarget) -> Result<String, EmitError> {
    Ok(match &token.value {
        TokenValue::Dimension(dim) => convert_dimension(token, dim, target)?.to_string(),
        TokenValue::FontFamily(families) => families
            .iter()
            .map(|f| {
                if f.contains(char::is_whitespace) {
                    format!("\"{f}\"")
                } else {
                    f.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", "),
        TokenValue::Shadow(shadow) => {
            let mut parts = vec![
                convert_dimension(token, &shadow.offset_x, target)?.to_string(),
                convert_dimension(token, &shadow.offset_y, target)?.to_string(),
                convert_dimension(token, &shadow.blur, target)?.to_string(),
            ];
            if let Some(spread) = &shadow.spread {
                parts.push(convert_dimension(token, spread, target)?.to_string());
            }
            parts.push(shadow.color.to_hex());
            parts.join(" ")
        }
        TokenValue::Typography(typography) => {
            let size = convert_dimension(token, &typography.font_size, target)?;
            format!(
                "{} {}/{} {}",
                typography.font_weight,
                size,
                format_number(typography.line_height),
                typography.font_family.join(", ")
            )
        }
        // The Display form is already the canonical CSS spelling.
        other => other.to_string(),
    })
}
