//! Swift typed-constants emitter
//!
//! One `<Group>.swift` artifact per root group, each a caseless enum of
//! `public static let` constants with explicit type annotations derived
//! from the token type. Composite tokens (shadow, gradient, typography)
//! have no flat-constant representation and are rejected.

use std::fmt::Write;
use std::path::PathBuf;

use tokensmith_core::naming::to_pascal_case;
use tokensmith_core::types::format_number;
use tokensmith_core::{PlatformTarget, ResolvedGraph, ResolvedToken, TokenValue};

use crate::{convert_dimension, unsupported, ArtifactSet, EmitError, Emitter};

pub struct SwiftEmitter;

impl Emitter for SwiftEmitter {
    fn emit(
        &self,
        graph: &ResolvedGraph,
        target: &PlatformTarget,
    ) -> Result<ArtifactSet, EmitError> {
        let mut artifacts = ArtifactSet::new();
        for group in graph.root_groups() {
            let namespace = to_pascal_case(&[target.prefix.as_str(), group.as_str()]);
            let mut out = String::new();
            writeln!(out, "import Foundation")?;
            writeln!(out)?;
            writeln!(out, "public enum {namespace} {{")?;
            for token in graph.group(&group) {
                if let Some(description) = &token.description {
                    writeln!(out, "    /// {description}")?;
                }
                if let Some(deprecation) = &token.deprecated {
                    let message = deprecation.reason.as_deref().unwrap_or("deprecated token");
                    writeln!(out, "    @available(*, deprecated, message: \"{message}\")")?;
                }
                let (ty, literal) = swift_constant(token, target)?;
                writeln!(
                    out,
                    "    public static let {}: {ty} = {literal}",
                    target.identifier(&token.path)
                )?;
            }
            writeln!(out, "}}")?;
            artifacts.insert(PathBuf::from(format!("{namespace}.swift")), out);
        }
        Ok(artifacts)
    }
}

/// Swift type annotation and literal for one token.
fn swift_constant(
    token: &ResolvedToken,
    target: &PlatformTarget,
) -> Result<(&'static str, String), EmitError> {
    Ok(match &token.value {
        TokenValue::Color(color) => ("String", format!("\"{}\"", color.to_hex())),
        TokenValue::Dimension(dim) => {
            let converted = convert_dimension(token, dim, target)?;
            ("CGFloat", format_number(converted.value))
        }
        TokenValue::FontFamily(families) => {
            let quoted: Vec<String> = families.iter().map(|f| format!("\"{f}\"")).collect();
            ("[String]", format!("[{}]", quoted.join(", ")))
        }
        TokenValue::FontWeight(weight) => ("Int", weight.to_string()),
        TokenValue::Duration(duration) => {
            // TimeInterval is seconds.
            ("TimeInterval", format_number(duration.as_millis() / 1000.0))
        }
        TokenValue::CubicBezier(curve) => (
            "[Double]",
            format!(
                "[{}]",
                curve
                    .iter()
                    .map(|v| format_number(*v))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ),
        TokenValue::Number(n) => ("Double", format_number(*n)),
        TokenValue::StrokeStyle(style) => ("String", format!("\"{style}\"")),
        TokenValue::Shadow(_)
        | TokenValue::Gradient(_)
        | TokenValue::Typography(_)
        | TokenValue::Untyped(_) => {
            return Err(unsupported(token, target, "typed-constants"));
        }
    })
}
