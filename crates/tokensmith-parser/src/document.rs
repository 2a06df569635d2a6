//! Flattening one raw token document into token nodes
//!
//! A document is a nested tree of groups; a mapping with a `$value` key is
//! a leaf token. Group keys concatenate depth-first into the token path. A
//! `$type` on a group is inherited by leaves beneath it that do not declare
//! their own.

use serde_json::Value;
use std::collections::BTreeMap;

use tokensmith_core::graph::Deprecation;
use tokensmith_core::path::parse_reference;
use tokensmith_core::{RawValue, TokenNode, TokenPath, TokenType, TokenValue};

use crate::error::LoadError;

/// A named raw document, as handed over by the design-tool export.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub name: String,
    pub root: Value,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, root: Value) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Flatten the nested group tree into `path -> node` pairs.
    pub fn flatten(&self) -> Result<Vec<TokenNode>, LoadError> {
        let groups = self.root.as_object().ok_or_else(|| LoadError::Malformed {
            document: self.name.clone(),
            detail: "document root must be an object".to_string(),
        })?;

        let mut nodes = Vec::new();
        for (key, value) in groups {
            self.walk(key, value, None, None, &mut nodes)?;
        }
        Ok(nodes)
    }

    fn walk(
        &self,
        key: &str,
        value: &Value,
        parent: Option<&TokenPath>,
        inherited_type: Option<TokenType>,
        nodes: &mut Vec<TokenNode>,
    ) -> Result<(), LoadError> {
        if key.starts_with('$') {
            return Err(LoadError::Malformed {
                document: self.name.clone(),
                detail: format!("unexpected {key:?} outside a token object"),
            });
        }

        let path = match parent {
            Some(parent) => parent.child(key),
            None => TokenPath::parse(key),
        }
        .map_err(|source| LoadError::InvalidPath {
            document: self.name.clone(),
            source,
        })?;

        let object = value.as_object().ok_or_else(|| LoadError::Malformed {
            document: self.name.clone(),
            detail: format!("{path}: expected a group or token object"),
        })?;

        if object.contains_key("$value") {
            // A token object is a leaf; a nested child beside $value would
            // vanish without a trace if we accepted it.
            if let Some(extra) = object.keys().find(|k| !k.starts_with('$')) {
                return Err(LoadError::Malformed {
                    document: self.name.clone(),
                    detail: format!("{path}: token object has nested child {extra:?} beside $value"),
                });
            }
            nodes.push(self.leaf(path, object, inherited_type)?);
            return Ok(());
        }

        // Group: a `$type` here flows down to untyped leaves beneath it.
        let group_type = match object.get("$type") {
            Some(t) => Some(self.parse_type(&path, t)?),
            None => inherited_type,
        };
        for (child_key, child_value) in object {
            if child_key == "$type" || child_key == "$description" {
                continue;
            }
            self.walk(child_key, child_value, Some(&path), group_type, nodes)?;
        }
        Ok(())
    }

    fn leaf(
        &self,
        path: TokenPath,
        object: &serde_json::Map<String, Value>,
        inherited_type: Option<TokenType>,
    ) -> Result<TokenNode, LoadError> {
        let declared_type = match object.get("$type") {
            Some(t) => self.parse_type(&path, t)?,
            None => inherited_type.unwrap_or(TokenType::Untyped),
        };

        let value = object.get("$value").expect("checked by caller");
        let raw_value = self.parse_value(&path, declared_type, value)?;

        let description = object
            .get("$description")
            .and_then(Value::as_str)
            .map(str::to_string);

        let deprecated = match object.get("$deprecated") {
            Some(Value::Bool(true)) => Some(Deprecation { reason: None }),
            Some(Value::Bool(false)) | None => None,
            Some(Value::String(reason)) => Some(Deprecation {
                reason: Some(reason.clone()),
            }),
            Some(other) => {
                return Err(LoadError::Malformed {
                    document: self.name.clone(),
                    detail: format!("{path}: $deprecated must be a bool or string, got {other}"),
                })
            }
        };

        Ok(TokenNode {
            path,
            raw_value,
            declared_type,
            description,
            deprecated,
        })
    }

    fn parse_value(
        &self,
        path: &TokenPath,
        declared: TokenType,
        value: &Value,
    ) -> Result<RawValue, LoadError> {
        // A string of the form `{dot.path}` is an alias regardless of type.
        if let Some(reference) = value.as_str().and_then(parse_reference) {
            let target = reference.map_err(|source| LoadError::InvalidValue {
                document: self.name.clone(),
                path: path.clone(),
                source,
            })?;
            return Ok(RawValue::Reference(target));
        }

        if declared.is_composite() {
            return self.parse_composite(path, declared, value);
        }

        let literal =
            TokenValue::parse(declared, value).map_err(|source| LoadError::InvalidValue {
                document: self.name.clone(),
                path: path.clone(),
                source,
            })?;
        Ok(RawValue::Literal(literal))
    }

    fn parse_composite(
        &self,
        path: &TokenPath,
        declared: TokenType,
        value: &Value,
    ) -> Result<RawValue, LoadError> {
        let object = value.as_object().ok_or_else(|| LoadError::Malformed {
            document: self.name.clone(),
            detail: format!("{path}: {declared} value must be an object of fields"),
        })?;

        let mut fields = BTreeMap::new();
        for (field, field_value) in object {
            let field_type =
                composite_field_type(declared, field).ok_or_else(|| LoadError::Malformed {
                    document: self.name.clone(),
                    detail: format!("{path}: unknown {declared} field {field:?}"),
                })?;

            let raw = if let Some(reference) = field_value.as_str().and_then(parse_reference) {
                let target = reference.map_err(|source| LoadError::InvalidValue {
                    document: self.name.clone(),
                    path: path.clone(),
                    source,
                })?;
                RawValue::Reference(target)
            } else {
                let literal = TokenValue::parse(field_type, field_value).map_err(|source| {
                    LoadError::InvalidValue {
                        document: self.name.clone(),
                        path: path.clone(),
                        source,
                    }
                })?;
                RawValue::Literal(literal)
            };
            fields.insert(field.clone(), raw);
        }
        Ok(RawValue::Composite(fields))
    }

    fn parse_type(&self, path: &TokenPath, value: &Value) -> Result<TokenType, LoadError> {
        let keyword = value.as_str().ok_or_else(|| LoadError::Malformed {
            document: self.name.clone(),
            detail: format!("{path}: $type must be a string"),
        })?;
        TokenType::from_keyword(keyword).map_err(|_| LoadError::UnknownType {
            document: self.name.clone(),
            path: path.clone(),
            keyword: keyword.to_string(),
        })
    }
}

/// Expected type of a composite's component field.
fn composite_field_type(composite: TokenType, field: &str) -> Option<TokenType> {
    match (composite, field) {
        (TokenType::Shadow, "color") => Some(TokenType::Color),
        (TokenType::Shadow, "offsetX" | "offsetY" | "blur" | "spread") => {
            Some(TokenType::Dimension)
        }
        (TokenType::Typography, "fontFamily") => Some(TokenType::FontFamily),
        (TokenType::Typography, "fontSize" | "letterSpacing") => Some(TokenType::Dimension),
        (TokenType::Typography, "fontWeight") => Some(TokenType::FontWeight),
        (TokenType::Typography, "lineHeight") => Some(TokenType::Number),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn flattens_nested_groups_depth_first() {
        let doc = RawDocument::new(
            "base",
            json!({
                "color": {
                    "primary": {
                        "500": { "$type": "color", "$value": "#3B82F6" }
                    }
                },
                "spacing": {
                    "md": { "$type": "dimension", "$value": "16px" }
                }
            }),
        );
        let nodes = doc.flatten().unwrap();
        let paths: Vec<String> = nodes.iter().map(|n| n.path.to_string()).collect();
        assert_eq!(paths, ["color.primary.500", "spacing.md"]);
        assert_eq!(nodes[0].declared_type, TokenType::Color);
    }

    #[test]
    fn reference_values_are_detected() {
        let doc = RawDocument::new(
            "semantic",
            json!({
                "color": {
                    "button": {
                        "background": { "$type": "color", "$value": "{color.primary.500}" }
                    }
                }
            }),
        );
        let nodes = doc.flatten().unwrap();
        match &nodes[0].raw_value {
            RawValue::Reference(target) => {
                assert_eq!(target.to_string(), "color.primary.500");
            }
            other => panic!("expected reference, got {other:?}"),
        }
    }

    #[test]
    fn group_type_is_inherited_by_untyped_leaves() {
        let doc = RawDocument::new(
            "base",
            json!({
                "spacing": {
                    "$type": "dimension",
                    "sm": { "$value": "8px" },
                    "md": { "$value": "16px" }
                }
            }),
        );
        let nodes = doc.flatten().unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(nodes
            .iter()
            .all(|n| n.declared_type == TokenType::Dimension));
    }

    #[test]
    fn unknown_type_keyword_is_an_error() {
        let doc = RawDocument::new(
            "base",
            json!({
                "x": { "$type": "sparkle", "$value": "1" }
            }),
        );
        assert!(matches!(
            doc.flatten(),
            Err(LoadError::UnknownType { keyword, .. }) if keyword == "sparkle"
        ));
    }

    #[test]
    fn missing_type_loads_as_untyped() {
        let doc = RawDocument::new(
            "base",
            json!({
                "legacy": { "token": { "$value": "whatever" } }
            }),
        );
        let nodes = doc.flatten().unwrap();
        assert_eq!(nodes[0].declared_type, TokenType::Untyped);
    }

    #[test]
    fn deprecated_forms() {
        let doc = RawDocument::new(
            "base",
            json!({
                "a": { "$type": "number", "$value": 1, "$deprecated": true },
                "b": { "$type": "number", "$value": 2, "$deprecated": "use c instead" },
                "c": { "$type": "number", "$value": 3, "$deprecated": false }
            }),
        );
        let nodes = doc.flatten().unwrap();
        let by_path = |p: &str| nodes.iter().find(|n| n.path.to_string() == p).unwrap();
        assert_eq!(by_path("a").deprecated, Some(Deprecation { reason: None }));
        assert_eq!(
            by_path("b").deprecated.as_ref().unwrap().reason.as_deref(),
            Some("use c instead")
        );
        assert!(by_path("c").deprecated.is_none());
    }

    #[test]
    fn shadow_composite_with_mixed_fields() {
        let doc = RawDocument::new(
            "base",
            json!({
                "shadow": {
                    "card": {
                        "$type": "shadow",
                        "$value": {
                            "color": "{color.ink}",
                            "offsetX": "0px",
                            "offsetY": "2px",
                            "blur": "8px"
                        }
                    }
                }
            }),
        );
        let nodes = doc.flatten().unwrap();
        match &nodes[0].raw_value {
            RawValue::Composite(fields) => {
                assert!(matches!(fields["color"], RawValue::Reference(_)));
                assert!(matches!(fields["blur"], RawValue::Literal(_)));
            }
            other => panic!("expected composite, got {other:?}"),
        }
    }

    #[test]
    fn nested_child_beside_value_is_an_error() {
        let doc = RawDocument::new(
            "base",
            json!({
                "color": {
                    "primary": {
                        "$type": "color",
                        "$value": "#111111",
                        "500": { "$value": "#3B82F6" }
                    }
                }
            }),
        );
        assert!(matches!(
            doc.flatten(),
            Err(LoadError::Malformed { detail, .. }) if detail.contains("500")
        ));
    }

    #[test]
    fn malformed_shapes_are_rejected() {
        let not_object = RawDocument::new("x", json!(["nope"]));
        assert!(matches!(
            not_object.flatten(),
            Err(LoadError::Malformed { .. })
        ));

        let bad_color = RawDocument::new(
            "x",
            json!({ "c": { "$type": "color", "$value": "not-a-color" } }),
        );
        assert!(matches!(
            bad_color.flatten(),
            Err(LoadError::InvalidValue { .. })
        ));

        let unknown_field = RawDocument::new(
            "x",
            json!({ "s": { "$type": "shadow", "$value": { "glow": "4px" } } }),
        );
        assert!(matches!(
            unknown_field.flatten(),
            Err(LoadError::Malformed { .. })
        ));
    }
}
