//! Strongly typed token values
//!
//! Source documents are loosely typed JSON; everything past the loader works
//! on this tagged union instead. Each variant knows how to parse itself from
//! the `$value` shape its `$type` implies, so shape errors surface as early
//! as possible.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::CoreError;
use crate::path::TokenPath;

/// Declared token type, from the document's `$type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenType {
    Color,
    Dimension,
    FontFamily,
    FontWeight,
    Duration,
    CubicBezier,
    Number,
    StrokeStyle,
    Shadow,
    Gradient,
    Typography,
    Untyped,
}

impl TokenType {
    /// Parse a `$type` keyword as it appears in source documents.
    pub fn from_keyword(keyword: &str) -> Result<Self, CoreError> {
        Ok(match keyword {
            "color" => Self::Color,
            "dimension" => Self::Dimension,
            "fontFamily" => Self::FontFamily,
            "fontWeight" => Self::FontWeight,
            "duration" => Self::Duration,
            "cubicBezier" => Self::CubicBezier,
            "number" => Self::Number,
            "strokeStyle" => Self::StrokeStyle,
            "shadow" => Self::Shadow,
            "gradient" => Self::Gradient,
            "typography" => Self::Typography,
            other => return Err(CoreError::UnknownType(other.to_string())),
        })
    }

    /// True when the two types may legally alias each other. `Untyped` is
    /// compatible with everything; it adopts the target's type at resolution.
    pub fn compatible_with(self, other: TokenType) -> bool {
        self == other || self == Self::Untyped || other == Self::Untyped
    }

    /// Composite types resolve field-by-field rather than as one literal.
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Shadow | Self::Typography)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Color => "color",
            Self::Dimension => "dimension",
            Self::FontFamily => "font-family",
            Self::FontWeight => "font-weight",
            Self::Duration => "duration",
            Self::CubicBezier => "cubic-bezier",
            Self::Number => "number",
            Self::StrokeStyle => "stroke-style",
            Self::Shadow => "shadow",
            Self::Gradient => "gradient",
            Self::Typography => "typography",
            Self::Untyped => "untyped",
        };
        write!(f, "{name}")
    }
}

/// An sRGB color with optional alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorValue {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<u8>,
}

impl ColorValue {
    /// Parse `#RRGGBB`, `#RRGGBBAA`, or functional `rgb()`/`rgba()`/`hsl()`
    /// notation.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        if let Some(hex) = raw.strip_prefix('#') {
            return Self::parse_hex(hex)
                .ok_or_else(|| shape_err(TokenType::Color, format!("bad hex literal {raw:?}")));
        }
        if let Some(args) = functional_args(raw, &["rgb", "rgba"]) {
            return Self::parse_rgb_args(&args)
                .ok_or_else(|| shape_err(TokenType::Color, format!("bad rgb() literal {raw:?}")));
        }
        if let Some(args) = functional_args(raw, &["hsl", "hsla"]) {
            return Self::parse_hsl_args(&args)
                .ok_or_else(|| shape_err(TokenType::Color, format!("bad hsl() literal {raw:?}")));
        }
        Err(shape_err(
            TokenType::Color,
            format!("expected hex or functional notation, got {raw:?}"),
        ))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        // Byte-indexed slicing below; a non-ASCII literal is malformed anyway.
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: None,
            }),
            8 => Some(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: Some(byte(6)?),
            }),
            _ => None,
        }
    }

    fn parse_rgb_args(args: &[String]) -> Option<Self> {
        if args.len() != 3 && args.len() != 4 {
            return None;
        }
        let channel = |s: &str| -> Option<u8> {
            let v: f64 = s.trim().parse().ok()?;
            if !(0.0..=255.0).contains(&v) {
                return None;
            }
            Some(v.round() as u8)
        };
        let a = match args.get(3) {
            Some(s) => {
                let v: f64 = s.trim().parse().ok()?;
                if !(0.0..=1.0).contains(&v) {
                    return None;
                }
                Some((v * 255.0).round() as u8)
            }
            None => None,
        };
        Some(Self {
            r: channel(&args[0])?,
            g: channel(&args[1])?,
            b: channel(&args[2])?,
            a,
        })
    }

    fn parse_hsl_args(args: &[String]) -> Option<Self> {
        if args.len() != 3 {
            return None;
        }
        let h: f64 = args[0].trim().trim_end_matches("deg").parse().ok()?;
        let pct = |s: &str| -> Option<f64> {
            let v: f64 = s.trim().strip_suffix('%')?.parse().ok()?;
            if !(0.0..=100.0).contains(&v) {
                return None;
            }
            Some(v / 100.0)
        };
        let (r, g, b) = hsl_to_rgb(h.rem_euclid(360.0), pct(&args[1])?, pct(&args[2])?);
        Some(Self { r, g, b, a: None })
    }

    /// Canonical lowercase hex form, used for deterministic emission.
    pub fn to_hex(self) -> String {
        match self.a {
            Some(a) => format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, a),
            None => format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b),
        }
    }

    /// Hue (degrees), saturation and lightness (0..1). Drift classification
    /// measures perceptual distance in this space.
    pub fn to_hsl(self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;
        if delta == 0.0 {
            return (0.0, 0.0, l);
        }
        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * (((g - b) / delta).rem_euclid(6.0))
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        (h, s, l)
    }
}

fn functional_args(raw: &str, names: &[&str]) -> Option<Vec<String>> {
    for name in names {
        if let Some(rest) = raw.strip_prefix(name) {
            let inner = rest.trim().strip_prefix('(')?.strip_suffix(')')?;
            let sep = if inner.contains(',') { ',' } else { ' ' };
            return Some(
                inner
                    .split(sep)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
        }
    }
    None
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to8 = |v: f64| ((v + m) * 255.0).round() as u8;
    (to8(r), to8(g), to8(b))
}

/// A length with an explicit unit, e.g. `16px` or `1.5rem`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionValue {
    pub value: f64,
    pub unit: String,
}

impl DimensionValue {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        let split = raw
            .char_indices()
            .find(|(_, c)| c.is_ascii_alphabetic() || *c == '%')
            .map(|(i, _)| i)
            .unwrap_or(raw.len());
        let (number, unit) = raw.split_at(split);
        let value: f64 = number.trim().parse().map_err(|_| {
            shape_err(
                TokenType::Dimension,
                format!("expected <number><unit>, got {raw:?}"),
            )
        })?;
        if unit.is_empty() {
            return Err(shape_err(
                TokenType::Dimension,
                format!("missing unit in {raw:?}"),
            ));
        }
        Ok(Self {
            value,
            unit: unit.to_string(),
        })
    }
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit)
    }
}

/// A time span, `300ms` or `2s`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationValue {
    pub value: f64,
    pub unit: String,
}

impl DurationValue {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let dim = DimensionValue::parse(raw.trim())
            .map_err(|_| shape_err(TokenType::Duration, format!("bad duration {raw:?}")))?;
        if dim.unit != "ms" && dim.unit != "s" {
            return Err(shape_err(
                TokenType::Duration,
                format!("unit must be ms or s, got {:?}", dim.unit),
            ));
        }
        Ok(Self {
            value: dim.value,
            unit: dim.unit,
        })
    }

    pub fn as_millis(&self) -> f64 {
        if self.unit == "s" {
            self.value * 1000.0
        } else {
            self.value
        }
    }
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit)
    }
}

/// One stop of a gradient; positions are 0..1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: ColorValue,
    pub position: f64,
}

/// Resolved shadow composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowValue {
    pub color: ColorValue,
    pub offset_x: DimensionValue,
    pub offset_y: DimensionValue,
    pub blur: DimensionValue,
    pub spread: Option<DimensionValue>,
}

/// Resolved typography composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypographyValue {
    pub font_family: Vec<String>,
    pub font_size: DimensionValue,
    pub font_weight: u16,
    pub line_height: f64,
    pub letter_spacing: Option<DimensionValue>,
}

/// A fully concrete token value with no remaining references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum TokenValue {
    Color(ColorValue),
    Dimension(DimensionValue),
    FontFamily(Vec<String>),
    FontWeight(u16),
    Duration(DurationValue),
    CubicBezier([f64; 4]),
    Number(f64),
    StrokeStyle(String),
    Shadow(ShadowValue),
    Gradient(Vec<GradientStop>),
    Typography(TypographyValue),
    /// Leaf with no `$type`; kept verbatim so governance can flag it.
    Untyped(String),
}

const STROKE_STYLES: &[&str] = &[
    "solid", "dashed", "dotted", "double", "groove", "ridge", "outset", "inset",
];

impl TokenValue {
    /// Parse a literal `$value` against its declared type.
    pub fn parse(ty: TokenType, value: &serde_json::Value) -> Result<Self, CoreError> {
        use serde_json::Value as J;
        match ty {
            TokenType::Color => Ok(Self::Color(ColorValue::parse(expect_str(ty, value)?)?)),
            TokenType::Dimension => Ok(Self::Dimension(DimensionValue::parse(expect_str(
                ty, value,
            )?)?)),
            TokenType::Duration => Ok(Self::Duration(DurationValue::parse(expect_str(
                ty, value,
            )?)?)),
            TokenType::FontFamily => match value {
                J::String(s) => Ok(Self::FontFamily(vec![s.clone()])),
                J::Array(items) => {
                    let families = items
                        .iter()
                        .map(|v| {
                            v.as_str()
                                .map(str::to_string)
                                .ok_or_else(|| shape_err(ty, "family entries must be strings"))
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    if families.is_empty() {
                        return Err(shape_err(ty, "empty font family list"));
                    }
                    Ok(Self::FontFamily(families))
                }
                _ => Err(shape_err(ty, "expected string or array of strings")),
            },
            TokenType::FontWeight => match value {
                J::Number(n) => {
                    let w = n
                        .as_u64()
                        .filter(|w| (1..=1000).contains(w))
                        .ok_or_else(|| shape_err(ty, "weight must be 1..=1000"))?;
                    Ok(Self::FontWeight(w as u16))
                }
                J::String(s) => {
                    let w = match s.as_str() {
                        "thin" => 100,
                        "light" => 300,
                        "normal" | "regular" => 400,
                        "medium" => 500,
                        "semibold" => 600,
                        "bold" => 700,
                        "black" => 900,
                        other => return Err(shape_err(ty, format!("unknown keyword {other:?}"))),
                    };
                    Ok(Self::FontWeight(w))
                }
                _ => Err(shape_err(ty, "expected number or keyword")),
            },
            TokenType::CubicBezier => {
                let items = value
                    .as_array()
                    .filter(|a| a.len() == 4)
                    .ok_or_else(|| shape_err(ty, "expected [x1, y1, x2, y2]"))?;
                let mut curve = [0.0f64; 4];
                for (i, item) in items.iter().enumerate() {
                    curve[i] = item
                        .as_f64()
                        .ok_or_else(|| shape_err(ty, "control points must be numbers"))?;
                }
                Ok(Self::CubicBezier(curve))
            }
            TokenType::Number => Ok(Self::Number(
                value
                    .as_f64()
                    .ok_or_else(|| shape_err(ty, "expected number"))?,
            )),
            TokenType::StrokeStyle => {
                let style = expect_str(ty, value)?;
                if !STROKE_STYLES.contains(&style) {
                    return Err(shape_err(ty, format!("unknown stroke style {style:?}")));
                }
                Ok(Self::StrokeStyle(style.to_string()))
            }
            TokenType::Gradient => {
                let items = value
                    .as_array()
                    .ok_or_else(|| shape_err(ty, "expected array of stops"))?;
                let mut stops = Vec::with_capacity(items.len());
                for item in items {
                    let color = item
                        .get("color")
                        .and_then(J::as_str)
                        .ok_or_else(|| shape_err(ty, "stop missing color"))?;
                    let position = item
                        .get("position")
                        .and_then(J::as_f64)
                        .filter(|p| (0.0..=1.0).contains(p))
                        .ok_or_else(|| shape_err(ty, "stop missing position in 0..1"))?;
                    stops.push(GradientStop {
                        color: ColorValue::parse(color)?,
                        position,
                    });
                }
                if stops.len() < 2 {
                    return Err(shape_err(ty, "gradient needs at least two stops"));
                }
                Ok(Self::Gradient(stops))
            }
            // Composites come back together via from_composite after their
            // fields resolve independently.
            TokenType::Shadow | TokenType::Typography => Err(shape_err(
                ty,
                "composite types are assembled from resolved fields",
            )),
            TokenType::Untyped => match value {
                J::String(s) => Ok(Self::Untyped(s.clone())),
                other => Ok(Self::Untyped(other.to_string())),
            },
        }
    }

    /// Recombine independently resolved fields into a composite value.
    pub fn from_composite(
        ty: TokenType,
        path: &TokenPath,
        fields: &BTreeMap<String, TokenValue>,
    ) -> Result<Self, CoreError> {
        let missing = |field: &str| {
            shape_err(ty, format!("{path}: composite field {field:?} is missing"))
        };
        match ty {
            TokenType::Shadow => Ok(Self::Shadow(ShadowValue {
                color: fields
                    .get("color")
                    .and_then(TokenValue::as_color)
                    .ok_or_else(|| missing("color"))?,
                offset_x: fields
                    .get("offsetX")
                    .and_then(TokenValue::as_dimension)
                    .ok_or_else(|| missing("offsetX"))?,
                offset_y: fields
                    .get("offsetY")
                    .and_then(TokenValue::as_dimension)
                    .ok_or_else(|| missing("offsetY"))?,
                blur: fields
                    .get("blur")
                    .and_then(TokenValue::as_dimension)
                    .ok_or_else(|| missing("blur"))?,
                spread: fields.get("spread").and_then(TokenValue::as_dimension),
            })),
            TokenType::Typography => Ok(Self::Typography(TypographyValue {
                font_family: match fields.get("fontFamily") {
                    Some(TokenValue::FontFamily(families)) => families.clone(),
                    _ => return Err(missing("fontFamily")),
                },
                font_size: fields
                    .get("fontSize")
                    .and_then(TokenValue::as_dimension)
                    .ok_or_else(|| missing("fontSize"))?,
                font_weight: match fields.get("fontWeight") {
                    Some(TokenValue::FontWeight(w)) => *w,
                    _ => return Err(missing("fontWeight")),
                },
                line_height: match fields.get("lineHeight") {
                    Some(TokenValue::Number(n)) => *n,
                    _ => return Err(missing("lineHeight")),
                },
                letter_spacing: fields.get("letterSpacing").and_then(TokenValue::as_dimension),
            })),
            other => Err(shape_err(other, "not a composite type")),
        }
    }

    /// The effective type of this value.
    pub fn token_type(&self) -> TokenType {
        match self {
            Self::Color(_) => TokenType::Color,
            Self::Dimension(_) => TokenType::Dimension,
            Self::FontFamily(_) => TokenType::FontFamily,
            Self::FontWeight(_) => TokenType::FontWeight,
            Self::Duration(_) => TokenType::Duration,
            Self::CubicBezier(_) => TokenType::CubicBezier,
            Self::Number(_) => TokenType::Number,
            Self::StrokeStyle(_) => TokenType::StrokeStyle,
            Self::Shadow(_) => TokenType::Shadow,
            Self::Gradient(_) => TokenType::Gradient,
            Self::Typography(_) => TokenType::Typography,
            Self::Untyped(_) => TokenType::Untyped,
        }
    }

    pub fn as_color(&self) -> Option<ColorValue> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_dimension(&self) -> Option<DimensionValue> {
        match self {
            Self::Dimension(d) => Some(d.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(c) => write!(f, "{}", c.to_hex()),
            Self::Dimension(d) => write!(f, "{d}"),
            Self::FontFamily(families) => write!(f, "{}", families.join(", ")),
            Self::FontWeight(w) => write!(f, "{w}"),
            Self::Duration(d) => write!(f, "{d}"),
            Self::CubicBezier([x1, y1, x2, y2]) => write!(
                f,
                "cubic-bezier({}, {}, {}, {})",
                format_number(*x1),
                format_number(*y1),
                format_number(*x2),
                format_number(*y2)
            ),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::StrokeStyle(s) => write!(f, "{s}"),
            Self::Shadow(s) => {
                write!(f, "{} {} {}", s.offset_x, s.offset_y, s.blur)?;
                if let Some(spread) = &s.spread {
                    write!(f, " {spread}")?;
                }
                write!(f, " {}", s.color.to_hex())
            }
            Self::Gradient(stops) => {
                let rendered: Vec<String> = stops
                    .iter()
                    .map(|s| {
                        format!(
                            "{} {}%",
                            s.color.to_hex(),
                            format_number(s.position * 100.0)
                        )
                    })
                    .collect();
                write!(f, "linear-gradient(180deg, {})", rendered.join(", "))
            }
            Self::Typography(t) => write!(
                f,
                "{} {}/{} {}",
                t.font_weight,
                t.font_size,
                format_number(t.line_height),
                t.font_family.join(", ")
            ),
            Self::Untyped(s) => write!(f, "{s}"),
        }
    }
}

/// Unresolved value as loaded from a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Literal(TokenValue),
    Reference(TokenPath),
    /// Composite whose fields may themselves be literals or references.
    Composite(BTreeMap<String, RawValue>),
}

impl RawValue {
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
            || matches!(self, Self::Composite(fields)
                if fields.values().any(RawValue::is_reference))
    }
}

/// Render a float without a trailing `.0` so emitted artifacts stay stable
/// and readable.
pub fn format_number(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn shape_err(expected: TokenType, detail: impl Into<String>) -> CoreError {
    CoreError::ValueShape {
        expected,
        detail: detail.into(),
    }
}

fn expect_str<'v>(ty: TokenType, value: &'v serde_json::Value) -> Result<&'v str, CoreError> {
    value
        .as_str()
        .ok_or_else(|| shape_err(ty, "expected string"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn color_hex_round_trip() {
        let c = ColorValue::parse("#3B82F6").unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (0x3b, 0x82, 0xf6, None));
        assert_eq!(c.to_hex(), "#3b82f6");

        let with_alpha = ColorValue::parse("#3B82F680").unwrap();
        assert_eq!(with_alpha.a, Some(0x80));
    }

    #[test]
    fn color_functional_notation() {
        let rgb = ColorValue::parse("rgb(59, 130, 246)").unwrap();
        assert_eq!(rgb.to_hex(), "#3b82f6");

        let hsl = ColorValue::parse("hsl(0, 100%, 50%)").unwrap();
        assert_eq!(hsl.to_hex(), "#ff0000");

        assert!(ColorValue::parse("#xyz").is_err());
        assert!(ColorValue::parse("blue").is_err());
    }

    #[test]
    fn non_ascii_hex_literal_is_an_error() {
        // Six bytes but a multibyte char straddles the first channel.
        assert!(ColorValue::parse("#a\u{e9}bcd").is_err());
        assert!(ColorValue::parse("#éébcd").is_err());
    }

    #[test]
    fn hsl_round_trip_for_primaries() {
        let red = ColorValue::parse("#ff0000").unwrap();
        let (h, s, l) = red.to_hsl();
        assert!(h.abs() < 1e-9);
        assert!((s - 1.0).abs() < 1e-9);
        assert!((l - 0.5).abs() < 1e-9);

        let blue = ColorValue::parse("#0000ff").unwrap();
        let (h, _, _) = blue.to_hsl();
        assert!((h - 240.0).abs() < 1e-9);
    }

    #[test]
    fn dimension_parse() {
        let d = DimensionValue::parse("16px").unwrap();
        assert_eq!(d.value, 16.0);
        assert_eq!(d.unit, "px");
        assert_eq!(d.to_string(), "16px");

        let rem = DimensionValue::parse("1.5rem").unwrap();
        assert_eq!(rem.value, 1.5);

        let pct = DimensionValue::parse("50%").unwrap();
        assert_eq!(pct.unit, "%");

        assert!(DimensionValue::parse("16").is_err());
        assert!(DimensionValue::parse("px").is_err());
    }

    #[test]
    fn duration_parse_and_millis() {
        let ms = DurationValue::parse("300ms").unwrap();
        assert_eq!(ms.as_millis(), 300.0);
        let s = DurationValue::parse("2s").unwrap();
        assert_eq!(s.as_millis(), 2000.0);
        assert!(DurationValue::parse("3min").is_err());
    }

    #[test]
    fn font_weight_keywords() {
        let bold = TokenValue::parse(TokenType::FontWeight, &serde_json::json!("bold")).unwrap();
        assert_eq!(bold, TokenValue::FontWeight(700));

        let numeric = TokenValue::parse(TokenType::FontWeight, &serde_json::json!(450)).unwrap();
        assert_eq!(numeric, TokenValue::FontWeight(450));

        assert!(TokenValue::parse(TokenType::FontWeight, &serde_json::json!(1200)).is_err());
    }

    #[test]
    fn cubic_bezier_shape() {
        let curve =
            TokenValue::parse(TokenType::CubicBezier, &serde_json::json!([0.4, 0.0, 0.2, 1.0]))
                .unwrap();
        assert_eq!(curve, TokenValue::CubicBezier([0.4, 0.0, 0.2, 1.0]));
        assert!(TokenValue::parse(TokenType::CubicBezier, &serde_json::json!([0.4, 0.0])).is_err());
    }

    #[test]
    fn gradient_needs_two_stops() {
        let good = serde_json::json!([
            { "color": "#ff0000", "position": 0.0 },
            { "color": "#0000ff", "position": 1.0 }
        ]);
        assert!(TokenValue::parse(TokenType::Gradient, &good).is_ok());

        let short = serde_json::json!([{ "color": "#ff0000", "position": 0.0 }]);
        assert!(TokenValue::parse(TokenType::Gradient, &short).is_err());
    }

    #[test]
    fn composite_assembly() {
        let path = TokenPath::parse("type.body").unwrap();
        let mut fields = BTreeMap::new();
        fields.insert(
            "fontFamily".to_string(),
            TokenValue::FontFamily(vec!["Inter".to_string()]),
        );
        fields.insert(
            "fontSize".to_string(),
            TokenValue::Dimension(DimensionValue::parse("16px").unwrap()),
        );
        fields.insert("fontWeight".to_string(), TokenValue::FontWeight(400));
        fields.insert("lineHeight".to_string(), TokenValue::Number(1.5));

        let typography =
            TokenValue::from_composite(TokenType::Typography, &path, &fields).unwrap();
        assert_eq!(typography.token_type(), TokenType::Typography);

        fields.remove("fontSize");
        assert!(TokenValue::from_composite(TokenType::Typography, &path, &fields).is_err());
    }

    #[test]
    fn number_formatting_trims_trailing_zero() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-2.0), "-2");
    }
}
