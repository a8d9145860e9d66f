//! Core data model for a signature composition.
//!
//! A composition is one background template plus at most one signature
//! overlay. The overlay is placed by a `Transform` value; every edit
//! produces a new `Transform` rather than mutating a shared one, so the
//! snapshot a gesture starts from can never alias the live value.

use crate::config::TransformLimits;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| {
            let hi = hex_val(bytes[i])?;
            let lo = hex_val(bytes[i + 1])?;
            Some((hi << 4 | lo) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Parse a color typed or picked by the user.
    ///
    /// Only the opaque `#RGB` and `#RRGGBB` forms are accepted; the leading
    /// `#` is required. Anything else yields `None`.
    pub fn from_user_hex(input: &str) -> Option<Self> {
        let digits = input.strip_prefix('#')?;
        if !matches!(digits.len(), 3 | 6) {
            return None;
        }
        Self::from_hex(digits)
    }

    /// Like [`Color::from_user_hex`], falling back to white.
    pub fn user_or_white(input: &str) -> Self {
        Self::from_user_hex(input).unwrap_or_else(|| {
            log::warn!("rejected color input {input:?}, using white");
            Self::WHITE
        })
    }

    /// 8-bit channels, rounded.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Emit as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color {s:?}")))
    }
}

// ─── Transform ───────────────────────────────────────────────────────────

/// Placement of the signature overlay on the composite.
///
/// `x`/`y` are the top-left of the scaled (unrotated) signature box,
/// `rotation` is in degrees about the box center, `opacity` is a global
/// alpha multiplier for the signature draw only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation: f64,
    pub opacity: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 100.0,
            y: 100.0,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

impl Transform {
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn at(self, x: f64, y: f64) -> Self {
        Self { x, y, ..self }
    }

    /// Replace the scale, clamped to `limits`.
    pub fn with_scale(self, scale: f64, limits: &TransformLimits) -> Self {
        Self {
            scale: limits.clamp_scale(scale),
            ..self
        }
    }

    pub fn with_rotation(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    pub fn with_opacity(self, opacity: f64, limits: &TransformLimits) -> Self {
        Self {
            opacity: limits.clamp_opacity(opacity),
            ..self
        }
    }

    /// Pull scale and opacity back into range. Rotation is unbounded and
    /// kept as-is. Non-finite fields fall back to the default placement.
    pub fn clamped(self, limits: &TransformLimits) -> Self {
        let fallback = Self::default();
        let finite_or = |v: f64, d: f64| if v.is_finite() { v } else { d };
        Self {
            x: finite_or(self.x, fallback.x),
            y: finite_or(self.y, fallback.y),
            scale: limits.clamp_scale(finite_or(self.scale, fallback.scale)),
            rotation: finite_or(self.rotation, fallback.rotation),
            opacity: limits.clamp_opacity(finite_or(self.opacity, fallback.opacity)),
        }
    }
}

/// A named scalar field of [`Transform`], as driven by a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformField {
    X,
    Y,
    Scale,
    Rotation,
    Opacity,
}

impl TransformField {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "scale" => Some(Self::Scale),
            "rotation" => Some(Self::Rotation),
            "opacity" => Some(Self::Opacity),
            _ => None,
        }
    }
}

// ─── Signature ───────────────────────────────────────────────────────────

/// Where a signature asset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureOrigin {
    Drawn,
    Uploaded,
}

/// One of the five draggable affordances around the selection box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    #[serde(rename = "rotate")]
    Rotate,
    #[serde(rename = "tl")]
    TopLeft,
    #[serde(rename = "tr")]
    TopRight,
    #[serde(rename = "bl")]
    BottomLeft,
    #[serde(rename = "br")]
    BottomRight,
}

impl Handle {
    pub const ALL: [Handle; 5] = [
        Handle::Rotate,
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "rotate" => Some(Self::Rotate),
            "tl" => Some(Self::TopLeft),
            "tr" => Some(Self::TopRight),
            "bl" => Some(Self::BottomLeft),
            "br" => Some(Self::BottomRight),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Rotate => "rotate",
            Self::TopLeft => "tl",
            Self::TopRight => "tr",
            Self::BottomLeft => "bl",
            Self::BottomRight => "br",
        }
    }

    /// Signed multipliers applied to the pointer delta for a corner
    /// resize. `None` for the rotate handle.
    pub fn resize_signs(self) -> Option<(f64, f64)> {
        match self {
            Self::Rotate => None,
            Self::BottomRight => Some((1.0, 1.0)),
            Self::TopLeft => Some((-1.0, -1.0)),
            Self::TopRight => Some((1.0, -1.0)),
            Self::BottomLeft => Some((-1.0, 1.0)),
        }
    }
}

/// Axis-aligned pixel rectangle inside a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

// ─── Background ──────────────────────────────────────────────────────────

/// How the area behind a sticker-class template is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    #[default]
    Original,
    Solid,
    Gradient,
    Transparent,
}

impl BackgroundType {
    /// Parse a UI key. Unknown keys fall back to `Original`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "solid" => Self::Solid,
            "gradient" => Self::Gradient,
            "transparent" => Self::Transparent,
            _ => Self::Original,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    #[default]
    ToBottom,
    ToRight,
    ToBottomRight,
    ToBottomLeft,
}

impl GradientDirection {
    /// Parse a UI key. Unknown keys fall back to `ToBottom`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "to-right" => Self::ToRight,
            "to-bottom-right" => Self::ToBottomRight,
            "to-bottom-left" => Self::ToBottomLeft,
            _ => Self::ToBottom,
        }
    }

    /// Gradient axis `(x0, y0, x1, y1)` spanning a `width × height` surface.
    pub fn endpoints(self, width: f32, height: f32) -> (f32, f32, f32, f32) {
        match self {
            Self::ToBottom => (0.0, 0.0, 0.0, height),
            Self::ToRight => (0.0, 0.0, width, 0.0),
            Self::ToBottomRight => (0.0, 0.0, width, height),
            Self::ToBottomLeft => (width, 0.0, 0.0, height),
        }
    }
}

/// Which of the background colors a picker edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Solid,
    Gradient1,
    Gradient2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundSettings {
    #[serde(rename = "type")]
    pub kind: BackgroundType,
    pub solid_color: Color,
    pub gradient_color1: Color,
    pub gradient_color2: Color,
    pub gradient_direction: GradientDirection,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            kind: BackgroundType::Original,
            solid_color: Color::WHITE,
            gradient_color1: Color::WHITE,
            gradient_color2: Color::BLACK,
            gradient_direction: GradientDirection::ToBottom,
        }
    }
}

impl BackgroundSettings {
    pub fn set_color(&mut self, slot: ColorSlot, color: Color) {
        match slot {
            ColorSlot::Solid => self.solid_color = color,
            ColorSlot::Gradient1 => self.gradient_color1 = color,
            ColorSlot::Gradient2 => self.gradient_color2 = color,
        }
    }
}
