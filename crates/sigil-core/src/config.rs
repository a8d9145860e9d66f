//! Editor configuration: transform limits, brush defaults, file limits and
//! timing policy.
//!
//! Every field has a default, so a partial JSON document (or none at all)
//! yields a complete config.

use crate::model::Color;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub limits: TransformLimits,
    pub drawing: DrawingConfig,
    pub files: FileLimits,
    pub timing: Timing,
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Bounds on the user-editable transform fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformLimits {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Presentation range for rotation sliders. Gestures may exceed it.
    pub min_rotation: f64,
    pub max_rotation: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
}

impl Default for TransformLimits {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 5.0,
            min_rotation: -180.0,
            max_rotation: 180.0,
            min_opacity: 0.0,
            max_opacity: 1.0,
        }
    }
}

impl TransformLimits {
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    pub fn clamp_rotation(&self, rotation: f64) -> f64 {
        rotation.clamp(self.min_rotation, self.max_rotation)
    }

    pub fn clamp_opacity(&self, opacity: f64) -> f64 {
        opacity.clamp(self.min_opacity, self.max_opacity)
    }
}

/// Brush defaults for signature drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrawingConfig {
    pub default_brush_size: f32,
    pub min_brush_size: f32,
    pub max_brush_size: f32,
    pub default_color: Color,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_brush_size: 3.0,
            min_brush_size: 1.0,
            max_brush_size: 20.0,
            default_color: Color::BLACK,
        }
    }
}

impl DrawingConfig {
    /// Clamp a brush size; non-finite input gives the default size.
    pub fn clamp_brush_size(&self, size: f32) -> f32 {
        if size.is_finite() {
            size.clamp(self.min_brush_size, self.max_brush_size)
        } else {
            self.default_brush_size
        }
    }
}

/// Limits applied to uploaded files and decoded images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileLimits {
    pub max_file_size: u64,
    pub min_file_size: u64,
    pub max_image_dimension: u32,
    pub min_image_dimension: u32,
    pub file_read_timeout_ms: u64,
    pub image_load_timeout_ms: u64,
}

impl Default for FileLimits {
    fn default() -> Self {
        Self {
            max_file_size: 5 * 1024 * 1024,
            min_file_size: 100,
            max_image_dimension: 4096,
            min_image_dimension: 1,
            file_read_timeout_ms: 30_000,
            image_load_timeout_ms: 10_000,
        }
    }
}

impl FileLimits {
    pub fn file_read_timeout(&self) -> Duration {
        Duration::from_millis(self.file_read_timeout_ms)
    }

    pub fn image_load_timeout(&self) -> Duration {
        Duration::from_millis(self.image_load_timeout_ms)
    }
}

/// Debounce intervals for rendering and autosave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timing {
    pub render_debounce_ms: u64,
    pub save_debounce_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            render_debounce_ms: 16,
            save_debounce_ms: 500,
        }
    }
}

impl Timing {
    pub fn render_debounce(&self) -> Duration {
        Duration::from_millis(self.render_debounce_ms)
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }
}
