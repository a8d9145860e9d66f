//! Drawing capture: freehand strokes into a raster, cropped to the
//! opaque bounding box on finish.
//!
//! The engine keeps two surfaces while armed. `committed` holds every
//! finished stroke; `surface` is `committed` plus the in-progress stroke,
//! re-stroked whole on each sample so round joins stay seamless and the
//! outline pass never overlaps an earlier main-color line. Only the
//! region the stroke painted last time is restored from `committed`, so
//! a sample costs the stroke's area, not the surface's.

use sigil_core::{Color, DrawingConfig, LoadError, PixelBounds};
use sigil_render::raster::{Raster, crop_to_opaque, new_surface, to_skia_color};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Stroke, Transform as SkTransform};

/// Brush used for subsequent strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSettings {
    pub size: f32,
    pub color: Color,
    /// Outline width on each side of the main line. `0` disables it.
    pub stroke_width: f32,
    pub stroke_color: Color,
}

impl BrushSettings {
    pub fn from_config(config: &DrawingConfig) -> Self {
        Self {
            size: config.default_brush_size,
            color: config.default_color,
            stroke_width: 0.0,
            stroke_color: Color::WHITE,
        }
    }
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self::from_config(&DrawingConfig::default())
    }
}

/// A finished drawing: the cropped image and where it sat on the surface.
#[derive(Debug, Clone)]
pub struct CapturedSignature {
    pub image: Raster,
    pub bounds: PixelBounds,
}

struct Armed {
    committed: Raster,
    surface: Raster,
    /// Samples of the in-progress stroke. Empty between strokes.
    stroke: Vec<(f32, f32)>,
    /// Where the in-progress stroke was last painted. Outside it,
    /// `surface` equals `committed`.
    painted: Option<Damage>,
}

/// Pixel rectangle `[x0, x1) × [y0, y1)` on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Damage {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl Damage {
    /// Bounds of `path` grown by `pad` on every side, clipped to `surface`.
    fn around(path: &tiny_skia::Path, pad: f32, surface: &Raster) -> Option<Self> {
        let b = path.bounds();
        let clip = |v: f32, max: u32| v.clamp(0.0, max as f32) as u32;
        let d = Damage {
            x0: clip((b.left() - pad).floor(), surface.width()),
            y0: clip((b.top() - pad).floor(), surface.height()),
            x1: clip((b.right() + pad).ceil(), surface.width()),
            y1: clip((b.bottom() + pad).ceil(), surface.height()),
        };
        (d.x1 > d.x0 && d.y1 > d.y0).then_some(d)
    }
}

/// Copy `region` from `src` into `dst`. Both surfaces share one size.
fn copy_region(dst: &mut Raster, src: &Raster, region: Damage) {
    let stride = src.width() as usize * 4;
    let (start, end) = (region.x0 as usize * 4, region.x1 as usize * 4);
    let src = src.data();
    let dst = dst.data_mut();
    for y in region.y0 as usize..region.y1 as usize {
        let row = y * stride;
        dst[row + start..row + end].copy_from_slice(&src[row + start..row + end]);
    }
}

pub struct CaptureEngine {
    config: DrawingConfig,
    brush: BrushSettings,
    armed: Option<Armed>,
}

impl Default for CaptureEngine {
    fn default() -> Self {
        Self::new(DrawingConfig::default())
    }
}

impl CaptureEngine {
    pub fn new(config: DrawingConfig) -> Self {
        Self {
            brush: BrushSettings::from_config(&config),
            config,
            armed: None,
        }
    }

    /// Arm the engine with a fresh transparent `width × height` surface.
    ///
    /// Re-arming discards any drawing in progress.
    pub fn begin(&mut self, width: u32, height: u32, brush: BrushSettings) -> Result<(), LoadError> {
        let committed = new_surface(width, height)?;
        let surface = committed.clone();
        self.brush = BrushSettings {
            size: self.config.clamp_brush_size(brush.size),
            stroke_width: if brush.stroke_width.is_finite() {
                brush.stroke_width.max(0.0)
            } else {
                0.0
            },
            ..brush
        };
        self.armed = Some(Armed {
            committed,
            surface,
            stroke: Vec::new(),
            painted: None,
        });
        log::debug!("drawing armed on {}x{} surface", width, height);
        Ok(())
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn is_stroking(&self) -> bool {
        self.armed.as_ref().is_some_and(|a| !a.stroke.is_empty())
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    /// Live preview of the drawing, including the stroke in progress.
    pub fn surface(&self) -> Option<&Raster> {
        self.armed.as_ref().map(|a| &a.surface)
    }

    /// Change size and color for subsequent strokes.
    pub fn update_brush(&mut self, size: f32, color: Color) {
        self.brush.size = self.config.clamp_brush_size(size);
        self.brush.color = color;
    }

    pub fn set_outline(&mut self, width: f32, color: Color) {
        self.brush.stroke_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.brush.stroke_color = color;
    }

    /// Begin a stroke at `(x, y)`. Returns `false` (and does nothing) when
    /// not armed or when the sample lies off the surface.
    pub fn stroke_start(&mut self, x: f64, y: f64) -> bool {
        let Some(armed) = self.armed.as_mut() else {
            return false;
        };
        if !on_surface(&armed.surface, x, y) {
            log::trace!("dropped stroke start ({}, {})", x, y);
            return false;
        }
        if !armed.stroke.is_empty() {
            armed.commit();
        }
        armed.stroke.push((x as f32, y as f32));
        true
    }

    /// Extend the current stroke to `(x, y)`. Off-surface and non-finite
    /// samples are dropped silently.
    pub fn stroke_move(&mut self, x: f64, y: f64) -> bool {
        let brush = self.brush;
        let Some(armed) = self.armed.as_mut() else {
            return false;
        };
        if armed.stroke.is_empty() || !on_surface(&armed.surface, x, y) {
            log::trace!("dropped stroke sample ({}, {})", x, y);
            return false;
        }
        armed.stroke.push((x as f32, y as f32));
        armed.redraw(&brush);
        true
    }

    /// Close the current stroke. The drawing stays open.
    pub fn stroke_end(&mut self) {
        if let Some(armed) = self.armed.as_mut()
            && !armed.stroke.is_empty()
        {
            armed.commit();
        }
    }

    /// End the session and crop the drawing to its opaque bounds.
    ///
    /// `None` means nothing was drawn. The surface is released either way.
    pub fn finish(&mut self) -> Option<CapturedSignature> {
        let armed = self.armed.take()?;
        let result = crop_to_opaque(&armed.surface).map(|(image, bounds)| CapturedSignature { image, bounds });
        match &result {
            Some(c) => log::debug!("drawing finished: {:?}", c.bounds),
            None => log::debug!("drawing finished with no opaque pixels"),
        }
        result
    }

    /// Discard the surface and any stroke without producing an asset.
    pub fn cancel(&mut self) {
        if self.armed.take().is_some() {
            log::debug!("drawing cancelled");
        }
    }
}

fn on_surface(surface: &Raster, x: f64, y: f64) -> bool {
    x.is_finite()
        && y.is_finite()
        && x >= 0.0
        && y >= 0.0
        && x <= surface.width() as f64
        && y <= surface.height() as f64
}

impl Armed {
    fn commit(&mut self) {
        if let Some(region) = self.painted.take() {
            copy_region(&mut self.committed, &self.surface, region);
        }
        self.stroke.clear();
    }

    fn redraw(&mut self, brush: &BrushSettings) {
        if let Some(region) = self.painted.take() {
            copy_region(&mut self.surface, &self.committed, region);
        }
        let Some(path) = polyline(&self.stroke) else {
            return;
        };

        let mut reach = brush.size;
        if brush.stroke_width > 0.0 {
            reach += 2.0 * brush.stroke_width;
            stroke_path(&mut self.surface, &path, reach, brush.stroke_color);
        }
        stroke_path(&mut self.surface, &path, brush.size, brush.color);

        // Half the widest line, plus room for anti-aliasing.
        self.painted = Damage::around(&path, reach / 2.0 + 2.0, &self.surface);
    }
}

fn polyline(points: &[(f32, f32)]) -> Option<tiny_skia::Path> {
    let (&(x0, y0), rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(x0, y0);
    for &(x, y) in rest {
        pb.line_to(x, y);
    }
    pb.finish()
}

fn stroke_path(surface: &mut Raster, path: &tiny_skia::Path, width: f32, color: Color) {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = true;
    let stroke = Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };
    surface.stroke_path(path, &paint, &stroke, SkTransform::identity(), None);
}
