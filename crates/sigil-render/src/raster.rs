//! Raster helpers over `tiny_skia::Pixmap`.
//!
//! Pixmaps store premultiplied RGBA. Everything crossing the crate
//! boundary as raw bytes (decoded uploads, pixel readback) is straight
//! alpha and converted here.

use sigil_core::{Color, LoadError, PixelBounds, SignatureOrigin, Size};
use tiny_skia::{ColorU8, IntRect, Pixmap};

/// A premultiplied RGBA pixel surface.
pub type Raster = Pixmap;

/// Allocate a fully transparent surface.
pub fn new_surface(width: u32, height: u32) -> Result<Raster, LoadError> {
    Pixmap::new(width, height).ok_or(LoadError::Surface { width, height })
}

/// Build a raster from straight-alpha RGBA bytes.
///
/// Returns `None` when the size is zero or does not match `rgba.len()`.
pub fn raster_from_rgba(width: u32, height: u32, rgba: &[u8]) -> Option<Raster> {
    if rgba.len() != (width as usize) * (height as usize) * 4 {
        return None;
    }
    let mut pixmap = Pixmap::new(width, height)?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.chunks_exact(4)) {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Some(pixmap)
}

/// Read back straight-alpha RGBA bytes.
pub fn raster_to_rgba(raster: &Raster) -> Vec<u8> {
    let mut out = Vec::with_capacity(raster.pixels().len() * 4);
    for px in raster.pixels() {
        let c = px.demultiply();
        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

pub fn to_skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

/// Tight bounding box of every pixel with non-zero alpha.
///
/// Scans the whole surface. Returns `None` when the opaque region is
/// empty or degenerate (`max <= min` on either axis).
pub fn opaque_bounds(raster: &Raster) -> Option<PixelBounds> {
    let width = raster.width();
    let mut min_x = raster.width();
    let mut min_y = raster.height();
    let mut max_x = 0;
    let mut max_y = 0;

    for (i, px) in raster.pixels().iter().enumerate() {
        if px.alpha() == 0 {
            continue;
        }
        let x = i as u32 % width;
        let y = i as u32 / width;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    if max_x <= min_x || max_y <= min_y {
        return None;
    }

    Some(PixelBounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Copy out the opaque bounding box of `raster`, with its offset.
pub fn crop_to_opaque(raster: &Raster) -> Option<(Raster, PixelBounds)> {
    let bounds = opaque_bounds(raster)?;
    let rect = IntRect::from_xywh(
        bounds.x as i32,
        bounds.y as i32,
        bounds.width,
        bounds.height,
    )?;
    let cropped = raster.clone_rect(rect)?;
    log::debug!(
        "cropped {}x{} surface to {}x{} at ({}, {})",
        raster.width(),
        raster.height(),
        bounds.width,
        bounds.height,
        bounds.x,
        bounds.y
    );
    Some((cropped, bounds))
}

/// The single live signature image, immutable once produced.
#[derive(Clone)]
pub struct SignatureAsset {
    image: Raster,
    origin: SignatureOrigin,
}

impl SignatureAsset {
    pub fn new(image: Raster, origin: SignatureOrigin) -> Self {
        Self { image, origin }
    }

    pub fn image(&self) -> &Raster {
        &self.image
    }

    pub fn origin(&self) -> SignatureOrigin {
        self.origin
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Intrinsic (unscaled) size in pixels.
    pub fn dims(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }
}

impl std::fmt::Debug for SignatureAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureAsset")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("origin", &self.origin)
            .finish()
    }
}
