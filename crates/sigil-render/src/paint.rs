//! Composition of background and signature onto a raster.
//!
//! Paint order: custom background fill (sticker kinds only), the template
//! image stretched to the surface, then the signature with its transform
//! and opacity applied about its own center.

use crate::raster::{Raster, new_surface, to_skia_color};
use sigil_core::{AssetKind, BackgroundSettings, BackgroundType, ExportError, LoadError, Transform};
use tiny_skia::{
    FilterQuality, GradientStop, LinearGradient, Paint, PixmapPaint, Point, Rect, SpreadMode,
    Transform as SkTransform,
};

/// Everything the compositor needs for one frame.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub background: Option<&'a Raster>,
    pub asset_kind: Option<AssetKind>,
    pub settings: &'a BackgroundSettings,
    pub signature: Option<(&'a Raster, &'a Transform)>,
}

/// A finished export: suggested file name plus PNG bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub filename: String,
    pub png: Vec<u8>,
}

/// Clear `canvas` and paint `scene` onto it.
///
/// The signature is drawn whether or not a background is set.
pub fn paint_scene(canvas: &mut Raster, scene: &Scene<'_>) {
    canvas.fill(tiny_skia::Color::TRANSPARENT);

    if let Some(background) = scene.background {
        if scene.asset_kind.is_some_and(AssetKind::is_sticker) {
            paint_custom_background(canvas, scene.settings);
        }
        paint_stretched(canvas, background);
    }

    if let Some((image, transform)) = scene.signature {
        paint_signature(canvas, image, transform);
    }
}

/// Allocate a fresh `width × height` surface and paint `scene` onto it.
pub fn compose(width: u32, height: u32, scene: &Scene<'_>) -> Result<Raster, LoadError> {
    let mut canvas = new_surface(width, height)?;
    paint_scene(&mut canvas, scene);
    Ok(canvas)
}

/// Compose `scene` on a `width × height` surface and encode it as PNG.
pub fn export_png(
    scene: &Scene<'_>,
    width: u32,
    height: u32,
    filename: String,
) -> Result<ExportedImage, ExportError> {
    if scene.background.is_none() {
        return Err(ExportError::NoBackground);
    }
    let canvas = compose(width, height, scene).map_err(|e| ExportError::Encode(e.to_string()))?;
    let png = canvas
        .encode_png()
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    log::info!("exported {} ({} bytes)", filename, png.len());
    Ok(ExportedImage { filename, png })
}

/// Owns the on-screen surface and repaints it per frame.
pub struct Compositor {
    canvas: Raster,
}

impl Compositor {
    pub fn new(width: u32, height: u32) -> Result<Self, LoadError> {
        Ok(Self {
            canvas: new_surface(width, height)?,
        })
    }

    /// Reallocate the surface when the template size changes.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), LoadError> {
        if self.canvas.width() != width || self.canvas.height() != height {
            log::debug!("compositor surface {}x{}", width, height);
            self.canvas = new_surface(width, height)?;
        }
        Ok(())
    }

    pub fn render(&mut self, scene: &Scene<'_>) -> &Raster {
        paint_scene(&mut self.canvas, scene);
        &self.canvas
    }

    pub fn canvas(&self) -> &Raster {
        &self.canvas
    }
}

// ─── Painters ────────────────────────────────────────────────────────────

fn full_rect(canvas: &Raster) -> Option<Rect> {
    Rect::from_xywh(0.0, 0.0, canvas.width() as f32, canvas.height() as f32)
}

fn paint_custom_background(canvas: &mut Raster, settings: &BackgroundSettings) {
    let Some(rect) = full_rect(canvas) else {
        return;
    };

    let mut paint = Paint::default();
    match settings.kind {
        BackgroundType::Original | BackgroundType::Transparent => return,
        BackgroundType::Solid => paint.set_color(to_skia_color(settings.solid_color)),
        BackgroundType::Gradient => {
            let (x0, y0, x1, y1) = settings
                .gradient_direction
                .endpoints(canvas.width() as f32, canvas.height() as f32);
            let shader = LinearGradient::new(
                Point::from_xy(x0, y0),
                Point::from_xy(x1, y1),
                vec![
                    GradientStop::new(0.0, to_skia_color(settings.gradient_color1)),
                    GradientStop::new(1.0, to_skia_color(settings.gradient_color2)),
                ],
                SpreadMode::Pad,
                SkTransform::identity(),
            );
            match shader {
                Some(shader) => paint.shader = shader,
                None => {
                    // Coincident endpoints on a zero-sized axis.
                    paint.set_color(to_skia_color(settings.gradient_color1));
                }
            }
        }
    }

    log::trace!("background fill {:?}", settings.kind);
    canvas.fill_rect(rect, &paint, SkTransform::identity(), None);
}

fn paint_stretched(canvas: &mut Raster, image: &Raster) {
    let sx = canvas.width() as f32 / image.width() as f32;
    let sy = canvas.height() as f32 / image.height() as f32;
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    canvas.draw_pixmap(0, 0, image.as_ref(), &paint, SkTransform::from_scale(sx, sy), None);
}

/// Affine mapping signature pixels onto the canvas: center the image on
/// the origin, scale, rotate, then move to the center of the placed box.
pub fn signature_affine(image: &Raster, transform: &Transform) -> SkTransform {
    let iw = image.width() as f32;
    let ih = image.height() as f32;
    let scale = transform.scale as f32;
    let cx = transform.x as f32 + iw * scale / 2.0;
    let cy = transform.y as f32 + ih * scale / 2.0;

    SkTransform::from_translate(cx, cy)
        .pre_concat(SkTransform::from_rotate(transform.rotation as f32))
        .pre_scale(scale, scale)
        .pre_translate(-iw / 2.0, -ih / 2.0)
}

fn paint_signature(canvas: &mut Raster, image: &Raster, transform: &Transform) {
    let paint = PixmapPaint {
        opacity: transform.opacity.clamp(0.0, 1.0) as f32,
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    log::trace!(
        "signature {}x{} at ({}, {}) scale {} rot {}",
        image.width(),
        image.height(),
        transform.x,
        transform.y,
        transform.scale,
        transform.rotation
    );
    canvas.draw_pixmap(
        0,
        0,
        image.as_ref(),
        &paint,
        signature_affine(image, transform),
        None,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::raster_from_rgba;
    use pretty_assertions::assert_eq;
    use sigil_core::Color;

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> Raster {
        let bytes: Vec<u8> = rgba.iter().copied().cycle().take((w * h * 4) as usize).collect();
        raster_from_rgba(w, h, &bytes).unwrap()
    }

    fn pixel(canvas: &Raster, x: u32, y: u32) -> [u8; 4] {
        let c = canvas.pixel(x, y).unwrap().demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    #[test]
    fn signature_is_painted_without_background() {
        let settings = BackgroundSettings {
            kind: BackgroundType::Solid,
            ..BackgroundSettings::default()
        };
        let sig = solid(4, 4, [0, 0, 0, 255]);
        let t = Transform::default().at(0.0, 0.0);
        let scene = Scene {
            background: None,
            asset_kind: Some(AssetKind::Sticker),
            settings: &settings,
            signature: Some((&sig, &t)),
        };
        let canvas = compose(8, 8, &scene).unwrap();
        assert_eq!(pixel(&canvas, 1, 1), [0, 0, 0, 255]);
        // No template means no custom fill either.
        assert_eq!(pixel(&canvas, 6, 6)[3], 0);
    }

    #[test]
    fn background_is_stretched_to_surface() {
        let settings = BackgroundSettings::default();
        let bg = solid(2, 2, [10, 200, 30, 255]);
        let scene = Scene {
            background: Some(&bg),
            asset_kind: Some(AssetKind::DiscordBanner),
            settings: &settings,
            signature: None,
        };
        let canvas = compose(20, 10, &scene).unwrap();
        assert_eq!(pixel(&canvas, 10, 5), [10, 200, 30, 255]);
    }

    #[test]
    fn solid_fill_shows_through_transparent_sticker() {
        let settings = BackgroundSettings {
            kind: BackgroundType::Solid,
            solid_color: Color::from_hex("#ff0000").unwrap(),
            ..BackgroundSettings::default()
        };
        let bg = solid(4, 4, [0, 0, 0, 0]);
        let scene = Scene {
            background: Some(&bg),
            asset_kind: Some(AssetKind::Sticker),
            settings: &settings,
            signature: None,
        };
        let canvas = compose(4, 4, &scene).unwrap();
        assert_eq!(pixel(&canvas, 2, 2), [255, 0, 0, 255]);

        // Non-sticker kinds ignore the setting.
        let scene = Scene {
            asset_kind: Some(AssetKind::TwitchBanner),
            ..scene
        };
        let canvas = compose(4, 4, &scene).unwrap();
        assert_eq!(pixel(&canvas, 2, 2)[3], 0);
    }

    #[test]
    fn signature_lands_at_transform_position() {
        let settings = BackgroundSettings::default();
        let bg = solid(4, 4, [255, 255, 255, 255]);
        let sig = solid(10, 10, [0, 0, 255, 255]);
        let t = Transform::default().at(20.0, 30.0);
        let scene = Scene {
            background: Some(&bg),
            asset_kind: Some(AssetKind::ProfilePicture),
            settings: &settings,
            signature: Some((&sig, &t)),
        };
        let canvas = compose(64, 64, &scene).unwrap();
        assert_eq!(pixel(&canvas, 25, 35), [0, 0, 255, 255]);
        assert_eq!(pixel(&canvas, 10, 10), [255, 255, 255, 255]);
        assert_eq!(pixel(&canvas, 40, 35), [255, 255, 255, 255]);
    }

    #[test]
    fn compositor_reuses_surface_until_resized() {
        let settings = BackgroundSettings::default();
        let bg = solid(2, 2, [9, 9, 9, 255]);
        let scene = Scene {
            background: Some(&bg),
            asset_kind: Some(AssetKind::Sticker),
            settings: &settings,
            signature: None,
        };
        let mut compositor = Compositor::new(8, 8).unwrap();
        assert_eq!(compositor.render(&scene).width(), 8);
        compositor.resize(16, 4).unwrap();
        let canvas = compositor.render(&scene);
        assert_eq!((canvas.width(), canvas.height()), (16, 4));
        assert_eq!(pixel(compositor.canvas(), 1, 1), [9, 9, 9, 255]);
    }

    #[test]
    fn export_requires_background() {
        let settings = BackgroundSettings::default();
        let scene = Scene {
            background: None,
            asset_kind: None,
            settings: &settings,
            signature: None,
        };
        assert!(matches!(
            export_png(&scene, 4, 4, "x.png".into()),
            Err(ExportError::NoBackground)
        ));
    }

    #[test]
    fn export_encodes_png_at_requested_size() {
        let settings = BackgroundSettings::default();
        let bg = solid(6, 3, [1, 2, 3, 255]);
        let scene = Scene {
            background: Some(&bg),
            asset_kind: Some(AssetKind::TwitterBanner),
            settings: &settings,
            signature: None,
        };
        let out = export_png(&scene, 6, 3, "banner.png".into()).unwrap();
        assert_eq!(out.filename, "banner.png");
        assert_eq!(&out.png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = tiny_skia::Pixmap::decode_png(&out.png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 3));
    }
}
