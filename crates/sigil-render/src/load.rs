//! Image loading: header sniffing, dimension policy, decode, and the
//! async wrappers that bound file reads and decodes with timeouts.

use crate::raster::{Raster, raster_from_rgba};
use image::ImageReader;
use sigil_core::registry::template_path;
use sigil_core::{AssetKind, FileLimits, LoadError, ReadError, Team};
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

/// Pixel-size bounds and decode timeout applied to every loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePolicy {
    pub min_dimension: u32,
    pub max_dimension: u32,
    pub timeout: Duration,
}

impl From<&FileLimits> for ImagePolicy {
    fn from(limits: &FileLimits) -> Self {
        Self {
            min_dimension: limits.min_image_dimension,
            max_dimension: limits.max_image_dimension,
            timeout: limits.image_load_timeout(),
        }
    }
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self::from(&FileLimits::default())
    }
}

impl ImagePolicy {
    pub fn check(&self, width: u32, height: u32) -> Result<(), LoadError> {
        if width > self.max_dimension || height > self.max_dimension {
            return Err(LoadError::TooLarge {
                width,
                height,
                max: self.max_dimension,
            });
        }
        if width < self.min_dimension || height < self.min_dimension {
            return Err(LoadError::TooSmall {
                width,
                height,
                min: self.min_dimension,
            });
        }
        Ok(())
    }
}

fn reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, LoadError> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    if reader.format().is_none() {
        return Err(LoadError::UnsupportedFormat);
    }
    Ok(reader)
}

/// Read only the header and return `(width, height)`.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32), LoadError> {
    reader(bytes)?
        .into_dimensions()
        .map_err(|e| LoadError::Decode(e.to_string()))
}

/// Decode `bytes` into a raster, rejecting out-of-policy sizes before
/// any pixel data is decoded.
pub fn decode_image(bytes: &[u8], policy: &ImagePolicy) -> Result<Raster, LoadError> {
    let (width, height) = probe_dimensions(bytes)?;
    policy.check(width, height)?;

    let rgba = reader(bytes)?
        .decode()
        .map_err(|e| LoadError::Decode(e.to_string()))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("decoded {}x{} image ({} bytes)", width, height, bytes.len());

    raster_from_rgba(width, height, rgba.as_raw()).ok_or(LoadError::Surface { width, height })
}

/// Decode on a blocking task, giving up after `policy.timeout`.
pub async fn load_image(bytes: Vec<u8>, policy: ImagePolicy) -> Result<Raster, LoadError> {
    let task = tokio::task::spawn_blocking(move || decode_image(&bytes, &policy));
    match tokio::time::timeout(policy.timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join)) => Err(LoadError::Decode(join.to_string())),
        Err(_) => {
            log::warn!("image decode exceeded {:?}", policy.timeout);
            Err(LoadError::Timeout(policy.timeout))
        }
    }
}

/// Read a whole file, giving up after `timeout`.
pub async fn read_file(path: impl AsRef<Path>, timeout: Duration) -> Result<Vec<u8>, ReadError> {
    let path = path.as_ref();
    match tokio::time::timeout(timeout, tokio::fs::read(path)).await {
        Ok(bytes) => Ok(bytes?),
        Err(_) => {
            log::warn!("read of {} exceeded {:?}", path.display(), timeout);
            Err(ReadError::Timeout(timeout))
        }
    }
}

/// Load a team's template image from under `root`.
pub async fn load_template(
    root: impl AsRef<Path>,
    team: &Team,
    kind: AssetKind,
    limits: &FileLimits,
) -> sigil_core::Result<Raster> {
    let path = root.as_ref().join(template_path(team, kind));
    log::debug!("loading template {}", path.display());
    let bytes = read_file(&path, limits.file_read_timeout()).await?;
    Ok(load_image(bytes, ImagePolicy::from(limits)).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut pixmap = tiny_skia::Pixmap::new(width, height).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(0, 128, 255, 255));
        pixmap.encode_png().unwrap()
    }

    #[test]
    fn decodes_png_to_straight_pixels() {
        let raster = decode_image(&png(3, 2), &ImagePolicy::default()).unwrap();
        assert_eq!((raster.width(), raster.height()), (3, 2));
        let c = raster.pixel(1, 1).unwrap().demultiply();
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (0, 128, 255, 255));
    }

    #[test]
    fn dimension_policy_runs_before_decode() {
        let policy = ImagePolicy {
            max_dimension: 4,
            ..ImagePolicy::default()
        };
        assert!(matches!(
            decode_image(&png(5, 2), &policy),
            Err(LoadError::TooLarge { width: 5, height: 2, max: 4 })
        ));

        let policy = ImagePolicy {
            min_dimension: 3,
            ..ImagePolicy::default()
        };
        assert!(matches!(
            decode_image(&png(5, 2), &policy),
            Err(LoadError::TooSmall { min: 3, .. })
        ));
    }

    #[test]
    fn garbage_is_unsupported() {
        assert!(matches!(
            decode_image(b"definitely not an image", &ImagePolicy::default()),
            Err(LoadError::UnsupportedFormat)
        ));
    }

    #[test]
    fn policy_comes_from_file_limits() {
        let policy = ImagePolicy::default();
        assert_eq!(policy.max_dimension, 4096);
        assert_eq!(policy.min_dimension, 1);
        assert_eq!(policy.timeout, Duration::from_secs(10));
    }
}
