pub mod hit;
pub mod load;
pub mod paint;
pub mod raster;

pub use hit::{Hit, hit_test, hit_test_handles};
pub use load::{ImagePolicy, decode_image, load_image, load_template, read_file};
pub use paint::{Compositor, ExportedImage, Scene, compose, export_png, paint_scene};
pub use raster::{Raster, SignatureAsset, crop_to_opaque, new_surface, opaque_bounds};
