pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod registry;

pub use config::{DrawingConfig, EditorConfig, FileLimits, Timing, TransformLimits};
pub use error::{Error, ExportError, LoadError, PersistError, ReadError, Result, ValidationError};
pub use geometry::{SignatureBox, normalize_degrees, signature_box, signature_center};
pub use model::*;
pub use registry::{AssetKind, AssetTemplate, Team, team_by_prefix, teams};

// Re-export kurbo geometry types so downstream crates share one version
pub use kurbo::{Point, Size};
