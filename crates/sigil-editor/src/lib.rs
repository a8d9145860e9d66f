pub mod capture;
pub mod input;
pub mod persist;
pub mod session;
pub mod shortcuts;
pub mod throttle;
pub mod transform;
pub mod upload;

pub use capture::{BrushSettings, CaptureEngine, CapturedSignature};
pub use input::InputEvent;
pub use persist::{JsonFileStore, MemoryStore, ProjectRecord, ProjectStore, SavedState};
pub use session::{CompositionSession, Due, Notice, NoticeLevel, Placement};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use transform::{Gesture, TransformController};
pub use upload::UploadCandidate;
