//! Persistence collaborator: the autosave snapshot, a small project
//! history, and JSON export/import.
//!
//! Nothing here touches the session. The session produces a
//! [`SavedState`] and restores from one; stores only move them around.

use serde::{Deserialize, Serialize};
use sigil_core::{AssetKind, BackgroundSettings, PersistError, Transform, TransformLimits, team_by_prefix};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Number of projects kept in the history, newest first.
pub const MAX_PROJECTS: usize = 10;

pub const PROJECT_VERSION: &str = "1.0";

/// Serializable subset of the session: everything except rasters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SavedState {
    pub team_prefix: Option<String>,
    pub team_name: Option<String>,
    pub asset: Option<String>,
    pub transform: Transform,
    pub background_settings: BackgroundSettings,
}

impl SavedState {
    /// Make restored data safe to apply: strip markup characters from the
    /// team name, drop unknown team prefixes and asset keys, and pull scale
    /// and opacity back into range.
    pub fn sanitized(mut self, limits: &TransformLimits) -> Self {
        self.team_name = self
            .team_name
            .map(|name| name.chars().filter(|c| !"<>\"'&".contains(*c)).collect());

        if let Some(prefix) = &self.team_prefix
            && team_by_prefix(prefix).is_none()
        {
            log::warn!("dropping unknown team prefix {:?}", prefix);
            self.team_prefix = None;
        }
        if let Some(asset) = &self.asset
            && AssetKind::from_key(asset).is_none()
        {
            log::warn!("dropping unknown asset {:?}", asset);
            self.asset = None;
        }

        self.transform = self.transform.clamped(limits);
        self
    }

    pub fn asset_kind(&self) -> Option<AssetKind> {
        self.asset.as_deref().and_then(AssetKind::from_key)
    }
}

/// One saved project in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    pub state: SavedState,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub version: String,
}

/// Where autosaves and saved projects live.
pub trait ProjectStore {
    fn save_current(&mut self, state: &SavedState) -> Result<(), PersistError>;

    fn load_current(&self) -> Result<Option<SavedState>, PersistError>;

    /// Add a project at the front of the history, evicting the oldest
    /// beyond [`MAX_PROJECTS`]. Returns the new record.
    fn save_project(&mut self, name: Option<&str>, state: &SavedState) -> Result<ProjectRecord, PersistError>;

    /// Newest first.
    fn projects(&self) -> Result<Vec<ProjectRecord>, PersistError>;

    fn load_project(&self, id: &str) -> Result<Option<ProjectRecord>, PersistError> {
        Ok(self.projects()?.into_iter().find(|p| p.id == id))
    }

    /// Returns whether a project was removed.
    fn delete_project(&mut self, id: &str) -> Result<bool, PersistError>;
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Shared history bookkeeping for both stores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct Snapshot {
    current: Option<SavedState>,
    projects: Vec<ProjectRecord>,
}

impl Snapshot {
    fn push_project(&mut self, name: Option<&str>, state: &SavedState) -> ProjectRecord {
        let timestamp = now_millis();
        let mut id = timestamp;
        while self.projects.iter().any(|p| p.id == id.to_string()) {
            id += 1;
        }
        let record = ProjectRecord {
            id: id.to_string(),
            name: name
                .filter(|n| !n.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Project {}", id)),
            state: state.clone(),
            timestamp,
            version: PROJECT_VERSION.to_string(),
        };
        self.current = Some(state.clone());
        self.projects.insert(0, record.clone());
        self.projects.truncate(MAX_PROJECTS);
        record
    }

    fn remove_project(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        self.projects.len() != before
    }
}

/// In-process store, for tests and hosts without a disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Snapshot,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryStore {
    fn save_current(&mut self, state: &SavedState) -> Result<(), PersistError> {
        self.snapshot.current = Some(state.clone());
        Ok(())
    }

    fn load_current(&self) -> Result<Option<SavedState>, PersistError> {
        Ok(self.snapshot.current.clone())
    }

    fn save_project(&mut self, name: Option<&str>, state: &SavedState) -> Result<ProjectRecord, PersistError> {
        Ok(self.snapshot.push_project(name, state))
    }

    fn projects(&self) -> Result<Vec<ProjectRecord>, PersistError> {
        Ok(self.snapshot.projects.clone())
    }

    fn delete_project(&mut self, id: &str) -> Result<bool, PersistError> {
        Ok(self.snapshot.remove_project(id))
    }
}

/// Store backed by a single JSON document on disk.
///
/// Every operation reads the file fresh; a missing file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Snapshot, PersistError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Snapshot::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, snapshot: &Snapshot) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(snapshot)?)?;
        log::debug!("wrote {}", self.path.display());
        Ok(())
    }
}

impl ProjectStore for JsonFileStore {
    fn save_current(&mut self, state: &SavedState) -> Result<(), PersistError> {
        let mut snapshot = self.read()?;
        snapshot.current = Some(state.clone());
        self.write(&snapshot)
    }

    fn load_current(&self) -> Result<Option<SavedState>, PersistError> {
        Ok(self.read()?.current)
    }

    fn save_project(&mut self, name: Option<&str>, state: &SavedState) -> Result<ProjectRecord, PersistError> {
        let mut snapshot = self.read()?;
        let record = snapshot.push_project(name, state);
        self.write(&snapshot)?;
        Ok(record)
    }

    fn projects(&self) -> Result<Vec<ProjectRecord>, PersistError> {
        Ok(self.read()?.projects)
    }

    fn delete_project(&mut self, id: &str) -> Result<bool, PersistError> {
        let mut snapshot = self.read()?;
        let removed = snapshot.remove_project(id);
        if removed {
            self.write(&snapshot)?;
        }
        Ok(removed)
    }
}

/// Serialize a project for download.
pub fn export_project(record: &ProjectRecord) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Parse an exported project. The caller sanitizes the state on restore.
pub fn import_project(json: &str) -> Result<ProjectRecord, PersistError> {
    Ok(serde_json::from_str(json)?)
}
