use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{FxError, FxResult},
    sync::session::Session,
};

/// Fixed identity of the single persisted session record.
pub const SESSION_RECORD_ID: &str = "progress";

/// Persistence collaborator for the session.
pub trait SessionStore {
    /// Load the stored session, or `None` when nothing has been saved yet.
    fn load(&mut self) -> FxResult<Option<Session>>;
    /// Replace the stored session.
    fn save(&mut self, session: &Session) -> FxResult<()>;
}

#[derive(serde::Deserialize)]
struct SessionRecord {
    id: String,
    #[serde(flatten)]
    session: Session,
}

#[derive(serde::Serialize)]
struct SessionRecordRef<'a> {
    id: &'a str,
    #[serde(flatten)]
    session: &'a Session,
}

/// Stores the session as one JSON record in a file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by `path`. Nothing is touched until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/textfx/session.json`, when the platform has a data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("textfx").join("session.json"))
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonFileStore {
    fn load(&mut self) -> FxResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            FxError::persistence(format!("read session '{}': {e}", self.path.display()))
        })?;
        let record: SessionRecord = serde_json::from_str(&raw).map_err(|e| {
            FxError::serde(format!("parse session '{}': {e}", self.path.display()))
        })?;
        if record.id != SESSION_RECORD_ID {
            tracing::warn!(path = %self.path.display(), id = %record.id, "ignoring session record with unexpected id");
            return Ok(None);
        }
        Ok(Some(record.session))
    }

    fn save(&mut self, session: &Session) -> FxResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                FxError::persistence(format!("create session dir '{}': {e}", parent.display()))
            })?;
        }
        let record = SessionRecordRef {
            id: SESSION_RECORD_ID,
            session,
        };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| FxError::serde(format!("encode session: {e}")))?;

        // A failed write leaves the previous record intact.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| {
            FxError::persistence(format!("write session '{}': {e}", tmp.display()))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            FxError::persistence(format!("replace session '{}': {e}", self.path.display()))
        })?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }
}

/// Keeps the session in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    session: Option<Session>,
    saves: usize,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `session`.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Some(session),
            saves: 0,
        }
    }

    /// Last saved session.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SessionStore for MemoryStore {
    fn load(&mut self) -> FxResult<Option<Session>> {
        Ok(self.session.clone())
    }

    fn save(&mut self, session: &Session) -> FxResult<()> {
        self.session = Some(session.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/store.rs"]
mod tests;
