use anyhow::Result;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use timeline::{ClipEntry, ClipKind};

/// Storage key for the serialized sequence snapshot.
pub const PROJECT_KEY: &str = "project";
/// Storage key for the theme preference, kept beside the project in the
/// same store.
pub const THEME_KEY: &str = "theme";

pub fn app_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(std::env::temp_dir);
    base.join("reelstrip")
}

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("storage: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Durable key-value seam the projector writes through. Values are opaque
/// strings; absent keys read back as `None`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, ProjectError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ProjectError>;
}

/// SQLite-backed store under the app data dir. One `kv` table, WAL journal,
/// migration applied on open.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open_or_create(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        // Recommended PRAGMAs for a local interactive app DB
        conn.pragma_update(None, "journal_mode", &"WAL")?;
        conn.pragma_update(None, "synchronous", &"NORMAL")?;
        apply_migrations(&conn)?;
        Ok(Self { conn })
    }
}

fn apply_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        );",
    )?;
    Ok(())
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, ProjectError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv WHERE key = ?1 LIMIT 1")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ProjectError> {
        let now = chrono::Utc::now().timestamp();
        self.conn.execute(
            "INSERT INTO kv(key, value, updated_at) VALUES(?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ProjectError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ProjectError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Lossy snapshot that survives a reload: clip kind and display name only.
/// Source handles, selection and playback state never round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedProject {
    pub sequences: Vec<SavedClip>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedClip {
    #[serde(rename = "type")]
    pub kind: ClipKind,
    pub name: String,
}

impl SavedClip {
    pub fn from_entry(entry: &ClipEntry) -> Self {
        Self {
            kind: entry.kind,
            name: entry.display_name.clone(),
        }
    }

    pub fn into_entry(self) -> ClipEntry {
        ClipEntry::restored(self.kind, self.name)
    }
}

/// Persistence projector. `save` is the write-through called after every
/// sequence mutation; `load` restores at startup. Both fail soft: the
/// in-memory sequence stays authoritative for the session whatever the
/// storage does.
pub struct ProjectStore {
    store: Box<dyn KeyValueStore>,
}

impl ProjectStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn open_default() -> Result<Self> {
        let path = app_data_dir().join("reelstrip.db");
        Ok(Self::new(Box::new(SqliteStore::open_or_create(&path)?)))
    }

    /// Best-effort snapshot write. Failures are logged, never propagated.
    pub fn save(&mut self, entries: &[ClipEntry]) {
        if let Err(err) = self.try_save(entries) {
            tracing::warn!(%err, "failed to write project snapshot");
        }
    }

    fn try_save(&mut self, entries: &[ClipEntry]) -> Result<(), ProjectError> {
        let snapshot = SavedProject {
            sequences: entries.iter().map(SavedClip::from_entry).collect(),
        };
        let json = serde_json::to_string(&snapshot)?;
        self.store.set(PROJECT_KEY, &json)
    }

    /// Absent or malformed data yields `None` (empty project); startup must
    /// never fail on a bad snapshot.
    pub fn load(&self) -> Option<SavedProject> {
        match self.try_load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(%err, "ignoring unreadable project snapshot");
                None
            }
        }
    }

    fn try_load(&self) -> Result<Option<SavedProject>, ProjectError> {
        let Some(raw) = self.store.get(PROJECT_KEY)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn save_theme(&mut self, value: &str) {
        if let Err(err) = self.store.set(THEME_KEY, value) {
            tracing::warn!(%err, "failed to write theme preference");
        }
    }

    pub fn load_theme(&self) -> Option<String> {
        match self.store.get(THEME_KEY) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(%err, "failed to read theme preference");
                None
            }
        }
    }
}
