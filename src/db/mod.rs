use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::User;
use crate::playback::DEFAULT_VOLUME;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const PREFERENCES_KEY: &str = "mauro-site.preferences";

#[cfg(not(target_arch = "wasm32"))]
const PREFERENCES_ROW: &str = "preferences";

/// Error type for preference storage
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[cfg(target_arch = "wasm32")]
    #[error("local storage error: {0}")]
    Storage(#[from] gloo_storage::errors::StorageError),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("could not prepare data directory: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("no data directory available on this platform")]
    NoDataDir,
}

/// Preferences kept between visits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub user: Option<User>,
}

fn default_volume() -> f64 {
    DEFAULT_VOLUME
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            user: None,
        }
    }
}

impl Preferences {
    /// Bring a stored volume back into `[0, 1]`. Older payloads stored percentages.
    pub fn normalized(mut self) -> Self {
        self.volume = normalize_volume(self.volume);
        self
    }
}

fn normalize_volume(mut value: f64) -> f64 {
    if !value.is_finite() {
        return DEFAULT_VOLUME;
    }
    let mut passes = 0;
    while value > 1.0 && passes < 4 {
        value /= 100.0;
        passes += 1;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(target_arch = "wasm32")]
pub async fn load_preferences() -> Result<Preferences, StoreError> {
    match LocalStorage::get::<Preferences>(PREFERENCES_KEY) {
        Ok(preferences) => Ok(preferences.normalized()),
        Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(Preferences::default()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn save_preferences(preferences: Preferences) -> Result<(), StoreError> {
    LocalStorage::set(PREFERENCES_KEY, preferences)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_preferences() -> Result<Preferences, StoreError> {
    let conn = open_connection()?;
    initialize(&conn)?;
    read_preferences(&conn)
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_preferences(preferences: Preferences) -> Result<(), StoreError> {
    let conn = open_connection()?;
    initialize(&conn)?;
    write_preferences(&conn, &preferences)
}

#[cfg(not(target_arch = "wasm32"))]
fn open_connection() -> Result<rusqlite::Connection, StoreError> {
    let data_dir = dirs::data_dir()
        .ok_or(StoreError::NoDataDir)?
        .join("mauro-site");
    std::fs::create_dir_all(&data_dir)?;
    Ok(rusqlite::Connection::open(data_dir.join("site.db"))?)
}

#[cfg(not(target_arch = "wasm32"))]
fn initialize(conn: &rusqlite::Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_preferences(conn: &rusqlite::Connection) -> Result<Preferences, StoreError> {
    let result: Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM settings WHERE key = ?1",
        [PREFERENCES_ROW],
        |row: &rusqlite::Row| row.get(0),
    );

    match result {
        Ok(json) => Ok(serde_json::from_str::<Preferences>(&json)?.normalized()),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(Preferences::default()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_preferences(
    conn: &rusqlite::Connection,
    preferences: &Preferences,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(preferences)?;
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
        [PREFERENCES_ROW, json.as_str()],
    )?;
    Ok(())
}
