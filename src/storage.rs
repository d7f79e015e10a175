//! Persistence adapter for the content-hub application.
//!
//! All application state is serialized as one JSON blob in a single file
//! under the data directory. Loads apply the back-fill migration from
//! [`crate::migrate`]; a missing or unreadable file yields the default
//! aggregate instead of an error so the application always starts.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use log::{debug, error, info, trace};
use tempfile::NamedTempFile;

use crate::{migrate, AppData, Config, HubError, Result};

/// File name of the persisted blob inside the data directory.
pub const DATA_FILE_NAME: &str = "content-hub-data.json";

/// Reads and writes the full [`AppData`] aggregate as one unit.
pub struct DataStore {
    data_file: PathBuf,
}

impl DataStore {
    /// Creates a store rooted at the configured data directory.
    pub fn new(config: &Config) -> Self {
        Self {
            data_file: config.data_dir.join(DATA_FILE_NAME),
        }
    }

    /// Creates a store backed by an explicit file path.
    pub fn with_file(data_file: PathBuf) -> Self {
        Self { data_file }
    }

    /// Path of the backing file.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Loads the persisted aggregate, applying back-fill migration.
    ///
    /// Never fails: a missing file means a fresh start and a corrupt file
    /// is logged and replaced by the default aggregate on the next save.
    pub fn load(&self) -> AppData {
        if !self.data_file.exists() {
            info!(
                "no data file at {}, starting with default data",
                self.data_file.display()
            );
            return AppData::with_general();
        }

        let raw = match fs::read_to_string(&self.data_file) {
            Ok(raw) => raw,
            Err(e) => {
                error!(
                    "failed to read data file {}: {}",
                    self.data_file.display(),
                    e
                );
                return AppData::with_general();
            }
        };

        match migrate::migrate_raw(&raw) {
            Ok(data) => {
                debug!(
                    "loaded {} groups, {} items, {} stat entries",
                    data.groups.len(),
                    data.items.len(),
                    data.stats.len()
                );
                data
            }
            Err(e) => {
                error!(
                    "failed to parse data file {}: {}",
                    self.data_file.display(),
                    e
                );
                AppData::with_general()
            }
        }
    }

    /// Serializes and writes the full aggregate atomically.
    ///
    /// The caller keeps its in-memory state regardless of the outcome; a
    /// failed save only means the change may be lost on reload.
    pub fn save(&self, data: &AppData) -> Result<()> {
        trace!("saving app data to {}", self.data_file.display());

        let dir = match self.data_file.parent() {
            Some(parent) => {
                if !parent.exists() {
                    debug!("creating data directory: {}", parent.display());
                    fs::create_dir_all(parent).map_err(|e| {
                        error!("failed to create data directory: {}", e);
                        HubError::DirectoryError {
                            path: parent.to_path_buf(),
                        }
                    })?;
                }
                parent
            }
            None => Path::new("."),
        };

        let json = serde_json::to_string_pretty(data)?;

        // Write to a temporary file in the same directory, then move it into
        // place so a crash mid-write never corrupts the blob.
        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&self.data_file).map_err(|e| {
            error!(
                "failed to persist data file {}: {}",
                self.data_file.display(),
                e.error
            );
            HubError::Io(e.error)
        })?;

        trace!("app data saved");
        Ok(())
    }

    /// Writes a pretty-printed backup of the aggregate into `dir`, named
    /// with the current date. Returns the path of the created file.
    pub fn export(&self, data: &AppData, dir: &Path) -> Result<PathBuf> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|_| HubError::DirectoryError {
                path: dir.to_path_buf(),
            })?;
        }

        let file_name = format!("content-hub-backup-{}.json", Utc::now().format("%Y-%m-%d"));
        let export_path = dir.join(file_name);

        let json = serde_json::to_string_pretty(data)?;
        fs::write(&export_path, json)?;

        info!("exported app data to {}", export_path.display());
        Ok(export_path)
    }

    /// Parses and validates a backup file into an [`AppData`].
    ///
    /// The current state is untouched; the caller decides whether to apply
    /// the result.
    pub fn import(&self, path: &Path) -> Result<AppData> {
        debug!("importing app data from {}", path.display());
        let raw = fs::read_to_string(path)?;
        migrate::migrate_raw(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> DataStore {
        DataStore::with_file(dir.join(DATA_FILE_NAME))
    }

    #[test]
    fn load_without_file_yields_default_data() {
        let dir = tempfile::tempdir().unwrap();
        let data = store_in(dir.path()).load();
        assert_eq!(data.groups.len(), 1);
        assert_eq!(data.groups[0].id, "1");
        assert_eq!(data.groups[0].name, "General");
        assert!(data.items.is_empty());
        assert!(data.stats.is_empty());
    }

    #[test]
    fn load_with_corrupt_file_yields_default_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.data_file(), "{not json").unwrap();
        let data = store.load();
        assert_eq!(data.groups.len(), 1);
        assert_eq!(data.groups[0].id, "1");
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let data = AppData::with_general();
        store.save(&data).unwrap();
        assert_eq!(store.load(), data);
    }

    #[test]
    fn repeated_loads_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.save(&AppData::with_general()).unwrap();
        assert_eq!(store.load(), store.load());
    }

    #[test]
    fn export_names_file_with_current_date() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let path = store.export(&AppData::with_general(), dir.path()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("content-hub-backup-"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn import_of_export_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let data = AppData::with_general();
        let path = store.export(&data, dir.path()).unwrap();
        let imported = store.import(&path).unwrap();
        assert_eq!(imported, data);
    }

    #[test]
    fn import_rejects_invalid_shape() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"groups": "nope"}"#).unwrap();
        assert!(store.import(&bad).is_err());
    }
}
