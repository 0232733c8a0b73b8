use crate::config::AgendaConfig;
use crate::error::StorageError;
use crate::records::{decode_collection, encode_collection};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The three persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Experts,
    Deadlines,
    Examinations,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Experts => f.write_str("experts"),
            Collection::Deadlines => f.write_str("deadlines"),
            Collection::Examinations => f.write_str("examinations"),
        }
    }
}

/// One JSON file per collection inside a data directory
pub struct Storage {
    data_dir: PathBuf,
    experts_path: PathBuf,
    deadlines_path: PathBuf,
    examinations_path: PathBuf,
}

impl Storage {
    pub fn new(data_dir: impl AsRef<Path>, config: &AgendaConfig) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            experts_path: data_dir.join(&config.experts_file),
            deadlines_path: data_dir.join(&config.deadlines_file),
            examinations_path: data_dir.join(&config.examinations_file),
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path(&self, collection: Collection) -> &Path {
        match collection {
            Collection::Experts => &self.experts_path,
            Collection::Deadlines => &self.deadlines_path,
            Collection::Examinations => &self.examinations_path,
        }
    }

    /// Load a collection, empty when its file does not exist yet
    pub fn load<T>(&self, collection: Collection) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path(collection);
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(%collection, path = %path.display(), "no file yet, starting empty");
                return Ok(T::default());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let (records, legacy) =
            decode_collection(&content).map_err(|source| StorageError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if legacy {
            info!(
                %collection,
                path = %path.display(),
                "loaded unversioned file, it will be upgraded on next save"
            );
        }
        debug!(%collection, path = %path.display(), "loaded");
        Ok(records)
    }

    /// Write a collection through a sibling temp file and rename it into place
    pub fn save<T: Serialize>(
        &self,
        collection: Collection,
        records: &T,
    ) -> Result<(), StorageError> {
        let path = self.path(collection);
        let content = encode_collection(records).map_err(|source| StorageError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

        let write_err = |source: io::Error| StorageError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        let mut file = File::create(&temp_path).map_err(write_err)?;
        file.write_all(content.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);

        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        debug!(%collection, path = %path.display(), bytes = content.len(), "saved");
        Ok(())
    }
}
