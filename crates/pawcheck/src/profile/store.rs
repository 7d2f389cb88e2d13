use super::domain::StoredProfile;
use chrono::Utc;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Persistence seam for the user profile.
pub trait ProfileStore: Send + Sync {
    fn load(&self) -> Result<StoredProfile, ProfileError>;
    fn save(&self, profile: &StoredProfile) -> Result<StoredProfile, ProfileError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("failed to access profile at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode profile: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}

/// Stores the profile as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileProfileStore {
    path: PathBuf,
}

impl JsonFileProfileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ProfileError {
        ProfileError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ProfileStore for JsonFileProfileStore {
    fn load(&self) -> Result<StoredProfile, ProfileError> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(StoredProfile::default()),
            Err(err) => return Err(self.io_error(err)),
        };

        match serde_json::from_slice::<Value>(&raw) {
            Ok(value) => Ok(StoredProfile::from_json_value(&value)),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "unreadable profile, using defaults"
                );
                Ok(StoredProfile::default())
            }
        }
    }

    fn save(&self, profile: &StoredProfile) -> Result<StoredProfile, ProfileError> {
        let mut stamped = profile.clone();
        stamped.updated_at = Some(Utc::now());

        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let body = serde_json::to_vec_pretty(&stamped)?;
        std::fs::write(&self.path, body).map_err(|err| self.io_error(err))?;
        Ok(stamped)
    }
}
