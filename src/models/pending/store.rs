use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::validate::{require, validate_user_id};
use crate::errors::AppError;

use super::types::Pending;

/// Per-user storage of pending-edit sessions.
pub trait PendingStore {
    /// Load the user's session; an absent session is an empty one.
    fn get(&self, user: &str) -> Result<Pending, AppError>;
    fn put(&self, user: &str, pending: &Pending) -> Result<(), AppError>;
    /// Keep the current session file as a backup instead of deleting it.
    fn archive(&self, user: &str) -> Result<(), AppError>;
}

/// Sessions stored as `<dir>/<user>.yml`, archived to `<dir>/<user>.bak`.
#[derive(Debug, Clone)]
pub struct YamlPendingStore {
    dir: PathBuf,
}

impl YamlPendingStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        YamlPendingStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, user: &str, extension: &str) -> Result<PathBuf, AppError> {
        require(validate_user_id(user))?;
        Ok(self.dir.join(format!("{user}.{extension}")))
    }
}

impl PendingStore for YamlPendingStore {
    fn get(&self, user: &str) -> Result<Pending, AppError> {
        let path = self.path_for(user, "yml")?;
        match fs::read_to_string(&path) {
            Ok(yaml) if yaml.trim().is_empty() => Ok(Pending::default()),
            Ok(yaml) => Ok(serde_yaml::from_str(&yaml)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Pending::default()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    fn put(&self, user: &str, pending: &Pending) -> Result<(), AppError> {
        let path = self.path_for(user, "yml")?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serde_yaml::to_string(pending)?)?;
        log::debug!("Stored pending session {}", path.display());
        Ok(())
    }

    fn archive(&self, user: &str) -> Result<(), AppError> {
        let from = self.path_for(user, "yml")?;
        let to = self.path_for(user, "bak")?;
        fs::rename(&from, &to)?;
        log::info!("Archived pending session {} -> {}", from.display(), to.display());
        Ok(())
    }
}
