//! File-backed session storage.
//!
//! The token lives in a small JSON key/value file so it survives restarts
//! until logout or rejection. Other keys in the file are preserved.

use padelbook_common::models::SessionToken;
use padelbook_common::{ClientError, MemorySessionStore, SessionStore};
use padelbook_config::SessionConfig;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Session storage persisted to a JSON file.
///
/// The in-memory value is authoritative for the running process; a failed
/// write is logged and the process keeps working with the new value.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    key: String,
    inner: MemorySessionStore,
}

impl FileSessionStore {
    /// Opens the store, loading any token already saved under `key`.
    pub fn open(path: impl Into<PathBuf>, key: impl Into<String>) -> Result<Self, ClientError> {
        let path = path.into();
        let key = key.into();
        let token = read_map(&path)?
            .get(&key)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(SessionToken::new);
        debug!(path = %path.display(), has_token = token.is_some(), "session storage opened");
        Ok(Self {
            path,
            key,
            inner: MemorySessionStore::with_token(token),
        })
    }

    /// Opens the store described by the `[session]` configuration section.
    pub fn from_config(config: &SessionConfig) -> Result<Self, ClientError> {
        let path = config.resolved_token_file().ok_or_else(|| {
            ClientError::Storage("cannot determine a location for the session file".to_string())
        })?;
        Self::open(path, config.storage_key.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, token: Option<&SessionToken>) {
        if let Err(err) = self.write(token) {
            warn!(path = %self.path.display(), error = %err, "failed to persist session token");
        }
    }

    fn write(&self, token: Option<&SessionToken>) -> Result<(), ClientError> {
        let mut map = read_map(&self.path).unwrap_or_default();
        match token {
            Some(token) => {
                map.insert(self.key.clone(), Value::String(token.as_str().to_string()));
            }
            None => {
                map.remove(&self.key);
            }
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(map))?)?;
        restrict_permissions(&self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<SessionToken> {
        self.inner.token()
    }

    fn set_token(&self, token: SessionToken) {
        self.persist(Some(&token));
        self.inner.set_token(token);
    }

    fn clear(&self) {
        self.persist(None);
        self.inner.clear();
    }

    fn subscribe(&self) -> watch::Receiver<Option<SessionToken>> {
        self.inner.subscribe()
    }
}

fn read_map(path: &Path) -> Result<Map<String, Value>, ClientError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(err) => return Err(err.into()),
    };
    if contents.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str(&contents)? {
        Value::Object(map) => Ok(map),
        _ => Err(ClientError::Storage(format!(
            "{} does not hold a JSON object",
            path.display()
        ))),
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
