//! Session storage behind an injected interface.
//!
//! The auth token and username live in a [`SessionStore`] the caller creates
//! explicitly and passes around, so tests use [`MemorySessionStore`] while the
//! CLI persists to a JSON file. Logout clears every key.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use log::{debug, warn};
use thiserror::Error;

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Session file {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Refusing to store an empty {0}")]
    Empty(&'static str),
}

/// Key-value storage for session data.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    fn remove(&self, key: &str) -> Result<(), SessionError>;

    fn clear(&self) -> Result<(), SessionError>;
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        read_lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        write_lock(&self.values).insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        write_lock(&self.values).remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        write_lock(&self.values).clear();
        Ok(())
    }
}

/// JSON file store. Every write is flushed to disk immediately.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// Loads `path` if it exists; a missing file is an empty session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| SessionError::Corrupt {
                    path: path.clone(),
                    source,
                })?
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no session file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(source) => return Err(SessionError::Io { path, source }),
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), SessionError> {
        let io_err = |source| SessionError::Io {
            path: self.path.clone(),
            source,
        };

        if values.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(err) if err.kind() != io::ErrorKind::NotFound => Err(io_err(err)),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(values).map_err(|source| {
            SessionError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, content).map_err(io_err)
    }

    fn mutate(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), SessionError> {
        let mut values = write_lock(&self.values);
        let mut next = values.clone();
        f(&mut next);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        read_lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.mutate(|values| {
            values.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.mutate(|values| {
            values.remove(key);
        })
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.mutate(BTreeMap::clear)
    }
}

/// Typed access to the session keys.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    pub fn username(&self) -> Option<String> {
        self.store.get(USERNAME_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn login(&self, username: &str, token: &str) -> Result<(), SessionError> {
        let (username, token) = (username.trim(), token.trim());
        if username.is_empty() {
            return Err(SessionError::Empty("username"));
        }
        if token.is_empty() {
            return Err(SessionError::Empty("token"));
        }
        self.store.set(USERNAME_KEY, username)?;
        self.store.set(TOKEN_KEY, token)
    }

    /// Clears every key, not only the token.
    pub fn logout(&self) -> Result<(), SessionError> {
        if !self.is_authenticated() {
            warn!("logout requested without an active session");
        }
        self.store.clear()
    }
}
