//! Store handles and the process-wide handle registry.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use oak_common::{OakError, Result};

use crate::disk::BlockStore;
use crate::pair::Pair;
use crate::tree::BTree;

/// A handle to one open store.
///
/// Wraps tree access in a single-writer/multi-reader lock: `put` and
/// `del` take the write lock for the whole mutation including its
/// block I/O; concurrent `get`s share the read lock. A closed handle
/// keeps rejecting operations with [`OakError::AlreadyClosed`].
pub struct Store {
    path: PathBuf,
    tree: RwLock<Option<BTree>>,
}

impl Store {
    fn open_at(path: &Path, fsync_enabled: bool) -> Result<Self> {
        let blocks = Arc::new(BlockStore::open(path, fsync_enabled)?);
        let tree = BTree::open(blocks)?;
        Ok(Self {
            path: path.to_path_buf(),
            tree: RwLock::new(Some(tree)),
        })
    }

    /// The backing file path of this handle.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inserts a key-value pair.
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.tree.write();
        let tree = guard.as_mut().ok_or(OakError::AlreadyClosed)?;
        let pair = Pair::new(key, value);
        pair.validate()?;
        tree.insert(pair)
    }

    /// Returns the stored value for `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self.tree.read();
        let tree = guard.as_ref().ok_or(OakError::AlreadyClosed)?;
        tree.get(key)
    }

    /// Deletes `key`, failing with [`OakError::KeyNotFound`] if absent.
    pub fn del(&self, key: &str) -> Result<()> {
        let mut guard = self.tree.write();
        let tree = guard.as_mut().ok_or(OakError::AlreadyClosed)?;
        tree.delete(key)
    }

    /// Releases the tree; the backing file is synced as it drops.
    fn close(&self) {
        *self.tree.write() = None;
    }
}

/// Registry of open store handles, keyed by absolute file path.
///
/// Concurrent opens of the same path share one [`Store`], so every
/// connection serializes against the same lock. The map sits behind
/// its own mutex, touched only by `open` and `close`.
pub struct StoreRegistry {
    stores: Mutex<HashMap<PathBuf, Arc<Store>>>,
    fsync_enabled: bool,
}

impl StoreRegistry {
    /// Creates an empty registry with best-effort durability.
    pub fn new() -> Self {
        Self::with_fsync(false)
    }

    /// Creates an empty registry; stores sync each block write when
    /// `fsync_enabled` is set.
    pub fn with_fsync(fsync_enabled: bool) -> Self {
        Self {
            stores: Mutex::new(HashMap::new()),
            fsync_enabled,
        }
    }

    /// Opens the store at `path`, creating parent directories and the
    /// backing file as needed. An already-open path returns its
    /// existing handle.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Arc<Store>> {
        let key = std::path::absolute(path.as_ref())?;

        let mut stores = self.stores.lock();
        if let Some(store) = stores.get(&key) {
            return Ok(Arc::clone(store));
        }

        let store = Arc::new(Store::open_at(&key, self.fsync_enabled)?);
        stores.insert(key, Arc::clone(&store));
        tracing::info!("opened store at {}", store.path().display());
        Ok(store)
    }

    /// Closes the store at `path` and removes its registry entry.
    pub fn close(&self, path: impl AsRef<Path>) -> Result<()> {
        let key = std::path::absolute(path.as_ref())?;

        let mut stores = self.stores.lock();
        let store = stores.remove(&key).ok_or(OakError::AlreadyClosed)?;
        store.close();
        tracing::info!("closed store at {}", key.display());
        Ok(())
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}
