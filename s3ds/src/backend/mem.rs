use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, PoisonError, RwLock,
    },
};

use bytes::Bytes;

use super::{ObjectBackend, ObjectMeta};
use crate::BackendError;

/// Number of calls an [`InMemoryBackend`] has served, per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub put: u64,
    pub get: u64,
    pub head: u64,
    pub delete: u64,
    pub list: u64,
}

impl CallCounts {
    pub fn total(&self) -> u64 {
        self.put + self.get + self.head + self.delete + self.list
    }
}

#[derive(Default)]
struct Counters {
    put: AtomicU64,
    get: AtomicU64,
    head: AtomicU64,
    delete: AtomicU64,
    list: AtomicU64,
}

impl Counters {
    fn hit(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Default)]
struct Objects {
    objects: RwLock<BTreeMap<String, Bytes>>,
    counters: Counters,
}

/// Object storage held in process memory.
///
/// Clones share the same objects, so a test can keep a handle to inspect what a datastore wrote.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    inner: Arc<Objects>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> CallCounts {
        let counters = &self.inner.counters;
        CallCounts {
            put: counters.put.load(Ordering::Relaxed),
            get: counters.get.load(Ordering::Relaxed),
            head: counters.head.load(Ordering::Relaxed),
            delete: counters.delete.load(Ordering::Relaxed),
            list: counters.list.load(Ordering::Relaxed),
        }
    }

    /// Object paths currently stored, in order.
    pub fn paths(&self) -> Vec<String> {
        let guard = self
            .inner
            .objects
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        guard.keys().cloned().collect()
    }

    /// Removes an object behind the datastore's back, without counting a call.
    pub fn evict(&self, path: &str) -> Option<Bytes> {
        let mut guard = self
            .inner
            .objects
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.remove(path)
    }
}

impl ObjectBackend for InMemoryBackend {
    async fn put_object(&self, path: &str, body: Bytes) -> Result<(), BackendError> {
        Counters::hit(&self.inner.counters.put);
        let mut guard = self
            .inner
            .objects
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.insert(path.to_string(), body);
        Ok(())
    }

    async fn get_object(&self, path: &str) -> Result<Bytes, BackendError> {
        Counters::hit(&self.inner.counters.get);
        let guard = self
            .inner
            .objects
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        guard
            .get(path)
            .cloned()
            .ok_or_else(|| BackendError::NoSuchKey {
                path: path.to_string(),
            })
    }

    async fn head_object(&self, path: &str) -> Result<ObjectMeta, BackendError> {
        Counters::hit(&self.inner.counters.head);
        let guard = self
            .inner
            .objects
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        match guard.get(path) {
            Some(body) => Ok(ObjectMeta {
                path: path.to_string(),
                size: body.len() as u64,
            }),
            None => Err(BackendError::NotFound {
                path: path.to_string(),
            }),
        }
    }

    async fn delete_object(&self, path: &str) -> Result<(), BackendError> {
        Counters::hit(&self.inner.counters.delete);
        let mut guard = self
            .inner
            .objects
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.remove(path);
        Ok(())
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectMeta>, BackendError> {
        Counters::hit(&self.inner.counters.list);
        let guard = self
            .inner
            .objects
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(guard
            .range(prefix.to_string()..)
            .take_while(|(path, _)| path.starts_with(prefix))
            .map(|(path, body)| ObjectMeta {
                path: path.clone(),
                size: body.len() as u64,
            })
            .collect())
    }
}
