//! Persistent native handles shared across requests.
//!
//! Each kind keeps a process-wide counter used for diagnostics. A handle
//! releases its native resource exactly once, when it is dropped.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Cluster,
    Session,
}

static CLUSTERS: AtomicUsize = AtomicUsize::new(0);
static SESSIONS: AtomicUsize = AtomicUsize::new(0);

impl ResourceKind {
    fn counter(self) -> &'static AtomicUsize {
        match self {
            ResourceKind::Cluster => &CLUSTERS,
            ResourceKind::Session => &SESSIONS,
        }
    }

    /// Live persistent handles of this kind.
    pub fn count(self) -> usize {
        self.counter().load(Ordering::SeqCst)
    }

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Cluster => "cassandra-cluster-persistent",
            ResourceKind::Session => "cassandra-session-persistent",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub type Release<T> = Box<dyn FnOnce(T) + Send>;

/// Native handle registered under a kind.
pub struct PersistentHandle<T> {
    kind: ResourceKind,
    inner: Option<(T, Release<T>)>,
}

impl<T> PersistentHandle<T> {
    pub fn new(kind: ResourceKind, handle: T, release: impl FnOnce(T) + Send + 'static) -> Self {
        kind.counter().fetch_add(1, Ordering::SeqCst);
        Self { kind, inner: Some((handle, Box::new(release))) }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn get(&self) -> Option<&T> {
        self.inner.as_ref().map(|(handle, _)| handle)
    }
}

impl<T> Drop for PersistentHandle<T> {
    fn drop(&mut self) {
        if let Some((handle, release)) = self.inner.take() {
            release(handle);
            self.kind.counter().fetch_sub(1, Ordering::SeqCst);
            tracing::debug!(kind = %self.kind, remaining = self.kind.count(), "released persistent handle");
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentHandle")
            .field("kind", &self.kind)
            .field("handle", &self.get())
            .finish()
    }
}

/// Persistent handles keyed by the configuration that produced them.
pub struct PersistentList<T> {
    kind: ResourceKind,
    entries: Mutex<HashMap<String, PersistentHandle<T>>>,
}

impl<T: 'static> PersistentList<T> {
    pub fn new(kind: ResourceKind) -> Self {
        Self { kind, entries: Mutex::new(HashMap::new()) }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Return the handle stored under `key`, creating it with `open` when
    /// absent. `map` reads the handle while the list is locked.
    pub fn get_or_insert_with<R, E>(
        &self,
        key: &str,
        open: impl FnOnce() -> Result<(T, Release<T>), E>,
        map: impl FnOnce(&T) -> R,
    ) -> Result<R, E> {
        let mut entries = self.lock();
        if let Some(handle) = entries.get(key).and_then(PersistentHandle::get) {
            return Ok(map(handle));
        }
        let (handle, release) = open()?;
        let out = map(&handle);
        entries.insert(key.to_string(), PersistentHandle::new(self.kind, handle, release));
        Ok(out)
    }

    pub fn remove(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, PersistentHandle<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn release_runs_once_and_counter_tracks() {
        let released = Arc::new(AtomicU32::new(0));
        let before = ResourceKind::Session.count();
        {
            let r = released.clone();
            let handle = PersistentHandle::new(ResourceKind::Session, 7u32, move |h| {
                assert_eq!(h, 7);
                r.fetch_add(1, Ordering::SeqCst);
            });
            assert_eq!(handle.get(), Some(&7));
            assert!(ResourceKind::Session.count() > before);
        }
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn list_reuses_existing_handle() {
        let list: PersistentList<String> = PersistentList::new(ResourceKind::Cluster);
        let opened = AtomicU32::new(0);
        for _ in 0..3 {
            let len = list
                .get_or_insert_with::<_, ()>(
                    "127.0.0.1:9042",
                    || {
                        opened.fetch_add(1, Ordering::SeqCst);
                        Ok(("cluster".to_string(), Box::new(|_: String| {})))
                    },
                    String::len,
                )
                .unwrap();
            assert_eq!(len, 7);
        }
        assert_eq!(opened.load(Ordering::SeqCst), 1);
        assert_eq!(list.len(), 1);
        assert!(list.remove("127.0.0.1:9042"));
        assert!(list.is_empty());
    }
}
