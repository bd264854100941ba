use std::sync::{Arc, Mutex, MutexGuard, Weak};

use serde_json::Value;
use tracing::{debug, info};

use crate::errors::StoreError;
use crate::models::ResumeDocument;

type Listener = Arc<Mutex<dyn FnMut(&ResumeDocument) + Send>>;

struct Subscriber {
    id: u64,
    listener: Listener,
}

struct StoreInner {
    document: Option<ResumeDocument>,
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

/// Shared résumé document for one editing session.
///
/// Created explicitly with [`DocumentStore::create`] and torn down with
/// [`DocumentStore::dispose`]; clones share the same document. After disposal
/// every read and write fails with [`StoreError::Disposed`].
#[derive(Clone)]
pub struct DocumentStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl DocumentStore {
    pub fn create(initial: ResumeDocument) -> Self {
        debug!(
            "Document store created with {} section(s)",
            initial.sections.len()
        );
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                document: Some(initial),
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub fn snapshot(&self) -> Result<ResumeDocument, StoreError> {
        self.lock().document.clone().ok_or(StoreError::Disposed)
    }

    pub fn section(&self, name: &str) -> Result<Option<Value>, StoreError> {
        let inner = self.lock();
        let document = inner.document.as_ref().ok_or(StoreError::Disposed)?;
        Ok(document.section(name).cloned())
    }

    /// Replaces one section wholesale and notifies subscribers.
    pub fn replace_section(&self, name: &str, content: Value) -> Result<(), StoreError> {
        self.write(|document| {
            document.replace_section(name, content);
            Ok(())
        })
    }

    /// Writes a single dotted field path and notifies subscribers.
    pub fn set_path(&self, path: &str, value: Value) -> Result<(), StoreError> {
        self.write(|document| document.set_path(path, value))
    }

    /// Registers `callback` to run whenever `selector`'s output changes.
    /// The callback is not invoked for the current value. Dropping the
    /// returned [`Subscription`] unsubscribes.
    pub fn subscribe<S, F, C>(&self, selector: F, mut callback: C) -> Subscription
    where
        S: PartialEq + Send + 'static,
        F: Fn(&ResumeDocument) -> S + Send + 'static,
        C: FnMut(&S) + Send + 'static,
    {
        let mut inner = self.lock();
        let mut last = inner.document.as_ref().map(&selector);
        let listener: Listener = Arc::new(Mutex::new(move |document: &ResumeDocument| {
            let next = selector(document);
            if last.as_ref() != Some(&next) {
                callback(&next);
                last = Some(next);
            }
        }));

        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push(Subscriber { id, listener });

        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// Drops the document and every subscriber. Idempotent.
    pub fn dispose(&self) {
        let mut inner = self.lock();
        if inner.document.take().is_some() {
            info!("Document store disposed");
        }
        inner.subscribers.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.lock().document.is_none()
    }

    fn write<F>(&self, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut ResumeDocument) -> Result<(), StoreError>,
    {
        // Listeners run after the store lock is released so they may read the store.
        let (snapshot, listeners) = {
            let mut inner = self.lock();
            let document = inner.document.as_mut().ok_or(StoreError::Disposed)?;
            apply(document)?;
            let snapshot = document.clone();
            let listeners: Vec<Listener> =
                inner.subscribers.iter().map(|s| s.listener.clone()).collect();
            (snapshot, listeners)
        };

        for listener in listeners {
            let mut notify = listener.lock().unwrap_or_else(|e| e.into_inner());
            (&mut *notify)(&snapshot);
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        lock_inner(&self.inner)
    }
}

fn lock_inner(inner: &Mutex<StoreInner>) -> MutexGuard<'_, StoreInner> {
    inner.lock().unwrap_or_else(|e| e.into_inner())
}

/// Handle returned by [`DocumentStore::subscribe`].
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    store: Weak<Mutex<StoreInner>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            lock_inner(&inner).subscribers.retain(|s| s.id != self.id);
        }
    }
}
