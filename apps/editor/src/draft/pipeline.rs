use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::TimelineSettings;
use crate::errors::StoreError;

use super::debounce::Debouncer;
use super::store::DocumentStore;

/// Propagates a local draft of one single-document section into the shared
/// [`DocumentStore`] once editing has been quiet for the debounce interval.
///
/// Each quiet period produces at most one wholesale section write, and only
/// if the value differs from the last one propagated. The pipeline is
/// downstream-only: later store changes are not pulled back into the draft.
pub struct DraftPipeline<T> {
    section: String,
    draft: T,
    debouncer: Debouncer<T>,
}

impl<T> DraftPipeline<T>
where
    T: Serialize + Clone + Send + 'static,
{
    pub fn new(store: DocumentStore, section: impl Into<String>, initial: T, quiet: Duration) -> Self {
        let section = section.into();
        let last_written = Arc::new(Mutex::new(serde_json::to_value(&initial).ok()));
        let target = section.clone();

        let debouncer = Debouncer::new(quiet, move |value: T| {
            propagate(&store, &target, &last_written, &value);
        });

        Self {
            section,
            draft: initial,
            debouncer,
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    /// Replaces the draft and restarts the quiet interval.
    pub fn set_draft(&mut self, value: T) {
        self.draft = value;
        self.debouncer.push(self.draft.clone());
    }

    /// Mutates the draft in place and restarts the quiet interval.
    pub fn edit(&mut self, change: impl FnOnce(&mut T)) {
        change(&mut self.draft);
        self.debouncer.push(self.draft.clone());
    }

    /// Propagates a pending draft immediately instead of waiting out the
    /// quiet interval. Returns whether anything was pending.
    pub fn flush(&mut self) -> bool {
        self.debouncer.flush()
    }

    pub fn has_pending(&self) -> bool {
        self.debouncer.has_pending()
    }
}

impl<T> DraftPipeline<T>
where
    T: Serialize + DeserializeOwned + Default + Clone + Send + 'static,
{
    /// Starts a draft from the section's current content in the store, or
    /// `T::default()` when the section is absent or does not parse. The quiet
    /// interval is `settings.draft_debounce`.
    pub fn from_store(
        store: DocumentStore,
        section: impl Into<String>,
        settings: &TimelineSettings,
    ) -> Result<Self, StoreError> {
        let section = section.into();
        let initial = match store.section(&section)? {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("Section '{section}' did not match its draft shape, starting empty: {e}");
                T::default()
            }),
            None => T::default(),
        };
        Ok(Self::new(store, section, initial, settings.draft_debounce))
    }
}

fn propagate<T: Serialize>(
    store: &DocumentStore,
    section: &str,
    last_written: &Mutex<Option<Value>>,
    draft: &T,
) {
    let value = match serde_json::to_value(draft) {
        Ok(value) => value,
        Err(e) => {
            warn!("Could not serialize draft for section '{section}': {e}");
            return;
        }
    };

    let mut last = last_written.lock().unwrap_or_else(|e| e.into_inner());
    if last.as_ref() == Some(&value) {
        debug!("Draft for section '{section}' unchanged, skipping write");
        return;
    }

    match store.replace_section(section, value.clone()) {
        Ok(()) => {
            debug!("Propagated draft for section '{section}'");
            *last = Some(value);
        }
        Err(e) => warn!("Dropped draft for section '{section}': {e}"),
    }
}
