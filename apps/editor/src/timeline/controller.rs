//! Generic CRUD and view-mode state machine for one timeline section.
//!
//! States: `Loading -> {Ready, Error}`; `Ready -> Editing(id) -> Ready`;
//! `Ready -> ConfirmingDelete(id) -> {Ready, ConfirmingDelete}`.
//!
//! Every network operation is split into the awaited call and a synchronous
//! `apply_*` step, so responses are applied in the order they arrive. Errors
//! never escape: they become the inline banner or a transient notification.

use tracing::{debug, info, warn};

use crate::api_client::CollectionApi;
use crate::config::TimelineSettings;
use crate::errors::ApiError;

use super::delete::DeleteGuard;
use super::edit::EditSession;
use super::notification::{Notification, Notifier};
use super::sort::sorted_for_display;
use super::{TimelineEntity, TimelineItem, TimelineOptions};

/// Coarse state of a section, derived from the controller's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Error,
    Editing(String),
    ConfirmingDelete(String),
}

/// What the section renders. The list and the edit view are never shown together.
#[derive(Debug)]
pub enum View<'a, T> {
    List(ListView<'a>),
    Edit(&'a T),
}

#[derive(Debug)]
pub struct ListView<'a> {
    pub is_loading: bool,
    /// Inline error banner shown above the (possibly stale) list.
    pub error: Option<&'a str>,
    pub items: Vec<TimelineItem>,
    pub confirming_delete: Option<&'a str>,
    pub is_deleting: bool,
    pub confirm_label: &'static str,
}

pub struct TimelineController<T, A> {
    api: A,
    options: TimelineOptions<T>,
    settings: TimelineSettings,
    items: Vec<T>,
    selected_id: Option<String>,
    delete: DeleteGuard,
    is_loading: bool,
    error: Option<String>,
    notifier: Notifier,
}

impl<T, A> TimelineController<T, A>
where
    T: TimelineEntity,
    A: CollectionApi<T>,
{
    /// A controller in the `Loading` state; call [`load`](Self::load) on mount.
    pub fn new(api: A, options: TimelineOptions<T>, settings: &TimelineSettings) -> Self {
        Self {
            api,
            options,
            settings: *settings,
            items: Vec::new(),
            selected_id: None,
            delete: DeleteGuard::new(),
            is_loading: true,
            error: None,
            notifier: Notifier::new(settings.notification_timeout),
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Entities in stored (server) order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected(&self) -> Option<&T> {
        let id = self.selected_id.as_deref()?;
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn delete_id(&self) -> Option<&str> {
        self.delete.pending_id()
    }

    pub fn delete_guard(&self) -> &DeleteGuard {
        &self.delete
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_deleting(&self) -> bool {
        self.delete.is_in_flight()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifier.current()
    }

    pub fn dismiss_notification(&mut self) {
        self.notifier.dismiss();
    }

    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if let Some(id) = &self.selected_id {
            Phase::Editing(id.clone())
        } else if let Some(id) = self.delete.pending_id() {
            Phase::ConfirmingDelete(id.to_string())
        } else if self.error.is_some() {
            Phase::Error
        } else {
            Phase::Ready
        }
    }

    // ── Display ────────────────────────────────────────────────────────────

    /// A display-ordered copy of the items. Stored order is untouched.
    pub fn display_items(&self) -> Vec<T> {
        sorted_for_display(&self.items, |a, b| (self.options.comparator)(a, b))
    }

    pub fn timeline_items(&self) -> Vec<TimelineItem> {
        (self.options.transform)(&self.display_items())
    }

    pub fn view(&self) -> View<'_, T> {
        match self.selected() {
            Some(item) => View::Edit(item),
            None => View::List(ListView {
                is_loading: self.is_loading,
                error: self.error(),
                items: self.timeline_items(),
                confirming_delete: self.delete_id(),
                is_deleting: self.is_deleting(),
                confirm_label: self.delete.confirm_label(),
            }),
        }
    }

    // ── Load ───────────────────────────────────────────────────────────────

    /// Fetches the full collection.
    pub async fn load(&mut self) {
        self.begin_load();
        let result = self.api.list().await;
        self.apply_load(result);
    }

    pub fn begin_load(&mut self) {
        self.is_loading = true;
    }

    pub fn apply_load(&mut self, result: Result<Vec<T>, ApiError>) {
        self.is_loading = false;
        match result {
            Ok(items) => {
                info!("Loaded {} {} entries", items.len(), T::COLLECTION);
                self.error = None;
                self.items = items;
                if self.selected().is_none() {
                    self.selected_id = None;
                }
                if self.items.is_empty() {
                    self.notifier
                        .info("Nothing here yet. Add your first entry to get started.");
                }
            }
            Err(e) => {
                warn!("Failed to load {}: {e}", T::COLLECTION);
                self.error = Some(format!("Failed to load entries: {}", e.user_message()));
            }
        }
    }

    // ── Add ────────────────────────────────────────────────────────────────

    /// POSTs the default value. On success the created entity is appended and
    /// opened for editing; on failure nothing changes but a notification.
    pub async fn add(&mut self) -> Option<String> {
        let result = self.api.create(&self.options.default_value).await;
        self.apply_add(result)
    }

    pub fn apply_add(&mut self, result: Result<T, ApiError>) -> Option<String> {
        match result {
            Ok(created) => {
                let id = created.id().to_string();
                info!("Created {} entry {id}", T::COLLECTION);
                self.items.push(created);
                self.selected_id = Some(id.clone());
                Some(id)
            }
            Err(e) => {
                warn!("Failed to create {} entry: {e}", T::COLLECTION);
                self.notifier
                    .error(format!("Failed to add entry: {}", e.user_message()));
                None
            }
        }
    }

    // ── Edit ───────────────────────────────────────────────────────────────

    /// Opens the edit view for `id`. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        if self.items.iter().any(|item| item.id() == id) {
            self.selected_id = Some(id.to_string());
            true
        } else {
            debug!("Ignoring selection of unknown {} entry {id}", T::COLLECTION);
            false
        }
    }

    pub fn cancel_edit(&mut self) {
        self.selected_id = None;
    }

    /// Starts an edit session on a copy of the selected entity.
    pub fn open_editor(&self) -> Option<EditSession<T>> {
        self.selected()
            .cloned()
            .map(|entity| EditSession::open(entity, &self.settings))
    }

    /// Reconciles a successful save reported by the edit view: replaces the
    /// matching item and closes the edit view. Performs no network call.
    pub fn save(&mut self, saved: T) {
        match self.items.iter_mut().find(|item| item.id() == saved.id()) {
            Some(slot) => {
                *slot = saved;
                self.notifier.success("Saved successfully");
            }
            None => debug!(
                "Saved {} entry {} is no longer listed",
                T::COLLECTION,
                saved.id()
            ),
        }
        self.selected_id = None;
    }

    // ── Delete ─────────────────────────────────────────────────────────────

    /// Arms the confirmation for `id`. No network call, no list change.
    pub fn request_delete(&mut self, id: &str) -> bool {
        self.delete.request(id)
    }

    /// Disarms the confirmation unconditionally.
    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    /// Issues the DELETE for the armed `id`. Returns whether the item was removed.
    pub async fn confirm_delete(&mut self, id: &str) -> bool {
        if !self.begin_delete(id) {
            return false;
        }
        let result = self.api.delete(id).await;
        self.apply_delete(id, result)
    }

    /// Marks the armed delete for `id` as in flight without awaiting it, so
    /// the caller can issue the DELETE itself and keep using the controller
    /// until [`apply_delete`](Self::apply_delete). Returns false unless the
    /// confirmation is armed for exactly this id and idle.
    pub fn begin_delete(&mut self, id: &str) -> bool {
        let started = self.delete.begin(id);
        if !started {
            debug!("Delete of {} entry {id} was not armed", T::COLLECTION);
        }
        started
    }

    pub fn apply_delete(&mut self, id: &str, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => {
                info!("Deleted {} entry {id}", T::COLLECTION);
                self.items.retain(|item| item.id() != id);
                if self.selected_id.as_deref() == Some(id) {
                    self.selected_id = None;
                }
                self.delete.succeed(id);
                self.notifier.success("Deleted successfully");
                true
            }
            Err(e) => {
                warn!("Failed to delete {} entry {id}: {e}", T::COLLECTION);
                self.delete.fail(id);
                self.notifier
                    .error(format!("Failed to delete entry: {}", e.user_message()));
                false
            }
        }
    }
}
