use tracing::{info, warn};

use crate::api_client::CollectionApi;
use crate::config::TimelineSettings;
use crate::custom_fields::{CustomFieldKey, CustomFieldStore};

use super::notification::{Notification, Notifier};
use super::TimelineEntity;

/// The single-entity edit view.
///
/// Owns a draft copy of the entity and performs its own PUT round trip. Only a
/// successful save produces a value for [`TimelineController::save`]; failures
/// are reported here and leave the controller's list untouched.
///
/// [`TimelineController::save`]: super::TimelineController::save
pub struct EditSession<T> {
    draft: T,
    is_saving: bool,
    notifier: Notifier,
}

impl<T: TimelineEntity> EditSession<T> {
    pub fn open(entity: T, settings: &TimelineSettings) -> Self {
        Self {
            draft: entity,
            is_saving: false,
            notifier: Notifier::new(settings.notification_timeout),
        }
    }

    pub fn id(&self) -> &str {
        self.draft.id()
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut T {
        &mut self.draft
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifier.current()
    }

    pub fn add_custom_field(&mut self) -> String {
        self.draft.custom_fields_mut().add_field()
    }

    pub fn remove_custom_field(&mut self, id: &str) -> bool {
        self.draft.custom_fields_mut().remove_field(id)
    }

    pub fn update_custom_field(&mut self, id: &str, key: CustomFieldKey, value: &str) -> bool {
        self.draft.custom_fields_mut().update_field(id, key, value)
    }

    /// PUTs the draft. Returns the server's saved entity on success; on
    /// failure shows an error notification and returns `None`.
    pub async fn save<A>(&mut self, api: &A) -> Option<T>
    where
        A: CollectionApi<T> + ?Sized,
    {
        self.is_saving = true;
        let id = self.draft.id().to_string();
        let result = api.update(&id, &self.draft).await;
        self.is_saving = false;

        match result {
            Ok(saved) => {
                info!("Saved {} entry {id}", T::COLLECTION);
                self.draft = saved.clone();
                self.notifier.success("Saved successfully");
                Some(saved)
            }
            Err(e) => {
                warn!("Failed to save {} entry {id}: {e}", T::COLLECTION);
                self.notifier
                    .error(format!("Failed to save: {}", e.user_message()));
                None
            }
        }
    }
}
