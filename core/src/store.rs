//! View-model state shared with the presentation layer.

use uuid::Uuid;

use crate::classify::Notification;
use crate::types::ItemView;
use crate::validate::FieldErrors;

/// Route change the presentation layer should perform after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Stay on the current view.
    Stay,
    /// Open the detail view of an item.
    Detail(Uuid),
    /// Return to the listing.
    Listing,
}

/// Single source of truth the presentation layer renders from.
///
/// Fields are read directly by the renderer but mutated only through
/// [`crate::client::CatalogClient`] operations. Every operation enters the
/// loading state via `begin` — which also clears the previous notification —
/// and leaves it through exactly one `finish` transition on every path, so
/// the loading indicator never sticks. Overlapping operations are not
/// guarded against: the last one to resolve wins.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    /// The current listing, each item with its independently fetched image.
    pub items: Vec<ItemView>,
    /// The item open in a detail or edit view.
    pub current: Option<ItemView>,
    /// Whether an operation is in flight.
    pub loading: bool,
    /// The active notification, if any. Never more than one.
    pub notification: Option<Notification>,
    /// Per-field validation messages from the last submission attempt.
    pub field_errors: FieldErrors,
    /// The search criterion. Empty means "list everything".
    pub search: String,
    /// Whether a failed listing fetch may be retried manually.
    pub can_retry: bool,
}

impl CatalogStore {
    /// Enter the loading state, clearing the previous notification and the
    /// retry affordance.
    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.notification = None;
        self.can_retry = false;
    }

    /// Leave the loading state with a notification.
    pub(crate) fn finish(&mut self, notification: Notification) {
        self.loading = false;
        self.notification = Some(notification);
    }

    /// Leave the loading state without surfacing anything.
    pub(crate) fn finish_quiet(&mut self) {
        self.loading = false;
        self.notification = None;
    }

    /// Dismiss the active notification.
    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Notification, Severity};

    #[test]
    fn begin_clears_the_previous_notification() {
        let mut store = CatalogStore::default();
        store.finish(Notification::error("Server Error", "boom"));
        store.can_retry = true;

        store.begin();
        assert!(store.loading);
        assert!(store.notification.is_none());
        assert!(!store.can_retry);
    }

    #[test]
    fn finish_replaces_loading_with_a_notification() {
        let mut store = CatalogStore::default();
        store.begin();
        store.finish(Notification::success("Item Created", "done"));

        assert!(!store.loading);
        let n = store.notification.as_ref().unwrap();
        assert_eq!(n.category, Severity::Success);
    }

    #[test]
    fn quiet_finish_leaves_no_notification() {
        let mut store = CatalogStore::default();
        store.begin();
        store.finish_quiet();
        assert!(!store.loading);
        assert!(store.notification.is_none());
    }

    #[test]
    fn notifications_are_dismissible() {
        let mut store = CatalogStore::default();
        store.finish(Notification::info("Not Found", "No items matched your search."));
        store.dismiss_notification();
        assert!(store.notification.is_none());
    }

    #[test]
    fn operations_are_reentrant_from_any_state() {
        let mut store = CatalogStore::default();
        store.begin();
        // A second operation starts without the first having finished.
        store.begin();
        assert!(store.loading);
        assert!(store.notification.is_none());
    }
}
