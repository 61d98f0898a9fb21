//! Catalog operations against the remote HTTP service.
//!
//! # Design
//! `CatalogClient` owns the transport and the view-model store. Each
//! operation moves the store into the loading state, performs its network
//! calls, runs failures through the classifier, and leaves the store
//! renderable on every path. Image fetches fail independently of their
//! item: a missing image degrades to [`ItemImage::Absent`] and is logged,
//! never surfaced.

use std::time::Duration;

use futures::future::join_all;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::classify::{classify, Notification, Operation, Severity};
use crate::error::FetchError;
use crate::store::{CatalogStore, Navigation};
use crate::transport::{RawResponse, Transport};
use crate::types::{ImageUpload, Item, ItemDraft, ItemImage, ItemView};
use crate::validate::validate;

/// How long a mutation's success notification stays visible before the
/// client reports its navigation hint.
pub const DEFAULT_NOTICE_DELAY: Duration = Duration::from_millis(1200);

/// Client for the catalog service, holding the view-model state it
/// reconciles after every fetch and mutation.
#[derive(Debug)]
pub struct CatalogClient {
    transport: Transport,
    store: CatalogStore,
    notice_delay: Duration,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            transport: Transport::new(base_url),
            store: CatalogStore::default(),
            notice_delay: DEFAULT_NOTICE_DELAY,
        }
    }

    /// Replace the delay between a mutation's success notification and its
    /// navigation hint. Tests use [`Duration::ZERO`].
    pub fn with_notice_delay(mut self, delay: Duration) -> Self {
        self.notice_delay = delay;
        self
    }

    /// The view-model state the presentation layer renders from.
    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Dismiss the active notification.
    pub fn dismiss_notification(&mut self) {
        self.store.dismiss_notification();
    }

    // -----------------------------------------------------------------------
    // Fetchers
    // -----------------------------------------------------------------------

    /// Update the search criterion and re-run the listing fetch.
    pub async fn set_search(&mut self, criterion: impl Into<String>) {
        self.store.search = criterion.into();
        self.refresh().await;
    }

    /// Fetch the listing for the current search criterion.
    ///
    /// An empty criterion lists everything; anything else goes to the search
    /// endpoint with the criterion passed through exactly as typed. The
    /// store is only overwritten once every item's image attempt has
    /// settled.
    pub async fn refresh(&mut self) {
        debug!(search = %self.store.search, "fetching listing");
        self.store.begin();
        match self.fetch_listing().await {
            Ok(items) => {
                let views = self.attach_images(items).await;
                self.store.items = views;
                self.store.finish_quiet();
            }
            Err(err) => {
                let notification = classify(&err, Operation::List);
                if notification.category == Severity::Info {
                    // An empty search result, not a failure.
                    self.store.items.clear();
                } else {
                    self.store.can_retry = true;
                }
                self.store.finish(notification);
            }
        }
    }

    /// Re-run a failed listing fetch.
    pub async fn retry(&mut self) {
        self.refresh().await;
    }

    /// Fetch one item and, separately, its image.
    ///
    /// A missing image leaves the item renderable without one; a missing
    /// item is a classified error and clears the current view.
    pub async fn open_item(&mut self, id: Uuid) {
        debug!(%id, "fetching item");
        self.store.begin();
        match self.fetch_item(id).await {
            Ok(item) => {
                let image = self.fetch_image(id).await;
                self.store.current = Some(ItemView { item, image });
                self.store.finish_quiet();
            }
            Err(err) => {
                self.store.current = None;
                self.store.finish(classify(&err, Operation::Get));
            }
        }
    }

    async fn fetch_listing(&self) -> Result<Vec<Item>, FetchError> {
        let response = if self.store.search.is_empty() {
            self.transport.get("/api/products", &[]).await?
        } else {
            self.transport
                .get("/api/products/search", &[("query", self.store.search.as_str())])
                .await?
        };
        expect_status(&response, &[200])?;
        response.json()
    }

    async fn fetch_item(&self, id: Uuid) -> Result<Item, FetchError> {
        let response = self.transport.get(&format!("/api/products/{id}"), &[]).await?;
        expect_status(&response, &[200])?;
        response.json()
    }

    /// Fetch every item's image concurrently, keeping list order. A failed
    /// attempt keeps its item with [`ItemImage::Absent`]; it never fails the
    /// listing.
    async fn attach_images(&self, items: Vec<Item>) -> Vec<ItemView> {
        let fetches = items.into_iter().map(|item| async move {
            let image = self.fetch_image(item.id).await;
            ItemView { item, image }
        });
        join_all(fetches).await
    }

    async fn fetch_image(&self, id: Uuid) -> ItemImage {
        match self.try_fetch_image(id).await {
            Ok(bytes) => ItemImage::Present(bytes),
            Err(err) => {
                warn!(%id, error = %err, "no image for item");
                ItemImage::Absent
            }
        }
    }

    async fn try_fetch_image(&self, id: Uuid) -> Result<bytes::Bytes, FetchError> {
        let response = self
            .transport
            .get(&format!("/api/product/{id}/image"), &[])
            .await?;
        expect_status(&response, &[200])?;
        Ok(response.body)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Validate and submit a new item, with an optional image attachment.
    ///
    /// Returns where the presentation layer should navigate once the
    /// success notification has been visible for the configured delay.
    pub async fn submit_create(
        &mut self,
        draft: &ItemDraft,
        image: Option<ImageUpload>,
    ) -> Navigation {
        self.store.begin();
        if !self.check_draft(draft) {
            return Navigation::Stay;
        }
        let sent = self
            .send_item(Method::POST, "/api/product".to_string(), draft, image, &[200, 201])
            .await
            .and_then(|response| response.json::<Item>());
        match sent {
            Ok(created) => {
                debug!(id = %created.id, "item created");
                self.store.finish(Notification::success(
                    "Item Created",
                    format!("\"{}\" was added to the catalog.", created.name),
                ));
                tokio::time::sleep(self.notice_delay).await;
                Navigation::Detail(created.id)
            }
            Err(err) => {
                self.store.finish(classify(&err, Operation::Create));
                Navigation::Stay
            }
        }
    }

    /// Validate and submit changes to an existing item, optionally replacing
    /// its image.
    pub async fn submit_update(
        &mut self,
        id: Uuid,
        draft: &ItemDraft,
        image: Option<ImageUpload>,
    ) -> Navigation {
        self.store.begin();
        if !self.check_draft(draft) {
            return Navigation::Stay;
        }
        let sent = self
            .send_item(Method::PUT, format!("/api/product/{id}"), draft, image, &[200, 204])
            .await;
        match sent {
            Ok(_) => {
                debug!(%id, "item updated");
                self.store
                    .finish(Notification::success("Item Updated", "Your changes were saved."));
                tokio::time::sleep(self.notice_delay).await;
                Navigation::Detail(id)
            }
            Err(err) => {
                self.store.finish(classify(&err, Operation::Update));
                Navigation::Stay
            }
        }
    }

    /// Delete an item. Nothing happens unless the caller confirms the
    /// destructive step; on success the listing is the place to go next,
    /// immediately.
    pub async fn submit_delete(&mut self, id: Uuid, confirmed: bool) -> Navigation {
        if !confirmed {
            return Navigation::Stay;
        }
        self.store.begin();
        match self.delete_item(id).await {
            Ok(()) => {
                debug!(%id, "item deleted");
                self.store.current = None;
                self.store.items.retain(|view| view.item.id != id);
                self.store.finish(Notification::success(
                    "Item Deleted",
                    "The item was removed from the catalog.",
                ));
                Navigation::Listing
            }
            Err(err) => {
                self.store.finish(classify(&err, Operation::Delete));
                Navigation::Stay
            }
        }
    }

    /// Run local validation; on failure fill the field-error map, surface a
    /// validation notification, and report `false`. No network call is made
    /// for an invalid draft.
    fn check_draft(&mut self, draft: &ItemDraft) -> bool {
        let errors = validate(draft);
        let ok = errors.is_empty();
        self.store.field_errors = errors;
        if !ok {
            self.store.finish(Notification::error(
                "Validation Failed",
                "Correct the highlighted fields and try again.",
            ));
        }
        ok
    }

    async fn send_item(
        &self,
        method: Method,
        path: String,
        draft: &ItemDraft,
        image: Option<ImageUpload>,
        accepted: &[u16],
    ) -> Result<RawResponse, FetchError> {
        let payload =
            serde_json::to_string(draft).map_err(|e| FetchError::Encode(e.to_string()))?;
        let product = Part::text(payload)
            .mime_str("application/json")
            .map_err(|e| FetchError::Encode(e.to_string()))?;
        let mut form = Form::new().part("product", product);
        if let Some(upload) = image {
            form = form.part("imageFile", image_part(upload)?);
        }
        let response = self.transport.send_multipart(method, &path, form).await?;
        expect_status(&response, accepted)?;
        Ok(response)
    }

    async fn delete_item(&self, id: Uuid) -> Result<(), FetchError> {
        let response = self.transport.delete(&format!("/api/product/{id}")).await?;
        expect_status(&response, &[200, 204])?;
        Ok(())
    }
}

fn image_part(upload: ImageUpload) -> Result<Part, FetchError> {
    Part::bytes(upload.bytes)
        .file_name(upload.file_name)
        .mime_str(&upload.content_type)
        .map_err(|e| FetchError::Encode(e.to_string()))
}

/// Reject any status outside the accepted set, preserving it for the
/// classifier.
fn expect_status(response: &RawResponse, accepted: &[u16]) -> Result<(), FetchError> {
    if accepted.contains(&response.status) {
        return Ok(());
    }
    Err(FetchError::Status {
        status: response.status,
        body: response.text(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    // No server listens on this address; operations that reach the network
    // come back as classified network errors.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    #[test]
    fn expect_status_accepts_listed_codes() {
        let response = RawResponse {
            status: 204,
            body: Bytes::new(),
        };
        assert!(expect_status(&response, &[200, 204]).is_ok());
    }

    #[test]
    fn expect_status_preserves_the_rejected_code() {
        let response = RawResponse {
            status: 409,
            body: Bytes::from_static(b"duplicate"),
        };
        let err = expect_status(&response, &[200, 201]).unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 409);
                assert_eq!(body, "duplicate");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_before_the_network() {
        let mut client = CatalogClient::new(UNREACHABLE);
        let draft = ItemDraft {
            description: String::new(),
            ..ItemDraft::default()
        };

        let nav = client.submit_create(&draft, None).await;

        assert_eq!(nav, Navigation::Stay);
        assert!(client.store().field_errors.contains("description"));
        // A validation notification, not a classified network failure —
        // proof the request was never issued.
        let n = client.store().notification.as_ref().unwrap();
        assert_eq!(n.title, "Validation Failed");
        assert!(!client.store().loading);
    }

    #[tokio::test]
    async fn unconfirmed_delete_does_nothing() {
        let mut client = CatalogClient::new(UNREACHABLE);
        let nav = client.submit_delete(Uuid::new_v4(), false).await;

        assert_eq!(nav, Navigation::Stay);
        assert!(client.store().notification.is_none());
        assert!(!client.store().loading);
    }

    #[tokio::test]
    async fn failed_listing_fetch_arms_the_retry_affordance() {
        let mut client = CatalogClient::new(UNREACHABLE);
        client.refresh().await;

        let store = client.store();
        assert!(store.can_retry);
        assert!(!store.loading);
        let n = store.notification.as_ref().unwrap();
        assert_eq!(n.title, "Network Error");
        assert_eq!(n.category, Severity::Error);
    }

    #[tokio::test]
    async fn failed_item_fetch_clears_the_current_view() {
        let mut client = CatalogClient::new(UNREACHABLE);
        client.open_item(Uuid::new_v4()).await;

        assert!(client.store().current.is_none());
        assert!(!client.store().loading);
        assert!(client.store().notification.is_some());
    }
}
