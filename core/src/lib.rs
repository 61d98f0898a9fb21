//! Catalog client core: data fetching, error classification, and view-model
//! state for a storefront backed by a remote HTTP service.
//!
//! # Overview
//! [`CatalogClient`] turns the raw catalog HTTP surface (list, search, get,
//! create, update, delete, per-item image) into a consistent view-model
//! ([`CatalogStore`]) for a presentation layer to render. Failures are
//! classified into user-facing [`Notification`]s; image fetches degrade to
//! [`ItemImage::Absent`] without failing their item.
//!
//! # Design
//! - The transport executes requests and passes statuses through untouched;
//!   interpretation happens in [`classify`] and in each operation's
//!   accepted-status check.
//! - Create/update validate locally first; invalid drafts never reach the
//!   network.
//! - The store is the single source of truth: every operation enters the
//!   loading state and leaves it on every path, and at most one
//!   notification is active at a time.

pub mod classify;
pub mod client;
pub mod error;
pub mod store;
mod transport;
pub mod types;
pub mod validate;

pub use classify::{classify, Notification, Operation, Severity};
pub use client::{CatalogClient, DEFAULT_NOTICE_DELAY};
pub use error::FetchError;
pub use store::{CatalogStore, Navigation};
pub use types::{Category, ImageUpload, Item, ItemDraft, ItemImage, ItemView};
pub use validate::{validate, FieldErrors, MIN_DESCRIPTION_LEN};
