//! Domain DTOs for the catalog API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! `Item` is the response shape (server-assigned `id` included); `ItemDraft`
//! is the request shape a form submits (no `id`, with `Option` where a form
//! field may still be blank so validation, not serialization, catches it).
//! Integration tests catch any schema drift between the two crates.

use bytes::Bytes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The fixed set of categories an item can belong to.
///
/// Serializes as the human-readable label the API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Fashion,
    #[serde(rename = "Beauty & Personal Care")]
    BeautyPersonalCare,
    #[serde(rename = "Home & Kitchen")]
    HomeKitchen,
    #[serde(rename = "Sports & Outdoors")]
    SportsOutdoors,
    #[serde(rename = "Toys & Kids")]
    ToysKids,
    #[serde(rename = "Books & Stationery")]
    BooksStationery,
    Automotive,
    #[serde(rename = "Grocery & Food")]
    GroceryFood,
    #[serde(rename = "Pet Supplies")]
    PetSupplies,
}

impl Category {
    /// All categories, in the order a selection widget shows them.
    pub const ALL: [Category; 10] = [
        Category::Electronics,
        Category::Fashion,
        Category::BeautyPersonalCare,
        Category::HomeKitchen,
        Category::SportsOutdoors,
        Category::ToysKids,
        Category::BooksStationery,
        Category::Automotive,
        Category::GroceryFood,
        Category::PetSupplies,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Fashion => "Fashion",
            Category::BeautyPersonalCare => "Beauty & Personal Care",
            Category::HomeKitchen => "Home & Kitchen",
            Category::SportsOutdoors => "Sports & Outdoors",
            Category::ToysKids => "Toys & Kids",
            Category::BooksStationery => "Books & Stationery",
            Category::Automotive => "Automotive",
            Category::GroceryFood => "Grocery & Food",
            Category::PetSupplies => "Pet Supplies",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// A catalog item returned by the API.
///
/// The image is never embedded here; it is fetched separately by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub brand: String,
    pub price: f64,
    pub quantity: u32,
    pub release_date: NaiveDate,
    pub availability: bool,
}

/// Form payload for creating or updating an item.
///
/// `category` and `release_date` are `None` until the user picks them;
/// validation rejects `None` before anything is sent, so serialization only
/// ever sees complete drafts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub category: Option<Category>,
    pub brand: String,
    pub price: f64,
    pub quantity: u32,
    pub release_date: Option<NaiveDate>,
    pub availability: bool,
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: None,
            brand: String::new(),
            price: 0.0,
            quantity: 0,
            release_date: None,
            // New items default to in stock, matching the form's checkbox.
            availability: true,
        }
    }
}

/// Outcome of an image fetch.
///
/// A missing image is a normal state of the catalog, not an error; items
/// render with or without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemImage {
    Present(Bytes),
    Absent,
}

impl ItemImage {
    pub fn is_present(&self) -> bool {
        matches!(self, ItemImage::Present(_))
    }

    pub fn bytes(&self) -> Option<&Bytes> {
        match self {
            ItemImage::Present(bytes) => Some(bytes),
            ItemImage::Absent => None,
        }
    }
}

/// An image attached to a create or update submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// An item together with its separately fetched image, as the presentation
/// layer renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub item: Item,
    pub image: ItemImage,
}
