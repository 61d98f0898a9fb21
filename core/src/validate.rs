//! Local required-field validation for create/update submissions.
//!
//! Validation runs before any network call; failures populate a per-field
//! error map and never reach the classifier. Quantity is a `u32`, so the
//! non-negativity requirement holds structurally and needs no check here.

use std::collections::BTreeMap;

use crate::types::ItemDraft;

/// A description shorter than this is rejected as not usable.
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Per-field validation messages.
///
/// Presence of any entry blocks submission. The map is recomputed on every
/// validation pass, so a field that became valid simply has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

/// Check every required field of a draft.
pub fn validate(draft: &ItemDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if draft.name.trim().is_empty() {
        errors.insert("name", "Name is required");
    }

    let description = draft.description.trim();
    if description.is_empty() {
        errors.insert("description", "Description is required");
    } else if description.chars().count() < MIN_DESCRIPTION_LEN {
        errors.insert(
            "description",
            format!("Description must be at least {MIN_DESCRIPTION_LEN} characters"),
        );
    }

    if draft.category.is_none() {
        errors.insert("category", "Select a category");
    }

    if draft.brand.trim().is_empty() {
        errors.insert("brand", "Brand is required");
    }

    if !(draft.price.is_finite() && draft.price > 0.0) {
        errors.insert("price", "Price must be greater than zero");
    }

    if draft.release_date.is_none() {
        errors.insert("release_date", "Release date is required");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use chrono::NaiveDate;

    fn complete_draft() -> ItemDraft {
        ItemDraft {
            name: "Desk lamp".to_string(),
            description: "Adjustable LED desk lamp".to_string(),
            category: Some(Category::HomeKitchen),
            brand: "Lumen".to_string(),
            price: 24.5,
            quantity: 12,
            release_date: NaiveDate::from_ymd_opt(2024, 3, 10),
            availability: true,
        }
    }

    #[test]
    fn complete_draft_passes() {
        assert!(validate(&complete_draft()).is_empty());
    }

    #[test]
    fn empty_draft_flags_every_required_field() {
        let errors = validate(&ItemDraft::default());
        for field in ["name", "description", "category", "brand", "price", "release_date"] {
            assert!(errors.contains(field), "missing entry for {field}");
        }
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn empty_description_is_flagged() {
        let draft = ItemDraft {
            description: String::new(),
            ..complete_draft()
        };
        let errors = validate(&draft);
        assert_eq!(errors.get("description"), Some("Description is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn short_description_is_flagged() {
        let draft = ItemDraft {
            description: "tiny".to_string(),
            ..complete_draft()
        };
        assert!(validate(&draft).contains("description"));
    }

    #[test]
    fn whitespace_only_name_is_flagged() {
        let draft = ItemDraft {
            name: "   ".to_string(),
            ..complete_draft()
        };
        assert!(validate(&draft).contains("name"));
    }

    #[test]
    fn zero_and_negative_prices_are_flagged() {
        for price in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let draft = ItemDraft {
                price,
                ..complete_draft()
            };
            assert!(validate(&draft).contains("price"), "price {price}");
        }
    }

    #[test]
    fn fixing_a_field_removes_its_entry() {
        let mut draft = ItemDraft {
            brand: String::new(),
            ..complete_draft()
        };
        assert!(validate(&draft).contains("brand"));

        draft.brand = "Lumen".to_string();
        assert!(!validate(&draft).contains("brand"));
    }
}
