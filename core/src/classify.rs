//! Maps raw network failures to user-facing notifications.
//!
//! The status table here is fixed: a 404 is informational when a listing
//! comes back empty, an error when a specific item was addressed. Everything
//! the classifier produces is deterministic — the same failure in the same
//! operation always yields the same notification.

use crate::error::FetchError;

/// Severity of a notification, as rendered by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Loading,
    Success,
    Error,
    Info,
}

/// A transient status record shown to the user.
///
/// At most one notification is active at a time; starting a new operation
/// clears the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub category: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(
        category: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, message)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, message)
    }
}

/// The operation a failure occurred in.
///
/// Context matters: a 404 on a listing means "nothing matched", while a 404
/// on a direct lookup means the item is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    Image,
}

/// Turn a raw failure into the notification the user sees.
pub fn classify(error: &FetchError, operation: Operation) -> Notification {
    match error {
        FetchError::Network(_) => Notification::error(
            "Network Error",
            "Could not reach the server. Check your connection and try again.",
        ),
        FetchError::Status { status, .. } => classify_status(*status, operation),
        FetchError::Decode(msg) | FetchError::Encode(msg) => {
            Notification::error("Error", msg.clone())
        }
    }
}

fn classify_status(status: u16, operation: Operation) -> Notification {
    match status {
        400 => Notification::error("Invalid Data", "The server rejected the submitted data."),
        401 => Notification::error("Unauthorized", "You must be signed in to do this."),
        403 => Notification::error("Forbidden", "You do not have permission to do this."),
        404 if operation == Operation::List => {
            Notification::info("Not Found", "No items matched your search.")
        }
        404 => Notification::error("Not Found", "The requested item does not exist."),
        409 => Notification::error(
            "Conflict",
            "The item was changed by someone else. Reload and try again.",
        ),
        s if s >= 500 => Notification::error(
            "Server Error",
            "The server hit an internal error. Try again later.",
        ),
        s => Notification::error("Error", format!("Request failed with status {s}")),
    }
}
