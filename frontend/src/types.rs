//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **Request Types** - Normalized search form input
//! - **Result Types** - Contacts and progress reported by the server
//! - **Notice Types** - User-visible status messages
//! - **Error Types** - Frontend error handling

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

// =============================================================================
// Request Types
// =============================================================================

/// A normalized search, immutable once a session starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    /// Business category, e.g. "dentista"
    pub category: String,
    /// City or region
    pub location: String,
    /// How many contacts the server should try to find, as typed.
    ///
    /// Sent verbatim; the server decides what an empty or zero limit means.
    pub limit: String,
}

impl SearchRequest {
    /// Build a request from raw form values.
    ///
    /// Every field is trimmed and otherwise left alone.
    pub fn from_form(category: &str, location: &str, limit: &str) -> Self {
        Self {
            category: category.trim().to_string(),
            location: location.trim().to_string(),
            limit: limit.trim().to_string(),
        }
    }

    /// Query-string pairs in the order the backend documents them.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("category", self.category.clone()),
            ("location", self.location.clone()),
            ("limit", self.limit.clone()),
        ]
    }
}

// =============================================================================
// Result Types
// =============================================================================

/// One scraped contact. Arrival order is display and export order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ContactEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: String,
}

/// Accept numbers and nulls where the server should have sent text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl ContactEntry {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self { name: name.into(), phone: phone.into() }
    }
}

/// Server-side progress estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProgressSnapshot {
    #[serde(default)]
    pub found: u64,
    #[serde(default)]
    pub total: u64,
}

impl ProgressSnapshot {
    pub fn new(found: u64, total: u64) -> Self {
        Self { found, total }
    }

    /// `floor(found * 100 / total)`, or `0` when `total` is zero.
    ///
    /// Server values are trusted, so the result is not clamped to 100.
    pub fn percent(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            self.found.saturating_mul(100) / self.total
        }
    }

    /// Display text, e.g. `3 / 5`.
    pub fn label(&self) -> String {
        format!("{} / {}", self.found, self.total)
    }
}

// =============================================================================
// Notice Types
// =============================================================================

/// Notice severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational message
    Info,
    /// Success/completion message
    Success,
    /// Warning message
    Warning,
    /// Error message
    Error,
}

impl NoticeLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "notice-info",
            NoticeLevel::Success => "notice-success",
            NoticeLevel::Warning => "notice-warning",
            NoticeLevel::Error => "notice-error",
        }
    }
}

/// A user-visible status message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Timestamp string (HH:MM:SS)
    pub timestamp: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    /// Request never reached the server or the response was unreadable.
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Streaming transport could not be opened.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Local CSV artifact could not be built.
    #[error("Export error: {0}")]
    Export(String),

    /// Invalid compiled-in configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_input_is_trimmed() {
        let request = SearchRequest::from_form("  dentista ", "\tSão Paulo\n", " 5 ");
        assert_eq!(request.category, "dentista");
        assert_eq!(request.location, "São Paulo");
        assert_eq!(request.limit, "5");
    }

    #[test]
    fn test_limit_is_passed_through_as_typed() {
        assert_eq!(SearchRequest::from_form("a", "b", "").limit, "");
        assert_eq!(SearchRequest::from_form("a", "b", "-3").limit, "-3");
        assert_eq!(SearchRequest::from_form("a", "b", "abc").limit, "abc");
        assert_eq!(SearchRequest::from_form("a", "b", " 0 ").limit, "0");
        assert_eq!(
            SearchRequest::from_form("a", "b", "99999999999").limit,
            "99999999999"
        );
    }

    #[test]
    fn test_empty_limit_query_value_stays_empty() {
        let pairs = SearchRequest::from_form("dentista", "SP", "").query_pairs();
        assert_eq!(pairs[2], ("limit", String::new()));
    }

    #[test]
    fn test_percent_floors() {
        assert_eq!(ProgressSnapshot::new(1, 3).percent(), 33);
        assert_eq!(ProgressSnapshot::new(2, 3).percent(), 66);
        assert_eq!(ProgressSnapshot::new(5, 5).percent(), 100);
    }

    #[test]
    fn test_percent_zero_total() {
        assert_eq!(ProgressSnapshot::new(7, 0).percent(), 0);
    }

    #[test]
    fn test_percent_is_not_clamped() {
        assert_eq!(ProgressSnapshot::new(12, 10).percent(), 120);
    }

    #[test]
    fn test_contact_missing_fields_default_to_empty() {
        let contact: ContactEntry = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert_eq!(contact, ContactEntry::new("A", ""));
    }

    #[test]
    fn test_contact_numeric_phone_and_null_name() {
        let contact: ContactEntry =
            serde_json::from_str(r#"{"name":null,"phone":5511999990000}"#).unwrap();
        assert_eq!(contact, ContactEntry::new("", "5511999990000"));
    }

    #[test]
    fn test_server_error_displays_message_only() {
        let err = AppError::Server { status: 500, message: "boom".to_string() };
        assert_eq!(err.to_string(), "boom");
    }
}
