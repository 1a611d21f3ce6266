//! Single-shot search against `/api/scrape`.
//!
//! Returns every contact at once as `{ "data": [...] }`. Used when the
//! streaming transport cannot be opened.

use gloo_net::http::Request;
use serde_json::Value;

use crate::config::Endpoints;
use crate::types::{AppError, AppResult, ContactEntry, SearchRequest};

/// Run a search and wait for the complete result list.
pub async fn fetch_contacts(
    endpoints: &Endpoints,
    request: &SearchRequest,
) -> AppResult<Vec<ContactEntry>> {
    let url = endpoints.scrape_url(request);
    log::info!("🔎 Single-shot search: {}", url);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| AppError::Network(format!("HTTP request failed: {}", e)))?;

    // Error bodies are JSON too, when the server manages to send one.
    let body = response.json::<Value>().await.ok();

    if !response.ok() {
        return Err(server_error(response.status(), body.as_ref()));
    }

    let contacts = contacts_from_payload(body.as_ref());
    log::info!("✅ Single-shot search returned {} contacts", contacts.len());
    Ok(contacts)
}

/// Extract contacts from a response body.
///
/// A missing body, a missing `data` key or a non-array `data` all mean zero
/// results. Items that are not objects are skipped.
pub fn contacts_from_payload(payload: Option<&Value>) -> Vec<ContactEntry> {
    let Some(items) = payload.and_then(|p| p.get("data")).and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| match serde_json::from_value::<ContactEntry>(item.clone()) {
            Ok(contact) => Some(contact),
            Err(e) => {
                log::warn!("⚠️  Skipping unreadable contact {}: {}", item, e);
                None
            }
        })
        .collect()
}

/// Build the error for a non-success response: `error`, then `message`,
/// then the bare status.
pub fn server_error(status: u16, body: Option<&Value>) -> AppError {
    let message = text_field(body, "error")
        .or_else(|| text_field(body, "message"))
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status));

    AppError::Server { status, message }
}

fn text_field<'a>(body: Option<&'a Value>, key: &str) -> Option<&'a str> {
    body?.get(key)?.as_str().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_with_contacts() {
        let payload = json!({
            "data": [
                {"name": "Clínica Sorriso", "phone": "+55 11 3333-4444"},
                {"name": "Dr. Ana", "phone": "11999990000"}
            ]
        });

        let contacts = contacts_from_payload(Some(&payload));

        assert_eq!(
            contacts,
            vec![
                ContactEntry::new("Clínica Sorriso", "+55 11 3333-4444"),
                ContactEntry::new("Dr. Ana", "11999990000"),
            ]
        );
    }

    #[test]
    fn test_missing_or_non_array_data_is_empty() {
        assert!(contacts_from_payload(None).is_empty());
        assert!(contacts_from_payload(Some(&json!({}))).is_empty());
        assert!(contacts_from_payload(Some(&json!({"data": null}))).is_empty());
        assert!(contacts_from_payload(Some(&json!({"data": "oops"}))).is_empty());
        assert!(contacts_from_payload(Some(&json!({"data": {"name": "A"}}))).is_empty());
    }

    #[test]
    fn test_non_object_items_are_skipped() {
        let payload = json!({"data": [42, {"name": "A", "phone": "1"}, "x"]});
        assert_eq!(contacts_from_payload(Some(&payload)), vec![ContactEntry::new("A", "1")]);
    }

    #[test]
    fn test_server_error_prefers_error_field() {
        let body = json!({"error": "limite excedido", "message": "ignored"});
        assert_eq!(
            server_error(429, Some(&body)),
            AppError::Server { status: 429, message: "limite excedido".to_string() }
        );
    }

    #[test]
    fn test_server_error_falls_back_to_message_then_status() {
        let body = json!({"message": "falha no scraper"});
        assert_eq!(server_error(500, Some(&body)).to_string(), "falha no scraper");
        assert_eq!(server_error(502, None).to_string(), "HTTP 502");
        assert_eq!(server_error(503, Some(&json!({"error": ""}))).to_string(), "HTTP 503");
        assert_eq!(
            server_error(500, Some(&json!({"error": "", "message": "fora do ar"}))).to_string(),
            "fora do ar"
        );
    }
}
