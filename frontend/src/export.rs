//! CSV export of accumulated contacts.
//!
//! [`build_csv`] is pure and shared by the streaming and single-shot paths.
//! [`LocalExport`] wraps the result in a browser `Blob` so it can be offered
//! as a download link.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, Url};

use crate::config::CSV_HEADER;
use crate::types::{AppError, AppResult, ContactEntry};

const CSV_MIME: &str = "text/csv;charset=utf-8";

/// Serialize contacts as `Nome,Telefone` followed by one quoted row per entry.
///
/// Every field is quoted and inner quotes are doubled. Rows keep the order
/// of `entries` and are separated by `\n` with no trailing newline.
pub fn build_csv(entries: &[ContactEntry]) -> AppResult<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for entry in entries {
        writer
            .write_record([entry.name.as_str(), entry.phone.as_str()])
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;
    let rows = String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))?;

    let mut out = CSV_HEADER.join(",");
    out.push('\n');
    out.push_str(rows.strip_suffix('\n').unwrap_or(rows.as_str()));
    Ok(out)
}

/// A locally built CSV exposed through an object URL.
///
/// The URL is revoked when the export is dropped, so replacing the export
/// for a new session releases the previous blob.
#[derive(Debug)]
pub struct LocalExport {
    url: String,
}

impl LocalExport {
    /// Build the CSV for `entries` and publish it as a blob URL.
    pub fn from_entries(entries: &[ContactEntry]) -> AppResult<Self> {
        let csv = build_csv(entries)?;
        Self::from_csv(&csv)
    }

    pub fn from_csv(csv: &str) -> AppResult<Self> {
        let parts = js_sys::Array::of1(&JsValue::from_str(csv));
        let options = BlobPropertyBag::new();
        options.set_type(CSV_MIME);

        let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(|e| AppError::Export(format!("Failed to create Blob: {:?}", e)))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|e| AppError::Export(format!("Failed to create object URL: {:?}", e)))?;

        log::debug!("💾 Local CSV ready ({} bytes)", csv.len());
        Ok(Self { url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for LocalExport {
    fn drop(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.url) {
            log::warn!("Failed to revoke {}: {:?}", self.url, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_rows(csv: &str) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv.as_bytes());
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_rows_follow_entry_order() {
        let entries = vec![
            ContactEntry::new("A", "111"),
            ContactEntry::new("B", "222"),
            ContactEntry::new("C", "333"),
        ];

        let csv = build_csv(&entries).unwrap();

        assert_eq!(csv, "Nome,Telefone\n\"A\",\"111\"\n\"B\",\"222\"\n\"C\",\"333\"");
    }

    #[test]
    fn test_quotes_are_doubled_and_parse_back() {
        let entries = vec![ContactEntry::new(r#"She said "hi""#, "1")];

        let csv = build_csv(&entries).unwrap();

        assert_eq!(csv, "Nome,Telefone\n\"She said \"\"hi\"\"\",\"1\"");
        assert_eq!(parse_rows(&csv), vec![vec![r#"She said "hi""#.to_string(), "1".to_string()]]);
    }

    #[test]
    fn test_empty_fields_are_quoted() {
        let csv = build_csv(&[ContactEntry::new("", "")]).unwrap();
        assert_eq!(csv, "Nome,Telefone\n\"\",\"\"");
    }

    #[test]
    fn test_delimiters_and_newlines_survive() {
        let entries = vec![ContactEntry::new("Silva, Ana\nClínica", "+55 11 9999-0000")];

        let csv = build_csv(&entries).unwrap();

        assert_eq!(
            parse_rows(&csv),
            vec![vec!["Silva, Ana\nClínica".to_string(), "+55 11 9999-0000".to_string()]]
        );
    }

    #[test]
    fn test_no_entries_yields_header_only() {
        assert_eq!(build_csv(&[]).unwrap(), "Nome,Telefone\n");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let entry = ContactEntry::new("A", "111");
        let csv = build_csv(&[entry.clone(), entry]).unwrap();
        assert_eq!(parse_rows(&csv).len(), 2);
    }
}
