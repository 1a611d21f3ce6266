//! Application configuration.
//!
//! Centralized configuration for the Smart Leads frontend.
//! The page is served as static files, so everything here is
//! compiled in rather than read at runtime.

use url::Url;

use crate::types::{AppError, AppResult, SearchRequest};

/// Backend API base URL.
///
/// The scraping service deployed on Railway.
pub const BACKEND_URL: &str = "https://smart-leads-2-back-production.up.railway.app";

/// Single-shot search endpoint, returns `{ data: [...] }`.
pub const SCRAPE_PATH: &str = "/api/scrape";

/// Server-Sent Events search endpoint.
pub const STREAM_PATH: &str = "/api/scrape/stream";

/// Server-side CSV export endpoint.
pub const CSV_PATH: &str = "/api/scrape/csv";

/// Suggested file name for the locally built CSV.
pub const CSV_FILE_NAME: &str = "contatos.csv";

/// Maximum notices to keep in memory.
pub const MAX_NOTICES: usize = 50;

/// CSV header row, in the service's working language.
pub const CSV_HEADER: [&str; 2] = ["Nome", "Telefone"];

/// Shown when the single-shot path returns no contacts.
pub const NO_RESULTS_MESSAGE: &str = "Nenhum contato encontrado com WhatsApp.";

/// Shown when the stream drops before `done`.
pub const STREAM_FAILED_MESSAGE: &str = "Erro: a conexão com o servidor foi interrompida.";

/// Absolute URLs for every backend endpoint the page talks to.
#[derive(Clone, Debug)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Build endpoints against an arbitrary base URL.
    pub fn new(base: &str) -> AppResult<Self> {
        let base = Url::parse(base)
            .map_err(|e| AppError::Config(format!("invalid backend URL '{}': {}", base, e)))?;
        Ok(Self { base })
    }

    /// Endpoints for [`BACKEND_URL`].
    pub fn production() -> AppResult<Self> {
        Self::new(BACKEND_URL)
    }

    pub fn scrape_url(&self, request: &SearchRequest) -> String {
        self.with_query(SCRAPE_PATH, request)
    }

    pub fn stream_url(&self, request: &SearchRequest) -> String {
        self.with_query(STREAM_PATH, request)
    }

    /// Link for the server-regenerated export. Not derived from client state.
    pub fn csv_url(&self, request: &SearchRequest) -> String {
        self.with_query(CSV_PATH, request)
    }

    fn with_query(&self, path: &str, request: &SearchRequest) -> String {
        let mut url = self.base.clone();
        url.set_path(path);
        url.query_pairs_mut()
            .clear()
            .extend_pairs(request.query_pairs());
        url.to_string()
    }
}
