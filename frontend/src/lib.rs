//! Smart Leads - Frontend Rust/Leptos Application
//!
//! A WebAssembly client that searches the Smart Leads scraping service
//! and shows contacts as the server finds them.
//!
//! # Architecture
//!
//! ```text
//! SearchSection ──submit──▶ Orchestrator ──start──▶ SessionController
//!                                │                       │ TransportSignal
//!                                │                       ▼
//!                                │                  aggregator::reduce
//!                                │                       │ RenderOp
//!                                ◀───────────────────────┘
//!                                │ on completion
//!                                ▼
//!                     export::build_csv + server CSV link
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (SearchRequest, ContactEntry, etc.)
//! - [`session`] - Stream session state machine and event decoding
//! - [`aggregator`] - Folds stream events into accumulated results
//! - [`export`] - CSV export builder and blob download links
//! - [`orchestrator`] - Connects the form, the session and the page
//! - [`components`] - UI components
//! - [`services`] - Backend communication (SSE stream, single-shot search)

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod aggregator;
pub mod components;
pub mod config;
pub mod export;
pub mod orchestrator;
pub mod services;
pub mod session;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Requests and results
    ContactEntry, ProgressSnapshot, SearchRequest,
    // Notices
    Notice, NoticeLevel,
    // Errors
    AppError, AppResult,
};

// Core
pub use aggregator::{reduce, ProgressView, RenderOp};
pub use export::{build_csv, LocalExport};
pub use session::{
    decode_event, ExportPlan, SessionController, SessionId, SessionPhase, SessionUpdate,
    StreamEvent, StreamSession, StreamTransport, TransportSignal,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Mount the application on `<body>`.
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Smart Leads - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Smart Leads"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    view! {
        <div class="container">
            <Hero/>
            <SearchSection/>
        </div>

        <Footer/>
    }
}
