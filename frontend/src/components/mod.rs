//! UI Components for the Smart Leads page.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`SearchSection`] - Search form, wires the orchestrator to the page
//! - [`ProgressPanel`] - Streaming progress bar
//! - [`ResultsTable`] - Contacts table, grows one row at a time
//! - [`DownloadLinks`] - Local and server-side CSV exports
//! - [`NoticePanel`] - Status messages

mod downloads;
mod footer;
mod hero;
mod notices;
mod progress;
mod results;
mod search;

pub use downloads::*;
pub use footer::*;
pub use hero::*;
pub use notices::*;
pub use progress::*;
pub use results::*;
pub use search::*;
