//! Backend communication services.
//!
//! # Services
//!
//! - [`stream`] - Server-Sent Events transport for streamed searches
//! - [`scrape`] - Single-shot search used when streaming is unavailable

pub mod scrape;
pub mod stream;

pub use scrape::*;
pub use stream::*;
