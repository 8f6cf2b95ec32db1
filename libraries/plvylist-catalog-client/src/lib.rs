//! Plvylist Catalog Client
//!
//! Fetches catalog documents for the Plvylist player.
//!
//! # Features
//!
//! - **Fetch**: GET a `{ "tracks": [...] }` document with request and
//!   connect timeouts
//! - **Superseding loads**: a newer load cancels the one in flight
//! - **Caching**: reloading the last fetched URI skips the network
//!
//! # Example
//!
//! ```ignore
//! use plvylist_catalog_client::{CatalogClient, CatalogLoader};
//! use plvylist_core::CatalogSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = CatalogLoader::new(CatalogClient::new()?);
//!
//!     let source = CatalogSource::Remote("https://example.com/tracks.json".into());
//!     match loader.load(source).await {
//!         Ok(catalog) => session.set_catalog(catalog),
//!         Err(err) => {
//!             if let Some(err) = err.into_load_error() {
//!                 session.catalog_failed(err);
//!             }
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod loader;

// Re-export main types
pub use client::{parse_catalog_url, CatalogClient};
pub use error::{CatalogClientError, Result};
pub use loader::CatalogLoader;
