//! # Shelter Photos
//!
//! Fetches the Seoul open-data feed of animals waiting for adoption, parses
//! the XML into [`models::AnimalRecord`]s, keeps the first record per animal
//! number, and renders photo cards.
//!
//! ## Pipeline
//!
//! 1. **Fetch**: one GET of `http://<host>/<feed-key>/xml/<service>/1/300/`
//! 2. **Parse**: every `<row>` becomes an identifier plus photo URL
//! 3. **Dedupe**: first occurrence of each identifier wins
//! 4. **Render**: the settled [`models::FeedState`] becomes cards or an error
//!
//! ```ignore
//! let config = FeedConfig::with_feed_key(key);
//! let state = pipeline::run(&HttpFeedSource::default(), &config).await;
//! print!("{}", outputs::text::render_cards(&state));
//! ```

pub mod cli;
pub mod config;
pub mod dedupe;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod outputs;
pub mod parser;
pub mod pipeline;
pub mod utils;

pub use config::FeedConfig;
pub use error::{Result, ShelterError};
pub use fetcher::{FeedSource, HttpFeedSource};
pub use models::{AnimalRecord, FeedState};
