//! Typed client for the tonefind similarity-retrieval engine.
//!
//! The engine matches a query asset against its datasets (hummed audio
//! against a MIDI collection, an example image against album art) and
//! returns ranked matches. This crate provides the typed request/response
//! boundary to its REST API.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tonefind_retrieval::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("http://localhost:5000")?;
//!
//!     // Submit a hummed query against the audio dataset
//!     let query = std::fs::read("hummed.wav")?;
//!     let result = client.audio().submit_query(query, "hummed.wav").await?;
//!
//!     println!("{} matches in {:.2}ms", result.matches.len(), result.execution_time);
//!     Ok(())
//! }
//! ```
//!
//! # Services
//!
//! - [`MediaService`]: dataset listing, dataset upload, query submission
//!   and raw asset download, for either media kind
//! - [`MapperService`]: the image-to-audio mapping (image side only)
//!
//! Every operation is a single request: failures surface as a typed
//! [`Error`] and are never retried by the client.

mod client;
mod error;
pub mod http;
mod mapper;
mod media;
mod types;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use mapper::MapperService;
pub use media::MediaService;
pub use types::{DatasetEntry, Kind, Mapper, QueryMatch, QueryResponse, UploadFile};
