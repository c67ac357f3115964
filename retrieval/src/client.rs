//! Retrieval engine API client.

use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::{Error, Result},
    http::HttpClient,
    mapper::MapperService,
    media::MediaService,
    types::Kind,
};

/// Default retrieval engine base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default request timeout.
///
/// Query matching walks the whole dataset on the engine side, so the
/// transport allows generous time before giving up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Retrieval engine API client.
///
/// The client provides access to the engine's media datasets and the
/// query-by-example matching services.
///
/// # Example
///
/// ```rust,no_run
/// use tonefind_retrieval::Client;
///
/// # async fn run() -> tonefind_retrieval::Result<()> {
/// let client = Client::new("http://localhost:5000")?;
///
/// let listing = client.audio().list_dataset().await?;
/// println!("{} audio items", listing.len());
/// # Ok(())
/// # }
/// ```
pub struct Client {
    http: Arc<HttpClient>,
}

impl Client {
    /// Creates a new client for the given engine base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(base_url).build()
    }

    /// Creates a new client builder for more configuration options.
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Returns the audio dataset and query service.
    pub fn audio(&self) -> MediaService {
        MediaService::new(self.http.clone(), Kind::Audio)
    }

    /// Returns the image dataset and query service.
    pub fn image(&self) -> MediaService {
        MediaService::new(self.http.clone(), Kind::Image)
    }

    /// Returns the service for the given kind.
    pub fn media(&self, kind: Kind) -> MediaService {
        MediaService::new(self.http.clone(), kind)
    }

    /// Returns the image-to-audio mapper service.
    ///
    /// The mapper only exists on the image side of the engine.
    pub fn mapper(&self) -> MapperService {
        MapperService::new(self.http.clone())
    }
}

/// Builder for creating a retrieval engine client.
pub struct ClientBuilder {
    base_url: String,
    timeout: Duration,
}

impl ClientBuilder {
    /// Creates a new client builder.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the transport timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<Client> {
        if self.base_url.is_empty() {
            return Err(Error::Config("base_url must be non-empty".to_string()));
        }

        let base_url = self.base_url.trim_end_matches('/').to_string();
        let http = HttpClient::new(base_url, self.timeout)?;

        Ok(Client {
            http: Arc::new(http),
        })
    }
}
