//! Dataset and query operations, shared by both engine kinds.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::multipart;

use crate::{
    error::Result,
    http::HttpClient,
    types::{DatasetEntry, Kind, QueryResponse, UploadFile, UploadResponse},
};

/// Dataset and query service for one media kind.
pub struct MediaService {
    http: Arc<HttpClient>,
    kind: Kind,
}

impl MediaService {
    pub(crate) fn new(http: Arc<HttpClient>, kind: Kind) -> Self {
        Self { http, kind }
    }

    /// Returns the media kind this service talks to.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Submits a query asset and returns the engine's ranked matches.
    ///
    /// Queries are read-only: the asset is matched against the dataset and
    /// discarded, never added to it.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn run(client: tonefind_retrieval::Client) -> tonefind_retrieval::Result<()> {
    /// let hummed = std::fs::read("hummed.wav").unwrap();
    /// let result = client.audio().submit_query(hummed, "hummed.wav").await?;
    ///
    /// for m in &result.matches {
    ///     println!("{}: {:.1}%", m.filename, m.similarity);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit_query(&self, data: Vec<u8>, filename: &str) -> Result<QueryResponse> {
        let form = multipart::Form::new().part(
            "file",
            multipart::Part::bytes(data).file_name(filename.to_string()),
        );

        self.http
            .post_multipart(&format!("/api/{}/upload", self.kind), form)
            .await
    }

    /// Returns the full dataset listing.
    pub async fn list_dataset(&self) -> Result<Vec<DatasetEntry>> {
        self.http
            .get_json(&format!("/api/{}/dataset", self.kind))
            .await
    }

    /// Uploads one or more assets into the dataset.
    ///
    /// Returns the filenames the engine accepted. The engine reports no
    /// per-file errors; a rejection fails the whole upload.
    pub async fn add_to_dataset(&self, files: Vec<UploadFile>) -> Result<Vec<String>> {
        let mut form = multipart::Form::new();
        for file in files {
            form = form.part(
                "files[]",
                multipart::Part::bytes(file.data).file_name(file.filename),
            );
        }

        let response: UploadResponse = self
            .http
            .post_multipart(&format!("/api/{}/dataset", self.kind), form)
            .await?;
        Ok(response.files)
    }

    /// Fetches the raw bytes of a dataset asset.
    pub async fn fetch_asset(&self, filename: &str) -> Result<Bytes> {
        self.http
            .get_bytes(&format!(
                "/api/{}/{}/{}",
                self.kind,
                self.kind.asset_route(),
                filename
            ))
            .await
    }
}
