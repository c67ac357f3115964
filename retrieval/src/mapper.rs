//! Image-to-audio mapper operations.

use std::sync::Arc;

use reqwest::multipart;

use crate::{error::Result, http::HttpClient, types::Mapper};

/// Service for reading and replacing the image-to-audio mapping.
///
/// The mapping associates album images with the audio items they belong to.
/// It is replaced as a whole; the engine does not support partial updates.
pub struct MapperService {
    http: Arc<HttpClient>,
}

impl MapperService {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Returns the current image-to-audio mapping.
    pub async fn get(&self) -> Result<Mapper> {
        self.http.get_json("/api/image/mapper").await
    }

    /// Replaces the mapping wholesale with the uploaded mapper file.
    pub async fn replace(&self, data: Vec<u8>, filename: &str) -> Result<()> {
        let form = multipart::Form::new().part(
            "file",
            multipart::Part::bytes(data).file_name(filename.to_string()),
        );

        self.http.post_multipart_unit("/api/image/mapper", form).await
    }
}
