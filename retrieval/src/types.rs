//! Common types for the retrieval engine API.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Media kind served by the retrieval engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// MIDI/audio items, queried by humming.
    Audio,
    /// Album art items, queried by example image.
    Image,
}

impl Kind {
    /// REST path segment for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Audio => "audio",
            Kind::Image => "image",
        }
    }

    /// Route segment for fetching a raw asset of this kind.
    ///
    /// Audio assets stream from `play`, images from `view`.
    pub(crate) fn asset_route(&self) -> &'static str {
        match self {
            Kind::Audio => "play",
            Kind::Image => "view",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "audio" => Ok(Kind::Audio),
            "image" => Ok(Kind::Image),
            other => Err(format!("unknown kind '{other}', expected audio or image")),
        }
    }
}

/// A single ranked match returned by a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryMatch {
    /// Dataset filename of the matched item.
    pub filename: String,

    /// Similarity percentage in [0, 100], higher is more similar.
    pub similarity: f64,

    /// Mapped audio file. The image engine annotates its matches with the
    /// audio item each album image is associated with.
    #[serde(rename = "audioFile", default, skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
}

/// Response to a query submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Ranked matches, best first. Empty when nothing cleared the engine's
    /// similarity threshold.
    pub matches: Vec<QueryMatch>,

    /// Engine-side execution time in milliseconds.
    #[serde(rename = "executionTime")]
    pub execution_time: f64,
}

/// One entry of a dataset listing.
///
/// The audio endpoint returns bare filenames; the image endpoint returns
/// objects carrying the mapped audio file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DatasetEntry {
    /// Annotated form: `{"filename": ..., "audioFile": ...}`.
    Annotated {
        filename: String,
        #[serde(rename = "audioFile", default)]
        audio_file: Option<String>,
    },
    /// Bare filename form.
    Name(String),
}

impl DatasetEntry {
    /// Returns the entry's filename.
    pub fn filename(&self) -> &str {
        match self {
            DatasetEntry::Annotated { filename, .. } => filename,
            DatasetEntry::Name(filename) => filename,
        }
    }

    /// Returns the mapped audio file, if the listing carried one.
    pub fn audio_file(&self) -> Option<&str> {
        match self {
            DatasetEntry::Annotated { audio_file, .. } => audio_file.as_deref(),
            DatasetEntry::Name(_) => None,
        }
    }

    /// Splits the entry into `(filename, mapped audio file)`.
    pub fn into_parts(self) -> (String, Option<String>) {
        match self {
            DatasetEntry::Annotated {
                filename,
                audio_file,
            } => (filename, audio_file),
            DatasetEntry::Name(filename) => (filename, None),
        }
    }
}

/// A file staged for a dataset upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Filename reported to the engine; becomes the item id on acceptance.
    pub filename: String,
    /// Raw file contents.
    pub data: Vec<u8>,
}

impl UploadFile {
    /// Creates a new upload file.
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
        }
    }
}

/// Image-filename to audio-filename mapping.
///
/// A functional relation: each image maps to at most one audio file, while
/// an audio file may be referenced by any number of images.
pub type Mapper = HashMap<String, String>;

/// Response to a dataset upload.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UploadResponse {
    pub files: Vec<String>,
}
