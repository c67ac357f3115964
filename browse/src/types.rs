//! Core types for the browsable merged view.

use serde::Serialize;

use tonefind_retrieval::{Kind, QueryMatch};

/// A known dataset item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    /// Filename, unique within its dataset.
    pub id: String,

    /// Media kind of the dataset this item belongs to.
    pub kind: Kind,

    /// Mapped counterpart: the audio file for an image item, or the album
    /// image for an audio item. Derived from the mapping, may be absent.
    pub associated_id: Option<String>,
}

impl Item {
    /// Creates a new item with no association.
    pub fn new(id: impl Into<String>, kind: Kind) -> Self {
        Self {
            id: id.into(),
            kind,
            associated_id: None,
        }
    }
}

/// A ranked match from the most recent query.
///
/// Ephemeral: superseded wholesale by the next query or dataset load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    /// Id of the matched dataset item.
    pub item_id: String,

    /// Similarity percentage in [0, 100], higher is more similar.
    pub score: f64,
}

impl Match {
    /// Creates a new match.
    pub fn new(item_id: impl Into<String>, score: f64) -> Self {
        Self {
            item_id: item_id.into(),
            score,
        }
    }
}

impl From<&QueryMatch> for Match {
    fn from(m: &QueryMatch) -> Self {
        Match::new(m.filename.clone(), m.similarity)
    }
}

/// An item of the merged view, annotated with its match score when the
/// most recent query ranked it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedItem {
    /// The underlying dataset item.
    #[serde(flatten)]
    pub item: Item,

    /// Similarity score, present only for matched items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}
