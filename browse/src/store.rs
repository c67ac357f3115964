//! Canonical dataset listing and its mapping-derived associations.

use tonefind_retrieval::{DatasetEntry, Kind, Mapper};

use crate::types::Item;

/// Holds the canonical list of known items, ordered by arrival, plus the
/// current image-to-audio mapping.
///
/// The listing is only ever replaced wholesale by a fresh dataset load;
/// there is no client-side delete or partial patch.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    kind: Kind,
    items: Vec<Item>,
    mapping: Mapper,
}

impl DatasetStore {
    /// Creates an empty store for one media kind.
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            mapping: Mapper::new(),
        }
    }

    /// Returns the media kind this store holds.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the items in arrival order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the number of known items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items are known.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the current mapping.
    pub fn mapping(&self) -> &Mapper {
        &self.mapping
    }

    /// Replaces the listing from a fresh dataset load, keeping arrival
    /// order. Associations carried by the listing itself win; the rest are
    /// derived from the stored mapping.
    pub fn replace_from_entries(&mut self, entries: Vec<DatasetEntry>) {
        self.items = entries
            .into_iter()
            .map(|entry| {
                let (id, audio_file) = entry.into_parts();
                Item {
                    id,
                    kind: self.kind,
                    associated_id: audio_file,
                }
            })
            .collect();
        self.apply_mapping();
    }

    /// Replaces the mapping wholesale and recomputes every association.
    pub fn replace_mapping(&mut self, mapping: Mapper) {
        self.mapping = mapping;
        self.apply_mapping();
    }

    /// Recomputes `associated_id` for items the listing did not annotate.
    ///
    /// Image items map forward (image -> audio). Audio items look the
    /// relation up in reverse; when several images map to the same audio
    /// file the lexicographically smallest wins, keeping the result
    /// independent of map iteration order.
    fn apply_mapping(&mut self) {
        if self.mapping.is_empty() {
            return;
        }

        for item in &mut self.items {
            if item.associated_id.is_some() {
                continue;
            }
            item.associated_id = match self.kind {
                Kind::Image => self.mapping.get(&item.id).cloned(),
                Kind::Audio => self
                    .mapping
                    .iter()
                    .filter(|(_, audio)| **audio == item.id)
                    .map(|(image, _)| image)
                    .min()
                    .cloned(),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use tonefind_retrieval::{DatasetEntry, Kind, Mapper};

    use super::DatasetStore;

    fn listing(names: &[&str]) -> Vec<DatasetEntry> {
        let json = serde_json::to_string(names).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn replace_keeps_arrival_order() {
        let mut store = DatasetStore::new(Kind::Audio);
        store.replace_from_entries(listing(&["c.mid", "a.mid", "b.mid"]));

        let ids: Vec<&str> = store.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["c.mid", "a.mid", "b.mid"]);
    }

    #[test]
    fn audio_items_get_reverse_mapped_album_image() {
        let mut store = DatasetStore::new(Kind::Audio);
        store.replace_from_entries(listing(&["song.mid", "other.mid"]));

        let mut mapping = Mapper::new();
        mapping.insert("z-cover.jpg".to_string(), "song.mid".to_string());
        mapping.insert("a-cover.jpg".to_string(), "song.mid".to_string());
        store.replace_mapping(mapping);

        // Smallest image filename wins when several map to the same audio.
        assert_eq!(
            store.get("song.mid").unwrap().associated_id.as_deref(),
            Some("a-cover.jpg")
        );
        assert_eq!(store.get("other.mid").unwrap().associated_id, None);
    }

    #[test]
    fn image_items_map_forward() {
        let mut store = DatasetStore::new(Kind::Image);
        store.replace_from_entries(listing(&["cover.jpg"]));

        let mut mapping = Mapper::new();
        mapping.insert("cover.jpg".to_string(), "song.mid".to_string());
        store.replace_mapping(mapping);

        assert_eq!(
            store.get("cover.jpg").unwrap().associated_id.as_deref(),
            Some("song.mid")
        );
    }

    #[test]
    fn listing_annotations_win_over_mapping() {
        let mut store = DatasetStore::new(Kind::Image);

        let mut mapping = Mapper::new();
        mapping.insert("cover.jpg".to_string(), "stale.mid".to_string());
        store.replace_mapping(mapping);

        let entries: Vec<DatasetEntry> = serde_json::from_str(
            r#"[{"filename": "cover.jpg", "audioFile": "fresh.mid"}]"#,
        )
        .unwrap();
        store.replace_from_entries(entries);

        assert_eq!(
            store.get("cover.jpg").unwrap().associated_id.as_deref(),
            Some("fresh.mid")
        );
    }
}
