//! Free-text filtering and fixed-size pagination over the merged list.

use serde::Serialize;

use crate::types::MergedItem;

/// Number of items shown per page.
pub const PAGE_SIZE: usize = 12;

/// Free-text filter plus current page position.
///
/// Derived state only: the visible page is always recomputed from the
/// merged list, never patched in place.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    filter_text: String,
    page_index: usize,
}

impl ViewState {
    /// Creates a view at page 0 with no filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current filter text.
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Returns the current page index.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Sets the filter text. Changing the filter resets to page 0.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.filter_text {
            self.filter_text = text;
            self.page_index = 0;
        }
    }

    /// Resets to page 0.
    pub fn reset_page(&mut self) {
        self.page_index = 0;
    }

    /// Advances one page. A no-op on the last page.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page_index + 1 < total_pages {
            self.page_index += 1;
        }
    }

    /// Goes back one page. A no-op on the first page.
    pub fn prev_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Clamps the page index to `[0, total_pages - 1]` after the
    /// underlying list shrank.
    pub fn clamp(&mut self, total_pages: usize) {
        if self.page_index >= total_pages {
            self.page_index = total_pages.saturating_sub(1);
        }
    }

    /// Computes the visible page of `merged` under the current filter,
    /// clamping the page index to the filtered length.
    pub fn page(&mut self, merged: &[MergedItem]) -> Page {
        let filtered = filter(merged, &self.filter_text);
        let total_pages = total_pages(filtered.len());
        self.clamp(total_pages);

        let start = self.page_index * PAGE_SIZE;
        let items = filtered
            .iter()
            .skip(start)
            .take(PAGE_SIZE)
            .map(|item| (*item).clone())
            .collect();

        Page {
            items,
            page_index: self.page_index,
            total_pages,
            total_items: filtered.len(),
        }
    }
}

/// One visible page of the filtered, merged list.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Items on this page, at most [`PAGE_SIZE`].
    pub items: Vec<MergedItem>,
    /// Zero-based index of this page.
    pub page_index: usize,
    /// Total page count, at least 1 even for an empty list.
    pub total_pages: usize,
    /// Number of items across all pages after filtering.
    pub total_items: usize,
}

/// Case-insensitive substring filter on item id, order preserving.
pub fn filter<'a>(merged: &'a [MergedItem], text: &str) -> Vec<&'a MergedItem> {
    if text.is_empty() {
        return merged.iter().collect();
    }

    let needle = text.to_lowercase();
    merged
        .iter()
        .filter(|m| m.item.id.to_lowercase().contains(&needle))
        .collect()
}

/// Total page count for a list of `len` items; at least 1 so an empty
/// list still reads "page 1 of 1".
pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

#[cfg(test)]
mod tests {
    use tonefind_retrieval::Kind;

    use super::{PAGE_SIZE, ViewState, filter, total_pages};
    use crate::types::{Item, MergedItem};

    fn merged(ids: &[&str]) -> Vec<MergedItem> {
        ids.iter()
            .map(|id| MergedItem {
                item: Item::new(*id, Kind::Audio),
                score: None,
            })
            .collect()
    }

    fn numbered(n: usize) -> Vec<MergedItem> {
        let ids: Vec<String> = (0..n).map(|i| format!("item{i:03}.mid")).collect();
        let refs: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
        merged(&refs)
    }

    #[test]
    fn empty_list_is_one_page() {
        let mut view = ViewState::new();
        let page = view.page(&[]);

        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_index, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn twenty_five_items_make_three_pages() {
        assert_eq!(PAGE_SIZE, 12);
        assert_eq!(total_pages(25), 3);

        let list = numbered(25);
        let mut view = ViewState::new();

        let page = view.page(&list);
        assert_eq!(page.items.len(), 12);
        assert_eq!(page.total_pages, 3);

        view.next_page(page.total_pages);
        view.next_page(3);
        let last = view.page(&list);
        assert_eq!(last.page_index, 2);
        assert_eq!(last.items.len(), 1);
    }

    #[test]
    fn next_past_last_page_is_a_noop() {
        let list = numbered(25);
        let mut view = ViewState::new();
        view.next_page(3);
        view.next_page(3);
        view.next_page(3);
        view.next_page(3);

        assert_eq!(view.page(&list).page_index, 2);
    }

    #[test]
    fn prev_before_first_page_is_a_noop() {
        let mut view = ViewState::new();
        view.prev_page();
        assert_eq!(view.page_index(), 0);
    }

    #[test]
    fn filter_is_case_insensitive_and_order_preserving() {
        let list = merged(&["Song1.wav", "OTHERSONG.wav", "x.wav"]);
        let hits = filter(&list, "song");

        let ids: Vec<&str> = hits.iter().map(|m| m.item.id.as_str()).collect();
        assert_eq!(ids, ["Song1.wav", "OTHERSONG.wav"]);
    }

    #[test]
    fn changing_filter_resets_page() {
        let list = numbered(25);
        let mut view = ViewState::new();
        view.next_page(3);
        assert_eq!(view.page_index(), 1);

        view.set_filter("item00");
        assert_eq!(view.page_index(), 0);
        let page = view.page(&list);
        assert_eq!(page.total_items, 10);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn page_index_clamps_when_the_list_shrinks() {
        let list = numbered(25);
        let mut view = ViewState::new();
        view.next_page(3);
        view.next_page(3);
        assert_eq!(view.page(&list).page_index, 2);

        let shorter = numbered(5);
        let page = view.page(&shorter);
        assert_eq!(page.page_index, 0);
        assert_eq!(page.items.len(), 5);
    }
}
