//! Single-threaded session façade over the merged, paginated view.

use tonefind_retrieval::{DatasetEntry, Kind, Mapper, QueryResponse};

use crate::merge::merge;
use crate::ops::{Completion, Operation, OperationState, OperationTracker, RequestToken};
use crate::store::DatasetStore;
use crate::types::{Match, MergedItem};
use crate::view::{self, Page, ViewState};

/// Browsing session for one media dataset.
///
/// Owns the dataset store, the most recent match set, the filter/page
/// position and the operation tracker. All methods are synchronous; the
/// async boundary stays with the caller, which pairs every `begin_*`
/// token with exactly one `finish_*` call once the network resolves.
/// Completions carrying a superseded token are dropped whole: neither the
/// store, the match set, nor the view moves.
pub struct BrowseSession {
    store: DatasetStore,
    matches: Option<Vec<Match>>,
    execution_time: Option<f64>,
    view: ViewState,
    ops: OperationTracker,
}

impl BrowseSession {
    /// Creates an empty session for one media kind.
    pub fn new(kind: Kind) -> Self {
        Self {
            store: DatasetStore::new(kind),
            matches: None,
            execution_time: None,
            view: ViewState::new(),
            ops: OperationTracker::new(),
        }
    }

    /// Returns the media kind this session browses.
    pub fn kind(&self) -> Kind {
        self.store.kind()
    }

    /// Returns the dataset store.
    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Returns true once a query result (even an empty one) is shown.
    pub fn has_query_result(&self) -> bool {
        self.matches.is_some()
    }

    /// Engine-side execution time of the last applied query, milliseconds.
    pub fn execution_time(&self) -> Option<f64> {
        self.execution_time
    }

    // ---- dataset load ----

    /// Starts a full dataset (re)load.
    pub fn begin_dataset_load(&mut self) -> RequestToken {
        self.ops.begin(Operation::DatasetLoad)
    }

    /// Applies a dataset load result.
    ///
    /// A fresh listing replaces the store wholesale and supersedes any
    /// match set. A failure leaves everything untouched.
    pub fn finish_dataset_load(
        &mut self,
        token: RequestToken,
        result: Result<(Vec<DatasetEntry>, Option<Mapper>), String>,
    ) -> Completion {
        let status = match &result {
            Ok((entries, _)) => {
                OperationState::Succeeded(format!("Loaded {} items", entries.len()))
            }
            Err(e) => OperationState::Failed(format!("Failed to load dataset: {e}")),
        };
        if self.ops.finish(token, status) == Completion::Stale {
            return Completion::Stale;
        }

        if let Ok((entries, mapping)) = result {
            self.store.replace_from_entries(entries);
            if let Some(mapping) = mapping {
                self.store.replace_mapping(mapping);
            }
            self.matches = None;
            self.execution_time = None;
        }
        Completion::Applied
    }

    // ---- query ----

    /// Starts a query submission.
    pub fn begin_query(&mut self) -> RequestToken {
        self.ops.begin(Operation::Query)
    }

    /// Applies a query result.
    ///
    /// A successful query replaces the match set and jumps back to page 0;
    /// zero matches clear the view. A failed query leaves the previously
    /// merged view untouched.
    pub fn finish_query(
        &mut self,
        token: RequestToken,
        result: Result<QueryResponse, String>,
    ) -> Completion {
        let status = match &result {
            Ok(resp) if resp.matches.is_empty() => {
                OperationState::Succeeded("No matches found for your query".to_string())
            }
            Ok(resp) => {
                OperationState::Succeeded(format!("Found {} matching items", resp.matches.len()))
            }
            Err(e) => OperationState::Failed(format!("Error processing query: {e}")),
        };
        if self.ops.finish(token, status) == Completion::Stale {
            return Completion::Stale;
        }

        if let Ok(resp) = result {
            self.matches = Some(resp.matches.iter().map(Match::from).collect());
            self.execution_time = Some(resp.execution_time);
            self.view.reset_page();
        }
        Completion::Applied
    }

    // ---- dataset upload ----

    /// Starts a multi-file dataset upload.
    pub fn begin_dataset_upload(&mut self) -> RequestToken {
        self.ops.begin(Operation::DatasetUpload)
    }

    /// Applies a dataset upload result.
    ///
    /// The store is not touched either way: accepted files only become
    /// items through the dataset reload that follows.
    pub fn finish_dataset_upload(
        &mut self,
        token: RequestToken,
        result: Result<Vec<String>, String>,
    ) -> Completion {
        let status = match &result {
            Ok(accepted) => {
                OperationState::Succeeded(format!("Successfully uploaded {} files", accepted.len()))
            }
            Err(e) => OperationState::Failed(format!("Failed to upload dataset: {e}")),
        };
        self.ops.finish(token, status)
    }

    // ---- mapper upload ----

    /// Starts a wholesale mapper replacement.
    pub fn begin_mapper_upload(&mut self) -> RequestToken {
        self.ops.begin(Operation::MapperUpload)
    }

    /// Applies a mapper upload result. The stored mapping is only
    /// refreshed by the dataset reload that follows.
    pub fn finish_mapper_upload(
        &mut self,
        token: RequestToken,
        result: Result<(), String>,
    ) -> Completion {
        let status = match &result {
            Ok(()) => OperationState::Succeeded("Mapper uploaded successfully".to_string()),
            Err(e) => OperationState::Failed(format!("Failed to upload mapper: {e}")),
        };
        self.ops.finish(token, status)
    }

    // ---- view ----

    /// Recomputes the merged list from the store and the last match set.
    pub fn merged(&self) -> Vec<MergedItem> {
        merge(self.store.items(), self.matches.as_deref())
    }

    /// Computes the currently visible page.
    pub fn page(&mut self) -> Page {
        let merged = self.merged();
        self.view.page(&merged)
    }

    /// Returns the current filter text.
    pub fn filter_text(&self) -> &str {
        self.view.filter_text()
    }

    /// Sets the filter text, resetting to page 0 on change.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.view.set_filter(text);
    }

    /// Advances one page; a no-op on the last page.
    pub fn next_page(&mut self) {
        let merged = self.merged();
        let total = view::total_pages(view::filter(&merged, self.view.filter_text()).len());
        self.view.next_page(total);
    }

    /// Goes back one page; a no-op on the first page.
    pub fn prev_page(&mut self) {
        self.view.prev_page();
    }

    // ---- operation status ----

    /// Returns the lifecycle state of one operation kind.
    pub fn state(&self, op: Operation) -> &OperationState {
        self.ops.state(op)
    }

    /// Returns the user-visible status line for one operation kind, or
    /// `None` when it is idle.
    pub fn status_line(&self, op: Operation) -> Option<String> {
        match self.ops.state(op) {
            OperationState::Idle => None,
            OperationState::Submitting => Some(
                match op {
                    Operation::DatasetLoad => "Loading dataset...",
                    Operation::Query => "Processing query...",
                    Operation::DatasetUpload => "Uploading dataset...",
                    Operation::MapperUpload => "Uploading mapper...",
                }
                .to_string(),
            ),
            OperationState::Succeeded(msg) | OperationState::Failed(msg) => Some(msg.clone()),
        }
    }

    /// Resets a displayed terminal status back to idle.
    pub fn acknowledge(&mut self, op: Operation) {
        self.ops.acknowledge(op);
    }
}

#[cfg(test)]
mod tests {
    use tonefind_retrieval::{DatasetEntry, Kind, QueryMatch, QueryResponse};

    use super::BrowseSession;
    use crate::ops::{Completion, Operation, OperationState};

    fn listing(names: &[&str]) -> Vec<DatasetEntry> {
        let json = serde_json::to_string(names).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    fn response(matches: &[(&str, f64)]) -> QueryResponse {
        QueryResponse {
            matches: matches
                .iter()
                .map(|(name, score)| QueryMatch {
                    filename: name.to_string(),
                    similarity: *score,
                    audio_file: None,
                })
                .collect(),
            execution_time: 42.5,
        }
    }

    fn loaded_session(names: &[&str]) -> BrowseSession {
        let mut session = BrowseSession::new(Kind::Image);
        let token = session.begin_dataset_load();
        let done = session.finish_dataset_load(token, Ok((listing(names), None)));
        assert_eq!(done, Completion::Applied);
        session
    }

    #[test]
    fn query_result_reorders_the_view() {
        let mut session = loaded_session(&["a.jpg", "b.jpg", "c.jpg"]);

        let token = session.begin_query();
        assert_eq!(
            session.status_line(Operation::Query).as_deref(),
            Some("Processing query...")
        );

        let done = session.finish_query(token, Ok(response(&[("b.jpg", 90.0), ("a.jpg", 40.0)])));
        assert_eq!(done, Completion::Applied);

        let page = session.page();
        let ids: Vec<&str> = page.items.iter().map(|m| m.item.id.as_str()).collect();
        assert_eq!(ids, ["b.jpg", "a.jpg", "c.jpg"]);
        assert_eq!(page.items[0].score, Some(90.0));
        assert_eq!(page.items[2].score, None);
        assert_eq!(session.execution_time(), Some(42.5));
        assert_eq!(
            session.status_line(Operation::Query).as_deref(),
            Some("Found 2 matching items")
        );
    }

    #[test]
    fn zero_match_query_clears_the_view() {
        let mut session = loaded_session(&["a.jpg", "b.jpg"]);

        let token = session.begin_query();
        let done = session.finish_query(token, Ok(response(&[])));
        assert_eq!(done, Completion::Applied);

        let page = session.page();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(session.has_query_result());
        assert_eq!(
            session.status_line(Operation::Query).as_deref(),
            Some("No matches found for your query")
        );
    }

    #[test]
    fn failed_query_leaves_the_view_unchanged() {
        let mut session = loaded_session(&["a.jpg", "b.jpg", "c.jpg"]);

        let token = session.begin_query();
        let before = session.merged();
        let done = session.finish_query(token, Err("network error: timed out".to_string()));
        assert_eq!(done, Completion::Applied);

        assert_eq!(session.merged(), before);
        assert!(!session.has_query_result());
        match session.state(Operation::Query) {
            OperationState::Failed(msg) => {
                assert!(msg.starts_with("Error processing query"), "{msg}");
            }
            other => panic!("expected failed state, got {other:?}"),
        }
    }

    #[test]
    fn stale_query_result_is_dropped() {
        let mut session = loaded_session(&["a.jpg", "b.jpg"]);

        // Request A is issued, then superseded by request B before it
        // resolves. A resolves after B: only B's result may stick.
        let first = session.begin_query();
        let second = session.begin_query();

        let done = session.finish_query(second, Ok(response(&[("b.jpg", 80.0)])));
        assert_eq!(done, Completion::Applied);
        let done = session.finish_query(first, Ok(response(&[("a.jpg", 99.0)])));
        assert_eq!(done, Completion::Stale);

        let page = session.page();
        assert_eq!(page.items[0].item.id, "b.jpg");
        assert_eq!(page.items[0].score, Some(80.0));
        assert_eq!(
            session.status_line(Operation::Query).as_deref(),
            Some("Found 1 matching items")
        );
    }

    #[test]
    fn stale_dataset_load_cannot_clobber_newer_listing() {
        let mut session = BrowseSession::new(Kind::Audio);

        let first = session.begin_dataset_load();
        let second = session.begin_dataset_load();

        let done = session.finish_dataset_load(second, Ok((listing(&["new.mid"]), None)));
        assert_eq!(done, Completion::Applied);
        let done = session.finish_dataset_load(first, Ok((listing(&["old.mid"]), None)));
        assert_eq!(done, Completion::Stale);

        let ids: Vec<&str> = session.store().items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["new.mid"]);
    }

    #[test]
    fn dataset_reload_supersedes_the_match_set() {
        let mut session = loaded_session(&["a.jpg"]);
        let token = session.begin_query();
        let _ = session.finish_query(token, Ok(response(&[("a.jpg", 75.0)])));
        assert!(session.has_query_result());

        let token = session.begin_dataset_load();
        let _ = session.finish_dataset_load(token, Ok((listing(&["a.jpg", "b.jpg"]), None)));

        assert!(!session.has_query_result());
        assert_eq!(session.execution_time(), None);
        assert_eq!(session.page().items.len(), 2);
    }

    #[test]
    fn failed_upload_leaves_store_and_mapping_unchanged() {
        let mut session = loaded_session(&["a.jpg"]);

        let token = session.begin_dataset_upload();
        let done =
            session.finish_dataset_upload(token, Err("retrieval engine: rejected".to_string()));
        assert_eq!(done, Completion::Applied);

        assert_eq!(session.store().len(), 1);
        match session.state(Operation::DatasetUpload) {
            OperationState::Failed(msg) => {
                assert!(msg.starts_with("Failed to upload dataset"), "{msg}");
            }
            other => panic!("expected failed state, got {other:?}"),
        }
    }

    #[test]
    fn upload_in_flight_does_not_block_a_query() {
        let mut session = loaded_session(&["a.jpg"]);

        let _upload = session.begin_dataset_upload();
        let query = session.begin_query();

        let done = session.finish_query(query, Ok(response(&[("a.jpg", 60.0)])));
        assert_eq!(done, Completion::Applied);
        assert!(session.state(Operation::DatasetUpload).is_submitting());
    }

    #[test]
    fn successful_query_resets_to_page_zero() {
        let names: Vec<String> = (0..30).map(|i| format!("img{i:02}.jpg")).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let mut session = loaded_session(&refs);

        session.next_page();
        assert_eq!(session.page().page_index, 1);

        let token = session.begin_query();
        let _ = session.finish_query(token, Ok(response(&[("img05.jpg", 50.0)])));
        assert_eq!(session.page().page_index, 0);
    }

    #[test]
    fn acknowledged_status_returns_to_idle() {
        let mut session = loaded_session(&["a.jpg"]);
        let token = session.begin_mapper_upload();
        let _ = session.finish_mapper_upload(token, Ok(()));

        assert_eq!(
            session.status_line(Operation::MapperUpload).as_deref(),
            Some("Mapper uploaded successfully")
        );
        session.acknowledge(Operation::MapperUpload);
        assert_eq!(session.status_line(Operation::MapperUpload), None);
    }
}
