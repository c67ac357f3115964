//! View-state logic for the tonefind browser.
//!
//! Reconciles three independently changing inputs (the canonical dataset
//! listing, an in-progress free-text filter, and the most recent ranked
//! match set) into one consistent, paginated view, while tracking every
//! in-flight operation so the view never shows contradictory or stale
//! status.
//!
//! Everything here is synchronous and I/O-free. The async boundary lives
//! with the caller: it obtains a [`RequestToken`] from a `begin_*` method,
//! performs the network call, and hands the outcome back to the matching
//! `finish_*` method. Results are applied in the order their requests were
//! issued, never in arrival order; a completion for a superseded request
//! is dropped whole.
//!
//! ```rust
//! use tonefind_browse::BrowseSession;
//! use tonefind_retrieval::Kind;
//!
//! let mut session = BrowseSession::new(Kind::Audio);
//! let token = session.begin_dataset_load();
//! // ... list the dataset over the network ...
//! # let entries = Vec::new();
//! let _ = session.finish_dataset_load(token, Ok((entries, None)));
//!
//! session.set_filter("song");
//! let page = session.page();
//! println!("page {} of {}", page.page_index + 1, page.total_pages);
//! ```

mod merge;
mod ops;
mod session;
mod store;
mod types;
pub mod view;

pub use merge::merge;
pub use ops::{Completion, Operation, OperationState, OperationTracker, RequestToken};
pub use session::BrowseSession;
pub use store::DatasetStore;
pub use types::{Item, Match, MergedItem};
pub use view::{PAGE_SIZE, Page, ViewState};
