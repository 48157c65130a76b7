//! Core domain logic for the friends journal.
//! Parses the journal document, answers queries and applies mutations;
//! reading and writing the document file is left to callers.

pub mod document;
pub mod error;
pub mod graph;
pub mod highlight;
pub mod journal;
pub mod logging;
pub mod model;
pub mod query;
pub mod resolve;
pub mod suggest;

pub use document::Document;
pub use error::{JournalError, JournalResult};
pub use graph::{GraphQuery, MonthBin};
pub use journal::{Change, Journal};
pub use logging::{default_log_level, init_logging, logging_status, normalize_level};
pub use model::activity::Activity;
pub use model::friend::Friend;
pub use model::location::Location;
pub use model::{normalize_tag, EntityKind, Named};
pub use query::{ActivityFilter, ActivityOrder, ActivityQuery, Favorite, FriendQuery};
pub use resolve::{resolve, resolve_index};
pub use suggest::{Suggestion, Suggestions};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
