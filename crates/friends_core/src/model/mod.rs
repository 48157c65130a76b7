//! Value types for the journal document.
//!
//! # Responsibility
//! - Define `Friend`, `Location` and `Activity` records and their line forms.
//! - Provide the `Named` seam the resolver is generic over.
//!
//! # Invariants
//! - Tags always carry a leading `@` and are compared case-sensitively.
//! - Activity-derived fields are computed once, at construction.

pub mod activity;
pub mod friend;
pub mod location;

use serde::{Deserialize, Serialize};

/// Entity with a display name that queries can resolve against.
pub trait Named {
    fn name(&self) -> &str;
}

/// Which collection a resolver or mutation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Friend,
    Location,
}

impl EntityKind {
    /// Lowercase noun used inside messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Friend => "friend",
            Self::Location => "location",
        }
    }

    /// Capitalized noun used at the start of messages.
    pub fn title(self) -> &'static str {
        match self {
            Self::Friend => "Friend",
            Self::Location => "Location",
        }
    }
}

/// Normalizes one tag value so it carries exactly one leading `@`.
///
/// Returns `None` for blank input.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim().trim_start_matches('@');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("@{trimmed}"))
    }
}

/// Sort key for canonical name order.
pub(crate) fn name_sort_key(name: &str) -> String {
    name.to_lowercase()
}
