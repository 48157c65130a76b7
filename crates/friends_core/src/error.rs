//! Typed failures crossing the core boundary.
//!
//! # Responsibility
//! - Carry enough data (query text, candidate names) for callers to render
//!   user-facing messages without string parsing.
//!
//! # Invariants
//! - Every variant is recoverable at the call site; the core never aborts.
//! - `AmbiguousMatch.candidates` is sorted ascending by name.

use crate::model::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type JournalResult<T> = Result<T, JournalError>;

/// Error for resolver, query and mutation use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalError {
    /// A name query matched zero candidates.
    NotFound { kind: EntityKind, query: String },
    /// A name query matched several candidates and none matched exactly.
    AmbiguousMatch {
        kind: EntityKind,
        query: String,
        candidates: Vec<String>,
    },
    /// An entity with the same exact name already exists.
    DuplicateEntity { kind: EntityKind, name: String },
    /// Out-of-range or blank input.
    Validation(String),
}

impl JournalError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl Display for JournalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, query } => {
                write!(f, "No {} found for \"{query}\"", kind.label())
            }
            Self::AmbiguousMatch {
                kind,
                query,
                candidates,
            } => write!(
                f,
                "More than one {} found for \"{query}\": {}",
                kind.label(),
                candidates.join(", ")
            ),
            Self::DuplicateEntity { kind, name } => {
                write!(f, "{} named \"{name}\" already exists", kind.title())
            }
            Self::Validation(message) => write!(f, "{message}"),
        }
    }
}

impl Error for JournalError {}
