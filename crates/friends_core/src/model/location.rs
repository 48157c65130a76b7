//! Location record.

use crate::model::Named;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Named place referenced by friends and activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Named for Location {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
