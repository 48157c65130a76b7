//! Friend record and its document line form.
//!
//! Line syntax (fields after the name are optional, order is fixed):
//! `Name (a.k.a. Nick a.k.a. Other) [Location] @tag @other`

use crate::model::{normalize_tag, Named};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const NICKNAME_SEPARATOR: &str = " a.k.a. ";

static FRIEND_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<name>.+?)(?: \(a\.k\.a\. (?P<nicknames>.+?)\))?(?: \[(?P<location>[^\]]+)\])?(?P<tags>(?: @\S+)*)$",
    )
    .expect("valid friend line regex")
});

/// Named person with optional nicknames, tags and home location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    /// Display name; the identity used by activity markup.
    pub name: String,
    /// Insertion order is display order. Duplicates are allowed.
    pub nicknames: Vec<String>,
    /// Each tag carries a leading `@`. Insertion order is display order;
    /// no duplicates.
    pub tags: Vec<String>,
    /// Must name an existing location when set.
    pub location_name: Option<String>,
}

impl Friend {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nicknames: Vec::new(),
            tags: Vec::new(),
            location_name: None,
        }
    }

    /// Parses the body of one friend list item (without the `- ` leader).
    ///
    /// Returns `None` when the line does not carry a friend.
    pub fn parse_line(body: &str) -> Option<Self> {
        let caps = FRIEND_LINE_RE.captures(body.trim())?;
        let name = caps.name("name")?.as_str().trim();
        if name.is_empty() {
            return None;
        }

        let nicknames = caps
            .name("nicknames")
            .map(|m| {
                m.as_str()
                    .split(NICKNAME_SEPARATOR)
                    .map(str::trim)
                    .filter(|nickname| !nickname.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let mut friend = Self {
            name: name.to_string(),
            nicknames,
            tags: Vec::new(),
            location_name: caps.name("location").map(|m| m.as_str().trim().to_string()),
        };
        if let Some(tags) = caps.name("tags") {
            for tag in tags.as_str().split_whitespace() {
                friend.add_tag(tag);
            }
        }
        Some(friend)
    }

    /// First whitespace-delimited word of the name.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    pub fn add_nickname(&mut self, nickname: impl Into<String>) {
        self.nicknames.push(nickname.into());
    }

    /// Removes the first occurrence of `nickname`. Returns whether one existed.
    pub fn remove_nickname(&mut self, nickname: &str) -> bool {
        match self.nicknames.iter().position(|value| value == nickname) {
            Some(index) => {
                self.nicknames.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|value| value == tag)
    }

    /// Appends a normalized tag. Returns whether it was new.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        match normalize_tag(tag) {
            Some(tag) if !self.has_tag(&tag) => {
                self.tags.push(tag);
                true
            }
            _ => false,
        }
    }

    /// Removes a tag in place, keeping the order of the rest.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let Some(tag) = normalize_tag(tag) else {
            return false;
        };
        match self.tags.iter().position(|value| *value == tag) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }
}

impl Named for Friend {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Friend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        if !self.nicknames.is_empty() {
            write!(f, " (a.k.a. {})", self.nicknames.join(NICKNAME_SEPARATOR))?;
        }
        if let Some(location) = &self.location_name {
            write!(f, " [{location}]")?;
        }
        for tag in &self.tags {
            write!(f, " {tag}")?;
        }
        Ok(())
    }
}
