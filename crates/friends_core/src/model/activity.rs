//! Activity record and its document line form.
//!
//! # Responsibility
//! - Hold one dated free-text entry.
//! - Materialize friend/location/tag references from description markup.
//!
//! # Invariants
//! - `friend_names`, `location_names` and `tags` always reflect `description`;
//!   the only way to change the description is to build a new activity.
//! - Friend references are wrapped in `**`, location references in `_`.
//! - A `_` only opens or closes a location span at a word boundary, so
//!   identifiers like `my_script` stay plain text.

use crate::model::normalize_tag;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::ops::Range;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

static FRIEND_MARKUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid friend markup regex"));
static LOCATION_MARKUP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\W)(_([^_]+)_)(?:\W|$)").expect("valid location markup regex")
});
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)(@[\w:-]+)").expect("valid tag regex"));

/// Dated journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ActivityWire")]
pub struct Activity {
    pub date: NaiveDate,
    description: String,
    friend_names: Vec<String>,
    location_names: Vec<String>,
    tags: BTreeSet<String>,
}

/// Deserialization shape: derived fields are always recomputed.
#[derive(Deserialize)]
struct ActivityWire {
    date: NaiveDate,
    description: String,
}

impl From<ActivityWire> for Activity {
    fn from(value: ActivityWire) -> Self {
        Self::new(value.date, value.description)
    }
}

impl Activity {
    /// Builds an activity and extracts its references from markup.
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        let description = description.into();
        let friend_names = unique_captures(&FRIEND_MARKUP_RE, &description);
        let mut location_names = Vec::<String>::new();
        for span in location_spans(&description) {
            let name = &description[span.name];
            if !location_names.iter().any(|value| value == name) {
                location_names.push(name.to_string());
            }
        }
        let tags = TAG_RE
            .captures_iter(&description)
            .filter_map(|caps| caps.get(1).and_then(|m| normalize_tag(m.as_str())))
            .collect();

        Self {
            date,
            description,
            friend_names,
            location_names,
            tags,
        }
    }

    /// Parses the body of one activity list item (without the `- ` leader).
    ///
    /// A leading token that is not a calendar date means "not an activity".
    pub fn parse_line(body: &str) -> Option<Self> {
        let (date_token, description) = body.split_once(':')?;
        let date = NaiveDate::parse_from_str(date_token.trim(), DATE_FORMAT).ok()?;
        Some(Self::new(date, description.trim()))
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn friend_names(&self) -> &[String] {
        &self.friend_names
    }

    pub fn location_names(&self) -> &[String] {
        &self.location_names
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn includes_friend(&self, name: &str) -> bool {
        self.friend_names.iter().any(|value| value == name)
    }

    pub fn includes_location(&self, name: &str) -> bool {
        self.location_names.iter().any(|value| value == name)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Returns a copy with `**old**` references rewritten to `**new**`.
    pub fn with_friend_renamed(&self, old: &str, new: &str) -> Self {
        let description = self
            .description
            .replace(&format!("**{old}**"), &format!("**{new}**"));
        Self::new(self.date, description)
    }

    /// Returns a copy with `_old_` references rewritten to `_new_`.
    pub fn with_location_renamed(&self, old: &str, new: &str) -> Self {
        let description = rewrite_location_spans(&self.description, |name| {
            if name == old {
                format!("_{new}_")
            } else {
                format!("_{name}_")
            }
        });
        Self::new(self.date, description)
    }

    /// `YYYY-MM-DD: description` with emphasis markup removed.
    pub fn display_text(&self) -> String {
        let without_friends = FRIEND_MARKUP_RE.replace_all(&self.description, "$1");
        let plain = rewrite_location_spans(&without_friends, str::to_string);
        format!("{}: {plain}", self.date.format(DATE_FORMAT))
    }
}

impl Display for Activity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.date.format(DATE_FORMAT), self.description)
    }
}

/// One `_Name_` reference: the whole span and the name inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LocationSpan {
    pub outer: Range<usize>,
    pub name: Range<usize>,
}

/// Location markup spans in text order.
pub(crate) fn location_spans(text: &str) -> Vec<LocationSpan> {
    let mut spans = Vec::new();
    let mut start = 0;
    // The boundary character after a span may open the next one.
    while let Some(caps) = LOCATION_MARKUP_RE.captures_at(text, start) {
        let (Some(outer), Some(name)) = (caps.get(1), caps.get(2)) else {
            break;
        };
        spans.push(LocationSpan {
            outer: outer.range(),
            name: name.range(),
        });
        start = outer.end();
    }
    spans
}

/// Byte ranges of every `**friend**` and `_location_` span, in text order.
pub(crate) fn markup_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans: Vec<Range<usize>> = FRIEND_MARKUP_RE
        .find_iter(text)
        .map(|m| m.range())
        .collect();
    for location in location_spans(text) {
        if !spans
            .iter()
            .any(|span| span.start < location.outer.end && location.outer.start < span.end)
        {
            spans.push(location.outer);
        }
    }
    spans.sort_by_key(|span| span.start);
    spans
}

fn rewrite_location_spans(text: &str, mut render: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in location_spans(text) {
        out.push_str(&text[cursor..span.outer.start]);
        out.push_str(&render(&text[span.name]));
        cursor = span.outer.end;
    }
    out.push_str(&text[cursor..]);
    out
}

fn unique_captures(re: &Regex, text: &str) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for caps in re.captures_iter(text) {
        if let Some(m) = caps.get(1) {
            let value = m.as_str().to_string();
            if !seen.contains(&value) {
                seen.push(value);
            }
        }
    }
    seen
}
