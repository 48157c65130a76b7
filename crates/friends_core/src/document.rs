//! Document text <-> entity collections.
//!
//! # Responsibility
//! - Parse the three-section markdown journal into ordered collections.
//! - Serialize collections back into canonical document text.
//!
//! # Invariants
//! - Parsing never fails: unrecognized lines are skipped and counted.
//! - Parsed collections keep file order; serialization sorts friends and
//!   locations by case-insensitive name, activities most-recent-first.
//! - Serializing canonically ordered input reproduces it byte for byte.

use crate::model::activity::Activity;
use crate::model::friend::Friend;
use crate::model::location::Location;
use crate::model::name_sort_key;
use log::debug;
use std::cmp::Reverse;

pub const ACTIVITIES_HEADER: &str = "### Activities:";
pub const FRIENDS_HEADER: &str = "### Friends:";
pub const LOCATIONS_HEADER: &str = "### Locations:";
const ITEM_LEADER: &str = "- ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Activities,
    Friends,
    Locations,
}

fn section_for_header(line: &str) -> Option<Section> {
    match line.trim() {
        ACTIVITIES_HEADER => Some(Section::Activities),
        FRIENDS_HEADER => Some(Section::Friends),
        LOCATIONS_HEADER => Some(Section::Locations),
        _ => None,
    }
}

/// In-memory journal collections, in stored order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub friends: Vec<Friend>,
    pub locations: Vec<Location>,
    pub activities: Vec<Activity>,
}

impl Document {
    /// Parses document text. Empty text yields three empty collections.
    pub fn parse(text: &str) -> Self {
        let mut document = Self::default();
        let mut current: Option<Section> = None;
        let mut skipped_lines = 0usize;

        for line in text.lines() {
            if let Some(section) = section_for_header(line) {
                current = Some(section);
                continue;
            }

            let trimmed = line.trim_end();
            if trimmed.trim().is_empty() {
                continue;
            }

            let (Some(section), Some(body)) = (current, trimmed.strip_prefix(ITEM_LEADER)) else {
                skipped_lines += 1;
                continue;
            };

            match section {
                Section::Activities => match Activity::parse_line(body) {
                    Some(activity) => document.activities.push(activity),
                    None => skipped_lines += 1,
                },
                Section::Friends => match Friend::parse_line(body) {
                    Some(friend) => document.friends.push(friend),
                    None => skipped_lines += 1,
                },
                Section::Locations => match parse_location_line(body) {
                    Some(location) => document.locations.push(location),
                    None => skipped_lines += 1,
                },
            }
        }

        debug!(
            "event=document_parse module=document status=ok friends={} locations={} activities={} skipped_lines={}",
            document.friends.len(),
            document.locations.len(),
            document.activities.len(),
            skipped_lines
        );
        document
    }

    /// Renders canonical document text. Does not reorder `self`.
    pub fn serialize(&self) -> String {
        let mut friends: Vec<&Friend> = self.friends.iter().collect();
        friends.sort_by_cached_key(|friend| name_sort_key(&friend.name));

        let mut locations: Vec<&Location> = self.locations.iter().collect();
        locations.sort_by_cached_key(|location| name_sort_key(&location.name));

        let mut activities: Vec<&Activity> = self.activities.iter().collect();
        activities.sort_by_key(|activity| Reverse(activity.date));

        let mut out = String::new();
        write_section(&mut out, ACTIVITIES_HEADER, activities);
        out.push('\n');
        write_section(&mut out, FRIENDS_HEADER, friends);
        out.push('\n');
        write_section(&mut out, LOCATIONS_HEADER, locations);
        out
    }
}

fn parse_location_line(body: &str) -> Option<Location> {
    let name = body.trim();
    if name.is_empty() {
        None
    } else {
        Some(Location::new(name))
    }
}

fn write_section<T: ToString>(out: &mut String, header: &str, items: Vec<T>) {
    out.push_str(header);
    out.push('\n');
    for item in items {
        out.push_str(ITEM_LEADER);
        out.push_str(&item.to_string());
        out.push('\n');
    }
}
