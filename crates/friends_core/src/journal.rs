//! Journal use-case facade.
//!
//! # Responsibility
//! - Own the parsed document for one invocation.
//! - Provide mutation and query entry points for CLI callers.
//!
//! # Invariants
//! - Every mutation reports whether the model changed; callers persist only
//!   when `Change::changed` is true.
//! - A failed mutation leaves the model untouched.
//! - Renames resolve first, then rewrite all dependent records in one
//!   replacement so no partial rename is ever observable.
//! - New activities go before existing activities of the same day.

use crate::document::Document;
use crate::error::{JournalError, JournalResult};
use crate::graph::{graph, GraphQuery, MonthBin};
use crate::highlight::highlight_description;
use crate::model::activity::Activity;
use crate::model::friend::Friend;
use crate::model::location::Location;
use crate::model::{normalize_tag, EntityKind, Named};
use crate::query::{
    favorite_friends, favorite_locations, filter_activities, filter_friends, ActivityQuery,
    Favorite, FriendQuery,
};
use crate::resolve::resolve_index;
use crate::suggest::{suggest, Suggestions};
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeSet;

/// Result of a mutation plus whether the model changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change<T> {
    pub value: T,
    pub changed: bool,
}

impl<T> Change<T> {
    fn changed(value: T) -> Self {
        Self {
            value,
            changed: true,
        }
    }

    fn unchanged(value: T) -> Self {
        Self {
            value,
            changed: false,
        }
    }
}

/// In-memory journal for a single invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Journal {
    document: Document,
}

impl Journal {
    /// Builds a journal from document text; empty text is an empty journal.
    pub fn parse(text: &str) -> Self {
        Self::from_document(Document::parse(text))
    }

    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn friends(&self) -> &[Friend] {
        &self.document.friends
    }

    pub fn locations(&self) -> &[Location] {
        &self.document.locations
    }

    pub fn activities(&self) -> &[Activity] {
        &self.document.activities
    }

    /// Canonical document text.
    pub fn serialize(&self) -> String {
        self.document.serialize()
    }

    /// Adds a friend with no nicknames, tags or location.
    ///
    /// # Errors
    /// - `Validation` for a blank name.
    /// - `DuplicateEntity` when a friend with this exact name exists.
    pub fn add_friend(&mut self, name: &str) -> JournalResult<Change<Friend>> {
        let name = require_name(name, "Expected friend name")?;
        ensure_unique(EntityKind::Friend, name, &self.document.friends, None)?;

        let friend = Friend::new(name);
        self.document.friends.push(friend.clone());
        info!("event=friend_add module=journal status=ok");
        Ok(Change::changed(friend))
    }

    /// Renames a friend and rewrites every activity reference to them.
    pub fn rename_friend(&mut self, query: &str, new_name: &str) -> JournalResult<Change<Friend>> {
        let new_name = require_name(new_name, "Expected new friend name")?;
        let index = resolve_index(EntityKind::Friend, query, &self.document.friends)?;
        let old_name = self.document.friends[index].name.clone();
        if old_name == new_name {
            return Ok(Change::unchanged(self.document.friends[index].clone()));
        }
        ensure_unique(EntityKind::Friend, new_name, &self.document.friends, Some(index))?;

        let (activities, rewritten) =
            rewrite_activities(&self.document.activities, |activity| {
                activity
                    .includes_friend(&old_name)
                    .then(|| activity.with_friend_renamed(&old_name, new_name))
            });

        self.document.activities = activities;
        let friend = &mut self.document.friends[index];
        friend.name = new_name.to_string();
        info!(
            "event=friend_rename module=journal status=ok activities_updated={}",
            rewritten
        );
        Ok(Change::changed(friend.clone()))
    }

    pub fn add_nickname(&mut self, query: &str, nickname: &str) -> JournalResult<Change<Friend>> {
        let nickname = require_name(nickname, "Expected nickname")?;
        let index = resolve_index(EntityKind::Friend, query, &self.document.friends)?;
        let friend = &mut self.document.friends[index];
        friend.add_nickname(nickname);
        info!("event=nickname_add module=journal status=ok");
        Ok(Change::changed(friend.clone()))
    }

    /// # Errors
    /// - `Validation` when the friend has no such nickname.
    pub fn remove_nickname(
        &mut self,
        query: &str,
        nickname: &str,
    ) -> JournalResult<Change<Friend>> {
        let index = resolve_index(EntityKind::Friend, query, &self.document.friends)?;
        let friend = &mut self.document.friends[index];
        if !friend.remove_nickname(nickname.trim()) {
            return Err(JournalError::validation(format!(
                "Nickname not found: \"{}\"",
                nickname.trim()
            )));
        }
        info!("event=nickname_remove module=journal status=ok");
        Ok(Change::changed(friend.clone()))
    }

    /// Adds a tag; adding a tag the friend already has is not a change.
    pub fn add_tag(&mut self, query: &str, tag: &str) -> JournalResult<Change<Friend>> {
        let tag = normalize_tag(tag).ok_or_else(|| JournalError::validation("Expected tag"))?;
        let index = resolve_index(EntityKind::Friend, query, &self.document.friends)?;
        let friend = &mut self.document.friends[index];
        let inserted = friend.add_tag(&tag);
        info!("event=tag_add module=journal status=ok changed={inserted}");
        Ok(Change {
            value: friend.clone(),
            changed: inserted,
        })
    }

    /// # Errors
    /// - `Validation` when the friend does not carry the tag.
    pub fn remove_tag(&mut self, query: &str, tag: &str) -> JournalResult<Change<Friend>> {
        let tag = normalize_tag(tag).ok_or_else(|| JournalError::validation("Expected tag"))?;
        let index = resolve_index(EntityKind::Friend, query, &self.document.friends)?;
        let friend = &mut self.document.friends[index];
        if !friend.remove_tag(&tag) {
            return Err(JournalError::validation(format!("Tag not found: \"{tag}\"")));
        }
        info!("event=tag_remove module=journal status=ok");
        Ok(Change::changed(friend.clone()))
    }

    /// Sets a friend's home location; both names are resolved fuzzily.
    pub fn set_location(
        &mut self,
        friend_query: &str,
        location_query: &str,
    ) -> JournalResult<Change<Friend>> {
        let friend_index = resolve_index(EntityKind::Friend, friend_query, &self.document.friends)?;
        let location_index =
            resolve_index(EntityKind::Location, location_query, &self.document.locations)?;
        let location_name = self.document.locations[location_index].name.clone();

        let friend = &mut self.document.friends[friend_index];
        if friend.location_name.as_deref() == Some(location_name.as_str()) {
            return Ok(Change::unchanged(friend.clone()));
        }
        friend.location_name = Some(location_name);
        info!("event=location_set module=journal status=ok");
        Ok(Change::changed(friend.clone()))
    }

    /// # Errors
    /// - `Validation` for a blank name.
    /// - `DuplicateEntity` when a location with this exact name exists.
    pub fn add_location(&mut self, name: &str) -> JournalResult<Change<Location>> {
        let name = require_name(name, "Expected location name")?;
        ensure_unique(EntityKind::Location, name, &self.document.locations, None)?;

        let location = Location::new(name);
        self.document.locations.push(location.clone());
        info!("event=location_add module=journal status=ok");
        Ok(Change::changed(location))
    }

    /// Renames a location and rewrites friends and activities that use it.
    pub fn rename_location(
        &mut self,
        query: &str,
        new_name: &str,
    ) -> JournalResult<Change<Location>> {
        let new_name = require_name(new_name, "Expected new location name")?;
        let index = resolve_index(EntityKind::Location, query, &self.document.locations)?;
        let old_name = self.document.locations[index].name.clone();
        if old_name == new_name {
            return Ok(Change::unchanged(self.document.locations[index].clone()));
        }
        ensure_unique(EntityKind::Location, new_name, &self.document.locations, Some(index))?;

        let (activities, rewritten) =
            rewrite_activities(&self.document.activities, |activity| {
                activity
                    .includes_location(&old_name)
                    .then(|| activity.with_location_renamed(&old_name, new_name))
            });

        self.document.activities = activities;
        for friend in &mut self.document.friends {
            if friend.location_name.as_deref() == Some(old_name.as_str()) {
                friend.location_name = Some(new_name.to_string());
            }
        }
        let location = &mut self.document.locations[index];
        location.name = new_name.to_string();
        info!(
            "event=location_rename module=journal status=ok activities_updated={}",
            rewritten
        );
        Ok(Change::changed(location.clone()))
    }

    /// Records an activity from `YYYY-MM-DD: text` or bare text dated `today`.
    ///
    /// Bare friend and location names in the text are highlighted before the
    /// activity is stored.
    pub fn add_activity(
        &mut self,
        serialization: &str,
        today: NaiveDate,
    ) -> JournalResult<Change<Activity>> {
        let (date, text) = match Activity::parse_line(serialization) {
            Some(parsed) => (parsed.date, parsed.description().to_string()),
            None => (today, serialization.trim().to_string()),
        };
        if text.is_empty() {
            return Err(JournalError::validation("Expected activity description"));
        }

        let description =
            highlight_description(&text, &self.document.friends, &self.document.locations);
        let activity = Activity::new(date, description);
        ensure_references_exist(&activity, &self.document)?;
        let position = self
            .document
            .activities
            .iter()
            .position(|existing| existing.date <= activity.date)
            .unwrap_or(self.document.activities.len());
        self.document.activities.insert(position, activity.clone());
        info!(
            "event=activity_add module=journal status=ok friends={} locations={}",
            activity.friend_names().len(),
            activity.location_names().len()
        );
        Ok(Change::changed(activity))
    }

    pub fn list_friends(&self, query: &FriendQuery) -> JournalResult<Vec<&Friend>> {
        filter_friends(&self.document.friends, &self.document.locations, query)
    }

    pub fn list_locations(&self) -> &[Location] {
        &self.document.locations
    }

    pub fn list_activities(&self, query: &ActivityQuery) -> JournalResult<Vec<&Activity>> {
        filter_activities(
            &self.document.activities,
            &self.document.friends,
            &self.document.locations,
            query,
        )
    }

    /// Sorted union of friend and activity tags.
    pub fn list_tags(&self) -> Vec<String> {
        let mut tags = BTreeSet::new();
        for friend in &self.document.friends {
            tags.extend(friend.tags.iter().cloned());
        }
        for activity in &self.document.activities {
            tags.extend(activity.tags().iter().cloned());
        }
        tags.into_iter().collect()
    }

    pub fn favorite_friends(&self, limit: Option<i64>) -> JournalResult<Vec<Favorite>> {
        favorite_friends(&self.document.friends, &self.document.activities, limit)
    }

    pub fn favorite_locations(&self, limit: Option<i64>) -> JournalResult<Vec<Favorite>> {
        favorite_locations(&self.document.locations, &self.document.activities, limit)
    }

    pub fn graph(&self, query: &GraphQuery) -> JournalResult<Vec<MonthBin>> {
        graph(
            &self.document.activities,
            &self.document.friends,
            &self.document.locations,
            query,
        )
    }

    pub fn suggest(
        &self,
        location: Option<&str>,
        today: NaiveDate,
    ) -> JournalResult<Suggestions> {
        suggest(
            &self.document.friends,
            &self.document.locations,
            &self.document.activities,
            location,
            today,
        )
    }
}

fn require_name<'a>(value: &'a str, message: &str) -> JournalResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(JournalError::validation(message))
    } else {
        Ok(trimmed)
    }
}

fn ensure_unique<T: Named>(
    kind: EntityKind,
    name: &str,
    existing: &[T],
    skip: Option<usize>,
) -> JournalResult<()> {
    let taken = existing
        .iter()
        .enumerate()
        .any(|(index, entity)| Some(index) != skip && entity.name() == name);
    if taken {
        return Err(JournalError::DuplicateEntity {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Every marked-up reference must name an existing entity exactly.
fn ensure_references_exist(activity: &Activity, document: &Document) -> JournalResult<()> {
    let missing = |kind: EntityKind, name: &String| JournalError::NotFound {
        kind,
        query: name.clone(),
    };
    if let Some(name) = activity
        .friend_names()
        .iter()
        .find(|name| !document.friends.iter().any(|friend| &friend.name == *name))
    {
        return Err(missing(EntityKind::Friend, name));
    }
    if let Some(name) = activity
        .location_names()
        .iter()
        .find(|name| !document.locations.iter().any(|location| &location.name == *name))
    {
        return Err(missing(EntityKind::Location, name));
    }
    Ok(())
}

/// Builds a replacement activity list; `rewrite` returns `Some` for records
/// that change. Also returns how many were rewritten.
fn rewrite_activities(
    activities: &[Activity],
    rewrite: impl Fn(&Activity) -> Option<Activity>,
) -> (Vec<Activity>, usize) {
    let mut rewritten = 0;
    let updated = activities
        .iter()
        .map(|activity| match rewrite(activity) {
            Some(changed) => {
                rewritten += 1;
                changed
            }
            None => activity.clone(),
        })
        .collect();
    (updated, rewritten)
}
