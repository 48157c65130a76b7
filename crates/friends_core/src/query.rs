//! Activity/friend filtering and ranking.
//!
//! # Responsibility
//! - Resolve `with`/`location` queries and apply AND-composed filters.
//! - Rank friends and locations by activity count.
//!
//! # Invariants
//! - Limit validation happens before any resolution or filtering.
//! - Resolver errors short-circuit before tag and limit application.
//! - Output order is stored order unless `ActivityOrder::NewestFirst` asks
//!   for a stable most-recent-first sort.

use crate::error::{JournalError, JournalResult};
use crate::model::activity::Activity;
use crate::model::friend::Friend;
use crate::model::location::Location;
use crate::model::{normalize_tag, EntityKind, Named};
use crate::resolve::resolve;
use serde::Serialize;
use std::cmp::Reverse;

pub const LIMIT_MESSAGE: &str = "Limit must be positive";
pub const FAVORITES_LIMIT_MESSAGE: &str = "Favorites limit must be positive";

/// Ordering applied to filtered activities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivityOrder {
    /// Document order.
    #[default]
    Stored,
    /// Date descending; same-day entries keep document order.
    NewestFirst,
}

/// Options for activity listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityQuery {
    /// Fuzzy friend query.
    pub with: Option<String>,
    /// Fuzzy location query.
    pub location: Option<String>,
    /// Exact tag, with or without leading `@`.
    pub tagged: Option<String>,
    /// Must be positive when set.
    pub limit: Option<i64>,
    pub order: ActivityOrder,
}

/// Options for friend listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FriendQuery {
    /// Fuzzy location query matched against home locations.
    pub location: Option<String>,
    pub tagged: Option<String>,
}

/// Entity name paired with the number of activities referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Favorite {
    pub name: String,
    pub activity_count: usize,
}

/// Resolved, ready-to-apply activity predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    pub friend_name: Option<String>,
    pub location_name: Option<String>,
    pub tag: Option<String>,
}

impl ActivityFilter {
    /// Resolves fuzzy queries into exact names, friend first.
    pub fn resolve(
        friends: &[Friend],
        locations: &[Location],
        with: Option<&str>,
        location: Option<&str>,
        tagged: Option<&str>,
    ) -> JournalResult<Self> {
        let friend_name = with
            .map(|query| resolve(EntityKind::Friend, query, friends).map(|f| f.name.clone()))
            .transpose()?;
        let location_name = location
            .map(|query| resolve(EntityKind::Location, query, locations).map(|l| l.name.clone()))
            .transpose()?;
        Ok(Self {
            friend_name,
            location_name,
            tag: tagged.and_then(normalize_tag),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.friend_name.is_none() && self.location_name.is_none() && self.tag.is_none()
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        self.friend_name
            .as_deref()
            .map_or(true, |name| activity.includes_friend(name))
            && self
                .location_name
                .as_deref()
                .map_or(true, |name| activity.includes_location(name))
            && self.tag.as_deref().map_or(true, |tag| activity.has_tag(tag))
    }
}

/// Validates an optional limit. `None` means unlimited.
///
/// # Errors
/// - `Validation(message)` when the limit is zero or negative.
pub fn validate_limit(limit: Option<i64>, message: &str) -> JournalResult<Option<usize>> {
    match limit {
        None => Ok(None),
        Some(value) if value < 1 => Err(JournalError::validation(message)),
        Some(value) => Ok(Some(usize::try_from(value).unwrap_or(usize::MAX))),
    }
}

/// Filters, orders and limits activities.
pub fn filter_activities<'a>(
    activities: &'a [Activity],
    friends: &[Friend],
    locations: &[Location],
    query: &ActivityQuery,
) -> JournalResult<Vec<&'a Activity>> {
    let limit = validate_limit(query.limit, LIMIT_MESSAGE)?;
    let filter = ActivityFilter::resolve(
        friends,
        locations,
        query.with.as_deref(),
        query.location.as_deref(),
        query.tagged.as_deref(),
    )?;

    let mut selected: Vec<&Activity> = activities
        .iter()
        .filter(|activity| filter.matches(activity))
        .collect();
    if query.order == ActivityOrder::NewestFirst {
        selected.sort_by_key(|activity| Reverse(activity.date));
    }
    if let Some(limit) = limit {
        selected.truncate(limit);
    }
    Ok(selected)
}

/// Filters friends by home location and tag, keeping stored order.
pub fn filter_friends<'a>(
    friends: &'a [Friend],
    locations: &[Location],
    query: &FriendQuery,
) -> JournalResult<Vec<&'a Friend>> {
    let location_name = query
        .location
        .as_deref()
        .map(|q| resolve(EntityKind::Location, q, locations).map(|l| l.name.as_str()))
        .transpose()?;
    let tag = query.tagged.as_deref().and_then(normalize_tag);

    Ok(friends
        .iter()
        .filter(|friend| {
            location_name.map_or(true, |name| friend.location_name.as_deref() == Some(name))
        })
        .filter(|friend| tag.as_deref().map_or(true, |tag| friend.has_tag(tag)))
        .collect())
}

/// Ranks friends by number of activities, descending; ties keep stored order.
pub fn favorite_friends(
    friends: &[Friend],
    activities: &[Activity],
    limit: Option<i64>,
) -> JournalResult<Vec<Favorite>> {
    rank_favorites(friends, limit, |name| {
        activities
            .iter()
            .filter(|activity| activity.includes_friend(name))
            .count()
    })
}

/// Ranks locations by number of activities, descending; ties keep stored order.
pub fn favorite_locations(
    locations: &[Location],
    activities: &[Activity],
    limit: Option<i64>,
) -> JournalResult<Vec<Favorite>> {
    rank_favorites(locations, limit, |name| {
        activities
            .iter()
            .filter(|activity| activity.includes_location(name))
            .count()
    })
}

fn rank_favorites<T: Named>(
    entities: &[T],
    limit: Option<i64>,
    count: impl Fn(&str) -> usize,
) -> JournalResult<Vec<Favorite>> {
    let limit = validate_limit(limit, FAVORITES_LIMIT_MESSAGE)?;
    let mut ranked: Vec<Favorite> = entities
        .iter()
        .map(|entity| Favorite {
            name: entity.name().to_string(),
            activity_count: count(entity.name()),
        })
        .collect();
    ranked.sort_by_key(|favorite| Reverse(favorite.activity_count));
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    Ok(ranked)
}
