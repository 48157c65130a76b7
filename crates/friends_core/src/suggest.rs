//! Closeness tiers by time since last shared activity.
//!
//! # Invariants
//! - Friends without a qualifying activity are not ranked.
//! - Ranking is by day gap descending; ties keep stored friend order.
//! - No friend fills more than one tier.
//! - The ranking splits into rank tertiles `[0, n/3)`, `[n/3, 2n/3)` and
//!   `[2n/3, n)`; each tier reports its most distant member except close,
//!   which reports the overall closest friend.

use crate::error::JournalResult;
use crate::model::activity::Activity;
use crate::model::friend::Friend;
use crate::model::location::Location;
use crate::model::EntityKind;
use crate::resolve::resolve;
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use std::cmp::Reverse;

/// One ranked friend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub name: String,
    /// Days between `today` and the most recent qualifying activity.
    pub days_since: i64,
}

/// Tier representatives; `None` means "none found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    pub distant: Option<Suggestion>,
    pub moderate: Option<Suggestion>,
    pub close: Option<Suggestion>,
}

/// Ranks friends by days since last shared activity and picks one per tier.
///
/// With `location` set, only activities at the resolved location qualify.
pub fn suggest(
    friends: &[Friend],
    locations: &[Location],
    activities: &[Activity],
    location: Option<&str>,
    today: NaiveDate,
) -> JournalResult<Suggestions> {
    let location_name = location
        .map(|query| resolve(EntityKind::Location, query, locations).map(|l| l.name.as_str()))
        .transpose()?;

    let mut ranked: Vec<Suggestion> = friends
        .iter()
        .filter_map(|friend| {
            activities
                .iter()
                .filter(|activity| activity.includes_friend(&friend.name))
                .filter(|activity| location_name.map_or(true, |name| activity.includes_location(name)))
                .map(|activity| activity.date)
                .max()
                .map(|last| Suggestion {
                    name: friend.name.clone(),
                    days_since: (today - last).num_days(),
                })
        })
        .collect();
    ranked.sort_by_key(|suggestion| Reverse(suggestion.days_since));

    debug!(
        "event=suggest module=suggest status=ok ranked={} scoped={}",
        ranked.len(),
        location_name.is_some()
    );
    Ok(pick_tiers(ranked))
}

fn pick_tiers(ranked: Vec<Suggestion>) -> Suggestions {
    let count = ranked.len();
    let mut tiers = Suggestions::default();
    for (index, suggestion) in ranked.into_iter().enumerate() {
        if index + 1 == count {
            tiers.close = Some(suggestion);
        } else if index == 0 {
            tiers.distant = Some(suggestion);
        } else if count >= 3 && index == count / 3 {
            tiers.moderate = Some(suggestion);
        }
    }
    tiers
}
