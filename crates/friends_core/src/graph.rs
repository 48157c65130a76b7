//! Monthly activity histogram.
//!
//! # Invariants
//! - The month range always spans the unfiltered activity set, so filters
//!   only change bar heights, never the set of months.
//! - One bin per calendar month between min and max date, inclusive.

use crate::error::JournalResult;
use crate::model::activity::Activity;
use crate::model::friend::Friend;
use crate::model::location::Location;
use crate::query::ActivityFilter;
use chrono::Datelike;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Filter options for graphing. Same semantics as activity listing, no limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphQuery {
    pub with: Option<String>,
    pub location: Option<String>,
    pub tagged: Option<String>,
}

/// Activity count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBin {
    /// `"<Mon> <YYYY>"`, e.g. `"Nov 2014"`.
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

/// Bins (filtered) activities into calendar-month counts.
///
/// Returns an empty series when there are no activities at all.
pub fn graph(
    activities: &[Activity],
    friends: &[Friend],
    locations: &[Location],
    query: &GraphQuery,
) -> JournalResult<Vec<MonthBin>> {
    let filter = ActivityFilter::resolve(
        friends,
        locations,
        query.with.as_deref(),
        query.location.as_deref(),
        query.tagged.as_deref(),
    )?;

    let (Some(first), Some(last)) = (
        activities.iter().map(|activity| activity.date).min(),
        activities.iter().map(|activity| activity.date).max(),
    ) else {
        return Ok(Vec::new());
    };

    let mut counts = BTreeMap::<(i32, u32), usize>::new();
    for activity in activities.iter().filter(|activity| filter.matches(activity)) {
        *counts
            .entry((activity.date.year(), activity.date.month()))
            .or_default() += 1;
    }

    let bins: Vec<MonthBin> = months_between((first.year(), first.month()), (last.year(), last.month()))
        .into_iter()
        .map(|(year, month)| MonthBin {
            label: month_label(year, month),
            year,
            month,
            count: counts.get(&(year, month)).copied().unwrap_or(0),
        })
        .collect();

    debug!(
        "event=graph_build module=graph status=ok months={} filtered={}",
        bins.len(),
        !filter.is_empty()
    );
    Ok(bins)
}

fn months_between(start: (i32, u32), end: (i32, u32)) -> Vec<(i32, u32)> {
    let mut months = Vec::new();
    let (mut year, mut month) = start;
    while (year, month) <= end {
        months.push((year, month));
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    months
}

fn month_label(year: i32, month: u32) -> String {
    let index = month.saturating_sub(1) as usize;
    format!("{} {year}", MONTH_ABBREVIATIONS[index % 12])
}

#[cfg(test)]
mod tests {
    use super::{month_label, months_between};

    #[test]
    fn months_between_crosses_year_boundary() {
        assert_eq!(
            months_between((2014, 11), (2015, 2)),
            vec![(2014, 11), (2014, 12), (2015, 1), (2015, 2)]
        );
    }

    #[test]
    fn months_between_single_month() {
        assert_eq!(months_between((2020, 5), (2020, 5)), vec![(2020, 5)]);
    }

    #[test]
    fn label_uses_short_month_name() {
        assert_eq!(month_label(2014, 11), "Nov 2014");
        assert_eq!(month_label(2015, 1), "Jan 2015");
    }
}
