//! Marks bare friend and location names in new activity text.
//!
//! # Responsibility
//! - Wrap friend names in `**` and location names in `_` so the derived
//!   reference fields pick them up.
//!
//! # Invariants
//! - Existing markup spans are never rewritten.
//! - Matching is case-insensitive and whole-word; the longest candidate
//!   wins at a given position.
//! - First names and nicknames are only used when they identify exactly
//!   one friend.

use crate::model::activity::markup_spans;
use crate::model::friend::Friend;
use crate::model::location::Location;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Returns `description` with recognized names wrapped in markup.
pub fn highlight_description(
    description: &str,
    friends: &[Friend],
    locations: &[Location],
) -> String {
    let replacements = build_replacements(friends, locations);
    let Some(matcher) = build_matcher(&replacements) else {
        return description.to_string();
    };

    let mut out = String::with_capacity(description.len());
    let mut cursor = 0;
    for span in markup_spans(description) {
        out.push_str(&replace_names(&matcher, &replacements, &description[cursor..span.start]));
        out.push_str(&description[span.clone()]);
        cursor = span.end;
    }
    out.push_str(&replace_names(&matcher, &replacements, &description[cursor..]));
    out
}

fn build_replacements(friends: &[Friend], locations: &[Location]) -> HashMap<String, String> {
    let mut replacements = HashMap::<String, String>::new();

    for location in locations {
        replacements.insert(location.name.to_lowercase(), format!("_{}_", location.name));
    }

    let mut aliases = HashMap::<String, Vec<&str>>::new();
    for friend in friends {
        let mut own = vec![friend.first_name().to_lowercase()];
        own.extend(friend.nicknames.iter().map(|nickname| nickname.to_lowercase()));
        own.sort();
        own.dedup();
        for alias in own {
            aliases.entry(alias).or_default().push(friend.name.as_str());
        }
    }
    for (alias, owners) in aliases {
        if let [owner] = owners.as_slice() {
            replacements
                .entry(alias)
                .or_insert_with(|| format!("**{owner}**"));
        }
    }

    // Full names override any alias that happens to share their spelling.
    for friend in friends {
        replacements.insert(friend.name.to_lowercase(), format!("**{}**", friend.name));
    }

    replacements.retain(|key, _| !key.trim().is_empty());
    replacements
}

fn build_matcher(replacements: &HashMap<String, String>) -> Option<Regex> {
    let mut needles: Vec<&String> = replacements.keys().collect();
    if needles.is_empty() {
        return None;
    }
    needles.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));

    let alternatives: Vec<String> = needles
        .iter()
        .map(|needle| {
            let starts_word = needle.chars().next().is_some_and(char::is_alphanumeric);
            let ends_word = needle.chars().last().is_some_and(char::is_alphanumeric);
            format!(
                "{}{}{}",
                if starts_word { r"\b" } else { "" },
                regex::escape(needle),
                if ends_word { r"\b" } else { "" }
            )
        })
        .collect();

    Regex::new(&format!("(?i)(?:{})", alternatives.join("|"))).ok()
}

fn replace_names(matcher: &Regex, replacements: &HashMap<String, String>, text: &str) -> String {
    matcher
        .replace_all(text, |caps: &Captures<'_>| {
            let matched = &caps[0];
            replacements
                .get(&matched.to_lowercase())
                .cloned()
                .unwrap_or_else(|| matched.to_string())
        })
        .into_owned()
}
