//! Text rendering of core query results.

use friends_core::{Favorite, MonthBin, Suggestion, Suggestions};

const BAR_GLYPH: &str = "█";

/// Header and noun phrases for a favorites listing.
pub struct FavoritesLabels {
    /// e.g. `Your favorite friends:`
    pub header: &'static str,
    /// e.g. `Your best friend is`
    pub single: &'static str,
}

pub const FAVORITE_FRIENDS: FavoritesLabels = FavoritesLabels {
    header: "Your favorite friends:",
    single: "Your best friend is",
};

pub const FAVORITE_LOCATIONS: FavoritesLabels = FavoritesLabels {
    header: "Your favorite locations:",
    single: "Your favorite location is",
};

/// Ranked table; a limit of one renders as a single sentence.
pub fn favorites(labels: &FavoritesLabels, favorites: &[Favorite], limit: Option<i64>) -> Vec<String> {
    if limit == Some(1) {
        if let Some(best) = favorites.first() {
            return vec![format!(
                "{} {} ({})",
                labels.single,
                best.name,
                activity_count(best.activity_count)
            )];
        }
    }

    let name_width = favorites
        .iter()
        .map(|favorite| favorite.name.chars().count())
        .max()
        .unwrap_or(0);
    let rank_width = favorites.len().to_string().len();

    let mut lines = vec![labels.header.to_string()];
    for (index, favorite) in favorites.iter().enumerate() {
        let count = if index == 0 {
            activity_count(favorite.activity_count)
        } else {
            favorite.activity_count.to_string()
        };
        lines.push(format!(
            "{:>rank_width$}. {:<name_width$} ({count})",
            index + 1,
            favorite.name
        ));
    }
    lines
}

fn activity_count(count: usize) -> String {
    if count == 1 {
        "1 activity".to_string()
    } else {
        format!("{count} activities")
    }
}

/// One `<Mon YYYY> |███` line per month.
pub fn graph(bins: &[MonthBin]) -> Vec<String> {
    bins.iter()
        .map(|bin| format!("{} |{}", bin.label, BAR_GLYPH.repeat(bin.count)))
        .collect()
}

pub fn suggestions(tiers: &Suggestions) -> Vec<String> {
    let line = |title: &str, suggestion: &Option<Suggestion>| {
        let name = suggestion
            .as_ref()
            .map_or("None found", |suggestion| suggestion.name.as_str());
        format!("{title} friend: {name}")
    };
    vec![
        line("Distant", &tiers.distant),
        line("Moderate", &tiers.moderate),
        line("Close", &tiers.close),
    ]
}
