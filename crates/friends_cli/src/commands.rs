//! Subcommand definitions and dispatch onto the core journal.
//!
//! # Responsibility
//! - Map parsed arguments onto `Journal` queries and mutations.
//! - Produce output lines plus a persist flag; never touch the filesystem.

use crate::render;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use friends_core::{
    ActivityOrder, ActivityQuery, FriendQuery, GraphQuery, Journal, JournalError,
};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List friends, locations, activities, tags or favorites
    #[command(subcommand)]
    List(ListCommand),
    /// Add a friend, location, activity, nickname or tag
    #[command(subcommand)]
    Add(AddCommand),
    /// Remove a nickname or tag from a friend
    #[command(subcommand)]
    Remove(RemoveCommand),
    /// Rename a friend or location
    #[command(subcommand)]
    Rename(RenameCommand),
    /// Set data about friends
    #[command(subcommand)]
    Set(SetCommand),
    /// Graph activities by month
    Graph(GraphArgs),
    /// Suggest friends to do activities with
    Suggest {
        /// Only count activities at this location
        #[arg(long = "in")]
        location: Option<String>,
    },
    /// Rewrite the document in canonical order
    Clean,
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// List friends in file order
    Friends {
        /// Only friends living in this location
        #[arg(long = "in")]
        location: Option<String>,
        /// Only friends with this tag
        #[arg(long)]
        tagged: Option<String>,
        /// Show nicknames, location and tags
        #[arg(long)]
        verbose: bool,
    },
    /// List locations in file order
    Locations,
    /// List all tags
    Tags,
    /// List activities in file order
    Activities {
        #[command(flatten)]
        filters: ActivityFilterArgs,
        /// Maximum number of activities to show
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
        /// Sort most recent first instead of file order
        #[arg(long)]
        recent: bool,
    },
    /// List friends or locations by number of activities
    #[command(subcommand)]
    Favorite(FavoriteCommand),
}

#[derive(Subcommand, Debug)]
pub enum FavoriteCommand {
    Friends {
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },
    Locations {
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AddCommand {
    Friend { name: Vec<String> },
    Location { name: Vec<String> },
    /// `YYYY-MM-DD: description`, or a description dated today
    Activity { text: Vec<String> },
    Nickname { friend: String, nickname: String },
    Tag { friend: String, tag: String },
}

#[derive(Subcommand, Debug)]
pub enum RemoveCommand {
    Nickname { friend: String, nickname: String },
    Tag { friend: String, tag: String },
}

#[derive(Subcommand, Debug)]
pub enum RenameCommand {
    Friend { old_name: String, new_name: String },
    Location { old_name: String, new_name: String },
}

#[derive(Subcommand, Debug)]
pub enum SetCommand {
    /// Set a friend's location
    Location { friend: String, location: String },
}

#[derive(Args, Debug, Default)]
pub struct ActivityFilterArgs {
    /// Only activities with this friend
    #[arg(long)]
    pub with: Option<String>,
    /// Only activities at this location
    #[arg(long = "in")]
    pub location: Option<String>,
    /// Only activities with this tag
    #[arg(long)]
    pub tagged: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct GraphArgs {
    #[command(flatten)]
    pub filters: ActivityFilterArgs,
}

/// Lines to print and whether the document must be written back.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub lines: Vec<String>,
    pub changed: bool,
}

impl Outcome {
    fn query(lines: Vec<String>) -> Self {
        Self {
            lines,
            changed: false,
        }
    }

    fn mutation(line: String, changed: bool) -> Self {
        Self {
            lines: vec![line],
            changed,
        }
    }
}

#[derive(Debug)]
pub enum CommandError {
    Journal(JournalError),
    Json(serde_json::Error),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Journal(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "failed to encode output: {err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Journal(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<JournalError> for CommandError {
    fn from(value: JournalError) -> Self {
        Self::Journal(value)
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Runs one command against the journal.
pub fn execute(
    command: Command,
    journal: &mut Journal,
    today: NaiveDate,
    json: bool,
) -> Result<Outcome, CommandError> {
    match command {
        Command::List(list) => execute_list(list, journal, json),
        Command::Add(add) => execute_add(add, journal, today),
        Command::Remove(remove) => execute_remove(remove, journal),
        Command::Rename(rename) => execute_rename(rename, journal),
        Command::Set(SetCommand::Location { friend, location }) => {
            let change = journal.set_location(&friend, &location)?;
            let line = format!(
                "{}'s location set to: {}",
                change.value.name,
                change.value.location_name.as_deref().unwrap_or_default()
            );
            Ok(Outcome::mutation(line, change.changed))
        }
        Command::Graph(args) => {
            let query = GraphQuery {
                with: args.filters.with,
                location: args.filters.location,
                tagged: args.filters.tagged,
            };
            let bins = journal.graph(&query)?;
            lines_or_json(json, &bins, || render::graph(&bins))
        }
        Command::Suggest { location } => {
            let tiers = journal.suggest(location.as_deref(), today)?;
            lines_or_json(json, &tiers, || render::suggestions(&tiers))
        }
        Command::Clean => Ok(Outcome::mutation("File cleaned".to_string(), true)),
    }
}

fn execute_list(
    list: ListCommand,
    journal: &Journal,
    json: bool,
) -> Result<Outcome, CommandError> {
    match list {
        ListCommand::Friends {
            location,
            tagged,
            verbose,
        } => {
            let friends = journal.list_friends(&FriendQuery { location, tagged })?;
            lines_or_json(json, &friends, || {
                friends
                    .iter()
                    .map(|friend| {
                        if verbose {
                            friend.to_string()
                        } else {
                            friend.name.clone()
                        }
                    })
                    .collect()
            })
        }
        ListCommand::Locations => {
            let locations = journal.list_locations();
            lines_or_json(json, &locations, || {
                locations.iter().map(|location| location.name.clone()).collect()
            })
        }
        ListCommand::Tags => {
            let tags = journal.list_tags();
            lines_or_json(json, &tags, || tags.clone())
        }
        ListCommand::Activities {
            filters,
            limit,
            recent,
        } => {
            let query = ActivityQuery {
                with: filters.with,
                location: filters.location,
                tagged: filters.tagged,
                limit,
                order: if recent {
                    ActivityOrder::NewestFirst
                } else {
                    ActivityOrder::Stored
                },
            };
            let activities = journal.list_activities(&query)?;
            lines_or_json(json, &activities, || {
                activities
                    .iter()
                    .map(|activity| activity.display_text())
                    .collect()
            })
        }
        ListCommand::Favorite(FavoriteCommand::Friends { limit }) => {
            let ranked = journal.favorite_friends(limit)?;
            lines_or_json(json, &ranked, || {
                render::favorites(&render::FAVORITE_FRIENDS, &ranked, limit)
            })
        }
        ListCommand::Favorite(FavoriteCommand::Locations { limit }) => {
            let ranked = journal.favorite_locations(limit)?;
            lines_or_json(json, &ranked, || {
                render::favorites(&render::FAVORITE_LOCATIONS, &ranked, limit)
            })
        }
    }
}

fn execute_add(
    add: AddCommand,
    journal: &mut Journal,
    today: NaiveDate,
) -> Result<Outcome, CommandError> {
    let outcome = match add {
        AddCommand::Friend { name } => {
            let change = journal.add_friend(&name.join(" "))?;
            Outcome::mutation(format!("Friend added: \"{}\"", change.value.name), change.changed)
        }
        AddCommand::Location { name } => {
            let change = journal.add_location(&name.join(" "))?;
            Outcome::mutation(
                format!("Location added: \"{}\"", change.value.name),
                change.changed,
            )
        }
        AddCommand::Activity { text } => {
            let change = journal.add_activity(&text.join(" "), today)?;
            Outcome::mutation(
                format!("Activity added: \"{}\"", change.value.display_text()),
                change.changed,
            )
        }
        AddCommand::Nickname { friend, nickname } => {
            let change = journal.add_nickname(&friend, &nickname)?;
            Outcome::mutation(format!("Nickname added: \"{}\"", change.value), change.changed)
        }
        AddCommand::Tag { friend, tag } => {
            let change = journal.add_tag(&friend, &tag)?;
            Outcome::mutation(
                format!("Tag added to friend: \"{}\"", change.value),
                change.changed,
            )
        }
    };
    Ok(outcome)
}

fn execute_remove(remove: RemoveCommand, journal: &mut Journal) -> Result<Outcome, CommandError> {
    let outcome = match remove {
        RemoveCommand::Nickname { friend, nickname } => {
            let change = journal.remove_nickname(&friend, &nickname)?;
            Outcome::mutation(format!("Nickname removed: \"{}\"", change.value), change.changed)
        }
        RemoveCommand::Tag { friend, tag } => {
            let change = journal.remove_tag(&friend, &tag)?;
            Outcome::mutation(
                format!("Tag removed from friend: \"{}\"", change.value),
                change.changed,
            )
        }
    };
    Ok(outcome)
}

fn execute_rename(rename: RenameCommand, journal: &mut Journal) -> Result<Outcome, CommandError> {
    let outcome = match rename {
        RenameCommand::Friend { old_name, new_name } => {
            let change = journal.rename_friend(&old_name, &new_name)?;
            Outcome::mutation(format!("Name changed: \"{}\"", change.value.name), change.changed)
        }
        RenameCommand::Location { old_name, new_name } => {
            let change = journal.rename_location(&old_name, &new_name)?;
            Outcome::mutation(
                format!("Location renamed: \"{}\"", change.value.name),
                change.changed,
            )
        }
    };
    Ok(outcome)
}

fn lines_or_json<T: Serialize + ?Sized>(
    json: bool,
    value: &T,
    lines: impl FnOnce() -> Vec<String>,
) -> Result<Outcome, CommandError> {
    if json {
        Ok(Outcome::query(vec![serde_json::to_string_pretty(value)?]))
    } else {
        Ok(Outcome::query(lines()))
    }
}
