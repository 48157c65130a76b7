mod common;

use common::{date, CONTENT};
use friends_core::{EntityKind, Friend, Journal, JournalError};

#[test]
fn add_friend_marks_change_and_rejects_duplicates() {
    let mut journal = Journal::parse(CONTENT);
    let added = journal.add_friend("George Harrison").unwrap();
    assert!(added.changed);
    assert_eq!(added.value, Friend::new("George Harrison"));

    let err = journal.add_friend("George Harrison").unwrap_err();
    assert_eq!(
        err,
        JournalError::DuplicateEntity {
            kind: EntityKind::Friend,
            name: "George Harrison".to_string(),
        }
    );
    assert!(matches!(
        journal.add_friend("   ").unwrap_err(),
        JournalError::Validation(_)
    ));
}

#[test]
fn rename_friend_propagates_to_activities() {
    let mut journal = Journal::parse(CONTENT);
    let renamed = journal.rename_friend("George", "George Washington").unwrap();
    assert!(renamed.changed);
    assert_eq!(renamed.value.name, "George Washington");

    let text = journal.serialize();
    assert!(text.contains("\n- George Washington\n"));
    assert!(text.contains("**George Washington**. @food"));
    assert!(!text.contains("George Washington Carver"));

    let with_george = journal
        .activities()
        .iter()
        .filter(|activity| activity.includes_friend("George Washington"))
        .count();
    assert_eq!(with_george, 2);
}

#[test]
fn rename_friend_fails_when_ambiguous() {
    let mut journal = Journal::parse(CONTENT);
    journal.add_friend("George Harrison").unwrap();
    let before = journal.clone();

    let err = journal.rename_friend("George", "George Washington").unwrap_err();
    assert_eq!(
        err.to_string(),
        "More than one friend found for \"George\": George Harrison, George Washington Carver"
    );
    assert_eq!(journal, before);
}

#[test]
fn rename_to_same_name_is_not_a_change() {
    let mut journal = Journal::parse(CONTENT);
    let result = journal.rename_friend("marie", "Marie Curie").unwrap();
    assert!(!result.changed);
}

#[test]
fn rename_friend_rejects_existing_name() {
    let mut journal = Journal::parse(CONTENT);
    let err = journal.rename_friend("marie", "Grace Hopper").unwrap_err();
    assert!(matches!(err, JournalError::DuplicateEntity { .. }));
}

#[test]
fn rename_location_updates_friends_and_activities() {
    let mut journal = Journal::parse(CONTENT);
    journal.rename_location("paris", "Paris, France").unwrap();

    let grace = journal
        .friends()
        .iter()
        .find(|friend| friend.name == "Grace Hopper")
        .unwrap();
    assert_eq!(grace.location_name.as_deref(), Some("Paris, France"));
    assert!(journal
        .activities()
        .iter()
        .any(|activity| activity.includes_location("Paris, France")));
    assert!(journal.serialize().contains("in _Paris, France_ with"));
}

#[test]
fn nicknames_are_added_and_removed() {
    let mut journal = Journal::parse(CONTENT);
    let added = journal.add_nickname("marie", "Madame").unwrap();
    assert_eq!(added.value.nicknames, vec!["Madame"]);
    assert!(journal
        .serialize()
        .contains("- Marie Curie (a.k.a. Madame) [Atlantis] @science"));

    journal.remove_nickname("marie", "Madame").unwrap();
    let err = journal.remove_nickname("marie", "Madame").unwrap_err();
    assert!(matches!(err, JournalError::Validation(_)));
}

#[test]
fn tags_are_normalized_and_deduplicated() {
    let mut journal = Journal::parse(CONTENT);
    let first = journal.add_tag("george", "botany").unwrap();
    assert!(first.changed);
    assert!(first.value.has_tag("@botany"));

    let again = journal.add_tag("george", "@botany").unwrap();
    assert!(!again.changed);

    journal.remove_tag("george", "botany").unwrap();
    assert!(matches!(
        journal.remove_tag("george", "botany").unwrap_err(),
        JournalError::Validation(_)
    ));
}

#[test]
fn set_location_resolves_both_names() {
    let mut journal = Journal::parse(CONTENT);
    let result = journal.set_location("george", "atl").unwrap();
    assert!(result.changed);
    assert_eq!(result.value.location_name.as_deref(), Some("Atlantis"));

    let again = journal.set_location("george", "Atlantis").unwrap();
    assert!(!again.changed);

    let err = journal.set_location("george", "Mars").unwrap_err();
    assert_eq!(err.to_string(), "No location found for \"Mars\"");
}

#[test]
fn add_location_rejects_duplicates() {
    let mut journal = Journal::parse(CONTENT);
    assert!(journal.add_location("Timbuktu").unwrap().changed);
    assert_eq!(
        journal.add_location("Paris").unwrap_err().to_string(),
        "Location named \"Paris\" already exists"
    );
}

#[test]
fn add_activity_highlights_known_names() {
    let mut journal = Journal::parse("### Friends:\n- George Washington Carver @test\n- Betsy Ross @test\n");
    let added = journal
        .add_activity("2014-01-01: Snorkeling with Betsy.", date(2020, 1, 1))
        .unwrap();
    assert!(added.changed);
    assert_eq!(added.value.description(), "Snorkeling with **Betsy Ross**.");
    assert_eq!(added.value.date, date(2014, 1, 1));
    assert_eq!(journal.activities()[0].friend_names(), ["Betsy Ross"]);
}

#[test]
fn add_activity_goes_before_same_day_entries() {
    let mut journal = Journal::parse("### Friends:\n- Betsy Ross\n");
    journal
        .add_activity("2014-01-01: Ate breakfast.", date(2020, 1, 1))
        .unwrap();
    journal
        .add_activity("2014-01-01: Snorkeling with Betsy.", date(2020, 1, 1))
        .unwrap();
    journal
        .add_activity("2013-05-05: Older entry.", date(2020, 1, 1))
        .unwrap();

    let descriptions: Vec<&str> = journal
        .activities()
        .iter()
        .map(|activity| activity.description())
        .collect();
    assert_eq!(
        descriptions,
        vec!["Snorkeling with **Betsy Ross**.", "Ate breakfast.", "Older entry."]
    );
}

#[test]
fn add_activity_without_date_uses_today() {
    let mut journal = Journal::parse(CONTENT);
    let added = journal
        .add_activity("Went to paris with Marie", date(2016, 2, 3))
        .unwrap();
    assert_eq!(added.value.date, date(2016, 2, 3));
    assert_eq!(
        added.value.description(),
        "Went to _Paris_ with **Marie Curie**"
    );
    assert_eq!(journal.activities()[0].date, date(2016, 2, 3));
}

#[test]
fn add_activity_rejects_blank_text() {
    let mut journal = Journal::parse(CONTENT);
    assert!(matches!(
        journal.add_activity("  ", date(2016, 2, 3)).unwrap_err(),
        JournalError::Validation(_)
    ));
}

#[test]
fn add_activity_rejects_markup_for_unknown_entities() {
    let mut journal = Journal::parse(CONTENT);
    let before = journal.clone();

    let err = journal
        .add_activity("2020-01-01: Met **Nobody Real** at _Paris_", date(2020, 1, 1))
        .unwrap_err();
    assert_eq!(
        err,
        JournalError::NotFound {
            kind: EntityKind::Friend,
            query: "Nobody Real".to_string(),
        }
    );

    let err = journal
        .add_activity("2020-01-01: Met **Grace Hopper** at _Nowhere_", date(2020, 1, 1))
        .unwrap_err();
    assert_eq!(err.to_string(), "No location found for \"Nowhere\"");
    assert_eq!(journal, before);
}

#[test]
fn add_activity_ignores_underscores_inside_words() {
    let mut journal = Journal::parse(CONTENT);
    let added = journal
        .add_activity("2020-01-01: fixed my_script with Grace in Paris", date(2020, 1, 1))
        .unwrap();
    assert_eq!(
        added.value.description(),
        "fixed my_script with **Grace Hopper** in _Paris_"
    );
    assert_eq!(added.value.location_names(), ["Paris"]);
    assert_eq!(
        added.value.display_text(),
        "2020-01-01: fixed my_script with Grace Hopper in Paris"
    );
}

#[test]
fn tag_order_survives_mutations() {
    let mut journal = Journal::parse(
        "### Friends:\n- Marie Curie [Atlantis] @science @chemistry\n\n### Locations:\n- Atlantis\n",
    );
    journal.add_tag("marie", "physics").unwrap();
    journal.remove_tag("marie", "science").unwrap();
    assert!(journal
        .serialize()
        .contains("- Marie Curie [Atlantis] @chemistry @physics\n"));
}
