use std::path::Path;
use std::process::{Command, Output};

const CONTENT: &str = "### Activities:
- 2015-11-01: **Grace Hopper** and I went to _Marie's Diner_. George had to cancel at the last minute. @food
- 2015-01-04: Got lunch with **Grace Hopper** and **George Washington Carver**. @food
- 2014-12-31: Celebrated the new year in _Paris_ with **Marie Curie**. @partying
- 2014-11-15: Talked to **George Washington Carver** on the phone for an hour.

### Friends:
- George Washington Carver
- Grace Hopper (a.k.a. The Admiral a.k.a. Amazing Grace) [Paris] @navy @science
- Marie Curie [Atlantis] @science

### Locations:
- Atlantis
- Marie's Diner
- Paris
";

fn run_cmd(filename: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_friends"))
        .arg("--filename")
        .arg(filename)
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("FRIENDS_LOG_DIR")
        .output()
        .expect("binary should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

fn journal_file(content: Option<&str>) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("friends.md");
    if let Some(content) = content {
        std::fs::write(&path, content).unwrap();
    }
    (dir, path)
}

#[test]
fn missing_file_lists_nothing_and_is_not_created() {
    let (_dir, path) = journal_file(None);
    let output = run_cmd(&path, &["list", "activities"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
    assert!(!path.exists());
}

#[test]
fn favorite_friends_table() {
    let (_dir, path) = journal_file(Some(CONTENT));
    let output = run_cmd(&path, &["list", "favorite", "friends"]);
    assert_eq!(
        stdout(&output),
        "Your favorite friends:\n\
         1. George Washington Carver (2 activities)\n\
         2. Grace Hopper             (2)\n\
         3. Marie Curie              (1)\n"
    );
}

#[test]
fn zero_limit_is_an_error() {
    let (_dir, path) = journal_file(Some(CONTENT));
    let output = run_cmd(&path, &["list", "activities", "--limit", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: Limit must be positive\n");
}

#[test]
fn limit_two_lists_most_recent() {
    let (_dir, path) = journal_file(Some(CONTENT));
    let output = run_cmd(&path, &["list", "activities", "--limit", "2"]);
    assert_eq!(
        stdout(&output),
        "2015-11-01: Grace Hopper and I went to Marie's Diner. George had to cancel at the last minute. @food\n\
         2015-01-04: Got lunch with Grace Hopper and George Washington Carver. @food\n"
    );
}

#[test]
fn rename_friend_rewrites_document() {
    let (_dir, path) = journal_file(Some(CONTENT));
    let output = run_cmd(&path, &["rename", "friend", "George", "George Washington"]);
    assert_eq!(stdout(&output), "Name changed: \"George Washington\"\n");

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("\n- George Washington\n"));
    assert!(!written.contains("Carver"));
}

#[test]
fn ambiguous_rename_leaves_document_untouched() {
    let (_dir, path) = journal_file(Some(CONTENT));
    run_cmd(&path, &["add", "friend", "George", "Harrison"]);
    let before = std::fs::read_to_string(&path).unwrap();

    let output = run_cmd(&path, &["rename", "friend", "George", "George Washington"]);
    assert_eq!(
        stderr(&output),
        "Error: More than one friend found for \"George\": George Harrison, George Washington Carver\n"
    );
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn graph_draws_bars() {
    let (_dir, path) = journal_file(Some(CONTENT));
    let output = run_cmd(&path, &["graph", "--in", "paris"]);
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], "Nov 2014 |");
    assert_eq!(lines[1], "Dec 2014 |█");
    assert_eq!(lines[12], "Nov 2015 |");
}

#[test]
fn suggest_on_empty_file() {
    let (_dir, path) = journal_file(Some(""));
    let output = run_cmd(&path, &["suggest"]);
    assert_eq!(
        stdout(&output),
        "Distant friend: None found\nModerate friend: None found\nClose friend: None found\n"
    );
}

#[test]
fn redirected_errors_carry_no_color_codes() {
    let (_dir, path) = journal_file(Some(CONTENT));
    let output = Command::new(env!("CARGO_BIN_EXE_friends"))
        .arg("--filename")
        .arg(&path)
        .args(["list", "activities", "--limit", "0"])
        .env_remove("NO_COLOR")
        .env("CLICOLOR_FORCE", "1")
        .env_remove("FRIENDS_LOG_DIR")
        .output()
        .expect("binary should run");
    assert_eq!(stderr(&output), "Error: Limit must be positive\n");
}

#[test]
fn add_activity_keeps_identifier_underscores_plain() {
    let (_dir, path) = journal_file(Some(CONTENT));
    run_cmd(&path, &["add", "activity", "2020-01-01: fixed my_script with Grace in Paris"]);
    let output = run_cmd(&path, &["list", "activities", "--in", "paris"]);
    assert_eq!(
        stdout(&output),
        "2020-01-01: fixed my_script with Grace Hopper in Paris\n\
         2014-12-31: Celebrated the new year in Paris with Marie Curie. @partying\n"
    );
}
