//! Integration tests for the `tally` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

fn character(name: &str, class: &str, items: &[(&str, bool)], gp: i64) -> Value {
    let inventory: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(i, (item, equipped))| {
            json!({ "id": 1000 + i, "equipped": equipped, "definition": { "name": item } })
        })
        .collect();
    json!({
        "name": name,
        "inventory": inventory,
        "characterValues": [
            { "typeId": 20, "valueId": "1000", "value": true }
        ],
        "classes": [{ "level": 4, "definition": { "name": class } }],
        "stats": [{ "id": 1, "value": 12 }, { "id": 2, "value": 14 }],
        "actions": { "class": [{ "name": "Second Wind" }] },
        "modifiers": {
            "race": [
                { "type": "language", "friendlyTypeName": "Language", "friendlySubtypeName": "Common" }
            ]
        },
        "spells": { "class": [{ "definition": { "name": "Mage Hand" } }] },
        "classSpells": [],
        "currencies": { "cp": 0, "sp": 0, "gp": gp, "ep": 0, "pp": 0 },
        "notes": {},
        "traits": {},
        "background": { "definition": { "name": "Soldier" } },
        "feats": [],
        "baseHitPoints": 30,
        "removedHitPoints": 0,
        "temporaryHitPoints": 0
    })
}

/// A data directory with a roster and cached documents for three players.
fn test_party() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("roster.json"),
        r#"{ "todd": 71559602, "corey": 71560080, "jen": 71942288 }"#,
    )
    .unwrap();

    let docs = [
        (
            "todd",
            character(
                "Brom",
                "Fighter",
                &[("Dagger", true), ("Rope (50 feet)", false), ("Backpack", false)],
                10,
            ),
        ),
        (
            "corey",
            character(
                "Wren",
                "Rogue",
                &[("Shortsword", true), ("Rope (50 feet)", false), ("Stress II", true)],
                7,
            ),
        ),
        (
            "jen",
            character("Isolde", "Wizard", &[("Staff", true), ("Rope (50 feet)", false)], 3),
        ),
    ];

    fs::create_dir_all(dir.path().join("json")).unwrap();
    for (player, doc) in docs {
        fs::write(
            dir.path().join(format!("json/{player}.json")),
            serde_json::to_string_pretty(&doc).unwrap(),
        )
        .unwrap();
    }
    dir
}

fn tally(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.args(["-d", dir.to_str().unwrap()]);
    cmd
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// summarize
// ---------------------------------------------------------------------------

#[test]
fn summarize_offline_writes_every_summary() {
    let dir = test_party();
    tally(dir.path())
        .args(["summarize", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Brom").and(predicate::str::contains("Isolde")));

    let todd = read_json(&dir.path().join("summary/todd.json"));
    assert_eq!(todd["equipment"], json!(["Silvered Dagger"]));
    assert_eq!(todd["inventory"], json!(["Backpack", "Rope (50 feet)"]));
    assert_eq!(todd["stats"], json!({ "strength": 12, "dexterity": 14 }));
    assert_eq!(todd["languages"], json!(["Common"]));

    let corey = read_json(&dir.path().join("summary/corey.json"));
    assert_eq!(corey["stress"], "Stress II");
    assert_eq!(corey["equipment"], json!(["Silvered Shortsword"]));
}

#[test]
fn summarize_selected_player_only() {
    let dir = test_party();
    tally(dir.path())
        .args(["summarize", "--offline", "jen"])
        .assert()
        .success();

    assert!(dir.path().join("summary/jen.json").exists());
    assert!(!dir.path().join("summary/todd.json").exists());
}

#[test]
fn summarize_unknown_player_fails() {
    let dir = test_party();
    tally(dir.path())
        .args(["summarize", "--offline", "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not on the roster"));
}

#[test]
fn summarize_reports_malformed_document() {
    let dir = test_party();
    fs::write(dir.path().join("json/jen.json"), r#"{ "name": "Isolde" }"#).unwrap();
    tally(dir.path())
        .args(["summarize", "--offline"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("malformed character document for \"jen\""))
        .stderr(predicate::str::contains("1 of 3 players failed"));

    assert!(dir.path().join("summary/todd.json").exists());
}

#[test]
fn ignore_flag_drops_items() {
    let dir = test_party();
    tally(dir.path())
        .args(["summarize", "--offline", "--ignore", "Backpack", "todd"])
        .assert()
        .success();

    let todd = read_json(&dir.path().join("summary/todd.json"));
    assert_eq!(todd["inventory"], json!(["Rope (50 feet)"]));
}

#[test]
fn missing_roster_fails() {
    let dir = TempDir::new().unwrap();
    tally(dir.path())
        .args(["summarize", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("roster.json"));
}

// ---------------------------------------------------------------------------
// party
// ---------------------------------------------------------------------------

#[test]
fn party_without_summaries_names_missing_player() {
    let dir = test_party();
    tally(dir.path())
        .args(["summarize", "--offline", "todd", "corey"])
        .assert()
        .success();

    tally(dir.path())
        .arg("party")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing summary for \"jen\""));
    assert!(!dir.path().join("summary/party.json").exists());
}

fn write_money_summaries(dir: &Path) {
    fs::write(dir.join("roster.json"), r#"{ "a": 1, "b": 2 }"#).unwrap();
    fs::create_dir_all(dir.join("summary")).unwrap();
    for (player, money) in [("a", 1.2345), ("b", 2.6789)] {
        let summary = json!({
            "name": player,
            "classes": [],
            "stats": {},
            "hitPoints": { "base": 1, "current": 1, "temp": 0 },
            "spells": [],
            "equipment": [],
            "inventory": [],
            "currencies": { "cp": 0, "sp": 0, "gp": 0, "ep": 0, "pp": 0 },
            "money": money
        });
        fs::write(
            dir.join(format!("summary/{player}.json")),
            summary.to_string(),
        )
        .unwrap();
    }
}

#[test]
fn party_money_truncates_running_total() {
    let dir = TempDir::new().unwrap();
    write_money_summaries(dir.path());
    tally(dir.path()).arg("party").assert().success();

    let money = read_json(&dir.path().join("summary/party.json"))["money"]
        .as_f64()
        .unwrap();
    assert!((money - 3.9129).abs() < 1e-9);
}

#[test]
fn party_plain_money_sums_normally() {
    let dir = TempDir::new().unwrap();
    write_money_summaries(dir.path());
    tally(dir.path())
        .args(["party", "--plain-money"])
        .assert()
        .success();

    let money = read_json(&dir.path().join("summary/party.json"))["money"]
        .as_f64()
        .unwrap();
    assert!((money - 3.9134).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_offline_aggregates_party() {
    let dir = test_party();
    tally(dir.path())
        .args(["run", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summarized 3 players"));

    let party = read_json(&dir.path().join("summary/party.json"));
    assert_eq!(
        party["inventory"],
        json!(["Backpack", "Rope (50 feet) x3"])
    );
    assert_eq!(
        party["equipment"],
        json!(["Silvered Dagger", "Silvered Shortsword", "Silvered Staff"])
    );
    assert_eq!(party["spells"], json!(["Mage Hand"]));
    assert_eq!(party["languages"], json!(["Common"]));
    assert_eq!(
        party["classes"],
        json!([["Level 4 Fighter"], ["Level 4 Rogue"], ["Level 4 Wizard"]])
    );
    assert!((party["money"].as_f64().unwrap() - 20.0).abs() < 1e-9);
}

#[test]
fn run_twice_is_byte_identical() {
    let dir = test_party();
    tally(dir.path()).args(["run", "--offline"]).assert().success();
    let first = fs::read(dir.path().join("summary/party.json")).unwrap();

    tally(dir.path()).args(["run", "--offline"]).assert().success();
    let second = fs::read(dir.path().join("summary/party.json")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn run_with_failed_player_skips_aggregation() {
    let dir = test_party();
    fs::remove_file(dir.path().join("json/corey.json")).unwrap();
    tally(dir.path())
        .args(["run", "--offline"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("corey")
                .and(predicate::str::contains("party not aggregated")),
        );
    assert!(!dir.path().join("summary/party.json").exists());
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_party_renders_table() {
    let dir = test_party();
    tally(dir.path()).args(["run", "--offline"]).assert().success();
    tally(dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Equipment")
                .and(predicate::str::contains("Rope (50 feet) x3")),
        );
}

#[test]
fn show_player_renders_summary() {
    let dir = test_party();
    tally(dir.path())
        .args(["summarize", "--offline", "jen"])
        .assert()
        .success();
    tally(dir.path())
        .args(["show", "jen"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Isolde")
                .and(predicate::str::contains("Soldier"))
                .and(predicate::str::contains("Mage Hand")),
        );
}

#[test]
fn show_rejects_names_off_the_roster() {
    let dir = test_party();
    tally(dir.path())
        .args(["run", "--offline"])
        .assert()
        .success();
    fs::copy(dir.path().join("summary/jen.json"), dir.path().join("stray.json")).unwrap();

    for name in ["party", "../stray", "nobody"] {
        tally(dir.path())
            .args(["show", name])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not on the roster"));
    }
}
