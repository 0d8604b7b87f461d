//! Corruption recovery tests for dietlog.
//!
//! These tests verify the system can handle:
//! - Missing or malformed food datasets (fatal at startup)
//! - Corrupted history files (bad rows skipped)
//! - Partial history writes

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write as IoWrite;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "Date,Name,Calories,Protein,Carbs,Fats,Status";

fn cli(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dietlog"));
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("HOME", home)
        .env_remove("RUST_LOG");
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn session(home: &Path, dataset: &Path) -> Command {
    let mut cmd = cli(home);
    cmd.args([
        "session", "--age", "30", "--gender", "male", "--weight", "80", "--height", "180",
        "--activity", "moderate", "--name", "Ravi",
    ])
    .arg("--dataset")
    .arg(dataset)
    .arg("--data-dir")
    .arg(home);
    cmd
}

#[test]
fn test_missing_dataset_is_fatal() {
    let temp_dir = setup_test_dir();
    let dataset = temp_dir.path().join("absent.csv");

    session(temp_dir.path(), &dataset)
        .write_stdin("totals\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("food dataset not found"));
}

#[test]
fn test_dataset_without_dish_column_is_fatal() {
    let temp_dir = setup_test_dir();
    let dataset = temp_dir.path().join("food.csv");
    fs::write(
        &dataset,
        "Food,Calories (kcal),Protein (g),Carbohydrates (g),Fats (g)\nIdli,39,2,8,0.2\n",
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("dishes")
        .arg("--dataset")
        .arg(&dataset)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dish Name"));
}

#[test]
fn test_empty_dataset_is_fatal() {
    let temp_dir = setup_test_dir();
    let dataset = temp_dir.path().join("food.csv");
    fs::write(&dataset, "").unwrap();

    session(temp_dir.path(), &dataset)
        .write_stdin("totals\n")
        .assert()
        .failure();
}

#[test]
fn test_dataset_bad_rows_skipped() {
    let temp_dir = setup_test_dir();
    let dataset = temp_dir.path().join("food.csv");
    fs::write(
        &dataset,
        "Dish Name,Calories (kcal),Protein (g),Carbohydrates (g),Fats (g)\n\
         Idli,39,2,8,0.2\n\
         Vada,n/a,1,1,1\n",
    )
    .unwrap();

    session(temp_dir.path(), &dataset)
        .write_stdin("add 2 idli\nadd 1 Vada\ntotals\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 2 x idli"))
        .stdout(predicate::str::contains("Food not found: Vada"))
        .stdout(predicate::str::contains("Calories Consumed: 78 kcal"));
}

#[test]
fn test_corrupted_history_rows_ignored_during_read() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("history.csv"),
        format!(
            "{}\n\
             2024-01-01,Asha,1800,70,220,60,Within Calories\n\
             garbage line without enough fields\n\
             2024-13-45,Asha,1800,70,220,60,Within Calories\n\
             2024-01-03,Asha,2100,80,260,70,Exceeded Calories\n",
            HEADER
        ),
    )
    .unwrap();

    let output = cli(temp_dir.path())
        .args(["history", "--json"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let dates: Vec<_> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["date"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-03"]);
}

#[test]
fn test_partial_history_line() {
    let temp_dir = setup_test_dir();
    let history_path = temp_dir.path().join("history.csv");

    // A partial last row (simulating a crash during write)
    let mut file = fs::File::create(&history_path).unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    writeln!(file, "2024-01-01,Asha,1800,70,220,60,Within Calories").unwrap();
    write!(file, "2024-01-02,Asha,19").unwrap();
    drop(file);

    cli(temp_dir.path())
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-01"))
        .stdout(predicate::str::contains("2024-01-02").not());
}

#[test]
fn test_save_appends_after_corrupted_rows() {
    let temp_dir = setup_test_dir();
    let dataset = temp_dir.path().join("food.csv");
    fs::write(
        &dataset,
        "Dish Name,Calories (kcal),Protein (g),Carbohydrates (g),Fats (g)\nIdli,39,2,8,0.2\n",
    )
    .unwrap();
    let history_path = temp_dir.path().join("history.csv");
    fs::write(&history_path, format!("{}\nnot,a,valid,row\n", HEADER)).unwrap();

    session(temp_dir.path(), &dataset)
        .write_stdin("add 1 Idli\nsave\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Within Calories"));

    let contents = fs::read_to_string(&history_path).unwrap();
    assert_eq!(contents.matches("Date,Name").count(), 1);
    assert!(contents.contains("Ravi,39.0,2.0,8.0,0.2,Within Calories"));
}

#[test]
fn test_save_after_partial_history_line() {
    let temp_dir = setup_test_dir();
    let dataset = temp_dir.path().join("food.csv");
    fs::write(
        &dataset,
        "Dish Name,Calories (kcal),Protein (g),Carbohydrates (g),Fats (g)\nIdli,39,2,8,0.2\n",
    )
    .unwrap();
    let history_path = temp_dir.path().join("history.csv");
    let mut file = fs::File::create(&history_path).unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    writeln!(file, "2024-01-01,Asha,1800,70,220,60,Within Calories").unwrap();
    write!(file, "2024-01-02,Asha,19").unwrap();
    drop(file);

    session(temp_dir.path(), &dataset)
        .write_stdin("add 1 Idli\nsave\n")
        .assert()
        .success();

    let output = cli(temp_dir.path())
        .args(["history", "--json"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let names: Vec<_> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Asha", "Ravi"]);
}
