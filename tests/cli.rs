use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "statement";

const STATEMENT: &str = "Date,Description,Value\n\
    15 Jan 2024,\"SHOP A, Tesco\",-23.50\n\
    20 Jan 2024,\"SHOP B, Employer\",2000.00\n";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    fn statement(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write statement");
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
        cmd.env("STATEMENT_TRACKER_DATA_DIR", self.data_dir())
            .env_remove("RUST_LOG");
        cmd
    }

    fn load(&self, file: &Path) {
        self.cmd()
            .arg("load")
            .arg(file)
            .assert()
            .success()
            .stdout(contains("Loaded 2 transactions"));
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.data_dir().join(name)).unwrap_or_default()
    }
}

#[test]
fn load_then_summary_reports_monthly_totals() {
    let ws = Workspace::new();
    let file = ws.statement("jan.csv", STATEMENT);
    ws.load(&file);

    ws.cmd()
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(contains("--- 2024-01 ---"))
        .stdout(contains("Total Income: £2000.00"))
        .stdout(contains("Total Spending: £23.50"));

    // New stores are recorded as unclassified
    let categories = ws.read("categories.csv");
    assert!(categories.contains("Tesco,None"));
    assert!(categories.contains("Employer,None"));
}

#[test]
fn ignore_removes_spending_and_persists_pair() {
    let ws = Workspace::new();
    let file = ws.statement("jan.csv", STATEMENT);
    ws.load(&file);

    ws.cmd()
        .args(["txn", "ignore", "2024-01-15", "Tesco"])
        .assert()
        .success()
        .stdout(contains("Ignored 1 transaction(s)"));

    assert_eq!(ws.read("ignore.csv").trim(), "2024-01-15,Tesco");

    ws.cmd()
        .args(["report", "breakdown", "2024-01"])
        .assert()
        .success()
        .stdout(contains("Total Spending: £0.00"));

    ws.cmd()
        .args(["txn", "ignored"])
        .assert()
        .success()
        .stdout(contains("Tesco"));

    ws.cmd()
        .args(["txn", "unignore", "2024-01-15", "Tesco"])
        .assert()
        .success()
        .stdout(contains("Restored 1 transaction(s)"));
    assert_eq!(ws.read("ignore.csv").trim(), "");
}

#[test]
fn ignore_miss_is_reported_not_failed() {
    let ws = Workspace::new();
    let file = ws.statement("jan.csv", STATEMENT);
    ws.load(&file);

    ws.cmd()
        .args(["txn", "ignore", "2024-02-01", "Nowhere"])
        .assert()
        .success()
        .stdout(contains("No matching transaction"));
}

#[test]
fn assign_and_rename_category() {
    let ws = Workspace::new();
    let file = ws.statement("jan.csv", STATEMENT);
    ws.load(&file);

    ws.cmd()
        .args(["category", "assign", "Tesco", "Groceries"])
        .assert()
        .success()
        .stdout(contains("Classified 1 loaded transaction(s)"));
    assert!(ws.read("categories.csv").contains("Tesco,Groceries"));

    ws.cmd()
        .args(["category", "rename", "groceries", "Food"])
        .assert()
        .success()
        .stdout(contains("1 store(s), 1 transaction(s)"));
    assert!(ws.read("categories.csv").contains("Tesco,Food"));

    ws.cmd()
        .args(["txn", "list", "--category", "food"])
        .assert()
        .success()
        .stdout(contains("Tesco").and(contains("Employer").not()));

    ws.cmd()
        .args(["category", "unclassified"])
        .assert()
        .success()
        .stdout(contains("Employer"));
}

#[test]
fn correct_all_updates_directory() {
    let ws = Workspace::new();
    let file = ws.statement("jan.csv", STATEMENT);
    ws.load(&file);

    ws.cmd()
        .args(["txn", "correct", "1", "Salary", "--all"])
        .assert()
        .success()
        .stdout(contains("Updated 1 transaction"));
    assert!(ws.read("categories.csv").contains("Employer,Salary"));

    ws.cmd()
        .args(["txn", "correct", "9", "Salary"])
        .assert()
        .success()
        .stdout(contains("No matching transaction at position 9"));
}

#[test]
fn export_csv_to_stdout() {
    let ws = Workspace::new();
    let file = ws.statement("jan.csv", STATEMENT);
    ws.load(&file);

    ws.cmd()
        .arg("export")
        .assert()
        .success()
        .stdout(
            "Month,Type,Category,Amount\n\
             2024-01,Income,None,2000.00\n\
             2024-01,Spending,None,23.50\n",
        );
}

#[test]
fn export_json_to_file() {
    let ws = Workspace::new();
    let file = ws.statement("jan.csv", STATEMENT);
    ws.load(&file);
    let output = ws.dir.path().join("summary.json");

    ws.cmd()
        .args(["export", "--format", "json", "--output"])
        .arg(&output)
        .assert()
        .success();

    let json = fs::read_to_string(output).expect("export written");
    assert!(json.contains("\"schema_version\""));
    assert!(json.contains("\"net\": \"1976.50\""));
}

#[test]
fn merge_appends_and_bad_files_are_reported() {
    let ws = Workspace::new();
    let file = ws.statement("jan.csv", STATEMENT);
    ws.load(&file);

    ws.cmd()
        .args(["load", "--merge"])
        .arg(&file)
        .arg(ws.dir.path().join("missing.csv"))
        .assert()
        .success()
        .stderr(contains("Could not read"));

    ws.cmd()
        .args(["report", "periods"])
        .assert()
        .success()
        .stdout("Total\n2024\n2024-01\n");

    ws.cmd()
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(contains("Total Spending: £47.00"));
}

#[test]
fn bad_dates_are_reported_per_row() {
    let ws = Workspace::new();
    let file = ws.statement(
        "bad.csv",
        "Date,Description,Value\n2024-01-15,Tesco,-1.00\n16 Jan 2024,Aldi,-2.00\n",
    );

    ws.cmd()
        .arg("load")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("Loaded 1 transactions"))
        .stderr(contains("invalid date '2024-01-15'"));
}

#[test]
fn invalid_period_is_rejected() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["report", "breakdown", "2024-13"])
        .assert()
        .failure();
}

#[test]
fn settings_show_and_set() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["settings", "set", "Theme", "Dark"])
        .assert()
        .success();
    assert!(ws.read("settings.csv").contains("Theme,Dark"));

    ws.cmd()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(contains("Dark").and(contains("Arial")));

    ws.cmd()
        .args(["settings", "set", "FontSize", "huge"])
        .assert()
        .failure();
}

#[test]
fn history_lists_mutations() {
    let ws = Workspace::new();
    let file = ws.statement("jan.csv", STATEMENT);
    ws.load(&file);
    ws.cmd()
        .args(["category", "assign", "Tesco", "Groceries"])
        .assert()
        .success();

    ws.cmd()
        .arg("history")
        .assert()
        .success()
        .stdout(contains("IMPORT").and(contains("ASSIGN Tesco")));
}

#[test]
fn reset_forgets_loaded_transactions() {
    let ws = Workspace::new();
    let file = ws.statement("jan.csv", STATEMENT);
    ws.load(&file);

    ws.cmd().arg("reset").assert().success();
    ws.cmd()
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(contains("No transactions found."));
}
