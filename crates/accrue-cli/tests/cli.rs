//! End-to-end tests of the `accrue` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BOOK: &str = r#"{
  "deposits": [
    {
      "id": "flat",
      "name": "Flat cushion",
      "bank": "Alfa",
      "type": "savings",
      "amount": 100000,
      "initial_amount": 100000,
      "interest_rate": 12.0,
      "capitalization": "end"
    },
    {
      "id": "yandex",
      "name": "Yandex savings",
      "bank": "Yandex",
      "type": "savings",
      "amount": 3600000,
      "initial_amount": 3600000,
      "interest_rate": 10.0,
      "promo_rate": 17.0,
      "promo_end_date": "2025-02-28",
      "capitalization": "monthly"
    },
    {
      "id": "term",
      "name": "Alfa six months",
      "bank": "Alfa",
      "type": "term",
      "amount": 5000000,
      "initial_amount": 5000000,
      "interest_rate": 18.0,
      "promo_rate": 20.0,
      "promo_end_date": "2024-10-01",
      "start_date": "2024-09-01",
      "end_date": "2025-03-01",
      "term_months": 6,
      "capitalization": "monthly"
    }
  ]
}"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("deposits.json"), BOOK).unwrap();
        fs::write(
            dir.path().join("config.toml"),
            format!(
                "deposits_path = {:?}\nledger_path = {:?}\n",
                dir.path().join("deposits.json"),
                dir.path().join("transactions.ledger"),
            ),
        )
        .unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cmd(&self) -> Command {
        self.cmd_on("2025-03-01")
    }

    fn cmd_on(&self, as_of: &str) -> Command {
        let mut cmd = Command::cargo_bin("accrue").unwrap();
        cmd.env("NO_COLOR", "1")
            .env("RUST_LOG", "off")
            .env_remove("ACCRUE_CONFIG")
            .arg("--config")
            .arg(self.path("config.toml"))
            .args(["--as-of", as_of]);
        cmd
    }

    fn book(&self) -> serde_json::Value {
        read_json(&self.path("deposits.json"))
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_help() {
    Command::cargo_bin("accrue")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("income"))
        .stdout(predicate::str::contains("accrue"));
}

#[test]
fn test_list_minimal() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["list", "-f", "minimal"])
        .assert()
        .success()
        .stdout("flat\nyandex\nterm\n");
}

#[test]
fn test_list_table() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Flat cushion"))
        .stdout(predicate::str::contains("3 deposits, total ₽87000.00"));
}

#[test]
fn test_income_flat_year() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["income", "flat", "--days", "365", "-f", "minimal"])
        .assert()
        .success()
        .stdout("120.00\n");
}

#[test]
fn test_income_json() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["income", "flat", "--days", "10", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["deposit_id"], "flat");
    assert_eq!(json["days"], 10);
    assert_eq!(json["breakdown"]["base_days"], 10);
    assert_eq!(json["breakdown"]["promo_days"], 0);
}

#[test]
fn test_income_rejects_empty_period() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["income", "flat", "--days", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid period: 0 days"));
}

#[test]
fn test_unknown_deposit() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["show", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("deposit with ID ghost not found"));
}

#[test]
fn test_promo_ended_yesterday() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["promo", "yandex", "-f", "minimal"])
        .assert()
        .success()
        .stdout("false 0\n");
}

#[test]
fn test_promo_still_active() {
    let ws = Workspace::new();
    ws.cmd_on("2025-02-27")
        .args(["promo", "yandex", "-f", "minimal"])
        .assert()
        .success()
        .stdout("true 2\n");
}

#[test]
fn test_maturity() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["maturity", "--start", "2025-08-31", "--months", "6", "-f", "minimal"])
        .assert()
        .success()
        .stdout("2026-02-28\n");

    ws.cmd()
        .args(["maturity", "--start", "31/08/2025", "--months", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_term_income_requires_term_deposit() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["term-income", "flat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a term deposit"));

    ws.cmd()
        .args(["term-income", "term", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d+\.\d{2}\n$").unwrap());
}

#[test]
fn test_accrue_dry_run_changes_nothing() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["accrue", "--dry-run", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("yandex ₽10.00"));

    assert!(!ws.path("transactions.ledger").exists());
    assert_eq!(ws.book()["deposits"][1]["amount"], 3_600_000);
}

#[test]
fn test_accrue_books_interest() {
    let ws = Workspace::new();
    ws.cmd().arg("accrue").assert().success();

    let ledger = fs::read_to_string(ws.path("transactions.ledger")).unwrap();
    // 36000.00 at 10% on ACT/360 for one day is 10.00; 1000.00 at 12% flat is 0.33
    assert!(ledger.contains("2025/03/01 Daily interest payout\n  b:Yandex:Savings ₽10.00\n  i:Interest:Bank\n\n"));
    assert!(ledger.contains("  b:AlfaBank:Savings ₽0.33\n"));
    assert!(!ledger.contains("Alfa six months"));

    let book = ws.book();
    assert_eq!(book["deposits"][0]["amount"], 100_033);
    assert_eq!(book["deposits"][1]["amount"], 3_601_000);
    assert_eq!(book["deposits"][2]["amount"], 5_000_000);
}

#[test]
fn test_top_up() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["top-up", "flat", "500,50", "-f", "minimal"])
        .assert()
        .success()
        .stdout("1500.50\n");

    let ledger = fs::read_to_string(ws.path("transactions.ledger")).unwrap();
    assert_eq!(
        ledger,
        "2025/03/01 Top up deposit Flat cushion\n  b:AlfaBank:Savings ₽500.50\n  b:AlfaBank\n\n"
    );

    ws.cmd()
        .args(["top-up", "flat", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid top-up amount"));
}

#[test]
fn test_add_term_deposit() {
    let ws = Workspace::new();
    ws.cmd()
        .args([
            "add", "--name", "VTB year", "--bank", "VTB", "--kind", "term", "--amount", "20000",
            "--rate", "16.5", "--term-months", "12", "--capitalization", "monthly", "--id", "vtb",
            "-f", "minimal",
        ])
        .assert()
        .success()
        .stdout("vtb\n");

    let book = ws.book();
    let added = &book["deposits"][3];
    assert_eq!(added["type"], "term");
    assert_eq!(added["start_date"], "2025-03-01");
    assert_eq!(added["end_date"], "2026-03-01");
    assert_eq!(added["top_up_end_date"], "2025-03-08");
    assert_eq!(added["initial_amount"], 2_000_000);

    let ledger = fs::read_to_string(ws.path("transactions.ledger")).unwrap();
    assert!(ledger.starts_with("2025/03/01 Open deposit VTB year\n  b:VTB:Savings ₽20000.00\n  b:VTB\n"));
}

#[test]
fn test_add_rejects_invalid_deposit() {
    let ws = Workspace::new();
    ws.cmd()
        .args([
            "add", "--name", "Tiny", "--bank", "Mystery Bank", "--amount", "5", "--rate", "10",
            "--promo-rate", "8", "--promo-end", "2025-04-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Deposit validation failed"))
        .stderr(predicate::str::contains("invalid bank: Mystery Bank"))
        .stderr(predicate::str::contains("promo rate must be higher than base rate"));

    assert_eq!(ws.book()["deposits"].as_array().unwrap().len(), 3);
}

#[test]
fn test_prolong() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["prolong", "flat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a term deposit"));

    ws.cmd_on("2025-02-01")
        .args(["prolong", "term"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be prolonged yet"));

    ws.cmd()
        .args(["prolong", "term", "-f", "minimal"])
        .assert()
        .success()
        .stdout("2025-09-01\n");

    let book = ws.book();
    assert_eq!(book["deposits"][2]["start_date"], "2025-03-01");
    assert_eq!(book["deposits"][2]["end_date"], "2025-09-01");
    // the promo ended in the previous term and is not carried over
    assert!(book["deposits"][2].get("promo_rate").is_none());
    assert!(book["deposits"][2].get("promo_end_date").is_none());
}

#[test]
fn test_accrue_pays_matured_term_once() {
    let ws = Workspace::new();
    ws.cmd_on("2025-03-02")
        .args(["accrue", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("term ₽"));

    let ledger = fs::read_to_string(ws.path("transactions.ledger")).unwrap();
    assert_eq!(ledger.matches("Interest payout at end of term").count(), 1);
    assert!(ledger.contains("2025/03/02 Interest payout at end of term\n  b:AlfaBank:Savings ₽"));

    let book = ws.book();
    assert_eq!(book["deposits"][2]["maturity_paid_on"], "2025-03-02");
    assert!(book["deposits"][2]["amount"].as_i64().unwrap() > 5_000_000);

    ws.cmd_on("2025-03-03").arg("accrue").assert().success();
    let ledger = fs::read_to_string(ws.path("transactions.ledger")).unwrap();
    assert_eq!(ledger.matches("Interest payout at end of term").count(), 1);
    assert_eq!(ledger.matches("Daily interest payout").count(), 4);
}

#[test]
fn test_find_by_name_and_bank() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["find", "--name", "Yandex savings", "--bank", "Yandex", "-f", "minimal"])
        .assert()
        .success()
        .stdout("36000.00\n");

    ws.cmd()
        .args(["find", "--name", "Yandex savings", "--bank", "Alfa", "-f", "json"])
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn test_show_json() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["show", "term", "-f", "json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["deposit"]["id"], "term");
    assert_eq!(json["days_until_end"], 0);
    assert_eq!(json["can_be_prolonged"], true);
    assert_eq!(json["expired"], false);
    assert_eq!(json["convention"], "monthly compounding, ACT/365F");
}
