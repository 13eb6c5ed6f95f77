// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use maizebiz::aggregate::labor_totals;
use maizebiz::{cli, commands::laborers, store::Ledger};
use rust_decimal::Decimal;

fn run(ledger: &Ledger, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["maizebiz", "laborer"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("laborer", m)) = matches.subcommand() {
        laborers::handle(ledger, m)
    } else {
        panic!("no laborer subcommand");
    }
}

#[test]
fn price_per_laborer_is_derived() {
    let ledger = Ledger::open_in_memory("farmer").unwrap();
    run(&ledger, &["add", "--date", "2025-06-01", "--count", "9", "--total", "4500"]).unwrap();
    run(&ledger, &["add", "--date", "2025-06-02", "--count", "3", "--total", "100"]).unwrap();

    let rows = ledger.list_laborers().unwrap();
    assert_eq!(rows[0].price_per_laborer, Decimal::new(3333, 2));
    assert_eq!(rows[1].price_per_laborer, Decimal::new(500, 0));

    let totals = labor_totals(&rows);
    assert_eq!(totals.payments, 2);
    assert_eq!(totals.laborers, 12);
    assert_eq!(totals.total_paid, Decimal::new(4600, 0));
    assert_eq!(totals.average_per_laborer, Decimal::new(38333, 2));
}

#[test]
fn zero_laborers_fail_validation() {
    let ledger = Ledger::open_in_memory("farmer").unwrap();
    assert!(run(&ledger, &["add", "--count", "0", "--total", "100"]).is_err());
    assert!(ledger.list_laborers().unwrap().is_empty());
}

#[test]
fn edit_changes_count_and_rederives() {
    let ledger = Ledger::open_in_memory("farmer").unwrap();
    run(&ledger, &["add", "--date", "2025-06-01", "--count", "4", "--total", "1000"]).unwrap();
    let id = ledger.list_laborers().unwrap()[0].id.to_string();
    run(&ledger, &["edit", "--id", id.as_str(), "--count", "8"]).unwrap();
    let rec = &ledger.list_laborers().unwrap()[0];
    assert_eq!(rec.number_of_laborers, 8);
    assert_eq!(rec.price_per_laborer, Decimal::new(125, 0));
}

#[test]
fn search_matches_numbers_as_text() {
    let ledger = Ledger::open_in_memory("farmer").unwrap();
    run(&ledger, &["add", "--date", "2025-06-01", "--count", "9", "--total", "4500"]).unwrap();
    run(&ledger, &["add", "--date", "2025-07-01", "--count", "2", "--total", "800"]).unwrap();

    let matches = cli::build_cli().get_matches_from(["maizebiz", "laborer", "list", "--search", "2025-07"]);
    let (_, l) = matches.subcommand().unwrap();
    let (_, list_m) = l.subcommand().unwrap();
    let rows = laborers::query_rows(&ledger, list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_labour, Decimal::new(800, 0));
}
