// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use maizebiz::aggregate::sales_totals;
use maizebiz::models::{DeliveryMethod, Quality, SalePaymentMethod};
use maizebiz::{cli, commands::sales, error::LedgerError, store::Ledger};
use rust_decimal::Decimal;

fn run(ledger: &Ledger, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["maizebiz", "sale"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("sale", m)) = matches.subcommand() {
        sales::handle(ledger, m)
    } else {
        panic!("no sale subcommand");
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn add_derives_bags_expected_and_net() {
    let ledger = Ledger::open_in_memory("farmer").unwrap();
    run(
        &ledger,
        &[
            "add", "--customer", "Unga Mills", "--phone", "0712345678", "--date", "2025-06-02",
            "--quantity", "450", "--price", "4000", "--cheque", "20000", "--deposited", "1500",
            "--delivery", "delivery", "--quality", "good", "--payment", "cheque",
        ],
    )
    .unwrap();

    let rows = ledger.list_sales().unwrap();
    assert_eq!(rows.len(), 1);
    let s = &rows[0];
    assert_eq!(s.number_of_bags, dec("5.00"));
    assert_eq!(s.expected_amount, dec("20000.00"));
    assert_eq!(s.total_amount_received, dec("18500"));
    assert_eq!(s.payment_method_sale, Some(SalePaymentMethod::Cheque));
    assert_eq!(s.delivery_method, DeliveryMethod::Delivery);
    assert_eq!(s.comment, Quality::Good);
}

#[test]
fn amounts_default_to_zero_and_net_may_be_negative() {
    let ledger = Ledger::open_in_memory("farmer").unwrap();
    run(
        &ledger,
        &[
            "add", "--customer", "Kamau", "--phone", "0700", "--date", "2025-06-03",
            "--quantity", "100", "--price", "3333.33", "--deposited", "700", "--delivery",
            "pick-up", "--quality", "poor",
        ],
    )
    .unwrap();
    let s = &ledger.list_sales().unwrap()[0];
    assert_eq!(s.number_of_bags, dec("1.11"));
    assert_eq!(s.expected_amount, dec("3700.00"));
    assert_eq!(s.cheque_paid, Decimal::ZERO);
    assert_eq!(s.total_amount_received, dec("-700"));
    assert_eq!(s.payment_method_sale, None);
}

#[test]
fn edit_recomputes_from_stored_fields() {
    let ledger = Ledger::open_in_memory("farmer").unwrap();
    run(
        &ledger,
        &[
            "add", "--customer", "Unga Mills", "--phone", "0712", "--date", "2025-06-02",
            "--quantity", "450", "--price", "4000", "--cheque", "500", "--delivery", "delivery",
            "--quality", "good",
        ],
    )
    .unwrap();
    let id = ledger.list_sales().unwrap()[0].id.to_string();
    run(&ledger, &["edit", "--id", id.as_str(), "--quantity", "900", "--deposited", "700"]).unwrap();

    let s = &ledger.list_sales().unwrap()[0];
    assert_eq!(s.number_of_bags, dec("10"));
    assert_eq!(s.expected_amount, dec("40000"));
    assert_eq!(s.total_amount_received, dec("-200"));
    assert_eq!(s.customer_name, "Unga Mills");
}

#[test]
fn validation_reports_every_field() {
    let ledger = Ledger::open_in_memory("farmer").unwrap();
    let err = run(
        &ledger,
        &[
            "add", "--quantity", "450", "--price", "0", "--cheque=-1", "--delivery", "delivery",
            "--quality", "bad",
        ],
    )
    .unwrap_err()
    .downcast::<LedgerError>()
    .unwrap();
    assert_eq!(
        err,
        LedgerError::Invalid {
            kind: "sale",
            errors: vec![
                "Customer name is required".into(),
                "Driver phone is required".into(),
                "Selling price must be positive".into(),
                "Cheque amount cannot be negative".into(),
            ],
        }
    );
    assert!(ledger.list_sales().unwrap().is_empty());
}

#[test]
fn unknown_labels_are_rejected() {
    let ledger = Ledger::open_in_memory("farmer").unwrap();
    let res = run(
        &ledger,
        &[
            "add", "--customer", "X", "--phone", "1", "--quantity", "90", "--price", "10",
            "--delivery", "drone", "--quality", "good",
        ],
    );
    assert!(res.is_err());
}

#[test]
fn search_by_phone_and_list_totals() {
    let ledger = Ledger::open_in_memory("farmer").unwrap();
    for (customer, phone, cheque, deposited) in
        [("Unga Mills", "0712345678", "20000", "1500"), ("Kamau", "0733000111", "0", "700")]
    {
        run(
            &ledger,
            &[
                "add", "--customer", customer, "--phone", phone, "--date", "2025-06-02",
                "--quantity", "450", "--price", "4000", "--cheque", cheque, "--deposited",
                deposited, "--delivery", "delivery", "--quality", "good",
            ],
        )
        .unwrap();
    }

    let matches =
        cli::build_cli().get_matches_from(["maizebiz", "sale", "list", "--search", "0733"]);
    let (_, s) = matches.subcommand().unwrap();
    let (_, list_m) = s.subcommand().unwrap();
    let hits = sales::query_rows(&ledger, list_m).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].customer_name, "Kamau");

    let totals = sales_totals(&ledger.list_sales().unwrap());
    assert_eq!(totals.cheque_paid, dec("20000"));
    assert_eq!(totals.deposited, dec("2200"));
    assert_eq!(totals.received, dec("17800"));
}
