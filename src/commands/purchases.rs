// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::sum_field;
use crate::models::{PaymentMethod, Purchase, PurchaseInput, Record};
use crate::store::Ledger;
use crate::utils::{
    fmt2, fmt_money, fmt_opt, maybe_print_json, opt_decimal, opt_text, parse_date, pretty_table, today,
};
use crate::validate;
use anyhow::{Context, Result};

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => remove(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

/// Overlays whichever fields were given on the command line.
fn apply_flags(input: &mut PurchaseInput, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(s) = sub.get_one::<String>("supplier") {
        input.supplier_name = s.trim().to_string();
    }
    if let Some(s) = sub.get_one::<String>("location") {
        input.location_of_origin = Some(s.trim().to_string()).filter(|s| !s.is_empty());
    }
    if let Some(s) = sub.get_one::<String>("date") {
        input.date_of_purchase = parse_date(s)?;
    }
    if let Some(q) = opt_decimal(sub, "quantity")? {
        input.quantity_bought = Some(q);
    }
    if let Some(p) = opt_decimal(sub, "price")? {
        input.price_per_unit = Some(p);
    }
    if let Some(s) = sub.get_one::<String>("payment") {
        input.payment_method = s.parse::<PaymentMethod>()?;
    }
    if let Some(s) = sub.get_one::<String>("truck") {
        input.truck_number_plate = Some(s.trim().to_string()).filter(|s| !s.is_empty());
    }
    if let Some(w) = opt_decimal(sub, "origin_weight")? {
        input.origin_weight = Some(w);
    }
    if let Some(w) = opt_decimal(sub, "destination_weight")? {
        input.destination_weight = Some(w);
    }
    Ok(())
}

fn add(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let payment = sub
        .get_one::<String>("payment")
        .context("--payment is required")?
        .parse::<PaymentMethod>()?;
    let mut input = PurchaseInput {
        supplier_name: opt_text(sub, "supplier").unwrap_or_default(),
        location_of_origin: None,
        date_of_purchase: today(),
        quantity_bought: None,
        price_per_unit: None,
        payment_method: payment,
        truck_number_plate: None,
        origin_weight: None,
        destination_weight: None,
    };
    apply_flags(&mut input, sub)?;
    validate::purchase(&input)?;

    let rec = ledger.add_purchase(&input.derive())?;
    let ccy = ledger.currency()?;
    println!(
        "Recorded purchase #{} from '{}': {} kg x {} = {}",
        rec.id,
        rec.supplier_name,
        rec.quantity_bought,
        rec.price_per_unit,
        fmt_money(&rec.total_amount_paid, &ccy)
    );
    Ok(())
}

fn edit(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let current = ledger.get_purchase(id)?;
    let mut input = PurchaseInput::from(&current.body);
    apply_flags(&mut input, sub)?;
    validate::purchase(&input)?;

    let rec = ledger.update_purchase(id, &input.derive())?;
    println!(
        "Updated purchase #{}: total {}",
        rec.id,
        fmt_money(&rec.total_amount_paid, &ledger.currency()?)
    );
    Ok(())
}

fn remove(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    ledger.delete_purchase(id)?;
    println!("Removed purchase #{}", id);
    Ok(())
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<Record<Purchase>>> {
    let rows = ledger.list_purchases()?;
    super::narrow(rows, sub, |p| p.date_of_purchase)
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(ledger, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = ledger.currency()?;
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date_of_purchase.to_string(),
                r.supplier_name.clone(),
                r.location_of_origin.clone().unwrap_or_default(),
                r.quantity_bought.normalize().to_string(),
                r.price_per_unit.normalize().to_string(),
                fmt2(r.total_amount_paid),
                r.payment_method.to_string(),
                r.truck_number_plate.clone().unwrap_or_default(),
                fmt_opt(r.origin_weight),
                fmt_opt(r.destination_weight),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "ID", "Date", "Supplier", "Origin", "Kg", "Price/kg", "Total", "Payment",
                "Truck", "Origin Wt", "Dest Wt",
            ],
            rows,
        )
    );
    println!(
        "{} purchase(s), {} kg, {}",
        data.len(),
        sum_field(&data, |r| r.quantity_bought).normalize(),
        fmt_money(&sum_field(&data, |r| r.total_amount_paid), &ccy)
    );
    Ok(())
}
