// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::sales_totals;
use crate::models::{DeliveryMethod, Quality, Record, Sale, SaleInput, SalePaymentMethod};
use crate::store::Ledger;
use crate::utils::{
    fmt2, fmt_money, maybe_print_json, opt_decimal, opt_text, parse_date, pretty_table, today,
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

fn apply_flags(input: &mut SaleInput, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(s) = sub.get_one::<String>("customer") {
        input.customer_name = s.trim().to_string();
    }
    if let Some(s) = sub.get_one::<String>("phone") {
        input.driver_phone = s.trim().to_string();
    }
    if let Some(s) = sub.get_one::<String>("date") {
        input.date_of_sale = parse_date(s)?;
    }
    if let Some(q) = opt_decimal(sub, "quantity")? {
        input.quantity_sold = Some(q);
    }
    if let Some(p) = opt_decimal(sub, "price")? {
        input.selling_price_per_unit = Some(p);
    }
    if let Some(s) = sub.get_one::<String>("payment") {
        // An explicit blank clears it
        input.payment_method_sale = match s.trim() {
            "" => None,
            other => Some(other.parse::<SalePaymentMethod>()?),
        };
    }
    if let Some(d) = opt_decimal(sub, "deposited")? {
        input.deposited_amount = Some(d);
    }
    if let Some(c) = opt_decimal(sub, "cheque")? {
        input.cheque_paid = Some(c);
    }
    if let Some(s) = sub.get_one::<String>("delivery") {
        input.delivery_method = s.parse::<DeliveryMethod>()?;
    }
    if let Some(s) = sub.get_one::<String>("quality") {
        input.comment = s.parse::<Quality>()?;
    }
    if let Some(s) = sub.get_one::<String>("note") {
        input.small_comment = Some(s.trim().to_string()).filter(|s| !s.is_empty());
    }
    Ok(())
}

fn add(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let delivery = sub
        .get_one::<String>("delivery")
        .context("--delivery is required")?
        .parse::<DeliveryMethod>()?;
    let quality = sub
        .get_one::<String>("quality")
        .context("--quality is required")?
        .parse::<Quality>()?;
    let mut input = SaleInput {
        customer_name: opt_text(sub, "customer").unwrap_or_default(),
        driver_phone: opt_text(sub, "phone").unwrap_or_default(),
        date_of_sale: today(),
        quantity_sold: None,
        selling_price_per_unit: None,
        payment_method_sale: None,
        deposited_amount: None,
        cheque_paid: None,
        delivery_method: delivery,
        comment: quality,
        small_comment: None,
    };
    apply_flags(&mut input, sub)?;
    validate::sale(&input)?;

    let rec = ledger.add_sale(&input.derive())?;
    let ccy = ledger.currency()?;
    println!(
        "Recorded sale #{} to '{}': {} kg = {} bags, expected {}, received {}",
        rec.id,
        rec.customer_name,
        rec.quantity_sold,
        rec.number_of_bags,
        fmt_money(&rec.expected_amount, &ccy),
        fmt_money(&rec.total_amount_received, &ccy)
    );
    Ok(())
}

fn edit(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let current = ledger.get_sale(id)?;
    let mut input = SaleInput::from(&current.body);
    apply_flags(&mut input, sub)?;
    validate::sale(&input)?;

    let rec = ledger.update_sale(id, &input.derive())?;
    println!(
        "Updated sale #{}: {} bags, received {}",
        rec.id,
        rec.number_of_bags,
        fmt_money(&rec.total_amount_received, &ledger.currency()?)
    );
    Ok(())
}

fn remove(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    ledger.delete_sale(id)?;
    println!("Removed sale #{}", id);
    Ok(())
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<Record<Sale>>> {
    let rows = ledger.list_sales()?;
    super::narrow(rows, sub, |s| s.date_of_sale)
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
                r.date_of_sale.to_string(),
                r.customer_name.clone(),
                r.driver_phone.clone(),
                r.quantity_sold.normalize().to_string(),
                fmt2(r.number_of_bags),
                r.selling_price_per_unit.normalize().to_string(),
                fmt2(r.expected_amount),
                fmt2(r.cheque_paid),
                fmt2(r.deposited_amount),
                fmt2(r.total_amount_received),
                r.payment_method_sale
                    .map(|m| m.to_string())
                    .unwrap_or_default(),
                r.delivery_method.to_string(),
                r.comment.to_string(),
                r.small_comment.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "ID", "Date", "Customer", "Driver", "Kg", "Bags", "Price/bag", "Expected",
                "Cheque", "Deposited", "Net", "Payment", "Delivery", "Quality", "Note",
            ],
            rows,
        )
    );
    let totals = sales_totals(&data);
    println!(
        "{} sale(s), {} kg, cheques {}, deposited {}, net {}",
        totals.sales,
        totals.quantity_sold.normalize(),
        fmt_money(&totals.cheque_paid, &ccy),
        fmt_money(&totals.deposited, &ccy),
        fmt_money(&totals.received, &ccy)
    );
    Ok(())
}
