// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use serde::Serialize;

use crate::store::Ledger;
use crate::utils::fmt_opt;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    let (kind, sub) = match m.subcommand() {
        Some(pair) => pair,
        None => return Ok(()),
    };
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "csv".into());
    let out = match sub.get_one::<String>("out") {
        Some(o) => o.as_str(),
        None => bail!("--out is required"),
    };
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let count = match kind {
        "purchases" => {
            let rows = ledger.list_purchases()?;
            let table = rows.iter().map(|r| {
                vec![
                    r.id.to_string(),
                    r.date_of_purchase.to_string(),
                    r.supplier_name.clone(),
                    r.location_of_origin.clone().unwrap_or_default(),
                    r.quantity_bought.to_string(),
                    r.price_per_unit.to_string(),
                    r.total_amount_paid.to_string(),
                    r.payment_method.to_string(),
                    r.truck_number_plate.clone().unwrap_or_default(),
                    fmt_opt(r.origin_weight),
                    fmt_opt(r.destination_weight),
                ]
            });
            write_out(
                &fmt,
                out,
                &[
                    "id",
                    "date_of_purchase",
                    "supplier_name",
                    "location_of_origin",
                    "quantity_bought",
                    "price_per_unit",
                    "total_amount_paid",
                    "payment_method",
                    "truck_number_plate",
                    "origin_weight",
                    "destination_weight",
                ],
                table,
                &rows,
            )?;
            rows.len()
        }
        "sales" => {
            let rows = ledger.list_sales()?;
            let table = rows.iter().map(|r| {
                vec![
                    r.id.to_string(),
                    r.date_of_sale.to_string(),
                    r.customer_name.clone(),
                    r.driver_phone.clone(),
                    r.quantity_sold.to_string(),
                    r.number_of_bags.to_string(),
                    r.selling_price_per_unit.to_string(),
                    r.expected_amount.to_string(),
                    r.payment_method_sale
                        .map(|m| m.to_string())
                        .unwrap_or_default(),
                    r.deposited_amount.to_string(),
                    r.cheque_paid.to_string(),
                    r.total_amount_received.to_string(),
                    r.delivery_method.to_string(),
                    r.comment.to_string(),
                    r.small_comment.clone().unwrap_or_default(),
                ]
            });
            write_out(
                &fmt,
                out,
                &[
                    "id",
                    "date_of_sale",
                    "customer_name",
                    "driver_phone",
                    "quantity_sold",
                    "number_of_bags",
                    "selling_price_per_unit",
                    "expected_amount",
                    "payment_method_sale",
                    "deposited_amount",
                    "cheque_paid",
                    "total_amount_received",
                    "delivery_method",
                    "comment",
                    "small_comment",
                ],
                table,
                &rows,
            )?;
            rows.len()
        }
        "laborers" => {
            let rows = ledger.list_laborers()?;
            let table = rows.iter().map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.to_string(),
                    r.number_of_laborers.to_string(),
                    r.price_per_laborer.to_string(),
                    r.total_labour.to_string(),
                ]
            });
            write_out(
                &fmt,
                out,
                &["id", "date", "number_of_laborers", "price_per_laborer", "total_labour"],
                table,
                &rows,
            )?;
            rows.len()
        }
        other => bail!("Unknown collection: {}", other),
    };
    tracing::info!(kind, count, out, "export written");
    println!("Exported {} {} to {}", count, kind, out);
    Ok(())
}

fn write_out<I, T>(fmt: &str, out: &str, headers: &[&str], table: I, rows: &T) -> Result<()>
where
    I: Iterator<Item = Vec<String>>,
    T: Serialize + ?Sized,
{
    if fmt == "json" {
        std::fs::write(out, serde_json::to_string_pretty(rows)?)?;
        return Ok(());
    }
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record(headers)?;
    for row in table {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}
