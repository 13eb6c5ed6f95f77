// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::labor_totals;
use crate::models::{LaborerInput, LaborerPayment, Record};
use crate::store::Ledger;
use crate::utils::{fmt2, fmt_money, maybe_print_json, opt_decimal, parse_date, pretty_table, today};
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

fn apply_flags(input: &mut LaborerInput, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(s) = sub.get_one::<String>("date") {
        input.date = parse_date(s)?;
    }
    if let Some(n) = sub.get_one::<u32>("count") {
        input.number_of_laborers = Some(*n);
    }
    if let Some(t) = opt_decimal(sub, "total")? {
        input.total_labour = Some(t);
    }
    Ok(())
}

fn add(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let mut input = LaborerInput {
        date: today(),
        number_of_laborers: None,
        total_labour: None,
    };
    apply_flags(&mut input, sub)?;
    validate::laborer(&input)?;

    let rec = ledger.add_laborer(&input.derive())?;
    let ccy = ledger.currency()?;
    println!(
        "Recorded laborer payment #{} on {}: {} laborer(s) x {} = {}",
        rec.id,
        rec.date,
        rec.number_of_laborers,
        fmt_money(&rec.price_per_laborer, &ccy),
        fmt_money(&rec.total_labour, &ccy)
    );
    Ok(())
}

fn edit(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let current = ledger.get_laborer(id)?;
    let mut input = LaborerInput::from(&current.body);
    apply_flags(&mut input, sub)?;
    validate::laborer(&input)?;

    let rec = ledger.update_laborer(id, &input.derive())?;
    println!(
        "Updated laborer payment #{}: {} per laborer",
        rec.id,
        fmt_money(&rec.price_per_laborer, &ledger.currency()?)
    );
    Ok(())
}

fn remove(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    ledger.delete_laborer(id)?;
    println!("Removed laborer payment #{}", id);
    Ok(())
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<Record<LaborerPayment>>> {
    let rows = ledger.list_laborers()?;
    super::narrow(rows, sub, |l| l.date)
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
                r.date.to_string(),
                r.number_of_laborers.to_string(),
                fmt2(r.price_per_laborer),
                fmt2(r.total_labour),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Date", "Laborers", "Per Laborer", "Total"], rows)
    );
    let totals = labor_totals(&data);
    println!(
        "{} payment(s), {} laborer-days, {}, average {} per laborer",
        totals.payments,
        totals.laborers,
        fmt_money(&totals.total_paid, &ccy),
        fmt_money(&totals.average_per_laborer, &ccy)
    );
    Ok(())
}
