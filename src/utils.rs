// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::calc::round2;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Optional flag value parsed as a decimal.
pub fn opt_decimal(m: &clap::ArgMatches, id: &str) -> Result<Option<Decimal>> {
    m.get_one::<String>(id).map(|s| parse_decimal(s)).transpose()
}

/// Optional flag value, trimmed; blank counts as absent.
pub fn opt_text(m: &clap::ArgMatches, id: &str) -> Option<String> {
    m.get_one::<String>(id)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Two places, rounded like every stored figure.
pub fn fmt2(d: Decimal) -> String {
    format!("{:.2}", round2(d))
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", ccy, fmt2(*d))
}

pub fn fmt_opt(d: Option<Decimal>) -> String {
    d.map(|d| d.normalize().to_string()).unwrap_or_default()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_pads_to_cents() {
        assert_eq!(fmt_money(&Decimal::new(20000, 0), "KES"), "KES 20000.00");
        assert_eq!(fmt_money(&Decimal::new(-2005, 1), "KES"), "KES -200.50");
    }

    #[test]
    fn display_rounds_halves_away_from_zero() {
        assert_eq!(fmt_money(&Decimal::new(125, 3), "KES"), "KES 0.13");
        assert_eq!(fmt_money(&Decimal::new(-125, 3), "KES"), "KES -0.13");
        assert_eq!(fmt2(Decimal::new(3999, 3)), "4.00");
        assert_eq!(fmt2(Decimal::new(1115, 3)), "1.12");
    }

    #[test]
    fn date_trims_and_rejects_garbage() {
        assert_eq!(
            parse_date(" 2025-02-28 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(parse_date("28/02/2025").is_err());
    }
}
