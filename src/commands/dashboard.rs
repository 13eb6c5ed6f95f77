// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{ChartWindow, DailyPoint, DashboardStats, daily_series};
use crate::store::Ledger;
use crate::utils::{fmt2, fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub series: Vec<DailyPoint>,
}

pub fn compute(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Dashboard> {
    let window = match sub.get_one::<String>("range") {
        Some(r) => r.parse::<ChartWindow>()?,
        None => ChartWindow::default(),
    };
    let today = super::reference_day(sub)?;
    let purchases = ledger.list_purchases()?;
    let sales = ledger.list_sales()?;
    tracing::debug!(
        purchases = purchases.len(),
        sales = sales.len(),
        days = window.days(),
        %today,
        "building dashboard"
    );
    Ok(Dashboard {
        stats: DashboardStats::compute(&purchases, &sales, today),
        series: daily_series(&purchases, &sales, window, today),
    })
}

/// Week and month cards span `today - 7 ..= today` and `today - 30 ..= today`.
const CARD_HEADERS: [&str; 5] = ["", "All time", "Today", "Since 7 days ago", "Since 30 days ago"];

pub fn handle(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let dash = compute(ledger, sub)?;
    if maybe_print_json(sub.get_flag("json"), false, &dash)? {
        return Ok(());
    }
    let ccy = ledger.currency()?;
    let s = &dash.stats;
    let cards = vec![
        vec![
            "Purchases".to_string(),
            fmt_money(&s.total_purchases, &ccy),
            fmt_money(&s.today_purchases, &ccy),
            fmt_money(&s.weekly_purchases, &ccy),
            fmt_money(&s.monthly_purchases, &ccy),
        ],
        vec![
            "Sales".to_string(),
            fmt_money(&s.total_sales, &ccy),
            fmt_money(&s.today_sales, &ccy),
            fmt_money(&s.weekly_sales, &ccy),
            fmt_money(&s.monthly_sales, &ccy),
        ],
    ];
    println!(
        "{}",
        pretty_table(&CARD_HEADERS, cards)
    );
    println!(
        "Profit: {}    Stock remaining: {} kg",
        fmt_money(&s.profit, &ccy),
        s.stock_remaining.normalize()
    );

    let rows: Vec<Vec<String>> = dash
        .series
        .iter()
        .map(|p| {
            vec![
                p.label.clone(),
                fmt2(p.purchases),
                fmt2(p.sales),
                fmt2(p.profit),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Day", "Purchases", "Sales", "Profit"], rows)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Period;
    use chrono::NaiveDate;

    #[test]
    fn card_headers_match_period_bounds() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();
        let (start, _) = Period::Week.bounds(today);
        assert_eq!((today - start).num_days(), 7);
        assert_eq!(CARD_HEADERS[3], "Since 7 days ago");
        let (start, _) = Period::Month.bounds(today);
        assert_eq!((today - start).num_days(), 30);
        assert_eq!(CARD_HEADERS[4], "Since 30 days ago");
    }
}
