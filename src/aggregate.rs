// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client-side summaries over records that were already fetched.
//!
//! Nothing here touches the store. Empty inputs degrade to zero-valued
//! aggregates, negative differences (oversold stock, a losing period) are
//! returned as-is, and totals past the `Decimal` range saturate.

use std::str::FromStr;

use anyhow::anyhow;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::calc::round2;
use crate::models::{LaborerPayment, Purchase, Sale};

fn total(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

pub fn sum_field<T, F>(records: &[T], selector: F) -> Decimal
where
    F: Fn(&T) -> Decimal,
{
    total(records.iter().map(selector))
}

/// Records whose date falls in `start..=end`, compared by calendar day.
pub fn filter_by_date_range<'a, T, F>(
    records: &'a [T],
    date_selector: F,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&'a T>
where
    F: Fn(&T) -> NaiveDate,
{
    records
        .iter()
        .filter(|r| {
            let d = date_selector(*r);
            d >= start && d <= end
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub label: String,
    pub amount: Decimal,
}

/// One slot per day for the `window_days` days ending on `reference`,
/// oldest first. Days without records hold zero.
pub fn bucket_by_day<T, D, A>(
    records: &[T],
    date_selector: D,
    amount_selector: A,
    window_days: u32,
    reference: NaiveDate,
) -> Vec<DayBucket>
where
    D: Fn(&T) -> NaiveDate,
    A: Fn(&T) -> Decimal,
{
    (0..window_days)
        .rev()
        .map(|back| {
            let date = reference - Duration::days(i64::from(back));
            let amount = total(
                records
                    .iter()
                    .filter(|r| date_selector(*r) == date)
                    .map(&amount_selector),
            );
            DayBucket {
                date,
                label: date.format("%b %d").to_string(),
                amount,
            }
        })
        .collect()
}

pub fn net_profit(sales_total: Decimal, purchases_total: Decimal) -> Decimal {
    sales_total.saturating_sub(purchases_total)
}

pub fn stock_remaining(total_bought: Decimal, total_sold: Decimal) -> Decimal {
    total_bought.saturating_sub(total_sold)
}

/// Length of the dashboard chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartWindow {
    #[default]
    Week,
    Month,
    Quarter,
}

impl ChartWindow {
    pub fn days(self) -> u32 {
        match self {
            ChartWindow::Week => 7,
            ChartWindow::Month => 30,
            ChartWindow::Quarter => 90,
        }
    }
}

impl FromStr for ChartWindow {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7" | "7days" => Ok(ChartWindow::Week),
            "30" | "30days" => Ok(ChartWindow::Month),
            "90" | "90days" => Ok(ChartWindow::Quarter),
            other => Err(anyhow!(
                "Invalid range '{}', expected 7days|30days|90days",
                other
            )),
        }
    }
}

/// A reporting period, resolved against a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Week,
    Month,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Period {
    /// Inclusive `(start, end)` bounds.
    pub fn bounds(self, reference: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Today => (reference, reference),
            Period::Week => (reference - Duration::days(7), reference),
            Period::Month => (reference - Duration::days(30), reference),
            Period::Custom { start, end } => (start, end),
        }
    }

    pub fn select<'a, T, F>(self, records: &'a [T], date_selector: F, reference: NaiveDate) -> Vec<&'a T>
    where
        F: Fn(&T) -> NaiveDate,
    {
        let (start, end) = self.bounds(reference);
        filter_by_date_range(records, date_selector, start, end)
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(anyhow!(
                "Invalid period '{}', expected today|week|month",
                other
            )),
        }
    }
}

fn paid(p: &Purchase) -> Decimal {
    p.total_amount_paid
}

fn received(s: &Sale) -> Decimal {
    s.total_amount_received
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_purchases: Decimal,
    pub total_sales: Decimal,
    pub profit: Decimal,
    pub stock_remaining: Decimal,
    pub today_purchases: Decimal,
    pub today_sales: Decimal,
    pub weekly_purchases: Decimal,
    pub weekly_sales: Decimal,
    pub monthly_purchases: Decimal,
    pub monthly_sales: Decimal,
}

impl DashboardStats {
    /// Accepts anything that derefs to a record body, so both bare bodies and
    /// stored [`crate::models::Record`]s work.
    pub fn compute<P, S>(purchases: &[P], sales: &[S], today: NaiveDate) -> Self
    where
        P: std::ops::Deref<Target = Purchase>,
        S: std::ops::Deref<Target = Sale>,
    {
        let p_total = sum_field(purchases, |p| paid(p));
        let s_total = sum_field(sales, |s| received(s));
        let bought = sum_field(purchases, |p| p.quantity_bought);
        let sold = sum_field(sales, |s| s.quantity_sold);

        let period_totals = |period: Period| {
            let ps = total(
                period
                    .select(purchases, |p| p.date_of_purchase, today)
                    .into_iter()
                    .map(|p| paid(p)),
            );
            let ss = total(
                period
                    .select(sales, |s| s.date_of_sale, today)
                    .into_iter()
                    .map(|s| received(s)),
            );
            (ps, ss)
        };
        let (today_purchases, today_sales) = period_totals(Period::Today);
        let (weekly_purchases, weekly_sales) = period_totals(Period::Week);
        let (monthly_purchases, monthly_sales) = period_totals(Period::Month);

        DashboardStats {
            total_purchases: p_total,
            total_sales: s_total,
            profit: net_profit(s_total, p_total),
            stock_remaining: stock_remaining(bought, sold),
            today_purchases,
            today_sales,
            weekly_purchases,
            weekly_sales,
            monthly_purchases,
            monthly_sales,
        }
    }
}

/// A chart row: what went out and came in on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub label: String,
    pub purchases: Decimal,
    pub sales: Decimal,
    pub profit: Decimal,
}

pub fn daily_series<P, S>(
    purchases: &[P],
    sales: &[S],
    window: ChartWindow,
    reference: NaiveDate,
) -> Vec<DailyPoint>
where
    P: std::ops::Deref<Target = Purchase>,
    S: std::ops::Deref<Target = Sale>,
{
    let bought = bucket_by_day(purchases, |p| p.date_of_purchase, |p| paid(p), window.days(), reference);
    let sold = bucket_by_day(sales, |s| s.date_of_sale, |s| received(s), window.days(), reference);
    bought
        .into_iter()
        .zip(sold)
        .map(|(b, s)| DailyPoint {
            date: b.date,
            label: b.label,
            purchases: b.amount,
            sales: s.amount,
            profit: net_profit(s.amount, b.amount),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaborTotals {
    pub payments: usize,
    pub laborers: u64,
    pub total_paid: Decimal,
    /// Zero when no laborers were paid.
    pub average_per_laborer: Decimal,
}

pub fn labor_totals<L>(payments: &[L]) -> LaborTotals
where
    L: std::ops::Deref<Target = LaborerPayment>,
{
    let laborers: u64 = payments.iter().map(|l| u64::from(l.number_of_laborers)).sum();
    let total_paid = sum_field(payments, |l| l.total_labour);
    let average_per_laborer = if laborers == 0 {
        Decimal::ZERO
    } else {
        round2(total_paid / Decimal::from(laborers))
    };
    LaborTotals {
        payments: payments.len(),
        laborers,
        total_paid,
        average_per_laborer,
    }
}

/// Footer figures for the sales list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesTotals {
    pub sales: usize,
    pub quantity_sold: Decimal,
    pub cheque_paid: Decimal,
    pub deposited: Decimal,
    pub received: Decimal,
}

pub fn sales_totals<S>(sales: &[S]) -> SalesTotals
where
    S: std::ops::Deref<Target = Sale>,
{
    SalesTotals {
        sales: sales.len(),
        quantity_sold: sum_field(sales, |s| s.quantity_sold),
        cheque_paid: sum_field(sales, |s| s.cheque_paid),
        deposited: sum_field(sales, |s| s.deposited_amount),
        received: sum_field(sales, |s| received(s)),
    }
}
