// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod dashboard;
pub mod exporter;
pub mod laborers;
pub mod purchases;
pub mod sales;
pub mod settings;

use anyhow::Result;
use chrono::NaiveDate;

use crate::aggregate::{Period, filter_by_date_range};
use crate::models::Record;
use crate::search::{Searchable, matches};
use crate::utils::{parse_date, today};

/// Reference day for relative periods: `--today` or the local date.
pub(crate) fn reference_day(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("today") {
        Some(s) => parse_date(s),
        None => Ok(today()),
    }
}

/// Applies the shared `list` flags (`--period`/`--from`/`--to`, `--search`,
/// `--limit`) to rows that are already newest first.
pub(crate) fn narrow<B>(
    rows: Vec<Record<B>>,
    sub: &clap::ArgMatches,
    date_of: fn(&B) -> NaiveDate,
) -> Result<Vec<Record<B>>>
where
    B: Searchable + Clone,
{
    let (start, end) = if let Some(p) = sub.get_one::<String>("period") {
        p.parse::<Period>()?.bounds(reference_day(sub)?)
    } else {
        let start = match sub.get_one::<String>("from") {
            Some(s) => parse_date(s)?,
            None => NaiveDate::MIN,
        };
        let end = match sub.get_one::<String>("to") {
            Some(s) => parse_date(s)?,
            None => NaiveDate::MAX,
        };
        (start, end)
    };
    let query = sub
        .get_one::<String>("search")
        .map(String::as_str)
        .unwrap_or("");
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    Ok(filter_by_date_range(&rows, |r| date_of(&r.body), start, end)
        .into_iter()
        .filter(|r| matches(&r.body, query, B::DEFAULT_FIELDS))
        .take(limit)
        .cloned()
        .collect())
}
