// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Ledger;
use anyhow::{Result, bail};

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("currency", sub)) = m.subcommand() {
        match sub.get_one::<String>("code").map(|s| s.trim().to_uppercase()) {
            Some(code) => {
                if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                    bail!("Invalid currency code '{}'", code);
                }
                ledger.set_currency(&code)?;
                println!("Display currency set to {}", code);
            }
            None => println!("{}", ledger.currency()?),
        }
    }
    Ok(())
}
