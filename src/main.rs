// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};

use maizebiz::{cli, commands, db, logging, store::Ledger};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_count("verbose"));

    let path = db::resolve_path(matches.get_one::<PathBuf>("db").map(PathBuf::as_path))?;
    let user = matches
        .get_one::<String>("user")
        .context("no user given")?
        .trim()
        .to_string();
    let ledger = Ledger::open(&path, user)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("purchase", sub)) => commands::purchases::handle(&ledger, sub)?,
        Some(("sale", sub)) => commands::sales::handle(&ledger, sub)?,
        Some(("laborer", sub)) => commands::laborers::handle(&ledger, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&ledger, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
