// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.maizebiz", "MaizeBiz", "maizebiz"));

/// Default database location inside the platform data dir.
pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("maizebiz.sqlite"))
}

/// Resolves `--db` / `MAIZEBIZ_DB`, falling back to [`db_path`].
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            Ok(p.to_path_buf())
        }
        None => db_path(),
    }
}

pub fn open_or_init(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub(crate) fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS purchases(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        supplier_name TEXT NOT NULL,
        location_of_origin TEXT,
        date_of_purchase TEXT NOT NULL,
        quantity_bought TEXT NOT NULL,
        price_per_unit TEXT NOT NULL,
        total_amount_paid TEXT NOT NULL,
        payment_method TEXT NOT NULL,
        truck_number_plate TEXT,
        origin_weight TEXT,
        destination_weight TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_purchases_user_date ON purchases(user_id, date_of_purchase);

    CREATE TABLE IF NOT EXISTS sales(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        customer_name TEXT NOT NULL,
        driver_phone TEXT NOT NULL,
        date_of_sale TEXT NOT NULL,
        quantity_sold TEXT NOT NULL,
        number_of_bags TEXT NOT NULL,
        selling_price_per_unit TEXT NOT NULL,
        expected_amount TEXT NOT NULL,
        payment_method_sale TEXT,
        deposited_amount TEXT NOT NULL DEFAULT '0',
        cheque_paid TEXT NOT NULL DEFAULT '0',
        total_amount_received TEXT NOT NULL,
        delivery_method TEXT NOT NULL,
        comment TEXT NOT NULL,
        small_comment TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_sales_user_date ON sales(user_id, date_of_sale);

    CREATE TABLE IF NOT EXISTS laborers(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        date TEXT NOT NULL,
        number_of_laborers INTEGER NOT NULL,
        price_per_laborer TEXT NOT NULL,
        total_labour TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_laborers_user_date ON laborers(user_id, date);
    "#,
    )
}
