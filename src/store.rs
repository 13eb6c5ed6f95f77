// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The persistence capability handed to every command.
//!
//! A [`Ledger`] is built once at startup from an open connection and the
//! signed-in user. Every read and write is scoped to that user; rows owned by
//! anyone else look exactly like missing rows.

use std::path::Path;
use std::str::FromStr;

use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::db;
use crate::error::LedgerError;
use crate::models::{LaborerPayment, Purchase, Record, Sale};

pub const DEFAULT_CURRENCY: &str = "KES";

pub struct Ledger {
    conn: Connection,
    user_id: String,
}

fn conversion_err<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn dec(r: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>().map_err(|e| conversion_err(idx, e))
}

fn opt_dec(r: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    let s: Option<String> = r.get(idx)?;
    s.map(|s| s.parse::<Decimal>().map_err(|e| conversion_err(idx, e)))
        .transpose()
}

fn label<T: FromStr<Err = LedgerError>>(r: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let s: String = r.get(idx)?;
    s.parse::<T>().map_err(|e| conversion_err(idx, e))
}

fn opt_label<T: FromStr<Err = LedgerError>>(r: &Row<'_>, idx: usize) -> rusqlite::Result<Option<T>> {
    let s: Option<String> = r.get(idx)?;
    s.map(|s| s.parse::<T>().map_err(|e| conversion_err(idx, e)))
        .transpose()
}

fn opt_text(d: Option<Decimal>) -> Option<String> {
    d.map(|d| d.to_string())
}

const PURCHASE_COLS: &str = "id, user_id, supplier_name, location_of_origin, date_of_purchase, \
     quantity_bought, price_per_unit, total_amount_paid, payment_method, truck_number_plate, \
     origin_weight, destination_weight";

const SALE_COLS: &str = "id, user_id, customer_name, driver_phone, date_of_sale, quantity_sold, \
     number_of_bags, selling_price_per_unit, expected_amount, payment_method_sale, \
     deposited_amount, cheque_paid, total_amount_received, delivery_method, comment, small_comment";

const LABORER_COLS: &str =
    "id, user_id, date, number_of_laborers, price_per_laborer, total_labour";

fn purchase_row(r: &Row<'_>) -> rusqlite::Result<Record<Purchase>> {
    Ok(Record {
        id: r.get(0)?,
        user_id: r.get(1)?,
        body: Purchase {
            supplier_name: r.get(2)?,
            location_of_origin: r.get(3)?,
            date_of_purchase: r.get(4)?,
            quantity_bought: dec(r, 5)?,
            price_per_unit: dec(r, 6)?,
            total_amount_paid: dec(r, 7)?,
            payment_method: label(r, 8)?,
            truck_number_plate: r.get(9)?,
            origin_weight: opt_dec(r, 10)?,
            destination_weight: opt_dec(r, 11)?,
        },
    })
}

fn sale_row(r: &Row<'_>) -> rusqlite::Result<Record<Sale>> {
    Ok(Record {
        id: r.get(0)?,
        user_id: r.get(1)?,
        body: Sale {
            customer_name: r.get(2)?,
            driver_phone: r.get(3)?,
            date_of_sale: r.get(4)?,
            quantity_sold: dec(r, 5)?,
            number_of_bags: dec(r, 6)?,
            selling_price_per_unit: dec(r, 7)?,
            expected_amount: dec(r, 8)?,
            payment_method_sale: opt_label(r, 9)?,
            deposited_amount: dec(r, 10)?,
            cheque_paid: dec(r, 11)?,
            total_amount_received: dec(r, 12)?,
            delivery_method: label(r, 13)?,
            comment: label(r, 14)?,
            small_comment: r.get(15)?,
        },
    })
}

fn laborer_row(r: &Row<'_>) -> rusqlite::Result<Record<LaborerPayment>> {
    Ok(Record {
        id: r.get(0)?,
        user_id: r.get(1)?,
        body: LaborerPayment {
            date: r.get(2)?,
            number_of_laborers: r.get(3)?,
            price_per_laborer: dec(r, 4)?,
            total_labour: dec(r, 5)?,
        },
    })
}

impl Ledger {
    /// Wraps an open connection, creating the schema if needed.
    pub fn new(conn: Connection, user_id: impl Into<String>) -> Result<Self, LedgerError> {
        db::init_schema(&conn)?;
        Ok(Ledger {
            conn,
            user_id: user_id.into(),
        })
    }

    pub fn open(path: &Path, user_id: impl Into<String>) -> anyhow::Result<Self> {
        let conn = db::open_or_init(path)?;
        Ok(Ledger::new(conn, user_id)?)
    }

    pub fn open_in_memory(user_id: impl Into<String>) -> Result<Self, LedgerError> {
        Ledger::new(Connection::open_in_memory()?, user_id)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn check_changed(changed: usize, kind: &'static str, id: i64) -> Result<(), LedgerError> {
        if changed == 0 {
            Err(LedgerError::NotFound { kind, id })
        } else {
            Ok(())
        }
    }

    // ---- purchases ----

    pub fn add_purchase(&self, p: &Purchase) -> Result<Record<Purchase>, LedgerError> {
        self.conn.execute(
            "INSERT INTO purchases(user_id, supplier_name, location_of_origin, date_of_purchase,
                quantity_bought, price_per_unit, total_amount_paid, payment_method,
                truck_number_plate, origin_weight, destination_weight)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                self.user_id,
                p.supplier_name,
                p.location_of_origin,
                p.date_of_purchase,
                p.quantity_bought.to_string(),
                p.price_per_unit.to_string(),
                p.total_amount_paid.to_string(),
                p.payment_method.as_str(),
                p.truck_number_plate,
                opt_text(p.origin_weight),
                opt_text(p.destination_weight),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, supplier = %p.supplier_name, total = %p.total_amount_paid, "purchase recorded");
        self.get_purchase(id)
    }

    pub fn get_purchase(&self, id: i64) -> Result<Record<Purchase>, LedgerError> {
        let sql = format!("SELECT {PURCHASE_COLS} FROM purchases WHERE id=?1 AND user_id=?2");
        self.conn
            .query_row(&sql, params![id, self.user_id], purchase_row)
            .optional()?
            .ok_or(LedgerError::NotFound { kind: "purchase", id })
    }

    /// Newest first.
    pub fn list_purchases(&self) -> Result<Vec<Record<Purchase>>, LedgerError> {
        let sql = format!(
            "SELECT {PURCHASE_COLS} FROM purchases WHERE user_id=?1
             ORDER BY date_of_purchase DESC, id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![self.user_id], purchase_row)?;
        let data = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = data.len(), "purchases loaded");
        Ok(data)
    }

    pub fn update_purchase(&self, id: i64, p: &Purchase) -> Result<Record<Purchase>, LedgerError> {
        let changed = self.conn.execute(
            "UPDATE purchases SET supplier_name=?3, location_of_origin=?4, date_of_purchase=?5,
                quantity_bought=?6, price_per_unit=?7, total_amount_paid=?8, payment_method=?9,
                truck_number_plate=?10, origin_weight=?11, destination_weight=?12
             WHERE id=?1 AND user_id=?2",
            params![
                id,
                self.user_id,
                p.supplier_name,
                p.location_of_origin,
                p.date_of_purchase,
                p.quantity_bought.to_string(),
                p.price_per_unit.to_string(),
                p.total_amount_paid.to_string(),
                p.payment_method.as_str(),
                p.truck_number_plate,
                opt_text(p.origin_weight),
                opt_text(p.destination_weight),
            ],
        )?;
        Self::check_changed(changed, "purchase", id)?;
        info!(id, "purchase updated");
        self.get_purchase(id)
    }

    pub fn delete_purchase(&self, id: i64) -> Result<(), LedgerError> {
        let changed = self.conn.execute(
            "DELETE FROM purchases WHERE id=?1 AND user_id=?2",
            params![id, self.user_id],
        )?;
        Self::check_changed(changed, "purchase", id)?;
        info!(id, "purchase deleted");
        Ok(())
    }

    // ---- sales ----

    pub fn add_sale(&self, s: &Sale) -> Result<Record<Sale>, LedgerError> {
        self.conn.execute(
            "INSERT INTO sales(user_id, customer_name, driver_phone, date_of_sale, quantity_sold,
                number_of_bags, selling_price_per_unit, expected_amount, payment_method_sale,
                deposited_amount, cheque_paid, total_amount_received, delivery_method, comment,
                small_comment)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                self.user_id,
                s.customer_name,
                s.driver_phone,
                s.date_of_sale,
                s.quantity_sold.to_string(),
                s.number_of_bags.to_string(),
                s.selling_price_per_unit.to_string(),
                s.expected_amount.to_string(),
                s.payment_method_sale.map(|m| m.as_str()),
                s.deposited_amount.to_string(),
                s.cheque_paid.to_string(),
                s.total_amount_received.to_string(),
                s.delivery_method.as_str(),
                s.comment.as_str(),
                s.small_comment,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, customer = %s.customer_name, received = %s.total_amount_received, "sale recorded");
        self.get_sale(id)
    }

    pub fn get_sale(&self, id: i64) -> Result<Record<Sale>, LedgerError> {
        let sql = format!("SELECT {SALE_COLS} FROM sales WHERE id=?1 AND user_id=?2");
        self.conn
            .query_row(&sql, params![id, self.user_id], sale_row)
            .optional()?
            .ok_or(LedgerError::NotFound { kind: "sale", id })
    }

    /// Newest first.
    pub fn list_sales(&self) -> Result<Vec<Record<Sale>>, LedgerError> {
        let sql = format!(
            "SELECT {SALE_COLS} FROM sales WHERE user_id=?1 ORDER BY date_of_sale DESC, id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![self.user_id], sale_row)?;
        let data = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = data.len(), "sales loaded");
        Ok(data)
    }

    pub fn update_sale(&self, id: i64, s: &Sale) -> Result<Record<Sale>, LedgerError> {
        let changed = self.conn.execute(
            "UPDATE sales SET customer_name=?3, driver_phone=?4, date_of_sale=?5, quantity_sold=?6,
                number_of_bags=?7, selling_price_per_unit=?8, expected_amount=?9,
                payment_method_sale=?10, deposited_amount=?11, cheque_paid=?12,
                total_amount_received=?13, delivery_method=?14, comment=?15, small_comment=?16
             WHERE id=?1 AND user_id=?2",
            params![
                id,
                self.user_id,
                s.customer_name,
                s.driver_phone,
                s.date_of_sale,
                s.quantity_sold.to_string(),
                s.number_of_bags.to_string(),
                s.selling_price_per_unit.to_string(),
                s.expected_amount.to_string(),
                s.payment_method_sale.map(|m| m.as_str()),
                s.deposited_amount.to_string(),
                s.cheque_paid.to_string(),
                s.total_amount_received.to_string(),
                s.delivery_method.as_str(),
                s.comment.as_str(),
                s.small_comment,
            ],
        )?;
        Self::check_changed(changed, "sale", id)?;
        info!(id, "sale updated");
        self.get_sale(id)
    }

    pub fn delete_sale(&self, id: i64) -> Result<(), LedgerError> {
        let changed = self.conn.execute(
            "DELETE FROM sales WHERE id=?1 AND user_id=?2",
            params![id, self.user_id],
        )?;
        Self::check_changed(changed, "sale", id)?;
        info!(id, "sale deleted");
        Ok(())
    }

    // ---- laborer payments ----

    pub fn add_laborer(&self, l: &LaborerPayment) -> Result<Record<LaborerPayment>, LedgerError> {
        self.conn.execute(
            "INSERT INTO laborers(user_id, date, number_of_laborers, price_per_laborer, total_labour)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                self.user_id,
                l.date,
                l.number_of_laborers,
                l.price_per_laborer.to_string(),
                l.total_labour.to_string(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, laborers = l.number_of_laborers, total = %l.total_labour, "laborer payment recorded");
        self.get_laborer(id)
    }

    pub fn get_laborer(&self, id: i64) -> Result<Record<LaborerPayment>, LedgerError> {
        let sql = format!("SELECT {LABORER_COLS} FROM laborers WHERE id=?1 AND user_id=?2");
        self.conn
            .query_row(&sql, params![id, self.user_id], laborer_row)
            .optional()?
            .ok_or(LedgerError::NotFound { kind: "laborer payment", id })
    }

    /// Newest first.
    pub fn list_laborers(&self) -> Result<Vec<Record<LaborerPayment>>, LedgerError> {
        let sql = format!(
            "SELECT {LABORER_COLS} FROM laborers WHERE user_id=?1 ORDER BY date DESC, id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![self.user_id], laborer_row)?;
        let data = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = data.len(), "laborer payments loaded");
        Ok(data)
    }

    pub fn update_laborer(
        &self,
        id: i64,
        l: &LaborerPayment,
    ) -> Result<Record<LaborerPayment>, LedgerError> {
        let changed = self.conn.execute(
            "UPDATE laborers SET date=?3, number_of_laborers=?4, price_per_laborer=?5, total_labour=?6
             WHERE id=?1 AND user_id=?2",
            params![
                id,
                self.user_id,
                l.date,
                l.number_of_laborers,
                l.price_per_laborer.to_string(),
                l.total_labour.to_string(),
            ],
        )?;
        Self::check_changed(changed, "laborer payment", id)?;
        info!(id, "laborer payment updated");
        self.get_laborer(id)
    }

    pub fn delete_laborer(&self, id: i64) -> Result<(), LedgerError> {
        let changed = self.conn.execute(
            "DELETE FROM laborers WHERE id=?1 AND user_id=?2",
            params![id, self.user_id],
        )?;
        Self::check_changed(changed, "laborer payment", id)?;
        info!(id, "laborer payment deleted");
        Ok(())
    }

    // ---- settings ----

    pub fn currency(&self) -> Result<String, LedgerError> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM settings WHERE key='currency'", [], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
    }

    pub fn set_currency(&self, ccy: &str) -> Result<(), LedgerError> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES('currency', ?1)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![ccy],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LaborerInput, PaymentMethod, PurchaseInput};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn input(supplier: &str, d: u32) -> PurchaseInput {
        PurchaseInput {
            supplier_name: supplier.into(),
            location_of_origin: Some("Eldoret".into()),
            date_of_purchase: day(d),
            quantity_bought: Some(Decimal::new(500, 0)),
            price_per_unit: Some(Decimal::new(4050, 2)),
            payment_method: PaymentMethod::BankTransfer,
            truck_number_plate: None,
            origin_weight: Some(Decimal::new(5005, 1)),
            destination_weight: None,
        }
    }

    #[test]
    fn purchase_round_trips_through_sqlite() {
        let ledger = Ledger::open_in_memory("farmer").unwrap();
        let saved = ledger.add_purchase(&input("Acme", 1).derive()).unwrap();
        assert_eq!(saved.user_id, "farmer");
        assert_eq!(saved.total_amount_paid, Decimal::new(20250, 0));
        assert_eq!(saved.origin_weight, Some(Decimal::new(5005, 1)));
        assert_eq!(saved.payment_method, PaymentMethod::BankTransfer);
    }

    #[test]
    fn lists_newest_first() {
        let ledger = Ledger::open_in_memory("farmer").unwrap();
        ledger.add_purchase(&input("Old", 1).derive()).unwrap();
        ledger.add_purchase(&input("New", 9).derive()).unwrap();
        ledger.add_purchase(&input("Mid", 5).derive()).unwrap();
        let names: Vec<_> = ledger
            .list_purchases()
            .unwrap()
            .into_iter()
            .map(|r| r.body.supplier_name)
            .collect();
        assert_eq!(names, ["New", "Mid", "Old"]);
    }

    #[test]
    fn other_users_rows_are_invisible() {
        let ledger = Ledger::open_in_memory("alice").unwrap();
        let saved = ledger.add_purchase(&input("Acme", 1).derive()).unwrap();
        let conn = ledger.conn;
        let bob = Ledger::new(conn, "bob").unwrap();
        assert!(bob.list_purchases().unwrap().is_empty());
        assert_eq!(
            bob.delete_purchase(saved.id).unwrap_err(),
            LedgerError::NotFound { kind: "purchase", id: saved.id }
        );
        assert!(bob.get_purchase(saved.id).is_err());
    }

    #[test]
    fn laborer_update_and_delete() {
        let ledger = Ledger::open_in_memory("farmer").unwrap();
        let mut raw = LaborerInput {
            date: day(2),
            number_of_laborers: Some(4),
            total_labour: Some(Decimal::new(1000, 0)),
        };
        let saved = ledger.add_laborer(&raw.derive()).unwrap();
        assert_eq!(saved.price_per_laborer, Decimal::new(250, 0));

        raw.number_of_laborers = Some(3);
        raw.total_labour = Some(Decimal::new(100, 0));
        let updated = ledger.update_laborer(saved.id, &raw.derive()).unwrap();
        assert_eq!(updated.price_per_laborer, Decimal::new(3333, 2));

        ledger.delete_laborer(saved.id).unwrap();
        assert!(ledger.list_laborers().unwrap().is_empty());
        assert!(ledger.delete_laborer(saved.id).is_err());
    }

    #[test]
    fn currency_defaults_to_kes() {
        let ledger = Ledger::open_in_memory("farmer").unwrap();
        assert_eq!(ledger.currency().unwrap(), "KES");
        ledger.set_currency("UGX").unwrap();
        assert_eq!(ledger.currency().unwrap(), "UGX");
    }
}
