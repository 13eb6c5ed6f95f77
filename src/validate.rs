// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Advisory checks on raw input. All problems are collected, not just the first.

use rust_decimal::Decimal;

use crate::error::LedgerError;
use crate::models::{LaborerInput, PurchaseInput, SaleInput};

/// Largest magnitude accepted for any amount or quantity (10^12).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

fn bounded(errors: &mut Vec<String>, label: &str, value: Option<Decimal>) {
    if value.is_some_and(|v| v.abs() > MAX_AMOUNT) {
        errors.push(format!("{label} is too large"));
    }
}

fn required(errors: &mut Vec<String>, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{label} is required"));
    }
}

fn positive(errors: &mut Vec<String>, label: &str, value: Option<Decimal>) {
    match value {
        None => errors.push(format!("{label} is required")),
        Some(v) if v <= Decimal::ZERO => errors.push(format!("{label} must be positive")),
        Some(_) => bounded(errors, label, value),
    }
}

fn non_negative(errors: &mut Vec<String>, label: &str, value: Option<Decimal>) {
    if value.is_some_and(|v| v < Decimal::ZERO) {
        errors.push(format!("{label} cannot be negative"));
    }
    bounded(errors, label, value);
}

fn finish(kind: &'static str, errors: Vec<String>) -> Result<(), LedgerError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(LedgerError::Invalid { kind, errors })
    }
}

pub fn purchase(input: &PurchaseInput) -> Result<(), LedgerError> {
    let mut errors = Vec::new();
    required(&mut errors, "Supplier name", &input.supplier_name);
    positive(&mut errors, "Quantity", input.quantity_bought);
    positive(&mut errors, "Price per unit", input.price_per_unit);
    finish("purchase", errors)
}

pub fn sale(input: &SaleInput) -> Result<(), LedgerError> {
    let mut errors = Vec::new();
    required(&mut errors, "Customer name", &input.customer_name);
    required(&mut errors, "Driver phone", &input.driver_phone);
    positive(&mut errors, "Quantity", input.quantity_sold);
    positive(&mut errors, "Selling price", input.selling_price_per_unit);
    non_negative(&mut errors, "Deposited amount", input.deposited_amount);
    non_negative(&mut errors, "Cheque amount", input.cheque_paid);
    finish("sale", errors)
}

pub fn laborer(input: &LaborerInput) -> Result<(), LedgerError> {
    let mut errors = Vec::new();
    match input.number_of_laborers {
        None => errors.push("Number of laborers is required".to_string()),
        Some(0) => errors.push("Number of laborers must be positive".to_string()),
        Some(_) => {}
    }
    positive(&mut errors, "Total labour", input.total_labour);
    finish("laborer payment", errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;
    use chrono::NaiveDate;

    #[test]
    fn laborer_collects_every_problem() {
        let input = LaborerInput {
            date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            number_of_laborers: Some(0),
            total_labour: None,
        };
        assert_eq!(
            laborer(&input).unwrap_err(),
            LedgerError::Invalid {
                kind: "laborer payment",
                errors: vec![
                    "Number of laborers must be positive".into(),
                    "Total labour is required".into(),
                ],
            }
        );
    }

    #[test]
    fn huge_amounts_are_rejected() {
        let input = PurchaseInput {
            supplier_name: "Acme".into(),
            location_of_origin: None,
            date_of_purchase: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            quantity_bought: Some(Decimal::MAX),
            price_per_unit: Some(MAX_AMOUNT),
            payment_method: PaymentMethod::Cash,
            truck_number_plate: None,
            origin_weight: None,
            destination_weight: None,
        };
        assert_eq!(
            purchase(&input).unwrap_err(),
            LedgerError::Invalid {
                kind: "purchase",
                errors: vec!["Quantity is too large".into()],
            }
        );
        assert_eq!(MAX_AMOUNT, Decimal::new(1_000_000_000_000, 0));
    }

    #[test]
    fn laborer_accepts_positive_values() {
        let input = LaborerInput {
            date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            number_of_laborers: Some(3),
            total_labour: Some(Decimal::new(100, 0)),
        };
        assert!(laborer(&input).is_ok());
    }
}
