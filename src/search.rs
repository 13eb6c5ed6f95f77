// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Case-insensitive substring search over a fixed set of fields per record kind.

use std::ops::Deref;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{LaborerPayment, Purchase, Sale};

/// A record kind whose fields can be rendered as text for searching.
pub trait Searchable {
    type Field: Copy + 'static;

    /// Fields the list views search when no explicit set is given.
    const DEFAULT_FIELDS: &'static [Self::Field];

    /// Text form of one field, `None` when the field is absent.
    fn field_text(&self, field: Self::Field) -> Option<String>;
}

/// `true` when `query` is blank or is contained (ignoring case) in at least
/// one of `fields`.
pub fn matches<R: Searchable + ?Sized>(record: &R, query: &str, fields: &[R::Field]) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields.iter().any(|f| {
        record
            .field_text(*f)
            .is_some_and(|text| text.to_lowercase().contains(&needle))
    })
}

/// Keeps the records matching `query` on the kind's default fields.
pub fn filter<'a, R, B>(records: &'a [R], query: &str) -> Vec<&'a R>
where
    R: Deref<Target = B>,
    B: Searchable + 'a,
{
    records
        .iter()
        .filter(|r| matches(&***r, query, B::DEFAULT_FIELDS))
        .collect()
}

fn num(d: Decimal) -> String {
    d.normalize().to_string()
}

fn day(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseField {
    SupplierName,
    LocationOfOrigin,
    DateOfPurchase,
    QuantityBought,
    PricePerUnit,
    TotalAmountPaid,
    PaymentMethod,
    TruckNumberPlate,
}

impl Searchable for Purchase {
    type Field = PurchaseField;

    const DEFAULT_FIELDS: &'static [PurchaseField] = &[
        PurchaseField::SupplierName,
        PurchaseField::PaymentMethod,
        PurchaseField::TruckNumberPlate,
        PurchaseField::LocationOfOrigin,
    ];

    fn field_text(&self, field: PurchaseField) -> Option<String> {
        match field {
            PurchaseField::SupplierName => Some(self.supplier_name.clone()),
            PurchaseField::LocationOfOrigin => self.location_of_origin.clone(),
            PurchaseField::DateOfPurchase => Some(day(self.date_of_purchase)),
            PurchaseField::QuantityBought => Some(num(self.quantity_bought)),
            PurchaseField::PricePerUnit => Some(num(self.price_per_unit)),
            PurchaseField::TotalAmountPaid => Some(num(self.total_amount_paid)),
            PurchaseField::PaymentMethod => Some(self.payment_method.to_string()),
            PurchaseField::TruckNumberPlate => self.truck_number_plate.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleField {
    CustomerName,
    DriverPhone,
    DateOfSale,
    QuantitySold,
    PaymentMethod,
    DeliveryMethod,
    Comment,
    Note,
}

impl Searchable for Sale {
    type Field = SaleField;

    const DEFAULT_FIELDS: &'static [SaleField] = &[
        SaleField::CustomerName,
        SaleField::DriverPhone,
        SaleField::DeliveryMethod,
        SaleField::Note,
    ];

    fn field_text(&self, field: SaleField) -> Option<String> {
        match field {
            SaleField::CustomerName => Some(self.customer_name.clone()),
            SaleField::DriverPhone => Some(self.driver_phone.clone()),
            SaleField::DateOfSale => Some(day(self.date_of_sale)),
            SaleField::QuantitySold => Some(num(self.quantity_sold)),
            SaleField::PaymentMethod => self.payment_method_sale.map(|m| m.to_string()),
            SaleField::DeliveryMethod => Some(self.delivery_method.to_string()),
            SaleField::Comment => Some(self.comment.to_string()),
            SaleField::Note => self.small_comment.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaborerField {
    Date,
    NumberOfLaborers,
    TotalLabour,
    PricePerLaborer,
}

impl Searchable for LaborerPayment {
    type Field = LaborerField;

    const DEFAULT_FIELDS: &'static [LaborerField] = &[
        LaborerField::Date,
        LaborerField::NumberOfLaborers,
        LaborerField::TotalLabour,
        LaborerField::PricePerLaborer,
    ];

    fn field_text(&self, field: LaborerField) -> Option<String> {
        match field {
            LaborerField::Date => Some(day(self.date)),
            LaborerField::NumberOfLaborers => Some(self.number_of_laborers.to_string()),
            LaborerField::TotalLabour => Some(num(self.total_labour)),
            LaborerField::PricePerLaborer => Some(num(self.price_per_laborer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeliveryMethod, PaymentMethod, Quality, Record};

    fn acme() -> Purchase {
        Purchase {
            supplier_name: "Acme".into(),
            location_of_origin: None,
            date_of_purchase: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            quantity_bought: Decimal::new(1500, 0),
            price_per_unit: Decimal::new(4250, 2),
            total_amount_paid: Decimal::new(6375000, 2),
            payment_method: PaymentMethod::MPesa,
            truck_number_plate: Some("KCA 123X".into()),
            origin_weight: None,
            destination_weight: None,
        }
    }

    #[test]
    fn blank_query_matches_everything() {
        assert!(matches(&acme(), "", &[PurchaseField::SupplierName]));
        assert!(matches(&acme(), "   ", &[]));
    }

    #[test]
    fn substring_ignores_case() {
        assert!(matches(&acme(), "acm", &[PurchaseField::SupplierName]));
        assert!(matches(&acme(), "PESA", Purchase::DEFAULT_FIELDS));
        assert!(matches(&acme(), "kca", Purchase::DEFAULT_FIELDS));
        assert!(!matches(&acme(), "acm", &[PurchaseField::PaymentMethod]));
    }

    #[test]
    fn absent_fields_are_skipped() {
        assert!(!matches(&acme(), "nakuru", &[PurchaseField::LocationOfOrigin]));
        assert!(matches(
            &acme(),
            "acme",
            &[PurchaseField::LocationOfOrigin, PurchaseField::SupplierName]
        ));
    }

    #[test]
    fn numbers_match_plain_decimal_text() {
        let p = acme();
        assert!(matches(&p, "63750", &[PurchaseField::TotalAmountPaid]));
        assert!(!matches(&p, "63,750", &[PurchaseField::TotalAmountPaid]));
        assert!(matches(&p, "42.5", &[PurchaseField::PricePerUnit]));
        assert!(matches(&p, "2025-04", &[PurchaseField::DateOfPurchase]));
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_query() {
        assert!(matches(&acme(), "Acme", &[PurchaseField::SupplierName]));
        assert!(!matches(&acme(), " Acme", &[PurchaseField::SupplierName]));
        assert!(matches(&acme(), "kca 1", &[PurchaseField::TruckNumberPlate]));
    }

    #[test]
    fn sale_defaults_cover_phone_and_note() {
        let s = Sale {
            customer_name: "Unga Mills".into(),
            driver_phone: "0712 345678".into(),
            date_of_sale: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            quantity_sold: Decimal::new(450, 0),
            number_of_bags: Decimal::new(5, 0),
            selling_price_per_unit: Decimal::new(4000, 0),
            expected_amount: Decimal::new(20000, 0),
            payment_method_sale: None,
            deposited_amount: Decimal::ZERO,
            cheque_paid: Decimal::ZERO,
            total_amount_received: Decimal::ZERO,
            delivery_method: DeliveryMethod::PickUp,
            comment: Quality::Poor,
            small_comment: Some("Wet bags at Eldoret".into()),
        };
        assert!(matches(&s, "345678", Sale::DEFAULT_FIELDS));
        assert!(matches(&s, "ELDORET", Sale::DEFAULT_FIELDS));
        assert!(matches(&s, "pick", Sale::DEFAULT_FIELDS));
        assert!(!matches(&s, "poor", Sale::DEFAULT_FIELDS));
        assert!(matches(&s, "poor", &[SaleField::Comment]));
        assert!(!matches(&s, "cheque", &[SaleField::PaymentMethod]));
    }

    #[test]
    fn filter_uses_default_fields_on_records() {
        let rows = vec![
            Record { id: 1, user_id: "u".into(), body: acme() },
            Record {
                id: 2,
                user_id: "u".into(),
                body: Purchase { supplier_name: "Baraka".into(), truck_number_plate: None, ..acme() },
            },
        ];
        let hits = filter(&rows, "bara");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
        assert_eq!(filter(&rows, "").len(), 2);
    }
}
