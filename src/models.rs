// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Declares a closed set of labels stored as text and accepted loosely on input
/// (case, spaces, dashes and underscores are ignored when parsing).
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = squash(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| squash(v.as_str()) == wanted)
                    .ok_or_else(|| LedgerError::InvalidValue {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

text_enum!(
    /// How a supplier was paid.
    PaymentMethod, "payment method", {
        Cash => "Cash",
        MPesa => "M-Pesa",
        BankTransfer => "Bank Transfer",
    }
);

text_enum!(
    /// How a customer paid. Cheques are only taken on sales.
    SalePaymentMethod, "sale payment method", {
        Cash => "Cash",
        MPesa => "M-Pesa",
        BankTransfer => "Bank Transfer",
        Cheque => "Cheque",
    }
);

text_enum!(DeliveryMethod, "delivery method", {
    Delivery => "Delivery",
    PickUp => "Pick-up",
});

text_enum!(
    /// Quality remark recorded against a sale.
    Quality, "comment", {
        Good => "Good",
        Poor => "Poor",
        Bad => "Bad",
    }
);

/// A persisted row: store-assigned id and owning user around the record body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: i64,
    pub user_id: String,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.body
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub supplier_name: String,
    pub location_of_origin: Option<String>,
    pub date_of_purchase: NaiveDate,
    pub quantity_bought: Decimal, // kg
    pub price_per_unit: Decimal,
    pub total_amount_paid: Decimal,
    pub payment_method: PaymentMethod,
    pub truck_number_plate: Option<String>,
    pub origin_weight: Option<Decimal>,
    pub destination_weight: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub customer_name: String,
    pub driver_phone: String,
    pub date_of_sale: NaiveDate,
    pub quantity_sold: Decimal, // kg
    pub number_of_bags: Decimal,
    pub selling_price_per_unit: Decimal, // per bag
    pub expected_amount: Decimal,
    pub payment_method_sale: Option<SalePaymentMethod>,
    pub deposited_amount: Decimal,
    pub cheque_paid: Decimal,
    pub total_amount_received: Decimal,
    pub delivery_method: DeliveryMethod,
    pub comment: Quality,
    pub small_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborerPayment {
    pub date: NaiveDate,
    pub number_of_laborers: u32,
    pub price_per_laborer: Decimal,
    pub total_labour: Decimal,
}

/// Raw purchase fields as entered, before derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseInput {
    pub supplier_name: String,
    pub location_of_origin: Option<String>,
    pub date_of_purchase: NaiveDate,
    pub quantity_bought: Option<Decimal>,
    pub price_per_unit: Option<Decimal>,
    pub payment_method: PaymentMethod,
    pub truck_number_plate: Option<String>,
    pub origin_weight: Option<Decimal>,
    pub destination_weight: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleInput {
    pub customer_name: String,
    pub driver_phone: String,
    pub date_of_sale: NaiveDate,
    pub quantity_sold: Option<Decimal>,
    pub selling_price_per_unit: Option<Decimal>,
    pub payment_method_sale: Option<SalePaymentMethod>,
    pub deposited_amount: Option<Decimal>,
    pub cheque_paid: Option<Decimal>,
    pub delivery_method: DeliveryMethod,
    pub comment: Quality,
    pub small_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaborerInput {
    pub date: NaiveDate,
    pub number_of_laborers: Option<u32>,
    pub total_labour: Option<Decimal>,
}

impl From<&Purchase> for PurchaseInput {
    fn from(p: &Purchase) -> Self {
        PurchaseInput {
            supplier_name: p.supplier_name.clone(),
            location_of_origin: p.location_of_origin.clone(),
            date_of_purchase: p.date_of_purchase,
            quantity_bought: Some(p.quantity_bought),
            price_per_unit: Some(p.price_per_unit),
            payment_method: p.payment_method,
            truck_number_plate: p.truck_number_plate.clone(),
            origin_weight: p.origin_weight,
            destination_weight: p.destination_weight,
        }
    }
}

impl From<&Sale> for SaleInput {
    fn from(s: &Sale) -> Self {
        SaleInput {
            customer_name: s.customer_name.clone(),
            driver_phone: s.driver_phone.clone(),
            date_of_sale: s.date_of_sale,
            quantity_sold: Some(s.quantity_sold),
            selling_price_per_unit: Some(s.selling_price_per_unit),
            payment_method_sale: s.payment_method_sale,
            deposited_amount: Some(s.deposited_amount),
            cheque_paid: Some(s.cheque_paid),
            delivery_method: s.delivery_method,
            comment: s.comment,
            small_comment: s.small_comment.clone(),
        }
    }
}

impl From<&LaborerPayment> for LaborerInput {
    fn from(l: &LaborerPayment) -> Self {
        LaborerInput {
            date: l.date,
            number_of_laborers: Some(l.number_of_laborers),
            total_labour: Some(l.total_labour),
        }
    }
}
