// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived fields for purchases, sales and laborer payments.
//!
//! Every function here is total: an absent operand counts as zero, a
//! division with a zero (or absent) divisor yields zero, and products or
//! differences past the `Decimal` range saturate instead of panicking.
//! Whether an input is acceptable at all is decided by [`crate::validate`],
//! not here.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    LaborerInput, LaborerPayment, Purchase, PurchaseInput, Sale, SaleInput,
};

/// Kilograms in one bag.
pub const BAG_KG: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

/// Rounds to 2 decimal places, halves away from zero.
pub fn round2(x: Decimal) -> Decimal {
    x.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `quantity × price`, unrounded.
pub fn purchase_total(quantity: Option<Decimal>, price_per_unit: Option<Decimal>) -> Decimal {
    quantity.unwrap_or_default().saturating_mul(price_per_unit.unwrap_or_default())
}

pub fn bags_from_quantity(quantity_sold: Option<Decimal>) -> Decimal {
    match quantity_sold {
        Some(q) if q > Decimal::ZERO => round2(q / BAG_KG),
        _ => Decimal::ZERO,
    }
}

/// `round2(bags × price)` when both are positive, zero otherwise.
pub fn sale_expected_amount(bags: Option<Decimal>, price_per_unit: Option<Decimal>) -> Decimal {
    match (bags, price_per_unit) {
        (Some(b), Some(p)) if b > Decimal::ZERO && p > Decimal::ZERO => round2(b.saturating_mul(p)),
        _ => Decimal::ZERO,
    }
}

/// Gross proceeds less labor paid out of them. Negative results are kept.
pub fn sale_net_amount(cheque_amount: Option<Decimal>, deposited_amount: Option<Decimal>) -> Decimal {
    cheque_amount.unwrap_or_default().saturating_sub(deposited_amount.unwrap_or_default())
}

pub fn laborer_price_per_unit(total_cost: Option<Decimal>, laborer_count: Option<u32>) -> Decimal {
    match laborer_count {
        Some(n) if n > 0 => round2(total_cost.unwrap_or_default() / Decimal::from(n)),
        _ => Decimal::ZERO,
    }
}

impl PurchaseInput {
    pub fn derive(&self) -> Purchase {
        Purchase {
            supplier_name: self.supplier_name.trim().to_string(),
            location_of_origin: self.location_of_origin.clone(),
            date_of_purchase: self.date_of_purchase,
            quantity_bought: self.quantity_bought.unwrap_or_default(),
            price_per_unit: self.price_per_unit.unwrap_or_default(),
            total_amount_paid: purchase_total(self.quantity_bought, self.price_per_unit),
            payment_method: self.payment_method,
            truck_number_plate: self.truck_number_plate.clone(),
            origin_weight: self.origin_weight,
            destination_weight: self.destination_weight,
        }
    }
}

impl SaleInput {
    pub fn derive(&self) -> Sale {
        let bags = bags_from_quantity(self.quantity_sold);
        let deposited = self.deposited_amount.unwrap_or_default();
        let cheque = self.cheque_paid.unwrap_or_default();
        Sale {
            customer_name: self.customer_name.trim().to_string(),
            driver_phone: self.driver_phone.trim().to_string(),
            date_of_sale: self.date_of_sale,
            quantity_sold: self.quantity_sold.unwrap_or_default(),
            number_of_bags: bags,
            selling_price_per_unit: self.selling_price_per_unit.unwrap_or_default(),
            expected_amount: sale_expected_amount(Some(bags), self.selling_price_per_unit),
            payment_method_sale: self.payment_method_sale,
            deposited_amount: deposited,
            cheque_paid: cheque,
            total_amount_received: sale_net_amount(Some(cheque), Some(deposited)),
            delivery_method: self.delivery_method,
            comment: self.comment,
            small_comment: self.small_comment.clone(),
        }
    }
}

impl LaborerInput {
    pub fn derive(&self) -> LaborerPayment {
        LaborerPayment {
            date: self.date,
            number_of_laborers: self.number_of_laborers.unwrap_or_default(),
            price_per_laborer: laborer_price_per_unit(self.total_labour, self.number_of_laborers),
            total_labour: self.total_labour.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeliveryMethod, PaymentMethod, Quality};
    use chrono::NaiveDate;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn round2_is_half_away_from_zero() {
        assert_eq!(round2(d("1.005")), d("1.01"));
        assert_eq!(round2(d("-1.005")), d("-1.01"));
        assert_eq!(round2(d("2.344")), d("2.34"));
        assert_eq!(round2(d("2.5")), d("2.50"));
    }

    #[test]
    fn purchase_total_is_unrounded_product() {
        assert_eq!(purchase_total(Some(d("500")), Some(d("40"))), d("20000"));
        assert_eq!(purchase_total(Some(d("1.333")), Some(d("3"))), d("3.999"));
        assert_eq!(purchase_total(None, Some(d("40"))), Decimal::ZERO);
        assert_eq!(purchase_total(Some(d("0")), Some(d("40"))), Decimal::ZERO);
    }

    #[test]
    fn bags_from_quantity_divides_by_ninety() {
        assert_eq!(bags_from_quantity(Some(d("450"))), d("5"));
        assert_eq!(bags_from_quantity(Some(d("100"))), d("1.11"));
        assert_eq!(bags_from_quantity(Some(d("1000"))), d("11.11"));
        assert_eq!(bags_from_quantity(Some(Decimal::ZERO)), Decimal::ZERO);
        assert_eq!(bags_from_quantity(Some(d("-90"))), Decimal::ZERO);
        assert_eq!(bags_from_quantity(None), Decimal::ZERO);
    }

    #[test]
    fn expected_amount_needs_both_operands() {
        assert_eq!(sale_expected_amount(Some(d("5")), Some(d("4000"))), d("20000"));
        assert_eq!(sale_expected_amount(Some(d("1.11")), Some(d("3333.33"))), d("3700.00"));
        assert_eq!(sale_expected_amount(None, Some(d("4000"))), Decimal::ZERO);
        assert_eq!(sale_expected_amount(Some(d("5")), Some(Decimal::ZERO)), Decimal::ZERO);
    }

    #[test]
    fn net_amount_may_go_negative() {
        assert_eq!(sale_net_amount(Some(d("500")), Some(d("700"))), d("-200"));
        assert_eq!(sale_net_amount(Some(d("500")), None), d("500"));
    }

    #[test]
    fn out_of_range_results_saturate() {
        assert_eq!(purchase_total(Some(Decimal::MAX), Some(d("2"))), Decimal::MAX);
        assert_eq!(sale_expected_amount(Some(Decimal::MAX), Some(d("4000"))), Decimal::MAX);
        assert_eq!(sale_net_amount(Some(Decimal::MIN), Some(d("1"))), Decimal::MIN);
    }

    #[test]
    fn laborer_price_rounds_and_guards_zero() {
        assert_eq!(laborer_price_per_unit(Some(d("1000")), Some(4)), d("250"));
        assert_eq!(laborer_price_per_unit(Some(d("100")), Some(3)), d("33.33"));
        assert_eq!(laborer_price_per_unit(Some(d("200")), Some(3)), d("66.67"));
        assert_eq!(laborer_price_per_unit(Some(d("100")), Some(0)), Decimal::ZERO);
        assert_eq!(laborer_price_per_unit(Some(d("100")), None), Decimal::ZERO);
    }

    #[test]
    fn end_to_end_derivation() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let purchase = PurchaseInput {
            supplier_name: " Acme ".into(),
            location_of_origin: None,
            date_of_purchase: day,
            quantity_bought: Some(d("500")),
            price_per_unit: Some(d("40")),
            payment_method: PaymentMethod::Cash,
            truck_number_plate: None,
            origin_weight: None,
            destination_weight: None,
        }
        .derive();
        assert_eq!(purchase.total_amount_paid, d("20000"));
        assert_eq!(purchase.supplier_name, "Acme");

        let sale = SaleInput {
            customer_name: "Mill".into(),
            driver_phone: "0700".into(),
            date_of_sale: day,
            quantity_sold: Some(d("450")),
            selling_price_per_unit: Some(d("4000")),
            payment_method_sale: None,
            deposited_amount: Some(d("1500")),
            cheque_paid: Some(d("20000")),
            delivery_method: DeliveryMethod::Delivery,
            comment: Quality::Good,
            small_comment: None,
        }
        .derive();
        assert_eq!(sale.number_of_bags, d("5.0"));
        assert_eq!(sale.expected_amount, d("20000.0"));
        assert_eq!(sale.total_amount_received, d("18500"));

        let labor = LaborerInput {
            date: day,
            number_of_laborers: Some(9),
            total_labour: Some(d("4500")),
        }
        .derive();
        assert_eq!(labor.price_per_laborer, d("500.0"));
    }
}
