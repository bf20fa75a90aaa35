//! OrderCandidate - the order about to be placed.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ensure_non_negative, CafeId, ItemId, ValidationError};

/// One menu item in the pending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item_id: ItemId,
    pub name: String,
    /// Free-form menu category ("dessert", "milkshake", ...).
    pub category: String,
    /// Calories per unit.
    pub calories: i32,
    /// Price per unit.
    pub price: f64,
    pub quantity: u32,
}

impl OrderLine {
    /// Calories for the whole line (unit calories x quantity).
    pub fn subtotal_calories(&self) -> i64 {
        i64::from(self.calories) * i64::from(self.quantity)
    }

    /// Price for the whole line (unit price x quantity).
    pub fn subtotal_price(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    fn validate(&self, index: usize) -> Result<(), ValidationError> {
        if self.calories < 0 {
            return Err(ValidationError::negative_or_non_finite(
                format!("items[{}].calories", index),
                f64::from(self.calories),
            ));
        }
        ensure_non_negative(&format!("items[{}].price", index), self.price)?;
        if self.quantity == 0 {
            return Err(ValidationError::out_of_range(
                format!("items[{}].quantity", index),
                1,
                i32::MAX,
                0,
            ));
        }
        Ok(())
    }
}

/// The order the user is about to check out.
///
/// Totals are carried separately from the lines because the checkout flow
/// may fold fees or discounts into them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCandidate {
    pub cafe_id: CafeId,
    pub items: Vec<OrderLine>,
    pub total_price: f64,
    pub total_calories: i32,
}

impl OrderCandidate {
    /// Builds a candidate whose totals are the sum of its lines.
    pub fn from_lines(cafe_id: CafeId, items: Vec<OrderLine>) -> Result<Self, ValidationError> {
        let calories: i64 = items.iter().map(OrderLine::subtotal_calories).sum();
        let total_calories = i32::try_from(calories).map_err(|_| {
            ValidationError::invalid_format("total_calories", "sum exceeds i32 range")
        })?;
        let total_price = items.iter().map(OrderLine::subtotal_price).sum();

        let candidate = Self {
            cafe_id,
            items,
            total_price,
            total_calories,
        };
        candidate.validate()?;
        Ok(candidate)
    }

    /// Rejects empty orders and negative or non-finite quantities.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::empty_field("items"));
        }
        for (index, line) in self.items.iter().enumerate() {
            line.validate(index)?;
        }
        if self.total_calories < 0 {
            return Err(ValidationError::negative_or_non_finite(
                "total_calories",
                f64::from(self.total_calories),
            ));
        }
        ensure_non_negative("total_price", self.total_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(calories: i32, price: f64, quantity: u32) -> OrderLine {
        OrderLine {
            item_id: ItemId::new(),
            name: "Loaded Fries".to_string(),
            category: "sides".to_string(),
            calories,
            price,
            quantity,
        }
    }

    #[test]
    fn from_lines_sums_quantities() {
        let order =
            OrderCandidate::from_lines(CafeId::new(), vec![line(450, 6.5, 2), line(300, 4.0, 1)])
                .unwrap();

        assert_eq!(order.total_calories, 1200);
        assert!((order.total_price - 17.0).abs() < 1e-9);
        assert_eq!(order.items.iter().map(|l| l.quantity).sum::<u32>(), 3);
    }

    #[test]
    fn empty_order_is_rejected() {
        let err = OrderCandidate::from_lines(CafeId::new(), vec![]).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("items"));
    }

    #[test]
    fn negative_line_calories_are_rejected() {
        let err = OrderCandidate::from_lines(CafeId::new(), vec![line(-10, 3.0, 1)]).unwrap_err();
        assert_eq!(err.field(), "items[0].calories");
    }

    #[test]
    fn negative_line_price_is_rejected() {
        let err = OrderCandidate::from_lines(CafeId::new(), vec![line(100, -1.0, 1)]).unwrap_err();
        assert_eq!(err.field(), "items[0].price");
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err = OrderCandidate::from_lines(CafeId::new(), vec![line(100, 1.0, 0)]).unwrap_err();
        assert_eq!(err.field(), "items[0].quantity");
    }

    #[test]
    fn negative_totals_are_rejected() {
        let mut order = OrderCandidate::from_lines(CafeId::new(), vec![line(100, 2.0, 1)]).unwrap();
        order.total_price = -5.0;
        assert_eq!(order.validate().unwrap_err().field(), "total_price");

        order.total_price = 2.0;
        order.total_calories = -1;
        assert_eq!(order.validate().unwrap_err().field(), "total_calories");
    }

    #[test]
    fn nan_total_price_is_rejected() {
        let mut order = OrderCandidate::from_lines(CafeId::new(), vec![line(100, 2.0, 1)]).unwrap();
        order.total_price = f64::NAN;
        assert!(order.validate().is_err());
    }

    #[test]
    fn totals_may_differ_from_lines() {
        let mut order = OrderCandidate::from_lines(CafeId::new(), vec![line(100, 2.0, 1)]).unwrap();
        order.total_price = 4.99; // delivery fee folded in
        assert!(order.validate().is_ok());
    }

    #[test]
    fn uses_camel_case_json() {
        let order = OrderCandidate::from_lines(CafeId::new(), vec![line(100, 2.0, 1)]).unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("totalCalories").is_some());
        assert!(json["items"][0].get("itemId").is_some());
    }
}
