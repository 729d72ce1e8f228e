use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Formats an amount the way the pay button shows it, e.g. `EUR 48.00`.
pub fn display_amount(currency: &str, amount: Decimal) -> String {
    format!("{} {:.2}", currency, amount.round_dp(2))
}

/// A purchasable item in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub label: String,
    pub amount: Decimal,
}

/// Sum of all line items, with the string shown to the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Total {
    pub label: String,
    pub currency: String,
    pub amount: Decimal,
    pub display_value: String,
}

impl Total {
    pub fn from_items(items: &[LineItem], currency: &str) -> Result<Self> {
        let amount = items.iter().try_fold(Decimal::ZERO, |sum, item| {
            sum.checked_add(item.amount)
                .ok_or_else(|| CheckoutError::AmountOverflow(item.id.clone()))
        })?;
        Ok(Self {
            label: "Total".to_string(),
            currency: currency.to_string(),
            amount,
            display_value: display_amount(currency, amount),
        })
    }
}
