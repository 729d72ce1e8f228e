use crate::domain::line_item::{LineItem, Total};
use crate::domain::payment_method::PaymentMethodId;
use crate::domain::ports::ProcessorCredentials;
use crate::error::Result;
use crate::infrastructure::scripted::ScriptedResponse;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Method ids loaded when the configuration does not list any.
pub const DEFAULT_METHODS: [&str; 5] = ["eps", "wechat", "apple-pay", "card", "paypal"];

/// Checkout settings, read from a JSON file. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    pub currency: String,
    pub items: Vec<LineItem>,
    pub processor: ProcessorCredentials,
    /// Methods to offer, in display order.
    pub methods: Vec<PaymentMethodId>,
    pub responses: HashMap<String, ScriptedResponse>,
    pub translations: HashMap<String, String>,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            currency: "EUR".to_string(),
            items: Vec::new(),
            processor: ProcessorCredentials::default(),
            methods: DEFAULT_METHODS.into_iter().map(PaymentMethodId::from).collect(),
            responses: HashMap::new(),
            translations: HashMap::new(),
        }
    }
}

impl CheckoutConfig {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn total(&self) -> Result<Total> {
        Total::from_items(&self.items, &self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CheckoutConfig::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(config.currency, "EUR");
        let ids: Vec<&str> = config.methods.iter().map(|m| m.as_str()).collect();
        assert_eq!(ids, DEFAULT_METHODS);
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "currency": "USD",
            "items": [{"id": "plan", "label": "Personal plan", "amount": "48.00"}],
            "processor": {"publishable_key": "pk_test_123"},
            "methods": ["wechat"],
            "responses": {"wechat": {"redirect_url": "https://pay.example/w"}},
            "translations": {"Your name": "Ihr Name"}
        }"#;
        let config = CheckoutConfig::from_reader(json.as_bytes()).unwrap();

        assert_eq!(config.processor.publishable_key, "pk_test_123");
        assert_eq!(config.methods, vec![PaymentMethodId::from("wechat")]);
        let total = config.total().unwrap();
        assert_eq!(total.amount, dec!(48.00));
        assert_eq!(total.display_value, "USD 48.00");
        assert_eq!(
            config.responses["wechat"].redirect_url.as_deref(),
            Some("https://pay.example/w")
        );
    }

    #[test]
    fn test_overflowing_cart_fails() {
        let json = r#"{
            "items": [
                {"id": "a", "label": "A", "amount": "79228162514264337593543950335"},
                {"id": "b", "label": "B", "amount": "79228162514264337593543950335"}
            ]
        }"#;
        let config = CheckoutConfig::from_reader(json.as_bytes()).unwrap();
        assert!(matches!(
            config.total(),
            Err(crate::error::CheckoutError::AmountOverflow(_))
        ));
    }

    #[test]
    fn test_malformed_config() {
        assert!(CheckoutConfig::from_reader("{\"items\": 3}".as_bytes()).is_err());
    }
}
