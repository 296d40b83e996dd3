//! # Configuration State
//!
//! Store identity and currency presentation settings.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`VIREO_*`)
//! 2. Defaults (this file)
//!
//! Branding beyond these fields (logos, themes, receipt layout) belongs
//! to the shell and the backend settings screen, not here.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no lock is needed.

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (displayed in the header and on receipts)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Vireo Dev Store"
    /// - Currency: USD ($), 2 decimals
    fn default() -> Self {
        ConfigState {
            store_name: "Vireo Dev Store".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `VIREO_STORE_NAME`: Override store name
    /// - `VIREO_CURRENCY_CODE`: Override ISO currency code
    /// - `VIREO_CURRENCY_SYMBOL`: Override display symbol
    pub fn from_env() -> Self {
        let mut config = ConfigState::default();

        if let Ok(store_name) = std::env::var("VIREO_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(code) = std::env::var("VIREO_CURRENCY_CODE") {
            config.currency_code = code;
        }

        if let Ok(symbol) = std::env::var("VIREO_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Formats a cent amount as a currency string.
    ///
    /// This is the single presentation point where totals get their
    /// 2-decimal rounding. All arithmetic upstream stays in integer
    /// cents, so nothing compounds.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1197), "$11.97");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
