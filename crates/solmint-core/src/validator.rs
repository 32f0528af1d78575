//! Pre-flight checks on a [`TokenConfig`].
//!
//! Every rule is evaluated so the user sees all problems at once.

use rust_decimal::Decimal;
use serde::Serialize;
use solmint_common::constants::{MAX_DECIMALS, MAX_SYMBOL_LENGTH};

use crate::config::TokenConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

pub fn validate_token_config(config: &TokenConfig) -> ValidationResult {
    let mut errors = mint_parameter_errors(config);

    if config.initial_supply <= Decimal::ZERO {
        errors.push("Initial supply must be greater than 0".to_string());
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Same rules as [`validate_token_config`], except that a zero initial supply is accepted.
/// A negative supply is still rejected.
pub fn validate_mint_parameters(config: &TokenConfig) -> ValidationResult {
    let mut errors = mint_parameter_errors(config);

    if config.initial_supply < Decimal::ZERO {
        errors.push("Initial supply cannot be negative".to_string());
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn mint_parameter_errors(config: &TokenConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.name.is_empty() {
        errors.push("Token name is required".to_string());
    }

    if config.symbol.is_empty() {
        errors.push("Token symbol is required".to_string());
    } else if config.symbol.chars().count() > MAX_SYMBOL_LENGTH {
        errors.push(format!(
            "Token symbol must be {} characters or less",
            MAX_SYMBOL_LENGTH
        ));
    }

    if config.decimals > MAX_DECIMALS {
        errors.push(format!("Decimals must be between 0 and {}", MAX_DECIMALS));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid() -> TokenConfig {
        TokenConfig::new("Test Token", "TEST", 9, 1_000_000_000u64)
    }

    #[test]
    fn valid_config_has_no_errors() {
        let result = validate_token_config(&valid());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn empty_name_and_symbol_reported_together() {
        let mut config = valid();
        config.name.clear();
        config.symbol.clear();
        let result = validate_token_config(&config);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Token name is required", "Token symbol is required"]
        );
    }

    #[test]
    fn long_symbol_rejected() {
        let mut config = valid();
        config.symbol = "ABCDEFGHIJK".to_string();
        let result = validate_token_config(&config);
        assert_eq!(result.errors, vec!["Token symbol must be 10 characters or less"]);

        config.symbol = "ABCDEFGHIJ".to_string();
        assert!(validate_token_config(&config).is_valid);
    }

    #[test]
    fn every_rule_fires_at_once() {
        let mut config = valid();
        config.name.clear();
        config.symbol = "WAYTOOLONGSYMBOL".to_string();
        config.decimals = 12;
        config.initial_supply = Decimal::ZERO;
        let result = validate_token_config(&config);
        assert_eq!(result.errors.len(), 4);
    }

    #[test]
    fn negative_supply_rejected() {
        let mut config = valid();
        config.initial_supply = Decimal::from(-5);
        let result = validate_token_config(&config);
        assert_eq!(result.errors, vec!["Initial supply must be greater than 0"]);
    }

    proptest! {
        #[test]
        fn decimals_outside_range_always_invalid(decimals in 10u8..=u8::MAX) {
            let mut config = valid();
            config.decimals = decimals;
            let result = validate_token_config(&config);
            prop_assert!(!result.is_valid);
            prop_assert!(result.errors.contains(&"Decimals must be between 0 and 9".to_string()));
        }

        #[test]
        fn well_formed_configs_always_valid(
            name in "[A-Za-z ]{1,32}",
            symbol in "[A-Z]{1,10}",
            decimals in 0u8..=9,
            supply in 1u64..u64::MAX,
        ) {
            let config = TokenConfig::new(&name, &symbol, decimals, supply);
            let result = validate_token_config(&config);
            prop_assert!(result.is_valid);
            prop_assert!(result.errors.is_empty());
        }
    }

    #[test]
    fn mint_parameters_allow_zero_supply_only() {
        let zero = TokenConfig::new("Test Token", "TEST", 9, 0u64);
        assert!(validate_mint_parameters(&zero).is_valid);
        assert!(!validate_token_config(&zero).is_valid);

        let negative = TokenConfig::new("Test Token", "TEST", 9, Decimal::NEGATIVE_ONE);
        assert_eq!(
            validate_mint_parameters(&negative).errors,
            vec!["Initial supply cannot be negative".to_string()]
        );

        let broken = TokenConfig::new("", "WAYTOOLONGSYMBOL", 12, 0u64);
        assert_eq!(validate_mint_parameters(&broken).errors.len(), 3);
    }
}
