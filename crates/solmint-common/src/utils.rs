use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Utility functions for account address derivation
pub mod account_utils {
    use super::*;

    /// Derive the associated token account of `owner` for `mint` under the classic token program
    pub fn derive_associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
        spl_associated_token_account::get_associated_token_address_with_program_id(
            owner,
            mint,
            &spl_token::id(),
        )
    }
}

/// Mathematical utility functions for exact unit conversion
pub mod math_utils {
    use super::*;
    use solana_sdk::native_token::LAMPORTS_PER_SOL;

    /// Scale a whole-token supply to base units: `supply * 10^decimals`.
    ///
    /// The multiplication is done on an exact decimal, so large supplies are never
    /// rounded. Fails when the result does not fit a `u64` amount or when the supply
    /// carries more fractional digits than `decimals` can represent.
    pub fn scale_supply(supply: Decimal, decimals: u8) -> Result<u64, MathError> {
        if supply.is_sign_negative() && !supply.is_zero() {
            return Err(MathError::NegativeAmount);
        }
        let factor = 10u64
            .checked_pow(u32::from(decimals))
            .ok_or(MathError::Overflow)?;
        let scaled = supply
            .checked_mul(Decimal::from(factor))
            .ok_or(MathError::Overflow)?;
        if !scaled.fract().is_zero() {
            return Err(MathError::PrecisionLoss { decimals });
        }
        scaled.trunc().to_u64().ok_or(MathError::Overflow)
    }

    /// Convert lamports to SOL for display
    pub fn lamports_to_sol(lamports: u64) -> f64 {
        lamports as f64 / LAMPORTS_PER_SOL as f64
    }

    /// Amount still missing to reach `required`, zero when `available` covers it
    pub fn shortfall(required: u64, available: u64) -> u64 {
        required.saturating_sub(available)
    }
}

/// Error codes for shared utilities
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("Mathematical overflow occurred")]
    Overflow,
    #[error("Amount must not be negative")]
    NegativeAmount,
    #[error("Amount has more fractional digits than {decimals} decimals allow")]
    PrecisionLoss { decimals: u8 },
}

#[cfg(test)]
mod tests {
    use super::math_utils::*;
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    #[test]
    fn scales_billion_supply_at_nine_decimals_exactly() {
        let amount = scale_supply(Decimal::from(1_000_000_000u64), 9).unwrap();
        assert_eq!(amount, 1_000_000_000_000_000_000);
    }

    #[test]
    fn scales_fractional_supply_when_representable() {
        let supply = Decimal::from_str("1.5").unwrap();
        assert_eq!(scale_supply(supply, 9).unwrap(), 1_500_000_000);
        assert_eq!(scale_supply(supply, 1).unwrap(), 15);
    }

    #[test]
    fn rejects_fraction_finer_than_decimals() {
        let supply = Decimal::from_str("0.125").unwrap();
        assert_eq!(
            scale_supply(supply, 2),
            Err(MathError::PrecisionLoss { decimals: 2 })
        );
    }

    #[test]
    fn rejects_amounts_beyond_u64() {
        // 10^11 tokens at 9 decimals is 10^20 base units.
        let supply = Decimal::from(100_000_000_000u64);
        assert_eq!(scale_supply(supply, 9), Err(MathError::Overflow));
    }

    #[test]
    fn zero_supply_scales_to_zero() {
        assert_eq!(scale_supply(Decimal::ZERO, 6).unwrap(), 0);
    }

    #[test]
    fn shortfall_saturates() {
        assert_eq!(shortfall(5_000_000, 1_000_000), 4_000_000);
        assert_eq!(shortfall(5_000_000, 9_000_000), 0);
    }

    #[test]
    fn lamports_convert_to_sol() {
        assert!((lamports_to_sol(5_000_000) - 0.005).abs() < f64::EPSILON);
    }

    #[test]
    fn associated_address_is_deterministic() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let a = account_utils::derive_associated_token_address(&owner, &mint);
        let b = account_utils::derive_associated_token_address(&owner, &mint);
        assert_eq!(a, b);
        assert_ne!(a, account_utils::derive_associated_token_address(&mint, &owner));
    }

    proptest! {
        #[test]
        fn whole_supplies_scale_like_integer_multiplication(supply in 1u64..=18_000_000_000u64, decimals in 0u8..=9) {
            let expected = u128::from(supply) * 10u128.pow(u32::from(decimals));
            match scale_supply(Decimal::from(supply), decimals) {
                Ok(amount) => prop_assert_eq!(u128::from(amount), expected),
                Err(e) => {
                    prop_assert_eq!(e, MathError::Overflow);
                    prop_assert!(expected > u128::from(u64::MAX));
                }
            }
        }
    }
}
