//! Security heuristics over a token configuration.
//!
//! Findings are advisory: they never block creation, they feed the review step and the
//! security score shown to the user.

use rust_decimal::Decimal;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use solmint_common::constants::VERY_HIGH_SUPPLY_THRESHOLD;
use std::str::FromStr;

use crate::config::TokenConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Points deducted from the score of 100.
    pub fn penalty(&self) -> i32 {
        match self {
            RiskLevel::None => 0,
            RiskLevel::Low => 5,
            RiskLevel::Medium => 10,
            RiskLevel::High => 20,
            RiskLevel::Critical => 40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityIssue {
    pub id: &'static str,
    pub title: &'static str,
    pub description: String,
    pub risk_level: RiskLevel,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityReport {
    pub issues: Vec<SecurityIssue>,
    pub score: u8,
    pub summary: &'static str,
}

fn issue(
    id: &'static str,
    title: &'static str,
    description: impl Into<String>,
    risk_level: RiskLevel,
    recommendation: &'static str,
) -> SecurityIssue {
    SecurityIssue {
        id,
        title,
        description: description.into(),
        risk_level,
        recommendation,
    }
}

fn is_valid_address(address: &str) -> bool {
    Pubkey::from_str(address).is_ok()
}

pub fn validate_token_security(config: &TokenConfig) -> Vec<SecurityIssue> {
    let mut issues = Vec::new();

    if config.metadata.description.is_empty() {
        issues.push(issue(
            "missing-description",
            "Missing Token Description",
            "Your token does not have a description, which reduces transparency and trust.",
            RiskLevel::Low,
            "Add a clear description explaining the purpose and utility of your token.",
        ));
    }

    if config.metadata.image.is_empty() {
        issues.push(issue(
            "missing-image",
            "Missing Token Image",
            "Your token does not have an image, which makes it harder to recognize in wallets and exchanges.",
            RiskLevel::Low,
            "Add a distinctive image or logo for your token.",
        ));
    }

    match config.configured_mint_authority() {
        Some(address) if !is_valid_address(address) => issues.push(issue(
            "invalid-mint-authority",
            "Invalid Mint Authority",
            "The mint authority address is not a valid Solana public key.",
            RiskLevel::Critical,
            "Enter a valid Solana address for the mint authority.",
        )),
        Some(_) => {}
        None => issues.push(issue(
            "default-mint-authority",
            "Default Mint Authority",
            "You are using your wallet as the mint authority. This means you will be able to mint more tokens in the future.",
            RiskLevel::Medium,
            "Consider setting a null mint authority after initial distribution to create a fixed supply token.",
        )),
    }

    match config.configured_freeze_authority() {
        Some(address) if !is_valid_address(address) => issues.push(issue(
            "invalid-freeze-authority",
            "Invalid Freeze Authority",
            "The freeze authority address is not a valid Solana public key.",
            RiskLevel::Critical,
            "Enter a valid Solana address for the freeze authority.",
        )),
        Some(_) => {}
        None => issues.push(issue(
            "default-freeze-authority",
            "Default Freeze Authority",
            "You are using your wallet as the freeze authority. This means you will be able to freeze token accounts in the future.",
            RiskLevel::Low,
            "This is generally acceptable, but consider if your use case requires this capability.",
        )),
    }

    match config.decimals {
        0 => issues.push(issue(
            "zero-decimals",
            "Zero Decimals",
            "Your token has 0 decimals, making it non-divisible (whole units only).",
            RiskLevel::None,
            "This is appropriate for NFT-like tokens or whole-unit items, but not for typical cryptocurrencies.",
        )),
        d if d < 6 => issues.push(issue(
            "low-decimals",
            "Low Decimal Precision",
            format!(
                "Your token has {} decimals, which is lower than the standard 6-9 decimals used by most tokens.",
                d
            ),
            RiskLevel::Low,
            "Consider using 6 decimals (like USDC) or 9 decimals (like SOL) for better compatibility.",
        )),
        d if d > 9 => issues.push(issue(
            "high-decimals",
            "High Decimal Precision",
            format!(
                "Your token has {} decimals, which is higher than the standard 9 decimals used by most tokens.",
                d
            ),
            RiskLevel::Medium,
            "Use 9 decimals (like SOL) for standard compatibility. Higher values may cause display issues in some wallets.",
        )),
        _ => {}
    }

    if config.initial_supply > Decimal::from(VERY_HIGH_SUPPLY_THRESHOLD) {
        issues.push(issue(
            "very-high-supply",
            "Very High Initial Supply",
            "Your token has an extremely high initial supply, which may affect perception of token value.",
            RiskLevel::Medium,
            "Consider reducing the initial supply or adjusting decimals to achieve desired per-token pricing.",
        ));
    }

    issues
}

pub fn generate_security_report(config: &TokenConfig) -> SecurityReport {
    let issues = validate_token_security(config);
    let penalty: i32 = issues.iter().map(|i| i.risk_level.penalty()).sum();
    let score = (100 - penalty).clamp(0, 100) as u8;

    let summary = match score {
        90..=100 => "Excellent security configuration. Your token is well-configured with minimal security concerns.",
        70..=89 => "Good security configuration. Your token has some minor security considerations to address.",
        50..=69 => "Moderate security configuration. Your token has several security issues that should be addressed.",
        30..=49 => "Poor security configuration. Your token has significant security issues that must be addressed.",
        _ => "Critical security issues detected. Your token configuration has severe problems that must be fixed before deployment.",
    };

    SecurityReport {
        issues,
        score,
        summary,
    }
}
