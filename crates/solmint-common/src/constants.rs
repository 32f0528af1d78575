/// Public RPC endpoint for devnet.
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

/// Public RPC endpoint for mainnet-beta.
pub const MAINNET_BETA_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Base URL of the block explorer.
pub const EXPLORER_BASE_URL: &str = "https://explorer.solana.com";

/// Fee constants (all in lamports)
pub const ESTIMATED_TX_FEE_LAMPORTS: u64 = 10_000; // signature fees for one transaction
pub const ESTIMATED_TOKEN_ACCOUNT_FEE_LAMPORTS: u64 = 2_039_280; // rent for one token account
pub const FALLBACK_FEE_ESTIMATE_LAMPORTS: u64 = 5_000_000; // 0.005 SOL when rent lookup fails

/// Token configuration limits
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_DECIMALS: u8 = 9;
pub const VERY_HIGH_SUPPLY_THRESHOLD: u64 = 1_000_000_000_000; // whole tokens

/// Confirmation polling
pub const CONFIRMATION_MAX_ATTEMPTS: u32 = 5;
pub const CONFIRMATION_RETRY_DELAY_MS: u64 = 2_000;

/// Substring the wallet providers use in their rejection messages.
pub const USER_REJECTED_MARKER: &str = "User rejected";
