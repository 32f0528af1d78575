/// This crate provides shared constants and small helpers
/// used by the token-creation pipeline and its command-line front end.
/// Keeping fee constants and endpoints here prevents the two from drifting.
pub mod constants;

/// Utility functions for address derivation and exact unit arithmetic
pub mod utils;
