use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use solmint_core::{ConfirmationPolicy, Network};
use std::path::Path;
use std::time::Duration;
use std::fs;

/// Operator configuration loaded from TOML. Every field has a default so the file is optional.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Cluster to create tokens on
    pub network: Network,

    /// Custom RPC endpoint; the public endpoint of `network` when absent
    pub rpc_url: Option<String>,

    /// Payer keypair file
    pub keypair_path: String,

    /// File holding the completion API key
    pub api_key_path: String,

    /// Completion model name
    pub model: String,

    /// Confirmation polling
    pub confirmation: ConfirmationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Polls before giving up
    pub max_attempts: u32,

    /// Delay between polls in milliseconds
    pub delay_ms: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            network: Network::Devnet,
            rpc_url: None,
            keypair_path: "~/.config/solana/id.json".to_string(),
            api_key_path: "~/.api-gemini".to_string(),
            model: "gemini-2.5-pro".to_string(),
            confirmation: ConfirmationConfig::default(),
        }
    }
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        let policy = ConfirmationPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            delay_ms: policy.delay.as_millis() as u64,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file, falling back to defaults when it does not exist
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path).to_string();
        if !Path::new(&expanded).exists() {
            log::info!("No config file at {}, using defaults", expanded);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&expanded)
            .with_context(|| format!("Failed to read config file {}", expanded))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", expanded))?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.confirmation.max_attempts == 0 {
            bail!("confirmation.max_attempts must be greater than 0");
        }
        if self.confirmation.delay_ms > 60_000 {
            bail!("confirmation.delay_ms must be at most 60000");
        }
        if let Some(url) = &self.rpc_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("rpc_url must be an http(s) URL, got {}", url);
            }
        }
        Ok(())
    }

    /// Apply command-line flags on top of the file values.
    ///
    /// A network given without an RPC URL drops any RPC URL from the file, which points
    /// at the cluster the file was written for.
    pub fn apply_overrides(
        &mut self,
        network: Option<Network>,
        rpc_url: Option<String>,
        keypair_path: Option<String>,
    ) -> Result<()> {
        if let Some(network) = network {
            self.network = network;
            if rpc_url.is_none() {
                self.rpc_url = None;
            }
        }
        if let Some(url) = rpc_url {
            self.rpc_url = Some(url);
        }
        if let Some(path) = keypair_path {
            self.keypair_path = path;
        }
        self.validate()
    }

    pub fn rpc_url(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| self.network.rpc_endpoint().to_string())
    }

    pub fn confirmation_policy(&self) -> ConfirmationPolicy {
        ConfirmationPolicy {
            max_attempts: self.confirmation.max_attempts,
            delay: Duration::from_millis(self.confirmation.delay_ms),
            ..ConfirmationPolicy::default()
        }
    }

    pub fn expanded_keypair_path(&self) -> String {
        shellexpand::tilde(&self.keypair_path).to_string()
    }

    pub fn expanded_api_key_path(&self) -> String {
        shellexpand::tilde(&self.api_key_path).to_string()
    }
}
