mod assistant;
mod config;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use solana_sdk::signature::{read_keypair_file, Signer};
use solmint_common::utils::math_utils::lamports_to_sol;
use solmint_core::{
    check_token_exists, estimate_token_creation_fees, generate_security_report,
    token_explorer_url, transaction_explorer_url, validate_token_config, AnalyticsEvent,
    AnalyticsEventType, AnalyticsSink, AuthorityMode, InMemoryAnalytics, KeypairWallet, Network,
    RiskLevel, RpcConnection, SolanaRpc, TokenConfig, TokenCreator, TokenMetadata,
};
use std::fs;
use std::sync::Arc;

use assistant::{AssistantSession, CompletionClient};
use config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "solmint")]
#[command(about = "Create SPL tokens on Solana")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "solmint.toml")]
    config: String,

    /// Cluster to use, overrides the configuration file
    #[arg(short, long)]
    network: Option<Network>,

    /// RPC URL, overrides the configuration file
    #[arg(long)]
    rpc_url: Option<String>,

    /// Payer keypair file, overrides the configuration file
    #[arg(short, long)]
    keypair: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new token paid for by the configured keypair
    Create {
        #[command(flatten)]
        token: TokenArgs,

        /// Apply the configured mint/freeze authorities instead of the payer
        #[arg(long)]
        configured_authorities: bool,

        /// Required to create a token on mainnet-beta
        #[arg(long)]
        yes: bool,
    },
    /// Estimate the lamports needed to create a token
    Estimate {
        #[arg(long, default_value_t = 9)]
        decimals: u8,
    },
    /// Check a token configuration without touching the network
    Validate {
        #[command(flatten)]
        token: TokenArgs,
    },
    /// Print the security report for a token configuration
    Audit {
        #[command(flatten)]
        token: TokenArgs,
    },
    /// Check whether a mint account exists
    Check { address: String },
    /// Ask the completion service for a token configuration
    Suggest {
        /// Project description
        concept: String,

        /// Follow-up requests sent in the same session
        #[arg(long)]
        refine: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct TokenArgs {
    /// Read the configuration from a JSON file instead of flags
    #[arg(long, conflicts_with_all = ["name", "symbol", "supply"])]
    from_json: Option<String>,

    #[arg(long, required_unless_present = "from_json")]
    name: Option<String>,

    #[arg(long, required_unless_present = "from_json")]
    symbol: Option<String>,

    #[arg(long, default_value_t = 9)]
    decimals: u8,

    /// Initial supply in whole tokens
    #[arg(long, required_unless_present = "from_json")]
    supply: Option<Decimal>,

    #[arg(long)]
    mint_authority: Option<String>,

    #[arg(long)]
    freeze_authority: Option<String>,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long, default_value = "")]
    image: String,

    #[arg(long, default_value = "")]
    uri: String,
}

impl TokenArgs {
    fn into_config(self) -> Result<TokenConfig> {
        if let Some(path) = self.from_json {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read token config {}", path))?;
            return serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse token config {}", path));
        }

        let name = self.name.ok_or_else(|| anyhow!("--name is required"))?;
        let symbol = self.symbol.ok_or_else(|| anyhow!("--symbol is required"))?;
        let supply = self.supply.ok_or_else(|| anyhow!("--supply is required"))?;
        Ok(TokenConfig {
            metadata: TokenMetadata {
                uri: self.uri,
                name: name.clone(),
                symbol: symbol.clone(),
                description: self.description,
                image: self.image,
            },
            mint_authority: self.mint_authority,
            freeze_authority: self.freeze_authority,
            ..TokenConfig::new(&name, &symbol, self.decimals, supply)
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "info" }),
    )
    .init();

    let mut settings = CliConfig::load(&cli.config)?;
    settings.apply_overrides(cli.network, cli.rpc_url, cli.keypair)?;

    match cli.command {
        Command::Create { token, configured_authorities, yes } => {
            create(&settings, token.into_config()?, configured_authorities, yes).await
        }
        Command::Estimate { decimals } => estimate(&settings, decimals).await,
        Command::Validate { token } => validate(&token.into_config()?),
        Command::Audit { token } => {
            audit(&token.into_config()?);
            Ok(())
        }
        Command::Check { address } => check(&settings, &address).await,
        Command::Suggest { concept, refine } => suggest(&settings, &concept, &refine).await,
    }
}

async fn create(
    settings: &CliConfig,
    token: TokenConfig,
    configured_authorities: bool,
    confirmed: bool,
) -> Result<()> {
    let network = settings.network;
    if network.is_production() && !confirmed {
        bail!("Refusing to create a token on {} without --yes", network);
    }

    let keypair_path = settings.expanded_keypair_path();
    let keypair = read_keypair_file(&keypair_path)
        .map_err(|e| anyhow!("Failed to load keypair from {}: {}", keypair_path, e))?;
    log::info!("Payer: {}", keypair.pubkey());

    let report = generate_security_report(&token);
    for issue in report.issues.iter().filter(|i| i.risk_level >= RiskLevel::High) {
        log::warn!("{}: {}", issue.title, issue.description);
    }

    let solana_rpc = SolanaRpc::new(settings.rpc_url());
    log::info!("RPC URL: {}", solana_rpc.url());
    let rpc: Arc<dyn RpcConnection> = Arc::new(solana_rpc);
    let analytics = Arc::new(InMemoryAnalytics::new());
    analytics.track_event(AnalyticsEvent::network_changed(network));
    analytics.track_event(AnalyticsEvent::wallet_connected(
        "keypair",
        &keypair.pubkey().to_string(),
    ));
    let authority_mode = if configured_authorities {
        AuthorityMode::Configured
    } else {
        AuthorityMode::Payer
    };

    let mut creator = TokenCreator::new(rpc, network)
        .with_analytics(analytics.clone())
        .with_confirmation_policy(settings.confirmation_policy())
        .with_authority_mode(authority_mode);

    let wallet = KeypairWallet::new(keypair);
    let outcome = creator.create_token(&token, Some(&wallet)).await;
    log::debug!(
        "Recorded {} analytics event(s), {} error(s)",
        analytics.len(),
        analytics.events(Some(AnalyticsEventType::TokenCreationError), None).len()
    );

    match outcome {
        Ok(created) => {
            println!("Token address: {}", created.token_address);
            println!("Signature:     {}", created.signature);
            println!("Token:         {}", token_explorer_url(&created.token_address, network));
            println!("Transaction:   {}", transaction_explorer_url(&created.signature, network));
            Ok(())
        }
        Err(e) => {
            eprintln!("[{}] {}", e.code, e.message);
            if let Some(details) = &e.details {
                eprintln!("{}", serde_json::to_string_pretty(details)?);
            }
            Err(e.into())
        }
    }
}

async fn estimate(settings: &CliConfig, decimals: u8) -> Result<()> {
    let rpc = SolanaRpc::new(settings.rpc_url());
    let lamports = estimate_token_creation_fees(&rpc, decimals).await;
    println!(
        "Estimated cost on {}: {} lamports ({:.5} SOL)",
        settings.network,
        lamports,
        lamports_to_sol(lamports)
    );
    Ok(())
}

fn validate(token: &TokenConfig) -> Result<()> {
    let validation = validate_token_config(token);
    if validation.is_valid {
        println!("Configuration is valid");
        return Ok(());
    }
    for error in &validation.errors {
        println!("- {}", error);
    }
    bail!("Configuration has {} error(s)", validation.errors.len())
}

fn audit(token: &TokenConfig) {
    let report = generate_security_report(token);
    println!("Score: {}/100 ({})", report.score, report.summary);
    for issue in &report.issues {
        println!("[{:?}] {}: {}", issue.risk_level, issue.title, issue.description);
        println!("    {}", issue.recommendation);
    }
}

async fn check(settings: &CliConfig, address: &str) -> Result<()> {
    let rpc = SolanaRpc::new(settings.rpc_url());
    if check_token_exists(&rpc, address).await {
        println!("{} is a token mint", address);
        println!("{}", token_explorer_url(address, settings.network));
        Ok(())
    } else {
        bail!("No token mint found at {}", address)
    }
}

async fn suggest(settings: &CliConfig, concept: &str, refinements: &[String]) -> Result<()> {
    let client =
        CompletionClient::from_key_file(&settings.expanded_api_key_path(), settings.model.clone())?;
    let mut session = AssistantSession::new();
    if let Some(welcome) = session.take_welcome() {
        println!("{}\n", welcome);
    }

    let mut draft = client.suggest_token(&mut session, concept).await?.into_config();
    for request in refinements {
        let reply = client.send(&mut session, request, Some(&draft), None).await?;
        match assistant::parse_suggestion(&reply) {
            Ok(suggestion) => draft = suggestion.into_config(),
            Err(_) => println!("{}\n", reply),
        }
    }

    println!("{}", serde_json::to_string_pretty(&draft)?);
    let validation = validate_token_config(&draft);
    if !validation.is_valid {
        log::warn!("Suggested configuration is not valid: {}", validation.errors.join(" "));
    }
    Ok(())
}
