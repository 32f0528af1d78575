use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use solmint_core::TokenConfig;
use std::fs;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const WELCOME_MESSAGE: &str = "Hi! I can suggest a name, symbol and supply for your token. \
Describe the project and I will answer with a configuration you can pass to `solmint create`.";

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize, Debug)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    fn api_name(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Conversation state for one operator session. Owned by the caller and passed to every call.
#[derive(Debug, Default)]
pub struct AssistantSession {
    messages: Vec<ChatMessage>,
    welcome_sent: bool,
}

impl AssistantSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The welcome text the first time it is asked for in this session, `None` afterwards.
    pub fn take_welcome(&mut self) -> Option<&'static str> {
        if self.welcome_sent {
            return None;
        }
        self.welcome_sent = true;
        Some(WELCOME_MESSAGE)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    fn push(&mut self, role: Role, content: String) {
        self.messages.push(ChatMessage { role, content });
    }
}

/// Token configuration proposed by the assistant.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenSuggestion {
    pub name: String,
    pub symbol: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    pub initial_supply: Decimal,
    #[serde(default)]
    pub description: String,
}

fn default_decimals() -> u8 {
    9
}

impl TokenSuggestion {
    pub fn into_config(self) -> TokenConfig {
        let mut config = TokenConfig::new(&self.name, &self.symbol, self.decimals, self.initial_supply);
        config.metadata.description = self.description;
        config
    }
}

/// Client for the text-completion service.
pub struct CompletionClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl CompletionClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    /// Read the API key from a file, as the payer keypair is read.
    pub fn from_key_file(path: &str, model: String) -> Result<Self> {
        let api_key = fs::read_to_string(path)
            .with_context(|| format!("Failed to read API key from {}", path))?
            .trim()
            .to_string();
        Ok(Self::new(api_key, model))
    }

    /// Send `message` with the session history and record both sides of the exchange.
    ///
    /// When a draft config or a wallet address is known, it is appended to the prompt sent
    /// to the service but the session keeps the operator's text as typed.
    pub async fn send(
        &self,
        session: &mut AssistantSession,
        message: &str,
        draft: Option<&TokenConfig>,
        wallet: Option<&Pubkey>,
    ) -> Result<String> {
        let enriched = enrich_prompt(message, draft, wallet);

        let mut contents: Vec<Content> = session
            .messages()
            .iter()
            .map(|m| Content {
                role: m.role.api_name(),
                parts: vec![Part { text: m.content.clone() }],
            })
            .collect();
        contents.push(Content {
            role: Role::User.api_name(),
            parts: vec![Part { text: enriched }],
        });

        let url = format!("{}/{}:generateContent", API_BASE_URL, self.model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GeminiRequest { contents })
            .send()
            .await?
            .error_for_status()?
            .json::<GeminiResponse>()
            .await?;

        let reply = response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| anyhow!("Invalid response format from completion API"))?;

        session.push(Role::User, message.to_string());
        session.push(Role::Assistant, reply.clone());
        Ok(reply)
    }

    /// Ask for a token configuration matching `concept`.
    pub async fn suggest_token(
        &self,
        session: &mut AssistantSession,
        concept: &str,
    ) -> Result<TokenSuggestion> {
        let prompt = format!(
            "You are an assistant for creating SPL tokens on Solana. \
            Suggest a token for this project: \"{}\". \
            The symbol must be at most 10 uppercase letters or digits and decimals between 0 and 9. \
            Respond with ONLY a JSON object with the keys \"name\", \"symbol\", \"decimals\", \
            \"initialSupply\" and \"description\".",
            concept
        );
        let reply = self.send(session, &prompt, None, None).await?;
        parse_suggestion(&reply)
    }
}

fn enrich_prompt(message: &str, draft: Option<&TokenConfig>, wallet: Option<&Pubkey>) -> String {
    let mut prompt = message.to_string();
    if let Some(config) = draft {
        prompt.push_str(&format!(
            "\n\nCurrent Token Configuration Context:\n- Name: {}\n- Symbol: {}\n- Decimals: {}\n- Initial Supply: {}\n- Mint Authority: {}\n- Freeze Authority: {}\n",
            config.name,
            config.symbol,
            config.decimals,
            config.initial_supply,
            config.mint_authority.as_deref().unwrap_or("Not set"),
            config.freeze_authority.as_deref().unwrap_or("Not set"),
        ));
    }
    match wallet {
        Some(key) => prompt.push_str(&format!("\nUser is connected with wallet: {}", key)),
        None => prompt.push_str("\nUser is not connected with a wallet."),
    }
    prompt
}

/// Strip an optional ```json fence and parse the suggestion.
pub fn parse_suggestion(text: &str) -> Result<TokenSuggestion> {
    let cleaned = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    serde_json::from_str(cleaned)
        .with_context(|| format!("Completion API returned an unparseable suggestion: {}", cleaned))
}
