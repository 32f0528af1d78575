//! Append-only analytics events for the creation flow.

use chrono::Utc;
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Mutex;

use crate::config::{Network, TokenConfig};
use crate::error::{ErrorDetails, TokenCreationError};

const DEFAULT_QUERY_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsEventType {
    TokenCreationStarted,
    TokenCreationSuccess,
    TokenCreationError,
    WalletConnected,
    WalletDisconnected,
    NetworkChanged,
    MarketplaceView,
    TokenView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    #[serde(rename = "type")]
    pub event_type: AnalyticsEventType,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<EventError>,
}

impl AnalyticsEvent {
    pub fn new(event_type: AnalyticsEventType, data: Value) -> Self {
        Self {
            event_type,
            timestamp: Utc::now().timestamp_millis(),
            data: Some(data),
            error: None,
        }
    }

    pub fn token_creation_started(config: &TokenConfig, network: Network) -> Self {
        Self::new(
            AnalyticsEventType::TokenCreationStarted,
            token_data(config, network),
        )
    }

    pub fn token_creation_success(
        config: &TokenConfig,
        network: Network,
        token_address: &str,
        signature: &str,
    ) -> Self {
        let mut data = token_data(config, network);
        data["tokenAddress"] = Value::from(token_address);
        data["signature"] = Value::from(signature);
        Self::new(AnalyticsEventType::TokenCreationSuccess, data)
    }

    pub fn token_creation_error(
        config: &TokenConfig,
        network: Network,
        err: &TokenCreationError,
    ) -> Self {
        let mut event = Self::new(
            AnalyticsEventType::TokenCreationError,
            token_data(config, network),
        );
        event.error = Some(EventError {
            code: err.code.as_str().to_string(),
            message: err.message.clone(),
            details: err.details.clone(),
        });
        event
    }

    pub fn wallet_connected(wallet_type: &str, public_key: &str) -> Self {
        Self::new(
            AnalyticsEventType::WalletConnected,
            json!({ "walletType": wallet_type, "publicKey": public_key }),
        )
    }

    pub fn network_changed(network: Network) -> Self {
        Self::new(
            AnalyticsEventType::NetworkChanged,
            json!({ "network": network.as_str() }),
        )
    }
}

fn token_data(config: &TokenConfig, network: Network) -> Value {
    json!({
        "tokenName": config.name,
        "tokenSymbol": config.symbol,
        "decimals": config.decimals,
        "initialSupply": config.initial_supply.to_string(),
        "network": network.as_str(),
    })
}

/// Event sink. Tracking is fire-and-forget and must never fail the caller.
pub trait AnalyticsSink: Send + Sync {
    fn track_event(&self, event: AnalyticsEvent);
}

/// Keeps every event in memory and logs it.
#[derive(Debug, Default)]
pub struct InMemoryAnalytics {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl InMemoryAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events newest first, optionally filtered by type. `limit` defaults to 100.
    pub fn events(
        &self,
        event_type: Option<AnalyticsEventType>,
        limit: Option<usize>,
    ) -> Vec<AnalyticsEvent> {
        let events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut selected: Vec<AnalyticsEvent> = events
            .iter()
            .filter(|e| event_type.map_or(true, |t| e.event_type == t))
            .cloned()
            .collect();
        // Stable sort keeps insertion order reversed for equal timestamps.
        selected.reverse();
        selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        selected.truncate(limit.unwrap_or(DEFAULT_QUERY_LIMIT));
        selected
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AnalyticsSink for InMemoryAnalytics {
    fn track_event(&self, event: AnalyticsEvent) {
        match serde_json::to_string(event.data.as_ref().unwrap_or(&Value::Null)) {
            Ok(payload) => info!("[analytics] {:?} {}", event.event_type, payload),
            Err(e) => error!("Failed to serialise analytics event: {}", e),
        }
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
