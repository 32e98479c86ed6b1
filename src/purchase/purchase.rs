use crate::traits::HostBridge;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
}

/// Message the web app posts to the host when a buy button is pressed.
///
/// Field order is part of the wire format: `action` is always serialized
/// before `product`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub action: Action,
    pub product: String,
}

impl PurchaseRequest {
    pub fn buy(product: impl Into<String>) -> Self {
        Self {
            action: Action::Buy,
            product: product.into(),
        }
    }

    pub fn to_payload(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize purchase request")
    }

    /// Decode the `web_app_data` text the host delivers back to the bot
    pub fn from_web_app_data(data: &str) -> Result<Self> {
        serde_json::from_str(data).context("Failed to parse web app data as a purchase request")
    }
}

/// Build a buy request for `product_id` and hand it to the host bridge.
///
/// The identifier is passed through untouched; the host decides what it means.
pub fn dispatch_purchase(bridge: &dyn HostBridge, product_id: &str) {
    let request = PurchaseRequest::buy(product_id);

    match request.to_payload() {
        Ok(payload) => {
            debug!(payload = %payload, "Dispatching purchase request");
            bridge.send_data(&payload);
        }
        Err(e) => error!("Dropping purchase request for {:?}: {:?}", product_id, e),
    }
}
