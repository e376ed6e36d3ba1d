//! External IP discovery
//!
//! Asks a fixed, ordered list of "echo" services for the caller's public
//! address and returns the first answer that comes back.

use crate::cli::EchoService;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Something that can report our public IP.
#[async_trait]
pub trait EchoProvider: Send + Sync {
    fn name(&self) -> &str;

    /// `None` on any failure; the cause is only logged.
    async fn fetch(&self) -> Option<String>;
}

/// Echo service answering `GET <url>` with a JSON object holding the IP under `field`.
pub struct JsonEchoProvider {
    name: String,
    url: String,
    field: String,
    client: Client,
}

impl JsonEchoProvider {
    pub fn new(service: &EchoService, client: Client) -> Self {
        Self {
            name: service.name.clone(),
            url: service.url.clone(),
            field: service.field.clone(),
            client,
        }
    }

    async fn try_fetch(&self) -> Result<String> {
        let resp = self.client.get(&self.url).send().await?;
        if resp.status() != StatusCode::OK {
            return Err(anyhow!("HTTP {}", resp.status().as_u16()));
        }

        let body = resp.json::<Value>().await?;
        body[self.field.as_str()]
            .as_str()
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .map(|ip| ip.to_string())
            .ok_or_else(|| anyhow!("field '{}' missing from response", self.field))
    }
}

#[async_trait]
impl EchoProvider for JsonEchoProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Option<String> {
        match self.try_fetch().await {
            Ok(ip) => Some(ip),
            Err(e) => {
                debug!("Echo service {} failed: {}", self.name, e);
                None
            }
        }
    }
}

/// Tries each provider in order, one attempt each.
pub struct ExternalIpResolver {
    providers: Vec<Box<dyn EchoProvider>>,
}

impl ExternalIpResolver {
    pub fn new(providers: Vec<Box<dyn EchoProvider>>) -> Self {
        Self { providers }
    }

    /// Build JSON providers for `services`, sharing one client with the given timeout.
    pub fn from_services(services: &[EchoService], timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let providers = services
            .iter()
            .map(|s| Box::new(JsonEchoProvider::new(s, client.clone())) as Box<dyn EchoProvider>)
            .collect();
        Ok(Self::new(providers))
    }

    pub async fn resolve_external_ip(&self) -> Option<String> {
        for provider in &self.providers {
            if let Some(ip) = provider.fetch().await {
                debug!("External IP {} reported by {}", ip, provider.name());
                return Some(ip);
            }
        }
        debug!("All {} echo services failed", self.providers.len());
        None
    }
}
