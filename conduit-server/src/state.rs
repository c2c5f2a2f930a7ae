//! Shared server state: the mounted vendors and the HTTP client they share

use crate::config::ServerConfig;
use conduit_core::{Error, Provider};
use conduit_providers::constants::{COHERE_PROVIDER, OPENAI_PROVIDER};
use conduit_providers::http::{HttpClient, ReqwestClient};
use conduit_providers::{CohereBuilder, OpenAIBuilder, ProviderBuilder};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// The vendors the server can route to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Vendor {
    /// OpenAI chat completions
    OpenAI,
    /// Cohere chat
    Cohere,
}

impl Vendor {
    /// Parse the path segment used in routes
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            OPENAI_PROVIDER => Some(Self::OpenAI),
            COHERE_PROVIDER => Some(Self::Cohere),
            _ => None,
        }
    }

    /// The path segment for this vendor
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAI => OPENAI_PROVIDER,
            Self::Cohere => COHERE_PROVIDER,
        }
    }

    /// Name used in caller-facing messages
    pub fn display_name(self) -> &'static str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Cohere => "Cohere",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
struct Mounted {
    provider: Arc<dyn Provider>,
    base_url: Option<String>,
}

/// State handed to every request handler
///
/// Providers are built once and reused; a caller-supplied key gets a one-off
/// provider over the same HTTP client.
#[derive(Clone)]
pub struct AppState {
    client: Arc<dyn HttpClient>,
    vendors: Arc<BTreeMap<Vendor, Mounted>>,
}

impl AppState {
    /// State with no vendors mounted
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            vendors: Arc::new(BTreeMap::new()),
        }
    }

    /// Build the shared client and every vendor that has a key
    pub fn from_config(config: &ServerConfig) -> Result<Self, Error> {
        let client: Arc<dyn HttpClient> =
            Arc::new(ReqwestClient::with_timeout(config.request_timeout)?);
        let mut state = Self::new(client);

        for (vendor, vendor_config) in [
            (Vendor::OpenAI, &config.openai),
            (Vendor::Cohere, &config.cohere),
        ] {
            if let Some(vendor_config) = vendor_config {
                let provider = state.build(
                    vendor,
                    &vendor_config.api_key,
                    vendor_config.base_url.as_deref(),
                )?;
                state = state.mount(vendor, provider, vendor_config.base_url.clone());
            }
        }
        Ok(state)
    }

    /// Mount a provider under `vendor`
    ///
    /// `base_url` is reused when a request brings its own key.
    pub fn mount(
        mut self,
        vendor: Vendor,
        provider: Arc<dyn Provider>,
        base_url: Option<String>,
    ) -> Self {
        Arc::make_mut(&mut self.vendors).insert(vendor, Mounted { provider, base_url });
        self
    }

    /// Vendors currently mounted
    pub fn vendors(&self) -> Vec<Vendor> {
        self.vendors.keys().copied().collect()
    }

    /// The provider serving one request, or `None` when `vendor` is not mounted
    pub fn provider(
        &self,
        vendor: Vendor,
        api_key: Option<&str>,
    ) -> Option<Result<Arc<dyn Provider>, Error>> {
        let mounted = self.vendors.get(&vendor)?;
        Some(match api_key {
            Some(key) => self.build(vendor, key, mounted.base_url.as_deref()),
            None => Ok(mounted.provider.clone()),
        })
    }

    fn build(
        &self,
        vendor: Vendor,
        api_key: &str,
        base_url: Option<&str>,
    ) -> Result<Arc<dyn Provider>, Error> {
        Ok(match vendor {
            Vendor::OpenAI => {
                let mut builder = OpenAIBuilder::new(api_key).with_client(self.client.clone());
                if let Some(url) = base_url {
                    builder = builder.base_url(url);
                }
                Arc::new(builder.build()?)
            }
            Vendor::Cohere => {
                let mut builder = CohereBuilder::new(api_key).with_client(self.client.clone());
                if let Some(url) = base_url {
                    builder = builder.base_url(url);
                }
                Arc::new(builder.build()?)
            }
        })
    }
}
