use crate::config::AppConfig;
use crate::error::FetchError;
use crate::fetch::traits::{FetchQuery, ListingSource};
use crate::models::{Listing, RadiusFilter};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Body of `GET /api/hostels`
#[derive(Debug, Deserialize)]
struct ListingsEnvelope {
    #[serde(default)]
    hostels: Option<Vec<Value>>,
}

/// Listing service client over HTTP
///
/// The full set comes from `GET {base}/api/hostels`; radius queries go to the
/// configured RPC endpoint, which answers with distance-annotated records.
pub struct HttpListingSource {
    client: Client,
    base_url: String,
    radius_rpc_path: String,
}

impl HttpListingSource {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("hostel-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            radius_rpc_path: config.radius_rpc_path.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn fetch_all(&self) -> Result<Vec<Listing>, FetchError> {
        let url = self.url("/api/hostels");
        debug!("Fetching URL: {}", url);

        let response = self.client.get(&url).send().await?;
        let body = read_body(response).await?;
        let envelope: ListingsEnvelope = serde_json::from_str(&body)?;
        Ok(decode_records(envelope.hostels.unwrap_or_default()))
    }

    async fn fetch_within(&self, query: &RadiusFilter) -> Result<Vec<Listing>, FetchError> {
        let url = self.url(&self.radius_rpc_path);
        let center = query.center();
        debug!("Calling radius RPC: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "lat": center.latitude(),
                "long": center.longitude(),
                "radius_meters": query.radius_m(),
            }))
            .send()
            .await?;
        let body = read_body(response).await?;
        let records: Vec<Value> = serde_json::from_str(&body)?;
        Ok(decode_records(records))
    }
}

async fn read_body(response: Response) -> Result<String, FetchError> {
    let status = response.status();
    if !status.is_success() {
        warn!("Listing service returned status: {}", status);
        return Err(FetchError::Status(status.as_u16()));
    }
    let body = response.text().await?;
    debug!("Downloaded {} bytes", body.len());
    Ok(body)
}

/// Decode each record on its own so one malformed listing cannot sink the set
fn decode_records(records: Vec<Value>) -> Vec<Listing> {
    let total = records.len();
    let listings: Vec<Listing> = records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Listing>(record) {
            Ok(listing) if listing.name.trim().is_empty() => {
                warn!(listing_id = %listing.id, "Skipping listing record without a name");
                None
            }
            Ok(listing) => Some(listing),
            Err(e) => {
                warn!(error = %e, "Skipping malformed listing record");
                None
            }
        })
        .collect();

    if listings.len() < total {
        info!("Decoded {} of {} listing records", listings.len(), total);
    }
    listings
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<Listing>, FetchError> {
        match query {
            FetchQuery::All => self.fetch_all().await,
            FetchQuery::Within(filter) => self.fetch_within(filter).await,
        }
    }

    fn source_name(&self) -> &'static str {
        "http"
    }

    fn supports_radius(&self) -> bool {
        true
    }
}
