use reqwest::Client;
use serde::Deserialize;

use crate::domain::errors::AppError;
use crate::domain::models::Geolocation;

/// Response shape of the ipstack-style lookup endpoint. `region` is the only
/// field the provider may legitimately omit.
#[derive(Deserialize, Debug)]
struct ProviderResponse {
    #[serde(rename = "type")]
    ip_type: String,
    country_name: String,
    city: String,
    region: Option<String>,
    latitude: f64,
    longitude: f64,
}

/// Client for the external geolocation provider. Issues exactly one upstream
/// GET per lookup; no retries, no caching.
#[derive(Clone)]
pub struct GeolocationClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl GeolocationClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Looks up geolocation data for `ip`. The returned record carries the
    /// IP passed in, not whatever the provider echoes back.
    pub async fn fetch(&self, ip: &str) -> Result<Geolocation, AppError> {
        let url = format!("{}/{}?access_key={}", self.base_url, ip, self.api_key);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ProviderUnreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderError(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::ProviderUnreachable(e.to_string()))?;
        let parsed: ProviderResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::MalformedProviderResponse(e.to_string()))?;

        Ok(Geolocation {
            ip: ip.to_string(),
            ip_type: parsed.ip_type,
            city: parsed.city,
            country: parsed.country_name,
            // Missing provider region defaults to the empty string.
            region: parsed.region.or_else(|| Some(String::new())),
            latitude: parsed.latitude,
            longitude: parsed.longitude,
        })
    }
}
