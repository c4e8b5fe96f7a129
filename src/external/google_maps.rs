use serde::{Deserialize, Serialize};

use crate::{
    config::GoogleMapsConfig,
    entities::Coordinates,
    error::{geocoding_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geometry {
    pub location: Coordinates,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    results: Option<T>,
    error_message: Option<String>,
}

#[derive(Clone)]
pub struct GoogleMaps {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl GoogleMaps {
    pub fn new(http: reqwest::Client, config: &GoogleMapsConfig) -> Self {
        Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Resolves a free-text address to the coordinates of the provider's first
    /// candidate. `Ok(None)` means the provider found nothing (`ZERO_RESULTS`,
    /// or `OK` with no results).
    ///
    /// Every other provider status is an error, including `OVER_QUERY_LIMIT`
    /// and `INVALID_REQUEST`, which arrive as HTTP 200 with empty results. A
    /// rate-limited lookup therefore fails the caller instead of looking like
    /// a place that does not exist.
    ///
    /// The request URL carries the API key, so it is stripped from transport
    /// errors before they reach the log.
    #[tracing::instrument(skip(self))]
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, Error> {
        let url = format!("{}/maps/api/geocode/json", self.api_base);

        let res = self
            .http
            .get(url)
            .query(&[("address", address)])
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| geocoding_error(e.without_url()))?;

        let status_code = res.status();
        if !status_code.is_success() {
            return Err(geocoding_error(status_code));
        }

        let data: Response<Vec<GeocodeResult>> = res
            .json()
            .await
            .map_err(|e| geocoding_error(e.without_url()))?;

        match data.status.as_str() {
            "OK" | "ZERO_RESULTS" => {}
            status => {
                return Err(geocoding_error(format!(
                    "{}: {}",
                    status,
                    data.error_message.unwrap_or_default()
                )))
            }
        }

        Ok(data
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|result| result.geometry.location))
    }
}

#[tokio::test]
async fn transport_errors_do_not_leak_the_key() {
    let maps = GoogleMaps::new(
        reqwest::Client::new(),
        &GoogleMapsConfig {
            api_key: "maps-secret-key".into(),
            api_base: "http://127.0.0.1:1".into(),
        },
    );

    let err = maps.geocode("Yosemite").await.unwrap_err();

    assert_eq!(err.code, 5);
    assert!(!err.message.contains("maps-secret-key"));
    assert!(!err.message.contains("key="));
}
