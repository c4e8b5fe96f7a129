mod helpers;
mod place_api;

use crate::{
    api::API,
    config::Config,
    error::{config_error, Error},
    external::{GoogleMaps, OpenAI},
};

pub const MIN_TEXT_LEN: usize = 3;

pub struct Engine {
    extractor: OpenAI,
    geocoder: GoogleMaps,
    deduplicate_places: bool,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| config_error("http client", e))?;

        Ok(Self {
            extractor: OpenAI::new(http.clone(), &config.openai),
            geocoder: GoogleMaps::new(http, &config.google_maps),
            deduplicate_places: config.deduplicate_places,
        })
    }
}

impl API for Engine {}
