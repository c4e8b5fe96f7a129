use super::{helpers::dedup_places, Engine, MIN_TEXT_LEN};

use async_trait::async_trait;

use crate::{
    api::PlaceAPI,
    entities::ResolvedPlace,
    error::{invalid_input_error, Error},
};

#[async_trait]
impl PlaceAPI for Engine {
    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    async fn extract_places(&self, text: &str) -> Result<Vec<ResolvedPlace>, Error> {
        if text.chars().count() < MIN_TEXT_LEN {
            return Err(invalid_input_error());
        }

        let mut places = self.extractor.extract_places(text).await?;
        if self.deduplicate_places {
            places = dedup_places(places);
        }

        // Geocoding runs one place at a time; the first failure aborts the request.
        let mut results = Vec::with_capacity(places.len());
        for place in places {
            match self.geocoder.geocode(&place.name).await? {
                Some(coordinates) => results.push(ResolvedPlace::new(place, coordinates)),
                None => tracing::debug!(name = %place.name, "no geocoding match, skipping"),
            }
        }

        tracing::info!(count = results.len(), "resolved places");

        Ok(results)
    }
}
