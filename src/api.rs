use async_trait::async_trait;

use crate::entities::ResolvedPlace;
use crate::error::Error;

#[async_trait]
pub trait PlaceAPI {
    async fn extract_places(&self, text: &str) -> Result<Vec<ResolvedPlace>, Error>;
}

pub trait API: PlaceAPI {}
