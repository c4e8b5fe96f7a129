use axum::extract::{Extension, Json};
use axum::http::Method;
use serde::{Deserialize, Serialize};

use crate::entities::ResolvedPlace;
use crate::error::{invalid_input_error, invalid_method_error, Error};
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct ExtractParams {
    text: Option<String>,
}

/// Bodies that are missing, not JSON, or carry a non-string `text` all land
/// in the same 400 as a missing field.
pub async fn extract(
    method: Method,
    Extension(api): Extension<DynAPI>,
    params: Option<Json<ExtractParams>>,
) -> Result<Json<Vec<ResolvedPlace>>, Error> {
    if method != Method::POST {
        return Err(invalid_method_error());
    }

    let text = params
        .and_then(|Json(params)| params.text)
        .ok_or_else(invalid_input_error)?;

    let places = api.extract_places(&text).await?;

    Ok(places.into())
}
