// src/handlers/locate.rs

use axum::{Json, extract::State, response::IntoResponse};
use geo::Point;
use std::sync::Arc;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        admin::{AdminName, LocateResponse},
        coordinates::Coordinates,
    },
    store::{BoundaryStore, COUNTRY_FIELD, GID_FIELD},
};

/// Resolves coordinates to the administrative name hierarchy.
///
/// Finds the containing country outline first, then drills into that
/// country's most detailed ADM layer and reports the NAME_* columns of
/// the matched polygon.
pub async fn locate(
    State(store): State<Arc<BoundaryStore>>,
    Json(payload): Json<Coordinates>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    // Geometry coordinates are (longitude, latitude)
    let point = Point::new(payload.longitude, payload.latitude);

    let country = store
        .country_at(point)
        .ok_or_else(|| AppError::NotFound("No matching polygon found.".to_string()))?;
    let gid = country
        .attribute(GID_FIELD)
        .ok_or_else(|| {
            AppError::InternalServerError(format!("country outline is missing {GID_FIELD}"))
        })?
        .to_string();

    let level = store
        .highest_level(&gid)?
        .ok_or_else(|| AppError::NotFound(format!("No administrative data found for {gid}.")))?;

    let layer = store.level_layer(&gid, level).await?;
    let feature = layer
        .locate(point)
        .ok_or_else(|| AppError::NotFound("No matching polygon found.".to_string()))?;

    let country_name = feature
        .attribute(COUNTRY_FIELD)
        .or_else(|| country.attribute(COUNTRY_FIELD))
        .unwrap_or(gid.as_str())
        .to_string();

    let administrative_levels = feature
        .name_hierarchy()
        .into_iter()
        .map(|(level, name)| AdminName { level, name })
        .collect();

    Ok(Json(LocateResponse {
        longitude: payload.longitude,
        latitude: payload.latitude,
        country: country_name,
        administrative_levels,
    }))
}
