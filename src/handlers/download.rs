// src/handlers/download.rs

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use geo::Point;
use geojson::{Feature, FeatureCollection, JsonObject, JsonValue};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::{
    error::AppError,
    models::admin::AdmLevel,
    store::{BoundaryFeature, BoundaryStore, GID_FIELD},
};

/// Query parameters for the boundary download.
#[derive(Debug, Deserialize, Validate)]
pub struct DownloadParams {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub level: String,
}

/// Serves the boundary polygon containing the point at the requested ADM
/// level as a GeoJSON FeatureCollection attachment.
///
/// The body is serialized and streamed directly instead of being staged
/// in a downloads directory.
pub async fn download(
    State(store): State<Arc<BoundaryStore>>,
    Query(params): Query<DownloadParams>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = params.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let level = AdmLevel::parse(&params.level)?;
    let point = Point::new(params.longitude, params.latitude);

    let country = store.country_at(point).ok_or_else(|| {
        AppError::NotFound("No matching polygon found for the given coordinates.".to_string())
    })?;
    let gid = country
        .attribute(GID_FIELD)
        .ok_or_else(|| {
            AppError::InternalServerError(format!("country outline is missing {GID_FIELD}"))
        })?
        .to_string();

    let layer = store.level_layer(&gid, level.as_u8()).await?;
    let feature = layer
        .locate(point)
        .ok_or_else(|| AppError::NotFound("No matching polygon found.".to_string()))?;

    let body = serde_json::to_string(&feature_collection(feature))?;
    let filename = format!(
        "{}_{}_{}.geojson",
        level, params.latitude, params.longitude
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/geo+json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}

/// Wraps a boundary feature as a single-feature GeoJSON collection,
/// carrying the attribute table as string properties.
fn feature_collection(feature: &BoundaryFeature) -> FeatureCollection {
    let mut properties = JsonObject::new();
    for (key, value) in &feature.attributes {
        properties.insert(key.clone(), JsonValue::String(value.clone()));
    }

    FeatureCollection {
        bbox: None,
        features: vec![Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(
                &feature.geometry,
            ))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }],
        foreign_members: None,
    }
}
