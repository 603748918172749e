// src/store/dataset.rs

use crate::error::AppError;
use crate::store::layer::{BoundaryFeature, BoundaryLayer};
use geo::MultiPolygon;
use shapefile::dbase::FieldValue;
use std::collections::HashMap;
use std::path::Path;

/// Reads a shapefile into an indexed boundary layer.
///
/// Non-polygon shapes are skipped with a warning. Attribute values are
/// flattened to strings; GADM columns are all character fields.
pub fn read_layer(path: &Path) -> Result<BoundaryLayer, AppError> {
    let mut reader = shapefile::Reader::from_path(path).map_err(|e| {
        AppError::InternalServerError(format!("failed to open {}: {}", path.display(), e))
    })?;

    let mut features = Vec::new();
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result?;
        let geometry: MultiPolygon<f64> = match shape {
            shapefile::Shape::Polygon(polygon) => polygon.into(),
            other => {
                tracing::warn!(
                    "Skipping non-polygon shape {} in {}",
                    other.shapetype(),
                    path.display()
                );
                continue;
            }
        };

        let mut attributes = HashMap::new();
        for (name, value) in record {
            if let Some(text) = field_to_string(value) {
                attributes.insert(name, text);
            }
        }

        features.push(BoundaryFeature {
            geometry,
            attributes,
        });
    }

    Ok(BoundaryLayer::new(features))
}

fn field_to_string(value: FieldValue) -> Option<String> {
    match value {
        FieldValue::Character(v) => v.map(|s| s.trim().to_string()),
        FieldValue::Numeric(v) => v.map(|n| n.to_string()),
        FieldValue::Integer(v) => Some(v.to_string()),
        FieldValue::Float(v) => v.map(|n| n.to_string()),
        FieldValue::Double(v) => Some(v.to_string()),
        FieldValue::Logical(v) => v.map(|b| b.to_string()),
        _ => None,
    }
}
