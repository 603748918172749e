// src/store/layer.rs

use geo::{BoundingRect, Contains, MultiPolygon, Point};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A single boundary polygon together with its attribute table row.
pub struct BoundaryFeature {
    pub geometry: MultiPolygon<f64>,
    pub attributes: HashMap<String, String>,
}

impl BoundaryFeature {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// NAME_1..NAME_5 columns present on this feature, ordered by level.
    pub fn name_hierarchy(&self) -> Vec<(u8, String)> {
        let mut names = Vec::new();
        for level in 1..=5u8 {
            if let Some(name) = self.attribute(&format!("NAME_{level}")) {
                if !name.is_empty() {
                    names.push((level, name.to_string()));
                }
            }
        }
        names
    }
}

/// Entry stored in the R-tree: a feature's bounding box plus its index
/// into the layer's feature vector.
struct IndexedEnvelope {
    bbox: AABB<[f64; 2]>,
    feature_idx: usize,
}

impl RTreeObject for IndexedEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.bbox
    }
}

/// An in-memory boundary dataset with a spatial index.
///
/// Point lookup narrows candidates through the R-tree (bounding box
/// intersection), then confirms exact containment against the polygon.
pub struct BoundaryLayer {
    features: Vec<BoundaryFeature>,
    tree: RTree<IndexedEnvelope>,
}

impl BoundaryLayer {
    pub fn new(features: Vec<BoundaryFeature>) -> Self {
        // Features with an empty geometry have no bounding box and are
        // left out of the index.
        let envelopes = features
            .iter()
            .enumerate()
            .filter_map(|(feature_idx, feature)| {
                let rect = feature.geometry.bounding_rect()?;
                Some(IndexedEnvelope {
                    bbox: AABB::from_corners(
                        [rect.min().x, rect.min().y],
                        [rect.max().x, rect.max().y],
                    ),
                    feature_idx,
                })
            })
            .collect();

        Self {
            features,
            tree: RTree::bulk_load(envelopes),
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Finds the first feature whose polygon contains the point.
    pub fn locate(&self, point: Point<f64>) -> Option<&BoundaryFeature> {
        let probe = AABB::from_point([point.x(), point.y()]);
        self.tree
            .locate_in_envelope_intersecting(&probe)
            .map(|entry| &self.features[entry.feature_idx])
            .find(|feature| feature.geometry.contains(&point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Coord, LineString, Polygon};

    fn square(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![Polygon::new(
            LineString::from(vec![
                Coord { x: min_x, y: min_y },
                Coord { x: max_x, y: min_y },
                Coord { x: max_x, y: max_y },
                Coord { x: min_x, y: max_y },
                Coord { x: min_x, y: min_y },
            ]),
            vec![],
        )])
    }

    fn triangle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> MultiPolygon<f64> {
        MultiPolygon(vec![Polygon::new(
            LineString::from(vec![a, b, c, a]),
            vec![],
        )])
    }

    fn feature(name: &str, geometry: MultiPolygon<f64>) -> BoundaryFeature {
        let mut attributes = HashMap::new();
        attributes.insert("NAME_1".to_string(), name.to_string());
        BoundaryFeature { geometry, attributes }
    }

    #[test]
    fn locate_finds_containing_polygon() {
        let layer = BoundaryLayer::new(vec![
            feature("west", square(0.0, 0.0, 10.0, 10.0)),
            feature("east", square(20.0, 0.0, 30.0, 10.0)),
        ]);

        let hit = layer.locate(Point::new(25.0, 5.0)).unwrap();
        assert_eq!(hit.attribute("NAME_1"), Some("east"));
    }

    #[test]
    fn locate_misses_outside_all_polygons() {
        let layer = BoundaryLayer::new(vec![feature("only", square(0.0, 0.0, 10.0, 10.0))]);
        assert!(layer.locate(Point::new(15.0, 15.0)).is_none());
    }

    #[test]
    fn bounding_box_candidate_is_rejected_by_exact_containment() {
        // Two triangles whose bounding boxes overlap but whose interiors
        // do not: the probe point sits inside the lower triangle's bbox
        // slice that belongs to the upper triangle.
        let layer = BoundaryLayer::new(vec![
            feature("lower", triangle((0.0, 0.0), (10.0, 0.0), (0.0, 10.0))),
            feature("upper", triangle((10.0, 10.0), (0.0, 10.0), (10.0, 0.0))),
        ]);

        let hit = layer.locate(Point::new(8.0, 8.0)).unwrap();
        assert_eq!(hit.attribute("NAME_1"), Some("upper"));

        let hit = layer.locate(Point::new(2.0, 2.0)).unwrap();
        assert_eq!(hit.attribute("NAME_1"), Some("lower"));
    }

    #[test]
    fn name_hierarchy_is_ordered_and_skips_gaps() {
        let mut attributes = HashMap::new();
        attributes.insert("NAME_3".to_string(), "ward".to_string());
        attributes.insert("NAME_1".to_string(), "province".to_string());
        attributes.insert("NAME_2".to_string(), String::new());
        let feature = BoundaryFeature {
            geometry: square(0.0, 0.0, 1.0, 1.0),
            attributes,
        };

        let hierarchy = feature.name_hierarchy();
        assert_eq!(
            hierarchy,
            vec![(1, "province".to_string()), (3, "ward".to_string())]
        );
    }
}
