//! Boundary preparation: one labeled polygon per (feature, polygon) pair.

use geo::BoundingRect;
use geo_types::{MultiLineString, Polygon};
use tracing::{debug, info};

use crate::models::FeatureCollection;
use crate::region::RegionTable;

/// A single boundary polygon with the metadata the rasterizer needs
#[derive(Debug, Clone)]
pub struct Boundary {
    /// Position of the owning feature in the collection. Lower wins.
    pub order: usize,
    /// Position of this polygon within its feature
    pub part: usize,
    pub id: Option<String>,
    pub label: char,
    pub polygon: Polygon<f64>,
}

impl Boundary {
    /// Bounding box of the rings that take part in containment
    pub fn bbox(&self, subtract_holes: bool) -> Option<(f64, f64, f64, f64)> {
        let rect = if subtract_holes {
            let mut rings = vec![self.polygon.exterior().clone()];
            rings.extend(self.polygon.interiors().iter().cloned());
            MultiLineString::new(rings).bounding_rect()
        } else {
            self.polygon.exterior().bounding_rect()
        };
        rect.map(|rect| (rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }
}

/// Flatten a collection into labeled boundary polygons.
///
/// Each feature is classified once. Features with unsupported geometry
/// contribute nothing and are only logged.
pub fn extract_boundaries(collection: &FeatureCollection, table: &RegionTable) -> Vec<Boundary> {
    info!("Extracting boundaries from {} features...", collection.len());

    let mut boundaries = Vec::new();
    let mut skipped = 0usize;

    for (order, feature) in collection.iter().enumerate() {
        let polygons = feature.geometry.polygons();
        if polygons.is_empty() {
            debug!(
                "Skipping feature {:?}: no polygons in {} geometry",
                feature.id,
                feature.geometry.type_name()
            );
            skipped += 1;
            continue;
        }

        let label = table.classify_id(feature.id.as_deref());
        for (part, polygon) in polygons.into_iter().enumerate() {
            boundaries.push(Boundary {
                order,
                part,
                id: feature.id.clone(),
                label,
                polygon,
            });
        }
    }

    info!(
        "Found {} boundary polygons ({} features skipped)",
        boundaries.len(),
        skipped
    );

    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Feature, Geometry};
    use geo_types::Coord;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Coord<f64>> {
        vec![
            Coord { x: x0, y: y0 },
            Coord { x: x1, y: y0 },
            Coord { x: x1, y: y1 },
            Coord { x: x0, y: y1 },
        ]
    }

    #[test]
    fn test_extract_labels_and_order() {
        let collection = FeatureCollection::new(vec![
            Feature::new(Some("PNT"), Geometry::Unsupported("Point".to_string())),
            Feature::new(
                Some("FRA"),
                Geometry::MultiPolygon(vec![
                    vec![rect(0.0, 0.0, 1.0, 1.0)],
                    vec![rect(2.0, 2.0, 3.0, 3.0)],
                ]),
            ),
            Feature::new(None, Geometry::Polygon(vec![rect(5.0, 5.0, 6.0, 6.0)])),
        ]);

        let boundaries = extract_boundaries(&collection, &RegionTable::builtin());
        assert_eq!(boundaries.len(), 3);

        assert_eq!(boundaries[0].order, 1);
        assert_eq!(boundaries[0].part, 0);
        assert_eq!(boundaries[1].part, 1);
        assert_eq!(boundaries[0].label, 'E');

        // Missing id falls back to the default label
        assert_eq!(boundaries[2].order, 2);
        assert_eq!(boundaries[2].label, 'A');
    }

    #[test]
    fn test_bbox_with_holes() {
        let mut hole = rect(-5.0, 0.2, 0.5, 0.8);
        hole.reverse();
        let collection = FeatureCollection::new(vec![Feature::new(
            Some("X"),
            Geometry::Polygon(vec![rect(0.0, 0.0, 1.0, 1.0), hole]),
        )]);
        let boundaries = extract_boundaries(&collection, &RegionTable::builtin());

        assert_eq!(boundaries[0].bbox(false), Some((0.0, 0.0, 1.0, 1.0)));
        assert_eq!(boundaries[0].bbox(true), Some((-5.0, 0.0, 1.0, 1.0)));
    }
}
