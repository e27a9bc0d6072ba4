//! Boundary features decoded from a GeoJSON FeatureCollection.
//!
//! Decoding is deliberately loose: anything about a single feature that does
//! not match the expected shape turns into `Geometry::Unsupported` (or a
//! missing id) instead of failing the whole collection.

use geo_types::{Coord, LineString, Polygon};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// Ordered vertices of one boundary loop
pub type Ring = Vec<Coord<f64>>;

/// Polygon geometry as rings; index 0 is the exterior
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
    /// Any other geometry type, a null geometry, or malformed coordinates
    Unsupported(String),
}

impl Geometry {
    /// Normalize to a list of polygons. `Unsupported` yields none.
    pub fn polygons(&self) -> Vec<Polygon<f64>> {
        match self {
            Geometry::Polygon(rings) => to_polygon(rings).into_iter().collect(),
            Geometry::MultiPolygon(polys) => polys.iter().filter_map(|r| to_polygon(r)).collect(),
            Geometry::Unsupported(_) => Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::Unsupported(kind) => kind,
        }
    }

    fn from_value(value: Option<&Value>) -> Self {
        let Some(Value::Object(obj)) = value else {
            return Geometry::Unsupported("null".to_string());
        };

        let kind = obj.get("type").and_then(Value::as_str).unwrap_or("unknown");
        let coords = obj.get("coordinates");

        match kind {
            "Polygon" => match coords.and_then(parse_polygon) {
                Some(rings) => Geometry::Polygon(rings),
                None => Geometry::Unsupported("Polygon (malformed)".to_string()),
            },
            "MultiPolygon" => {
                let Some(parts) = coords.and_then(Value::as_array) else {
                    return Geometry::Unsupported("MultiPolygon (malformed)".to_string());
                };
                let polys: Vec<Vec<Ring>> = parts
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, part)| {
                        let rings = parse_polygon(part);
                        if rings.is_none() {
                            debug!("Dropping malformed MultiPolygon part {}", idx);
                        }
                        rings
                    })
                    .collect();
                if polys.is_empty() && !parts.is_empty() {
                    return Geometry::Unsupported("MultiPolygon (malformed)".to_string());
                }
                Geometry::MultiPolygon(polys)
            }
            other => Geometry::Unsupported(other.to_string()),
        }
    }
}

fn to_polygon(rings: &[Ring]) -> Option<Polygon<f64>> {
    let (exterior, interiors) = rings.split_first()?;
    Some(Polygon::new(
        LineString::new(exterior.clone()),
        interiors.iter().cloned().map(LineString::new).collect(),
    ))
}

/// Rings of one polygon. Only the exterior has to parse; malformed holes are
/// dropped.
fn parse_polygon(value: &Value) -> Option<Vec<Ring>> {
    let (exterior, holes) = value.as_array()?.split_first()?;
    let mut rings = vec![parse_ring(exterior)?];
    for (idx, hole) in holes.iter().enumerate() {
        match parse_ring(hole) {
            Some(ring) => rings.push(ring),
            None => debug!("Dropping malformed interior ring {}", idx + 1),
        }
    }
    Some(rings)
}

fn parse_ring(value: &Value) -> Option<Ring> {
    // Short positions are dropped, not fatal
    value
        .as_array()
        .map(|positions| positions.iter().filter_map(parse_position).collect())
}

fn parse_position(value: &Value) -> Option<Coord<f64>> {
    let pos = value.as_array()?;
    match (pos.first()?.as_f64(), pos.get(1)?.as_f64()) {
        (Some(x), Some(y)) => Some(Coord { x, y }),
        _ => None,
    }
}

/// A named boundary region (usually a country)
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Country/entity code used as the classification key
    pub id: Option<String>,
    pub geometry: Geometry,
}

impl Feature {
    pub fn new(id: Option<&str>, geometry: Geometry) -> Self {
        Self {
            id: id.map(str::to_string),
            geometry,
        }
    }
}

/// Features in document order. Order decides which feature wins where
/// exteriors overlap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Deserialize)]
struct RawCollection {
    features: Option<Vec<RawFeature>>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Value>,
    #[serde(default)]
    geometry: Option<Value>,
}

impl RawFeature {
    fn resolve_id(&self, id_properties: &[String]) -> Option<String> {
        match &self.id {
            // A present string id is authoritative, even when empty
            Some(Value::String(s)) => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }

        let props = self.properties.as_ref()?.as_object()?;
        id_properties
            .iter()
            .filter_map(|key| props.get(key).and_then(Value::as_str))
            .find(|code| !code.is_empty())
            .map(str::to_string)
    }
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Parse a GeoJSON FeatureCollection.
    ///
    /// `id_properties` lists property keys to fall back on when a feature has
    /// no top-level string or numeric `id`.
    pub fn from_slice(bytes: &[u8], id_properties: &[String]) -> Result<Self> {
        let raw: RawCollection = serde_json::from_slice(bytes)?;
        let features = raw
            .features
            .ok_or_else(|| Error::InvalidGeoJson("missing `features` array".to_string()))?;

        Ok(Self {
            features: features
                .into_iter()
                .map(|f| Feature {
                    id: f.resolve_id(id_properties),
                    geometry: Geometry::from_value(f.geometry.as_ref()),
                })
                .collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }
}
