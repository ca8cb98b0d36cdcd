//! TopoJSON topology decoding.
//!
//! The map assets are topology-encoded shape collections: a shared arc pool
//! (optionally quantized and delta-encoded) plus named geometry objects that
//! reference arcs by index. Decoding turns one named object into a
//! [`FeatureCollection`] of lon/lat polygons, assigning each feature its
//! enumeration index for registry lookups.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::geometry::{Feature, FeatureCollection, LonLat, Polygon, Ring};

#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub transform: Option<Transform>,
    pub arcs: Vec<Vec<[f64; 2]>>,
    pub objects: BTreeMap<String, Geometry>,
}

/// Quantization transform. When present, arc positions are cumulative
/// integer deltas scaled and translated back into coordinate space.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
    Polygon {
        arcs: Vec<Vec<i64>>,
        #[serde(default)]
        id: Option<Value>,
        #[serde(default)]
        properties: Option<Value>,
    },
    MultiPolygon {
        arcs: Vec<Vec<Vec<i64>>>,
        #[serde(default)]
        id: Option<Value>,
        #[serde(default)]
        properties: Option<Value>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// The document's `type` field is not `"Topology"`.
    NotATopology(String),
    /// No object with the requested name exists.
    UnknownObject(String),
    /// An object was requested by sole-object fallback but the topology
    /// holds zero or several objects.
    AmbiguousObject(usize),
    /// A geometry referenced an arc index outside the arc pool.
    BadArcIndex(i64),
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyError::NotATopology(kind) => {
                write!(f, "expected a Topology document, got type {kind:?}")
            }
            TopologyError::UnknownObject(name) => write!(f, "no object named {name:?}"),
            TopologyError::AmbiguousObject(n) => {
                write!(f, "sole-object fallback needs exactly one object, found {n}")
            }
            TopologyError::BadArcIndex(i) => write!(f, "arc index {i} out of range"),
        }
    }
}

impl std::error::Error for TopologyError {}

/// A decoded object: the feature list plus how many geometries were dropped
/// (unsupported types or degenerate rings). Callers surface `skipped` as a
/// diagnostic; dropped geometries never abort the rest of the object.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub collection: FeatureCollection,
    pub skipped: usize,
}

impl Topology {
    /// Parse a topology from raw JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    fn check_kind(&self) -> Result<(), TopologyError> {
        if self.kind == "Topology" {
            Ok(())
        } else {
            Err(TopologyError::NotATopology(self.kind.clone()))
        }
    }

    /// Decode one arc to absolute positions, applying the quantization
    /// transform when present.
    fn decode_arc(&self, index: i64) -> Result<Vec<LonLat>, TopologyError> {
        let (idx, reversed) = if index < 0 {
            ((-1 - index) as usize, true)
        } else {
            (index as usize, false)
        };
        let raw = self.arcs.get(idx).ok_or(TopologyError::BadArcIndex(index))?;

        let mut points = Vec::with_capacity(raw.len());
        match self.transform {
            Some(t) => {
                let mut x = 0.0;
                let mut y = 0.0;
                for &[dx, dy] in raw {
                    x += dx;
                    y += dy;
                    points.push([x * t.scale[0] + t.translate[0], y * t.scale[1] + t.translate[1]]);
                }
            }
            None => points.extend(raw.iter().copied()),
        }
        if reversed {
            points.reverse();
        }
        Ok(points)
    }

    /// Stitch a ring from its arc index list. Consecutive arcs share their
    /// join point, which is emitted once.
    fn decode_ring(&self, arc_indices: &[i64]) -> Result<Ring, TopologyError> {
        let mut ring: Ring = Vec::new();
        for &index in arc_indices {
            let arc = self.decode_arc(index)?;
            let skip = usize::from(!ring.is_empty());
            ring.extend(arc.into_iter().skip(skip));
        }
        Ok(ring)
    }

    fn decode_polygon(&self, rings: &[Vec<i64>]) -> Result<Option<Polygon>, TopologyError> {
        let mut out = Vec::with_capacity(rings.len());
        for arc_indices in rings {
            let ring = self.decode_ring(arc_indices)?;
            // Rings too small to enclose area are degenerate; drop them.
            if ring.len() >= 3 {
                out.push(ring);
            }
        }
        if out.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Polygon { rings: out }))
        }
    }

    /// Convert the named object into a feature collection.
    pub fn feature_collection(&self, name: &str) -> Result<Decoded, TopologyError> {
        self.check_kind()?;
        let object = self
            .objects
            .get(name)
            .ok_or_else(|| TopologyError::UnknownObject(name.to_string()))?;
        self.decode_object(object)
    }

    /// Convert the topology's only object into a feature collection. The
    /// Japanese-period asset is fetched this way: its object name is not
    /// contractual, but the file carries exactly one object.
    pub fn sole_feature_collection(&self) -> Result<Decoded, TopologyError> {
        self.check_kind()?;
        let mut objects = self.objects.values();
        match (objects.next(), objects.next()) {
            (Some(object), None) => self.decode_object(object),
            _ => Err(TopologyError::AmbiguousObject(self.objects.len())),
        }
    }

    fn decode_object(&self, object: &Geometry) -> Result<Decoded, TopologyError> {
        let geometries: &[Geometry] = match object {
            Geometry::GeometryCollection { geometries } => geometries,
            single => std::slice::from_ref(single),
        };

        let mut features = Vec::with_capacity(geometries.len());
        let mut skipped = 0usize;
        for (index, geometry) in geometries.iter().enumerate() {
            match self.decode_feature(index, geometry)? {
                Some(feature) => features.push(feature),
                None => skipped += 1,
            }
        }
        Ok(Decoded {
            collection: FeatureCollection { features },
            skipped,
        })
    }

    fn decode_feature(
        &self,
        index: usize,
        geometry: &Geometry,
    ) -> Result<Option<Feature>, TopologyError> {
        let (polygons, id, properties) = match geometry {
            Geometry::Polygon {
                arcs,
                id,
                properties,
            } => {
                let polys: Vec<Polygon> = self.decode_polygon(arcs)?.into_iter().collect();
                (polys, id, properties)
            }
            Geometry::MultiPolygon {
                arcs,
                id,
                properties,
            } => {
                let mut polys = Vec::with_capacity(arcs.len());
                for rings in arcs {
                    if let Some(poly) = self.decode_polygon(rings)? {
                        polys.push(poly);
                    }
                }
                (polys, id, properties)
            }
            Geometry::GeometryCollection { .. } | Geometry::Unsupported => return Ok(None),
        };

        if polygons.is_empty() {
            return Ok(None);
        }
        let mut feature = Feature::from_properties(index, id.as_ref(), properties.as_ref());
        feature.polygons = polygons;
        Ok(Some(feature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One quantized square arc (delta-encoded) in an object named "map".
    fn quantized_square() -> Topology {
        let text = r#"{
            "type": "Topology",
            "transform": {"scale": [0.5, 0.5], "translate": [100.0, 20.0]},
            "arcs": [
                [[0, 0], [2, 0], [0, 2], [-2, 0], [0, -2]]
            ],
            "objects": {
                "map": {
                    "type": "GeometryCollection",
                    "geometries": [
                        {"type": "Polygon", "arcs": [[0]], "properties": {"id": "tainan", "name": "臺南市"}}
                    ]
                }
            }
        }"#;
        Topology::from_json(text).expect("valid topology")
    }

    #[test]
    fn quantized_arc_decodes_with_transform() {
        let topo = quantized_square();
        let decoded = topo.feature_collection("map").expect("decode");
        assert_eq!(decoded.skipped, 0);
        let feature = &decoded.collection.features[0];
        assert_eq!(feature.id.as_deref(), Some("tainan"));
        assert_eq!(feature.name.as_deref(), Some("臺南市"));
        let ring = &feature.polygons[0].rings[0];
        assert_eq!(ring[0], [100.0, 20.0]);
        assert_eq!(ring[1], [101.0, 20.0]);
        assert_eq!(ring[2], [101.0, 21.0]);
        assert_eq!(ring[3], [100.0, 21.0]);
        assert_eq!(ring[4], [100.0, 20.0]);
    }

    #[test]
    fn negative_arc_index_reverses() {
        let text = r#"{
            "type": "Topology",
            "arcs": [
                [[0.0, 0.0], [1.0, 0.0]],
                [[1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]
            ],
            "objects": {
                "shape": {"type": "Polygon", "arcs": [[0, 1]]},
                "mirror": {"type": "Polygon", "arcs": [[-2, -1]]}
            }
        }"#;
        let topo = Topology::from_json(text).expect("valid topology");

        let fwd = topo.feature_collection("shape").expect("decode");
        let ring = &fwd.collection.features[0].polygons[0].rings[0];
        // Join point [1,0] appears once where the two arcs stitch.
        assert_eq!(
            ring,
            &vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]
        );

        let rev = topo.feature_collection("mirror").expect("decode");
        let ring = &rev.collection.features[0].polygons[0].rings[0];
        assert_eq!(
            ring,
            &vec![[0.0, 0.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]
        );
    }

    #[test]
    fn indices_follow_enumeration_order() {
        let text = r#"{
            "type": "Topology",
            "arcs": [[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]],
            "objects": {
                "regions": {
                    "type": "GeometryCollection",
                    "geometries": [
                        {"type": "Polygon", "arcs": [[0]]},
                        {"type": "Polygon", "arcs": [[0]]},
                        {"type": "Polygon", "arcs": [[0]]}
                    ]
                }
            }
        }"#;
        let topo = Topology::from_json(text).expect("valid topology");
        let decoded = topo.feature_collection("regions").expect("decode");
        let indices: Vec<usize> = decoded.collection.features.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn unsupported_geometries_are_skipped_not_fatal() {
        let text = r#"{
            "type": "Topology",
            "arcs": [[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]],
            "objects": {
                "mixed": {
                    "type": "GeometryCollection",
                    "geometries": [
                        {"type": "Point", "coordinates": [1.0, 2.0]},
                        {"type": "Polygon", "arcs": [[0]]}
                    ]
                }
            }
        }"#;
        let topo = Topology::from_json(text).expect("valid topology");
        let decoded = topo.feature_collection("mixed").expect("decode");
        assert_eq!(decoded.skipped, 1);
        assert_eq!(decoded.collection.features.len(), 1);
        // Surviving feature keeps its original enumeration index.
        assert_eq!(decoded.collection.features[0].index, 1);
    }

    #[test]
    fn unknown_object_and_bad_arc_are_errors() {
        let topo = quantized_square();
        assert_eq!(
            topo.feature_collection("nope"),
            Err(TopologyError::UnknownObject("nope".into()))
        );

        let text = r#"{
            "type": "Topology",
            "arcs": [],
            "objects": {"broken": {"type": "Polygon", "arcs": [[5]]}}
        }"#;
        let topo = Topology::from_json(text).expect("valid topology");
        assert_eq!(
            topo.feature_collection("broken"),
            Err(TopologyError::BadArcIndex(5))
        );
    }

    #[test]
    fn sole_object_fallback() {
        let topo = quantized_square();
        let decoded = topo.sole_feature_collection().expect("single object");
        assert_eq!(decoded.collection.features.len(), 1);

        let text = r#"{"type": "FeatureCollection", "arcs": [], "objects": {}}"#;
        let not_topo = Topology::from_json(text).expect("parses");
        assert!(matches!(
            not_topo.sole_feature_collection(),
            Err(TopologyError::NotATopology(_))
        ));
    }
}
