use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A longitude/latitude position in degrees.
pub type LonLat = [f64; 2];

/// A closed ring of positions. The last position is not required to repeat
/// the first; containment treats the ring as implicitly closed.
pub type Ring = Vec<LonLat>;

/// A polygon: one outer ring plus any number of holes. Containment uses the
/// even-odd rule, so outer/hole distinction never needs winding checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub rings: Vec<Ring>,
}

/// One drawable shape with its property bag. Features are owned by the
/// period that decoded them and discarded wholesale on period switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Stable identifier from the source properties, when present.
    pub id: Option<String>,
    /// Display name from the source properties, when present.
    pub name: Option<String>,
    /// Enumeration order within the source object. Registry lookups for the
    /// Qing and Japanese maps key on this.
    pub index: usize,
    pub polygons: Vec<Polygon>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// Axis-aligned bounding box over positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn empty() -> Self {
        Self {
            min_x: f64::MAX,
            min_y: f64::MAX,
            max_x: f64::MIN,
            max_y: f64::MIN,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn extend(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl Feature {
    /// Extract id/name/index from a TopoJSON property bag. A bare string or
    /// number id on the geometry itself takes precedence over `properties.id`.
    pub fn from_properties(index: usize, id: Option<&Value>, properties: Option<&Value>) -> Self {
        let prop_str = |key: &str| {
            properties
                .and_then(|p| p.get(key))
                .and_then(value_as_string)
        };
        let id = id.and_then(value_as_string).or_else(|| prop_str("id"));
        let name = prop_str("name");
        Self {
            id,
            name,
            index,
            polygons: Vec::new(),
        }
    }
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Even-odd point-in-ring test. The ring is treated as closed.
pub fn ring_contains(ring: &[LonLat], x: f64, y: f64) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl Polygon {
    /// Even-odd containment across all rings: a point inside an odd number
    /// of rings (outer minus holes) is inside the polygon.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let mut crossings = 0;
        for ring in &self.rings {
            if ring_contains(ring, x, y) {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }

    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds::empty();
        for ring in &self.rings {
            for &[x, y] in ring {
                b.extend(x, y);
            }
        }
        b
    }
}
