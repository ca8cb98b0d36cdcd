//! Spherical-Mercator projection fixed on the Taiwan frame.
//!
//! Center (120.65°E, 23.6°N), scale 7000, translate to the canvas
//! midpoint. Features are projected once per period load; pan/zoom happens
//! downstream in screen space.

use std::f64::consts::FRAC_PI_4;

use formosa_shared::geometry::Feature;

/// Map frame center in degrees.
pub const CENTER: [f64; 2] = [120.65, 23.6];
/// Projection scale factor (projected radians → pixels).
pub const SCALE: f64 = 7000.0;

#[derive(Debug, Clone, Copy)]
pub struct Mercator {
    translate_x: f64,
    translate_y: f64,
    center_x_rad: f64,
    center_y_merc: f64,
}

/// A feature's polygon projected into map pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPolygon {
    pub rings: Vec<Vec<(f64, f64)>>,
}

fn mercator_y(lat_rad: f64) -> f64 {
    (FRAC_PI_4 + lat_rad / 2.0).tan().ln()
}

impl Mercator {
    /// Projection for a drawing surface of the given size; the frame center
    /// lands on the surface midpoint.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            translate_x: width / 2.0,
            translate_y: height / 2.0,
            center_x_rad: CENTER[0].to_radians(),
            center_y_merc: mercator_y(CENTER[1].to_radians()),
        }
    }

    /// Project a lon/lat position to map pixels. Screen y grows downward,
    /// so northern latitudes project above the center.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let x = self.translate_x + SCALE * (lon.to_radians() - self.center_x_rad);
        let y = self.translate_y - SCALE * (mercator_y(lat.to_radians()) - self.center_y_merc);
        (x, y)
    }

    /// Project every polygon of a feature. Rings that collapse (fewer than
    /// three finite positions) are dropped; a feature left with no drawable
    /// polygon projects to `None` so the caller can skip and log it.
    pub fn project_feature(&self, feature: &Feature) -> Option<Vec<ProjectedPolygon>> {
        let mut polygons = Vec::with_capacity(feature.polygons.len());
        for polygon in &feature.polygons {
            let mut rings = Vec::with_capacity(polygon.rings.len());
            for ring in &polygon.rings {
                let projected: Vec<(f64, f64)> = ring
                    .iter()
                    .map(|&[lon, lat]| self.project(lon, lat))
                    .filter(|&(x, y)| x.is_finite() && y.is_finite())
                    .collect();
                if projected.len() >= 3 {
                    rings.push(projected);
                }
            }
            if !rings.is_empty() {
                polygons.push(ProjectedPolygon { rings });
            }
        }
        if polygons.is_empty() {
            None
        } else {
            Some(polygons)
        }
    }
}

impl ProjectedPolygon {
    /// Even-odd containment in map pixel space.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let mut crossings = 0;
        for ring in &self.rings {
            if ring_contains(ring, x, y) {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }
}

fn ring_contains(ring: &[(f64, f64)], x: f64, y: f64) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use formosa_shared::geometry::{Feature, Polygon};

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-6,
            "expected {expected}, got {actual} (diff: {diff})"
        );
    }

    #[test]
    fn frame_center_projects_to_canvas_midpoint() {
        let proj = Mercator::new(1160.0, 600.0);
        let (x, y) = proj.project(CENTER[0], CENTER[1]);
        assert_close(x, 580.0);
        assert_close(y, 300.0);
    }

    #[test]
    fn east_is_right_north_is_up() {
        let proj = Mercator::new(1160.0, 600.0);
        let (cx, cy) = proj.project(CENTER[0], CENTER[1]);
        let (ex, _) = proj.project(CENTER[0] + 0.5, CENTER[1]);
        let (_, ny) = proj.project(CENTER[0], CENTER[1] + 0.5);
        assert!(ex > cx);
        assert!(ny < cy);
    }

    #[test]
    fn one_degree_of_longitude_spans_scale_radians() {
        let proj = Mercator::new(0.0, 0.0);
        let (x0, _) = proj.project(120.0, 23.6);
        let (x1, _) = proj.project(121.0, 23.6);
        assert_close(x1 - x0, SCALE * 1f64.to_radians());
    }

    #[test]
    fn degenerate_features_project_to_none() {
        let proj = Mercator::new(1160.0, 600.0);
        let feature = Feature {
            id: None,
            name: None,
            index: 0,
            polygons: vec![Polygon {
                rings: vec![vec![[120.0, 23.0], [120.1, 23.0]]],
            }],
        };
        assert_eq!(proj.project_feature(&feature), None);
    }

    #[test]
    fn mixed_features_keep_their_valid_polygons() {
        let proj = Mercator::new(1160.0, 600.0);
        let feature = Feature {
            id: None,
            name: None,
            index: 0,
            polygons: vec![
                Polygon {
                    rings: vec![vec![[120.0, 23.0], [120.1, 23.0]]],
                },
                Polygon {
                    rings: vec![vec![[120.0, 23.0], [121.0, 23.0], [120.5, 24.0]]],
                },
            ],
        };
        let projected = proj.project_feature(&feature).expect("one valid polygon");
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].rings[0].len(), 3);
    }

    #[test]
    fn projected_polygon_containment() {
        let proj = Mercator::new(1160.0, 600.0);
        let feature = Feature {
            id: None,
            name: None,
            index: 0,
            polygons: vec![Polygon {
                rings: vec![vec![[120.0, 23.0], [121.0, 23.0], [121.0, 24.0], [120.0, 24.0]]],
            }],
        };
        let polygons = proj.project_feature(&feature).expect("valid");
        let (cx, cy) = proj.project(120.5, 23.5);
        assert!(polygons[0].contains(cx, cy));
        let (ox, oy) = proj.project(119.0, 23.5);
        assert!(!polygons[0].contains(ox, oy));
    }
}
