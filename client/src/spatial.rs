use formosa_shared::geometry::Bounds;

use crate::scene::Scene;

const GRID_COLS: usize = 50;
const GRID_ROWS: usize = 50;

/// A flat 2D grid over map space for cheap shape hit-testing. Cells hold
/// candidate shapes by bounding box; hits are refined with even-odd polygon
/// containment. Rebuilt only when the scene changes.
pub struct SpatialGrid {
    cells: Vec<Vec<u32>>,
    /// `(layer, shape)` per entry, pushed in draw order.
    entries: Vec<(usize, usize)>,
    bounds: Vec<Bounds>,
    min_x: f64,
    min_y: f64,
    cell_w: f64,
    cell_h: f64,
}

impl SpatialGrid {
    pub fn empty() -> Self {
        Self {
            cells: Vec::new(),
            entries: Vec::new(),
            bounds: Vec::new(),
            min_x: 0.0,
            min_y: 0.0,
            cell_w: 1.0,
            cell_h: 1.0,
        }
    }

    pub fn build(scene: &Scene) -> Self {
        let mut world = Bounds::empty();
        for layer in &scene.layers {
            for shape in &layer.shapes {
                if !shape.bounds.is_empty() {
                    world.extend(shape.bounds.min_x, shape.bounds.min_y);
                    world.extend(shape.bounds.max_x, shape.bounds.max_y);
                }
            }
        }
        if world.is_empty() {
            return Self::empty();
        }

        // Pad to keep edge shapes inside the outermost cells.
        let min_x = world.min_x - 1.0;
        let min_y = world.min_y - 1.0;
        let max_x = world.max_x + 1.0;
        let max_y = world.max_y + 1.0;

        let cell_w = (max_x - min_x) / GRID_COLS as f64;
        let cell_h = (max_y - min_y) / GRID_ROWS as f64;

        let mut cells = vec![Vec::new(); GRID_COLS * GRID_ROWS];
        let mut entries = Vec::new();
        let mut bounds = Vec::new();

        for (layer_idx, layer) in scene.layers.iter().enumerate() {
            for (shape_idx, shape) in layer.shapes.iter().enumerate() {
                if shape.bounds.is_empty() {
                    continue;
                }
                let entry = entries.len() as u32;
                entries.push((layer_idx, shape_idx));
                bounds.push(shape.bounds);

                let col_start = ((shape.bounds.min_x - min_x) / cell_w).floor().max(0.0) as usize;
                let col_end = ((shape.bounds.max_x - min_x) / cell_w)
                    .ceil()
                    .min(GRID_COLS as f64) as usize;
                let row_start = ((shape.bounds.min_y - min_y) / cell_h).floor().max(0.0) as usize;
                let row_end = ((shape.bounds.max_y - min_y) / cell_h)
                    .ceil()
                    .min(GRID_ROWS as f64) as usize;

                for row in row_start..row_end {
                    for col in col_start..col_end {
                        cells[row * GRID_COLS + col].push(entry);
                    }
                }
            }
        }

        Self {
            cells,
            entries,
            bounds,
            min_x,
            min_y,
            cell_w,
            cell_h,
        }
    }

    /// Find the topmost shape at a map coordinate. Entries are stored in
    /// draw order, so the scan runs backwards: later layers win where the
    /// Ming settlement plots overlap the boundary regions.
    pub fn find_at(&self, scene: &Scene, wx: f64, wy: f64) -> Option<(usize, usize)> {
        if self.cells.is_empty() {
            return None;
        }

        let col = ((wx - self.min_x) / self.cell_w).floor() as isize;
        let row = ((wy - self.min_y) / self.cell_h).floor() as isize;
        if col < 0 || row < 0 || col >= GRID_COLS as isize || row >= GRID_ROWS as isize {
            return None;
        }

        let cell = &self.cells[row as usize * GRID_COLS + col as usize];
        for &entry in cell.iter().rev() {
            let idx = entry as usize;
            if !self.bounds[idx].contains(wx, wy) {
                continue;
            }
            let (layer_idx, shape_idx) = self.entries[idx];
            let shape = scene.shape(layer_idx, shape_idx)?;
            if shape.polygons.iter().any(|p| p.contains(wx, wy)) {
                return Some((layer_idx, shape_idx));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Mercator;
    use crate::scene::build_scene;
    use formosa_shared::geometry::{Feature, FeatureCollection, Polygon};
    use formosa_shared::period::Period;

    fn rect_feature(index: usize, lon0: f64, lat0: f64, lon1: f64, lat1: f64) -> Feature {
        Feature {
            id: Some(format!("shape{index}")),
            name: None,
            index,
            polygons: vec![Polygon {
                rings: vec![vec![[lon0, lat0], [lon1, lat0], [lon1, lat1], [lon0, lat1]]],
            }],
        }
    }

    #[test]
    fn later_layers_win_at_overlaps() {
        let proj = Mercator::new(1160.0, 600.0);
        // Base island, a boundary region inside it, and a settlement plot
        // inside the boundary region.
        let counties = FeatureCollection {
            features: vec![rect_feature(0, 120.0, 23.0, 122.0, 25.0)],
        };
        let boundary = FeatureCollection {
            features: vec![rect_feature(0, 120.5, 23.5, 121.5, 24.5)],
        };
        let settlement = FeatureCollection {
            features: vec![rect_feature(0, 120.9, 23.9, 121.1, 24.1)],
        };
        let scene = build_scene(Period::Ming, &[counties, boundary, settlement], &proj);
        let grid = SpatialGrid::build(&scene);

        let (x, y) = proj.project(121.0, 24.0);
        assert_eq!(grid.find_at(&scene, x, y), Some((2, 0)));

        let (x, y) = proj.project(120.7, 23.7);
        assert_eq!(grid.find_at(&scene, x, y), Some((1, 0)));

        let (x, y) = proj.project(120.1, 24.8);
        assert_eq!(grid.find_at(&scene, x, y), Some((0, 0)));
    }

    #[test]
    fn misses_outside_every_shape() {
        let proj = Mercator::new(1160.0, 600.0);
        let counties = FeatureCollection {
            features: vec![rect_feature(0, 120.0, 23.0, 121.0, 24.0)],
        };
        let scene = build_scene(Period::Modern, &[counties], &proj);
        let grid = SpatialGrid::build(&scene);

        let (x, y) = proj.project(119.0, 22.0);
        assert_eq!(grid.find_at(&scene, x, y), None);
        assert_eq!(grid.find_at(&scene, -1e6, -1e6), None);
    }

    #[test]
    fn empty_scene_never_hits() {
        let proj = Mercator::new(1160.0, 600.0);
        let scene = build_scene(Period::Modern, &[], &proj);
        let grid = SpatialGrid::build(&scene);
        assert_eq!(grid.find_at(&scene, 100.0, 100.0), None);
    }

    #[test]
    fn bbox_candidates_are_refined_by_polygon_containment() {
        let proj = Mercator::new(1160.0, 600.0);
        // A triangle whose bbox covers the probe point but whose area does not.
        let triangle = Feature {
            id: Some("tri".into()),
            name: None,
            index: 0,
            polygons: vec![Polygon {
                rings: vec![vec![[120.0, 23.0], [121.0, 23.0], [120.0, 24.0]]],
            }],
        };
        let scene = build_scene(
            Period::Modern,
            &[FeatureCollection {
                features: vec![triangle],
            }],
            &proj,
        );
        let grid = SpatialGrid::build(&scene);

        let (x, y) = proj.project(120.1, 23.1);
        assert!(grid.find_at(&scene, x, y).is_some());
        // Inside the bbox, outside the hypotenuse.
        let (x, y) = proj.project(120.9, 23.9);
        assert_eq!(grid.find_at(&scene, x, y), None);
    }
}
