//! Per-period scene building.
//!
//! A `Scene` is the drawable output of one period: ordered layers of filled
//! shapes, each carrying its tooltip content. Scenes replace each other
//! atomically on period switch, so exactly one period's layer classes exist
//! at any time. Layer order is z-order: base/unclaimed layers come first
//! and claim layers draw over them.

use formosa_shared::colors::Rgb;
use formosa_shared::geometry::{Bounds, Feature, FeatureCollection};
use formosa_shared::ming::MingLayer;
use formosa_shared::period::Period;
use formosa_shared::{control, counties, japanese, ming, modern, qing};

use crate::projection::{Mercator, ProjectedPolygon};

/// Layer identity, carrying the original stylesheet class vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerClass {
    County,
    QingBase,
    QingRegion,
    MingBase,
    MingRegion(MingLayer),
    JapaneseRegion,
}

impl LayerClass {
    pub const fn css_class(self) -> &'static str {
        match self {
            LayerClass::County => "county",
            LayerClass::QingBase => "qing-base",
            LayerClass::QingRegion => "qing-region",
            LayerClass::MingBase => "ming-base",
            LayerClass::MingRegion(_) => "ming-region",
            LayerClass::JapaneseRegion => "japanese-region",
        }
    }

    /// Unclaimed-territory base layers, always drawn beneath claim layers.
    pub const fn is_base(self) -> bool {
        matches!(self, LayerClass::QingBase | LayerClass::MingBase)
    }
}

/// The layer classes a period may draw, in z-order.
pub const fn allowed_classes(period: Period) -> &'static [LayerClass] {
    match period {
        Period::DutchSpanish | Period::Modern => &[LayerClass::County],
        Period::Qing => &[LayerClass::QingBase, LayerClass::QingRegion],
        Period::Ming => &[
            LayerClass::MingBase,
            LayerClass::MingRegion(MingLayer::Boundary),
            LayerClass::MingRegion(MingLayer::Settlement),
        ],
        Period::Japanese => &[LayerClass::JapaneseRegion],
    }
}

/// Hover card content for one shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipContent {
    pub heading: String,
    pub lines: Vec<String>,
    pub note: Option<&'static str>,
}

/// One filled, stroked, hoverable shape.
#[derive(Debug, Clone)]
pub struct Shape {
    pub fill: Rgb,
    pub polygons: Vec<ProjectedPolygon>,
    pub bounds: Bounds,
    pub tooltip: TooltipContent,
}

#[derive(Debug, Clone)]
pub struct Layer {
    pub class: LayerClass,
    pub shapes: Vec<Shape>,
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub period: Period,
    pub layers: Vec<Layer>,
    /// Features whose geometry failed to project; logged by the caller.
    pub dropped: usize,
}

impl Scene {
    pub fn shape(&self, layer: usize, shape: usize) -> Option<&Shape> {
        self.layers.get(layer)?.shapes.get(shape)
    }
}

fn projected_bounds(polygons: &[ProjectedPolygon]) -> Bounds {
    let mut bounds = Bounds::empty();
    for polygon in polygons {
        for ring in &polygon.rings {
            for &(x, y) in ring {
                bounds.extend(x, y);
            }
        }
    }
    bounds
}

/// Assemble one period's scene from its decoded geometry, in the order the
/// period's `SourceFile` list was fetched.
pub fn build_scene(period: Period, collections: &[FeatureCollection], proj: &Mercator) -> Scene {
    let empty = FeatureCollection::default();
    let source = |i: usize| collections.get(i).unwrap_or(&empty);

    let mut builder = SceneBuilder::new(period, proj);
    match period {
        Period::DutchSpanish => builder.dutch_spanish(source(0)),
        Period::Modern => builder.modern(source(0)),
        Period::Qing => builder.qing(source(0), source(1)),
        Period::Ming => builder.ming(source(0), source(1), source(2)),
        Period::Japanese => builder.japanese(source(0)),
    }
    builder.finish()
}

struct SceneBuilder<'a> {
    period: Period,
    proj: &'a Mercator,
    layers: Vec<Layer>,
    dropped: usize,
}

impl<'a> SceneBuilder<'a> {
    fn new(period: Period, proj: &'a Mercator) -> Self {
        Self {
            period,
            proj,
            layers: Vec::new(),
            dropped: 0,
        }
    }

    fn finish(self) -> Scene {
        Scene {
            period: self.period,
            layers: self.layers,
            dropped: self.dropped,
        }
    }

    fn shape(&mut self, feature: &Feature, fill: Rgb, tooltip: TooltipContent) -> Option<Shape> {
        match self.proj.project_feature(feature) {
            Some(polygons) => {
                let bounds = projected_bounds(&polygons);
                Some(Shape {
                    fill,
                    polygons,
                    bounds,
                    tooltip,
                })
            }
            None => {
                self.dropped += 1;
                None
            }
        }
    }

    fn is_hidden(&self, feature: &Feature) -> bool {
        let hidden = counties::hidden_counties(self.period);
        feature
            .id
            .as_deref()
            .is_some_and(|id| hidden.contains(&id))
    }

    /// County layer colored and labeled by a per-feature closure.
    fn county_layer(
        &mut self,
        class: LayerClass,
        collection: &FeatureCollection,
        mut describe: impl FnMut(&Feature) -> (Rgb, TooltipContent),
    ) {
        let mut shapes = Vec::with_capacity(collection.features.len());
        for feature in &collection.features {
            if self.is_hidden(feature) {
                continue;
            }
            let (fill, tooltip) = describe(feature);
            if let Some(shape) = self.shape(feature, fill, tooltip) {
                shapes.push(shape);
            }
        }
        self.layers.push(Layer { class, shapes });
    }

    fn dutch_spanish(&mut self, counties: &FeatureCollection) {
        self.county_layer(LayerClass::County, counties, |feature| {
            let id = feature.id.as_deref().unwrap_or("");
            let modern_name = counties::modern_name(id)
                .map(str::to_string)
                .or_else(|| feature.name.clone())
                .unwrap_or_else(|| id.to_string());
            let tooltip = TooltipContent {
                heading: control::status(id).to_string(),
                lines: vec![format!("（今{modern_name}）")],
                note: None,
            };
            (control::color(id), tooltip)
        });
    }

    fn modern(&mut self, counties: &FeatureCollection) {
        self.county_layer(LayerClass::County, counties, |feature| {
            let name = feature.name.clone().unwrap_or_default();
            let kind = modern::classify(&name);
            let tooltip = TooltipContent {
                heading: name,
                lines: vec![format!("类型：{}", kind.type_name())],
                note: Some("现代行政区划"),
            };
            (kind.color(), tooltip)
        });
    }

    /// Gray island base shared by the Qing and Ming maps: territory the
    /// regime never formally administered.
    fn unclaimed_base(
        &mut self,
        class: LayerClass,
        counties: &FeatureCollection,
        tooltip: &TooltipContent,
        fill: Rgb,
    ) {
        self.county_layer(class, counties, |_| (fill, tooltip.clone()));
    }

    fn qing(&mut self, counties: &FeatureCollection, regions: &FeatureCollection) {
        let base_tooltip = TooltipContent {
            heading: "中央山地".to_string(),
            lines: vec!["清朝未正式设治的山区".to_string()],
            note: Some("包括中央山脉及东部部分地区"),
        };
        self.unclaimed_base(
            LayerClass::QingBase,
            counties,
            &base_tooltip,
            qing::UNMAPPED_COLOR,
        );

        let mut shapes = Vec::with_capacity(regions.features.len());
        for feature in &regions.features {
            let tooltip = match qing::region(feature.index) {
                Some(region) => TooltipContent {
                    heading: region.name.to_string(),
                    lines: vec![format!("所属：{}", region.prefecture)],
                    note: Some("清代行政区划"),
                },
                None => TooltipContent {
                    heading: qing::UNMAPPED_NAME.to_string(),
                    lines: vec!["清朝未正式设治的山区".to_string()],
                    note: None,
                },
            };
            if let Some(shape) = self.shape(feature, qing::color(feature.index), tooltip) {
                shapes.push(shape);
            }
        }
        self.layers.push(Layer {
            class: LayerClass::QingRegion,
            shapes,
        });
    }

    fn ming(
        &mut self,
        counties: &FeatureCollection,
        boundary: &FeatureCollection,
        settlement: &FeatureCollection,
    ) {
        let base_tooltip = TooltipContent {
            heading: ming::BASE_LABEL.to_string(),
            lines: Vec::new(),
            note: None,
        };
        self.unclaimed_base(
            LayerClass::MingBase,
            counties,
            &base_tooltip,
            ming::BASE_COLOR,
        );

        for (layer, collection) in [
            (MingLayer::Boundary, boundary),
            (MingLayer::Settlement, settlement),
        ] {
            let tooltip = TooltipContent {
                heading: layer.label().to_string(),
                lines: vec![layer.description().to_string()],
                note: Some("明郑时期行政区划"),
            };
            let mut shapes = Vec::with_capacity(collection.features.len());
            for feature in &collection.features {
                if let Some(shape) = self.shape(feature, layer.color(), tooltip.clone()) {
                    shapes.push(shape);
                }
            }
            self.layers.push(Layer {
                class: LayerClass::MingRegion(layer),
                shapes,
            });
        }
    }

    fn japanese(&mut self, regions: &FeatureCollection) {
        let mut shapes = Vec::with_capacity(regions.features.len());
        for feature in &regions.features {
            let tooltip = match japanese::region(feature.index) {
                Some(region) => TooltipContent {
                    heading: region.name.to_string(),
                    lines: vec![region.romaji.to_string(), region.info.to_string()],
                    note: Some("日据时期行政区划"),
                },
                None => TooltipContent {
                    heading: "未命名区域".to_string(),
                    lines: vec![format!("索引: {}", feature.index)],
                    note: None,
                },
            };
            if let Some(shape) = self.shape(feature, japanese::color(feature.index), tooltip) {
                shapes.push(shape);
            }
        }
        self.layers.push(Layer {
            class: LayerClass::JapaneseRegion,
            shapes,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formosa_shared::geometry::Polygon;

    fn proj() -> Mercator {
        Mercator::new(1160.0, 600.0)
    }

    fn square(lon: f64, lat: f64) -> Vec<Polygon> {
        vec![Polygon {
            rings: vec![vec![
                [lon, lat],
                [lon + 0.2, lat],
                [lon + 0.2, lat + 0.2],
                [lon, lat + 0.2],
            ]],
        }]
    }

    fn feature(index: usize, id: Option<&str>, name: Option<&str>) -> Feature {
        Feature {
            id: id.map(str::to_string),
            name: name.map(str::to_string),
            index,
            polygons: square(120.0 + index as f64 * 0.3, 23.0),
        }
    }

    fn collection(features: Vec<Feature>) -> FeatureCollection {
        FeatureCollection { features }
    }

    fn class_list(scene: &Scene) -> Vec<LayerClass> {
        scene.layers.iter().map(|l| l.class).collect()
    }

    #[test]
    fn every_scene_only_draws_its_own_period_classes() {
        let counties = collection(vec![
            feature(0, Some("tainan"), Some("臺南市")),
            feature(1, Some("nantou"), Some("南投縣")),
        ]);
        let regions = collection(vec![feature(0, None, None)]);

        for period in Period::ALL {
            let scene = build_scene(
                period,
                &[counties.clone(), regions.clone(), regions.clone()],
                &proj(),
            );
            assert_eq!(scene.period, period);
            assert_eq!(class_list(&scene), allowed_classes(period).to_vec());
        }
    }

    #[test]
    fn base_layers_precede_claim_layers() {
        for period in Period::ALL {
            let classes = allowed_classes(period);
            let first_claim = classes.iter().position(|c| !c.is_base());
            let last_base = classes.iter().rposition(|c| c.is_base());
            if let (Some(claim), Some(base)) = (first_claim, last_base) {
                assert!(base < claim, "{period:?} draws a base above a claim layer");
            }
        }
    }

    #[test]
    fn ming_settlements_draw_last() {
        let counties = collection(vec![feature(0, Some("tainan"), None)]);
        let boundary = collection(vec![feature(0, None, None)]);
        let settlement = collection(vec![feature(0, None, None)]);
        let scene = build_scene(
            Period::Ming,
            &[counties, boundary, settlement],
            &proj(),
        );
        assert_eq!(
            scene.layers.last().map(|l| l.class),
            Some(LayerClass::MingRegion(MingLayer::Settlement))
        );
    }

    #[test]
    fn hidden_counties_are_not_drawn_in_historical_periods() {
        let counties = collection(vec![
            feature(0, Some("tainan"), Some("臺南市")),
            feature(1, Some("kinmen"), Some("金門縣")),
        ]);

        let historical = build_scene(Period::DutchSpanish, &[counties.clone()], &proj());
        assert_eq!(historical.layers[0].shapes.len(), 1);

        let modern = build_scene(Period::Modern, &[counties], &proj());
        assert_eq!(modern.layers[0].shapes.len(), 2);
    }

    #[test]
    fn dutch_spanish_colors_and_labels_follow_the_control_registry() {
        let counties = collection(vec![
            feature(0, Some("tainan"), Some("臺南市")),
            feature(1, Some("nantou"), Some("南投縣")),
            feature(2, Some("penghu"), Some("澎湖縣")),
        ]);
        let scene = build_scene(Period::DutchSpanish, &[counties], &proj());
        let shapes = &scene.layers[0].shapes;

        assert_eq!(shapes[0].fill, control::Control::DutchDirect.color());
        assert_eq!(shapes[0].tooltip.heading, "荷兰台湾长官行政辖区");
        assert_eq!(shapes[0].tooltip.lines, vec!["（今臺南市）".to_string()]);

        assert_eq!(shapes[1].fill, control::UNCONTROLLED_COLOR);
        assert_eq!(shapes[1].tooltip.heading, control::UNCONTROLLED_LABEL);

        // Ming-garrison Penghu renders exactly like uncontrolled territory.
        assert_eq!(shapes[2].fill, control::UNCONTROLLED_COLOR);
        assert_eq!(shapes[2].tooltip.heading, control::UNCONTROLLED_LABEL);
    }

    #[test]
    fn qing_unmapped_regions_fall_back_to_central_mountains() {
        let counties = collection(vec![feature(0, Some("tainan"), None)]);
        let regions = collection(vec![feature(0, None, None), feature(42, None, None)]);
        let scene = build_scene(Period::Qing, &[counties, regions], &proj());

        let region_layer = &scene.layers[1];
        assert_eq!(region_layer.class, LayerClass::QingRegion);
        assert_eq!(region_layer.shapes[0].tooltip.heading, "安平县");
        assert_eq!(region_layer.shapes[0].fill, qing::TAINAN_FU_COLOR);
        assert_eq!(region_layer.shapes[1].tooltip.heading, qing::UNMAPPED_NAME);
        assert_eq!(region_layer.shapes[1].fill, qing::UNMAPPED_COLOR);
    }

    #[test]
    fn modern_classification_keys_on_name_not_index() {
        let counties = collection(vec![
            feature(5, Some("taipei"), Some("臺北市")),
            feature(9, Some("hsinchu"), Some("新竹縣")),
        ]);
        let scene = build_scene(Period::Modern, &[counties], &proj());
        let shapes = &scene.layers[0].shapes;
        assert_eq!(shapes[0].fill, modern::CountyKind::Municipality.color());
        assert_eq!(shapes[1].fill, modern::CountyKind::County.color());
        assert_eq!(shapes[1].tooltip.lines, vec!["类型：县".to_string()]);
    }

    #[test]
    fn japanese_tooltip_carries_romaji_and_note() {
        let regions = collection(vec![feature(1, None, None), feature(9, None, None)]);
        let scene = build_scene(Period::Japanese, &[regions], &proj());
        let shapes = &scene.layers[0].shapes;
        assert_eq!(shapes[0].tooltip.heading, "臺北州");
        assert_eq!(shapes[0].tooltip.lines[0], "Taihoku");
        assert_eq!(shapes[1].tooltip.heading, "未命名区域");
        assert_eq!(shapes[1].fill, japanese::DEFAULT_COLOR);
    }

    #[test]
    fn switching_default_to_qing_replaces_every_layer_class() {
        let counties = collection(vec![feature(0, Some("tainan"), Some("臺南市"))]);
        let regions = collection(vec![feature(0, None, None)]);

        let default_scene = build_scene(Period::DutchSpanish, &[counties.clone()], &proj());
        let qing_scene = build_scene(Period::Qing, &[counties, regions], &proj());

        let default_classes = class_list(&default_scene);
        let qing_classes = class_list(&qing_scene);
        assert!(default_classes.iter().all(|c| !qing_classes.contains(c)));
        assert_eq!(
            qing_classes,
            vec![LayerClass::QingBase, LayerClass::QingRegion]
        );
    }

    #[test]
    fn degenerate_geometry_is_dropped_and_counted() {
        let mut broken = feature(0, Some("tainan"), None);
        broken.polygons = vec![Polygon {
            rings: vec![vec![[120.0, 23.0], [120.1, 23.0]]],
        }];
        let counties = collection(vec![broken, feature(1, Some("nantou"), None)]);
        let scene = build_scene(Period::DutchSpanish, &[counties], &proj());
        assert_eq!(scene.dropped, 1);
        assert_eq!(scene.layers[0].shapes.len(), 1);
    }
}
