//! Ming-Zheng-period layer registry (1662–1683).
//!
//! Two claim layers over the uncontrolled base: the administrative boundary
//! regions (设里疆界, large blocks) and the settlement plots (屯垦地, small
//! point-like regions). Settlements draw last and visually override the
//! boundary layer where they overlap.

use crate::colors::Rgb;

pub const BASE_COLOR: Rgb = Rgb::new(0xE0, 0xE0, 0xE0);
pub const BASE_LABEL: &str = "未控制区域";
pub const BASE_DESCRIPTION: &str = "未控制区域（多为山区）";

/// Draw order: `Boundary` beneath `Settlement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MingLayer {
    Boundary,
    Settlement,
}

impl MingLayer {
    pub const ALL: [MingLayer; 2] = [MingLayer::Boundary, MingLayer::Settlement];

    pub const fn label(self) -> &'static str {
        match self {
            MingLayer::Boundary => "设里疆界",
            MingLayer::Settlement => "屯垦地",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            MingLayer::Boundary => "明郑设立行政管理的疆界区域（大块区域）",
            MingLayer::Settlement => "明郑小块的屯垦开发区域（小点状）",
        }
    }

    pub const fn color(self) -> Rgb {
        match self {
            MingLayer::Boundary => Rgb::new(0xFF, 0xC0, 0xCB),
            MingLayer::Settlement => Rgb::new(0x90, 0xEE, 0x90),
        }
    }
}

/// Footnote under the legend.
pub const LEGEND_NOTE: &str = "明郑时期（1662-1683）：粉色为设里疆界，绿色为屯垦地";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_draws_before_settlement() {
        assert_eq!(MingLayer::ALL, [MingLayer::Boundary, MingLayer::Settlement]);
    }

    #[test]
    fn layer_labels_and_colors() {
        assert_eq!(MingLayer::Boundary.label(), "设里疆界");
        assert_eq!(MingLayer::Settlement.label(), "屯垦地");
        assert_eq!(MingLayer::Boundary.color(), Rgb::new(0xFF, 0xC0, 0xCB));
        assert_eq!(MingLayer::Settlement.color(), Rgb::new(0x90, 0xEE, 0x90));
    }
}
