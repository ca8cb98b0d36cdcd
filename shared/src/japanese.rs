//! Japanese-period region registry (1926, 五州三厅).

use crate::colors::Rgb;

/// Fill for indices absent from the registry.
pub const DEFAULT_COLOR: Rgb = Rgb::new(0xBD, 0xBD, 0xBD);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JapaneseRegion {
    pub name: &'static str,
    pub romaji: &'static str,
    /// Administrative note: seat of government and jurisdiction.
    pub info: &'static str,
    pub color: Rgb,
}

/// Geometry index → prefecture, following the 1926 asset's feature order.
pub const REGIONS: &[JapaneseRegion] = &[
    JapaneseRegion {
        name: "花蓮港廳",
        romaji: "Karenkō",
        info: "厅治：花蓮港。管辖花莲地区",
        color: Rgb::new(0xE6, 0xD5, 0xE6),
    },
    JapaneseRegion {
        name: "臺北州",
        romaji: "Taihoku",
        info: "首府：臺北市。管辖基隆、宜兰等地",
        color: Rgb::new(0xFF, 0xB6, 0xC1),
    },
    JapaneseRegion {
        name: "新竹州",
        romaji: "Shinchiku",
        info: "首府：新竹市。管辖桃园、新竹等地",
        color: Rgb::new(0xFF, 0xE4, 0xC4),
    },
    JapaneseRegion {
        name: "臺中州",
        romaji: "Taichū",
        info: "首府：臺中市。管辖苗栗、彰化、南投等地",
        color: Rgb::new(0xFF, 0xFF, 0xE0),
    },
    JapaneseRegion {
        name: "臺南州",
        romaji: "Tainan",
        info: "首府：臺南市。管辖嘉义、云林等地",
        color: Rgb::new(0x90, 0xEE, 0x90),
    },
    JapaneseRegion {
        name: "臺東廳",
        romaji: "Taitō",
        info: "厅治：臺東。管辖台东地区",
        color: Rgb::new(0xFF, 0xB6, 0xD9),
    },
    JapaneseRegion {
        name: "高雄州",
        romaji: "Takao",
        info: "首府：高雄市。管辖屏东、台南等地",
        color: Rgb::new(0xDD, 0xA0, 0xDD),
    },
    JapaneseRegion {
        name: "澎湖廳",
        romaji: "Hōko",
        info: "厅治：馬公。管辖澎湖群岛",
        color: Rgb::new(0xC8, 0xB4, 0xC8),
    },
];

pub fn region(index: usize) -> Option<&'static JapaneseRegion> {
    REGIONS.get(index)
}

pub fn color(index: usize) -> Rgb {
    region(index).map_or(DEFAULT_COLOR, |r| r.color)
}

/// Legend order: the five prefectures, then the three subprefectures.
pub const LEGEND_ORDER: &[&str] = &[
    "臺北州", "新竹州", "臺中州", "臺南州", "高雄州", "臺東廳", "花蓮港廳", "澎湖廳",
];

/// Footnote under the legend.
pub const LEGEND_NOTE: &str = "日据时期（1926年）：五州三厅制度";

pub fn by_name(name: &str) -> Option<&'static JapaneseRegion> {
    REGIONS.iter().find(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_resolve_to_prefectures() {
        assert_eq!(region(1).map(|r| r.name), Some("臺北州"));
        assert_eq!(region(1).map(|r| r.romaji), Some("Taihoku"));
        assert_eq!(color(4), Rgb::new(0x90, 0xEE, 0x90));
    }

    #[test]
    fn unmapped_index_gets_default_gray() {
        assert_eq!(region(8), None);
        assert_eq!(color(8), DEFAULT_COLOR);
    }

    #[test]
    fn legend_order_covers_every_region_exactly_once() {
        assert_eq!(LEGEND_ORDER.len(), REGIONS.len());
        for name in LEGEND_ORDER {
            assert!(by_name(name).is_some(), "{name} missing from registry");
        }
    }
}
