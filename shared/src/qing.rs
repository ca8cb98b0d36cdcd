//! Qing-period region registry (光绪二十年 / 1894).
//!
//! The 1894 administrative asset carries no usable property names, so the
//! registry keys on feature enumeration index. Three prefectures plus the
//! Taitung independent subprefecture; unmapped indices are the Central
//! Mountains, which the Qing never formally administered.

use crate::colors::Rgb;

pub const TAIPEI_FU_COLOR: Rgb = Rgb::new(0x21, 0x96, 0xF3);
pub const TAIWAN_FU_COLOR: Rgb = Rgb::new(0x4C, 0xAF, 0x50);
pub const TAINAN_FU_COLOR: Rgb = Rgb::new(0xFF, 0x98, 0x00);
pub const TAITUNG_ZHOU_COLOR: Rgb = Rgb::new(0x9C, 0x27, 0xB0);

pub const UNMAPPED_COLOR: Rgb = Rgb::new(0xE0, 0xE0, 0xE0);
pub const UNMAPPED_NAME: &str = "中央山地（未控制区域）";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QingRegion {
    pub name: &'static str,
    pub prefecture: &'static str,
    pub color: Rgb,
}

const fn taipei(name: &'static str) -> QingRegion {
    QingRegion {
        name,
        prefecture: "台北府",
        color: TAIPEI_FU_COLOR,
    }
}

const fn taiwan(name: &'static str) -> QingRegion {
    QingRegion {
        name,
        prefecture: "台湾府",
        color: TAIWAN_FU_COLOR,
    }
}

const fn tainan(name: &'static str) -> QingRegion {
    QingRegion {
        name,
        prefecture: "台南府",
        color: TAINAN_FU_COLOR,
    }
}

/// Geometry index → region, following the 1894 asset's feature order.
pub const REGIONS: &[QingRegion] = &[
    tainan("安平县"),
    taipei("宜兰县"),
    tainan("恒春县"),
    taiwan("苗栗县"),
    taiwan("台湾县"),
    taipei("基隆厅"),
    taipei("淡水县"),
    taiwan("云林县"),
    taipei("新竹县"),
    tainan("嘉义县"),
    taiwan("埔里社厅"),
    tainan("澎湖厅"),
    taiwan("彰化县"),
    QingRegion {
        name: "台东直隶州",
        prefecture: "直隶州",
        color: TAITUNG_ZHOU_COLOR,
    },
    tainan("凤山县"),
    tainan("澎湖厅（离岛）"),
    tainan("澎湖厅（外岛）"),
];

pub fn region(index: usize) -> Option<&'static QingRegion> {
    REGIONS.get(index)
}

/// Fill for a geometry index; unmapped indices get the Central Mountains
/// fallback fill.
pub fn color(index: usize) -> Rgb {
    region(index).map_or(UNMAPPED_COLOR, |r| r.color)
}

/// Legend rows: prefecture name, fill, and subordinate counties as subtitle.
pub const LEGEND: &[(&str, Rgb, &str)] = &[
    ("台北府", TAIPEI_FU_COLOR, "宜兰县、基隆厅、淡水县、新竹县（4个）"),
    (
        "台湾府",
        TAIWAN_FU_COLOR,
        "台湾县、彰化县、埔里社厅、苗栗县、云林县（5个）",
    ),
    (
        "台南府",
        TAINAN_FU_COLOR,
        "嘉义县、安平县、凤山县、恒春县、澎湖厅（5个）",
    ),
    ("台东直隶州", TAITUNG_ZHOU_COLOR, "直隶于台湾省（1个）"),
    ("中央山地", UNMAPPED_COLOR, "未正式设治的山区"),
];

/// Footnote under the legend.
pub const LEGEND_NOTE: &str = "清光绪二十年（1894年）：三府一直隶州，共十一县三厅";
