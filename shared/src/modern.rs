//! Modern administrative classification (1945–present).
//!
//! Features in the county asset are keyed by display name here, not index.
//! Classification tolerates traditional/simplified variants (臺/台) and
//! falls back to substring matching before defaulting to county.

use crate::colors::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountyKind {
    Municipality,
    City,
    County,
}

pub const MUNICIPALITIES: &[&str] = &[
    "臺北市", "新北市", "桃園市", "臺中市", "臺南市", "高雄市",
];

pub const CITIES: &[&str] = &["基隆市", "新竹市", "嘉義市"];

pub const COUNTIES: &[&str] = &[
    "宜蘭縣", "新竹縣", "苗栗縣", "彰化縣", "南投縣", "雲林縣", "嘉義縣",
    "屏東縣", "臺東縣", "花蓮縣", "澎湖縣", "金門縣", "連江縣",
];

impl CountyKind {
    pub const fn color(self) -> Rgb {
        match self {
            CountyKind::Municipality => Rgb::new(0x21, 0x96, 0xF3),
            CountyKind::City => Rgb::new(0x26, 0xA6, 0x9A),
            CountyKind::County => Rgb::new(0x81, 0xC7, 0x84),
        }
    }

    pub const fn type_name(self) -> &'static str {
        match self {
            CountyKind::Municipality => "直辖市",
            CountyKind::City => "市",
            CountyKind::County => "县",
        }
    }
}

/// Name variants accepted by the substring fallback. Each entry pairs the
/// kind with the substrings any of which identifies it.
const VARIANT_FALLBACK: &[(CountyKind, &[&str])] = &[
    (CountyKind::Municipality, &["臺北市", "台北市"]),
    (CountyKind::Municipality, &["新北市"]),
    (CountyKind::Municipality, &["桃園市", "桃园市"]),
    (CountyKind::Municipality, &["臺中市", "台中市"]),
    (CountyKind::Municipality, &["臺南市", "台南市"]),
    (CountyKind::Municipality, &["高雄市"]),
    (CountyKind::City, &["基隆市"]),
    (CountyKind::City, &["新竹市"]),
    (CountyKind::City, &["嘉義市", "嘉义市"]),
];

/// Classify a county/city name. Exact membership first, then the variant
/// substring fallback; anything unrecognized is a county.
pub fn classify(name: &str) -> CountyKind {
    let clean = name.trim();

    if MUNICIPALITIES.contains(&clean) {
        return CountyKind::Municipality;
    }
    if CITIES.contains(&clean) {
        return CountyKind::City;
    }
    if COUNTIES.contains(&clean) {
        return CountyKind::County;
    }

    for (kind, variants) in VARIANT_FALLBACK {
        if variants.iter().any(|v| clean.contains(v)) {
            return *kind;
        }
    }

    CountyKind::County
}

pub fn color(name: &str) -> Rgb {
    classify(name).color()
}

/// Legend rows: kind, count, and example names shown as subtitle.
pub fn legend() -> [(CountyKind, usize, &'static str); 3] {
    [
        (
            CountyKind::Municipality,
            MUNICIPALITIES.len(),
            "臺北市、新北市、桃園市等",
        ),
        (CountyKind::City, CITIES.len(), "基隆市、新竹市、嘉義市"),
        (CountyKind::County, COUNTIES.len(), "宜蘭縣、花蓮縣、澎湖縣等"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_names_classify() {
        assert_eq!(classify("臺北市"), CountyKind::Municipality);
        assert_eq!(classify("新竹市"), CountyKind::City);
        assert_eq!(classify("新竹縣"), CountyKind::County);
    }

    #[test]
    fn simplified_variants_classify_via_fallback() {
        assert_eq!(classify("台北市"), CountyKind::Municipality);
        assert_eq!(classify("嘉义市"), CountyKind::City);
        assert_eq!(classify(" 台中市 "), CountyKind::Municipality);
    }

    #[test]
    fn unrecognized_names_default_to_county() {
        assert_eq!(classify("琉球嶼"), CountyKind::County);
        assert_eq!(classify(""), CountyKind::County);
    }

    #[test]
    fn legend_counts_match_tables() {
        let rows = legend();
        assert_eq!(rows[0].1, 6);
        assert_eq!(rows[1].1, 3);
        assert_eq!(rows[2].1, 13);
    }
}
