//! Modern county/city identifiers.
//!
//! The county boundary asset keys every feature with a stable lowercase slug
//! in `properties.id`; every control mapping and hidden-county set keys on
//! the same slugs. `modern_name` recovers the traditional-Chinese display
//! name for tooltips ("（今X）").

use crate::period::Period;

/// Slug → traditional-Chinese name, in the asset's feature order.
pub const COUNTIES: &[(&str, &str)] = &[
    ("taipei", "臺北市"),
    ("new_taipei", "新北市"),
    ("taoyuan", "桃園市"),
    ("taichung", "臺中市"),
    ("tainan", "臺南市"),
    ("kaohsiung", "高雄市"),
    ("keelung", "基隆市"),
    ("hsinchu_city", "新竹市"),
    ("chiayi_city", "嘉義市"),
    ("yilan", "宜蘭縣"),
    ("hsinchu", "新竹縣"),
    ("miaoli", "苗栗縣"),
    ("changhua", "彰化縣"),
    ("nantou", "南投縣"),
    ("yunlin", "雲林縣"),
    ("chiayi", "嘉義縣"),
    ("pingtung", "屏東縣"),
    ("taitung", "臺東縣"),
    ("hualien", "花蓮縣"),
    ("penghu", "澎湖縣"),
    ("kinmen", "金門縣"),
    ("lienchiang", "連江縣"),
];

/// Modern display name for a county slug.
pub fn modern_name(id: &str) -> Option<&'static str> {
    COUNTIES
        .iter()
        .find(|(slug, _)| *slug == id)
        .map(|(_, name)| *name)
}

/// County ids never drawn for a period. The offshore counties lie outside
/// the island frame every historical period maps; the modern view shows
/// everything.
pub fn hidden_counties(period: Period) -> &'static [&'static str] {
    match period {
        Period::Modern => &[],
        _ => &["kinmen", "lienchiang"],
    }
}
