//! Dutch/Spanish-period control registry.
//!
//! Each colonial power has a direct and an indirect control category over
//! modern county ids; Penghu sits in a Ming-garrison category that renders
//! with the uncontrolled fill. Categories are resolved in a fixed priority
//! order, so an id accidentally listed twice resolves deterministically.

use crate::colors::Rgb;

/// Control categories in resolution priority order (highest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    DutchDirect,
    DutchIndirect,
    SpanishDirect,
    SpanishIndirect,
    MingControl,
}

/// Fill for territory in no category, and for the Ming-garrison category.
pub const UNCONTROLLED_COLOR: Rgb = Rgb::new(0xE0, 0xE0, 0xE0);
pub const UNCONTROLLED_LABEL: &str = "未控制区域";

const DUTCH_DIRECT: &[&str] = &["tainan"];
const DUTCH_INDIRECT: &[&str] = &[
    "chiayi_city",
    "chiayi",
    "yunlin",
    "changhua",
    "kaohsiung",
    "pingtung",
];
const SPANISH_DIRECT: &[&str] = &["keelung"];
const SPANISH_INDIRECT: &[&str] = &["taipei", "new_taipei", "yilan"];
const MING_CONTROL: &[&str] = &["penghu"];

impl Control {
    /// Resolution priority, highest first.
    pub const PRIORITY: [Control; 5] = [
        Control::DutchDirect,
        Control::DutchIndirect,
        Control::SpanishDirect,
        Control::SpanishIndirect,
        Control::MingControl,
    ];

    pub const fn members(self) -> &'static [&'static str] {
        match self {
            Control::DutchDirect => DUTCH_DIRECT,
            Control::DutchIndirect => DUTCH_INDIRECT,
            Control::SpanishDirect => SPANISH_DIRECT,
            Control::SpanishIndirect => SPANISH_INDIRECT,
            Control::MingControl => MING_CONTROL,
        }
    }

    /// Legend/category label.
    pub const fn label(self) -> &'static str {
        match self {
            Control::DutchDirect => "荷兰完全控制",
            Control::DutchIndirect => "荷兰部分控制",
            Control::SpanishDirect => "西班牙完全控制",
            Control::SpanishIndirect => "西班牙部分控制",
            Control::MingControl => "明朝控制",
        }
    }

    /// Hover status line: the administrative description shown in the
    /// tooltip, unified per colonial power.
    pub const fn status(self) -> &'static str {
        match self {
            Control::DutchDirect | Control::DutchIndirect => "荷兰台湾长官行政辖区",
            Control::SpanishDirect | Control::SpanishIndirect => "西班牙长官辖区",
            Control::MingControl => UNCONTROLLED_LABEL,
        }
    }

    /// Map fill. Ming-garrison territory intentionally renders with the
    /// uncontrolled fill.
    pub const fn color(self) -> Rgb {
        match self {
            Control::DutchDirect => Rgb::new(0x2E, 0x7D, 0x32),
            Control::DutchIndirect => Rgb::new(0xA5, 0xD6, 0xA7),
            Control::SpanishDirect => Rgb::new(0x15, 0x65, 0xC0),
            Control::SpanishIndirect => Rgb::new(0x90, 0xCA, 0xF9),
            Control::MingControl => UNCONTROLLED_COLOR,
        }
    }

    /// Whether the category gets its own legend row. Ming control renders
    /// as uncontrolled and stays out of the legend.
    pub const fn in_legend(self) -> bool {
        !matches!(self, Control::MingControl)
    }
}

/// Resolve a county id to its control category by priority order.
pub fn classify(id: &str) -> Option<Control> {
    Control::PRIORITY
        .into_iter()
        .find(|category| category.members().contains(&id))
}

/// Map fill for a county id; uncontrolled fill when unclassified.
pub fn color(id: &str) -> Rgb {
    classify(id).map_or(UNCONTROLLED_COLOR, Control::color)
}

/// Tooltip status line for a county id.
pub fn status(id: &str) -> &'static str {
    classify(id).map_or(UNCONTROLLED_LABEL, Control::status)
}

/// Ids listed in more than one category. The data model does not prevent
/// overlap; this makes a data problem observable instead of silent.
pub fn overlapping_ids() -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    let mut overlapping = Vec::new();
    for category in Control::PRIORITY {
        for &id in category.members() {
            if seen.contains(&id) {
                if !overlapping.contains(&id) {
                    overlapping.push(id);
                }
            } else {
                seen.push(id);
            }
        }
    }
    overlapping
}
