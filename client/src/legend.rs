//! Legend: entry derivation per period plus the rendering component.

use leptos::prelude::*;

use formosa_shared::colors::Rgb;
use formosa_shared::period::Period;
use formosa_shared::{control, japanese, ming, modern, qing};

use crate::app::MapState;

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub color: Rgb,
    pub label: String,
    /// Small second line under the label.
    pub subtitle: Option<String>,
    /// Hover hint (title attribute).
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendModel {
    pub title: &'static str,
    pub entries: Vec<LegendEntry>,
    pub note: Option<&'static str>,
}

fn entry(color: Rgb, label: impl Into<String>) -> LegendEntry {
    LegendEntry {
        color,
        label: label.into(),
        subtitle: None,
        hint: None,
    }
}

/// Rebuild the legend rows for a period.
pub fn legend_model(period: Period) -> LegendModel {
    match period {
        Period::DutchSpanish => {
            let mut entries: Vec<LegendEntry> = control::Control::PRIORITY
                .into_iter()
                .filter(|c| c.in_legend())
                .map(|c| entry(c.color(), c.label()))
                .collect();
            entries.push(entry(control::UNCONTROLLED_COLOR, control::UNCONTROLLED_LABEL));
            LegendModel {
                title: "控制范围",
                entries,
                note: None,
            }
        }
        Period::Ming => {
            let mut entries: Vec<LegendEntry> = ming::MingLayer::ALL
                .into_iter()
                .map(|layer| LegendEntry {
                    hint: Some(layer.description().to_string()),
                    ..entry(layer.color(), layer.label())
                })
                .collect();
            entries.push(LegendEntry {
                hint: Some(ming::BASE_DESCRIPTION.to_string()),
                ..entry(ming::BASE_COLOR, ming::BASE_LABEL)
            });
            LegendModel {
                title: "控制范围",
                entries,
                note: Some(ming::LEGEND_NOTE),
            }
        }
        Period::Qing => LegendModel {
            title: "行政区划",
            entries: qing::LEGEND
                .iter()
                .map(|&(label, color, counties)| LegendEntry {
                    hint: Some(counties.to_string()),
                    ..entry(color, label)
                })
                .collect(),
            note: Some(qing::LEGEND_NOTE),
        },
        Period::Japanese => LegendModel {
            title: "行政区划",
            entries: japanese::LEGEND_ORDER
                .iter()
                .filter_map(|name| japanese::by_name(name))
                .map(|region| LegendEntry {
                    subtitle: Some(region.romaji.to_string()),
                    hint: Some(region.info.to_string()),
                    ..entry(region.color, region.name)
                })
                .collect(),
            note: Some(japanese::LEGEND_NOTE),
        },
        Period::Modern => LegendModel {
            title: "行政区划",
            entries: modern::legend()
                .into_iter()
                .map(|(kind, count, examples)| LegendEntry {
                    subtitle: Some(examples.to_string()),
                    hint: Some(examples.to_string()),
                    ..entry(kind.color(), format!("{}（{}个）", kind.type_name(), count))
                })
                .collect(),
            note: None,
        },
    }
}

/// Legend box overlaid on the map, rebuilt whenever the period changes.
#[component]
pub fn Legend() -> impl IntoView {
    let state: MapState = expect_context();
    let period = state.period;

    view! {
        <div
            class="map-legend"
            style="position: absolute; right: 16px; bottom: 16px; z-index: 10; background: rgba(255,255,255,0.94); border: 1px solid #e0e0e0; border-radius: 8px; padding: 12px 14px; max-width: 240px; box-shadow: 0 2px 10px rgba(0,0,0,0.12); font-size: 13px;"
        >
            {move || {
                let model = legend_model(period.get());
                view! {
                    <h4 style="margin: 0 0 8px; font-size: 14px; color: #333;">{model.title}</h4>
                    <div class="legend-items">
                        {model
                            .entries
                            .into_iter()
                            .map(|item| {
                                view! {
                                    <div
                                        class="legend-item"
                                        style="display: flex; align-items: flex-start; gap: 8px; margin-bottom: 5px;"
                                        title=item.hint.unwrap_or_default()
                                    >
                                        <span
                                            class="legend-color"
                                            style:background=item.color.css_hex()
                                            style="display: inline-block; width: 14px; height: 14px; border: 1px solid rgba(0,0,0,0.25); border-radius: 3px; margin-top: 2px; flex-shrink: 0;"
                                        />
                                        <span class="legend-label" style="color: #444; line-height: 1.35;">
                                            {item.label}
                                            {item
                                                .subtitle
                                                .map(|subtitle| {
                                                    view! {
                                                        <br />
                                                        <small style="color: #999; font-size: 11px;">{subtitle}</small>
                                                    }
                                                })}
                                        </span>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                    {model
                        .note
                        .map(|note| {
                            view! {
                                <div style="margin-top: 10px; padding-top: 10px; border-top: 1px solid #e0e0e0; font-size: 12px; color: #666;">
                                    {note}
                                </div>
                            }
                        })}
                }
            }}
        </div>
    }
}
