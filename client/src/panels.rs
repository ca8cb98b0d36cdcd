//! Info panel, curated historical-text panel, and the two modals.

use leptos::prelude::*;

use formosa_shared::period::PeriodInfo;

use crate::app::{
    DetailedMapOpen, InfoCollapsed, MapState, OriginalTextOpen, TextCollapsed,
};

/// Number of leading paragraphs shown when no excerpt matches a keyword.
const FALLBACK_PARAGRAPHS: usize = 3;

/// Select the governance-related excerpt paragraphs: any paragraph
/// containing one of the period's keywords, falling back to the first few
/// paragraphs when nothing matches.
pub fn filter_excerpts(info: &PeriodInfo) -> Vec<&'static str> {
    if info.keywords.is_empty() {
        return info.historical_text.to_vec();
    }
    let matched: Vec<&'static str> = info
        .historical_text
        .iter()
        .copied()
        .filter(|paragraph| info.keywords.iter().any(|kw| paragraph.contains(kw)))
        .collect();
    if matched.is_empty() {
        info.historical_text
            .iter()
            .copied()
            .take(FALLBACK_PARAGRAPHS)
            .collect()
    } else {
        matched
    }
}

/// Collapsible panel with the period title, years, and introduction.
#[component]
pub fn InfoPanel() -> impl IntoView {
    let state: MapState = expect_context();
    let period = state.period;
    let InfoCollapsed(collapsed) = expect_context();

    view! {
        <div
            class="info-panel"
            style="background: #fff; border: 1px solid #e0e0e0; border-radius: 8px; padding: 14px 16px; margin-bottom: 12px;"
        >
            <div style="display: flex; justify-content: space-between; align-items: baseline; gap: 8px;">
                <div>
                    <h3 id="info-title" style="margin: 0; font-size: 16px; color: #222;">
                        {move || period.get().info().title}
                    </h3>
                    <span id="info-years" style="font-size: 12px; color: #888;">
                        {move || period.get().info().years}
                    </span>
                </div>
                <button
                    id="toggle-info-btn"
                    style="border: none; background: none; color: #9896f1; cursor: pointer; font-size: 12px;"
                    on:click=move |_| collapsed.update(|v| *v = !*v)
                >
                    {move || if collapsed.get() { "展开" } else { "收起" }}
                </button>
            </div>
            {move || {
                (!collapsed.get())
                    .then(|| {
                        view! {
                            <div id="info-content" style="margin-top: 10px; font-size: 13px; color: #555; line-height: 1.7;">
                                {period
                                    .get()
                                    .info()
                                    .intro
                                    .iter()
                                    .map(|paragraph| view! { <p style="margin: 0 0 8px;">{*paragraph}</p> })
                                    .collect_view()}
                            </div>
                        }
                    })
            }}
        </div>
    }
}

/// Curated source excerpts for the period, filtered to governance-related
/// passages. Hidden entirely for periods without source text.
#[component]
pub fn HistoricalTextPanel() -> impl IntoView {
    let state: MapState = expect_context();
    let period = state.period;
    let TextCollapsed(collapsed) = expect_context();
    let OriginalTextOpen(original_open) = expect_context();

    view! {
        {move || {
            let info = period.get().info();
            (!info.historical_text.is_empty())
                .then(|| {
                    let excerpts = filter_excerpts(info);
                    view! {
                        <div
                            id="historical-text-panel"
                            style="background: #fff; border: 1px solid #e0e0e0; border-radius: 8px; padding: 14px 16px;"
                        >
                            <div style="display: flex; justify-content: space-between; align-items: baseline; gap: 8px;">
                                <h3 style="margin: 0; font-size: 15px; color: #222;">"史料记载"</h3>
                                <div style="display: flex; gap: 10px;">
                                    <button
                                        id="view-original-text-btn"
                                        style="border: none; background: none; color: #9896f1; cursor: pointer; font-size: 12px;"
                                        on:click=move |_| original_open.set(true)
                                    >
                                        "查看原文精选"
                                    </button>
                                    <button
                                        id="toggle-historical-text-btn"
                                        style="border: none; background: none; color: #9896f1; cursor: pointer; font-size: 12px;"
                                        on:click=move |_| collapsed.update(|v| *v = !*v)
                                    >
                                        {move || if collapsed.get() { "展开" } else { "收起" }}
                                    </button>
                                </div>
                            </div>
                            {(!collapsed.get())
                                .then(|| {
                                    view! {
                                        <div
                                            id="historical-text-content"
                                            style="margin-top: 10px; font-size: 13px; color: #555; line-height: 1.8; max-height: 220px; overflow-y: auto;"
                                        >
                                            {excerpts
                                                .into_iter()
                                                .map(|paragraph| view! { <p style="margin: 0 0 8px;">{paragraph}</p> })
                                                .collect_view()}
                                        </div>
                                    }
                                })}
                        </div>
                    }
                })
        }}
    }
}

/// Modal shell: dimmed backdrop that closes on backdrop click.
#[component]
fn Modal(open: RwSignal<bool>, children: ChildrenFn) -> impl IntoView {
    view! {
        {move || {
            open.get()
                .then(|| {
                    let children = children.clone();
                    view! {
                        <div
                            class="modal-backdrop"
                            style="position: fixed; inset: 0; z-index: 50; background: rgba(0,0,0,0.55); display: flex; align-items: center; justify-content: center; padding: 24px;"
                            on:click=move |e| {
                                if e.target() == e.current_target() {
                                    open.set(false);
                                }
                            }
                        >
                            <div style="background: #fff; border-radius: 10px; max-width: 820px; max-height: 85vh; overflow-y: auto; padding: 20px 24px; box-shadow: 0 10px 40px rgba(0,0,0,0.35);">
                                {children()}
                            </div>
                        </div>
                    }
                })
        }}
    }
}

/// High-resolution historical map image with credits.
#[component]
pub fn DetailedMapModal() -> impl IntoView {
    let state: MapState = expect_context();
    let period = state.period;
    let DetailedMapOpen(open) = expect_context();

    view! {
        <Modal open=open>
            {move || {
                let info = period.get().info();
                info.detailed_map
                    .map(|map| {
                        view! {
                            <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 12px;">
                                <h3 id="detailed-map-title" style="margin: 0; font-size: 16px;">
                                    {format!("{} - 详细地图", info.title)}
                                </h3>
                                <button
                                    id="close-detailed-map"
                                    style="border: none; background: none; font-size: 18px; cursor: pointer; color: #666;"
                                    on:click=move |_| open.set(false)
                                >
                                    "×"
                                </button>
                            </div>
                            <img
                                id="detailed-map-image"
                                src=map.image
                                alt=format!("{}详细地图", info.title)
                                style="max-width: 100%; border-radius: 6px;"
                            />
                            <div id="map-credits" style="margin-top: 10px; font-size: 12px; color: #888;">
                                {map.credits}
                            </div>
                        }
                    })
            }}
        </Modal>
    }
}

/// Full curated source text for the period.
#[component]
pub fn OriginalTextModal() -> impl IntoView {
    let state: MapState = expect_context();
    let period = state.period;
    let OriginalTextOpen(open) = expect_context();

    view! {
        <Modal open=open>
            {move || {
                let info = period.get().info();
                view! {
                    <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 6px;">
                        <h3 id="original-text-title" style="margin: 0; font-size: 16px;">
                            {format!("{} - 原文精选", info.title)}
                        </h3>
                        <button
                            id="close-original-text"
                            style="border: none; background: none; font-size: 18px; cursor: pointer; color: #666;"
                            on:click=move |_| open.set(false)
                        >
                            "×"
                        </button>
                    </div>
                    <div style="font-size: 14px; color: #9896f1; font-style: italic; margin-bottom: 15px;">
                        {info.source_title}
                    </div>
                    <div id="original-text-content" style="font-size: 14px; color: #444; line-height: 1.9;">
                        {info
                            .historical_text
                            .iter()
                            .map(|paragraph| view! { <p style="margin: 0 0 10px;">{*paragraph}</p> })
                            .collect_view()}
                    </div>
                }
            }}
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formosa_shared::period::Period;

    #[test]
    fn excerpts_keep_only_keyword_paragraphs() {
        for period in [Period::DutchSpanish, Period::Ming, Period::Qing, Period::Japanese] {
            let info = period.info();
            let excerpts = filter_excerpts(info);
            assert!(!excerpts.is_empty(), "{} lost all excerpts", period.key());
            for paragraph in &excerpts {
                assert!(
                    info.keywords.iter().any(|kw| paragraph.contains(kw)),
                    "{}: unmatched paragraph survived the filter",
                    period.key()
                );
            }
        }
    }

    #[test]
    fn unmatched_text_falls_back_to_leading_paragraphs() {
        let info = PeriodInfo {
            title: "t",
            years: "y",
            intro: &[],
            historical_text: &["one", "two", "three", "four"],
            keywords: &["zzz"],
            source_title: "s",
            detailed_map: None,
        };
        assert_eq!(filter_excerpts(&info), vec!["one", "two", "three"]);
    }

    #[test]
    fn modern_period_has_no_excerpts() {
        assert!(filter_excerpts(Period::Modern.info()).is_empty());
    }
}
