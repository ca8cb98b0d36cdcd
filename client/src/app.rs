use std::cell::RefCell;
use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

use formosa_shared::period::Period;

use crate::canvas::{MAP_HEIGHT, MapCanvas};
use crate::legend::Legend;
use crate::loader::{LoadState, TopologyCache, load_period};
use crate::panels::{DetailedMapModal, HistoricalTextPanel, InfoPanel, OriginalTextModal};
use crate::scene::Scene;
use crate::viewport::Viewport;

/// Session state owned by the period orchestration: the active period, its
/// installed scene, the load bookkeeping, and the geometry cache. Handed to
/// components and to `load_period` as one context value instead of a pile
/// of process-wide globals.
#[derive(Clone, Copy)]
pub struct MapState {
    pub period: RwSignal<Period>,
    pub scene: RwSignal<Option<Scene>>,
    pub load_nonce: RwSignal<u64>,
    pub load_state: RwSignal<LoadState>,
    pub map_size: RwSignal<(f64, f64)>,
    pub cache: StoredValue<TopologyCache>,
}

/// Newtype wrappers give same-shaped signals distinct types for Leptos
/// context (without them, `provide_context` overwrites one with the other).
#[derive(Clone, Copy)]
pub struct HoveredShape(pub RwSignal<Option<(usize, usize)>>);
#[derive(Clone, Copy)]
pub struct SelectedShape(pub RwSignal<Option<(usize, usize)>>);
#[derive(Clone, Copy)]
pub struct MousePos(pub RwSignal<(f64, f64)>);
#[derive(Clone, Copy)]
pub struct InfoCollapsed(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub struct TextCollapsed(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub struct DetailedMapOpen(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub struct OriginalTextOpen(pub RwSignal<bool>);

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct Settings {
    info_collapsed: bool,
    text_collapsed: bool,
    last_period: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            info_collapsed: false,
            text_collapsed: false,
            last_period: Period::DEFAULT.key().to_string(),
        }
    }
}

const SETTINGS_KEY: &str = "formosa_settings";

fn initial_map_size() -> (f64, f64) {
    let width = web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(1200.0);
    ((width - 40.0).max(320.0), MAP_HEIGHT)
}

fn remove_loading_shell() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    if let Some(shell) = document.get_element_by_id("app-loading-shell") {
        shell.remove();
    }
}

struct KeydownBinding {
    window: web_sys::Window,
    _handler: Closure<dyn Fn(web_sys::KeyboardEvent)>,
}

impl Drop for KeydownBinding {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback(
            "keydown",
            self._handler.as_ref().unchecked_ref(),
        );
    }
}

thread_local! {
    static KEYDOWN_BINDING: RefCell<Option<KeydownBinding>> = const { RefCell::new(None) };
}

/// Root application component. Provides session state via context.
#[component]
pub fn App() -> impl IntoView {
    use gloo_storage::Storage;
    let saved: Settings = gloo_storage::LocalStorage::get(SETTINGS_KEY).unwrap_or_default();
    let initial_period = Period::from_key(&saved.last_period).unwrap_or(Period::DEFAULT);

    let state = MapState {
        period: RwSignal::new(initial_period),
        scene: RwSignal::new(None),
        load_nonce: RwSignal::new(0),
        load_state: RwSignal::new(LoadState::Loading),
        map_size: RwSignal::new(initial_map_size()),
        cache: StoredValue::new(HashMap::new()),
    };
    let viewport: RwSignal<Viewport> = RwSignal::new(Viewport::default());
    let hovered: RwSignal<Option<(usize, usize)>> = RwSignal::new(None);
    let selected: RwSignal<Option<(usize, usize)>> = RwSignal::new(None);
    let mouse_pos: RwSignal<(f64, f64)> = RwSignal::new((0.0, 0.0));
    let info_collapsed: RwSignal<bool> = RwSignal::new(saved.info_collapsed);
    let text_collapsed: RwSignal<bool> = RwSignal::new(saved.text_collapsed);
    let detailed_open: RwSignal<bool> = RwSignal::new(false);
    let original_open: RwSignal<bool> = RwSignal::new(false);

    provide_context(state);
    provide_context(viewport);
    provide_context(HoveredShape(hovered));
    provide_context(SelectedShape(selected));
    provide_context(MousePos(mouse_pos));
    provide_context(InfoCollapsed(info_collapsed));
    provide_context(TextCollapsed(text_collapsed));
    provide_context(DetailedMapOpen(detailed_open));
    provide_context(OriginalTextOpen(original_open));

    // Persist settings on any change.
    Effect::new(move || {
        let settings = Settings {
            info_collapsed: info_collapsed.get(),
            text_collapsed: text_collapsed.get(),
            last_period: state.period.get().key().to_string(),
        };
        let _ = gloo_storage::LocalStorage::set(SETTINGS_KEY, &settings);
    });

    // Hover and selection do not survive a period switch.
    Effect::new(move || {
        state.period.track();
        hovered.set(None);
        selected.set(None);
    });

    // Escape closes whichever modal is open.
    if let Some(window) = web_sys::window() {
        let handler = Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(
            move |e: web_sys::KeyboardEvent| {
                if e.key() == "Escape" {
                    detailed_open.set(false);
                    original_open.set(false);
                }
            },
        );
        let _ =
            window.add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref());
        KEYDOWN_BINDING.with(|slot| {
            *slot.borrow_mut() = Some(KeydownBinding {
                window,
                _handler: handler,
            });
        });
    }

    remove_loading_shell();
    load_period(state, initial_period);

    view! {
        <div style="max-width: 1280px; margin: 0 auto; padding: 16px 20px; font-family: 'Noto Sans SC', 'PingFang SC', 'Microsoft YaHei', sans-serif;">
            <header style="display: flex; flex-wrap: wrap; align-items: center; justify-content: space-between; gap: 12px; margin-bottom: 14px;">
                <div>
                    <h1 style="margin: 0; font-size: 22px; color: #1a1a2e;">"台湾历史地图"</h1>
                    <div style="font-size: 13px; color: #777;">
                        <span id="current-period-name">
                            {move || state.period.get().display_name()}
                        </span>
                        <span style="margin: 0 6px; color: #bbb;">"·"</span>
                        <span id="current-period-years">{move || state.period.get().years()}</span>
                    </div>
                </div>
                <div style="display: flex; flex-wrap: wrap; gap: 6px;">
                    {Period::ALL
                        .into_iter()
                        .map(|p| {
                            view! {
                                <button
                                    class="period-btn"
                                    class:active=move || state.period.get() == p
                                    data-period=p.key()
                                    on:click=move |_| load_period(state, p)
                                >
                                    {p.display_name()}
                                </button>
                            }
                        })
                        .collect_view()}
                    <button
                        id="reset-zoom"
                        class="period-btn"
                        title="重置视角"
                        on:click=move |_| viewport.update(|vp| vp.reset())
                    >
                        "重置视角"
                    </button>
                    {move || {
                        state
                            .period
                            .get()
                            .info()
                            .detailed_map
                            .map(|_| {
                                view! {
                                    <button
                                        id="view-detailed-map"
                                        class="period-btn"
                                        on:click=move |_| detailed_open.set(true)
                                    >
                                        "查看详细地图"
                                    </button>
                                }
                            })
                    }}
                </div>
            </header>

            <div style="display: flex; gap: 16px; align-items: flex-start; flex-wrap: wrap;">
                <div
                    id="historical-map"
                    style="position: relative; flex: 1 1 640px; min-width: 320px; background: #f4f6fb; border: 1px solid #e0e0e0; border-radius: 10px; overflow: hidden;"
                >
                    <MapCanvas />
                    <Legend />
                    <LoadingIndicator />
                </div>
                <aside style="flex: 0 1 320px; min-width: 280px;">
                    <InfoPanel />
                    <HistoricalTextPanel />
                </aside>
            </div>
        </div>
        <Tooltip />
        <DetailedMapModal />
        <OriginalTextModal />
    }
}

/// Spinner/error overlay on the map while geometry loads. On failure the
/// previous scene stays visible underneath the message.
#[component]
fn LoadingIndicator() -> impl IntoView {
    let state: MapState = expect_context();

    view! {
        {move || match state.load_state.get() {
            LoadState::Idle => ().into_any(),
            LoadState::Loading => {
                view! {
                    <div
                        id="loading-indicator"
                        style="position: absolute; inset: 0; z-index: 20; display: flex; align-items: center; justify-content: center; background: rgba(244,246,251,0.6); pointer-events: none;"
                    >
                        <span style="background: #fff; border: 1px solid #e0e0e0; border-radius: 6px; padding: 8px 14px; font-size: 13px; color: #555;">
                            "地图加载中..."
                        </span>
                    </div>
                }
                    .into_any()
            }
            LoadState::Failed(message) => {
                view! {
                    <div
                        id="loading-indicator"
                        style="position: absolute; inset: 0; z-index: 20; display: flex; align-items: center; justify-content: center; background: rgba(244,246,251,0.4); pointer-events: none;"
                    >
                        <span style="background: #fff; border: 1px solid #e57373; border-radius: 6px; padding: 8px 14px; font-size: 13px; color: #c62828;">
                            {message}
                        </span>
                    </div>
                }
                    .into_any()
            }
        }}
    }
}

/// Floating info card that follows the cursor over a hovered shape.
#[component]
fn Tooltip() -> impl IntoView {
    let state: MapState = expect_context();
    let HoveredShape(hovered) = expect_context();
    let MousePos(mouse_pos) = expect_context();

    let tooltip_content = Memo::new(move |_| {
        let (layer_idx, shape_idx) = hovered.get()?;
        state.scene.with(|s| {
            s.as_ref()
                .and_then(|scene| scene.shape(layer_idx, shape_idx))
                .map(|shape| shape.tooltip.clone())
        })
    });

    view! {
        {move || {
            let Some(content) = tooltip_content.get() else {
                return view! { <div style="display:none;" /> }.into_any();
            };
            let (x, y) = mouse_pos.get();
            view! {
                <div
                    id="tooltip"
                    style:left=format!("{}px", x + 10.0)
                    style:top=format!("{}px", y - 10.0)
                    style="position: fixed; pointer-events: none; z-index: 100; background: rgba(20,22,30,0.92); color: #eee; border-radius: 6px; padding: 8px 12px; max-width: 240px; font-size: 13px; box-shadow: 0 4px 16px rgba(0,0,0,0.4); text-align: left;"
                >
                    <strong style="font-size: 15px;">{content.heading}</strong>
                    {content
                        .lines
                        .into_iter()
                        .map(|line| {
                            view! {
                                <br />
                                <span style="color: #c9c9c9;">{line}</span>
                            }
                        })
                        .collect_view()}
                    {content
                        .note
                        .map(|note| {
                            view! {
                                <br />
                                <small style="color: #999;">{note}</small>
                            }
                        })}
                </div>
            }
                .into_any()
        }}
    }
}
