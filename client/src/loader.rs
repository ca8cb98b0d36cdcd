//! Period loading: fetch the period's TopoJSON assets, decode, cache, and
//! install the new scene — unless a newer period switch superseded the load
//! while a fetch was in flight.

use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use formosa_shared::geometry::FeatureCollection;
use formosa_shared::period::{Period, SourceFile};
use formosa_shared::topology::Topology;

use crate::app::MapState;
use crate::projection::Mercator;
use crate::scene::build_scene;

/// Hold the loading indicator briefly after a successful load so it does
/// not flicker on cache hits.
const INDICATOR_LINGER_MS: u32 = 500;

/// Loading-indicator state. `Failed` carries the user-visible message; the
/// previous scene stays installed underneath.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

/// Identity of one `load_period` call. A completed fetch may only install
/// its scene while its ticket is still current: same period, same nonce.
/// A later call — even to the same period — supersedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub period: Period,
    pub nonce: u64,
}

impl LoadTicket {
    pub fn is_current(&self, current_period: Period, current_nonce: u64) -> bool {
        self.period == current_period && self.nonce == current_nonce
    }
}

/// User-visible message when a period's geometry fails to load.
pub fn load_error_message(period: Period) -> String {
    match period {
        Period::Qing => "清代地图数据加载失败".to_string(),
        Period::Ming => "明郑地图数据加载失败".to_string(),
        Period::Japanese => "日据时期地图数据加载失败".to_string(),
        Period::DutchSpanish | Period::Modern => {
            "地图数据加载失败，请检查网络连接".to_string()
        }
    }
}

/// Decoded collections per asset URL, shared for the whole session. Period
/// revisits reuse the cache and never refetch.
pub type TopologyCache = HashMap<String, FeatureCollection>;

async fn fetch_collection(
    file: SourceFile,
    cache: StoredValue<TopologyCache>,
) -> Result<FeatureCollection, String> {
    if let Some(hit) = cache.with_value(|c| c.get(file.url).cloned()) {
        return Ok(hit);
    }

    let resp = gloo_net::http::Request::get(file.url)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    let text = resp.text().await.map_err(|e| format!("read error: {e}"))?;
    let topology = Topology::from_json(&text).map_err(|e| format!("parse error: {e}"))?;

    let decoded = match file.object {
        Some(name) => topology.feature_collection(name),
        None => topology.sole_feature_collection(),
    }
    .map_err(|e| format!("decode error: {e}"))?;

    if decoded.skipped > 0 {
        web_sys::console::warn_1(
            &format!("{}: skipped {} geometries", file.url, decoded.skipped).into(),
        );
    }

    let collection = decoded.collection;
    cache.update_value(|c| {
        c.insert(file.url.to_string(), collection.clone());
    });
    Ok(collection)
}

/// Switch the map to a period. Updates the current-period signal
/// immediately (button state, panels, legend), then fetches and installs
/// the scene. The previous scene stays visible until the new one is ready;
/// a stale completion is discarded via the ticket check.
pub fn load_period(state: MapState, period: Period) {
    state.period.set(period);
    let ticket = LoadTicket {
        period,
        nonce: state.load_nonce.get_untracked().wrapping_add(1),
    };
    state.load_nonce.set(ticket.nonce);
    state.load_state.set(LoadState::Loading);

    let still_current =
        move || ticket.is_current(state.period.get_untracked(), state.load_nonce.get_untracked());

    spawn_local(async move {
        let mut collections = Vec::new();
        for &file in period.sources().files() {
            match fetch_collection(file, state.cache).await {
                Ok(collection) => collections.push(collection),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("{} load failed: {e}", period.key()).into(),
                    );
                    if still_current() {
                        state
                            .load_state
                            .set(LoadState::Failed(load_error_message(period)));
                    }
                    return;
                }
            }
        }

        if !still_current() {
            return;
        }

        let (width, height) = state.map_size.get_untracked();
        let proj = Mercator::new(width, height);
        let scene = build_scene(period, &collections, &proj);
        if scene.dropped > 0 {
            web_sys::console::warn_1(
                &format!("{}: {} features failed to project", period.key(), scene.dropped)
                    .into(),
            );
        }
        state.scene.set(Some(scene));

        gloo_timers::future::TimeoutFuture::new(INDICATOR_LINGER_MS).await;
        if still_current() {
            state.load_state.set(LoadState::Idle);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_is_current_only_for_its_own_load() {
        let first = LoadTicket {
            period: Period::DutchSpanish,
            nonce: 1,
        };
        assert!(first.is_current(Period::DutchSpanish, 1));

        // A later load_period call bumps the nonce (and maybe the period);
        // the first ticket must refuse to install either way.
        assert!(!first.is_current(Period::Qing, 2));
        assert!(!first.is_current(Period::DutchSpanish, 2));
    }

    #[test]
    fn reload_of_the_same_period_supersedes_the_first() {
        let first = LoadTicket {
            period: Period::Ming,
            nonce: 7,
        };
        let second = LoadTicket {
            period: Period::Ming,
            nonce: 8,
        };
        assert!(!first.is_current(Period::Ming, second.nonce));
        assert!(second.is_current(Period::Ming, 8));
    }

    #[test]
    fn error_messages_name_the_period_map() {
        assert!(load_error_message(Period::Qing).contains("清代"));
        assert!(load_error_message(Period::Japanese).contains("日据"));
        assert!(load_error_message(Period::DutchSpanish).contains("网络"));
    }
}
