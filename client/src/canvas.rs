use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{
    CanvasRenderingContext2d, CanvasWindingRule, HtmlCanvasElement, MouseEvent, PointerEvent,
    TouchEvent, WheelEvent,
};

use crate::app::{HoveredShape, MapState, MousePos, SelectedShape};
use crate::gestures::{GestureEvent, GestureSession, TouchPoint};
use crate::render_loop::RenderScheduler;
use crate::spatial::SpatialGrid;
use crate::viewport::Viewport;

/// Fixed logical height of the drawing surface.
pub const MAP_HEIGHT: f64 = 600.0;

const FILL_ALPHA: f64 = 0.7;
const FILL_ALPHA_HOVERED: f64 = 0.9;
const STROKE_WIDTH: f64 = 0.5;
const STROKE_WIDTH_HOVERED: f64 = 1.5;

struct ResizeBinding {
    window: web_sys::Window,
    _handler: Closure<dyn Fn()>,
}

impl Drop for ResizeBinding {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self._handler.as_ref().unchecked_ref());
    }
}

thread_local! {
    static RESIZE_BINDING: RefCell<Option<ResizeBinding>> = const { RefCell::new(None) };
}

fn local_coords(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (client_x - rect.left(), client_y - rect.top())
}

fn touch_points(canvas: &HtmlCanvasElement, e: &TouchEvent) -> Vec<TouchPoint> {
    let touches = e.touches();
    let mut points = Vec::with_capacity(touches.length() as usize);
    for i in 0..touches.length() {
        if let Some(touch) = touches.get(i) {
            let (x, y) = local_coords(canvas, touch.client_x() as f64, touch.client_y() as f64);
            points.push(TouchPoint { x, y });
        }
    }
    points
}

/// Route one gesture event through the session; the viewport signal only
/// notifies when the transform actually changed.
fn dispatch(viewport: RwSignal<Viewport>, session: &Rc<RefCell<GestureSession>>, event: GestureEvent) {
    let mut vp = viewport.get_untracked();
    let changed = session.borrow_mut().apply(event, &mut vp);
    if changed {
        viewport.set(vp);
    }
}

fn trace_shape(ctx: &CanvasRenderingContext2d, shape: &crate::scene::Shape) {
    ctx.begin_path();
    for polygon in &shape.polygons {
        for ring in &polygon.rings {
            let mut points = ring.iter();
            if let Some(&(x, y)) = points.next() {
                ctx.move_to(x, y);
                for &(x, y) in points {
                    ctx.line_to(x, y);
                }
                ctx.close_path();
            }
        }
    }
}

/// The map drawing surface: draws the active scene under the current
/// transform and feeds pointer/wheel/touch input to the gesture session.
#[component]
pub fn MapCanvas() -> impl IntoView {
    let state: MapState = expect_context();
    let scene = state.scene;
    let map_size = state.map_size;
    let period = state.period;
    let viewport: RwSignal<Viewport> = expect_context();
    let HoveredShape(hovered) = expect_context();
    let SelectedShape(selected) = expect_context();
    let MousePos(mouse_pos) = expect_context();

    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    let session: Rc<RefCell<GestureSession>> = Rc::new(RefCell::new(GestureSession::new()));

    // Hit-test grid, rebuilt whenever the scene changes.
    let grid: Rc<RefCell<SpatialGrid>> = Rc::new(RefCell::new(SpatialGrid::empty()));
    Effect::new({
        let grid = grid.clone();
        move || {
            scene.with(|s| {
                *grid.borrow_mut() = match s {
                    Some(scene) => SpatialGrid::build(scene),
                    None => SpatialGrid::empty(),
                };
            });
        }
    });

    let last_size: Rc<Cell<(u32, u32)>> = Rc::new(Cell::new((0, 0)));

    let session_render = session.clone();
    let last_size_render = last_size.clone();
    let scheduler = RenderScheduler::new(move || {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let canvas: &HtmlCanvasElement = &canvas;

        let Some(parent) = canvas.parent_element() else {
            return;
        };
        let w = parent.client_width().max(0) as u32;
        let h = MAP_HEIGHT as u32;
        if w == 0 {
            return;
        }

        let dpr = web_sys::window()
            .map(|win| win.device_pixel_ratio())
            .unwrap_or(1.0)
            .max(1.0);

        if last_size_render.get() != (w, h) {
            canvas.set_width((w as f64 * dpr) as u32);
            canvas.set_height((h as f64 * dpr) as u32);
            last_size_render.set((w, h));
            map_size.set((w as f64, h as f64));
            // A resize mid-gesture would jump; drop the session instead.
            let mut vp = viewport.get_untracked();
            session_render
                .borrow_mut()
                .apply(GestureEvent::SurfaceResized, &mut vp);
        }

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            return;
        };

        let vp = viewport.get_untracked();
        let hover = hovered.get_untracked();

        ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).ok();
        ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        ctx.translate(vp.offset_x, vp.offset_y).ok();
        ctx.scale(vp.scale, vp.scale).ok();
        ctx.set_stroke_style_str("#000");

        scene.with_untracked(|s| {
            let Some(scene) = s else {
                return;
            };
            for (layer_idx, layer) in scene.layers.iter().enumerate() {
                for (shape_idx, shape) in layer.shapes.iter().enumerate() {
                    let is_hovered = hover == Some((layer_idx, shape_idx));
                    trace_shape(&ctx, shape);
                    let alpha = if is_hovered {
                        FILL_ALPHA_HOVERED
                    } else {
                        FILL_ALPHA
                    };
                    ctx.set_fill_style_str(&shape.fill.css_rgba(alpha));
                    ctx.fill_with_canvas_winding_rule(CanvasWindingRule::Evenodd);
                    ctx.set_line_width(if is_hovered {
                        STROKE_WIDTH_HOVERED
                    } else {
                        STROKE_WIDTH
                    });
                    ctx.stroke();
                }
            }
        });
    });
    let scheduler = Rc::new(scheduler);

    // Repaint on scene, transform, or hover changes.
    let sched_state = scheduler.clone();
    Effect::new(move || {
        scene.track();
        viewport.track();
        hovered.track();
        sched_state.mark_dirty();
    });

    // Window resizes repaint too; the draw pass picks up the new width.
    {
        let sched_resize = scheduler.clone();
        if let Some(window) = web_sys::window() {
            let handler = Closure::<dyn Fn()>::new(move || sched_resize.mark_dirty());
            let _ = window
                .add_event_listener_with_callback("resize", handler.as_ref().unchecked_ref());
            RESIZE_BINDING.with(|slot| {
                *slot.borrow_mut() = Some(ResizeBinding {
                    window,
                    _handler: handler,
                });
            });
        }
    }

    // --- Input handlers ---

    let on_wheel = {
        let session = session.clone();
        move |e: WheelEvent| {
            e.prevent_default();
            dispatch(
                viewport,
                &session,
                GestureEvent::Wheel {
                    x: e.offset_x() as f64,
                    y: e.offset_y() as f64,
                    delta: e.delta_y(),
                },
            );
        }
    };

    let on_pointer_down = {
        let session = session.clone();
        move |e: PointerEvent| {
            if e.button() == crate::gestures::RIGHT_BUTTON {
                e.prevent_default();
                if let Some(el) = e.target().and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                {
                    el.set_pointer_capture(e.pointer_id()).ok();
                    el.style().set_property("cursor", "grabbing").ok();
                }
            }
            dispatch(
                viewport,
                &session,
                GestureEvent::PointerDown {
                    button: e.button(),
                    x: e.client_x() as f64,
                    y: e.client_y() as f64,
                },
            );
        }
    };

    let on_pointer_move = {
        let session = session.clone();
        let grid = grid.clone();
        move |e: PointerEvent| {
            if session.borrow().is_dragging() {
                dispatch(
                    viewport,
                    &session,
                    GestureEvent::PointerMove {
                        x: e.client_x() as f64,
                        y: e.client_y() as f64,
                    },
                );
                return;
            }

            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            let (sx, sy) = local_coords(&canvas, e.client_x() as f64, e.client_y() as f64);
            let vp = viewport.get_untracked();
            let (wx, wy) = vp.screen_to_world(sx, sy);
            let hit = scene.with_untracked(|s| {
                s.as_ref()
                    .and_then(|scene| grid.borrow().find_at(scene, wx, wy))
            });
            if hit != hovered.get_untracked() {
                hovered.set(hit);
            }
            if hit.is_some() {
                mouse_pos.set((e.client_x() as f64, e.client_y() as f64));
            }
        }
    };

    let on_pointer_up = {
        let session = session.clone();
        move |e: PointerEvent| {
            if e.button() == crate::gestures::RIGHT_BUTTON
                && let Some(el) = e.target().and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
            {
                el.style().set_property("cursor", "default").ok();
            }
            dispatch(
                viewport,
                &session,
                GestureEvent::PointerUp { button: e.button() },
            );
        }
    };

    let on_pointer_leave = {
        let session = session.clone();
        move |_: PointerEvent| {
            dispatch(viewport, &session, GestureEvent::PointerLeave);
            if hovered.get_untracked().is_some() {
                hovered.set(None);
            }
        }
    };

    let on_click = {
        let grid = grid.clone();
        move |e: MouseEvent| {
            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            let (sx, sy) = local_coords(&canvas, e.client_x() as f64, e.client_y() as f64);
            let vp = viewport.get_untracked();
            let (wx, wy) = vp.screen_to_world(sx, sy);
            let hit = scene.with_untracked(|s| {
                s.as_ref()
                    .and_then(|scene| grid.borrow().find_at(scene, wx, wy))
            });
            if hit != selected.get_untracked() {
                selected.set(hit);
            }
            if let Some((layer_idx, shape_idx)) = hit {
                scene.with_untracked(|s| {
                    if let Some(shape) =
                        s.as_ref().and_then(|scene| scene.shape(layer_idx, shape_idx))
                    {
                        web_sys::console::info_1(
                            &format!(
                                "{}: {}",
                                period.get_untracked().key(),
                                shape.tooltip.heading
                            )
                            .into(),
                        );
                    }
                });
            }
        }
    };

    let on_touch_start = {
        let session = session.clone();
        move |e: TouchEvent| {
            e.prevent_default();
            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            dispatch(
                viewport,
                &session,
                GestureEvent::TouchStart(touch_points(&canvas, &e)),
            );
        }
    };

    let on_touch_move = {
        let session = session.clone();
        move |e: TouchEvent| {
            e.prevent_default();
            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            dispatch(
                viewport,
                &session,
                GestureEvent::TouchMove(touch_points(&canvas, &e)),
            );
        }
    };

    let on_touch_end = {
        let session = session.clone();
        move |e: TouchEvent| {
            dispatch(
                viewport,
                &session,
                GestureEvent::TouchEnd {
                    remaining: e.touches().length() as usize,
                },
            );
        }
    };

    view! {
        <div
            style="position: relative; width: 100%; overflow: hidden;"
            style:height=format!("{MAP_HEIGHT}px")
            on:wheel=on_wheel
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointerleave=on_pointer_leave
            on:click=on_click
            on:touchstart=on_touch_start
            on:touchmove=on_touch_move
            on:touchend=on_touch_end
            on:contextmenu=move |e| e.prevent_default()
        >
            <canvas
                node_ref=canvas_ref
                style="position: absolute; inset: 0; width: 100%; height: 100%; touch-action: none;"
            />
        </div>
    }
}
