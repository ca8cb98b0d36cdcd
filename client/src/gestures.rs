//! Pan/zoom gesture session.
//!
//! DOM callbacks are translated into typed [`GestureEvent`]s and processed
//! synchronously here, keeping the gesture state machine independent of the
//! event plumbing. Policy: wheel and two-finger pinch zoom, right-button
//! drag and single-finger touch pan; the left button is reserved for
//! selection and never pans.

use crate::viewport::Viewport;

pub const RIGHT_BUTTON: i16 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// Wheel over the surface; position in surface-local coordinates.
    Wheel { x: f64, y: f64, delta: f64 },
    PointerDown { button: i16, x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { button: i16 },
    PointerLeave,
    TouchStart(Vec<TouchPoint>),
    TouchMove(Vec<TouchPoint>),
    TouchEnd { remaining: usize },
    /// The drawing surface changed size; any in-flight gesture would jump
    /// discontinuously, so the session is discarded instead.
    SurfaceResized,
}

/// Mutable state for the gesture in progress. Discarded whenever all
/// contact points release or the surface resizes.
#[derive(Debug, Default)]
pub struct GestureSession {
    right_drag: Option<(f64, f64)>,
    touch_pan: Option<(f64, f64)>,
    pinch_dist: Option<f64>,
}

impl GestureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A drag or pinch is currently tracking contact points.
    pub fn is_active(&self) -> bool {
        self.right_drag.is_some() || self.touch_pan.is_some() || self.pinch_dist.is_some()
    }

    /// True while a right-button drag is held (drives the grab cursor).
    pub fn is_dragging(&self) -> bool {
        self.right_drag.is_some()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Process one event against the viewport. Returns whether the
    /// viewport changed.
    pub fn apply(&mut self, event: GestureEvent, vp: &mut Viewport) -> bool {
        match event {
            GestureEvent::Wheel { x, y, delta } => {
                vp.zoom_at(delta, x, y);
                true
            }
            GestureEvent::PointerDown { button, x, y } => {
                if button == RIGHT_BUTTON {
                    self.right_drag = Some((x, y));
                }
                false
            }
            GestureEvent::PointerMove { x, y } => match self.right_drag {
                Some((last_x, last_y)) => {
                    vp.pan(x - last_x, y - last_y);
                    self.right_drag = Some((x, y));
                    true
                }
                None => false,
            },
            GestureEvent::PointerUp { button } => {
                if button == RIGHT_BUTTON {
                    self.right_drag = None;
                }
                false
            }
            GestureEvent::PointerLeave => {
                self.right_drag = None;
                false
            }
            GestureEvent::TouchStart(touches) => {
                match touches.as_slice() {
                    [a, b] => {
                        self.touch_pan = None;
                        self.pinch_dist = Some(distance(a, b));
                    }
                    [single] => {
                        self.pinch_dist = None;
                        self.touch_pan = Some((single.x, single.y));
                    }
                    _ => self.clear(),
                }
                false
            }
            GestureEvent::TouchMove(touches) => match touches.as_slice() {
                [a, b] => {
                    let new_dist = distance(a, b);
                    let changed = match self.pinch_dist {
                        Some(old_dist) if old_dist > 0.0 => {
                            let mid_x = (a.x + b.x) / 2.0;
                            let mid_y = (a.y + b.y) / 2.0;
                            vp.zoom_by(new_dist / old_dist, mid_x, mid_y);
                            true
                        }
                        _ => false,
                    };
                    self.pinch_dist = Some(new_dist);
                    changed
                }
                [single] => match self.touch_pan {
                    Some((last_x, last_y)) => {
                        vp.pan(single.x - last_x, single.y - last_y);
                        self.touch_pan = Some((single.x, single.y));
                        true
                    }
                    None => false,
                },
                _ => false,
            },
            GestureEvent::TouchEnd { remaining } => {
                if remaining == 0 {
                    self.clear();
                } else if remaining < 2 {
                    self.pinch_dist = None;
                }
                false
            }
            GestureEvent::SurfaceResized => {
                self.clear();
                false
            }
        }
    }
}

fn distance(a: &TouchPoint, b: &TouchPoint) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{MAX_SCALE, MIN_SCALE};

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual} (diff: {diff})"
        );
    }

    fn touch(x: f64, y: f64) -> TouchPoint {
        TouchPoint { x, y }
    }

    #[test]
    fn right_drag_pans_left_drag_does_not() {
        let mut session = GestureSession::new();
        let mut vp = Viewport::default();

        session.apply(GestureEvent::PointerDown { button: 0, x: 10.0, y: 10.0 }, &mut vp);
        assert!(!session.apply(GestureEvent::PointerMove { x: 30.0, y: 10.0 }, &mut vp));
        assert_eq!(vp, Viewport::default());

        session.apply(
            GestureEvent::PointerDown { button: RIGHT_BUTTON, x: 10.0, y: 10.0 },
            &mut vp,
        );
        assert!(session.apply(GestureEvent::PointerMove { x: 30.0, y: 25.0 }, &mut vp));
        assert_eq!((vp.offset_x, vp.offset_y), (20.0, 15.0));

        session.apply(GestureEvent::PointerUp { button: RIGHT_BUTTON }, &mut vp);
        assert!(!session.apply(GestureEvent::PointerMove { x: 99.0, y: 99.0 }, &mut vp));
        assert_eq!((vp.offset_x, vp.offset_y), (20.0, 15.0));
    }

    #[test]
    fn scale_stays_in_range_under_arbitrary_sequences() {
        let mut session = GestureSession::new();
        let mut vp = Viewport::default();

        let events = [
            GestureEvent::Wheel { x: 5.0, y: 5.0, delta: -5000.0 },
            GestureEvent::TouchStart(vec![touch(0.0, 0.0), touch(10.0, 0.0)]),
            GestureEvent::TouchMove(vec![touch(0.0, 0.0), touch(500.0, 0.0)]),
            GestureEvent::TouchMove(vec![touch(0.0, 0.0), touch(0.5, 0.0)]),
            GestureEvent::Wheel { x: 5.0, y: 5.0, delta: 8000.0 },
            GestureEvent::TouchMove(vec![touch(0.0, 0.0), touch(900.0, 0.0)]),
            GestureEvent::Wheel { x: -40.0, y: 700.0, delta: -9999.0 },
        ];
        for event in events {
            session.apply(event, &mut vp);
            assert!(
                vp.scale >= MIN_SCALE && vp.scale <= MAX_SCALE,
                "scale {} escaped range",
                vp.scale
            );
        }
    }

    #[test]
    fn pinch_zooms_around_midpoint() {
        let mut session = GestureSession::new();
        let mut vp = Viewport::default();

        session.apply(
            GestureEvent::TouchStart(vec![touch(100.0, 200.0), touch(300.0, 200.0)]),
            &mut vp,
        );
        let before = vp.screen_to_world(200.0, 200.0);
        // Fingers spread symmetrically: midpoint stays at (200, 200).
        assert!(session.apply(
            GestureEvent::TouchMove(vec![touch(50.0, 200.0), touch(350.0, 200.0)]),
            &mut vp,
        ));
        let after = vp.screen_to_world(200.0, 200.0);
        assert_close(vp.scale, 1.5);
        assert_close(after.0, before.0);
        assert_close(after.1, before.1);
    }

    #[test]
    fn single_finger_pans() {
        let mut session = GestureSession::new();
        let mut vp = Viewport::default();

        session.apply(GestureEvent::TouchStart(vec![touch(60.0, 60.0)]), &mut vp);
        assert!(session.apply(GestureEvent::TouchMove(vec![touch(72.0, 48.0)]), &mut vp));
        assert_eq!((vp.offset_x, vp.offset_y, vp.scale), (12.0, -12.0, 1.0));
    }

    #[test]
    fn releasing_all_contacts_discards_session() {
        let mut session = GestureSession::new();
        let mut vp = Viewport::default();

        session.apply(GestureEvent::TouchStart(vec![touch(0.0, 0.0)]), &mut vp);
        assert!(session.is_active());
        session.apply(GestureEvent::TouchEnd { remaining: 0 }, &mut vp);
        assert!(!session.is_active());
        assert!(!session.apply(GestureEvent::TouchMove(vec![touch(40.0, 0.0)]), &mut vp));
    }

    #[test]
    fn pinch_down_to_one_finger_stops_zooming() {
        let mut session = GestureSession::new();
        let mut vp = Viewport::default();

        session.apply(
            GestureEvent::TouchStart(vec![touch(0.0, 0.0), touch(100.0, 0.0)]),
            &mut vp,
        );
        session.apply(GestureEvent::TouchEnd { remaining: 1 }, &mut vp);
        // A stray two-point move without a fresh touchstart must not use the
        // stale distance as the ratio base.
        let scale_before = vp.scale;
        session.apply(
            GestureEvent::TouchMove(vec![touch(0.0, 0.0), touch(400.0, 0.0)]),
            &mut vp,
        );
        assert_close(vp.scale, scale_before);
    }

    #[test]
    fn surface_resize_invalidates_the_session() {
        let mut session = GestureSession::new();
        let mut vp = Viewport::default();

        session.apply(
            GestureEvent::PointerDown { button: RIGHT_BUTTON, x: 10.0, y: 10.0 },
            &mut vp,
        );
        assert!(session.is_dragging());
        session.apply(GestureEvent::SurfaceResized, &mut vp);
        assert!(!session.is_active());
        assert!(!session.apply(GestureEvent::PointerMove { x: 200.0, y: 200.0 }, &mut vp));
        assert_eq!(vp, Viewport::default());
    }
}
