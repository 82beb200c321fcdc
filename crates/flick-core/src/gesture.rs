//! Drag gesture recognition from pointer events.
//!
//! [`DragGestureDetector`] turns raw pointer events into the four signals a
//! one-dimensional draggable control needs: per-move drag deltas, a release
//! velocity, taps, and aborted drags. It does not decide whether a drag
//! delta is applied; the host reports accepted deltas through
//! [`DragGestureDetector::consume_drag`] so that a tap is never reported for
//! a gesture that moved the control.

use crate::event::{Event, PointerId};
use crate::geometry::{Axis, Point};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Configuration for gesture recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureConfig {
    /// Longest press that still counts as a tap.
    pub tap_timeout: Duration,
    /// Samples older than this are ignored by the velocity estimate.
    pub velocity_window: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_timeout: Duration::from_millis(200),
            velocity_window: Duration::from_millis(100),
        }
    }
}

/// High-level signal produced by [`DragGestureDetector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Primary pointer moved along the axis by `delta`.
    Drag {
        /// Signed movement along the axis since the previous event.
        delta: f32,
    },
    /// Last pointer released after an accepted drag.
    Fling {
        /// Release velocity along the axis, units per second.
        velocity: f32,
    },
    /// Short press with no movement and no other pointer involved.
    Tap,
    /// An accepted drag was interrupted before release.
    DragCancel,
}

/// Estimates one-dimensional velocity from recent position samples.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(f32, Instant)>,
    window: Duration,
}

impl VelocityTracker {
    /// Create a tracker keeping samples from the last `window`.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            samples: VecDeque::new(),
            window,
        }
    }

    /// Record a position at `time`.
    pub fn add_sample(&mut self, position: f32, time: Instant) {
        self.samples.push_back((position, time));
        self.prune(time);
    }

    fn prune(&mut self, now: Instant) {
        while let Some(&(_, t)) = self.samples.front() {
            if now.saturating_duration_since(t) > self.window {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity in units per second over the retained window.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        let (Some(&(first_pos, first_time)), Some(&(last_pos, last_time))) =
            (self.samples.front(), self.samples.back())
        else {
            return 0.0;
        };
        let dt = last_time.saturating_duration_since(first_time).as_secs_f32();
        if self.samples.len() < 2 || dt < 0.001 {
            return 0.0;
        }
        (last_pos - first_pos) / dt
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Forget all samples.
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}

/// State of the pointer sequence currently being tracked.
#[derive(Debug, Clone)]
struct Tracking {
    primary: PointerId,
    pointers: Vec<PointerId>,
    max_pointers: usize,
    down_time: Instant,
    last_position: Point,
    has_move: bool,
    has_drag: bool,
    aborted: bool,
}

/// Single-axis drag/tap recognizer.
#[derive(Debug)]
pub struct DragGestureDetector {
    axis: Axis,
    config: GestureConfig,
    tracking: Option<Tracking>,
    velocity: VelocityTracker,
}

impl DragGestureDetector {
    /// Create a detector for `axis` with default config.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self::with_config(axis, GestureConfig::default())
    }

    /// Create a detector with custom config.
    #[must_use]
    pub fn with_config(axis: Axis, config: GestureConfig) -> Self {
        let velocity = VelocityTracker::new(config.velocity_window);
        Self {
            axis,
            config,
            tracking: None,
            velocity,
        }
    }

    /// Axis this detector measures along.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Get the gesture configuration.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Number of pointers currently down.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.tracking.as_ref().map_or(0, |t| t.pointers.len())
    }

    /// Whether a pointer sequence is in progress.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Mark the latest [`GestureEvent::Drag`] as applied by the host.
    pub fn consume_drag(&mut self) {
        if let Some(tracking) = self.tracking.as_mut() {
            tracking.has_drag = true;
        }
    }

    /// Process an event using the current time.
    pub fn process(&mut self, event: &Event) -> Option<GestureEvent> {
        self.process_at(event, Instant::now())
    }

    /// Process an event that happened at `now`.
    pub fn process_at(&mut self, event: &Event, now: Instant) -> Option<GestureEvent> {
        match event {
            Event::PointerDown {
                pointer_id,
                position,
                ..
            } => self.on_down(*pointer_id, *position, now),
            Event::PointerMove {
                pointer_id,
                position,
            } => self.on_move(*pointer_id, *position, now),
            Event::PointerUp {
                pointer_id,
                position,
            } => self.on_up(*pointer_id, *position, now),
            Event::PointerCancel { pointer_id } => self.on_cancel(*pointer_id),
            Event::Resize { .. } => None,
        }
    }

    fn on_down(&mut self, id: PointerId, position: Point, now: Instant) -> Option<GestureEvent> {
        let Some(tracking) = self.tracking.as_mut() else {
            self.velocity.reset();
            self.velocity.add_sample(self.axis.component(position), now);
            self.tracking = Some(Tracking {
                primary: id,
                pointers: vec![id],
                max_pointers: 1,
                down_time: now,
                last_position: position,
                has_move: false,
                has_drag: false,
                aborted: false,
            });
            return None;
        };

        if !tracking.pointers.contains(&id) {
            tracking.pointers.push(id);
        }
        tracking.max_pointers = tracking.max_pointers.max(tracking.pointers.len());

        // A second pointer turns the gesture into something this control
        // does not handle.
        if tracking.aborted {
            return None;
        }
        tracking.aborted = true;
        if tracking.has_drag {
            log::debug!("drag aborted by additional pointer {id:?}");
            Some(GestureEvent::DragCancel)
        } else {
            None
        }
    }

    fn on_move(&mut self, id: PointerId, position: Point, now: Instant) -> Option<GestureEvent> {
        let axis = self.axis;
        let tracking = self.tracking.as_mut()?;
        if tracking.primary != id || tracking.aborted {
            return None;
        }

        let delta = axis.component(position) - axis.component(tracking.last_position);
        tracking.last_position = position;
        self.velocity.add_sample(axis.component(position), now);

        if delta == 0.0 {
            return None;
        }
        tracking.has_move = true;
        Some(GestureEvent::Drag { delta })
    }

    fn on_up(&mut self, id: PointerId, position: Point, now: Instant) -> Option<GestureEvent> {
        let axis = self.axis;
        let tracking = self.tracking.as_mut()?;
        if !tracking.pointers.contains(&id) {
            return None;
        }
        if tracking.primary == id && !tracking.aborted {
            if axis.component(position) != axis.component(tracking.last_position) {
                tracking.has_move = true;
            }
            // Motion after the last move was never reported as a drag, so
            // the release only contributes its timestamp.
            self.velocity
                .add_sample(axis.component(tracking.last_position), now);
        }
        tracking.pointers.retain(|p| *p != id);
        if !tracking.pointers.is_empty() {
            return None;
        }

        let tracking = self.tracking.take()?;
        if tracking.aborted {
            return None;
        }
        if tracking.has_drag {
            let velocity = self.velocity.velocity();
            self.velocity.reset();
            return Some(GestureEvent::Fling { velocity });
        }
        self.velocity.reset();

        let held = now.saturating_duration_since(tracking.down_time);
        if tracking.max_pointers == 1 && !tracking.has_move && held < self.config.tap_timeout {
            Some(GestureEvent::Tap)
        } else {
            None
        }
    }

    fn on_cancel(&mut self, id: PointerId) -> Option<GestureEvent> {
        let tracking = self.tracking.as_ref()?;
        if !tracking.pointers.contains(&id) {
            return None;
        }
        let report = tracking.has_drag && !tracking.aborted;
        self.reset();
        report.then_some(GestureEvent::DragCancel)
    }

    /// Reset the detector state.
    pub fn reset(&mut self) {
        self.tracking = None;
        self.velocity.reset();
    }
}
