//! Draggable switch widget.

use crate::options::SwitchOptions;
use crate::style::{SwitchBackground, SwitchThumb};
use crate::switch_state::{SwitchSnapshot, SwitchState};
use flick_core::{
    Axis, Canvas, Constraints, DragGestureDetector, Event, GestureEvent, LayoutResult, Rect, Size,
    Widget,
};
use std::time::{Duration, Instant};

/// Default minimum extent along the drag axis.
pub const DEFAULT_MIN_MAIN: f32 = 50.0;
/// Default minimum extent across the drag axis.
pub const DEFAULT_MIN_CROSS: f32 = 25.0;

/// Two-position switch driven by drags, flings and clicks.
#[derive(Debug)]
pub struct Switch {
    state: SwitchState,
    detector: DragGestureDetector,
    orientation: Axis,
    background: SwitchBackground,
    thumb: SwitchThumb,
    min_main: f32,
    min_cross: f32,
    thumb_aspect: f32,
    bounds: Rect,
}

impl Switch {
    /// Create a switch.
    #[must_use]
    pub fn new(
        checked: bool,
        options: &SwitchOptions,
        on_checked_change: impl FnMut(bool) + 'static,
    ) -> Self {
        Self {
            state: SwitchState::new(checked, options, on_checked_change),
            detector: DragGestureDetector::with_config(
                options.orientation,
                options.gesture_config(),
            ),
            orientation: options.orientation,
            background: SwitchBackground::default(),
            thumb: SwitchThumb::default(),
            min_main: DEFAULT_MIN_MAIN,
            min_cross: DEFAULT_MIN_CROSS,
            thumb_aspect: 1.0,
            bounds: Rect::default(),
        }
    }

    /// Set the track painter.
    #[must_use]
    pub fn background(mut self, background: SwitchBackground) -> Self {
        self.background = background;
        self
    }

    /// Set the thumb painter.
    #[must_use]
    pub fn thumb(mut self, thumb: SwitchThumb) -> Self {
        self.thumb = thumb;
        self
    }

    /// Set the minimum size along and across the drag axis.
    #[must_use]
    pub fn min_size(mut self, main: f32, cross: f32) -> Self {
        self.min_main = main.max(0.0);
        self.min_cross = cross.max(0.0);
        self
    }

    /// Thumb main extent per unit of cross extent.
    ///
    /// 1.0 gives a square thumb in square-pixel coordinates.
    #[must_use]
    pub fn thumb_aspect(mut self, aspect: f32) -> Self {
        if aspect.is_finite() && aspect > 0.0 {
            self.thumb_aspect = aspect;
        }
        self
    }

    /// Committed checked value.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.state.committed()
    }

    /// The host's checked value changed.
    pub fn set_checked(&mut self, checked: bool) {
        self.state.sync_external_checked(checked);
    }

    /// Enable or disable input.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.state.set_enabled(enabled);
        if !enabled {
            self.detector.reset();
        }
    }

    /// Drag axis.
    #[must_use]
    pub const fn orientation(&self) -> Axis {
        self.orientation
    }

    /// Underlying state machine.
    #[must_use]
    pub const fn state(&self) -> &SwitchState {
        &self.state
    }

    /// Mutable access to the state machine.
    pub fn state_mut(&mut self) -> &mut SwitchState {
        &mut self.state
    }

    /// Serializable view of the state.
    #[must_use]
    pub const fn snapshot(&self) -> SwitchSnapshot {
        self.state.snapshot()
    }

    /// Thumb cell at the current offset.
    #[must_use]
    pub fn thumb_rect(&self) -> Rect {
        let cross = self.orientation.cross(self.bounds.size());
        let offset = self.orientation.point(self.state.current_offset(), 0.0);
        let size = self.orientation.size(cross * self.thumb_aspect, cross);
        Rect::new(
            self.bounds.x + offset.x,
            self.bounds.y + offset.y,
            size.width,
            size.height,
        )
    }

    /// Handle an event that happened at `now`. Returns true if consumed.
    pub fn event_at(&mut self, event: &Event, now: Instant) -> bool {
        if !self.state.is_enabled() || !self.state.is_ready() {
            self.detector.reset();
            return false;
        }
        if let Event::PointerDown { position, .. } = event {
            if !self.detector.is_tracking() && !self.bounds.contains_point(position) {
                return false;
            }
        }

        let was_tracking = self.detector.is_tracking();
        match self.detector.process_at(event, now) {
            Some(GestureEvent::Drag { delta }) => {
                if self.state.handle_drag_delta(delta) {
                    self.detector.consume_drag();
                }
            }
            Some(GestureEvent::Fling { velocity }) => self.state.handle_fling_velocity(velocity),
            Some(GestureEvent::Tap) => self.state.handle_click(),
            Some(GestureEvent::DragCancel) => self.state.handle_drag_cancel(),
            None => return was_tracking || self.detector.is_tracking(),
        }
        true
    }
}

impl Widget for Switch {
    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.orientation.size(self.min_main, self.min_cross))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let size = bounds.size();
        let main = self.orientation.main(size);
        let thumb = self.orientation.cross(size) * self.thumb_aspect;
        self.state.set_extents(main, thumb);
        LayoutResult { size }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.background
            .paint(canvas, self.bounds, self.orientation, self.state.progress());
        self.thumb
            .paint(canvas, self.thumb_rect(), self.state.is_initialized());
    }

    fn event(&mut self, event: &Event) -> bool {
        self.event_at(event, Instant::now())
    }

    fn animate(&mut self, dt: Duration) -> bool {
        self.state.tick(dt)
    }

    fn is_interactive(&self) -> bool {
        self.state.is_enabled()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
