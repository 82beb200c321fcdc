//! Toggle state machine.
//!
//! [`SwitchState`] tracks the thumb offset of a two-position switch,
//! turns drag deltas and release velocities into a settled boolean and
//! drives the settle animation. It owns no clock: the host calls
//! [`SwitchState::tick`] once per frame and every animated write happens
//! inside that call.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --set_extents--> Idle <--> Dragging
//!                                 |  ^        |
//!                                 v  |        v
//!                              Settling --> Cooldown
//! ```
//!
//! Each settle owns a generation number. Starting or cancelling a settle
//! bumps the counter, so a superseded settle can never write the offset.
//!
//! # Example
//!
//! ```
//! use flick_widgets::{CommitMode, SwitchOptions, SwitchState};
//! use std::time::Duration;
//!
//! let options = SwitchOptions::default()
//!     .interactive(true)
//!     .commit(CommitMode::Uncontrolled);
//! let mut state = SwitchState::new(false, &options, |checked| {
//!     println!("checked: {checked}");
//! });
//! state.set_extents(100.0, 50.0);
//! state.handle_fling_velocity(1500.0);
//! while state.tick(Duration::from_millis(16)) {}
//! assert_eq!(state.current_offset(), 50.0);
//! assert!(state.committed());
//! ```

use crate::options::{CommitMode, SwitchOptions};
use flick_core::{ScalarAnimator, TweenAnimator};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Offset of the unchecked bound. The checked bound is measured from here.
pub const UNCHECKED_OFFSET: f32 = 0.0;

/// Normalized position of `current` between `low` and `high`.
///
/// Returns 0 when the range is empty or inverted.
#[must_use]
pub fn progress(current: f32, low: f32, high: f32) -> f32 {
    if high <= low || current <= low {
        return 0.0;
    }
    if current >= high {
        return 1.0;
    }
    ((current - low) / (high - low)).clamp(0.0, 1.0)
}

/// The bound nearest to `value`. The exact center resolves to `high`.
#[must_use]
pub fn nearest_bound(value: f32, low: f32, high: f32) -> f32 {
    debug_assert!(
        low <= value && value <= high,
        "{value} outside [{low}, {high}]"
    );
    let center = (low + high) / 2.0;
    if value >= center {
        high
    } else {
        low
    }
}

/// Externally visible phase of a [`SwitchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchPhase {
    /// Waiting for valid extents
    Uninitialized,
    /// Resting
    Idle,
    /// Thumb follows the pointer
    Dragging,
    /// Settle animation running
    Settling,
    /// Busy period after a notification
    Cooldown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Dragging,
    Settling {
        generation: u64,
        target_checked: bool,
        report: bool,
    },
    Cooldown {
        remaining: Duration,
    },
}

/// Serializable view of a switch for logs and headless output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwitchSnapshot {
    /// Committed value
    pub checked: bool,
    /// Current thumb offset
    pub offset: f32,
    /// Offset of the checked bound
    pub checked_offset: f32,
    /// Normalized offset
    pub progress: f32,
    /// Current phase
    pub phase: SwitchPhase,
}

/// Draggable toggle state machine.
pub struct SwitchState<A: ScalarAnimator = TweenAnimator> {
    committed: bool,
    enabled: bool,
    interactive: bool,
    commit_mode: CommitMode,
    velocity_threshold: f32,
    debounce: Duration,

    box_extent: f32,
    thumb_extent: f32,
    checked_offset: f32,
    current_offset: f32,
    progress: f32,
    initialized: bool,

    phase: Phase,
    generation: u64,
    animator: A,
    on_checked_change: Box<dyn FnMut(bool)>,
}

impl SwitchState<TweenAnimator> {
    /// Create a switch using a [`TweenAnimator`] built from `options`.
    #[must_use]
    pub fn new(
        checked: bool,
        options: &SwitchOptions,
        on_checked_change: impl FnMut(bool) + 'static,
    ) -> Self {
        let animator = TweenAnimator::new(options.settle_duration(), options.easing);
        Self::with_animator(checked, options, animator, on_checked_change)
    }
}

impl<A: ScalarAnimator> SwitchState<A> {
    /// Create a switch driven by a custom animator.
    #[must_use]
    pub fn with_animator(
        checked: bool,
        options: &SwitchOptions,
        animator: A,
        on_checked_change: impl FnMut(bool) + 'static,
    ) -> Self {
        let velocity_threshold = if options.velocity_threshold.is_finite() {
            options.velocity_threshold.max(0.0)
        } else {
            SwitchOptions::default().velocity_threshold
        };
        Self {
            committed: checked,
            enabled: options.enabled,
            interactive: options.interactive,
            commit_mode: options.commit,
            velocity_threshold,
            debounce: options.debounce(),
            box_extent: 0.0,
            thumb_extent: 0.0,
            checked_offset: UNCHECKED_OFFSET,
            current_offset: UNCHECKED_OFFSET,
            progress: 0.0,
            initialized: false,
            phase: Phase::Idle,
            generation: 0,
            animator,
            on_checked_change: Box::new(on_checked_change),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Committed checked value.
    #[must_use]
    pub const fn committed(&self) -> bool {
        self.committed
    }

    /// Current thumb offset along the drag axis.
    #[must_use]
    pub const fn current_offset(&self) -> f32 {
        self.current_offset
    }

    /// Offset of the checked bound.
    #[must_use]
    pub const fn checked_offset(&self) -> f32 {
        self.checked_offset
    }

    /// Offset of the unchecked bound.
    #[must_use]
    pub const fn unchecked_offset(&self) -> f32 {
        UNCHECKED_OFFSET
    }

    /// Normalized thumb position in [0, 1].
    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Latest box extent.
    #[must_use]
    pub const fn box_extent(&self) -> f32 {
        self.box_extent
    }

    /// Latest thumb extent.
    #[must_use]
    pub const fn thumb_extent(&self) -> f32 {
        self.thumb_extent
    }

    /// Whether both extents are positive.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.box_extent > 0.0 && self.thumb_extent > 0.0
    }

    /// Whether the offset has been placed at its first bound.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the thumb has no room to move.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.checked_offset <= UNCHECKED_OFFSET
    }

    /// Whether a settle or its debounce is active.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Settling { .. } | Phase::Cooldown { .. })
    }

    /// Whether the thumb is following a drag.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging)
    }

    /// Whether input is accepted.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether drags move the thumb.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Commit mode.
    #[must_use]
    pub const fn commit_mode(&self) -> CommitMode {
        self.commit_mode
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> SwitchPhase {
        if !self.initialized {
            return SwitchPhase::Uninitialized;
        }
        match self.phase {
            Phase::Idle => SwitchPhase::Idle,
            Phase::Dragging => SwitchPhase::Dragging,
            Phase::Settling { .. } => SwitchPhase::Settling,
            Phase::Cooldown { .. } => SwitchPhase::Cooldown,
        }
    }

    /// Current settle generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The animator driving settles.
    #[must_use]
    pub const fn animator(&self) -> &A {
        &self.animator
    }

    /// Serializable view of the current state.
    #[must_use]
    pub const fn snapshot(&self) -> SwitchSnapshot {
        SwitchSnapshot {
            checked: self.committed,
            offset: self.current_offset,
            checked_offset: self.checked_offset,
            progress: self.progress,
            phase: self.phase(),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the change listener.
    pub fn set_on_checked_change(&mut self, on_checked_change: impl FnMut(bool) + 'static) {
        self.on_checked_change = Box::new(on_checked_change);
    }

    /// Enable or disable input.
    ///
    /// Disabling mid-drag settles the thumb to the nearer bound.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled && self.is_dragging() {
            log::debug!("disabled during drag at {:.1}", self.current_offset);
            self.handle_drag_cancel();
        }
    }

    /// Switch between interactive and report-only click handling.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Change the commit mode.
    pub fn set_commit_mode(&mut self, commit_mode: CommitMode) {
        self.commit_mode = commit_mode;
    }

    // =========================================================================
    // Host input
    // =========================================================================

    /// Update the measured extents along the drag axis.
    pub fn set_extents(&mut self, box_extent: f32, thumb_extent: f32) {
        self.box_extent = sanitize_extent(box_extent);
        self.thumb_extent = sanitize_extent(thumb_extent);
        self.checked_offset = UNCHECKED_OFFSET + (self.box_extent - self.thumb_extent).max(0.0);

        if !self.is_ready() {
            self.write_offset(self.current_offset);
            if self.is_dragging() {
                self.phase = Phase::Idle;
                self.snap_to_committed();
            }
            return;
        }
        if !self.initialized {
            self.initialize();
            return;
        }
        if self.is_degenerate() {
            if self.phase != Phase::Idle {
                log::debug!("geometry collapsed, resetting to committed bound");
            }
            self.cancel_settle();
            self.phase = Phase::Idle;
            self.snap_to_committed();
            return;
        }

        self.write_offset(self.current_offset);
        match self.phase {
            Phase::Settling {
                target_checked,
                report,
                ..
            } => self.start_settle(target_checked, None, report),
            Phase::Idle => {
                if self.current_offset != self.bound(self.committed) {
                    self.start_settle(self.committed, None, false);
                }
            }
            Phase::Dragging | Phase::Cooldown { .. } => {}
        }
    }

    /// The host's checked value changed.
    pub fn sync_external_checked(&mut self, value: bool) {
        if !self.initialized {
            self.committed = value;
            if self.is_ready() {
                self.initialize();
            }
            return;
        }
        if value == self.committed {
            return;
        }
        self.committed = value;
        log::debug!("host set checked = {value}");

        let target = self.bound(value);
        match self.phase {
            Phase::Settling { target_checked, .. } if target_checked == value => return,
            Phase::Cooldown { .. } if self.current_offset == target => return,
            _ => {}
        }
        if self.is_degenerate() {
            self.cancel_settle();
            self.snap_to_committed();
            return;
        }
        self.start_settle(value, None, false);
    }

    /// Apply a drag movement. Returns whether the offset changed.
    pub fn handle_drag_delta(&mut self, delta: f32) -> bool {
        if !delta.is_finite()
            || !self.enabled
            || !self.interactive
            || !self.initialized
            || self.is_animating()
            || self.is_degenerate()
        {
            return false;
        }
        let changed = self.write_offset(self.current_offset + delta);
        if changed {
            self.phase = Phase::Dragging;
        }
        changed
    }

    /// A drag ended with `velocity` along the axis.
    pub fn handle_fling_velocity(&mut self, velocity: f32) {
        if !self.enabled || !self.initialized || self.is_animating() || self.is_degenerate() {
            return;
        }
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let target_checked = if velocity.abs() > self.velocity_threshold {
            velocity > 0.0
        } else {
            self.nearest_is_checked()
        };
        log::debug!(
            "fling {velocity:.1} from {:.1} -> checked = {target_checked}",
            self.current_offset
        );
        self.start_settle(target_checked, Some(velocity), true);
    }

    /// A drag was aborted before release.
    pub fn handle_drag_cancel(&mut self) {
        if !self.initialized || self.is_animating() {
            return;
        }
        if self.is_degenerate() {
            self.phase = Phase::Idle;
            self.snap_to_committed();
            return;
        }
        let target_checked = self.nearest_is_checked();
        self.start_settle(target_checked, Some(0.0), true);
    }

    /// The pointer sequence was a click.
    pub fn handle_click(&mut self) {
        if !self.enabled || !self.initialized || !self.is_ready() || self.is_animating() {
            return;
        }
        let value = !self.committed;
        if self.is_degenerate() {
            self.notify(value);
            return;
        }
        if self.interactive {
            self.start_settle(value, None, true);
            return;
        }
        self.notify(value);
        if self.commit_mode == CommitMode::Uncontrolled && self.initialized {
            self.start_settle(value, None, false);
        }
    }

    /// Advance the settle and debounce by `dt`. Returns true while busy.
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.phase {
            Phase::Settling {
                generation,
                target_checked,
                report,
            } => {
                // Every generation bump replaces or clears this phase.
                debug_assert_eq!(generation, self.generation, "stale settle still installed");
                let value = self.animator.advance(dt);
                self.write_offset(value);
                log::trace!("settle {generation} offset {value:.2}");
                if !self.animator.is_running() {
                    self.finish_settle(target_checked, report);
                }
            }
            Phase::Cooldown { remaining } => {
                if dt >= remaining {
                    self.phase = Phase::Idle;
                    self.snap_to_committed();
                } else {
                    self.phase = Phase::Cooldown {
                        remaining: remaining - dt,
                    };
                }
            }
            Phase::Idle | Phase::Dragging => {}
        }
        self.is_animating()
    }

    /// Stop any settle or debounce without notifying. The offset stays put.
    pub fn cancel_settle(&mut self) {
        if self.is_animating() {
            log::debug!("cancelled settle {}", self.generation);
            self.phase = Phase::Idle;
        }
        self.generation = self.generation.wrapping_add(1);
        self.animator.cancel();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    const fn bound(&self, checked: bool) -> f32 {
        if checked {
            self.checked_offset
        } else {
            UNCHECKED_OFFSET
        }
    }

    fn nearest_is_checked(&self) -> bool {
        nearest_bound(self.current_offset, UNCHECKED_OFFSET, self.checked_offset)
            == self.checked_offset
    }

    /// Clamp and store an offset. Returns whether it changed.
    fn write_offset(&mut self, value: f32) -> bool {
        if !value.is_finite() {
            return false;
        }
        let clamped = value.clamp(UNCHECKED_OFFSET, self.checked_offset);
        let changed = clamped != self.current_offset;
        self.current_offset = clamped;
        self.progress = progress(clamped, UNCHECKED_OFFSET, self.checked_offset);
        changed
    }

    fn initialize(&mut self) {
        self.initialized = true;
        self.phase = Phase::Idle;
        self.snap_to_committed();
        log::debug!(
            "initialized at {:.1} (checked = {})",
            self.current_offset,
            self.committed
        );
    }

    fn snap_to_committed(&mut self) {
        let bound = self.bound(self.committed);
        self.write_offset(bound);
        self.animator.snap_to(self.current_offset);
    }

    fn start_settle(&mut self, target_checked: bool, velocity: Option<f32>, report: bool) {
        let seed = velocity.unwrap_or_else(|| self.animator.velocity());
        self.generation = self.generation.wrapping_add(1);
        self.animator.snap_to(self.current_offset);
        self.animator
            .animate_to(self.bound(target_checked), Some(seed));
        self.phase = Phase::Settling {
            generation: self.generation,
            target_checked,
            report,
        };
        log::debug!(
            "settle {} toward checked = {target_checked} from {:.1}",
            self.generation,
            self.current_offset
        );
    }

    fn finish_settle(&mut self, target_checked: bool, report: bool) {
        self.phase = Phase::Idle;
        self.write_offset(self.bound(target_checked));

        if report && !self.is_degenerate() {
            let checked = self.current_offset == self.checked_offset;
            if checked != self.committed {
                self.notify(checked);
                if !self.debounce.is_zero() {
                    self.phase = Phase::Cooldown {
                        remaining: self.debounce,
                    };
                    return;
                }
            }
        }
        self.snap_to_committed();
    }

    fn notify(&mut self, checked: bool) {
        if self.commit_mode == CommitMode::Uncontrolled {
            self.committed = checked;
        }
        log::debug!("checked changed -> {checked}");
        (self.on_checked_change)(checked);
    }
}

fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

impl<A: ScalarAnimator + fmt::Debug> fmt::Debug for SwitchState<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchState")
            .field("committed", &self.committed)
            .field("enabled", &self.enabled)
            .field("interactive", &self.interactive)
            .field("commit_mode", &self.commit_mode)
            .field("box_extent", &self.box_extent)
            .field("thumb_extent", &self.thumb_extent)
            .field("checked_offset", &self.checked_offset)
            .field("current_offset", &self.current_offset)
            .field("progress", &self.progress)
            .field("phase", &self.phase)
            .field("generation", &self.generation)
            .field("animator", &self.animator)
            .finish_non_exhaustive()
    }
}
