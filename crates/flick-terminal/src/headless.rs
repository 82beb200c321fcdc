//! Scripted, terminal-free run of the demo.
//!
//! Events are scheduled on frame numbers and delivered on a virtual clock,
//! so the output is identical from run to run.

use crate::app::{DemoApp, SampleSnapshot};
use crate::error::TuiError;
use flick_core::{Event, Point, Rect};
use serde::Serialize;
use std::io::Write;
use std::time::{Duration, Instant};

/// An event delivered at the start of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    /// Frame number
    pub frame: u64,
    /// Pointer event
    pub event: Event,
}

impl ScriptStep {
    /// Schedule `event` at `frame`.
    #[must_use]
    pub const fn new(frame: u64, event: Event) -> Self {
        Self { frame, event }
    }
}

/// One line of headless output.
#[derive(Debug, Serialize)]
pub struct FrameRecord {
    /// Frame number
    pub frame: u64,
    /// Virtual time in milliseconds
    pub time_ms: u64,
    /// Events delivered this frame
    pub events: usize,
    /// Sample states after the frame
    pub samples: Vec<SampleSnapshot>,
}

fn center(rect: Rect) -> Point {
    Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

/// Click the first sample, drag the second and fling the third.
///
/// Frame numbers assume 60 fps. Drags only move interactive switches.
#[must_use]
pub fn default_script(app: &DemoApp) -> Vec<ScriptStep> {
    let mut steps = Vec::new();

    if let Some(bounds) = app.sample_bounds(0) {
        let p = center(bounds);
        steps.push(ScriptStep::new(2, Event::mouse_down(p)));
        steps.push(ScriptStep::new(4, Event::mouse_up(p)));
    }

    if let Some(bounds) = app.sample_bounds(1) {
        let y = bounds.y + bounds.height / 2.0;
        let start = bounds.x + bounds.height / 2.0;
        steps.push(ScriptStep::new(60, Event::mouse_down(Point::new(start, y))));
        for i in 1..=6u8 {
            let x = start + f32::from(i) * 5.0;
            steps.push(ScriptStep::new(
                60 + 4 * u64::from(i),
                Event::mouse_move(Point::new(x, y)),
            ));
        }
        // Held still long enough to read as a slow release.
        steps.push(ScriptStep::new(
            100,
            Event::mouse_up(Point::new(start + 30.0, y)),
        ));
    }

    if let Some(bounds) = app.sample_bounds(2) {
        let y = bounds.y + bounds.height / 2.0;
        let start = bounds.x + bounds.height / 2.0;
        steps.push(ScriptStep::new(130, Event::mouse_down(Point::new(start, y))));
        steps.push(ScriptStep::new(131, Event::mouse_move(Point::new(start + 20.0, y))));
        steps.push(ScriptStep::new(132, Event::mouse_move(Point::new(start + 40.0, y))));
        steps.push(ScriptStep::new(133, Event::mouse_up(Point::new(start + 40.0, y))));
    }

    steps
}

/// Play `script` for `frames` frames of `frame` each, writing one JSON line
/// per frame to `out`. Returns the number of frames written.
///
/// # Errors
///
/// Returns an error if encoding or writing a record fails.
pub fn run_headless<W: Write>(
    app: &mut DemoApp,
    script: &[ScriptStep],
    frames: u64,
    frame: Duration,
    out: &mut W,
) -> Result<u64, TuiError> {
    let base = Instant::now();
    let mut pending = script.iter().peekable();
    let mut elapsed = Duration::ZERO;

    for index in 0..frames {
        let now = base + elapsed;
        let mut delivered = 0;
        while let Some(step) = pending.next_if(|s| s.frame <= index) {
            app.handle_event_at(&step.event, now);
            delivered += 1;
        }

        app.tick(frame);
        elapsed += frame;

        let record = FrameRecord {
            frame: index,
            time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            events: delivered,
            samples: app.snapshots(),
        };
        serde_json::to_writer(&mut *out, &record)?;
        out.write_all(b"\n")?;
        log::trace!("headless frame {index}: {delivered} events");
    }
    out.flush()?;
    Ok(frames)
}
