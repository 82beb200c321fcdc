//! Demo application: three switch samples driven by a terminal.

use crate::canvas::CellCanvas;
use crate::error::TuiError;
use crate::input::{is_quit, CellMetrics, InputHandler};
use crossterm::event::{self, Event as CrosstermEvent};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use flick_core::{Canvas, Color, Constraints, Event, Rect, Size, Widget};
use flick_widgets::{Corners, Switch, SwitchBackground, SwitchOptions, SwitchSnapshot, SwitchThumb};
use serde::Serialize;
use std::cell::Cell;
use std::io::{self, Stdout, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Logical size of every sample switch.
pub const SAMPLE_SIZE: Size = Size::new(96.0, 48.0);
/// Gap around and between samples.
pub const SAMPLE_GAP: f32 = 16.0;

// =============================================================================
// Terminal abstraction
// =============================================================================

/// Terminal operations used by the run loop.
pub trait Terminal {
    /// Enter raw mode, the alternate screen and mouse capture.
    fn enter(&mut self) -> Result<(), TuiError>;
    /// Restore the terminal.
    fn leave(&mut self) -> Result<(), TuiError>;
    /// Size in cells.
    fn size(&self) -> Result<(u16, u16), TuiError>;
    /// Wait up to `timeout` for an event.
    fn poll(&self, timeout: Duration) -> Result<bool, TuiError>;
    /// Read the next event.
    fn read_event(&self) -> Result<CrosstermEvent, TuiError>;
    /// Write a frame.
    fn draw(&mut self, canvas: &CellCanvas) -> Result<(), TuiError>;
}

/// Terminal on stdout.
pub struct CrosstermTerminal {
    stdout: Stdout,
}

impl CrosstermTerminal {
    /// Terminal on the process stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for CrosstermTerminal {
    fn enter(&mut self) -> Result<(), TuiError> {
        enable_raw_mode()?;
        execute!(
            self.stdout,
            EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;
        Ok(())
    }

    fn leave(&mut self) -> Result<(), TuiError> {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16), TuiError> {
        Ok(crossterm::terminal::size()?)
    }

    fn poll(&self, timeout: Duration) -> Result<bool, TuiError> {
        Ok(event::poll(timeout)?)
    }

    fn read_event(&self) -> Result<CrosstermEvent, TuiError> {
        Ok(event::read()?)
    }

    fn draw(&mut self, canvas: &CellCanvas) -> Result<(), TuiError> {
        canvas.flush(&mut self.stdout)?;
        self.stdout.flush()?;
        Ok(())
    }
}

// =============================================================================
// Samples
// =============================================================================

/// One switch on screen together with its host-side checked value.
struct Sample {
    name: &'static str,
    switch: Switch,
    pending: Rc<Cell<Option<bool>>>,
}

impl Sample {
    fn new(
        name: &'static str,
        options: &SwitchOptions,
        style: impl FnOnce(Switch) -> Switch,
    ) -> Self {
        let pending = Rc::new(Cell::new(None));
        let sink = Rc::clone(&pending);
        let switch = Switch::new(false, options, move |checked| {
            log::info!("{name}: checked changed to {checked}");
            sink.set(Some(checked));
        });
        Self {
            name,
            switch: style(switch),
            pending,
        }
    }

    /// Feed a reported value back into the switch.
    fn write_back(&mut self) -> bool {
        match self.pending.take() {
            Some(checked) => {
                self.switch.set_checked(checked);
                true
            }
            None => false,
        }
    }
}

/// Snapshot of one sample for headless output.
#[derive(Debug, Clone, Serialize)]
pub struct SampleSnapshot {
    /// Sample label
    pub name: &'static str,
    /// Switch state
    #[serde(flatten)]
    pub state: SwitchSnapshot,
}

fn thumb_border() -> Color {
    Color::rgb(227.0 / 255.0, 227.0 / 255.0, 227.0 / 255.0)
}

/// The demo screen: three switches stacked vertically.
pub struct DemoApp {
    samples: Vec<Sample>,
    input: InputHandler,
    viewport: Rect,
}

impl DemoApp {
    /// Build the three samples with shared `options`.
    #[must_use]
    pub fn new(options: &SwitchOptions, metrics: CellMetrics) -> Self {
        let samples = vec![
            Sample::new("default", options, |s| s),
            Sample::new("red", options, |s| {
                s.background(
                    SwitchBackground::new()
                        .checked_color(Color::RED)
                        .corners(Corners::Fixed(5.0)),
                )
                .thumb(SwitchThumb::new().corners(Corners::Fixed(5.0)))
            }),
            Sample::new("card", options, |s| {
                s.background(
                    SwitchBackground::new()
                        .grow_with_progress(0.2)
                        .corners(Corners::Fixed(5.0)),
                )
                .thumb(
                    SwitchThumb::new()
                        .color(Color::WHITE)
                        .corners(Corners::Fixed(5.0))
                        .border(thumb_border(), 0.5),
                )
            }),
        ];
        Self {
            samples,
            input: InputHandler::new(metrics),
            viewport: Rect::default(),
        }
    }

    /// Input converter for this app's cell metrics.
    #[must_use]
    pub const fn input(&self) -> &InputHandler {
        &self.input
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the app has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Bounds of the sample at `index`.
    #[must_use]
    pub fn sample_bounds(&self, index: usize) -> Option<Rect> {
        self.samples.get(index).map(|s| s.switch.bounds())
    }

    /// Committed value of the sample at `index`.
    #[must_use]
    pub fn is_checked(&self, index: usize) -> Option<bool> {
        self.samples.get(index).map(|s| s.switch.is_checked())
    }

    /// Lay the samples out inside `viewport`.
    pub fn layout(&mut self, viewport: Rect) {
        self.viewport = viewport;
        let mut y = viewport.y + SAMPLE_GAP;
        for sample in &mut self.samples {
            let size = sample.switch.measure(Constraints::tight(SAMPLE_SIZE));
            sample.switch.layout(Rect::new(
                viewport.x + SAMPLE_GAP,
                y,
                size.width,
                size.height,
            ));
            y += size.height + SAMPLE_GAP;
        }
        log::debug!("laid out {} samples in {viewport:?}", self.samples.len());
    }

    /// Dispatch a pointer or resize event that happened at `now`.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> bool {
        if let Event::Resize { width, height } = *event {
            self.layout(Rect::new(0.0, 0.0, width, height));
            return true;
        }
        let mut consumed = false;
        for sample in &mut self.samples {
            consumed |= sample.switch.event_at(event, now);
        }
        self.write_back();
        consumed
    }

    /// Advance animations by `dt`. Returns true while anything is moving.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut running = false;
        for sample in &mut self.samples {
            running |= sample.switch.animate(dt);
        }
        self.write_back() || running
    }

    /// Paint every sample.
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        for sample in &self.samples {
            sample.switch.paint(canvas);
        }
    }

    /// Serializable state of every sample.
    #[must_use]
    pub fn snapshots(&self) -> Vec<SampleSnapshot> {
        self.samples
            .iter()
            .map(|s| SampleSnapshot {
                name: s.name,
                state: s.switch.snapshot(),
            })
            .collect()
    }

    fn write_back(&mut self) -> bool {
        let mut changed = false;
        for sample in &mut self.samples {
            changed |= sample.write_back();
        }
        changed
    }
}

// =============================================================================
// Run loop
// =============================================================================

/// Frame pacing for the interactive loop.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Frames per second.
    pub fps: u32,
    /// Stop after this many frames.
    pub max_frames: Option<u64>,
    /// Screen color behind the samples.
    pub background: Color,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            max_frames: None,
            background: Color::rgb(0.98, 0.97, 1.0),
        }
    }
}

impl RunConfig {
    /// Duration of one frame.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

/// Run `app` on `terminal` until the user quits. Returns the frame count.
///
/// # Errors
///
/// Returns an error if the terminal fails; the terminal is restored first.
pub fn run<T: Terminal>(
    app: &mut DemoApp,
    terminal: &mut T,
    config: &RunConfig,
) -> Result<u64, TuiError> {
    terminal.enter()?;
    let result = run_loop(app, terminal, config);
    terminal.leave()?;
    result
}

fn run_loop<T: Terminal>(
    app: &mut DemoApp,
    terminal: &mut T,
    config: &RunConfig,
) -> Result<u64, TuiError> {
    let frame = config.frame_duration();
    let (columns, rows) = terminal.size()?;
    let mut canvas = CellCanvas::new(columns, rows, app.input().metrics(), config.background);
    app.layout(canvas.logical_bounds());

    let mut frames = 0u64;
    let mut last_tick = Instant::now();
    loop {
        if config.max_frames.is_some_and(|max| frames >= max) {
            return Ok(frames);
        }

        let (columns, rows) = terminal.size()?;
        if (columns, rows) != (canvas.columns(), canvas.rows()) {
            canvas.resize(columns, rows);
            app.layout(canvas.logical_bounds());
        }
        canvas.clear();
        app.paint(&mut canvas);
        terminal.draw(&canvas)?;
        frames += 1;

        let deadline = Instant::now() + frame;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !terminal.poll(remaining)? {
                break;
            }
            let raw = terminal.read_event()?;
            if let CrosstermEvent::Key(key) = &raw {
                if is_quit(key) {
                    log::debug!("quit after {frames} frames");
                    return Ok(frames);
                }
            }
            if let Some(event) = app.input().convert(&raw) {
                app.handle_event_at(&event, Instant::now());
            }
            if remaining.is_zero() {
                break;
            }
        }

        let now = Instant::now();
        app.tick(now - last_tick);
        last_tick = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use flick_core::{Point, RecordingCanvas};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    const FRAME: Duration = Duration::from_millis(16);

    fn app(options: &SwitchOptions) -> DemoApp {
        let mut app = DemoApp::new(options, CellMetrics::default());
        app.layout(Rect::new(0.0, 0.0, 320.0, 240.0));
        app
    }

    fn center(rect: Rect) -> Point {
        Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }

    fn settle(app: &mut DemoApp) {
        for _ in 0..200 {
            if !app.tick(FRAME) {
                return;
            }
        }
        panic!("app did not settle");
    }

    struct MockTerminal {
        size: (u16, u16),
        entered: bool,
        left: bool,
        draws: usize,
        events: RefCell<VecDeque<CrosstermEvent>>,
    }

    impl MockTerminal {
        fn new(events: Vec<CrosstermEvent>) -> Self {
            Self {
                size: (80, 40),
                entered: false,
                left: false,
                draws: 0,
                events: RefCell::new(events.into()),
            }
        }
    }

    impl Terminal for MockTerminal {
        fn enter(&mut self) -> Result<(), TuiError> {
            self.entered = true;
            Ok(())
        }
        fn leave(&mut self) -> Result<(), TuiError> {
            self.left = true;
            Ok(())
        }
        fn size(&self) -> Result<(u16, u16), TuiError> {
            Ok(self.size)
        }
        fn poll(&self, _timeout: Duration) -> Result<bool, TuiError> {
            Ok(!self.events.borrow().is_empty())
        }
        fn read_event(&self) -> Result<CrosstermEvent, TuiError> {
            self.events
                .borrow_mut()
                .pop_front()
                .ok_or(TuiError::TerminalNotAvailable)
        }
        fn draw(&mut self, _canvas: &CellCanvas) -> Result<(), TuiError> {
            self.draws += 1;
            Ok(())
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermEvent {
        CrosstermEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_layout_stacks_samples() {
        let app = app(&SwitchOptions::default());
        assert_eq!(app.len(), 3);
        assert_eq!(app.sample_bounds(0), Some(Rect::new(16.0, 16.0, 96.0, 48.0)));
        assert_eq!(app.sample_bounds(1), Some(Rect::new(16.0, 80.0, 96.0, 48.0)));
        assert_eq!(app.sample_bounds(2), Some(Rect::new(16.0, 144.0, 96.0, 48.0)));
        assert_eq!(app.sample_bounds(3), None);
    }

    #[test]
    fn test_click_writes_back_and_animates() {
        let mut app = app(&SwitchOptions::default());
        let p = center(app.sample_bounds(1).unwrap());
        let base = Instant::now();
        assert!(app.handle_event_at(&Event::mouse_down(p), base));
        assert!(app.handle_event_at(&Event::mouse_up(p), base + Duration::from_millis(30)));

        assert_eq!(app.is_checked(1), Some(true));
        assert_eq!(app.is_checked(0), Some(false));
        settle(&mut app);
        let snapshots = app.snapshots();
        assert_eq!(snapshots[1].name, "red");
        assert_eq!(snapshots[1].state.progress, 1.0);
        assert_eq!(snapshots[0].state.progress, 0.0);
    }

    #[test]
    fn test_resize_event_relayouts() {
        let mut app = app(&SwitchOptions::default());
        let resize = Event::Resize {
            width: 100.0,
            height: 100.0,
        };
        assert!(app.handle_event_at(&resize, Instant::now()));
        assert_eq!(app.sample_bounds(0), Some(Rect::new(16.0, 16.0, 96.0, 48.0)));
    }

    #[test]
    fn test_paint_draws_every_sample() {
        let app = app(&SwitchOptions::default());
        let mut canvas = RecordingCanvas::new();
        app.paint(&mut canvas);
        // Track and thumb each; the card thumb adds a border.
        assert_eq!(canvas.command_count(), 7);
    }

    #[test]
    fn test_frame_duration() {
        let config = RunConfig {
            fps: 50,
            ..RunConfig::default()
        };
        assert_eq!(config.frame_duration(), Duration::from_millis(20));
        let zero = RunConfig {
            fps: 0,
            ..RunConfig::default()
        };
        assert_eq!(zero.frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_run_stops_on_quit_and_restores_terminal() {
        let mut app = DemoApp::new(&SwitchOptions::default(), CellMetrics::default());
        let mut terminal = MockTerminal::new(vec![CrosstermEvent::Key(KeyEvent::new(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
        ))]);
        let frames = run(&mut app, &mut terminal, &RunConfig::default()).unwrap();
        assert_eq!(frames, 1);
        assert!(terminal.entered);
        assert!(terminal.left);
        assert_eq!(terminal.draws, 1);
    }

    #[test]
    fn test_run_routes_mouse_click() {
        let mut app = DemoApp::new(&SwitchOptions::default(), CellMetrics::default());
        // Sample 0 spans cells 4..28 x 2..8 with 4x8 cells.
        let mut terminal = MockTerminal::new(vec![
            mouse(MouseEventKind::Down(MouseButton::Left), 10, 4),
            mouse(MouseEventKind::Up(MouseButton::Left), 10, 4),
        ]);
        let config = RunConfig {
            max_frames: Some(3),
            ..RunConfig::default()
        };
        let frames = run(&mut app, &mut terminal, &config).unwrap();
        assert_eq!(frames, 3);
        assert_eq!(app.is_checked(0), Some(true));
    }
}
