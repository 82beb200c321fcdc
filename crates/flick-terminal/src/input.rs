//! Input handling for the terminal demo.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use flick_core::{Event, Point, PointerId, PointerType};

/// Logical pixels covered by one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// Cell width in logical pixels
    pub width: f32,
    /// Cell height in logical pixels
    pub height: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width: 4.0,
            height: 8.0,
        }
    }
}

impl CellMetrics {
    /// Center of a cell in logical pixels.
    #[must_use]
    pub fn cell_center(&self, column: u16, row: u16) -> Point {
        Point::new(
            (f32::from(column) + 0.5) * self.width,
            (f32::from(row) + 0.5) * self.height,
        )
    }
}

/// Converts crossterm events into pointer events in logical pixels.
#[derive(Debug, Default)]
pub struct InputHandler {
    metrics: CellMetrics,
}

impl InputHandler {
    /// Create a new input handler.
    #[must_use]
    pub fn new(metrics: CellMetrics) -> Self {
        Self { metrics }
    }

    /// Cell metrics used for conversion.
    #[must_use]
    pub const fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// Convert a crossterm event to a pointer event.
    ///
    /// Only the left mouse button drives pointers; other input is dropped.
    #[must_use]
    pub fn convert(&self, event: &CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Mouse(mouse) => self.convert_mouse(mouse),
            CrosstermEvent::Resize(width, height) => Some(Event::Resize {
                width: f32::from(*width) * self.metrics.width,
                height: f32::from(*height) * self.metrics.height,
            }),
            _ => None,
        }
    }

    fn convert_mouse(&self, mouse: &MouseEvent) -> Option<Event> {
        let position = self.metrics.cell_center(mouse.column, mouse.row);
        let pointer_id = PointerId::MOUSE;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Event::PointerDown {
                pointer_id,
                pointer_type: PointerType::Mouse,
                position,
            }),
            MouseEventKind::Drag(MouseButton::Left) => Some(Event::PointerMove {
                pointer_id,
                position,
            }),
            MouseEventKind::Up(MouseButton::Left) => Some(Event::PointerUp {
                pointer_id,
                position,
            }),
            _ => None,
        }
    }
}

/// Whether a key event asks the demo to exit (`q`, `Esc` or `Ctrl+C`).
#[must_use]
pub fn is_quit(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
