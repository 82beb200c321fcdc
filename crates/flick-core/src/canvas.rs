//! In-memory canvas.

use crate::draw::{BoxStyle, DrawCommand, StrokeStyle};
use crate::widget::Canvas;
use crate::{Color, Rect};

/// Canvas that keeps every paint call as a [`DrawCommand`].
///
/// Lets tests and benches inspect what a widget painted without a terminal.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands, oldest first.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing has been painted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Forget everything painted so far.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::filled_rect(rect, color));
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            radius,
            style: BoxStyle::fill(color),
        });
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, width: f32) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            radius,
            style: BoxStyle::stroke(StrokeStyle { color, width }),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_canvas_new() {
        let canvas = RecordingCanvas::new();
        assert!(canvas.is_empty());
        assert_eq!(canvas.command_count(), 0);
    }

    #[test]
    fn test_fill_rect() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rect(Rect::new(10.0, 20.0, 100.0, 50.0), Color::RED);

        assert_eq!(canvas.command_count(), 1);
        match &canvas.commands()[0] {
            DrawCommand::Rect {
                bounds,
                radius,
                style,
            } => {
                assert_eq!(*bounds, Rect::new(10.0, 20.0, 100.0, 50.0));
                assert_eq!(*radius, 0.0);
                assert_eq!(style.fill, Some(Color::RED));
            }
        }
    }

    #[test]
    fn test_fill_rounded_rect_keeps_radius() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rounded_rect(Rect::new(0.0, 0.0, 50.0, 25.0), 12.5, Color::WHITE);
        let DrawCommand::Rect { radius, .. } = &canvas.commands()[0];
        assert_eq!(*radius, 12.5);
    }

    #[test]
    fn test_stroke_rounded_rect() {
        let mut canvas = RecordingCanvas::new();
        canvas.stroke_rounded_rect(Rect::new(0.0, 0.0, 5.0, 5.0), 1.0, Color::BLACK, 0.5);
        let DrawCommand::Rect { style, .. } = &canvas.commands()[0];
        assert!(style.fill.is_none());
        assert_eq!(
            style.stroke,
            Some(StrokeStyle {
                color: Color::BLACK,
                width: 0.5
            })
        );
    }

    #[test]
    fn test_take_commands_clears() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rect(Rect::default(), Color::RED);
        canvas.fill_rect(Rect::default(), Color::WHITE);
        let taken = canvas.take_commands();
        assert_eq!(taken.len(), 2);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rect(Rect::default(), Color::RED);
        canvas.clear();
        assert!(canvas.is_empty());
    }
}
