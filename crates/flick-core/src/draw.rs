//! Draw commands recorded by [`RecordingCanvas`](crate::RecordingCanvas).
//!
//! All switch rendering reduces to rounded boxes.

use crate::{Color, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for box outlines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Box style for rectangles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl BoxStyle {
    /// Fill-only style.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Stroke-only style.
    #[must_use]
    pub const fn stroke(style: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(style),
        }
    }
}

/// A single recorded draw operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Rectangle with uniform corner radius
    Rect {
        /// Bounds
        bounds: Rect,
        /// Corner radius in pixels
        radius: f32,
        /// Fill and stroke
        style: BoxStyle,
    },
}

impl DrawCommand {
    /// Filled rectangle with square corners.
    #[must_use]
    pub const fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: 0.0,
            style: BoxStyle::fill(color),
        }
    }

    /// Bounds covered by the command.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        match self {
            Self::Rect { bounds, .. } => *bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_style_constructors() {
        let fill = BoxStyle::fill(Color::RED);
        assert_eq!(fill.fill, Some(Color::RED));
        assert!(fill.stroke.is_none());

        let stroke = BoxStyle::stroke(StrokeStyle::default());
        assert!(stroke.fill.is_none());
        assert_eq!(stroke.stroke.map(|s| s.width), Some(1.0));
    }

    #[test]
    fn test_filled_rect_has_square_corners() {
        let cmd = DrawCommand::filled_rect(Rect::new(1.0, 2.0, 3.0, 4.0), Color::WHITE);
        match cmd {
            DrawCommand::Rect { radius, .. } => assert_eq!(radius, 0.0),
        }
        assert_eq!(cmd.bounds(), Rect::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_draw_command_serializes() {
        let cmd = DrawCommand::filled_rect(Rect::new(0.0, 0.0, 10.0, 5.0), Color::BLACK);
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("Rect"));
    }
}
