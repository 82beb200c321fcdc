//! Background and thumb painters for [`Switch`](crate::Switch).

use flick_core::{Axis, Canvas, Color, Rect, Size, StrokeStyle};
use serde::{Deserialize, Serialize};

/// Corner rounding of a painted box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corners {
    /// Fraction of the shorter side; 0.5 gives a pill
    Fraction(f32),
    /// Fixed radius in pixels
    Fixed(f32),
}

impl Corners {
    /// Radius for a box of `size`, never more than half the shorter side.
    #[must_use]
    pub fn radius(self, size: Size) -> f32 {
        let short = size.width.min(size.height).max(0.0);
        let radius = match self {
            Self::Fraction(f) => short * f.clamp(0.0, 0.5),
            Self::Fixed(r) => r.max(0.0),
        };
        radius.min(short / 2.0)
    }
}

impl Default for Corners {
    fn default() -> Self {
        Self::Fraction(0.5)
    }
}

/// Default on-surface color used for the unchecked track.
fn on_surface() -> Color {
    Color::rgb(0.11, 0.106, 0.122)
}

/// Default primary color used for the checked track.
fn primary() -> Color {
    Color::rgb(0.404, 0.314, 0.643)
}

/// Track painted behind the thumb.
///
/// The checked layer is drawn over the unchecked one with its alpha scaled
/// by progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchBackground {
    /// Color of the unchecked layer
    pub unchecked_color: Color,
    /// Color of the checked layer
    pub checked_color: Color,
    /// Corner rounding
    pub corners: Corners,
    /// When set, the cross extent grows with progress from this fraction
    pub min_cross_fill: Option<f32>,
}

impl Default for SwitchBackground {
    fn default() -> Self {
        Self {
            unchecked_color: on_surface().with_alpha(0.15),
            checked_color: primary(),
            corners: Corners::default(),
            min_cross_fill: None,
        }
    }
}

impl SwitchBackground {
    /// Create the default track.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the checked color.
    #[must_use]
    pub const fn checked_color(mut self, color: Color) -> Self {
        self.checked_color = color;
        self
    }

    /// Set the unchecked color.
    #[must_use]
    pub const fn unchecked_color(mut self, color: Color) -> Self {
        self.unchecked_color = color;
        self
    }

    /// Set the corner rounding.
    #[must_use]
    pub const fn corners(mut self, corners: Corners) -> Self {
        self.corners = corners;
        self
    }

    /// Grow the track across the axis with progress, starting at `min`.
    #[must_use]
    pub fn grow_with_progress(mut self, min: f32) -> Self {
        self.min_cross_fill = Some(min.clamp(0.0, 1.0));
        self
    }

    /// Track rectangle inside `bounds` for the given progress.
    #[must_use]
    pub fn track_rect(&self, bounds: Rect, axis: Axis, progress: f32) -> Rect {
        let Some(min) = self.min_cross_fill else {
            return bounds;
        };
        let main = axis.main(bounds.size());
        let cross = axis.cross(bounds.size());
        let filled = cross * progress.clamp(0.0, 1.0).max(min);
        let offset = axis.point(0.0, (cross - filled) / 2.0);
        let size = axis.size(main, filled);
        Rect::new(bounds.x + offset.x, bounds.y + offset.y, size.width, size.height)
    }

    /// Paint the track.
    pub fn paint(&self, canvas: &mut dyn Canvas, bounds: Rect, axis: Axis, progress: f32) {
        let rect = self.track_rect(bounds, axis, progress);
        let radius = self.corners.radius(rect.size());
        canvas.fill_rounded_rect(rect, radius, self.unchecked_color);
        if progress > 0.0 {
            let alpha = self.checked_color.a * progress.clamp(0.0, 1.0);
            canvas.fill_rounded_rect(rect, radius, self.checked_color.with_alpha(alpha));
        }
    }
}

/// Square thumb painted at the current offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchThumb {
    /// Fill color
    pub color: Color,
    /// Gap between the thumb cell and the painted box
    pub padding: f32,
    /// Corner rounding
    pub corners: Corners,
    /// Optional outline
    pub border: Option<StrokeStyle>,
}

impl Default for SwitchThumb {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            padding: 2.0,
            corners: Corners::default(),
            border: None,
        }
    }
}

impl SwitchThumb {
    /// Create the default thumb.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fill color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the padding.
    #[must_use]
    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Set the corner rounding.
    #[must_use]
    pub const fn corners(mut self, corners: Corners) -> Self {
        self.corners = corners;
        self
    }

    /// Add an outline.
    #[must_use]
    pub const fn border(mut self, color: Color, width: f32) -> Self {
        self.border = Some(StrokeStyle { color, width });
        self
    }

    /// Paint the thumb inside `cell`. Nothing is drawn while hidden.
    pub fn paint(&self, canvas: &mut dyn Canvas, cell: Rect, visible: bool) {
        if !visible {
            return;
        }
        let rect = cell.inset(self.padding);
        let radius = self.corners.radius(rect.size());
        canvas.fill_rounded_rect(rect, radius, self.color);
        if let Some(border) = self.border {
            canvas.stroke_rounded_rect(rect, radius, border.color, border.width);
        }
    }
}
