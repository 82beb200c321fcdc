//! Input events for widgets.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer pressed
    PointerDown {
        /// Pointer ID
        pointer_id: PointerId,
        /// Pointer type
        pointer_type: PointerType,
        /// Position
        position: Point,
    },
    /// Pointer moved while tracked
    PointerMove {
        /// Pointer ID
        pointer_id: PointerId,
        /// New position
        position: Point,
    },
    /// Pointer released
    PointerUp {
        /// Pointer ID
        pointer_id: PointerId,
        /// Position of release
        position: Point,
    },
    /// Pointer stream interrupted by the platform
    PointerCancel {
        /// Pointer ID
        pointer_id: PointerId,
    },
    /// Window resized
    Resize {
        /// New width
        width: f32,
        /// New height
        height: f32,
    },
}

impl Event {
    /// Convenience constructor for a primary mouse press.
    #[must_use]
    pub const fn mouse_down(position: Point) -> Self {
        Self::PointerDown {
            pointer_id: PointerId::MOUSE,
            pointer_type: PointerType::Mouse,
            position,
        }
    }

    /// Convenience constructor for a primary mouse move.
    #[must_use]
    pub const fn mouse_move(position: Point) -> Self {
        Self::PointerMove {
            pointer_id: PointerId::MOUSE,
            position,
        }
    }

    /// Convenience constructor for a primary mouse release.
    #[must_use]
    pub const fn mouse_up(position: Point) -> Self {
        Self::PointerUp {
            pointer_id: PointerId::MOUSE,
            position,
        }
    }

    /// Position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { position, .. }
            | Self::PointerMove { position, .. }
            | Self::PointerUp { position, .. } => Some(*position),
            Self::PointerCancel { .. } | Self::Resize { .. } => None,
        }
    }
}

/// Pointer identifier for multi-pointer tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PointerId(pub u32);

impl PointerId {
    /// The single mouse pointer.
    pub const MOUSE: Self = Self(0);

    /// Create a new pointer ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Kind of device behind a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PointerType {
    /// Mouse
    #[default]
    Mouse,
    /// Finger on a touch surface
    Touch,
    /// Stylus
    Pen,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_constructors_use_mouse_pointer() {
        let down = Event::mouse_down(Point::new(1.0, 2.0));
        assert!(matches!(
            down,
            Event::PointerDown {
                pointer_id: PointerId::MOUSE,
                pointer_type: PointerType::Mouse,
                ..
            }
        ));
        assert_eq!(down.position(), Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_position_absent_for_cancel_and_resize() {
        let cancel = Event::PointerCancel {
            pointer_id: PointerId::new(3),
        };
        assert_eq!(cancel.position(), None);
        let resize = Event::Resize {
            width: 80.0,
            height: 24.0,
        };
        assert_eq!(resize.position(), None);
    }

    #[test]
    fn test_event_serde_roundtrip() {
        let event = Event::mouse_move(Point::new(4.0, 5.0));
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
