//! Core types and traits for the flick toggle-switch toolkit.
//!
//! This crate provides foundational types used by the switch widgets:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Axis`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Pointer events: [`Event`]
//! - Scalar animation: [`Tween`], [`ScalarAnimator`], [`TweenAnimator`]
//! - Drag recognition: [`DragGestureDetector`]
//! - Rendering seams: [`Widget`], [`Canvas`], [`RecordingCanvas`]

pub mod animation;
mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
pub mod gesture;
pub mod widget;

pub use animation::{Easing, ScalarAnimator, Tween, TweenAnimator};
pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand, StrokeStyle};
pub use event::{Event, PointerId, PointerType};
pub use geometry::{Axis, Point, Rect, Size};
pub use gesture::{DragGestureDetector, GestureConfig, GestureEvent, VelocityTracker};
pub use widget::{Canvas, LayoutResult, Widget};
