//! Terminal front end for the flick toggle switch.
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::suboptimal_flops)]
//!
//! Switches paint in logical pixels onto a [`CellCanvas`], where each
//! terminal cell covers a [`CellMetrics`] block. Mouse input is converted
//! back into pointer events at cell centers.
//!
//! - [`DemoApp`]: three styled samples with controlled write-back
//! - [`run`]: interactive loop over a [`Terminal`]
//! - [`run_headless`]: scripted replay printing JSON snapshots

mod app;
mod canvas;
mod error;
mod headless;
mod input;

pub use app::{
    run, CrosstermTerminal, DemoApp, RunConfig, SampleSnapshot, Terminal, SAMPLE_GAP, SAMPLE_SIZE,
};
pub use canvas::CellCanvas;
pub use error::TuiError;
pub use headless::{default_script, run_headless, FrameRecord, ScriptStep};
pub use input::{is_quit, CellMetrics, InputHandler};
