//! Draggable toggle switch for flick.
//!
//! - [`SwitchState`]: the offset/progress state machine
//! - [`Switch`]: widget wiring the state machine to gestures and painting
//! - [`SwitchOptions`]: construction options, loadable from TOML

mod options;
mod style;
mod switch;
pub mod switch_state;

pub use options::{CommitMode, ConfigError, SwitchOptions};
pub use style::{Corners, SwitchBackground, SwitchThumb};
pub use switch::{Switch, DEFAULT_MIN_CROSS, DEFAULT_MIN_MAIN};
pub use switch_state::{
    nearest_bound, progress, SwitchPhase, SwitchSnapshot, SwitchState, UNCHECKED_OFFSET,
};
