//! Platform abstraction layer
//!
//! Browser/native differences for input events. Storage lives in
//! `persistence`; timing comes from the host's refresh callback.

pub mod input;

pub use input::{HostAction, InputEvent, action_for, dispatch, suppress_default};
