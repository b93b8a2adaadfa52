//! Infinite horizontal scroll engine.
//!
//! The [`core`] module holds the motion logic: clone buffer geometry, eased
//! motion, boundary re-centering and cyclic progress.  It knows nothing about
//! terminals. The `loopscroll` binary drives it and renders its frames.

pub mod config;
pub mod core;

pub use crate::config::{AppConfig, EngineConfig};
pub use crate::core::engine::{Frame, ScrollEngine};
pub use crate::core::error::ScrollError;
pub use crate::core::geometry::{Block, CloneTag, Slot, Strip};
pub use crate::core::input::TouchSample;
