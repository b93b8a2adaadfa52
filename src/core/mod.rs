//! Core algorithms – clone buffer geometry, motion, boundary re-centering,
//! progress and input.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The engine
//! is a plain value driven by an external scheduler calling
//! [`engine::ScrollEngine::step`].

pub mod boundary;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod motion;
pub mod progress;
