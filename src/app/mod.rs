//! Application layer: the event reader, demo state and input mapping.

pub mod event;
pub mod handler;
pub mod state;
