//! Command Handlers

mod display_handlers;

pub use display_handlers::*;
