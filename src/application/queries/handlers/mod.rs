//! Query Handlers

mod artwork_handlers;

pub use artwork_handlers::*;
