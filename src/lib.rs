//! Relays Persona login and logout events from the browser to the site's session backend.

pub mod backend;
pub mod browser;
pub mod config;
mod error;
pub use error::*;
pub mod identity;
pub mod logging;
pub mod relay;
