//! Configuration loader and schema types.
//!
//! This module exposes the settings schema, helpers to load it from disk and
//! the environment, and the conversion into [`ControllerOptions`].
//!
//! [`ControllerOptions`]: crate::controller::ControllerOptions

mod load;
mod options;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
