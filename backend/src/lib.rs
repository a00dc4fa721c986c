//! Backend library modules.

pub mod config;
pub mod domain;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod export;
pub mod outbound;

#[cfg(test)]
pub mod test_support;

/// Runtime settings loaded by the ops binary and by embedding callers.
pub use config::Settings;
