//! Configuration management for portsweep.
//!
//! Pool sizes and probe deadlines are fixed by the engine; only reporting
//! and presentation preferences are configurable.

mod settings;

pub use settings::{AppSettings, Paths};
