//! Filament Core
//!
//! Shared building blocks for the Filament stroke renderer: colors, logging
//! setup, profiling hooks and engine configuration.

pub mod color;
pub mod config;
pub mod logging;
pub mod profiling;

pub use color::Color;
pub use config::{Config, ProfilingMode};
