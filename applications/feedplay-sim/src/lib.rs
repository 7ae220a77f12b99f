//! Feedplay Simulator Library
//!
//! Drives the autoplay engine over a simulated vertical feed described by a
//! TOML scenario, and reports which items played when.
//!
//! This library exposes the simulator components for testing purposes.

pub mod config;
pub mod error;
pub mod feed;
pub mod runner;
pub mod scenario;

// Re-export commonly used types for convenience
pub use config::{SimConfig, TraceFormat, ViewportSettings};
pub use error::{Result, SimError};
pub use feed::{SimFeed, SimPlayer};
pub use runner::{Report, Simulator, TraceEntry};
pub use scenario::{ItemSpec, Scenario, Step};
