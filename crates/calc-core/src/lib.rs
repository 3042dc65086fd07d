//! calc-core — wire types and configuration shared by the calculator client crates.
//! Nothing in here performs network I/O.

pub mod config;
pub mod wire;

pub use config::{CalcConfig, ConfigError, OverlapPolicy};
pub use wire::{ExpressionRecord, RecordId, Scalar, Statistics, Task};
