//! Integration test modules for Binaura
//!
//! - engine: Engine lifecycle, stick steering, output routing
//! - metering: Per-ear tick metering

pub mod engine;
pub mod metering;
