//! Integration tests for the threaded Binaura engine
//!
//! These start real ear, poller and heartbeat threads at ordinary priority
//! and observe them through shared sinks, shared sticks and the engine's
//! accessors. Tick-exact behaviour is covered by `scenario_tests`.
//!
//! Test categories:
//! - Engine: lifecycle, direction commits, output routing, settings
//! - Metering: tick counts, load, disabled meters
//!
//! Run with:
//! ```bash
//! cargo test -p binaura --test integration_tests
//! ```

mod helpers;
mod integration;
