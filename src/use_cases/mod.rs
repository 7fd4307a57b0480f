//! Use cases (orchestration)
//!
//! This module contains use cases that orchestrate operations across multiple ports.

mod provision;

pub use provision::provision;
