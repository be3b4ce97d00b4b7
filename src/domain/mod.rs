//! Domain models for cp4i-deploy
//!
//! This module contains pure domain objects representing the operators moving
//! through the pipeline. These types carry no I/O.

pub mod operator;

pub use operator::{OperatorMetadata, OperatorRecord, OperatorSet};
