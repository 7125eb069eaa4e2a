#![doc = include_str!("../README.md")]

//! Fault-tree analysis engine.
//!
//! This crate orchestrates the full analysis pipeline: indexing, gate
//! expansion into supersets, MOCUS-style cut-set generation, reduction to
//! minimal cut sets, probability and importance analysis, result
//! packaging, DOT graphing, and XML report emission.

pub mod cancel;
pub mod errors;
pub mod expansion;
pub mod generator;
pub mod importance;
pub mod minimize;
pub mod pipeline;
pub mod report;
pub mod result;
pub mod settings;
pub mod superset;
pub mod visualization;
