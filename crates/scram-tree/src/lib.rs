#![doc = include_str!("../README.md")]

//! Fault-tree model and indexing.
//!
//! This crate defines the fault-tree entities (basic events, house events,
//! gates), the tree container with structural validation, and the
//! signed-index scheme used by the analysis engine.

pub mod event;
pub mod fault_tree;
pub mod index;

pub use event::{BasicEvent, ChildRef, Connective, Gate, HouseEvent};
pub use fault_tree::{FaultTree, ValidityError};
pub use index::{SignedChild, TreeIndex};
