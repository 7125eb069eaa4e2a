#![doc = include_str!("../README.md")]

pub mod product;
pub mod sieve;

pub use product::{mcub, product_probability, rare_event, ProbabilityError};
pub use sieve::union_probability;
