//! Core types shared across the dealherald crates.
//!
//! This crate contains the deal record shapes, identity-key derivation,
//! the shared error type, and environment/config helpers.

pub mod constants;
mod deal;
mod env;
mod error;

pub use deal::*;
pub use env::*;
pub use error::*;
