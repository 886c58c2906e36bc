//! Core types and utilities

pub mod ingredient;
pub mod recipe;
pub mod units;

pub use ingredient::*;
pub use recipe::*;
pub use units::*;
