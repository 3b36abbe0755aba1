//! Core types and utilities for kinesig.

pub mod error;
pub mod numeric;
pub mod types;

pub use error::{KinesigError, Result};
pub use numeric::{create_numeric_array_of_same_type, NumericArray, NumericKind};
pub use types::*;
