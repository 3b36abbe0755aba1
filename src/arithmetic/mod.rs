//! Broadcasting arithmetic over scalars, arrays and nested arrays.

pub mod broadcast;
pub mod signal_ops;

pub use broadcast::{apply_op, Operand};
pub use signal_ops::{apply_signal_op, to_operand};
