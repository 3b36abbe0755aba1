//! Scalar reducers and cycle-wise aggregation.

pub mod cycles;
pub mod reducers;

pub use cycles::{aggregate, aggregate_signal, split_cycles, AggregationConfig, IndexOutput};
pub use reducers::{
    count, max, max_indices, mean, median, min, min_indices, range, standard_deviation,
    standard_deviation_sparse, sum, Reducer,
};
