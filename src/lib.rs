//! Streaming column statistics for large numeric matrices, with periodic (angular) columns
//! handled on the circle: linear and circular means and sigmas, and the optimal per-column
//! shift that moves the `±180°` seam into the emptiest region of each angular column.
//!
//! Data are pulled chunk by chunk from a [`blocks::BlockSource`]; see [`ColumnStatistics`]
//! for the entry points.
pub mod blocks;
pub mod constants;
pub mod conversion;
pub mod moments;
pub mod params;
pub mod shifts;
pub mod statistics;
pub mod stats_errors;

pub use blocks::{
    data_file::{DataFile, Delimiter},
    in_memory::InMemoryData,
    BlockSource, OpenBlocks,
};
pub use constants::{Block, Degree, Radian};
pub use moments::Moments;
pub use params::{JumpBoundary, StatsParams};
pub use shifts::{ColumnShift, ShiftReport};
pub use statistics::ColumnStatistics;
pub use stats_errors::StatsError;
