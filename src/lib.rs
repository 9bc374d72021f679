//! Step-animated pathfinding and sorting engines.
//!
//! Every algorithm is an iterator of snapshots ([`Search`], [`Sorter`]) that a
//! host can drain directly or hand to a [`Scheduler`] for paced, cancellable
//! delivery. [`run_pathfinding`] and [`run_sorting`] wrap the common case.

pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod scheduler;
pub mod simulation;
pub mod statistics;

pub use algorithms::{PathAlgorithm, Search, SortAlgorithm, SortSnapshot, Sorter};
pub use error::{Result, VisualizerError};
pub use grid::{Cell, Grid, Position};
pub use scheduler::{CancelToken, Scheduler, Speed};
pub use simulation::{compare_pathfinding, compare_sorting, run_pathfinding, run_sorting};
pub use statistics::{RunStats, SearchOutcome, SearchReport, SortOutcome, SortReport};
